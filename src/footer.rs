use bytemuck::{Pod, Zeroable};

use crate::checksum;
use crate::error::{FooterError, Result};
use crate::geometry::Geometry;
use crate::layout::{self, Encoding, FOOTER_SIZE, Field};
use crate::time::vhd_now;

/// The 512-byte wire form of a footer.
#[repr(transparent)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Pod, Zeroable)]
pub struct FooterBytes(pub [u8; FOOTER_SIZE]);

impl FooterBytes {
    pub fn zeroed() -> Self {
        Zeroable::zeroed()
    }

    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        let bytes: [u8; FOOTER_SIZE] = bytes
            .try_into()
            .map_err(|_| FooterError::MalformedFooter { len: bytes.len() })?;
        Ok(Self(bytes))
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    fn put(&mut self, field: Field, encoding: Encoding, bytes: &[u8]) {
        debug_assert_eq!(field.encoding, encoding, "{}", field.name);
        self.0[field.range()].copy_from_slice(bytes);
    }

    fn get<const N: usize>(&self, field: Field) -> [u8; N] {
        let mut out = [0u8; N];
        out.copy_from_slice(&self.0[field.range()]);
        out
    }
}

impl AsRef<[u8]> for FooterBytes {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

/// Logical content of a fixed-disk VHD footer, in host representation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedDiskFooter {
    pub cookie: [u8; 8],
    pub features: u32,
    pub file_format_version: u32,
    pub data_offset: i64,
    /// Seconds since 2000-01-01T00:00:00Z.
    pub timestamp: i32,
    pub creator_application: [u8; 4],
    pub creator_version: u32,
    pub creator_host_os: [u8; 4],
    pub original_size: i64,
    pub current_size: i64,
    pub geometry: Geometry,
    pub disk_type: i32,
    pub checksum: i32,
    pub unique_id: [u8; 16],
    pub saved_state: u8,
}

impl FixedDiskFooter {
    pub const COOKIE: [u8; 8] = *b"conectix";
    pub const FEATURE_RESERVED: u32 = 0x0000_0002;
    pub const FILE_FORMAT_VERSION: u32 = 0x0001_0000;
    /// Fixed disks have no dynamic header, so the offset is all ones.
    pub const FIXED_DATA_OFFSET: i64 = -1;
    pub const CREATOR_APPLICATION: [u8; 4] = *b"vhdm";
    pub const CREATOR_VERSION: u32 = 0x0001_0000;
    pub const CREATOR_HOST_OS: [u8; 4] = *b"Wi2k";
    pub const DISK_TYPE_FIXED: i32 = 2;

    /// A footer for `size` bytes of raw data, stamped with the current time
    /// and an all-zero identity. The checksum is left at zero until the
    /// footer is sealed with [`FixedDiskFooter::to_bytes`].
    pub fn new_fixed(size: i64, geometry: Geometry) -> Self {
        Self {
            cookie: Self::COOKIE,
            features: Self::FEATURE_RESERVED,
            file_format_version: Self::FILE_FORMAT_VERSION,
            data_offset: Self::FIXED_DATA_OFFSET,
            timestamp: vhd_now(),
            creator_application: Self::CREATOR_APPLICATION,
            creator_version: Self::CREATOR_VERSION,
            creator_host_os: Self::CREATOR_HOST_OS,
            original_size: size,
            current_size: size,
            geometry,
            disk_type: Self::DISK_TYPE_FIXED,
            checksum: 0,
            unique_id: [0; 16],
            saved_state: 0,
        }
    }

    pub fn with_unique_id(mut self, unique_id: [u8; 16]) -> Self {
        self.unique_id = unique_id;
        self
    }

    pub fn with_timestamp(mut self, timestamp: i32) -> Self {
        self.timestamp = timestamp;
        self
    }

    pub fn has_valid_cookie(&self) -> bool {
        self.cookie == Self::COOKIE
    }

    /// Lays every field out at its wire offset. The checksum field carries
    /// whatever `self.checksum` holds.
    pub fn encode(&self) -> FooterBytes {
        use Encoding::{BigEndian, Raw};

        let mut out = FooterBytes::zeroed();
        out.put(layout::COOKIE, Raw, &self.cookie);
        out.put(layout::FEATURES, BigEndian, &self.features.to_be_bytes());
        out.put(
            layout::FILE_FORMAT_VERSION,
            BigEndian,
            &self.file_format_version.to_be_bytes(),
        );
        out.put(layout::DATA_OFFSET, BigEndian, &self.data_offset.to_be_bytes());
        out.put(layout::TIMESTAMP, BigEndian, &self.timestamp.to_be_bytes());
        out.put(layout::CREATOR_APPLICATION, Raw, &self.creator_application);
        out.put(
            layout::CREATOR_VERSION,
            BigEndian,
            &self.creator_version.to_be_bytes(),
        );
        out.put(layout::CREATOR_HOST_OS, Raw, &self.creator_host_os);
        out.put(
            layout::ORIGINAL_SIZE,
            BigEndian,
            &self.original_size.to_be_bytes(),
        );
        out.put(layout::CURRENT_SIZE, BigEndian, &self.current_size.to_be_bytes());
        out.put(
            layout::CYLINDERS,
            BigEndian,
            &self.geometry.cylinders.to_be_bytes(),
        );
        out.put(layout::HEADS, Raw, &[self.geometry.heads]);
        out.put(layout::SECTORS, Raw, &[self.geometry.sectors]);
        out.put(layout::DISK_TYPE, BigEndian, &self.disk_type.to_be_bytes());
        out.put(layout::CHECKSUM, BigEndian, &self.checksum.to_be_bytes());
        out.put(layout::UNIQUE_ID, Raw, &self.unique_id);
        out.put(layout::SAVED_STATE, Raw, &[self.saved_state]);
        out
    }

    /// Encodes the footer and fills in its checksum. This is the form that
    /// gets written to disk.
    pub fn to_bytes(&self) -> FooterBytes {
        let mut out = self.encode();
        checksum::finalize_checksum(&mut out);
        out
    }

    /// Reads a footer back from its wire form. Neither the cookie nor the
    /// checksum is validated here.
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        let raw = FooterBytes::from_slice(bytes)?;
        let [heads] = raw.get(layout::HEADS);
        let [sectors] = raw.get(layout::SECTORS);
        let [saved_state] = raw.get(layout::SAVED_STATE);

        Ok(Self {
            cookie: raw.get(layout::COOKIE),
            features: u32::from_be_bytes(raw.get(layout::FEATURES)),
            file_format_version: u32::from_be_bytes(raw.get(layout::FILE_FORMAT_VERSION)),
            data_offset: i64::from_be_bytes(raw.get(layout::DATA_OFFSET)),
            timestamp: i32::from_be_bytes(raw.get(layout::TIMESTAMP)),
            creator_application: raw.get(layout::CREATOR_APPLICATION),
            creator_version: u32::from_be_bytes(raw.get(layout::CREATOR_VERSION)),
            creator_host_os: raw.get(layout::CREATOR_HOST_OS),
            original_size: i64::from_be_bytes(raw.get(layout::ORIGINAL_SIZE)),
            current_size: i64::from_be_bytes(raw.get(layout::CURRENT_SIZE)),
            geometry: Geometry {
                cylinders: u16::from_be_bytes(raw.get(layout::CYLINDERS)),
                heads,
                sectors,
            },
            disk_type: i32::from_be_bytes(raw.get(layout::DISK_TYPE)),
            checksum: i32::from_be_bytes(raw.get(layout::CHECKSUM)),
            unique_id: raw.get(layout::UNIQUE_ID),
            saved_state,
        })
    }
}

/// Whether `tail` (the last 512 bytes of a file) already holds a footer.
///
/// Only the cookie is inspected. Anything that fails to decode counts as
/// "no footer".
pub fn has_existing_footer(tail: &[u8]) -> bool {
    FixedDiskFooter::decode(tail).is_ok_and(|footer| footer.has_valid_cookie())
}

fn tag(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|&b| {
            if b.is_ascii_graphic() || b == b' ' {
                b as char
            } else {
                '.'
            }
        })
        .collect()
}

fn unique_id_str(id: &[u8; 16]) -> String {
    let hex = |r: std::ops::Range<usize>| -> String {
        id[r].iter().map(|b| format!("{b:02x}")).collect()
    };
    format!(
        "{}-{}-{}-{}-{}",
        hex(0..4),
        hex(4..6),
        hex(6..8),
        hex(8..10),
        hex(10..16)
    )
}

impl std::fmt::Display for FixedDiskFooter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("VHD Footer Summary:\n-------------------\n")?;
        writeln!(f, "{:<20}: {}", "Cookie", tag(&self.cookie))?;
        writeln!(f, "{:<20}: {:#010X}", "Features", self.features)?;
        writeln!(
            f,
            "{:<20}: Major: {}, Minor: {}",
            "File format version",
            self.file_format_version >> 16,
            self.file_format_version & 0xFFFF
        )?;
        writeln!(f, "{:<20}: {:#018X}", "Data offset", self.data_offset)?;
        writeln!(f, "{:<20}: {}", "Timestamp", self.timestamp)?;
        writeln!(
            f,
            "{:<20}: {}",
            "Creator application",
            tag(&self.creator_application)
        )?;
        writeln!(
            f,
            "{:<20}: Major: {}, Minor: {}",
            "Creator version",
            self.creator_version >> 16,
            self.creator_version & 0xFFFF
        )?;
        writeln!(f, "{:<20}: {}", "Creator OS", tag(&self.creator_host_os))?;
        writeln!(
            f,
            "{:<20}: {} MiB ({} bytes)",
            "Original disk size",
            self.original_size >> 20,
            self.original_size
        )?;
        writeln!(
            f,
            "{:<20}: {} MiB ({} bytes)",
            "Current disk size",
            self.current_size >> 20,
            self.current_size
        )?;
        writeln!(f, "{:<20}: {}", "Geometry", self.geometry)?;
        writeln!(f, "{:<20}: {}", "Disk type", self.disk_type)?;
        writeln!(f, "{:<20}: {:#010X}", "Checksum", self.checksum)?;
        writeln!(f, "{:<20}: {}", "Unique ID", unique_id_str(&self.unique_id))?;
        writeln!(f, "{:<20}: {}", "Saved state", self.saved_state)
    }
}
