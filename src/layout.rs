//! On-disk layout of the fixed VHD footer.
//!
//! Every field is listed once, in wire order, with its byte offset, width
//! and encoding rule. The codec reads and writes through these entries only.

use std::ops::Range;

pub const FOOTER_SIZE: usize = 512;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Encoding {
    /// Multi-byte integer stored most significant byte first.
    BigEndian,
    /// Byte tags, single bytes and the identity block, copied as-is.
    Raw,
    /// Padding that is always zero on the wire.
    Zero,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Field {
    pub name: &'static str,
    pub offset: usize,
    pub width: usize,
    pub encoding: Encoding,
}

impl Field {
    const fn new(name: &'static str, offset: usize, width: usize, encoding: Encoding) -> Self {
        Self {
            name,
            offset,
            width,
            encoding,
        }
    }

    pub const fn end(&self) -> usize {
        self.offset + self.width
    }

    pub const fn range(&self) -> Range<usize> {
        self.offset..self.end()
    }
}

pub const COOKIE: Field = Field::new("cookie", 0, 8, Encoding::Raw);
pub const FEATURES: Field = Field::new("features", 8, 4, Encoding::BigEndian);
pub const FILE_FORMAT_VERSION: Field = Field::new("file_format_version", 12, 4, Encoding::BigEndian);
pub const DATA_OFFSET: Field = Field::new("data_offset", 16, 8, Encoding::BigEndian);
pub const TIMESTAMP: Field = Field::new("timestamp", 24, 4, Encoding::BigEndian);
pub const CREATOR_APPLICATION: Field = Field::new("creator_application", 28, 4, Encoding::Raw);
pub const CREATOR_VERSION: Field = Field::new("creator_version", 32, 4, Encoding::BigEndian);
pub const CREATOR_HOST_OS: Field = Field::new("creator_host_os", 36, 4, Encoding::Raw);
pub const ORIGINAL_SIZE: Field = Field::new("original_size", 40, 8, Encoding::BigEndian);
pub const CURRENT_SIZE: Field = Field::new("current_size", 48, 8, Encoding::BigEndian);
pub const CYLINDERS: Field = Field::new("cylinders", 56, 2, Encoding::BigEndian);
pub const HEADS: Field = Field::new("heads", 58, 1, Encoding::Raw);
pub const SECTORS: Field = Field::new("sectors", 59, 1, Encoding::Raw);
pub const DISK_TYPE: Field = Field::new("disk_type", 60, 4, Encoding::BigEndian);
pub const CHECKSUM: Field = Field::new("checksum", 64, 4, Encoding::BigEndian);
pub const UNIQUE_ID: Field = Field::new("unique_id", 68, 16, Encoding::Raw);
pub const SAVED_STATE: Field = Field::new("saved_state", 84, 1, Encoding::Raw);
pub const RESERVED: Field = Field::new("reserved", 85, 427, Encoding::Zero);

pub const FIELDS: [Field; 18] = [
    COOKIE,
    FEATURES,
    FILE_FORMAT_VERSION,
    DATA_OFFSET,
    TIMESTAMP,
    CREATOR_APPLICATION,
    CREATOR_VERSION,
    CREATOR_HOST_OS,
    ORIGINAL_SIZE,
    CURRENT_SIZE,
    CYLINDERS,
    HEADS,
    SECTORS,
    DISK_TYPE,
    CHECKSUM,
    UNIQUE_ID,
    SAVED_STATE,
    RESERVED,
];

// The table must tile the footer with no gaps or overlaps.
const _: () = {
    let mut end = 0;
    let mut i = 0;
    while i < FIELDS.len() {
        assert!(FIELDS[i].offset == end);
        end = FIELDS[i].end();
        i += 1;
    }
    assert!(end == FOOTER_SIZE);
};
