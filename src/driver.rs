//! Placing a footer at the end of a raw image.
//!
//! A file whose last 512 bytes carry the `conectix` cookie already has a
//! footer, which gets replaced in place. Anything else gets a new footer
//! appended, so stamping the same image twice only grows it once.

use std::fs::OpenOptions;
use std::path::Path;

use positioned_io2::{ReadAt, Size, WriteAt};
use tracing::{debug, info, warn};

use crate::checksum;
use crate::error::{FooterError, Result};
use crate::footer::{FixedDiskFooter, FooterBytes, has_existing_footer};
use crate::geometry::Geometry;
use crate::layout::FOOTER_SIZE;
use crate::util::ReadAtExt;

#[derive(Debug, Clone, Copy, Default)]
pub struct FooterOptions {
    /// Identity written to the footer. All zeros unless set.
    pub unique_id: [u8; 16],
    /// Fixed VHD timestamp. The current time when `None`.
    pub timestamp: Option<i32>,
}

/// Where the footer goes, and what was there before.
#[derive(Debug, Clone, Copy)]
pub struct FooterSlot {
    offset: u64,
    pub existing: Option<FixedDiskFooter>,
}

impl FooterSlot {
    /// Byte offset the footer is written at.
    pub fn offset(&self) -> u64 {
        self.offset
    }

    /// Size of the raw data in front of the footer. Same as the offset.
    pub fn data_len(&self) -> u64 {
        self.offset
    }

    pub fn is_overwrite(&self) -> bool {
        self.existing.is_some()
    }
}

pub fn locate_footer<S: ReadAt + Size + ?Sized>(storage: &S) -> Result<FooterSlot> {
    let len = storage.size()?.ok_or(FooterError::UnknownSize)?;
    let append = FooterSlot {
        offset: len,
        existing: None,
    };

    if len < FOOTER_SIZE as u64 {
        debug!(len, "image smaller than a footer");
        return Ok(append);
    }

    let tail_offset = len - FOOTER_SIZE as u64;
    let tail: FooterBytes = storage.read_pod_owned(tail_offset)?;
    if !has_existing_footer(tail.as_bytes()) {
        debug!(len, "no footer present");
        return Ok(append);
    }

    if !checksum::checksum_matches(&tail) {
        warn!(
            offset = tail_offset,
            "existing footer has a bad checksum, replacing it anyway"
        );
    }

    debug!(offset = tail_offset, "found existing footer");
    Ok(FooterSlot {
        offset: tail_offset,
        existing: Some(FixedDiskFooter::decode(tail.as_bytes())?),
    })
}

/// Builds a fixed-disk footer for the data in `storage` and writes it,
/// replacing a footer that is already there. Returns the footer as written,
/// checksum included.
pub fn write_fixed_footer<S>(
    storage: &mut S,
    geometry: Geometry,
    options: &FooterOptions,
) -> Result<FixedDiskFooter>
where
    S: ReadAt + WriteAt + Size,
{
    let slot = locate_footer(storage)?;
    let size = i64::try_from(slot.data_len()).map_err(|_| FooterError::FieldOverflow {
        field: "original_size",
        value: slot.data_len(),
        max: i64::MAX as u64,
    })?;

    let mut footer = FixedDiskFooter::new_fixed(size, geometry).with_unique_id(options.unique_id);
    if let Some(timestamp) = options.timestamp {
        footer = footer.with_timestamp(timestamp);
    }

    let bytes = footer.to_bytes();
    footer.checksum = checksum::compute_checksum(&bytes);

    info!(
        offset = slot.offset(),
        overwrite = slot.is_overwrite(),
        %geometry,
        "writing fixed VHD footer"
    );
    storage.write_all_at(slot.offset(), bytes.as_bytes())?;
    storage.flush()?;

    Ok(footer)
}

/// Opens an existing image for read/write and stamps it. The file is never created.
pub fn stamp_path<P: AsRef<Path>>(
    path: P,
    geometry: Geometry,
    options: &FooterOptions,
) -> Result<FixedDiskFooter> {
    let path = path.as_ref();
    let mut file = OpenOptions::new().read(true).write(true).open(path)?;
    debug!(path = %path.display(), "opened image");

    write_fixed_footer(&mut file, geometry, options)
}
