//! Fixed VHD footer: layout, encode/decode, checksum, and writing it onto a raw image.

pub mod checksum;
pub mod driver;
pub mod error;
pub mod footer;
pub mod geometry;
pub mod layout;
pub mod time;
mod util;

pub use checksum::{checksum_matches, compute_checksum, finalize_checksum};
pub use driver::{FooterOptions, FooterSlot, locate_footer, stamp_path, write_fixed_footer};
pub use error::{FooterError, Result};
pub use footer::{FixedDiskFooter, FooterBytes, has_existing_footer};
pub use geometry::Geometry;
pub use layout::FOOTER_SIZE;
