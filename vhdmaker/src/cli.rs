use std::path::PathBuf;

use clap::Parser;
use uuid::Uuid;

/// Turn a raw disk image into a fixed VHD by appending (or refreshing) its footer.
#[derive(Debug, Parser)]
#[command(name = "vhdmaker", version)]
pub struct Args {
    /// Raw image to stamp. Must already exist.
    pub file: PathBuf,
    /// Cylinder count (0-65535)
    pub cylinders: u64,
    /// Head count (0-255)
    pub heads: u64,
    /// Sectors per track (0-255)
    pub sectors: u64,

    /// Disk identity to record. All zeros unless given.
    #[arg(long, conflicts_with = "random_id")]
    pub unique_id: Option<Uuid>,

    /// Record a freshly generated random identity.
    #[arg(long)]
    pub random_id: bool,

    /// Seconds since 2000-01-01T00:00:00Z to record instead of the current time.
    #[arg(long, allow_negative_numbers = true)]
    pub timestamp: Option<i32>,

    /// Don't print the footer summary.
    #[arg(short, long)]
    pub quiet: bool,
}

impl Args {
    pub fn identity(&self) -> Uuid {
        match (self.unique_id, self.random_id) {
            (Some(id), _) => id,
            (None, true) => Uuid::new_v4(),
            (None, false) => Uuid::nil(),
        }
    }
}
