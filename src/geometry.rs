use crate::error::{FooterError, Result};

pub const SECTOR_SIZE: u64 = 512;

/// Cylinder/head/sector geometry as stored in the footer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Geometry {
    pub cylinders: u16,
    pub heads: u8,
    pub sectors: u8,
}

impl std::fmt::Display for Geometry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}/{}/{})", self.cylinders, self.heads, self.sectors)
    }
}

impl Geometry {
    /// Builds a geometry from wide values, rejecting any that do not fit.
    pub fn new(cylinders: u64, heads: u64, sectors: u64) -> Result<Self> {
        Ok(Self {
            cylinders: narrow("cylinders", cylinders, u16::MAX.into())?,
            heads: narrow("heads", heads, u8::MAX.into())?,
            sectors: narrow("sectors", sectors, u8::MAX.into())?,
        })
    }

    /// Capacity implied by the geometry. Not required to match the data size.
    pub fn capacity(&self) -> u64 {
        self.cylinders as u64 * self.heads as u64 * self.sectors as u64 * SECTOR_SIZE
    }
}

fn narrow<T: TryFrom<u64>>(field: &'static str, value: u64, max: u64) -> Result<T> {
    T::try_from(value).map_err(|_| FooterError::FieldOverflow { field, value, max })
}
