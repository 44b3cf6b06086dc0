use thiserror::Error;

#[derive(Error, Debug)]
pub enum FooterError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Malformed footer: expected 512 bytes, got {len}")]
    MalformedFooter { len: usize },
    #[error("Value {value} does not fit the {field} field (max {max})")]
    FieldOverflow {
        field: &'static str,
        value: u64,
        max: u64,
    },
    #[error("Storage does not report its size")]
    UnknownSize,
}

pub type Result<T> = std::result::Result<T, FooterError>;
