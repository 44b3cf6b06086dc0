use crate::footer::FooterBytes;
use crate::layout;

/// One's-complement checksum of a footer.
///
/// Starts from `-1` and subtracts every byte outside the checksum field,
/// wrapping at 32 bits. The checksum field itself is skipped, so whatever
/// it holds does not affect the result.
pub fn compute_checksum(bytes: &FooterBytes) -> i32 {
    let skip = layout::CHECKSUM.range();
    bytes
        .0
        .iter()
        .enumerate()
        .filter(|(i, _)| !skip.contains(i))
        .fold(-1_i32, |sum, (_, &b)| sum.wrapping_sub(b as i32))
}

/// Computes the checksum and stores it big-endian in the checksum field.
///
/// Must run after every other field has been encoded.
pub fn finalize_checksum(bytes: &mut FooterBytes) {
    let checksum = compute_checksum(bytes);
    bytes.0[layout::CHECKSUM.range()].copy_from_slice(&checksum.to_be_bytes());
}

/// Whether the stored checksum field agrees with the footer contents.
pub fn checksum_matches(bytes: &FooterBytes) -> bool {
    let mut stored = [0u8; 4];
    stored.copy_from_slice(&bytes.0[layout::CHECKSUM.range()]);
    i32::from_be_bytes(stored) == compute_checksum(bytes)
}
