//! Big-endian fixed-width integers and text payloads.
//!
//! The readers take the leading bytes of a slice and return `None` when it is
//! too short, leaving the choice of error to the caller.

use alloc::vec::Vec;

use crate::ParseError;

/// Reads a big-endian `u16` from the first two bytes.
pub fn read_u16(bytes: &[u8]) -> Option<u16> {
    let head = bytes.first_chunk::<2>()?;
    Some(u16::from_be_bytes(*head))
}

/// Reads a big-endian `u32` from the first four bytes.
pub fn read_u32(bytes: &[u8]) -> Option<u32> {
    let head = bytes.first_chunk::<4>()?;
    Some(u32::from_be_bytes(*head))
}

/// Appends `value` as two big-endian bytes.
pub fn write_u16(value: u16, out: &mut Vec<u8>) {
    out.extend_from_slice(&value.to_be_bytes());
}

/// Appends `value` as four big-endian bytes.
pub fn write_u32(value: u32, out: &mut Vec<u8>) {
    out.extend_from_slice(&value.to_be_bytes());
}

/// A three byte big-endian integer, zero-extended.
pub const fn u24_from_be(bytes: [u8; 3]) -> u32 {
    let [a, b, c] = bytes;
    u32::from_be_bytes([0, a, b, c])
}

/// The low three bytes of `value`, big-endian.
pub const fn u24_to_be(value: u32) -> [u8; 3] {
    let [_, a, b, c] = value.to_be_bytes();
    [a, b, c]
}

/// Interpret a payload as UTF-8 text.
pub fn read_text(bytes: &[u8]) -> Result<&str, ParseError> {
    Ok(core::str::from_utf8(bytes)?)
}

#[test]
fn integers() {
    use pretty_assertions::assert_eq;

    let bytes = [0x12, 0x34, 0x56, 0x78, 0x9A];
    assert_eq!(read_u16(&bytes), Some(0x1234));
    assert_eq!(read_u32(&bytes), Some(0x1234_5678));

    assert_eq!(read_u16(&bytes[..1]), None);
    assert_eq!(read_u32(&bytes[..3]), None);

    let mut out = Vec::new();
    write_u16(0x0060, &mut out);
    write_u32(6, &mut out);
    assert_eq!(out, [0x00, 0x60, 0x00, 0x00, 0x00, 0x06]);
}

#[test]
fn u24_truncates_top_byte() {
    use pretty_assertions::assert_eq;

    assert_eq!(u24_to_be(0xFF12_3456), [0x12, 0x34, 0x56]);
    assert_eq!(u24_from_be([0x12, 0x34, 0x56]), 0x12_3456);
    assert_eq!(u24_from_be(u24_to_be(0xFF12_3456)), 0x12_3456);
}

#[test]
fn text() {
    use pretty_assertions::assert_eq;

    assert_eq!(read_text(b"Piano"), Ok("Piano"));
    assert_eq!(read_text("Flügel".as_bytes()), Ok("Flügel"));
    assert!(matches!(
        read_text(&[0x50, 0xFF, 0x41]),
        Err(ParseError::InvalidText(_))
    ));
}
