#![doc = r#"
Variable-length quantities

Each byte holds seven bits of the value, most significant group first. The
high bit is set on every byte except the last.

```text
0x00       -> 00
0x7F       -> 7F
0x80       -> 81 00
0x3FFF     -> FF 7F
0x0FFFFFFF -> FF FF FF 7F
```
"#]

use alloc::vec::Vec;

use crate::ParseError;

/// The longest sequence a `u32` can need.
pub const MAX_LEN: usize = 5;

/// Decode a quantity from the start of `bytes`.
///
/// Returns the value and the number of bytes consumed, terminator included.
///
/// # Errors
/// - [`ParseError::TruncatedVarLen`] if `bytes` ends while the high bit is still set
/// - [`ParseError::VarLenOverflow`] if the quantity does not fit in a `u32`
pub fn decode(bytes: &[u8]) -> Result<(u32, usize), ParseError> {
    let mut value: u64 = 0;
    for (i, &byte) in bytes.iter().enumerate() {
        if i == MAX_LEN {
            return Err(ParseError::VarLenOverflow);
        }
        value = (value << 7) | u64::from(byte & 0x7F);
        if byte & 0x80 == 0 {
            let value = u32::try_from(value).map_err(|_| ParseError::VarLenOverflow)?;
            return Ok((value, i + 1));
        }
    }
    Err(ParseError::TruncatedVarLen)
}

/// Append the minimal encoding of `value` to `out`.
pub fn encode(value: u32, out: &mut Vec<u8>) {
    let len = encoded_len(value);
    for group in (0..len).rev() {
        let bits = ((value >> (7 * group)) & 0x7F) as u8;
        if group == 0 {
            out.push(bits);
        } else {
            out.push(bits | 0x80);
        }
    }
}

/// Returns the minimal encoding of `value` as a new buffer.
pub fn to_bytes(value: u32) -> Vec<u8> {
    let mut out = Vec::with_capacity(encoded_len(value));
    encode(value, &mut out);
    out
}

/// The number of bytes [`encode`] emits for `value`.
pub const fn encoded_len(value: u32) -> usize {
    match value {
        0..=0x7F => 1,
        0x80..=0x3FFF => 2,
        0x4000..=0x1F_FFFF => 3,
        0x20_0000..=0x0FFF_FFFF => 4,
        _ => 5,
    }
}

#[test]
fn decode_known_values() {
    use pretty_assertions::assert_eq;

    assert_eq!(decode(&[0x00]), Ok((0, 1)));
    assert_eq!(decode(&[0x40]), Ok((0x40, 1)));
    assert_eq!(decode(&[0x81, 0x00]), Ok((0x80, 2)));
    assert_eq!(decode(&[0xC0, 0x00]), Ok((0x2000, 2)));
    assert_eq!(decode(&[0xFF, 0x7F]), Ok((0x3FFF, 2)));
    assert_eq!(decode(&[0x81, 0x80, 0x00]), Ok((0x4000, 3)));
    assert_eq!(decode(&[0xFF, 0xFF, 0xFF, 0x7F]), Ok((0x0FFF_FFFF, 4)));
    assert_eq!(decode(&[0x8F, 0xFF, 0xFF, 0xFF, 0x7F]), Ok((u32::MAX, 5)));
}

#[test]
fn decode_stops_at_terminator() {
    use pretty_assertions::assert_eq;

    // trailing bytes belong to whatever follows
    assert_eq!(decode(&[0x83, 0x60, 0x90, 0x3C]), Ok((0x1E0, 2)));
}

#[test]
fn decode_truncated() {
    use pretty_assertions::assert_eq;

    assert_eq!(decode(&[]), Err(ParseError::TruncatedVarLen));
    assert_eq!(decode(&[0x81]), Err(ParseError::TruncatedVarLen));
    assert_eq!(decode(&[0xFF, 0xFF, 0xFF]), Err(ParseError::TruncatedVarLen));
}

#[test]
fn decode_overflow() {
    use pretty_assertions::assert_eq;

    assert_eq!(
        decode(&[0x80, 0x80, 0x80, 0x80, 0x80, 0x00]),
        Err(ParseError::VarLenOverflow)
    );
    // five bytes, but 35 significant bits
    assert_eq!(
        decode(&[0xFF, 0xFF, 0xFF, 0xFF, 0x7F]),
        Err(ParseError::VarLenOverflow)
    );
}

#[test]
fn encode_known_values() {
    use pretty_assertions::assert_eq;

    assert_eq!(to_bytes(0), [0x00]);
    assert_eq!(to_bytes(0x7F), [0x7F]);
    assert_eq!(to_bytes(0x80), [0x81, 0x00]);
    assert_eq!(to_bytes(0x2000), [0xC0, 0x00]);
    assert_eq!(to_bytes(0x1F_FFFF), [0xFF, 0xFF, 0x7F]);
    assert_eq!(to_bytes(0x0800_0000), [0xC0, 0x80, 0x80, 0x00]);
    assert_eq!(to_bytes(u32::MAX), [0x8F, 0xFF, 0xFF, 0xFF, 0x7F]);
}

#[test]
fn encoding_is_minimal_and_decodable() {
    use pretty_assertions::assert_eq;

    let mut samples = alloc::vec![0, 1, 0x7F, 0x80, 0x3FFF, 0x4000, u32::MAX];
    samples.extend((0..32).map(|shift| 1u32 << shift));
    samples.extend((1..32).map(|shift| (1u32 << shift) - 1));

    for value in samples {
        let bytes = to_bytes(value);
        assert!(bytes.len() <= MAX_LEN);
        assert_eq!(bytes.len(), encoded_len(value));
        assert_eq!(decode(&bytes), Ok((value, bytes.len())), "value {value:#X}");
        if bytes.len() > 1 {
            assert_ne!(bytes[0], 0x80, "leading empty group for {value:#X}");
        }
    }
}
