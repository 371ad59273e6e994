/// A structured view of a key signature payload
///
/// ```text
/// FF 59 02 sf mi
/// ```
///
/// `sf` counts sharps when positive and flats when negative.
/// `mi` is 0 for a major key and 1 for a minor key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct KeySignature {
    /// -7 (seven flats) to 7 (seven sharps)
    pub sharps: i8,
    /// True for a minor key
    pub minor: bool,
}

impl KeySignature {
    /// Interpret the two payload bytes.
    pub const fn from_bytes(bytes: [u8; 2]) -> Self {
        Self {
            sharps: bytes[0] as i8,
            minor: bytes[1] != 0,
        }
    }

    /// The two payload bytes.
    pub const fn to_bytes(&self) -> [u8; 2] {
        [self.sharps as u8, self.minor as u8]
    }

    /// Number of flats, zero for sharp keys.
    pub const fn flats(&self) -> u8 {
        if self.sharps < 0 {
            self.sharps.unsigned_abs()
        } else {
            0
        }
    }
}

impl From<[u8; 2]> for KeySignature {
    fn from(value: [u8; 2]) -> Self {
        Self::from_bytes(value)
    }
}

#[test]
fn c_minor() {
    use pretty_assertions::assert_eq;

    let key = KeySignature::from([0xFD, 0x01]);
    assert_eq!(key.sharps, -3);
    assert_eq!(key.flats(), 3);
    assert!(key.minor);
    assert_eq!(key.to_bytes(), [0xFD, 0x01]);

    let d_major = KeySignature::from_bytes([0x02, 0x00]);
    assert_eq!(d_major.flats(), 0);
    assert!(!d_major.minor);
}
