use crate::{ParseError, UMicros, codec::fixed};

#[doc = r#"
The payload of a tempo meta event: microseconds per quarter note

Stored in three bytes on the wire, so values above `0xFFFFFF` cannot be
represented.

# Example
```rust
# use smfcodec::prelude::*;
let tempo = Tempo::new(500_000).unwrap();
assert_eq!(tempo.to_bytes(), [0x07, 0xA1, 0x20]);
assert_eq!(tempo.beats_per_minute(), 120.);

assert!(Tempo::new(0x0100_0000).is_none());
```
"#]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "u32", into = "u32")
)]
pub struct Tempo(u32);

impl Tempo {
    /// The largest tempo three bytes can hold.
    pub const MAX: u32 = 0x00FF_FFFF;

    /// A tempo of `micros_per_quarter_note`, if it fits in 24 bits.
    pub const fn new(micros_per_quarter_note: u32) -> Option<Self> {
        if micros_per_quarter_note > Self::MAX {
            return None;
        }
        Some(Self(micros_per_quarter_note))
    }

    /// From the three payload bytes.
    pub const fn from_bytes(bytes: [u8; 3]) -> Self {
        Self(fixed::u24_from_be(bytes))
    }

    /// The three payload bytes.
    pub const fn to_bytes(&self) -> [u8; 3] {
        fixed::u24_to_be(self.0)
    }

    /// The raw value.
    pub const fn as_u32(&self) -> u32 {
        self.0
    }

    /// The length of a quarter note at this tempo.
    pub const fn micros_per_quarter_note(&self) -> UMicros {
        UMicros::new(self.0 as u64)
    }

    /// Quarter notes per minute.
    pub fn beats_per_minute(&self) -> f64 {
        60_000_000. / self.0 as f64
    }
}

impl Default for Tempo {
    /// 120 beats per minute, the tempo a track has until told otherwise
    fn default() -> Self {
        Self(500_000)
    }
}

impl TryFrom<u32> for Tempo {
    type Error = ParseError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::new(value).ok_or(ParseError::InvalidTempo(value))
    }
}

impl From<Tempo> for u32 {
    fn from(value: Tempo) -> Self {
        value.0
    }
}

#[test]
fn tempo_bytes() {
    use pretty_assertions::assert_eq;

    let tempo = Tempo::from_bytes([0x0F, 0x42, 0x40]);
    assert_eq!(tempo.as_u32(), 1_000_000);
    assert_eq!(tempo.micros_per_quarter_note(), UMicros::new(1_000_000));
    assert_eq!(tempo.beats_per_minute(), 60.);
    assert_eq!(Tempo::new(Tempo::MAX).map(|t| t.to_bytes()), Some([0xFF; 3]));
    assert_eq!(Tempo::default().to_bytes(), [0x07, 0xA1, 0x20]);
}

#[test]
fn tempo_from_u32() {
    use pretty_assertions::assert_eq;

    assert_eq!(Tempo::try_from(Tempo::MAX).map(u32::from), Ok(Tempo::MAX));
    assert_eq!(
        Tempo::try_from(0x0100_0000),
        Err(ParseError::InvalidTempo(0x0100_0000))
    );
}
