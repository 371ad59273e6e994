/// A structured view of a time signature payload
///
/// ```text
/// FF 58 04 nn dd cc bb
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TimeSignature {
    /// Beats per bar
    pub numerator: u8,
    /// The beat unit as a power of two: 2 is a quarter, 3 an eighth
    pub denominator_power: u8,
    /// MIDI clocks per metronome click
    pub clocks_per_click: u8,
    /// Notated 32nd notes in a MIDI quarter note (24 clocks), usually 8
    pub thirty_seconds_per_quarter: u8,
}

impl TimeSignature {
    /// Interpret the four payload bytes.
    pub const fn from_bytes(bytes: [u8; 4]) -> Self {
        let [numerator, denominator_power, clocks_per_click, thirty_seconds_per_quarter] = bytes;
        Self {
            numerator,
            denominator_power,
            clocks_per_click,
            thirty_seconds_per_quarter,
        }
    }

    /// The four payload bytes.
    pub const fn to_bytes(&self) -> [u8; 4] {
        [
            self.numerator,
            self.denominator_power,
            self.clocks_per_click,
            self.thirty_seconds_per_quarter,
        ]
    }

    /// The beat unit. `None` if the power is too large to describe a note.
    pub const fn denominator(&self) -> Option<u32> {
        1u32.checked_shl(self.denominator_power as u32)
    }
}

impl From<[u8; 4]> for TimeSignature {
    fn from(value: [u8; 4]) -> Self {
        Self::from_bytes(value)
    }
}

#[test]
fn six_eight() {
    use pretty_assertions::assert_eq;

    let sig = TimeSignature::from([0x06, 0x03, 0x24, 0x08]);
    assert_eq!(sig.numerator, 6);
    assert_eq!(sig.denominator(), Some(8));
    assert_eq!(sig.clocks_per_click, 36);
    assert_eq!(sig.to_bytes(), [0x06, 0x03, 0x24, 0x08]);

    let nonsense = TimeSignature::from_bytes([4, 40, 24, 8]);
    assert_eq!(nonsense.denominator(), None);
}
