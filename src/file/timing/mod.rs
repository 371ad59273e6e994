mod smpte;
pub use smpte::*;

use crate::{ParseError, SmpteError};

/// How the header division defines a tick.
///
/// This is either the number of ticks per quarter note or
/// the alternative SMPTE format. See
/// [`HeaderChunk::timing`](crate::file::HeaderChunk::timing).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Timing {
    /// The delta times are defined using a tick rate per quarter note
    TicksPerQuarterNote(TicksPerQuarterNote),

    /// The delta times are defined using an SMPTE frame rate and ticks per frame
    Smpte(SmpteHeader),
}

impl Timing {
    /// The tickrate per quarter note defines what a "quarter note" means.
    ///
    /// The leading bit of the u16 is disregarded, so 1-32767
    pub const fn new_ticks_per_quarter_note(tpqn: u16) -> Self {
        Self::TicksPerQuarterNote(TicksPerQuarterNote {
            inner: (tpqn & 0x7FFF).to_be_bytes(),
        })
    }

    /// Define the timing in terms of fps and ticks per frame
    pub const fn new_smpte(fps: SmpteFps, ticks_per_frame: u8) -> Self {
        Self::Smpte(SmpteHeader {
            fps,
            ticks_per_frame,
        })
    }

    /// Interpret a header division.
    pub fn from_division(division: u16) -> Result<Self, ParseError> {
        let bytes = division.to_be_bytes();
        if bytes[0] >> 7 == 0 {
            return Ok(Self::TicksPerQuarterNote(TicksPerQuarterNote { inner: bytes }));
        }
        Ok(Self::Smpte(SmpteHeader::new(bytes)?))
    }

    /// The header division this timing is written as.
    pub const fn to_division(&self) -> u16 {
        match self {
            Self::TicksPerQuarterNote(t) => u16::from_be_bytes(t.inner),
            Self::Smpte(s) => {
                let frame = -(s.fps.as_division() as i8);
                u16::from_be_bytes([frame as u8, s.ticks_per_frame])
            }
        }
    }

    /// Returns Some if the midi timing is defined
    /// as ticks per quarter note
    pub const fn ticks_per_quarter_note(&self) -> Option<u16> {
        match self {
            Self::TicksPerQuarterNote(t) => Some(t.ticks_per_quarter_note()),
            _ => None,
        }
    }
}

/// A representation of the `tpqn` timing for a MIDI file
#[derive(Debug, Clone, PartialEq, Eq, Copy, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TicksPerQuarterNote {
    pub(crate) inner: [u8; 2],
}
impl TicksPerQuarterNote {
    /// Returns the ticks per quarter note for the file.
    pub const fn ticks_per_quarter_note(&self) -> u16 {
        let v = u16::from_be_bytes(self.inner);
        v & 0x7FFF
    }
}

/// A representation of the `smpte` timing for a MIDI file
#[derive(Debug, Clone, PartialEq, Eq, Copy, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SmpteHeader {
    pub(crate) fps: SmpteFps,
    pub(crate) ticks_per_frame: u8,
}

impl SmpteHeader {
    fn new(bytes: [u8; 2]) -> Result<Self, SmpteError> {
        // bits 14 thru 8 hold -24, -25, -29 or -30
        let byte = bytes[0] as i8;
        let fps = SmpteFps::from_division_byte(byte).ok_or(SmpteError::HeaderFrameTime(byte))?;
        Ok(Self {
            fps,
            ticks_per_frame: bytes[1],
        })
    }

    /// Returns the frames per second
    pub const fn fps(&self) -> SmpteFps {
        self.fps
    }

    /// Returns the ticks per frame
    pub const fn ticks_per_frame(&self) -> u8 {
        self.ticks_per_frame
    }
}

#[test]
fn metrical_division() {
    use pretty_assertions::assert_eq;

    let timing = Timing::from_division(0x0060).unwrap();
    assert_eq!(timing.ticks_per_quarter_note(), Some(96));
    assert_eq!(timing, Timing::new_ticks_per_quarter_note(96));
    assert_eq!(timing.to_division(), 0x0060);
}

#[test]
fn smpte_division() {
    use pretty_assertions::assert_eq;

    // -25 fps, 40 ticks per frame
    let timing = Timing::from_division(0xE728).unwrap();
    let Timing::Smpte(smpte) = timing else {
        panic!("expected smpte timing");
    };
    assert_eq!(smpte.fps(), SmpteFps::TwentyFive);
    assert_eq!(smpte.ticks_per_frame(), 40);
    assert_eq!(timing.ticks_per_quarter_note(), None);
    assert_eq!(timing.to_division(), 0xE728);
    assert_eq!(Timing::new_smpte(SmpteFps::TwentyFive, 40), timing);
}

#[test]
fn invalid_smpte_division() {
    use pretty_assertions::assert_eq;

    // -26 is not a frame rate
    assert_eq!(
        Timing::from_division(0xE628),
        Err(ParseError::Smpte(SmpteError::HeaderFrameTime(-26)))
    );
}
