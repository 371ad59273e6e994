#![doc = r#"
SMPTE Offset - the absolute start time of a track

The SMPTE offset meta event pins the start of a track to a time code
position so it can be synchronized with video or other time-based media.
Inside a [`MetaEvent::SmpteOffset`](super::MetaEvent::SmpteOffset) the five
payload bytes are kept raw. [`SmpteOffset::parse`] validates them and splits
them into fields.
"#]

use crate::{SmpteError, file::SmpteFps};

/// A track's starting position in SMPTE time code.
#[derive(Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SmpteOffset {
    /// The frame rate for this offset.
    ///
    /// This should match the file's frame rate when the file uses SMPTE
    /// timing.
    pub fps: SmpteFps,
    /// Hour component of the time code (0-23).
    pub hour: u8,
    /// Minute component of the time code (0-59).
    pub minute: u8,
    /// Second component of the time code (0-59).
    pub second: u8,
    /// Frame number within the current second. Not range-checked.
    pub frame: u8,
    /// Hundredths of a frame (0-99).
    pub subframe: u8,
}

impl SmpteOffset {
    /// Convert this SMPTE offset to microseconds, at its own frame rate.
    pub const fn as_micros(&self) -> f64 {
        ((((self.hour as u64 * 3600) + (self.minute as u64) * 60 + self.second as u64) * 1_000_000)
            as f64)
            + ((self.frame as u64) * 1_000_000) as f64 / self.fps.as_f64()
            + ((self.subframe as u32) * 10_000) as f64 / self.fps.as_f64()
    }

    /// Parse a SMPTE offset from the payload of its meta event.
    ///
    /// - Byte 0: `0rrhhhhh` where `rr` is frame rate type, `hhhhh` is hours
    /// - Byte 1: Minutes (0-59)
    /// - Byte 2: Seconds (0-59)
    /// - Byte 3: Frames
    /// - Byte 4: Fractional frames in 100ths (0-99)
    ///
    /// # Errors
    /// - `SmpteError::Length` if data is not exactly 5 bytes
    /// - `SmpteError::TrackFrame` if frame rate type is invalid
    /// - `SmpteError::HourOffset` if hours > 23
    /// - `SmpteError::MinuteOffset` if minutes > 59
    /// - `SmpteError::SecondOffset` if seconds > 59
    /// - `SmpteError::Subframe` if fractional frames > 99
    pub const fn parse(data: &[u8]) -> Result<Self, SmpteError> {
        if data.len() != 5 {
            return Err(SmpteError::Length(data.len()));
        }

        // 0 rr hhhhh
        let fps = match SmpteFps::from_offset_bits(data[0] >> 5) {
            Some(fps) => fps,
            None => return Err(SmpteError::TrackFrame(data[0] >> 5)),
        };
        let hour = data[0] & 0b0001_1111;
        if hour > 23 {
            return Err(SmpteError::HourOffset(hour));
        }
        let minute = data[1];
        if minute > 59 {
            return Err(SmpteError::MinuteOffset(minute));
        }
        let second = data[2];
        if second > 59 {
            return Err(SmpteError::SecondOffset(second));
        }

        let frame = data[3];
        let subframe = data[4];
        if subframe > 99 {
            return Err(SmpteError::Subframe(subframe));
        }
        Ok(Self {
            fps,
            hour,
            minute,
            second,
            frame,
            subframe,
        })
    }

    /// The five payload bytes for a [`MetaEvent::SmpteOffset`](super::MetaEvent::SmpteOffset).
    pub const fn to_bytes(&self) -> [u8; 5] {
        [
            (self.fps.offset_bits() << 5) | (self.hour & 0b0001_1111),
            self.minute,
            self.second,
            self.frame,
            self.subframe,
        ]
    }
}

impl TryFrom<&[u8; 5]> for SmpteOffset {
    type Error = SmpteError;
    fn try_from(value: &[u8; 5]) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

#[test]
fn parse_smpte_offset() {
    use pretty_assertions::assert_eq;
    // the payload of 00 FF 54 05 ...
    let bytes = [0x41, 0x17, 0x2D, 0x0C, 0x22];
    let offset = SmpteOffset::parse(&bytes).unwrap();

    assert_eq!(offset.fps, SmpteFps::TwentyNine);
    assert_eq!(offset.hour, 1);
    assert_eq!(offset.minute, 23);
    assert_eq!(offset.second, 45);
    assert_eq!(offset.frame, 12);
    assert_eq!(offset.subframe, 34);
    assert_eq!(offset.to_bytes(), bytes);
}

#[test]
fn parse_invalid_smpte_offset() {
    use pretty_assertions::assert_eq;

    let bytes = [0x7F, 0x17, 0x2D, 0x0C, 0x22];
    let err = SmpteOffset::parse(&bytes).unwrap_err();
    assert_eq!(err, SmpteError::HourOffset(31));

    let bytes = [0x41, 0x50, 0x2D, 0x0C, 0x22];
    let err = SmpteOffset::try_from(&bytes).unwrap_err();
    assert_eq!(err, SmpteError::MinuteOffset(80));
}

#[test]
fn offset_in_micros() {
    use pretty_assertions::assert_eq;

    let offset = SmpteOffset {
        fps: SmpteFps::TwentyFive,
        hour: 0,
        minute: 0,
        second: 2,
        frame: 5,
        subframe: 50,
    };
    // 2s + 5/25s + 0.5/25s
    assert_eq!(offset.as_micros(), 2_220_000.);
}
