use crate::{
    ParseError,
    file::{FormatType, Timing},
    reader::{Reader, ReaderErrorKind},
    writer::Writer,
};

#[doc = r#"
The body of an `MThd` chunk

The three fields are kept exactly as read, so a file with an unusual format
number or a division the crate cannot interpret still round-trips. Use
[`HeaderChunk::format_type`] and [`HeaderChunk::timing`] for the typed views.

# Example
```rust
# use smfcodec::prelude::*;
let header = HeaderChunk::from_parts(
    FormatType::Simultaneous,
    2,
    Timing::new_ticks_per_quarter_note(96),
);
assert_eq!(header.division, 0x0060);
assert_eq!(header.timing().unwrap().ticks_per_quarter_note(), Some(96));
```
"#]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HeaderChunk {
    /// File format, 0, 1 or 2
    pub format: u16,
    /// Number of track chunks the file claims to hold
    pub track_count: u16,
    /// Tick definition
    pub division: u16,
}

impl HeaderChunk {
    /// The only valid body length.
    pub const LENGTH: u32 = 6;

    /// Create a header from its raw fields.
    pub const fn new(format: u16, track_count: u16, division: u16) -> Self {
        Self {
            format,
            track_count,
            division,
        }
    }

    /// Create a header from typed parts.
    pub const fn from_parts(format: FormatType, track_count: u16, timing: Timing) -> Self {
        Self::new(format as u16, track_count, timing.to_division())
    }

    /// The format, if it is one of the three defined.
    pub fn format_type(&self) -> Option<FormatType> {
        FormatType::try_from(self.format).ok()
    }

    /// Interpret the division.
    pub fn timing(&self) -> Result<Timing, ParseError> {
        Timing::from_division(self.division)
    }

    pub(crate) fn read(reader: &mut Reader<'_>) -> Result<Self, ReaderErrorKind> {
        Ok(Self {
            format: reader.read_u16()?,
            track_count: reader.read_u16()?,
            division: reader.read_u16()?,
        })
    }

    pub(crate) fn write(&self, writer: &mut Writer) {
        writer.write_u16(self.format);
        writer.write_u16(self.track_count);
        writer.write_u16(self.division);
    }
}

#[test]
fn typed_views() {
    use pretty_assertions::assert_eq;

    let header = HeaderChunk::new(1, 2, 96);
    assert_eq!(header.format_type(), Some(FormatType::Simultaneous));
    assert_eq!(header.timing(), Ok(Timing::new_ticks_per_quarter_note(96)));

    let odd = HeaderChunk::new(7, 1, 0xE228);
    assert_eq!(odd.format_type(), None);
    assert!(odd.timing().is_err());
}

#[test]
fn writes_three_words() {
    use pretty_assertions::assert_eq;

    let mut writer = Writer::new();
    HeaderChunk::new(0, 1, 0x01E0).write(&mut writer);
    assert_eq!(writer.into_bytes(), [0x00, 0x00, 0x00, 0x01, 0x01, 0xE0]);
}
