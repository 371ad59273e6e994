use num_enum::{IntoPrimitive, TryFromPrimitive};

#[doc = r#"
The three arrangements a header's `format` field can describe

- 0: a single track holding every channel
- 1: simultaneous tracks sharing the tempo map of the first
- 2: independent single-track patterns, played one after another
"#]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, TryFromPrimitive, IntoPrimitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u16)]
pub enum FormatType {
    /// Format 0
    SingleMultiChannel = 0,
    /// Format 1
    Simultaneous = 1,
    /// Format 2
    SequentiallyIndependent = 2,
}

impl FormatType {
    /// The track count this format implies, if it fixes one.
    pub const fn required_tracks(&self) -> Option<u16> {
        match self {
            Self::SingleMultiChannel => Some(1),
            _ => None,
        }
    }
}

#[test]
fn from_header_field() {
    use pretty_assertions::assert_eq;

    assert_eq!(FormatType::try_from(1u16).ok(), Some(FormatType::Simultaneous));
    assert_eq!(u16::from(FormatType::SequentiallyIndependent), 2);
    assert!(FormatType::try_from(3u16).is_err());
    assert_eq!(FormatType::SingleMultiChannel.required_tracks(), Some(1));
}
