#![doc = r#"
Meta events: the file-only events introduced by `0xFF`

```text
FF <type> <varlen length> <payload...>
```

Payloads are decoded the way each type defines them: text types as UTF-8,
the sequence number and tempo as big-endian integers, everything else as
raw bytes. SMPTE offsets, time signatures and key signatures are kept raw;
[`SmpteOffset`], [`TimeSignature`] and [`KeySignature`] interpret them on
request.
"#]

mod key_signature;
pub use key_signature::*;

mod smpte_offset;
pub use smpte_offset::*;

mod tempo;
pub use tempo::*;

mod time_signature;
pub use time_signature::*;

use alloc::{borrow::Cow, string::String, vec::Vec};

use num_enum::{IntoPrimitive, TryFromPrimitive};

use crate::{
    ParseError,
    codec::{fixed, varlen},
    events::{EventFamily, META_STATUS},
    reader::{At, Component, ReadResult, Reader},
    writer::{WriteResult, Writer},
};

/// The type byte following `0xFF`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, TryFromPrimitive, IntoPrimitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
#[allow(missing_docs)]
pub enum MetaKind {
    SequenceNumber = 0x00,
    Text = 0x01,
    Copyright = 0x02,
    TrackName = 0x03,
    InstrumentName = 0x04,
    Lyric = 0x05,
    Marker = 0x06,
    CuePoint = 0x07,
    ChannelPrefix = 0x20,
    EndOfTrack = 0x2F,
    Tempo = 0x51,
    SmpteOffset = 0x54,
    TimeSignature = 0x58,
    KeySignature = 0x59,
    SequencerSpecific = 0x7F,
}

#[doc = r#"
A meta event and its decoded payload

# Example
```rust
# use smfcodec::prelude::*;
let bytes = [0xFF, 0x03, 0x05, b'P', b'i', b'a', b'n', b'o'];
let (event, len) = MetaEvent::parse(&bytes).unwrap();

assert_eq!(len, 8);
assert_eq!(event, MetaEvent::TrackName("Piano".to_string()));
assert_eq!(event.text(), Some("Piano"));
```
"#]
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MetaEvent {
    /// `FF 00 02 ssss`, or `FF 00 00` to number sequences by position
    SequenceNumber(Option<u16>),
    /// `FF 01`
    Text(String),
    /// `FF 02`
    Copyright(String),
    /// `FF 03`, the sequence name in the first track of a format 1 file
    TrackName(String),
    /// `FF 04`
    InstrumentName(String),
    /// `FF 05`
    Lyric(String),
    /// `FF 06`
    Marker(String),
    /// `FF 07`
    CuePoint(String),
    /// `FF 20 01 cc`
    ChannelPrefix(u8),
    /// `FF 2F 00`
    EndOfTrack,
    /// `FF 51 03 tttttt`
    Tempo(Tempo),
    /// `FF 54 05 hr mn se fr ff`
    SmpteOffset([u8; 5]),
    /// `FF 58 04 nn dd cc bb`
    TimeSignature([u8; 4]),
    /// `FF 59 02 sf mi`
    KeySignature([u8; 2]),
    /// `FF 7F`
    SequencerSpecific(Vec<u8>),
}

impl MetaEvent {
    /// Decode from the start of `bytes`, returning the event and its length.
    pub fn parse(bytes: &[u8]) -> ReadResult<(Self, usize)> {
        let mut reader = Reader::from_byte_slice(bytes);
        let event = Self::read(&mut reader)?;
        Ok((event, reader.buffer_position()))
    }

    /// Identifies the type byte of the event
    pub const fn kind(&self) -> MetaKind {
        match self {
            Self::SequenceNumber(_) => MetaKind::SequenceNumber,
            Self::Text(_) => MetaKind::Text,
            Self::Copyright(_) => MetaKind::Copyright,
            Self::TrackName(_) => MetaKind::TrackName,
            Self::InstrumentName(_) => MetaKind::InstrumentName,
            Self::Lyric(_) => MetaKind::Lyric,
            Self::Marker(_) => MetaKind::Marker,
            Self::CuePoint(_) => MetaKind::CuePoint,
            Self::ChannelPrefix(_) => MetaKind::ChannelPrefix,
            Self::EndOfTrack => MetaKind::EndOfTrack,
            Self::Tempo(_) => MetaKind::Tempo,
            Self::SmpteOffset(_) => MetaKind::SmpteOffset,
            Self::TimeSignature(_) => MetaKind::TimeSignature,
            Self::KeySignature(_) => MetaKind::KeySignature,
            Self::SequencerSpecific(_) => MetaKind::SequencerSpecific,
        }
    }

    /// The text of any of the text types.
    pub fn text(&self) -> Option<&str> {
        match self {
            Self::Text(s)
            | Self::Copyright(s)
            | Self::TrackName(s)
            | Self::InstrumentName(s)
            | Self::Lyric(s)
            | Self::Marker(s)
            | Self::CuePoint(s) => Some(s),
            _ => None,
        }
    }

    /// The payload as it is written to the file.
    pub fn payload(&self) -> Cow<'_, [u8]> {
        match self {
            Self::SequenceNumber(None) | Self::EndOfTrack => Cow::Borrowed(&[]),
            Self::SequenceNumber(Some(number)) => Cow::Owned(number.to_be_bytes().to_vec()),
            Self::Text(s)
            | Self::Copyright(s)
            | Self::TrackName(s)
            | Self::InstrumentName(s)
            | Self::Lyric(s)
            | Self::Marker(s)
            | Self::CuePoint(s) => Cow::Borrowed(s.as_bytes()),
            Self::ChannelPrefix(channel) => Cow::Borrowed(core::slice::from_ref(channel)),
            Self::Tempo(tempo) => Cow::Owned(tempo.to_bytes().to_vec()),
            Self::SmpteOffset(raw) => Cow::Borrowed(raw.as_slice()),
            Self::TimeSignature(raw) => Cow::Borrowed(raw.as_slice()),
            Self::KeySignature(raw) => Cow::Borrowed(raw.as_slice()),
            Self::SequencerSpecific(data) => Cow::Borrowed(data.as_slice()),
        }
    }

    /// Length of [`payload`](Self::payload), without building it.
    pub fn payload_len(&self) -> usize {
        match self {
            Self::SequenceNumber(None) | Self::EndOfTrack => 0,
            Self::SequenceNumber(Some(_)) => 2,
            Self::ChannelPrefix(_) => 1,
            Self::Tempo(_) => 3,
            Self::SmpteOffset(_) => 5,
            Self::TimeSignature(_) => 4,
            Self::KeySignature(_) => 2,
            Self::SequencerSpecific(data) => data.len(),
            text => text.text().map_or(0, str::len),
        }
    }

    /// Total encoded size: status, type, length and payload.
    pub fn encoded_len(&self) -> usize {
        let len = self.payload_len();
        2 + varlen::encoded_len(u32::try_from(len).unwrap_or(u32::MAX)) + len
    }

    fn from_payload(kind: MetaKind, payload: &[u8]) -> Result<Self, ParseError> {
        fn exact<const N: usize>(kind: MetaKind, payload: &[u8]) -> Result<[u8; N], ParseError> {
            payload
                .try_into()
                .map_err(|_| ParseError::InvalidMetaLength {
                    kind,
                    expected: N,
                    found: payload.len(),
                })
        }
        let text = || fixed::read_text(payload).map(String::from);

        let event = match kind {
            MetaKind::SequenceNumber if payload.is_empty() => Self::SequenceNumber(None),
            MetaKind::SequenceNumber => {
                Self::SequenceNumber(Some(u16::from_be_bytes(exact(kind, payload)?)))
            }
            MetaKind::Text => Self::Text(text()?),
            MetaKind::Copyright => Self::Copyright(text()?),
            MetaKind::TrackName => Self::TrackName(text()?),
            MetaKind::InstrumentName => Self::InstrumentName(text()?),
            MetaKind::Lyric => Self::Lyric(text()?),
            MetaKind::Marker => Self::Marker(text()?),
            MetaKind::CuePoint => Self::CuePoint(text()?),
            MetaKind::ChannelPrefix => {
                let [channel] = exact::<1>(kind, payload)?;
                Self::ChannelPrefix(channel)
            }
            MetaKind::EndOfTrack => {
                exact::<0>(kind, payload)?;
                Self::EndOfTrack
            }
            MetaKind::Tempo => Self::Tempo(Tempo::from_bytes(exact(kind, payload)?)),
            MetaKind::SmpteOffset => Self::SmpteOffset(exact(kind, payload)?),
            MetaKind::TimeSignature => Self::TimeSignature(exact(kind, payload)?),
            MetaKind::KeySignature => Self::KeySignature(exact(kind, payload)?),
            MetaKind::SequencerSpecific => Self::SequencerSpecific(payload.to_vec()),
        };
        Ok(event)
    }

    pub(crate) fn read(reader: &mut Reader<'_>) -> ReadResult<Self> {
        let start = reader.buffer_position();
        let status = reader.read_next().at(start, Component::Event)?;
        if status != META_STATUS {
            return Err(ParseError::UnknownEventType {
                family: EventFamily::Meta,
                tag: status,
            })
            .at(start, Component::Event);
        }

        let tag = reader.read_next().at(start, Component::Event)?;
        let kind = MetaKind::try_from(tag)
            .map_err(|_| ParseError::UnknownEventType {
                family: EventFamily::Meta,
                tag,
            })
            .at(start, Component::Event)?;

        let len_at = reader.buffer_position();
        let declared = reader.read_varlen().at(len_at, Component::VarLen)?;
        let available = reader.remaining();
        let payload = reader
            .read_exact(declared as usize)
            .map_err(|_| ParseError::TruncatedMetaPayload {
                declared,
                available,
            })
            .at(start, Component::Event)?;

        Self::from_payload(kind, payload).at(start, Component::Event)
    }

    pub(crate) fn write(&self, writer: &mut Writer) -> WriteResult<()> {
        let payload = self.payload();
        writer.write_u8(META_STATUS);
        writer.write_u8(self.kind().into());
        writer.write_len(payload.len())?;
        writer.write_all(&payload);
        Ok(())
    }
}

#[cfg(test)]
fn encode(event: &MetaEvent) -> Vec<u8> {
    let mut writer = Writer::new();
    event.write(&mut writer).unwrap();
    writer.into_bytes()
}

#[test]
fn end_of_track() {
    use pretty_assertions::assert_eq;

    let (event, len) = MetaEvent::parse(&[0xFF, 0x2F, 0x00]).unwrap();
    assert_eq!(event, MetaEvent::EndOfTrack);
    assert_eq!(len, 3);
    assert_eq!(encode(&event), [0xFF, 0x2F, 0x00]);
}

#[test]
fn typed_payloads() {
    use pretty_assertions::assert_eq;

    let cases: [(&[u8], MetaEvent); 9] = [
        (&[0xFF, 0x00, 0x02, 0x00, 0x07], MetaEvent::SequenceNumber(Some(7))),
        (&[0xFF, 0x00, 0x00], MetaEvent::SequenceNumber(None)),
        (&[0xFF, 0x01, 0x02, b'h', b'i'], MetaEvent::Text("hi".into())),
        (&[0xFF, 0x05, 0x00], MetaEvent::Lyric(String::new())),
        (&[0xFF, 0x20, 0x01, 0x09], MetaEvent::ChannelPrefix(9)),
        (
            &[0xFF, 0x51, 0x03, 0x07, 0xA1, 0x20],
            MetaEvent::Tempo(Tempo::from_bytes([0x07, 0xA1, 0x20])),
        ),
        (
            &[0xFF, 0x54, 0x05, 0x41, 0x17, 0x2D, 0x0C, 0x22],
            MetaEvent::SmpteOffset([0x41, 0x17, 0x2D, 0x0C, 0x22]),
        ),
        (
            &[0xFF, 0x58, 0x04, 0x06, 0x03, 0x24, 0x08],
            MetaEvent::TimeSignature([0x06, 0x03, 0x24, 0x08]),
        ),
        (
            &[0xFF, 0x59, 0x02, 0xFD, 0x01],
            MetaEvent::KeySignature([0xFD, 0x01]),
        ),
    ];

    for (bytes, expected) in cases {
        let (event, len) = MetaEvent::parse(bytes).unwrap();
        assert_eq!(event, expected);
        assert_eq!(len, bytes.len());
        assert_eq!(event.encoded_len(), bytes.len());
        assert_eq!(encode(&event), bytes);
    }
}

#[test]
fn long_payload_uses_multibyte_length() {
    use pretty_assertions::assert_eq;

    let data = alloc::vec![0x41; 200];
    let mut bytes = alloc::vec![0xFF, 0x7F, 0x81, 0x48];
    bytes.extend_from_slice(&data);

    let (event, len) = MetaEvent::parse(&bytes).unwrap();
    assert_eq!(event, MetaEvent::SequencerSpecific(data));
    assert_eq!(len, 204);
    assert_eq!(encode(&event), bytes);
}

#[test]
fn truncated_payload() {
    use pretty_assertions::assert_eq;

    let err = MetaEvent::parse(&[0xFF, 0x01, 0x05, b'a', b'b']).unwrap_err();
    assert_eq!(
        err.parse_error(),
        Some(&ParseError::TruncatedMetaPayload {
            declared: 5,
            available: 2
        })
    );
}

#[test]
fn truncated_length() {
    use pretty_assertions::assert_eq;

    let err = MetaEvent::parse(&[0xFF, 0x7F, 0x82]).unwrap_err();
    assert_eq!(err.parse_error(), Some(&ParseError::TruncatedVarLen));
    assert_eq!(err.component(), Component::VarLen);
    assert_eq!(err.position(), 2);
}

#[test]
fn unknown_meta_type() {
    use pretty_assertions::assert_eq;

    // 0xFF followed by something that is not a meta type is not a Reset either
    let err = MetaEvent::parse(&[0xFF, 0x60, 0x00]).unwrap_err();
    assert_eq!(
        err.parse_error(),
        Some(&ParseError::UnknownEventType {
            family: EventFamily::Meta,
            tag: 0x60
        })
    );
}

#[test]
fn wrong_fixed_length() {
    use pretty_assertions::assert_eq;

    let err = MetaEvent::parse(&[0xFF, 0x51, 0x02, 0x07, 0xA1]).unwrap_err();
    assert_eq!(
        err.parse_error(),
        Some(&ParseError::InvalidMetaLength {
            kind: MetaKind::Tempo,
            expected: 3,
            found: 2
        })
    );
}

#[test]
fn invalid_text() {
    let err = MetaEvent::parse(&[0xFF, 0x03, 0x02, 0xC3, 0x28]).unwrap_err();
    assert!(matches!(err.parse_error(), Some(ParseError::InvalidText(_))));
}
