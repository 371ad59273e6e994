#![doc = r#"
System common, system exclusive and system real-time events

Every system status byte stands on its own: unlike channel voice events
there is no channel nibble.

```text
F0 <payload...> F7   Exclusive
F2 <lsb> <msb>       SongPosition
F3 <song>            SongSelect
F6                   TuneRequest
F7 <payload...> F7   EndOfExclusive (continuation / escape)
F8 FA FB FC FE       real-time, no data
```

`0xFF`, the real-time Reset, is claimed by meta events inside a file and is
not decoded here.
"#]

use alloc::vec::Vec;

use num_enum::{IntoPrimitive, TryFromPrimitive};

use crate::{
    ParseError,
    events::EventFamily,
    reader::{At, Component, ReadResult, Reader},
    writer::{WriteResult, Writer, WriterError},
};

/// The byte that ends a system exclusive payload.
pub const END_OF_EXCLUSIVE: u8 = 0xF7;

/// A system status byte
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, TryFromPrimitive, IntoPrimitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
#[allow(missing_docs)]
pub enum SystemKind {
    Exclusive = 0xF0,
    SongPosition = 0xF2,
    SongSelect = 0xF3,
    TuneRequest = 0xF6,
    EndOfExclusive = 0xF7,
    TimingClock = 0xF8,
    Start = 0xFA,
    Continue = 0xFB,
    Stop = 0xFC,
    ActiveSensing = 0xFE,
}

#[doc = r#"
A system event

The two payload-carrying variants hold the bytes between the status byte and
the `0xF7` terminator. The terminator itself is implied.

# Example
```rust
# use smfcodec::prelude::*;
let (event, len) = SystemEvent::parse(&[0xF0, 0x7E, 0x7F, 0x09, 0x01, 0xF7]).unwrap();

assert_eq!(len, 6);
assert_eq!(event, SystemEvent::Exclusive(vec![0x7E, 0x7F, 0x09, 0x01]));
```
"#]
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[allow(missing_docs)]
pub enum SystemEvent {
    Exclusive(Vec<u8>),
    SongPosition { lsb: u8, msb: u8 },
    SongSelect(u8),
    TuneRequest,
    EndOfExclusive(Vec<u8>),
    TimingClock,
    Start,
    Continue,
    Stop,
    ActiveSensing,
}

impl SystemEvent {
    /// Decode from the start of `bytes`, returning the event and its length.
    pub fn parse(bytes: &[u8]) -> ReadResult<(Self, usize)> {
        let mut reader = Reader::from_byte_slice(bytes);
        let event = Self::read(&mut reader)?;
        Ok((event, reader.buffer_position()))
    }

    /// The status byte of the event
    pub const fn kind(&self) -> SystemKind {
        match self {
            Self::Exclusive(_) => SystemKind::Exclusive,
            Self::SongPosition { .. } => SystemKind::SongPosition,
            Self::SongSelect(_) => SystemKind::SongSelect,
            Self::TuneRequest => SystemKind::TuneRequest,
            Self::EndOfExclusive(_) => SystemKind::EndOfExclusive,
            Self::TimingClock => SystemKind::TimingClock,
            Self::Start => SystemKind::Start,
            Self::Continue => SystemKind::Continue,
            Self::Stop => SystemKind::Stop,
            Self::ActiveSensing => SystemKind::ActiveSensing,
        }
    }

    /// The exclusive payload, without status and terminator
    pub fn payload(&self) -> Option<&[u8]> {
        match self {
            Self::Exclusive(payload) | Self::EndOfExclusive(payload) => Some(payload),
            _ => None,
        }
    }

    /// Total encoded size, status byte and terminator included.
    pub fn encoded_len(&self) -> usize {
        match self {
            Self::Exclusive(payload) | Self::EndOfExclusive(payload) => payload.len() + 2,
            Self::SongPosition { .. } => 3,
            Self::SongSelect(_) => 2,
            Self::TuneRequest
            | Self::TimingClock
            | Self::Start
            | Self::Continue
            | Self::Stop
            | Self::ActiveSensing => 1,
        }
    }

    pub(crate) fn read(reader: &mut Reader<'_>) -> ReadResult<Self> {
        let start = reader.buffer_position();
        let status = reader.read_next().at(start, Component::Event)?;
        let kind = SystemKind::try_from(status)
            .map_err(|_| ParseError::UnknownEventType {
                family: EventFamily::System,
                tag: status,
            })
            .at(start, Component::Event)?;

        let event = match kind {
            SystemKind::Exclusive | SystemKind::EndOfExclusive => {
                let payload = reader
                    .read_until(END_OF_EXCLUSIVE)
                    .at(start, Component::Event)?
                    .to_vec();
                if kind == SystemKind::Exclusive {
                    Self::Exclusive(payload)
                } else {
                    Self::EndOfExclusive(payload)
                }
            }
            SystemKind::SongPosition => {
                let [lsb, msb] = reader
                    .read_exact_size::<2>()
                    .at(start, Component::Event)?;
                Self::SongPosition { lsb, msb }
            }
            SystemKind::SongSelect => {
                Self::SongSelect(reader.read_next().at(start, Component::Event)?)
            }
            SystemKind::TuneRequest => Self::TuneRequest,
            SystemKind::TimingClock => Self::TimingClock,
            SystemKind::Start => Self::Start,
            SystemKind::Continue => Self::Continue,
            SystemKind::Stop => Self::Stop,
            SystemKind::ActiveSensing => Self::ActiveSensing,
        };
        Ok(event)
    }

    pub(crate) fn write(&self, writer: &mut Writer) -> WriteResult<()> {
        writer.write_u8(self.kind().into());
        match self {
            Self::Exclusive(payload) | Self::EndOfExclusive(payload) => {
                if let Some(index) = payload.iter().position(|&b| b == END_OF_EXCLUSIVE) {
                    return Err(WriterError::SysExTerminatorInPayload(index));
                }
                writer.write_all(payload);
                writer.write_u8(END_OF_EXCLUSIVE);
            }
            Self::SongPosition { lsb, msb } => writer.write_all(&[*lsb, *msb]),
            Self::SongSelect(song) => writer.write_u8(*song),
            Self::TuneRequest
            | Self::TimingClock
            | Self::Start
            | Self::Continue
            | Self::Stop
            | Self::ActiveSensing => {}
        }
        Ok(())
    }
}

#[test]
fn fixed_length_events() {
    use pretty_assertions::assert_eq;

    let cases: [(&[u8], SystemEvent); 8] = [
        (&[0xF2, 0x10, 0x02], SystemEvent::SongPosition { lsb: 0x10, msb: 0x02 }),
        (&[0xF3, 0x04], SystemEvent::SongSelect(4)),
        (&[0xF6], SystemEvent::TuneRequest),
        (&[0xF8], SystemEvent::TimingClock),
        (&[0xFA], SystemEvent::Start),
        (&[0xFB], SystemEvent::Continue),
        (&[0xFC], SystemEvent::Stop),
        (&[0xFE], SystemEvent::ActiveSensing),
    ];

    for (bytes, expected) in cases {
        let (event, len) = SystemEvent::parse(bytes).unwrap();
        assert_eq!(event, expected);
        assert_eq!(len, bytes.len());
        assert_eq!(event.encoded_len(), bytes.len());

        let mut writer = Writer::new();
        event.write(&mut writer).unwrap();
        assert_eq!(writer.as_bytes(), bytes);
    }
}

#[test]
fn escape_payload() {
    use pretty_assertions::assert_eq;

    let bytes = [0xF7, 0x01, 0x02, 0xF7, 0x00];
    let (event, len) = SystemEvent::parse(&bytes).unwrap();
    assert_eq!(event, SystemEvent::EndOfExclusive(alloc::vec![0x01, 0x02]));
    assert_eq!(len, 4);

    let (empty, len) = SystemEvent::parse(&[0xF0, 0xF7]).unwrap();
    assert_eq!(empty.payload(), Some(&[][..]));
    assert_eq!(len, 2);
}

#[test]
fn unterminated_exclusive() {
    use pretty_assertions::assert_eq;

    let err = SystemEvent::parse(&[0xF0, 0x43, 0x12, 0x00]).unwrap_err();
    assert_eq!(
        err.parse_error(),
        Some(&ParseError::TruncatedSystemExclusive)
    );
    assert_eq!(err.position(), 0);
}

#[test]
fn terminator_in_payload_is_not_written() {
    let event = SystemEvent::Exclusive(alloc::vec![0x43, 0xF7, 0x10]);
    let mut writer = Writer::new();
    assert!(matches!(
        event.write(&mut writer),
        Err(WriterError::SysExTerminatorInPayload(1))
    ));
}

#[test]
fn reset_is_not_a_system_event() {
    assert!(SystemKind::try_from(0xFFu8).is_err());
    for undefined in [0xF1u8, 0xF4, 0xF5, 0xF9, 0xFD] {
        assert!(SystemKind::try_from(undefined).is_err());
    }
}
