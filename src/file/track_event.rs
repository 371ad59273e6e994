use alloc::vec::Vec;

use crate::{
    codec::varlen,
    events::Event,
    reader::{At, Component, ReadResult, Reader},
    writer::{WriteResult, Writer},
};

#[doc = r#"
A delta-time and the event it precedes

```text
<varlen delta-time> <event>
```

# Example
```rust
# use smfcodec::prelude::*;
let (track_event, len) = TrackEvent::parse(&[0x00, 0x90, 0x3C, 0x40]).unwrap();

assert_eq!(len, 4);
assert_eq!(track_event.delta_time, 0);
assert_eq!(
    track_event.event,
    Event::ChannelVoice(ChannelVoiceEvent::new(
        Channel::One,
        VoiceEvent::NoteOn { note: 60, velocity: 64 }
    ))
);
```
"#]
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TrackEvent {
    /// Ticks since the previous event in the track
    pub delta_time: u32,
    /// The event
    pub event: Event,
}

impl TrackEvent {
    /// Pair an event with a delta-time.
    pub fn new(delta_time: u32, event: impl Into<Event>) -> Self {
        Self {
            delta_time,
            event: event.into(),
        }
    }

    /// Decode from the start of `bytes`, returning the event and its length.
    pub fn parse(bytes: &[u8]) -> ReadResult<(Self, usize)> {
        let mut reader = Reader::from_byte_slice(bytes);
        let event = Self::read(&mut reader)?;
        Ok((event, reader.buffer_position()))
    }

    /// Bytes taken by the delta-time plus the event.
    pub fn encoded_len(&self) -> usize {
        varlen::encoded_len(self.delta_time) + self.event.encoded_len()
    }

    /// Encode into a new buffer.
    pub fn to_bytes(&self) -> WriteResult<Vec<u8>> {
        let mut writer = Writer::with_capacity(self.encoded_len());
        self.write(&mut writer)?;
        Ok(writer.into_bytes())
    }

    pub(crate) fn read(reader: &mut Reader<'_>) -> ReadResult<Self> {
        let start = reader.buffer_position();
        let delta_time = reader.read_varlen().at(start, Component::VarLen)?;
        let event = Event::read(reader)?;
        Ok(Self { delta_time, event })
    }

    pub(crate) fn write(&self, writer: &mut Writer) -> WriteResult<()> {
        writer.write_varlen(self.delta_time);
        self.event.write(writer)
    }
}

#[test]
fn note_on_at_zero() {
    use crate::message::{Channel, ChannelVoiceEvent, VoiceEvent};
    use pretty_assertions::assert_eq;

    let bytes = [0x00, 0x90, 0x3C, 0x40];
    let (event, len) = TrackEvent::parse(&bytes).unwrap();
    assert_eq!(
        event,
        TrackEvent::new(
            0,
            ChannelVoiceEvent::new(
                Channel::One,
                VoiceEvent::NoteOn {
                    note: 60,
                    velocity: 64
                }
            )
        )
    );
    assert_eq!(len, 4);
    assert_eq!(event.encoded_len(), 4);
    assert_eq!(event.to_bytes().unwrap(), bytes);
}

#[test]
fn end_of_track_after_long_delta() {
    use crate::file::MetaEvent;
    use pretty_assertions::assert_eq;

    let bytes = [0x83, 0x60, 0xFF, 0x2F, 0x00];
    let (event, len) = TrackEvent::parse(&bytes).unwrap();
    assert_eq!(event, TrackEvent::new(480, MetaEvent::EndOfTrack));
    assert_eq!(len, 5);
    assert_eq!(event.to_bytes().unwrap(), bytes);
}

#[test]
fn truncated_delta_time() {
    use crate::ParseError;
    use pretty_assertions::assert_eq;

    let err = TrackEvent::parse(&[0x81, 0x80]).unwrap_err();
    assert_eq!(err.parse_error(), Some(&ParseError::TruncatedVarLen));
    assert_eq!(err.component(), Component::VarLen);
    assert_eq!(err.position(), 0);
}

#[test]
fn error_position_points_at_event() {
    use crate::ParseError;
    use pretty_assertions::assert_eq;

    let err = TrackEvent::parse(&[0x60, 0xF4]).unwrap_err();
    assert_eq!(err.parse_error(), Some(&ParseError::UnknownEventTag(0xF4)));
    assert_eq!(err.position(), 1);
}
