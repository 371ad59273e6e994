#![doc = r#"
The polymorphic event found after every delta-time in a track

# Telling the families apart

The first byte of an event decides how the rest is read:

1. If the high nibble is `0x8`-`0xE`, it is a [`ChannelVoiceEvent`].
2. Otherwise, if the byte is a system status (`F0 F2 F3 F6 F7 F8 FA FB FC FE`),
   it is a [`SystemEvent`].
3. Otherwise, if it is `0xFF`, it is a [`MetaEvent`]. The real-time Reset
   shares this byte, but it never appears in a file.
4. Anything else (data bytes, undefined system bytes) is an error.

Running status is not supported, so a data byte in status position is
always [`ParseError::UnknownEventTag`].
"#]

use core::fmt;

use crate::{
    ParseError,
    file::MetaEvent,
    message::{ChannelVoiceEvent, SystemEvent, SystemKind, VoiceKind},
    reader::{At, Component, ReadResult, Reader, ReaderErrorKind},
    writer::{WriteResult, Writer},
};

/// The status byte that introduces a meta event.
pub const META_STATUS: u8 = 0xFF;

/// The three families of events a track can hold
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EventFamily {
    /// `0x80`-`0xEF`
    ChannelVoice,
    /// `0xF0`-`0xFE`
    System,
    /// `0xFF`
    Meta,
}

impl EventFamily {
    /// Resolve the family of a status byte.
    pub fn classify(status: u8) -> Result<Self, ParseError> {
        if VoiceKind::try_from(status & 0xF0).is_ok() {
            Ok(Self::ChannelVoice)
        } else if SystemKind::try_from(status).is_ok() {
            Ok(Self::System)
        } else if status == META_STATUS {
            Ok(Self::Meta)
        } else {
            Err(ParseError::UnknownEventTag(status))
        }
    }
}

impl fmt::Display for EventFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ChannelVoice => f.write_str("channel voice"),
            Self::System => f.write_str("system"),
            Self::Meta => f.write_str("meta"),
        }
    }
}

#[doc = r#"
An event of any family

# Example
```rust
# use smfcodec::prelude::*;
let (event, len) = Event::parse(&[0xFF, 0x2F, 0x00]).unwrap();

assert_eq!(len, 3);
assert_eq!(event, Event::Meta(MetaEvent::EndOfTrack));
assert_eq!(event.to_bytes().unwrap(), [0xFF, 0x2F, 0x00]);
```
"#]
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Event {
    /// A note, controller, program or pressure event on a channel
    ChannelVoice(ChannelVoiceEvent),
    /// A system common, exclusive or real-time event
    System(SystemEvent),
    /// A file-only meta event
    Meta(MetaEvent),
}

impl Event {
    /// Decode from the start of `bytes`, returning the event and its length.
    pub fn parse(bytes: &[u8]) -> ReadResult<(Self, usize)> {
        let mut reader = Reader::from_byte_slice(bytes);
        let event = Self::read(&mut reader)?;
        Ok((event, reader.buffer_position()))
    }

    /// Identifies the family of the event
    pub const fn family(&self) -> EventFamily {
        match self {
            Self::ChannelVoice(_) => EventFamily::ChannelVoice,
            Self::System(_) => EventFamily::System,
            Self::Meta(_) => EventFamily::Meta,
        }
    }

    /// Total encoded size of the event.
    pub fn encoded_len(&self) -> usize {
        match self {
            Self::ChannelVoice(cv) => cv.encoded_len(),
            Self::System(sys) => sys.encoded_len(),
            Self::Meta(meta) => meta.encoded_len(),
        }
    }

    /// Encode the event into a new buffer.
    pub fn to_bytes(&self) -> WriteResult<alloc::vec::Vec<u8>> {
        let mut writer = Writer::with_capacity(self.encoded_len());
        self.write(&mut writer)?;
        Ok(writer.into_bytes())
    }

    pub(crate) fn read(reader: &mut Reader<'_>) -> ReadResult<Self> {
        let start = reader.buffer_position();
        let status = reader
            .peek_next()
            .ok_or(ReaderErrorKind::OutOfBounds)
            .at(start, Component::Event)?;

        let event = match EventFamily::classify(status).at(start, Component::Event)? {
            EventFamily::ChannelVoice => Self::ChannelVoice(ChannelVoiceEvent::read(reader)?),
            EventFamily::System => Self::System(SystemEvent::read(reader)?),
            EventFamily::Meta => Self::Meta(MetaEvent::read(reader)?),
        };
        log::trace!("{} event at {start}: {event:?}", event.family());
        Ok(event)
    }

    pub(crate) fn write(&self, writer: &mut Writer) -> WriteResult<()> {
        match self {
            Self::ChannelVoice(cv) => {
                cv.write(writer);
                Ok(())
            }
            Self::System(sys) => sys.write(writer),
            Self::Meta(meta) => meta.write(writer),
        }
    }
}

impl From<ChannelVoiceEvent> for Event {
    fn from(value: ChannelVoiceEvent) -> Self {
        Self::ChannelVoice(value)
    }
}

impl From<SystemEvent> for Event {
    fn from(value: SystemEvent) -> Self {
        Self::System(value)
    }
}

impl From<MetaEvent> for Event {
    fn from(value: MetaEvent) -> Self {
        Self::Meta(value)
    }
}

#[test]
fn every_status_byte_resolves_once() {
    use pretty_assertions::assert_eq;

    let mut voice = 0;
    let mut system = 0;
    let mut meta = 0;
    let mut unknown = 0;
    for status in 0..=u8::MAX {
        match EventFamily::classify(status) {
            Ok(EventFamily::ChannelVoice) => {
                assert!((0x80..0xF0).contains(&status));
                voice += 1
            }
            Ok(EventFamily::System) => {
                assert!((0xF0..0xFF).contains(&status));
                system += 1
            }
            Ok(EventFamily::Meta) => {
                assert_eq!(status, META_STATUS);
                meta += 1
            }
            Err(e) => {
                assert_eq!(e, ParseError::UnknownEventTag(status));
                unknown += 1
            }
        }
    }
    assert_eq!(voice, 112);
    assert_eq!(system, 10);
    assert_eq!(meta, 1);
    assert_eq!(unknown, 128 + 5);
}

#[test]
fn data_byte_in_status_position() {
    use pretty_assertions::assert_eq;

    let err = Event::parse(&[0x3C, 0x40]).unwrap_err();
    assert_eq!(err.parse_error(), Some(&ParseError::UnknownEventTag(0x3C)));
    assert_eq!(err.component(), Component::Event);
}

#[test]
fn dispatches_by_family() {
    use pretty_assertions::assert_eq;

    let (event, _) = Event::parse(&[0x92, 0x40, 0x7F]).unwrap();
    assert_eq!(event.family(), EventFamily::ChannelVoice);

    let (event, _) = Event::parse(&[0xF8]).unwrap();
    assert_eq!(event, Event::System(SystemEvent::TimingClock));

    let (event, len) = Event::parse(&[0xFF, 0x51, 0x03, 0x07, 0xA1, 0x20]).unwrap();
    assert_eq!(event.family(), EventFamily::Meta);
    assert_eq!(len, 6);
    assert_eq!(event.encoded_len(), 6);
}

#[test]
fn empty_input() {
    assert!(Event::parse(&[]).unwrap_err().is_out_of_bounds());
}
