use alloc::vec::Vec;
use core::iter::FusedIterator;

use crate::{
    ParseError,
    events::Event,
    file::{MetaEvent, TrackEvent},
    reader::{At, Component, ReadResult, Reader},
    writer::{WriteResult, Writer},
};

#[doc = r#"
The body of an `MTrk` chunk: an ordered list of [`TrackEvent`]s

Nothing is enforced about the contents. A well-formed track ends with
[`MetaEvent::EndOfTrack`], which [`TrackChunk::ends_with_end_of_track`] checks.
"#]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TrackChunk {
    events: Vec<TrackEvent>,
}

impl TrackChunk {
    /// Create a track from its events.
    pub fn new(events: Vec<TrackEvent>) -> Self {
        Self { events }
    }

    /// The events, in order
    pub fn events(&self) -> &[TrackEvent] {
        &self.events
    }

    /// The events, for insertion, removal or modification
    pub fn events_mut(&mut self) -> &mut Vec<TrackEvent> {
        &mut self.events
    }

    /// Append an event.
    pub fn push(&mut self, event: TrackEvent) {
        self.events.push(event);
    }

    /// Take the events out of the chunk.
    pub fn into_events(self) -> Vec<TrackEvent> {
        self.events
    }

    /// Length of the body as it will be written.
    pub fn body_len(&self) -> usize {
        self.events.iter().map(TrackEvent::encoded_len).sum()
    }

    /// True if the last event is End of Track.
    pub fn ends_with_end_of_track(&self) -> bool {
        matches!(
            self.events.last(),
            Some(TrackEvent {
                event: Event::Meta(MetaEvent::EndOfTrack),
                ..
            })
        )
    }

    pub(crate) fn write(&self, writer: &mut Writer) -> WriteResult<()> {
        self.events.iter().try_for_each(|event| event.write(writer))
    }
}

impl FromIterator<TrackEvent> for TrackChunk {
    fn from_iter<T: IntoIterator<Item = TrackEvent>>(iter: T) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

#[doc = r#"
Decodes the events of a track body one at a time

Reads never leave the body. An event that needs more bytes than the body
holds is reported as [`ParseError::TrackChunkOverrun`] at its start, whatever
follows the body in the input. Yields nothing more after the first error.

# Example
```rust
# use smfcodec::prelude::*;
let body = [0x00, 0x90, 0x3C, 0x40, 0x60, 0xFF, 0x2F, 0x00];
let deltas = TrackEventIter::new(&body)
    .map(|event| event.map(|e| e.delta_time))
    .collect::<ReadResult<Vec<_>>>()
    .unwrap();
assert_eq!(deltas, [0, 96]);

let err = TrackEventIter::new(&body[..6]).nth(1).unwrap().unwrap_err();
assert_eq!(
    err.parse_error(),
    Some(&ParseError::TrackChunkOverrun { declared: 6, offset: 4 })
);
```
"#]
#[derive(Debug, Clone)]
pub struct TrackEventIter<'slc> {
    reader: Reader<'slc>,
    body_start: usize,
    declared: u32,
    finished: bool,
}

impl<'slc> TrackEventIter<'slc> {
    /// Iterate over a track body, without its chunk tag and length.
    pub fn new(body: &'slc [u8]) -> Self {
        Self {
            reader: Reader::from_byte_slice(body),
            body_start: 0,
            declared: u32::try_from(body.len()).unwrap_or(u32::MAX),
            finished: false,
        }
    }

    /// Iterate over the `declared` bytes after the reader's cursor.
    pub(crate) fn within(reader: Reader<'slc>, declared: u32) -> Self {
        let body_start = reader.buffer_position();
        Self {
            reader: reader.bounded(body_start + declared as usize),
            body_start,
            declared,
            finished: false,
        }
    }
}

impl Iterator for TrackEventIter<'_> {
    type Item = ReadResult<TrackEvent>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished || self.reader.is_at_end() {
            return None;
        }
        let start = self.reader.buffer_position();
        let result = TrackEvent::read(&mut self.reader).or_else(|err| {
            if !err.is_truncation() {
                return Err(err);
            }
            Err(ParseError::TrackChunkOverrun {
                declared: self.declared,
                offset: start - self.body_start,
            })
            .at(start, Component::Chunk)
        });
        if result.is_err() {
            self.finished = true;
        }
        Some(result)
    }
}

impl FusedIterator for TrackEventIter<'_> {}

#[test]
fn stops_at_declared_length() {
    use pretty_assertions::assert_eq;

    let bytes = [0x00, 0xFF, 0x2F, 0x00, 0x00, 0xFF, 0x2F, 0x00];
    let reader = Reader::from_byte_slice(&bytes);
    let events = TrackEventIter::within(reader, 4)
        .collect::<ReadResult<Vec<_>>>()
        .unwrap();
    assert_eq!(events, [TrackEvent::new(0, MetaEvent::EndOfTrack)]);
}

#[test]
fn truncated_events_overrun_the_body() {
    use pretty_assertions::assert_eq;

    // a varlen, a channel message, a meta payload and a SysEx, each cut short
    let bodies: [&[u8]; 4] = [
        &[0x00, 0xFF, 0x2F, 0x00, 0x81],
        &[0x00, 0xFF, 0x2F, 0x00, 0x00, 0x90, 0x3C],
        &[0x00, 0xFF, 0x2F, 0x00, 0x00, 0xFF, 0x01, 0x05, b'a'],
        &[0x00, 0xFF, 0x2F, 0x00, 0x00, 0xF0, 0x43],
    ];
    for body in bodies {
        let err = TrackEventIter::new(body).nth(1).unwrap().unwrap_err();
        assert_eq!(
            err.parse_error(),
            Some(&ParseError::TrackChunkOverrun {
                declared: body.len() as u32,
                offset: 4
            }),
            "{body:02X?}"
        );
        assert_eq!(err.position(), 4);
        assert_eq!(err.component(), Component::Chunk);
    }
}

#[test]
fn fuses_after_error() {
    let body = [0x00, 0xF4, 0x00, 0xFF, 0x2F, 0x00];
    let mut iter = TrackEventIter::new(&body);
    assert!(matches!(iter.next(), Some(Err(_))));
    assert!(iter.next().is_none());
}

#[test]
fn end_of_track_check() {
    use crate::message::{Channel, ChannelVoiceEvent, VoiceEvent};
    use pretty_assertions::assert_eq;

    let note = TrackEvent::new(
        0,
        ChannelVoiceEvent::new(
            Channel::Two,
            VoiceEvent::NoteOn {
                note: 64,
                velocity: 100,
            },
        ),
    );
    let mut track: TrackChunk = [note].into_iter().collect();
    assert!(!track.ends_with_end_of_track());
    assert_eq!(track.body_len(), 4);

    track.push(TrackEvent::new(0, MetaEvent::EndOfTrack));
    assert!(track.ends_with_end_of_track());
    assert_eq!(track.body_len(), 8);
}
