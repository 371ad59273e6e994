#![doc = r#"
Decoding and encoding of Standard MIDI Files

A file is decoded into a tree of owned values: a [`MidiFile`](file::MidiFile) holds
[chunks](file::Chunk), a track chunk holds [track events](file::TrackEvent), and every
event is one of three families (channel voice, system or meta). Lengths and counts
are never stored. They are recomputed when the tree is encoded, so it can be edited
freely in between.

```rust
use smfcodec::prelude::*;

let mut file = MidiFile::new(vec![
    HeaderChunk::from_parts(
        FormatType::SingleMultiChannel,
        1,
        Timing::new_ticks_per_quarter_note(96),
    )
    .into(),
    TrackChunk::new(vec![
        TrackEvent::new(0, MetaEvent::Tempo(Tempo::default())),
        TrackEvent::new(0, ChannelVoiceEvent::new(Channel::One, VoiceEvent::NoteOn { note: 60, velocity: 64 })),
        TrackEvent::new(96, ChannelVoiceEvent::new(Channel::One, VoiceEvent::NoteOff { note: 60, velocity: 64 })),
        TrackEvent::new(0, MetaEvent::EndOfTrack),
    ])
    .into(),
]);

let bytes = file.encode().unwrap();
assert_eq!(MidiFile::parse(&bytes).unwrap(), file);

// lengths follow the edit
file.tracks_mut().next().unwrap().events_mut().remove(0);
assert_eq!(file.encode().unwrap().len(), bytes.len() - 7);
```

Running status is not supported, and chunk types other than `MThd` and `MTrk`
are rejected.
"#]
#![no_std]
#![warn(missing_docs)]

extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

pub mod codec;

mod error;
pub use error::*;

pub mod events;
pub mod file;
pub mod message;

mod micros;
pub use micros::*;

pub mod reader;
pub mod writer;

/// Commonly used types
pub mod prelude {
    pub use crate::{
        ParseError, SmpteError, UMicros,
        events::{Event, EventFamily},
        file::{
            Chunk, ChunkType, FormatType, HeaderChunk, KeySignature, MetaEvent, MetaKind,
            MidiFile, SmpteFps, SmpteHeader, SmpteOffset, TicksPerQuarterNote, Tempo,
            TimeSignature, Timing, TrackChunk, TrackEvent, TrackEventIter,
        },
        message::{Channel, ChannelVoiceEvent, SystemEvent, SystemKind, VoiceEvent, VoiceKind},
        reader::{Component, ReadResult, Reader, ReaderError, ReaderErrorKind},
        writer::{WriteResult, Writer, WriterError},
    };
}
