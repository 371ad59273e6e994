#![doc = r#"
Contains types for MIDI file chunks

# Overview

MIDI files are organized into chunks, each identified by a 4-character ASCII type identifier
followed by a 32-bit length field and then the chunk data.

```text
"MThd" <u32 length = 6> <format> <track count> <division>
"MTrk" <u32 length> <track event> <track event> ...
```

## [`HeaderChunk`]

The header chunk (identified by "MThd") carries the file format, the number of track chunks,
and the division, which says how delta-times are to be interpreted. It always has a length
of 6 bytes.

## [`TrackChunk`]

Track chunks (identified by "MTrk") contain the actual events, each one a
[`TrackEvent`]: a delta-time followed by an event.

Any other identifier is rejected with [`ParseError::UnknownChunkType`].

The length field is never stored. When a chunk is written it is recomputed from the body,
so events can be added, removed or changed freely between reading and writing.
"#]

mod header;
pub use header::*;

mod track;
pub use track::*;

use alloc::vec::Vec;

use crate::{
    ParseError,
    file::TrackEvent,
    reader::{At, Component, ReadResult, Reader, ReaderError},
    writer::{WriteResult, Writer},
};

/// The two chunk identifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ChunkType {
    /// `MThd`
    Header,
    /// `MTrk`
    Track,
}

impl ChunkType {
    /// Match a four byte identifier.
    pub const fn from_tag(tag: [u8; 4]) -> Option<Self> {
        match &tag {
            b"MThd" => Some(Self::Header),
            b"MTrk" => Some(Self::Track),
            _ => None,
        }
    }

    /// The four byte identifier.
    pub const fn tag(&self) -> &'static [u8; 4] {
        match self {
            Self::Header => b"MThd",
            Self::Track => b"MTrk",
        }
    }
}

/// A chunk of a MIDI file
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Chunk {
    /// The `MThd` chunk
    Header(HeaderChunk),
    /// An `MTrk` chunk
    Track(TrackChunk),
}

impl Chunk {
    /// Decode a chunk from the start of `bytes`, returning it and the bytes consumed.
    pub fn parse(bytes: &[u8]) -> ReadResult<(Self, usize)> {
        let mut reader = Reader::from_byte_slice(bytes);
        let chunk = Self::read(&mut reader)?;
        Ok((chunk, reader.buffer_position()))
    }

    /// Identifies the kind of chunk
    pub const fn chunk_type(&self) -> ChunkType {
        match self {
            Self::Header(_) => ChunkType::Header,
            Self::Track(_) => ChunkType::Track,
        }
    }

    /// Length of the body, as it will be written.
    pub fn len(&self) -> usize {
        match self {
            Self::Header(_) => HeaderChunk::LENGTH as usize,
            Self::Track(track) => track.body_len(),
        }
    }

    /// True for a track chunk without events.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Length of the whole chunk, tag and length field included.
    pub fn encoded_len(&self) -> usize {
        8 + self.len()
    }

    /// The events of a track chunk, in order. A header chunk has none.
    pub fn events(&self) -> core::slice::Iter<'_, TrackEvent> {
        match self {
            Self::Header(_) => <&[TrackEvent]>::default().iter(),
            Self::Track(track) => track.events().iter(),
        }
    }

    /// The events of a track chunk, for modification.
    pub fn events_mut(&mut self) -> core::slice::IterMut<'_, TrackEvent> {
        match self {
            Self::Header(_) => <&mut [TrackEvent]>::default().iter_mut(),
            Self::Track(track) => track.events_mut().iter_mut(),
        }
    }

    /// Returns the header, for a header chunk.
    pub fn as_header(&self) -> Option<&HeaderChunk> {
        match self {
            Self::Header(header) => Some(header),
            Self::Track(_) => None,
        }
    }

    /// Returns the track, for a track chunk.
    pub fn as_track(&self) -> Option<&TrackChunk> {
        match self {
            Self::Track(track) => Some(track),
            Self::Header(_) => None,
        }
    }

    /// Encode into a new buffer.
    pub fn to_bytes(&self) -> WriteResult<Vec<u8>> {
        let mut writer = Writer::with_capacity(self.encoded_len());
        self.write(&mut writer)?;
        Ok(writer.into_bytes())
    }

    pub(crate) fn read(reader: &mut Reader<'_>) -> ReadResult<Self> {
        let start = reader.buffer_position();
        let tag = reader.read_exact_size::<4>().at(start, Component::Chunk)?;
        let chunk_type = ChunkType::from_tag(tag)
            .ok_or(ParseError::UnknownChunkType(tag))
            .at(start, Component::Chunk)?;
        let length = reader.read_u32().at(start, Component::Chunk)?;

        let chunk = match chunk_type {
            ChunkType::Header => {
                if length != HeaderChunk::LENGTH {
                    return Err(ParseError::InvalidHeaderChunk(length))
                        .at(start, Component::Chunk);
                }
                Self::Header(HeaderChunk::read(reader).at(start, Component::Chunk)?)
            }
            ChunkType::Track => {
                let body_start = reader.buffer_position();
                if length as usize > reader.remaining() {
                    return Err(ReaderError::oob(start, Component::Chunk));
                }
                let events = TrackEventIter::within(*reader, length)
                    .collect::<ReadResult<Vec<_>>>()?;
                reader.set_buffer_position(body_start + length as usize);
                Self::Track(TrackChunk::new(events))
            }
        };

        log::debug!("{:?} chunk at {start}, {length} bytes", chunk.chunk_type());
        Ok(chunk)
    }

    pub(crate) fn write(&self, writer: &mut Writer) -> WriteResult<()> {
        writer.write_all(self.chunk_type().tag());
        writer.write_length_prefixed(|w| match self {
            Self::Header(header) => {
                header.write(w);
                Ok(())
            }
            Self::Track(track) => track.write(w),
        })
    }
}

impl From<HeaderChunk> for Chunk {
    fn from(value: HeaderChunk) -> Self {
        Self::Header(value)
    }
}

impl From<TrackChunk> for Chunk {
    fn from(value: TrackChunk) -> Self {
        Self::Track(value)
    }
}

#[test]
fn header_chunk_round_trip() {
    use pretty_assertions::assert_eq;

    let bytes = [
        0x4D, 0x54, 0x68, 0x64, 0x00, 0x00, 0x00, 0x06, 0x00, 0x01, 0x00, 0x02, 0x00, 0x60,
    ];
    let (chunk, len) = Chunk::parse(&bytes).unwrap();
    assert_eq!(len, 14);
    assert_eq!(
        chunk,
        Chunk::Header(HeaderChunk {
            format: 1,
            track_count: 2,
            division: 96
        })
    );
    assert_eq!(chunk.events().count(), 0);
    assert_eq!(chunk.to_bytes().unwrap(), bytes);
}

#[test]
fn unknown_chunk_type() {
    use pretty_assertions::assert_eq;

    let err = Chunk::parse(b"MTxt\x00\x00\x00\x00").unwrap_err();
    assert_eq!(
        err.parse_error(),
        Some(&ParseError::UnknownChunkType(*b"MTxt"))
    );
    assert_eq!(err.component(), Component::Chunk);
}

#[test]
fn header_must_be_six_bytes() {
    use pretty_assertions::assert_eq;

    let bytes = b"MThd\x00\x00\x00\x08\x00\x01\x00\x02\x00\x60\x00\x00";
    let err = Chunk::parse(bytes).unwrap_err();
    assert_eq!(err.parse_error(), Some(&ParseError::InvalidHeaderChunk(8)));
}

#[test]
fn track_chunk_events() {
    use pretty_assertions::assert_eq;

    let bytes = [
        0x4D, 0x54, 0x72, 0x6B, 0x00, 0x00, 0x00, 0x0C, // MTrk, 12 bytes
        0x00, 0x90, 0x3C, 0x40, // note on
        0x60, 0x80, 0x3C, 0x40, // note off
        0x00, 0xFF, 0x2F, 0x00, // end of track
    ];
    let (chunk, len) = Chunk::parse(&bytes).unwrap();
    assert_eq!(len, bytes.len());
    assert_eq!(chunk.len(), 12);

    let deltas: Vec<u32> = chunk.events().map(|e| e.delta_time).collect();
    assert_eq!(deltas, [0, 96, 0]);
    // iterating again starts over
    assert_eq!(chunk.events().count(), 3);
    assert_eq!(chunk.to_bytes().unwrap(), bytes);
}

#[test]
fn final_event_overruns_chunk() {
    use pretty_assertions::assert_eq;

    let bytes = [
        0x4D, 0x54, 0x72, 0x6B, 0x00, 0x00, 0x00, 0x06, // declares 6 bytes
        0x00, 0x90, 0x3C, 0x40, // 4 bytes
        0x00, 0xFF, 0x2F, 0x00, // ends 2 bytes past the declared length
    ];
    let err = Chunk::parse(&bytes).unwrap_err();
    assert_eq!(
        err.parse_error(),
        Some(&ParseError::TrackChunkOverrun {
            declared: 6,
            offset: 4
        })
    );
    assert_eq!(err.position(), 12);
}

#[test]
fn declared_length_past_input() {
    let bytes = [0x4D, 0x54, 0x72, 0x6B, 0x00, 0x00, 0x01, 0x00, 0x00, 0xFF, 0x2F, 0x00];
    let err = Chunk::parse(&bytes).unwrap_err();
    assert!(err.is_out_of_bounds());
}

#[test]
fn length_follows_mutation() {
    use crate::file::MetaEvent;
    use pretty_assertions::assert_eq;

    let bytes = [
        0x4D, 0x54, 0x72, 0x6B, 0x00, 0x00, 0x00, 0x04, // MTrk, 4 bytes
        0x00, 0xFF, 0x2F, 0x00,
    ];
    let (mut chunk, _) = Chunk::parse(&bytes).unwrap();
    let Chunk::Track(track) = &mut chunk else {
        panic!("expected a track");
    };
    track.events_mut().insert(
        0,
        TrackEvent::new(0, MetaEvent::TrackName("Lead".into())),
    );

    assert_eq!(
        chunk.to_bytes().unwrap(),
        [
            0x4D, 0x54, 0x72, 0x6B, 0x00, 0x00, 0x00, 0x0B, // now 11 bytes
            0x00, 0xFF, 0x03, 0x04, b'L', b'e', b'a', b'd', //
            0x00, 0xFF, 0x2F, 0x00,
        ]
    );
}
