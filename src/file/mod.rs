#![doc = r#"
Rusty representation of a [`MidiFile`]

A file is a sequence of [`Chunk`]s. Decoding keeps every chunk in order and
encoding writes them back in the same order, recomputing each length, so a
file that was decoded and not modified encodes to the same bytes.

# Example
```rust
# use smfcodec::prelude::*;
let bytes = [
    0x4D, 0x54, 0x68, 0x64, 0x00, 0x00, 0x00, 0x06, 0x00, 0x00, 0x00, 0x01, 0x00, 0x60,
    0x4D, 0x54, 0x72, 0x6B, 0x00, 0x00, 0x00, 0x04, 0x00, 0xFF, 0x2F, 0x00,
];
let file = MidiFile::parse(&bytes).unwrap();

assert_eq!(file.header().unwrap().format_type(), Some(FormatType::SingleMultiChannel));
assert_eq!(file.tracks().count(), 1);
assert_eq!(file.encode().unwrap(), bytes);
```
"#]

mod format;
pub use format::*;

mod chunk;
pub use chunk::*;

mod track_event;
pub use track_event::*;

mod timing;
pub use timing::*;

mod meta;
pub use meta::*;

use alloc::vec::Vec;

use crate::{
    reader::{ReadResult, Reader},
    writer::{WriteResult, Writer},
};

/// A decoded standard MIDI file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MidiFile {
    chunks: Vec<Chunk>,
}

impl MidiFile {
    /// Create a file from its chunks.
    pub fn new(chunks: Vec<Chunk>) -> Self {
        Self { chunks }
    }

    /// Decode every chunk in `bytes`.
    ///
    /// The input must hold whole chunks and nothing else. An empty input
    /// is a file with no chunks.
    pub fn parse(bytes: &[u8]) -> ReadResult<Self> {
        let mut reader = Reader::from_byte_slice(bytes);
        let mut chunks = Vec::new();
        while !reader.is_at_end() {
            chunks.push(Chunk::read(&mut reader)?);
        }

        let file = Self { chunks };
        file.check_consistency();
        Ok(file)
    }

    /// Read and decode the file at `path`.
    #[cfg(feature = "std")]
    pub fn open(path: impl AsRef<std::path::Path>) -> ReadResult<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(crate::reader::ReaderError::io)?;
        log::debug!("decoding {} ({} bytes)", path.display(), bytes.len());
        Self::parse(&bytes)
    }

    /// All chunks, in file order
    pub fn chunks(&self) -> &[Chunk] {
        &self.chunks
    }

    /// All chunks, for modification
    pub fn chunks_mut(&mut self) -> &mut Vec<Chunk> {
        &mut self.chunks
    }

    /// Take the chunks out of the file.
    pub fn into_chunks(self) -> Vec<Chunk> {
        self.chunks
    }

    /// The first header chunk, if there is one.
    pub fn header(&self) -> Option<&HeaderChunk> {
        self.chunks.iter().find_map(Chunk::as_header)
    }

    /// The first header chunk, for modification.
    pub fn header_mut(&mut self) -> Option<&mut HeaderChunk> {
        self.chunks.iter_mut().find_map(|chunk| match chunk {
            Chunk::Header(header) => Some(header),
            Chunk::Track(_) => None,
        })
    }

    /// The track chunks, in file order.
    pub fn tracks(&self) -> impl Iterator<Item = &TrackChunk> {
        self.chunks.iter().filter_map(Chunk::as_track)
    }

    /// The track chunks, for modification.
    pub fn tracks_mut(&mut self) -> impl Iterator<Item = &mut TrackChunk> {
        self.chunks.iter_mut().filter_map(|chunk| match chunk {
            Chunk::Track(track) => Some(track),
            Chunk::Header(_) => None,
        })
    }

    /// Length of the encoded file.
    pub fn encoded_len(&self) -> usize {
        self.chunks.iter().map(Chunk::encoded_len).sum()
    }

    /// Encode every chunk, in order.
    pub fn encode(&self) -> WriteResult<Vec<u8>> {
        let mut writer = Writer::with_capacity(self.encoded_len());
        for chunk in &self.chunks {
            chunk.write(&mut writer)?;
        }
        Ok(writer.into_bytes())
    }

    /// Encode the file and write it to `path`.
    #[cfg(feature = "std")]
    pub fn export(&self, path: impl AsRef<std::path::Path>) -> WriteResult<()> {
        let path = path.as_ref();
        let bytes = self.encode()?;
        log::debug!("writing {} ({} bytes)", path.display(), bytes.len());
        std::fs::write(path, bytes)?;
        Ok(())
    }

    /// Decoding accepts structurally odd files. Say so.
    fn check_consistency(&self) {
        let Some(header) = self.header() else {
            if !self.chunks.is_empty() {
                log::warn!("file has no MThd chunk");
            }
            return;
        };
        if !matches!(self.chunks.first(), Some(Chunk::Header(_))) {
            log::warn!("MThd is not the first chunk");
        }

        let tracks = self.tracks().count();
        if usize::from(header.track_count) != tracks {
            log::warn!(
                "header declares {} tracks, file has {tracks}",
                header.track_count
            );
        }
        if let Some(required) = header.format_type().and_then(|f| f.required_tracks()) {
            if usize::from(required) != tracks {
                log::warn!("format 0 file with {tracks} tracks");
            }
        }

        for (index, track) in self.tracks().enumerate() {
            if !track.ends_with_end_of_track() {
                log::warn!("track {index} does not end with End of Track");
            }
        }
    }
}

impl FromIterator<Chunk> for MidiFile {
    fn from_iter<T: IntoIterator<Item = Chunk>>(iter: T) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

#[test]
fn empty_input_is_empty_file() {
    use pretty_assertions::assert_eq;

    let file = MidiFile::parse(&[]).unwrap();
    assert_eq!(file, MidiFile::default());
    assert_eq!(file.encode().unwrap(), Vec::<u8>::new());
}

#[test]
fn trailing_partial_chunk() {
    use crate::reader::Component;
    use pretty_assertions::assert_eq;

    let bytes = [
        0x4D, 0x54, 0x68, 0x64, 0x00, 0x00, 0x00, 0x06, 0x00, 0x00, 0x00, 0x01, 0x00, 0x60, //
        0x4D, 0x54, 0x72,
    ];
    let err = MidiFile::parse(&bytes).unwrap_err();
    assert!(err.is_out_of_bounds());
    assert_eq!(err.position(), 14);
    assert_eq!(err.component(), Component::Chunk);
}

#[test]
fn accessors() {
    use pretty_assertions::assert_eq;

    let mut file: MidiFile = [
        Chunk::from(HeaderChunk::new(1, 2, 96)),
        Chunk::from(TrackChunk::new(Vec::new())),
        Chunk::from(TrackChunk::new(Vec::new())),
    ]
    .into_iter()
    .collect();

    assert_eq!(file.header(), Some(&HeaderChunk::new(1, 2, 96)));
    assert_eq!(file.tracks().count(), 2);
    assert_eq!(file.encoded_len(), 14 + 8 + 8);

    for track in file.tracks_mut() {
        track.push(TrackEvent::new(0, MetaEvent::EndOfTrack));
    }
    if let Some(header) = file.header_mut() {
        header.track_count = 2;
    }
    assert_eq!(file.encoded_len(), 14 + 12 + 12);
    assert_eq!(file.clone().into_chunks().len(), 3);
    assert_eq!(file.chunks()[1].len(), 4);
}
