use core::str::Utf8Error;

use thiserror::Error;

use crate::{events::EventFamily, file::MetaKind};

#[doc = r#"
The set of things that can be wrong with the bytes of a MIDI file.

These carry no position. The [`Reader`](crate::reader::Reader) attaches one
when it wraps them into a [`ReaderError`](crate::reader::ReaderError).
"#]
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// The chunk tag was neither `MThd` nor `MTrk`
    #[error("Unknown chunk type \"{}\"", .0.escape_ascii())]
    UnknownChunkType([u8; 4]),
    /// A header chunk declared a body length other than 6
    #[error("Invalid header chunk: declared length {0}, expected 6")]
    InvalidHeaderChunk(u32),
    /// The status byte belongs to no event family
    #[error("No event family for status byte {0:#04X}")]
    UnknownEventTag(u8),
    /// The tag does not belong to the closed set of the family being decoded
    #[error("Unknown {family} event type {tag:#04X}")]
    UnknownEventType {
        /// The family that rejected the tag
        family: EventFamily,
        /// The offending byte
        tag: u8,
    },
    /// The buffer ended before a byte with a clear high bit
    #[error("Variable-length quantity is truncated")]
    TruncatedVarLen,
    /// The quantity needs more than 32 bits
    #[error("Variable-length quantity overflows 32 bits")]
    VarLenOverflow,
    /// No `0xF7` terminator before the end of the buffer
    #[error("System exclusive payload has no terminator")]
    TruncatedSystemExclusive,
    /// Fewer bytes remain than the meta event declares
    #[error("Meta payload declares {declared} bytes, only {available} remain")]
    TruncatedMetaPayload {
        /// The declared payload length
        declared: u32,
        /// Bytes left in the buffer
        available: usize,
    },
    /// A track event runs past the declared length of its chunk
    #[error("Track event at body offset {offset} runs past the declared chunk length {declared}")]
    TrackChunkOverrun {
        /// The declared chunk body length
        declared: u32,
        /// Where the event starts, relative to the start of the chunk body
        offset: usize,
    },
    /// A tempo does not fit in three bytes
    #[error("Tempo {0} does not fit in 24 bits")]
    InvalidTempo(u32),
    /// A text payload is not valid UTF-8
    #[error("Text payload is not UTF-8: {0}")]
    InvalidText(#[from] Utf8Error),
    /// A fixed-width meta payload has the wrong size
    #[error("{kind:?} payload must be {expected} bytes, found {found}")]
    InvalidMetaLength {
        /// The meta type
        kind: MetaKind,
        /// The width the type requires
        expected: usize,
        /// The declared width
        found: usize,
    },
    /// Invalid SMPTE data
    #[error("Smpte: {0}")]
    Smpte(#[from] SmpteError),
}

/// Errors from the structured SMPTE views of header divisions and offset payloads
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum SmpteError {
    /// An offset payload must be exactly five bytes
    #[error("Invalid length for smpte offset: {0}")]
    Length(usize),
    /// Header division frame byte is not -24, -25, -29 or -30
    #[error("Invalid header frame time: {0}")]
    HeaderFrameTime(i8),
    /// Offset frame rate bits are out of range
    #[error("Invalid track frame type: {0}")]
    TrackFrame(u8),
    /// Hours above 23
    #[error("Invalid hour offset: {0}")]
    HourOffset(u8),
    /// Minutes above 59
    #[error("Invalid minute offset: {0}")]
    MinuteOffset(u8),
    /// Seconds above 59
    #[error("Invalid second offset: {0}")]
    SecondOffset(u8),
    /// Subframes above 99
    #[error("Invalid subframe: {0}")]
    Subframe(u8),
}
