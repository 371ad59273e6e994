use core::fmt;

use thiserror::Error;

use crate::ParseError;

/// The layer of the decoder that produced a [`ReaderError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Component {
    /// A variable-length quantity (delta-time or meta length)
    VarLen,
    /// An event body
    Event,
    /// A delta-time and event pair
    TrackEvent,
    /// A chunk header or body
    Chunk,
    /// The file as a whole
    File,
}

impl fmt::Display for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::VarLen => "variable-length quantity",
            Self::Event => "event",
            Self::TrackEvent => "track event",
            Self::Chunk => "chunk",
            Self::File => "file",
        };
        f.write_str(name)
    }
}

#[doc = r#"
A set of errors that can occur while reading data into the midi representation
"#]
#[derive(Debug, Error)]
#[error("Reading {component} at position {position}, {kind}")]
pub struct ReaderError {
    position: usize,
    component: Component,
    pub(crate) kind: ReaderErrorKind,
}

/// A kind of error that a reader can produce
#[derive(Debug, Error)]
pub enum ReaderErrorKind {
    /// The source could not be read
    #[cfg(feature = "std")]
    #[error("I/O: {0}")]
    Io(#[from] std::io::Error),
    /// Parsing errors
    #[error("Parsing {0}")]
    ParseError(#[from] ParseError),
    /// Reading out of bounds.
    #[error("Read out of bounds!")]
    OutOfBounds,
}

impl ReaderError {
    /// Create a reader error from a position and kind
    pub const fn new(position: usize, component: Component, kind: ReaderErrorKind) -> Self {
        Self {
            position,
            component,
            kind,
        }
    }
    /// True if out of bounds or unexpected end of file
    pub const fn is_out_of_bounds(&self) -> bool {
        matches!(self.kind, ReaderErrorKind::OutOfBounds)
    }
    /// True if the input ran out before the item was complete.
    pub fn is_truncation(&self) -> bool {
        matches!(
            self.kind,
            ReaderErrorKind::OutOfBounds
                | ReaderErrorKind::ParseError(
                    ParseError::TruncatedVarLen
                        | ParseError::TruncatedSystemExclusive
                        | ParseError::TruncatedMetaPayload { .. }
                )
        )
    }
    /// Returns the error kind of the reader.
    pub fn error_kind(&self) -> &ReaderErrorKind {
        &self.kind
    }
    /// Returns the parse error, if this is one.
    pub fn parse_error(&self) -> Option<&ParseError> {
        match &self.kind {
            ReaderErrorKind::ParseError(e) => Some(e),
            _ => None,
        }
    }
    /// Returns the absolute position of the item that failed to decode.
    pub fn position(&self) -> usize {
        self.position
    }
    /// Returns the decoder layer the error came from.
    pub fn component(&self) -> Component {
        self.component
    }

    /// Create a new out of bounds error
    pub const fn oob(position: usize, component: Component) -> Self {
        Self::new(position, component, ReaderErrorKind::OutOfBounds)
    }

    #[cfg(feature = "std")]
    pub(crate) fn io(error: std::io::Error) -> Self {
        Self::new(0, Component::File, ReaderErrorKind::Io(error))
    }
}

/// The Read Result type (see [`ReaderError`])
pub type ReadResult<T> = Result<T, ReaderError>;

/// Positions a bare error kind.
pub(crate) trait At<T> {
    fn at(self, position: usize, component: Component) -> ReadResult<T>;
}

impl<T, E> At<T> for Result<T, E>
where
    E: Into<ReaderErrorKind>,
{
    fn at(self, position: usize, component: Component) -> ReadResult<T> {
        self.map_err(|e| ReaderError::new(position, component, e.into()))
    }
}
