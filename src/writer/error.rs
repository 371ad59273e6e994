use thiserror::Error;

/// Errors raised while encoding the midi representation
///
/// These only arise from state that would not decode back to itself.
#[derive(Debug, Error)]
pub enum WriterError {
    /// The destination could not be written
    #[cfg(feature = "std")]
    #[error("I/O: {0}")]
    Io(#[from] std::io::Error),
    /// A system exclusive payload contains its own terminator
    #[error("System exclusive payload contains 0xF7 at index {0}")]
    SysExTerminatorInPayload(usize),
    /// A payload or chunk body is longer than 32 bits can describe
    #[error("Length {0} does not fit in 32 bits")]
    LengthOverflow(usize),
}

/// The Write Result type (see [`WriterError`])
pub type WriteResult<T> = Result<T, WriterError>;
