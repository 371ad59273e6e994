#![doc = r#"
A cursor over the bytes of a MIDI file

The [`Reader`] never copies. Every read is bounds-checked against the
underlying slice, and positions are always absolute offsets into it, so an
error raised deep inside a track points at the right byte of the file. A
[bounded](Reader::bounded) reader sees a prefix of the slice and keeps the
same positions.
"#]

mod error;
pub use error::*;

use crate::{
    ParseError,
    codec::{fixed, varlen},
};

/// Reads primitive values from a byte slice.
#[derive(Debug, Clone, Copy)]
pub struct Reader<'slc> {
    buf: &'slc [u8],
    position: usize,
}

impl<'slc> Reader<'slc> {
    /// Create a reader positioned at the start of `buf`.
    pub const fn from_byte_slice(buf: &'slc [u8]) -> Self {
        Self { buf, position: 0 }
    }

    /// The absolute offset of the next byte to be read.
    pub const fn buffer_position(&self) -> usize {
        self.position
    }

    pub(crate) fn set_buffer_position(&mut self, position: usize) {
        self.position = position.min(self.buf.len());
    }

    /// Total length of the underlying buffer.
    pub const fn buffer_len(&self) -> usize {
        self.buf.len()
    }

    /// Bytes left after the cursor.
    pub const fn remaining(&self) -> usize {
        self.buf.len() - self.position
    }

    /// True once every byte has been consumed.
    pub const fn is_at_end(&self) -> bool {
        self.position >= self.buf.len()
    }

    /// A reader that stops at absolute offset `end`, at the same position.
    pub(crate) fn bounded(&self, end: usize) -> Self {
        let end = end.min(self.buf.len());
        Self {
            buf: &self.buf[..end],
            position: self.position.min(end),
        }
    }

    fn rest(&self) -> &'slc [u8] {
        &self.buf[self.position..]
    }

    /// Look at the next byte without consuming it.
    pub fn peek_next(&self) -> Option<u8> {
        self.buf.get(self.position).copied()
    }

    /// Consume one byte.
    pub fn read_next(&mut self) -> Result<u8, ReaderErrorKind> {
        let byte = self.peek_next().ok_or(ReaderErrorKind::OutOfBounds)?;
        self.position += 1;
        Ok(byte)
    }

    /// Consume exactly `N` bytes.
    pub fn read_exact_size<const N: usize>(&mut self) -> Result<[u8; N], ReaderErrorKind> {
        let bytes = *self
            .rest()
            .first_chunk::<N>()
            .ok_or(ReaderErrorKind::OutOfBounds)?;
        self.position += N;
        Ok(bytes)
    }

    /// Consume `len` bytes, borrowed from the buffer.
    pub fn read_exact(&mut self, len: usize) -> Result<&'slc [u8], ReaderErrorKind> {
        let bytes = self
            .rest()
            .get(..len)
            .ok_or(ReaderErrorKind::OutOfBounds)?;
        self.position += len;
        Ok(bytes)
    }

    /// Consume a big-endian `u16`.
    pub fn read_u16(&mut self) -> Result<u16, ReaderErrorKind> {
        let value = fixed::read_u16(self.rest()).ok_or(ReaderErrorKind::OutOfBounds)?;
        self.position += 2;
        Ok(value)
    }

    /// Consume a big-endian `u32`.
    pub fn read_u32(&mut self) -> Result<u32, ReaderErrorKind> {
        let value = fixed::read_u32(self.rest()).ok_or(ReaderErrorKind::OutOfBounds)?;
        self.position += 4;
        Ok(value)
    }

    /// Consume a variable-length quantity.
    ///
    /// The cursor does not move if the quantity is malformed.
    pub fn read_varlen(&mut self) -> Result<u32, ReaderErrorKind> {
        let (value, len) = varlen::decode(self.rest())?;
        self.position += len;
        Ok(value)
    }

    /// Consume bytes up to and including `terminator`, returning those before it.
    ///
    /// The scan stops at the end of the buffer. If no terminator is found,
    /// the cursor does not move.
    pub fn read_until(&mut self, terminator: u8) -> Result<&'slc [u8], ReaderErrorKind> {
        let rest = self.rest();
        let end = rest
            .iter()
            .position(|&b| b == terminator)
            .ok_or(ParseError::TruncatedSystemExclusive)?;
        self.position += end + 1;
        Ok(&rest[..end])
    }
}

#[test]
fn reads_advance_the_cursor() {
    use pretty_assertions::assert_eq;

    let bytes = [0x4D, 0x54, 0x68, 0x64, 0x83, 0x60, 0x01, 0x02, 0x03];
    let mut reader = Reader::from_byte_slice(&bytes);

    assert_eq!(reader.read_exact_size::<4>().unwrap(), *b"MThd");
    assert_eq!(reader.buffer_position(), 4);
    let mut peek = reader;
    assert_eq!(peek.read_u32().unwrap(), 0x8360_0102);
    assert!(matches!(peek.read_u16(), Err(ReaderErrorKind::OutOfBounds)));
    assert_eq!(reader.read_varlen().unwrap(), 0x1E0);
    assert_eq!(reader.peek_next(), Some(0x01));
    assert_eq!(reader.read_next().unwrap(), 0x01);
    assert_eq!(reader.read_exact(2).unwrap(), &[0x02, 0x03]);
    assert!(reader.is_at_end());
    assert!(matches!(
        reader.read_next(),
        Err(ReaderErrorKind::OutOfBounds)
    ));
}

#[test]
fn short_reads_leave_the_cursor() {
    use pretty_assertions::assert_eq;

    let bytes = [0x00, 0x81];
    let mut reader = Reader::from_byte_slice(&bytes);
    reader.read_next().unwrap();

    assert!(matches!(
        reader.read_exact_size::<2>(),
        Err(ReaderErrorKind::OutOfBounds)
    ));
    assert!(matches!(
        reader.read_varlen(),
        Err(ReaderErrorKind::ParseError(ParseError::TruncatedVarLen))
    ));
    assert_eq!(reader.buffer_position(), 1);
}

#[test]
fn read_until_is_bounded() {
    use pretty_assertions::assert_eq;

    let bytes = [0x43, 0x12, 0xF7, 0x00];
    let mut reader = Reader::from_byte_slice(&bytes);
    assert_eq!(reader.read_until(0xF7).unwrap(), &[0x43, 0x12]);
    assert_eq!(reader.buffer_position(), 3);

    assert!(matches!(
        reader.read_until(0xF7),
        Err(ReaderErrorKind::ParseError(
            ParseError::TruncatedSystemExclusive
        ))
    ));
    assert_eq!(reader.buffer_position(), 3);
}

#[test]
fn bounded_reader_keeps_positions() {
    use pretty_assertions::assert_eq;

    let bytes = [0x01, 0x02, 0x03, 0x04, 0xF7];
    let mut reader = Reader::from_byte_slice(&bytes);
    reader.read_next().unwrap();

    let mut body = reader.bounded(3);
    assert_eq!(body.buffer_position(), 1);
    assert_eq!(body.remaining(), 2);
    assert!(matches!(
        body.read_exact_size::<3>(),
        Err(ReaderErrorKind::OutOfBounds)
    ));
    // the terminator lies past the bound
    assert!(matches!(
        body.read_until(0xF7),
        Err(ReaderErrorKind::ParseError(
            ParseError::TruncatedSystemExclusive
        ))
    ));
    assert_eq!(body.read_exact(2).unwrap(), &[0x02, 0x03]);
    assert!(body.is_at_end());
    assert_eq!(body.buffer_position(), 3);
}
