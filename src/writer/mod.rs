#![doc = r#"
Serialization of the midi representation back into bytes

Every type in the model writes itself into a [`Writer`]. Lengths are never
taken from decoded state. Chunk lengths are patched in once the body is
written, and meta lengths come from the payload being written.
"#]

mod error;
pub use error::*;

use alloc::vec::Vec;

use crate::codec::{fixed, varlen};

/// An append-only output buffer.
#[derive(Debug, Default, Clone)]
pub struct Writer {
    buf: Vec<u8>,
}

impl Writer {
    /// An empty writer.
    pub const fn new() -> Self {
        Self { buf: Vec::new() }
    }

    /// An empty writer with room for `capacity` bytes.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: Vec::with_capacity(capacity),
        }
    }

    /// Number of bytes written so far.
    pub fn position(&self) -> usize {
        self.buf.len()
    }

    /// The bytes written so far.
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    /// Finish writing.
    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }

    /// Write one byte.
    pub fn write_u8(&mut self, byte: u8) {
        self.buf.push(byte);
    }

    /// Write bytes verbatim.
    pub fn write_all(&mut self, bytes: &[u8]) {
        self.buf.extend_from_slice(bytes);
    }

    /// Write a big-endian `u16`.
    pub fn write_u16(&mut self, value: u16) {
        fixed::write_u16(value, &mut self.buf);
    }

    /// Write a big-endian `u32`.
    pub fn write_u32(&mut self, value: u32) {
        fixed::write_u32(value, &mut self.buf);
    }

    /// Write a variable-length quantity.
    pub fn write_varlen(&mut self, value: u32) {
        varlen::encode(value, &mut self.buf);
    }

    /// Write a length as a variable-length quantity.
    pub fn write_len(&mut self, len: usize) -> WriteResult<()> {
        let len = u32::try_from(len).map_err(|_| WriterError::LengthOverflow(len))?;
        self.write_varlen(len);
        Ok(())
    }

    /// Write `body`, prefixed by its length as a big-endian `u32`.
    pub fn write_length_prefixed<F>(&mut self, body: F) -> WriteResult<()>
    where
        F: FnOnce(&mut Self) -> WriteResult<()>,
    {
        let at = self.position();
        self.write_u32(0);
        body(self)?;

        let len = self.position() - at - 4;
        let len = u32::try_from(len).map_err(|_| WriterError::LengthOverflow(len))?;
        self.buf[at..at + 4].copy_from_slice(&len.to_be_bytes());
        Ok(())
    }
}

#[test]
fn length_prefix_is_patched() {
    use pretty_assertions::assert_eq;

    let mut writer = Writer::new();
    writer.write_all(b"MTrk");
    writer
        .write_length_prefixed(|w| {
            w.write_varlen(0);
            w.write_all(&[0xFF, 0x2F]);
            w.write_len(0)
        })
        .unwrap();

    assert_eq!(
        writer.into_bytes(),
        [0x4D, 0x54, 0x72, 0x6B, 0x00, 0x00, 0x00, 0x04, 0x00, 0xFF, 0x2F, 0x00]
    );
}

#[test]
fn failed_body_propagates() {
    let mut writer = Writer::new();
    let result =
        writer.write_length_prefixed(|_| Err(WriterError::SysExTerminatorInPayload(3)));
    assert!(matches!(
        result,
        Err(WriterError::SysExTerminatorInPayload(3))
    ));
}
