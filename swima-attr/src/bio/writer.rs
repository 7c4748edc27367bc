//! Big-endian buffer writer

use bytes::{BufMut, Bytes, BytesMut};

/// Writer for network byte order integers and length-prefixed data
pub struct BioWriter {
    buffer: BytesMut,
}

impl BioWriter {
    /// Create a new writer with initial capacity
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buffer: BytesMut::with_capacity(capacity),
        }
    }

    /// Write a u8
    pub fn write_u8(&mut self, value: u8) {
        self.buffer.put_u8(value);
    }

    /// Write a u16 (big-endian)
    pub fn write_u16(&mut self, value: u16) {
        self.buffer.put_u16(value);
    }

    /// Write the low 24 bits of a u32 (big-endian)
    pub fn write_u24(&mut self, value: u32) {
        self.buffer.put_slice(&value.to_be_bytes()[1..]);
    }

    /// Write a u32 (big-endian)
    pub fn write_u32(&mut self, value: u32) {
        self.buffer.put_u32(value);
    }

    /// Write raw data
    pub fn write_data(&mut self, data: &[u8]) {
        self.buffer.put_slice(data);
    }

    /// Write data preceded by a 16-bit length field
    ///
    /// Data longer than 65535 bytes is truncated so that the length field
    /// always matches the bytes that follow it.
    pub fn write_data16(&mut self, data: &[u8]) {
        let len = data.len().min(u16::MAX as usize);
        self.write_u16(len as u16);
        self.write_data(&data[..len]);
    }

    /// Take the encoded buffer
    pub fn extract_buf(self) -> Bytes {
        self.buffer.freeze()
    }
}
