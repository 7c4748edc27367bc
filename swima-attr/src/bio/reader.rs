//! Big-endian buffer reader

use crate::error::{SwimaError, SwimaResult};

/// Reader for network byte order integers and length-prefixed data
///
/// The reader borrows the buffer it parses; returned data slices point
/// into that buffer. A failed read leaves the position unchanged.
pub struct BioReader<'a> {
    buffer: &'a [u8],
    position: usize,
}

impl<'a> BioReader<'a> {
    /// Create a new reader
    pub fn new(buffer: &'a [u8]) -> Self {
        Self {
            buffer,
            position: 0,
        }
    }

    /// Read a u8
    pub fn read_u8(&mut self) -> SwimaResult<u8> {
        let bytes = self.read_data(1)?;
        Ok(bytes[0])
    }

    /// Read a u16 (big-endian)
    pub fn read_u16(&mut self) -> SwimaResult<u16> {
        let bytes = self.read_data(2)?;
        Ok(u16::from_be_bytes([bytes[0], bytes[1]]))
    }

    /// Read a 24-bit unsigned integer (big-endian)
    pub fn read_u24(&mut self) -> SwimaResult<u32> {
        let bytes = self.read_data(3)?;
        Ok(u32::from_be_bytes([0, bytes[0], bytes[1], bytes[2]]))
    }

    /// Read a u32 (big-endian)
    pub fn read_u32(&mut self) -> SwimaResult<u32> {
        let bytes = self.read_data(4)?;
        Ok(u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }

    /// Read fixed-length data
    pub fn read_data(&mut self, len: usize) -> SwimaResult<&'a [u8]> {
        if len > self.remaining() {
            return Err(SwimaError::InsufficientData {
                needed: len,
                available: self.remaining(),
            });
        }
        let data = &self.buffer[self.position..self.position + len];
        self.position += len;
        Ok(data)
    }

    /// Read data preceded by a 16-bit length field
    pub fn read_data16(&mut self) -> SwimaResult<&'a [u8]> {
        let start = self.position;
        let len = self.read_u16()? as usize;
        self.read_data(len).inspect_err(|_| self.position = start)
    }

    /// Get current position
    pub fn position(&self) -> usize {
        self.position
    }

    /// Get remaining bytes
    pub fn remaining(&self) -> usize {
        self.buffer.len() - self.position
    }
}
