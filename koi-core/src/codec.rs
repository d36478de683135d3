//! Little-endian binary buffer and the Encode/Decode contract for save data.
//!
//! A buffer is written front to back and read front to back through a cursor.
//! Reads never panic: a truncated stream surfaces as `CodecError::UnexpectedEnd`.

use base64::Engine;
use thiserror::Error;

/// Growable byte buffer with a read cursor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BinBuffer {
    bytes: Vec<u8>,
    cursor: usize,
}

impl BinBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap existing bytes for reading, cursor at the start.
    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            bytes: bytes.into(),
            cursor: 0,
        }
    }

    /// Decode a buffer previously produced by `to_text`.
    pub fn from_text(text: &str) -> Result<Self, CodecError> {
        let bytes = base64::engine::general_purpose::STANDARD
            .decode(text.trim())
            .map_err(|err| {
                tracing::error!(error = %err, "save text is not valid base64");
                CodecError::InvalidText(err.to_string())
            })?;
        Ok(Self::from_bytes(bytes))
    }

    /// Printable form of the written bytes, used for save strings.
    pub fn to_text(&self) -> String {
        base64::engine::general_purpose::STANDARD.encode(&self.bytes)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Bytes left between the cursor and the end.
    pub fn remaining(&self) -> usize {
        self.bytes.len() - self.cursor
    }

    pub fn write_u8(&mut self, value: u8) {
        self.bytes.push(value);
    }

    pub fn write_u16(&mut self, value: u16) {
        self.bytes.extend_from_slice(&value.to_le_bytes());
    }

    pub fn write_u32(&mut self, value: u32) {
        self.bytes.extend_from_slice(&value.to_le_bytes());
    }

    pub fn write_f32(&mut self, value: f32) {
        self.bytes.extend_from_slice(&value.to_le_bytes());
    }

    pub fn read_u8(&mut self) -> Result<u8, CodecError> {
        let [byte] = self.take::<1>()?;
        Ok(byte)
    }

    pub fn read_u16(&mut self) -> Result<u16, CodecError> {
        Ok(u16::from_le_bytes(self.take::<2>()?))
    }

    pub fn read_u32(&mut self) -> Result<u32, CodecError> {
        Ok(u32::from_le_bytes(self.take::<4>()?))
    }

    pub fn read_f32(&mut self) -> Result<f32, CodecError> {
        Ok(f32::from_le_bytes(self.take::<4>()?))
    }

    fn take<const N: usize>(&mut self) -> Result<[u8; N], CodecError> {
        if self.remaining() < N {
            return Err(CodecError::UnexpectedEnd {
                needed: N,
                remaining: self.remaining(),
            });
        }

        let mut out = [0u8; N];
        out.copy_from_slice(&self.bytes[self.cursor..self.cursor + N]);
        self.cursor += N;
        Ok(out)
    }
}

/// Values that can be written to a `BinBuffer`.
pub trait Encode {
    fn encode(&self, buffer: &mut BinBuffer);

    /// Convenience: encode into a fresh buffer.
    fn to_buffer(&self) -> BinBuffer {
        let mut buffer = BinBuffer::new();
        self.encode(&mut buffer);
        buffer
    }
}

/// Values that can be read back from a `BinBuffer`, with range validation.
pub trait Decode: Sized {
    fn decode(buffer: &mut BinBuffer) -> Result<Self, CodecError>;
}

/// Fail with `OutOfRange` (and log it) unless `min <= value <= max`.
///
/// NaN is always out of range.
pub fn ensure_within(field: &'static str, value: f64, min: f64, max: f64) -> Result<(), CodecError> {
    if (min..=max).contains(&value) {
        return Ok(());
    }

    tracing::error!(field = field, value = value, min = min, max = max, "decoded value out of range");
    Err(CodecError::OutOfRange { field, value })
}

/// Errors raised while decoding save data. Any of these means the save is corrupted.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CodecError {
    #[error("unexpected end of buffer: needed {needed} bytes, {remaining} remaining")]
    UnexpectedEnd { needed: usize, remaining: usize },

    #[error("{field} out of range: {value}")]
    OutOfRange { field: &'static str, value: f64 },

    #[error("unknown layer id: {0}")]
    UnknownLayer(u8),

    #[error("{field} is not a unit vector (length {length})")]
    NotNormalized { field: &'static str, length: f64 },

    #[error("invalid save text: {0}")]
    InvalidText(String),
}
