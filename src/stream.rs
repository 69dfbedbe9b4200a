//! Positioned little-endian reads over a storage file.

use bytemuck::Pod;
use embedded_io::{Read, Seek, SeekFrom};

use crate::DecodeError;

/// A byte source being read through, with the absolute position tracked on
/// our side.
///
/// All multi-byte reads are little-endian, because that's all that BMP ever
/// uses.
#[derive(Debug)]
pub struct ByteStream<R> {
  inner: R,
  position: u32,
}

impl<R> ByteStream<R> {
  /// Wraps a reader that is currently at offset 0.
  #[inline]
  pub const fn new(inner: R) -> Self {
    Self { inner, position: 0 }
  }

  /// The absolute offset of the next byte to be read.
  #[inline]
  #[must_use]
  pub const fn position(&self) -> u32 {
    self.position
  }

  /// Gives back the reader.
  #[inline]
  pub fn into_inner(self) -> R {
    self.inner
  }
}

impl<R: Read + Seek> ByteStream<R> {
  /// Moves to an absolute offset.
  ///
  /// Seeking to where we already are doesn't touch the reader, since the
  /// blitter asks for that on every row of a tightly packed image.
  pub fn seek_to(&mut self, offset: u32) -> Result<(), DecodeError> {
    if offset == self.position {
      return Ok(());
    }
    match self.inner.seek(SeekFrom::Start(u64::from(offset))) {
      Ok(_) => {
        self.position = offset;
        Ok(())
      }
      Err(e) => {
        log::debug!("seek to {offset} failed: {e:?}");
        Err(DecodeError::ReadFailure)
      }
    }
  }

  /// Fills the whole buffer, or fails.
  pub fn read_into(&mut self, buf: &mut [u8]) -> Result<(), DecodeError> {
    self.inner.read_exact(buf)?;
    let len = u32::try_from(buf.len()).map_err(|_| DecodeError::ReadFailure)?;
    self.position = self.position.checked_add(len).ok_or(DecodeError::ReadFailure)?;
    Ok(())
  }

  #[inline]
  pub fn read_array<const N: usize>(&mut self) -> Result<[u8; N], DecodeError> {
    let mut a = [0_u8; N];
    self.read_into(&mut a)?;
    Ok(a)
  }

  /// Reads a plain-old-data struct straight off the stream.
  ///
  /// Intended for the `pack1` header structs, which have an alignment of 1.
  #[inline]
  pub fn read_pod<T: Pod>(&mut self) -> Result<T, DecodeError> {
    let mut t = T::zeroed();
    self.read_into(bytemuck::bytes_of_mut(&mut t))?;
    Ok(t)
  }

  #[inline]
  pub fn read_u8(&mut self) -> Result<u8, DecodeError> {
    let [b] = self.read_array::<1>()?;
    Ok(b)
  }

  #[inline]
  pub fn read_u16_le(&mut self) -> Result<u16, DecodeError> {
    self.read_array().map(u16::from_le_bytes)
  }

  #[inline]
  pub fn read_u32_le(&mut self) -> Result<u32, DecodeError> {
    self.read_array().map(u32::from_le_bytes)
  }

  #[inline]
  pub fn read_i32_le(&mut self) -> Result<i32, DecodeError> {
    self.read_array().map(i32::from_le_bytes)
  }

  /// Reads and throws away `count` bytes.
  ///
  /// This is for the few bytes of row padding, so it reads rather than
  /// seeks.
  pub fn skip(&mut self, count: u32) -> Result<(), DecodeError> {
    let mut scratch = [0_u8; 4];
    let mut remaining = count as usize;
    while remaining > 0 {
      let n = remaining.min(scratch.len());
      self.read_into(&mut scratch[..n])?;
      remaining -= n;
    }
    Ok(())
  }
}
