use bytemuck::cast_slice;
use embedded_graphics::pixelcolor::{Rgb565, RgbColor};
use embedded_io::{Read, Seek};

use crate::{
  color::{bgr888_to_rgb565, rgb555_to_rgb565},
  BlitError, ByteStream, DecodeError, Palette, CHUNK_PIXELS,
};

/// The pixel encodings the row decoder implements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PixelDepth {
  /// Two palette indexes per byte, high nibble first.
  Indexed4,
  /// One palette index per byte.
  Indexed8,
  /// `x1r5g5b5` in a little-endian `u16`.
  Rgb555,
  /// `[b, g, r]`
  Bgr24,
  /// `[b, g, r, x]`
  Bgrx32,
}

impl TryFrom<u16> for PixelDepth {
  type Error = DecodeError;
  #[inline]
  fn try_from(bits_per_pixel: u16) -> Result<Self, Self::Error> {
    Ok(match bits_per_pixel {
      #[cfg(feature = "palette")]
      4 => Self::Indexed4,
      #[cfg(feature = "palette")]
      8 => Self::Indexed8,
      16 => Self::Rgb555,
      24 => Self::Bgr24,
      32 => Self::Bgrx32,
      other => {
        log::warn!("{other} bits per pixel isn't supported");
        return Err(DecodeError::UnsupportedDepth);
      }
    })
  }
}

impl PixelDepth {
  #[inline]
  #[must_use]
  pub const fn bits(self) -> u32 {
    match self {
      Self::Indexed4 => 4,
      Self::Indexed8 => 8,
      Self::Rgb555 => 16,
      Self::Bgr24 => 24,
      Self::Bgrx32 => 32,
    }
  }

  #[inline]
  #[must_use]
  pub const fn is_indexed(self) -> bool {
    matches!(self, Self::Indexed4 | Self::Indexed8)
  }

  /// Bytes holding `pixels` pixels, rounding a partial byte up.
  #[inline]
  #[must_use]
  pub const fn bytes_for(self, pixels: usize) -> usize {
    (pixels * self.bits() as usize + 7) / 8
  }

  /// Bytes of pixel data in a row, before padding.
  #[inline]
  pub fn row_bytes(self, width: u32) -> Result<u32, DecodeError> {
    let bits = width.checked_mul(self.bits()).ok_or(DecodeError::CheckedMath)?;
    Ok(bits / 8 + u32::from(bits % 8 != 0))
  }

  /// Bytes after the pixel data that bring a row to a multiple of 4.
  #[inline]
  pub fn padding_bytes(self, width: u32) -> Result<u32, DecodeError> {
    Ok((4 - self.row_bytes(width)? % 4) % 4)
  }

  /// Total bytes per stored row.
  #[inline]
  pub fn stride(self, width: u32) -> Result<u32, DecodeError> {
    self
      .row_bytes(width)?
      .checked_add(self.padding_bytes(width)?)
      .ok_or(DecodeError::CheckedMath)
  }
}

/// The one bounded buffer that decoded pixels pass through on their way to
/// the display.
///
/// It holds at most [`CHUNK_PIXELS`] pixels no matter how wide the picture
/// is, and gets cleared and refilled for every chunk of every row.
#[derive(Debug, Clone)]
pub struct RowBuffer {
  pixels: [Rgb565; CHUNK_PIXELS],
  len: usize,
}

impl Default for RowBuffer {
  #[inline]
  fn default() -> Self {
    Self::new()
  }
}

impl RowBuffer {
  #[inline]
  #[must_use]
  pub const fn new() -> Self {
    Self { pixels: [Rgb565::BLACK; CHUNK_PIXELS], len: 0 }
  }

  #[inline]
  pub fn clear(&mut self) {
    self.len = 0;
  }

  /// Appends a pixel. Returns `false` (and drops the pixel) when full.
  #[inline]
  pub fn push(&mut self, c: Rgb565) -> bool {
    match self.pixels.get_mut(self.len) {
      Some(slot) => {
        *slot = c;
        self.len += 1;
        true
      }
      None => false,
    }
  }

  #[inline]
  #[must_use]
  pub fn as_slice(&self) -> &[Rgb565] {
    &self.pixels[..self.len]
  }

  #[inline]
  #[must_use]
  pub const fn len(&self) -> usize {
    self.len
  }

  #[inline]
  #[must_use]
  pub const fn is_empty(&self) -> bool {
    self.len == 0
  }

  #[inline]
  #[must_use]
  pub const fn is_full(&self) -> bool {
    self.len == CHUNK_PIXELS
  }
}

/// Decodes stored rows of one picture into display pixels.
#[derive(Debug, Clone, Copy)]
pub struct PixelRowDecoder<'p> {
  depth: PixelDepth,
  width: u32,
  palette: Option<&'p Palette>,
}

impl<'p> PixelRowDecoder<'p> {
  /// A decoder for rows `width` pixels wide.
  ///
  /// Indexed depths need the picture's palette.
  pub fn new(
    depth: PixelDepth, width: u32, palette: Option<&'p Palette>,
  ) -> Result<Self, DecodeError> {
    if depth.is_indexed() && palette.is_none() {
      return Err(DecodeError::Unsupported);
    }
    Ok(Self { depth, width, palette })
  }

  #[inline]
  #[must_use]
  pub const fn depth(&self) -> PixelDepth {
    self.depth
  }

  #[inline]
  #[must_use]
  pub const fn width(&self) -> u32 {
    self.width
  }

  /// Decodes the leftmost `count` pixels of the row at the stream's position.
  ///
  /// The pixels come out in chunks of at most [`CHUNK_PIXELS`], each passed
  /// to `flush` along with its x offset within the row before the next chunk
  /// is read. Only the final chunk can be short.
  ///
  /// When `count` covers the full width, the row padding is read too, which
  /// leaves the stream at the start of the next stored row. When it doesn't
  /// (the row is clipped), the caller must seek before the next row.
  pub fn decode_row<R, E, F>(
    &self, stream: &mut ByteStream<R>, count: u32, buffer: &mut RowBuffer, mut flush: F,
  ) -> Result<(), BlitError<E>>
  where
    R: Read + Seek,
    F: FnMut(u32, &[Rgb565]) -> Result<(), E>,
  {
    let count = count.min(self.width);
    let mut raw = [0_u8; CHUNK_PIXELS * 4];
    let mut done: u32 = 0;
    while done < count {
      let n = (count - done).min(CHUNK_PIXELS as u32) as usize;
      let raw = &mut raw[..self.depth.bytes_for(n)];
      stream.read_into(raw)?;
      buffer.clear();
      self.convert(raw, n, buffer);
      flush(done, buffer.as_slice()).map_err(BlitError::Display)?;
      done += n as u32;
    }
    if count == self.width {
      stream.skip(self.depth.padding_bytes(self.width)?)?;
    }
    Ok(())
  }

  fn convert(&self, raw: &[u8], n: usize, buffer: &mut RowBuffer) {
    match self.depth {
      PixelDepth::Bgr24 => {
        for bgr in cast_slice::<u8, [u8; 3]>(raw) {
          buffer.push(bgr888_to_rgb565(*bgr));
        }
      }
      PixelDepth::Bgrx32 => {
        for [b, g, r, _x] in cast_slice::<u8, [u8; 4]>(raw) {
          buffer.push(bgr888_to_rgb565([*b, *g, *r]));
        }
      }
      PixelDepth::Rgb555 => {
        for le in cast_slice::<u8, [u8; 2]>(raw) {
          buffer.push(rgb555_to_rgb565(u16::from_le_bytes(*le)));
        }
      }
      PixelDepth::Indexed8 => {
        for i in raw {
          buffer.push(self.lookup(*i));
        }
      }
      PixelDepth::Indexed4 => {
        for (p, nibble) in raw.iter().flat_map(|b| [b >> 4, b & 0xF]).enumerate() {
          // an odd final chunk ends on the high nibble
          if p == n {
            break;
          }
          buffer.push(self.lookup(nibble));
        }
      }
    }
  }

  #[inline]
  fn lookup(&self, index: u8) -> Rgb565 {
    self.palette.map_or(Rgb565::BLACK, |p| p.get(index))
  }
}
