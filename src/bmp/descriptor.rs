use embedded_io::{Read, Seek};

use super::*;
use crate::{ByteStream, DecodeError};

/// The order that pixel rows are stored in the file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RowOrder {
  /// The first stored row is the bottom of the picture (positive height).
  BottomUp,
  /// The first stored row is the top of the picture (negative height).
  TopDown,
}

/// Everything about a BMP file needed to decode its pixels.
///
/// This is made once per opened file by [`parse`](Self::parse), and all byte
/// offsets into the pixel data are derived from it, never recomputed from
/// the raw header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BitmapDescriptor {
  file_size: u32,
  pixel_data_offset: u32,
  dib_header_size: u32,
  width: i32,
  height: i32,
  bits_per_pixel: u16,
  compression: u32,
  colors_used: u32,
}

impl BitmapDescriptor {
  /// Parses the headers at the start of the stream.
  ///
  /// The bit depth is **not** checked here, that's left to the row decoder.
  /// Afterwards the stream is left just past the info header, so it must be
  /// repositioned before reading pixels.
  ///
  /// ## Failure
  /// * [`DecodeError::BadMagic`] if the file doesn't start with `BM`.
  /// * [`DecodeError::Unsupported`] for any compression, an info header
  ///   shorter than 40 bytes, a plane count other than 1, a zero or negative
  ///   width, a zero height, or a pixel data offset inside the headers.
  /// * [`DecodeError::ReadFailure`] if the stream runs out.
  pub fn parse<R: Read + Seek>(stream: &mut ByteStream<R>) -> Result<Self, DecodeError> {
    stream.seek_to(0)?;
    let tag = stream.read_array::<2>()?;
    if tag != BMP_TAG {
      log::warn!("bad bitmap tag {:02X?}", tag);
      return Err(DecodeError::BadMagic);
    }
    let file_size = stream.read_u32_le()?;
    // two reserved u16 values
    stream.skip(4)?;
    let pixel_data_offset = stream.read_u32_le()?;

    let info: BitmapInfoHeader = stream.read_pod()?;
    let d = Self {
      file_size,
      pixel_data_offset,
      dib_header_size: info.size.get(),
      width: info.width.get(),
      height: info.height.get(),
      bits_per_pixel: info.bits_per_pixel.get(),
      compression: info.compression.get(),
      colors_used: info.colors_used.get(),
    };
    log::debug!("{d:?}");

    if d.dib_header_size < INFO_HEADER_LEN {
      log::warn!("info header of {} bytes isn't supported", d.dib_header_size);
      return Err(DecodeError::Unsupported);
    }
    if info.planes.get() != 1 {
      log::warn!("{} planes isn't supported", info.planes.get());
      return Err(DecodeError::Unsupported);
    }
    if d.compression != BI_RGB {
      log::warn!("compression {} isn't supported", d.compression);
      return Err(DecodeError::Unsupported);
    }
    if d.width <= 0 || d.height == 0 {
      log::warn!("illegal size {}x{}", d.width, d.height);
      return Err(DecodeError::Unsupported);
    }
    if d.pixel_data_offset < FILE_HEADER_LEN + INFO_HEADER_LEN {
      log::warn!("pixel data offset {} is inside the headers", d.pixel_data_offset);
      return Err(DecodeError::Unsupported);
    }
    Ok(d)
  }

  /// The total file size the header claims. Informational only.
  #[inline]
  #[must_use]
  pub const fn file_size(&self) -> u32 {
    self.file_size
  }

  #[inline]
  #[must_use]
  pub const fn pixel_data_offset(&self) -> u32 {
    self.pixel_data_offset
  }

  #[inline]
  #[must_use]
  pub const fn dib_header_size(&self) -> u32 {
    self.dib_header_size
  }

  /// Width as stored, always positive after a successful parse.
  #[inline]
  #[must_use]
  pub const fn width(&self) -> i32 {
    self.width
  }

  /// Height as stored. The sign gives the [`RowOrder`].
  #[inline]
  #[must_use]
  pub const fn height(&self) -> i32 {
    self.height
  }

  #[inline]
  #[must_use]
  pub const fn bits_per_pixel(&self) -> u16 {
    self.bits_per_pixel
  }

  #[inline]
  #[must_use]
  pub const fn compression(&self) -> u32 {
    self.compression
  }

  #[inline]
  #[must_use]
  pub const fn colors_used(&self) -> u32 {
    self.colors_used
  }

  #[inline]
  #[must_use]
  pub const fn width_px(&self) -> u32 {
    self.width.unsigned_abs()
  }

  #[inline]
  #[must_use]
  pub const fn height_px(&self) -> u32 {
    self.height.unsigned_abs()
  }

  #[inline]
  #[must_use]
  pub const fn row_order(&self) -> RowOrder {
    if self.height > 0 {
      RowOrder::BottomUp
    } else {
      RowOrder::TopDown
    }
  }

  /// The pixel depth, if the row decoder implements it.
  #[inline]
  pub fn depth(&self) -> Result<PixelDepth, DecodeError> {
    PixelDepth::try_from(self.bits_per_pixel)
  }

  /// Bytes per stored row, padding included.
  #[inline]
  pub fn stride(&self) -> Result<u32, DecodeError> {
    self.depth()?.stride(self.width_px())
  }

  /// Byte offset of a stored row. Row 0 is the first row in the file.
  #[inline]
  pub fn row_offset(&self, row_in_file: u32) -> Result<u32, DecodeError> {
    row_in_file
      .checked_mul(self.stride()?)
      .and_then(|n| n.checked_add(self.pixel_data_offset))
      .ok_or(DecodeError::CheckedMath)
  }

  /// Byte offset of the color table, which follows the info header.
  #[inline]
  pub fn palette_offset(&self) -> Result<u32, DecodeError> {
    FILE_HEADER_LEN.checked_add(self.dib_header_size).ok_or(DecodeError::CheckedMath)
  }

  /// Number of color table entries to read, capped at 256.
  #[inline]
  #[must_use]
  pub fn palette_len(&self) -> u32 {
    let full = match self.bits_per_pixel {
      1..=8 => 1_u32 << self.bits_per_pixel,
      _ => 0,
    };
    let len = if self.colors_used == 0 { full } else { self.colors_used };
    len.min(256)
  }
}
