use bytemuck::cast_slice_mut;
use embedded_graphics::pixelcolor::{Rgb565, RgbColor};
use embedded_io::{Read, Seek};
use pixel_formats::r8g8b8a8_Srgb;

use crate::{color::srgb_to_rgb565, BitmapDescriptor, ByteStream, DecodeError};

/// The color table of an indexed picture, already converted to display
/// pixels.
#[derive(Debug, Clone)]
pub struct Palette {
  colors: [Rgb565; 256],
  len: u16,
}

impl Default for Palette {
  #[inline]
  fn default() -> Self {
    Self::new()
  }
}

impl Palette {
  #[inline]
  #[must_use]
  pub const fn new() -> Self {
    Self { colors: [Rgb565::BLACK; 256], len: 0 }
  }

  /// Reads the color table that follows the info header.
  ///
  /// Entries are stored as `[b, g, r, 0]`. Leaves the stream just past the
  /// table.
  pub fn load<R: Read + Seek>(
    stream: &mut ByteStream<R>, descriptor: &BitmapDescriptor,
  ) -> Result<Self, DecodeError> {
    stream.seek_to(descriptor.palette_offset()?)?;
    let mut palette = Self::new();
    let mut remaining = descriptor.palette_len() as usize;
    let mut entries = [[0_u8; 4]; 16];
    while remaining > 0 {
      let n = remaining.min(entries.len());
      stream.read_into(cast_slice_mut(&mut entries[..n]))?;
      for [b, g, r, _] in &entries[..n] {
        palette.push(srgb_to_rgb565(r8g8b8a8_Srgb { r: *r, g: *g, b: *b, a: 0xFF }));
      }
      remaining -= n;
    }
    log::trace!("loaded {} palette entries", palette.len());
    Ok(palette)
  }

  /// Appends an entry. Returns `false` once all 256 slots are used.
  #[inline]
  pub fn push(&mut self, c: Rgb565) -> bool {
    match self.colors.get_mut(usize::from(self.len)) {
      Some(slot) => {
        *slot = c;
        self.len += 1;
        true
      }
      None => false,
    }
  }

  /// The color at `index`. Indexes past the end of the table are black.
  #[inline]
  #[must_use]
  pub fn get(&self, index: u8) -> Rgb565 {
    self.as_slice().get(usize::from(index)).copied().unwrap_or(Rgb565::BLACK)
  }

  #[inline]
  #[must_use]
  pub fn as_slice(&self) -> &[Rgb565] {
    &self.colors[..usize::from(self.len)]
  }

  #[inline]
  #[must_use]
  pub const fn len(&self) -> usize {
    self.len as usize
  }

  #[inline]
  #[must_use]
  pub const fn is_empty(&self) -> bool {
    self.len == 0
  }
}
