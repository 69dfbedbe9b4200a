use embedded_graphics::{
  pixelcolor::{Rgb565, RgbColor},
  prelude::Point,
};

use crate::DisplayOrigin;

/// The crate version, shown on the splash screen.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Pixels decoded per chunk. The one [`RowBuffer`](crate::RowBuffer) holds
/// this many, so this bounds the pixel memory of a whole draw.
///
/// Must stay even, so that every chunk of a 4bpp row starts on a byte.
pub const CHUNK_PIXELS: usize = 20;
const _: () = assert!(CHUNK_PIXELS % 2 == 0 && CHUNK_PIXELS > 0);

/// Most characters of theme text that are shown.
pub const THEME_BUDGET: usize = 22;

/// Pictures are `pic1.bmp` through `pic99.bmp` at most.
pub const MAX_PICTURE_INDEX: u8 = 99;

/// Optional one-line text file shown under every picture.
pub const THEME_FILE: &str = "theme.txt";

/// Settings for a [`Viewer`](crate::Viewer).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewerConfig {
  /// Time each picture (or failure message) stays up.
  pub delay_ms: u32,

  /// Time the splash screen stays up at startup.
  pub splash_ms: u32,

  /// Highest picture number in use, `1..=99`.
  pub max_index: u8,

  /// Picture shown over and over while the test switch is on.
  pub test_picture: u8,

  /// Where pictures are drawn.
  pub image_origin: DisplayOrigin,

  /// Top left of the status text.
  pub status_origin: Point,

  pub text_color: Rgb565,
  pub background: Rgb565,
}

impl Default for ViewerConfig {
  #[inline]
  fn default() -> Self {
    Self {
      delay_ms: 5000,
      splash_ms: 2000,
      max_index: MAX_PICTURE_INDEX,
      test_picture: 14,
      image_origin: DisplayOrigin::new(0, 0),
      // the bottom two text lines of a 128x160 panel
      status_origin: Point::new(0, 140),
      text_color: Rgb565::WHITE,
      background: Rgb565::BLACK,
    }
  }
}

impl ViewerConfig {
  /// `max_index` forced into `1..=99`.
  #[inline]
  #[must_use]
  pub fn clamped_max_index(&self) -> u8 {
    self.max_index.clamp(1, MAX_PICTURE_INDEX)
  }
}
