//! Conversions from the BMP pixel encodings into the display's RGB565.
//!
//! RGB565 packs a pixel into a `u16` as `rrrrrggg_gggbbbbb`. Going down in
//! depth simply keeps the top bits of each channel. Going up in depth (the
//! 5-bit channels of RGB555) replicates the bit pattern downward first so
//! that full intensity stays full intensity.

use bitfrob::u8_replicate_bits;
use embedded_graphics::pixelcolor::{raw::RawU16, Rgb565};
use pixel_formats::r8g8b8a8_Srgb;

/// Packs 8-bit channels into the raw RGB565 bit pattern.
#[inline]
#[must_use]
pub const fn pack_rgb565(r: u8, g: u8, b: u8) -> u16 {
  ((r as u16 & 0xF8) << 8) | ((g as u16 & 0xFC) << 3) | (b as u16 >> 3)
}

/// One 24bpp BMP pixel, which is stored as `[b, g, r]`.
#[inline]
#[must_use]
pub fn bgr888_to_rgb565([b, g, r]: [u8; 3]) -> Rgb565 {
  Rgb565::from(RawU16::new(pack_rgb565(r, g, b)))
}

/// One 16bpp BMP pixel with the default (no bitfields) `x1r5g5b5` masks.
#[inline]
#[must_use]
pub fn rgb555_to_rgb565(v: u16) -> Rgb565 {
  let r5 = ((v >> 10) & 0b11111) as u8;
  let g5 = ((v >> 5) & 0b11111) as u8;
  let b5 = (v & 0b11111) as u8;
  Rgb565::from(RawU16::new(pack_rgb565(
    u8_replicate_bits(5, r5),
    u8_replicate_bits(5, g5),
    u8_replicate_bits(5, b5),
  )))
}

/// A palette entry. Alpha is ignored, the display is opaque.
#[inline]
#[must_use]
pub fn srgb_to_rgb565(c: r8g8b8a8_Srgb) -> Rgb565 {
  Rgb565::from(RawU16::new(pack_rgb565(c.r, c.g, c.b)))
}
