#![allow(dead_code)]

//! The on-disk info header, and the few BMP constants we check against.
//!
//! Every field is a `pack1` type, so the struct has an alignment of 1 and
//! can be read straight off the stream with no padding in between.

use pack1::*;

pub(crate) const BI_RGB: u32 = 0;

pub(crate) const BMP_TAG: [u8; 2] = *b"BM";

/// The 40 byte `BITMAPINFOHEADER`, which is also the prefix of the V2 through
/// V5 headers.
#[derive(Debug, Clone, Copy, bytemuck::Zeroable, bytemuck::Pod)]
#[repr(C)]
pub(crate) struct BitmapInfoHeader {
  pub size: U32LE,
  pub width: I32LE,
  /// When height is positive the bitmap is bottom up, when negative it's top
  /// down.
  pub height: I32LE,
  pub planes: U16LE,
  pub bits_per_pixel: U16LE,
  pub compression: U32LE,
  pub image_size: U32LE,
  pub pixels_per_meter_x: I32LE,
  pub pixels_per_meter_y: I32LE,
  pub colors_used: U32LE,
  pub important_colors: U32LE,
}

/// The file header is read field by field, so that a wrong tag is reported
/// even for files too short to hold a whole header.
pub(crate) const FILE_HEADER_LEN: u32 = 14;
pub(crate) const INFO_HEADER_LEN: u32 = core::mem::size_of::<BitmapInfoHeader>() as u32;

const _: () = assert!(INFO_HEADER_LEN == 40);
