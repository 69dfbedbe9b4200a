use core::{fmt, ops::Range};

use embedded_graphics::{
  pixelcolor::Rgb565,
  prelude::{DrawTarget, Point, Size},
  primitives::Rectangle,
};
use embedded_io::{Read, Seek};

use crate::{
  BitmapDescriptor, ByteStream, DecodeError, Palette, PixelRowDecoder, RowBuffer, RowOrder,
};

/// Top left display coordinate that a picture is drawn at.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct DisplayOrigin {
  pub x: u16,
  pub y: u16,
}

impl DisplayOrigin {
  #[inline]
  #[must_use]
  pub const fn new(x: u16, y: u16) -> Self {
    Self { x, y }
  }
}

impl From<DisplayOrigin> for Point {
  #[inline]
  fn from(o: DisplayOrigin) -> Self {
    Point::new(i32::from(o.x), i32::from(o.y))
  }
}

/// A draw that stopped early.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlitError<E> {
  /// The picture couldn't be decoded.
  Decode(DecodeError),
  /// The display itself failed.
  Display(E),
}

impl<E> From<DecodeError> for BlitError<E> {
  #[inline]
  fn from(e: DecodeError) -> Self {
    Self::Decode(e)
  }
}

impl<E: fmt::Debug> fmt::Display for BlitError<E> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::Decode(e) => fmt::Display::fmt(e, f),
      Self::Display(e) => write!(f, "display error: {e:?}"),
    }
  }
}

impl<E: fmt::Debug> core::error::Error for BlitError<E> {}

/// What part of a picture actually landed on the display.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct BlitReport {
  /// Rows drawn, after clipping.
  pub rows: u32,
  /// Pixels drawn per row, after clipping.
  pub columns: u32,
}

impl BlitReport {
  #[inline]
  #[must_use]
  pub const fn pixels(&self) -> u32 {
    self.rows * self.columns
  }
}

/// Draws pictures row by row through its single [`RowBuffer`].
#[derive(Debug, Clone, Default)]
pub struct FrameBlitter {
  buffer: RowBuffer,
}

impl FrameBlitter {
  #[inline]
  #[must_use]
  pub const fn new() -> Self {
    Self { buffer: RowBuffer::new() }
  }

  /// Draws the picture described by `descriptor` with its top left corner at
  /// `origin`.
  ///
  /// Stored rows are read in file order. For a bottom-up picture (positive
  /// height) the first stored row goes to display row
  /// `origin.y + height - 1` and the rows go upward from there, for a
  /// top-down picture the first stored row goes to `origin.y` and the rows
  /// go downward.
  ///
  /// Anything past the right or bottom edge of the display is silently left
  /// out. An unsupported depth is detected before any pixel is drawn, but a
  /// read failure partway through leaves the rows drawn so far in place.
  pub fn blit<R, D>(
    &mut self, stream: &mut ByteStream<R>, descriptor: &BitmapDescriptor, origin: DisplayOrigin,
    target: &mut D,
  ) -> Result<BlitReport, BlitError<D::Error>>
  where
    R: Read + Seek,
    D: DrawTarget<Color = Rgb565>,
  {
    let depth = descriptor.depth()?;
    let width = descriptor.width_px();
    let height = descriptor.height_px();
    // fail on impossible geometry before drawing anything
    descriptor.row_offset(height - 1)?;

    let palette: Palette;
    let decoder = if depth.is_indexed() {
      palette = Palette::load(stream, descriptor)?;
      PixelRowDecoder::new(depth, width, Some(&palette))?
    } else {
      PixelRowDecoder::new(depth, width, None)?
    };

    let area = target.bounding_box();
    let origin = Point::from(origin);
    let Some(bottom_right) = area.bottom_right() else {
      return Ok(BlitReport::default());
    };
    let columns = visible_span(origin.x, width, area.top_left.x, bottom_right.x);
    if columns == 0 {
      return Ok(BlitReport::default());
    }

    let order = descriptor.row_order();
    let rows = visible_rows(order, origin.y, height, area.top_left.y, bottom_right.y);
    let mut report = BlitReport { rows: 0, columns };
    for row_in_file in rows {
      // within the display area, so it fits
      let y = display_row(order, origin.y, height, row_in_file) as i32;
      stream.seek_to(descriptor.row_offset(row_in_file)?)?;
      decoder.decode_row(stream, columns, &mut self.buffer, |x, pixels| {
        let run = Rectangle::new(
          Point::new(origin.x + x as i32, y),
          Size::new(pixels.len() as u32, 1),
        );
        target.fill_contiguous(&run, pixels.iter().copied())
      })?;
      report.rows += 1;
      log::trace!("row {row_in_file} -> y {y}");
    }
    Ok(report)
  }
}

/// The display row that a stored row belongs on.
fn display_row(order: RowOrder, origin_y: i32, height: u32, row_in_file: u32) -> i64 {
  match order {
    RowOrder::BottomUp => {
      i64::from(origin_y) + i64::from(height) - 1 - i64::from(row_in_file)
    }
    RowOrder::TopDown => i64::from(origin_y) + i64::from(row_in_file),
  }
}

/// The stored rows that land within display rows `top..=bottom`, in file
/// order.
fn visible_rows(order: RowOrder, origin_y: i32, height: u32, top: i32, bottom: i32) -> Range<u32> {
  let (oy, h) = (i64::from(origin_y), i64::from(height));
  let (top, bottom) = (i64::from(top), i64::from(bottom));
  let (lo, hi) = match order {
    RowOrder::BottomUp => (oy + h - 1 - bottom, oy + h - 1 - top),
    RowOrder::TopDown => (top - oy, bottom - oy),
  };
  let first = lo.max(0);
  let end = hi.saturating_add(1).min(h);
  if first >= end {
    0..0
  } else {
    first as u32..end as u32
  }
}

/// How many of `len` pixels starting at `start` fall within `min..=max`.
///
/// The picture is only ever cut on its far side: if it starts before `min`
/// nothing of it is drawn.
fn visible_span(start: i32, len: u32, min: i32, max: i32) -> u32 {
  if start < min || start > max {
    return 0;
  }
  len.min((max - start) as u32 + 1)
}
