#![no_std]
#![cfg_attr(docs_rs, feature(doc_cfg))]
#![forbid(unsafe_code)]

//! A picture viewer for small memory-mapped RGB565 displays.
//!
//! Pictures are uncompressed Windows Bitmap files named `pic1.bmp` through
//! `pic99.bmp` on some removable storage. They are never loaded whole: the
//! header is parsed straight off the byte stream, and each pixel row is
//! decoded [`CHUNK_PIXELS`] pixels at a time into a single reused
//! [`RowBuffer`] that is flushed to the display before the next chunk is
//! read. That keeps the working set of a full draw to a few hundred bytes,
//! regardless of the picture size.
//!
//! The pieces, leaf first:
//! * [`ByteStream`] does the little-endian reads over any
//!   [`embedded_io`] reader.
//! * [`BitmapDescriptor::parse`] validates the container and pulls out the
//!   geometry.
//! * [`PixelRowDecoder`] turns one stored row into display pixels.
//! * [`FrameBlitter`] walks all the rows in the right vertical order and
//!   clips them to the display.
//! * [`SequenceState`] picks which picture comes next.
//! * [`StatusOverlay`] writes the file name, theme, and outcome as text.
//! * [`Viewer`] ties all of that to the storage, display, switches, and
//!   delay of an actual board.

#[cfg(test)]
extern crate std;

pub mod bmp;
pub use bmp::*;

mod error;
pub use error::*;

mod stream;
pub use stream::*;

pub mod color;

mod blit;
pub use blit::*;

mod sequence;
pub use sequence::*;

mod overlay;
pub use overlay::*;

mod storage;
pub use storage::*;

mod input;
pub use input::*;

mod config;
pub use config::*;

mod viewer;
pub use viewer::*;

/// The display's native pixel type.
pub use embedded_graphics::pixelcolor::Rgb565;
