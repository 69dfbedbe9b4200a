#![forbid(unsafe_code)]

//! Module for Windows Bitmap files (BMP), as far as the viewer reads them.
//!
//! ## Parsing The Format
//!
//! Note: All multi-byte values in BMP are always little-endian encoded.
//!
//! * A bitmap file always starts with a "file header". This is always 14 bytes.
//!   * A tag for the kind of bitmap. We only accept `BM`.
//!   * A total size of the file. We keep it for logging, but a picture is
//!     streamed off storage and we never check it against the real length.
//!   * The position of the pixel data within the file, at offset 10.
//! * Next is an "info header" (the DIB header). There's many versions of this
//!   header, and the first 4 bytes are always the size of the full header.
//!   Every version from the 40 byte `BITMAPINFOHEADER` onward starts with the
//!   same fields, so we read just those 40 bytes and reject anything smaller.
//!   The fields we care about are the width, the height, the bits per pixel,
//!   and the compression, which must be "none".
//! * Next there **might** be a color table. This is mandatory if the bit depth
//!   is 8 (or less) bits per pixel. Each entry is `[b, g, r, 0]`, and the
//!   number of entries is `colors_used`, or `2**bits_per_pixel` when that's 0.
//! * Next there is the pixel array, at the offset given in the file header.
//!   Each row is padded to a multiple of 4 bytes.
//!
//! A positive height means the rows are stored bottom-up (the first row in
//! the file is the bottom row of the picture). A negative height means the
//! rows are stored top-down.
//!
//! When the bits per pixel is less than 8 the pixels are packed within a
//! byte, and the leftmost pixel is the highest bits of the byte.
//! * 4 and 8 bits per pixel are indexed color.
//! * 16 bits per pixel is direct color, `x1r5g5b5` within a little-endian
//!   `u16` when uncompressed.
//! * 24 bits per pixel is direct color as `[b, g, r]`.
//! * 32 bits per pixel is direct color as `[b, g, r, x]` when uncompressed.

mod raw_headers;
pub(crate) use raw_headers::*;

mod descriptor;
pub use descriptor::*;

mod row;
pub use row::*;

mod palette;
pub use palette::*;
