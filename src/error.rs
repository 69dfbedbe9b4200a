use core::{fmt, num::TryFromIntError};

use embedded_io::ReadExactError;

/// Everything that can go wrong between opening a picture and the last row
/// reaching the display.
///
/// None of these are fatal to the viewer: the control loop shows a status
/// line for the failed picture and moves on to the next one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[non_exhaustive]
pub enum DecodeError {
  /// The file doesn't start with `BM`.
  BadMagic,

  /// Compressed pixel data, or a header with values this decoder won't
  /// handle (small DIB header, multiple planes, zero size, negative width).
  Unsupported,

  /// A bit depth that the row decoder doesn't implement.
  UnsupportedDepth,

  /// Storage couldn't open the requested name.
  FileNotFound,

  /// A short read or an I/O fault somewhere in the stream.
  ReadFailure,

  /// Header geometry that overflows the byte arithmetic.
  CheckedMath,
}

impl DecodeError {
  /// If this is the "missing file" case rather than an "unreadable file"
  /// case.
  #[inline]
  #[must_use]
  pub const fn is_not_found(self) -> bool {
    matches!(self, Self::FileNotFound)
  }
}

impl fmt::Display for DecodeError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(match self {
      Self::BadMagic => "not a bitmap file",
      Self::Unsupported | Self::CheckedMath => "unsupported bitmap",
      Self::UnsupportedDepth => "unsupported bit depth",
      Self::FileNotFound => "file not found",
      Self::ReadFailure => "read failure",
    })
  }
}

impl core::error::Error for DecodeError {}

impl<E: fmt::Debug> From<ReadExactError<E>> for DecodeError {
  #[inline]
  fn from(e: ReadExactError<E>) -> Self {
    match e {
      ReadExactError::UnexpectedEof => log::debug!("unexpected end of file"),
      ReadExactError::Other(e) => log::debug!("read fault: {e:?}"),
    }
    Self::ReadFailure
  }
}

impl From<TryFromIntError> for DecodeError {
  #[inline]
  fn from(_: TryFromIntError) -> Self {
    Self::CheckedMath
  }
}
