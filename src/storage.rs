use core::fmt::Write;

use embedded_io::{ErrorKind, ErrorType, Read, Seek, SeekFrom};

/// The removable storage that the pictures live on.
///
/// Directory listing isn't needed: the viewer only ever asks for names that
/// it built itself with [`picture_name`], plus [`THEME_FILE`].
///
/// [`THEME_FILE`]: crate::THEME_FILE
pub trait Storage {
  /// An open file. Dropping it closes it.
  type File: Read + Seek;

  /// Opens a file by name, or `None` if there's no such file.
  fn open(&mut self, name: &str) -> Option<Self::File>;
}

impl<S: Storage + ?Sized> Storage for &mut S {
  type File = S::File;
  #[inline]
  fn open(&mut self, name: &str) -> Option<Self::File> {
    S::open(self, name)
  }
}

/// A short file name, stored inline.
pub type FileName = heapless::String<16>;

/// The name of picture `index`: `pic1.bmp` through `pic99.bmp`, no leading
/// zeros.
#[must_use]
pub fn picture_name(index: u8) -> FileName {
  let mut name = FileName::new();
  // "pic255.bmp" is the longest possible output, well under capacity.
  let _ = write!(name, "pic{index}.bmp");
  name
}

/// A file that's entirely in memory, such as a picture in flash or a test
/// fixture.
#[derive(Debug, Clone)]
pub struct SliceFile<'a> {
  bytes: &'a [u8],
  position: usize,
}

impl<'a> SliceFile<'a> {
  #[inline]
  #[must_use]
  pub const fn new(bytes: &'a [u8]) -> Self {
    Self { bytes, position: 0 }
  }

  #[inline]
  #[must_use]
  pub const fn len(&self) -> usize {
    self.bytes.len()
  }

  #[inline]
  #[must_use]
  pub const fn is_empty(&self) -> bool {
    self.bytes.is_empty()
  }
}

impl ErrorType for SliceFile<'_> {
  type Error = ErrorKind;
}

impl Read for SliceFile<'_> {
  fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error> {
    let rest = self.bytes.get(self.position..).unwrap_or(&[]);
    let n = rest.len().min(buf.len());
    buf[..n].copy_from_slice(&rest[..n]);
    self.position += n;
    Ok(n)
  }
}

impl Seek for SliceFile<'_> {
  fn seek(&mut self, pos: SeekFrom) -> Result<u64, Self::Error> {
    let target: i128 = match pos {
      SeekFrom::Start(n) => i128::from(n),
      SeekFrom::End(n) => self.bytes.len() as i128 + i128::from(n),
      SeekFrom::Current(n) => self.position as i128 + i128::from(n),
    };
    // Past the end is fine, reads there just come back empty.
    let target = usize::try_from(target).map_err(|_| ErrorKind::InvalidInput)?;
    self.position = target;
    Ok(target as u64)
  }
}
