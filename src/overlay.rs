use core::fmt::Write;

use embedded_graphics::{
  mono_font::{ascii::FONT_6X10, MonoTextStyle, MonoTextStyleBuilder},
  pixelcolor::Rgb565,
  prelude::{DrawTarget, DrawTargetExt, Point, Size},
  text::{Baseline, Text},
  Drawable,
};
use embedded_io::Read;

use crate::{DecodeError, Mode, Storage, THEME_BUDGET, THEME_FILE, VERSION};

/// A short line of text shown with every picture.
///
/// At most [`THEME_BUDGET`] characters. The font only has ASCII, so anything
/// else shows as `?`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Theme(heapless::String<THEME_BUDGET>);

impl Theme {
  /// The first line of `text`, with trailing whitespace removed, cut to
  /// [`THEME_BUDGET`] characters.
  #[must_use]
  pub fn from_text(text: &str) -> Self {
    let line = text.lines().next().unwrap_or("").trim_end();
    let mut s = heapless::String::new();
    for ch in line.chars().take(THEME_BUDGET) {
      let ch = if ch.is_ascii() { ch } else { '?' };
      // one byte per char, and no more chars than bytes of capacity
      let _ = s.push(ch);
    }
    Self(s)
  }

  /// Reads [`THEME_FILE`]. A missing or unreadable file is an empty theme.
  pub fn load<S: Storage>(storage: &mut S) -> Self {
    let Some(mut file) = storage.open(THEME_FILE) else {
      log::info!("no {THEME_FILE}");
      return Self::default();
    };
    // enough for the budget even if every character takes 4 bytes
    let mut buf = [0_u8; THEME_BUDGET * 4];
    let mut len = 0;
    while len < buf.len() {
      match file.read(&mut buf[len..]) {
        Ok(0) => break,
        Ok(n) => len += n,
        Err(e) => {
          log::warn!("reading {THEME_FILE} failed: {e:?}");
          break;
        }
      }
    }
    // a read cut off mid-character keeps everything before it
    let text = match core::str::from_utf8(&buf[..len]) {
      Ok(text) => text,
      Err(e) => core::str::from_utf8(&buf[..e.valid_up_to()]).unwrap_or(""),
    };
    let theme = Self::from_text(text);
    log::info!("theme {:?}", theme.as_str());
    theme
  }

  #[inline]
  #[must_use]
  pub fn as_str(&self) -> &str {
    self.0.as_str()
  }

  #[inline]
  #[must_use]
  pub fn is_empty(&self) -> bool {
    self.0.is_empty()
  }
}

/// How showing a picture went, as far as the viewer's status line cares.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Status {
  Shown { width: u32, height: u32 },
  NotFound,
  Unreadable,
}

impl From<Result<Size, DecodeError>> for Status {
  #[inline]
  fn from(outcome: Result<Size, DecodeError>) -> Self {
    match outcome {
      Ok(size) => Self::Shown { width: size.width, height: size.height },
      Err(e) if e.is_not_found() => Self::NotFound,
      Err(_) => Self::Unreadable,
    }
  }
}

/// Plain text status lines: file name and outcome, then the theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusOverlay {
  pub origin: Point,
  pub text_color: Rgb565,
  pub background: Rgb565,
}

impl StatusOverlay {
  #[inline]
  #[must_use]
  pub const fn new(origin: Point, text_color: Rgb565, background: Rgb565) -> Self {
    Self { origin, text_color, background }
  }

  fn style(&self) -> MonoTextStyle<'static, Rgb565> {
    MonoTextStyleBuilder::new()
      .font(&FONT_6X10)
      .text_color(self.text_color)
      .background_color(self.background)
      .build()
  }

  fn line_height() -> i32 {
    FONT_6X10.character_size.height as i32
  }

  /// Draws the status lines. Text that runs off the display is cut.
  pub fn draw<D>(&self, target: &mut D, name: &str, theme: &Theme, status: Status) -> Result<(), D::Error>
  where
    D: DrawTarget<Color = Rgb565>,
  {
    let area = target.bounding_box();
    let mut target = target.clipped(&area);
    let style = self.style();

    let mut line: heapless::String<40> = heapless::String::new();
    // a u8 file name plus two u32 numbers always fits
    let _ = match status {
      Status::Shown { width, height } => write!(line, "{name} {width}x{height}"),
      Status::NotFound => write!(line, "{name} not found"),
      Status::Unreadable => write!(line, "{name} unreadable"),
    };
    Text::with_baseline(&line, self.origin, style, Baseline::Top).draw(&mut target)?;
    if !theme.is_empty() {
      let at = self.origin + Point::new(0, Self::line_height());
      Text::with_baseline(theme.as_str(), at, style, Baseline::Top).draw(&mut target)?;
    }
    Ok(())
  }

  /// The startup screen: title, version, and the selected mode.
  pub fn draw_splash<D>(&self, target: &mut D, mode: Mode, test_mode: bool) -> Result<(), D::Error>
  where
    D: DrawTarget<Color = Rgb565>,
  {
    let area = target.bounding_box();
    target.clear(self.background)?;
    let mut target = target.clipped(&area);
    let style = self.style();

    let mut version: heapless::String<24> = heapless::String::new();
    let _ = write!(version, "v{VERSION}");
    let mode = match (test_mode, mode) {
      (true, _) => "Test",
      (false, Mode::Random) => "Random",
      (false, Mode::Sequential) => "Sequential",
    };
    let mut at = area.top_left + Point::new(4, 4);
    for text in ["Picture Viewer", version.as_str(), mode] {
      Text::with_baseline(text, at, style, Baseline::Top).draw(&mut target)?;
      at.y += Self::line_height() + 2;
    }
    Ok(())
  }
}
