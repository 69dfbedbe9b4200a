use core::convert::Infallible;

use embedded_graphics::{pixelcolor::Rgb565, prelude::DrawTarget, prelude::Size};
use embedded_hal::delay::DelayNs;
use rand::Rng;

use crate::{
  picture_name, BitmapDescriptor, BlitError, ByteStream, DecodeError, FileName, FrameBlitter,
  SequenceState, Status, StatusOverlay, Storage, Switches, Theme, ViewerConfig,
};

/// What one trip around the viewer loop did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CycleReport {
  /// The picture number that was picked.
  pub index: u8,
  pub name: FileName,
  /// If the test switch was on, in which case the sequence didn't advance.
  pub test_mode: bool,
  /// The picture's size, or why it couldn't be shown.
  pub outcome: Result<Size, DecodeError>,
}

/// The control loop of the picture viewer.
///
/// The viewer exclusively owns everything it touches for its whole life:
/// * `S`: the [`Storage`] holding the pictures and theme file.
/// * `D`: the display.
/// * `I`: the board [`Switches`].
/// * `T`: a delay source.
/// * `G`: the random source used in [`Mode::Random`](crate::Mode::Random).
///
/// The sequencing mode is read from the switches once, in [`new`](Self::new).
/// The test switch is read at the start of every [`cycle`](Self::cycle).
#[derive(Debug)]
pub struct Viewer<S, D, I, T, G> {
  storage: S,
  display: D,
  switches: I,
  delay: T,
  rng: G,
  config: ViewerConfig,
  state: SequenceState,
  theme: Theme,
  blitter: FrameBlitter,
  overlay: StatusOverlay,
}

impl<S, D, I, T, G> Viewer<S, D, I, T, G>
where
  S: Storage,
  D: DrawTarget<Color = Rgb565>,
  I: Switches,
  T: DelayNs,
  G: Rng,
{
  pub fn new(
    storage: S, display: D, mut switches: I, delay: T, rng: G, config: ViewerConfig,
  ) -> Self {
    let mode = switches.mode();
    let state = SequenceState::new(mode, config.clamped_max_index());
    let overlay = StatusOverlay::new(config.status_origin, config.text_color, config.background);
    Self {
      storage,
      display,
      switches,
      delay,
      rng,
      config,
      state,
      theme: Theme::default(),
      blitter: FrameBlitter::new(),
      overlay,
    }
  }

  /// Reads the theme file and holds the splash screen up for
  /// `config.splash_ms`.
  pub fn start(&mut self) -> Result<(), D::Error> {
    self.theme = Theme::load(&mut self.storage);
    let test_mode = self.switches.test_mode();
    log::info!(
      "starting: {:?} mode, {} pictures, test switch {}",
      self.state.mode(),
      self.state.max_index(),
      if test_mode { "on" } else { "off" }
    );
    self.overlay.draw_splash(&mut self.display, self.state.mode(), test_mode)?;
    self.delay.delay_ms(self.config.splash_ms);
    Ok(())
  }

  /// Picks a picture, shows it with its status text, then waits
  /// `config.delay_ms`.
  ///
  /// A picture that can't be found or decoded is reported in the status text
  /// and in the returned [`CycleReport`], and it still uses up its turn in
  /// the sequence. Only a failing display stops the cycle early.
  pub fn cycle(&mut self) -> Result<CycleReport, D::Error> {
    let test_mode = self.switches.test_mode();
    let index = if test_mode {
      self.config.test_picture
    } else {
      let (index, state) = self.state.next(&mut self.rng);
      self.state = state;
      index
    };
    let name = picture_name(index);

    self.display.clear(self.config.background)?;
    let outcome = match self.show(&name) {
      Ok(size) => Ok(size),
      Err(BlitError::Decode(e)) => Err(e),
      Err(BlitError::Display(e)) => return Err(e),
    };
    match outcome {
      Ok(size) => log::info!("{name}: {}x{}", size.width, size.height),
      Err(e) => log::warn!("{name}: {e}"),
    }

    self.overlay.draw(&mut self.display, &name, &self.theme, Status::from(outcome))?;
    self.delay.delay_ms(self.config.delay_ms);
    Ok(CycleReport { index, name, test_mode, outcome })
  }

  /// [`start`](Self::start), then [`cycle`](Self::cycle) forever.
  pub fn run(&mut self) -> Result<Infallible, D::Error> {
    self.start()?;
    loop {
      self.cycle()?;
    }
  }

  fn show(&mut self, name: &str) -> Result<Size, BlitError<D::Error>> {
    let file = self.storage.open(name).ok_or(DecodeError::FileNotFound)?;
    let mut stream = ByteStream::new(file);
    let descriptor = BitmapDescriptor::parse(&mut stream)?;
    let report =
      self.blitter.blit(&mut stream, &descriptor, self.config.image_origin, &mut self.display)?;
    log::debug!("{name}: drew {} of {} rows", report.rows, descriptor.height_px());
    Ok(Size::new(descriptor.width_px(), descriptor.height_px()))
  }

  #[inline]
  #[must_use]
  pub const fn state(&self) -> &SequenceState {
    &self.state
  }

  #[inline]
  #[must_use]
  pub const fn theme(&self) -> &Theme {
    &self.theme
  }

  #[inline]
  #[must_use]
  pub const fn config(&self) -> &ViewerConfig {
    &self.config
  }

  #[inline]
  #[must_use]
  pub const fn display(&self) -> &D {
    &self.display
  }

  /// Gives back the storage, display, switches, and delay.
  #[inline]
  pub fn release(self) -> (S, D, I, T) {
    (self.storage, self.display, self.switches, self.delay)
  }
}
