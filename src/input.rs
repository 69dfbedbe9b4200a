use embedded_hal::digital::InputPin;

use crate::Mode;

/// The two switches on the board, sampled between pictures.
pub trait Switches {
  /// If the test switch is on: show the test picture over and over.
  fn test_mode(&mut self) -> bool;

  /// The sequencing mode switch.
  fn mode(&mut self) -> Mode;
}

impl<S: Switches + ?Sized> Switches for &mut S {
  #[inline]
  fn test_mode(&mut self) -> bool {
    (**self).test_mode()
  }
  #[inline]
  fn mode(&mut self) -> Mode {
    (**self).mode()
  }
}

/// Switches wired to two input pins with pull-ups, so a closed switch reads
/// low.
///
/// Closing the mode switch selects [`Mode::Sequential`]. A pin that can't be
/// read counts as an open switch.
#[derive(Debug)]
pub struct PinSwitches<T, M> {
  test: T,
  mode: M,
}

impl<T: InputPin, M: InputPin> PinSwitches<T, M> {
  #[inline]
  pub const fn new(test: T, mode: M) -> Self {
    Self { test, mode }
  }

  #[inline]
  pub fn release(self) -> (T, M) {
    (self.test, self.mode)
  }
}

fn is_closed<P: InputPin>(pin: &mut P, what: &str) -> bool {
  match pin.is_low() {
    Ok(low) => low,
    Err(e) => {
      log::warn!("couldn't read the {what} switch: {e:?}");
      false
    }
  }
}

impl<T: InputPin, M: InputPin> Switches for PinSwitches<T, M> {
  fn test_mode(&mut self) -> bool {
    is_closed(&mut self.test, "test")
  }

  fn mode(&mut self) -> Mode {
    if is_closed(&mut self.mode, "mode") {
      Mode::Sequential
    } else {
      Mode::Random
    }
  }
}

/// Switches that never move, for hosts without any.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedSwitches {
  pub test_mode: bool,
  pub mode: Mode,
}

impl Switches for FixedSwitches {
  #[inline]
  fn test_mode(&mut self) -> bool {
    self.test_mode
  }
  #[inline]
  fn mode(&mut self) -> Mode {
    self.mode
  }
}
