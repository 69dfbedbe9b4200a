use rand::Rng;

use crate::MAX_PICTURE_INDEX;

/// How the next picture is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mode {
  /// `1, 2, ..., max, 1, 2, ...`
  Sequential,
  /// Uniform picks that avoid showing the same picture twice in a row.
  Random,
}

/// Whether anything has been picked yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
  Idle,
  Picked,
}

/// Which picture was shown last, and how to pick the next.
///
/// This is a plain value: [`next`](Self::next) hands back the successor
/// state rather than mutating anything shared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SequenceState {
  last_shown: u8,
  mode: Mode,
  max_index: u8,
}

impl SequenceState {
  /// A fresh state. `max_index` is forced into `1..=99`.
  #[must_use]
  pub fn new(mode: Mode, max_index: u8) -> Self {
    let clamped = max_index.clamp(1, MAX_PICTURE_INDEX);
    if clamped != max_index {
      log::warn!("max index {max_index} clamped to {clamped}");
    }
    Self { last_shown: 0, mode, max_index: clamped }
  }

  /// The last index picked, or 0 before the first pick.
  #[inline]
  #[must_use]
  pub const fn last_shown(&self) -> u8 {
    self.last_shown
  }

  #[inline]
  #[must_use]
  pub const fn mode(&self) -> Mode {
    self.mode
  }

  #[inline]
  #[must_use]
  pub const fn max_index(&self) -> u8 {
    self.max_index
  }

  #[inline]
  #[must_use]
  pub const fn phase(&self) -> Phase {
    if self.last_shown == 0 {
      Phase::Idle
    } else {
      Phase::Picked
    }
  }

  /// Picks the next index in `1..=max_index`, and the state that records it.
  ///
  /// * Sequential: `last % max + 1`, which starts at 1 and wraps from `max`
  ///   back to 1.
  /// * Random: a uniform draw. If that repeats the last index (and there's
  ///   more than one picture) there is exactly one redraw, taken from the
  ///   other `max - 1` indexes so it can't repeat again. The rng is only
  ///   used in this mode.
  #[must_use]
  pub fn next<G: Rng>(self, rng: &mut G) -> (u8, Self) {
    let index = match self.mode {
      Mode::Sequential => self.last_shown % self.max_index + 1,
      Mode::Random => {
        let first = rng.random_range(1..=self.max_index);
        if first == self.last_shown && self.max_index > 1 {
          let other = rng.random_range(1..self.max_index);
          if other >= self.last_shown {
            other + 1
          } else {
            other
          }
        } else {
          first
        }
      }
    };
    (index, Self { last_shown: index, ..self })
  }
}
