use embedded_graphics::{
  mock_display::MockDisplay,
  pixelcolor::{Rgb565, RgbColor},
  prelude::{Point, Size},
};
use embedded_hal::delay::DelayNs;
use picview::{DecodeError, FixedSwitches, Mode, Phase, Viewer, ViewerConfig};
use rand::{rngs::SmallRng, SeedableRng};

use super::*;

/// Remembers every wait instead of waiting.
#[derive(Debug, Default)]
struct Delays {
  ms: Vec<u32>,
}

impl DelayNs for Delays {
  fn delay_ns(&mut self, _ns: u32) {}
  fn delay_ms(&mut self, ms: u32) {
    self.ms.push(ms);
  }
}

fn config(max_index: u8) -> ViewerConfig {
  ViewerConfig { max_index, status_origin: Point::new(0, 50), ..ViewerConfig::default() }
}

fn display() -> MockDisplay<Rgb565> {
  let mut display = MockDisplay::new();
  // every cycle clears the screen before drawing over it
  display.set_allow_overdraw(true);
  display
}

fn viewer(
  storage: &MemStorage, switches: FixedSwitches, config: ViewerConfig,
) -> Viewer<&MemStorage, MockDisplay<Rgb565>, FixedSwitches, Delays, SmallRng> {
  Viewer::new(storage, display(), switches, Delays::default(), SmallRng::seed_from_u64(99), config)
}

const SEQUENTIAL: FixedSwitches = FixedSwitches { test_mode: false, mode: Mode::Sequential };

#[test]
fn test_viewer_sequential_wraps_around() {
  let storage = MemStorage::default()
    .with("pic1.bmp", solid24(4, 4, [255, 0, 0]))
    .with("pic2.bmp", solid24(5, 3, [0, 255, 0]))
    .with("pic3.bmp", solid24(2, 6, [0, 0, 255]));
  let mut v = viewer(&storage, SEQUENTIAL, config(3));
  let mut names = Vec::new();
  for _ in 0..4 {
    let report = v.cycle().unwrap();
    assert!(!report.test_mode);
    names.push(report.name.to_string());
  }
  assert_eq!(names, ["pic1.bmp", "pic2.bmp", "pic3.bmp", "pic1.bmp"]);
  assert_eq!(v.state().last_shown(), 1);
  assert_eq!(v.display().get_pixel(Point::new(3, 3)), Some(Rgb565::RED));
}

#[test]
fn test_viewer_reports_sizes() {
  let storage = MemStorage::default().with("pic1.bmp", solid24(5, 3, [0, 255, 0]));
  let mut v = viewer(&storage, SEQUENTIAL, config(1));
  let report = v.cycle().unwrap();
  assert_eq!(report.index, 1);
  assert_eq!(report.outcome, Ok(Size::new(5, 3)));
  assert_eq!(v.display().get_pixel(Point::new(4, 2)), Some(Rgb565::GREEN));
  assert_eq!(v.display().get_pixel(Point::new(5, 2)), Some(Rgb565::BLACK));
}

#[test]
fn test_viewer_missing_file_still_advances() {
  let storage = MemStorage::default().with("pic1.bmp", solid24(4, 4, [255, 0, 0]));
  let mut v = viewer(&storage, SEQUENTIAL, config(2));

  let report = v.cycle().unwrap();
  assert_eq!(report.outcome, Ok(Size::new(4, 4)));
  assert_eq!(v.display().get_pixel(Point::new(0, 0)), Some(Rgb565::RED));

  let report = v.cycle().unwrap();
  assert_eq!(report.name.as_str(), "pic2.bmp");
  assert_eq!(report.outcome, Err(DecodeError::FileNotFound));
  assert_eq!(v.state().last_shown(), 2);
  // the old picture is gone, and nothing new was drawn in its place
  assert_eq!(v.display().get_pixel(Point::new(0, 0)), Some(Rgb565::BLACK));
  assert_eq!(v.display().get_pixel(Point::new(3, 3)), Some(Rgb565::BLACK));

  assert_eq!(v.cycle().unwrap().index, 1);
}

#[test]
fn test_viewer_unreadable_file_still_advances() {
  let mut junk = solid24(4, 4, [255, 0, 0]);
  junk[0..2].copy_from_slice(b"XX");
  let storage = MemStorage::default().with("pic1.bmp", junk);
  let mut v = viewer(&storage, SEQUENTIAL, config(2));
  let report = v.cycle().unwrap();
  assert_eq!(report.outcome, Err(DecodeError::BadMagic));
  assert_eq!(v.state().last_shown(), 1);
  assert_eq!(v.display().get_pixel(Point::new(0, 0)), Some(Rgb565::BLACK));
}

#[test]
fn test_viewer_test_mode_repeats_without_advancing() {
  let storage = MemStorage::default().with("pic14.bmp", solid24(2, 2, [0, 0, 255]));
  let switches = FixedSwitches { test_mode: true, mode: Mode::Sequential };
  let mut v = viewer(&storage, switches, config(99));
  for _ in 0..3 {
    let report = v.cycle().unwrap();
    assert!(report.test_mode);
    assert_eq!(report.index, 14);
    assert_eq!(report.name.as_str(), "pic14.bmp");
    assert_eq!(report.outcome, Ok(Size::new(2, 2)));
  }
  assert_eq!(v.state().phase(), Phase::Idle);
  assert_eq!(v.state().last_shown(), 0);
}

#[test]
fn test_viewer_random_never_repeats() {
  let storage = MemStorage::default();
  let switches = FixedSwitches { test_mode: false, mode: Mode::Random };
  let mut v = viewer(&storage, switches, config(5));
  assert_eq!(v.state().mode(), Mode::Random);
  let mut last = 0;
  for _ in 0..50 {
    let report = v.cycle().unwrap();
    assert!((1..=5).contains(&report.index));
    assert_ne!(report.index, last);
    assert_eq!(report.outcome, Err(DecodeError::FileNotFound));
    last = report.index;
  }
}

#[test]
fn test_viewer_theme_is_truncated() {
  let storage = MemStorage::default()
    .with("theme.txt", b"Thirty characters of theme txt\nignored".to_vec());
  let mut v = viewer(&storage, SEQUENTIAL, config(1));
  assert!(v.theme().is_empty());
  v.start().unwrap();
  assert_eq!(v.theme().as_str(), "Thirty characters of t");
  assert_eq!(v.theme().as_str().len(), 22);
}

#[test]
fn test_viewer_waits_between_pictures() {
  let storage = MemStorage::default();
  let mut v = viewer(&storage, SEQUENTIAL, config(3));
  v.start().unwrap();
  v.cycle().unwrap();
  v.cycle().unwrap();
  let (_, _, _, delays) = v.release();
  assert_eq!(delays.ms, [2000, 5000, 5000]);
}

#[test]
fn test_viewer_status_text_is_drawn() {
  let storage = MemStorage::default().with("theme.txt", b"Beach".to_vec());
  let mut v = viewer(&storage, SEQUENTIAL, config(1));
  v.start().unwrap();
  v.cycle().unwrap();
  // some white text in each of the two status lines
  let lit = |rows: std::ops::Range<i32>| {
    rows.flat_map(|y| (0..64).map(move |x| Point::new(x, y)))
      .any(|p| v.display().get_pixel(p) == Some(Rgb565::WHITE))
  };
  assert!(lit(50..60));
  assert!(lit(60..64));
}
