use embedded_graphics::{
  mock_display::MockDisplay,
  pixelcolor::{Rgb565, RgbColor},
  prelude::Point,
};
use picview::{
  BitmapDescriptor, BlitError, BlitReport, ByteStream, DecodeError, DisplayOrigin, FrameBlitter,
  SliceFile,
};

use super::*;

const RED: [u8; 3] = [255, 0, 0];
const GREEN: [u8; 3] = [0, 255, 0];
const BLUE: [u8; 3] = [0, 0, 255];
const WHITE: [u8; 3] = [255, 255, 255];
const BLACK: [u8; 3] = [0, 0, 0];

fn is_blank(display: &MockDisplay<Rgb565>) -> bool {
  (0..64).all(|y| (0..64).all(|x| display.get_pixel(Point::new(x, y)).is_none()))
}

fn draw(
  bytes: &[u8], origin: DisplayOrigin, display: &mut MockDisplay<Rgb565>,
) -> Result<BlitReport, BlitError<core::convert::Infallible>> {
  let mut stream = ByteStream::new(SliceFile::new(bytes));
  let descriptor = BitmapDescriptor::parse(&mut stream)?;
  FrameBlitter::new().blit(&mut stream, &descriptor, origin, display)
}

#[test]
fn test_bmp_vertical_orientation() {
  // top row red, middle green, bottom blue
  let rows = vec![vec![RED; 2], vec![GREEN; 2], vec![BLUE; 2]];
  for top_down in [false, true] {
    let bytes = bmp24(&rows, top_down);
    let mut display = MockDisplay::new();
    let report = draw(&bytes, DisplayOrigin::new(5, 7), &mut display).unwrap();
    assert_eq!(report, BlitReport { rows: 3, columns: 2 });
    for x in [5, 6] {
      assert_eq!(display.get_pixel(Point::new(x, 7)), Some(Rgb565::RED), "top_down:{top_down}");
      assert_eq!(display.get_pixel(Point::new(x, 8)), Some(Rgb565::GREEN), "top_down:{top_down}");
      assert_eq!(display.get_pixel(Point::new(x, 9)), Some(Rgb565::BLUE), "top_down:{top_down}");
      assert_eq!(display.get_pixel(Point::new(x, 10)), None);
    }
    assert_eq!(display.get_pixel(Point::new(4, 7)), None);
    assert_eq!(display.get_pixel(Point::new(7, 7)), None);
  }
}

#[test]
fn test_bmp_primaries_convert_exactly() {
  let rows = vec![vec![RED, GREEN, BLUE, WHITE, BLACK]];
  let bytes = bmp24(&rows, true);
  let mut display = MockDisplay::new();
  draw(&bytes, DisplayOrigin::default(), &mut display).unwrap();
  let expected = [Rgb565::RED, Rgb565::GREEN, Rgb565::BLUE, Rgb565::WHITE, Rgb565::BLACK];
  for (x, c) in expected.into_iter().enumerate() {
    assert_eq!(display.get_pixel(Point::new(x as i32, 0)), Some(c));
  }
}

#[test]
fn test_bmp_wide_rows_cross_chunks() {
  // 45 pixels is two full chunks and a partial one, with a padded stride
  let row: Vec<[u8; 3]> = (0..45).map(|x| if x % 2 == 0 { RED } else { BLUE }).collect();
  let bytes = bmp24(&[row.clone(), row], false);
  let mut display = MockDisplay::new();
  let report = draw(&bytes, DisplayOrigin::new(0, 10), &mut display).unwrap();
  assert_eq!(report.pixels(), 90);
  for y in [10, 11] {
    for x in 0..45 {
      let c = if x % 2 == 0 { Rgb565::RED } else { Rgb565::BLUE };
      assert_eq!(display.get_pixel(Point::new(x, y)), Some(c), "x:{x} y:{y}");
    }
  }
}

#[test]
fn test_bmp_clipped_at_display_edge() {
  // MockDisplay is 64x64 and panics on any out of bounds pixel
  for top_down in [false, true] {
    let bytes = bmp24(&vec![vec![GREEN; 10]; 10], top_down);
    let mut display = MockDisplay::new();
    let report = draw(&bytes, DisplayOrigin::new(60, 58), &mut display).unwrap();
    assert_eq!(report, BlitReport { rows: 6, columns: 4 });
    assert_eq!(display.get_pixel(Point::new(60, 58)), Some(Rgb565::GREEN));
    assert_eq!(display.get_pixel(Point::new(63, 63)), Some(Rgb565::GREEN));
    assert_eq!(display.get_pixel(Point::new(59, 58)), None);
  }

  let bytes = solid24(4, 4, RED);
  let mut display = MockDisplay::new();
  let report = draw(&bytes, DisplayOrigin::new(64, 0), &mut display).unwrap();
  assert_eq!(report.pixels(), 0);
  assert!(is_blank(&display));
}

#[test]
fn test_bmp_bad_magic_draws_nothing() {
  let mut bytes = solid24(4, 4, RED);
  bytes[0..2].copy_from_slice(b"XX");
  let mut display = MockDisplay::new();
  assert_eq!(
    draw(&bytes, DisplayOrigin::default(), &mut display),
    Err(BlitError::Decode(DecodeError::BadMagic))
  );
  assert!(is_blank(&display));
}

#[test]
fn test_bmp_unsupported_depth_draws_nothing() {
  let bytes = raw_bmp(8, 1, 1, &[[0, 0, 0, 0], [255, 255, 255, 0]], &[vec![0b1010_1010]]);
  let mut display = MockDisplay::new();
  assert_eq!(
    draw(&bytes, DisplayOrigin::default(), &mut display),
    Err(BlitError::Decode(DecodeError::UnsupportedDepth))
  );
  assert!(is_blank(&display));
}

#[test]
fn test_bmp_compressed_is_unsupported() {
  let mut bytes = solid24(2, 2, RED);
  bytes[30..34].copy_from_slice(&1_u32.to_le_bytes());
  let mut display = MockDisplay::new();
  assert_eq!(
    draw(&bytes, DisplayOrigin::default(), &mut display),
    Err(BlitError::Decode(DecodeError::Unsupported))
  );
  assert!(is_blank(&display));
}

#[test]
fn test_bmp_truncated_keeps_rows_drawn() {
  let rows = vec![vec![RED; 3], vec![GREEN; 3], vec![BLUE; 3]];
  let mut bytes = bmp24(&rows, true);
  // cut into the last row
  bytes.truncate(bytes.len() - 6);
  let mut display = MockDisplay::new();
  assert_eq!(
    draw(&bytes, DisplayOrigin::default(), &mut display),
    Err(BlitError::Decode(DecodeError::ReadFailure))
  );
  assert_eq!(display.get_pixel(Point::new(0, 0)), Some(Rgb565::RED));
  assert_eq!(display.get_pixel(Point::new(2, 1)), Some(Rgb565::GREEN));
  assert_eq!(display.get_pixel(Point::new(0, 2)), None);
}

#[test]
fn test_bmp_32bpp_and_16bpp() {
  // [b, g, r, x]
  let bytes = raw_bmp(2, -1, 32, &[], &[vec![0, 255, 0, 0, 255, 0, 0, 0]]);
  let mut display = MockDisplay::new();
  draw(&bytes, DisplayOrigin::default(), &mut display).unwrap();
  assert_eq!(display.get_pixel(Point::new(0, 0)), Some(Rgb565::GREEN));
  assert_eq!(display.get_pixel(Point::new(1, 0)), Some(Rgb565::BLUE));

  // x1111100_00000000 and x0000000_00011111, little-endian
  let bytes = raw_bmp(2, -1, 16, &[], &[vec![0x00, 0x7C, 0x1F, 0x00]]);
  let mut display = MockDisplay::new();
  draw(&bytes, DisplayOrigin::default(), &mut display).unwrap();
  assert_eq!(display.get_pixel(Point::new(0, 0)), Some(Rgb565::RED));
  assert_eq!(display.get_pixel(Point::new(1, 0)), Some(Rgb565::BLUE));
}

#[test]
#[cfg(feature = "palette")]
fn test_bmp_indexed() {
  // [b, g, r, 0]
  let palette = [[0, 0, 255, 0], [255, 0, 0, 0], [255, 255, 255, 0]];

  let bytes = raw_bmp(3, 2, 8, &palette, &[vec![2, 2, 2], vec![0, 1, 9]]);
  let mut display = MockDisplay::new();
  draw(&bytes, DisplayOrigin::default(), &mut display).unwrap();
  // the second stored row is the top one
  assert_eq!(display.get_pixel(Point::new(0, 0)), Some(Rgb565::RED));
  assert_eq!(display.get_pixel(Point::new(1, 0)), Some(Rgb565::BLUE));
  // past the end of the color table
  assert_eq!(display.get_pixel(Point::new(2, 0)), Some(Rgb565::BLACK));
  assert_eq!(display.get_pixel(Point::new(1, 1)), Some(Rgb565::WHITE));

  let bytes = raw_bmp(3, -1, 4, &palette, &[vec![0x01, 0x20]]);
  let mut display = MockDisplay::new();
  draw(&bytes, DisplayOrigin::default(), &mut display).unwrap();
  assert_eq!(display.get_pixel(Point::new(0, 0)), Some(Rgb565::RED));
  assert_eq!(display.get_pixel(Point::new(1, 0)), Some(Rgb565::BLUE));
  assert_eq!(display.get_pixel(Point::new(2, 0)), Some(Rgb565::WHITE));
  assert_eq!(display.get_pixel(Point::new(3, 0)), None);
}

#[test]
#[cfg(not(feature = "palette"))]
fn test_bmp_indexed_needs_feature() {
  let bytes = raw_bmp(1, 1, 8, &[[0, 0, 255, 0]], &[vec![0]]);
  let mut display = MockDisplay::new();
  assert_eq!(
    draw(&bytes, DisplayOrigin::default(), &mut display),
    Err(BlitError::Decode(DecodeError::UnsupportedDepth))
  );
}

#[test]
fn test_hostile_bytes_do_not_panic() {
  for _ in 0..500 {
    let mut bytes = rand_bytes(300);
    let mut display = MockDisplay::new();
    let _ = draw(&bytes, DisplayOrigin::default(), &mut display);

    // get past the tag check, and give the header a fighting chance
    bytes[0..2].copy_from_slice(b"BM");
    bytes[14..18].copy_from_slice(&40_u32.to_le_bytes());
    bytes[26..28].copy_from_slice(&1_u16.to_le_bytes());
    bytes[30..34].copy_from_slice(&0_u32.to_le_bytes());
    let mut display = MockDisplay::new();
    let _ = draw(&bytes, DisplayOrigin::default(), &mut display);
  }
}
