#![allow(dead_code)]

use std::path::{Path, PathBuf};

use image::{Rgb, RgbImage};
use ndarray::Array2;

pub const WHITE: Rgb<u8> = Rgb([255, 255, 255]);
pub const BLACK: Rgb<u8> = Rgb([0, 0, 0]);

/// Blank white page.
pub fn white_page(width: u32, height: u32) -> RgbImage {
    RgbImage::from_pixel(width, height, WHITE)
}

/// Solid black disk: every pixel within `radius` of the center.
pub fn draw_disk(img: &mut RgbImage, cx: i32, cy: i32, radius: i32) {
    draw_ring(img, cx, cy, radius, -1);
}

/// Black ring between `inner` (exclusive) and `outer` (inclusive) radius.
pub fn draw_ring(img: &mut RgbImage, cx: i32, cy: i32, outer: i32, inner: i32) {
    let (w, h) = img.dimensions();
    for y in (cy - outer).max(0)..=(cy + outer).min(h as i32 - 1) {
        for x in (cx - outer).max(0)..=(cx + outer).min(w as i32 - 1) {
            let d2 = (x - cx).pow(2) + (y - cy).pow(2);
            if d2 <= outer * outer && (inner < 0 || d2 > inner * inner) {
                img.put_pixel(x as u32, y as u32, BLACK);
            }
        }
    }
}

/// Full-width black horizontal line `thickness` rows tall starting at `y`.
pub fn draw_staff_line(img: &mut RgbImage, y: u32, thickness: u32) {
    let w = img.width();
    for row in y..(y + thickness).min(img.height()) {
        for x in 0..w {
            img.put_pixel(x, row, BLACK);
        }
    }
}

/// Filled black rectangle.
pub fn draw_bar(img: &mut RgbImage, x: u32, y: u32, width: u32, height: u32) {
    for row in y..(y + height).min(img.height()) {
        for col in x..(x + width).min(img.width()) {
            img.put_pixel(col, row, BLACK);
        }
    }
}

/// Save `img` inside `dir` (format from the extension) and return its path.
pub fn write_image(dir: &Path, name: &str, img: &RgbImage) -> PathBuf {
    let path = dir.join(name);
    img.save(&path).expect("write test image");
    path
}

/// Build a mask from rows of `#` (ink) and `.` (paper).
pub fn mask_from_rows(rows: &[&str]) -> Array2<bool> {
    let h = rows.len();
    let w = rows.first().map_or(0, |r| r.len());
    Array2::from_shape_fn((h, w), |(row, col)| rows[row].as_bytes()[col] == b'#')
}

/// The 200x200 page with one r=10 disk at (100, 100).
pub fn single_disk_page() -> RgbImage {
    let mut img = white_page(200, 200);
    draw_disk(&mut img, 100, 100, 10);
    img
}
