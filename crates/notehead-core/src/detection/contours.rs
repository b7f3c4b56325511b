use image::{GrayImage, Luma};
use imageproc::contours::{find_contours, BorderType};
use imageproc::point::Point;
use ndarray::Array2;

use super::candidate::BoundingBox;

/// Outer boundary of one connected foreground region.
#[derive(Clone, Debug, PartialEq)]
pub struct Contour {
    /// Boundary vertices in tracing order.
    pub points: Vec<Point<i32>>,
}

impl Contour {
    /// Smallest axis-aligned box containing every boundary pixel.
    pub fn bounding_rect(&self) -> BoundingBox {
        let Some(first) = self.points.first() else {
            return BoundingBox::new(0, 0, 0, 0);
        };
        let (mut min_x, mut max_x, mut min_y, mut max_y) = (first.x, first.x, first.y, first.y);
        for p in &self.points[1..] {
            min_x = min_x.min(p.x);
            max_x = max_x.max(p.x);
            min_y = min_y.min(p.y);
            max_y = max_y.max(p.y);
        }
        BoundingBox::new(
            min_x as u32,
            min_y as u32,
            (max_x - min_x + 1) as u32,
            (max_y - min_y + 1) as u32,
        )
    }

    /// Area enclosed by the boundary polygon (shoelace formula).
    ///
    /// Vertices are pixel centers, so a single pixel or a one-pixel-wide
    /// line has zero area.
    pub fn area(&self) -> f64 {
        let n = self.points.len();
        if n < 3 {
            return 0.0;
        }
        let mut twice_area = 0i64;
        for i in 0..n {
            let a = self.points[i];
            let b = self.points[(i + 1) % n];
            twice_area += a.x as i64 * b.y as i64 - b.x as i64 * a.y as i64;
        }
        twice_area.abs() as f64 / 2.0
    }
}

/// Trace the outer borders of top-level foreground regions.
///
/// Holes and regions nested inside holes are skipped. Contours come back in
/// raster order of their first pixel, with collinear runs compressed.
/// Everything outside the mask counts as background, so regions touching
/// the image edge are traced like any other.
pub fn find_external_contours(mask: &Array2<bool>) -> Vec<Contour> {
    let (h, w) = mask.dim();
    if h == 0 || w == 0 {
        return Vec::new();
    }

    // One background pixel of padding on every side; points are shifted back below.
    let padded = GrayImage::from_fn(w as u32 + 2, h as u32 + 2, |x, y| {
        let inside = x >= 1 && y >= 1 && (x as usize) <= w && (y as usize) <= h;
        let ink = inside && mask[[y as usize - 1, x as usize - 1]];
        Luma([if ink { 255 } else { 0 }])
    });

    find_contours::<i32>(&padded)
        .into_iter()
        .filter(|c| c.border_type == BorderType::Outer && c.parent.is_none())
        .map(|c| {
            let points: Vec<Point<i32>> = c
                .points
                .iter()
                .map(|p| Point::new(p.x - 1, p.y - 1))
                .collect();
            Contour {
                points: simplify_chain(&points),
            }
        })
        .collect()
}

/// Drop every vertex whose incoming and outgoing steps are identical.
///
/// Traced boundaries move one pixel at a time, so equal consecutive steps
/// mean the vertex sits in the middle of a horizontal, vertical or diagonal
/// run. The first vertex is always kept.
pub fn simplify_chain(points: &[Point<i32>]) -> Vec<Point<i32>> {
    let n = points.len();
    if n < 3 {
        return points.to_vec();
    }

    let mut out = Vec::with_capacity(n);
    out.push(points[0]);
    for i in 1..n {
        let prev = points[i - 1];
        let cur = points[i];
        let next = points[(i + 1) % n];
        let step_in = (cur.x - prev.x, cur.y - prev.y);
        let step_out = (next.x - cur.x, next.y - cur.y);
        if step_in != step_out {
            out.push(cur);
        }
    }
    out
}
