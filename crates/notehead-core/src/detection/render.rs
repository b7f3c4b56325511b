use image::{Rgb, RgbImage};
use imageproc::drawing::draw_hollow_rect_mut;
use imageproc::rect::Rect;

use super::candidate::BoundingBox;

/// Outline every box on `canvas`.
///
/// The outline runs from `(x, y)` to `(x + width, y + height)` and grows
/// inward by one pixel per unit of `thickness`. Parts outside the canvas
/// are clipped.
pub fn draw_boxes(canvas: &mut RgbImage, boxes: &[BoundingBox], color: [u8; 3], thickness: u32) {
    for bbox in boxes {
        for inset in 0..thickness {
            let w = (bbox.width + 1).saturating_sub(2 * inset);
            let h = (bbox.height + 1).saturating_sub(2 * inset);
            if w == 0 || h == 0 {
                break;
            }
            let rect = Rect::at((bbox.x + inset) as i32, (bbox.y + inset) as i32).of_size(w, h);
            draw_hollow_rect_mut(canvas, rect, Rgb(color));
        }
    }
}
