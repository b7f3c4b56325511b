use ndarray::{Array2, Zip};

/// Binary structuring element, stored as offsets from its anchor.
///
/// The anchor sits at `(width / 2, height / 2)`.
#[derive(Clone, Debug, PartialEq)]
pub struct StructuringElement {
    width: usize,
    height: usize,
    /// `(d_row, d_col)` of every active cell relative to the anchor.
    offsets: Vec<(isize, isize)>,
}

impl StructuringElement {
    /// Filled `width x height` rectangle.
    pub fn rect(width: usize, height: usize) -> Self {
        Self::from_fn(width, height, |_, _| true)
    }

    /// Ellipse inscribed in a `width x height` box.
    ///
    /// Each row spans `round(c * sqrt(1 - dy^2 / r^2))` cells either side of
    /// the center column, so a 3x3 ellipse is a cross.
    pub fn ellipse(width: usize, height: usize) -> Self {
        let r = (height / 2) as f64;
        let c = (width / 2) as f64;
        if r == 0.0 || c == 0.0 {
            return Self::rect(width, height);
        }
        let inv_r2 = 1.0 / (r * r);

        Self::from_fn(width, height, |row, col| {
            let dy = row as f64 - r;
            if dy.abs() > r {
                return false;
            }
            let dx = (c * ((r * r - dy * dy) * inv_r2).sqrt()).round();
            let j1 = (c - dx).max(0.0);
            let j2 = (c + dx + 1.0).min(width as f64);
            (col as f64) >= j1 && (col as f64) < j2
        })
    }

    fn from_fn(width: usize, height: usize, active: impl Fn(usize, usize) -> bool) -> Self {
        let anchor_row = (height / 2) as isize;
        let anchor_col = (width / 2) as isize;
        let mut offsets = Vec::with_capacity(width * height);
        for row in 0..height {
            for col in 0..width {
                if active(row, col) {
                    offsets.push((row as isize - anchor_row, col as isize - anchor_col));
                }
            }
        }
        Self {
            width,
            height,
            offsets,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Whether the cell at `(row, col)` of the element's box is active.
    pub fn contains(&self, row: usize, col: usize) -> bool {
        let d_row = row as isize - (self.height / 2) as isize;
        let d_col = col as isize - (self.width / 2) as isize;
        self.offsets.contains(&(d_row, d_col))
    }

    /// Number of active cells.
    pub fn len(&self) -> usize {
        self.offsets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.offsets.is_empty()
    }
}

/// Binary erosion: a pixel stays true only if every in-bounds pixel under
/// the element is true. Samples falling outside the image are ignored.
pub fn erode(mask: &Array2<bool>, element: &StructuringElement) -> Array2<bool> {
    let (h, w) = mask.dim();

    Array2::from_shape_fn((h, w), |(row, col)| {
        if !mask[[row, col]] {
            return false;
        }
        element.offsets.iter().all(|&(dr, dc)| {
            match neighbor(row, col, dr, dc, h, w) {
                Some(idx) => mask[idx],
                None => true,
            }
        })
    })
}

/// Binary dilation: a pixel becomes true if any in-bounds pixel under the
/// element is true.
pub fn dilate(mask: &Array2<bool>, element: &StructuringElement) -> Array2<bool> {
    let (h, w) = mask.dim();

    Array2::from_shape_fn((h, w), |(row, col)| {
        element
            .offsets
            .iter()
            .any(|&(dr, dc)| neighbor(row, col, dr, dc, h, w).is_some_and(|idx| mask[idx]))
    })
}

fn neighbor(
    row: usize,
    col: usize,
    dr: isize,
    dc: isize,
    h: usize,
    w: usize,
) -> Option<[usize; 2]> {
    let nr = row as isize + dr;
    let nc = col as isize + dc;
    if nr < 0 || nr >= h as isize || nc < 0 || nc >= w as isize {
        None
    } else {
        Some([nr as usize, nc as usize])
    }
}

/// Morphological opening: `iterations` erosions followed by as many dilations.
///
/// Removes foreground structures the element does not fit inside.
pub fn opening(
    mask: &Array2<bool>,
    element: &StructuringElement,
    iterations: usize,
) -> Array2<bool> {
    let mut out = mask.clone();
    for _ in 0..iterations {
        out = erode(&out, element);
    }
    for _ in 0..iterations {
        out = dilate(&out, element);
    }
    out
}

/// Morphological closing: `iterations` dilations followed by as many erosions.
///
/// Fills gaps and holes smaller than the element.
pub fn closing(
    mask: &Array2<bool>,
    element: &StructuringElement,
    iterations: usize,
) -> Array2<bool> {
    let mut out = mask.clone();
    for _ in 0..iterations {
        out = dilate(&out, element);
    }
    for _ in 0..iterations {
        out = erode(&out, element);
    }
    out
}

/// Pixels set in `a` but not in `b`.
pub fn subtract(a: &Array2<bool>, b: &Array2<bool>) -> Array2<bool> {
    Zip::from(a).and(b).map_collect(|&x, &y| x && !y)
}

/// Strip horizontal staff lines from an ink mask.
///
/// An opening with a `kernel_width x 1` rectangle keeps only horizontal runs
/// at least that long; those are subtracted from the mask. Returns the
/// stripped mask and the isolated lines.
pub fn remove_staff_lines(
    mask: &Array2<bool>,
    kernel_width: usize,
) -> (Array2<bool>, Array2<bool>) {
    let element = StructuringElement::rect(kernel_width, 1);
    let lines = opening(mask, &element, 1);
    (subtract(mask, &lines), lines)
}

/// Speckle removal followed by gap filling with an elliptical element.
pub fn clean_noise(
    mask: &Array2<bool>,
    kernel_size: usize,
    open_iterations: usize,
    close_iterations: usize,
) -> Array2<bool> {
    let element = StructuringElement::ellipse(kernel_size, kernel_size);
    let opened = opening(mask, &element, open_iterations);
    closing(&opened, &element, close_iterations)
}
