use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use image::RgbImage;

use crate::consts::{FALLBACK_OUTPUT_EXTENSION, OUTPUT_SUFFIX};
use crate::error::{NoteheadError, Result};
use crate::score::ScoreImage;

/// Decode a score page from disk.
///
/// A missing file and an undecodable one both surface as `Decode`.
pub fn load_score(path: &Path) -> Result<ScoreImage> {
    let img = image::open(path).map_err(|source| NoteheadError::Decode {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(ScoreImage::from_dynamic(&img))
}

/// Save an annotated page, choosing the format from the file extension.
pub fn save_annotated(img: &RgbImage, path: &Path) -> Result<()> {
    img.save(path).map_err(|source| NoteheadError::Write {
        path: path.to_path_buf(),
        source,
    })
}

/// Sibling path with `_detected` inserted before the extension.
///
/// `scans/page.png` becomes `scans/page_detected.png`; a path without an
/// extension gets `_detected.png`.
pub fn derive_output_path(input: &Path) -> PathBuf {
    let mut name = input
        .file_stem()
        .map(OsStr::to_os_string)
        .unwrap_or_default();
    name.push(OUTPUT_SUFFIX);
    name.push(".");
    name.push(
        input
            .extension()
            .unwrap_or_else(|| OsStr::new(FALLBACK_OUTPUT_EXTENSION)),
    );

    input.with_file_name(name)
}
