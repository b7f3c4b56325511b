use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum NoteheadError {
    #[error("Cannot read image: {}", path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("Cannot write image: {}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("Invalid detection config: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, NoteheadError>;
