// ============================================================================
// error.rs — Error type shared by the encoder, resizer and pack path
// ============================================================================

use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, IcoError>;

#[derive(Debug, Error)]
pub enum IcoError {
    /// Side length outside 1..=256
    #[error("invalid icon size {size}: side length must be between 1 and 256")]
    InvalidSize { size: u32 },

    #[error("icon container has no images")]
    Empty,

    #[error("icon container already holds a {size}x{size} image")]
    DuplicateSize { size: u32 },

    #[error("icon too large: {0}")]
    TooLarge(String),

    #[error("cannot derive icon size from file name '{}'", .path.display())]
    MalformedFileName { path: PathBuf },

    #[error("{}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Writer failure where no file path is known
    #[error("write failed: {0}")]
    Write(#[source] std::io::Error),

    /// The ICO is on disk but some inputs are still there.
    #[error(
        "{} was written, but {} input file(s) could not be removed: {}",
        .written.display(),
        .failures.len(),
        .failures.join("; ")
    )]
    Cleanup { written: PathBuf, failures: Vec<String> },

    #[error("image processing failed for '{}': {message}", .path.display())]
    Image { path: PathBuf, message: String },

    #[error("this build has no image support; rebuild with the '{feature}' feature enabled")]
    MissingDependency { feature: &'static str },

    #[error("not a readable ICO buffer: {0}")]
    Decode(String),

    #[error("invalid configuration '{}': {message}", .path.display())]
    Config { path: PathBuf, message: String },
}

impl IcoError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        IcoError::Io {
            path: path.into(),
            source,
        }
    }
}
