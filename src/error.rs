use std::io;
use std::path::PathBuf;

/// Errors raised while building icon outputs.
///
/// Every variant aborts the build; nothing is retried and partially written
/// outputs are left in place.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    /// The source image is missing or could not be parsed.
    #[error("failed to decode source image {}: {source}", path.display())]
    Decode {
        /// Path of the source image.
        path: PathBuf,
        /// Underlying codec error.
        #[source]
        source: image::ImageError,
    },

    /// A requested size or format could not be encoded.
    #[error("failed to encode icon: {0}")]
    Encode(String),

    /// An output file could not be created or written.
    #[error("failed to write {}: {source}", path.display())]
    Write {
        /// Destination path.
        path: PathBuf,
        /// Underlying filesystem error.
        #[source]
        source: io::Error,
    },

    /// The source image failed validation in strict mode.
    #[error("invalid source image: {0}")]
    InvalidSource(String),
}

impl BuildError {
    /// Maps an `io::Error` from the encoding layer, keeping real filesystem
    /// failures apart from data the container format cannot represent.
    pub(crate) fn from_io(path: PathBuf, error: io::Error) -> BuildError {
        match error.kind() {
            io::ErrorKind::InvalidInput | io::ErrorKind::InvalidData => {
                BuildError::Encode(format!("{}: {}", path.display(), error))
            }
            _ => BuildError::Write { path, source: error },
        }
    }
}
