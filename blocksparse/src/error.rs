//! Error type for the block-sparse engine and its I/O paths

use blocksparse_core::BlockSparseError;

/// Errors returned by `blocksparse`
#[derive(Debug)]
pub enum Error {
    /// Structural or dimension error from the core crate
    Core(BlockSparseError),
    /// Failure of a caller-provided writer or file
    Io(std::io::Error),
    /// Malformed JSON block structure
    #[cfg(feature = "serde")]
    Json(serde_json::Error),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::Core(e) => write!(f, "{e}"),
            Error::Io(e) => write!(f, "I/O error: {e}"),
            #[cfg(feature = "serde")]
            Error::Json(e) => write!(f, "JSON error: {e}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Core(_) => None,
            Error::Io(e) => Some(e),
            #[cfg(feature = "serde")]
            Error::Json(e) => Some(e),
        }
    }
}

impl From<BlockSparseError> for Error {
    fn from(e: BlockSparseError) -> Self {
        Error::Core(e)
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error::Io(e)
    }
}

#[cfg(feature = "serde")]
impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Json(e)
    }
}

/// Result type for `blocksparse`
pub type Result<T> = std::result::Result<T, Error>;
