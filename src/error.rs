//! Error types for downloading and exporting images

use thiserror::Error;

/// Result type alias used across the crate
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    /// Input/output errors (file not found, permission denied, etc.)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Decoding or encoding failures from the image crate
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid glob pattern: {0}")]
    Pattern(#[from] glob::PatternError),

    #[error("Unreadable glob match: {0}")]
    Glob(#[from] glob::GlobError),

    /// The search service answered with `stat != "ok"`
    #[error("Flickr API error {code}: {message}")]
    Api { code: i64, message: String },

    #[error("Missing credential: environment variable {0} is not set")]
    MissingCredential(&'static str),

    /// A search result lacks an identifier needed to build its URL
    #[error("Search result has no `{0}` field")]
    MissingField(&'static str),

    #[error("Cannot derive a file name from {0:?}")]
    InvalidName(String),

    #[error("Cannot determine image format for {0}")]
    UnknownFormat(String),

    #[error("Invalid image: {0}")]
    InvalidImage(String),

    #[error("Invalid square size: {0}")]
    InvalidSize(u32),

    #[error("Wrong size {width}x{height}, expected {expected}x{expected}")]
    WrongSize {
        width: u32,
        height: u32,
        expected: u32,
    },
}

impl Error {
    /// Create a new invalid image error
    pub fn invalid_image<S: Into<String>>(reason: S) -> Self {
        Self::InvalidImage(reason.into())
    }
}
