use alloc::string::String;

/// Errors from opening, decoding, or rendering a bitmap.
///
/// Every variant is recoverable at the pipeline level: the current image's
/// render aborts and the caller (typically the slideshow loop) moves on to
/// the next file. Out-of-bounds pixel writes are not an error — the
/// coordinate mapper drops them silently.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum DecodeError {
    #[error("image not found: {0}")]
    NotFound(String),

    #[error("image failed to open: {0}")]
    OpenFailed(String),

    /// Short read, or an RLE stream that ran out of records without an
    /// end-of-bitmap marker.
    #[error("unexpected end of image data")]
    Truncated,

    #[error("unsupported header: {0}")]
    UnsupportedHeader(String),

    #[error("unsupported pixel format: {0}")]
    UnsupportedFormat(String),

    #[error("invalid pixel data: {0}")]
    InvalidData(String),

    #[error("limit exceeded: {0}")]
    LimitExceeded(String),

    /// Storage-layer fault during read/seek/close.
    #[error("storage error: {0}")]
    Storage(String),
}

/// Errors from the settings persistence store.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum SettingsError {
    #[error("settings store unavailable")]
    Unavailable,

    #[error("settings store I/O failure: {0}")]
    Io(String),
}
