/// Convenience result type used across Lunette.
pub type LunetteResult<T> = Result<T, LunetteError>;

/// Top-level error taxonomy used by editor and compositor APIs.
#[derive(thiserror::Error, Debug)]
pub enum LunetteError {
    /// A selected file whose MIME type is not `image/*`.
    #[error("invalid file type: expected an image/* MIME type, got '{0}'")]
    InvalidFileType(String),

    /// Photo bytes could not be decoded.
    #[error("decode error: {0}")]
    Decode(String),

    /// The frame overlay failed to load at startup. Fatal to the editing
    /// experience: this indicates a deployment problem, not a user error.
    #[error("frame asset load error: {0}")]
    AssetLoad(String),

    /// Invalid caller-provided data (geometry, buffer sizes, ...).
    #[error("validation error: {0}")]
    Validation(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl LunetteError {
    /// Build a [`LunetteError::InvalidFileType`] value.
    pub fn invalid_file_type(mime: impl Into<String>) -> Self {
        Self::InvalidFileType(mime.into())
    }

    /// Build a [`LunetteError::Decode`] value.
    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }

    /// Build a [`LunetteError::AssetLoad`] value.
    pub fn asset_load(msg: impl Into<String>) -> Self {
        Self::AssetLoad(msg.into())
    }

    /// Build a [`LunetteError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }
}
