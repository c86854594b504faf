use std::path::PathBuf;

/// Result alias used across the crate.
pub type MemeResult<T> = Result<T, MemeError>;

/// Errors raised while loading configuration, decoding media, or encoding memes.
#[derive(thiserror::Error, Debug)]
pub enum MemeError {
    /// A field value is out of range or inconsistent with another field.
    #[error("validation error: {0}")]
    Validation(String),

    /// A configuration record is structurally unusable.
    #[error("configuration error: {0}")]
    Config(String),

    /// A file the batch depends on does not exist.
    #[error("file not found: {}", .0.display())]
    NotFound(PathBuf),

    /// The template selector does not name a known template.
    #[error("template {0} is not implemented")]
    UnimplementedTemplate(i64),

    /// Probing or decoding a media file failed.
    #[error("media error: {0}")]
    Media(String),

    /// Encoding the output file failed.
    #[error("encode error: {0}")]
    Encode(String),

    /// The configuration document is not valid JSON.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Anything else, usually I/O with context attached.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl MemeError {
    /// Build a [`MemeError::Validation`].
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`MemeError::Config`].
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Build a [`MemeError::Media`].
    pub fn media(msg: impl Into<String>) -> Self {
        Self::Media(msg.into())
    }

    /// Build a [`MemeError::Encode`].
    pub fn encode(msg: impl Into<String>) -> Self {
        Self::Encode(msg.into())
    }

    /// Build a [`MemeError::Serde`].
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }

    /// Build a [`MemeError::NotFound`].
    pub fn not_found(path: impl Into<PathBuf>) -> Self {
        Self::NotFound(path.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
