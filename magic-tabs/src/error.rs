use thiserror::Error;

/// Errors raised while resolving widget configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A length resolved to a negative or non-finite pixel value.
    #[error("`{field}` must be a finite, non-negative length, got {value}")]
    InvalidDimension {
        /// Name of the offending field.
        field: &'static str,
        /// Resolved pixel value.
        value: f32,
    },
    /// A length that must be strictly positive resolved to zero.
    #[error("`{field}` must be greater than zero")]
    ZeroDimension {
        /// Name of the offending field.
        field: &'static str,
    },
}

/// Errors raised while preparing bitmaps for drawing.
#[derive(Debug, Error)]
pub enum BitmapError {
    /// The source bitmap has no pixels.
    #[error("source bitmap is empty ({width}x{height})")]
    EmptySource { width: u32, height: u32 },
    /// The requested output size has no pixels.
    #[error("cannot round a bitmap into a {width}x{height} target")]
    InvalidTarget { width: u32, height: u32 },
    /// Decoding an image file failed.
    #[error("failed to load image from {path}: {source}")]
    Load {
        /// Failing path.
        path: String,
        /// Underlying decoder error.
        #[source]
        source: image::ImageError,
    },
}

pub(crate) fn check_length(field: &'static str, value: f32) -> Result<f32, ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(ConfigError::InvalidDimension { field, value })
    }
}

pub(crate) fn check_positive(field: &'static str, value: f32) -> Result<f32, ConfigError> {
    let value = check_length(field, value)?;
    if value == 0.0 {
        return Err(ConfigError::ZeroDimension { field });
    }
    Ok(value)
}
