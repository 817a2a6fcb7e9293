use thiserror::Error;

#[derive(Debug, Error)]
pub enum QuantizeError {
    #[error("pixel input cannot be empty")]
    EmptyPixels,

    #[error("color_count must be between 2 and 256, got {0}")]
    InvalidColorCount(u32),

    #[error("quality (sampling stride) must be at least 1, got {0}")]
    InvalidQuality(u32),

    #[error("RGBA buffer length {0} is not a multiple of 4")]
    InvalidBufferLength(usize),

    #[cfg(feature = "image")]
    #[error("failed to decode image: {0}")]
    Image(#[from] image::ImageError),
}
