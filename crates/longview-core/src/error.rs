use thiserror::Error;

#[derive(Error, Debug)]
pub enum LongviewError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image format error: {0}")]
    ImageError(#[from] image::ImageError),

    #[error("Unsupported image format: {0}")]
    UnsupportedFormat(String),

    #[error("Invalid PNM file: {0}")]
    InvalidPnm(String),

    #[error("Invalid image dimensions: {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("Region ({left},{top})-({right},{bottom}) outside {width}x{height} image")]
    InvalidRegion {
        left: i32,
        top: i32,
        right: i32,
        bottom: i32,
        width: u32,
        height: u32,
    },

    #[error("Config error: {0}")]
    Config(#[from] toml::de::Error),

    #[error("Invalid config value {field} = {value}: {reason}")]
    InvalidConfig {
        field: &'static str,
        value: String,
        reason: &'static str,
    },
}

pub type Result<T> = std::result::Result<T, LongviewError>;
