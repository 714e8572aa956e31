use thiserror::Error;

pub type Result<T> = std::result::Result<T, QuantError>;

#[derive(Debug, Error)]
pub enum QuantError {
    #[error("bit depth must be a positive integer (got {bit_depth})")]
    InvalidBitDepth { bit_depth: i32 },

    #[error("bit depth {bit_depth} exceeds the supported maximum of {max}")]
    BitDepthTooLarge { bit_depth: i32, max: i32 },

    #[error("maximum range must be greater than minimum range (min={min}, max={max})")]
    InvalidRange { min: f64, max: f64 },

    #[error("sample rate must be at least 1 Hz")]
    InvalidSampleRate,

    #[error("duration must be a finite number of seconds > 0 (got {0})")]
    InvalidDuration(f64),

    #[error("frequency must be finite (got {0})")]
    InvalidFrequency(f64),

    #[error("{field} must be a finite number")]
    NonFinite { field: &'static str },

    #[error("config format error: {0}")]
    ConfigFormat(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
