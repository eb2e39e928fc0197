//! Ошибки генерации карт
//!
//! Ошибки конфигурации (неверный метод интерполяции, размер не степень двойки,
//! размер не делится на шаг октавы) возвращаются до того, как выделена
//! хоть одна сетка и потрачено хоть одно случайное число.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum MapGenError {
    #[error("unsupported interpolation method code {0} (expected 0 = bilinear, 1 = bicubic)")]
    UnsupportedInterpolation(u8),

    #[error("invalid octave range {first}..={last}: octaves are 1-based and first must not exceed last")]
    InvalidOctaveRange { first: u32, last: u32 },

    #[error("size {size} is not divisible by the octave stride 2^{octave}")]
    SizeNotDivisible { size: usize, octave: u32 },

    #[error("size {0} is not a power of two")]
    SizeNotPowerOfTwo(usize),

    #[error("grid has zero size")]
    EmptyGrid,

    #[error("invalid color {0:?}, expected #rrggbb")]
    InvalidColor(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("failed to write image: {0}")]
    Image(#[from] image::ImageError),

    #[error("failed to serialize report: {0}")]
    Report(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, MapGenError>;
