//! Вывод карт в изображения. Ядро генерации от этого модуля не зависит.

use image::{ImageBuffer, Luma, Rgba};
use std::path::Path;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::error::{MapGenError, Result};
use crate::grid::{Heightmap, LandMask};

/// Цвет в формате RGB
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub [u8; 3]);

impl Rgb {
    /// Разбирает строку `#rrggbb`
    pub fn from_hex(hex: &str) -> Result<Self> {
        let invalid = || MapGenError::InvalidColor(hex.to_string());
        let digits = hex.strip_prefix('#').ok_or_else(invalid)?;
        if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(invalid());
        }
        let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).map_err(|_| invalid());
        Ok(Self([channel(0)?, channel(2)?, channel(4)?]))
    }
}

impl Heightmap {
    /// Оттенки серого: 0 — чёрный, 255 — белый
    #[must_use]
    pub fn to_grayscale_image(&self) -> Vec<u8> {
        self.data.clone()
    }

    pub fn save_as_png(&self, path: impl AsRef<Path>) -> Result<()> {
        if self.is_empty() {
            return Err(MapGenError::EmptyGrid);
        }
        let side = self.size as u32;
        let img: ImageBuffer<Luma<u8>, Vec<u8>> =
            ImageBuffer::from_raw(side, side, self.to_grayscale_image())
                .ok_or(MapGenError::EmptyGrid)?;
        img.save(path)?;
        Ok(())
    }
}

impl LandMask {
    /// RGBA-пиксели: суша цветом `land`, вода цветом `water`.
    /// Строка изображения — это строка сетки (`x`).
    #[must_use]
    pub fn to_rgba_image(&self, land: Rgb, water: Rgb) -> Vec<u8> {
        let pixel = |&is_land: &bool| {
            let Rgb([r, g, b]) = if is_land { land } else { water };
            [r, g, b, 255]
        };

        #[cfg(feature = "parallel")]
        let pixels: Vec<[u8; 4]> = self.data.par_iter().map(pixel).collect();
        #[cfg(not(feature = "parallel"))]
        let pixels: Vec<[u8; 4]> = self.data.iter().map(pixel).collect();

        pixels.into_iter().flatten().collect()
    }

    pub fn save_as_png(&self, path: impl AsRef<Path>, land: Rgb, water: Rgb) -> Result<()> {
        if self.is_empty() {
            return Err(MapGenError::EmptyGrid);
        }
        let side = self.size as u32;
        let img: ImageBuffer<Rgba<u8>, Vec<u8>> =
            ImageBuffer::from_raw(side, side, self.to_rgba_image(land, water))
                .ok_or(MapGenError::EmptyGrid)?;
        img.save(path)?;
        Ok(())
    }
}
