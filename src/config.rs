// src/config.rs
//! Конфигурация генерации карты
//!
//! Этот модуль определяет параметры одного запроса генерации:
//! - Выбор алгоритма (value noise, diamond-square, клеточный автомат) и его настройки
//! - Долю суши и вырезание рек
//! - Пару цветов для вывода маски суши
//!
//! Все структуры поддерживают сериализацию в TOML/JSON. Значения по умолчанию
//! совпадают с настройками панели генератора.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::Result;
use crate::interpolation::InterpolationMethod;

/// Настройки многооктавного value noise
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValueNoiseSettings {
    /// Первая (самая мелкая) октава, с 1
    #[serde(default = "default_first_octave")]
    pub first_octave: u32,

    /// Последняя (самая крупная) октава. Размер карты должен делиться на `2^last_octave`.
    #[serde(default = "default_last_octave")]
    pub last_octave: u32,

    /// Интерполяция между узлами октавы
    #[serde(default)]
    pub interpolation: InterpolationMethod,
}

fn default_first_octave() -> u32 {
    1
}
fn default_last_octave() -> u32 {
    8
}

impl Default for ValueNoiseSettings {
    fn default() -> Self {
        Self {
            first_octave: 1,
            last_octave: 8,
            interpolation: InterpolationMethod::Bicubic,
        }
    }
}

/// Настройки diamond-square
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DiamondSquareSettings {
    /// Амплитуда случайного смещения на первом уровне, дальше делится пополам
    #[serde(default = "default_roughness")]
    pub roughness: f64,

    /// Сколько первых узлов получают значение `grid[0][0]` вместо среднего:
    /// - `0` — обычный diamond-square,
    /// - больше — плоские плато и резкие границы материков.
    #[serde(default)]
    pub fragmentation: u32,
}

fn default_roughness() -> f64 {
    1.0
}

impl Default for DiamondSquareSettings {
    fn default() -> Self {
        Self {
            roughness: 1.0,
            fragmentation: 0,
        }
    }
}

/// Настройки клеточного автомата
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CellularAutomataSettings {
    /// Число полных проходов сглаживания
    #[serde(default = "default_iterations")]
    pub iterations: u32,

    /// Клетка становится водой, если в окне 3×3 вокруг неё не меньше стольких водных клеток
    #[serde(default = "default_death_threshold")]
    pub death_threshold: u8,

    /// Начальная доля суши (0.0..=1.0)
    #[serde(default = "default_initial_density")]
    pub initial_density: f64,
}

fn default_iterations() -> u32 {
    5
}
fn default_death_threshold() -> u8 {
    5
}
fn default_initial_density() -> f64 {
    0.5
}

impl Default for CellularAutomataSettings {
    fn default() -> Self {
        Self {
            iterations: 5,
            death_threshold: 5,
            initial_density: 0.5,
        }
    }
}

/// Алгоритм генерации вместе с его настройками
///
/// В TOML выбирается полем `algorithm` в таблице `[generator]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "algorithm")]
pub enum GeneratorSettings {
    ValueNoise(ValueNoiseSettings),
    DiamondSquare(DiamondSquareSettings),
    CellularAutomata(CellularAutomataSettings),
}

impl Default for GeneratorSettings {
    fn default() -> Self {
        Self::ValueNoise(ValueNoiseSettings::default())
    }
}

impl GeneratorSettings {
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::ValueNoise(_) => "ValueNoise",
            Self::DiamondSquare(_) => "DiamondSquare",
            Self::CellularAutomata(_) => "CellularAutomata",
        }
    }
}

/// Цвета суши и воды в формате `#rrggbb`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapColors {
    #[serde(default = "default_land_color")]
    pub land: String,
    #[serde(default = "default_water_color")]
    pub water: String,
}

fn default_land_color() -> String {
    "#285000".to_string()
}
fn default_water_color() -> String {
    "#3c7fff".to_string()
}

impl Default for MapColors {
    fn default() -> Self {
        Self {
            land: default_land_color(),
            water: default_water_color(),
        }
    }
}

/// Основные параметры генерации карты
///
/// Полная конфигурация одного запроса. Поддерживает загрузку из TOML-файлов.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapGenerationParams {
    /// Сид генератора (детерминированная генерация)
    #[serde(default)]
    pub seed: u32,

    /// Сторона квадратной карты в пикселях (по умолчанию 512)
    #[serde(default = "default_size")]
    pub size: usize,

    /// Доля суши в процентах, 0..=100 (по умолчанию 30)
    #[serde(default = "default_land_percentage")]
    pub land_percentage: f64,

    /// Вырезать ли реки из маски суши
    #[serde(default)]
    pub rivers: bool,

    /// Накопленный поток, начиная с которого клетка становится рекой
    #[serde(default = "default_river_threshold")]
    pub river_threshold: u32,

    /// Алгоритм и его настройки (по умолчанию value noise)
    #[serde(default)]
    pub generator: GeneratorSettings,

    /// Цвета для вывода маски
    #[serde(default)]
    pub colors: MapColors,
}

impl MapGenerationParams {
    /// Загружает параметры из TOML-файла
    ///
    /// # Пример
    /// ```toml
    /// # map.toml
    /// seed = 42
    /// size = 256
    /// land_percentage = 40.0
    ///
    /// [generator]
    /// algorithm = "DiamondSquare"
    /// fragmentation = 3
    /// ```
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    pub fn from_toml_str(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Задаёт метод интерполяции числовым кодом (0 — билинейная, 1 — бикубическая).
    /// Код проверяется всегда, но применяется только к value noise.
    pub fn set_interpolation_code(&mut self, code: u8) -> Result<()> {
        let method = InterpolationMethod::try_from(code)?;
        if let GeneratorSettings::ValueNoise(settings) = &mut self.generator {
            settings.interpolation = method;
        }
        Ok(())
    }
}

fn default_size() -> usize {
    512
}
fn default_land_percentage() -> f64 {
    30.0
}
fn default_river_threshold() -> u32 {
    crate::rivers::RIVER_THRESHOLD
}

impl Default for MapGenerationParams {
    fn default() -> Self {
        Self {
            seed: 0,
            size: 512,
            land_percentage: 30.0,
            rivers: false,
            river_threshold: crate::rivers::RIVER_THRESHOLD,
            generator: GeneratorSettings::default(),
            colors: MapColors::default(),
        }
    }
}
