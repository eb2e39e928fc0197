//! Полный конвейер: генератор → порог суши → реки

use serde::Serialize;
use tracing::info;

use crate::cellular::synthesize_cellular_automata;
use crate::config::{GeneratorSettings, MapGenerationParams};
use crate::diamond_square::synthesize_diamond_square;
use crate::error::Result;
use crate::grid::{Heightmap, LandMask};
use crate::rivers::carve_rivers;
use crate::threshold::{mask_above, water_level};
use crate::value_noise::synthesize_value_noise;

/// Результат одного запроса генерации
#[derive(Debug, Clone)]
pub struct GeneratedMap {
    pub algorithm: &'static str,
    pub seed: u32,
    /// Исходная карта высот; у клеточного автомата её нет
    pub heightmap: Option<Heightmap>,
    /// Уровень воды, найденный по доле суши
    pub water_level: Option<u16>,
    pub land: LandMask,
}

/// Краткая сводка для JSON-отчёта
#[derive(Debug, Clone, Serialize)]
pub struct MapReport {
    pub algorithm: String,
    pub seed: u32,
    pub size: usize,
    pub water_level: Option<u16>,
    pub land_cells: usize,
    pub land_ratio: f64,
}

/// Генерирует карту по параметрам.
///
/// Числовые генераторы проходят через порог суши (и вырезание рек, если оно
/// включено). Клеточный автомат сразу выдаёт маску, доля суши к нему не применяется.
pub fn generate_map(params: &MapGenerationParams) -> Result<GeneratedMap> {
    let (heightmap, land, level) = match &params.generator {
        GeneratorSettings::ValueNoise(settings) => {
            let heights = synthesize_value_noise(params.seed, params.size, settings)?;
            let (land, level) = classify(&heights, params);
            (Some(heights), land, Some(level))
        }
        GeneratorSettings::DiamondSquare(settings) => {
            let heights = synthesize_diamond_square(params.seed, params.size, settings)?;
            let (land, level) = classify(&heights, params);
            (Some(heights), land, Some(level))
        }
        GeneratorSettings::CellularAutomata(settings) => (
            None,
            synthesize_cellular_automata(params.seed, params.size, settings),
            None,
        ),
    };

    let map = GeneratedMap {
        algorithm: params.generator.name(),
        seed: params.seed,
        heightmap,
        water_level: level,
        land,
    };
    info!(
        algorithm = map.algorithm,
        seed = map.seed,
        size = params.size,
        land_cells = map.land.count(&true),
        "map generated"
    );
    Ok(map)
}

fn classify(heights: &Heightmap, params: &MapGenerationParams) -> (LandMask, u16) {
    let level = water_level(heights, params.land_percentage);
    let land = if params.rivers {
        carve_rivers(heights, level, params.river_threshold)
    } else {
        mask_above(heights, level)
    };
    (land, level)
}

impl GeneratedMap {
    #[must_use]
    pub fn report(&self) -> MapReport {
        let land_cells = self.land.count(&true);
        let total = self.land.data.len();
        MapReport {
            algorithm: self.algorithm.to_string(),
            seed: self.seed,
            size: self.land.size,
            water_level: self.water_level,
            land_cells,
            land_ratio: if total == 0 {
                0.0
            } else {
                land_cells as f64 / total as f64
            },
        }
    }
}

impl MapReport {
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
