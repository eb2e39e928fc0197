use tracing::debug;

use crate::grid::{Grid, Heightmap, LandMask};

/// Число клеток для каждого значения от 0 до максимума карты
#[must_use]
pub fn histogram(heightmap: &Heightmap) -> Vec<usize> {
    let Ok((_, max)) = heightmap.value_range() else {
        return Vec::new();
    };
    let mut counts = vec![0; usize::from(max) + 1];
    for &v in &heightmap.data {
        counts[usize::from(v)] += 1;
    }
    counts
}

/// Уровень воды для заданной доли суши (в процентах).
///
/// Идём по гистограмме снизу вверх; первое значение, на котором накопленное
/// число клеток превышает бюджет воды, и есть уровень. Если бюджет не
/// превышен ни на одном значении (0 % суши), уровень на единицу выше максимума.
#[must_use]
pub fn water_level(heightmap: &Heightmap, land_percentage: f64) -> u16 {
    let histogram = histogram(heightmap);
    let total = heightmap.data.len() as f64;
    let water_budget = ((100.0 - land_percentage) / 100.0 * total).floor();

    let mut sum = 0usize;
    for (level, &count) in histogram.iter().enumerate() {
        sum += count;
        if sum as f64 > water_budget {
            return level as u16;
        }
    }
    histogram.len() as u16
}

/// Маска суши: клетка суша, если её значение не ниже уровня воды
#[must_use]
pub fn classify_land(heightmap: &Heightmap, land_percentage: f64) -> LandMask {
    let level = water_level(heightmap, land_percentage);
    debug!(land_percentage, level, "classifying land");
    mask_above(heightmap, level)
}

pub(crate) fn mask_above(heightmap: &Heightmap, level: u16) -> LandMask {
    Grid {
        size: heightmap.size,
        data: heightmap
            .data
            .iter()
            .map(|&v| u16::from(v) >= level)
            .collect(),
    }
}
