use tracing::debug;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::config::ValueNoiseSettings;
use crate::error::{MapGenError, Result};
use crate::grid::{Grid, Heightmap, round_half_up};
use crate::interpolation::octave_stride;
use crate::random::Lcg;

/// Верхняя граница (не включительно) значений базового слоя
const BASE_LIMIT: f64 = 255.0;

/// Базовый слой 0: целые `floor(next * 255)`, построчно
#[must_use]
pub fn base_layer(seed: u32, size: usize) -> Grid<f64> {
    let mut rng = Lcg::new(seed);
    Grid::from_fn(size, |_, _| (rng.next_f64() * BASE_LIMIT).floor())
}

/// Многооктавный value noise.
///
/// Слой `k` — базовый слой, восстановленный с шагом `2^k` выбранной
/// интерполяцией. Слои `first_octave - 1 ..= last_octave - 1` смешиваются с
/// весами `1, 2, 4, …` и делятся на сумму весов `2^octaves - 1`.
pub fn synthesize_value_noise(
    seed: u32,
    size: usize,
    settings: &ValueNoiseSettings,
) -> Result<Heightmap> {
    let ValueNoiseSettings {
        first_octave,
        last_octave,
        interpolation,
    } = *settings;

    // === 1. Проверка конфигурации до любых аллокаций ===
    if first_octave == 0 || first_octave > last_octave {
        return Err(MapGenError::InvalidOctaveRange {
            first: first_octave,
            last: last_octave,
        });
    }
    if size == 0 {
        return Err(MapGenError::EmptyGrid);
    }
    // Размер должен делиться на 2^last_octave
    octave_stride(size, last_octave)?;

    debug!(seed, size, first_octave, last_octave, ?interpolation, "synthesizing value noise");

    // === 2. Слои октав ===
    let base = base_layer(seed, size);
    let layers = ((first_octave - 1)..last_octave)
        .map(|octave| {
            if octave == 0 {
                Ok(base.clone())
            } else {
                interpolation.reconstruct(&base, octave)
            }
        })
        .collect::<Result<Vec<_>>>()?;

    // === 3. Смешивание ===
    let weights: Vec<f64> = (0..layers.len()).map(|i| 2f64.powi(i as i32)).collect();
    let sum_of_weights = 2f64.powi(layers.len() as i32) - 1.0;

    let blend = |idx: usize| -> u8 {
        let sum: f64 = layers
            .iter()
            .zip(&weights)
            .map(|(layer, weight)| layer.data[idx] * weight)
            .sum();
        round_half_up(sum / sum_of_weights).clamp(0.0, 255.0) as u8
    };

    #[cfg(feature = "parallel")]
    let data: Vec<u8> = (0..size * size).into_par_iter().map(blend).collect();
    #[cfg(not(feature = "parallel"))]
    let data: Vec<u8> = (0..size * size).map(blend).collect();

    debug!(layers = layers.len(), "value noise done");
    Ok(Grid { size, data })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interpolation::{InterpolationMethod, bilinear};

    fn settings(first: u32, last: u32, interpolation: InterpolationMethod) -> ValueNoiseSettings {
        ValueNoiseSettings {
            first_octave: first,
            last_octave: last,
            interpolation,
        }
    }

    #[test]
    fn base_layer_stays_below_limit() {
        let base = base_layer(7, 32);
        assert!(base.data.iter().all(|&v| (0.0..255.0).contains(&v) && v.fract() == 0.0));
    }

    #[test]
    fn identical_inputs_give_identical_maps() {
        for method in [InterpolationMethod::Bilinear, InterpolationMethod::Bicubic] {
            let a = synthesize_value_noise(99, 64, &settings(1, 5, method)).unwrap();
            let b = synthesize_value_noise(99, 64, &settings(1, 5, method)).unwrap();
            assert_eq!(a, b);
        }
    }

    #[test]
    fn different_seeds_differ() {
        let s = settings(1, 4, InterpolationMethod::Bilinear);
        let a = synthesize_value_noise(1, 32, &s).unwrap();
        let b = synthesize_value_noise(2, 32, &s).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn single_octave_equals_its_reconstructed_layer() {
        let s = settings(3, 3, InterpolationMethod::Bilinear);
        let map = synthesize_value_noise(5, 32, &s).unwrap();
        let expected = bilinear(&base_layer(5, 32), 2).unwrap().to_heightmap();
        assert_eq!(map, expected);
    }

    #[test]
    fn first_octave_alone_is_the_base_layer() {
        let s = settings(1, 1, InterpolationMethod::Bicubic);
        let map = synthesize_value_noise(11, 16, &s).unwrap();
        assert_eq!(map, base_layer(11, 16).to_heightmap());
    }

    #[test]
    fn invalid_octave_range_is_rejected() {
        let s = settings(0, 3, InterpolationMethod::Bilinear);
        assert!(matches!(
            synthesize_value_noise(0, 32, &s),
            Err(MapGenError::InvalidOctaveRange { first: 0, last: 3 })
        ));
        let s = settings(4, 2, InterpolationMethod::Bilinear);
        assert!(synthesize_value_noise(0, 32, &s).is_err());
    }

    #[test]
    fn last_octave_is_capped_by_power_of_two_factor() {
        // 48 = 16 · 3: старшая степень двойки — 4
        let ok = settings(1, 4, InterpolationMethod::Bicubic);
        assert!(synthesize_value_noise(0, 48, &ok).is_ok());
        let bad = settings(5, 5, InterpolationMethod::Bicubic);
        assert!(matches!(
            synthesize_value_noise(0, 48, &bad),
            Err(MapGenError::SizeNotDivisible { size: 48, octave: 5 })
        ));
    }

    #[test]
    fn last_octave_equal_to_log_size_is_rejected() {
        let s = settings(1, 5, InterpolationMethod::Bilinear);
        assert!(matches!(
            synthesize_value_noise(0, 16, &s),
            Err(MapGenError::SizeNotDivisible { size: 16, octave: 5 })
        ));
        let s = settings(1, 4, InterpolationMethod::Bilinear);
        assert!(synthesize_value_noise(0, 16, &s).is_ok());
    }
}
