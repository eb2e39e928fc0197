use tracing::{debug, trace};

use crate::config::DiamondSquareSettings;
use crate::error::{MapGenError, Result};
use crate::grid::{Grid, Heightmap, wrap};
use crate::random::Lcg;

/// Фрактальный diamond-square на торе.
///
/// Размер должен быть степенью двойки: дальний край решётки совпадает с
/// нулевым индексом, поэтому отдельной строки `size + 1` не нужно.
/// Результат нормализуется в `[0, 255]`.
pub fn synthesize_diamond_square(
    seed: u32,
    size: usize,
    settings: &DiamondSquareSettings,
) -> Result<Heightmap> {
    if !size.is_power_of_two() {
        return Err(MapGenError::SizeNotPowerOfTwo(size));
    }
    debug!(
        seed,
        size,
        roughness = settings.roughness,
        fragmentation = settings.fragmentation,
        "synthesizing diamond-square"
    );

    let mut map = subdivide(seed, size, settings);
    map.normalize(0.0, 255.0)?;
    Ok(map.to_heightmap())
}

/// Сами проходы square/diamond без нормализации
fn subdivide(seed: u32, size: usize, settings: &DiamondSquareSettings) -> Grid<f64> {
    let mut rng = Lcg::new(seed);
    let mut map = Grid::filled(size, 0.0);
    map.set(0, 0, rng.next_f64());

    let mut side = size;
    let mut roughness = settings.roughness;
    // Бюджет «плоских» узлов живёт только внутри этого вызова
    let mut flat_steps = settings.fragmentation;

    while side > 1 {
        let half = side / 2;
        let half_i = half as isize;
        trace!(side, roughness, flat_steps, "diamond-square round");

        // Square: центр клетки решётки = среднее четырёх углов
        for x in (0..size).step_by(side) {
            for y in (0..size).step_by(side) {
                if flat_steps > 0 {
                    map.set(x + half, y + half, map.get(0, 0));
                    flat_steps -= 1;
                    continue;
                }
                let x1 = wrap((x + side) as isize, size);
                let y1 = wrap((y + side) as isize, size);
                let average =
                    (map.get(x, y) + map.get(x1, y) + map.get(x, y1) + map.get(x1, y1)) / 4.0;
                map.set(
                    x + half,
                    y + half,
                    average + (rng.next_f64() - 0.5) * roughness,
                );
            }
        }

        // Diamond: середины рёбер = среднее четырёх соседей на расстоянии half
        for x in (0..size).step_by(half) {
            for y in ((x + half) % side..size).step_by(side) {
                if flat_steps > 0 {
                    map.set(x, y, map.get(0, 0));
                    flat_steps -= 1;
                    continue;
                }
                let average = (map.get_wrapped(x, y, -half_i, 0)
                    + map.get_wrapped(x, y, half_i, 0)
                    + map.get_wrapped(x, y, 0, half_i)
                    + map.get_wrapped(x, y, 0, -half_i))
                    / 4.0;
                map.set(x, y, average + (rng.next_f64() - 0.5) * roughness);
            }
        }

        side /= 2;
        roughness /= 2.0;
    }

    map
}
