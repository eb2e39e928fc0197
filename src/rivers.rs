use std::cmp::Reverse;

use tracing::debug;

use crate::grid::{FlowMap, Grid, Heightmap, LandMask, wrap};
use crate::threshold::water_level;

/// Накопленный поток, начиная с которого клетка суши становится рекой
pub const RIVER_THRESHOLD: u32 = 15;

/// Порядок обхода соседей: NW, NE, SE, SW, W, N, E, S.
/// При равном перепаде побеждает сосед, просмотренный позже.
const DIRECTIONS: [(isize, isize); 8] = [
    (-1, -1),
    (1, -1),
    (1, 1),
    (-1, 1),
    (-1, 0),
    (0, -1),
    (1, 0),
    (0, 1),
];

/// Накопление потока по наискорейшему спуску на торе.
///
/// Клетки обрабатываются от высоты 255 вниз до `water_level`, внутри одного
/// уровня — построчно. Каждая клетка добавляет свой текущий поток соседу с
/// наибольшим неотрицательным перепадом (или себе, если все соседи выше).
/// У источника поток не вычитается, поэтому сумма по карте только растёт.
#[must_use]
pub fn accumulate_river_flow(heightmap: &Heightmap, water_level: u16) -> FlowMap {
    let size = heightmap.size;
    let mut flow = Grid::filled(size, 1u32);

    // Сортируем индексы от вершин к низинам (сортировка устойчива,
    // так что внутри уровня сохраняется построчный порядок)
    let mut indices: Vec<usize> = (0..heightmap.data.len())
        .filter(|&idx| u16::from(heightmap.data[idx]) >= water_level)
        .collect();
    indices.sort_by_key(|&idx| Reverse(heightmap.data[idx]));

    for &idx in &indices {
        let (x, y) = (idx / size, idx % size);
        let elevation = i16::from(heightmap.data[idx]);

        let mut biggest_drop = 0;
        let mut target = (x, y);
        for &(dx, dy) in &DIRECTIONS {
            let nx = wrap(x as isize + dx, size);
            let ny = wrap(y as isize + dy, size);
            let drop = elevation - i16::from(heightmap.get(nx, ny));
            if drop >= biggest_drop {
                biggest_drop = drop;
                target = (nx, ny);
            }
        }

        let target_idx = flow.index(target.0, target.1);
        flow.data[target_idx] = flow.data[target_idx].saturating_add(flow.data[idx]);
    }

    debug!(water_level, routed = indices.len(), "river flow accumulated");
    flow
}

/// Маска суши с вырезанными реками для заданной доли суши
#[must_use]
pub fn classify_land_with_rivers(heightmap: &Heightmap, land_percentage: f64) -> LandMask {
    let level = water_level(heightmap, land_percentage);
    carve_rivers(heightmap, level, RIVER_THRESHOLD)
}

/// Суша — клетка не ниже уровня воды, через которую прошло меньше
/// `river_threshold` потока
#[must_use]
pub fn carve_rivers(heightmap: &Heightmap, water_level: u16, river_threshold: u32) -> LandMask {
    let flow = accumulate_river_flow(heightmap, water_level);
    Grid {
        size: heightmap.size,
        data: heightmap
            .data
            .iter()
            .zip(&flow.data)
            .map(|(&v, &f)| u16::from(v) >= water_level && f < river_threshold)
            .collect(),
    }
}
