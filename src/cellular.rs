use tracing::debug;

use crate::config::CellularAutomataSettings;
use crate::grid::{Grid, LandMask};
use crate::random::Lcg;

/// Окно 3×3 вокруг клетки, включая её саму
const WINDOW: [(isize, isize); 9] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 0),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Карта суши клеточным автоматом.
///
/// Клетка изначально суша, если очередное случайное число меньше
/// `initial_density`. На каждой итерации новая сетка строится по старой:
/// клетка становится водой, если в её тороидальном окне 3×3 водных клеток
/// не меньше `death_threshold`, иначе сушей.
#[must_use]
pub fn synthesize_cellular_automata(
    seed: u32,
    size: usize,
    settings: &CellularAutomataSettings,
) -> LandMask {
    let CellularAutomataSettings {
        iterations,
        death_threshold,
        initial_density,
    } = *settings;
    debug!(seed, size, iterations, death_threshold, initial_density, "running cellular automata");

    let mut rng = Lcg::new(seed);
    let mut grid = Grid::from_fn(size, |_, _| rng.next_f64() < initial_density);

    for _ in 0..iterations {
        grid = relax(&grid, death_threshold);
    }

    debug!(land = grid.count(&true), "cellular automata done");
    grid
}

/// Один проход правила большинства. Читаемая сетка не изменяется.
fn relax(grid: &LandMask, death_threshold: u8) -> LandMask {
    Grid::from_fn(grid.size, |x, y| {
        let dead = WINDOW
            .iter()
            .filter(|&&(dx, dy)| !grid.get_wrapped(x, y, dx, dy))
            .count();
        dead < usize::from(death_threshold)
    })
}
