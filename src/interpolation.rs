//! Стратегии восстановления октавы из разреженной контрольной сетки
//!
//! Контрольная сетка октавы `k` — это левый верхний блок базового слоя
//! размером `size / 2^k`, разнесённый по решётке с шагом `2^k`. Обе стратегии
//! заполняют промежутки и заворачивают дальний край на индекс 0.

use serde::{Deserialize, Serialize};

use crate::error::{MapGenError, Result};
use crate::grid::{Grid, round_half_up, wrap};

/// Метод интерполяции между узлами контрольной сетки
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum InterpolationMethod {
    /// Рекурсивное усреднение середин (код 0)
    Bilinear,
    /// Четырёхточечная кубическая интерполяция по двум осям (код 1)
    #[default]
    Bicubic,
}

impl TryFrom<u8> for InterpolationMethod {
    type Error = MapGenError;

    fn try_from(code: u8) -> Result<Self> {
        match code {
            0 => Ok(Self::Bilinear),
            1 => Ok(Self::Bicubic),
            other => Err(MapGenError::UnsupportedInterpolation(other)),
        }
    }
}

impl InterpolationMethod {
    /// Восстанавливает полноразмерный слой октавы `octave` из базового слоя
    pub fn reconstruct(self, base: &Grid<f64>, octave: u32) -> Result<Grid<f64>> {
        match self {
            Self::Bilinear => bilinear(base, octave),
            Self::Bicubic => bicubic(base, octave),
        }
    }
}

/// Шаг решётки октавы; ошибка, если размер на него не делится
pub fn octave_stride(size: usize, octave: u32) -> Result<usize> {
    1usize
        .checked_shl(octave)
        .filter(|&stride| size > 0 && size % stride == 0)
        .ok_or(MapGenError::SizeNotDivisible { size, octave })
}

fn control_lattice(base: &Grid<f64>, stride: usize) -> Grid<f64> {
    let size = base.size;
    let mut layer = Grid::filled(size, 0.0);
    for x in 0..size / stride {
        for y in 0..size / stride {
            layer.set(stride * x, stride * y, base.get(x, y));
        }
    }
    layer
}

/// Билинейное восстановление: на каждом шаге расстояние между известными
/// узлами делится пополам, середины берутся как округлённые средние.
pub fn bilinear(base: &Grid<f64>, octave: u32) -> Result<Grid<f64>> {
    let size = base.size;
    let ratio = octave_stride(size, octave)?;
    let mut layer = control_lattice(base, ratio);

    let mut distance = ratio / 2;
    while distance > 0 {
        let step = distance * 2;
        for x in (0..size).step_by(step) {
            for y in (0..size).step_by(step) {
                let x1 = wrap((x + step) as isize, size);
                let y1 = wrap((y + step) as isize, size);

                let corner = layer.get(x, y);
                let right = layer.get(x, y1);
                let below = layer.get(x1, y);
                let diagonal = layer.get(x1, y1);

                layer.set(x, y + distance, round_half_up((corner + right) / 2.0));
                layer.set(x + distance, y, round_half_up((corner + below) / 2.0));
                layer.set(
                    x + distance,
                    y + distance,
                    round_half_up((corner + right + below + diagonal) / 4.0),
                );
            }
        }
        distance /= 2;
    }

    Ok(layer)
}

/// `p·t³ + q·t² + r·t + s` по четырём контрольным значениям `a, b, c, d`
/// (до, в точке, после, через одну после). При `t = 0` даёт ровно `b`.
#[inline]
#[must_use]
pub fn cubic(a: f64, b: f64, c: f64, d: f64, t: f64) -> f64 {
    let p = d - c - (a - b);
    let q = a - b - p;
    let r = c - a;
    let s = b;
    p * t.powi(3) + q * t.powi(2) + r * t + s
}

/// Бикубическое восстановление: сначала вдоль `x` по узлам контрольной
/// решётки, затем вдоль `y` по уже полученным столбцам. Значения не
/// округляются и могут выходить за диапазон базового слоя.
pub fn bicubic(base: &Grid<f64>, octave: u32) -> Result<Grid<f64>> {
    let size = base.size;
    let scale = octave_stride(size, octave)?;
    let base_size = size / scale;
    let mut layer = Grid::filled(size, 0.0);

    // 1. Вдоль x: только столбцы решётки (y кратен scale)
    for base_x in 0..base_size {
        let a = wrap(base_x as isize - 1, base_size);
        let c = wrap(base_x as isize + 1, base_size);
        let d = wrap(base_x as isize + 2, base_size);

        for base_y in 0..base_size {
            layer.set(base_x * scale, base_y * scale, base.get(base_x, base_y));
            for x in 1..scale {
                let t = x as f64 / scale as f64;
                layer.set(
                    base_x * scale + x,
                    base_y * scale,
                    cubic(
                        base.get(a, base_y),
                        base.get(base_x, base_y),
                        base.get(c, base_y),
                        base.get(d, base_y),
                        t,
                    ),
                );
            }
        }
    }

    // 2. Вдоль y: промежуточные столбцы по уже заполненным
    let scale_i = scale as isize;
    for y in (0..size).step_by(scale) {
        let a = wrap(y as isize - scale_i, size);
        let c = wrap(y as isize + scale_i, size);
        let d = wrap(y as isize + 2 * scale_i, size);

        for x in 0..size {
            for j in 1..scale {
                let t = j as f64 / scale as f64;
                let value = cubic(
                    layer.get(x, a),
                    layer.get(x, y),
                    layer.get(x, c),
                    layer.get(x, d),
                    t,
                );
                layer.set(x, y + j, value);
            }
        }
    }

    Ok(layer)
}
