use crate::error::{MapGenError, Result};

/// Квадратная сетка `size × size`, индексы `[x][y]`: `x` — строка, `y` — столбец.
///
/// Хранение построчное (`x * size + y`). Каждый вызов генерации возвращает
/// собственную сетку и больше её не трогает.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid<T> {
    pub size: usize,
    pub data: Vec<T>,
}

/// Карта высот: значения от 0 (дно) до 255 (вершины)
pub type Heightmap = Grid<u8>;
/// Маска суши: `true` — суша, `false` — вода
pub type LandMask = Grid<bool>;
/// Накопленный поток для каждой клетки
pub type FlowMap = Grid<u32>;

impl<T: Clone> Grid<T> {
    /// Сетка, в которой каждая клетка равна `value`
    pub fn filled(size: usize, value: T) -> Self {
        Self {
            size,
            data: vec![value; size * size],
        }
    }
}

impl<T> Grid<T> {
    pub fn from_fn(size: usize, mut f: impl FnMut(usize, usize) -> T) -> Self {
        let mut data = Vec::with_capacity(size * size);
        for x in 0..size {
            for y in 0..size {
                data.push(f(x, y));
            }
        }
        Self { size, data }
    }

    #[inline]
    pub fn index(&self, x: usize, y: usize) -> usize {
        x * self.size + y
    }

    #[inline]
    pub fn set(&mut self, x: usize, y: usize, value: T) {
        let idx = self.index(x, y);
        self.data[idx] = value;
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Количество клеток, равных `value`
    pub fn count(&self, value: &T) -> usize
    where
        T: PartialEq,
    {
        self.data.iter().filter(|&v| v == value).count()
    }
}

impl<T: Copy> Grid<T> {
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> T {
        self.data[x * self.size + y]
    }

    /// Значение соседа со смещением `(dx, dy)` с заворачиванием по тору
    #[inline]
    pub fn get_wrapped(&self, x: usize, y: usize, dx: isize, dy: isize) -> T {
        let nx = wrap(x as isize + dx, self.size);
        let ny = wrap(y as isize + dy, self.size);
        self.get(nx, ny)
    }
}

impl<T: Copy + PartialOrd> Grid<T> {
    /// Минимум и максимум по всем клеткам. Ошибка только для пустой сетки.
    pub fn value_range(&self) -> Result<(T, T)> {
        let (&first, rest) = self.data.split_first().ok_or(MapGenError::EmptyGrid)?;
        Ok(rest.iter().fold((first, first), |(min, max), &v| {
            (
                if v < min { v } else { min },
                if v > max { v } else { max },
            )
        }))
    }
}

impl Grid<f64> {
    /// Линейно переводит значения из текущего диапазона в `[new_min, new_max]`
    /// с округлением до целого. Плоская сетка целиком становится `new_min`.
    pub fn normalize(&mut self, new_min: f64, new_max: f64) -> Result<()> {
        let (min, max) = self.value_range()?;
        let range = max - min;
        let new_range = new_max - new_min;

        for v in &mut self.data {
            *v = if range == 0.0 {
                new_min
            } else {
                round_half_up((*v - min) / range * new_range + new_min)
            };
        }
        Ok(())
    }

    /// Рабочая сетка → карта высот (значения зажимаются в `0..=255`)
    #[must_use]
    pub fn to_heightmap(&self) -> Heightmap {
        Grid {
            size: self.size,
            data: self
                .data
                .iter()
                .map(|&v| round_half_up(v).clamp(0.0, 255.0) as u8)
                .collect(),
        }
    }
}

/// Тороидальный индекс: выход за край возвращает на противоположную сторону
#[inline]
#[must_use]
pub fn wrap(index: isize, size: usize) -> usize {
    index.rem_euclid(size as isize) as usize
}

/// Округление «половина вверх»: 0.5 → 1, -0.5 → 0
#[inline]
pub(crate) fn round_half_up(v: f64) -> f64 {
    (v + 0.5).floor()
}
