//! Детерминированный генератор последовательности (линейный конгруэнтный)

const MULTIPLIER: u64 = 9301;
const INCREMENT: u64 = 49297;
const MODULUS: u64 = 233_280;

/// Линейный конгруэнтный генератор: одинаковый сид даёт одинаковый поток.
///
/// Каждый вызов генерации создаёт свой экземпляр, общего состояния нет.
#[derive(Debug, Clone)]
pub struct Lcg {
    state: u64,
}

impl Lcg {
    #[must_use]
    pub fn new(seed: u32) -> Self {
        Self {
            state: u64::from(seed),
        }
    }

    /// Следующее значение в `[0, 1)`
    pub fn next_f64(&mut self) -> f64 {
        self.state = (MULTIPLIER * self.state + INCREMENT) % MODULUS;
        self.state as f64 / MODULUS as f64
    }
}
