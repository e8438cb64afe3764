//! The randomness every resolver draws from.
//!
//! Resolvers never reach for a global generator; callers pass a
//! [`RandomSource`]. Production code uses a seeded or OS-seeded `StdRng`;
//! tests use [`ScriptedSource`] to force exact die faces.

use rand::Rng;
use rand::rngs::StdRng;

/// A uniform integer generator.
pub trait RandomSource {
    /// A uniform value in `1..=sides`. `sides` is at least 1.
    fn roll(&mut self, sides: u32) -> u32;

    /// A uniform index in `0..len`. `len` is at least 1.
    fn pick(&mut self, len: usize) -> usize;
}

impl RandomSource for StdRng {
    fn roll(&mut self, sides: u32) -> u32 {
        self.random_range(1..=sides.max(1))
    }

    fn pick(&mut self, len: usize) -> usize {
        self.random_range(0..len.max(1))
    }
}

impl<R: RandomSource + ?Sized> RandomSource for &mut R {
    fn roll(&mut self, sides: u32) -> u32 {
        (**self).roll(sides)
    }

    fn pick(&mut self, len: usize) -> usize {
        (**self).pick(len)
    }
}

/// A source that replays a fixed list of values, cycling when exhausted.
///
/// `roll(sides)` returns the next value clamped into `1..=sides`;
/// `pick(len)` returns the next value modulo `len`. An empty script always
/// yields the lowest result.
#[derive(Debug, Clone, Default)]
pub struct ScriptedSource {
    values: Vec<u32>,
    position: usize,
}

impl ScriptedSource {
    /// Replay `values` in order.
    pub fn new(values: &[u32]) -> Self {
        Self {
            values: values.to_vec(),
            position: 0,
        }
    }

    fn next_value(&mut self) -> Option<u32> {
        if self.values.is_empty() {
            return None;
        }
        let value = self.values[self.position % self.values.len()];
        self.position += 1;
        Some(value)
    }

    /// How many values have been consumed so far.
    pub fn consumed(&self) -> usize {
        self.position
    }
}

impl RandomSource for ScriptedSource {
    fn roll(&mut self, sides: u32) -> u32 {
        self.next_value().unwrap_or(1).clamp(1, sides.max(1))
    }

    fn pick(&mut self, len: usize) -> usize {
        self.next_value().unwrap_or(0) as usize % len.max(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn std_rng_stays_in_range() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..500 {
            let v = rng.roll(6);
            assert!((1..=6).contains(&v));
            assert!(rng.pick(3) < 3);
        }
    }

    #[test]
    fn std_rng_deterministic_with_seed() {
        let mut a = StdRng::seed_from_u64(7);
        let mut b = StdRng::seed_from_u64(7);
        for _ in 0..20 {
            assert_eq!(a.roll(20), b.roll(20));
        }
    }

    #[test]
    fn scripted_replays_and_cycles() {
        let mut src = ScriptedSource::new(&[3, 20, 1]);
        assert_eq!(src.roll(20), 3);
        assert_eq!(src.roll(20), 20);
        assert_eq!(src.roll(20), 1);
        assert_eq!(src.roll(20), 3);
        assert_eq!(src.consumed(), 4);
    }

    #[test]
    fn scripted_clamps_and_wraps() {
        let mut src = ScriptedSource::new(&[20, 0, 7]);
        assert_eq!(src.roll(6), 6);
        assert_eq!(src.roll(6), 1);
        assert_eq!(src.pick(5), 2);
    }

    #[test]
    fn empty_script_yields_minimum() {
        let mut src = ScriptedSource::default();
        assert_eq!(src.roll(20), 1);
        assert_eq!(src.pick(4), 0);
    }
}
