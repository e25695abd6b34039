//! Injectable randomness.
//!
//! Every random decision the simulator makes (which action, which participant,
//! which topic, which tone line, how long to wait) goes through a
//! [`RandomSource`]. Production code uses [`StdRandom`]; tests script the exact
//! sequence of draws with [`ScriptedRandom`].
//!
//! The free functions in this module are the choice primitives built on top of
//! the two raw draws a source provides.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::VecDeque;

/// A source of uniform draws.
pub trait RandomSource: Send {
    /// Uniform index in `0..len`. Callers never pass `len == 0`.
    fn index(&mut self, len: usize) -> usize;

    /// Uniform float in `[0, 1)`.
    fn unit(&mut self) -> f64;
}

impl<R: RandomSource + ?Sized> RandomSource for Box<R> {
    fn index(&mut self, len: usize) -> usize {
        (**self).index(len)
    }

    fn unit(&mut self) -> f64 {
        (**self).unit()
    }
}

/// `rand`-backed source.
pub struct StdRandom {
    rng: StdRng,
}

impl StdRandom {
    /// Seeded from the operating system.
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }

    /// Deterministic stream; the same seed replays the same run.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// `0` means "no seed configured".
    pub fn from_config_seed(seed: u64) -> Self {
        if seed == 0 {
            Self::from_entropy()
        } else {
            Self::seeded(seed)
        }
    }
}

impl RandomSource for StdRandom {
    fn index(&mut self, len: usize) -> usize {
        if len <= 1 {
            return 0;
        }
        self.rng.random_range(0..len)
    }

    fn unit(&mut self) -> f64 {
        self.rng.random::<f64>()
    }
}

/// Replays pre-recorded draws. Once a queue runs dry it yields `0` / `0.0`.
///
/// Index draws are reduced modulo `len`, so a script stays valid when a pool
/// shrinks.
#[derive(Debug, Default, Clone)]
pub struct ScriptedRandom {
    indices: VecDeque<usize>,
    units: VecDeque<f64>,
}

impl ScriptedRandom {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_indices(mut self, indices: impl IntoIterator<Item = usize>) -> Self {
        self.indices.extend(indices);
        self
    }

    pub fn with_units(mut self, units: impl IntoIterator<Item = f64>) -> Self {
        self.units.extend(units);
        self
    }

    /// True when every scripted draw has been consumed.
    pub fn is_exhausted(&self) -> bool {
        self.indices.is_empty() && self.units.is_empty()
    }
}

impl RandomSource for ScriptedRandom {
    fn index(&mut self, len: usize) -> usize {
        match self.indices.pop_front() {
            Some(i) if len > 0 => i % len,
            _ => 0,
        }
    }

    fn unit(&mut self) -> f64 {
        self.units
            .pop_front()
            .map(|u| u.clamp(0.0, 1.0 - f64::EPSILON))
            .unwrap_or(0.0)
    }
}

/// Uniformly pick one element. `None` on an empty slice.
pub fn choose<'a, T>(rng: &mut dyn RandomSource, items: &'a [T]) -> Option<&'a T> {
    if items.is_empty() {
        return None;
    }
    items.get(rng.index(items.len()))
}

/// Pick an index with probability proportional to its weight.
///
/// Zero-weight entries are never returned. `None` when every weight is zero.
pub fn weighted_index(rng: &mut dyn RandomSource, weights: &[u32]) -> Option<usize> {
    let total: u64 = weights.iter().map(|w| u64::from(*w)).sum();
    if total == 0 {
        return None;
    }
    let target = rng.unit() * total as f64;
    let mut cumulative = 0.0;
    let mut last_nonzero = None;
    for (i, w) in weights.iter().enumerate() {
        if *w == 0 {
            continue;
        }
        cumulative += f64::from(*w);
        last_nonzero = Some(i);
        if target < cumulative {
            return Some(i);
        }
    }
    // Float rounding at the very top of the range.
    last_nonzero
}

/// Uniform float in `[lo, hi]`. A degenerate or inverted range yields `lo`.
pub fn uniform_between(rng: &mut dyn RandomSource, lo: f64, hi: f64) -> f64 {
    if hi <= lo {
        return lo;
    }
    lo + rng.unit() * (hi - lo)
}

/// Two distinct indices in `0..len`, sampled without replacement.
pub fn sample_two_distinct(rng: &mut dyn RandomSource, len: usize) -> Option<(usize, usize)> {
    if len < 2 {
        return None;
    }
    let first = rng.index(len);
    let mut second = rng.index(len - 1);
    if second >= first {
        second += 1;
    }
    Some((first, second))
}

/// Fisher-Yates shuffle driven by the given source.
pub fn shuffle<T>(rng: &mut dyn RandomSource, items: &mut [T]) {
    for i in (1..items.len()).rev() {
        let j = rng.index(i + 1);
        items.swap(i, j);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weighted_index_boundaries() {
        // weights 4:4:2:2, total 12
        let weights = [4, 4, 2, 2];
        let mut rng = ScriptedRandom::new().with_units([0.0, 0.34, 0.67, 0.99]);
        assert_eq!(weighted_index(&mut rng, &weights), Some(0));
        assert_eq!(weighted_index(&mut rng, &weights), Some(1));
        assert_eq!(weighted_index(&mut rng, &weights), Some(2));
        assert_eq!(weighted_index(&mut rng, &weights), Some(3));
    }

    #[test]
    fn test_weighted_index_skips_zero_weights() {
        let mut rng = ScriptedRandom::new().with_units([0.0, 0.5, 0.99]);
        for _ in 0..3 {
            assert_eq!(weighted_index(&mut rng, &[0, 3, 0]), Some(1));
        }
    }

    #[test]
    fn test_weighted_index_all_zero() {
        let mut rng = ScriptedRandom::new();
        assert_eq!(weighted_index(&mut rng, &[0, 0]), None);
        assert_eq!(weighted_index(&mut rng, &[]), None);
    }

    #[test]
    fn test_sample_two_distinct_never_repeats() {
        let mut rng = StdRandom::seeded(7);
        for _ in 0..500 {
            let (a, b) = sample_two_distinct(&mut rng, 3).unwrap();
            assert_ne!(a, b);
            assert!(a < 3 && b < 3);
        }
    }

    #[test]
    fn test_sample_two_distinct_pool_of_two() {
        // Both scripted draws point at index 0; the second must be shifted past it.
        let mut rng = ScriptedRandom::new().with_indices([0, 0]);
        assert_eq!(sample_two_distinct(&mut rng, 2), Some((0, 1)));
        let mut rng = ScriptedRandom::new().with_indices([1, 0]);
        assert_eq!(sample_two_distinct(&mut rng, 2), Some((1, 0)));
    }

    #[test]
    fn test_sample_two_distinct_too_small() {
        let mut rng = ScriptedRandom::new();
        assert_eq!(sample_two_distinct(&mut rng, 1), None);
    }

    #[test]
    fn test_uniform_between_range() {
        let mut rng = ScriptedRandom::new().with_units([0.0, 0.5]);
        assert_eq!(uniform_between(&mut rng, 120.0, 360.0), 120.0);
        assert_eq!(uniform_between(&mut rng, 120.0, 360.0), 240.0);
        assert_eq!(uniform_between(&mut rng, 5.0, 5.0), 5.0);
    }

    #[test]
    fn test_seeded_sources_agree() {
        let mut a = StdRandom::seeded(42);
        let mut b = StdRandom::seeded(42);
        for _ in 0..32 {
            assert_eq!(a.index(1000), b.index(1000));
            assert_eq!(a.unit(), b.unit());
        }
    }

    #[test]
    fn test_shuffle_is_permutation() {
        let mut items: Vec<u32> = (0..10).collect();
        shuffle(&mut StdRandom::seeded(3), &mut items);
        let mut sorted = items.clone();
        sorted.sort();
        assert_eq!(sorted, (0..10).collect::<Vec<_>>());
    }
}
