//! Uniform random selection.

use std::sync::Mutex;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Source of uniform choices.
pub trait Selector: Send + Sync + std::fmt::Debug {
    /// Return an index in `0..len`. Only called with `len > 0`.
    fn pick(&self, len: usize) -> usize;
}

/// Pick one element of `items` uniformly, or `None` when empty.
pub fn choose<'a, T>(selector: &dyn Selector, items: &'a [T]) -> Option<&'a T> {
    if items.is_empty() {
        return None;
    }
    items.get(selector.pick(items.len()))
}

/// Thread-local RNG; the default for serving.
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadRngSelector;

impl Selector for ThreadRngSelector {
    fn pick(&self, len: usize) -> usize {
        rand::thread_rng().gen_range(0..len)
    }
}

/// Deterministic selector for reproducible runs.
#[derive(Debug)]
pub struct SeededSelector {
    rng: Mutex<StdRng>,
}

impl SeededSelector {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl Selector for SeededSelector {
    fn pick(&self, len: usize) -> usize {
        let mut rng = self.rng.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        rng.gen_range(0..len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_choose_empty() {
        let items: [u8; 0] = [];
        assert_eq!(choose(&ThreadRngSelector, &items), None);
    }

    #[test]
    fn test_pick_in_range() {
        let selector = ThreadRngSelector;
        for len in 1..20 {
            assert!(selector.pick(len) < len);
        }
    }

    #[test]
    fn test_seeded_is_reproducible() {
        let a = SeededSelector::new(7);
        let b = SeededSelector::new(7);
        let seq_a: Vec<_> = (0..32).map(|_| a.pick(10)).collect();
        let seq_b: Vec<_> = (0..32).map(|_| b.pick(10)).collect();
        assert_eq!(seq_a, seq_b);
    }

    #[test]
    fn test_seeded_covers_range() {
        let selector = SeededSelector::new(42);
        let mut seen = [false; 4];
        for _ in 0..1000 {
            seen[selector.pick(4)] = true;
        }
        assert!(seen.iter().all(|s| *s));
    }
}
