use std::sync::atomic::{AtomicU64, Ordering};

/// Simple seedable PRNG (PCG output step).
///
/// Shared by board generation and the agent's random-move choice so
/// that both are reproducible from a seed in tests.
pub struct SimpleRng {
    state: u64,
}

impl Default for SimpleRng {
    fn default() -> Self {
        Self::new()
    }
}

impl SimpleRng {
    /// Create a generator seeded from the OS entropy source.
    pub fn new() -> Self {
        let mut seed_bytes = [0u8; 8];
        if getrandom::getrandom(&mut seed_bytes).is_err() {
            // Fallback: a static counter if getrandom fails
            static COUNTER: AtomicU64 = AtomicU64::new(1);
            seed_bytes = COUNTER.fetch_add(1, Ordering::Relaxed).to_le_bytes();
        }
        Self::with_seed(u64::from_le_bytes(seed_bytes))
    }

    /// Create a generator with a specific seed for reproducibility.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            state: seed.wrapping_add(1),
        }
    }

    pub fn next_u64(&mut self) -> u64 {
        self.state = self
            .state
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        let xorshifted = (((self.state >> 18) ^ self.state) >> 27) as u32;
        let rot = (self.state >> 59) as u32;
        u64::from(xorshifted.rotate_right(rot))
    }

    /// A value in `0..bound`. `bound` must be non-zero.
    pub fn next_usize(&mut self, bound: usize) -> usize {
        (self.next_u64() as usize) % bound
    }

    /// A uniformly chosen element of `items`, or `None` if empty.
    pub fn choose<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        if items.is_empty() {
            None
        } else {
            Some(&items[self.next_usize(items.len())])
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_sequence() {
        let mut a = SimpleRng::with_seed(42);
        let mut b = SimpleRng::with_seed(42);
        for _ in 0..100 {
            assert_eq!(a.next_u64(), b.next_u64());
        }
    }

    #[test]
    fn next_usize_stays_in_bound() {
        let mut rng = SimpleRng::with_seed(7);
        for _ in 0..1000 {
            assert!(rng.next_usize(13) < 13);
        }
    }

    #[test]
    fn choose_empty_is_none() {
        let mut rng = SimpleRng::with_seed(1);
        let empty: [u8; 0] = [];
        assert!(rng.choose(&empty).is_none());
        assert_eq!(rng.choose(&[5]), Some(&5));
    }
}
