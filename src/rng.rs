//! Deterministic PRNG for target selection.
//!
//! The bot picks random border and fog targets. A seeded xorshift64 keeps
//! whole sessions reproducible from the seed in the config.

/// Deterministic PRNG using xorshift64.
#[derive(Debug, Clone, Copy)]
pub struct Rng {
    state: u64,
}

impl Rng {
    /// Create a new RNG with the given seed.
    #[must_use]
    pub const fn new(seed: u64) -> Self {
        // Ensure non-zero state
        let state = if seed == 0 { 0x5555_5555_5555_5555 } else { seed };
        Self { state }
    }

    /// Generate next random u64.
    pub fn next_u64(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.state = x;
        x
    }

    /// Generate random index in [0, len). Returns 0 when `len` is 0.
    #[allow(clippy::cast_possible_truncation)]
    pub fn next_index(&mut self, len: usize) -> usize {
        if len == 0 {
            return 0;
        }
        // The remainder is below `len`, so it fits back into usize.
        (self.next_u64() % len as u64) as usize
    }

    /// Pick a random element of a slice.
    pub fn choose<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        if items.is_empty() {
            None
        } else {
            items.get(self.next_index(items.len()))
        }
    }
}
