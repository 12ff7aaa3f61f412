//! Park-Miller Linear Congruential Generator (MINSTD)
//!
//! The generator is the only source of randomness in the crate. It is
//! passed explicitly into every generation attempt so that a maze is
//! fully determined by its seed: the same seed replays the same carve
//! order, the same lever sites, and the same door placements, which is
//! what makes failed-generation reports reproducible.
//!
//! Constants:
//! - Multiplier (a): 48271
//! - Modulus (m): 2^31 - 1 = 2147483647
//!
//! Reference: https://en.wikipedia.org/wiki/Lehmer_random_number_generator

/// Park-Miller Linear Congruential Generator
///
/// Generates a deterministic sequence of pseudo-random numbers from a seed.
/// Same seed always produces the same sequence.
pub struct SimpleLCG {
    state: u32,
}

impl SimpleLCG {
    /// Create a new LCG with the given seed
    ///
    /// If seed is 0, it's replaced with 1 to avoid degenerate sequence
    pub fn new(seed: u32) -> Self {
        Self {
            state: if seed == 0 { 1 } else { seed },
        }
    }

    /// Advance RNG state (internal)
    fn advance(&mut self) {
        // Park-Miller constants
        const A: u64 = 48271;
        const M: u64 = 2147483647; // 2^31 - 1

        // Use u64 to avoid overflow during multiplication
        self.state = ((self.state as u64 * A) % M) as u32;
    }

    /// Generate random integer in range [a, b] (inclusive)
    ///
    /// Uses pure integer arithmetic - NO floating point operations
    pub fn randint(&mut self, a: usize, b: usize) -> usize {
        const M: u64 = 2147483647; // 2^31 - 1
        self.advance();

        // Compute: a + (state * (b - a + 1)) / M using integer arithmetic
        let range = (b - a + 1) as u64;
        let scaled = (self.state as u64 * range) / M;
        a + scaled as usize
    }

    /// Choose random index from a range [0, len)
    ///
    /// `len` must be non-zero; callers filter empty candidate pools first.
    pub fn choice_index(&mut self, len: usize) -> usize {
        debug_assert!(len > 0, "choice_index requires a non-empty range");
        self.randint(0, len - 1)
    }

    /// Shuffle a slice in place (Fisher-Yates)
    ///
    /// Used to randomize carve directions, lever sites and door
    /// candidate order within a single generation attempt.
    pub fn shuffle<T>(&mut self, items: &mut [T]) {
        for i in (1..items.len()).rev() {
            let j = self.randint(0, i);
            items.swap(i, j);
        }
    }
}
