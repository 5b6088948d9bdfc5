//! Seeded linear-congruential generator and Fisher-Yates shuffle.
//!
//! The recurrence constants match the collage deployed on the site, so a
//! given seed reproduces the same ordering the browser shows.

use crate::types::Seed;

const MULTIPLIER: u64 = 9301;
const INCREMENT: u64 = 49297;
/// Modulus of the recurrence; every draw is in `0..MODULUS`.
pub const MODULUS: u64 = 233_280;

/// Deterministic pseudo-random sequence `r' = (r * 9301 + 49297) mod 233280`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Lcg {
    state: u64,
}

impl Lcg {
    /// Generator starting from `seed`.
    pub fn new(seed: Seed) -> Self {
        // Reducing first keeps the multiply in range and does not change the sequence.
        Self {
            state: seed % MODULUS,
        }
    }

    /// Advances the recurrence and returns the new state.
    pub fn next_raw(&mut self) -> u64 {
        self.state = (self.state * MULTIPLIER + INCREMENT) % MODULUS;
        self.state
    }

    /// Draws an index in `0..bound`; `bound` must be non-zero.
    pub fn next_below(&mut self, bound: usize) -> usize {
        debug_assert!(bound > 0);
        scale(self.next_raw(), bound)
    }
}

/// `floor(r / MODULUS * bound)` in double precision.
///
/// The exact integer quotient differs when `r * bound` is a multiple of
/// `MODULUS` and the rounded product lands just below it.
fn scale(r: u64, bound: usize) -> usize {
    ((r as f64 / MODULUS as f64) * bound as f64).floor() as usize
}

/// Shuffles `items` in place with a Fisher-Yates walk driven by [`Lcg`].
pub fn shuffle_in_place<T>(items: &mut [T], seed: Seed) {
    let mut rng = Lcg::new(seed);
    for i in (1..items.len()).rev() {
        let j = rng.next_below(i + 1);
        items.swap(i, j);
    }
}

/// Returns a shuffled copy of `items`.
///
/// Output order is a pure function of the input order and `seed`.
pub fn seeded_shuffle<T: Clone>(items: &[T], seed: Seed) -> Vec<T> {
    let mut out = items.to_vec();
    shuffle_in_place(&mut out, seed);
    out
}
