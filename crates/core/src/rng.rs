//! RNG module - 7-bag random piece generation
//!
//! Each bag contains one of each piece (I, O, T, S, Z, J, L), shuffled with
//! Fisher-Yates. Pieces are drawn until the bag is empty, then a new bag is
//! shuffled.
//!
//! The random source is injected so a session can be replayed from a seed.
//! [`SimpleRng`] is the default seedable source.

use arrayvec::ArrayVec;

use crate::types::PieceKind;

/// Source of random numbers for the bag shuffle.
pub trait RandomSource {
    fn next_u32(&mut self) -> u32;

    /// Uniform value in `[0, bound)`. `bound` must be non-zero.
    ///
    /// Uses the high bits and rejects the uneven tail so every value is
    /// equally likely.
    fn next_below(&mut self, bound: u32) -> u32 {
        debug_assert!(bound > 0);
        let bucket = u32::MAX / bound;
        loop {
            let v = self.next_u32() / bucket;
            if v < bound {
                return v;
            }
        }
    }
}

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // Avoid 0 seed which would produce all zeros
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Current internal state; feeding it back to [`SimpleRng::new`] resumes the sequence.
    pub fn state(&self) -> u32 {
        self.state
    }
}

impl RandomSource for SimpleRng {
    fn next_u32(&mut self) -> u32 {
        // a=1664525, c=1013904223, m=2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }
}

/// Shuffle a slice in place (Fisher-Yates)
pub fn shuffle<T>(rng: &mut impl RandomSource, slice: &mut [T]) {
    for i in (1..slice.len()).rev() {
        let j = rng.next_below((i + 1) as u32) as usize;
        slice.swap(i, j);
    }
}

/// 7-bag piece generator
#[derive(Debug, Clone)]
pub struct PieceBag<R = SimpleRng> {
    /// Pieces still pending in the current bag
    bag: ArrayVec<PieceKind, 7>,
    rng: R,
}

impl PieceBag<SimpleRng> {
    /// Create a bag backed by a seeded [`SimpleRng`]
    pub fn new(seed: u32) -> Self {
        Self::with_source(SimpleRng::new(seed))
    }
}

impl<R: RandomSource> PieceBag<R> {
    /// Create a bag with an empty pending set; the first draw shuffles.
    pub fn with_source(rng: R) -> Self {
        Self {
            bag: ArrayVec::new(),
            rng,
        }
    }

    fn refill(&mut self) {
        self.bag.clear();
        self.bag.extend(PieceKind::ALL);
        shuffle(&mut self.rng, &mut self.bag);
    }

    /// Draw the next piece, shuffling a fresh bag when the current one is spent
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> PieceKind {
        if self.bag.is_empty() {
            self.refill();
        }
        // A freshly refilled bag always holds seven pieces.
        self.bag.pop().unwrap_or(PieceKind::I)
    }

    /// Pieces left before the next refill.
    pub fn remaining(&self) -> &[PieceKind] {
        &self.bag
    }

    /// Drop pending pieces so the next draw starts a new bag.
    pub fn reset(&mut self) {
        self.bag.clear();
    }

    pub fn source(&self) -> &R {
        &self.rng
    }
}

impl Default for PieceBag<SimpleRng> {
    fn default() -> Self {
        Self::new(1)
    }
}
