//! RNG module - 7-bag random piece generation
//!
//! Each bag holds one of each variant, shuffled. Draws pop from the bag until it is empty,
//! then a freshly shuffled bag replaces it. This bounds droughts and floods: every variant
//! appears exactly once per bag, no variant shows up more than twice in any 8 consecutive
//! draws, and no variant is missing from any 13 consecutive draws.
//!
//! Shuffling uses a small LCG so a seed fully determines the piece order.

use crate::types::PieceKind;

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone, PartialEq, Eq)]
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

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        // a=1664525, c=1013904223, m=2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max)
    pub fn next_range(&mut self, max: u32) -> u32 {
        self.next_u32() % max
    }

    /// Shuffle a slice using Fisher-Yates
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        for i in (1..slice.len()).rev() {
            let j = self.next_range((i + 1) as u32) as usize;
            slice.swap(i, j);
        }
    }

    pub fn state(&self) -> u32 {
        self.state
    }
}

/// Bag randomizer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Randomizer {
    /// Current bag, consumed front to back
    bag: [PieceKind; 7],
    /// Index of the next variant to hand out
    bag_index: usize,
    rng: SimpleRng,
}

impl Randomizer {
    /// Create a randomizer whose first bag is already shuffled
    pub fn new(seed: u32) -> Self {
        let mut randomizer = Self {
            bag: PieceKind::ALL,
            bag_index: 0,
            rng: SimpleRng::new(seed),
        };
        randomizer.refill_bag();
        randomizer
    }

    fn refill_bag(&mut self) {
        self.bag = PieceKind::ALL;
        self.rng.shuffle(&mut self.bag);
        self.bag_index = 0;
    }

    /// Pop the next variant, refilling the bag first if it is empty
    pub fn draw(&mut self) -> PieceKind {
        if self.bag_index >= self.bag.len() {
            self.refill_bag();
        }

        let piece = self.bag[self.bag_index];
        self.bag_index += 1;
        piece
    }

    /// Peek at the next variant without consuming it.
    ///
    /// When the bag is spent, the next bag is previewed on a copy of the RNG, so the answer
    /// always matches the following `draw()`.
    pub fn peek(&self) -> PieceKind {
        if self.bag_index < self.bag.len() {
            return self.bag[self.bag_index];
        }

        let mut preview_rng = self.rng.clone();
        let mut next_bag = PieceKind::ALL;
        preview_rng.shuffle(&mut next_bag);
        next_bag[0]
    }

    /// Variants still waiting in the current bag
    pub fn remaining(&self) -> &[PieceKind] {
        &self.bag[self.bag_index..]
    }

    /// Current RNG state; `Randomizer::new(seed)` continues from a fresh bag
    pub fn seed(&self) -> u32 {
        self.rng.state()
    }
}

impl Default for Randomizer {
    fn default() -> Self {
        Self::new(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rng_deterministic() {
        let mut rng1 = SimpleRng::new(12345);
        let mut rng2 = SimpleRng::new(12345);

        for _ in 0..100 {
            assert_eq!(rng1.next_u32(), rng2.next_u32());
        }
    }

    #[test]
    fn test_rng_zero_seed_remapped() {
        assert_eq!(SimpleRng::new(0), SimpleRng::new(1));
    }

    #[test]
    fn test_initial_bag_is_full() {
        let randomizer = Randomizer::new(1);
        assert_eq!(randomizer.remaining().len(), 7);
    }

    #[test]
    fn test_draws_all_seven() {
        let mut randomizer = Randomizer::new(1);

        let mut drawn = Vec::new();
        for _ in 0..7 {
            drawn.push(randomizer.draw());
        }

        for kind in PieceKind::ALL {
            assert!(drawn.contains(&kind), "Missing piece: {:?}", kind);
        }
        assert!(randomizer.remaining().is_empty());
    }

    #[test]
    fn test_auto_refill() {
        let mut randomizer = Randomizer::new(7);
        for _ in 0..7 {
            randomizer.draw();
        }

        let eighth = randomizer.draw();
        assert!(PieceKind::ALL.contains(&eighth));
        assert_eq!(randomizer.remaining().len(), 6);
    }

    #[test]
    fn test_peek_matches_draw_across_bag_boundary() {
        let mut randomizer = Randomizer::new(99);
        for _ in 0..30 {
            let peeked = randomizer.peek();
            assert_eq!(peeked, randomizer.draw());
        }
    }

    #[test]
    fn test_same_seed_same_sequence() {
        let mut a = Randomizer::new(2024);
        let mut b = Randomizer::new(2024);
        for _ in 0..50 {
            assert_eq!(a.draw(), b.draw());
        }
    }
}
