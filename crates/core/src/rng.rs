//! RNG module - next-shape generation
//!
//! Each player rolls shapes from its own queue so one player's draws never
//! shift the other's sequence. Two modes are supported:
//!
//! - **Bag**: the 7-bag algorithm; every shape appears once per shuffled bag
//! - **Uniform**: every draw is an independent pick from the seven shapes
//!
//! Both are driven by a small LCG so a seed reproduces a match exactly.

use serde::{Deserialize, Serialize};

use crate::types::ShapeKind;

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

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        // LCG formula: (a * state + c) mod m, m = 2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max)
    pub fn next_range(&mut self, max: u32) -> u32 {
        // Low LCG bits have short periods; use the high half.
        (self.next_u32() >> 16) % max.max(1)
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

/// How next shapes are rolled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Randomizer {
    #[default]
    Bag,
    Uniform,
}

impl Randomizer {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "bag" | "7bag" | "7-bag" => Some(Randomizer::Bag),
            "uniform" | "random" => Some(Randomizer::Uniform),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Randomizer::Bag => "bag",
            Randomizer::Uniform => "uniform",
        }
    }
}

/// Per-player shape generator
#[derive(Debug, Clone)]
pub struct ShapeQueue {
    mode: Randomizer,
    /// Current bag of shapes (unused in uniform mode)
    bag: [ShapeKind; 7],
    /// Index into current bag
    bag_index: usize,
    rng: SimpleRng,
}

impl ShapeQueue {
    /// Create a new queue with the given seed
    pub fn new(seed: u32, mode: Randomizer) -> Self {
        let mut queue = Self {
            mode,
            bag: ShapeKind::ALL,
            bag_index: 0,
            rng: SimpleRng::new(seed),
        };
        if mode == Randomizer::Bag {
            queue.refill_bag();
        }
        queue
    }

    /// Generate a new shuffled bag
    fn refill_bag(&mut self) {
        self.bag = ShapeKind::ALL;
        self.rng.shuffle(&mut self.bag);
        self.bag_index = 0;
    }

    /// Draw the next shape
    pub fn draw(&mut self) -> ShapeKind {
        match self.mode {
            Randomizer::Uniform => ShapeKind::ALL[self.rng.next_range(7) as usize],
            Randomizer::Bag => {
                if self.bag_index >= self.bag.len() {
                    self.refill_bag();
                }
                let shape = self.bag[self.bag_index];
                self.bag_index += 1;
                shape
            }
        }
    }

    pub fn mode(&self) -> Randomizer {
        self.mode
    }

    /// Get the current RNG state (for restarting with a fresh sequence)
    pub fn seed(&self) -> u32 {
        self.rng.state()
    }

    /// Remaining shapes in the current bag, for tests
    #[cfg(test)]
    pub fn current_bag(&self) -> &[ShapeKind] {
        &self.bag[self.bag_index..]
    }
}

impl Default for ShapeQueue {
    fn default() -> Self {
        Self::new(1, Randomizer::Bag)
    }
}

/// Seed for player two's queue, derived so both players never share a sequence.
pub fn derive_seed(seed: u32) -> u32 {
    seed.rotate_left(16) ^ 0x9E37_79B9
}
