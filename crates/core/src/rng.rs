//! RNG module - deterministic color draws for new pieces
//!
//! Each slot color is a uniform draw from the five playable colors. A triple
//! where all three colors match is thrown away and drawn again.

use crate::types::Color;

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
    seed: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // Avoid 0 seed which would produce all zeros
        let seed = if seed == 0 { 1 } else { seed };
        Self { state: seed, seed }
    }

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        // LCG formula: (a * state + c) mod m
        // Using Numerical Recipes constants: a=1664525, c=1013904223, m=2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max)
    ///
    /// Uses the high half of the state; the low bits of a power-of-two LCG cycle quickly.
    pub fn next_range(&mut self, max: u32) -> u32 {
        (self.next_u32() >> 16) % max
    }

    /// One uniform draw from [`Color::PLAYABLE`].
    pub fn next_color(&mut self) -> Color {
        Color::PLAYABLE[self.next_range(Color::PLAYABLE.len() as u32) as usize]
    }

    /// Three slot colors, redrawn as a whole while all three are identical.
    pub fn next_triple(&mut self) -> [Color; 3] {
        loop {
            let triple = [self.next_color(), self.next_color(), self.next_color()];
            if !(triple[0] == triple[1] && triple[0] == triple[2]) {
                return triple;
            }
        }
    }

    /// Seed this generator was created with (for restarting with the same sequence)
    pub fn seed(&self) -> u32 {
        self.seed
    }
}

impl Default for SimpleRng {
    fn default() -> Self {
        Self::new(1)
    }
}
