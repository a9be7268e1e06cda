//! RNG module - reel symbol generation
//!
//! Every reel face is an independent uniform draw (with replacement) from the
//! 8-symbol alphabet. The same source feeds both the rolling animation frames
//! and the final settled reels.
//!
//! Also provides a scripted source for deterministic testing.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::types::{Symbol, REEL_COUNT, SYMBOL_COUNT};

/// Anything that can hand out reel symbols.
pub trait SymbolSource {
    /// Draw one symbol.
    fn next_symbol(&mut self) -> Symbol;

    /// Draw a full reel set (one independent draw per reel).
    fn next_reels(&mut self) -> [Symbol; REEL_COUNT] {
        [self.next_symbol(), self.next_symbol(), self.next_symbol()]
    }
}

/// Uniform symbol generator backed by a seedable RNG.
#[derive(Debug, Clone)]
pub struct SymbolGenerator {
    rng: StdRng,
    seed: Option<u64>,
}

impl SymbolGenerator {
    /// Create a deterministic generator with the given seed
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            seed: Some(seed),
        }
    }

    /// Create a generator seeded from OS entropy.
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
            seed: None,
        }
    }

    /// Seed this generator was created with (None when seeded from entropy).
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }
}

impl SymbolSource for SymbolGenerator {
    fn next_symbol(&mut self) -> Symbol {
        Symbol::from_index(self.rng.gen_range(0..SYMBOL_COUNT))
    }
}

impl Default for SymbolGenerator {
    fn default() -> Self {
        Self::from_entropy()
    }
}

/// Replays a fixed symbol sequence, wrapping around at the end.
///
/// Lets callers force specific outcomes without touching randomness. Note
/// that a spin consumes three symbols per animation frame before the final
/// draw; see [`ScriptedSymbols::for_outcomes`].
#[derive(Debug, Clone)]
pub struct ScriptedSymbols {
    script: Vec<Symbol>,
    pos: usize,
}

impl ScriptedSymbols {
    pub fn new(script: Vec<Symbol>) -> Self {
        assert!(!script.is_empty(), "script must contain at least one symbol");
        Self { script, pos: 0 }
    }

    /// Build a script where every spin settles on the given reel sets, in order.
    ///
    /// `frame_count` animation frames are filled with `filler` so that the
    /// final (post-animation) draw lands on each requested reel set.
    pub fn for_outcomes(
        outcomes: &[[Symbol; REEL_COUNT]],
        frame_count: u32,
        filler: Symbol,
    ) -> Self {
        let frame_symbols = frame_count as usize * REEL_COUNT;
        let mut script = Vec::with_capacity(outcomes.len() * (frame_symbols + REEL_COUNT));
        for reels in outcomes {
            script.extend(std::iter::repeat(filler).take(frame_symbols));
            script.extend_from_slice(reels);
        }
        Self::new(script)
    }

    /// Number of symbols drawn so far (wrapped position).
    pub fn position(&self) -> usize {
        self.pos
    }
}

impl SymbolSource for ScriptedSymbols {
    fn next_symbol(&mut self) -> Symbol {
        let sym = self.script[self.pos];
        self.pos = (self.pos + 1) % self.script.len();
        sym
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generator_deterministic() {
        let mut g1 = SymbolGenerator::new(12345);
        let mut g2 = SymbolGenerator::new(12345);

        // Same seed should produce same sequence
        for _ in 0..100 {
            assert_eq!(g1.next_symbol(), g2.next_symbol());
        }
    }

    #[test]
    fn test_generator_covers_alphabet() {
        let mut g = SymbolGenerator::new(7);
        let mut seen = [false; SYMBOL_COUNT];
        for _ in 0..2_000 {
            let sym = g.next_symbol();
            let idx = Symbol::ALL.iter().position(|s| *s == sym).unwrap();
            seen[idx] = true;
        }
        assert!(seen.iter().all(|s| *s), "every symbol should appear: {:?}", seen);
    }

    #[test]
    fn test_generator_roughly_uniform() {
        let mut g = SymbolGenerator::new(99);
        let mut counts = [0u32; SYMBOL_COUNT];
        let draws = 80_000;
        for _ in 0..draws {
            let sym = g.next_symbol();
            counts[Symbol::ALL.iter().position(|s| *s == sym).unwrap()] += 1;
        }
        // Expected 10_000 each; allow a generous band.
        for c in counts {
            assert!((9_000..=11_000).contains(&c), "count out of band: {}", c);
        }
    }

    #[test]
    fn test_seed_is_reported() {
        assert_eq!(SymbolGenerator::new(5).seed(), Some(5));
        assert_eq!(SymbolGenerator::from_entropy().seed(), None);
    }

    #[test]
    fn test_scripted_wraps() {
        let mut s = ScriptedSymbols::new(vec![Symbol::Bell, Symbol::Star]);
        assert_eq!(s.next_symbol(), Symbol::Bell);
        assert_eq!(s.next_symbol(), Symbol::Star);
        assert_eq!(s.next_symbol(), Symbol::Bell);
        assert_eq!(s.position(), 1);
    }

    #[test]
    fn test_scripted_for_outcomes_lands_after_frames() {
        let target = [Symbol::Seven, Symbol::Seven, Symbol::Seven];
        let mut s = ScriptedSymbols::for_outcomes(&[target], 2, Symbol::Lemon);

        // Two animation frames of filler.
        assert_eq!(s.next_reels(), [Symbol::Lemon; 3]);
        assert_eq!(s.next_reels(), [Symbol::Lemon; 3]);
        // Final draw.
        assert_eq!(s.next_reels(), target);
    }
}
