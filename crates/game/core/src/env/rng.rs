//! Random source consumed by the resolution engine.
//!
//! The engine only ever asks for uniform integers: target picks, the damage
//! variance roll and accuracy rolls. Implementations must be deterministic
//! for a given seed so that a battle can be replayed.

/// Injected source of uniform integers.
pub trait RandomSource {
    /// Uniform value in `[0, max_exclusive)`. Returns 0 when `max_exclusive` is 0.
    fn next(&mut self, max_exclusive: u32) -> u32;

    /// Uniform value in `[min, max_exclusive)`. Returns `min` for an empty range.
    fn next_in_range(&mut self, min: u32, max_exclusive: u32) -> u32 {
        if min >= max_exclusive {
            return min;
        }
        min + self.next(max_exclusive - min)
    }
}

/// PCG random number generator (Permuted Congruential Generator).
///
/// Uses the PCG-XSH-RR variant, which produces 32-bit output from 64-bit
/// state. Same seed, same sequence.
///
/// # References
///
/// - PCG paper: <https://www.pcg-random.org/>
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PcgRng {
    state: u64,
}

impl PcgRng {
    /// PCG multiplier constant.
    const MULTIPLIER: u64 = 6364136223846793005;

    /// PCG increment constant.
    const INCREMENT: u64 = 1442695040888963407;

    pub fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    /// Advance the LCG state: `state' = state × multiplier + increment (mod 2^64)`.
    #[inline]
    fn pcg_step(state: u64) -> u64 {
        state
            .wrapping_mul(Self::MULTIPLIER)
            .wrapping_add(Self::INCREMENT)
    }

    /// XSH-RR output permutation (xorshift high, random rotate).
    #[inline]
    fn pcg_output(state: u64) -> u32 {
        let xorshifted = (((state >> 18) ^ state) >> 27) as u32;
        let rot = (state >> 59) as u32;
        xorshifted.rotate_right(rot)
    }

    pub fn next_u32(&mut self) -> u32 {
        self.state = Self::pcg_step(self.state);
        Self::pcg_output(self.state)
    }
}

impl RandomSource for PcgRng {
    fn next(&mut self, max_exclusive: u32) -> u32 {
        if max_exclusive == 0 {
            return 0;
        }
        self.next_u32() % max_exclusive
    }
}

/// Replays a fixed script of raw values, cycling when exhausted.
///
/// Each draw returns `script[i] % max_exclusive`, which makes rolls easy to
/// pin down in tests and replays: a variance draw over `[80, 101)` asks for
/// `next(21)`, so a scripted `20` yields the 100% roll.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScriptedRng {
    script: Vec<u32>,
    cursor: usize,
}

impl ScriptedRng {
    pub fn new(script: impl Into<Vec<u32>>) -> Self {
        Self {
            script: script.into(),
            cursor: 0,
        }
    }

    /// Number of draws made so far.
    pub fn draws(&self) -> usize {
        self.cursor
    }
}

impl RandomSource for ScriptedRng {
    fn next(&mut self, max_exclusive: u32) -> u32 {
        if max_exclusive == 0 || self.script.is_empty() {
            self.cursor += 1;
            return 0;
        }
        let raw = self.script[self.cursor % self.script.len()];
        self.cursor += 1;
        raw % max_exclusive
    }
}
