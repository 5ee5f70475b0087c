//! Synthetic input generation.
//!
//! Shapes are deterministic (a request for `n` items always yields `n` items),
//! contents are random. Pass a seed to [`DataGen::seeded`] to make a run
//! reproducible; [`DataGen::from_entropy`] is the default.

use std::ops::Range;

use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};

/// Characters used for random strings.
pub const ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";

/// Shortest random string produced by [`DataGen::string`].
pub const MIN_STRING_LEN: usize = 3;

/// Longest random string produced by [`DataGen::string`].
pub const MAX_STRING_LEN: usize = 14;

/// Number of random bytes behind each hex string (64 hex chars).
pub const HEX_BYTES: usize = 32;

/// Probability that a half-random position keeps the base value.
pub const KEEP_PROBABILITY: f64 = 0.5;

/// Random data source for experiment inputs.
pub struct DataGen {
    rng: StdRng,
}

impl DataGen {
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Build from an optional seed, falling back to entropy.
    pub fn new(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self::seeded(seed),
            None => Self::from_entropy(),
        }
    }

    /// Direct access for workload-specific generators.
    pub fn rng(&mut self) -> &mut StdRng {
        &mut self.rng
    }

    /// Uniform value in `range`; an empty range yields its start.
    pub fn in_range(&mut self, range: Range<f64>) -> f64 {
        if range.start < range.end {
            self.rng.gen_range(range)
        } else {
            range.start
        }
    }

    /// `len` uniform values in `range`.
    pub fn numbers(&mut self, len: usize, range: Range<f64>) -> Vec<f64> {
        (0..len).map(|_| self.in_range(range.clone())).collect()
    }

    /// `len` uniform integers in `range`; an empty range repeats its start.
    pub fn integers(&mut self, len: usize, range: Range<i64>) -> Vec<i64> {
        (0..len)
            .map(|_| {
                if range.start < range.end {
                    self.rng.gen_range(range.clone())
                } else {
                    range.start
                }
            })
            .collect()
    }

    /// Random string of [`MIN_STRING_LEN`]..=[`MAX_STRING_LEN`] characters from [`ALPHABET`].
    pub fn string(&mut self) -> String {
        let len = self.rng.gen_range(MIN_STRING_LEN..=MAX_STRING_LEN);
        (0..len)
            .map(|_| ALPHABET[self.rng.gen_range(0..ALPHABET.len())] as char)
            .collect()
    }

    pub fn strings(&mut self, len: usize) -> Vec<String> {
        (0..len).map(|_| self.string()).collect()
    }

    /// Lowercase hex encoding of [`HEX_BYTES`] random bytes, shaped like a hashed key.
    pub fn hex_string(&mut self) -> String {
        let mut bytes = [0u8; HEX_BYTES];
        self.rng.fill_bytes(&mut bytes);
        hex::encode(bytes)
    }

    pub fn hex_strings(&mut self, len: usize) -> Vec<String> {
        (0..len).map(|_| self.hex_string()).collect()
    }

    /// Same-length copy of `base` where each position independently keeps
    /// its value with probability [`KEEP_PROBABILITY`] or is replaced by `fresh`.
    ///
    /// Used to build lookup probes with a realistic mix of hits and misses.
    pub fn half_random<T, F>(&mut self, base: &[T], mut fresh: F) -> Vec<T>
    where
        T: Clone,
        F: FnMut(&mut Self) -> T,
    {
        let mut out = Vec::with_capacity(base.len());
        for item in base {
            if self.rng.gen_bool(KEEP_PROBABILITY) {
                out.push(item.clone());
            } else {
                out.push(fresh(self));
            }
        }
        out
    }

    /// [`half_random`](Self::half_random) with fresh random strings.
    pub fn half_random_strings(&mut self, base: &[String]) -> Vec<String> {
        self.half_random(base, |gen| gen.string())
    }
}

impl Default for DataGen {
    fn default() -> Self {
        Self::from_entropy()
    }
}
