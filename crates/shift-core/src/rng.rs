//! Seeded randomness for a run.
//!
//! Every stochastic decision in the engine (shuffles, outcome perturbation,
//! question variants, commentary rolls) draws from one [`ShiftRng`]. It is
//! seeded once at run start and never reseeded mid-run, so a run is a pure
//! function of its seed and the sequence of player calls.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use shift_types::RunSeed;

/// FNV-1a 64-bit offset basis.
const FNV_OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;

/// FNV-1a 64-bit prime.
const FNV_PRIME: u64 = 0x0100_0000_01b3;

/// Resolve a caller-supplied seed to the numeric RNG seed.
///
/// Numbers are used as-is. Text that parses as an unsigned integer is read
/// as that number, so `"42"` and `42` start the same run. Any other text is
/// hashed with FNV-1a.
pub fn resolve_seed(seed: &RunSeed) -> u64 {
    match seed {
        RunSeed::Number(n) => *n,
        RunSeed::Text(text) => text
            .trim()
            .parse::<u64>()
            .unwrap_or_else(|_| fnv1a(text.as_bytes())),
    }
}

fn fnv1a(bytes: &[u8]) -> u64 {
    bytes.iter().fold(FNV_OFFSET_BASIS, |hash, &b| {
        (hash ^ u64::from(b)).wrapping_mul(FNV_PRIME)
    })
}

/// The run's random source.
#[derive(Debug, Clone)]
pub struct ShiftRng {
    inner: Pcg32,
}

impl ShiftRng {
    /// Create a source seeded with `seed`.
    pub fn from_seed(seed: u64) -> Self {
        Self {
            inner: Pcg32::seed_from_u64(seed),
        }
    }

    /// Reset to the start of the stream for `seed`.
    pub fn seed(&mut self, seed: u64) {
        self.inner = Pcg32::seed_from_u64(seed);
    }

    /// Next value in `[0, 1)`.
    pub fn next(&mut self) -> f64 {
        self.inner.random::<f64>()
    }

    /// Uniform index in `0..bound`. Returns 0 when `bound` is 0.
    pub fn index_below(&mut self, bound: usize) -> usize {
        if bound == 0 {
            return 0;
        }
        self.inner.random_range(0..bound)
    }

    /// True with probability `p`.
    pub fn maybe(&mut self, p: f64) -> bool {
        self.next() < p
    }

    /// Fisher-Yates shuffle into a new vector; the input is left untouched.
    pub fn shuffle<T: Clone>(&mut self, items: &[T]) -> Vec<T> {
        let mut out = items.to_vec();
        let mut i = out.len();
        while i > 1 {
            i = i.saturating_sub(1);
            let j = self.index_below(i.saturating_add(1));
            out.swap(i, j);
        }
        out
    }

    /// Pick one element uniformly.
    pub fn pick<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        let idx = self.index_below(items.len());
        items.get(idx)
    }
}

impl Default for ShiftRng {
    fn default() -> Self {
        Self::from_seed(0)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_stream() {
        let mut a = ShiftRng::from_seed(1848);
        let mut b = ShiftRng::from_seed(1848);
        for _ in 0..100 {
            assert_eq!(a.next().to_bits(), b.next().to_bits());
        }
    }

    #[test]
    fn reseed_restarts_stream() {
        let mut rng = ShiftRng::from_seed(9);
        let first = rng.next();
        let _ = rng.next();
        rng.seed(9);
        assert_eq!(rng.next().to_bits(), first.to_bits());
    }

    #[test]
    fn next_stays_in_unit_interval() {
        let mut rng = ShiftRng::from_seed(3);
        for _ in 0..1000 {
            let v = rng.next();
            assert!((0.0..1.0).contains(&v));
        }
    }

    #[test]
    fn shuffle_is_a_permutation() {
        let mut rng = ShiftRng::from_seed(77);
        let items: Vec<u32> = (0..15).collect();
        let mut shuffled = rng.shuffle(&items);
        assert_eq!(shuffled.len(), items.len());
        shuffled.sort_unstable();
        assert_eq!(shuffled, items);
    }

    #[test]
    fn shuffle_repeats_for_same_seed() {
        let items: Vec<u32> = (0..15).collect();
        let a = ShiftRng::from_seed(5).shuffle(&items);
        let b = ShiftRng::from_seed(5).shuffle(&items);
        assert_eq!(a, b);
    }

    #[test]
    fn shuffle_handles_tiny_inputs() {
        let mut rng = ShiftRng::from_seed(1);
        assert!(rng.shuffle::<u32>(&[]).is_empty());
        assert_eq!(rng.shuffle(&[4_u32]), vec![4]);
    }

    #[test]
    fn shuffle_positions_are_roughly_uniform() {
        // Each element should land in each slot about trials / n times.
        let n = 5_usize;
        let trials = 20_000_usize;
        let items: Vec<usize> = (0..n).collect();
        let mut counts = vec![vec![0_usize; n]; n];
        let mut rng = ShiftRng::from_seed(2024);
        for _ in 0..trials {
            for (slot, item) in rng.shuffle(&items).into_iter().enumerate() {
                counts[item][slot] += 1;
            }
        }
        let expected = trials / n;
        for row in &counts {
            for &count in row {
                let diff = count.abs_diff(expected);
                assert!(diff < expected / 10, "count {count} too far from {expected}");
            }
        }
    }

    #[test]
    fn numeric_text_seed_matches_number() {
        assert_eq!(resolve_seed(&RunSeed::from("42")), 42);
        assert_eq!(resolve_seed(&RunSeed::Number(42)), 42);
    }

    #[test]
    fn text_seed_hashes_stably() {
        let a = resolve_seed(&RunSeed::from("spring-1848"));
        let b = resolve_seed(&RunSeed::from("spring-1848"));
        let c = resolve_seed(&RunSeed::from("autumn-1917"));
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(resolve_seed(&RunSeed::from("")), FNV_OFFSET_BASIS);
    }

    #[test]
    fn pick_on_empty_is_none() {
        let mut rng = ShiftRng::from_seed(0);
        assert!(rng.pick::<u32>(&[]).is_none());
        assert_eq!(rng.pick(&[8_u32]), Some(&8));
    }
}
