//! Uniform random permutation sampling.

use crate::entropy::EntropyPool;
use crate::error::Result;

/// A permutation of `[0, n)`, stored as `u64` words to match the wire
/// format, which fixes every integer field to a 64-bit word.
#[derive(Clone, Debug)]
pub struct Permutation {
    values: Vec<u64>,
}

impl Permutation {
    /// Fisher–Yates backward shuffle: `values[i] = i` initially, then for
    /// `i` from `n-1` down to `1`, swap `values[i]` with `values[j]` for a
    /// uniform `j in [0, i]`.
    ///
    /// The uniform draw for `j` rejection-samples against the smallest
    /// power of two strictly greater than `n`, rather than the tighter
    /// `i+1`, so the rejection bound stays fixed across the whole shuffle
    /// instead of shrinking every iteration.
    pub fn sample(n: usize, rng: &mut EntropyPool) -> Result<Self> {
        let mut values: Vec<u64> = (0..n as u64).collect();
        if n == 0 {
            return Ok(Permutation { values });
        }
        let mod_pow2 = next_pow2_strictly_greater(n as u64);

        for i in (1..n).rev() {
            let mut j;
            loop {
                j = rng.u64()? % mod_pow2;
                if j <= i as u64 {
                    break;
                }
            }
            values.swap(i, j as usize);
        }

        Ok(Permutation { values })
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Apply the permutation: `π(i)`.
    pub fn apply(&self, i: usize) -> usize {
        self.values[i] as usize
    }

    pub fn as_slice(&self) -> &[u64] {
        &self.values
    }

    pub fn from_words(values: Vec<u64>) -> Self {
        Permutation { values }
    }

    /// Checks every value is in `[0, n)` and appears exactly once. A
    /// malformed permutation is a soft reject, not a fatal error: see
    /// `verifier::VerifierSession`.
    pub fn validate(&self) -> bool {
        let n = self.values.len();
        let mut visited = vec![false; n];
        for &v in &self.values {
            let idx = v as usize;
            if idx >= n || visited[idx] {
                return false;
            }
            visited[idx] = true;
        }
        true
    }
}

/// Smallest power of two strictly greater than `n`, used as the rejection
/// bound for the uniform draw above.
fn next_pow2_strictly_greater(n: u64) -> u64 {
    let mut p: u64 = 1;
    while p <= n {
        p <<= 1;
    }
    p
}
