//! Buffered draws from a cryptographic RNG.
//!
//! A fixed-capacity buffer is filled once at construction and refilled in a
//! single shot whenever exhausted, so each Prover or Verifier round only
//! pays for the underlying CSPRNG call once per buffer rather than once per
//! byte. The pool is a plain value owned by its session, not a process-wide
//! singleton.

use rand::rngs::OsRng;
use rand::RngCore;

use crate::error::{ProtocolError, Result};

/// A buffered draw source backed by the OS CSPRNG.
///
/// `cap` is chosen by the caller at construction time to size the one
/// underlying blocking refill: `n*n*32` for the Prover (one draw per salt
/// matrix build) and `nrounds` for the Verifier (one draw per challenge bit)
/// are the natural choices.
pub struct EntropyPool {
    buf: Vec<u8>,
    off: usize,
}

impl EntropyPool {
    /// Allocate and fill a buffer of `cap` bytes. Any RNG failure here is
    /// fatal.
    pub fn new(cap: usize) -> Result<Self> {
        let mut pool = EntropyPool {
            buf: vec![0u8; cap],
            off: cap,
        };
        pool.refill()?;
        Ok(pool)
    }

    fn refill(&mut self) -> Result<()> {
        tracing::trace!(capacity = self.buf.len(), "refilling entropy buffer");
        OsRng.try_fill_bytes(&mut self.buf)?;
        self.off = 0;
        Ok(())
    }

    fn next_byte(&mut self) -> Result<u8> {
        if self.off == self.buf.len() {
            self.refill()?;
        }
        let b = self.buf[self.off];
        self.off += 1;
        Ok(b)
    }

    /// An unbiased Bernoulli(1/2) sample.
    pub fn fair_bit(&mut self) -> Result<u8> {
        Ok(self.next_byte()? % 2)
    }

    /// A uniform 64-bit word, little-endian. The pool must have been built
    /// with a capacity of at least 8 bytes.
    pub fn u64(&mut self) -> Result<u64> {
        if self.buf.len() < 8 {
            return Err(ProtocolError::PoolUndersized {
                capacity: self.buf.len(),
            });
        }
        let mut bytes = [0u8; 8];
        for b in bytes.iter_mut() {
            *b = self.next_byte()?;
        }
        Ok(u64::from_le_bytes(bytes))
    }

    /// Fill `dst` with fresh random bytes, refilling the pool as needed.
    pub fn fill(&mut self, dst: &mut [u8]) -> Result<()> {
        for b in dst.iter_mut() {
            *b = self.next_byte()?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fair_bit_is_binary() {
        let mut pool = EntropyPool::new(4096).unwrap();
        for _ in 0..10_000 {
            let b = pool.fair_bit().unwrap();
            assert!(b == 0 || b == 1);
        }
    }

    #[test]
    fn fair_bit_roughly_balanced() {
        let mut pool = EntropyPool::new(8192).unwrap();
        let mut ones = 0u64;
        let trials = 20_000u64;
        for _ in 0..trials {
            ones += pool.fair_bit().unwrap() as u64;
        }
        let expected = trials as f64 / 2.0;
        let sigma = (trials as f64 * 0.25).sqrt();
        let diff = (ones as f64 - expected).abs();
        assert!(diff < 6.0 * sigma, "ones={ones} expected={expected} sigma={sigma}");
    }

    #[test]
    fn fill_spans_refills() {
        let mut pool = EntropyPool::new(16).unwrap();
        let mut dst = vec![0u8; 64];
        pool.fill(&mut dst).unwrap();
        // not all zero with overwhelming probability
        assert!(dst.iter().any(|&b| b != 0));
    }

    #[test]
    fn u64_draws_distinct_values() {
        let mut pool = EntropyPool::new(64).unwrap();
        let a = pool.u64().unwrap();
        let b = pool.u64().unwrap();
        assert_ne!(a, b);
    }
}
