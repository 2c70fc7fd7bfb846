//! Flat n×n matrices of 32-byte cells.
//!
//! Each matrix is a single contiguous buffer with an explicit
//! `(a, b) -> offset` indexer, so it can be allocated once per session and
//! reused across every round rather than reallocated.

use crate::CELL_LEN;

macro_rules! flat_matrix {
    ($ty:ident) => {
        /// n×n matrix of 32-byte cells, indexed `(a, b) -> (a*n + b)*32`.
        #[derive(Clone)]
        pub struct $ty {
            n: usize,
            bytes: Vec<u8>,
        }

        impl $ty {
            /// Allocate a zeroed n×n matrix.
            pub fn new(n: usize) -> Self {
                $ty {
                    n,
                    bytes: vec![0u8; n * n * CELL_LEN],
                }
            }

            pub fn n(&self) -> usize {
                self.n
            }

            #[inline]
            fn offset(&self, a: usize, b: usize) -> usize {
                debug_assert!(a < self.n && b < self.n);
                (a * self.n + b) * CELL_LEN
            }

            pub fn get(&self, a: usize, b: usize) -> &[u8; CELL_LEN] {
                let off = self.offset(a, b);
                self.bytes[off..off + CELL_LEN]
                    .try_into()
                    .expect("slice of CELL_LEN bytes")
            }

            pub fn get_mut(&mut self, a: usize, b: usize) -> &mut [u8] {
                let off = self.offset(a, b);
                &mut self.bytes[off..off + CELL_LEN]
            }

            /// Row-major view of the whole matrix, for bulk wire writes.
            pub fn as_bytes(&self) -> &[u8] {
                &self.bytes
            }

            /// Row-major mutable view, for bulk wire reads.
            pub fn as_bytes_mut(&mut self) -> &mut [u8] {
                &mut self.bytes
            }
        }
    };
}

flat_matrix!(SaltMatrix);
flat_matrix!(CommitMatrix);
