//! Commitment builder: from a graph and a freshly sampled permutation,
//! produce the salt matrix `S` and commitment matrix `H`.
//!
//! A single entry point drives sampling, hashing, and the tracing
//! breadcrumbs around both, so callers never see the intermediate state of
//! a partially-built commitment.

use sha2::{Digest, Sha256};

use crate::error::Result;
use crate::graph::Graph;
use crate::matrix::{CommitMatrix, SaltMatrix};
use crate::permutation::Permutation;
use crate::EntropyPool;

pub struct CommitmentBuilder;

impl CommitmentBuilder {
    /// Sample `π`, then for every `(i, j)` fill `S[π(i)][π(j)]` with 32
    /// random bytes, overwrite byte 31 with `G[i][j]`, and set
    /// `H[π(i)][π(j)] = SHA256(S[π(i)][π(j)])`.
    pub fn build(
        graph: &Graph,
        rng: &mut EntropyPool,
    ) -> Result<(Permutation, SaltMatrix, CommitMatrix)> {
        let n = graph.n();
        let perm = Permutation::sample(n, rng)?;
        let mut salts = SaltMatrix::new(n);
        let mut commits = CommitMatrix::new(n);

        for i in 0..n {
            for j in 0..n {
                let a = perm.apply(i);
                let b = perm.apply(j);

                let cell = salts.get_mut(a, b);
                rng.fill(cell)?;
                cell[crate::CELL_LEN - 1] = graph.edge(i, j);

                let digest = Sha256::digest(&cell[..]);
                commits.get_mut(a, b).copy_from_slice(&digest);
            }
        }

        tracing::debug!(n, "built commitment matrix for round");
        Ok((perm, salts, commits))
    }
}
