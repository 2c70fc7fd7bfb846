//! Verifier round state machine and soundness amplifier.
//!
//! Every validity check the Verifier performs (permutation shape, cycle
//! skeleton, and both decommitment hashes) is a soft reject: it flips the
//! round's verdict to `false` without aborting the session. Only a
//! transport or RNG I/O failure aborts the process, since the protocol has
//! no way to recover a desynchronized stream.

use std::io::{Read, Write};

use crate::decommit::{validate_cycle, validate_full_graph};
use crate::entropy::EntropyPool;
use crate::error::{ProtocolError, Result};
use crate::graph::{Cycle, Graph};
use crate::matrix::{CommitMatrix, SaltMatrix};
use crate::permutation::Permutation;
use crate::{wire, CELL_LEN};

pub struct VerifierSession<S> {
    stream: S,
    graph: Graph,
    commits: CommitMatrix,
    salts: SaltMatrix,
    rng: EntropyPool,
}

impl<S: Read + Write> VerifierSession<S> {
    /// `rng` is sized `nrounds` bytes: one fair-bit draw per round is all
    /// the Verifier needs.
    pub fn new(stream: S, graph: Graph, nrounds: u64) -> Result<Self> {
        let n = graph.n();
        let cap = (nrounds as usize).max(1);
        Ok(VerifierSession {
            stream,
            commits: CommitMatrix::new(n),
            salts: SaltMatrix::new(n),
            graph,
            rng: EntropyPool::new(cap)?,
        })
    }

    fn n(&self) -> usize {
        self.graph.n()
    }

    /// Drive one round: read commitment, sample and send the challenge
    /// bit, read the requested decommitment, and validate it. Returns the
    /// round's soft verdict; only I/O and malformed-challenge failures are
    /// fatal `Err`s.
    pub fn run_round(&mut self) -> Result<bool> {
        wire::read_exact(&mut self.stream, self.commits.as_bytes_mut())?;

        let b = self.rng.fair_bit()?;
        wire::write_byte(&mut self.stream, b)?;

        let verdict = match b {
            0 => {
                let n = self.n();
                let perm_words = wire::read_u64_vec(&mut self.stream, n)?;
                wire::read_exact(&mut self.stream, self.salts.as_bytes_mut())?;

                let perm = Permutation::from_words(perm_words);
                perm.validate() && validate_full_graph(&self.graph, &self.commits, &self.salts, &perm)
            }
            1 => {
                let n = self.n();
                let cycle_words = wire::read_u64_vec(&mut self.stream, n + 1)?;
                let mut edge_bytes = vec![0u8; n * CELL_LEN];
                wire::read_exact(&mut self.stream, &mut edge_bytes)?;

                let cycle = Cycle::from_values(cycle_words.into_iter().map(|w| w as usize).collect());
                let edge_salts = split_cells(&edge_bytes);

                cycle.validate_skeleton(n) && validate_cycle(&self.commits, &edge_salts, &cycle)
            }
            other => return Err(ProtocolError::MalformedChallenge(other)),
        };

        tracing::debug!(challenge = b, verdict, "round complete");
        Ok(verdict)
    }

    /// Sequential repetition: `accept := accept AND run_round()` for
    /// `nrounds` rounds, no pipelining.
    pub fn amplify(&mut self, nrounds: u64) -> Result<bool> {
        let mut accept = true;
        for round in 0..nrounds {
            let verdict = self.run_round()?;
            accept &= verdict;
            tracing::trace!(round, verdict, accept, "amplifier step");
        }
        tracing::info!(nrounds, accept, "verifier finished");
        Ok(accept)
    }
}

fn split_cells(bytes: &[u8]) -> Vec<[u8; CELL_LEN]> {
    bytes
        .chunks_exact(CELL_LEN)
        .map(|chunk| chunk.try_into().expect("chunk of CELL_LEN bytes"))
        .collect()
}
