//! Prover round state machine: per round, build a fresh commitment,
//! answer whichever challenge bit the Verifier draws, and repeat.

use std::io::{Read, Write};

use crate::commitment::CommitmentBuilder;
use crate::entropy::EntropyPool;
use crate::error::{ProtocolError, Result};
use crate::graph::{Cycle, Graph};
use crate::wire;

pub struct ProverSession<S> {
    stream: S,
    graph: Graph,
    cycle: Cycle,
    rng: EntropyPool,
}

impl<S: Read + Write> ProverSession<S> {
    /// `cycle` must already have been validated against `graph` by the
    /// caller before constructing a session.
    pub fn new(stream: S, graph: Graph, cycle: Cycle) -> Result<Self> {
        let n = graph.n();
        let cap = (n * n * crate::CELL_LEN).max(crate::CELL_LEN);
        Ok(ProverSession {
            stream,
            graph,
            cycle,
            rng: EntropyPool::new(cap)?,
        })
    }

    /// Drive one round: build a fresh commitment, send it, read the
    /// challenge bit, and send the requested decommitment shape. The `b=1`
    /// payload gets its own buffers rather than aliasing the commitment
    /// matrix as scratch, which keeps the two code paths independent and
    /// easy to reason about.
    pub fn run_round(&mut self) -> Result<()> {
        let n = self.graph.n();
        let (perm, salts, commits) = CommitmentBuilder::build(&self.graph, &mut self.rng)?;

        wire::write_all(&mut self.stream, commits.as_bytes())?;

        let b = wire::read_byte(&mut self.stream)?;
        match b {
            0 => {
                wire::write_u64_slice(&mut self.stream, perm.as_slice())?;
                wire::write_all(&mut self.stream, salts.as_bytes())?;
            }
            1 => {
                let permuted: Vec<usize> = self
                    .cycle
                    .as_slice()
                    .iter()
                    .map(|&v| perm.apply(v))
                    .collect();
                let words: Vec<u64> = permuted.iter().map(|&v| v as u64).collect();
                wire::write_u64_slice(&mut self.stream, &words)?;
                for i in 0..n {
                    wire::write_all(&mut self.stream, salts.get(permuted[i], permuted[i + 1]))?;
                }
            }
            other => return Err(ProtocolError::MalformedChallenge(other)),
        }

        tracing::debug!(challenge = b, "prover round complete");
        Ok(())
    }

    /// Sequential repetition: `nrounds` rounds, no pipelining.
    pub fn amplify(&mut self, nrounds: u64) -> Result<()> {
        for round in 0..nrounds {
            self.run_round()?;
            tracing::trace!(round, "amplifier step");
        }
        tracing::info!(nrounds, "prover finished");
        Ok(())
    }
}
