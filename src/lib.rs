//! Interactive zero-knowledge proof of knowledge for Hamiltonian Cycle.
//!
//! A Prover holding a graph and a secret Hamiltonian cycle convinces a
//! Verifier holding only the graph that the cycle exists, without revealing
//! it. Soundness is amplified by repeating a single-bit-challenge round `k`
//! times; a cheating Prover is accepted with probability at most `2^-k`.

pub mod commitment;
pub mod decommit;
pub mod entropy;
pub mod error;
pub mod graph;
pub mod matrix;
pub mod permutation;
pub mod prover;
pub mod verifier;
pub mod wire;

pub use commitment::CommitmentBuilder;
pub use entropy::EntropyPool;
pub use error::ProtocolError;
pub use graph::{Cycle, Graph};
pub use matrix::{CommitMatrix, SaltMatrix};
pub use permutation::Permutation;
pub use prover::ProverSession;
pub use verifier::VerifierSession;

/// Default number of soundness-amplification rounds.
pub const DEFAULT_ROUNDS: u64 = 64;

/// Default rendezvous path for the Unix-domain-socket transport.
pub const DEFAULT_SOCKET_PATH: &str = "hamcycle.sock";

/// Byte length of a single salt / commitment cell.
pub const CELL_LEN: usize = 32;
