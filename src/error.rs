//! Fatal error taxonomy for the protocol.
//!
//! A decommitment that simply fails to verify is not an error: validators
//! return a plain `bool` for that, see `verifier::VerifierSession::run_round`.
//! This enum covers the failures that abort a session outright: I/O
//! failure, malformed wire data, and bad startup input.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProtocolError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("short read: expected {expected} bytes, got {actual}")]
    ShortRead { expected: usize, actual: usize },

    #[error("cryptographic RNG read failed: {0}")]
    Rng(#[from] rand::Error),

    #[error("entropy pool capacity {capacity} is too small to draw a u64 (needs at least 8)")]
    PoolUndersized { capacity: usize },

    #[error("malformed challenge byte: {0}")]
    MalformedChallenge(u8),

    #[error("adjacency entry at ({row}, {col}) is {value}, expected 0 or 1")]
    InvalidAdjacencyEntry { row: usize, col: usize, value: u8 },

    #[error("cycle traverses missing edge ({from} -> {to})")]
    BrokenCycleEdge { from: usize, to: usize },

    #[error("malformed input: {0}")]
    MalformedInput(String),
}

pub type Result<T> = std::result::Result<T, ProtocolError>;
