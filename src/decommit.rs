//! Decommitment validators.
//!
//! Both validators return a plain `bool`. A failed validation is a soft
//! cryptographic reject, never a fatal error. They are pure functions of
//! already-received data, kept separate from `verifier::VerifierSession` so
//! the soundness-critical comparison logic can be unit-tested directly
//! against hand-built fixtures without driving a full round over a socket.

use sha2::{Digest, Sha256};

use crate::graph::{Cycle, Graph};
use crate::matrix::{CommitMatrix, SaltMatrix};
use crate::permutation::Permutation;
use crate::CELL_LEN;

/// Full-graph decommitment (challenge 0). For every `(i, j)`, requires the
/// permuted salt's low byte to equal `G[i][j]` and the salt to open its
/// committed hash. `false` on any mismatch, `true` otherwise.
pub fn validate_full_graph(
    graph: &Graph,
    commits: &CommitMatrix,
    salts: &SaltMatrix,
    perm: &Permutation,
) -> bool {
    let n = graph.n();
    for i in 0..n {
        for j in 0..n {
            let a = perm.apply(i);
            let b = perm.apply(j);
            let salt = salts.get(a, b);
            if salt[CELL_LEN - 1] != graph.edge(i, j) {
                return false;
            }
            let digest = Sha256::digest(&salt[..]);
            if &digest[..] != commits.get(a, b) {
                return false;
            }
        }
    }
    true
}

/// Cycle decommitment (challenge 1). For every `i`, requires the revealed
/// edge salt's low byte to be `1` (edge present) and to open the
/// commitment at the claimed permuted cycle position. `false` on any
/// mismatch, `true` otherwise.
pub fn validate_cycle(commits: &CommitMatrix, edge_salts: &[[u8; CELL_LEN]], cycle: &Cycle) -> bool {
    let n = commits.n();
    if edge_salts.len() != n || cycle.len() != n + 1 {
        return false;
    }
    for i in 0..n {
        let salt = &edge_salts[i];
        if salt[CELL_LEN - 1] != 1 {
            return false;
        }
        let digest = Sha256::digest(&salt[..]);
        let (p_i, p_next) = (cycle.get(i), cycle.get(i + 1));
        if p_i >= n || p_next >= n {
            return false;
        }
        if &digest[..] != commits.get(p_i, p_next) {
            return false;
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{CommitmentBuilder, EntropyPool};

    fn k4() -> Graph {
        Graph::from_bytes(4, vec![0, 1, 1, 1, 1, 0, 1, 1, 1, 1, 0, 1, 1, 1, 1, 0])
    }

    #[test]
    fn full_graph_accepts_honest_decommitment() {
        let g = k4();
        let mut rng = EntropyPool::new(4 * 4 * 32).unwrap();
        let (perm, salts, commits) = CommitmentBuilder::build(&g, &mut rng).unwrap();
        assert!(validate_full_graph(&g, &commits, &salts, &perm));
    }

    #[test]
    fn full_graph_rejects_tampered_salt_byte() {
        let g = k4();
        let mut rng = EntropyPool::new(4 * 4 * 32).unwrap();
        let (perm, mut salts, commits) = CommitmentBuilder::build(&g, &mut rng).unwrap();
        salts.get_mut(0, 0)[0] ^= 0xFF;
        assert!(!validate_full_graph(&g, &commits, &salts, &perm));
    }

    #[test]
    fn full_graph_rejects_wrong_graph() {
        // Prover pre-committed to a denser graph than the one the Verifier holds.
        let real = Graph::from_bytes(4, vec![0, 1, 0, 1, 1, 0, 1, 0, 0, 1, 0, 1, 1, 0, 1, 0]);
        let committed = k4();
        let mut rng = EntropyPool::new(4 * 4 * 32).unwrap();
        let (perm, salts, commits) = CommitmentBuilder::build(&committed, &mut rng).unwrap();
        assert!(!validate_full_graph(&real, &commits, &salts, &perm));
    }

    #[test]
    fn cycle_accepts_honest_decommitment() {
        let g = k4();
        let mut rng = EntropyPool::new(4 * 4 * 32).unwrap();
        let (perm, salts, commits) = CommitmentBuilder::build(&g, &mut rng).unwrap();
        let c = Cycle::from_values(vec![0, 1, 2, 3, 0]);
        let permuted: Vec<usize> = c.as_slice().iter().map(|&v| perm.apply(v)).collect();
        let edge_salts: Vec<[u8; CELL_LEN]> = (0..4)
            .map(|i| *salts.get(permuted[i], permuted[i + 1]))
            .collect();
        let permuted_cycle = Cycle::from_values(permuted);
        assert!(validate_cycle(&commits, &edge_salts, &permuted_cycle));
    }

    #[test]
    fn cycle_rejects_absent_edge() {
        // Star graph has no Hamiltonian cycle; a cheating prover committing
        // to it always fails the cycle decommitment.
        let star = Graph::from_bytes(
            5,
            vec![
                0, 1, 1, 1, 1, //
                1, 0, 0, 0, 0, //
                1, 0, 0, 0, 0, //
                1, 0, 0, 0, 0, //
                1, 0, 0, 0, 0,
            ],
        );
        let mut rng = EntropyPool::new(5 * 5 * 32).unwrap();
        let (perm, salts, commits) = CommitmentBuilder::build(&star, &mut rng).unwrap();
        let claimed = Cycle::from_values(vec![0, 1, 2, 3, 4, 0]);
        let permuted: Vec<usize> = claimed.as_slice().iter().map(|&v| perm.apply(v)).collect();
        let edge_salts: Vec<[u8; CELL_LEN]> = (0..5)
            .map(|i| *salts.get(permuted[i], permuted[i + 1]))
            .collect();
        let permuted_cycle = Cycle::from_values(permuted);
        assert!(!validate_cycle(&commits, &edge_salts, &permuted_cycle));
    }
}
