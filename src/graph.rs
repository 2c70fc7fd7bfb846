//! Graph and Cycle data types, stdin parsing, and input validation.

use std::io::BufRead;

use crate::error::{ProtocolError, Result};

/// Square adjacency matrix of dimension `n`, entries in `{0, 1}`.
#[derive(Clone, Debug)]
pub struct Graph {
    n: usize,
    cells: Vec<u8>,
}

impl Graph {
    pub fn n(&self) -> usize {
        self.n
    }

    pub fn edge(&self, i: usize, j: usize) -> u8 {
        self.cells[i * self.n + j]
    }

    /// Build a graph from a flat row-major `n*n` byte buffer, validating
    /// every entry is `0` or `1`.
    pub fn from_flat(n: usize, cells: Vec<u8>) -> Result<Self> {
        debug_assert_eq!(cells.len(), n * n);
        for i in 0..n {
            for j in 0..n {
                let v = cells[i * n + j];
                if v > 1 {
                    return Err(ProtocolError::InvalidAdjacencyEntry {
                        row: i,
                        col: j,
                        value: v,
                    });
                }
            }
        }
        Ok(Graph { n, cells })
    }

    /// Parse the Verifier's stdin format: line 1 is `n` in decimal, then
    /// `n` lines of `n` space-separated `0`/`1` digits.
    pub fn read_from<R: BufRead>(mut reader: R) -> Result<Self> {
        let mut line = String::new();
        reader
            .read_line(&mut line)
            .map_err(ProtocolError::Io)?;
        let n: usize = line
            .trim()
            .parse()
            .map_err(|_| ProtocolError::MalformedInput(format!("invalid n: {line:?}")))?;

        let mut cells = vec![0u8; n * n];
        for i in 0..n {
            line.clear();
            let bytes_read = reader.read_line(&mut line).map_err(ProtocolError::Io)?;
            if bytes_read == 0 {
                return Err(ProtocolError::MalformedInput(format!(
                    "expected {n} adjacency rows, ran out after {i}"
                )));
            }
            let mut cols = line.trim().split(' ');
            for j in 0..n {
                let tok = cols.next().ok_or_else(|| {
                    ProtocolError::MalformedInput(format!(
                        "row {i} has fewer than {n} entries"
                    ))
                })?;
                let v: u8 = tok.parse().map_err(|_| {
                    ProtocolError::MalformedInput(format!("non-numeric adjacency entry {tok:?}"))
                })?;
                cells[i * n + j] = v;
            }
        }

        Graph::from_flat(n, cells)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.cells
    }

    pub fn from_bytes(n: usize, cells: Vec<u8>) -> Self {
        Graph { n, cells }
    }
}

/// A closed walk `C[0..=n]` with `C[n] == C[0]`, every other value
/// distinct, every consecutive pair an edge of the graph it was checked
/// against.
#[derive(Clone, Debug)]
pub struct Cycle {
    values: Vec<usize>,
}

impl Cycle {
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn get(&self, i: usize) -> usize {
        self.values[i]
    }

    pub fn as_slice(&self) -> &[usize] {
        &self.values
    }

    /// Parse the Prover's stdin format: line 1 is `n` (must match the
    /// graph's `n` received over the wire); line 2 is `n+1` space-separated
    /// decimal indices. The line is read into a growable `String`, so there
    /// is no fixed-size buffer to overflow for a large `n`.
    pub fn read_from<R: BufRead>(mut reader: R, expected_n: usize) -> Result<Self> {
        let mut line = String::new();
        reader.read_line(&mut line).map_err(ProtocolError::Io)?;
        let n: usize = line
            .trim()
            .parse()
            .map_err(|_| ProtocolError::MalformedInput(format!("invalid n: {line:?}")))?;
        if n != expected_n {
            return Err(ProtocolError::MalformedInput(format!(
                "prover's stdin declares n={n}, but the graph received over the wire has n={expected_n}"
            )));
        }

        line.clear();
        reader.read_line(&mut line).map_err(ProtocolError::Io)?;
        let values: Vec<usize> = line
            .trim()
            .split(' ')
            .filter(|s| !s.is_empty())
            .map(|tok| {
                tok.parse().map_err(|_| {
                    ProtocolError::MalformedInput(format!("non-numeric cycle index {tok:?}"))
                })
            })
            .collect::<Result<_>>()?;

        if values.len() != n + 1 {
            return Err(ProtocolError::MalformedInput(format!(
                "cycle has {} entries, expected {}",
                values.len(),
                n + 1
            )));
        }

        Ok(Cycle { values })
    }

    pub fn from_values(values: Vec<usize>) -> Self {
        Cycle { values }
    }

    /// Verify the cycle traverses only real edges of `graph`, is closed,
    /// and visits every vertex exactly once. The Prover calls this before
    /// entering the round loop.
    pub fn validate_against(&self, graph: &Graph) -> Result<()> {
        let n = graph.n();
        if self.values.len() != n + 1 || self.values[n] != self.values[0] {
            return Err(ProtocolError::MalformedInput(
                "cycle is not closed (C[n] != C[0])".to_string(),
            ));
        }
        let mut visited = vec![false; n];
        for &v in &self.values[..n] {
            if v >= n || visited[v] {
                return Err(ProtocolError::MalformedInput(format!(
                    "cycle repeats or is out of range at vertex {v}"
                )));
            }
            visited[v] = true;
        }
        for i in 0..n {
            let from = self.values[i];
            let to = self.values[i + 1];
            if graph.edge(from, to) != 1 {
                return Err(ProtocolError::BrokenCycleEdge { from, to });
            }
        }
        Ok(())
    }

    /// Checks the cycle-skeleton shape (closed, each of `[0, n)` visited
    /// exactly once) without reference to a graph's edges. Used by the
    /// Verifier to validate a challenge-1 decommitment's vertex sequence.
    pub fn validate_skeleton(&self, n: usize) -> bool {
        if self.values.len() != n + 1 {
            return false;
        }
        let mut visited = vec![false; n];
        for &v in &self.values[..n] {
            if v >= n || visited[v] {
                return false;
            }
            visited[v] = true;
        }
        self.values[n] < n && self.values[n] == self.values[0]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn parses_k4() {
        let input = "4\n0 1 1 1\n1 0 1 1\n1 1 0 1\n1 1 1 0\n";
        let g = Graph::read_from(Cursor::new(input)).unwrap();
        assert_eq!(g.n(), 4);
        assert_eq!(g.edge(0, 1), 1);
        assert_eq!(g.edge(0, 0), 0);
    }

    #[test]
    fn rejects_non_binary_entry() {
        let input = "2\n0 2\n1 0\n";
        let err = Graph::read_from(Cursor::new(input)).unwrap_err();
        assert!(matches!(err, ProtocolError::InvalidAdjacencyEntry { .. }));
    }

    #[test]
    fn cycle_validates_against_graph() {
        let g = Graph::from_bytes(4, vec![0, 1, 1, 1, 1, 0, 1, 1, 1, 1, 0, 1, 1, 1, 1, 0]);
        let c = Cycle::from_values(vec![0, 1, 2, 3, 0]);
        assert!(c.validate_against(&g).is_ok());
    }

    #[test]
    fn cycle_rejects_missing_edge() {
        // K4 minus edge (0,2)/(2,0)
        let mut cells = vec![1u8; 16];
        for i in 0..4 {
            cells[i * 4 + i] = 0;
        }
        cells[0 * 4 + 2] = 0;
        cells[2 * 4 + 0] = 0;
        let g = Graph::from_bytes(4, cells);
        // path 0-1-2 only, claims closed cycle missing edge (2,0)
        let c = Cycle::from_values(vec![0, 1, 2, 0]);
        let err = c.validate_against(&g).unwrap_err();
        assert!(matches!(err, ProtocolError::BrokenCycleEdge { .. }));
    }

    #[test]
    fn skeleton_accepts_valid_closed_walk() {
        let c = Cycle::from_values(vec![0, 1, 2, 3, 0]);
        assert!(c.validate_skeleton(4));
    }

    #[test]
    fn skeleton_rejects_open_walk() {
        let c = Cycle::from_values(vec![0, 1, 2, 3, 1]);
        assert!(!c.validate_skeleton(4));
    }

    #[test]
    fn skeleton_rejects_repeated_vertex() {
        let c = Cycle::from_values(vec![0, 1, 1, 3, 0]);
        assert!(!c.validate_skeleton(4));
    }
}
