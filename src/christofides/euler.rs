//! Eulerian multigraph and circuit extraction.
//!
//! # Algorithm
//!
//! Hierholzer (1873): walk unused edges from the current vertex until stuck,
//! then back up, emitting vertices in reverse as the stack unwinds. Every
//! dead end is where a finished sub-circuit is spliced in. An explicit stack
//! replaces recursion, so deep walks cannot overflow.
//!
//! # Complexity
//!
//! O(V + E): each edge is pushed and consumed once, and each vertex's
//! adjacency cursor only moves forward.

use crate::error::{TspError, TspResult};
use crate::graph::SpanningTree;

use super::matching::Matching;

/// Spanning tree edges plus matching edges, with parallel edges kept distinct.
///
/// # Examples
///
/// ```
/// use u_tsp::christofides::EulerianMultigraph;
///
/// // Two parallel edges between 0 and 1 form a closed walk 0 → 1 → 0.
/// let g = EulerianMultigraph::from_edges(2, vec![(0, 1), (0, 1)]).unwrap();
/// assert_eq!(g.eulerian_circuit(0).unwrap(), vec![0, 1, 0]);
/// ```
#[derive(Debug, Clone)]
pub struct EulerianMultigraph {
    edges: Vec<(usize, usize)>,
    adjacency: Vec<Vec<usize>>,
}

impl EulerianMultigraph {
    /// Merges tree and matching edges.
    ///
    /// Fails with [`TspError::InternalInvariant`] if some vertex ends up with
    /// odd degree, i.e. the matching did not cover exactly the odd vertices.
    pub fn new(tree: &SpanningTree, matching: &Matching) -> TspResult<Self> {
        let edges = tree
            .edges()
            .iter()
            .map(|e| (e.u, e.v))
            .chain(matching.pairs().iter().copied())
            .collect();
        Self::from_edges(tree.num_vertices(), edges)
    }

    /// Builds a multigraph from raw edges, checking that all degrees are even.
    pub fn from_edges(num_vertices: usize, edges: Vec<(usize, usize)>) -> TspResult<Self> {
        let mut adjacency = vec![Vec::new(); num_vertices];
        for (idx, &(a, b)) in edges.iter().enumerate() {
            if a >= num_vertices || b >= num_vertices {
                return Err(TspError::invariant(format!(
                    "multigraph edge ({a}, {b}) out of range for {num_vertices} vertices"
                )));
            }
            adjacency[a].push(idx);
            adjacency[b].push(idx);
        }
        if let Some(v) = adjacency.iter().position(|adj| adj.len() % 2 != 0) {
            return Err(TspError::invariant(format!(
                "vertex {v} has odd degree {} in the multigraph",
                adjacency[v].len()
            )));
        }
        Ok(Self { edges, adjacency })
    }

    /// Number of vertices.
    pub fn num_vertices(&self) -> usize {
        self.adjacency.len()
    }

    /// Number of edges, counting parallel edges separately.
    pub fn num_edges(&self) -> usize {
        self.edges.len()
    }

    /// Degree of `v`.
    pub fn degree(&self, v: usize) -> usize {
        self.adjacency[v].len()
    }

    /// Closed walk from `start` using every edge exactly once.
    ///
    /// The returned sequence has `num_edges() + 1` vertices and ends at
    /// `start`. Fails with [`TspError::DisconnectedMultigraph`] if some edge
    /// or vertex is unreachable from `start`, including a vertex with no edges.
    pub fn eulerian_circuit(&self, start: usize) -> TspResult<Vec<usize>> {
        if start >= self.num_vertices() {
            return Err(TspError::invariant(format!(
                "start vertex {start} out of range"
            )));
        }
        let mut used = vec![false; self.edges.len()];
        let mut cursor = vec![0usize; self.num_vertices()];
        let mut stack = vec![start];
        let mut circuit = Vec::with_capacity(self.edges.len() + 1);

        while let Some(&v) = stack.last() {
            let adj = &self.adjacency[v];
            while cursor[v] < adj.len() && used[adj[cursor[v]]] {
                cursor[v] += 1;
            }
            match adj.get(cursor[v]) {
                Some(&idx) => {
                    used[idx] = true;
                    let (a, b) = self.edges[idx];
                    stack.push(if a == v { b } else { a });
                }
                None => {
                    circuit.push(v);
                    stack.pop();
                }
            }
        }
        circuit.reverse();

        let walked = circuit.len() - 1;
        let mut reached = vec![false; self.num_vertices()];
        for &v in &circuit {
            reached[v] = true;
        }
        if walked != self.edges.len() || reached.contains(&false) {
            return Err(TspError::DisconnectedMultigraph {
                used: walked,
                total: self.edges.len(),
            });
        }
        Ok(circuit)
    }
}
