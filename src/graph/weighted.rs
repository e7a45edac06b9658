//! Undirected weighted graph.

use crate::distance::DistanceMatrix;
use crate::error::{TspError, TspResult};

/// An undirected edge `u — v` with `u < v`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Edge {
    /// Smaller endpoint.
    pub u: usize,
    /// Larger endpoint.
    pub v: usize,
    /// Edge weight.
    pub weight: f64,
}

impl Edge {
    /// Creates an edge, ordering the endpoints so that `u < v`.
    pub fn new(a: usize, b: usize, weight: f64) -> Self {
        let (u, v) = if a <= b { (a, b) } else { (b, a) };
        Self { u, v, weight }
    }

    /// Returns the endpoint opposite `from`.
    pub fn other(&self, from: usize) -> usize {
        if from == self.u {
            self.v
        } else {
            self.u
        }
    }
}

/// An undirected weighted graph over vertices `0..n`.
///
/// Edges live in a single arena addressed by index; each vertex keeps the
/// indices of its incident edges. Built once, read-only afterwards.
///
/// # Examples
///
/// ```
/// use u_tsp::distance::DistanceMatrix;
/// use u_tsp::graph::WeightedGraph;
///
/// let dm = DistanceMatrix::from_euclidean(&[(0.0, 0.0), (3.0, 4.0), (6.0, 8.0)]);
/// let graph = WeightedGraph::from_matrix(&dm, 1e-9).unwrap();
/// assert_eq!(graph.num_vertices(), 3);
/// assert_eq!(graph.num_edges(), 3);
/// assert_eq!(graph.weight(2, 1), Some(5.0));
/// ```
#[derive(Debug, Clone)]
pub struct WeightedGraph {
    num_vertices: usize,
    edges: Vec<Edge>,
    incident: Vec<Vec<usize>>,
}

impl WeightedGraph {
    /// Builds the complete graph over the matrix, one edge per pair `i < j`
    /// weighted `matrix[i][j]`.
    ///
    /// Fails with [`TspError::InvalidInput`] if the matrix has fewer than two
    /// locations, a negative or non-finite entry, a non-zero diagonal, or is
    /// asymmetric beyond `tolerance`.
    pub fn from_matrix(distances: &DistanceMatrix, tolerance: f64) -> TspResult<Self> {
        distances.validate(tolerance)?;
        let n = distances.size();
        let mut edges = Vec::with_capacity(n * (n - 1) / 2);
        for i in 0..n {
            for j in (i + 1)..n {
                edges.push(Edge::new(i, j, distances.get(i, j)));
            }
        }
        Self::from_edges(n, edges)
    }

    /// Builds a graph from an explicit edge list.
    ///
    /// Fails on out-of-range endpoints, self-loops, or negative/non-finite
    /// weights.
    pub fn from_edges(num_vertices: usize, edges: Vec<Edge>) -> TspResult<Self> {
        let mut incident = vec![Vec::new(); num_vertices];
        for (idx, e) in edges.iter().enumerate() {
            if e.v >= num_vertices {
                return Err(TspError::invalid_input(format!(
                    "edge ({}, {}) out of range for {num_vertices} vertices",
                    e.u, e.v
                )));
            }
            if e.u == e.v {
                return Err(TspError::invalid_input(format!("self-loop at vertex {}", e.u)));
            }
            if !e.weight.is_finite() || e.weight < 0.0 {
                return Err(TspError::invalid_input(format!(
                    "edge ({}, {}) has invalid weight {}",
                    e.u, e.v, e.weight
                )));
            }
            incident[e.u].push(idx);
            incident[e.v].push(idx);
        }
        Ok(Self {
            num_vertices,
            edges,
            incident,
        })
    }

    /// Number of vertices.
    pub fn num_vertices(&self) -> usize {
        self.num_vertices
    }

    /// Number of edges.
    pub fn num_edges(&self) -> usize {
        self.edges.len()
    }

    /// All edges, in insertion order.
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Indices of the edges incident to `v`.
    pub fn incident(&self, v: usize) -> &[usize] {
        &self.incident[v]
    }

    /// Weight of the lightest edge between `a` and `b`, if any.
    pub fn weight(&self, a: usize, b: usize) -> Option<f64> {
        self.incident[a]
            .iter()
            .map(|&idx| self.edges[idx])
            .filter(|e| e.other(a) == b)
            .map(|e| e.weight)
            .min_by(f64::total_cmp)
    }

    /// Subgraph induced by `vertices`, relabelled so that `vertices[i]`
    /// becomes vertex `i`. Edge weights are taken from this graph unchanged.
    pub fn induced(&self, vertices: &[usize]) -> Self {
        let mut local = vec![None; self.num_vertices];
        for (i, &v) in vertices.iter().enumerate() {
            local[v] = Some(i);
        }
        let mut edges = Vec::new();
        let mut incident = vec![Vec::new(); vertices.len()];
        for e in &self.edges {
            if let (Some(a), Some(b)) = (local[e.u], local[e.v]) {
                let idx = edges.len();
                edges.push(Edge::new(a, b, e.weight));
                incident[a].push(idx);
                incident[b].push(idx);
            }
        }
        Self {
            num_vertices: vertices.len(),
            edges,
            incident,
        }
    }
}
