//! Minimum spanning tree.
//!
//! # Algorithm
//!
//! Kruskal (1956): scan edges by ascending weight and keep every edge that
//! joins two different components, tracked with a [`UnionFind`]. Ties are
//! broken by `(u, v)` so the tree is deterministic.
//!
//! # Complexity
//!
//! O(E log E); for the complete graph over n points that is O(n² log n).

use crate::cancel::CancelFlag;
use crate::error::{TspError, TspResult};

use super::union_find::UnionFind;
use super::weighted::{Edge, WeightedGraph};

/// A spanning tree: `n - 1` edges connecting all `n` vertices, acyclic.
#[derive(Debug, Clone)]
pub struct SpanningTree {
    num_vertices: usize,
    edges: Vec<Edge>,
}

impl SpanningTree {
    /// Number of vertices spanned.
    pub fn num_vertices(&self) -> usize {
        self.num_vertices
    }

    /// Tree edges in the order Kruskal selected them.
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Sum of the edge weights.
    pub fn total_weight(&self) -> f64 {
        self.edges.iter().map(|e| e.weight).sum()
    }

    /// Degree of every vertex within the tree.
    pub fn degrees(&self) -> Vec<usize> {
        let mut degree = vec![0; self.num_vertices];
        for e in &self.edges {
            degree[e.u] += 1;
            degree[e.v] += 1;
        }
        degree
    }
}

/// Computes a minimum spanning tree of `graph`.
///
/// Checks `cancel` before each edge is examined. Fails with
/// [`TspError::DisconnectedGraph`] if the graph does not connect every vertex.
///
/// # Examples
///
/// ```
/// use u_tsp::cancel::CancelFlag;
/// use u_tsp::distance::DistanceMatrix;
/// use u_tsp::graph::{minimum_spanning_tree, WeightedGraph};
///
/// let dm = DistanceMatrix::from_euclidean(&[(0.0, 0.0), (1.0, 0.0), (2.0, 0.0), (3.0, 0.0)]);
/// let graph = WeightedGraph::from_matrix(&dm, 1e-9).unwrap();
/// let tree = minimum_spanning_tree(&graph, &CancelFlag::new()).unwrap();
/// assert_eq!(tree.edges().len(), 3);
/// assert!((tree.total_weight() - 3.0).abs() < 1e-10);
/// ```
pub fn minimum_spanning_tree(graph: &WeightedGraph, cancel: &CancelFlag) -> TspResult<SpanningTree> {
    let n = graph.num_vertices();
    let required = n.saturating_sub(1);
    let edges = graph.edges();

    let mut order: Vec<usize> = (0..edges.len()).collect();
    order.sort_by(|&a, &b| {
        let (ea, eb) = (&edges[a], &edges[b]);
        ea.weight
            .total_cmp(&eb.weight)
            .then(ea.u.cmp(&eb.u))
            .then(ea.v.cmp(&eb.v))
    });

    let mut components = UnionFind::new(n);
    let mut chosen = Vec::with_capacity(required);
    for idx in order {
        if chosen.len() == required {
            break;
        }
        cancel.check("spanning tree")?;
        let e = edges[idx];
        if components.union(e.u, e.v) {
            chosen.push(e);
        }
    }

    if chosen.len() != required {
        return Err(TspError::DisconnectedGraph {
            edges: chosen.len(),
            required,
        });
    }

    Ok(SpanningTree {
        num_vertices: n,
        edges: chosen,
    })
}
