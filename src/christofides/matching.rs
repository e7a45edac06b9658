//! Odd-degree vertex matching.
//!
//! Collects the vertices of odd degree in the spanning tree and pairs them
//! with a minimum-weight perfect matching over the original graph weights.
//!
//! # Strategies
//!
//! - [`MatchingStrategy::Exact`] — weighted blossom, O(k³) for k odd vertices.
//!   Required for the 1.5 approximation bound.
//! - [`MatchingStrategy::Greedy`] — repeatedly pairs the two closest free
//!   vertices, O(k² log k). Faster, but the 1.5 bound no longer holds.

use serde::{Deserialize, Serialize};

use crate::cancel::CancelFlag;
use crate::error::{TspError, TspResult};
use crate::graph::{SpanningTree, WeightedGraph};

use super::blossom::max_weight_matching;

/// Algorithm used to pair the odd-degree vertices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchingStrategy {
    /// Exact minimum-weight perfect matching (blossom algorithm).
    #[default]
    Exact,
    /// Greedy closest-pair matching; lower quality, no approximation bound.
    Greedy,
}

/// A set of disjoint vertex pairs, each stored as `(smaller, larger)`.
#[derive(Debug, Clone, PartialEq)]
pub struct Matching {
    pairs: Vec<(usize, usize)>,
}

impl Matching {
    /// Matched pairs, sorted.
    pub fn pairs(&self) -> &[(usize, usize)] {
        &self.pairs
    }

    /// Number of pairs.
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// Returns `true` if nothing is matched.
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Total weight of the matched pairs in `graph`.
    pub fn total_weight(&self, graph: &WeightedGraph) -> f64 {
        self.pairs
            .iter()
            .filter_map(|&(a, b)| graph.weight(a, b))
            .sum()
    }
}

/// Vertices with odd degree in the spanning tree, ascending.
///
/// Fails with [`TspError::InternalInvariant`] if their count is odd, which
/// the handshake lemma rules out for any valid tree.
pub fn odd_degree_vertices(tree: &SpanningTree) -> TspResult<Vec<usize>> {
    odd_vertices_of(&tree.degrees())
}

fn odd_vertices_of(degrees: &[usize]) -> TspResult<Vec<usize>> {
    let odd: Vec<usize> = degrees
        .iter()
        .enumerate()
        .filter(|&(_, &d)| d % 2 == 1)
        .map(|(v, _)| v)
        .collect();
    if odd.len() % 2 != 0 {
        return Err(TspError::invariant(format!(
            "spanning tree has {} odd-degree vertices",
            odd.len()
        )));
    }
    Ok(odd)
}

/// Minimum-weight perfect matching of `vertices` within `graph`.
///
/// Only edges of `graph` between members of `vertices` are considered.
/// Fails with [`TspError::NoPerfectMatching`] if some vertex cannot be paired.
///
/// # Examples
///
/// ```
/// use u_tsp::cancel::CancelFlag;
/// use u_tsp::christofides::{min_weight_perfect_matching, MatchingStrategy};
/// use u_tsp::distance::DistanceMatrix;
/// use u_tsp::graph::WeightedGraph;
///
/// // Two tight clusters far apart: each cluster pairs internally.
/// let dm = DistanceMatrix::from_euclidean(&[(0.0, 0.0), (10.0, 0.0), (0.0, 1.0), (10.0, 1.0)]);
/// let graph = WeightedGraph::from_matrix(&dm, 1e-9).unwrap();
/// let m = min_weight_perfect_matching(&graph, &[0, 1, 2, 3], MatchingStrategy::Exact, &CancelFlag::new()).unwrap();
/// assert_eq!(m.pairs(), &[(0, 2), (1, 3)]);
/// ```
pub fn min_weight_perfect_matching(
    graph: &WeightedGraph,
    vertices: &[usize],
    strategy: MatchingStrategy,
    cancel: &CancelFlag,
) -> TspResult<Matching> {
    let sub = graph.induced(vertices);
    let mate = match strategy {
        MatchingStrategy::Exact => exact(&sub, cancel)?,
        MatchingStrategy::Greedy => greedy(&sub),
    };

    let unmatched = mate.iter().filter(|m| m.is_none()).count();
    if unmatched > 0 {
        return Err(TspError::NoPerfectMatching {
            unmatched,
            vertices: vertices.len(),
        });
    }

    let mut pairs: Vec<(usize, usize)> = mate
        .iter()
        .enumerate()
        .filter_map(|(a, &b)| b.filter(|&b| a < b).map(|b| (a, b)))
        .map(|(a, b)| {
            let (x, y) = (vertices[a], vertices[b]);
            (x.min(y), x.max(y))
        })
        .collect();
    pairs.sort_unstable();
    Ok(Matching { pairs })
}

/// Maximum-cardinality maximum-weight matching over `(1 + w_max) - w`.
/// Every cardinality-maximal matching has the same number of edges, so
/// maximising the transformed weight minimises the original.
fn exact(sub: &WeightedGraph, cancel: &CancelFlag) -> TspResult<Vec<Option<usize>>> {
    let max_weight = sub.edges().iter().map(|e| e.weight).fold(0.0, f64::max);
    let edges: Vec<(usize, usize, f64)> = sub
        .edges()
        .iter()
        .map(|e| (e.u, e.v, 1.0 + max_weight - e.weight))
        .collect();
    max_weight_matching(sub.num_vertices(), &edges, true, cancel)
}

fn greedy(sub: &WeightedGraph) -> Vec<Option<usize>> {
    let mut order: Vec<usize> = (0..sub.num_edges()).collect();
    let edges = sub.edges();
    order.sort_by(|&a, &b| {
        edges[a]
            .weight
            .total_cmp(&edges[b].weight)
            .then(edges[a].u.cmp(&edges[b].u))
            .then(edges[a].v.cmp(&edges[b].v))
    });
    let mut mate = vec![None; sub.num_vertices()];
    for idx in order {
        let e = edges[idx];
        if mate[e.u].is_none() && mate[e.v].is_none() {
            mate[e.u] = Some(e.v);
            mate[e.v] = Some(e.u);
        }
    }
    mate
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::distance::DistanceMatrix;
    use crate::graph::minimum_spanning_tree;
    use proptest::prelude::*;

    fn points() -> impl Strategy<Value = Vec<(f64, f64)>> {
        prop::collection::vec((0.0..100.0f64, 0.0..100.0f64), 2..24)
    }

    proptest! {
        #[test]
        fn odd_vertices_are_perfectly_matched(pts in points()) {
            let dm = DistanceMatrix::from_euclidean(&pts);
            let graph = WeightedGraph::from_matrix(&dm, 1e-9).unwrap();
            let tree = minimum_spanning_tree(&graph, &CancelFlag::new()).unwrap();
            let odd = odd_degree_vertices(&tree).unwrap();
            for strategy in [MatchingStrategy::Exact, MatchingStrategy::Greedy] {
                let m = min_weight_perfect_matching(&graph, &odd, strategy, &CancelFlag::new()).unwrap();
                prop_assert_eq!(m.len() * 2, odd.len());
                let mut covered: Vec<usize> = m.pairs().iter().flat_map(|&(a, b)| [a, b]).collect();
                covered.sort();
                prop_assert_eq!(&covered, &odd);
            }
        }
    }
}
