//! Weighted graphs and minimum spanning trees.
//!
//! - [`WeightedGraph`] — Undirected weighted graph stored as an edge arena
//! - [`minimum_spanning_tree`] — Kruskal's algorithm with union-find, O(E log E)

mod mst;
mod union_find;
mod weighted;

pub use mst::{minimum_spanning_tree, SpanningTree};
pub use union_find::UnionFind;
pub use weighted::{Edge, WeightedGraph};
