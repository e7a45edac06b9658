//! Maximum-weight matching on general graphs.
//!
//! # Algorithm
//!
//! Edmonds' blossom algorithm in its primal-dual weighted form (Galil's
//! O(n³) variant). Each stage grows alternating trees from all free vertices
//! over tight edges (zero slack), shrinking odd cycles into blossoms, until
//! an augmenting path is found or a dual adjustment `delta` is needed:
//!
//! 1. an S-vertex dual reaches zero (only without max-cardinality),
//! 2. an edge between an S-vertex and a free vertex becomes tight,
//! 3. an edge between two S-blossoms becomes tight,
//! 4. a T-blossom dual reaches zero and the blossom is expanded.
//!
//! Edge `k` has endpoints `2k` and `2k + 1`; `endpoint[p]` is the vertex at
//! endpoint `p`, and `p ^ 1` is the opposite endpoint of the same edge.
//! Blossom ids `n..2n` are drawn from a free list.
//!
//! # Reference
//!
//! Galil, Z. (1986). "Efficient algorithms for finding maximum matching in
//! graphs", *ACM Computing Surveys* 18(1), 23-38.

use crate::cancel::CancelFlag;
use crate::error::{TspError, TspResult};

/// Absent index (no mate, no label end, no parent, ...).
const NIL: usize = usize::MAX;

const FREE: u8 = 0;
const S: u8 = 1;
const T: u8 = 2;
/// Temporary breadcrumb set by `scan_blossom`.
const BREADCRUMB: u8 = 4;

/// Computes a maximum-weight matching over `edges` (`(u, v, weight)` with
/// vertices `0..num_vertices`).
///
/// With `max_cardinality`, only maximum-cardinality matchings are
/// considered. Returns `mate[v]`, the vertex matched to `v`, or `None`.
pub fn max_weight_matching(
    num_vertices: usize,
    edges: &[(usize, usize, f64)],
    max_cardinality: bool,
    cancel: &CancelFlag,
) -> TspResult<Vec<Option<usize>>> {
    if edges.is_empty() {
        return Ok(vec![None; num_vertices]);
    }
    let mut state = BlossomState::new(num_vertices, edges);
    state.solve(max_cardinality, cancel)?;
    Ok(state
        .mate
        .iter()
        .map(|&p| (p != NIL).then(|| state.endpoint[p]))
        .collect())
}

struct BlossomState<'a> {
    n: usize,
    edges: &'a [(usize, usize, f64)],
    endpoint: Vec<usize>,
    /// Remote endpoints of the edges incident to each vertex.
    neighbend: Vec<Vec<usize>>,
    /// Remote endpoint of the matched edge per vertex.
    mate: Vec<usize>,
    label: Vec<u8>,
    labelend: Vec<usize>,
    inblossom: Vec<usize>,
    blossomparent: Vec<usize>,
    blossomchilds: Vec<Vec<usize>>,
    blossombase: Vec<usize>,
    blossomendps: Vec<Vec<usize>>,
    bestedge: Vec<usize>,
    blossombestedges: Vec<Option<Vec<usize>>>,
    unusedblossoms: Vec<usize>,
    dualvar: Vec<f64>,
    allowedge: Vec<bool>,
    queue: Vec<usize>,
}

impl<'a> BlossomState<'a> {
    fn new(n: usize, edges: &'a [(usize, usize, f64)]) -> Self {
        let max_weight = edges.iter().map(|e| e.2).fold(0.0, f64::max);
        let endpoint: Vec<usize> = (0..2 * edges.len())
            .map(|p| if p % 2 == 0 { edges[p / 2].0 } else { edges[p / 2].1 })
            .collect();
        let mut neighbend = vec![Vec::new(); n];
        for (k, &(i, j, _)) in edges.iter().enumerate() {
            neighbend[i].push(2 * k + 1);
            neighbend[j].push(2 * k);
        }
        let mut dualvar = vec![max_weight; n];
        dualvar.extend(std::iter::repeat(0.0).take(n));

        Self {
            n,
            edges,
            endpoint,
            neighbend,
            mate: vec![NIL; n],
            label: vec![FREE; 2 * n],
            labelend: vec![NIL; 2 * n],
            inblossom: (0..n).collect(),
            blossomparent: vec![NIL; 2 * n],
            blossomchilds: vec![Vec::new(); 2 * n],
            blossombase: (0..n).chain(std::iter::repeat(NIL).take(n)).collect(),
            blossomendps: vec![Vec::new(); 2 * n],
            bestedge: vec![NIL; 2 * n],
            blossombestedges: vec![None; 2 * n],
            unusedblossoms: (n..2 * n).collect(),
            dualvar,
            allowedge: vec![false; edges.len()],
            queue: Vec::new(),
        }
    }

    fn slack(&self, k: usize) -> f64 {
        let (i, j, w) = self.edges[k];
        self.dualvar[i] + self.dualvar[j] - 2.0 * w
    }

    /// Vertices contained (recursively) in blossom `b`.
    fn blossom_leaves(&self, b: usize) -> Vec<usize> {
        let mut leaves = Vec::new();
        let mut stack = vec![b];
        while let Some(t) = stack.pop() {
            if t < self.n {
                leaves.push(t);
            } else {
                stack.extend(self.blossomchilds[t].iter().rev());
            }
        }
        leaves
    }

    /// Labels the top-level blossom of `w` with `t`, reached through endpoint `p`.
    /// A T-label immediately S-labels the mate of the blossom base.
    fn assign_label(&mut self, w: usize, t: u8, p: usize) {
        let (mut w, mut t, mut p) = (w, t, p);
        loop {
            let b = self.inblossom[w];
            debug_assert!(self.label[w] == FREE && self.label[b] == FREE);
            self.label[w] = t;
            self.label[b] = t;
            self.labelend[w] = p;
            self.labelend[b] = p;
            self.bestedge[w] = NIL;
            self.bestedge[b] = NIL;
            if t == S {
                let leaves = self.blossom_leaves(b);
                self.queue.extend(leaves);
                return;
            }
            let base_mate = self.mate[self.blossombase[b]];
            debug_assert!(base_mate != NIL);
            w = self.endpoint[base_mate];
            t = S;
            p = base_mate ^ 1;
        }
    }

    /// Traces back from `v` and `w` to find either a new blossom (returns its
    /// base) or an augmenting path (returns `NIL`).
    fn scan_blossom(&mut self, v: usize, w: usize) -> usize {
        let mut path = Vec::new();
        let mut base = NIL;
        let (mut v, mut w) = (v, w);
        while v != NIL || w != NIL {
            let b = self.inblossom[v];
            if self.label[b] & BREADCRUMB != 0 {
                base = self.blossombase[b];
                break;
            }
            debug_assert_eq!(self.label[b], S);
            path.push(b);
            self.label[b] = S | BREADCRUMB;
            if self.labelend[b] == NIL {
                // Root of the alternating tree.
                v = NIL;
            } else {
                v = self.endpoint[self.labelend[b]];
                let bt = self.inblossom[v];
                debug_assert_eq!(self.label[bt], T);
                v = self.endpoint[self.labelend[bt]];
            }
            if w != NIL {
                std::mem::swap(&mut v, &mut w);
            }
        }
        for b in path {
            self.label[b] = S;
        }
        base
    }

    /// Shrinks the odd cycle closed by edge `k` into a new S-blossom with
    /// the given base.
    fn add_blossom(&mut self, base: usize, k: usize) -> TspResult<()> {
        let (mut v, mut w, _) = self.edges[k];
        let bb = self.inblossom[base];
        let mut bv = self.inblossom[v];
        let mut bw = self.inblossom[w];
        let b = self
            .unusedblossoms
            .pop()
            .ok_or_else(|| TspError::invariant("blossom pool exhausted"))?;

        self.blossombase[b] = base;
        self.blossomparent[b] = NIL;
        self.blossomparent[bb] = b;

        let mut path = Vec::new();
        let mut endps = Vec::new();
        while bv != bb {
            self.blossomparent[bv] = b;
            path.push(bv);
            endps.push(self.labelend[bv]);
            v = self.endpoint[self.labelend[bv]];
            bv = self.inblossom[v];
        }
        path.push(bb);
        path.reverse();
        endps.reverse();
        endps.push(2 * k);
        while bw != bb {
            self.blossomparent[bw] = b;
            path.push(bw);
            endps.push(self.labelend[bw] ^ 1);
            w = self.endpoint[self.labelend[bw]];
            bw = self.inblossom[w];
        }
        debug_assert_eq!(self.label[bb], S);
        self.blossomchilds[b] = path.clone();
        self.blossomendps[b] = endps;
        self.label[b] = S;
        self.labelend[b] = self.labelend[bb];
        self.dualvar[b] = 0.0;

        for leaf in self.blossom_leaves(b) {
            if self.label[self.inblossom[leaf]] == T {
                // Former T-vertices are now S and must be scanned.
                self.queue.push(leaf);
            }
            self.inblossom[leaf] = b;
        }

        // Least-slack edges from the new blossom to every other S-blossom.
        let mut bestedgeto = vec![NIL; 2 * self.n];
        for &child in &path {
            let nblists: Vec<Vec<usize>> = match self.blossombestedges[child].take() {
                Some(list) => vec![list],
                None => self
                    .blossom_leaves(child)
                    .into_iter()
                    .map(|leaf| self.neighbend[leaf].iter().map(|p| p / 2).collect())
                    .collect(),
            };
            for k in nblists.into_iter().flatten() {
                let (i, j, _) = self.edges[k];
                let j = if self.inblossom[j] == b { i } else { j };
                let bj = self.inblossom[j];
                if bj != b
                    && self.label[bj] == S
                    && (bestedgeto[bj] == NIL || self.slack(k) < self.slack(bestedgeto[bj]))
                {
                    bestedgeto[bj] = k;
                }
            }
            self.bestedge[child] = NIL;
        }
        let best: Vec<usize> = bestedgeto.into_iter().filter(|&k| k != NIL).collect();
        self.bestedge[b] = NIL;
        for &k in &best {
            if self.bestedge[b] == NIL || self.slack(k) < self.slack(self.bestedge[b]) {
                self.bestedge[b] = k;
            }
        }
        self.blossombestedges[b] = Some(best);
        Ok(())
    }

    /// Dissolves blossom `b` into its children. Mid-stage, a T-blossom's
    /// children along the even path are relabelled to keep the tree valid.
    fn expand_blossom(&mut self, b: usize, endstage: bool) {
        let childs = self.blossomchilds[b].clone();
        let endps = self.blossomendps[b].clone();
        for &s in &childs {
            self.blossomparent[s] = NIL;
            if s < self.n {
                self.inblossom[s] = s;
            } else if endstage && self.dualvar[s] == 0.0 {
                self.expand_blossom(s, endstage);
            } else {
                for leaf in self.blossom_leaves(s) {
                    self.inblossom[leaf] = s;
                }
            }
        }

        if !endstage && self.label[b] == T {
            let len = childs.len() as isize;
            let at = |j: isize| j.rem_euclid(len) as usize;
            let entrychild = self.inblossom[self.endpoint[self.labelend[b] ^ 1]];
            let mut j = childs
                .iter()
                .position(|&c| c == entrychild)
                .map_or(0, |i| i as isize);
            let (jstep, endptrick): (isize, usize) = if j & 1 != 0 {
                j -= len;
                (1, 0)
            } else {
                (-1, 1)
            };

            // Relabel the even-length path from the entry child to the base.
            let mut p = self.labelend[b];
            while j != 0 {
                self.label[self.endpoint[p ^ 1]] = FREE;
                let q = endps[at(j - endptrick as isize)] ^ endptrick;
                self.label[self.endpoint[q ^ 1]] = FREE;
                self.assign_label(self.endpoint[p ^ 1], T, p);
                self.allowedge[q / 2] = true;
                j += jstep;
                p = endps[at(j - endptrick as isize)] ^ endptrick;
                self.allowedge[p / 2] = true;
                j += jstep;
            }

            let bv = childs[at(j)];
            let ep = self.endpoint[p ^ 1];
            self.label[ep] = T;
            self.label[bv] = T;
            self.labelend[ep] = p;
            self.labelend[bv] = p;
            self.bestedge[bv] = NIL;
            j += jstep;

            // Children on the odd path may be reachable from outside.
            while childs[at(j)] != entrychild {
                let bv = childs[at(j)];
                if self.label[bv] == S {
                    j += jstep;
                    continue;
                }
                let reached = self
                    .blossom_leaves(bv)
                    .into_iter()
                    .find(|&leaf| self.label[leaf] != FREE);
                if let Some(leaf) = reached {
                    debug_assert_eq!(self.label[leaf], T);
                    self.label[leaf] = FREE;
                    let base_mate = self.mate[self.blossombase[bv]];
                    self.label[self.endpoint[base_mate]] = FREE;
                    self.assign_label(leaf, T, self.labelend[leaf]);
                }
                j += jstep;
            }
        }

        self.label[b] = FREE;
        self.labelend[b] = NIL;
        self.blossomchilds[b].clear();
        self.blossomendps[b].clear();
        self.blossombase[b] = NIL;
        self.blossombestedges[b] = None;
        self.bestedge[b] = NIL;
        self.unusedblossoms.push(b);
    }

    /// Swaps matched and unmatched edges on the path from vertex `v` to the
    /// base of blossom `b`, making `v` the new base.
    fn augment_blossom(&mut self, b: usize, v: usize) {
        let mut t = v;
        while self.blossomparent[t] != b {
            t = self.blossomparent[t];
        }
        if t >= self.n {
            self.augment_blossom(t, v);
        }

        let len = self.blossomchilds[b].len() as isize;
        let at = |j: isize| j.rem_euclid(len) as usize;
        let i = self.blossomchilds[b]
            .iter()
            .position(|&c| c == t)
            .unwrap_or(0);
        let mut j = i as isize;
        let (jstep, endptrick): (isize, usize) = if i & 1 != 0 {
            j -= len;
            (1, 0)
        } else {
            (-1, 1)
        };

        while j != 0 {
            j += jstep;
            let child = self.blossomchilds[b][at(j)];
            let p = self.blossomendps[b][at(j - endptrick as isize)] ^ endptrick;
            if child >= self.n {
                self.augment_blossom(child, self.endpoint[p]);
            }
            j += jstep;
            let child = self.blossomchilds[b][at(j)];
            if child >= self.n {
                self.augment_blossom(child, self.endpoint[p ^ 1]);
            }
            self.mate[self.endpoint[p]] = p ^ 1;
            self.mate[self.endpoint[p ^ 1]] = p;
        }

        self.blossomchilds[b].rotate_left(i);
        self.blossomendps[b].rotate_left(i);
        self.blossombase[b] = self.blossombase[self.blossomchilds[b][0]];
        debug_assert_eq!(self.blossombase[b], v);
    }

    /// Flips the augmenting path through edge `k` between two S-vertices.
    fn augment_matching(&mut self, k: usize) {
        let (v, w, _) = self.edges[k];
        for (start, start_p) in [(v, 2 * k + 1), (w, 2 * k)] {
            let (mut s, mut p) = (start, start_p);
            loop {
                let bs = self.inblossom[s];
                debug_assert_eq!(self.label[bs], S);
                if bs >= self.n {
                    self.augment_blossom(bs, s);
                }
                self.mate[s] = p;
                if self.labelend[bs] == NIL {
                    // Reached a free vertex at the tree root.
                    break;
                }
                let t = self.endpoint[self.labelend[bs]];
                let bt = self.inblossom[t];
                debug_assert_eq!(self.label[bt], T);
                s = self.endpoint[self.labelend[bt]];
                let j = self.endpoint[self.labelend[bt] ^ 1];
                if bt >= self.n {
                    self.augment_blossom(bt, j);
                }
                self.mate[j] = self.labelend[bt];
                p = self.labelend[bt] ^ 1;
            }
        }
    }

    fn solve(&mut self, max_cardinality: bool, cancel: &CancelFlag) -> TspResult<()> {
        let n = self.n;
        for _ in 0..n {
            cancel.check("matching")?;

            self.label.fill(FREE);
            self.bestedge.fill(NIL);
            for b in n..2 * n {
                self.blossombestedges[b] = None;
            }
            self.allowedge.fill(false);
            self.queue.clear();

            for v in 0..n {
                if self.mate[v] == NIL && self.label[self.inblossom[v]] == FREE {
                    self.assign_label(v, S, NIL);
                }
            }

            let mut augmented = false;
            loop {
                while !augmented {
                    let Some(v) = self.queue.pop() else { break };
                    debug_assert_eq!(self.label[self.inblossom[v]], S);
                    for idx in 0..self.neighbend[v].len() {
                        let p = self.neighbend[v][idx];
                        let k = p / 2;
                        let w = self.endpoint[p];
                        if self.inblossom[v] == self.inblossom[w] {
                            continue;
                        }
                        let mut kslack = 0.0;
                        if !self.allowedge[k] {
                            kslack = self.slack(k);
                            if kslack <= 0.0 {
                                self.allowedge[k] = true;
                            }
                        }
                        if self.allowedge[k] {
                            if self.label[self.inblossom[w]] == FREE {
                                self.assign_label(w, T, p ^ 1);
                            } else if self.label[self.inblossom[w]] == S {
                                let base = self.scan_blossom(v, w);
                                if base != NIL {
                                    self.add_blossom(base, k)?;
                                } else {
                                    self.augment_matching(k);
                                    augmented = true;
                                    break;
                                }
                            } else if self.label[w] == FREE {
                                // w sits inside a T-blossom but is not yet reached.
                                self.label[w] = T;
                                self.labelend[w] = p ^ 1;
                            }
                        } else if self.label[self.inblossom[w]] == S {
                            let b = self.inblossom[v];
                            if self.bestedge[b] == NIL || kslack < self.slack(self.bestedge[b]) {
                                self.bestedge[b] = k;
                            }
                        } else if self.label[w] == FREE
                            && (self.bestedge[w] == NIL || kslack < self.slack(self.bestedge[w]))
                        {
                            self.bestedge[w] = k;
                        }
                    }
                }
                if augmented {
                    break;
                }

                let mut delta_type = 0u8;
                let mut delta = 0.0;
                let mut delta_edge = NIL;
                let mut delta_blossom = NIL;

                if !max_cardinality {
                    delta_type = 1;
                    delta = self.dualvar[..n].iter().copied().fold(f64::INFINITY, f64::min);
                }
                for v in 0..n {
                    if self.label[self.inblossom[v]] == FREE && self.bestedge[v] != NIL {
                        let d = self.slack(self.bestedge[v]);
                        if delta_type == 0 || d < delta {
                            delta = d;
                            delta_type = 2;
                            delta_edge = self.bestedge[v];
                        }
                    }
                }
                for b in 0..2 * n {
                    if self.blossomparent[b] == NIL && self.label[b] == S && self.bestedge[b] != NIL {
                        let d = self.slack(self.bestedge[b]) / 2.0;
                        if delta_type == 0 || d < delta {
                            delta = d;
                            delta_type = 3;
                            delta_edge = self.bestedge[b];
                        }
                    }
                }
                for b in n..2 * n {
                    if self.blossombase[b] != NIL
                        && self.blossomparent[b] == NIL
                        && self.label[b] == T
                        && (delta_type == 0 || self.dualvar[b] < delta)
                    {
                        delta = self.dualvar[b];
                        delta_type = 4;
                        delta_blossom = b;
                    }
                }
                if delta_type == 0 {
                    // No further progress possible: maximum cardinality reached.
                    delta_type = 1;
                    delta = self.dualvar[..n]
                        .iter()
                        .copied()
                        .fold(f64::INFINITY, f64::min)
                        .max(0.0);
                }

                for v in 0..n {
                    match self.label[self.inblossom[v]] {
                        S => self.dualvar[v] -= delta,
                        T => self.dualvar[v] += delta,
                        _ => {}
                    }
                }
                for b in n..2 * n {
                    if self.blossombase[b] != NIL && self.blossomparent[b] == NIL {
                        match self.label[b] {
                            S => self.dualvar[b] += delta,
                            T => self.dualvar[b] -= delta,
                            _ => {}
                        }
                    }
                }

                match delta_type {
                    1 => break,
                    2 => {
                        self.allowedge[delta_edge] = true;
                        let (i, j, _) = self.edges[delta_edge];
                        let i = if self.label[self.inblossom[i]] == FREE { j } else { i };
                        self.queue.push(i);
                    }
                    3 => {
                        self.allowedge[delta_edge] = true;
                        let (i, _, _) = self.edges[delta_edge];
                        self.queue.push(i);
                    }
                    _ => self.expand_blossom(delta_blossom, false),
                }
            }

            if !augmented {
                break;
            }

            // Expand S-blossoms whose dual reached zero.
            for b in n..2 * n {
                if self.blossomparent[b] == NIL
                    && self.blossombase[b] != NIL
                    && self.label[b] == S
                    && self.dualvar[b] == 0.0
                {
                    self.expand_blossom(b, true);
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mates(n: usize, edges: &[(usize, usize, f64)], max_cardinality: bool) -> Vec<Option<usize>> {
        max_weight_matching(n, edges, max_cardinality, &CancelFlag::new()).expect("matching")
    }

    #[test]
    fn test_empty() {
        assert_eq!(mates(0, &[], false), Vec::<Option<usize>>::new());
        assert_eq!(mates(2, &[], true), vec![None, None]);
    }

    #[test]
    fn test_single_edge() {
        assert_eq!(mates(2, &[(0, 1, 1.0)], false), vec![Some(1), Some(0)]);
    }

    #[test]
    fn test_prefers_heavier_edge() {
        let edges = [(1, 2, 10.0), (2, 3, 11.0)];
        assert_eq!(mates(4, &edges, false), vec![None, None, Some(3), Some(2)]);
    }

    #[test]
    fn test_max_cardinality_overrides_weight() {
        let edges = [(1, 2, 5.0), (2, 3, 11.0), (3, 4, 5.0)];
        assert_eq!(mates(5, &edges, false), vec![None, None, Some(3), Some(2), None]);
        assert_eq!(
            mates(5, &edges, true),
            vec![None, Some(2), Some(1), Some(4), Some(3)]
        );
    }

    #[test]
    fn test_s_blossom() {
        // Triangle 1-2-3 forms a blossom; the pendant edge 3-4 augments through it.
        let edges = [(1, 2, 8.0), (1, 3, 9.0), (2, 3, 10.0), (3, 4, 7.0)];
        assert_eq!(
            mates(5, &edges, false),
            vec![None, Some(2), Some(1), Some(4), Some(3)]
        );
        let edges = [
            (1, 2, 8.0),
            (1, 3, 9.0),
            (2, 3, 10.0),
            (3, 4, 7.0),
            (1, 6, 5.0),
            (4, 5, 6.0),
        ];
        assert_eq!(
            mates(7, &edges, false),
            vec![None, Some(6), Some(3), Some(2), Some(5), Some(4), Some(1)]
        );
    }

    #[test]
    fn test_t_blossom_expansion() {
        let edges = [
            (1, 2, 9.0),
            (1, 3, 8.0),
            (2, 3, 10.0),
            (1, 4, 5.0),
            (4, 5, 4.0),
            (1, 6, 3.0),
        ];
        assert_eq!(
            mates(7, &edges, false),
            vec![None, Some(6), Some(3), Some(2), Some(5), Some(4), Some(1)]
        );
    }

    #[test]
    fn test_nested_s_blossom() {
        let edges = [
            (1, 2, 9.0),
            (1, 3, 9.0),
            (2, 3, 10.0),
            (2, 4, 8.0),
            (3, 5, 8.0),
            (4, 5, 10.0),
            (5, 6, 6.0),
        ];
        assert_eq!(
            mates(7, &edges, false),
            vec![None, Some(3), Some(4), Some(1), Some(2), Some(6), Some(5)]
        );
    }

    #[test]
    fn test_relabel_nested_s_blossom() {
        let edges = [
            (1, 2, 10.0),
            (1, 7, 10.0),
            (2, 3, 12.0),
            (3, 4, 20.0),
            (3, 5, 20.0),
            (4, 5, 25.0),
            (5, 6, 10.0),
            (6, 7, 10.0),
            (7, 8, 8.0),
        ];
        assert_eq!(
            mates(9, &edges, false),
            vec![
                None,
                Some(2),
                Some(1),
                Some(4),
                Some(3),
                Some(6),
                Some(5),
                Some(8),
                Some(7)
            ]
        );
    }

    #[test]
    fn test_nested_s_blossom_expand() {
        let edges = [
            (1, 2, 8.0),
            (1, 3, 8.0),
            (2, 3, 10.0),
            (2, 4, 12.0),
            (3, 5, 12.0),
            (4, 5, 14.0),
            (4, 6, 12.0),
            (5, 7, 12.0),
            (6, 7, 14.0),
            (7, 8, 12.0),
        ];
        assert_eq!(
            mates(9, &edges, false),
            vec![
                None,
                Some(2),
                Some(1),
                Some(5),
                Some(6),
                Some(3),
                Some(4),
                Some(8),
                Some(7)
            ]
        );
    }

    #[test]
    fn test_s_blossom_t_expand() {
        let edges = [
            (1, 2, 23.0),
            (1, 5, 22.0),
            (1, 6, 15.0),
            (2, 3, 25.0),
            (3, 4, 22.0),
            (4, 5, 25.0),
            (4, 8, 14.0),
            (5, 7, 13.0),
        ];
        assert_eq!(
            mates(9, &edges, false),
            vec![
                None,
                Some(6),
                Some(3),
                Some(2),
                Some(8),
                Some(7),
                Some(1),
                Some(5),
                Some(4)
            ]
        );
    }

    #[test]
    fn test_nested_blossom_relabel_expand() {
        let edges = [
            (1, 2, 19.0),
            (1, 3, 20.0),
            (1, 8, 8.0),
            (2, 3, 25.0),
            (2, 4, 18.0),
            (3, 5, 18.0),
            (4, 5, 13.0),
            (4, 7, 7.0),
            (5, 6, 7.0),
        ];
        assert_eq!(
            mates(9, &edges, false),
            vec![
                None,
                Some(8),
                Some(3),
                Some(2),
                Some(7),
                Some(6),
                Some(5),
                Some(4),
                Some(1)
            ]
        );
    }

    #[test]
    fn test_cancelled() {
        let cancel = CancelFlag::new();
        cancel.cancel();
        assert_eq!(
            max_weight_matching(2, &[(0, 1, 1.0)], true, &cancel).unwrap_err(),
            TspError::Cancelled("matching")
        );
    }
}
