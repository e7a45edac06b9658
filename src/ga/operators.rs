//! Permutation operators for the genetic search.
//!
//! - [`random_permutation`]: Fisher–Yates shuffle of `0..n`
//! - [`order_crossover`]: OX with two distinct random cut points
//! - [`swap_mutation`]: exchange two distinct positions
//!
//! Every operator maps permutations to permutations.
//!
//! # Reference
//!
//! Davis, L. (1985). "Applying adaptive algorithms to epistatic domains",
//! *Proceedings of IJCAI* 85, 162-164.

use rand::Rng;

const EMPTY: usize = usize::MAX;

/// Uniformly random permutation of `0..n`.
pub fn random_permutation<R: Rng>(n: usize, rng: &mut R) -> Vec<usize> {
    let mut perm: Vec<usize> = (0..n).collect();

    // Fisher-Yates shuffle
    for i in (1..perm.len()).rev() {
        let j = rng.random_range(0..=i as u64) as usize;
        perm.swap(i, j);
    }
    perm
}

/// Order crossover with random cut points `start < end` drawn from `0..n`.
///
/// Parents shorter than two cities are returned as a copy of `parent1`.
pub fn order_crossover<R: Rng>(parent1: &[usize], parent2: &[usize], rng: &mut R) -> Vec<usize> {
    let n = parent1.len();
    if n < 2 {
        return parent1.to_vec();
    }
    let (start, end) = distinct_pair(n, rng);
    order_crossover_at(parent1, parent2, start, end)
}

/// Order crossover with fixed cut points.
///
/// The child keeps `parent1[start..end]` in place. The remaining slots are
/// filled left to right, from index 0, with the cities missing from the
/// segment in the order they appear in `parent2`.
///
/// Both parents must be permutations of the same `0..n` and
/// `start <= end <= n`.
///
/// # Examples
///
/// ```
/// use u_tsp::ga::operators::order_crossover_at;
///
/// let p1 = [0, 1, 2, 3, 4, 5];
/// let p2 = [2, 3, 5, 4, 1, 0];
/// assert_eq!(order_crossover_at(&p1, &p2, 2, 4), vec![5, 4, 2, 3, 1, 0]);
/// ```
pub fn order_crossover_at(parent1: &[usize], parent2: &[usize], start: usize, end: usize) -> Vec<usize> {
    let n = parent1.len();
    debug_assert_eq!(n, parent2.len());
    debug_assert!(start <= end && end <= n);

    let mut child = vec![EMPTY; n];
    let mut taken = vec![false; n];
    child[start..end].copy_from_slice(&parent1[start..end]);
    for &city in &parent1[start..end] {
        taken[city] = true;
    }

    let mut fill = 0;
    for &city in parent2 {
        if taken[city] {
            continue;
        }
        while child[fill] != EMPTY {
            fill += 1;
        }
        child[fill] = city;
        fill += 1;
    }
    child
}

/// Swaps two distinct random positions. No-op below two cities.
pub fn swap_mutation<R: Rng>(cities: &mut [usize], rng: &mut R) {
    if cities.len() < 2 {
        return;
    }
    let (i, j) = distinct_pair(cities.len(), rng);
    cities.swap(i, j);
}

/// Two distinct indices from `0..n` as `(smaller, larger)`. Requires `n >= 2`.
fn distinct_pair<R: Rng>(n: usize, rng: &mut R) -> (usize, usize) {
    let a = rng.random_range(0..n as u64) as usize;
    let mut b = rng.random_range(0..(n - 1) as u64) as usize;
    if b >= a {
        b += 1;
    }
    (a.min(b), a.max(b))
}
