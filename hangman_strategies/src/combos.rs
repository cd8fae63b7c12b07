//! Enumerating fixed-size subsets of a letter set.

use itertools::{Combinations, Itertools};
use std::iter::Copied;

/// A lazy iterator over every subset of exactly `size` letters.
///
/// Subsets come out in lexicographic order of the letters' positions in the
/// input slice, so the order is the same on every run. Cloning the iterator
/// (or building a new one) restarts the enumeration.
///
/// # Examples
///
/// ```rust
/// use hangman_strategies::combos::Combos;
///
/// let combos: Vec<Vec<char>> = Combos::new(&['a', 'b', 'c'], 2).collect();
/// assert_eq!(combos, vec![vec!['a', 'b'], vec!['a', 'c'], vec!['b', 'c']]);
/// ```
#[derive(Clone, Debug)]
pub struct Combos<'a, T: Copy> {
    inner: Combinations<Copied<std::slice::Iter<'a, T>>>,
}

impl<'a, T: Copy> Combos<'a, T> {
    /// Starts enumerating the subsets of `letters` with `size` elements.
    pub fn new(letters: &'a [T], size: usize) -> Self {
        Combos {
            inner: letters.iter().copied().combinations(size),
        }
    }
}

impl<'a, T: Copy> Iterator for Combos<'a, T> {
    type Item = Vec<T>;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }
}

/// The number of ways to choose `k` items out of `n`.
pub fn binomial(n: usize, k: usize) -> usize {
    if k > n {
        return 0;
    }
    let k = k.min(n - k);
    (0..k).fold(1, |acc, i| acc * (n - i) / (i + 1))
}
