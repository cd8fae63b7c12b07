//! Partitioning word lists by what a set of letters would reveal, and
//! scoring those partitions with Shannon entropy.

use std::{
    collections::{BTreeMap, BTreeSet},
    fmt::Display,
};

/// The placeholder [`Partition::new()`] uses for letters that stay hidden.
pub const MASK_CHAR: char = '_';

/// Renders `word` with every letter outside `letters` replaced by `marker`.
///
/// `marker` should not be a letter that can appear in real words, or masks
/// of different words may collide.
///
/// # Examples
///
/// ```rust
/// use std::collections::BTreeSet;
/// use hangman_strategies::partition::make_mask;
///
/// let word: Vec<char> = "banana".chars().collect();
/// let letters: BTreeSet<char> = ['a'].into_iter().collect();
/// assert_eq!(make_mask(&word, &letters, '_').iter().collect::<String>(), "_a_a_a");
/// ```
pub fn make_mask(word: &[char], letters: &BTreeSet<char>, marker: char) -> Vec<char> {
    word.iter()
        .map(|c| if letters.contains(c) { *c } else { marker })
        .collect()
}

/// A grouping of words by the mask they produce under one set of letters.
///
/// Two words in the same bucket cannot be told apart after guessing every
/// letter of the set. Every input word lands in exactly one bucket, and
/// buckets iterate in mask order, so building the same partition twice always
/// gives the same result.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Partition<'a> {
    buckets: BTreeMap<Vec<char>, Vec<&'a [char]>>,
}

impl<'a> Partition<'a> {
    /// Partitions `words` by their masks under `letters`.
    pub fn new<W>(words: &'a [W], letters: &BTreeSet<char>) -> Self
    where
        W: AsRef<[char]>,
    {
        let mut buckets: BTreeMap<Vec<char>, Vec<&'a [char]>> = BTreeMap::new();
        for word in words {
            let word = word.as_ref();
            buckets
                .entry(make_mask(word, letters, MASK_CHAR))
                .or_default()
                .push(word);
        }
        Partition { buckets }
    }

    /// The number of buckets.
    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    /// Whether there are no buckets, which only happens for no words.
    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    /// The number of words across every bucket.
    pub fn num_words(&self) -> usize {
        self.buckets.values().map(Vec::len).sum()
    }

    /// Iterates over the buckets in mask order.
    pub fn iter(&self) -> impl Iterator<Item = (&[char], &[&'a [char]])> {
        self.buckets
            .iter()
            .map(|(mask, words)| (mask.as_slice(), words.as_slice()))
    }

    /// The Shannon entropy of the bucket sizes, in bits.
    ///
    /// A partition with a single bucket has entropy zero: guessing its
    /// letters tells nothing about which word is the answer.
    pub fn entropy(&self) -> f64 {
        let total = self.num_words() as f64;
        self.buckets
            .values()
            .map(|bucket| {
                let p = bucket.len() as f64 / total;
                -p * p.log2()
            })
            .sum()
    }
}

impl Display for Partition<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, (mask, words)) in self.iter().enumerate() {
            let mask: String = mask.iter().collect();
            writeln!(f, "partition {}) n={} {}", i + 1, words.len(), mask)?;
            for word in words.iter().take(10) {
                write!(f, "{}, ", word.iter().collect::<String>())?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// The entropy of guessing one word out of `n` equally likely candidates.
///
/// The guess splits the candidates into the word itself and everything else.
/// With a single candidate left the guess is certain to win, which is
/// reported as infinite entropy.
pub fn entropy_of_word_guess(n: usize) -> f64 {
    debug_assert!(n > 0, "no candidates to guess from");
    match n {
        0 => 0.0,
        1 => f64::INFINITY,
        n => {
            let n = n as f64;
            [(n - 1.) / n, 1. / n]
                .iter()
                .map(|p| -p * p.log2())
                .sum()
        }
    }
}
