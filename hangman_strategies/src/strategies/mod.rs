//! Some strategies for use with `hangman_rs`.
//!
//! Each strategy consists of a single struct, and everything you need to
//! configure the strategy should exist as a method.

mod entropy;
pub use entropy::{ComboAndEntropy, Entropy};
