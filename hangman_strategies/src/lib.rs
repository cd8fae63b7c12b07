#![doc = include_str!("../README.md")]
#![deny(missing_docs)]

mod strategies;

pub mod combos;
pub mod partition;
pub mod util;

pub use strategies::*;
