//! Tools for defining Hangman strategies.

use std::{
    collections::BTreeSet,
    fmt::{Debug, Display},
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{Result, MYSTERY_LETTER};

pub mod stupid;

/// A single move in a game of Hangman.
///
/// Strategies return one of these from [`Strategy::next_guess()`], and the
/// caller applies it to the game with [`Game::guess()`](crate::Game::guess()).
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
pub enum Guess {
    /// Guess that the secret word contains this letter.
    Letter(char),

    /// Guess that the secret word is exactly this word.
    Word(String),
}

impl Display for Guess {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Guess::Letter(c) => write!(f, "GuessLetter[{}]", c),
            Guess::Word(w) => write!(f, "GuessWord[{}]", w),
        }
    }
}

/// The read-only view of a game that a [`Strategy`] is allowed to see.
///
/// [`Game`](crate::Game) implements this, but a strategy only ever depends
/// on the trait, so any other game representation can drive one.
pub trait GameState {
    /// The number of letters in the secret word.
    fn secret_word_length(&self) -> usize;

    /// The secret word with every unrevealed position replaced by
    /// [`mystery_letter()`](GameState::mystery_letter()).
    ///
    /// This always has [`secret_word_length()`](GameState::secret_word_length())
    /// characters.
    fn guessed_so_far(&self) -> &[char];

    /// The placeholder used in [`guessed_so_far()`](GameState::guessed_so_far()).
    fn mystery_letter(&self) -> char {
        MYSTERY_LETTER
    }

    /// Every letter guessed so far, whether it was in the word or not.
    fn all_guessed_letters(&self) -> &BTreeSet<char>;

    /// Every whole word guessed so far that turned out to be wrong.
    fn incorrectly_guessed_words(&self) -> &BTreeSet<String>;
}

/// Trait defining a Hangman strategy.
///
/// To write a strategy, define a new struct, implement [`Display`] on it
/// (the test harness uses it to name the strategy, so do not use linebreaks),
/// and then implement this trait.
///
/// ```rust
/// use std::fmt::Display;
/// use hangman_rs::{GameState, Guess, Strategy};
///
/// #[derive(Debug)]
/// struct AlwaysE;
///
/// impl Display for AlwaysE {
///     fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
///         write!(f, "AlwaysE")
///     }
/// }
///
/// impl Strategy for AlwaysE {
///     fn next_guess(&self, _game: &dyn GameState) -> hangman_rs::Result<Guess> {
///         Ok(Guess::Letter('e'))
///     }
///
///     fn version(&self) -> &'static str {
///         "0.1.0"
///     }
/// }
/// ```
pub trait Strategy: Display + Debug + Sync {
    /// Picks the next guess for the given game.
    ///
    /// Implementations should return an error rather than panic when the
    /// game state is inconsistent with what they know.
    fn next_guess(&self, game: &dyn GameState) -> Result<Guess>;

    /// Provides a version for this strategy.
    ///
    /// You should ensure that this changes each time you update the logic of
    /// the strategy in order to produce meaningful comparisons.
    fn version(&self) -> &'static str;
}
