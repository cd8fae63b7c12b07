#![doc = include_str!("../README.md")]

// Required to rename serde
#[cfg(feature = "serde")]
extern crate serde_crate as serde;

use thiserror::Error;

pub mod strategy;
pub use strategy::{GameState, Guess, Strategy};

pub mod game;
pub use game::{Game, Status};

pub mod words;

pub mod harness;
pub use harness::Harness;

pub mod perf;
pub use perf::{Perf, Summary};

/// The character a [`GameState`] uses to hide letters that have not been
/// revealed yet.
pub const MYSTERY_LETTER: char = '-';

/// A shorthand for results produced by `hangman_rs`.
pub type Result<T, E = HangmanError> = std::result::Result<T, E>;

/// The errors that `hangman_rs` can produce.
#[derive(Debug, Error)]
pub enum HangmanError {
    #[error("game encountered error")]
    Game {
        #[from]
        kind: GameError,
    },

    /// No dictionary word is consistent with the state of the game.
    ///
    /// The secret word always remains a candidate in a consistent game, so
    /// this means the dictionary lacks the secret or the game state was
    /// built incorrectly.
    #[error("no dictionary word of length {length} is consistent with the game")]
    NoCandidates { length: usize },

    /// The strategy has run out of guesses it is willing to make.
    #[error("the strategy has nothing left to guess")]
    NoGuessesLeft,

    #[error("general IO error")]
    Io(#[from] std::io::Error),

    #[error("the test harness encountered an error")]
    Harness {
        #[from]
        kind: HarnessError,
    },
}

#[derive(Debug, Error)]
pub enum GameError {
    /// The game has already been won or lost.
    #[error("the game is already over")]
    GameOver,

    /// The secret word given to [`Game::new()`] has no letters.
    #[error("the secret word is empty")]
    EmptySecret,

    /// The secret word contains the mystery letter and could never be
    /// distinguished from its own mask.
    #[error("the secret word \"{0}\" contains the mystery letter")]
    InvalidSecret(String),

    /// The letter or word was already guessed in this game.
    #[error("\"{0}\" was already guessed")]
    RepeatedGuess(String),
}

#[derive(Debug, Error)]
pub enum HarnessError {
    #[error("no strategies have been added to the harness")]
    NoStrategiesAdded,

    #[error("no secret words were given to the harness")]
    NoSecrets,

    #[cfg(feature = "serde")]
    #[error("trouble serializing the record")]
    Serde(#[from] serde_json::Error),
}
