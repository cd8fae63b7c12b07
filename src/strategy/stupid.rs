//! A single bad strategy to show how they are written.

use std::fmt::Display;

use crate::{
    strategy::{GameState, Guess, Strategy},
    HangmanError, Result,
};

/// A Hangman strategy that guesses the alphabet in order.
///
/// This exists to show how [`Strategy`](super::Strategy) is implemented and
/// to serve as a baseline in the [test harness](crate::Harness). Secrets with
/// letters outside `a` to `z` can never be finished, so once the alphabet is
/// exhausted it gives up with [`HangmanError::NoGuessesLeft`].
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Stupid;

impl Strategy for Stupid {
    fn next_guess(&self, game: &dyn GameState) -> Result<Guess> {
        let guessed = game.all_guessed_letters();
        ('a'..='z')
            .find(|c| !guessed.contains(c))
            .map(Guess::Letter)
            .ok_or(HangmanError::NoGuessesLeft)
    }

    fn version(&self) -> &'static str {
        "0.1.0"
    }
}

impl Display for Stupid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "hangman_rs::Stupid")
    }
}
