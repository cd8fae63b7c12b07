//! A concrete game of Hangman.

use std::{collections::BTreeSet, fmt::Display};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    strategy::{GameState, Guess, Strategy},
    GameError, Result, MYSTERY_LETTER,
};

/// The score given to a game that was lost.
pub const LOST_SCORE: usize = 25;

/// Where a [`Game`] stands after a guess.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Debug, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
pub enum Status {
    /// Every letter of the secret word has been revealed.
    Won,

    /// The player made more wrong guesses than the game allows.
    Lost,

    /// Neither of the above.
    KeepGuessing,
}

impl Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Status::Won => write!(f, "GAME_WON"),
            Status::Lost => write!(f, "GAME_LOST"),
            Status::KeepGuessing => write!(f, "KEEP_GUESSING"),
        }
    }
}

/// A game of Hangman with a known secret word.
///
/// Letters and words are lowercased before they are compared, so the game is
/// case-insensitive. A game is lost once the number of wrong guesses (letters
/// and words together) exceeds `max_wrong_guesses`.
///
/// # Examples
///
/// ```rust
/// use hangman_rs::{Game, GameState, Status};
///
/// let mut game = Game::new("cat", 5)?;
/// assert_eq!(game.guess_letter('t')?, Status::KeepGuessing);
/// assert_eq!(game.guessed_so_far(), &['-', '-', 't']);
///
/// assert_eq!(game.guess_word("cot")?, Status::KeepGuessing);
/// assert_eq!(game.num_wrong_guesses(), 1);
///
/// assert_eq!(game.guess_word("cat")?, Status::Won);
/// assert_eq!(game.score(), 2);
/// #
/// # Ok::<_, hangman_rs::HangmanError>(())
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Game {
    secret: Vec<char>,
    guessed_so_far: Vec<char>,
    max_wrong_guesses: usize,
    correctly_guessed_letters: BTreeSet<char>,
    incorrectly_guessed_letters: BTreeSet<char>,
    all_guessed_letters: BTreeSet<char>,
    incorrectly_guessed_words: BTreeSet<String>,
}

impl Game {
    /// Creates a new game for `secret`.
    ///
    /// Returns an error if the secret is empty or contains
    /// [`MYSTERY_LETTER`].
    pub fn new(secret: &str, max_wrong_guesses: usize) -> Result<Self> {
        let secret: Vec<char> = secret.to_lowercase().chars().collect();
        if secret.is_empty() {
            return Err(GameError::EmptySecret.into());
        }
        if secret.contains(&MYSTERY_LETTER) {
            return Err(GameError::InvalidSecret(secret.into_iter().collect()).into());
        }

        Ok(Game {
            guessed_so_far: vec![MYSTERY_LETTER; secret.len()],
            secret,
            max_wrong_guesses,
            correctly_guessed_letters: BTreeSet::new(),
            incorrectly_guessed_letters: BTreeSet::new(),
            all_guessed_letters: BTreeSet::new(),
            incorrectly_guessed_words: BTreeSet::new(),
        })
    }

    /// Applies a [`Guess`] to the game.
    pub fn guess(&mut self, guess: &Guess) -> Result<Status> {
        match guess {
            Guess::Letter(c) => self.guess_letter(*c),
            Guess::Word(w) => self.guess_word(w),
        }
    }

    /// Guesses that the secret word contains `letter`.
    ///
    /// Every occurrence of the letter is revealed. Guessing a letter twice
    /// or guessing after the game ended is an error.
    pub fn guess_letter(&mut self, letter: char) -> Result<Status> {
        self.guard()?;

        // `to_lowercase` may expand to several chars; only the first is kept
        let letter = letter.to_lowercase().next().unwrap_or(letter);
        if !self.all_guessed_letters.insert(letter) {
            return Err(GameError::RepeatedGuess(letter.to_string()).into());
        }

        let mut found = false;
        for (revealed, &c) in self.guessed_so_far.iter_mut().zip(self.secret.iter()) {
            if c == letter {
                *revealed = c;
                found = true;
            }
        }

        if found {
            self.correctly_guessed_letters.insert(letter);
        } else {
            self.incorrectly_guessed_letters.insert(letter);
        }

        Ok(self.status())
    }

    /// Guesses that the secret word is `word`.
    ///
    /// A correct guess reveals the whole word. A wrong guess counts towards
    /// the wrong-guess limit. Guessing the same wrong word twice or guessing
    /// after the game ended is an error.
    pub fn guess_word(&mut self, word: &str) -> Result<Status> {
        self.guard()?;

        let word = word.to_lowercase();
        if word.chars().eq(self.secret.iter().copied()) {
            self.guessed_so_far.clone_from(&self.secret);
        } else if !self.incorrectly_guessed_words.insert(word.clone()) {
            return Err(GameError::RepeatedGuess(word).into());
        }

        Ok(self.status())
    }

    fn guard(&self) -> Result<()> {
        match self.status() {
            Status::KeepGuessing => Ok(()),
            _ => Err(GameError::GameOver.into()),
        }
    }

    /// Returns the current status of the game.
    pub fn status(&self) -> Status {
        if !self.guessed_so_far.contains(&MYSTERY_LETTER) {
            Status::Won
        } else if self.num_wrong_guesses() > self.max_wrong_guesses {
            Status::Lost
        } else {
            Status::KeepGuessing
        }
    }

    /// The number of wrong letter and word guesses made so far.
    pub fn num_wrong_guesses(&self) -> usize {
        self.incorrectly_guessed_letters.len() + self.incorrectly_guessed_words.len()
    }

    /// The number of wrong guesses allowed before the game is lost.
    pub fn max_wrong_guesses(&self) -> usize {
        self.max_wrong_guesses
    }

    /// The letters guessed so far that are in the secret word.
    pub fn correctly_guessed_letters(&self) -> &BTreeSet<char> {
        &self.correctly_guessed_letters
    }

    /// The letters guessed so far that are not in the secret word.
    pub fn incorrectly_guessed_letters(&self) -> &BTreeSet<char> {
        &self.incorrectly_guessed_letters
    }

    /// The score of the game, lower is better.
    ///
    /// A lost game scores [`LOST_SCORE`]. Otherwise every wrong guess and
    /// every correctly guessed letter costs one point.
    pub fn score(&self) -> usize {
        match self.status() {
            Status::Lost => LOST_SCORE,
            _ => self.num_wrong_guesses() + self.correctly_guessed_letters.len(),
        }
    }

    /// The secret word. Strategies must not look at this.
    pub fn secret(&self) -> String {
        self.secret.iter().collect()
    }
}

impl GameState for Game {
    fn secret_word_length(&self) -> usize {
        self.secret.len()
    }

    fn guessed_so_far(&self) -> &[char] {
        &self.guessed_so_far
    }

    fn all_guessed_letters(&self) -> &BTreeSet<char> {
        &self.all_guessed_letters
    }

    fn incorrectly_guessed_words(&self) -> &BTreeSet<String> {
        &self.incorrectly_guessed_words
    }
}

impl Display for Game {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mask: String = self.guessed_so_far.iter().collect();
        write!(
            f,
            "{}; score={}; status={}",
            mask,
            self.score(),
            self.status()
        )
    }
}

/// Plays `game` with `strategy` until it is won or lost.
///
/// Returns every guess the strategy made, in order.
pub fn play(strategy: &dyn Strategy, game: &mut Game) -> Result<Vec<Guess>> {
    let mut guesses = Vec::new();
    play_into(strategy, game, &mut guesses)?;
    Ok(guesses)
}

/// Like [`play()`], but pushes the guesses onto `guesses` as they are made,
/// so they survive a strategy error halfway through the game.
pub(crate) fn play_into(
    strategy: &dyn Strategy,
    game: &mut Game,
    guesses: &mut Vec<Guess>,
) -> Result<()> {
    while game.status() == Status::KeepGuessing {
        let guess = strategy.next_guess(game)?;
        log::trace!("{}: {} -> {}", strategy, game, guess);
        game.guess(&guess)?;
        guesses.push(guess);
    }
    log::debug!("{} finished {}: {}", strategy, game.secret(), game);
    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{strategy::stupid::Stupid, HangmanError};

    macro_rules! game_test {
        (I $game:ident; L $letter:expr => $status:ident, $mask:expr) => {{
            assert_eq!($game.guess_letter($letter)?, Status::$status);
            assert_eq!($game.guessed_so_far().iter().collect::<String>(), $mask);
        }};

        (I $game:ident; W $word:expr => $status:ident, $mask:expr) => {{
            assert_eq!($game.guess_word($word)?, Status::$status);
            assert_eq!($game.guessed_so_far().iter().collect::<String>(), $mask);
        }};

        ($fn_name:ident[$secret:expr, max = $max:expr => $( [$kind:ident $guess:expr => $status:ident, $mask:expr]; )* score = $score:expr]) => {
            #[test]
            fn $fn_name() -> Result<(), HangmanError> {
                let mut game = Game::new($secret, $max)?;

                $(game_test!(I game; $kind $guess => $status, $mask);)*

                assert_eq!(game.score(), $score);

                Ok(())
            }
        };
    }

    game_test! { reveals_every_occurrence ["banana", max = 5 =>
        [L 'a' => KeepGuessing, "-a-a-a"];
        [L 'n' => KeepGuessing, "-anana"];
        [L 'b' => Won, "banana"];
        score = 3]
    }

    game_test! { wrong_letters_count ["cat", max = 5 =>
        [L 'e' => KeepGuessing, "---"];
        [L 'c' => KeepGuessing, "c--"];
        [L 'o' => KeepGuessing, "c--"];
        score = 3]
    }

    game_test! { word_guess_wins ["cat", max = 5 =>
        [L 't' => KeepGuessing, "--t"];
        [W "cot" => KeepGuessing, "--t"];
        [W "cat" => Won, "cat"];
        score = 2]
    }

    game_test! { uppercase_guesses ["Cat", max = 5 =>
        [L 'C' => KeepGuessing, "c--"];
        [W "CAT" => Won, "cat"];
        score = 1]
    }

    game_test! { too_many_wrong_guesses ["cat", max = 2 =>
        [L 'x' => KeepGuessing, "---"];
        [W "dog" => KeepGuessing, "---"];
        [L 'y' => Lost, "---"];
        score = LOST_SCORE]
    }

    #[test]
    fn tracks_guessed_letters_and_words() -> Result<(), HangmanError> {
        let mut game = Game::new("cat", 5)?;
        game.guess_letter('a')?;
        game.guess_letter('z')?;
        game.guess_word("bat")?;

        assert_eq!(game.secret_word_length(), 3);
        assert_eq!(
            game.all_guessed_letters().iter().collect::<String>(),
            "az"
        );
        assert!(game.correctly_guessed_letters().contains(&'a'));
        assert!(game.incorrectly_guessed_letters().contains(&'z'));
        assert!(game.incorrectly_guessed_words().contains("bat"));
        assert_eq!(game.num_wrong_guesses(), 2);
        assert_eq!(format!("{}", game), "-a-; score=3; status=KEEP_GUESSING");
        Ok(())
    }

    #[test]
    fn rejects_repeats_and_finished_games() -> Result<(), HangmanError> {
        let mut game = Game::new("to", 5)?;
        game.guess_letter('t')?;
        assert!(matches!(
            game.guess_letter('t'),
            Err(HangmanError::Game {
                kind: GameError::RepeatedGuess(_)
            })
        ));

        game.guess_word("tv")?;
        assert!(game.guess_word("tv").is_err());

        game.guess_word("to")?;
        assert!(matches!(
            game.guess_letter('x'),
            Err(HangmanError::Game {
                kind: GameError::GameOver
            })
        ));
        Ok(())
    }

    #[test]
    fn rejects_bad_secrets() {
        assert!(matches!(
            Game::new("", 5),
            Err(HangmanError::Game {
                kind: GameError::EmptySecret
            })
        ));
        assert!(matches!(
            Game::new("a-b", 5),
            Err(HangmanError::Game {
                kind: GameError::InvalidSecret(_)
            })
        ));
    }

    #[test]
    fn play_runs_to_completion() -> Result<(), HangmanError> {
        let mut game = Game::new("bad", 30)?;
        let guesses = play(&Stupid, &mut game)?;
        assert_eq!(game.status(), Status::Won);
        assert_eq!(
            guesses,
            vec![Guess::Letter('a'), Guess::Letter('b'), Guess::Letter('c'), Guess::Letter('d')]
        );
        Ok(())
    }
}
