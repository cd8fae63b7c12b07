use std::{
    collections::{BTreeSet, HashMap},
    fmt::Display,
};

use hangman_rs::{GameState, Guess, HangmanError, Result, Strategy};
use itertools::Itertools;
use rayon::prelude::*;

use crate::{
    combos::{binomial, Combos},
    partition::{entropy_of_word_guess, Partition},
    util::{filter_by_mask, filter_incorrect_words, unique_letters},
};

/// A pairing of a letter combination and the entropy it scored.
///
/// Scoring functions return this so that the winning letters and how good
/// they are come back together.
#[derive(Debug, Clone, PartialEq)]
pub struct ComboAndEntropy {
    combo: BTreeSet<char>,
    entropy: f64,
}

impl ComboAndEntropy {
    /// Pairs `combo` with its `entropy`.
    pub fn new(combo: BTreeSet<char>, entropy: f64) -> Self {
        ComboAndEntropy { combo, entropy }
    }

    /// The letters of the combination.
    pub fn combo(&self) -> &BTreeSet<char> {
        &self.combo
    }

    /// The entropy in bits, per guessed letter.
    pub fn entropy(&self) -> f64 {
        self.entropy
    }
}

impl Display for ComboAndEntropy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "ComboAndEntropy [combo=[{}], entropy={}]",
            self.combo.iter().join(", "),
            self.entropy
        )
    }
}

/// A Hangman strategy that picks the guess with the most Shannon entropy.
///
/// Each turn the strategy narrows its dictionary to the words the game still
/// allows and scores every combination of up to `look_ahead` unguessed
/// letters by how evenly it would split those words, per letter. The best
/// combination is reduced to its single best letter, which is then compared
/// with simply guessing the first remaining word.
///
/// Dictionary words are lowercased, like every guess and mask of
/// [`Game`](hangman_rs::Game).
///
/// # Examples
///
/// ```rust
/// use hangman_rs::{Game, Guess, Strategy};
/// use hangman_strategies::Entropy;
///
/// let strategy = Entropy::new(["bat", "cat", "bar", "car"]).look_ahead(2);
/// let game = Game::new("car", 5)?;
/// assert_eq!(strategy.next_guess(&game)?, Guess::Letter('b'));
/// #
/// # Ok::<_, hangman_rs::HangmanError>(())
/// ```
#[derive(Debug, Clone)]
pub struct Entropy {
    by_length: HashMap<usize, Vec<Vec<char>>>,
    look_ahead: usize,
    alphabet_size: usize,
    parallel: bool,
}

impl Entropy {
    /// Creates the strategy from a dictionary.
    ///
    /// Words are lowercased, and duplicate and empty words are dropped. The
    /// defaults are a look-ahead of one letter, a 26 letter alphabet and a
    /// sequential search.
    pub fn new<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut by_length: HashMap<usize, Vec<Vec<char>>> = HashMap::new();
        for word in words
            .into_iter()
            .map(|w| w.as_ref().to_lowercase().chars().collect::<Vec<char>>())
            .filter(|w| !w.is_empty())
            .unique()
        {
            by_length.entry(word.len()).or_default().push(word);
        }

        Entropy {
            by_length,
            look_ahead: 1,
            alphabet_size: 26,
            parallel: false,
        }
    }

    /// Sets the largest letter combination the search considers.
    ///
    /// A look-ahead of zero is raised to one.
    pub fn look_ahead(self, look_ahead: usize) -> Self {
        if look_ahead == 0 {
            log::warn!("a look-ahead of 0 is not possible, using 1 instead");
        }
        Entropy {
            look_ahead: look_ahead.max(1),
            ..self
        }
    }

    /// Sets how many distinct letters the game's alphabet has.
    ///
    /// Collecting candidate letters stops once this many were found.
    pub fn alphabet_size(self, alphabet_size: usize) -> Self {
        Entropy {
            alphabet_size: alphabet_size.max(1),
            ..self
        }
    }

    /// Scores the combinations of each size on the rayon thread pool.
    ///
    /// The results are identical to the sequential search.
    pub fn parallel(self, parallel: bool) -> Self {
        Entropy { parallel, ..self }
    }

    /// The number of dictionary words with `length` letters.
    pub fn num_words(&self, length: usize) -> usize {
        self.by_length.get(&length).map_or(0, Vec::len)
    }

    /// Narrows the dictionary to the words consistent with `game`.
    ///
    /// Returns [`HangmanError::NoCandidates`] when nothing is left, which
    /// means the secret is missing from the dictionary or the game state is
    /// inconsistent.
    pub fn filter_possible_words(&self, game: &dyn GameState) -> Result<Vec<&[char]>> {
        let length = game.secret_word_length();
        let words: &[Vec<char>] = self.by_length.get(&length).map_or(&[][..], Vec::as_slice);

        let filtered = filter_by_mask(
            words,
            game.guessed_so_far(),
            game.all_guessed_letters(),
            game.mystery_letter(),
        );
        let filtered = filter_incorrect_words(filtered, game.incorrectly_guessed_words());
        log::debug!(
            "{} of {} words of length {} remain",
            filtered.len(),
            words.len(),
            length
        );

        if filtered.is_empty() {
            Err(HangmanError::NoCandidates { length })
        } else {
            Ok(filtered)
        }
    }

    /// Finds the combination of at most `r` letters with the largest entropy
    /// per letter.
    ///
    /// Ties keep the combination found first: smaller combinations before
    /// larger ones, and combinations of one size in [`Combos`] order over the
    /// sorted letters. Returns `None` when `letters` is empty.
    pub fn max_entropy(
        &self,
        words: &[&[char]],
        letters: &BTreeSet<char>,
        r: usize,
    ) -> Option<ComboAndEntropy> {
        let letters: Vec<char> = letters.iter().copied().collect();
        let mut best: Option<(Vec<char>, f64)> = None;

        for size in 1..=r {
            log::trace!(
                "scoring {} combinations of {} letters",
                binomial(letters.len(), size),
                size
            );
            let candidate = if self.parallel {
                best_of_size_parallel(words, &letters, size)
            } else {
                best_of_size(words, &letters, size)
            };

            if let Some((combo, entropy)) = candidate {
                if best.as_ref().map_or(true, |(_, e)| entropy > *e) {
                    best = Some((combo, entropy));
                }
            }
        }

        best.map(|(combo, entropy)| ComboAndEntropy::new(combo.into_iter().collect(), entropy))
    }

    /// Picks the single letter of `letters` with the largest entropy.
    pub fn max_entropy_reduce(
        &self,
        words: &[&[char]],
        letters: &BTreeSet<char>,
    ) -> Option<ComboAndEntropy> {
        self.max_entropy(words, letters, 1)
    }
}

fn score(words: &[&[char]], combo: &[char]) -> f64 {
    let letters: BTreeSet<char> = combo.iter().copied().collect();
    let entropy = Partition::new(words, &letters).entropy() / combo.len() as f64;
    log::trace!("{:?} scores {}", combo, entropy);
    entropy
}

fn best_of_size(words: &[&[char]], letters: &[char], size: usize) -> Option<(Vec<char>, f64)> {
    let mut best: Option<(Vec<char>, f64)> = None;
    for combo in Combos::new(letters, size) {
        let entropy = score(words, &combo);
        if best.as_ref().map_or(true, |(_, e)| entropy > *e) {
            best = Some((combo, entropy));
        }
    }
    best
}

fn best_of_size_parallel(
    words: &[&[char]],
    letters: &[char],
    size: usize,
) -> Option<(Vec<char>, f64)> {
    Combos::new(letters, size)
        .enumerate()
        .par_bridge()
        .map(|(i, combo)| {
            let entropy = score(words, &combo);
            (i, combo, entropy)
        })
        // highest entropy, then earliest in enumeration order
        .reduce_with(|a, b| {
            if b.2 > a.2 || (b.2 == a.2 && b.0 < a.0) {
                b
            } else {
                a
            }
        })
        .map(|(_, combo, entropy)| (combo, entropy))
}

impl Strategy for Entropy {
    fn next_guess(&self, game: &dyn GameState) -> Result<Guess> {
        let words = self.filter_possible_words(game)?;

        let mut letters = unique_letters(&words, self.alphabet_size);
        for guessed in game.all_guessed_letters() {
            letters.remove(guessed);
        }

        let r = self.look_ahead.min(letters.len()).max(1);
        let max_r = self.max_entropy(&words, &letters, r);
        let max_1 = match max_r {
            Some(best) if best.combo().len() == 1 => Some(best),
            Some(best) => {
                log::debug!("reducing {}", best);
                self.max_entropy_reduce(&words, best.combo())
            }
            None => None,
        };

        let word_entropy = entropy_of_word_guess(words.len());
        let letter = max_1.and_then(|best| {
            log::debug!("best letter: {}, word guess entropy: {}", best, word_entropy);
            let c = best.combo().iter().next().copied();
            c.map(|c| (c, best.entropy()))
        });

        match letter {
            Some((c, entropy)) if word_entropy < entropy => Ok(Guess::Letter(c)),
            _ => Ok(Guess::Word(words[0].iter().collect())),
        }
    }

    fn version(&self) -> &'static str {
        "0.1.0"
    }
}

impl Display for Entropy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "hangman_strategies::Entropy (look-ahead: {})",
            self.look_ahead
        )
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use hangman_rs::{game::play, Game, Harness, Status};
    use proptest::{prop_assert_eq, proptest};

    fn letters(s: &str) -> BTreeSet<char> {
        s.chars().collect()
    }

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    const DICTIONARY: [&str; 16] = [
        "cat", "car", "can", "cap", "bat", "bar", "ban", "hat", "mat", "rat", "cot", "cut", "dog",
        "dig", "to", "go",
    ];

    #[test]
    fn letters_in_every_word_score_zero() -> Result<()> {
        let strategy = Entropy::new(["cat", "car", "can"]);
        let game = Game::new("car", 5)?;
        let words = strategy.filter_possible_words(&game)?;

        let a = strategy.max_entropy(&words, &letters("a"), 1).unwrap();
        assert_eq!(a.entropy(), 0.0);

        let best = strategy.max_entropy(&words, &letters("acnrt"), 1).unwrap();
        assert_eq!(best.combo(), &letters("n"));
        assert!(close(best.entropy(), entropy_of_word_guess(3)));

        // each of n, r and t only separates one word from the other two
        let pair = strategy.max_entropy(&words, &letters("nr"), 2).unwrap();
        assert_eq!(pair.combo().len(), 1);
        Ok(())
    }

    #[test]
    fn even_split_letter_beats_word_guess() -> Result<()> {
        let strategy = Entropy::new(["bat", "cat", "bar", "car"]);
        let game = Game::new("cat", 5)?;
        assert_eq!(strategy.next_guess(&game)?, Guess::Letter('b'));
        Ok(())
    }

    #[test]
    fn ties_go_to_the_word_guess() -> Result<()> {
        let strategy = Entropy::new(["to", "go"]);
        let game = Game::new("go", 5)?;
        let words = strategy.filter_possible_words(&game)?;
        let best = strategy.max_entropy(&words, &letters("got"), 1).unwrap();
        assert_eq!(best.combo(), &letters("g"));
        assert_eq!(best.entropy(), 1.0);
        assert_eq!(entropy_of_word_guess(2), 1.0);

        assert_eq!(strategy.next_guess(&game)?, Guess::Word("to".to_string()));

        // three candidates where the best letter ties the word guess
        let strategy = Entropy::new(["cat", "car", "can"]);
        let game = Game::new("can", 5)?;
        assert_eq!(strategy.next_guess(&game)?, Guess::Word("cat".to_string()));
        Ok(())
    }

    #[test]
    fn single_candidate_is_guessed() -> Result<()> {
        let strategy = Entropy::new(DICTIONARY);
        let mut game = Game::new("dog", 5)?;
        game.guess_letter('o')?;
        game.guess_letter('g')?;
        // "dig" is ruled out by the revealed o
        assert_eq!(strategy.next_guess(&game)?, Guess::Word("dog".to_string()));
        Ok(())
    }

    #[test]
    fn filters_by_mask_and_guesses() -> Result<()> {
        let strategy = Entropy::new(DICTIONARY);
        let mut game = Game::new("cot", 10)?;
        for c in ['a', 'b', 'c', 't'] {
            game.guess_letter(c)?;
        }
        assert_eq!(game.guessed_so_far(), &['c', '-', 't']);

        let words: Vec<String> = strategy
            .filter_possible_words(&game)?
            .iter()
            .map(|w| w.iter().collect())
            .collect();
        assert_eq!(words, vec!["cot", "cut"]);

        game.guess_word("cut")?;
        let words = strategy.filter_possible_words(&game)?;
        assert_eq!(words, vec![&['c', 'o', 't'][..]]);
        Ok(())
    }

    #[test]
    fn missing_words_are_an_error() -> Result<()> {
        let strategy = Entropy::new(DICTIONARY);
        let game = Game::new("zebra", 5)?;
        assert!(matches!(
            strategy.next_guess(&game),
            Err(HangmanError::NoCandidates { length: 5 })
        ));

        let mut game = Game::new("xyz", 5)?;
        game.guess_letter('x')?;
        assert!(matches!(
            strategy.next_guess(&game),
            Err(HangmanError::NoCandidates { length: 3 })
        ));
        Ok(())
    }

    #[test]
    fn reduce_picks_the_best_member() -> Result<()> {
        let strategy = Entropy::new(["bat", "cat", "bar", "car"]);
        let game = Game::new("bat", 5)?;
        let words = strategy.filter_possible_words(&game)?;
        let best = strategy.max_entropy_reduce(&words, &letters("abt")).unwrap();
        assert_eq!(best.combo(), &letters("b"));
        assert!(close(best.entropy(), 1.0));
        assert!(strategy.max_entropy_reduce(&words, &letters("")).is_none());
        Ok(())
    }

    #[test]
    fn look_ahead_is_clamped() {
        let strategy = Entropy::new(DICTIONARY).look_ahead(0);
        assert_eq!(format!("{}", strategy), "hangman_strategies::Entropy (look-ahead: 1)");
        assert_eq!(strategy.num_words(3), 14);
        assert_eq!(Entropy::new(["a", "a", ""]).num_words(1), 1);
    }

    #[test]
    fn mixed_case_dictionary_plays_like_lowercase() -> Result<()> {
        let words = ["Cat", "cAR", "CAN", "car", "BAT"];
        let strategy = Entropy::new(words);
        assert_eq!(strategy.num_words(3), 4);

        for secret in ["cat", "car", "can", "bat"] {
            let mut game = Game::new(secret, 100)?;
            play(&strategy, &mut game)?;
            assert_eq!(game.status(), Status::Won, "lost {}", secret);
        }
        Ok(())
    }

    #[test]
    fn display_combo_and_entropy() {
        let combo = ComboAndEntropy::new(letters("ba"), 0.5);
        assert_eq!(format!("{}", combo), "ComboAndEntropy [combo=[a, b], entropy=0.5]");
    }

    #[test]
    fn wins_every_game() -> Result<()> {
        for look_ahead in 1..=3 {
            let strategy = Entropy::new(DICTIONARY).look_ahead(look_ahead);
            for secret in DICTIONARY {
                let mut game = Game::new(secret, 100)?;
                play(&strategy, &mut game)?;
                assert_eq!(game.status(), Status::Won, "{} lost {}", strategy, secret);
            }
        }
        Ok(())
    }

    #[test]
    fn runs_in_the_harness() -> Result<()> {
        let record = Harness::new()
            .add_strategy(Box::new(Entropy::new(DICTIONARY)))
            .add_strategy(Box::new(Entropy::new(DICTIONARY).look_ahead(2).parallel(true)))
            .secrets(DICTIONARY.iter().map(|s| s.to_string()).collect())
            .max_wrong_guesses(100)
            .test_all()
            .run()?;
        for perf in record.iter() {
            assert_eq!(perf.num_won(), DICTIONARY.len() as u32);
        }
        Ok(())
    }

    fn dictionary() -> impl proptest::strategy::Strategy<Value = Vec<String>> {
        proptest::collection::vec("[a-f]{4}", 1..30)
    }

    proptest! {
        #[test]
        fn parallel_search_matches_sequential(words in dictionary(), look_ahead in 1usize..4) {
            let sequential = Entropy::new(&words).look_ahead(look_ahead);
            let parallel = sequential.clone().parallel(true);
            let game = Game::new(&words[0], 5).unwrap();

            let candidates = sequential.filter_possible_words(&game).unwrap();
            let all = letters("abcdef");
            prop_assert_eq!(
                sequential.max_entropy(&candidates, &all, look_ahead),
                parallel.max_entropy(&candidates, &all, look_ahead)
            );
            prop_assert_eq!(sequential.next_guess(&game).unwrap(), parallel.next_guess(&game).unwrap());
        }

        #[test]
        fn one_word_left_is_always_guessed(word in "[a-z]{1,8}") {
            let strategy = Entropy::new([word.as_str()]).look_ahead(3);
            let game = Game::new(&word, 5).unwrap();
            prop_assert_eq!(strategy.next_guess(&game).unwrap(), Guess::Word(word.clone()));
        }
    }
}
