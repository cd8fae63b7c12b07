//! The test harness for running Hangman strategies.

use std::{io::Write, ops::Deref};

#[cfg(feature = "fancy")]
use indicatif::ParallelProgressIterator;
use rand::seq::index::sample;
use rayon::prelude::*;

use crate::{
    game::{play_into, Game, Status, LOST_SCORE},
    perf::{Outcome, Perf},
    strategy::Strategy,
    HarnessError, Result, Summary,
};

/// A test harness that can run many strategies on many secret words.
///
/// When you want to test your strategies, create a new test harness
/// with [`new()`](Harness::new()). You can then configure it using various
/// methods. Note that these configuration methods consume the existing
/// [`Harness`] and return a new one.
///
/// # Examples
///
/// ```rust
/// # use hangman_rs::harness::Harness;
/// use hangman_rs::strategy::stupid::Stupid;
///
/// let harness = Harness::new()
///     .quiet()
///     .add_strategy(Box::new(Stupid))
///     .secrets(vec!["cat".to_string(), "dog".to_string()])
///     .test_all();
///
/// let results = harness.run()?;
/// assert_eq!(results[0].num_tried(), 2);
/// #
/// # Ok::<_, hangman_rs::HangmanError>(())
/// ```
#[derive(Debug)]
pub struct Harness {
    strategies: Vec<Box<dyn Strategy>>,
    secrets: Vec<String>,
    verbose: bool,
    num_games: Option<usize>,
    max_wrong_guesses: usize,
    baseline: Option<usize>,
}

impl Default for Harness {
    fn default() -> Self {
        Harness {
            strategies: Vec::new(),
            secrets: Vec::new(),
            verbose: false,
            num_games: Some(100),
            max_wrong_guesses: 5,
            baseline: None,
        }
    }
}

impl Harness {
    /// Creates a new test harness with default configuration.
    ///
    /// Defaults:
    /// 1. tests no strategies on no secret words
    /// 2. quiet mode
    /// 3. runs each strategy on 100 secrets chosen at random
    /// 4. games allow five wrong guesses
    /// 5. does not compare against a baseline
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes the harness show a progress bar while testing.
    pub fn verbose(self) -> Self {
        Harness {
            verbose: true,
            ..self
        }
    }

    /// Makes the harness silent while testing.
    pub fn quiet(self) -> Self {
        Harness {
            verbose: false,
            ..self
        }
    }

    /// Adds a strategy to the harness for testing.
    pub fn add_strategy(self, strat: Box<dyn Strategy>) -> Self {
        let mut strategies = self.strategies;
        strategies.push(strat);
        Harness { strategies, ..self }
    }

    /// Adds a [`Vec`] of strategies to the harness for testing.
    pub fn add_strategies(self, strats: Vec<Box<dyn Strategy>>) -> Self {
        let mut strategies = self.strategies;
        strategies.extend(strats);
        Harness { strategies, ..self }
    }

    /// Adds a strategy to the harness for testing and sets it as the baseline
    /// for comparison.
    pub fn add_baseline(self, strat: Box<dyn Strategy>) -> Self {
        self.add_strategy(strat).and_baseline()
    }

    /// Sets the most recently added strategy as the baseline for comparisons.
    ///
    /// Does nothing if no strategy was added yet.
    pub fn and_baseline(self) -> Self {
        Self {
            baseline: self.strategies.len().checked_sub(1),
            ..self
        }
    }

    /// Sets the secret words the games are played on.
    pub fn secrets(self, secrets: Vec<String>) -> Self {
        Harness { secrets, ..self }
    }

    /// Sets how many wrong guesses each game allows.
    pub fn max_wrong_guesses(self, max_wrong_guesses: usize) -> Self {
        Harness {
            max_wrong_guesses,
            ..self
        }
    }

    /// Sets the harness to test each strategy on every secret word.
    pub fn test_all(self) -> Self {
        Harness {
            num_games: None,
            ..self
        }
    }

    /// Sets the harness to test each strategy on `n` random secret words.
    ///
    /// `n` is capped at the number of secret words when the harness runs.
    pub fn test_num(self, n: usize) -> Self {
        Harness {
            num_games: Some(n),
            ..self
        }
    }

    /// Runs the harness and produces performances for each strategy.
    ///
    /// The [`Perf`]s will be in the same order as the strategies were added
    /// to the harness, and the games inside each are sorted by secret word.
    pub fn run(&self) -> Result<Record> {
        if self.strategies.is_empty() {
            return Err(HarnessError::NoStrategiesAdded.into());
        }

        let playable: Vec<&str> = self
            .secrets
            .iter()
            .map(String::as_str)
            .filter(|secret| match Game::new(secret, self.max_wrong_guesses) {
                Ok(_) => true,
                Err(e) => {
                    log::warn!("skipping secret \"{}\": {}", secret, e);
                    false
                }
            })
            .collect();
        if playable.is_empty() {
            return Err(HarnessError::NoSecrets.into());
        }

        let chosen: Vec<&str> = match self.num_games {
            Some(n) => {
                let mut rng = rand::thread_rng();
                let n = n.min(playable.len());
                sample(&mut rng, playable.len(), n)
                    .iter()
                    .map(|i| playable[i])
                    .collect()
            }
            None => playable,
        };
        log::info!(
            "playing {} games with each of {} strategies",
            chosen.len(),
            self.strategies.len()
        );

        let games = self.play_all(&chosen)?;

        let mut perfs: Vec<Perf> = self
            .strategies
            .iter()
            .map(|strat| Perf::new(strat.as_ref()))
            .collect();
        for (secret, outcomes) in games {
            for (perf, outcome) in perfs.iter_mut().zip(outcomes) {
                perf.tries.push((secret.to_string(), outcome));
            }
        }
        for perf in perfs.iter_mut() {
            perf.tries.sort_by(|a, b| a.0.cmp(&b.0));
        }

        Ok(Record::new(perfs, self.baseline))
    }

    #[cfg(feature = "fancy")]
    fn play_all<'s>(&self, chosen: &[&'s str]) -> Result<Vec<(&'s str, Vec<Outcome>)>> {
        if self.verbose {
            chosen
                .par_iter()
                .progress_count(chosen.len() as u64)
                .map(|&secret| self.run_inner(secret))
                .collect()
        } else {
            chosen
                .par_iter()
                .map(|&secret| self.run_inner(secret))
                .collect()
        }
    }

    #[cfg(not(feature = "fancy"))]
    fn play_all<'s>(&self, chosen: &[&'s str]) -> Result<Vec<(&'s str, Vec<Outcome>)>> {
        chosen
            .par_iter()
            .map(|&secret| self.run_inner(secret))
            .collect()
    }

    fn run_inner<'s>(&self, secret: &'s str) -> Result<(&'s str, Vec<Outcome>)> {
        let mut outcomes = Vec::with_capacity(self.strategies.len());

        for strategy in &self.strategies {
            let mut game = Game::new(secret, self.max_wrong_guesses)?;
            let mut guesses = Vec::new();
            let outcome = match play_into(strategy.as_ref(), &mut game, &mut guesses) {
                Ok(()) => Outcome {
                    guesses,
                    status: game.status(),
                    score: game.score(),
                    wrong_guesses: game.num_wrong_guesses(),
                    error: None,
                },
                // a strategy that cannot go on has lost the game
                Err(e) => {
                    log::warn!("{} failed on \"{}\": {}", strategy, secret, e);
                    Outcome {
                        guesses,
                        status: Status::Lost,
                        score: LOST_SCORE,
                        wrong_guesses: game.num_wrong_guesses(),
                        error: Some(e.to_string()),
                    }
                }
            };
            outcomes.push(outcome);
        }

        Ok((secret, outcomes))
    }

}

/// The performances produced by one [`Harness::run()`].
#[derive(Debug, Clone, Default)]
pub struct Record {
    perfs: Vec<Perf>,
    baseline: Option<usize>,
}

impl Deref for Record {
    type Target = [Perf];

    fn deref(&self) -> &Self::Target {
        &self.perfs
    }
}

impl Record {
    fn new(perfs: Vec<Perf>, baseline: impl Into<Option<usize>>) -> Self {
        Self {
            perfs,
            baseline: baseline.into(),
        }
    }

    /// Gets the performance of the baseline strategy, if one was set.
    pub fn baseline(&self) -> Option<&Perf> {
        self.baseline.and_then(|n| self.perfs.get(n))
    }

    /// Prints the summary and histogram of every strategy to stdout,
    /// compared with the baseline when there is one.
    pub fn print_report(&self) -> Result<()> {
        self.write_report(&mut std::io::stdout())
    }

    /// Writes the report of [`print_report()`](Record::print_report()) to
    /// `out`.
    pub fn write_report(&self, out: &mut impl Write) -> Result<()> {
        let baseline_summary = self.baseline().map(Perf::to_summary);

        for perf in self.perfs.iter() {
            let summary = perf.to_summary();
            let options = match &baseline_summary {
                Some(baseline) => Summary::print_options().compare(baseline),
                None => Summary::print_options(),
            };
            summary.write(out, options.histogram(true))?;
        }

        Ok(())
    }

    /// Writes every performance in this record to `path` as JSON.
    #[cfg(feature = "serde")]
    pub fn save(&self, path: impl AsRef<std::path::Path>) -> Result<()> {
        let file = std::fs::File::create(path.as_ref())?;
        serde_json::to_writer_pretty(std::io::BufWriter::new(file), &self.perfs)
            .map_err(HarnessError::from)?;
        log::info!("saved record to {}", path.as_ref().display());
        Ok(())
    }
}
