//! Evaluating and comparing strategies.

use std::{fmt::Display, io::Write, ops::Deref};

#[cfg(feature = "fancy")]
use comfy_table::{Cell, Color, ColumnConstraint, Row, Table, Width};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    game::Status,
    strategy::{Guess, Strategy},
    Result,
};

/// How one game played by a strategy ended.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
pub struct Outcome {
    /// Every guess made, in order.
    pub guesses: Vec<Guess>,
    /// The final status of the game.
    pub status: Status,
    /// The final score of the game.
    pub score: usize,
    /// The number of wrong letter and word guesses.
    pub wrong_guesses: usize,
    /// The error that stopped the strategy, if it could not finish the game.
    pub error: Option<String>,
}

impl Outcome {
    /// Whether the game was won.
    pub fn won(&self) -> bool {
        self.status == Status::Won
    }
}

/// A record of one strategy's games after run by the
/// [test harness](crate::Harness).
///
/// This struct can provide statistics about the games on its own, but it
/// is recommended to produce [`Summary`] first to cache the computations.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
pub struct Perf {
    pub(crate) tries: Vec<(String, Outcome)>,
    strategy_name: String,
}

impl Perf {
    /// Creates a new empty performance record.
    pub(crate) fn new(strat: &dyn Strategy) -> Self {
        Perf {
            tries: Vec::new(),
            strategy_name: format!("{} v{}", strat, strat.version()),
        }
    }

    /// Gets the name of the strategy that produced this performance record.
    pub fn strategy_name(&self) -> &str {
        &self.strategy_name
    }

    /// Gets every secret word played and how the game went.
    pub fn tries(&self) -> &[(String, Outcome)] {
        &self.tries
    }

    /// Gets the number of games played by the strategy.
    pub fn num_tried(&self) -> u32 {
        self.tries.len() as u32
    }

    /// Gets the number of games won by the strategy.
    pub fn num_won(&self) -> u32 {
        self.tries.iter().filter(|(_, o)| o.won()).count() as u32
    }

    /// Gets the number of games the strategy lost.
    pub fn num_lost(&self) -> u32 {
        self.num_tried() - self.num_won()
    }

    /// Gets the summed score of every game.
    pub fn cumulative_score(&self) -> u32 {
        self.tries.iter().map(|(_, o)| o.score as u32).sum()
    }

    /// Builds a table with one cell per game holding the secret word and the
    /// guesses made. Lost games are highlighted.
    #[cfg(feature = "fancy")]
    pub fn table(&self) -> Table {
        let mut table = Table::new();
        if !table.is_tty() {
            table.set_table_width(80);
        } else {
            table.load_preset(comfy_table::presets::UTF8_FULL);
        }
        let columns = ((table.get_table_width().unwrap_or(80) / 16) as usize).max(1);
        for chunk in self.tries.chunks(columns) {
            let mut row = Row::new();
            for (secret, outcome) in chunk {
                let guesses = outcome
                    .guesses
                    .iter()
                    .map(|g| match g {
                        Guess::Letter(c) => c.to_string(),
                        Guess::Word(w) => w.clone(),
                    })
                    .collect::<Vec<_>>()
                    .join(" ");
                let mut cell = Cell::new(format!("{}\n-----\n{}", secret, guesses));
                if !outcome.won() {
                    cell = cell.bg(Color::Red).fg(Color::Black);
                }
                row.add_cell(cell);
            }
            table.add_row(row);
        }
        table.set_constraints(vec![
            ColumnConstraint::LowerBoundary(Width::Fixed(8));
            columns
        ]);
        table
    }

    /// Converts this performance record to a pre-calculated summary.
    pub fn to_summary(&self) -> Summary {
        let mut bins = Vec::new();
        for (_, outcome) in self.tries.iter().filter(|(_, o)| o.won()) {
            if bins.len() <= outcome.wrong_guesses {
                bins.resize(outcome.wrong_guesses + 1, 0);
            }
            bins[outcome.wrong_guesses] += 1;
        }

        Summary {
            strategy_name: self.strategy_name.clone(),
            num_tried: self.num_tried(),
            num_won: self.num_won(),
            cumulative_score: self.cumulative_score(),
            histogram: Histogram { bins },
        }
    }
}

impl Display for Perf {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_summary())
    }
}

/// A summary of a strategy's performance generated by the
/// [test harness](crate::Harness).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
pub struct Summary {
    strategy_name: String,
    num_tried: u32,
    num_won: u32,
    cumulative_score: u32,
    histogram: Histogram,
}

impl Summary {
    /// Gets the name of the strategy that produced this performance record.
    pub fn strategy_name(&self) -> &str {
        &self.strategy_name
    }

    /// Gets the number of games played by the strategy.
    pub fn num_tried(&self) -> u32 {
        self.num_tried
    }

    /// Gets the number of games won by the strategy.
    pub fn num_won(&self) -> u32 {
        self.num_won
    }

    /// Gets the fraction of games won by the strategy.
    pub fn frac_won(&self) -> f32 {
        (self.num_won as f32) / (self.num_tried as f32)
    }

    /// Gets the number of games the strategy lost.
    pub fn num_lost(&self) -> u32 {
        self.num_tried - self.num_won
    }

    /// Gets the average score over every game, lost ones included.
    pub fn mean_score(&self) -> f32 {
        (self.cumulative_score as f32) / (self.num_tried as f32)
    }

    /// Gets the histogram of wrong guesses made in won games.
    pub fn histogram(&self) -> &Histogram {
        &self.histogram
    }

    /// Prints the summary to stdout, configured by `options`.
    pub fn print(&self, options: SummaryPrintOptions) -> Result<()> {
        self.write(&mut std::io::stdout(), options)
    }

    /// Writes the summary to `out`.
    ///
    /// With a baseline to compare against, a line with the difference in
    /// games won and mean score follows, unless the baseline is this summary.
    pub fn write(&self, out: &mut impl Write, options: SummaryPrintOptions) -> Result<()> {
        write!(out, "{}", self)?;

        if let Some(baseline) = options.compare {
            if baseline != *self {
                writeln!(
                    out,
                    "Compared with {}: {:+.1}% won, {:+.2} mean score",
                    baseline.strategy_name(),
                    (self.frac_won() - baseline.frac_won()) * 100.,
                    self.mean_score() - baseline.mean_score(),
                )?;
            }
        }

        if options.histogram {
            write!(out, "{}", self.histogram)?;
        }

        Ok(())
    }

    /// Starts configuring [`print()`](Summary::print()).
    pub fn print_options() -> SummaryPrintOptions {
        SummaryPrintOptions::default()
    }
}

/// What [`Summary::print()`] shows besides the summary itself.
///
/// By default nothing else is shown.
#[derive(Debug, Default, Clone, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct SummaryPrintOptions {
    compare: Option<Summary>,
    histogram: bool,
}

impl SummaryPrintOptions {
    /// Creates the default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Compares the summary with `baseline`.
    pub fn compare(self, baseline: &Summary) -> Self {
        Self {
            compare: Some(baseline.clone()),
            ..self
        }
    }

    /// Shows the histogram of wrong guesses in won games.
    pub fn histogram(self, histogram: bool) -> Self {
        Self { histogram, ..self }
    }
}

impl Display for Summary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{:-^80}", self.strategy_name)?;
        writeln!(f, "Played {} words", self.num_tried())?;

        writeln!(
            f,
            "Won {}, or {:.1}%, and lost {}",
            self.num_won(),
            self.frac_won() * 100.,
            self.num_lost()
        )?;

        writeln!(f, "Games scored {:.2} on average", self.mean_score())?;

        Ok(())
    }
}

/// Counts of won games by the number of wrong guesses they took.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
pub struct Histogram {
    bins: Vec<u32>,
}

impl Deref for Histogram {
    type Target = [u32];

    fn deref(&self) -> &Self::Target {
        &self.bins
    }
}

impl Display for Histogram {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let max = match self.iter().max() {
            Some(&max) => max,
            None => return Ok(()),
        };
        let digits =
            std::iter::successors(Some(max), |&n| (n >= 10).then(|| n / 10)).count() as u32;
        let count_per_mark = (max as f32 / (80. - digits as f32 - 8.)).max(1.0);

        for (i, &bin) in self.bins.iter().enumerate() {
            write!(f, "{:>2} |", i)?;
            let marks = (bin as f32 / count_per_mark).floor() as usize;
            writeln!(f, "{:#>marks$} ({})", "", bin)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn outcome(status: Status, wrong_guesses: usize, score: usize) -> Outcome {
        Outcome {
            guesses: vec![Guess::Letter('e')],
            status,
            score,
            wrong_guesses,
            error: None,
        }
    }

    #[test]
    fn summary_counts() {
        let perf = Perf {
            tries: vec![
                ("cat".to_string(), outcome(Status::Won, 0, 3)),
                ("dog".to_string(), outcome(Status::Won, 2, 5)),
                ("cow".to_string(), outcome(Status::Won, 2, 6)),
                ("elk".to_string(), outcome(Status::Lost, 6, 25)),
            ],
            strategy_name: "test".to_string(),
        };

        assert_eq!(perf.num_tried(), 4);
        assert_eq!(perf.num_won(), 3);
        assert_eq!(perf.num_lost(), 1);
        assert_eq!(perf.cumulative_score(), 39);

        let summary = perf.to_summary();
        assert_eq!(summary.frac_won(), 0.75);
        assert_eq!(summary.mean_score(), 9.75);
        assert_eq!(&summary.histogram()[..], &[1, 0, 2]);
    }

    #[test]
    fn summary_compares_with_baseline() -> Result<()> {
        let perf = |name: &str, dog: Outcome| Perf {
            tries: vec![
                ("cat".to_string(), outcome(Status::Won, 1, 4)),
                ("dog".to_string(), dog),
            ],
            strategy_name: name.to_string(),
        };
        let baseline = perf("baseline", outcome(Status::Lost, 6, 25)).to_summary();
        let better = perf("better", outcome(Status::Won, 0, 3)).to_summary();

        let mut out = Vec::new();
        better.write(&mut out, Summary::print_options().compare(&baseline))?;
        let shown = String::from_utf8(out).expect("summary is utf-8");
        assert!(shown.contains("Won 2, or 100.0%, and lost 0"));
        assert!(shown.contains("Compared with baseline: +50.0% won, -11.00 mean score"));
        assert!(!shown.contains(" 0 |"));

        let mut out = Vec::new();
        baseline.write(
            &mut out,
            Summary::print_options().compare(&baseline).histogram(true),
        )?;
        let shown = String::from_utf8(out).expect("summary is utf-8");
        assert!(!shown.contains("Compared with"));
        assert!(shown.ends_with(" 0 | (0)\n 1 |# (1)\n"));
        Ok(())
    }

    #[cfg(feature = "fancy")]
    #[test]
    fn table_has_a_cell_per_game() {
        let perf = Perf {
            tries: vec![
                ("cat".to_string(), outcome(Status::Won, 0, 3)),
                ("elk".to_string(), outcome(Status::Lost, 6, 25)),
            ],
            strategy_name: "test".to_string(),
        };
        let shown = perf.table().to_string();
        assert!(shown.contains("cat"));
        assert!(shown.contains("elk"));
    }

    #[test]
    fn histogram_display() {
        let histogram = Histogram { bins: vec![2, 0, 1] };
        assert_eq!(format!("{}", histogram), " 0 |## (2)\n 1 | (0)\n 2 |# (1)\n");
        assert_eq!(format!("{}", Histogram::default()), "");
    }
}
