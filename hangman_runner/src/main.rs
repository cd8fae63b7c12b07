use std::{path::PathBuf, time::Instant};

use clap::Parser;
use hangman_rs::{
    game::play, harness::Harness, strategy::stupid::Stupid, words::load_words, Game, Result,
};
use hangman_strategies::Entropy;

/// Plays Hangman with the entropy strategy.
#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// A dictionary with one word per line.
    #[clap(short, long)]
    dictionary: PathBuf,

    /// The largest combination of letters scored at each guess.
    #[clap(short, long, default_value = "1")]
    look_ahead: usize,

    /// Score letter combinations on all cores.
    #[clap(short, long)]
    parallel: bool,

    /// The number of wrong guesses a game allows.
    #[clap(short, long, default_value = "5")]
    max_wrong: usize,

    /// The number of random dictionary words to play.
    #[clap(short, long, default_value = "100")]
    games: usize,

    /// Play every word of the dictionary instead of `--games` random ones.
    #[clap(long)]
    all: bool,

    /// Play only these words and print every guess.
    #[clap(short, long)]
    secret: Vec<String>,

    /// Also show every game's guesses in a table.
    #[clap(short, long)]
    table: bool,

    /// Write the results as JSON to this file.
    #[clap(short, long)]
    output: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let start = Instant::now();
    let words = load_words(&args.dictionary)?;
    let strategy = Entropy::new(&words)
        .look_ahead(args.look_ahead)
        .parallel(args.parallel);
    log::info!("built {} in {:.3?}", strategy, start.elapsed());

    if !args.secret.is_empty() {
        for secret in &args.secret {
            let start = Instant::now();
            let mut game = Game::new(secret, args.max_wrong)?;
            let guesses = play(&strategy, &mut game)?;
            for guess in &guesses {
                println!("{}", guess);
            }
            println!("{}", game);
            log::info!("played {} in {:.3?}", secret, start.elapsed());
        }
        return Ok(());
    }

    let harness = Harness::new()
        .verbose()
        .add_baseline(Box::new(Stupid))
        .add_strategy(Box::new(strategy))
        .secrets(words)
        .max_wrong_guesses(args.max_wrong);
    let harness = if args.all {
        harness.test_all()
    } else {
        harness.test_num(args.games)
    };

    let start = Instant::now();
    let record = harness.run()?;
    log::info!("ran the harness in {:.3?}", start.elapsed());

    record.print_report()?;
    if args.table {
        for perf in record.iter() {
            println!("{}", perf.table());
        }
    }
    if let Some(path) = &args.output {
        record.save(path)?;
    }

    Ok(())
}
