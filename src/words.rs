//! Loading dictionaries of candidate words.

use std::{fs, path::Path};

use crate::Result;

/// Parses a dictionary with one word per line.
///
/// Surrounding whitespace is trimmed, blank lines are skipped and every word
/// is lowercased. The order of the input is kept.
///
/// # Examples
///
/// ```rust
/// use hangman_rs::words::parse_words;
///
/// assert_eq!(parse_words("Cat\n\n  dog \r\n"), vec!["cat", "dog"]);
/// ```
pub fn parse_words(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_lowercase)
        .collect()
}

/// Reads a dictionary file and parses it with [`parse_words()`].
pub fn load_words(path: impl AsRef<Path>) -> Result<Vec<String>> {
    let text = fs::read_to_string(path.as_ref())?;
    let words = parse_words(&text);
    log::info!(
        "loaded {} words from {}",
        words.len(),
        path.as_ref().display()
    );
    Ok(words)
}
