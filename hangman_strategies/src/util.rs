//! Helpers for narrowing a word list down to the words a game still allows.

use std::collections::BTreeSet;

/// Keeps the words consistent with a revealed `mask`.
///
/// Where the mask shows `mystery_letter` the word must not have any guessed
/// letter, since that letter would have been revealed. Everywhere else the
/// word must have exactly the revealed letter. Words of another length than
/// the mask never match.
pub fn filter_by_mask<'a, W>(
    words: impl IntoIterator<Item = &'a W>,
    mask: &[char],
    all_guessed_letters: &BTreeSet<char>,
    mystery_letter: char,
) -> Vec<&'a [char]>
where
    W: AsRef<[char]> + ?Sized + 'a,
{
    words
        .into_iter()
        .map(|word: &'a W| -> &'a [char] { word.as_ref() })
        .filter(|word| {
            word.len() == mask.len()
                && word.iter().zip(mask).all(|(c, &m)| {
                    if m == mystery_letter {
                        !all_guessed_letters.contains(c)
                    } else {
                        *c == m
                    }
                })
        })
        .collect()
}

/// Removes the words that were already guessed and turned out wrong.
pub fn filter_incorrect_words<'a>(
    words: Vec<&'a [char]>,
    incorrect_words: &BTreeSet<String>,
) -> Vec<&'a [char]> {
    if incorrect_words.is_empty() {
        return words;
    }
    words
        .into_iter()
        .filter(|word| !incorrect_words.contains(&word.iter().collect::<String>()))
        .collect()
}

/// Collects the distinct letters appearing in `words`.
///
/// Scanning stops once `cap` distinct letters were found, since no alphabet
/// offers more.
pub fn unique_letters(words: &[&[char]], cap: usize) -> BTreeSet<char> {
    let mut letters = BTreeSet::new();
    for word in words {
        letters.extend(word.iter().copied());
        if letters.len() >= cap {
            break;
        }
    }
    letters
}

#[cfg(test)]
mod test {
    use super::*;

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    fn strings(words: &[&[char]]) -> Vec<String> {
        words.iter().map(|w| w.iter().collect()).collect()
    }

    #[test]
    fn mystery_positions_exclude_guessed_letters() {
        let words = vec![chars("cat"), chars("cot"), chars("cut"), chars("cab")];
        let guessed: BTreeSet<char> = ['a', 'b', 'c', 't'].into_iter().collect();
        let kept = filter_by_mask(&words, &chars("c-t"), &guessed, '-');
        assert_eq!(strings(&kept), vec!["cot", "cut"]);
    }

    #[test]
    fn revealed_positions_must_match() {
        let words = vec![chars("cat"), chars("bat"), chars("cast")];
        let guessed: BTreeSet<char> = ['c'].into_iter().collect();
        let kept = filter_by_mask(&words, &chars("c--"), &guessed, '-');
        assert_eq!(strings(&kept), vec!["cat"]);
    }

    #[test]
    fn removes_incorrect_words() {
        let words = vec![chars("cat"), chars("cot")];
        let refs: Vec<&[char]> = words.iter().map(Vec::as_slice).collect();
        let wrong: BTreeSet<String> = ["cat".to_string()].into_iter().collect();
        assert_eq!(strings(&filter_incorrect_words(refs, &wrong)), vec!["cot"]);
    }

    #[test]
    fn letters_are_capped() {
        let words = vec![chars("abc"), chars("def"), chars("ghi")];
        let refs: Vec<&[char]> = words.iter().map(Vec::as_slice).collect();
        assert_eq!(unique_letters(&refs, 26).len(), 9);
        assert_eq!(unique_letters(&refs, 3).len(), 3);
        assert_eq!(unique_letters(&refs, 4).len(), 6);
    }
}
