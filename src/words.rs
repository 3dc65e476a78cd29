//! Word source reader.
//!
//! Reads the tab-separated word file. The first line is a header. On every
//! other line the first field is ignored and the second field, trimmed of
//! surrounding spaces, is the word. Lines without such a field are skipped.
//! Words are deduplicated, keeping the first occurrence.

use crate::error::{Error, Result};
use indexmap::IndexSet;
use std::fmt;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

/// Extract the word field from one line of the word file.
///
/// Returns `None` when the line has no second tab-delimited field or when
/// that field contains only spaces.
///
/// # Examples
///
/// ```
/// use krucindiko::words::extract_word;
///
/// assert_eq!(extract_word("1\t  hello  \textra"), Some("hello"));
/// assert_eq!(extract_word("no tab here"), None);
/// ```
pub fn extract_word(line: &str) -> Option<&str> {
    let line = line.trim_end_matches(['\n', '\r']);
    let (_, rest) = line.split_once('\t')?;
    let field = rest.split('\t').next().unwrap_or(rest);
    let word = field.trim_matches(' ');
    if word.is_empty() {
        None
    } else {
        Some(word)
    }
}

/// A repeated word found while loading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Duplicate {
    /// The repeated word
    pub word: String,
    /// 1-based line number of the repetition
    pub line: usize,
}

impl fmt::Display for Duplicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Repeated word “{}” found at line {}", self.word, self.line)
    }
}

/// Ordered list of unique words, in order of first appearance.
#[derive(Debug, Clone, Default)]
pub struct WordList {
    words: IndexSet<String>,
    duplicates: Vec<Duplicate>,
}

impl WordList {
    /// Load the word list from a file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => Error::InputNotFound {
                path: path.to_path_buf(),
            },
            _ => Error::Io(e),
        })?;
        Self::parse(BufReader::new(file))
    }

    /// Parse the word list from any buffered reader.
    pub fn parse<R: BufRead>(reader: R) -> Result<Self> {
        let mut list = WordList::default();

        for (index, line) in reader.lines().enumerate() {
            let line = line?;
            let line_num = index + 1;

            if line_num == 1 {
                continue;
            }

            let Some(word) = extract_word(&line) else {
                continue;
            };

            if list.words.contains(word) {
                let duplicate = Duplicate {
                    word: word.to_string(),
                    line: line_num,
                };
                log::warn!("{}", duplicate);
                list.duplicates.push(duplicate);
            } else {
                list.words.insert(word.to_string());
            }
        }

        log::debug!(
            "Loaded {} unique words ({} repeated)",
            list.words.len(),
            list.duplicates.len()
        );

        Ok(list)
    }

    /// Number of unique words.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Check if the list has no words.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Get the word at a position.
    pub fn get(&self, index: usize) -> Option<&str> {
        self.words.get_index(index).map(|s| s.as_str())
    }

    /// Iterate over the words in order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.words.iter().map(|s| s.as_str())
    }

    /// Repeated words that were dropped while loading.
    pub fn duplicates(&self) -> &[Duplicate] {
        &self.duplicates
    }
}

impl<S: Into<String>> FromIterator<S> for WordList {
    /// Build a list from words directly, dropping repeats silently.
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            words: iter.into_iter().map(Into::into).collect(),
            duplicates: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn parse(text: &str) -> WordList {
        WordList::parse(Cursor::new(text)).unwrap()
    }

    #[test]
    fn test_extract_trims_spaces() {
        assert_eq!(extract_word("1\t  hello  \textra"), Some("hello"));
    }

    #[test]
    fn test_extract_end_of_line() {
        assert_eq!(extract_word("42\tkato"), Some("kato"));
        assert_eq!(extract_word("42\tkato\n"), Some("kato"));
        assert_eq!(extract_word("42\tkato\r\n"), Some("kato"));
    }

    #[test]
    fn test_extract_keeps_inner_spaces() {
        assert_eq!(extract_word("x\t la hundo \t"), Some("la hundo"));
    }

    #[test]
    fn test_extract_empty_first_field() {
        assert_eq!(extract_word("\tĉevalo"), Some("ĉevalo"));
    }

    #[test]
    fn test_extract_rejects_missing_field() {
        assert_eq!(extract_word("only one field"), None);
        assert_eq!(extract_word("1\t"), None);
        assert_eq!(extract_word("1\t\tlater"), None);
        assert_eq!(extract_word("1\t   \tlater"), None);
        assert_eq!(extract_word(""), None);
    }

    #[test]
    fn test_header_is_skipped() {
        let list = parse("id\tvorto\n1\tkato\n");
        assert_eq!(list.iter().collect::<Vec<_>>(), vec!["kato"]);
    }

    #[test]
    fn test_order_and_dedup() {
        let list = parse("id\tvorto\n1\tkato\n2\thundo\n3\tkato\n4\tbirdo\n5\thundo\n");
        assert_eq!(list.iter().collect::<Vec<_>>(), vec!["kato", "hundo", "birdo"]);
        assert_eq!(
            list.duplicates(),
            &[
                Duplicate {
                    word: "kato".to_string(),
                    line: 4
                },
                Duplicate {
                    word: "hundo".to_string(),
                    line: 6
                },
            ]
        );
    }

    #[test]
    fn test_malformed_lines_are_skipped() {
        let list = parse("header\nno tabs\n1\tkato\n\n2\t\n3\t  \n");
        assert_eq!(list.len(), 1);
        assert!(list.duplicates().is_empty());
    }

    #[test]
    fn test_duplicate_message() {
        let dup = Duplicate {
            word: "kato".to_string(),
            line: 7,
        };
        assert_eq!(dup.to_string(), "Repeated word “kato” found at line 7");
    }

    #[test]
    fn test_utf8_passthrough() {
        let list = parse("h\tw\n1\tĝardeno\n2\tŝuo\n");
        assert_eq!(list.get(0), Some("ĝardeno"));
        assert_eq!(list.get(1), Some("ŝuo"));
        assert_eq!(list.get(2), None);
    }

    #[test]
    fn test_empty_input() {
        assert!(parse("").is_empty());
        assert!(parse("header only\n").is_empty());
    }

    #[test]
    fn test_missing_file() {
        let err = WordList::load("/nonexistent/dir/vortoj.tsv").unwrap_err();
        assert!(matches!(err, Error::InputNotFound { .. }));
    }

    #[test]
    fn test_from_iterator() {
        let list: WordList = ["a", "b", "a"].into_iter().collect();
        assert_eq!(list.len(), 2);
    }
}
