//! Word to steno code dictionary.
use std::collections::HashMap;
use std::fs::File;
use std::hash::BuildHasherDefault;
use std::io::{BufRead, BufReader};
use std::path::Path;

use lazy_static::lazy_static;
use log::{debug, info};
use regex::Regex;
use twox_hash::XxHash64;

use crate::error::Error;

lazy_static! {
    /// Single-character tags such as `[v]`, with their leading space.
    static ref TAG: Regex = Regex::new(r"\s*\[[^\]\s]\]").unwrap();
}

const SEPARATOR: &str = " :: ";

/// Parse a `word :: code1 code2` line into a lower-cased word and its codes.
///
/// Returns `None` for blank or malformed lines.
pub(crate) fn parse_line(line: &str) -> Option<(String, String)> {
    let line = TAG.replace_all(line, "");
    let mut parts = line.trim().split(SEPARATOR);
    match (parts.next(), parts.next(), parts.next()) {
        (Some(word), Some(codes), None) if !word.is_empty() => {
            Some((word.to_lowercase(), codes.to_string()))
        }
        _ => None,
    }
}

/// Immutable word to code mapping, keyed by lower-cased words.
///
/// Later entries overwrite earlier ones.
#[derive(Debug, Default, Clone)]
pub struct Lexicon {
    entries: HashMap<String, String, BuildHasherDefault<XxHash64>>,
    skipped: usize,
}

impl Lexicon {
    /// Load a lexicon file.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(Error::MissingInput(path.to_path_buf()));
        }
        let lexicon = Self::from_reader(BufReader::new(File::open(path)?))?;
        info!(
            "loaded {} entries from {:?} ({} lines skipped)",
            lexicon.len(),
            path,
            lexicon.skipped()
        );
        Ok(lexicon)
    }

    /// Read `word :: codes` lines. Blank lines are ignored, malformed ones are skipped and counted.
    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self, Error> {
        let mut lexicon = Self::default();
        for (nb, line) in reader.lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            match parse_line(&line) {
                Some((word, codes)) => {
                    lexicon.entries.insert(word, codes);
                }
                None => {
                    debug!("skipping lexicon line {}: {:?}", nb + 1, line);
                    lexicon.skipped += 1;
                }
            }
        }
        Ok(lexicon)
    }

    /// Codes of `word`, whatever its case.
    pub fn get(&self, word: &str) -> Option<&str> {
        self.entries
            .get(word)
            .or_else(|| self.entries.get(&word.to_lowercase()))
            .map(String::as_str)
    }

    pub fn contains(&self, word: &str) -> bool {
        self.get(word).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of malformed lines ignored while loading.
    pub fn skipped(&self) -> usize {
        self.skipped
    }
}

impl<W: Into<String>, C: Into<String>> FromIterator<(W, C)> for Lexicon {
    fn from_iter<I: IntoIterator<Item = (W, C)>>(iter: I) -> Self {
        let entries = iter
            .into_iter()
            .map(|(word, codes)| (word.into().to_lowercase(), codes.into()))
            .collect();
        Self {
            entries,
            skipped: 0,
        }
    }
}
