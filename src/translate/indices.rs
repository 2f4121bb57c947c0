//! Integer indices of steno codes.
//!
//! Every distinct code of a lexicon file gets an index, in order of first appearance,
//! and every word is rewritten as the indices of its codes:
//!
//! ```text
//! chat :: KAT          KAT :: 0        chat :: 0
//! noir :: NWR KAT      NWR :: 1        noir :: 1 0
//! ```
use std::collections::HashMap;
use std::fs::File;
use std::hash::BuildHasherDefault;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use itertools::Itertools;
use log::{debug, info};
use twox_hash::XxHash64;

use crate::error::Error;

type XxHashMap<K, V> = HashMap<K, V, BuildHasherDefault<XxHash64>>;

#[derive(Debug, Default, Clone)]
pub struct CodeIndex {
    codes: Vec<String>,
    code_ids: XxHashMap<String, usize>,
    words: Vec<(String, Vec<usize>)>,
    word_ids: XxHashMap<String, usize>,
    skipped: usize,
}

impl CodeIndex {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(Error::MissingInput(path.to_path_buf()));
        }
        Self::from_reader(BufReader::new(File::open(path)?))
    }

    /// Read `word :: codes` lines.
    ///
    /// Words are kept as written. A word seen twice keeps its first position and its last codes.
    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self, Error> {
        let mut index = Self::default();
        for (nb, line) in reader.lines().enumerate() {
            let line = line?;
            if line.trim_matches(|c: char| c == '\n' || c == '\r' || c == ' ').is_empty() {
                continue;
            }
            match line.split_once(" :: ") {
                Some((word, codes)) if !codes.contains(" :: ") => {
                    let ids = codes
                        .split_whitespace()
                        .map(|code| index.code_id(code))
                        .collect();
                    index.insert_word(word, ids);
                }
                _ => {
                    debug!("skipping lexicon line {}: {:?}", nb + 1, line);
                    index.skipped += 1;
                }
            }
        }
        info!(
            "{} distinct codes over {} words",
            index.codes.len(),
            index.words.len()
        );
        Ok(index)
    }

    fn code_id(&mut self, code: &str) -> usize {
        if let Some(id) = self.code_ids.get(code) {
            return *id;
        }
        let id = self.codes.len();
        self.codes.push(code.to_string());
        self.code_ids.insert(code.to_string(), id);
        id
    }

    fn insert_word(&mut self, word: &str, ids: Vec<usize>) {
        match self.word_ids.get(word) {
            Some(&position) => self.words[position].1 = ids,
            None => {
                self.word_ids.insert(word.to_string(), self.words.len());
                self.words.push((word.to_string(), ids));
            }
        }
    }

    /// Codes, in index order.
    pub fn codes(&self) -> &[String] {
        &self.codes
    }

    pub fn get(&self, code: &str) -> Option<usize> {
        self.code_ids.get(code).copied()
    }

    /// Words and the indices of their codes, in file order.
    pub fn words(&self) -> &[(String, Vec<usize>)] {
        &self.words
    }

    pub fn skipped(&self) -> usize {
        self.skipped
    }

    /// Write `code :: index` lines.
    pub fn write_codes<W: Write>(&self, mut writer: W) -> Result<(), Error> {
        for (id, code) in self.codes.iter().enumerate() {
            writeln!(writer, "{} :: {}", code, id)?;
        }
        writer.flush()?;
        Ok(())
    }

    /// Write `word :: i j k` lines.
    pub fn write_words<W: Write>(&self, mut writer: W) -> Result<(), Error> {
        for (word, ids) in &self.words {
            writeln!(writer, "{} :: {}", word, ids.iter().join(" "))?;
        }
        writer.flush()?;
        Ok(())
    }

    /// Write both files, creating or truncating them.
    pub fn write_to_paths<P: AsRef<Path>, Q: AsRef<Path>>(
        &self,
        codes: P,
        words: Q,
    ) -> Result<(), Error> {
        self.write_codes(BufWriter::new(File::create(codes)?))?;
        self.write_words(BufWriter::new(File::create(words)?))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::CodeIndex;

    const LEXICON: &str = "chat :: KAT\n\nnoir :: NWR KAT\nChat :: TKPW\nbancal\n";

    #[test]
    fn first_seen_order() {
        let index = CodeIndex::from_reader(LEXICON.as_bytes()).unwrap();
        assert_eq!(index.codes(), ["KAT", "NWR", "TKPW"]);
        assert_eq!(index.get("NWR"), Some(1));
        assert_eq!(index.skipped(), 1);
        assert_eq!(
            index.words(),
            [
                ("chat".to_string(), vec![0]),
                ("noir".to_string(), vec![1, 0]),
                ("Chat".to_string(), vec![2]),
            ]
        );
    }

    #[test]
    fn duplicates_keep_their_position() {
        let index = CodeIndex::from_reader("a :: X\nb :: Y\na :: Z\n".as_bytes()).unwrap();
        assert_eq!(
            index.words(),
            [("a".to_string(), vec![2]), ("b".to_string(), vec![1])]
        );
    }

    #[test]
    fn output_files() {
        let index = CodeIndex::from_reader(LEXICON.as_bytes()).unwrap();

        let mut codes = Vec::new();
        index.write_codes(&mut codes).unwrap();
        assert_eq!(
            String::from_utf8(codes).unwrap(),
            "KAT :: 0\nNWR :: 1\nTKPW :: 2\n"
        );

        let mut words = Vec::new();
        index.write_words(&mut words).unwrap();
        assert_eq!(
            String::from_utf8(words).unwrap(),
            "chat :: 0\nnoir :: 1 0\nChat :: 2\n"
        );
    }
}
