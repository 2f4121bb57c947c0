//! Sentence corpus to encoded corpus pipeline.
//!
//! Every sentence is translated with the [Lexicon]. Sentences with unknown words are kept
//! in the encoded corpus, with a `NULL` translation.
use std::collections::HashMap;
use std::fmt;
use std::fs::File;
use std::hash::BuildHasherDefault;
use std::io::Write;
use std::path::{Path, PathBuf};

use log::info;
use rayon::prelude::*;
use serde::Serialize;
use twox_hash::XxHash64;

use crate::error::Error;
use crate::io::corpus::read_entries_from_path;
use crate::io::{EncodedRow, EncodedWriter, WriterTrait};
use crate::translate::{Lexicon, Translator};

use super::progress::percent;
use super::Pipeline;

/// Missing words logged at the end of a run.
const TOP_MISSING: usize = 10;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TranslationSummary {
    pub total: usize,
    pub translated: usize,
    pub failed: usize,
    pub translated_percent: f64,
    /// Distinct unknown words.
    pub missing_words: usize,
}

impl fmt::Display for TranslationSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{} sentences translated ({:.2}%), {} failed, {} distinct unknown words",
            self.translated, self.total, self.translated_percent, self.failed, self.missing_words
        )
    }
}

/// Unknown words by decreasing count, ties broken alphabetically.
pub fn rank_missing(counts: HashMap<String, usize, BuildHasherDefault<XxHash64>>) -> Vec<(String, usize)> {
    let mut ranked: Vec<(String, usize)> = counts.into_iter().collect();
    ranked.sort_unstable_by(|(a, a_count), (b, b_count)| b_count.cmp(a_count).then_with(|| a.cmp(b)));
    ranked
}

fn write_missing<W: Write>(ranked: &[(String, usize)], writer: W) -> Result<(), Error> {
    let mut writer = csv::Writer::from_writer(writer);
    writer.write_record(["word", "count"])?;
    for (word, count) in ranked {
        writer.serialize((word, count))?;
    }
    writer.flush()?;
    Ok(())
}

pub struct Translation {
    lexicon: PathBuf,
    src: PathBuf,
    dst: PathBuf,
    translated: Option<PathBuf>,
    missing: Option<PathBuf>,
}

impl Translation {
    pub fn new(lexicon: PathBuf, src: PathBuf, dst: PathBuf) -> Self {
        Self {
            lexicon,
            src,
            dst,
            translated: None,
            missing: None,
        }
    }

    /// Also write the translated rows alone to `path`.
    pub fn with_translated(mut self, path: Option<PathBuf>) -> Self {
        self.translated = path;
        self
    }

    /// Also write the unknown words and their counts to `path`.
    pub fn with_missing(mut self, path: Option<PathBuf>) -> Self {
        self.missing = path;
        self
    }

    fn check_inputs(&self) -> Result<(), Error> {
        for path in [&self.lexicon, &self.src] {
            if !path.is_file() {
                return Err(Error::MissingInput(path.to_path_buf()));
            }
        }
        Ok(())
    }
}

fn create_writer(path: &Path) -> Result<EncodedWriter<File>, Error> {
    EncodedWriter::from_path(path)
}

impl Pipeline<TranslationSummary> for Translation {
    fn run(&self) -> Result<TranslationSummary, Error> {
        self.check_inputs()?;

        let lexicon = Lexicon::from_path(&self.lexicon)?;
        let entries = read_entries_from_path(&self.src)?;
        info!("translating {} sentences from {:?}", entries.len(), self.src);

        let translator = Translator::new(&lexicon);
        let results: Vec<_> = entries
            .par_iter()
            .map(|entry| translator.translate(&entry.sentence))
            .collect();

        let mut writer = create_writer(&self.dst)?;
        let mut translated_writer = self.translated.as_deref().map(create_writer).transpose()?;

        let mut missing: HashMap<String, usize, BuildHasherDefault<XxHash64>> = HashMap::default();
        let mut translated = 0;
        let total = entries.len();

        for (entry, result) in entries.into_iter().zip(results) {
            let encoded = match result {
                Ok(encoded) => {
                    translated += 1;
                    Some(encoded)
                }
                Err(untranslatable) => {
                    for word in untranslatable.missing {
                        *missing.entry(word).or_default() += 1;
                    }
                    None
                }
            };

            let row = EncodedRow::new(entry.id, entry.sentence, encoded);
            if let Some(w) = translated_writer.as_mut().filter(|_| row.is_translated()) {
                w.write_single(&row)?;
            }
            writer.write_single(&row)?;
        }

        writer.flush()?;
        if let Some(w) = translated_writer.as_mut() {
            w.flush()?;
        }

        let ranked = rank_missing(missing);
        for (word, count) in ranked.iter().take(TOP_MISSING) {
            info!("unknown word {:?}: {} occurrences", word, count);
        }
        if let Some(path) = &self.missing {
            write_missing(&ranked, File::create(path)?)?;
        }

        let summary = TranslationSummary {
            total,
            translated,
            failed: total - translated,
            translated_percent: percent(translated, total),
            missing_words: ranked.len(),
        };
        info!("{}", summary);
        Ok(summary)
    }
}
