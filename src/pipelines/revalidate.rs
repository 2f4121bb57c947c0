//! Revalidation of an existing sentence corpus.
//!
//! Re-applies the [Validator] on every sentence of a corpus, and rewrites the corpus with
//! the surviving ones. Quotes surrounding a whole sentence are dropped.
use std::fmt;
use std::path::PathBuf;

use log::info;
use rand::seq::SliceRandom;
use rayon::prelude::*;
use serde::Serialize;

use crate::error::Error;
use crate::filtering::{Rejection, Validator};
use crate::io::corpus::read_entries_from_path;
use crate::io::{SentenceWriter, WriterTrait};

use super::progress::percent;
use super::{Pipeline, RuleCounts};

/// `"text"` -> `text`.
fn unquote(sentence: &str) -> &str {
    sentence
        .strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .unwrap_or(sentence)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RevalidationSummary {
    pub total: usize,
    pub kept: usize,
    pub rejections: RuleCounts,
    pub kept_percent: f64,
}

impl fmt::Display for RevalidationSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{} sentences kept ({:.2}%)",
            self.kept, self.total, self.kept_percent
        )
    }
}

pub struct Revalidation {
    src: PathBuf,
    dst: PathBuf,
    workers: usize,
    sample: usize,
}

impl Revalidation {
    /// `sample` kept sentences are logged at the end of the run.
    pub fn new(src: PathBuf, dst: PathBuf, workers: usize, sample: usize) -> Self {
        Self {
            src,
            dst,
            workers: workers.max(1),
            sample,
        }
    }
}

impl Pipeline<RevalidationSummary> for Revalidation {
    fn run(&self) -> Result<RevalidationSummary, Error> {
        if !self.src.is_file() {
            return Err(Error::MissingInput(self.src.clone()));
        }

        let entries = read_entries_from_path(&self.src)?;
        info!("revalidating {} sentences from {:?}", entries.len(), self.src);

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.workers)
            .build()?;
        let shard_len = (entries.len() / self.workers).max(1);
        let validator = Validator;

        let checks: Vec<Vec<Result<(), Rejection>>> = pool.install(|| {
            entries
                .par_chunks(shard_len)
                .map(|shard| {
                    shard
                        .iter()
                        .map(|entry| validator.check(unquote(&entry.sentence)))
                        .collect()
                })
                .collect()
        });

        let mut rejections = RuleCounts::default();
        let mut kept = Vec::new();
        for (entry, check) in entries.into_iter().zip(checks.into_iter().flatten()) {
            match check {
                Ok(()) => kept.push(unquote(&entry.sentence).to_string()),
                Err(rejection) => rejections.add(rejection),
            }
        }

        let summary = RevalidationSummary {
            total: kept.len() + rejections.total(),
            kept: kept.len(),
            rejections,
            kept_percent: percent(kept.len(), kept.len() + rejections.total()),
        };

        for sentence in kept.choose_multiple(&mut rand::thread_rng(), self.sample) {
            info!("sample: {}", sentence);
        }

        let mut writer = SentenceWriter::from_path(&self.dst)?;
        writer.write(kept)?;
        writer.flush()?;

        info!("{}", summary);
        Ok(summary)
    }
}
