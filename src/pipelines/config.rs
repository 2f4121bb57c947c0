//! Extraction settings.
use std::{fs::File, io::BufReader, num::NonZeroUsize, path::Path};

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Tunables of an extraction run.
///
/// Can be loaded from a JSON file, missing fields taking their default value:
///
/// ```json
/// { "workers": 8, "batch_size": 2000 }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Worker threads (also the number of shards of the shard pool).
    pub workers: usize,
    /// Pages per batch in the bounded queue.
    pub batch_size: usize,
    /// Batches the bounded queue can hold before the reader blocks.
    pub queue_capacity: usize,
    /// Byte windows of the chunk strategy. Defaults to `workers`.
    pub chunks: Option<usize>,
    /// Entries of the normalization cache.
    pub cache_capacity: usize,
    /// Maximum read-ahead past the end of a chunk, in bytes.
    pub max_resync: u64,
    /// Log progress every `log_every` pages (0 disables it).
    pub log_every: usize,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            workers: std::thread::available_parallelism()
                .map(NonZeroUsize::get)
                .unwrap_or(1),
            batch_size: 5000,
            queue_capacity: 100,
            chunks: None,
            cache_capacity: 1024,
            max_resync: 64 * 1024 * 1024,
            log_every: 10_000,
        }
    }
}

impl ExtractionConfig {
    /// Load from a JSON file.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(Error::MissingInput(path.to_path_buf()));
        }
        let config = serde_json::from_reader(BufReader::new(File::open(path)?))?;
        Ok(config)
    }

    /// Number of chunks of the chunk strategy.
    pub fn chunks(&self) -> usize {
        self.chunks.unwrap_or(self.workers)
    }

    /// Reject settings that would stall or no-op a run.
    pub fn validate(&self) -> Result<(), Error> {
        let zeroes = [
            ("workers", self.workers),
            ("batch_size", self.batch_size),
            ("queue_capacity", self.queue_capacity),
            ("chunks", self.chunks()),
            ("cache_capacity", self.cache_capacity),
        ];
        match zeroes.iter().find(|(_, value)| *value == 0) {
            Some((name, _)) => Err(Error::Custom(format!("{} must be at least 1", name))),
            None => Ok(()),
        }
    }
}
