//! Command line arguments and parameters management/parsing.
use std::path::PathBuf;

use structopt::StructOpt;

use stenocorpus::error::Error;
use stenocorpus::pipelines::{ExtractionConfig, StrategyKind};

#[derive(Debug, StructOpt)]
#[structopt(
    name = "stenocorpus",
    about = "French Wikipedia to steno corpus generation tool."
)]
/// Holds every command that is callable by the `stenocorpus` command.
pub enum Stenocorpus {
    #[structopt(about = "Extract validated sentences from a Wikipedia XML dump")]
    Extract(Extract),
    #[structopt(about = "Re-apply the sentence validator on a sentence corpus")]
    Revalidate(Revalidate),
    #[structopt(about = "Encode a sentence corpus with a steno lexicon")]
    Translate(Translate),
    #[structopt(about = "Number the codes of a steno lexicon")]
    Index(Index),
}

#[derive(Debug, StructOpt)]
/// Extract command and parameters.
///
/// ```sh
/// stenocorpus-extract 0.1.0
/// Extract validated sentences from a Wikipedia XML dump
///
/// USAGE:
///     stenocorpus extract [OPTIONS] <src> <dst>
///
/// ARGS:
///     <src>    decompressed Wikipedia XML dump
///     <dst>    sentence corpus destination (csv)
/// ```
pub struct Extract {
    #[structopt(parse(from_os_str), help = "decompressed Wikipedia XML dump")]
    pub src: PathBuf,
    #[structopt(parse(from_os_str), help = "sentence corpus destination (csv)")]
    pub dst: PathBuf,
    #[structopt(
        long = "strategy",
        default_value = "queue",
        help = "queue, chunks or shards"
    )]
    pub strategy: StrategyKind,
    #[structopt(
        parse(from_os_str),
        long = "config",
        help = "JSON extraction settings. Flags override them."
    )]
    pub config: Option<PathBuf>,
    #[structopt(short = "w", long = "workers", help = "number of worker threads")]
    pub workers: Option<usize>,
    #[structopt(long = "batch-size", help = "pages per batch (queue strategy)")]
    pub batch_size: Option<usize>,
    #[structopt(
        long = "queue-capacity",
        help = "batches waiting in the queue before the reader blocks"
    )]
    pub queue_capacity: Option<usize>,
    #[structopt(long = "chunks", help = "number of byte windows (chunks strategy)")]
    pub chunks: Option<usize>,
    #[structopt(long = "cache-capacity", help = "entries of the normalization cache")]
    pub cache_capacity: Option<usize>,
    #[structopt(
        long = "max-resync",
        help = "maximum read-ahead past a chunk end, in bytes"
    )]
    pub max_resync: Option<u64>,
    #[structopt(parse(from_os_str), long = "summary", help = "write the run summary as JSON")]
    pub summary: Option<PathBuf>,
}

impl Extract {
    /// Settings file (or defaults), overridden by flags.
    pub fn config(&self) -> Result<ExtractionConfig, Error> {
        let mut config = match &self.config {
            Some(path) => ExtractionConfig::from_path(path)?,
            None => ExtractionConfig::default(),
        };
        if let Some(workers) = self.workers {
            config.workers = workers;
        }
        if let Some(batch_size) = self.batch_size {
            config.batch_size = batch_size;
        }
        if let Some(queue_capacity) = self.queue_capacity {
            config.queue_capacity = queue_capacity;
        }
        if let Some(chunks) = self.chunks {
            config.chunks = Some(chunks);
        }
        if let Some(cache_capacity) = self.cache_capacity {
            config.cache_capacity = cache_capacity;
        }
        if let Some(max_resync) = self.max_resync {
            config.max_resync = max_resync;
        }
        Ok(config)
    }
}

#[derive(Debug, StructOpt)]
/// Revalidate command and parameters.
pub struct Revalidate {
    #[structopt(parse(from_os_str), help = "source sentence corpus")]
    pub src: PathBuf,
    #[structopt(parse(from_os_str), help = "destination sentence corpus")]
    pub dst: PathBuf,
    #[structopt(short = "w", long = "workers", help = "number of worker threads")]
    pub workers: Option<usize>,
    #[structopt(
        long = "sample",
        default_value = "5",
        help = "number of kept sentences to log"
    )]
    pub sample: usize,
    #[structopt(parse(from_os_str), long = "summary", help = "write the run summary as JSON")]
    pub summary: Option<PathBuf>,
}

#[derive(Debug, StructOpt)]
/// Translate command and parameters.
pub struct Translate {
    #[structopt(parse(from_os_str), help = "steno lexicon (word :: codes)")]
    pub lexicon: PathBuf,
    #[structopt(parse(from_os_str), help = "source sentence corpus")]
    pub src: PathBuf,
    #[structopt(parse(from_os_str), help = "encoded corpus destination")]
    pub dst: PathBuf,
    #[structopt(
        parse(from_os_str),
        long = "translated",
        help = "also write translated rows only"
    )]
    pub translated: Option<PathBuf>,
    #[structopt(
        parse(from_os_str),
        long = "missing",
        help = "write unknown words and their counts"
    )]
    pub missing: Option<PathBuf>,
    #[structopt(parse(from_os_str), long = "summary", help = "write the run summary as JSON")]
    pub summary: Option<PathBuf>,
}

#[derive(Debug, StructOpt)]
/// Index command and parameters.
pub struct Index {
    #[structopt(parse(from_os_str), help = "steno lexicon (word :: codes)")]
    pub lexicon: PathBuf,
    #[structopt(parse(from_os_str), help = "destination of code :: index lines")]
    pub codes: PathBuf,
    #[structopt(parse(from_os_str), help = "destination of word :: indices lines")]
    pub words: PathBuf,
}
