//! Extraction strategies.
//!
//! Three interchangeable schedulers over the same [PageProcessor]:
//!
//! - [BoundedQueue]: one reader thread, batches of pages in a bounded channel, a pool of workers.
//!   Output order depends on worker speed.
//! - [Chunked]: the dump is split into byte windows parsed independently on a rayon pool.
//!   Chunks are merged in index order.
//! - [ShardPool]: pages are loaded in memory and split in contiguous shards.
//!   Output order is the dump order.
use std::fmt;
use std::path::Path;
use std::str::FromStr;

use crate::error::Error;
use crate::io::WriterTrait;

use super::{ExtractionConfig, PageProcessor, Reporter};

mod chunked;
mod queue;
mod sharded;

pub use chunked::Chunked;
pub use queue::BoundedQueue;
pub use sharded::ShardPool;

/// Drives a [PageProcessor] over a whole dump.
///
/// Each page is reported once through `reporter`, and recoverable errors are reported
/// instead of being returned. Kept sentences go to `writer`.
pub trait Strategy: Send + Sync {
    fn extract(
        &self,
        src: &Path,
        processor: &PageProcessor,
        reporter: &dyn Reporter,
        writer: &mut dyn WriterTrait<Item = String>,
    ) -> Result<(), Error>;
}

/// Routes an error either to the reporter (malformed source) or back to the caller.
pub(crate) fn recover(error: Error, reporter: &dyn Reporter) -> Result<(), Error> {
    if error.is_source_format() {
        reporter.error(&error);
        Ok(())
    } else {
        Err(error)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StrategyKind {
    #[default]
    Queue,
    Chunks,
    Shards,
}

impl StrategyKind {
    pub fn build(&self, config: &ExtractionConfig) -> Box<dyn Strategy> {
        match self {
            StrategyKind::Queue => Box::new(BoundedQueue::new(
                config.workers,
                config.batch_size,
                config.queue_capacity,
            )),
            StrategyKind::Chunks => Box::new(Chunked::new(
                config.workers,
                config.chunks(),
                config.max_resync,
            )),
            StrategyKind::Shards => Box::new(ShardPool::new(config.workers)),
        }
    }
}

impl FromStr for StrategyKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "queue" => Ok(StrategyKind::Queue),
            "chunks" => Ok(StrategyKind::Chunks),
            "shards" => Ok(StrategyKind::Shards),
            other => Err(format!(
                "unknown strategy {:?} (expected queue, chunks or shards)",
                other
            )),
        }
    }
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            StrategyKind::Queue => "queue",
            StrategyKind::Chunks => "chunks",
            StrategyKind::Shards => "shards",
        };
        write!(f, "{}", name)
    }
}
