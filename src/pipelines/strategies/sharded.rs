//! Shard-pool strategy.
//!
//! Every page is loaded first, then split into contiguous shards processed by one thread each.
//! Shards complete in any order, and are put back in shard order before being written,
//! so the output follows the dump order whatever the shard count.
use std::ops::Range;
use std::path::Path;
use std::thread;

use crossbeam_channel::unbounded;
use log::{debug, error, info};

use crate::error::Error;
use crate::io::WriterTrait;
use crate::pipelines::{PageProcessor, Reporter};
use crate::sources::wikipedia::{Dump, Page};

use super::{recover, Strategy};

pub struct ShardPool {
    shards: usize,
}

/// Split `len` items into `n` contiguous ranges of `len / n` items, the last one absorbing the remainder.
///
/// `n` is clamped into `[1, max(len, 1)]`.
pub(crate) fn shard_ranges(len: usize, n: usize) -> Vec<Range<usize>> {
    let n = n.max(1).min(len.max(1));
    let size = len / n;
    (0..n)
        .map(|i| {
            let end = if i == n - 1 { len } else { (i + 1) * size };
            i * size..end
        })
        .collect()
}

impl ShardPool {
    /// Zero shards are raised to 1.
    pub fn new(shards: usize) -> Self {
        Self {
            shards: shards.max(1),
        }
    }

    /// Load every page of the dump, up to the first malformed one.
    fn load(&self, src: &Path, reporter: &dyn Reporter) -> Result<Vec<Page>, Error> {
        let mut pages = Vec::new();
        for page in Dump::from_path(src)? {
            match page {
                Ok(page) => pages.push(page),
                Err(e) => {
                    recover(e, reporter)?;
                    break;
                }
            }
        }
        Ok(pages)
    }
}

impl Strategy for ShardPool {
    fn extract(
        &self,
        src: &Path,
        processor: &PageProcessor,
        reporter: &dyn Reporter,
        writer: &mut dyn WriterTrait<Item = String>,
    ) -> Result<(), Error> {
        let pages = self.load(src, reporter)?;
        let ranges = shard_ranges(pages.len(), self.shards);
        info!(
            "shard pool: {} pages in {} shards",
            pages.len(),
            ranges.len()
        );

        let (tx, rx) = unbounded();
        thread::scope(|s| {
            for (idx, range) in ranges.into_iter().enumerate() {
                let shard = &pages[range];
                let tx = tx.clone();
                s.spawn(move || {
                    let mut sentences = Vec::new();
                    for page in shard {
                        let outcome = processor.process(page);
                        reporter.page(&outcome);
                        sentences.extend(outcome.into_sentences());
                    }
                    debug!("shard {}: {} sentences", idx, sentences.len());
                    if tx.send((idx, sentences)).is_err() {
                        error!("shard {}: results receiver is gone", idx);
                    }
                });
            }
        });
        drop(tx);

        let mut results: Vec<(usize, Vec<String>)> = rx.iter().collect();
        results.sort_unstable_by_key(|(idx, _)| *idx);

        for (_, sentences) in results {
            writer.write(sentences)?;
        }
        Ok(())
    }
}
