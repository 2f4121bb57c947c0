//! Bounded-queue strategy.
//!
//! ```text
//!            batches (bounded)               sentences (unbounded)
//! reader ──────────────────────> worker 0 ──────────────────────────> writer
//!        ──────────────────────> worker 1 ──────────────────────────>
//!        ──────────────────────> ...
//! ```
//!
//! The reader blocks when `capacity` batches are waiting, which bounds memory to
//! `capacity * batch_size` pages. It ends the stream with one [Message::Done] per worker,
//! and each worker answers with [Outcome::Finished] once it has no more batches to process.
use std::path::Path;
use std::thread;

use crossbeam_channel::{bounded, unbounded, Receiver, Sender};
use log::{debug, info};

use crate::error::Error;
use crate::io::WriterTrait;
use crate::pipelines::{PageProcessor, Reporter};
use crate::sources::wikipedia::{Dump, Page};

use super::{recover, Strategy};

enum Message {
    Batch(Vec<Page>),
    Done,
}

enum Outcome {
    Sentences(Vec<String>),
    Finished,
}

pub struct BoundedQueue {
    workers: usize,
    batch_size: usize,
    capacity: usize,
}

impl BoundedQueue {
    /// Zero values are raised to 1.
    pub fn new(workers: usize, batch_size: usize, capacity: usize) -> Self {
        Self {
            workers: workers.max(1),
            batch_size: batch_size.max(1),
            capacity: capacity.max(1),
        }
    }

    /// Read the dump and send batches, then one [Message::Done] per worker.
    ///
    /// Sentinels are sent even when reading fails, so that workers always terminate.
    fn read<I>(&self, pages: I, tx: &Sender<Message>, reporter: &dyn Reporter) -> Result<(), Error>
    where
        I: Iterator<Item = Result<Page, Error>>,
    {
        let mut result = Ok(());
        let mut batch = Vec::with_capacity(self.batch_size);
        let mut nb_batches = 0;

        for page in pages {
            match page {
                Ok(page) => {
                    batch.push(page);
                    if batch.len() == self.batch_size {
                        let full = std::mem::replace(&mut batch, Vec::with_capacity(self.batch_size));
                        if tx.send(Message::Batch(full)).is_err() {
                            result = Err(Error::Custom("no worker left to process pages".to_string()));
                            break;
                        }
                        nb_batches += 1;
                    }
                }
                Err(e) => {
                    result = recover(e, reporter);
                    break;
                }
            }
        }

        if !batch.is_empty() && tx.send(Message::Batch(batch)).is_ok() {
            nb_batches += 1;
        }
        debug!("reader sent {} batches", nb_batches);

        for _ in 0..self.workers {
            // receivers only disappear when every worker is gone
            if tx.send(Message::Done).is_err() {
                break;
            }
        }
        result
    }
}

/// Process batches until a [Message::Done] shows up.
fn work(
    id: usize,
    rx: Receiver<Message>,
    tx: Sender<Outcome>,
    processor: &PageProcessor,
    reporter: &dyn Reporter,
) {
    let mut nb_batches = 0;
    while let Ok(Message::Batch(pages)) = rx.recv() {
        let mut sentences = Vec::new();
        for page in &pages {
            let outcome = processor.process(page);
            reporter.page(&outcome);
            sentences.extend(outcome.into_sentences());
        }
        nb_batches += 1;
        if tx.send(Outcome::Sentences(sentences)).is_err() {
            break;
        }
    }
    debug!("worker {} done after {} batches", id, nb_batches);
    tx.send(Outcome::Finished).ok();
}

impl Strategy for BoundedQueue {
    fn extract(
        &self,
        src: &Path,
        processor: &PageProcessor,
        reporter: &dyn Reporter,
        writer: &mut dyn WriterTrait<Item = String>,
    ) -> Result<(), Error> {
        let dump = Dump::from_path(src)?;
        info!(
            "bounded queue: {} workers, batches of {} pages, {} batches in flight",
            self.workers, self.batch_size, self.capacity
        );

        let (batch_tx, batch_rx) = bounded(self.capacity);
        let (outcome_tx, outcome_rx) = unbounded();

        thread::scope(|s| {
            let reader = s.spawn(move || self.read(dump, &batch_tx, reporter));

            for id in 0..self.workers {
                let rx = batch_rx.clone();
                let tx = outcome_tx.clone();
                s.spawn(move || work(id, rx, tx, processor, reporter));
            }
            drop(batch_rx);
            drop(outcome_tx);

            // this thread is the writer.
            // on a write error, keep draining so that nobody blocks.
            let mut written = Ok(());
            let mut finished = 0;
            while finished < self.workers {
                match outcome_rx.recv() {
                    Ok(Outcome::Sentences(sentences)) => {
                        if written.is_ok() {
                            written = writer.write(sentences);
                        }
                    }
                    Ok(Outcome::Finished) => finished += 1,
                    Err(_) => break,
                }
            }

            let read = reader
                .join()
                .unwrap_or_else(|_| Err(Error::Custom("reader thread panicked".to_string())));
            read.and(written)
        })
    }
}
