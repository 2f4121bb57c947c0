//! # stenocorpus
//!
//! Builds a steno training corpus out of the French Wikipedia.
//!
//! ## Getting started
//!
//! ```sh
//! stenocorpus 0.1.0
//! French Wikipedia to steno corpus generation tool.
//!
//! USAGE:
//!     stenocorpus <SUBCOMMAND>
//!
//! SUBCOMMANDS:
//!     extract       Extract validated sentences from a Wikipedia XML dump
//!     help          Prints this message or the help of the given subcommand(s)
//!     index         Number the codes of a steno lexicon
//!     revalidate    Re-apply the sentence validator on a sentence corpus
//!     translate     Encode a sentence corpus with a steno lexicon
//! ```
//!
//! Log level is set with `RUST_LOG` (e.g. `RUST_LOG=info`).
use std::fs::File;
use std::path::Path;

use serde::Serialize;
use structopt::StructOpt;

use stenocorpus::error::Error;
use stenocorpus::pipelines::{Extraction, Pipeline, Revalidation, Translation};
use stenocorpus::translate::CodeIndex;

#[macro_use]
extern crate log;

mod cli;

/// Write a run summary as pretty JSON, if asked to.
fn write_summary<S: Serialize>(summary: &S, path: Option<&Path>) -> Result<(), Error> {
    if let Some(path) = path {
        serde_json::to_writer_pretty(File::create(path)?, summary)?;
        info!("summary written to {:?}", path);
    }
    Ok(())
}

fn main() -> Result<(), Error> {
    env_logger::init();

    let opt = cli::Stenocorpus::from_args();
    debug!("cli args\n{:#?}", opt);

    match opt {
        cli::Stenocorpus::Extract(e) => {
            let config = e.config()?;
            debug!("extraction settings: {:?}", config);
            let summary = Extraction::new(e.src, e.dst, e.strategy, config).run()?;
            println!("{}", summary);
            write_summary(&summary, e.summary.as_deref())?;
        }

        cli::Stenocorpus::Revalidate(r) => {
            let workers = r.workers.unwrap_or_else(|| {
                std::thread::available_parallelism()
                    .map(|n| n.get())
                    .unwrap_or(1)
            });
            let summary = Revalidation::new(r.src, r.dst, workers, r.sample).run()?;
            println!("{}", summary);
            write_summary(&summary, r.summary.as_deref())?;
        }

        cli::Stenocorpus::Translate(t) => {
            let summary = Translation::new(t.lexicon, t.src, t.dst)
                .with_translated(t.translated)
                .with_missing(t.missing)
                .run()?;
            println!("{}", summary);
            write_summary(&summary, t.summary.as_deref())?;
        }

        cli::Stenocorpus::Index(i) => {
            let index = CodeIndex::from_path(&i.lexicon)?;
            index.write_to_paths(&i.codes, &i.words)?;
            info!(
                "{} codes written to {:?}, {} words to {:?}",
                index.codes().len(),
                i.codes,
                index.words().len(),
                i.words
            );
        }
    };
    Ok(())
}
