//! Pipelines.
//!
//! Each command of the tool is a pipeline, and the module
//! provides a light [pipeline::Pipeline] trait that enables easy and flexible pipeline creation.
//!
//! - [Extraction]: Wikipedia dump to sentence corpus, with one of the [strategies],
//! - [Revalidation]: sentence corpus to filtered sentence corpus,
//! - [Translation]: sentence corpus to steno-encoded corpus.
mod config;
mod extraction;
#[allow(clippy::module_inception)]
pub mod pipeline;
mod processor;
mod progress;
mod revalidate;
pub mod strategies;
mod translation;

pub use config::ExtractionConfig;
pub use extraction::Extraction;
pub use pipeline::Pipeline;
pub use processor::{PageOutcome, PageProcessor};
pub use progress::{ExtractionSummary, Progress, Reporter, RuleCounts};
pub use revalidate::{Revalidation, RevalidationSummary};
pub use strategies::{BoundedQueue, Chunked, ShardPool, Strategy, StrategyKind};
pub use translation::{rank_missing, Translation, TranslationSummary};
