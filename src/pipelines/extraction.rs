//! Dump to sentence corpus pipeline.
//!
//! # Processing
//! 1. Pages are read from the dump by the chosen [StrategyKind].
//! 1. Redirects, empty pages and non-content namespaces are excluded.
//! 1. Markup is stripped, then numbers are spelled out in French.
//! 1. The remaining text is split into sentences, and each sentence goes through the [Validator](crate::filtering::Validator).
//! 1. Kept sentences are written in a `phrase_steno,phrase_fr` CSV file.
use std::path::PathBuf;

use log::info;

use crate::error::Error;
use crate::io::SentenceWriter;

use super::strategies::StrategyKind;
use super::{ExtractionConfig, ExtractionSummary, PageProcessor, Pipeline, Progress};

pub struct Extraction {
    src: PathBuf,
    dst: PathBuf,
    strategy: StrategyKind,
    config: ExtractionConfig,
}

impl Extraction {
    pub fn new(src: PathBuf, dst: PathBuf, strategy: StrategyKind, config: ExtractionConfig) -> Self {
        Self {
            src,
            dst,
            strategy,
            config,
        }
    }
}

impl Pipeline<ExtractionSummary> for Extraction {
    fn run(&self) -> Result<ExtractionSummary, Error> {
        if !self.src.is_file() {
            return Err(Error::MissingInput(self.src.clone()));
        }
        self.config.validate()?;

        info!(
            "extracting sentences from {:?} into {:?} ({} strategy)",
            self.src, self.dst, self.strategy
        );

        let processor = PageProcessor::new(self.config.cache_capacity);
        let progress = Progress::new(self.config.log_every);
        let mut writer = SentenceWriter::from_path(&self.dst)?;

        self.strategy
            .build(&self.config)
            .extract(&self.src, &processor, &progress, &mut writer)?;
        writer.flush()?;

        let summary = progress.summary();
        info!("{} sentences written to {:?}", writer.written(), self.dst);
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::Extraction;
    use crate::error::Error;
    use crate::io::corpus::read_entries_from_path;
    use crate::pipelines::strategies::StrategyKind;
    use crate::pipelines::{ExtractionConfig, Pipeline};

    #[test]
    fn missing_dump() {
        let dir = tempfile::tempdir().unwrap();
        let e = Extraction::new(
            dir.path().join("nope.xml"),
            dir.path().join("out.csv"),
            StrategyKind::Queue,
            ExtractionConfig::default(),
        );
        assert!(matches!(e.run(), Err(Error::MissingInput(_))));
        // nothing is created before inputs are checked
        assert!(!dir.path().join("out.csv").exists());
    }

    #[test]
    fn invalid_config() {
        let mut src = tempfile::NamedTempFile::new().unwrap();
        write!(src, "<mediawiki></mediawiki>").unwrap();
        let dir = tempfile::tempdir().unwrap();
        let config = ExtractionConfig {
            workers: 0,
            ..Default::default()
        };
        let e = Extraction::new(
            src.path().to_path_buf(),
            dir.path().join("out.csv"),
            StrategyKind::Shards,
            config,
        );
        assert!(matches!(e.run(), Err(Error::Custom(_))));
    }

    #[test_log::test]
    fn small_dump() {
        let mut src = tempfile::NamedTempFile::new().unwrap();
        write!(
            src,
            "<mediawiki>\
             <page><title>Paris</title><revision><text>'''Paris''' est la capitale de la France.</text></revision></page>\
             <page><title>Catégorie:Villes</title><revision><text>Cette page est une catégorie.</text></revision></page>\
             </mediawiki>"
        )
        .unwrap();
        let dir = tempfile::tempdir().unwrap();
        let dst = dir.path().join("out.csv");

        let summary = Extraction::new(
            src.path().to_path_buf(),
            dst.clone(),
            StrategyKind::Queue,
            ExtractionConfig {
                workers: 2,
                ..Default::default()
            },
        )
        .run()
        .unwrap();

        assert_eq!(summary.pages, 2);
        assert_eq!(summary.excluded, 1);
        assert_eq!(summary.kept, 1);

        let entries = read_entries_from_path(&dst).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].sentence, "Paris est la capitale de la France.");
    }
}
