//! Chunk-splitting strategy.
//!
//! The dump is cut into byte windows (see [Chunk]) that are parsed independently,
//! each with its own file handle, on a rayon pool.
//! A malformed chunk is reported and does not stop the others.
use std::fs::{self, File};
use std::io::BufReader;
use std::path::Path;

use log::{debug, info};
use rayon::prelude::*;

use crate::error::Error;
use crate::io::WriterTrait;
use crate::pipelines::{PageProcessor, Reporter};
use crate::sources::wikipedia::{Chunk, RecordMarker};

use super::{recover, Strategy};

pub struct Chunked {
    workers: usize,
    chunks: usize,
    max_resync: u64,
}

impl Chunked {
    /// Zero workers or chunks are raised to 1.
    pub fn new(workers: usize, chunks: usize, max_resync: u64) -> Self {
        Self {
            workers: workers.max(1),
            chunks: chunks.max(1),
            max_resync,
        }
    }

    /// Sentences of the pages owned by `chunk`, in dump order.
    ///
    /// On a malformed page, the sentences of the previous pages are kept.
    fn process(
        &self,
        src: &Path,
        chunk: &Chunk,
        marker: &RecordMarker,
        processor: &PageProcessor,
        reporter: &dyn Reporter,
    ) -> Result<Vec<String>, Error> {
        let mut sentences = Vec::new();

        let pages = match chunk.open(src, marker, self.max_resync) {
            Ok(Some(pages)) => pages,
            Ok(None) => {
                debug!("chunk {}: no page starts here", chunk.index);
                return Ok(sentences);
            }
            Err(e) => return recover(e, reporter).map(|_| sentences),
        };

        let mut nb_pages = 0;
        for page in pages {
            match page {
                Ok(page) => {
                    let outcome = processor.process(&page);
                    reporter.page(&outcome);
                    sentences.extend(outcome.into_sentences());
                    nb_pages += 1;
                }
                Err(e) => {
                    recover(e, reporter)?;
                    break;
                }
            }
        }

        debug!(
            "chunk {}: {} pages, {} sentences",
            chunk.index,
            nb_pages,
            sentences.len()
        );
        Ok(sentences)
    }
}

impl Strategy for Chunked {
    fn extract(
        &self,
        src: &Path,
        processor: &PageProcessor,
        reporter: &dyn Reporter,
        writer: &mut dyn WriterTrait<Item = String>,
    ) -> Result<(), Error> {
        let len = fs::metadata(src)?.len();
        let marker = match RecordMarker::detect(BufReader::new(File::open(src)?)) {
            Ok(marker) => marker,
            // the header error is reported by the first chunk
            Err(e) => {
                debug!("no record marker ({}), falling back to the default one", e);
                RecordMarker::default()
            }
        };
        let chunks = Chunk::split(len, self.chunks);
        info!(
            "chunk splitting: {} chunks of ~{} bytes on {} workers",
            chunks.len(),
            len / chunks.len() as u64,
            self.workers
        );

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.workers)
            .build()?;

        // collect keeps chunk index order
        let results: Vec<Result<Vec<String>, Error>> = pool.install(|| {
            chunks
                .par_iter()
                .map(|chunk| self.process(src, chunk, &marker, processor, reporter))
                .collect()
        });

        for sentences in results {
            writer.write(sentences?)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::Chunked;
    use crate::pipelines::strategies::Strategy;
    use crate::pipelines::{PageProcessor, Progress};

    fn dump(nb_pages: usize) -> String {
        let mut xml = String::from("<mediawiki>\n<siteinfo><sitename>Wikipédia</sitename></siteinfo>\n");
        for i in 0..nb_pages {
            xml.push_str(&format!(
                "<page>\n<title>Page {i}</title>\n<revision><text>La page numéro {i} est une page.</text></revision>\n</page>\n"
            ));
        }
        xml.push_str("</mediawiki>\n");
        xml
    }

    #[test]
    fn chunk_order_is_dump_order() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        f.write_all(dump(31).as_bytes()).unwrap();

        let mut single: Vec<String> = Vec::new();
        Chunked::new(1, 1, 1 << 20)
            .extract(f.path(), &PageProcessor::default(), &Progress::new(0), &mut single)
            .unwrap();
        assert_eq!(single.len(), 31);

        for n in [2, 3, 7, 31, 64] {
            let mut out: Vec<String> = Vec::new();
            Chunked::new(4, n, 1 << 20)
                .extract(f.path(), &PageProcessor::default(), &Progress::new(0), &mut out)
                .unwrap();
            assert_eq!(out, single, "{} chunks", n);
        }
    }

    #[test]
    fn prefixed_pages() {
        let mut xml = String::from(
            "<mw:mediawiki xmlns:mw=\"http://www.mediawiki.org/xml/export-0.10/\">\n",
        );
        for i in 0..40 {
            xml.push_str(&format!(
                "<mw:page id=\"{i}\">\n<mw:title>Page {i}</mw:title>\n<mw:revision><mw:text>La page numéro {i} est une page.</mw:text></mw:revision>\n</mw:page>\n"
            ));
        }
        xml.push_str("</mw:mediawiki>\n");

        let mut f = tempfile::NamedTempFile::new().unwrap();
        f.write_all(xml.as_bytes()).unwrap();

        let mut plain_file = tempfile::NamedTempFile::new().unwrap();
        plain_file.write_all(dump(40).as_bytes()).unwrap();
        let mut plain: Vec<String> = Vec::new();
        Chunked::new(1, 1, 4096)
            .extract(plain_file.path(), &PageProcessor::default(), &Progress::new(0), &mut plain)
            .unwrap();

        for n in [1, 4, 9] {
            let progress = Progress::new(0);
            let mut out: Vec<String> = Vec::new();
            Chunked::new(4, n, 4096)
                .extract(f.path(), &PageProcessor::default(), &progress, &mut out)
                .unwrap();
            assert_eq!(progress.errors(), 0, "{} chunks", n);
            assert_eq!(out, plain, "{} chunks", n);
        }
    }

    #[test]
    fn resync_failure_drops_the_chunk() {
        // the first chunk ends inside page B, with no marker within 16 bytes
        let mut xml = String::from("<mediawiki>\n");
        xml.push_str("<page><title>A</title><revision><text>La première page est courte.</text></revision></page>\n");
        xml.push_str("<page><title>B</title><revision><text>");
        xml.push_str(&"Une phrase de remplissage est ici. ".repeat(200));
        xml.push_str("</text></revision></page>\n</mediawiki>\n");

        let mut f = tempfile::NamedTempFile::new().unwrap();
        f.write_all(xml.as_bytes()).unwrap();

        let progress = Progress::new(0);
        let mut out: Vec<String> = Vec::new();
        Chunked::new(2, 2, 16)
            .extract(f.path(), &PageProcessor::default(), &progress, &mut out)
            .unwrap();

        assert_eq!(progress.errors(), 1);
        // both pages start in the first chunk, and are dropped with it
        assert!(out.is_empty());
    }

    #[test]
    fn missing_file_is_fatal() {
        let mut out: Vec<String> = Vec::new();
        assert!(Chunked::new(1, 1, 16)
            .extract(
                std::path::Path::new("does/not/exist.xml"),
                &PageProcessor::default(),
                &Progress::new(0),
                &mut out
            )
            .is_err());
    }
}
