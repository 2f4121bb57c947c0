/*! Sentence corpus.

Two-column CSV file, the first column being left blank for the steno transcription:

```text
phrase_steno,phrase_fr
,Paris est la capitale de la France.
```
!*/
use std::{
    fs::File,
    io::{Read, Write},
    path::Path,
};

use serde::Serialize;

use crate::error::Error;

use super::WriterTrait;

pub const HEADER: [&str; 2] = ["phrase_steno", "phrase_fr"];

#[derive(Debug, Serialize)]
struct SentenceRow<'a> {
    phrase_steno: &'a str,
    phrase_fr: &'a str,
}

/// Writes validated sentences, header included (even when no sentence is written).
pub struct SentenceWriter<W: Write> {
    writer: csv::Writer<W>,
    written: usize,
}

impl SentenceWriter<File> {
    /// Create (or truncate) the corpus file at `path`.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        Self::new(File::create(path)?)
    }
}

impl<W: Write> SentenceWriter<W> {
    pub fn new(writer: W) -> Result<Self, Error> {
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(writer);
        writer.write_record(HEADER)?;
        Ok(Self { writer, written: 0 })
    }

    /// Number of sentences written so far.
    pub fn written(&self) -> usize {
        self.written
    }

    pub fn flush(&mut self) -> Result<(), Error> {
        self.writer.flush()?;
        Ok(())
    }

    /// Flush and get the underlying writer back.
    pub fn into_inner(self) -> Result<W, Error> {
        self.writer
            .into_inner()
            .map_err(|e| Error::Io(e.into_error()))
    }
}

impl<W: Write> WriterTrait for SentenceWriter<W> {
    type Item = String;

    fn write(&mut self, vals: Vec<String>) -> Result<(), Error> {
        for sentence in &vals {
            self.write_single(sentence)?;
        }
        Ok(())
    }

    fn write_single(&mut self, sentence: &String) -> Result<(), Error> {
        self.writer.serialize(SentenceRow {
            phrase_steno: "",
            phrase_fr: sentence,
        })?;
        self.written += 1;
        Ok(())
    }
}

/// One row of a sentence corpus.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorpusEntry {
    pub id: String,
    pub sentence: String,
}

/// Read every row of a sentence corpus.
///
/// The sentence is taken from the `phrase_fr` column, or from the second column if there is none.
/// The id is taken from an `id` column when present, otherwise it is the 1-based row number.
pub fn read_entries<R: Read>(reader: R) -> Result<Vec<CorpusEntry>, Error> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(reader);

    let headers = reader.headers()?.clone();
    let id_column = headers.iter().position(|h| h == "id");
    let text_column = headers
        .iter()
        .position(|h| h == "phrase_fr")
        .unwrap_or(if headers.len() > 1 { 1 } else { 0 });

    reader
        .records()
        .enumerate()
        .map(|(idx, record)| {
            let record = record?;
            let id = id_column
                .and_then(|column| record.get(column))
                .map(String::from)
                .unwrap_or_else(|| (idx + 1).to_string());
            let sentence = record.get(text_column).unwrap_or_default().to_string();
            Ok(CorpusEntry { id, sentence })
        })
        .collect()
}

/// [read_entries] over a file.
pub fn read_entries_from_path<P: AsRef<Path>>(path: P) -> Result<Vec<CorpusEntry>, Error> {
    read_entries(File::open(path)?)
}
