/*! Encoded corpus.

Three-column CSV file. Rows whose translation failed are kept, with `NULL` as encoding:

```text
id,phrase_fr,phrase_steno
1,Bonjour.,BNJR.
2,Le chat noir.,NULL
```
!*/
use std::{
    fs::File,
    io::{Read, Write},
    path::Path,
};

use crate::error::Error;

use super::WriterTrait;

pub const HEADER: [&str; 3] = ["id", "phrase_fr", "phrase_steno"];

/// Marker of a failed translation.
pub const NULL: &str = "NULL";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedRow {
    pub id: String,
    pub phrase_fr: String,
    /// `None` if the sentence could not be translated.
    pub encoded: Option<String>,
}

impl EncodedRow {
    pub fn new(id: String, phrase_fr: String, encoded: Option<String>) -> Self {
        Self {
            id,
            phrase_fr,
            encoded,
        }
    }

    pub fn is_translated(&self) -> bool {
        self.encoded.is_some()
    }
}

/// Writes [EncodedRow]s, header included.
pub struct EncodedWriter<W: Write> {
    writer: csv::Writer<W>,
}

impl EncodedWriter<File> {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        Self::new(File::create(path)?)
    }
}

impl<W: Write> EncodedWriter<W> {
    pub fn new(writer: W) -> Result<Self, Error> {
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(writer);
        writer.write_record(HEADER)?;
        Ok(Self { writer })
    }

    pub fn flush(&mut self) -> Result<(), Error> {
        self.writer.flush()?;
        Ok(())
    }

    pub fn into_inner(self) -> Result<W, Error> {
        self.writer
            .into_inner()
            .map_err(|e| Error::Io(e.into_error()))
    }
}

impl<W: Write> WriterTrait for EncodedWriter<W> {
    type Item = EncodedRow;

    fn write(&mut self, vals: Vec<EncodedRow>) -> Result<(), Error> {
        for row in &vals {
            self.write_single(row)?;
        }
        Ok(())
    }

    fn write_single(&mut self, row: &EncodedRow) -> Result<(), Error> {
        self.writer.write_record([
            row.id.as_str(),
            row.phrase_fr.as_str(),
            row.encoded.as_deref().unwrap_or(NULL),
        ])?;
        Ok(())
    }
}

/// Read an encoded corpus back. `NULL` encodings become `None`.
pub fn read_rows<R: Read>(reader: R) -> Result<Vec<EncodedRow>, Error> {
    let mut reader = csv::ReaderBuilder::new().from_reader(reader);
    reader
        .records()
        .map(|record| {
            let record = record?;
            let field = |idx: usize| record.get(idx).unwrap_or_default().to_string();
            let encoded = Some(field(2)).filter(|encoded| encoded != NULL);
            Ok(EncodedRow::new(field(0), field(1), encoded))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{read_rows, EncodedRow, EncodedWriter};
    use crate::io::WriterTrait;

    #[test]
    fn null_rows() {
        let rows = vec![
            EncodedRow::new("1".into(), "Bonjour.".into(), Some("BNJR.".into())),
            EncodedRow::new("2".into(), "Le chat noir.".into(), None),
        ];
        let mut w = EncodedWriter::new(Vec::new()).unwrap();
        w.write(rows.clone()).unwrap();
        let data = w.into_inner().unwrap();

        assert_eq!(
            String::from_utf8(data.clone()).unwrap(),
            "id,phrase_fr,phrase_steno\n1,Bonjour.,BNJR.\n2,Le chat noir.,NULL\n"
        );
        assert_eq!(read_rows(data.as_slice()).unwrap(), rows);
    }
}
