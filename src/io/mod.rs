/*!
# IO utilities

Reading and writing of the CSV files produced and consumed by the pipelines:

- the sentence corpus (`phrase_steno,phrase_fr`), see [corpus],
- the encoded corpus (`id,phrase_fr,phrase_steno`), see [encoded].

Writers implement [WriterTrait], so that extraction strategies can write either to files or to memory.
!*/
pub mod corpus;
pub mod encoded;
mod writertrait;

pub use corpus::{CorpusEntry, SentenceWriter};
pub use encoded::{EncodedRow, EncodedWriter};
pub use writertrait::WriterTrait;
