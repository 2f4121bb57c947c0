/*!
# stenocorpus

Builds a French sentence corpus from a Wikipedia XML dump, and encodes it in steno.

1. [sources::wikipedia] streams pages out of the dump,
1. [filtering] drops non-content pages and invalid sentences,
1. [transformers] strip wiki markup and spell out numbers,
1. [segment] splits prose into sentences,
1. [pipelines] orchestrate all of this over several threads,
1. [translate] encodes sentences with a steno lexicon,
1. [io] reads and writes the CSV corpora.
!*/
pub mod error;
pub mod filtering;
pub mod io;
pub mod numerals;
pub mod pipelines;
pub mod segment;
pub mod sources;
pub mod transformers;
pub mod translate;
