/*!
# Steno translation

Word-by-word translation of French sentences into steno codes, driven by a [Lexicon].

A sentence is [tokenized](tokenize) into words and punctuation, then every word is looked up.
Translation is all-or-nothing: a sentence with a single unknown word yields the list of its unknown words
instead of a partial translation.

[CodeIndex] numbers the distinct codes of a lexicon file, for downstream model training.
!*/
mod indices;
mod lexicon;
mod tokenize;
mod translator;

pub use indices::CodeIndex;
pub use lexicon::Lexicon;
pub use tokenize::{tokenize, Token};
pub use translator::{Translator, Untranslatable};
