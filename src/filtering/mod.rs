/*! Filtering utilities

Filters operate either on page level ([page::PageFilter]) or on sentence level ([sentence::Validator]).

Every filter implements [filter::Filter], and is stateless: two successive equal inputs give two equal outputs.
Sentence filtering also exposes the reason of a rejection (see [sentence::Rejection]), so that runs can report
which rule discarded what.
! */
mod filter;
mod page;
mod sentence;

pub use filter::Filter;
pub use page::PageFilter;
pub use sentence::{Rejection, Validator};
