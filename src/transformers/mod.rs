/*! Text transformers.

Rewrite page bodies into plain prose:

- [StripMarkup] removes wiki markup, templates, tables, math and HTML,
- [ExpandNumbers] spells out ranges, ordinals and cardinals in French,
- [Memoized] caches the results of another transformer in a bounded LRU cache.

!*/

mod cache;
mod markup;
mod numbers;
mod transform;

pub use cache::Memoized;
pub use markup::StripMarkup;
pub use numbers::ExpandNumbers;
pub use transform::Transform;
