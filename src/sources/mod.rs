//! Source documents.
//!
//! Mainly exists to wrap [quick_xml]'s event reader over MediaWiki XML exports.
//!
//! [wikipedia::Dump] implements [Iterator] over contained [wikipedia::Page].
pub mod wikipedia;
