//! Strategy-agnostic page processing.
//!
//! Every extraction strategy feeds pages to a shared [PageProcessor], that
//! filters, normalizes, segments and validates them.
use crate::filtering::{Filter, PageFilter, Rejection, Validator};
use crate::segment;
use crate::sources::wikipedia::Page;
use crate::transformers::{ExpandNumbers, Memoized, StripMarkup, Transform};

/// What happened to a page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageOutcome {
    /// No body, or non-content namespace.
    Excluded,
    /// Sentences kept in page order, and the rejection reason of every other candidate.
    Processed {
        kept: Vec<String>,
        rejected: Vec<Rejection>,
    },
}

impl PageOutcome {
    /// Get the kept sentences, if any.
    pub fn into_sentences(self) -> Vec<String> {
        match self {
            PageOutcome::Excluded => Vec::new(),
            PageOutcome::Processed { kept, .. } => kept,
        }
    }
}

pub struct PageProcessor {
    filter: PageFilter,
    markup: Memoized<StripMarkup>,
    numbers: ExpandNumbers,
    validator: Validator,
}

impl PageProcessor {
    /// `cache_capacity` bounds the number of memoized normalized bodies.
    pub fn new(cache_capacity: usize) -> Self {
        Self {
            filter: PageFilter::default(),
            markup: Memoized::new(StripMarkup, cache_capacity),
            numbers: ExpandNumbers,
            validator: Validator,
        }
    }

    /// Markup removal then number expansion.
    pub fn normalize(&self, body: &str) -> String {
        let text = self.markup.transform_own(body.to_string());
        if text.is_empty() {
            return text;
        }
        self.numbers.transform_own(text)
    }

    pub fn process(&self, page: &Page) -> PageOutcome {
        if !self.filter.detect(page) {
            return PageOutcome::Excluded;
        }

        let text = self.normalize(page.body().unwrap_or_default());

        let mut kept = Vec::new();
        let mut rejected = Vec::new();
        for sentence in segment::sentences(&text) {
            match self.validator.check(&sentence) {
                Ok(()) => kept.push(sentence),
                Err(rejection) => rejected.push(rejection),
            }
        }

        PageOutcome::Processed { kept, rejected }
    }
}

impl Default for PageProcessor {
    fn default() -> Self {
        Self::new(1024)
    }
}

#[cfg(test)]
mod tests {
    use super::{PageOutcome, PageProcessor};
    use crate::filtering::Rejection;
    use crate::sources::wikipedia::Page;

    #[test]
    fn excluded_pages() {
        let p = PageProcessor::default();
        let category = Page::new("Catégorie:Ville", Some("Paris est une ville.".to_string()));
        let empty = Page::new("Paris", None);
        assert_eq!(p.process(&category), PageOutcome::Excluded);
        assert_eq!(p.process(&empty), PageOutcome::Excluded);
    }

    #[test]
    fn redirects_have_no_sentence() {
        let p = PageProcessor::default();
        let page = Page::new("Paname", Some("#REDIRECTION [[Paris]]".to_string()));
        assert_eq!(
            p.process(&page),
            PageOutcome::Processed {
                kept: vec![],
                rejected: vec![]
            }
        );
    }

    #[test]
    fn full_page() {
        let p = PageProcessor::default();
        let body = "'''Paris''' est la [[capitale]] de la [[France]]. \
                    Elle compte 2 millions d'habitants.\n\
                    == Voir ==\n\
                    * [[Lyon]]\n\
                    [[Catégorie:Ville de France]]";
        let page = Page::new("Paris", Some(body.to_string()));

        match p.process(&page) {
            PageOutcome::Processed { kept, rejected } => {
                assert_eq!(
                    kept,
                    vec![
                        "Paris est la capitale de la France.".to_string(),
                        "Elle compte deux millions d'habitants.".to_string(),
                    ]
                );
                // "Lyon" leftover
                assert_eq!(rejected, vec![Rejection::TooShort]);
            }
            PageOutcome::Excluded => panic!("page should not be excluded"),
        }
    }
}
