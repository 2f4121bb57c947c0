//! Page-level filtering.
use log::debug;

use super::Filter;
use crate::sources::wikipedia::Page;

/// Title markers of non-content namespaces (categories, portals, templates, help pages),
/// in French and English.
pub const EXCLUDED_NAMESPACES: [&str; 8] = [
    "Catégorie:",
    "Category:",
    "Portail:",
    "Portal:",
    "Modèle:",
    "Template:",
    "Aide:",
    "Help:",
];

/// Keeps pages that have a non-empty body and whose title does not contain
/// any of the [EXCLUDED_NAMESPACES] markers.
///
/// The marker test is a case-sensitive substring test.
#[derive(Debug, Clone)]
pub struct PageFilter {
    excluded: Vec<String>,
}

impl PageFilter {
    /// Use a custom set of excluded title markers.
    pub fn with_excluded<I, S>(markers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            excluded: markers.into_iter().map(Into::into).collect(),
        }
    }

    /// Get a reference to the excluded title markers.
    pub fn excluded(&self) -> &[String] {
        &self.excluded
    }
}

impl Default for PageFilter {
    fn default() -> Self {
        Self::with_excluded(EXCLUDED_NAMESPACES)
    }
}

impl Filter<&Page> for PageFilter {
    fn detect(&self, page: &Page) -> bool {
        let has_body = page.body().map_or(false, |body| !body.is_empty());
        if !has_body {
            debug!("page {:?} has no body", page.title());
            return false;
        }

        match self
            .excluded
            .iter()
            .find(|marker| page.title().contains(marker.as_str()))
        {
            Some(marker) => {
                debug!("page {:?} excluded by {:?}", page.title(), marker);
                false
            }
            None => true,
        }
    }
}
