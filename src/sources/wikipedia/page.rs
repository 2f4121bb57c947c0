//! Page (record) type.

/// One extracted page: its title and the body text of its revision.
///
/// `body` is `None` when the page has no text, or an empty one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Page {
    pub title: String,
    pub body: Option<String>,
}

impl Page {
    pub fn new(title: impl Into<String>, body: Option<String>) -> Self {
        Self {
            title: title.into(),
            body,
        }
    }

    /// Get a reference to the page's title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Get a reference to the page's body, if any.
    pub fn body(&self) -> Option<&str> {
        self.body.as_deref()
    }
}
