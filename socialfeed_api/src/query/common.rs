//! Shared query infrastructure: the [`Query`] trait and [`PageQuery`].

use url::Url;

/// Trait implemented by all query builders. Provides URL serialization.
pub trait Query {
    /// The `(name, value)` pairs this query contributes, in order.
    fn pairs(&self) -> Vec<(String, String)>;

    /// Appends this query's parameters to the given URL, returning the modified URL.
    fn add_to_url(&self, url: &Url) -> Url {
        let mut url = url.clone();
        {
            let mut pairs = url.query_pairs_mut();
            for (name, value) in self.pairs() {
                pairs.append_pair(&name, &value);
            }
        }
        url
    }
}

/// Page selection for paginated listings (`?page=N`).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PageQuery {
    /// Page number (1-indexed). Defaults to 1.
    pub page: i64,
}

impl Default for PageQuery {
    fn default() -> PageQuery {
        PageQuery { page: 1 }
    }
}

impl PageQuery {
    pub fn new(page: i64) -> Self {
        Self { page }
    }

    /// Sets the page number (1-indexed).
    pub fn with_page(mut self, page: i64) -> Self {
        self.page = page;
        self
    }
}

impl Query for PageQuery {
    fn pairs(&self) -> Vec<(String, String)> {
        vec![("page".to_string(), self.page.to_string())]
    }
}
