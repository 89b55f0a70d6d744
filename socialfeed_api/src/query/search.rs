use super::common::Query;

/// Query for `/user/search`. The `search` parameter is always sent, empty
/// when no term is set, so the backend lists everyone.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct UserSearchQuery {
    pub search: Option<String>,
}

impl UserSearchQuery {
    pub fn with_search(mut self, search: &str) -> Self {
        self.search = Some(search.to_string());
        self
    }
}

impl Query for UserSearchQuery {
    fn pairs(&self) -> Vec<(String, String)> {
        vec![(
            "search".to_string(),
            self.search.clone().unwrap_or_default(),
        )]
    }
}

#[cfg(test)]
mod tests {
    use url::Url;

    use crate::query::{Query, UserSearchQuery};

    #[test]
    fn test_user_search_query() {
        let url = Url::parse("https://example.com/user/search").unwrap();

        insta::assert_snapshot!(
            UserSearchQuery::default().add_to_url(&url).to_string(),
            @"https://example.com/user/search?search="
        );

        insta::assert_snapshot!(
            UserSearchQuery::default()
                .with_search("jane doe")
                .add_to_url(&url)
                .to_string(),
            @"https://example.com/user/search?search=jane+doe"
        );
    }
}
