use socialfeed_api::{PageQuery, Query, UserSearchQuery};
use url::Url;

fn base_url() -> Url {
    Url::parse("https://example.com/api/posts/my-post").unwrap()
}

#[test]
fn page_query_defaults() {
    let url = PageQuery::default().add_to_url(&base_url());
    assert_eq!(url.query(), Some("page=1"));
}

#[test]
fn page_query_with_page() {
    let url = PageQuery::default().with_page(3).add_to_url(&base_url());
    assert_eq!(url.query(), Some("page=3"));
}

#[test]
fn user_search_without_term_sends_empty_search() {
    let url = UserSearchQuery::default().add_to_url(&base_url());
    assert_eq!(url.query(), Some("search="));
}

#[test]
fn user_search_encodes_term() {
    let url = UserSearchQuery::default()
        .with_search("o'brien & co")
        .add_to_url(&base_url());
    let query = url.query().unwrap();
    assert!(query.starts_with("search="));
    assert!(!query.contains(' '));
    assert!(!query.contains("& "));
}

#[test]
fn pairs_are_in_declaration_order() {
    assert_eq!(
        PageQuery::new(2).pairs(),
        vec![("page".to_string(), "2".to_string())]
    );
}
