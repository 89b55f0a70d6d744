use std::cell::RefCell;

use serde_json::{json, Value};
use socialfeed_lib::feed::{self, EXPLORE_PATH, MINE_PATH};
use socialfeed_lib::types::Post;
use socialfeed_lib::{toggle_like, Client, Feed, FeedKind, FeedState, LikeState, NoticeLevel, Session};
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn post(id: i64) -> Value {
    json!({
        "id": id,
        "user_id": 7,
        "content": format!("post {}", id),
        "likes_count": 5,
        "comments_count": 0,
        "is_liked_by_user": false,
        "created_at_human": "1 hour ago",
        "user": {"full_name": "Jane Smith", "user_name": "jane"}
    })
}

fn page(items: Vec<Value>, current: i64) -> Value {
    json!({
        "success": true,
        "data": {"data": items, "current_page": current, "last_page": 2, "per_page": 10}
    })
}

fn ok(message: &str) -> Value {
    json!({"success": true, "message": message, "data": null})
}

fn ids(feed: &Feed<Post>) -> Vec<i64> {
    feed.items().iter().map(|p| p.id).collect()
}

async fn mount_page(server: &MockServer, route: &str, page_no: &str, body: Value, times: u64) {
    Mock::given(method("GET"))
        .and(path(route))
        .and(query_param("page", page_no))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .expect(times)
        .mount(server)
        .await;
}

// ============================================================================
// Paging
// ============================================================================

#[tokio::test]
async fn pages_accumulate_until_an_empty_page() {
    let server = MockServer::start().await;
    mount_page(&server, EXPLORE_PATH, "1", page(vec![post(3), post(2)], 1), 1).await;
    mount_page(&server, EXPLORE_PATH, "2", page(vec![post(2), post(1)], 2), 1).await;
    mount_page(&server, EXPLORE_PATH, "3", page(vec![], 3), 1).await;
    mount_page(&server, EXPLORE_PATH, "4", page(vec![post(0)], 4), 0).await;

    let client = Client::with_base_url(&server.uri()).unwrap();
    let session = Session::with_token("tok");
    let mut feed = Feed::for_kind(FeedKind::Explore);

    assert_eq!(feed.load_next_page(&client, &session).await.unwrap(), 2);
    assert_eq!(feed.load_next_page(&client, &session).await.unwrap(), 2);
    assert_eq!(feed.load_next_page(&client, &session).await.unwrap(), 0);
    assert!(!feed.has_more());

    // Exhausted: no request goes out and nothing changes.
    let before = feed.state().clone();
    assert_eq!(feed.load_next_page(&client, &session).await.unwrap(), 0);
    assert_eq!(feed.state(), &before);

    assert_eq!(ids(&feed), vec![3, 2, 2, 1]);
    assert_eq!(feed.state().page, 4);
}

#[tokio::test]
async fn free_function_returns_new_state() {
    let server = MockServer::start().await;
    mount_page(&server, MINE_PATH, "1", page(vec![post(9)], 1), 1).await;

    let client = Client::with_base_url(&server.uri()).unwrap();
    let session = Session::with_token("tok");
    let initial: FeedState<Post> = FeedState::new();

    let next = feed::load_next_page(&client, &session, MINE_PATH, &initial)
        .await
        .unwrap();
    assert_eq!(next.items.len(), 1);
    assert_eq!(next.page, 2);
    assert!(next.has_more);
    assert_eq!(initial, FeedState::new());
}

#[tokio::test]
async fn failed_load_leaves_state_unchanged() {
    let server = MockServer::start().await;
    mount_page(&server, EXPLORE_PATH, "1", page(vec![post(1)], 1), 1).await;
    Mock::given(method("GET"))
        .and(path(EXPLORE_PATH))
        .and(query_param("page", "2"))
        .respond_with(
            ResponseTemplate::new(500).set_body_json(json!({"success": false, "message": "Server error"})),
        )
        .mount(&server)
        .await;

    let client = Client::with_base_url(&server.uri()).unwrap();
    let session = Session::with_token("tok");
    let mut feed = Feed::for_kind(FeedKind::Explore);
    feed.load_next_page(&client, &session).await.unwrap();
    let before = feed.state().clone();

    let err = feed.load_next_page(&client, &session).await.unwrap_err();
    assert_eq!(err.to_string(), "Server error");
    assert_eq!(feed.state(), &before);
    assert_eq!(feed.state().page, 2);
    assert!(feed.has_more());
}

#[tokio::test]
async fn page_without_data_is_an_error_not_the_end() {
    let server = MockServer::start().await;
    mount_page(&server, EXPLORE_PATH, "1", json!({"success": true, "data": null}), 1).await;

    let client = Client::with_base_url(&server.uri()).unwrap();
    let session = Session::with_token("tok");
    let mut feed = Feed::<Post>::for_kind(FeedKind::Explore);

    let err = feed.load_next_page(&client, &session).await.unwrap_err();
    assert!(err.to_string().starts_with("Failed to parse response"));
    assert_eq!(feed.state(), &FeedState::new());
    assert!(feed.has_more());
    assert_eq!(feed.state().page, 1);
}

#[tokio::test]
async fn switching_endpoint_restarts_from_page_one() {
    let server = MockServer::start().await;
    mount_page(&server, EXPLORE_PATH, "1", page(vec![post(1), post(2)], 1), 1).await;
    mount_page(&server, MINE_PATH, "1", page(vec![post(8)], 1), 1).await;

    let client = Client::with_base_url(&server.uri()).unwrap();
    let session = Session::with_token("tok");
    let mut feed = Feed::for_kind(FeedKind::Explore);
    feed.load_next_page(&client, &session).await.unwrap();

    assert!(feed.set_kind(FeedKind::Mine));
    assert!(feed.items().is_empty());
    feed.load_next_page(&client, &session).await.unwrap();
    assert_eq!(ids(&feed), vec![8]);
}

#[tokio::test]
async fn signed_out_feed_issues_no_request() {
    let server = MockServer::start().await;
    mount_page(&server, EXPLORE_PATH, "1", page(vec![post(1)], 1), 0).await;

    let client = Client::with_base_url(&server.uri()).unwrap();
    let mut feed = Feed::<Post>::for_kind(FeedKind::Explore);
    let err = feed.load_next_page(&client, &Session::new()).await.unwrap_err();
    assert_eq!(err.to_string(), "Not authenticated. Please log in.");
    assert_eq!(feed.state(), &FeedState::new());
}

// ============================================================================
// Likes
// ============================================================================

#[tokio::test]
async fn like_then_failed_unlike_restores_liked_state() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/posts/like/42"))
        .and(header("authorization", "Bearer tok"))
        .respond_with(ResponseTemplate::new(200).set_body_json(ok("Liked")))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/posts/unlike/42"))
        .respond_with(
            ResponseTemplate::new(500).set_body_json(json!({"success": false, "message": "Server error"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = Client::with_base_url(&server.uri()).unwrap();
    let session = Session::with_token("tok");
    let state = RefCell::new(LikeState::new(false, 5));

    let liked = toggle_like(&client, &session, &state, 42).await;
    assert!(liked.is_ok());
    assert_eq!(liked.notice.message, "Post liked!");
    assert_eq!(*state.borrow(), LikeState::new(true, 6));

    let unliked = toggle_like(&client, &session, &state, 42).await;
    assert!(!unliked.is_ok());
    assert_eq!(unliked.notice.level, NoticeLevel::Error);
    assert_eq!(unliked.notice.message, "Server error");
    assert_eq!(*state.borrow(), LikeState::new(true, 6));
}

#[tokio::test]
async fn like_without_session_changes_nothing() {
    let server = MockServer::start().await;
    let client = Client::with_base_url(&server.uri()).unwrap();
    let state = RefCell::new(LikeState::new(false, 5));

    let settled = toggle_like(&client, &Session::new(), &state, 42).await;
    assert!(!settled.is_ok());
    assert_eq!(*state.borrow(), LikeState::new(false, 5));
}

// ============================================================================
// Deletion
// ============================================================================

#[tokio::test]
async fn failed_delete_reinserts_at_original_index() {
    let server = MockServer::start().await;
    mount_page(&server, MINE_PATH, "1", page(vec![post(1), post(2), post(3)], 1), 1).await;
    Mock::given(method("DELETE"))
        .and(path("/posts/delete/2"))
        .respond_with(
            ResponseTemplate::new(403).set_body_json(json!({"success": false, "message": "Forbidden"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = Client::with_base_url(&server.uri()).unwrap();
    let session = Session::with_token("tok");
    let mut feed = Feed::for_kind(FeedKind::Mine);
    feed.load_next_page(&client, &session).await.unwrap();
    let original = feed.items()[1].clone();

    let settled = feed.delete_post(&client, &session, 2).await;
    assert_eq!(settled.notice.message, "Forbidden");
    assert_eq!(ids(&feed), vec![1, 2, 3]);
    assert_eq!(feed.items()[1], original);
}

#[tokio::test]
async fn successful_delete_keeps_item_removed() {
    let server = MockServer::start().await;
    mount_page(&server, MINE_PATH, "1", page(vec![post(1), post(2)], 1), 1).await;
    Mock::given(method("DELETE"))
        .and(path("/posts/delete/1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(ok("Post deleted")))
        .expect(1)
        .mount(&server)
        .await;

    let client = Client::with_base_url(&server.uri()).unwrap();
    let session = Session::with_token("tok");
    let mut feed = Feed::for_kind(FeedKind::Mine);
    feed.load_next_page(&client, &session).await.unwrap();

    let settled = feed.delete_post(&client, &session, 1).await;
    assert!(settled.is_ok());
    assert_eq!(settled.notice.message, "Post deleted successfully!");
    assert_eq!(ids(&feed), vec![2]);
}
