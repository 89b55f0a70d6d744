//! Paginated feeds: pages accumulate in order until an empty page arrives.

use std::marker::PhantomData;

use serde::de::DeserializeOwned;
use socialfeed_api::types::{Post, PostID};
use socialfeed_api::{Client, PageQuery};

use crate::error::SocialFeedError;
use crate::optimistic::{self, Mutation, Settled};
use crate::session::Session;

pub const EXPLORE_PATH: &str = "/posts/relevant-post";
pub const MINE_PATH: &str = "/posts/my-post";

/// The two post feeds the backend offers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FeedKind {
    /// Posts the backend considers relevant to the user.
    Explore,
    /// The user's own posts.
    Mine,
}

impl FeedKind {
    pub fn path(&self) -> &'static str {
        match self {
            FeedKind::Explore => EXPLORE_PATH,
            FeedKind::Mine => MINE_PATH,
        }
    }
}

/// Anything a feed can hold. The id is used to find items for removal.
pub trait FeedItem: DeserializeOwned + Clone {
    fn item_id(&self) -> i64;
}

impl FeedItem for Post {
    fn item_id(&self) -> i64 {
        self.id
    }
}

/// Items loaded so far, the next page to fetch, and whether to keep going.
#[derive(Clone, Debug, PartialEq)]
pub struct FeedState<T> {
    pub items: Vec<T>,
    pub page: i64,
    pub has_more: bool,
}

impl<T> Default for FeedState<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            page: 1,
            has_more: true,
        }
    }
}

impl<T> FeedState<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Back to page 1 with nothing loaded.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Appends one fetched page. An empty page ends the feed.
    pub fn append_page(&mut self, items: Vec<T>) {
        self.has_more = !items.is_empty();
        self.items.extend(items);
        self.page += 1;
    }
}

/// Fetches the page `state` points at and returns the state after it.
///
/// Returns `state` unchanged without a request once `has_more` is false. On
/// failure nothing is appended and the error is returned.
pub async fn load_next_page<T: FeedItem>(
    client: &Client,
    session: &Session,
    endpoint: &str,
    state: &FeedState<T>,
) -> Result<FeedState<T>, SocialFeedError> {
    if !state.has_more {
        return Ok(state.clone());
    }
    let token = session.require_token()?;
    let resp = client
        .page::<T>(token, endpoint, &PageQuery::new(state.page))
        .await?;
    let items = resp
        .into_data(|| {
            SocialFeedError::Api(socialfeed_api::Error::Parse(format!(
                "{} page {} carried no data",
                endpoint, state.page
            )))
        })?
        .data;
    tracing::debug!(endpoint, page = state.page, count = items.len(), "loaded feed page");

    let mut next = state.clone();
    next.append_page(items);
    Ok(next)
}

/// A feed bound to one endpoint.
pub struct Feed<T> {
    endpoint: String,
    state: FeedState<T>,
}

impl<T: FeedItem> Feed<T> {
    pub fn new(endpoint: &str) -> Self {
        Self {
            endpoint: endpoint.to_string(),
            state: FeedState::new(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn state(&self) -> &FeedState<T> {
        &self.state
    }

    pub fn items(&self) -> &[T] {
        &self.state.items
    }

    pub fn has_more(&self) -> bool {
        self.state.has_more
    }

    /// Points the feed at another endpoint, discarding what was loaded.
    /// Returns whether anything changed.
    pub fn set_endpoint(&mut self, endpoint: &str) -> bool {
        if self.endpoint == endpoint {
            return false;
        }
        tracing::info!(from = %self.endpoint, to = endpoint, "switching feed");
        self.endpoint = endpoint.to_string();
        self.state.reset();
        true
    }

    /// Loads the next page, returning how many items it added.
    pub async fn load_next_page(
        &mut self,
        client: &Client,
        session: &Session,
    ) -> Result<usize, SocialFeedError> {
        let before = self.state.items.len();
        self.state = load_next_page(client, session, &self.endpoint, &self.state).await?;
        Ok(self.state.items.len() - before)
    }
}

impl Feed<Post> {
    pub fn for_kind(kind: FeedKind) -> Self {
        Self::new(kind.path())
    }

    /// Switches between the explore and own-posts feeds.
    pub fn set_kind(&mut self, kind: FeedKind) -> bool {
        self.set_endpoint(kind.path())
    }

    /// Deletes a post, removing it from the list before the backend answers.
    pub async fn delete_post(
        &mut self,
        client: &Client,
        session: &Session,
        post_id: PostID,
    ) -> Settled<()> {
        let token = match session.require_token() {
            Ok(token) => token,
            Err(e) => return Settled::refused(e),
        };
        let pending = optimistic::begin(RemoveItem::new(post_id), &mut self.state);
        let outcome = client
            .delete_post(token, post_id)
            .await
            .map(|_| ())
            .map_err(SocialFeedError::from);
        let notice = pending.settle(&mut self.state, &outcome);
        Settled { notice, outcome }
    }
}

/// Removes every item with a given id from a feed.
///
/// On rollback each copy goes back to the index it was removed from, in
/// ascending order, or to the end if the list has since become shorter.
pub struct RemoveItem<T> {
    id: i64,
    _item: PhantomData<fn() -> T>,
}

impl<T> RemoveItem<T> {
    pub fn new(id: i64) -> Self {
        Self {
            id,
            _item: PhantomData,
        }
    }
}

impl<T: FeedItem> Mutation for RemoveItem<T> {
    type State = FeedState<T>;
    type Snapshot = Vec<(usize, T)>;

    fn apply(&self, state: &mut FeedState<T>) -> Vec<(usize, T)> {
        let mut removed = Vec::new();
        let mut cursor = 0;
        let mut original = 0;
        while cursor < state.items.len() {
            if state.items[cursor].item_id() == self.id {
                removed.push((original, state.items.remove(cursor)));
            } else {
                cursor += 1;
            }
            original += 1;
        }
        removed
    }

    fn rollback(&self, state: &mut FeedState<T>, snapshot: Vec<(usize, T)>) {
        for (index, item) in snapshot {
            let index = index.min(state.items.len());
            state.items.insert(index, item);
        }
    }

    fn success_message(&self, _: &Vec<(usize, T)>) -> String {
        "Post deleted successfully!".to_string()
    }
}
