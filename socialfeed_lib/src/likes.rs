//! Like/unlike with optimistic counters.

use std::cell::RefCell;

use socialfeed_api::types::{Post, PostID};
use socialfeed_api::Client;

use crate::optimistic::{apply_optimistic, Mutation, Settled};
use crate::session::Session;

/// The like flag and counter shown for one post.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LikeState {
    pub liked: bool,
    pub likes: i64,
}

impl LikeState {
    pub fn new(liked: bool, likes: i64) -> Self {
        Self { liked, likes }
    }

    pub fn from_post(post: &Post) -> Self {
        Self::new(post.is_liked_by_user, post.likes_count)
    }
}

/// Flips the flag and moves the counter by one, never below zero.
pub struct ToggleLike;

impl Mutation for ToggleLike {
    type State = LikeState;
    type Snapshot = LikeState;

    fn apply(&self, state: &mut LikeState) -> LikeState {
        let snapshot = *state;
        if state.liked {
            state.likes = (state.likes - 1).max(0);
        } else {
            state.likes += 1;
        }
        state.liked = !state.liked;
        snapshot
    }

    fn rollback(&self, state: &mut LikeState, snapshot: LikeState) {
        *state = snapshot;
    }

    fn success_message(&self, snapshot: &LikeState) -> String {
        if snapshot.liked {
            "Like removed!".to_string()
        } else {
            "Post liked!".to_string()
        }
    }
}

/// Likes or unlikes `post_id` depending on the current flag.
///
/// The state flips immediately. A rejected call restores exactly what the
/// state held when this toggle started.
pub async fn toggle_like(
    client: &Client,
    session: &Session,
    state: &RefCell<LikeState>,
    post_id: PostID,
) -> Settled<()> {
    let token = match session.require_token() {
        Ok(token) => token,
        Err(e) => return Settled::refused(e),
    };
    let was_liked = state.borrow().liked;
    tracing::debug!(post_id, was_liked, "toggling like");

    apply_optimistic(state, ToggleLike, move || async move {
        let resp = if was_liked {
            client.unlike_post(token, post_id).await
        } else {
            client.like_post(token, post_id).await
        };
        resp.map(|_| ()).map_err(Into::into)
    })
    .await
}
