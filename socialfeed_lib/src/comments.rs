//! Per-post comment threads.

use socialfeed_api::types::{Comment, PostID};
use socialfeed_api::Client;

use crate::error::SocialFeedError;
use crate::notice::Notice;
use crate::session::Session;
use crate::validation;

/// The comment section under one post.
#[derive(Clone, Debug, PartialEq)]
pub struct CommentThread {
    pub post_id: PostID,
    /// Count shown next to the post. Starts from the post's own counter.
    pub count: i64,
    pub comments: Vec<Comment>,
    pub visible: bool,
    loaded: bool,
}

impl CommentThread {
    pub fn for_post(post_id: PostID, count: i64) -> Self {
        Self {
            post_id,
            count,
            comments: Vec::new(),
            visible: false,
            loaded: false,
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// Opens or closes the thread. Comments are fetched the first time it opens.
    ///
    /// The thread toggles even when the fetch fails; the error is returned so
    /// the caller can report it.
    pub async fn toggle_visibility(
        &mut self,
        client: &Client,
        session: &Session,
    ) -> Result<bool, SocialFeedError> {
        let fetch = if !self.visible && !self.loaded {
            self.fetch(client, session).await
        } else {
            Ok(())
        };
        self.visible = !self.visible;
        fetch.map(|_| self.visible)
    }

    /// Reloads the list and sets the count to its length.
    pub async fn fetch(&mut self, client: &Client, session: &Session) -> Result<(), SocialFeedError> {
        self.reload_list(client, session).await?;
        self.count = self.comments.len() as i64;
        Ok(())
    }

    /// Reloads the list only; the count is left alone.
    async fn reload_list(&mut self, client: &Client, session: &Session) -> Result<(), SocialFeedError> {
        let token = session.require_token()?;
        let resp = client.comments(token, self.post_id).await?;
        self.comments = resp.data.unwrap_or_default();
        self.loaded = true;
        tracing::debug!(post_id = self.post_id, loaded = self.comments.len(), "loaded comments");
        Ok(())
    }

    /// Posts a comment, bumps the count, then refreshes the list.
    pub async fn submit(
        &mut self,
        client: &Client,
        session: &Session,
        text: &str,
    ) -> Result<Notice, SocialFeedError> {
        let text = validation::validate_comment(text)?;
        let token = session.require_token()?;
        let resp = client.add_comment(token, self.post_id, &text).await?;
        self.count += 1;
        if let Err(e) = self.reload_list(client, session).await {
            tracing::warn!(post_id = self.post_id, "comment added but reload failed: {}", e);
        }
        Ok(Notice::success_or(resp.message, "Comment added successfully!"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_thread_is_closed_and_empty() {
        let thread = CommentThread::for_post(4, 3);
        assert_eq!(thread.count, 3);
        assert!(thread.comments.is_empty());
        assert!(!thread.visible);
        assert!(!thread.is_loaded());
    }

    #[tokio::test]
    async fn empty_comment_is_rejected_before_any_request() {
        let client = Client::with_base_url("http://127.0.0.1:1").unwrap();
        let session = Session::with_token("t");
        let mut thread = CommentThread::for_post(4, 0);
        let err = thread.submit(&client, &session, "  \n").await.unwrap_err();
        assert_eq!(err.to_string(), "Invalid input: Comment is required");
        assert_eq!(thread.count, 0);
    }
}
