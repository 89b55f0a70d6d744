//! Creating and editing posts.

use socialfeed_api::types::{Post, PostID};
use socialfeed_api::{Client, FilePart, Fields};

use crate::error::SocialFeedError;
use crate::notice::Notice;
use crate::session::Session;
use crate::validation;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct PostDraft {
    pub content: String,
    pub media: Option<FilePart>,
}

impl PostDraft {
    pub fn new(content: &str) -> Self {
        Self {
            content: content.to_string(),
            media: None,
        }
    }

    pub fn with_media(mut self, media: FilePart) -> Self {
        self.media = Some(media);
        self
    }

    /// Starts an edit from an existing post. Existing media stays on the
    /// server unless a new file is attached.
    pub fn from_post(post: &Post) -> Self {
        Self::new(&post.content)
    }

    pub fn to_fields(&self) -> Result<Fields, SocialFeedError> {
        let content = validation::validate_post_content(&self.content)?;
        Ok(Fields::new()
            .with("content", content)
            .with_opt("media", self.media.clone()))
    }
}

/// Creates a post, or updates `post_id` when given.
pub async fn save(
    client: &Client,
    session: &Session,
    draft: &PostDraft,
    post_id: Option<PostID>,
) -> Result<Notice, SocialFeedError> {
    let fields = draft.to_fields()?;
    let token = session.require_token()?;
    let notice = match post_id {
        Some(id) => {
            let resp = client.update_post(token, id, fields).await?;
            tracing::info!(post_id = id, "post updated");
            Notice::success_or(resp.message, "Post updated successfully!")
        }
        None => {
            let resp = client.create_post(token, fields).await?;
            tracing::info!("post created");
            Notice::success_or(resp.message, "Post created successfully!")
        }
    };
    Ok(notice)
}
