//! User search and follow.

use std::collections::HashMap;

use socialfeed_api::types::{UserID, UserSummary};
use socialfeed_api::{Client, UserSearchQuery};

use crate::error::SocialFeedError;
use crate::notice::Notice;
use crate::session::Session;
use crate::validation;

/// Results of the last search plus who is followed among them.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct UserSearch {
    pub query: Option<String>,
    pub users: Vec<UserSummary>,
    followed: HashMap<UserID, bool>,
}

impl UserSearch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Searches by `term`, or lists everyone when `term` is `None` or blank.
    pub async fn run(
        &mut self,
        client: &Client,
        session: &Session,
        term: Option<&str>,
    ) -> Result<&[UserSummary], SocialFeedError> {
        let term = term
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(validation::validate_search)
            .transpose()?;
        let token = session.require_token()?;
        let query = UserSearchQuery {
            search: term.clone(),
        };
        let resp = client.search_users(token, &query).await?;
        self.set_results(term, resp.data.unwrap_or_default());
        tracing::debug!(hits = self.users.len(), "user search");
        Ok(&self.users)
    }

    pub fn set_results(&mut self, query: Option<String>, users: Vec<UserSummary>) {
        self.followed = users.iter().map(|u| (u.id, u.is_followed())).collect();
        self.query = query;
        self.users = users;
    }

    pub fn is_followed(&self, user_id: UserID) -> bool {
        self.followed.get(&user_id).copied().unwrap_or(false)
    }

    /// Follows `user_id`; the flag is set only after the backend agrees.
    pub async fn follow(
        &mut self,
        client: &Client,
        session: &Session,
        user_id: UserID,
    ) -> Result<Notice, SocialFeedError> {
        if self.is_followed(user_id) {
            return Err(SocialFeedError::InvalidInput(
                "already following this user".to_string(),
            ));
        }
        let token = session.require_token()?;
        let resp = client.follow(token, user_id).await?;
        self.followed.insert(user_id, true);
        Ok(Notice::success_or(resp.message, "Followed successfully!"))
    }
}
