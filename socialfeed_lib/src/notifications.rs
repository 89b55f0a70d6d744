//! The notification inbox.

use socialfeed_api::types::Notification;
use socialfeed_api::Client;

use crate::error::SocialFeedError;
use crate::session::Session;

/// How many notifications the header dropdown shows.
pub const RECENT_LIMIT: usize = 5;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Inbox {
    items: Vec<Notification>,
    unread: usize,
}

impl Inbox {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> &[Notification] {
        &self.items
    }

    pub fn unread(&self) -> usize {
        self.unread
    }

    /// The first `n` notifications, in the order the backend sent them.
    pub fn recent(&self, n: usize) -> &[Notification] {
        &self.items[..n.min(self.items.len())]
    }

    pub fn replace(&mut self, items: Vec<Notification>) {
        self.items = items;
        self.recount();
    }

    fn recount(&mut self) {
        self.unread = self.items.iter().filter(|n| !n.read).count();
    }

    pub async fn refresh(&mut self, client: &Client, session: &Session) -> Result<(), SocialFeedError> {
        let token = session.require_token()?;
        let resp = client.notifications(token).await?;
        self.replace(resp.data.unwrap_or_default());
        tracing::debug!(total = self.items.len(), unread = self.unread, "refreshed notifications");
        Ok(())
    }

    /// Marks one notification read on the backend, then locally.
    pub async fn mark_read(
        &mut self,
        client: &Client,
        session: &Session,
        id: i64,
    ) -> Result<(), SocialFeedError> {
        let token = session.require_token()?;
        client.mark_notification_read(token, id).await?;
        if let Some(item) = self.items.iter_mut().find(|n| n.id == id) {
            item.read = true;
        }
        self.recount();
        Ok(())
    }
}
