//! Library layer for the social feed client: session handling, optimistic
//! mutations, paginated feeds, and the feature operations built on them.
//!
//! Wraps the `socialfeed_api` crate, which owns the wire format and the
//! request pipeline. Everything here takes a [`Session`] explicitly.

pub mod comments;
pub mod config;
pub mod error;
pub mod feed;
pub mod likes;
pub mod notice;
pub mod notifications;
pub mod optimistic;
pub mod people;
pub mod posts;
pub mod profile;
pub mod routes;
pub mod session;
pub mod validation;

pub use socialfeed_api;
pub use socialfeed_api::types;
pub use socialfeed_api::{Client, FilePart, Fields, FormValue, PageQuery, Query, UserSearchQuery};

pub use comments::CommentThread;
pub use config::Config;
pub use error::SocialFeedError;
pub use feed::{Feed, FeedItem, FeedKind, FeedState};
pub use likes::{toggle_like, LikeState};
pub use notice::{Notice, NoticeLevel};
pub use notifications::Inbox;
pub use optimistic::{apply_optimistic, Mutation, Pending, Settled};
pub use people::UserSearch;
pub use posts::PostDraft;
pub use profile::ProfileUpdate;
pub use routes::{gate, Route};
pub use session::{Credentials, Registration, Session};
