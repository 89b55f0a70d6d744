//! Post, comment and notification types returned by the API.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::user::UserID;

/// Numeric post identifier.
pub type PostID = i64;

/// Author fields embedded in a post.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct PostAuthor {
    #[serde(default)]
    pub full_name: Option<String>,

    #[serde(default)]
    pub user_name: Option<String>,

    #[serde(default)]
    pub profile_picture_url: Option<String>,
}

/// A feed item from `/posts/relevant-post` or `/posts/my-post`.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Post {
    pub id: PostID,

    pub user_id: UserID,

    #[serde(default)]
    pub content: String,

    #[serde(default)]
    pub media_url: Option<String>,

    #[serde(default)]
    pub likes_count: i64,

    #[serde(default)]
    pub comments_count: i64,

    #[serde(default)]
    pub is_liked_by_user: bool,

    /// Relative creation time as rendered by the backend, e.g. "2 hours ago".
    #[serde(default)]
    pub created_at_human: Option<String>,

    #[serde(default)]
    pub user: Option<PostAuthor>,
}

impl Post {
    /// Display name of the author, falling back to the handle.
    pub fn author_name(&self) -> String {
        self.user
            .as_ref()
            .and_then(|u| u.full_name.clone().or_else(|| u.user_name.clone()))
            .unwrap_or_default()
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct CommentAuthor {
    pub user_name: String,
}

/// A comment from `/posts/comments/{id}`.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Comment {
    #[serde(default)]
    pub id: Option<i64>,

    pub comment: String,

    #[serde(default, with = "lenient_datetime")]
    pub created_at: Option<NaiveDateTime>,

    pub user: CommentAuthor,
}

/// Accepts RFC 3339 (`2024-03-01T10:00:00.000000Z`) or
/// `2024-03-01 10:00:00`; anything else becomes `None`.
mod lenient_datetime {
    use chrono::{DateTime, NaiveDateTime};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &Option<NaiveDateTime>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(dt) => serializer.serialize_str(&dt.format("%Y-%m-%dT%H:%M:%S").to_string()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveDateTime>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw: Option<String> = Option::deserialize(deserializer)?;
        Ok(raw.and_then(|s| parse(&s)))
    }

    pub(super) fn parse(s: &str) -> Option<NaiveDateTime> {
        if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
            return Some(dt.naive_utc());
        }
        NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S")
            .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S"))
            .ok()
    }
}

/// An entry from `/notifications`.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Notification {
    pub id: i64,

    #[serde(default)]
    pub message: String,

    #[serde(default)]
    pub read: bool,

    #[serde(default)]
    pub created_at_human: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn comment_timestamps_accept_both_layouts() {
        assert!(lenient_datetime::parse("2024-03-01T10:00:00.000000Z").is_some());
        assert!(lenient_datetime::parse("2024-03-01 10:00:00").is_some());
        assert!(lenient_datetime::parse("yesterday").is_none());
    }

    #[test]
    fn author_name_prefers_full_name() {
        let post: Post = serde_json::from_value(serde_json::json!({
            "id": 1,
            "user_id": 2,
            "user": {"full_name": "Jane Smith", "user_name": "jane"}
        }))
        .unwrap();
        assert_eq!(post.author_name(), "Jane Smith");
    }
}
