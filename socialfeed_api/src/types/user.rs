//! User and account types returned by the API.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Numeric user identifier.
pub type UserID = i64;

/// Who may see a user's posts or profile.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    Public,
    Private,
    Friends,
}

impl fmt::Display for Visibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Visibility::Public => "public",
                Visibility::Private => "private",
                Visibility::Friends => "friends",
            }
        )
    }
}

impl FromStr for Visibility {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "public" => Ok(Visibility::Public),
            "private" => Ok(Visibility::Private),
            "friends" => Ok(Visibility::Friends),
            _ => Err(()),
        }
    }
}

/// The signed-in user's profile, returned by `/user` and on login.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct User {
    pub id: UserID,

    #[serde(default)]
    pub first_name: Option<String>,

    #[serde(default)]
    pub last_name: Option<String>,

    /// Display name, e.g. "Jane Smith".
    #[serde(default)]
    pub full_name: Option<String>,

    /// Handle shown as `@user_name`.
    #[serde(default)]
    pub user_name: Option<String>,

    #[serde(default)]
    pub email: Option<String>,

    #[serde(default)]
    pub bio: Option<String>,

    #[serde(default)]
    pub profile_picture_url: Option<String>,

    #[serde(default)]
    pub cover_photo_url: Option<String>,

    #[serde(default)]
    pub followers_count: i64,

    #[serde(default)]
    pub following_count: i64,

    #[serde(default)]
    pub posts_count: i64,

    #[serde(default)]
    pub post_visibility: Option<Visibility>,

    #[serde(default)]
    pub profile_visibility: Option<Visibility>,
}

/// Token and profile returned by `/login` (and by `/register` on some backends).
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct AuthPayload {
    pub token: String,
    pub user: User,
}

/// A user search hit from `/user/search`.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct UserSummary {
    pub id: UserID,

    #[serde(default)]
    pub user_name: Option<String>,

    #[serde(default)]
    pub full_name: Option<String>,

    #[serde(default)]
    pub bio: Option<String>,

    #[serde(default)]
    pub profile_picture: Option<String>,

    #[serde(default)]
    pub is_following: bool,

    #[serde(default)]
    pub followed: bool,
}

impl UserSummary {
    /// Whether the signed-in user already follows this user, by either flag.
    pub fn is_followed(&self) -> bool {
        self.followed || self.is_following
    }
}
