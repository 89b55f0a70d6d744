//! The signed-in user's profile.

use socialfeed_api::types::{User, Visibility};
use socialfeed_api::{Client, FilePart, Fields};

use crate::error::SocialFeedError;
use crate::notice::Notice;
use crate::session::Session;
use crate::validation;

/// Loads `/user` and refreshes the user held by `session`.
pub async fn fetch(client: &Client, session: &mut Session) -> Result<User, SocialFeedError> {
    let token = session.require_token()?;
    let resp = client.current_user(token).await?;
    let user = resp.into_data(|| {
        SocialFeedError::Api(socialfeed_api::Error::Parse(
            "profile response carried no user".to_string(),
        ))
    })?;
    session.set_user(user.clone());
    Ok(user)
}

/// The editable profile form. Visibilities are kept as typed text and
/// checked by [`ProfileUpdate::to_fields`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ProfileUpdate {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub bio: String,
    pub post_visibility: String,
    pub profile_visibility: String,
    pub cover_photo: Option<FilePart>,
    pub profile_picture: Option<FilePart>,
}

impl ProfileUpdate {
    /// Prefills the form from the current profile.
    pub fn from_user(user: &User) -> Self {
        let visibility = |v: Option<Visibility>| {
            v.map(|v| v.to_string())
                .unwrap_or_else(|| Visibility::Public.to_string())
        };
        Self {
            email: user.email.clone().unwrap_or_default(),
            first_name: user.first_name.clone().unwrap_or_default(),
            last_name: user.last_name.clone().unwrap_or_default(),
            bio: user.bio.clone().unwrap_or_default(),
            post_visibility: visibility(user.post_visibility),
            profile_visibility: visibility(user.profile_visibility),
            cover_photo: None,
            profile_picture: None,
        }
    }

    pub fn to_fields(&self) -> Result<Fields, SocialFeedError> {
        let email = validation::validate_profile_email(&self.email)?;
        let first_name = validation::validate_name(&self.first_name, "First Name")?;
        let last_name = validation::validate_name(&self.last_name, "Last Name")?;
        let bio = validation::validate_bio(&self.bio)?;
        let post_visibility = validation::validate_visibility(&self.post_visibility)?;
        let profile_visibility = validation::validate_visibility(&self.profile_visibility)?;
        Ok(Fields::new()
            .with("email", email)
            .with("first_name", first_name)
            .with("last_name", last_name)
            .with("bio", bio)
            .with("post_visibility", post_visibility.to_string())
            .with("profile_visibility", profile_visibility.to_string())
            .with_opt("cover_photo", self.cover_photo.clone())
            .with_opt("profile_picture", self.profile_picture.clone()))
    }
}

pub async fn update(
    client: &Client,
    session: &Session,
    form: &ProfileUpdate,
) -> Result<Notice, SocialFeedError> {
    let fields = form.to_fields()?;
    let token = session.require_token()?;
    let resp = client.update_profile(token, fields).await?;
    tracing::info!("profile updated");
    Ok(Notice::success_or(resp.message, "Profile updated successfully!"))
}
