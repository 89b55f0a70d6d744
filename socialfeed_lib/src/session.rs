//! Session context: the bearer token and signed-in user.
//!
//! A [`Session`] is passed explicitly to every operation that needs
//! credentials. Only [`login`] and [`register`] put a user into it and
//! [`Session::clear`] removes both fields together, so a user is never held
//! without a token.

use serde_json::Value;
use socialfeed_api::types::{AuthPayload, User};
use socialfeed_api::{Client, Fields};

use crate::error::SocialFeedError;
use crate::notice::Notice;
use crate::validation;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Session {
    token: Option<String>,
    user: Option<User>,
}

impl Session {
    /// A signed-out session.
    pub fn new() -> Self {
        Self::default()
    }

    /// A session resumed from a token obtained earlier, with no user loaded.
    pub fn with_token(token: &str) -> Self {
        Self {
            token: Some(token.to_string()),
            user: None,
        }
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    /// Returns the token or fails with [`SocialFeedError::NotAuthenticated`].
    pub fn require_token(&self) -> Result<&str, SocialFeedError> {
        self.token.as_deref().ok_or(SocialFeedError::NotAuthenticated)
    }

    pub fn sign_in(&mut self, payload: AuthPayload) {
        tracing::info!(user_id = payload.user.id, "signed in");
        self.token = Some(payload.token);
        self.user = Some(payload.user);
    }

    /// Refreshes the cached user after a profile fetch.
    pub fn set_user(&mut self, user: User) {
        if self.token.is_some() {
            self.user = Some(user);
        }
    }

    pub fn clear(&mut self) {
        self.token = None;
        self.user = None;
    }
}

/// Email/password sign-in form.
#[derive(Clone, Debug, PartialEq)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    pub fn new(email: &str, password: &str) -> Self {
        Self {
            email: email.to_string(),
            password: password.to_string(),
        }
    }

    /// Only presence is checked; the backend decides whether they match.
    pub fn to_fields(&self) -> Result<Fields, SocialFeedError> {
        let email = validation::validate_email(&self.email)?;
        if self.password.is_empty() {
            return Err(SocialFeedError::InvalidInput(
                "Password is required".to_string(),
            ));
        }
        Ok(Fields::new()
            .with("email", email)
            .with("password", self.password.as_str()))
    }
}

/// Sign-up form.
#[derive(Clone, Debug, PartialEq)]
pub struct Registration {
    pub first_name: String,
    pub last_name: String,
    pub user_name: String,
    pub email: String,
    pub password: String,
    pub password_confirmation: String,
}

impl Registration {
    pub fn to_fields(&self) -> Result<Fields, SocialFeedError> {
        let first_name = validation::validate_name(&self.first_name, "First name")?;
        let last_name = validation::validate_name(&self.last_name, "Last name")?;
        let user_name = validation::validate_user_name(&self.user_name)?;
        let email = validation::validate_email(&self.email)?;
        let password = validation::validate_password(&self.password)?;
        validation::validate_password_confirmation(&self.password, &self.password_confirmation)?;
        Ok(Fields::new()
            .with("first_name", first_name)
            .with("last_name", last_name)
            .with("user_name", user_name)
            .with("email", email)
            .with("password", password)
            .with("password_confirmation", self.password_confirmation.as_str()))
    }
}

/// Signs in and stores the returned token and user in `session`.
pub async fn login(
    client: &Client,
    session: &mut Session,
    credentials: &Credentials,
) -> Result<Notice, SocialFeedError> {
    let fields = credentials.to_fields()?;
    let resp = client.login(fields).await?;
    let message = resp.message.clone();
    let payload = resp.into_data(|| {
        SocialFeedError::Api(socialfeed_api::Error::Parse(
            "login response carried no token".to_string(),
        ))
    })?;
    session.sign_in(payload);
    Ok(Notice::success_or(message, "Login successful!"))
}

/// Creates an account. When the backend answers with a token the session is
/// signed in; otherwise it stays signed out and the caller should log in.
pub async fn register(
    client: &Client,
    session: &mut Session,
    registration: &Registration,
) -> Result<Notice, SocialFeedError> {
    let fields = registration.to_fields()?;
    let resp = client.register(fields).await?;
    if let Some(payload) = resp
        .data
        .clone()
        .and_then(|data: Value| serde_json::from_value::<AuthPayload>(data).ok())
    {
        session.sign_in(payload);
    }
    Ok(Notice::success_or(
        resp.message,
        "Registration successful! Redirecting to login...",
    ))
}

/// Signs out on the backend, then clears the session.
///
/// A session without a token is simply cleared. When the backend call fails
/// the session is kept so the user can retry.
pub async fn logout(client: &Client, session: &mut Session) -> Result<Notice, SocialFeedError> {
    let token = match session.token() {
        Some(token) => token.to_string(),
        None => {
            session.clear();
            return Ok(Notice::success("Logged out"));
        }
    };
    let resp = client.logout(&token).await?;
    session.clear();
    tracing::info!("signed out");
    Ok(Notice::success_or(resp.message, "Logged out"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(id: i64) -> User {
        serde_json::from_value(serde_json::json!({"id": id})).unwrap()
    }

    #[test]
    fn new_session_is_signed_out() {
        let session = Session::new();
        assert!(!session.is_authenticated());
        assert!(matches!(
            session.require_token(),
            Err(SocialFeedError::NotAuthenticated)
        ));
    }

    #[test]
    fn sign_in_then_clear() {
        let mut session = Session::new();
        session.sign_in(AuthPayload {
            token: "t".to_string(),
            user: user(3),
        });
        assert_eq!(session.require_token().unwrap(), "t");
        assert_eq!(session.user().map(|u| u.id), Some(3));

        session.clear();
        assert!(session.token().is_none());
        assert!(session.user().is_none());
    }

    #[test]
    fn set_user_needs_a_token() {
        let mut session = Session::new();
        session.set_user(user(1));
        assert!(session.user().is_none());

        let mut session = Session::with_token("t");
        session.set_user(user(1));
        assert_eq!(session.user().map(|u| u.id), Some(1));
    }

    #[test]
    fn credentials_require_password() {
        let creds = Credentials::new("jane@example.com", "");
        assert!(creds.to_fields().is_err());
    }

    #[test]
    fn registration_checks_confirmation() {
        let reg = Registration {
            first_name: "Jane".to_string(),
            last_name: "Smith".to_string(),
            user_name: "jane".to_string(),
            email: "jane@example.com".to_string(),
            password: "secret1".to_string(),
            password_confirmation: "secret2".to_string(),
        };
        let err = reg.to_fields().unwrap_err();
        assert_eq!(err.to_string(), "Invalid input: Passwords do not match");
    }

    #[test]
    fn registration_fields_in_form_order() {
        let reg = Registration {
            first_name: " Jane ".to_string(),
            last_name: "Smith".to_string(),
            user_name: "jane".to_string(),
            email: "jane@example.com".to_string(),
            password: "secret1".to_string(),
            password_confirmation: "secret1".to_string(),
        };
        let fields = reg.to_fields().unwrap();
        let names: Vec<&str> = fields.iter().map(|(name, _)| name).collect();
        assert_eq!(
            names,
            vec![
                "first_name",
                "last_name",
                "user_name",
                "email",
                "password",
                "password_confirmation"
            ]
        );
    }
}
