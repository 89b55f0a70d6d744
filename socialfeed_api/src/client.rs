//! HTTP client for the social feed REST backend.

use std::time::Duration;

use serde::de::DeserializeOwned;
use serde_json::Value;
use url::Url;

use crate::{
    form::{self, Fields},
    query::{PageQuery, UserSearchQuery},
    request::ApiRequest,
    types::{AuthPayload, Comment, Envelope, Notification, Page, Post, PostID, User, UserID, UserSummary},
    Error,
};

/// HTTP client for the social feed backend.
///
/// Holds no per-request state: every call takes its credentials from the
/// [`ApiRequest`] it is given, so one client can serve concurrent callers.
pub struct Client {
    http: reqwest::Client,
    /// Base URL for the API, without a trailing slash.
    base_api_url: String,
}

impl Client {
    /// Creates a client for the backend at `base_url`. No request timeout.
    pub fn with_base_url(base_url: &str) -> Result<Self, Error> {
        Self::with_timeout(base_url, None)
    }

    /// Creates a client with an optional per-request timeout.
    pub fn with_timeout(base_url: &str, timeout: Option<Duration>) -> Result<Self, Error> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().map_err(|e| {
            tracing::error!("Failed to build HTTP client: {}", e);
            Error::transport(&e)
        })?;
        Ok(Self {
            http,
            base_api_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_api_url
    }

    fn get_url(&self, path: &str, query: &[(String, String)]) -> Result<Url, Error> {
        let mut url = Url::parse(format!("{}{}", &self.base_api_url, path).as_str()).map_err(|e| {
            tracing::error!("Invalid URL constructed: {}", e);
            Error::InvalidUrl(e.to_string())
        })?;
        if !query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (name, value) in query {
                pairs.append_pair(name, value);
            }
        }
        Ok(url)
    }

    /// Sends one request and normalizes the response.
    ///
    /// Fails when the transport fails, the status is not 2xx, or the
    /// envelope reports `success: false`. The last two are indistinguishable
    /// to callers apart from the message.
    pub async fn send<T>(&self, request: &ApiRequest) -> Result<Envelope<T>, Error>
    where
        T: DeserializeOwned,
    {
        let url = self.get_url(&request.path, &request.query)?;
        tracing::debug!(
            method = %request.method,
            path = %request.path,
            authenticated = request.auth_token.is_some(),
            "sending request"
        );

        let mut builder = self
            .http
            .request(request.method.as_reqwest(), url)
            .header("accept", "application/json");
        if let Some(token) = &request.auth_token {
            builder = builder.bearer_auth(token);
        }
        if request.method.carries_payload() {
            if let Some(payload) = &request.payload {
                builder = builder.multipart(form::to_multipart(payload)?);
            }
        }

        let resp = builder.send().await.map_err(|e| {
            tracing::error!("Failed to reach {}: {}", request.path, e);
            Error::transport(&e)
        })?;

        let status = resp.status();
        let body = resp.text().await.map_err(|e| {
            tracing::error!("Failed to read response body: {}", e);
            Error::transport(&e)
        })?;

        let envelope = match serde_json::from_str::<Envelope<Value>>(&body) {
            Ok(envelope) => envelope,
            Err(e) => {
                let snippet = truncate_body(&body);
                if !status.is_success() {
                    tracing::error!("Request failed with status {}: {}", status, snippet);
                    return Err(Error::Status {
                        status: status.as_u16(),
                        body: snippet,
                    });
                }
                tracing::error!("Failed to parse envelope: {} | body: {}", e, snippet);
                return Err(Error::Parse(e.to_string()));
            }
        };

        if !status.is_success() || !envelope.success {
            let message = envelope.failure_message();
            tracing::warn!(status = status.as_u16(), %message, "request rejected");
            return Err(Error::Rejected {
                status: status.as_u16(),
                message,
            });
        }

        let Envelope {
            success,
            message,
            data,
            errors,
        } = envelope;
        let data = match data {
            None | Some(Value::Null) => None,
            Some(value) => Some(serde_json::from_value::<T>(value).map_err(|e| {
                tracing::error!("Failed to parse data for {}: {}", request.path, e);
                Error::Parse(e.to_string())
            })?),
        };
        Ok(Envelope {
            success,
            message,
            data,
            errors,
        })
    }

    /// Signs in with an email/password form.
    pub async fn login(&self, credentials: Fields) -> Result<Envelope<AuthPayload>, Error> {
        self.send(&ApiRequest::post("/login").with_payload(credentials))
            .await
    }

    /// Creates an account. Some backends answer with a token, others don't,
    /// so `data` is returned untyped.
    pub async fn register(&self, form: Fields) -> Result<Envelope<Value>, Error> {
        self.send(&ApiRequest::post("/register").with_payload(form))
            .await
    }

    pub async fn logout(&self, token: &str) -> Result<Envelope<Value>, Error> {
        self.send(&ApiRequest::post("/logout").with_token(token))
            .await
    }

    /// Fetches the signed-in user's profile.
    pub async fn current_user(&self, token: &str) -> Result<Envelope<User>, Error> {
        self.send(&ApiRequest::get("/user").with_token(token)).await
    }

    pub async fn update_profile(&self, token: &str, form: Fields) -> Result<Envelope<Value>, Error> {
        self.send(
            &ApiRequest::post("/user/update")
                .with_token(token)
                .with_payload(form),
        )
        .await
    }

    /// Fetches one page of any paginated listing at `path`.
    pub async fn page<T>(
        &self,
        token: &str,
        path: &str,
        query: &PageQuery,
    ) -> Result<Envelope<Page<T>>, Error>
    where
        T: DeserializeOwned,
    {
        self.send(&ApiRequest::get(path).with_token(token).with_query(query))
            .await
    }

    /// Fetches one page of posts from a feed route.
    pub async fn posts(
        &self,
        token: &str,
        feed_path: &str,
        query: &PageQuery,
    ) -> Result<Envelope<Page<Post>>, Error> {
        self.page::<Post>(token, feed_path, query).await
    }

    pub async fn create_post(&self, token: &str, form: Fields) -> Result<Envelope<Value>, Error> {
        self.send(
            &ApiRequest::post("/posts/store")
                .with_token(token)
                .with_payload(form),
        )
        .await
    }

    pub async fn update_post(
        &self,
        token: &str,
        post_id: PostID,
        form: Fields,
    ) -> Result<Envelope<Value>, Error> {
        self.send(
            &ApiRequest::post(format!("/posts/update/{}", post_id).as_str())
                .with_token(token)
                .with_payload(form),
        )
        .await
    }

    pub async fn delete_post(&self, token: &str, post_id: PostID) -> Result<Envelope<Value>, Error> {
        self.send(&ApiRequest::delete(format!("/posts/delete/{}", post_id).as_str()).with_token(token))
            .await
    }

    pub async fn like_post(&self, token: &str, post_id: PostID) -> Result<Envelope<Value>, Error> {
        self.send(&ApiRequest::post(format!("/posts/like/{}", post_id).as_str()).with_token(token))
            .await
    }

    pub async fn unlike_post(&self, token: &str, post_id: PostID) -> Result<Envelope<Value>, Error> {
        self.send(&ApiRequest::post(format!("/posts/unlike/{}", post_id).as_str()).with_token(token))
            .await
    }

    /// Lists every comment on a post.
    pub async fn comments(&self, token: &str, post_id: PostID) -> Result<Envelope<Vec<Comment>>, Error> {
        self.send(&ApiRequest::get(format!("/posts/comments/{}", post_id).as_str()).with_token(token))
            .await
    }

    pub async fn add_comment(
        &self,
        token: &str,
        post_id: PostID,
        comment: &str,
    ) -> Result<Envelope<Value>, Error> {
        self.send(
            &ApiRequest::post(format!("/posts/comment/{}", post_id).as_str())
                .with_token(token)
                .with_payload(Fields::new().with("comment", comment)),
        )
        .await
    }

    pub async fn notifications(&self, token: &str) -> Result<Envelope<Vec<Notification>>, Error> {
        self.send(&ApiRequest::get("/notifications").with_token(token))
            .await
    }

    pub async fn mark_notification_read(
        &self,
        token: &str,
        notification_id: i64,
    ) -> Result<Envelope<Value>, Error> {
        self.send(
            &ApiRequest::post(format!("/notifications/read/{}", notification_id).as_str())
                .with_token(token),
        )
        .await
    }

    pub async fn search_users(
        &self,
        token: &str,
        query: &UserSearchQuery,
    ) -> Result<Envelope<Vec<UserSummary>>, Error> {
        self.send(&ApiRequest::get("/user/search").with_token(token).with_query(query))
            .await
    }

    pub async fn follow(&self, token: &str, user_id: UserID) -> Result<Envelope<Value>, Error> {
        self.send(&ApiRequest::post(format!("/follow/{}", user_id).as_str()).with_token(token))
            .await
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 2000;
    if body.len() <= MAX {
        body.to_string()
    } else {
        let mut end = MAX;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}...[truncated]", &body[..end])
    }
}
