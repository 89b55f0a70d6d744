//! Request descriptors consumed by [`Client::send`](crate::Client::send).

use std::fmt;

use crate::form::Fields;
use crate::query::Query;

/// HTTP verbs the backend understands.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    /// Only POST and PUT bodies are serialized; GET and DELETE never carry one.
    pub fn carries_payload(self) -> bool {
        matches!(self, Method::Post | Method::Put)
    }

    pub(crate) fn as_reqwest(self) -> reqwest::Method {
        match self {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Delete => reqwest::Method::DELETE,
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Method::Get => "GET",
                Method::Post => "POST",
                Method::Put => "PUT",
                Method::Delete => "DELETE",
            }
        )
    }
}

/// Everything needed to issue one backend call.
#[derive(Clone, Debug, PartialEq)]
pub struct ApiRequest {
    /// Backend-relative route, e.g. `/posts/store`.
    pub path: String,
    pub method: Method,
    pub payload: Option<Fields>,
    /// Sent as `Authorization: Bearer <token>` when present.
    pub auth_token: Option<String>,
    pub query: Vec<(String, String)>,
}

impl ApiRequest {
    pub fn new(method: Method, path: &str) -> Self {
        Self {
            path: path.to_string(),
            method,
            payload: None,
            auth_token: None,
            query: Vec::new(),
        }
    }

    pub fn get(path: &str) -> Self {
        Self::new(Method::Get, path)
    }

    pub fn post(path: &str) -> Self {
        Self::new(Method::Post, path)
    }

    pub fn put(path: &str) -> Self {
        Self::new(Method::Put, path)
    }

    pub fn delete(path: &str) -> Self {
        Self::new(Method::Delete, path)
    }

    pub fn with_payload(mut self, payload: Fields) -> Self {
        self.payload = Some(payload);
        self
    }

    pub fn with_token(mut self, token: &str) -> Self {
        self.auth_token = Some(token.to_string());
        self
    }

    pub fn with_query(mut self, query: &impl Query) -> Self {
        self.query.extend(query.pairs());
        self
    }
}
