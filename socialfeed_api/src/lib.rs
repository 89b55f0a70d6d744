//! Typed client for the social feed REST backend.
//!
//! [`Client::send`] is the single request pipeline: it attaches the bearer
//! token, encodes multipart payloads, and folds every failure (transport,
//! status, `success: false`, field errors) into one [`Error`] whose text is
//! meant for the user.

mod client;
mod errors;
pub mod form;
mod query;
mod request;
pub mod types;

pub use self::client::Client;
pub use self::errors::{Error, GENERIC_FAILURE, TRANSPORT_FAILURE};
pub use self::form::{FilePart, Fields, FormValue};
pub use self::query::{PageQuery, Query, UserSearchQuery};
pub use self::request::{ApiRequest, Method};
