//! Auth gating for the client's screens.

use crate::session::Session;

/// A screen of the client.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Route {
    Login,
    Register,
    Home,
    Search { query: String },
}

impl Route {
    /// The search screen for `term`, or `None` when the term is blank.
    pub fn search(term: &str) -> Option<Route> {
        let trimmed = term.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Route::Search {
                query: trimmed.to_string(),
            })
        }
    }

    /// Public screens are only for signed-out visitors.
    pub fn is_public(&self) -> bool {
        matches!(self, Route::Login | Route::Register)
    }

    pub fn path(&self) -> String {
        match self {
            Route::Login => "/login".to_string(),
            Route::Register => "/register".to_string(),
            Route::Home => "/".to_string(),
            Route::Search { query } => {
                let encoded = url::form_urlencoded::Serializer::new(String::new())
                    .append_pair("q", query)
                    .finish();
                format!("/search?{}", encoded)
            }
        }
    }
}

/// Where a visitor asking for `route` actually lands.
///
/// Signed-in visitors are sent from public screens to `Home`; signed-out
/// visitors are sent from protected screens to `Login`.
pub fn gate(route: Route, session: &Session) -> Route {
    match (route.is_public(), session.is_authenticated()) {
        (true, true) => Route::Home,
        (false, false) => Route::Login,
        _ => route,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signed_out_visitor_is_sent_to_login() {
        let session = Session::new();
        assert_eq!(gate(Route::Home, &session), Route::Login);
        assert_eq!(
            gate(Route::search("jane").unwrap(), &session),
            Route::Login
        );
        assert_eq!(gate(Route::Register, &session), Route::Register);
        assert_eq!(gate(Route::Login, &session), Route::Login);
    }

    #[test]
    fn signed_in_visitor_skips_public_screens() {
        let session = Session::with_token("t");
        assert_eq!(gate(Route::Login, &session), Route::Home);
        assert_eq!(gate(Route::Register, &session), Route::Home);
        assert_eq!(gate(Route::Home, &session), Route::Home);
        let search = Route::search(" jane ").unwrap();
        assert_eq!(gate(search.clone(), &session), search);
        assert_eq!(search.path(), "/search?q=jane");
    }

    #[test]
    fn search_path_encodes_the_term() {
        let search = Route::search("jane doe&x=1").unwrap();
        assert_eq!(search.path(), "/search?q=jane+doe%26x%3D1");
    }

    #[test]
    fn blank_search_goes_nowhere() {
        assert_eq!(Route::search("   "), None);
    }
}
