//! Client-side navigation targets

use std::fmt;
use url::form_urlencoded;

use crate::store::{Store, StoreView, Subscriber};

/// Every navigable location of the client
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Route {
    #[default]
    Home,
    CompanyHome,
    Login {
        /// Where to go back after a successful login
        return_url: Option<String>,
    },
    Register,
    ResetPassword {
        token: Option<String>,
    },
    DesignerDetails(String),
    CompanyDetails(String),
    Designers,
    Companies,
    Account,
    Contacts,
    Calendar,
    AdminDesigners,
    Dashboard,
    About,
    Faq,
    LegalNotice,
    Contact,
}

impl Route {
    /// Login view without a return url
    pub fn login() -> Self {
        Route::Login { return_url: None }
    }

    /// Parse a path such as `/details/42` or `login?returnUrl=%2Fcontacts`.
    /// Unknown paths resolve to [`Route::Home`].
    pub fn parse(path: &str) -> Self {
        let (path, query) = match path.split_once('?') {
            Some((path, query)) => (path, Some(query)),
            None => (path, None),
        };
        let param = |name: &str| {
            query.and_then(|q| {
                form_urlencoded::parse(q.as_bytes())
                    .find(|(key, _)| key == name)
                    .map(|(_, value)| value.into_owned())
            })
        };

        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
        match segments.as_slice() {
            [] => Route::Home,
            ["company-home"] => Route::CompanyHome,
            ["login"] => Route::Login {
                return_url: param("returnUrl"),
            },
            ["register"] => Route::Register,
            ["reset-password"] => Route::ResetPassword {
                token: param("token"),
            },
            ["details", id] => Route::DesignerDetails(id.to_string()),
            ["company", id] => Route::CompanyDetails(id.to_string()),
            ["catalogue"] => Route::Designers,
            ["companies"] => Route::Companies,
            ["account"] => Route::Account,
            ["contacts"] => Route::Contacts,
            ["calendar"] => Route::Calendar,
            ["admin", "designers"] => Route::AdminDesigners,
            ["dashboard"] => Route::Dashboard,
            ["about"] => Route::About,
            ["faq"] => Route::Faq,
            ["legal-notice"] => Route::LegalNotice,
            ["contact"] => Route::Contact,
            _ => Route::Home,
        }
    }

    /// Path of the route, query string included
    pub fn path(&self) -> String {
        fn with_query(path: &str, key: &str, value: &Option<String>) -> String {
            match value {
                Some(value) => {
                    let query: String = form_urlencoded::Serializer::new(String::new())
                        .append_pair(key, value)
                        .finish();
                    format!("{}?{}", path, query)
                }
                None => path.to_string(),
            }
        }

        match self {
            Route::Home => "/".to_string(),
            Route::CompanyHome => "/company-home".to_string(),
            Route::Login { return_url } => with_query("/login", "returnUrl", return_url),
            Route::Register => "/register".to_string(),
            Route::ResetPassword { token } => with_query("/reset-password", "token", token),
            Route::DesignerDetails(id) => format!("/details/{}", id),
            Route::CompanyDetails(id) => format!("/company/{}", id),
            Route::Designers => "/catalogue".to_string(),
            Route::Companies => "/companies".to_string(),
            Route::Account => "/account".to_string(),
            Route::Contacts => "/contacts".to_string(),
            Route::Calendar => "/calendar".to_string(),
            Route::AdminDesigners => "/admin/designers".to_string(),
            Route::Dashboard => "/dashboard".to_string(),
            Route::About => "/about".to_string(),
            Route::Faq => "/faq".to_string(),
            Route::LegalNotice => "/legal-notice".to_string(),
            Route::Contact => "/contact".to_string(),
        }
    }

    /// Routes only reachable by a logged-in user
    pub fn requires_auth(&self) -> bool {
        matches!(
            self,
            Route::Account
                | Route::Contacts
                | Route::Calendar
                | Route::AdminDesigners
                | Route::Dashboard
        )
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

/// Holds the current location
#[derive(Clone)]
pub struct Router {
    current: Store<Route>,
}

impl Default for Router {
    fn default() -> Self {
        Self::new()
    }
}

impl Router {
    pub fn new() -> Self {
        Self {
            current: Store::new(Route::Home),
        }
    }

    /// Move to `route` without any check
    pub fn navigate(&self, route: Route) {
        log::debug!("navigating to {}", route);
        self.current.publish(route);
    }

    /// Move to the location described by a path
    pub fn navigate_path(&self, path: &str) {
        self.navigate(Route::parse(path));
    }

    pub fn current(&self) -> Route {
        self.current.get()
    }

    pub fn subscribe(&self) -> Subscriber<Route> {
        self.current.subscribe()
    }

    pub fn view(&self) -> StoreView<Route> {
        self.current.view()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unmatched_paths_fall_back_to_home() {
        assert_eq!(Route::parse("/nowhere/at/all"), Route::Home);
        assert_eq!(Route::parse(""), Route::Home);
    }

    #[test]
    fn login_carries_return_url() {
        let route = Route::Login {
            return_url: Some("/details/42".to_string()),
        };
        let path = route.path();
        assert_eq!(path, "/login?returnUrl=%2Fdetails%2F42");
        assert_eq!(Route::parse(&path), route);
    }

    #[test]
    fn details_routes_keep_id() {
        assert_eq!(
            Route::parse("/details/abc"),
            Route::DesignerDetails("abc".to_string())
        );
        assert_eq!(
            Route::parse("company/xyz"),
            Route::CompanyDetails("xyz".to_string())
        );
        assert_eq!(Route::parse("/admin/designers").path(), "/admin/designers");
    }

    #[test]
    fn account_routes_require_auth() {
        assert!(Route::Contacts.requires_auth());
        assert!(Route::Dashboard.requires_auth());
        assert!(!Route::Designers.requires_auth());
        assert!(!Route::login().requires_auth());
    }

    #[test]
    fn router_publishes_location() {
        let router = Router::new();
        router.navigate_path("/faq");
        assert_eq!(router.current(), Route::Faq);
    }
}
