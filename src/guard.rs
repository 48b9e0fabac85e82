//! Route guard for authenticated-only views

use log::debug;

use crate::auth::{Auth, SessionState};
use crate::config::GuardMode;
use crate::error::Error;
use crate::routes::{Route, Router};

/// Gate navigation to routes that need a logged-in user
#[derive(Clone)]
pub struct AuthGuard {
    auth: Auth,
    router: Router,
    mode: GuardMode,
}

impl AuthGuard {
    pub fn new(auth: Auth, router: Router, mode: GuardMode) -> Self {
        Self { auth, router, mode }
    }

    /// Check the session for `target`. A refused navigation sends the router
    /// to the login view with `target` as return url and yields `Error::Auth`.
    pub async fn check(&self, target: &Route) -> Result<SessionState, Error> {
        let result = match self.mode {
            GuardMode::Fresh => self
                .auth
                .refresh_session()
                .await
                .map_err(|err| Error::auth(format!("{} requires a session: {}", target, err))),
            GuardMode::Cached => {
                let session = self.auth.session();
                if session.is_logged && !self.auth.token_expired() {
                    Ok(session)
                } else {
                    Err(Error::auth(format!("{} requires a session", target)))
                }
            }
        };

        if let Err(ref err) = result {
            debug!("guard refused: {}", err);
            self.router.navigate(Route::Login {
                return_url: Some(target.path()),
            });
        }
        result
    }

    /// Whether the user may enter `target`; see [`AuthGuard::check`]
    pub async fn can_activate(&self, target: &Route) -> bool {
        self.check(target).await.is_ok()
    }

    /// Navigate to `target`, checking the guard for routes that require it.
    /// Returns whether the original navigation happened.
    pub async fn navigate(&self, target: Route) -> bool {
        if target.requires_auth() && !self.can_activate(&target).await {
            return false;
        }
        self.router.navigate(target);
        true
    }

    /// After login, go to the route the guard stopped, or `fallback`
    pub fn resume(&self, fallback: Route) -> Route {
        let next = match self.router.current() {
            Route::Login {
                return_url: Some(url),
            } => Route::parse(&url),
            _ => fallback,
        };
        self.router.navigate(next.clone());
        next
    }

    pub fn mode(&self) -> GuardMode {
        self.mode
    }
}
