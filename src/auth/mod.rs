//! Authentication and the session broadcaster

mod session;
mod types;

use log::{info, warn};
use reqwest::cookie::{CookieStore, Jar};
use reqwest::Client;
use std::sync::Arc;

use crate::error::Error;
use crate::fetch::Fetch;
use crate::forms::{LoginForm, RegisterForm};
use crate::routes::{Route, Router};
use crate::store::{Store, StoreView, Subscriber};

pub use session::*;
pub use types::*;

/// Name of the cookie holding the session token
pub const SESSION_COOKIE: &str = "jwt";

/// Client for authentication; owns the single session store of a `Plateforme` client
#[derive(Clone)]
pub struct Auth {
    /// The backend base URL
    url: String,

    /// HTTP client used for requests
    client: Client,

    /// Cookie store shared with `client`
    jar: Arc<Jar>,

    /// The current session
    session: Store<SessionState>,

    router: Router,
}

impl Auth {
    /// Create a new Auth client
    pub(crate) fn new(url: &str, client: Client, jar: Arc<Jar>, router: Router) -> Self {
        Self {
            url: url.to_string(),
            client,
            jar,
            session: Store::new(SessionState::logged_out()),
            router,
        }
    }

    fn get_auth_url(&self, path: &str) -> String {
        format!("{}/auth{}", self.url, path)
    }

    /// Ask the backend who the current user is and publish the answer.
    ///
    /// On failure the logged-out state is published and the error returned.
    pub async fn refresh_session(&self) -> Result<SessionState, Error> {
        let url = self.get_auth_url("/me");

        match Fetch::get(&self.client, &url).execute::<SessionInfo>().await {
            Ok(info) => {
                let state = SessionState::from(info);
                info!(
                    "session refreshed for user {:?} ({:?})",
                    state.user_id, state.account_type
                );
                self.session.publish(state.clone());
                Ok(state)
            }
            Err(err) => {
                info!("no active session: {}", err);
                self.session.publish(SessionState::logged_out());
                Err(err)
            }
        }
    }

    /// Sign in with email and password, then refresh the session
    pub async fn login(&self, email: &str, password: &str) -> Result<SessionState, Error> {
        let url = self.get_auth_url("/login");
        let body = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };

        Fetch::post(&self.client, &url)
            .json(&body)?
            .execute_text()
            .await?;

        self.refresh_session().await
    }

    /// Validate the login form and sign in
    pub async fn login_with_form(&self, form: &LoginForm) -> Result<SessionState, Error> {
        let request = form.validate()?;
        self.login(&request.email, &request.password).await
    }

    /// Validate the registration form and create the account.
    ///
    /// A 400 answer keeps the backend's message; any other failure is reported
    /// with a generic one.
    pub async fn register(&self, form: &RegisterForm) -> Result<(), Error> {
        let request = form.validate()?;
        let url = self.get_auth_url("/register");

        let result = Fetch::post(&self.client, &url)
            .json(&request)?
            .execute_text()
            .await;

        match result {
            Ok(_) => {
                info!("account registered for {}", request.email);
                Ok(())
            }
            Err(err @ Error::Api { status: 400, .. }) => Err(err),
            Err(err) => {
                warn!("registration failed: {}", err);
                Err(Error::general("An error occurred during registration"))
            }
        }
    }

    /// Sign out. The local session is reset and the router sent to the login
    /// view even when the backend call fails; that failure is still returned.
    pub async fn logout(&self) -> Result<(), Error> {
        let url = self.get_auth_url("/logout");

        let result = Fetch::post(&self.client, &url).execute_empty().await;
        if let Err(ref err) = result {
            warn!("logout request failed, clearing local session anyway: {}", err);
        }

        self.session.publish(SessionState::logged_out());
        self.router.navigate(Route::login());
        result
    }

    /// Snapshot of the current session
    pub fn session(&self) -> SessionState {
        self.session.get()
    }

    /// Subscribe to session transitions, starting with the current state
    pub fn subscribe(&self) -> Subscriber<SessionState> {
        self.session.subscribe()
    }

    /// Read-only handle to the session
    pub fn view(&self) -> StoreView<SessionState> {
        self.session.view()
    }

    pub fn user_id(&self) -> Option<String> {
        self.session.view().with(|s| s.user_id.clone())
    }

    pub fn is_logged(&self) -> bool {
        self.session.view().with(|s| s.is_logged)
    }

    pub fn is_admin(&self) -> bool {
        self.session.view().with(|s| s.is_admin)
    }

    /// Session token held in the cookie store, if any
    pub fn session_token(&self) -> Option<String> {
        let url = url::Url::parse(&self.url).ok()?;
        let header = self.jar.cookies(&url)?;
        let cookies = header.to_str().ok()?;
        cookies
            .split(';')
            .map(str::trim)
            .find_map(|cookie| cookie.strip_prefix(&format!("{}=", SESSION_COOKIE)))
            .map(str::to_string)
    }

    /// Whether the session token is missing or expired
    pub fn token_expired(&self) -> bool {
        match self.session_token() {
            Some(token) => jwt_expired(&token),
            None => true,
        }
    }
}
