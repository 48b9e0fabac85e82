//! Plateforme Client Library
//!
//! A Rust client for the designer/company marketplace backend: session handling,
//! guarded navigation, filtered and paginated catalogues, and the profile,
//! calendar and upload flows of designers and companies.

pub mod auth;
pub mod catalogue;
pub mod companies;
pub mod config;
pub mod contact;
pub mod designers;
pub mod error;
pub mod fetch;
pub mod forms;
pub mod guard;
pub mod password;
pub mod routes;
pub mod scope;
pub mod store;
pub mod users;
pub mod weekly;

use log::info;
use reqwest::cookie::Jar;
use reqwest::Client;
use std::sync::Arc;

use crate::auth::{Auth, SessionState};
use crate::catalogue::{Catalogue, CompanyFacet, DesignerFacet};
use crate::companies::CompanyClient;
use crate::config::{ClientConfig, ClientOptions};
use crate::contact::ContactClient;
use crate::designers::{AdminDesigners, DesignerClient};
use crate::error::Error;
use crate::guard::AuthGuard;
use crate::password::PasswordClient;
use crate::routes::Router;
use crate::users::UserClient;
use crate::weekly::WeeklyDesignerClient;

/// The main entry point for the marketplace client
pub struct Plateforme {
    /// The backend base URL, without trailing slash
    pub url: String,
    /// HTTP client used for requests; carries the session cookie
    pub http_client: Client,
    /// Client options
    pub options: ClientOptions,
    router: Router,
    auth: Auth,
    designers: DesignerClient,
    companies: CompanyClient,
    weekly: WeeklyDesignerClient,
}

impl Plateforme {
    /// Create a new client
    ///
    /// # Arguments
    ///
    /// * `api_url` - The backend base URL, e.g. `http://localhost:8080/api`
    ///
    /// # Example
    ///
    /// ```
    /// use plateforme_client::Plateforme;
    ///
    /// let client = Plateforme::new("http://localhost:8080/api").unwrap();
    /// ```
    pub fn new(api_url: &str) -> Result<Self, Error> {
        Self::new_with_options(api_url, ClientOptions::default())
    }

    /// Create a new client with custom options
    ///
    /// # Example
    ///
    /// ```
    /// use plateforme_client::{Plateforme, config::{ClientOptions, GuardMode}};
    ///
    /// let options = ClientOptions::default()
    ///     .with_page_size(20)
    ///     .with_guard_mode(GuardMode::Cached);
    /// let client = Plateforme::new_with_options("http://localhost:8080/api", options).unwrap();
    /// ```
    pub fn new_with_options(api_url: &str, options: ClientOptions) -> Result<Self, Error> {
        Self::from_config(ClientConfig::new(api_url, options)?)
    }

    /// Create a client from `PLATEFORME_*` environment variables
    pub fn from_env() -> Result<Self, Error> {
        Self::from_config(ClientConfig::from_env()?)
    }

    /// Create a client from a validated configuration
    pub fn from_config(config: ClientConfig) -> Result<Self, Error> {
        let ClientConfig { api_url, options } = config;
        let jar = Arc::new(Jar::default());

        let mut builder = Client::builder()
            .cookie_provider(Arc::clone(&jar))
            .user_agent(options.user_agent.clone());
        if let Some(timeout) = options.request_timeout {
            builder = builder.timeout(timeout);
        }
        let http_client = builder.build()?;

        let router = Router::new();
        let auth = Auth::new(&api_url, http_client.clone(), jar, router.clone());
        let designers = DesignerClient::new(&api_url, http_client.clone(), options.clone());
        let companies = CompanyClient::new(&api_url, http_client.clone(), options.clone());
        let weekly = WeeklyDesignerClient::new(&api_url, http_client.clone());

        info!("client ready for {}", api_url);

        Ok(Self {
            url: api_url,
            http_client,
            options,
            router,
            auth,
            designers,
            companies,
            weekly,
        })
    }

    /// Check for an existing session at startup. No session is not an error:
    /// the logged-out state is published and returned.
    pub async fn bootstrap(&self) -> Result<SessionState, Error> {
        match self.auth.refresh_session().await {
            Ok(state) => Ok(state),
            Err(err) if err.is_unauthorized() => Ok(SessionState::logged_out()),
            Err(err) => Err(err),
        }
    }

    /// The auth client, owner of the session
    pub fn auth(&self) -> &Auth {
        &self.auth
    }

    /// The navigation state
    pub fn router(&self) -> &Router {
        &self.router
    }

    /// A guard for authenticated-only routes, using the configured mode
    pub fn guard(&self) -> AuthGuard {
        AuthGuard::new(self.auth.clone(), self.router.clone(), self.options.guard_mode)
    }

    pub fn designers(&self) -> &DesignerClient {
        &self.designers
    }

    pub fn companies(&self) -> &CompanyClient {
        &self.companies
    }

    pub fn weekly(&self) -> &WeeklyDesignerClient {
        &self.weekly
    }

    pub fn admin(&self) -> AdminDesigners {
        AdminDesigners::new(&self.url, self.http_client.clone())
    }

    pub fn users(&self) -> UserClient {
        UserClient::new(&self.url, self.http_client.clone())
    }

    pub fn contact(&self) -> ContactClient {
        ContactClient::new(&self.url, self.http_client.clone())
    }

    pub fn password(&self) -> PasswordClient {
        PasswordClient::new(&self.url, self.http_client.clone())
    }

    /// A catalogue over the cached designers, with its own filter and page
    pub fn designer_catalogue(&self) -> Catalogue<DesignerFacet> {
        Catalogue::from_source(&self.designers, self.options.page_size)
    }

    /// A catalogue over the cached companies, with its own filter and page
    pub fn company_catalogue(&self) -> Catalogue<CompanyFacet> {
        Catalogue::from_source(&self.companies, self.options.page_size)
    }
}

/// A convenience module for common imports
pub mod prelude {
    pub use crate::Plateforme;
    pub use crate::auth::{AccountType, SessionState};
    pub use crate::catalogue::{Catalogue, CompanyFacet, DesignerFacet, Facet, RemoteSource};
    pub use crate::config::{ClientOptions, GuardMode};
    pub use crate::error::Error;
    pub use crate::fetch::Upload;
    pub use crate::routes::Route;
    pub use crate::scope::Scope;
}
