//! Company profiles and their pictures

mod types;

use async_trait::async_trait;
use log::{debug, info};
use reqwest::Client;

use crate::catalogue::RemoteSource;
use crate::config::ClientOptions;
use crate::error::Error;
use crate::fetch::{upload_form, Fetch, Upload};
use crate::forms::check_uploads;
use crate::store::{Store, StoreView};

pub use types::*;

/// Client for the company endpoints; owns the company cache
#[derive(Clone)]
pub struct CompanyClient {
    url: String,
    client: Client,
    options: ClientOptions,
    companies: Store<Vec<Company>>,
}

impl CompanyClient {
    pub(crate) fn new(url: &str, client: Client, options: ClientOptions) -> Self {
        Self {
            url: url.to_string(),
            client,
            options,
            companies: Store::new(Vec::new()),
        }
    }

    fn get_url(&self, path: &str) -> String {
        format!("{}/company{}", self.url, path)
    }

    /// Fetch every company and publish the list into the cache
    pub async fn load_companies(&self) -> Result<Vec<Company>, Error> {
        let url = self.get_url("/all");

        let companies = Fetch::get(&self.client, &url)
            .execute::<Vec<Company>>()
            .await?;

        debug!("loaded {} companies", companies.len());
        self.companies.publish(companies.clone());
        Ok(companies)
    }

    /// The cached company list
    pub fn companies(&self) -> StoreView<Vec<Company>> {
        self.companies.view()
    }

    /// Public profile of a company
    pub async fn get_by_id(&self, company_id: &str) -> Result<Company, Error> {
        let url = self.get_url(&format!("/{}", company_id));
        Fetch::get(&self.client, &url).execute::<Company>().await
    }

    /// Every field of a company, confidential ones included; owner or admin only
    pub async fn get_full(&self, company_id: &str) -> Result<Company, Error> {
        let url = self.get_url(&format!("/{}/full", company_id));
        Fetch::get(&self.client, &url).execute::<Company>().await
    }

    /// The company linked to a user
    pub async fn get_by_user_id(&self, user_id: &str) -> Result<Company, Error> {
        let url = self.get_url(&format!("/by-user/{}", user_id));
        Fetch::get(&self.client, &url).execute::<Company>().await
    }

    /// Create the current user's company
    pub async fn create(&self, company: &Company) -> Result<Company, Error> {
        let url = self.get_url("/new");

        let created = Fetch::post(&self.client, &url)
            .json(company)?
            .execute::<Company>()
            .await?;

        info!("company {} created", created.id);
        self.companies.update(|list| list.push(created.clone()));
        Ok(created)
    }

    /// Patch the fields set in `patch`
    pub async fn update_fields(&self, company_id: &str, patch: &Company) -> Result<Company, Error> {
        let url = self.get_url(&format!("/{}", company_id));

        let updated = Fetch::patch(&self.client, &url)
            .json(patch)?
            .execute::<Company>()
            .await?;

        self.replace_cached(&updated);
        Ok(updated)
    }

    pub async fn upload_logo(&self, company_id: &str, logo: Upload) -> Result<Company, Error> {
        self.upload(&format!("/{}/logo", company_id), "file", vec![logo])
            .await
    }

    pub async fn upload_team_photo(
        &self,
        company_id: &str,
        photo: Upload,
    ) -> Result<Company, Error> {
        self.upload(&format!("/{}/team-photo", company_id), "file", vec![photo])
            .await
    }

    /// Add pictures of the company's works
    pub async fn add_works(&self, company_id: &str, works: Vec<Upload>) -> Result<Company, Error> {
        self.upload(&format!("/{}/works", company_id), "files", works)
            .await
    }

    /// Remove one work picture, identified by its URL
    pub async fn delete_work(&self, company_id: &str, work_url: &str) -> Result<Company, Error> {
        let url = self.get_url(&format!("/{}/works", company_id));

        let updated = Fetch::delete(&self.client, &url)
            .query("url", work_url)
            .execute::<Company>()
            .await?;

        self.replace_cached(&updated);
        Ok(updated)
    }

    pub async fn delete(&self, company_id: &str) -> Result<(), Error> {
        let url = self.get_url(&format!("/{}", company_id));

        Fetch::delete(&self.client, &url).execute_text().await?;

        info!("company {} deleted", company_id);
        self.companies
            .update(|list| list.retain(|c| c.id != company_id));
        Ok(())
    }

    async fn upload(
        &self,
        path: &str,
        field: &'static str,
        uploads: Vec<Upload>,
    ) -> Result<Company, Error> {
        check_uploads(&uploads, self.options.max_upload_bytes)?;
        let url = self.get_url(path);

        let updated = Fetch::post(&self.client, &url)
            .multipart(upload_form(field, uploads))
            .execute::<Company>()
            .await?;

        self.replace_cached(&updated);
        Ok(updated)
    }

    fn replace_cached(&self, company: &Company) {
        self.companies.update(|list| {
            if let Some(slot) = list.iter_mut().find(|c| c.id == company.id) {
                *slot = company.clone();
            }
        });
    }
}

#[async_trait]
impl RemoteSource for CompanyClient {
    type Item = Company;

    async fn fetch_all(&self) -> Result<Vec<Company>, Error> {
        self.load_companies().await
    }

    fn cache(&self) -> StoreView<Vec<Company>> {
        self.companies()
    }
}
