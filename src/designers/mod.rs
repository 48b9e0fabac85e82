//! Designer profiles, their uploads and calendar events

mod admin;
pub mod calendar;
mod types;

use async_trait::async_trait;
use log::{debug, info, warn};
use reqwest::Client;

use crate::catalogue::RemoteSource;
use crate::config::ClientOptions;
use crate::error::Error;
use crate::fetch::{upload_form, Fetch, Upload};
use crate::forms::{check_uploads, ValidationError, ValidationErrors};
use crate::store::{Store, StoreView};

pub use admin::*;
pub use calendar::EventForm;
pub use types::*;

/// Client for the designer endpoints; owns the designer cache
#[derive(Clone)]
pub struct DesignerClient {
    /// The backend base URL
    url: String,

    /// HTTP client used for requests
    client: Client,

    options: ClientOptions,

    /// Last list fetched from `/designers/all`
    designers: Store<Vec<Designer>>,
}

impl DesignerClient {
    pub(crate) fn new(url: &str, client: Client, options: ClientOptions) -> Self {
        Self {
            url: url.to_string(),
            client,
            options,
            designers: Store::new(Vec::new()),
        }
    }

    fn get_url(&self, path: &str) -> String {
        format!("{}/designers{}", self.url, path)
    }

    /// Fetch every designer and publish the list into the cache
    pub async fn load_designers(&self) -> Result<Vec<Designer>, Error> {
        let url = self.get_url("/all");

        let designers = Fetch::get(&self.client, &url)
            .execute::<Vec<Designer>>()
            .await?;

        debug!("loaded {} designers", designers.len());
        self.designers.publish(designers.clone());
        Ok(designers)
    }

    /// The cached designer list
    pub fn designers(&self) -> StoreView<Vec<Designer>> {
        self.designers.view()
    }

    /// Look a designer up in the cache
    pub fn get_by_id(&self, designer_id: &str) -> Option<Designer> {
        self.designers
            .view()
            .with(|list| list.iter().find(|d| d.id == designer_id).cloned())
    }

    /// The designer profile of a user
    pub async fn get_by_user_id(&self, user_id: &str) -> Result<Designer, Error> {
        let url = self.get_url(&format!("/designer/{}", user_id));

        Fetch::get(&self.client, &url).execute::<Designer>().await
    }

    /// Create the current user's designer profile, then reload the cache
    pub async fn create(&self, designer: &Designer) -> Result<Designer, Error> {
        let url = self.get_url("/new");

        let created = Fetch::post(&self.client, &url)
            .json(designer)?
            .execute::<Designer>()
            .await?;

        info!("designer {} created", created.id);
        self.reload().await;
        Ok(created)
    }

    /// Update the profile fields, leaving the picture and the major works alone
    pub async fn update_fields(
        &self,
        designer_id: &str,
        designer: &Designer,
    ) -> Result<Designer, Error> {
        let url = self.get_url(&format!("/{}/update-fields", designer_id));

        let updated = Fetch::put(&self.client, &url)
            .json(designer)?
            .execute::<Designer>()
            .await?;

        self.replace_cached(&updated);
        Ok(updated)
    }

    /// Replace the profile picture
    pub async fn update_picture(
        &self,
        designer_id: &str,
        picture: Upload,
    ) -> Result<Designer, Error> {
        check_uploads(std::slice::from_ref(&picture), self.options.max_upload_bytes)?;
        let url = self.get_url(&format!("/{}/update-picture", designer_id));

        let updated = Fetch::put(&self.client, &url)
            .multipart(upload_form("profilePicture", vec![picture]))
            .execute::<Designer>()
            .await?;

        self.replace_cached(&updated);
        Ok(updated)
    }

    /// Add major works pictures to `designer`.
    ///
    /// Every file must fit the upload size limit and the designer may not end up
    /// with more major works than allowed.
    pub async fn update_major_works(
        &self,
        designer: &Designer,
        works: Vec<Upload>,
    ) -> Result<Designer, Error> {
        let max = self.options.max_major_works;
        let mut errors = match check_uploads(&works, self.options.max_upload_bytes) {
            Ok(()) => Vec::new(),
            Err(ValidationErrors(errors)) => errors,
        };
        if designer.major_works.len() + works.len() > max {
            errors.push(ValidationError::TooManyWorks { max });
        }
        if !errors.is_empty() {
            return Err(ValidationErrors(errors).into());
        }

        let url = self.get_url(&format!("/{}/update-major-works", designer.id));

        let updated = Fetch::put(&self.client, &url)
            .multipart(upload_form("realisations", works))
            .execute::<Designer>()
            .await?;

        self.replace_cached(&updated);
        Ok(updated)
    }

    /// Remove one major work, identified by its URL
    pub async fn delete_major_work(
        &self,
        designer_id: &str,
        work_url: &str,
    ) -> Result<Designer, Error> {
        let url = self.get_url(&format!("/{}/delete-major-work", designer_id));

        let updated = Fetch::delete(&self.client, &url)
            .query("url", work_url)
            .execute::<Designer>()
            .await?;

        self.replace_cached(&updated);
        Ok(updated)
    }

    /// Delete a designer profile, then reload the cache
    pub async fn delete(&self, user_id: &str, designer_id: &str) -> Result<(), Error> {
        let url = self.get_url(&format!("/delete/{}/{}", user_id, designer_id));

        Fetch::delete(&self.client, &url).execute_text().await?;

        info!("designer {} deleted", designer_id);
        self.reload().await;
        Ok(())
    }

    /// Add a calendar event to the current user's designer profile
    pub async fn add_event(&self, form: &EventForm) -> Result<Designer, Error> {
        let event = form.validate()?;
        self.post_event("/events/add", &event).await
    }

    /// Modify a stored calendar event
    pub async fn modify_event(&self, form: &EventForm) -> Result<Designer, Error> {
        if !form.is_modification() {
            return Err(ValidationErrors::from(ValidationError::Required("event id")).into());
        }
        let event = form.validate()?;
        self.post_event("/events/modify", &event).await
    }

    /// Remove a calendar event
    pub async fn delete_event(&self, event: &DesignerEvent) -> Result<Designer, Error> {
        self.post_event("/events/delete", event).await
    }

    /// Add the event when the form is new, modify it otherwise
    pub async fn save_event(&self, form: &EventForm) -> Result<Designer, Error> {
        if form.is_modification() {
            self.modify_event(form).await
        } else {
            self.add_event(form).await
        }
    }

    async fn post_event(&self, path: &str, event: &DesignerEvent) -> Result<Designer, Error> {
        let url = self.get_url(path);

        let updated = Fetch::post(&self.client, &url)
            .json(event)?
            .execute::<Designer>()
            .await?;

        self.replace_cached(&updated);
        Ok(updated)
    }

    /// Reload the cache after a mutation; a failure keeps the previous list
    async fn reload(&self) {
        if let Err(err) = self.load_designers().await {
            warn!("could not reload designers: {}", err);
        }
    }

    fn replace_cached(&self, designer: &Designer) {
        self.designers.update(|list| {
            if let Some(slot) = list.iter_mut().find(|d| d.id == designer.id) {
                *slot = designer.clone();
            }
        });
    }
}

#[async_trait]
impl RemoteSource for DesignerClient {
    type Item = Designer;

    async fn fetch_all(&self) -> Result<Vec<Designer>, Error> {
        self.load_designers().await
    }

    fn cache(&self) -> StoreView<Vec<Designer>> {
        self.designers()
    }
}
