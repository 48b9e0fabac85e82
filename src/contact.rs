//! Support messages

use log::info;
use reqwest::Client;

use crate::error::Error;
use crate::fetch::Fetch;
use crate::forms::ContactForm;

#[derive(Clone)]
pub struct ContactClient {
    url: String,
    client: Client,
}

impl ContactClient {
    pub(crate) fn new(url: &str, client: Client) -> Self {
        Self {
            url: url.to_string(),
            client,
        }
    }

    /// Validate the form and send it to the support address
    pub async fn send(&self, form: &ContactForm) -> Result<(), Error> {
        let message = form.validate()?;
        let url = format!("{}/contact", self.url);

        Fetch::post(&self.client, &url)
            .json(&message)?
            .execute_text()
            .await?;

        info!("contact message sent from {}", message.email);
        Ok(())
    }
}
