//! Forgotten password flow

use log::info;
use reqwest::Client;

use crate::auth::ResetPasswordRequest;
use crate::error::Error;
use crate::fetch::Fetch;
use crate::forms::{is_email, PasswordResetForm, ValidationError, ValidationErrors};

#[derive(Clone)]
pub struct PasswordClient {
    url: String,
    client: Client,
}

impl PasswordClient {
    pub(crate) fn new(url: &str, client: Client) -> Self {
        Self {
            url: url.to_string(),
            client,
        }
    }

    fn get_url(&self, path: &str) -> String {
        format!("{}/password{}", self.url, path)
    }

    /// Ask for a reset link to be mailed to `email`. The address is sent as a
    /// bare text body.
    pub async fn request_reset(&self, email: &str) -> Result<(), Error> {
        let email = email.trim();
        if email.is_empty() {
            return Err(ValidationErrors::from(ValidationError::Required("email")).into());
        }
        if !is_email(email) {
            return Err(ValidationErrors::from(ValidationError::InvalidEmail("email")).into());
        }
        let url = self.get_url("/request-reset");

        Fetch::post(&self.client, &url)
            .text(email)
            .execute_text()
            .await?;

        info!("password reset requested");
        Ok(())
    }

    /// Set a new password with the token from the reset link
    pub async fn reset(&self, form: &PasswordResetForm) -> Result<(), Error> {
        form.validate()?;
        let url = self.get_url("/reset");
        let body = ResetPasswordRequest {
            token: form.token.trim().to_string(),
            new_password: form.password.clone(),
        };

        Fetch::post(&self.client, &url)
            .json(&body)?
            .execute_text()
            .await?;

        info!("password reset");
        Ok(())
    }
}
