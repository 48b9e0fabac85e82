//! Designer profiles managed by administrators on behalf of other users

use log::info;
use reqwest::Client;

use super::types::{Designer, NewDesigner};
use crate::error::Error;
use crate::fetch::Fetch;
use crate::forms::NewDesignerForm;
use crate::users::User;

/// Client for the administrator designer endpoints
#[derive(Clone)]
pub struct AdminDesigners {
    url: String,
    client: Client,
}

impl AdminDesigners {
    pub(crate) fn new(url: &str, client: Client) -> Self {
        Self {
            url: url.to_string(),
            client,
        }
    }

    fn get_url(&self, path: &str) -> String {
        format!("{}/designers{}", self.url, path)
    }

    /// Designers created by the current administrator
    pub async fn created_by_admin(&self) -> Result<Vec<Designer>, Error> {
        let url = self.get_url("/adminCreatedDesigners");

        Fetch::get(&self.client, &url)
            .execute::<Vec<Designer>>()
            .await
    }

    /// Create a designer profile not yet owned by anyone and return the
    /// refreshed list
    pub async fn create(&self, form: &NewDesignerForm) -> Result<Vec<Designer>, Error> {
        let designer: NewDesigner = form.validate()?;
        let url = self.get_url("/admin/designers");

        Fetch::post(&self.client, &url)
            .json(&designer)?
            .execute_text()
            .await?;

        info!("designer {} {} created by admin", designer.firstname, designer.lastname);
        self.created_by_admin().await
    }

    /// Delete an administrator-created designer and return the refreshed list
    pub async fn delete(&self, designer_id: &str) -> Result<Vec<Designer>, Error> {
        let url = self.get_url(&format!("/admin/delete/{}", designer_id));

        Fetch::delete(&self.client, &url).execute_text().await?;

        self.created_by_admin().await
    }

    /// Hand a designer profile over to a user and return the refreshed list
    pub async fn transfer(&self, user_id: &str, designer_id: &str) -> Result<Vec<Designer>, Error> {
        let url = self.get_url(&format!("/admin/transfer/{}/{}", user_id, designer_id));

        Fetch::post(&self.client, &url).execute_text().await?;

        info!("designer {} transferred to user {}", designer_id, user_id);
        self.created_by_admin().await
    }

    /// Find the user owning `email`, to pick a transfer target
    pub async fn find_user_by_email(&self, email: &str) -> Result<User, Error> {
        let url = format!("{}/users/admin/email/{}", self.url, email.trim());

        Fetch::get(&self.client, &url).execute::<User>().await
    }
}

/// Designers whose "firstname lastname" contains `query`, ignoring case.
/// An empty query keeps everything.
pub fn search_by_name<'a>(designers: &'a [Designer], query: &str) -> Vec<&'a Designer> {
    let query = query.trim().to_lowercase();
    designers
        .iter()
        .filter(|d| d.full_name().to_lowercase().contains(&query))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn designer(firstname: &str, lastname: &str) -> Designer {
        Designer {
            firstname: firstname.to_string(),
            lastname: lastname.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn search_spans_first_and_last_name() {
        let list = vec![designer("Ada", "Lovelace"), designer("Alan", "Turing")];
        assert_eq!(search_by_name(&list, "ada love").len(), 1);
        assert_eq!(search_by_name(&list, "TURING")[0].firstname, "Alan");
        assert_eq!(search_by_name(&list, " ").len(), 2);
        assert!(search_by_name(&list, "grace").is_empty());
    }
}
