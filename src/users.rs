//! User identities, account kinds and the favourite designers list

use log::info;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::auth::AccountType;
use crate::designers::Designer;
use crate::error::Error;
use crate::fetch::Fetch;

/// Public identity of a user
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct User {
    pub user_id: String,
    pub firstname: String,
    pub lastname: String,
}

impl User {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.firstname, self.lastname)
            .trim()
            .to_string()
    }
}

/// Client for the user endpoints
#[derive(Clone)]
pub struct UserClient {
    url: String,
    client: Client,
}

impl UserClient {
    pub(crate) fn new(url: &str, client: Client) -> Self {
        Self {
            url: url.to_string(),
            client,
        }
    }

    fn get_url(&self, path: &str) -> String {
        format!("{}/users{}", self.url, path)
    }

    /// Which kind of profile the user owns, if any
    pub async fn account_type(&self, user_id: &str) -> Result<AccountType, Error> {
        let url = self.get_url(&format!("/{}/has-account", user_id));
        Fetch::get(&self.client, &url).execute::<AccountType>().await
    }

    pub async fn get_user(&self, user_id: &str) -> Result<User, Error> {
        let url = self.get_url(&format!("/{}", user_id));
        Fetch::get(&self.client, &url).execute::<User>().await
    }

    /// Designers the current user marked as favourites
    pub async fn friends(&self) -> Result<Vec<Designer>, Error> {
        let url = self.get_url("/friends");
        Fetch::get(&self.client, &url)
            .execute::<Vec<Designer>>()
            .await
    }

    pub async fn add_friend(&self, designer_id: &str) -> Result<User, Error> {
        let url = self.get_url(&format!("/add/{}", designer_id));

        let user = Fetch::post(&self.client, &url).execute::<User>().await?;

        info!("designer {} added to favourites", designer_id);
        Ok(user)
    }

    pub async fn delete_friend(&self, designer_id: &str) -> Result<User, Error> {
        let url = self.get_url(&format!("/delete/{}", designer_id));

        let user = Fetch::post(&self.client, &url).execute::<User>().await?;

        info!("designer {} removed from favourites", designer_id);
        Ok(user)
    }
}

/// Whether `designer_id` is among `friends`
pub fn is_friend(friends: &[Designer], designer_id: &str) -> bool {
    friends.iter().any(|d| d.id == designer_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_from_backend_shape() {
        let user: User =
            serde_json::from_str(r#"{"userId":"u1","firstname":"Ada","lastname":"Lovelace"}"#)
                .unwrap();
        assert_eq!(user.user_id, "u1");
        assert_eq!(user.full_name(), "Ada Lovelace");
    }

    #[test]
    fn friend_lookup() {
        let friends = vec![Designer {
            id: "d1".to_string(),
            ..Default::default()
        }];
        assert!(is_friend(&friends, "d1"));
        assert!(!is_friend(&friends, "d2"));
    }
}
