//! Designer of the week

use log::debug;
use reqwest::Client;

use crate::designers::Designer;
use crate::error::Error;
use crate::fetch::Fetch;
use crate::store::{Store, StoreView};

/// Client for the weekly designer; `None` until loaded or when none is set
#[derive(Clone)]
pub struct WeeklyDesignerClient {
    url: String,
    client: Client,
    current: Store<Option<Designer>>,
}

impl WeeklyDesignerClient {
    pub(crate) fn new(url: &str, client: Client) -> Self {
        Self {
            url: url.to_string(),
            client,
            current: Store::new(None),
        }
    }

    /// Fetch the designer of the week and publish it. A 404 means no designer
    /// was picked this week and publishes `None`.
    pub async fn load(&self) -> Result<Option<Designer>, Error> {
        let url = format!("{}/weekly", self.url);

        let designer = match Fetch::get(&self.client, &url).execute::<Designer>().await {
            Ok(designer) => Some(designer),
            Err(Error::Api { status: 404, .. }) => {
                debug!("no weekly designer this week");
                None
            }
            Err(err) => return Err(err),
        };

        self.current.publish(designer.clone());
        Ok(designer)
    }

    pub fn current(&self) -> Option<Designer> {
        self.current.get()
    }

    pub fn view(&self) -> StoreView<Option<Designer>> {
        self.current.view()
    }
}
