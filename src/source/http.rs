use async_trait::async_trait;
use reqwest::Client as HttpClient;

use crate::error::{AppError, AppResult};
use crate::models::Production;

use super::ProductionSource;

/// Loads the dataset from an HTTP endpoint serving a JSON array
///
/// A non-success status or a network error maps to a fetch error surfaced
/// on the failed screen. No timeout beyond the client's defaults and no
/// automatic retry; recovery is the user-triggered restart.
pub struct HttpSource {
    client: HttpClient,
    url: String,
}

impl HttpSource {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            client: HttpClient::new(),
            url: url.into(),
        }
    }
}

#[async_trait]
impl ProductionSource for HttpSource {
    async fn load(&self) -> AppResult<Vec<Production>> {
        let response = self.client.get(&self.url).send().await?;
        if !response.status().is_success() {
            return Err(AppError::Status {
                url: self.url.clone(),
                status: response.status(),
            });
        }
        let productions = response.json::<Vec<Production>>().await?;
        Ok(productions)
    }

    fn describe(&self) -> String {
        self.url.clone()
    }
}
