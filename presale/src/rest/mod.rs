pub mod endpoints;

use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use crate::error::{PresaleError, Result};

/// HTTP client wrapper for the presale REST API.
///
/// Every call is a fresh round trip: no retry, no timeout, no caching.
#[derive(Debug, Clone)]
pub struct PresaleHttpClient {
    client: Client,
    base_url: String,
}

impl PresaleHttpClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// GET a JSON resource.
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = format!("{}{}", self.base_url, path);
        debug!(%url, "GET");
        let resp = self.client.get(&url).send().await?;
        decode(resp).await
    }

    /// POST a JSON body and decode the JSON reply.
    pub async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = format!("{}{}", self.base_url, path);
        debug!(%url, "POST");
        let resp = self.client.post(&url).json(body).send().await?;
        decode(resp).await
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

async fn decode<T: DeserializeOwned>(resp: Response) -> Result<T> {
    if !resp.status().is_success() {
        let status = resp.status().as_u16();
        let body = resp.text().await.unwrap_or_default();
        return Err(PresaleError::RequestFailed {
            status,
            message: body,
        });
    }

    resp.json::<T>().await.map_err(PresaleError::Request)
}
