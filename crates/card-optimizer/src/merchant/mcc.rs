use std::future::Future;
use std::time::Duration;

use serde_json::Value;
use tracing::{debug, warn};

/// Remote lookup of Merchant Category Code metadata.
pub trait MccDirectory: Send + Sync {
    /// Metadata for `mcc_code`, or `None` when the lookup fails for any reason.
    fn describe(&self, mcc_code: &str) -> impl Future<Output = Option<Value>> + Send;
}

/// `GET {base_url}/{code}` against an mcc.codes compatible API.
#[derive(Debug, Clone)]
pub struct HttpMccDirectory {
    client: reqwest::Client,
    base_url: String,
}

impl HttpMccDirectory {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    fn url_for(&self, mcc_code: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), mcc_code)
    }
}

impl MccDirectory for HttpMccDirectory {
    async fn describe(&self, mcc_code: &str) -> Option<Value> {
        let url = self.url_for(mcc_code);
        let response = match self.client.get(&url).send().await {
            Ok(response) => response,
            Err(err) => {
                warn!(%url, %err, "mcc lookup failed");
                return None;
            }
        };

        if !response.status().is_success() {
            debug!(%url, status = %response.status(), "mcc lookup returned no data");
            return None;
        }

        match response.json::<Value>().await {
            Ok(details) => Some(details),
            Err(err) => {
                warn!(%url, %err, "mcc lookup returned malformed payload");
                None
            }
        }
    }
}
