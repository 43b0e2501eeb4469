//! HTTP fetcher for the published sheet's CSV export.

use std::time::Duration;

use reqwest::Client;

use crate::error::SheetError;

/// Downloads the published CSV. Any failure here is fatal to a run, so there
/// is no retry layer.
pub struct SheetClient {
    client: Client,
}

impl SheetClient {
    /// Creates a `SheetClient` with the configured timeout and `User-Agent`.
    ///
    /// # Errors
    ///
    /// Returns [`SheetError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(timeout_secs: u64, user_agent: &str) -> Result<Self, SheetError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;
        Ok(Self { client })
    }

    /// Fetches the CSV body as text.
    ///
    /// Google's publish-to-web links answer with a redirect first; reqwest
    /// follows it by default.
    ///
    /// # Errors
    ///
    /// - [`SheetError::UnexpectedStatus`] for any non-2xx response.
    /// - [`SheetError::Http`] on network or TLS failure, or an unreadable body.
    pub async fn fetch_csv(&self, url: &str) -> Result<String, SheetError> {
        let response = self
            .client
            .get(url)
            .header(reqwest::header::ACCEPT, "text/csv,text/plain;q=0.9,*/*;q=0.8")
            .header(reqwest::header::CACHE_CONTROL, "no-cache")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(SheetError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_owned(),
            });
        }

        let body = response.text().await?;
        tracing::debug!(url, bytes = body.len(), "fetched sheet CSV");
        Ok(body)
    }
}
