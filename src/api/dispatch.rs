use super::{join_url, transport_error};
use crate::credentials::CredentialSource;
use async_trait::async_trait;
use pedimento_console_common::{DispatchPayload, DispatchTransport, Error, Result};
use tracing::debug;

/// 実行マイクロサービスのクライアント
pub struct ServiceClient<C> {
    http: reqwest::Client,
    base_url: String,
    credentials: C,
}

impl<C: CredentialSource> ServiceClient<C> {
    pub fn new(http: reqwest::Client, base_url: &str, credentials: C) -> Self {
        Self {
            http,
            base_url: base_url.to_string(),
            credentials,
        }
    }
}

#[async_trait(?Send)]
impl<C: CredentialSource> DispatchTransport for ServiceClient<C> {
    async fn post(&self, path: &str, payload: &DispatchPayload) -> Result<()> {
        let url = join_url(&self.base_url, path);
        let mut request = self.http.post(&url).json(payload);
        if let Some(token) = self.credentials.bearer_token() {
            request = request.bearer_auth(token);
        }

        debug!(url = %url, "POST dispatch");
        let response = request.send().await.map_err(transport_error)?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        let detail = response.text().await.unwrap_or_default();
        Err(Error::dispatch_failed(status.as_u16(), detail))
    }
}
