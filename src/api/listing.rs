use super::{join_url, transport_error};
use crate::credentials::CredentialSource;
use async_trait::async_trait;
use pedimento_console_common::{Error, FilterState, Page, Result, WorkItem, WorkItemSource};
use tracing::debug;

/// 一覧APIクライアント
pub struct ListingClient<C> {
    http: reqwest::Client,
    url: String,
    credentials: C,
}

impl<C: CredentialSource> ListingClient<C> {
    pub fn new(http: reqwest::Client, api_base_url: &str, resource: &str, credentials: C) -> Self {
        Self {
            http,
            url: join_url(api_base_url, resource),
            credentials,
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait(?Send)]
impl<C: CredentialSource> WorkItemSource for ListingClient<C> {
    async fn list(&self, filter: &FilterState) -> Result<Page<WorkItem>> {
        let mut request = self.http.get(&self.url).query(&filter.query_pairs());
        if let Some(token) = self.credentials.bearer_token() {
            request = request.bearer_auth(token);
        }

        debug!(url = %self.url, page = filter.page, "GET listing");
        let response = request.send().await.map_err(transport_error)?;

        let status = response.status();
        let body = response.text().await.map_err(transport_error)?;
        if !status.is_success() {
            return Err(Error::server(status.as_u16(), body));
        }

        serde_json::from_str(&body).map_err(|e| Error::Decode(e.to_string()))
    }
}
