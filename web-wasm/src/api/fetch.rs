//! web_sys::fetch による一覧取得・実行

use super::join_url;
use crate::token_store;
use async_trait::async_trait;
use pedimento_console_common::{
    DispatchPayload, DispatchTransport, Error, FilterState, Page, Result, WorkItem, WorkItemSource,
};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Request, RequestInit, RequestMode, Response};

fn js_error(e: JsValue) -> Error {
    Error::Transport(format!("{:?}", e))
}

/// リクエスト送信（トークンがあればBearerを付ける）
async fn send(method: &str, url: &str, body: Option<String>) -> Result<Response> {
    let opts = RequestInit::new();
    opts.set_method(method);
    opts.set_mode(RequestMode::Cors);
    let has_body = body.is_some();
    if let Some(body) = body {
        opts.set_body(&JsValue::from_str(&body));
    }

    let request = Request::new_with_str_and_init(url, &opts).map_err(js_error)?;
    let headers = request.headers();
    for (name, value) in header_pairs(has_body, token_store::access_token()) {
        headers.set(name, &value).map_err(js_error)?;
    }

    let window = web_sys::window().ok_or_else(|| Error::Transport("window がありません".into()))?;
    let resp_value = JsFuture::from(window.fetch_with_request(&request))
        .await
        .map_err(js_error)?;
    resp_value.dyn_into().map_err(js_error)
}

/// 付与するヘッダ
///
/// Content-Type は本文があるときだけ付ける（GETに付けるとプリフライトが発生する）。
fn header_pairs(has_body: bool, token: Option<String>) -> Vec<(&'static str, String)> {
    let mut pairs = vec![("Accept", "application/json".to_string())];
    if has_body {
        pairs.push(("Content-Type", "application/json".to_string()));
    }
    if let Some(token) = token {
        pairs.push(("Authorization", format!("Bearer {}", token)));
    }
    pairs
}

/// 本文をテキストで読む
async fn read_text(resp: &Response) -> Result<String> {
    let promise = resp.text().map_err(js_error)?;
    let value = JsFuture::from(promise).await.map_err(js_error)?;
    Ok(value.as_string().unwrap_or_default())
}

/// 一覧API
pub struct FetchListing {
    url: String,
}

impl FetchListing {
    pub fn new(api_base_url: &str, resource: &str) -> Self {
        Self {
            url: join_url(api_base_url, resource),
        }
    }
}

#[async_trait(?Send)]
impl WorkItemSource for FetchListing {
    async fn list(&self, filter: &FilterState) -> Result<Page<WorkItem>> {
        let url = format!("{}?{}", self.url, filter.query_string());
        let resp = send("GET", &url, None).await?;
        let body = read_text(&resp).await?;

        if !resp.ok() {
            return Err(Error::server(resp.status(), body));
        }

        serde_json::from_str(&body).map_err(|e| Error::Decode(e.to_string()))
    }
}

/// 実行マイクロサービス
pub struct FetchDispatch {
    base_url: String,
}

impl FetchDispatch {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.to_string(),
        }
    }
}

#[async_trait(?Send)]
impl DispatchTransport for FetchDispatch {
    async fn post(&self, path: &str, payload: &DispatchPayload) -> Result<()> {
        let body = serde_json::to_string(payload)?;
        let resp = send("POST", &join_url(&self.base_url, path), Some(body)).await?;

        if resp.ok() {
            return Ok(());
        }

        let detail = read_text(&resp).await.unwrap_or_default();
        Err(Error::dispatch_failed(resp.status(), detail))
    }
}
