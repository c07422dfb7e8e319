//! REST API（fetch）
//!
//! ベースURLはビルド時の環境変数で差し替える。

mod fetch;

pub use fetch::{FetchDispatch, FetchListing};

pub const API_BASE_URL: &str = match option_env!("PEDIMENTO_API_URL") {
    Some(url) => url,
    None => "http://localhost:8000/api/v1",
};

pub const SERVICE_BASE_URL: &str = match option_env!("PEDIMENTO_SERVICE_URL") {
    Some(url) => url,
    None => "http://localhost:8001",
};

pub const RESOURCE: &str = "customs/procesamientopedimentos/";

/// ベースURLと相対パスを1つのスラッシュで結合
pub fn join_url(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}
