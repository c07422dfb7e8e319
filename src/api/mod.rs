//! REST API クライアント（reqwest）
//!
//! - listing: 一覧API（GET、ページング・絞り込み）
//! - dispatch: 実行マイクロサービス（POST）

mod dispatch;
mod listing;

pub use dispatch::ServiceClient;
pub use listing::ListingClient;

use crate::config::Config;
use crate::error::{ConsoleError, Result};
use pedimento_console_common::Error;
use std::time::Duration;

/// 設定のタイムアウトでHTTPクライアントを作る
pub fn http_client(config: &Config) -> Result<reqwest::Client> {
    let mut builder = reqwest::Client::builder();
    if config.timeout_seconds > 0 {
        builder = builder.timeout(Duration::from_secs(config.timeout_seconds));
    }
    builder
        .build()
        .map_err(|e| ConsoleError::Config(format!("HTTPクライアントを作成できません: {}", e)))
}

/// ベースURLと相対パスを1つのスラッシュで結合
pub fn join_url(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

fn transport_error(e: reqwest::Error) -> Error {
    if e.is_timeout() {
        Error::Transport(format!("タイムアウト: {}", e))
    } else {
        Error::Transport(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_url() {
        assert_eq!(
            join_url("http://h/api/v1/", "/customs/procesamientopedimentos/"),
            "http://h/api/v1/customs/procesamientopedimentos/"
        );
        assert_eq!(join_url("http://h:8001", "services/cove/acuse"), "http://h:8001/services/cove/acuse");
    }
}
