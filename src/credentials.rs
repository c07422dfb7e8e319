//! 認証トークンの供給
//!
//! トークンはリクエストのたびに読む。ここではトークンの発行や更新は扱わない。

use crate::config::TOKEN_ENV;

pub trait CredentialSource {
    /// 付与するBearerトークン（なければ未認証で送信する）
    fn bearer_token(&self) -> Option<String>;
}

/// 環境変数 → 設定ファイルの順でトークンを探す
#[derive(Debug, Clone, Default)]
pub struct EnvOrConfigToken {
    configured: Option<String>,
}

impl EnvOrConfigToken {
    pub fn new(configured: Option<String>) -> Self {
        Self { configured }
    }
}

impl CredentialSource for EnvOrConfigToken {
    fn bearer_token(&self) -> Option<String> {
        pick_token(std::env::var(TOKEN_ENV).ok(), self.configured.as_deref())
    }
}

/// 空白だけの値は未設定として扱い、次の候補へ進む
fn pick_token(env: Option<String>, configured: Option<&str>) -> Option<String> {
    env.filter(|t| !t.trim().is_empty())
        .or_else(|| configured.filter(|t| !t.trim().is_empty()).map(str::to_string))
}

/// 固定トークン（テスト・埋め込み用）
#[derive(Debug, Clone, Default)]
pub struct StaticToken(pub Option<String>);

impl CredentialSource for StaticToken {
    fn bearer_token(&self) -> Option<String> {
        self.0.clone()
    }
}
