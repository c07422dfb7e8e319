//! ブラウザのトークン保存領域（localStorage）
//!
//! ログイン画面が保存したトークンをリクエストのたびに読む。

const ACCESS_TOKEN_KEY: &str = "access_token";

/// 保存済みのアクセストークン
pub fn access_token() -> Option<String> {
    let storage = web_sys::window()?.local_storage().ok()??;
    storage
        .get_item(ACCESS_TOKEN_KEY)
        .ok()
        .flatten()
        .filter(|token| !token.trim().is_empty())
}
