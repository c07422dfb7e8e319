//! エラー型定義
//!
//! 一覧取得とディスパッチで共有されるエラー分類:
//! - 一覧取得: Transport / Server / Decode
//! - ディスパッチ: UnsupportedService / AlreadyInFlight / DispatchFailed / Transport

use thiserror::Error;

/// 共通エラー型
#[derive(Error, Debug)]
pub enum Error {
    /// 応答を受け取れなかった（接続失敗・タイムアウト）
    #[error("通信エラー: {0}")]
    Transport(String),

    /// 一覧APIが失敗ステータスを返した
    #[error("サーバーエラー ({status}): {body}")]
    Server { status: u16, body: String },

    /// 応答本文を解釈できなかった
    #[error("レスポンスの解析に失敗: {0}")]
    Decode(String),

    /// 実行エンドポイントが割り当てられていないサービス種別
    #[error("サービス「{0}」は手動実行に対応していません")]
    UnsupportedService(String),

    /// 同じレコードのディスパッチが実行中
    #[error("処理 {0} は実行中です")]
    AlreadyInFlight(i64),

    /// 実行マイクロサービスが失敗ステータスを返した
    #[error("実行に失敗しました ({status}): {detail}")]
    DispatchFailed { status: u16, detail: String },

    #[error("ページサイズは1以上を指定してください")]
    InvalidPageSize,

    /// 列挙値のコードが範囲外
    #[error("不明な{kind}コード: {code}")]
    UnknownCode { kind: &'static str, code: u8 },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// 失敗ステータスと本文から一覧取得エラーを作る
    pub fn server(status: u16, body: impl Into<String>) -> Self {
        Error::Server {
            status,
            body: body.into(),
        }
    }

    /// 失敗ステータスと本文からディスパッチエラーを作る
    pub fn dispatch_failed(status: u16, detail: impl Into<String>) -> Self {
        Error::DispatchFailed {
            status,
            detail: detail.into(),
        }
    }
}

/// Result型エイリアス
pub type Result<T> = std::result::Result<T, Error>;
