use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConsoleError {
    #[error("設定エラー: {0}")]
    Config(String),

    #[error("一覧の取得に失敗: {0}")]
    Listing(String),

    #[error("処理 {0} が見つかりません")]
    NotFound(i64),

    #[error("実行をキャンセルしました")]
    Cancelled,

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Common(#[from] pedimento_console_common::Error),
}

pub type Result<T> = std::result::Result<T, ConsoleError>;
