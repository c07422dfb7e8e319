//! 処理レコードの型定義
//!
//! CLIとWeb(WASM)で共有される型:
//! - WorkItem: 一覧APIが返す ProcesamientoPedimento レコード
//! - ProcessState / ServiceKind: 数値コードで送受信される列挙値
//! - Page: 一覧APIのページ応答

use crate::error::Error;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 処理状態（リモート側でのみ遷移する）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum ProcessState {
    Waiting,
    Processing,
    Finished,
    Error,
}

impl ProcessState {
    pub const ALL: [ProcessState; 4] = [
        ProcessState::Waiting,
        ProcessState::Processing,
        ProcessState::Finished,
        ProcessState::Error,
    ];

    pub fn code(&self) -> u8 {
        match self {
            ProcessState::Waiting => 1,
            ProcessState::Processing => 2,
            ProcessState::Finished => 3,
            ProcessState::Error => 4,
        }
    }

    /// 表示ラベル
    pub fn label(&self) -> &'static str {
        match self {
            ProcessState::Waiting => "En espera",
            ProcessState::Processing => "Procesando",
            ProcessState::Finished => "Finalizado",
            ProcessState::Error => "Error",
        }
    }

    /// CSSクラス用のキー
    pub fn as_str(&self) -> &'static str {
        match self {
            ProcessState::Waiting => "waiting",
            ProcessState::Processing => "processing",
            ProcessState::Finished => "finished",
            ProcessState::Error => "error",
        }
    }
}

impl TryFrom<u8> for ProcessState {
    type Error = Error;

    fn try_from(code: u8) -> Result<Self, Error> {
        ProcessState::ALL
            .into_iter()
            .find(|s| s.code() == code)
            .ok_or(Error::UnknownCode { kind: "estado", code })
    }
}

impl From<ProcessState> for u8 {
    fn from(state: ProcessState) -> u8 {
        state.code()
    }
}

impl fmt::Display for ProcessState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ProcessState {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Ok(code) = s.trim().parse::<u8>() {
            return ProcessState::try_from(code).map_err(|e| e.to_string());
        }
        match s.trim().to_lowercase().as_str() {
            "waiting" | "en-espera" | "espera" => Ok(ProcessState::Waiting),
            "processing" | "procesando" => Ok(ProcessState::Processing),
            "finished" | "finalizado" => Ok(ProcessState::Finished),
            "error" => Ok(ProcessState::Error),
            _ => Err(format!(
                "Unknown estado: {}. Use 1-4, waiting, processing, finished, or error",
                s
            )),
        }
    }
}

/// サービス種別（どの実行エンドポイントを使うかを決める）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum ServiceKind {
    StatusQuery,
    Listing,
    FullDocument,
    LineItems,
    Shipments,
    Receipt,
    EDocument,
    ReceiptCove,
}

impl ServiceKind {
    pub const ALL: [ServiceKind; 8] = [
        ServiceKind::StatusQuery,
        ServiceKind::Listing,
        ServiceKind::FullDocument,
        ServiceKind::LineItems,
        ServiceKind::Shipments,
        ServiceKind::Receipt,
        ServiceKind::EDocument,
        ServiceKind::ReceiptCove,
    ];

    pub fn code(&self) -> u8 {
        match self {
            ServiceKind::StatusQuery => 1,
            ServiceKind::Listing => 2,
            ServiceKind::FullDocument => 3,
            ServiceKind::LineItems => 4,
            ServiceKind::Shipments => 5,
            ServiceKind::Receipt => 6,
            ServiceKind::EDocument => 7,
            ServiceKind::ReceiptCove => 8,
        }
    }

    /// 表示ラベル
    pub fn label(&self) -> &'static str {
        match self {
            ServiceKind::StatusQuery => "Estado",
            ServiceKind::Listing => "Listado",
            ServiceKind::FullDocument => "Pedimento completo",
            ServiceKind::LineItems => "Partidas",
            ServiceKind::Shipments => "Remesas",
            ServiceKind::Receipt => "Acuse",
            ServiceKind::EDocument => "EDocument",
            ServiceKind::ReceiptCove => "Acuse COVE",
        }
    }
}

impl TryFrom<u8> for ServiceKind {
    type Error = Error;

    fn try_from(code: u8) -> Result<Self, Error> {
        ServiceKind::ALL
            .into_iter()
            .find(|k| k.code() == code)
            .ok_or(Error::UnknownCode { kind: "servicio", code })
    }
}

impl From<ServiceKind> for u8 {
    fn from(kind: ServiceKind) -> u8 {
        kind.code()
    }
}

impl fmt::Display for ServiceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ServiceKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Ok(code) = s.trim().parse::<u8>() {
            return ServiceKind::try_from(code).map_err(|e| e.to_string());
        }
        match s.trim().to_lowercase().as_str() {
            "status-query" | "estado" => Ok(ServiceKind::StatusQuery),
            "listing" | "listado" => Ok(ServiceKind::Listing),
            "full-document" | "pedimento-completo" => Ok(ServiceKind::FullDocument),
            "line-items" | "partidas" => Ok(ServiceKind::LineItems),
            "shipments" | "remesas" => Ok(ServiceKind::Shipments),
            "receipt" | "acuse" => Ok(ServiceKind::Receipt),
            "edocument" => Ok(ServiceKind::EDocument),
            "receipt-cove" | "acuse-cove" => Ok(ServiceKind::ReceiptCove),
            _ => Err(format!("Unknown servicio: {}. Use 1-8 or a service name", s)),
        }
    }
}

/// 数値または文字列で表される識別子
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EntityId {
    Number(i64),
    Text(String),
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityId::Number(n) => write!(f, "{}", n),
            EntityId::Text(s) => f.write_str(s),
        }
    }
}

/// 埋め込みの pedimento オブジェクト
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PedimentoRef {
    pub id: i64,
    pub pedimento: String,
}

/// 処理対象の参照（IDのみ、または表示用コード付きの埋め込みオブジェクト）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SubjectReference {
    Id(i64),
    Embedded(PedimentoRef),
}

impl SubjectReference {
    /// ディスパッチ時に送るスカラーID
    pub fn id(&self) -> i64 {
        match self {
            SubjectReference::Id(id) => *id,
            SubjectReference::Embedded(p) => p.id,
        }
    }

    /// 表示用コード（埋め込みでなければIDを文字列化）
    pub fn display_code(&self) -> String {
        match self {
            SubjectReference::Id(id) => id.to_string(),
            SubjectReference::Embedded(p) => p.pedimento.clone(),
        }
    }
}

/// 処理レコード（ProcesamientoPedimento）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkItem {
    pub id: i64,

    #[serde(rename = "organizacion")]
    pub organization: EntityId,

    #[serde(rename = "organizacion_name", default, skip_serializing_if = "Option::is_none")]
    pub organization_name: Option<String>,

    #[serde(rename = "estado")]
    pub state: ProcessState,

    #[serde(rename = "servicio")]
    pub service: ServiceKind,

    #[serde(rename = "pedimento")]
    pub subject: SubjectReference,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

impl WorkItem {
    /// 組織の表示名（名前がなければIDを表示）
    pub fn organization_display(&self) -> String {
        self.organization_name
            .clone()
            .unwrap_or_else(|| self.organization.to_string())
    }

    /// このレコードを手動実行できるか
    pub fn is_dispatchable(&self) -> bool {
        crate::dispatch::service_path(self.service).is_some()
    }
}

/// 一覧APIのページ応答
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    pub count: u64,
    #[serde(default)]
    pub next: Option<String>,
    #[serde(default)]
    pub previous: Option<String>,
    #[serde(default = "Vec::new")]
    pub results: Vec<T>,
}

impl<T> Default for Page<T> {
    fn default() -> Self {
        Self {
            count: 0,
            next: None,
            previous: None,
            results: Vec::new(),
        }
    }
}
