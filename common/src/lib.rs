//! Pedimento Console Common Library
//!
//! CLIとWeb(WASM)で共有される型と状態管理:
//! - 処理レコードと列挙値（ラベル表）
//! - 絞り込み・ページング状態（後勝ちの一覧取得）
//! - 手動実行ゲートウェイ（レコードごとに同時実行1件）
//! - 行アクションメニューの状態機械

pub mod types;
pub mod error;
pub mod filter;
pub mod pagination;
pub mod listing;
pub mod dispatch;
pub mod menu;
pub mod source;

pub use types::{EntityId, Page, PedimentoRef, ProcessState, ServiceKind, SubjectReference, WorkItem};
pub use error::{Error, Result};
pub use filter::{FilterChange, FilterState, DEFAULT_PAGE_SIZE};
pub use pagination::{total_pages, PageNav};
pub use listing::{FetchTicket, ListingController, Resolved};
pub use dispatch::{service_path, DispatchGateway, DispatchOutcome, DispatchPayload, InFlightRegistry};
pub use menu::{MenuEvent, MenuState};
pub use source::{fetch, DispatchTransport, WorkItemSource};
