//! 外部APIとの境界
//!
//! CLI (reqwest) と Web (fetch) がそれぞれ実装する。どちらも単一スレッドで
//! 駆動するので `?Send`。

use crate::dispatch::DispatchPayload;
use crate::error::Result;
use crate::filter::FilterState;
use crate::listing::FetchTicket;
use crate::types::{Page, WorkItem};
use async_trait::async_trait;

/// 一覧API
#[async_trait(?Send)]
pub trait WorkItemSource {
    /// 条件に合うページを取得する
    ///
    /// 失敗時は `Transport` / `Server` / `Decode` のいずれか。
    async fn list(&self, filter: &FilterState) -> Result<Page<WorkItem>>;
}

/// 実行マイクロサービス
#[async_trait(?Send)]
pub trait DispatchTransport {
    /// `path` へ payload をPOSTする。2xx以外は `DispatchFailed`
    async fn post(&self, path: &str, payload: &DispatchPayload) -> Result<()>;
}

/// チケットの条件で一覧を取得し、チケットと結果を組にして返す
pub async fn fetch<S>(source: &S, ticket: FetchTicket) -> (FetchTicket, Result<Page<WorkItem>>)
where
    S: WorkItemSource + ?Sized,
{
    let result = source.list(ticket.filter()).await;
    (ticket, result)
}
