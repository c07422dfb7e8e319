//! CLIから使う一覧・実行の手順
//!
//! 状態遷移は共通ライブラリ側（ListingController / DispatchGateway）にある。

use crate::error::{ConsoleError, Result};
use pedimento_console_common::{
    fetch, DispatchGateway, DispatchOutcome, DispatchTransport, FetchTicket, FilterState,
    ListingController, PageNav, Resolved, WorkItem, WorkItemSource,
};
use tracing::{debug, info, warn};

/// 1ページ分を取得した一覧
pub async fn load_page<S>(source: &S, filter: FilterState) -> Result<ListingController>
where
    S: WorkItemSource + ?Sized,
{
    let mut listing = ListingController::new(filter);
    let ticket = listing.refresh();
    run_ticket(source, &mut listing, ticket).await?;
    Ok(listing)
}

/// 条件に合う一覧を先頭ページから順にたどってIDのレコードを探す
pub async fn find_item<S>(source: &S, filter: &FilterState, id: i64) -> Result<WorkItem>
where
    S: WorkItemSource + ?Sized,
{
    let mut listing = ListingController::new(FilterState {
        page: 1,
        ..filter.clone()
    });
    let mut ticket = listing.refresh();

    loop {
        run_ticket(source, &mut listing, ticket).await?;
        if let Some(item) = listing.items().iter().find(|item| item.id == id) {
            return Ok(item.clone());
        }
        debug!(id, page = listing.filter().page, "not on this page");
        match listing.navigate(PageNav::Next) {
            Some(next) => ticket = next,
            None => return Err(ConsoleError::NotFound(id)),
        }
    }
}

/// レコードを実行し、成功したら同じ条件で一覧を取り直す
///
/// 実行は成功しているので、取り直しの失敗はエラーにせず `None` を返す。
pub async fn dispatch_item<S, T>(
    source: &S,
    gateway: &DispatchGateway<T>,
    item: &WorkItem,
    filter: FilterState,
) -> Result<(DispatchOutcome, Option<ListingController>)>
where
    S: WorkItemSource + ?Sized,
    T: DispatchTransport,
{
    let outcome = gateway.dispatch(item).await?;
    info!(id = outcome.item_id, service = %outcome.service, "dispatched");

    let refreshed = if outcome.refresh_recommended {
        match load_page(source, filter).await {
            Ok(listing) => Some(listing),
            Err(e) => {
                warn!(id = outcome.item_id, error = %e, "refresh after dispatch failed");
                None
            }
        }
    } else {
        None
    };
    Ok((outcome, refreshed))
}

async fn run_ticket<S>(
    source: &S,
    listing: &mut ListingController,
    mut ticket: FetchTicket,
) -> Result<()>
where
    S: WorkItemSource + ?Sized,
{
    // 範囲外ページの丸めで続きのチケットが返ることがある
    loop {
        let (sent, result) = fetch(source, ticket).await;
        match listing.resolve(&sent, result) {
            Resolved::Refetch(next) => ticket = next,
            Resolved::Applied | Resolved::Stale => break,
        }
    }
    match listing.error() {
        Some(message) => Err(ConsoleError::Listing(message.to_string())),
        None => Ok(()),
    }
}
