//! 一覧の状態管理
//!
//! I/Oは持たない。再取得が必要な変更は `FetchTicket` を返し、呼び出し側が
//! 取得を実行して `resolve` に結果を渡す。最後に発行したチケット以外の応答は
//! 破棄される（後勝ち）。

use crate::error::Result;
use crate::filter::{FilterChange, FilterState};
use crate::pagination::{self, PageNav};
use crate::types::{Page, WorkItem};
use tracing::{debug, warn};

/// 一覧取得の依頼
///
/// 発行時点の条件スナップショットと世代番号を持つ。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    generation: u64,
    filter: FilterState,
}

impl FetchTicket {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// このチケットで取得すべき条件
    pub fn filter(&self) -> &FilterState {
        &self.filter
    }
}

/// `resolve` の結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolved {
    /// 後続のチケットがあるため捨てた
    Stale,
    /// 反映した
    Applied,
    /// 反映したが件数が減って現在ページが範囲外になった。最終ページに丸めて取り直す
    Refetch(FetchTicket),
}

impl Resolved {
    pub fn is_applied(&self) -> bool {
        !matches!(self, Resolved::Stale)
    }
}

/// 絞り込み・ページング状態と表示中の行
#[derive(Debug, Clone, Default)]
pub struct ListingController {
    filter: FilterState,
    items: Vec<WorkItem>,
    total_count: u64,
    loading: bool,
    error: Option<String>,
    issued: u64,
}

impl ListingController {
    pub fn new(filter: FilterState) -> Self {
        Self {
            filter,
            ..Self::default()
        }
    }

    pub fn filter(&self) -> &FilterState {
        &self.filter
    }

    pub fn items(&self) -> &[WorkItem] {
        &self.items
    }

    pub fn total_count(&self) -> u64 {
        self.total_count
    }

    pub fn loading(&self) -> bool {
        self.loading
    }

    /// 直近の一覧取得エラー（表示用メッセージ）
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn total_pages(&self) -> u32 {
        pagination::total_pages(self.total_count, self.filter.page_size)
    }

    /// 現在の条件で取得し直す（マウント時・ディスパッチ成功後）
    pub fn refresh(&mut self) -> FetchTicket {
        self.issue()
    }

    /// 条件を変更する。値が変わらなければ再取得しない
    pub fn apply(&mut self, change: FilterChange) -> Result<Option<FetchTicket>> {
        let next = self.filter.applied(change)?;
        if next == self.filter {
            return Ok(None);
        }
        self.filter = next;
        Ok(Some(self.issue()))
    }

    /// ページ移動。範囲外は端に丸め、同じページなら何もしない
    pub fn navigate(&mut self, nav: PageNav) -> Option<FetchTicket> {
        let target = pagination::resolve(nav, self.filter.page, self.total_pages());
        if target == self.filter.page {
            return None;
        }
        self.filter.page = target;
        Some(self.issue())
    }

    /// 取得結果を反映する
    ///
    /// 最新のチケットに対する結果だけを適用する。
    /// 件数が減って現在ページが最終ページを超えた場合は丸めて次のチケットを返す。
    pub fn resolve(&mut self, ticket: &FetchTicket, result: Result<Page<WorkItem>>) -> Resolved {
        if ticket.generation != self.issued {
            debug!(
                generation = ticket.generation,
                latest = self.issued,
                "discarding superseded listing response"
            );
            return Resolved::Stale;
        }

        self.loading = false;
        match result {
            Ok(page) => {
                debug!(count = page.count, rows = page.results.len(), "listing applied");
                self.items = page.results;
                self.total_count = page.count;
                self.error = None;
            }
            Err(e) => {
                warn!(error = %e, "listing fetch failed");
                self.error = Some(e.to_string());
                return Resolved::Applied;
            }
        }

        let last = self.total_pages();
        if self.filter.page > last {
            debug!(page = self.filter.page, last, "page out of range, clamping");
            self.filter.page = last;
            return Resolved::Refetch(self.issue());
        }
        Resolved::Applied
    }

    fn issue(&mut self) -> FetchTicket {
        self.issued += 1;
        self.loading = true;
        debug!(generation = self.issued, page = self.filter.page, "listing fetch issued");
        FetchTicket {
            generation: self.issued,
            filter: self.filter.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::types::{EntityId, ProcessState, ServiceKind, SubjectReference};

    fn item(id: i64) -> WorkItem {
        WorkItem {
            id,
            organization: EntityId::Number(1),
            organization_name: None,
            state: ProcessState::Waiting,
            service: ServiceKind::LineItems,
            subject: SubjectReference::Id(id * 10),
            created_at: None,
            updated_at: None,
        }
    }

    fn page(count: u64, ids: &[i64]) -> Page<WorkItem> {
        Page {
            count,
            results: ids.iter().copied().map(item).collect(),
            ..Page::default()
        }
    }

    fn loaded(count: u64, page_size: u32) -> ListingController {
        let mut listing = ListingController::new(FilterState::with_page_size(page_size).unwrap());
        let ticket = listing.refresh();
        assert!(listing.resolve(&ticket, Ok(page(count, &[1]))).is_applied());
        listing
    }

    #[test]
    fn test_refresh_sets_loading_until_resolved() {
        let mut listing = ListingController::default();
        let ticket = listing.refresh();
        assert!(listing.loading());
        listing.resolve(&ticket, Ok(page(2, &[1, 2])));
        assert!(!listing.loading());
        assert_eq!(listing.items().len(), 2);
        assert_eq!(listing.total_count(), 2);
    }

    #[test]
    fn test_filter_change_resets_page_and_issues_ticket() {
        let mut listing = loaded(100, 10);
        listing.navigate(PageNav::Goto(4)).unwrap();
        let ticket = listing
            .apply(FilterChange::Subject("3001".into()))
            .unwrap()
            .expect("ticket");
        assert_eq!(ticket.filter().page, 1);
        assert_eq!(listing.filter().page, 1);
    }

    #[test]
    fn test_identical_change_does_not_refetch() {
        let mut listing = loaded(100, 10);
        assert!(listing.apply(FilterChange::State(None)).unwrap().is_none());
        assert!(listing.apply(FilterChange::PageSize(10)).unwrap().is_none());
    }

    #[test]
    fn test_slow_first_response_is_discarded() {
        let mut listing = loaded(100, 10);
        let first = listing
            .apply(FilterChange::Subject("A".into()))
            .unwrap()
            .unwrap();
        let second = listing
            .apply(FilterChange::Subject("AB".into()))
            .unwrap()
            .unwrap();

        assert_eq!(listing.resolve(&second, Ok(page(1, &[22]))), Resolved::Applied);
        assert_eq!(listing.resolve(&first, Ok(page(9, &[11, 12]))), Resolved::Stale);

        assert_eq!(listing.items()[0].id, 22);
        assert_eq!(listing.total_count(), 1);
        assert!(!listing.loading());
    }

    #[test]
    fn test_stale_response_does_not_clear_loading() {
        let mut listing = loaded(100, 10);
        let first = listing.navigate(PageNav::Next).unwrap();
        let _second = listing.navigate(PageNav::Next).unwrap();
        assert_eq!(listing.resolve(&first, Ok(page(100, &[5]))), Resolved::Stale);
        assert!(listing.loading());
    }

    #[test]
    fn test_error_keeps_rows_and_sets_message() {
        let mut listing = loaded(100, 10);
        let ticket = listing.refresh();
        listing.resolve(&ticket, Err(Error::server(500, "oops")));
        assert_eq!(listing.items().len(), 1);
        assert!(listing.error().unwrap().contains("500"));

        let ticket = listing.refresh();
        listing.resolve(&ticket, Ok(page(100, &[1])));
        assert!(listing.error().is_none());
    }

    #[test]
    fn test_navigation_at_bounds() {
        let mut listing = loaded(47, 12);
        assert_eq!(listing.total_pages(), 4);
        let ticket = listing.navigate(PageNav::Last).unwrap();
        listing.resolve(&ticket, Ok(page(47, &[1])));
        assert_eq!(listing.filter().page, 4);
        assert!(listing.navigate(PageNav::Next).is_none());
        assert_eq!(listing.filter().page, 4);
    }

    #[test]
    fn test_last_with_no_rows_stays_on_first_page() {
        let mut listing = loaded(0, 10);
        assert_eq!(listing.total_pages(), 1);
        assert!(listing.navigate(PageNav::Last).is_none());
        assert_eq!(listing.filter().page, 1);
    }

    #[test]
    fn test_shrunk_count_clamps_page_and_refetches() {
        let mut listing = loaded(100, 10);
        let ticket = listing.navigate(PageNav::Last).unwrap();
        listing.resolve(&ticket, Ok(page(100, &[91])));
        assert_eq!(listing.filter().page, 10);

        let ticket = listing.refresh();
        let follow = match listing.resolve(&ticket, Ok(page(5, &[]))) {
            Resolved::Refetch(next) => next,
            other => panic!("expected refetch, got {:?}", other),
        };
        assert_eq!(follow.filter().page, 1);
        assert_eq!(listing.filter().page, 1);
        assert!(listing.filter().page <= listing.total_pages());
        assert!(listing.loading());

        assert_eq!(listing.resolve(&follow, Ok(page(5, &[1, 2, 3, 4, 5]))), Resolved::Applied);
        assert_eq!(listing.items().len(), 5);
        assert!(!listing.loading());
    }

    #[test]
    fn test_navigation_issued_on_stale_total_is_clamped() {
        let mut listing = loaded(100, 10);
        let ticket = listing.navigate(PageNav::Goto(7)).unwrap();
        match listing.resolve(&ticket, Ok(page(30, &[]))) {
            Resolved::Refetch(next) => assert_eq!(next.filter().page, 3),
            other => panic!("expected refetch, got {:?}", other),
        }
    }

    #[test]
    fn test_error_does_not_clamp() {
        let mut listing = loaded(100, 10);
        let ticket = listing.navigate(PageNav::Last).unwrap();
        assert_eq!(listing.resolve(&ticket, Err(Error::Transport("down".into()))), Resolved::Applied);
        assert_eq!(listing.filter().page, 10);
    }

    #[test]
    fn test_invalid_page_size_leaves_state() {
        let mut listing = loaded(30, 10);
        assert!(listing.apply(FilterChange::PageSize(0)).is_err());
        assert_eq!(listing.filter().page_size, 10);
        assert!(!listing.loading());
    }
}
