//! 一覧探索・実行手順のテスト
//!
//! 一覧APIと実行サービスをメモリ上の偽物に置き換えて検証

use async_trait::async_trait;
use pedimento_console::console::{dispatch_item, find_item, load_page};
use pedimento_console::error::ConsoleError;
use pedimento_console_common::{
    DispatchGateway, DispatchPayload, DispatchTransport, EntityId, Error, FilterState, Page,
    ProcessState, Result, ServiceKind, SubjectReference, WorkItem, WorkItemSource,
};
use std::cell::{Cell, RefCell};

fn item(id: i64, service: ServiceKind) -> WorkItem {
    WorkItem {
        id,
        organization: EntityId::Number(4),
        organization_name: None,
        state: ProcessState::Waiting,
        service,
        subject: SubjectReference::Id(id + 1000),
        created_at: None,
        updated_at: None,
    }
}

/// 全件をメモリに持ち、要求されたページを切り出す
struct MemorySource {
    items: Vec<WorkItem>,
    requested_pages: RefCell<Vec<u32>>,
    fail: bool,
}

impl MemorySource {
    fn new(items: Vec<WorkItem>) -> Self {
        Self {
            items,
            requested_pages: RefCell::new(Vec::new()),
            fail: false,
        }
    }
}

#[async_trait(?Send)]
impl WorkItemSource for MemorySource {
    async fn list(&self, filter: &FilterState) -> Result<Page<WorkItem>> {
        self.requested_pages.borrow_mut().push(filter.page);
        if self.fail {
            return Err(Error::Transport("connection refused".into()));
        }
        let matching: Vec<WorkItem> = self
            .items
            .iter()
            .filter(|i| filter.service.map_or(true, |s| i.service == s))
            .cloned()
            .collect();
        let size = filter.page_size as usize;
        let start = (filter.page as usize - 1) * size;
        Ok(Page {
            count: matching.len() as u64,
            results: matching.into_iter().skip(start).take(size).collect(),
            ..Page::default()
        })
    }
}

#[derive(Default)]
struct CountingTransport {
    calls: Cell<usize>,
}

#[async_trait(?Send)]
impl DispatchTransport for CountingTransport {
    async fn post(&self, _path: &str, _payload: &DispatchPayload) -> Result<()> {
        self.calls.set(self.calls.get() + 1);
        Ok(())
    }
}

fn filter(page_size: u32) -> FilterState {
    FilterState::with_page_size(page_size).unwrap()
}

#[tokio::test]
async fn test_load_page_reports_total_pages() {
    let source = MemorySource::new((1..=47).map(|i| item(i, ServiceKind::Receipt)).collect());
    let listing = load_page(&source, filter(12)).await.unwrap();
    assert_eq!(listing.total_pages(), 4);
    assert_eq!(listing.items().len(), 12);
    assert!(!listing.loading());
}

#[tokio::test]
async fn test_load_page_error_is_listing_error() {
    let mut source = MemorySource::new(Vec::new());
    source.fail = true;
    let err = load_page(&source, filter(10)).await.unwrap_err();
    assert!(matches!(err, ConsoleError::Listing(ref msg) if msg.contains("connection refused")));
}

#[tokio::test]
async fn test_find_item_walks_pages() {
    let source = MemorySource::new((1..=25).map(|i| item(i, ServiceKind::Receipt)).collect());
    let found = find_item(&source, &filter(10), 23).await.unwrap();
    assert_eq!(found.id, 23);
    assert_eq!(*source.requested_pages.borrow(), vec![1, 2, 3]);
}

#[tokio::test]
async fn test_find_item_stops_at_last_page() {
    let source = MemorySource::new((1..=25).map(|i| item(i, ServiceKind::Receipt)).collect());
    let err = find_item(&source, &filter(10), 99).await.unwrap_err();
    assert!(matches!(err, ConsoleError::NotFound(99)));
    assert_eq!(source.requested_pages.borrow().len(), 3);
}

#[tokio::test]
async fn test_find_item_starts_from_first_page() {
    let source = MemorySource::new((1..=5).map(|i| item(i, ServiceKind::Receipt)).collect());
    let start = FilterState {
        page: 3,
        ..filter(2)
    };
    find_item(&source, &start, 1).await.unwrap();
    assert_eq!(*source.requested_pages.borrow(), vec![1]);
}

#[tokio::test]
async fn test_dispatch_success_refreshes_listing() {
    let source = MemorySource::new(vec![item(1, ServiceKind::LineItems)]);
    let gateway = DispatchGateway::new(CountingTransport::default());

    let target = item(1, ServiceKind::LineItems);
    let (outcome, refreshed) = dispatch_item(&source, &gateway, &target, filter(10))
        .await
        .unwrap();

    assert_eq!(outcome.item_id, 1);
    assert!(refreshed.is_some());
    assert_eq!(gateway.transport().calls.get(), 1);
    assert_eq!(source.requested_pages.borrow().len(), 1);
}

#[tokio::test]
async fn test_unsupported_dispatch_makes_no_calls() {
    let source = MemorySource::new(vec![item(1, ServiceKind::FullDocument)]);
    let gateway = DispatchGateway::new(CountingTransport::default());

    let target = item(1, ServiceKind::FullDocument);
    let err = dispatch_item(&source, &gateway, &target, filter(10))
        .await
        .unwrap_err();

    assert!(matches!(err, ConsoleError::Common(Error::UnsupportedService(_))));
    assert_eq!(gateway.transport().calls.get(), 0);
    assert!(source.requested_pages.borrow().is_empty());
}

#[tokio::test]
async fn test_dispatch_kept_when_refresh_fails() {
    let mut source = MemorySource::new(Vec::new());
    source.fail = true;
    let gateway = DispatchGateway::new(CountingTransport::default());

    let target = item(7, ServiceKind::Shipments);
    let (outcome, refreshed) = dispatch_item(&source, &gateway, &target, filter(10))
        .await
        .unwrap();

    assert_eq!(outcome.item_id, 7);
    assert!(outcome.refresh_recommended);
    assert!(refreshed.is_none());
    assert_eq!(gateway.transport().calls.get(), 1);
    assert_eq!(source.requested_pages.borrow().len(), 1);
}

#[tokio::test]
async fn test_load_page_past_end_falls_back_to_last_page() {
    let source = MemorySource::new((1..=5).map(|i| item(i, ServiceKind::Receipt)).collect());
    let start = FilterState {
        page: 9,
        ..filter(2)
    };
    let listing = load_page(&source, start).await.unwrap();

    assert_eq!(*source.requested_pages.borrow(), vec![9, 3]);
    assert_eq!(listing.filter().page, 3);
    assert_eq!(listing.total_pages(), 3);
    assert_eq!(listing.items().len(), 1);
    assert!(!listing.loading());
}
