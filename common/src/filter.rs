//! 絞り込み条件とページ位置
//!
//! ページ以外の条件を変更するとページは1に戻る。

use crate::error::{Error, Result};
use crate::types::{ProcessState, ServiceKind};
use serde::{Deserialize, Serialize};

pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// 一覧の絞り込み条件とページ位置
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterState {
    /// pedimento コードの部分一致
    pub subject: String,
    pub state: Option<ProcessState>,
    pub service: Option<ServiceKind>,
    /// 1始まり
    pub page: u32,
    pub page_size: u32,
}

impl Default for FilterState {
    fn default() -> Self {
        Self {
            subject: String::new(),
            state: None,
            service: None,
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

/// 条件の変更操作
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterChange {
    Subject(String),
    State(Option<ProcessState>),
    Service(Option<ServiceKind>),
    PageSize(u32),
}

impl FilterState {
    pub fn with_page_size(page_size: u32) -> Result<Self> {
        if page_size == 0 {
            return Err(Error::InvalidPageSize);
        }
        Ok(Self {
            page_size,
            ..Self::default()
        })
    }

    /// 変更を適用した新しい状態を返す
    ///
    /// 条件が変わった場合は同じ更新の中でページを1に戻す。
    pub fn applied(&self, change: FilterChange) -> Result<Self> {
        let mut next = self.clone();
        match change {
            FilterChange::Subject(subject) => next.subject = subject,
            FilterChange::State(state) => next.state = state,
            FilterChange::Service(service) => next.service = service,
            FilterChange::PageSize(0) => return Err(Error::InvalidPageSize),
            FilterChange::PageSize(size) => next.page_size = size,
        }
        if next != *self {
            next.page = 1;
        }
        Ok(next)
    }

    /// 一覧APIのクエリパラメータ
    ///
    /// 空の条件は送らない。
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![
            ("page", self.page.to_string()),
            ("page_size", self.page_size.to_string()),
        ];

        let subject = self.subject.trim();
        if !subject.is_empty() {
            pairs.push(("pedimento", subject.to_string()));
        }
        if let Some(state) = self.state {
            pairs.push(("estado", state.code().to_string()));
        }
        if let Some(service) = self.service {
            pairs.push(("servicio", service.code().to_string()));
        }

        pairs
    }

    /// URLエンコード済みのクエリ文字列（WASM側のfetch用）
    pub fn query_string(&self) -> String {
        self.query_pairs()
            .into_iter()
            .map(|(k, v)| format!("{}={}", k, encode_component(&v)))
            .collect::<Vec<_>>()
            .join("&")
    }
}

fn encode_component(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for byte in value.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(byte as char)
            }
            _ => out.push_str(&format!("%{:02X}", byte)),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn on_page(page: u32) -> FilterState {
        FilterState {
            page,
            ..FilterState::default()
        }
    }

    #[test]
    fn test_filter_changes_reset_page() {
        let changes = vec![
            FilterChange::Subject("3001".into()),
            FilterChange::State(Some(ProcessState::Error)),
            FilterChange::Service(Some(ServiceKind::Receipt)),
            FilterChange::PageSize(25),
        ];
        for change in changes {
            let next = on_page(5).applied(change.clone()).unwrap();
            assert_eq!(next.page, 1, "{:?}", change);
        }
    }

    #[test]
    fn test_identical_change_keeps_page() {
        let state = on_page(3);
        let next = state.applied(FilterChange::State(None)).unwrap();
        assert_eq!(next, state);
    }

    #[test]
    fn test_zero_page_size_rejected() {
        assert!(matches!(
            on_page(2).applied(FilterChange::PageSize(0)),
            Err(Error::InvalidPageSize)
        ));
        assert!(FilterState::with_page_size(0).is_err());
    }

    #[test]
    fn test_query_omits_empty_fields() {
        let state = FilterState {
            subject: "   ".into(),
            ..FilterState::default()
        };
        let keys: Vec<&str> = state.query_pairs().iter().map(|(k, _)| *k).collect();
        assert_eq!(keys, vec!["page", "page_size"]);
    }

    #[test]
    fn test_query_includes_codes() {
        let state = FilterState {
            subject: " 24 47 ".into(),
            state: Some(ProcessState::Processing),
            service: Some(ServiceKind::Shipments),
            page: 2,
            page_size: 12,
        };
        assert_eq!(
            state.query_string(),
            "page=2&page_size=12&pedimento=24%2047&estado=2&servicio=5"
        );
    }
}
