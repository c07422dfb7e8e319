//! 手動実行（ディスパッチ）
//!
//! サービス種別ごとの実行エンドポイントは固定表で引く。同じレコードの
//! 実行は同時に1つまで。

use crate::error::{Error, Result};
use crate::source::DispatchTransport;
use crate::types::{EntityId, ServiceKind, WorkItem};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::{Mutex, MutexGuard};
use tracing::{debug, warn};

/// サービス種別 → 実行エンドポイント（マイクロサービスのベースURLからの相対パス）
pub fn service_path(kind: ServiceKind) -> Option<&'static str> {
    match kind {
        ServiceKind::LineItems => Some("services/pedimento/partidas"),
        ServiceKind::Shipments => Some("services/pedimento/remesas"),
        ServiceKind::Receipt => Some("services/pedimento/acuse"),
        ServiceKind::ReceiptCove => Some("services/cove/acuse"),
        ServiceKind::StatusQuery
        | ServiceKind::Listing
        | ServiceKind::FullDocument
        | ServiceKind::EDocument => None,
    }
}

/// 実行リクエスト本文
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DispatchPayload {
    pub pedimento: i64,
    pub organizacion: EntityId,
}

impl DispatchPayload {
    pub fn for_item(item: &WorkItem) -> Self {
        Self {
            pedimento: item.subject.id(),
            organizacion: item.organization.clone(),
        }
    }
}

/// 実行成功時の呼び出し側への指示
///
/// 一覧の再取得はゲートウェイでは行わない。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DispatchOutcome {
    pub item_id: i64,
    pub service: ServiceKind,
    pub close_menu: bool,
    pub refresh_recommended: bool,
}

/// 実行中レコードIDの集合
#[derive(Debug, Default)]
pub struct InFlightRegistry {
    ids: Mutex<HashSet<i64>>,
}

impl InFlightRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_in_flight(&self, id: i64) -> bool {
        self.ids().contains(&id)
    }

    /// 実行中でなければ印を付けてガードを返す
    pub fn try_acquire(&self, id: i64) -> Option<InFlightGuard<'_>> {
        if self.ids().insert(id) {
            Some(InFlightGuard { registry: self, id })
        } else {
            None
        }
    }

    fn release(&self, id: i64) {
        self.ids().remove(&id);
    }

    fn ids(&self) -> MutexGuard<'_, HashSet<i64>> {
        self.ids.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

/// 破棄時に実行中の印を外す
#[derive(Debug)]
pub struct InFlightGuard<'a> {
    registry: &'a InFlightRegistry,
    id: i64,
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.registry.release(self.id);
    }
}

/// 実行ゲートウェイ
pub struct DispatchGateway<T> {
    transport: T,
    in_flight: InFlightRegistry,
}

impl<T: DispatchTransport> DispatchGateway<T> {
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            in_flight: InFlightRegistry::new(),
        }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// 行の「実行中」表示用
    pub fn is_in_flight(&self, id: i64) -> bool {
        self.in_flight.is_in_flight(id)
    }

    /// レコードのサービスを実行する
    ///
    /// 対応エンドポイントがない場合と実行中の場合は通信せずに失敗する。
    /// 実行中の印は成功・失敗・途中破棄のいずれでも外れる。自動リトライはしない。
    pub async fn dispatch(&self, item: &WorkItem) -> Result<DispatchOutcome> {
        let path = service_path(item.service)
            .ok_or_else(|| Error::UnsupportedService(item.service.label().to_string()))?;

        let _guard = self
            .in_flight
            .try_acquire(item.id)
            .ok_or(Error::AlreadyInFlight(item.id))?;

        let payload = DispatchPayload::for_item(item);
        debug!(id = item.id, path, pedimento = payload.pedimento, "dispatch started");

        match self.transport.post(path, &payload).await {
            Ok(()) => {
                debug!(id = item.id, "dispatch succeeded");
                Ok(DispatchOutcome {
                    item_id: item.id,
                    service: item.service,
                    close_menu: true,
                    refresh_recommended: true,
                })
            }
            Err(e) => {
                warn!(id = item.id, error = %e, "dispatch failed");
                Err(e)
            }
        }
    }
}
