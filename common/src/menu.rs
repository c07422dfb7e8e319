//! 行アクションメニューの開閉状態
//!
//! 同時に開くメニューは1つまで。

/// メニューの状態
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MenuState {
    #[default]
    Closed,
    Open(i64),
}

/// メニューへの入力
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuEvent {
    /// 行のメニューボタンが押された
    OpenRequested(i64),
    /// 開いているメニューの外側が操作された
    OutsideInteraction,
    /// 行の実行が成功した
    DispatchSucceeded(i64),
}

impl MenuState {
    /// 次の状態
    pub fn next(self, event: MenuEvent) -> MenuState {
        match (self, event) {
            (MenuState::Open(open), MenuEvent::OpenRequested(id)) if open == id => {
                MenuState::Closed
            }
            (_, MenuEvent::OpenRequested(id)) => MenuState::Open(id),
            (MenuState::Open(_), MenuEvent::OutsideInteraction) => MenuState::Closed,
            (MenuState::Open(open), MenuEvent::DispatchSucceeded(id)) if open == id => {
                MenuState::Closed
            }
            (state, _) => state,
        }
    }

    /// 状態を進める
    pub fn handle(&mut self, event: MenuEvent) {
        *self = self.next(event);
    }

    pub fn is_open(&self, id: i64) -> bool {
        *self == MenuState::Open(id)
    }

    pub fn open_id(&self) -> Option<i64> {
        match self {
            MenuState::Open(id) => Some(*id),
            MenuState::Closed => None,
        }
    }
}
