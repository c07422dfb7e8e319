//! ページ計算

/// ページ移動の要求
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageNav {
    First,
    Previous,
    Next,
    Last,
    Goto(u32),
}

/// 総ページ数（最低1）
pub fn total_pages(count: u64, page_size: u32) -> u32 {
    if page_size == 0 || count == 0 {
        return 1;
    }
    let pages = count.div_ceil(u64::from(page_size));
    u32::try_from(pages).unwrap_or(u32::MAX).max(1)
}

/// 移動先のページ（範囲外は端に丸める）
pub fn resolve(nav: PageNav, current: u32, total: u32) -> u32 {
    let total = total.max(1);
    let target = match nav {
        PageNav::First => 1,
        PageNav::Last => total,
        PageNav::Next => current.saturating_add(1),
        PageNav::Previous => current.saturating_sub(1),
        PageNav::Goto(page) => page,
    };
    target.clamp(1, total)
}
