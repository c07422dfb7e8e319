//! 端末向けの一覧表示

use chrono::DateTime;
use pedimento_console_common::{DispatchOutcome, ListingController, WorkItem};

const HEADERS: [&str; 7] = ["ID", "Organización", "Pedimento", "Servicio", "Estado", "Actualizado", ""];

/// 一覧を表形式の文字列にする
pub fn render_table(listing: &ListingController) -> String {
    let rows: Vec<[String; 7]> = listing.items().iter().map(row_cells).collect();

    let mut widths = HEADERS.map(|h| h.chars().count());
    for row in &rows {
        for (i, cell) in row.iter().enumerate() {
            widths[i] = widths[i].max(cell.chars().count());
        }
    }

    let mut out = String::new();
    out.push_str(&format_line(&HEADERS.map(String::from), &widths));
    out.push_str(&format_line(&widths.map(|w| "-".repeat(w)), &widths));

    if rows.is_empty() {
        out.push_str("(sin registros)\n");
    }
    for row in &rows {
        out.push_str(&format_line(row, &widths));
    }

    out.push_str(&footer(listing));
    out.push('\n');
    out
}

/// ページ情報のフッター
pub fn footer(listing: &ListingController) -> String {
    format!(
        "Página {}/{} ({} registros)",
        listing.filter().page,
        listing.total_pages(),
        listing.total_count()
    )
}

/// 実行結果のメッセージ
pub fn outcome_message(item: &WorkItem, outcome: &DispatchOutcome) -> String {
    format!(
        "✔ {} を実行しました (処理 {}, pedimento {})",
        outcome.service.label(),
        outcome.item_id,
        item.subject.display_code()
    )
}

fn row_cells(item: &WorkItem) -> [String; 7] {
    [
        item.id.to_string(),
        item.organization_display(),
        item.subject.display_code(),
        item.service.label().to_string(),
        item.state.label().to_string(),
        item.updated_at
            .as_deref()
            .or(item.created_at.as_deref())
            .map(format_timestamp)
            .unwrap_or_default(),
        if item.is_dispatchable() { "▶".into() } else { String::new() },
    ]
}

fn format_line(cells: &[String; 7], widths: &[usize; 7]) -> String {
    let line = cells
        .iter()
        .zip(widths.iter())
        .map(|(cell, &w)| {
            let pad = w.saturating_sub(cell.chars().count());
            format!("{}{}", cell, " ".repeat(pad))
        })
        .collect::<Vec<_>>()
        .join("  ");
    format!("{}\n", line.trim_end())
}

/// ISO-8601 を `YYYY-MM-DD HH:MM` に（解釈できなければそのまま）
pub fn format_timestamp(raw: &str) -> String {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|_| raw.to_string())
}
