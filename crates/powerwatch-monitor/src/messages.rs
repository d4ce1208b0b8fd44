//! Telegram HTML message templates.

use chrono::DateTime;
use chrono_tz::Tz;
use powerwatch_core::{OutageCategory, RawStatus};

const UNKNOWN: &str = "Невідомо";

fn title(category: OutageCategory) -> &'static str {
    match category {
        OutageCategory::Emergency => "🔴🚨 <b>Аварійне відключення</b>",
        OutageCategory::Urgent => "🔥🚨 <b>Екстрене відключення</b>",
        OutageCategory::Stabilization => "🟡🗓️ <b>Стабілізаційне відключення</b>",
        OutageCategory::Scheduled => "🔵🗓️ <b>Планове відключення</b>",
        OutageCategory::Unspecified => "⚡️ <b>Зафіксовано відключення</b>",
    }
}

/// Message for an active outage.
#[must_use]
pub fn outage_message(
    category: OutageCategory,
    raw: &RawStatus,
    rendered_at: DateTime<Tz>,
) -> String {
    [
        title(category).to_string(),
        String::new(),
        format!(
            "🪫 <b>Час початку:</b> <code>{}</code>",
            escape_html(raw.start_date().unwrap_or(UNKNOWN))
        ),
        format!(
            "🔌 <b>Орієнтовний час відновлення:</b> <code>{}</code>",
            escape_html(raw.end_date().unwrap_or(UNKNOWN))
        ),
        String::new(),
        footer(raw, rendered_at),
    ]
    .join("\n")
}

/// Message for a confirmed recovery.
#[must_use]
pub fn recovery_message(raw: &RawStatus, rendered_at: DateTime<Tz>) -> String {
    [
        "🟢💡 <b>Світлопостачання відновлено</b>".to_string(),
        String::new(),
        "⚡️ <i>Електроенергія подається у штатному режимі</i>".to_string(),
        String::new(),
        footer(raw, rendered_at),
    ]
    .join("\n")
}

fn footer(raw: &RawStatus, rendered_at: DateTime<Tz>) -> String {
    format!(
        "🔄 <i>Дата оновлення інформації {}</i>\n💬 <i>Дата оновлення повідомлення {}</i>",
        escape_html(raw.update_timestamp.as_deref().unwrap_or(UNKNOWN)),
        rendered_at.format("%H:%M %d.%m.%Y"),
    )
}

/// Escape the three characters Telegram's HTML parse mode requires.
fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
    out
}
