//! Display formatting for dates and enumerated values.
//!
//! All mappings are total: unrecognized raw values fall back to themselves
//! (or a neutral default for CSS classes) instead of failing.

use crate::utils::dates::parse_datetime;

/// Format a timestamp as `DD.MM.YYYY, HH:MM`. Unparseable input is returned
/// unchanged.
pub fn format_date(raw: &str) -> String {
    match parse_datetime(raw) {
        Some(dt) => dt.format("%d.%m.%Y, %H:%M").to_string(),
        None => raw.to_string(),
    }
}

/// Format a timestamp as `DD.MM.YYYY`. Unparseable input is returned
/// unchanged.
pub fn format_date_short(raw: &str) -> String {
    match parse_datetime(raw) {
        Some(dt) => dt.format("%d.%m.%Y").to_string(),
        None => raw.to_string(),
    }
}

/// Localized label for a rental status.
pub fn status_text(status: &str) -> &str {
    match status {
        "pending" => "Ожидает",
        "active" => "Активна",
        "completed" => "Завершена",
        "overdue" => "Просрочена",
        other => other,
    }
}

/// CSS class for a rental status badge.
pub fn status_color(status: &str) -> &'static str {
    match status {
        "active" => "status-active",
        "completed" => "status-completed",
        "overdue" => "status-overdue",
        _ => "status-pending",
    }
}

/// Localized label for an acquisition source.
pub fn source_text(source: &str) -> &str {
    match source {
        "avito" => "Авито",
        "website" => "Сайт",
        "referral" => "Рекомендация",
        "maps" => "Карты",
        other => other,
    }
}
