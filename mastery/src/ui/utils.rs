use chrono::{DateTime, Utc};
use convert_case::{Case, Casing};
use mastery_api::endpoints::Mastery;
use ratatui::{style::Style, text::Span};

use super::theme;

/// Mastery as a percentage, colored by band
pub fn fmt_mastery(mastery: Mastery) -> Span<'static> {
    Span::styled(
        format!("{:>4}", mastery.to_string()),
        Style::default().fg(theme::mastery_color(mastery)),
    )
}

/// Text progress bar for a mastery fraction, `width` cells wide
pub fn mastery_bar(mastery: Mastery, width: usize) -> String {
    let filled = (mastery.fraction() * width as f64).round() as usize;
    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled.min(width)))
}

/// Format minutes as "45m" or "1h 20m"
pub fn fmt_minutes(minutes: f64) -> String {
    let total = minutes.round().max(0.0) as i64;
    if total < 60 {
        format!("{}m", total)
    } else {
        format!("{}h {}m", total / 60, total % 60)
    }
}

/// Describe how long ago `at` was, relative to `now`
pub fn fmt_relative(at: Option<DateTime<Utc>>, now: DateTime<Utc>) -> String {
    let Some(at) = at else {
        return "Never".to_string();
    };

    let elapsed = now.signed_duration_since(at);
    if elapsed.num_minutes() < 1 {
        "Just now".to_string()
    } else if elapsed.num_hours() < 1 {
        format!("{}m ago", elapsed.num_minutes())
    } else if elapsed.num_days() < 1 {
        format!("{}h ago", elapsed.num_hours())
    } else if elapsed.num_days() == 1 {
        "Yesterday".to_string()
    } else if elapsed.num_days() < 30 {
        format!("{} days ago", elapsed.num_days())
    } else {
        at.format("%Y-%m-%d").to_string()
    }
}

/// Format an optional timestamp as a calendar date
pub fn fmt_date(at: Option<DateTime<Utc>>) -> String {
    at.map(|at| at.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| "-".to_string())
}

/// Human label for a machine-style identifier, e.g. "weak_area" -> "Weak Area"
pub fn fmt_label(kind: &str) -> String {
    if kind.is_empty() {
        return "Note".to_string();
    }
    kind.to_case(Case::Title)
}

/// Truncate to `max_len` characters, marking the cut with "..."
pub fn truncate(text: &str, max_len: usize) -> String {
    if text.chars().count() <= max_len {
        text.to_string()
    } else {
        let kept: String = text.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
