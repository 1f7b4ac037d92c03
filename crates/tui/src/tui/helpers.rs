use std::cmp::min;

use chrono::{DateTime, Utc};
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

pub const BG_BASE: Color = Color::Rgb(12, 12, 14);
pub const BG_PANEL: Color = Color::Rgb(21, 22, 26);
pub const BG_ACCENT: Color = Color::Rgb(34, 32, 28);
// Brand orange, used for chips and highlights.
pub const FG_ACCENT: Color = Color::Rgb(255, 139, 10);

pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let w = min(width, area.width);
    let h = min(height, area.height);
    Rect {
        x: area.x + (area.width.saturating_sub(w)) / 2,
        y: area.y + (area.height.saturating_sub(h)) / 2,
        width: w,
        height: h,
    }
}

pub fn inset_rect(area: Rect, padding: u16) -> Rect {
    if area.width == 0 || area.height == 0 {
        return area;
    }
    let px = padding.min(area.width / 2);
    let py = padding.min(area.height / 2);
    Rect {
        x: area.x + px,
        y: area.y + py,
        width: area.width.saturating_sub(px * 2),
        height: area.height.saturating_sub(py * 2),
    }
}

pub fn short_id(id: &str) -> String {
    if id.len() <= 8 {
        id.to_string()
    } else {
        id[..8].to_string()
    }
}

/// "$1,900 USD": whole units with thousands grouping.
pub fn format_price(amount: f64, currency: &str) -> String {
    format!("${} {}", group_thousands(amount.round() as i64), currency)
}

pub fn group_thousands(value: i64) -> String {
    let negative = value < 0;
    let digits = value.unsigned_abs().to_string();
    let mut grouped = String::new();
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if negative {
        format!("-{grouped}")
    } else {
        grouped
    }
}

pub fn format_date(value: &DateTime<Utc>) -> String {
    value.format("%Y-%m-%d").to_string()
}

pub fn accent_title(text: &str) -> Line<'static> {
    Line::from(vec![Span::styled(
        text.to_owned(),
        Style::default().fg(FG_ACCENT).add_modifier(Modifier::BOLD),
    )])
}

pub fn build_help_lines() -> Vec<(&'static str, &'static str)> {
    vec![
        ("Tab / Shift+Tab", "Switch between For You, Search and Liked"),
        ("1 / 2 / 3", "Jump straight to a screen"),
        ("j / k or ↓ / ↑", "Next / previous quest card"),
        ("Space or Enter", "Tap the card — once flips it, twice likes it"),
        ("l", "Like or unlike without flipping"),
        ("/", "Edit the search query"),
        ("f", "Open the filter picker"),
        ("x", "Clear query and filters"),
        ("r", "Reload quests from the store"),
        ("p", "Redo the travel-preferences survey"),
        ("g / G", "First / last card"),
        ("h", "Toggle this help overlay"),
        ("q", "Quit"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn group_thousands_inserts_separators() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(950), "950");
        assert_eq!(group_thousands(1900), "1,900");
        assert_eq!(group_thousands(2_450_000), "2,450,000");
        assert_eq!(group_thousands(-1200), "-1,200");
    }

    #[test]
    fn format_price_rounds_to_whole_units() {
        assert_eq!(format_price(1899.6, "USD"), "$1,900 USD");
        assert_eq!(format_price(80.0, "EUR"), "$80 EUR");
    }
}
