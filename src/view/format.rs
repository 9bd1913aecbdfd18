//! Text formatting for session fields

use crate::config::ThemeMode;
use crate::session::Share;
use crossterm::style::Color;
use std::collections::BTreeMap;

const TAG_COLORS: [(u8, u8, u8); 12] = [
    (0xe5, 0x39, 0x35),
    (0x8e, 0x24, 0xaa),
    (0x39, 0x49, 0xab),
    (0x00, 0x89, 0x7b),
    (0x7c, 0xb3, 0x42),
    (0xfb, 0x8c, 0x00),
    (0xd8, 0x1b, 0x60),
    (0x1e, 0x88, 0xe5),
    (0x43, 0xa0, 0x47),
    (0x6d, 0x4c, 0x41),
    (0x75, 0x75, 0x75),
    (0x54, 0x6e, 0x7a),
];

/// Format a percentage with at most one decimal, e.g. `75%` or `33.3%`
pub fn format_percentage(value: f64) -> String {
    if !value.is_finite() {
        return "N/A".to_string();
    }
    let rounded = (value * 10.0).round() / 10.0;
    if rounded.fract() == 0.0 {
        format!("{:.0}%", rounded)
    } else {
        format!("{:.1}%", rounded)
    }
}

/// Describe a share map, largest share first: `NLHE (75%), PLO (25%)`
pub fn describe_shares(shares: &BTreeMap<String, Share>, suffix: &str) -> String {
    if shares.is_empty() {
        return "N/A".to_string();
    }

    let mut entries: Vec<(&String, &Share)> = shares.iter().collect();
    entries.sort_by(|a, b| b.1.percentage.total_cmp(&a.1.percentage));
    entries
        .iter()
        .map(|(label, share)| {
            format!("{}{} ({})", label, suffix, format_percentage(share.percentage))
        })
        .collect::<Vec<_>>()
        .join(", ")
}

/// Stable colour for a tag, derived from its UTF-16 code unit sum
pub fn tag_color(tag: &str) -> Color {
    let hash: usize = tag.encode_utf16().map(usize::from).sum();
    let (r, g, b) = TAG_COLORS[hash % TAG_COLORS.len()];
    Color::Rgb { r, g, b }
}

/// Accent colour for headings
pub fn accent_color(theme: ThemeMode) -> Color {
    match theme {
        ThemeMode::Dark => Color::Rgb {
            r: 0x21,
            g: 0x96,
            b: 0xf3,
        },
        ThemeMode::Light => Color::Rgb {
            r: 0x19,
            g: 0x76,
            b: 0xd2,
        },
    }
}

/// Colour for secondary text such as upload dates and hidden sessions
pub fn muted_color(theme: ThemeMode) -> Color {
    match theme {
        ThemeMode::Dark => Color::Grey,
        ThemeMode::Light => Color::DarkGrey,
    }
}
