// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Unari-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Unari and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

// Layout, title, footer, and block helpers used by dashboard rendering.

const SIDEBAR_MIN_WIDTH: u16 = 14;
const FOOTER_SEPARATOR: &str = " | ";
const FOOTER_BRAND: &str = "unari";
const FOOTER_ENTRIES: &[(&str, &str)] = &[
    ("CAMPUS", "↑↓"),
    ("DAY", "←→"),
    ("TODAY", "t"),
    ("SCROLL", "PgUp/PgDn"),
    ("REFRESH", "r"),
    ("QUIT", "q"),
];

/// Wide enough for the longest campus name plus marker and borders, at most a third of the
/// screen.
fn sidebar_width(campuses: &CampusTable, total_width: u16) -> u16 {
    let longest = campuses.names().map(text_len).max().unwrap_or(0);
    let wanted = u16::try_from(longest.saturating_add(4)).unwrap_or(u16::MAX);
    wanted.max(SIDEBAR_MIN_WIDTH).min(total_width / 3)
}

fn view_title(label: &str, tail: Option<&str>) -> String {
    let mut title = format!("─ {label}");
    if let Some(tail) = tail {
        let tail = tail.trim();
        if !tail.is_empty() {
            title.push_str(" · ");
            title.push_str(tail);
        }
    }
    title.push_str(" ─");
    title
}

fn panel_block(title: String, focused: bool, theme: &Theme) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .title(title)
        .border_style(theme.border_style(focused))
        .title_style(theme.title_style())
}

/// A one-row rect centered vertically in `area`, sized to `text_width` and centered
/// horizontally.
fn centered_line_rect(area: Rect, text_width: usize) -> Rect {
    let width = u16::try_from(text_width).unwrap_or(u16::MAX).min(area.width);
    let x = area.x + (area.width - width) / 2;
    let y = area.y + area.height / 2;
    Rect::new(x, y, width, area.height.min(1))
}

fn footer_line(theme: &Theme) -> Line<'static> {
    let mut spans = Vec::<Span<'static>>::new();
    for (label, value) in FOOTER_ENTRIES {
        push_footer_entry(&mut spans, theme, label, value);
    }
    spans.push(Span::styled(FOOTER_SEPARATOR, theme.footer_label_style()));
    spans.push(Span::styled(FOOTER_BRAND, theme.dim_style()));
    Line::from(spans)
}

fn push_footer_entry(spans: &mut Vec<Span<'static>>, theme: &Theme, label: &str, value: &str) {
    if !spans.is_empty() {
        spans.push(Span::styled(FOOTER_SEPARATOR, theme.footer_label_style()));
    }
    spans.push(Span::styled(
        format!("{}:", footer_label_ucfirst(label)),
        theme.footer_label_style(),
    ));
    spans.push(Span::styled(value.to_owned(), theme.footer_key_style()));
}

fn footer_label_ucfirst(label: &str) -> String {
    let lower = label.to_lowercase();
    let mut chars = lower.chars();
    let Some(first) = chars.next() else {
        return String::new();
    };
    let mut out = first.to_uppercase().collect::<String>();
    out.push_str(chars.as_str());
    out
}
