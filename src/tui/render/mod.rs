pub mod confirm_popup;
pub mod detail_popup;
pub mod form_popup;
pub mod help_overlay;
pub mod inventory_view;
pub mod status_row;
pub mod tab_bar;
pub mod ticket_form_popup;
pub mod tickets_view;

#[cfg(test)]
pub mod test_helpers;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::Span;
use ratatui::widgets::Block;
use regex::Regex;

use super::app::{App, View};

/// Draw one frame: tab bar, active view, popups, status row
pub fn render(frame: &mut Frame, app: &mut App) {
    let area = frame.area();

    // Background fill
    let bg_style = Style::default().bg(app.theme.background);
    frame.render_widget(Block::default().style(bg_style), area);

    // Layout: tab bar (2 rows) | content | status row (1 row)
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // tab bar + separator
            Constraint::Min(1),    // content area
            Constraint::Length(1), // status row
        ])
        .split(area);

    tab_bar::render_tab_bar(frame, app, chunks[0]);

    match app.view {
        View::Inventory => {
            inventory_view::render_inventory_view(frame, app, chunks[1]);
            if app.inventory.dialog().is_some() {
                form_popup::render_form_popup(frame, app, area);
            }
        }
        View::Tickets => {
            tickets_view::render_tickets_view(frame, app, chunks[1]);
            if app.tickets.selected_id().is_some() {
                detail_popup::render_detail_popup(frame, app, area);
            }
            if app.tickets.form().is_some() {
                ticket_form_popup::render_ticket_form_popup(frame, app, area);
            }
        }
    }

    // Delete confirmation sits above any dialog
    confirm_popup::render_confirm_popup(frame, app, area);

    if app.show_help {
        help_overlay::render_help_overlay(frame, app, area);
    }

    status_row::render_status_row(frame, app, chunks[2]);
}

/// Push spans for text with regex match highlighting. If no regex or no matches,
/// pushes a single span with `base_style`. Otherwise splits text at match boundaries.
pub(super) fn push_highlighted_spans<'a>(
    spans: &mut Vec<Span<'a>>,
    text: &str,
    base_style: Style,
    highlight_style: Style,
    search_re: Option<&Regex>,
) {
    let re = match search_re {
        Some(r) => r,
        None => {
            spans.push(Span::styled(text.to_string(), base_style));
            return;
        }
    };

    let mut last_end = 0;
    let mut has_match = false;
    for m in re.find_iter(text) {
        has_match = true;
        if m.start() > last_end {
            spans.push(Span::styled(
                text[last_end..m.start()].to_string(),
                base_style,
            ));
        }
        spans.push(Span::styled(
            text[m.start()..m.end()].to_string(),
            highlight_style,
        ));
        last_end = m.end();
    }
    if !has_match {
        spans.push(Span::styled(text.to_string(), base_style));
    } else if last_end < text.len() {
        spans.push(Span::styled(text[last_end..].to_string(), base_style));
    }
}

/// Word-wrap `text` into lines of at most `max_width` display cells.
/// Every line (including the first) is prefixed with `indent`.
pub(super) fn wrap_text(indent: &str, text: &str, max_width: usize) -> Vec<String> {
    use crate::util::unicode::display_width;

    let indent_len = display_width(indent);
    let mut lines = Vec::new();
    let mut current = indent.to_string();
    let mut current_len = indent_len;

    for word in text.split_whitespace() {
        let word_len = display_width(word);
        let space = if current_len == indent_len { 0 } else { 1 };
        if current_len + space + word_len > max_width && current_len > indent_len {
            lines.push(current);
            current = indent.to_string();
            current_len = indent_len;
        }
        if current_len > indent_len {
            current.push(' ');
            current_len += 1;
        }
        current.push_str(word);
        current_len += word_len;
    }
    if current_len > indent_len || lines.is_empty() {
        lines.push(current);
    }
    lines
}

pub(super) fn centered_rect_fixed(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;
    Rect::new(x, y, width, height)
}
