use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::app::{App, View};
use crate::views::tickets::StatusFilter;

/// Render the tab bar: desk name + view tabs, with separator line below
pub fn render_tab_bar(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // tabs
            Constraint::Length(1), // separator
        ])
        .split(area);

    let sep_cols = render_tabs(frame, app, chunks[0]);
    render_separator(frame, app, chunks[1], &sep_cols);
}

/// Render tabs and return the column positions of each separator character.
fn render_tabs(frame: &mut Frame, app: &App, area: Rect) -> Vec<usize> {
    let bg = app.theme.background;
    let mut spans: Vec<Span> = Vec::new();
    let mut sep_cols: Vec<usize> = Vec::new();
    let sep = Span::styled("\u{2502}", Style::default().fg(app.theme.dim).bg(bg));

    // Leading icon + desk name
    spans.push(Span::styled(" ", Style::default().bg(bg)));
    spans.push(Span::styled(
        "\u{25C6}",
        Style::default().fg(app.theme.purple).bg(bg),
    ));
    spans.push(Span::styled(
        format!(" {} ", app.desk.config.desk.name),
        Style::default()
            .fg(app.theme.text_bright)
            .bg(bg)
            .add_modifier(Modifier::BOLD),
    ));
    sep_cols.push(spans.iter().map(|s| s.content.chars().count()).sum());
    spans.push(sep.clone());

    for (view, title) in [(View::Inventory, "Inventario"), (View::Tickets, "Tickets")] {
        spans.push(Span::styled(
            format!(" {} ", title),
            tab_style(app, app.view == view),
        ));
        sep_cols.push(spans.iter().map(|s| s.content.chars().count()).sum());
        spans.push(sep.clone());
    }

    let line = Line::from(spans);
    let tabs = Paragraph::new(line).style(Style::default().bg(bg));
    frame.render_widget(tabs, area);
    sep_cols
}

fn render_separator(frame: &mut Frame, app: &App, area: Rect, sep_cols: &[usize]) {
    let width = area.width as usize;
    let bg = app.theme.background;
    let dim = app.theme.dim;

    let indicator_spans = filter_indicator(app);
    let indicator_width: usize = indicator_spans
        .iter()
        .map(|s| s.content.chars().count())
        .sum();

    // +2: one space before indicator, one space after (right edge buffer)
    let separator_end = if indicator_spans.is_empty() {
        width
    } else {
        width.saturating_sub(indicator_width + 2)
    };

    let mut sep_text = String::with_capacity(separator_end * 3);
    for col in 0..separator_end {
        if sep_cols.contains(&col) {
            sep_text.push('\u{2534}');
        } else {
            sep_text.push('\u{2500}');
        }
    }

    let mut spans: Vec<Span> = vec![Span::styled(sep_text, Style::default().fg(dim).bg(bg))];
    if !indicator_spans.is_empty() {
        spans.push(Span::styled(" ", Style::default().bg(bg)));
        spans.extend(indicator_spans);
        let current_width: usize = spans.iter().map(|s| s.content.chars().count()).sum();
        if current_width < width {
            spans.push(Span::styled(
                " ".repeat(width - current_width),
                Style::default().bg(bg),
            ));
        }
    }

    let sep_widget = Paragraph::new(Line::from(spans)).style(Style::default().bg(bg));
    frame.render_widget(sep_widget, area);
}

/// "filtro: <status> /search" on the ticket view when either is active
fn filter_indicator(app: &App) -> Vec<Span<'static>> {
    let mut spans = Vec::new();
    if app.view != View::Tickets {
        return spans;
    }
    let bg = app.theme.background;
    let tickets = &app.tickets;

    if let StatusFilter::Only(status) = tickets.filter {
        spans.push(Span::styled(
            "filtro: ",
            Style::default().fg(app.theme.purple).bg(bg),
        ));
        spans.push(Span::styled(
            tickets.filter.label(),
            Style::default()
                .fg(app.theme.ticket_status_color(status))
                .bg(bg),
        ));
    }

    if !tickets.search.is_empty() && !app.searching {
        if !spans.is_empty() {
            spans.push(Span::styled(" ", Style::default().bg(bg)));
        }
        spans.push(Span::styled(
            format!("/{}", tickets.search),
            Style::default().fg(app.theme.dim).bg(bg),
        ));
    }
    spans
}

/// Style for a tab: highlighted if current, normal otherwise
fn tab_style(app: &App, is_current: bool) -> Style {
    if is_current {
        Style::default()
            .fg(app.theme.text_bright)
            .bg(app.theme.selection_bg)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(app.theme.text).bg(app.theme.background)
    }
}
