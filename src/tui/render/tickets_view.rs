use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use regex::Regex;

use crate::model::Ticket;
use crate::tui::app::App;
use crate::util::unicode::{display_width, one_line, truncate_to_width};
use crate::views::tickets::{MSG_EMPTY, TicketTab, search_regex};

use super::push_highlighted_spans;

/// Height of one ticket card including its border
const CARD_H: u16 = 5;

/// Rows above the card grid: search bar, tabs, blank
const TOOLBAR_ROWS: u16 = 3;

/// Cards per row for a given content width (1, then 2 from 80 cells, 3 from 120)
pub fn grid_columns(width: u16) -> usize {
    if width >= 120 {
        3
    } else if width >= 80 {
        2
    } else {
        1
    }
}

/// Render the ticket board: search + filter toolbar, status tabs and card grid
pub fn render_tickets_view(frame: &mut Frame, app: &mut App, area: Rect) {
    let columns = grid_columns(area.width);
    app.ticket_columns = columns;

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(TOOLBAR_ROWS),
            Constraint::Min(1),
        ])
        .split(area);

    render_toolbar(frame, app, chunks[0]);

    let partition = app.tickets.partition(&app.store);
    let cards = partition.tab(app.tickets.tab);
    if cards.is_empty() {
        let bg = app.theme.background;
        let line = Line::from(Span::styled(
            format!("  {}", MSG_EMPTY),
            Style::default().fg(app.theme.dim).bg(bg),
        ));
        frame.render_widget(
            Paragraph::new(vec![Line::from(""), line]).style(Style::default().bg(bg)),
            chunks[1],
        );
        return;
    }

    let search_re = search_regex(&app.tickets.search);
    let grid = chunks[1];
    let visible_rows = (grid.height / CARD_H).max(1) as usize;
    let cursor = app.tickets.cursor.min(cards.len() - 1);
    let cursor_row = cursor / columns;
    let first_row = cursor_row.saturating_sub(visible_rows - 1);

    let col_w = grid.width / columns as u16;
    for (i, ticket) in cards.iter().enumerate().skip(first_row * columns) {
        let row = i / columns - first_row;
        if row >= visible_rows {
            break;
        }
        let col = (i % columns) as u16;
        let card_area = Rect::new(
            grid.x + col * col_w,
            grid.y + row as u16 * CARD_H,
            col_w,
            CARD_H.min(grid.height.saturating_sub(row as u16 * CARD_H)),
        );
        render_card(frame, app, ticket, i == cursor, search_re.as_ref(), card_area);
    }
}

fn render_toolbar(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let width = area.width as usize;
    let tickets = &app.tickets;
    let mut lines: Vec<Line> = Vec::new();

    // Search box + filter + create hint
    let mut spans: Vec<Span> = vec![Span::styled(
        " \u{2315} ",
        Style::default().fg(app.theme.purple).bg(bg),
    )];
    if tickets.search.is_empty() && !app.searching {
        spans.push(Span::styled(
            "Buscar tickets...",
            Style::default().fg(app.theme.dim).bg(bg),
        ));
    } else {
        spans.push(Span::styled(
            tickets.search.clone(),
            Style::default().fg(app.theme.text_bright).bg(bg),
        ));
        if app.searching {
            spans.push(Span::styled(
                "\u{258C}",
                Style::default().fg(app.theme.highlight).bg(bg),
            )); // ▌ cursor
        }
    }
    let right = vec![
        Span::styled("Estado: ", Style::default().fg(app.theme.dim).bg(bg)),
        Span::styled(
            tickets.filter.label(),
            Style::default().fg(app.theme.text_bright).bg(bg),
        ),
        Span::styled("   ", Style::default().bg(bg)),
        Span::styled(
            "+ Crear Ticket ",
            Style::default()
                .fg(app.theme.highlight)
                .bg(bg)
                .add_modifier(Modifier::BOLD),
        ),
    ];
    let left_w: usize = spans.iter().map(|s| display_width(&s.content)).sum();
    let right_w: usize = right.iter().map(|s| display_width(&s.content)).sum();
    if left_w + right_w < width {
        spans.push(Span::styled(
            " ".repeat(width - left_w - right_w),
            Style::default().bg(bg),
        ));
        spans.extend(right);
    }
    lines.push(Line::from(spans));

    // Status tabs with live counts
    let partition = tickets.partition(&app.store);
    let mut tab_spans: Vec<Span> = vec![Span::styled(" ", Style::default().bg(bg))];
    for tab in TicketTab::ALL {
        let label = format!(" {} ", tab.label(partition.count(tab)));
        let style = if tab == tickets.tab {
            Style::default()
                .fg(app.theme.text_bright)
                .bg(app.theme.selection_bg)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(app.theme.text).bg(bg)
        };
        tab_spans.push(Span::styled(label, style));
        tab_spans.push(Span::styled(" ", Style::default().bg(bg)));
    }
    lines.push(Line::from(tab_spans));

    frame.render_widget(Paragraph::new(lines).style(Style::default().bg(bg)), area);
}

fn render_card(
    frame: &mut Frame,
    app: &App,
    ticket: &Ticket,
    selected: bool,
    search_re: Option<&Regex>,
    area: Rect,
) {
    let bg = if selected {
        app.theme.selection_bg
    } else {
        app.theme.background
    };
    let border = if selected {
        app.theme.selection_border
    } else {
        app.theme.dim
    };
    let inner_w = area.width.saturating_sub(4) as usize;
    let hl = Style::default()
        .fg(app.theme.search_match_fg)
        .bg(app.theme.search_match_bg);

    // Title row: "#id title"
    let id = format!("#{} ", ticket.id.0);
    let title = truncate_to_width(
        &one_line(&ticket.title),
        inner_w.saturating_sub(display_width(&id)),
    );
    let mut title_spans = vec![Span::styled(id, Style::default().fg(app.theme.dim).bg(bg))];
    push_highlighted_spans(
        &mut title_spans,
        &title,
        Style::default()
            .fg(app.theme.text_bright)
            .bg(bg)
            .add_modifier(Modifier::BOLD),
        hl,
        search_re,
    );

    // Status badge + department
    let mut meta_spans = vec![Span::styled(
        format!("\u{25CF} {}", ticket.status.as_str()),
        Style::default()
            .fg(app.theme.ticket_status_color(ticket.status))
            .bg(bg),
    )];
    if let Some(dept) = ticket.department_name.as_deref() {
        meta_spans.push(Span::styled("  ", Style::default().bg(bg)));
        push_highlighted_spans(
            &mut meta_spans,
            &truncate_to_width(dept, inner_w.saturating_sub(16)),
            Style::default().fg(app.theme.cyan).bg(bg),
            hl,
            search_re,
        );
    }

    let mut desc_spans = Vec::new();
    let description = one_line(&ticket.description);
    if description.is_empty() {
        desc_spans.push(Span::styled(
            "Sin descripción",
            Style::default()
                .fg(app.theme.dim)
                .bg(bg)
                .add_modifier(Modifier::ITALIC),
        ));
    } else {
        push_highlighted_spans(
            &mut desc_spans,
            &truncate_to_width(&description, inner_w),
            Style::default().fg(app.theme.text).bg(bg),
            hl,
            search_re,
        );
    }

    let lines = vec![
        Line::from(title_spans),
        Line::from(meta_spans),
        Line::from(desc_spans),
    ];
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border).bg(bg))
        .style(Style::default().bg(bg));
    let paragraph = Paragraph::new(lines)
        .block(block.padding(ratatui::widgets::Padding::horizontal(1)))
        .style(Style::default().bg(bg));
    frame.render_widget(paragraph, area);
}
