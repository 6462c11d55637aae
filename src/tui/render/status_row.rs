use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::app::{App, Mode, View};
use crate::util::unicode::{display_width, truncate_to_width};

/// Key hint for the current mode, shown right-aligned
fn key_hint(app: &App) -> &'static str {
    match (app.mode(), app.view) {
        (Mode::Navigate, View::Inventory) => "a nuevo  e editar  d eliminar  Tab tickets  ? ayuda",
        (Mode::Navigate, View::Tickets) => "n nuevo  Enter ver  / buscar  f filtro  [] pestaña  ? ayuda",
        (Mode::Search, _) => "Enter aplicar  Esc limpiar",
        (Mode::Form, _) => "Tab campo  \u{2190}\u{2192} opción  Enter guardar  Esc cancelar",
        (Mode::Confirm, _) => "y eliminar  n cancelar",
        (Mode::Detail, _) => "s estado  d eliminar  Esc cerrar",
    }
}

/// Render the status row (bottom of screen)
pub fn render_status_row(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let width = area.width as usize;

    let mut spans: Vec<Span> = Vec::new();
    if let Some(notice) = app.toast.current() {
        spans.push(Span::styled(
            format!(" {}", truncate_to_width(&notice.message, width.saturating_sub(2))),
            Style::default()
                .fg(app.theme.notice_color(notice.level))
                .bg(bg),
        ));
    } else if app.mode() == Mode::Search {
        // Search prompt: /pattern▌
        spans.push(Span::styled(
            format!("/{}", app.tickets.search),
            Style::default().fg(app.theme.text_bright).bg(bg),
        ));
        spans.push(Span::styled(
            "\u{258C}",
            Style::default().fg(app.theme.highlight).bg(bg),
        ));
    }

    if app.desk.config.ui.show_key_hints {
        let hint = key_hint(app);
        let content_width: usize = spans.iter().map(|s| display_width(&s.content)).sum();
        let hint_width = display_width(hint) + 1;
        if content_width + hint_width < width {
            let padding = width - content_width - hint_width;
            spans.push(Span::styled(" ".repeat(padding), Style::default().bg(bg)));
            spans.push(Span::styled(
                format!("{} ", hint),
                Style::default().fg(app.theme.dim).bg(bg),
            ));
        }
    }

    let paragraph = Paragraph::new(Line::from(spans)).style(Style::default().bg(bg));
    frame.render_widget(paragraph, area);
}
