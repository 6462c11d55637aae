use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::tui::app::{App, View};

use super::{centered_rect_fixed, wrap_text};

const POPUP_W: u16 = 52;

/// Question and body for the pending delete on the current view
fn pending_prompt(app: &App) -> Option<(&'static str, String)> {
    match app.view {
        View::Inventory => app.inventory.delete.pending().map(|item| {
            (
                "\u{00BF}Eliminar activo?",
                format!(
                    "Esta acción no se puede deshacer. El activo \"{}\" será eliminado permanentemente.",
                    item.name
                ),
            )
        }),
        View::Tickets => app.tickets.delete.pending().map(|ticket| {
            (
                "\u{00BF}Eliminar ticket?",
                format!(
                    "Esta acción no se puede deshacer. El ticket \"{}\" será eliminado permanentemente.",
                    ticket.title
                ),
            )
        }),
    }
}

/// Render the two-phase delete confirmation, if one is pending
pub fn render_confirm_popup(frame: &mut Frame, app: &App, area: Rect) {
    let Some((question, body)) = pending_prompt(app) else {
        return;
    };
    let theme = &app.theme;
    let bg = theme.background;
    let popup_w = POPUP_W.min(area.width.saturating_sub(2));
    let inner_w = popup_w.saturating_sub(2) as usize;
    let text = Style::default().fg(theme.text).bg(bg);

    let mut lines: Vec<Line> = vec![
        Line::from(Span::styled(
            format!(" {}", question),
            Style::default()
                .fg(theme.red)
                .bg(bg)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ];
    for row in wrap_text(" ", &body, inner_w) {
        lines.push(Line::from(Span::styled(row, text)));
    }
    lines.push(Line::from(""));

    let key = Style::default().bg(bg).add_modifier(Modifier::BOLD);
    lines.push(
        Line::from(vec![
            Span::styled("n", key.fg(theme.highlight)),
            Span::styled(" Cancelar   ", text),
            Span::styled("y", key.fg(theme.red)),
            Span::styled(" Eliminar ", Style::default().fg(theme.red).bg(bg)),
        ])
        .right_aligned(),
    );

    let popup_h = (lines.len() as u16 + 2).min(area.height);
    let overlay_area = centered_rect_fixed(popup_w, popup_h, area);
    frame.render_widget(Clear, overlay_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.red).bg(bg))
        .style(Style::default().bg(bg));
    frame.render_widget(
        Paragraph::new(lines)
            .block(block)
            .style(Style::default().bg(bg)),
        overlay_area,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::render::test_helpers::*;

    #[test]
    fn asks_before_deleting_item() {
        let (_dir, mut app) = app_with_data();
        let item = app.inventory.selected(&app.store).cloned().unwrap();
        app.inventory.request_delete(&item);
        let out = render_app(&mut app, TERM_W, TERM_H);
        assert!(out.contains("¿Eliminar activo?"));
        assert!(out.contains("\"Laptop Dell\""));
        assert!(out.contains("n Cancelar"));
        assert!(out.contains("y Eliminar"));
    }

    #[test]
    fn ticket_prompt_names_ticket() {
        let (_dir, mut app) = app_with_data();
        app.view = View::Tickets;
        let ticket = app.tickets.current(&app.store).cloned().unwrap();
        app.tickets.request_delete(&ticket);
        let (question, body) = pending_prompt(&app).unwrap();
        assert_eq!(question, "¿Eliminar ticket?");
        assert!(body.contains("\"Printer jam\""));
    }

    #[test]
    fn nothing_pending_renders_nothing() {
        let (_dir, app) = app_with_data();
        assert!(pending_prompt(&app).is_none());
    }
}
