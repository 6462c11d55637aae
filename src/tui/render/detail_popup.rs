use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::tui::app::App;

use super::{centered_rect_fixed, wrap_text};

const POPUP_W: u16 = 64;

/// Render the read-only ticket detail dialog
pub fn render_detail_popup(frame: &mut Frame, app: &App, area: Rect) {
    let Some(ticket) = app.tickets.selected(&app.store) else {
        return;
    };
    let theme = &app.theme;
    let bg = theme.background;
    let popup_w = POPUP_W.min(area.width.saturating_sub(2));
    let inner_w = popup_w.saturating_sub(4) as usize;
    let label = Style::default().fg(theme.dim).bg(bg);
    let text = Style::default().fg(theme.text).bg(bg);

    let mut lines: Vec<Line> = Vec::new();
    for (i, row) in wrap_text("", &ticket.title, inner_w).into_iter().enumerate() {
        let row = if i == 0 {
            format!("#{} {}", ticket.id.0, row)
        } else {
            row
        };
        lines.push(Line::from(Span::styled(
            row,
            Style::default()
                .fg(theme.text_bright)
                .bg(bg)
                .add_modifier(Modifier::BOLD),
        )));
    }
    lines.push(Line::from(""));

    lines.push(Line::from(vec![
        Span::styled("Estado        ", label),
        Span::styled(
            format!("\u{25CF} {}", ticket.status.as_str()),
            Style::default()
                .fg(theme.ticket_status_color(ticket.status))
                .bg(bg),
        ),
    ]));
    lines.push(Line::from(vec![
        Span::styled("Departamento  ", label),
        Span::styled(
            ticket
                .department_name
                .clone()
                .unwrap_or_else(|| "Sin departamento".into()),
            text,
        ),
    ]));
    lines.push(Line::from(vec![
        Span::styled("Creado        ", label),
        Span::styled(
            ticket
                .created_at
                .with_timezone(&chrono::Local)
                .format("%d/%m/%Y %H:%M")
                .to_string(),
            text,
        ),
    ]));
    lines.push(Line::from(""));

    lines.push(Line::from(Span::styled("Descripción", label)));
    if ticket.description.trim().is_empty() {
        lines.push(Line::from(Span::styled(
            "Sin descripción",
            label.add_modifier(Modifier::ITALIC),
        )));
    } else {
        for paragraph in ticket.description.lines() {
            for row in wrap_text("", paragraph, inner_w) {
                lines.push(Line::from(Span::styled(row, text)));
            }
        }
    }

    lines.push(Line::from(""));
    let key = Style::default()
        .fg(theme.highlight)
        .bg(bg)
        .add_modifier(Modifier::BOLD);
    lines.push(
        Line::from(vec![
            Span::styled("s", key),
            Span::styled(" Avanzar estado   ", text),
            Span::styled("d", key),
            Span::styled(" Eliminar   ", text),
            Span::styled("Esc", key),
            Span::styled(" Cerrar", text),
        ])
        .right_aligned(),
    );

    let popup_h = (lines.len() as u16 + 2).min(area.height);
    let overlay_area = centered_rect_fixed(popup_w, popup_h, area);
    frame.render_widget(Clear, overlay_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(
            Style::default()
                .fg(theme.ticket_status_color(ticket.status))
                .bg(bg),
        )
        .style(Style::default().bg(bg))
        .padding(ratatui::widgets::Padding::horizontal(1));
    frame.render_widget(
        Paragraph::new(lines)
            .block(block)
            .style(Style::default().bg(bg)),
        overlay_area,
    );
}
