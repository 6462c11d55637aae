use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::tui::app::App;
use crate::views::tickets::TicketField;

use super::centered_rect_fixed;
use super::form_popup::{footer, push_field};

const POPUP_W: u16 = 60;

/// Render the "Crear Ticket" dialog
pub fn render_ticket_form_popup(frame: &mut Frame, app: &App, area: Rect) {
    let Some(form) = app.tickets.form() else {
        return;
    };
    let theme = &app.theme;
    let bg = theme.background;
    let popup_w = POPUP_W.min(area.width.saturating_sub(2));
    let inner_w = popup_w.saturating_sub(4) as usize;

    let mut lines: Vec<Line> = vec![
        Line::from(Span::styled(
            "+ Crear Ticket",
            Style::default()
                .fg(theme.highlight)
                .bg(bg)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ];

    for field in TicketField::ALL {
        let (value, is_choice) = match field {
            TicketField::Title => (form.draft.title.clone(), false),
            TicketField::Description => (form.draft.description.clone(), false),
            TicketField::Department => (form.department_label().to_string(), true),
        };
        push_field(
            &mut lines,
            theme,
            field.label(),
            &value,
            is_choice,
            form.focus == field,
            inner_w,
        );
    }

    lines.push(Line::from(""));
    lines.push(footer(theme, "Crear Ticket"));

    let popup_h = (lines.len() as u16 + 2).min(area.height);
    let overlay_area = centered_rect_fixed(popup_w, popup_h, area);
    frame.render_widget(Clear, overlay_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.highlight).bg(bg))
        .style(Style::default().bg(bg))
        .padding(ratatui::widgets::Padding::horizontal(1));
    frame.render_widget(
        Paragraph::new(lines)
            .block(block)
            .style(Style::default().bg(bg)),
        overlay_area,
    );
}
