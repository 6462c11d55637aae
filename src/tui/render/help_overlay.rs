use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::tui::app::{App, View};

/// Render the help overlay (toggled with ?)
pub fn render_help_overlay(frame: &mut Frame, app: &App, area: Rect) {
    // Center the overlay, leaving some margin
    let overlay_area = centered_rect(60, 80, area);

    // Clear the area behind the overlay
    frame.render_widget(Clear, overlay_area);

    let bg = app.theme.background;
    let key_style = Style::default()
        .fg(app.theme.highlight)
        .bg(bg)
        .add_modifier(Modifier::BOLD);
    let desc_style = Style::default().fg(app.theme.text).bg(bg);
    let header_style = Style::default()
        .fg(app.theme.text_bright)
        .bg(bg)
        .add_modifier(Modifier::BOLD);

    let mut lines: Vec<Line> = Vec::new();

    lines.push(Line::from(Span::styled(" Atajos de teclado", header_style)));
    lines.push(Line::from(""));

    // Context-sensitive help
    let bindings: &[(&str, &str)] = match app.view {
        View::Inventory => {
            lines.push(Line::from(Span::styled(" Inventario", header_style)));
            &[
                (" \u{2191}\u{2193}/jk", "Mover cursor"),
                (" a/n", "Agregar activo"),
                (" e/Enter", "Editar activo"),
                (" d", "Eliminar activo"),
            ]
        }
        View::Tickets => {
            lines.push(Line::from(Span::styled(" Tickets", header_style)));
            &[
                (" \u{2190}\u{2191}\u{2193}\u{2192}/hjkl", "Mover entre tarjetas"),
                (" Enter", "Ver detalle"),
                (" n", "Crear ticket"),
                (" d", "Eliminar ticket"),
                (" s", "Avanzar estado"),
                (" /", "Buscar"),
                (" f", "Filtrar por estado"),
                (" [ ]", "Pestaña anterior/siguiente"),
            ]
        }
    };
    for (key, desc) in bindings {
        add_binding(&mut lines, key, desc, key_style, desc_style);
    }
    lines.push(Line::from(""));

    lines.push(Line::from(Span::styled(" Formularios", header_style)));
    add_binding(&mut lines, " Tab/S-Tab", "Campo siguiente/anterior", key_style, desc_style);
    add_binding(&mut lines, " \u{2190}\u{2192}/Espacio", "Cambiar opción", key_style, desc_style);
    add_binding(&mut lines, " Enter", "Guardar", key_style, desc_style);
    add_binding(&mut lines, " Esc", "Cancelar", key_style, desc_style);
    lines.push(Line::from(""));

    // Global keys
    lines.push(Line::from(Span::styled(" General", header_style)));
    add_binding(&mut lines, " Tab", "Cambiar vista", key_style, desc_style);
    add_binding(&mut lines, " ?", "Mostrar/ocultar ayuda", key_style, desc_style);
    add_binding(&mut lines, " q", "Salir", key_style, desc_style);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(app.theme.highlight).bg(bg))
        .style(Style::default().bg(bg));

    let paragraph = Paragraph::new(lines).block(block).style(Style::default().bg(bg));
    frame.render_widget(paragraph, overlay_area);
}

fn add_binding<'a>(
    lines: &mut Vec<Line<'a>>,
    key: &'a str,
    desc: &'a str,
    key_style: Style,
    desc_style: Style,
) {
    let key_width = 18;
    let padded_key = format!("{:<width$}", key, width = key_width);
    lines.push(Line::from(vec![
        Span::styled(padded_key, key_style),
        Span::styled(desc, desc_style),
    ]));
}

/// Create a centered rectangle of the given percentage of the parent
fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::render::test_helpers::*;

    #[test]
    fn help_follows_current_view() {
        let (_dir, mut app) = empty_app();
        app.show_help = true;
        let out = render_app(&mut app, 100, 40);
        assert!(out.contains("Atajos de teclado"));
        assert!(out.contains("Agregar activo"));

        app.view = View::Tickets;
        let out = render_app(&mut app, 100, 40);
        assert!(out.contains("Filtrar por estado"));
        assert!(!out.contains("Agregar activo"));
    }
}
