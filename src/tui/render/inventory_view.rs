use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::model::InventoryItem;
use crate::store::DataContext;
use crate::tui::app::App;
use crate::util::unicode::{display_width, fit_to_width, one_line, truncate_to_width};
use crate::views::inventory::summary;

const MARKER_W: usize = 2;
const TYPE_W: usize = 14;
const SERIAL_W: usize = 14;
const STOCK_W: usize = 7;
const STATUS_W: usize = 15;
const MIN_NAME_W: usize = 12;

/// Lines above the table body: title, blank, column header, rule
const HEADER_ROWS: usize = 4;

/// Render the inventory table
pub fn render_inventory_view(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let width = area.width as usize;
    let items = app.store.inventory();
    let mut lines: Vec<Line> = Vec::new();

    // Title row: "Bienes Tecnológicos" ... "N activos registrados"
    let title = " Bienes Tecnológicos";
    let count = summary(items.len());
    let pad = width.saturating_sub(display_width(title) + display_width(&count) + 1);
    lines.push(Line::from(vec![
        Span::styled(
            title,
            Style::default()
                .fg(app.theme.text_bright)
                .bg(bg)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(" ".repeat(pad), Style::default().bg(bg)),
        Span::styled(count, Style::default().fg(app.theme.dim).bg(bg)),
    ]));
    lines.push(Line::from(""));

    let name_w = name_width(width);
    let header_style = Style::default()
        .fg(app.theme.dim)
        .bg(bg)
        .add_modifier(Modifier::BOLD);
    lines.push(Line::from(Span::styled(
        format!(
            "{}{}{}{}{}{}",
            " ".repeat(MARKER_W),
            fit_to_width("Nombre", name_w),
            fit_to_width("Tipo", TYPE_W),
            fit_to_width("Serial", SERIAL_W),
            fit_to_width("Stock", STOCK_W),
            fit_to_width("Estado", STATUS_W),
        ),
        header_style,
    )));
    lines.push(Line::from(Span::styled(
        "\u{2500}".repeat(width),
        Style::default().fg(app.theme.dim).bg(bg),
    )));

    if items.is_empty() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "  Sin activos. Pulsa 'a' para registrar uno.",
            Style::default().fg(app.theme.dim).bg(bg),
        )));
    } else {
        let body_rows = (area.height as usize).saturating_sub(HEADER_ROWS).max(1);
        let cursor = app.inventory.cursor.min(items.len() - 1);
        let offset = cursor.saturating_sub(body_rows - 1);
        for (i, item) in items.iter().enumerate().skip(offset).take(body_rows) {
            lines.push(item_line(app, item, i == cursor, name_w));
        }
    }

    let paragraph = Paragraph::new(lines).style(Style::default().bg(bg));
    frame.render_widget(paragraph, area);
}

fn name_width(width: usize) -> usize {
    width
        .saturating_sub(MARKER_W + TYPE_W + SERIAL_W + STOCK_W + STATUS_W)
        .max(MIN_NAME_W)
}

fn item_line<'a>(app: &App, item: &InventoryItem, selected: bool, name_w: usize) -> Line<'a> {
    let bg = if selected {
        app.theme.selection_bg
    } else {
        app.theme.background
    };
    let mut spans: Vec<Span> = Vec::new();

    if selected {
        spans.push(Span::styled(
            "\u{258E} ",
            Style::default().fg(app.theme.selection_border).bg(bg),
        ));
    } else {
        spans.push(Span::styled("  ", Style::default().bg(bg)));
    }

    // Name, then the description dimmed on the same line
    let name = truncate_to_width(&one_line(&item.name), name_w.saturating_sub(1));
    let name_cells = display_width(&name);
    spans.push(Span::styled(
        name,
        Style::default().fg(app.theme.text_bright).bg(bg),
    ));
    let rest = name_w.saturating_sub(name_cells);
    let description = item
        .description
        .as_deref()
        .map(one_line)
        .unwrap_or_default();
    if !description.is_empty() && rest > 3 {
        spans.push(Span::styled(
            fit_to_width(&format!(" {}", description), rest),
            Style::default().fg(app.theme.dim).bg(bg),
        ));
    } else {
        spans.push(Span::styled(" ".repeat(rest), Style::default().bg(bg)));
    }

    let type_color = app.theme.item_type_color(item.item_type);
    spans.push(Span::styled(
        fit_to_width(
            &format!("{} {}", item.item_type.icon(), item.item_type.label()),
            TYPE_W,
        ),
        Style::default().fg(type_color).bg(bg),
    ));
    spans.push(Span::styled(
        fit_to_width(&item.serial_number, SERIAL_W),
        Style::default().fg(app.theme.text).bg(bg),
    ));
    spans.push(Span::styled(
        fit_to_width(&item.stock.to_string(), STOCK_W),
        Style::default()
            .fg(app.theme.stock_color(item.stock_level()))
            .bg(bg)
            .add_modifier(Modifier::BOLD),
    ));
    spans.push(Span::styled(
        fit_to_width(&format!("\u{25CF} {}", item.status.as_str()), STATUS_W),
        Style::default()
            .fg(app.theme.item_status_color(item.status))
            .bg(bg),
    ));

    Line::from(spans)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::render::test_helpers::*;

    #[test]
    fn header_counts_records() {
        let (_dir, app) = app_with_data();
        let out = render_to_string(TERM_W, 10, |frame, area| {
            render_inventory_view(frame, &app, area);
        });
        let first = out.lines().next().unwrap();
        assert!(first.starts_with(" Bienes Tecnológicos"));
        assert!(first.ends_with("2 activos registrados"));
        assert!(out.contains("Nombre"));
        assert!(out.contains("Serial"));
    }

    #[test]
    fn rows_follow_insertion_order() {
        let (_dir, app) = app_with_data();
        let out = render_to_string(TERM_W, 10, |frame, area| {
            render_inventory_view(frame, &app, area);
        });
        let rows: Vec<&str> = out.lines().skip(HEADER_ROWS).collect();
        assert_eq!(rows.len(), 2);
        assert!(rows[0].contains("Laptop Dell"));
        assert!(rows[0].contains("SN-001"));
        assert!(rows[1].contains("Mouse"));
        assert!(rows[1].contains("Periférico"));
        assert!(rows[1].contains("Mantenimiento"));
    }

    #[test]
    fn description_is_kept_on_one_line() {
        let (_dir, app) = app_with_data();
        let out = render_to_string(TERM_W, 10, |frame, area| {
            render_inventory_view(frame, &app, area);
        });
        let row = out.lines().nth(HEADER_ROWS).unwrap();
        assert!(row.contains("Laptop Dell Equipo de"));
        assert!(row.contains("SN-001"));
    }

    #[test]
    fn empty_inventory_shows_hint() {
        let (_dir, app) = empty_app();
        let out = render_to_string(TERM_W, 10, |frame, area| {
            render_inventory_view(frame, &app, area);
        });
        assert!(out.contains("0 activos registrados"));
        assert!(out.contains("Sin activos"));
    }

    #[test]
    fn scrolls_to_keep_cursor_visible() {
        let (_dir, mut app) = empty_app();
        for i in 0..10 {
            app.store
                .add_inventory_item(item(&format!("Equipo {i}"), &format!("SN-{i}"), 5))
                .unwrap();
        }
        app.inventory.cursor = 9;
        let out = render_to_string(TERM_W, 7, |frame, area| {
            render_inventory_view(frame, &app, area);
        });
        assert!(out.contains("Equipo 9"));
        assert!(!out.contains("Equipo 0"));
    }

    #[test]
    fn stock_is_coloured_by_level() {
        let (_dir, app) = app_with_data();
        let items = app.store.inventory();
        let line = item_line(&app, items[0], false, 20);
        let stock = line.spans.iter().find(|s| s.content.trim() == "1").unwrap();
        assert_eq!(stock.style.fg, Some(app.theme.red));
        let line = item_line(&app, items[1], false, 20);
        let stock = line.spans.iter().find(|s| s.content.trim() == "12").unwrap();
        assert_eq!(stock.style.fg, Some(app.theme.text));
    }
}
