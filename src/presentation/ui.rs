use crate::application::{App, AppMode};
use crate::domain::Document;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table},
    Frame,
};

const MIN_COLUMN_WIDTH: usize = 3;
const MAX_COLUMN_WIDTH: usize = 30;
const ROW_GUTTER_WIDTH: usize = 4;

pub fn render_ui(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(3),
        ])
        .split(f.area());

    render_header(f, app, chunks[0]);
    if app.document.is_empty() {
        render_placeholder(f, chunks[1]);
    } else {
        render_table(f, app, chunks[1]);
    }
    render_status_bar(f, app, chunks[2]);

    if matches!(app.mode, AppMode::Help) {
        render_help_popup(f, app.help_scroll);
    }
}

fn render_header(f: &mut Frame, app: &App, area: Rect) {
    let position = if app.document.is_empty() {
        String::new()
    } else {
        let column = app
            .document
            .headers
            .get(app.selected_col)
            .map(String::as_str)
            .unwrap_or("?");
        format!(" | Row {} / {}, Column {}", app.selected_row + 1, app.document.row_count(), column)
    };
    let header = Paragraph::new(format!(
        "csvman - CSV Manager | File: {}{}",
        app.filename.as_deref().unwrap_or("none"),
        position
    ))
    .style(Style::default().fg(Color::Cyan));
    f.render_widget(header, area);
}

fn render_placeholder(f: &mut Frame, area: Rect) {
    let placeholder = Paragraph::new("No file loaded.\n\nPress Ctrl+O to open a CSV file.")
        .block(Block::default().borders(Borders::ALL).title("CSV Manager"))
        .style(Style::default().fg(Color::DarkGray));
    f.render_widget(placeholder, area);
}

fn column_width(document: &Document, col: usize) -> usize {
    let mut width = document
        .headers
        .get(col)
        .map(|header| header.len())
        .unwrap_or(0);
    for row in 0..document.row_count() {
        width = width.max(document.get_cell(row, col).len());
    }
    width.clamp(MIN_COLUMN_WIDTH, MAX_COLUMN_WIDTH)
}

fn render_table(f: &mut Frame, app: &App, area: Rect) {
    let visible_rows = (area.height as usize).saturating_sub(3);

    let mut total_width = ROW_GUTTER_WIDTH;
    let mut visible_cols = 0;
    let available_width = area.width as usize;

    for col in app.scroll_col..app.document.column_count() {
        let col_width = column_width(&app.document, col);
        if total_width + col_width + 1 > available_width {
            break;
        }
        total_width += col_width + 1;
        visible_cols += 1;
    }
    // Always show at least the selected column, even when it overflows.
    if visible_cols == 0 && app.scroll_col < app.document.column_count() {
        visible_cols = 1;
    }

    let mut headers = vec![Cell::from("")];
    for col in app.scroll_col..app.scroll_col + visible_cols {
        let header_style = if col == app.selected_col {
            Style::default().bg(Color::LightBlue).fg(Color::Black)
        } else {
            Style::default().fg(Color::Yellow)
        };
        let title = app
            .document
            .headers
            .get(col)
            .cloned()
            .unwrap_or_default();
        headers.push(Cell::from(title).style(header_style));
    }

    let mut rows = vec![Row::new(headers).height(1)];

    let last_row = std::cmp::min(app.scroll_row + visible_rows, app.document.row_count());
    for row in app.scroll_row..last_row {
        let is_editing_row = app.editing_row == Some(row);
        let gutter_style = if row == app.selected_row {
            Style::default().bg(Color::LightBlue).fg(Color::Black)
        } else {
            Style::default().fg(Color::Yellow)
        };
        let mut cells = vec![Cell::from(format!("{}", row + 1)).style(gutter_style)];

        for col in app.scroll_col..app.scroll_col + visible_cols {
            let value = app.document.get_cell(row, col);
            let text = if value.is_empty() { " ".to_string() } else { value.to_string() };

            let style = if is_editing_row && col == app.selected_col {
                Style::default().bg(Color::Green).fg(Color::Black)
            } else if is_editing_row {
                Style::default().bg(Color::DarkGray).fg(Color::White)
            } else if row == app.selected_row && col == app.selected_col {
                Style::default().bg(Color::Blue).fg(Color::White)
            } else {
                Style::default()
            };

            cells.push(Cell::from(text).style(style));
        }

        rows.push(Row::new(cells).height(1));
    }

    let mut widths = vec![Constraint::Length(ROW_GUTTER_WIDTH as u16)];
    for col in app.scroll_col..app.scroll_col + visible_cols {
        widths.push(Constraint::Length(column_width(&app.document, col) as u16));
    }
    let table = Table::new(rows, widths)
        .block(Block::default().borders(Borders::ALL).title("Table"))
        .column_spacing(1);

    f.render_widget(table, area);
}

fn render_status_bar(f: &mut Frame, app: &App, area: Rect) {
    let input_text = match app.mode {
        AppMode::Normal => {
            if let Some(ref status) = app.status_message {
                status.clone()
            } else {
                "Ctrl+O: open CSV | Ctrl+E: export CSV | Ctrl+S: save table | Ctrl+L: load table | Enter: edit row | a: add row | d: delete row | F1/?: help | q: quit".to_string()
            }
        }
        AppMode::Editing => {
            let row = app.editing_row.unwrap_or(app.selected_row);
            format!(
                "Editing row {}: {} (Enter/Esc to save, Tab for next cell)",
                row + 1,
                app.document.get_cell(row, app.selected_col)
            )
        }
        AppMode::Help => "↑↓/jk: scroll | PgUp/PgDn: fast scroll | Home: top | Esc/q: close help".to_string(),
        AppMode::OpenFile => format!("Open file: {} (Enter to open, Esc to cancel)", app.filename_input),
        AppMode::ExportFile => format!("Export as: {} (Enter to export, Esc to cancel)", app.filename_input),
        AppMode::SaveTable => format!("Save table as: {} (Enter to save, Esc to cancel)", app.filename_input),
        AppMode::LoadTable => format!("Load table from: {} (Enter to load, Esc to cancel)", app.filename_input),
    };

    let input = Paragraph::new(input_text)
        .block(Block::default().borders(Borders::ALL).title("Status"))
        .style(match app.mode {
            AppMode::Normal => Style::default(),
            AppMode::Editing => Style::default().fg(Color::Green),
            AppMode::Help => Style::default().fg(Color::Cyan),
            AppMode::OpenFile => Style::default().fg(Color::Yellow),
            AppMode::ExportFile => Style::default().fg(Color::Magenta),
            AppMode::SaveTable => Style::default().fg(Color::Yellow),
            AppMode::LoadTable => Style::default().fg(Color::Yellow),
        });
    f.render_widget(input, area);
}

fn render_help_popup(f: &mut Frame, scroll: usize) {
    let area = f.area();
    let popup_area = Rect {
        x: area.width / 10,
        y: area.height / 10,
        width: area.width * 4 / 5,
        height: area.height * 4 / 5,
    };

    f.render_widget(Clear, popup_area);

    let help_text = get_help_text();
    let help_lines: Vec<&str> = help_text.lines().collect();
    let visible_height = popup_area.height.saturating_sub(2) as usize;

    let start_line = scroll.min(help_lines.len().saturating_sub(visible_height));
    let end_line = (start_line + visible_height).min(help_lines.len());

    let visible_text = help_lines[start_line..end_line].join("\n");

    let help_widget = Paragraph::new(visible_text)
        .block(Block::default()
            .borders(Borders::ALL)
            .title("csvman Help")
            .style(Style::default().fg(Color::Cyan)))
        .style(Style::default().fg(Color::White));

    f.render_widget(help_widget, popup_area);
}

fn get_help_text() -> String {
    r#"CSVMAN KEY REFERENCE

=== FILE OPERATIONS ===
Ctrl+O          Open a comma-delimited file (replaces the current table)
Ctrl+E          Export the table as delimited text (default exported_data.csv)
Ctrl+S          Save the table in the native JSON format
Ctrl+L          Load a table from the native JSON format

=== EDITING ===
Enter or F2     Edit the selected row in place
  (typing)      Changes are committed to the table as you type
  Tab/Shift+Tab Move between the cells of the row
  Enter or Esc  Leave editing; typed values are kept
a               Append an empty row
d or Delete     Delete the selected row

=== NAVIGATION ===
Arrow keys      Move the selection (hjkl also work)
q               Quit

=== NOTES ===
Fields are split on plain commas: quoting is not interpreted,
so a comma typed into a cell will shift column alignment the
next time the file is parsed.

=== HELP NAVIGATION ===
↑↓ or j/k       Scroll one line
Page Up/Down    Scroll five lines
Home            Jump to top
Esc/F1/?/q      Close this help window"#.to_string()
}
