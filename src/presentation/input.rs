use crate::application::{App, AppMode};
use crate::domain::TableCodec;
use crate::infrastructure::FileRepository;
use crossterm::event::{KeyCode, KeyModifiers};

pub struct InputHandler;

impl InputHandler {
    pub fn handle_key_event(app: &mut App, key: KeyCode, modifiers: KeyModifiers) {
        match app.mode {
            AppMode::Normal => Self::handle_normal_mode(app, key, modifiers),
            AppMode::Editing => Self::handle_editing_mode(app, key),
            AppMode::Help => Self::handle_help_mode(app, key),
            AppMode::OpenFile => Self::handle_filename_input_mode(app, key, "open"),
            AppMode::ExportFile => Self::handle_filename_input_mode(app, key, "export"),
            AppMode::SaveTable => Self::handle_filename_input_mode(app, key, "save"),
            AppMode::LoadTable => Self::handle_filename_input_mode(app, key, "load"),
        }
    }

    fn handle_normal_mode(app: &mut App, key: KeyCode, modifiers: KeyModifiers) {
        if modifiers.contains(KeyModifiers::CONTROL) {
            match key {
                KeyCode::Char('o') => {
                    app.start_open_file();
                    return;
                }
                KeyCode::Char('e') => {
                    app.start_export();
                    return;
                }
                KeyCode::Char('s') => {
                    app.start_save_table();
                    return;
                }
                KeyCode::Char('l') => {
                    app.start_load_table();
                    return;
                }
                _ => {}
            }
        }

        match key {
            KeyCode::Up | KeyCode::Char('k') => {
                app.status_message = None;
                if app.selected_row > 0 {
                    app.selected_row -= 1;
                    app.ensure_cursor_visible();
                }
            }
            KeyCode::Down | KeyCode::Char('j') => {
                app.status_message = None;
                if app.selected_row + 1 < app.document.row_count() {
                    app.selected_row += 1;
                    app.ensure_cursor_visible();
                }
            }
            KeyCode::Left | KeyCode::Char('h') => {
                app.status_message = None;
                if app.selected_col > 0 {
                    app.selected_col -= 1;
                    app.ensure_cursor_visible();
                }
            }
            KeyCode::Right | KeyCode::Char('l') => {
                app.status_message = None;
                if app.selected_col + 1 < app.document.column_count() {
                    app.selected_col += 1;
                    app.ensure_cursor_visible();
                }
            }
            KeyCode::Enter | KeyCode::F(2) => {
                app.start_editing();
            }
            KeyCode::Char('a') => {
                app.add_row();
            }
            KeyCode::Char('d') | KeyCode::Delete => {
                app.delete_selected_row();
            }
            KeyCode::F(1) | KeyCode::Char('?') => {
                app.mode = AppMode::Help;
                app.help_scroll = 0;
            }
            KeyCode::Char('q') => {
                // Will be handled by main loop
            }
            KeyCode::Esc => {
                app.status_message = None;
            }
            _ => {}
        }
    }

    fn handle_editing_mode(app: &mut App, key: KeyCode) {
        match key {
            // No cancel transition: Esc saves too, since every keystroke
            // was already committed to the document.
            KeyCode::Enter | KeyCode::Esc => {
                app.finish_editing();
            }
            KeyCode::Tab => {
                app.edit_next_cell();
            }
            KeyCode::BackTab => {
                app.edit_prev_cell();
            }
            KeyCode::Backspace => {
                app.edit_backspace();
            }
            KeyCode::Delete => {
                app.edit_delete();
            }
            KeyCode::Left => {
                app.edit_cursor_left();
            }
            KeyCode::Right => {
                app.edit_cursor_right();
            }
            KeyCode::Home => {
                app.edit_cursor_home();
            }
            KeyCode::End => {
                app.edit_cursor_end();
            }
            KeyCode::Char(c) => {
                app.edit_insert_char(c);
            }
            _ => {}
        }
    }

    fn handle_help_mode(app: &mut App, key: KeyCode) {
        match key {
            KeyCode::Esc | KeyCode::F(1) | KeyCode::Char('?') | KeyCode::Char('q') => {
                app.mode = AppMode::Normal;
            }
            KeyCode::Up | KeyCode::Char('k') => {
                if app.help_scroll > 0 {
                    app.help_scroll -= 1;
                }
            }
            KeyCode::Down | KeyCode::Char('j') => {
                app.help_scroll += 1;
            }
            KeyCode::PageUp => {
                app.help_scroll = app.help_scroll.saturating_sub(5);
            }
            KeyCode::PageDown => {
                app.help_scroll += 5;
            }
            KeyCode::Home => {
                app.help_scroll = 0;
            }
            _ => {}
        }
    }

    fn handle_filename_input_mode(app: &mut App, key: KeyCode, mode: &str) {
        match key {
            KeyCode::Enter => {
                match mode {
                    "open" => {
                        let filename = app.get_open_filename();
                        let result = FileRepository::read_text(&filename)
                            .map(|text| (TableCodec::parse(&text), filename.clone()));
                        app.set_open_result(result);
                    }
                    "export" => {
                        let filename = app.get_export_filename();
                        let text = TableCodec::serialize(&app.document);
                        let result = FileRepository::write_text(&filename, &text);
                        app.set_export_result(result);
                    }
                    "save" => {
                        let filename = app.get_save_filename();
                        let result = FileRepository::save_document(&app.document, &filename);
                        app.set_save_result(result);
                    }
                    "load" => {
                        let filename = app.get_load_filename();
                        let result = FileRepository::load_document(&filename);
                        app.set_load_result(result);
                    }
                    _ => {}
                }
            }
            KeyCode::Esc => {
                app.cancel_filename_input();
            }
            KeyCode::Backspace => {
                if app.cursor_position > 0 {
                    app.filename_input.remove(app.cursor_position - 1);
                    app.cursor_position -= 1;
                }
            }
            KeyCode::Delete => {
                if app.cursor_position < app.filename_input.len() {
                    app.filename_input.remove(app.cursor_position);
                }
            }
            KeyCode::Left => {
                if app.cursor_position > 0 {
                    app.cursor_position -= 1;
                }
            }
            KeyCode::Right => {
                if app.cursor_position < app.filename_input.len() {
                    app.cursor_position += 1;
                }
            }
            KeyCode::Home => {
                app.cursor_position = 0;
            }
            KeyCode::End => {
                app.cursor_position = app.filename_input.len();
            }
            KeyCode::Char(c) => {
                app.filename_input.insert(app.cursor_position, c);
                app.cursor_position += 1;
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::{App, AppMode};

    fn app_with_table() -> App {
        let mut app = App::default();
        app.document = TableCodec::parse("a,b\n1,2\n3,4");
        app
    }

    #[test]
    fn test_open_file_key_binding() {
        let mut app = App::default();
        assert!(matches!(app.mode, AppMode::Normal));

        InputHandler::handle_key_event(&mut app, KeyCode::Char('o'), KeyModifiers::CONTROL);

        assert!(matches!(app.mode, AppMode::OpenFile));
        assert_eq!(app.filename_input, "data.csv");
    }

    #[test]
    fn test_export_key_binding() {
        let mut app = app_with_table();

        InputHandler::handle_key_event(&mut app, KeyCode::Char('e'), KeyModifiers::CONTROL);

        assert!(matches!(app.mode, AppMode::ExportFile));
        assert_eq!(app.filename_input, "exported_data.csv");
    }

    #[test]
    fn test_save_and_load_table_key_bindings() {
        let mut app = app_with_table();

        InputHandler::handle_key_event(&mut app, KeyCode::Char('s'), KeyModifiers::CONTROL);
        assert!(matches!(app.mode, AppMode::SaveTable));
        app.cancel_filename_input();

        InputHandler::handle_key_event(&mut app, KeyCode::Char('l'), KeyModifiers::CONTROL);
        assert!(matches!(app.mode, AppMode::LoadTable));
    }

    #[test]
    fn test_filename_input_editing() {
        let mut app = App::default();
        app.start_open_file();

        InputHandler::handle_key_event(&mut app, KeyCode::Char('x'), KeyModifiers::NONE);
        assert_eq!(app.filename_input, "data.csvx");

        InputHandler::handle_key_event(&mut app, KeyCode::Backspace, KeyModifiers::NONE);
        assert_eq!(app.filename_input, "data.csv");

        InputHandler::handle_key_event(&mut app, KeyCode::Esc, KeyModifiers::NONE);
        assert!(matches!(app.mode, AppMode::Normal));
        assert!(app.filename_input.is_empty());
    }

    #[test]
    fn test_enter_starts_editing_and_typing_commits() {
        let mut app = app_with_table();

        InputHandler::handle_key_event(&mut app, KeyCode::Enter, KeyModifiers::NONE);
        assert!(matches!(app.mode, AppMode::Editing));
        assert_eq!(app.editing_row, Some(0));

        InputHandler::handle_key_event(&mut app, KeyCode::Char('x'), KeyModifiers::NONE);
        assert_eq!(app.document.get_cell(0, 0), "1x");

        InputHandler::handle_key_event(&mut app, KeyCode::Enter, KeyModifiers::NONE);
        assert!(matches!(app.mode, AppMode::Normal));
        assert!(app.editing_row.is_none());
        assert_eq!(app.document.get_cell(0, 0), "1x");
    }

    #[test]
    fn test_escape_leaves_editing_without_revert() {
        let mut app = app_with_table();
        app.start_editing();

        InputHandler::handle_key_event(&mut app, KeyCode::Char('!'), KeyModifiers::NONE);
        InputHandler::handle_key_event(&mut app, KeyCode::Esc, KeyModifiers::NONE);

        assert!(matches!(app.mode, AppMode::Normal));
        assert_eq!(app.document.get_cell(0, 0), "1!");
    }

    #[test]
    fn test_add_and_delete_row_bindings() {
        let mut app = app_with_table();

        InputHandler::handle_key_event(&mut app, KeyCode::Char('a'), KeyModifiers::NONE);
        assert_eq!(app.document.row_count(), 3);

        InputHandler::handle_key_event(&mut app, KeyCode::Char('d'), KeyModifiers::NONE);
        assert_eq!(app.document.row_count(), 2);
    }

    #[test]
    fn test_navigation_respects_table_bounds() {
        let mut app = app_with_table();

        InputHandler::handle_key_event(&mut app, KeyCode::Up, KeyModifiers::NONE);
        assert_eq!(app.selected_row, 0);

        InputHandler::handle_key_event(&mut app, KeyCode::Down, KeyModifiers::NONE);
        assert_eq!(app.selected_row, 1);
        InputHandler::handle_key_event(&mut app, KeyCode::Down, KeyModifiers::NONE);
        assert_eq!(app.selected_row, 1);

        InputHandler::handle_key_event(&mut app, KeyCode::Right, KeyModifiers::NONE);
        assert_eq!(app.selected_col, 1);
        InputHandler::handle_key_event(&mut app, KeyCode::Right, KeyModifiers::NONE);
        assert_eq!(app.selected_col, 1);
    }

    #[test]
    fn test_help_key_binding() {
        let mut app = App::default();

        InputHandler::handle_key_event(&mut app, KeyCode::Char('?'), KeyModifiers::NONE);
        assert!(matches!(app.mode, AppMode::Help));

        InputHandler::handle_key_event(&mut app, KeyCode::Esc, KeyModifiers::NONE);
        assert!(matches!(app.mode, AppMode::Normal));
    }
}
