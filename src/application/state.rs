//! Application state management for the terminal CSV manager.
//!
//! This module contains the main application state and mode management
//! for the terminal user interface.

use crate::domain::Document;

/// Represents the current mode of the application.
///
/// The application can be in different modes that determine how user input
/// is interpreted and what UI elements are displayed.
#[derive(Debug)]
pub enum AppMode {
    /// Normal navigation mode - arrow keys move selection, shortcuts available
    Normal,
    /// A row is being edited in place
    Editing,
    /// Help screen is displayed
    Help,
    /// Open dialog for a delimited text file
    OpenFile,
    /// Export dialog for delimited text output
    ExportFile,
    /// Save dialog for the native table format
    SaveTable,
    /// Load dialog for the native table format
    LoadTable,
}

/// Main application state containing the document and UI state.
///
/// This structure holds all the data needed to render the terminal UI
/// and manage user interactions with the loaded table. Editing state is
/// kept here, never on the document itself: the document stays a pure
/// value while `editing_row` marks the single row currently in edit.
///
/// # Examples
///
/// ```
/// use csvman::application::App;
///
/// let app = App::default();
/// assert_eq!(app.selected_row, 0);
/// assert!(app.editing_row.is_none());
/// ```
#[derive(Debug)]
pub struct App {
    /// The loaded table
    pub document: Document,
    /// Currently selected row (zero-based)
    pub selected_row: usize,
    /// Currently selected column (zero-based)
    pub selected_col: usize,
    /// Top-most row visible in the viewport
    pub scroll_row: usize,
    /// Left-most column visible in the viewport
    pub scroll_col: usize,
    /// Current application mode
    pub mode: AppMode,
    /// The single row currently being edited, if any
    pub editing_row: Option<usize>,
    /// Cursor position within the edited cell or filename input
    pub cursor_position: usize,
    /// Current filename (if a file has been opened/saved)
    pub filename: Option<String>,
    /// Input buffer for filename entry
    pub filename_input: String,
    /// Temporary status message to display
    pub status_message: Option<String>,
    /// Scroll position in help text
    pub help_scroll: usize,
    /// Viewport height in rows (for scrolling calculations)
    pub viewport_rows: usize,
    /// Viewport width in columns (for scrolling calculations)
    pub viewport_cols: usize,
}

impl Default for App {
    fn default() -> Self {
        Self {
            document: Document::default(),
            selected_row: 0,
            selected_col: 0,
            scroll_row: 0,
            scroll_col: 0,
            mode: AppMode::Normal,
            editing_row: None,
            cursor_position: 0,
            filename: None,
            filename_input: String::new(),
            status_message: None,
            help_scroll: 0,
            viewport_rows: 20,
            viewport_cols: 8,
        }
    }
}

impl App {
    /// Switches to editing mode for the currently selected row.
    ///
    /// Records the row index as the single editing marker and positions
    /// the text cursor at the end of the selected cell. Does nothing when
    /// no row is selected (empty table).
    pub fn start_editing(&mut self) {
        if self.selected_row >= self.document.row_count() {
            return;
        }
        self.mode = AppMode::Editing;
        self.editing_row = Some(self.selected_row);
        self.cursor_position = self.current_cell().len();
        self.status_message = None;
    }

    /// Completes editing and returns to normal mode.
    ///
    /// Cell values were already committed as they were typed, so this
    /// performs no data mutation - it purely clears the editing marker.
    /// There is no cancel transition: leaving the editing state by any
    /// path preserves the typed values.
    pub fn finish_editing(&mut self) {
        self.mode = AppMode::Normal;
        self.editing_row = None;
        self.cursor_position = 0;
        self.status_message = Some("Changes saved".to_string());
    }

    /// Inserts a character into the edited cell at the cursor.
    ///
    /// The change is committed to the document immediately.
    pub fn edit_insert_char(&mut self, c: char) {
        let Some(row) = self.editing_row else { return };
        let mut value = self.current_cell();
        self.cursor_position = self.cursor_position.min(value.len());
        value.insert(self.cursor_position, c);
        if self.document.set_cell(row, self.selected_col, value).is_ok() {
            self.cursor_position += c.len_utf8();
        }
    }

    /// Removes the character before the cursor from the edited cell.
    pub fn edit_backspace(&mut self) {
        let Some(row) = self.editing_row else { return };
        let mut value = self.current_cell();
        let end = self.cursor_position.min(value.len());
        let Some(prev) = value[..end].chars().next_back() else {
            return;
        };
        let at = end - prev.len_utf8();
        value.remove(at);
        if self.document.set_cell(row, self.selected_col, value).is_ok() {
            self.cursor_position = at;
        }
    }

    /// Removes the character under the cursor from the edited cell.
    pub fn edit_delete(&mut self) {
        let Some(row) = self.editing_row else { return };
        let mut value = self.current_cell();
        if self.cursor_position < value.len() {
            value.remove(self.cursor_position);
            let _ = self.document.set_cell(row, self.selected_col, value);
        }
    }

    pub fn edit_cursor_left(&mut self) {
        let value = self.current_cell();
        let end = self.cursor_position.min(value.len());
        if let Some(prev) = value[..end].chars().next_back() {
            self.cursor_position = end - prev.len_utf8();
        }
    }

    pub fn edit_cursor_right(&mut self) {
        let value = self.current_cell();
        let at = self.cursor_position.min(value.len());
        if let Some(next) = value[at..].chars().next() {
            self.cursor_position = at + next.len_utf8();
        }
    }

    pub fn edit_cursor_home(&mut self) {
        self.cursor_position = 0;
    }

    pub fn edit_cursor_end(&mut self) {
        self.cursor_position = self.current_cell().len();
    }

    /// Moves editing to the next cell of the row, wrapping at the end.
    pub fn edit_next_cell(&mut self) {
        let cols = self.document.column_count();
        if cols == 0 {
            return;
        }
        self.selected_col = (self.selected_col + 1) % cols;
        self.cursor_position = self.current_cell().len();
        self.ensure_cursor_visible();
    }

    /// Moves editing to the previous cell of the row, wrapping at the start.
    pub fn edit_prev_cell(&mut self) {
        let cols = self.document.column_count();
        if cols == 0 {
            return;
        }
        self.selected_col = (self.selected_col + cols - 1) % cols;
        self.cursor_position = self.current_cell().len();
        self.ensure_cursor_visible();
    }

    fn current_cell(&self) -> String {
        let row = self.editing_row.unwrap_or(self.selected_row);
        self.document.get_cell(row, self.selected_col).to_string()
    }

    /// Appends an empty row and moves the selection onto it.
    pub fn add_row(&mut self) {
        if self.document.is_empty() {
            self.status_message = Some("No table loaded".to_string());
            return;
        }
        self.document.add_row();
        self.selected_row = self.document.row_count() - 1;
        self.ensure_cursor_visible();
        self.status_message = Some("Row added".to_string());
    }

    /// Deletes the currently selected row.
    ///
    /// Out-of-range selections (empty table) report a failure and leave
    /// the document untouched.
    pub fn delete_selected_row(&mut self) {
        match self.document.delete_row(self.selected_row) {
            Ok(()) => {
                if self.selected_row > 0 && self.selected_row >= self.document.row_count() {
                    self.selected_row -= 1;
                }
                self.status_message = Some("Row deleted".to_string());
            }
            Err(error) => {
                self.status_message = Some(format!("Delete failed: {}", error));
            }
        }
    }

    /// Switches to the open-file dialog.
    ///
    /// Initializes the filename input with the current filename or default.
    pub fn start_open_file(&mut self) {
        self.mode = AppMode::OpenFile;
        self.filename_input = self.filename.clone().unwrap_or_else(|| "data.csv".to_string());
        self.cursor_position = self.filename_input.len();
        self.status_message = None;
    }

    /// Gets the filename to use for opening a file.
    pub fn get_open_filename(&self) -> String {
        if self.filename_input.is_empty() {
            "data.csv".to_string()
        } else {
            self.filename_input.clone()
        }
    }

    /// Processes the result of an open operation.
    ///
    /// On success the previous document is discarded wholesale, the view
    /// is reset, and any editing state is cleared. On failure the prior
    /// document remains visible and editable.
    ///
    /// # Arguments
    ///
    /// * `result` - Result of the open operation (document and filename, or error)
    pub fn set_open_result(&mut self, result: Result<(Document, String), String>) {
        match result {
            Ok((document, filename)) => {
                self.document = document;
                self.filename = Some(filename.clone());
                self.selected_row = 0;
                self.selected_col = 0;
                self.scroll_row = 0;
                self.scroll_col = 0;
                self.editing_row = None;
                self.status_message = Some(format!("Opened {}", filename));
            }
            Err(error) => {
                self.status_message = Some(format!("Open failed: {}", error));
            }
        }

        self.mode = AppMode::Normal;
        self.filename_input.clear();
        self.cursor_position = 0;
    }

    /// Switches to the export dialog.
    pub fn start_export(&mut self) {
        self.mode = AppMode::ExportFile;
        self.filename_input = "exported_data.csv".to_string();
        self.cursor_position = self.filename_input.len();
        self.status_message = None;
    }

    /// Gets the filename to use for export.
    pub fn get_export_filename(&self) -> String {
        if self.filename_input.is_empty() {
            "exported_data.csv".to_string()
        } else {
            self.filename_input.clone()
        }
    }

    /// Processes the result of an export operation.
    ///
    /// # Arguments
    ///
    /// * `result` - Result of the export operation (filename or error message)
    pub fn set_export_result(&mut self, result: Result<String, String>) {
        match result {
            Ok(filename) => {
                self.status_message = Some(format!("Exported to {}", filename));
            }
            Err(error) => {
                self.status_message = Some(format!("Export failed: {}", error));
            }
        }

        self.mode = AppMode::Normal;
        self.filename_input.clear();
        self.cursor_position = 0;
    }

    /// Switches to the save-table dialog for the native format.
    pub fn start_save_table(&mut self) {
        self.mode = AppMode::SaveTable;
        self.filename_input = "table.json".to_string();
        self.cursor_position = self.filename_input.len();
        self.status_message = None;
    }

    /// Gets the filename to use for saving the table.
    pub fn get_save_filename(&self) -> String {
        if self.filename_input.is_empty() {
            "table.json".to_string()
        } else {
            self.filename_input.clone()
        }
    }

    /// Processes the result of a native save operation.
    ///
    /// # Arguments
    ///
    /// * `result` - Result of the save operation (filename or error message)
    pub fn set_save_result(&mut self, result: Result<String, String>) {
        match result {
            Ok(filename) => {
                self.filename = Some(filename.clone());
                self.status_message = Some(format!("Saved to {}", filename));
            }
            Err(error) => {
                self.status_message = Some(format!("Save failed: {}", error));
            }
        }

        self.mode = AppMode::Normal;
        self.filename_input.clear();
        self.cursor_position = 0;
    }

    /// Switches to the load-table dialog for the native format.
    pub fn start_load_table(&mut self) {
        self.mode = AppMode::LoadTable;
        self.filename_input = "table.json".to_string();
        self.cursor_position = self.filename_input.len();
        self.status_message = None;
    }

    /// Gets the filename to use for loading the table.
    pub fn get_load_filename(&self) -> String {
        if self.filename_input.is_empty() {
            "table.json".to_string()
        } else {
            self.filename_input.clone()
        }
    }

    /// Processes the result of a native load operation.
    ///
    /// Replaces the document wholesale and resets the view on success.
    ///
    /// # Arguments
    ///
    /// * `result` - Result of the load operation (document and filename, or error)
    pub fn set_load_result(&mut self, result: Result<(Document, String), String>) {
        match result {
            Ok((document, filename)) => {
                self.document = document;
                self.filename = Some(filename.clone());
                self.selected_row = 0;
                self.selected_col = 0;
                self.scroll_row = 0;
                self.scroll_col = 0;
                self.editing_row = None;
                self.status_message = Some(format!("Loaded from {}", filename));
            }
            Err(error) => {
                self.status_message = Some(format!("Load failed: {}", error));
            }
        }

        self.mode = AppMode::Normal;
        self.filename_input.clear();
        self.cursor_position = 0;
    }

    /// Cancels filename input and returns to normal mode.
    pub fn cancel_filename_input(&mut self) {
        self.mode = AppMode::Normal;
        self.filename_input.clear();
        self.cursor_position = 0;
    }

    /// Updates the viewport size for proper scrolling calculations.
    pub fn update_viewport_size(&mut self, rows: usize, cols: usize) {
        self.viewport_rows = rows;
        self.viewport_cols = cols;
    }

    /// Ensures the selected cell is visible by adjusting scroll position.
    pub fn ensure_cursor_visible(&mut self) {
        if self.selected_row < self.scroll_row {
            self.scroll_row = self.selected_row;
        } else if self.viewport_rows > 0
            && self.selected_row >= self.scroll_row + self.viewport_rows
        {
            self.scroll_row = self.selected_row.saturating_sub(self.viewport_rows - 1);
        }

        if self.selected_col < self.scroll_col {
            self.scroll_col = self.selected_col;
        } else if self.viewport_cols > 0
            && self.selected_col >= self.scroll_col + self.viewport_cols
        {
            self.scroll_col = self.selected_col.saturating_sub(self.viewport_cols - 1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::TableCodec;

    fn app_with_table() -> App {
        let mut app = App::default();
        app.document = TableCodec::parse("a,b\n1,2\n3,4");
        app
    }

    #[test]
    fn test_app_default() {
        let app = App::default();
        assert_eq!(app.selected_row, 0);
        assert_eq!(app.selected_col, 0);
        assert_eq!(app.scroll_row, 0);
        assert_eq!(app.scroll_col, 0);
        assert!(matches!(app.mode, AppMode::Normal));
        assert!(app.editing_row.is_none());
        assert_eq!(app.cursor_position, 0);
        assert!(app.filename.is_none());
        assert!(app.filename_input.is_empty());
        assert!(app.status_message.is_none());
        assert!(app.document.is_empty());
    }

    #[test]
    fn test_start_editing_records_row_index() {
        let mut app = app_with_table();
        app.selected_row = 1;
        app.start_editing();

        assert!(matches!(app.mode, AppMode::Editing));
        assert_eq!(app.editing_row, Some(1));
        assert_eq!(app.cursor_position, 1); // End of "3"
    }

    #[test]
    fn test_start_editing_empty_table_is_noop() {
        let mut app = App::default();
        app.start_editing();

        assert!(matches!(app.mode, AppMode::Normal));
        assert!(app.editing_row.is_none());
    }

    #[test]
    fn test_keystrokes_commit_eagerly() {
        let mut app = app_with_table();
        app.start_editing();
        app.edit_insert_char('x');

        // Still editing, but the document already holds the typed value.
        assert!(matches!(app.mode, AppMode::Editing));
        assert_eq!(app.document.get_cell(0, 0), "1x");
    }

    #[test]
    fn test_finish_editing_mutates_no_data() {
        let mut app = app_with_table();
        app.start_editing();
        app.edit_insert_char('x');
        let before = app.document.clone();

        app.finish_editing();

        assert!(matches!(app.mode, AppMode::Normal));
        assert!(app.editing_row.is_none());
        assert_eq!(app.cursor_position, 0);
        assert_eq!(app.document, before);
        assert_eq!(app.status_message.as_deref(), Some("Changes saved"));
    }

    #[test]
    fn test_no_cancel_transition_preserves_typed_values() {
        let mut app = app_with_table();
        app.start_editing();
        app.edit_insert_char('!');
        app.finish_editing();

        // Leaving the editing state keeps the eagerly committed value.
        assert_eq!(app.document.get_cell(0, 0), "1!");
    }

    #[test]
    fn test_edit_backspace_and_delete() {
        let mut app = app_with_table();
        app.document.set_cell(0, 0, "abc".to_string()).unwrap();
        app.start_editing();
        assert_eq!(app.cursor_position, 3);

        app.edit_backspace();
        assert_eq!(app.document.get_cell(0, 0), "ab");
        assert_eq!(app.cursor_position, 2);

        app.edit_cursor_home();
        app.edit_delete();
        assert_eq!(app.document.get_cell(0, 0), "b");
        assert_eq!(app.cursor_position, 0);
    }

    #[test]
    fn test_edit_cursor_movement() {
        let mut app = app_with_table();
        app.document.set_cell(0, 0, "ab".to_string()).unwrap();
        app.start_editing();

        app.edit_cursor_left();
        assert_eq!(app.cursor_position, 1);
        app.edit_cursor_left();
        assert_eq!(app.cursor_position, 0);
        app.edit_cursor_left();
        assert_eq!(app.cursor_position, 0);
        app.edit_cursor_right();
        assert_eq!(app.cursor_position, 1);
        app.edit_cursor_end();
        assert_eq!(app.cursor_position, 2);
    }

    #[test]
    fn test_edit_next_cell_wraps_within_row() {
        let mut app = app_with_table();
        app.start_editing();
        assert_eq!(app.selected_col, 0);

        app.edit_next_cell();
        assert_eq!(app.selected_col, 1);
        assert_eq!(app.cursor_position, 1); // End of "2"

        app.edit_next_cell();
        assert_eq!(app.selected_col, 0);

        app.edit_prev_cell();
        assert_eq!(app.selected_col, 1);
        // The edited row never changed.
        assert_eq!(app.editing_row, Some(0));
    }

    #[test]
    fn test_add_row() {
        let mut app = app_with_table();
        app.add_row();

        assert_eq!(app.document.row_count(), 3);
        assert_eq!(app.document.rows[2], vec!["".to_string(), "".to_string()]);
        assert_eq!(app.selected_row, 2);
        assert_eq!(app.status_message.as_deref(), Some("Row added"));
    }

    #[test]
    fn test_add_row_without_table() {
        let mut app = App::default();
        app.add_row();

        assert_eq!(app.document.row_count(), 0);
        assert_eq!(app.status_message.as_deref(), Some("No table loaded"));
    }

    #[test]
    fn test_delete_selected_row() {
        let mut app = app_with_table();
        app.delete_selected_row();

        assert_eq!(app.document.rows, vec![vec!["3".to_string(), "4".to_string()]]);
        assert_eq!(app.status_message.as_deref(), Some("Row deleted"));
    }

    #[test]
    fn test_delete_last_row_clamps_selection() {
        let mut app = app_with_table();
        app.selected_row = 1;
        app.delete_selected_row();

        assert_eq!(app.document.row_count(), 1);
        assert_eq!(app.selected_row, 0);
    }

    #[test]
    fn test_delete_row_out_of_range_reports_failure() {
        let mut app = App::default();
        app.delete_selected_row();

        assert!(app.status_message.unwrap().contains("Delete failed"));
    }

    #[test]
    fn test_start_open_file() {
        let mut app = App::default();
        app.start_open_file();

        assert!(matches!(app.mode, AppMode::OpenFile));
        assert_eq!(app.filename_input, "data.csv");
        assert_eq!(app.cursor_position, "data.csv".len());
        assert!(app.status_message.is_none());
    }

    #[test]
    fn test_start_open_file_with_existing_filename() {
        let mut app = App::default();
        app.filename = Some("people.csv".to_string());
        app.start_open_file();

        assert_eq!(app.filename_input, "people.csv");
    }

    #[test]
    fn test_set_open_result_success_replaces_document() {
        let mut app = app_with_table();
        app.selected_row = 1;
        app.selected_col = 1;
        app.scroll_row = 1;
        app.start_editing();
        app.start_open_file();

        let document = TableCodec::parse("x\n9");
        app.set_open_result(Ok((document, "other.csv".to_string())));

        assert!(matches!(app.mode, AppMode::Normal));
        assert_eq!(app.filename.as_deref(), Some("other.csv"));
        assert_eq!(app.document.headers, vec!["x"]);
        assert_eq!(app.selected_row, 0);
        assert_eq!(app.selected_col, 0);
        assert_eq!(app.scroll_row, 0);
        assert!(app.editing_row.is_none());
        assert!(app.status_message.unwrap().contains("Opened other.csv"));
        assert!(app.filename_input.is_empty());
    }

    #[test]
    fn test_set_open_result_failure_keeps_document() {
        let mut app = app_with_table();
        let before = app.document.clone();
        app.start_open_file();

        app.set_open_result(Err("No such file".to_string()));

        assert!(matches!(app.mode, AppMode::Normal));
        assert_eq!(app.document, before);
        assert!(app.filename.is_none());
        assert!(app.status_message.unwrap().contains("Open failed: No such file"));
    }

    #[test]
    fn test_export_filename_defaults() {
        let mut app = app_with_table();
        app.start_export();

        assert!(matches!(app.mode, AppMode::ExportFile));
        assert_eq!(app.filename_input, "exported_data.csv");
        assert_eq!(app.get_export_filename(), "exported_data.csv");

        app.filename_input = "out.csv".to_string();
        assert_eq!(app.get_export_filename(), "out.csv");

        app.filename_input.clear();
        assert_eq!(app.get_export_filename(), "exported_data.csv");
    }

    #[test]
    fn test_set_export_result() {
        let mut app = app_with_table();
        app.start_export();
        app.set_export_result(Ok("exported_data.csv".to_string()));

        assert!(matches!(app.mode, AppMode::Normal));
        assert!(app.status_message.as_ref().unwrap().contains("Exported to exported_data.csv"));

        app.start_export();
        app.set_export_result(Err("Permission denied".to_string()));
        assert!(app.status_message.unwrap().contains("Export failed: Permission denied"));
    }

    #[test]
    fn test_save_and_load_table_dialogs() {
        let mut app = app_with_table();
        app.start_save_table();
        assert!(matches!(app.mode, AppMode::SaveTable));
        assert_eq!(app.get_save_filename(), "table.json");

        app.set_save_result(Ok("table.json".to_string()));
        assert!(matches!(app.mode, AppMode::Normal));
        assert_eq!(app.filename.as_deref(), Some("table.json"));
        assert!(app.status_message.as_ref().unwrap().contains("Saved to table.json"));

        app.start_load_table();
        assert!(matches!(app.mode, AppMode::LoadTable));
        assert_eq!(app.get_load_filename(), "table.json");

        let document = TableCodec::parse("h\nv");
        app.set_load_result(Ok((document, "table.json".to_string())));
        assert_eq!(app.document.headers, vec!["h"]);
        assert!(app.status_message.unwrap().contains("Loaded from table.json"));
    }

    #[test]
    fn test_set_load_result_failure() {
        let mut app = app_with_table();
        let before = app.document.clone();
        app.start_load_table();
        app.set_load_result(Err("Invalid file format".to_string()));

        assert_eq!(app.document, before);
        assert!(app.status_message.unwrap().contains("Load failed"));
    }

    #[test]
    fn test_cancel_filename_input() {
        let mut app = App::default();
        app.start_open_file();
        app.cancel_filename_input();

        assert!(matches!(app.mode, AppMode::Normal));
        assert!(app.filename_input.is_empty());
        assert_eq!(app.cursor_position, 0);
    }

    #[test]
    fn test_mode_transitions() {
        let mut app = app_with_table();

        assert!(matches!(app.mode, AppMode::Normal));
        app.start_editing();
        assert!(matches!(app.mode, AppMode::Editing));
        app.finish_editing();
        assert!(matches!(app.mode, AppMode::Normal));

        app.start_export();
        assert!(matches!(app.mode, AppMode::ExportFile));
        app.cancel_filename_input();
        assert!(matches!(app.mode, AppMode::Normal));

        app.start_save_table();
        assert!(matches!(app.mode, AppMode::SaveTable));
        app.cancel_filename_input();
        assert!(matches!(app.mode, AppMode::Normal));
    }

    #[test]
    fn test_viewport_and_scrolling() {
        let mut app = App::default();
        app.update_viewport_size(15, 10);
        assert_eq!(app.viewport_rows, 15);
        assert_eq!(app.viewport_cols, 10);

        app.selected_row = 5;
        app.selected_col = 3;
        app.ensure_cursor_visible();
        assert_eq!(app.scroll_row, 0);
        assert_eq!(app.scroll_col, 0);

        app.selected_row = 20;
        app.selected_col = 12;
        app.ensure_cursor_visible();
        assert_eq!(app.scroll_row, 6);
        assert_eq!(app.scroll_col, 3);

        app.selected_row = 2;
        app.selected_col = 1;
        app.ensure_cursor_visible();
        assert_eq!(app.scroll_row, 2);
        assert_eq!(app.scroll_col, 1);
    }

    #[test]
    fn test_status_message_handling() {
        let mut app = app_with_table();
        assert!(app.status_message.is_none());

        app.add_row();
        assert!(app.status_message.is_some());

        // Opening a dialog clears the previous message.
        app.start_export();
        assert!(app.status_message.is_none());

        app.set_export_result(Err("disk full".to_string()));
        assert!(app.status_message.is_some());
    }
}
