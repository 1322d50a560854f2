//! Text input line (bottom row).
//!
//! The `LineEditor` holds the text being typed and is the only copy of it:
//! the panel draws from the editor, and `take_text` drains it. Supports
//! full UTF-8 input; the cursor moves by characters and is placed by
//! display width, so wide characters take two cells.

use crate::ui::region::Region;
use crate::ui::surface::Surface;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::buffer::Buffer;
use ratatui::layout::Position;
use ratatui::style::Style;
use unicode_width::UnicodeWidthStr;

/// A single-line text buffer with a cursor.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct LineEditor {
    text: String,
    /// Byte offset into `text`, always on a char boundary.
    cursor: usize,
}

impl LineEditor {
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Cursor position in terminal columns from the start of the line.
    pub fn cursor_column(&self) -> usize {
        self.text[..self.cursor].width()
    }

    pub fn insert(&mut self, ch: char) {
        self.text.insert(self.cursor, ch);
        self.cursor += ch.len_utf8();
    }

    /// Deletes the character before the cursor.
    pub fn backspace(&mut self) {
        if let Some(prev) = self.prev_boundary() {
            self.text.drain(prev..self.cursor);
            self.cursor = prev;
        }
    }

    /// Deletes the character under the cursor.
    pub fn delete(&mut self) {
        if let Some(next) = self.next_boundary() {
            self.text.drain(self.cursor..next);
        }
    }

    pub fn left(&mut self) {
        if let Some(prev) = self.prev_boundary() {
            self.cursor = prev;
        }
    }

    pub fn right(&mut self) {
        if let Some(next) = self.next_boundary() {
            self.cursor = next;
        }
    }

    pub fn home(&mut self) {
        self.cursor = 0;
    }

    pub fn end(&mut self) {
        self.cursor = self.text.len();
    }

    /// Returns the text and leaves the editor empty.
    pub fn take(&mut self) -> String {
        self.cursor = 0;
        std::mem::take(&mut self.text)
    }

    /// Applies a key press. Returns `false` for keys the editor ignores.
    pub fn handle_key(&mut self, key: &KeyEvent) -> bool {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Char('a') if ctrl => self.home(),
            KeyCode::Char('e') if ctrl => self.end(),
            KeyCode::Char(_) if ctrl || key.modifiers.contains(KeyModifiers::ALT) => return false,
            KeyCode::Char(ch) => self.insert(ch),
            KeyCode::Backspace => self.backspace(),
            KeyCode::Delete => self.delete(),
            KeyCode::Left => self.left(),
            KeyCode::Right => self.right(),
            KeyCode::Home => self.home(),
            KeyCode::End => self.end(),
            _ => return false,
        }
        true
    }

    fn prev_boundary(&self) -> Option<usize> {
        self.text[..self.cursor]
            .char_indices()
            .next_back()
            .map(|(idx, _)| idx)
    }

    fn next_boundary(&self) -> Option<usize> {
        self.text[self.cursor..]
            .chars()
            .next()
            .map(|c| self.cursor + c.len_utf8())
    }
}

/// The input panel: a one-row surface showing the editor's text.
pub struct InputLine {
    surface: Surface,
    editor: LineEditor,
}

impl InputLine {
    pub fn new(region: Region) -> Self {
        Self {
            surface: Surface::new(&region),
            editor: LineEditor::default(),
        }
    }

    /// Rebinds to `region` with a blank display. The typed text survives.
    pub fn resize(&mut self, region: Region) {
        self.surface = Surface::new(&region);
    }

    pub fn insert_char(&mut self, ch: char) {
        self.editor.insert(ch);
    }

    /// Forwards a raw key press to the editor.
    pub fn handle_key(&mut self, key: &KeyEvent) -> bool {
        self.editor.handle_key(key)
    }

    /// The text typed so far.
    pub fn text(&self) -> &str {
        self.editor.text()
    }

    /// Returns the typed text and empties the editor. A second call with no
    /// typing in between returns an empty string.
    pub fn take_text(&mut self) -> String {
        self.editor.take()
    }

    /// Blanks the display. The editor's text is not touched.
    pub fn clear(&mut self) {
        self.surface.clear();
    }

    /// Draws the part of the text that fits, scrolled horizontally so the
    /// cursor stays inside the panel.
    pub fn repaint(&mut self) {
        let (start, _) = self.window();
        let visible = &self.editor.text()[start..];

        self.surface.clear();
        self.surface.put_str(0, 0, visible, Style::default());
    }

    /// Absolute terminal position of the text cursor.
    pub fn cursor_position(&self) -> Position {
        let (_, column) = self.window();
        let area = self.surface.area();
        Position::new(area.x + column, area.y)
    }

    /// Copies the panel into the backing surface for the next flush.
    pub fn refresh(&self, backing: &mut Buffer) {
        self.surface.copy_into(backing);
    }

    pub fn surface(&self) -> &Surface {
        &self.surface
    }

    /// Byte offset of the first visible character and the cursor's column
    /// inside the panel. The cursor's cell always lies inside the panel.
    fn window(&self) -> (usize, u16) {
        let width = usize::from(self.surface.width()).max(1);
        let column = self.editor.cursor_column();
        if column < width {
            return (0, column as u16);
        }

        let text = self.editor.text();
        let cursor = self.editor.cursor;
        let mut start = 0;
        while text[start..cursor].width() >= width {
            match text[start..].chars().next() {
                Some(ch) => start += ch.len_utf8(),
                None => break,
            }
        }
        let column = text[start..cursor].width();
        (start, u16::try_from(column).unwrap_or(u16::MAX))
    }
}
