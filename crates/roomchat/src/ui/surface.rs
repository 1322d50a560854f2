//! Per-panel drawing surface.
//!
//! A `Surface` is a ratatui `Buffer` whose area is the panel's absolute
//! rectangle, so it lines up cell for cell with the backing surface the
//! screen flushes. Panels draw into their surface; `copy_into` transfers
//! the cells to the backing surface when the panel is refreshed.
//!
//! Coordinates passed to the drawing methods are relative to the panel.

use crate::ui::region::Region;
use ratatui::buffer::{Buffer, Cell};
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::Line;

#[derive(Debug, Clone)]
pub struct Surface {
    buf: Buffer,
    /// Row the next `push_row` writes to.
    cursor_row: u16,
}

impl Surface {
    /// Creates an empty surface covering `region`.
    pub fn new(region: &Region) -> Self {
        Self {
            buf: Buffer::empty(region.rect),
            cursor_row: 0,
        }
    }

    pub fn area(&self) -> Rect {
        self.buf.area
    }

    pub fn height(&self) -> u16 {
        self.buf.area.height
    }

    pub fn width(&self) -> u16 {
        self.buf.area.width
    }

    /// Blanks every cell. The `push_row` cursor stays where it is.
    pub fn clear(&mut self) {
        self.buf.reset();
    }

    /// Moves the `push_row` cursor. Rows past the bottom are clamped.
    pub fn move_to(&mut self, row: u16) {
        self.cursor_row = row.min(self.height());
    }

    pub fn cursor_row(&self) -> u16 {
        self.cursor_row
    }

    /// Writes `text` at (`row`, `col`), clipped at the right edge.
    /// Returns the column after the last written cell.
    pub fn put_str(&mut self, row: u16, col: u16, text: &str, style: Style) -> u16 {
        if row >= self.height() || col >= self.width() {
            return col;
        }
        let area = self.buf.area;
        let max_width = usize::from(self.width() - col);
        let (x, _) = self
            .buf
            .set_stringn(area.x + col, area.y + row, text, max_width, style);
        x - area.x
    }

    /// Writes a styled line at (`row`, `col`), clipped at the right edge.
    pub fn put_line(&mut self, row: u16, col: u16, line: &Line<'_>) -> u16 {
        if row >= self.height() || col >= self.width() {
            return col;
        }
        let area = self.buf.area;
        let (x, _) = self
            .buf
            .set_line(area.x + col, area.y + row, line, self.width() - col);
        x - area.x
    }

    /// Draws a vertical line down the whole height at column `col`.
    pub fn vline(&mut self, col: u16, symbol: &str, style: Style) {
        if col >= self.width() {
            return;
        }
        let area = self.buf.area;
        for row in 0..area.height {
            if let Some(cell) = self.buf.cell_mut((area.x + col, area.y + row)) {
                cell.set_symbol(symbol).set_style(style);
            }
        }
    }

    /// Applies `style` to every cell of `row` without touching the symbols.
    pub fn fill_row(&mut self, row: u16, style: Style) {
        if row >= self.height() {
            return;
        }
        let area = self.buf.area;
        self.buf
            .set_style(Rect::new(area.x, area.y + row, area.width, 1), style);
    }

    /// Writes `line` on the cursor row and advances the cursor. When the
    /// cursor is already past the last row, everything scrolls up one row
    /// first and the line lands on the bottom row.
    pub fn push_row(&mut self, line: &Line<'_>) {
        if self.height() == 0 {
            return;
        }
        if self.cursor_row >= self.height() {
            self.scroll_up();
            self.cursor_row = self.height() - 1;
        }
        self.put_line(self.cursor_row, 0, line);
        self.cursor_row += 1;
    }

    /// Drops the top row and appends a blank one at the bottom.
    pub fn scroll_up(&mut self) {
        let width = usize::from(self.width());
        if width == 0 || self.buf.content.len() < width {
            return;
        }
        self.buf.content.drain(..width);
        self.buf
            .content
            .extend(std::iter::repeat_with(Cell::default).take(width));
    }

    /// Copies every cell of this surface into `backing`, which must cover
    /// the surface's area.
    pub fn copy_into(&self, backing: &mut Buffer) {
        backing.merge(&self.buf);
    }

    /// The cell at (`row`, `col`), relative to the panel.
    #[cfg(test)]
    pub fn cell(&self, row: u16, col: u16) -> Option<&Cell> {
        let area = self.buf.area;
        if row >= area.height || col >= area.width {
            return None;
        }
        self.buf.cell((area.x + col, area.y + row))
    }

    /// The symbols of `row` concatenated, trailing blanks included.
    #[cfg(test)]
    pub fn row_text(&self, row: u16) -> String {
        (0..self.width())
            .filter_map(|col| self.cell(row, col))
            .map(|cell| cell.symbol())
            .collect()
    }
}
