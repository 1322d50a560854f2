//! Single-line bars: the topic at the top and the status line above the
//! input.

use crate::ui::palette::Palette;
use crate::ui::region::Region;
use crate::ui::surface::Surface;
use ratatui::buffer::Buffer;
use unicode_width::UnicodeWidthStr;

/// One row of left-aligned text on a solid background.
pub struct InfoBar {
    surface: Surface,
}

impl InfoBar {
    pub fn new(region: Region) -> Self {
        Self {
            surface: Surface::new(&region),
        }
    }

    /// Rebinds the bar to `region`. Previous content is discarded.
    pub fn resize(&mut self, region: Region) {
        self.surface = Surface::new(&region);
    }

    /// Writes `text` padded with spaces to the full width, all in the bar
    /// style. Width is measured in terminal columns. Text at least as wide
    /// as the bar gets no padding and is clipped at the right edge.
    pub fn repaint(&mut self, text: &str, palette: &Palette) {
        let width = usize::from(self.surface.width());
        let len = text.width();
        let padded = if len < width {
            format!("{text}{}", " ".repeat(width - len))
        } else {
            text.to_string()
        };

        self.surface.clear();
        self.surface.put_str(0, 0, &padded, palette.bar_style());
        self.surface.fill_row(0, palette.bar_style());
    }

    /// Copies the bar into the backing surface for the next flush.
    pub fn refresh(&self, backing: &mut Buffer) {
        self.surface.copy_into(backing);
    }

    pub fn surface(&self) -> &Surface {
        &self.surface
    }
}
