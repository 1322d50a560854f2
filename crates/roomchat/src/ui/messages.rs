//! Message log (left side, below the topic).
//!
//! ```text
//! [10:30:02] *alice has joined the room*
//! [10:30:15] <alice> hola, como estas?
//! [10:31:40] <bob> bien! aqui trabajando en algo
//!            que no cabe en una sola linea
//! ```
//!
//! Each room gets its own scrolling surface, created the first time the
//! room is seen. New lines are pushed at the bottom and older rows scroll
//! off the top. Resizing rebuilds every surface empty; the history lives in
//! the `Room`, and `redraw_all` replays it.

use crate::ui::palette::Palette;
use crate::ui::region::Region;
use crate::ui::surface::Surface;
use ratatui::buffer::Buffer;
use ratatui::text::{Line, Span};
use roomchat_core::types::{LogLine, Room};
use roomchat_core::wrap::wrap_columns;
use std::collections::HashMap;
use std::ops::Range;
use tracing::debug;

pub struct MessageLog {
    region: Region,
    /// One surface per room name. Names are unique; asking for an existing
    /// name returns the existing surface.
    rooms: HashMap<String, Surface>,
}

impl MessageLog {
    pub fn new(region: Region) -> Self {
        Self {
            region,
            rooms: HashMap::new(),
        }
    }

    /// Returns the surface for `name`, creating it if this is the first
    /// time the room is seen.
    pub fn ensure_room(&mut self, name: &str) -> &mut Surface {
        let region = self.region;
        self.rooms.entry(name.to_string()).or_insert_with(|| {
            debug!(room = name, "created message log surface");
            Surface::new(&region)
        })
    }

    /// Formats `line`, wraps it to the panel width in terminal columns, and
    /// pushes the rows at the bottom of the room's surface.
    pub fn append_line(&mut self, room: &Room, line: &LogLine, palette: &Palette) {
        let formatted = format_line(room, line, palette);
        let surface = self.ensure_room(&room.name);
        let plain = plain_text(&formatted);

        for range in wrap_columns(&plain, usize::from(surface.width())) {
            surface.push_row(&slice_line(&formatted, range));
        }
    }

    /// Clears the room's surface, homes the cursor, and replays the room's
    /// history.
    pub fn redraw_all(&mut self, room: &Room, palette: &Palette) {
        let height = usize::from(self.region.height());
        let surface = self.ensure_room(&room.name);
        surface.clear();
        surface.move_to(0);

        // Every line takes at least one row, so anything older than the last
        // `height` lines would be scrolled off anyway.
        let skip = room.lines.len().saturating_sub(height);
        for line in &room.lines[skip..] {
            self.append_line(room, line, palette);
        }
    }

    /// Rebinds every room surface to `region`, discarding their content.
    /// Callers must `redraw_all` the rooms they want to show.
    pub fn resize(&mut self, region: Region) {
        self.region = region;
        for surface in self.rooms.values_mut() {
            *surface = Surface::new(&region);
        }
    }

    /// Copies the room's surface into the backing surface for the next
    /// flush. Unknown rooms are ignored.
    pub fn refresh(&self, room_name: &str, backing: &mut Buffer) {
        match self.rooms.get(room_name) {
            Some(surface) => surface.copy_into(backing),
            None => debug!(room = room_name, "refresh for a room with no surface"),
        }
    }

    pub fn room(&self, name: &str) -> Option<&Surface> {
        self.rooms.get(name)
    }

    #[cfg(test)]
    pub fn room_count(&self) -> usize {
        self.rooms.len()
    }

    /// Drops the surface of a room that was closed.
    pub fn remove_room(&mut self, name: &str) -> bool {
        self.rooms.remove(name).is_some()
    }
}

/// Formats a log line as `[HH:MM:SS] *text*` (notice) or
/// `[HH:MM:SS] <speaker> text` (message). The `<speaker>` span is colored
/// with the speaker's nick color, or the fallback when the speaker is not
/// in the room.
pub fn format_line(room: &Room, line: &LogLine, palette: &Palette) -> Line<'static> {
    match line {
        LogLine::Notice { timestamp, text } => {
            Line::from(format!("[{timestamp}] *{}*", single_line(text)))
        }
        LogLine::Message {
            timestamp,
            speaker,
            text,
        } => {
            let color = room.participant(speaker).map(|p| p.color);
            Line::from(vec![
                Span::raw(format!("[{timestamp}] ")),
                Span::styled(format!("<{speaker}>"), palette.nick_style(color)),
                Span::raw(format!(" {}", single_line(text))),
            ])
        }
    }
}

/// Control characters would corrupt the cell grid.
fn single_line(text: &str) -> String {
    text.chars()
        .map(|c| if c.is_control() { ' ' } else { c })
        .collect()
}

fn plain_text(line: &Line<'_>) -> String {
    line.spans.iter().map(|span| span.content.as_ref()).collect()
}

/// The part of `line` covering the byte range `range` of its plain text,
/// with span styles preserved.
fn slice_line(line: &Line<'static>, range: Range<usize>) -> Line<'static> {
    let mut spans = Vec::new();
    let mut offset = 0;

    for span in &line.spans {
        let content = span.content.as_ref();
        let span_range = offset..offset + content.len();
        offset = span_range.end;

        let start = range.start.max(span_range.start);
        let end = range.end.min(span_range.end);
        if start < end {
            let piece = &content[start - span_range.start..end - span_range.start];
            spans.push(Span::styled(piece.to_string(), span.style));
        }
    }

    Line::from(spans).style(line.style)
}
