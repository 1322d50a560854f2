//! The whole screen: five panels carved out of one backing surface.
//!
//! ```text
//! +----------------------------------------------------------+
//! | #rust: the topic of the room                              |  topic bar
//! +------------------------------------------------+---------+
//! | [10:30:02] *alice has joined the room*         |alice    |
//! | [10:30:15] <alice> hola                        |bob      |  log | participants
//! |                                                |carol    |
//! +------------------------------------------------+---------+
//! | #rust                                                     |  status bar
//! | hello wor_                                                |  input line
//! +----------------------------------------------------------+
//! ```
//!
//! Panels draw into their own surfaces and `refresh` copies them into the
//! backing surface. `flush` then hands the backing surface to ratatui in a
//! single `Terminal::draw`, which only sends the cells that changed.

use crate::ui::bar::InfoBar;
use crate::ui::error::{RegionName, ScreenError, SizeError};
use crate::ui::input::InputLine;
use crate::ui::messages::MessageLog;
use crate::ui::palette::Palette;
use crate::ui::participants::ParticipantPanel;
use crate::ui::region::Region;
use ratatui::backend::Backend;
use ratatui::buffer::Buffer;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::Terminal;
use roomchat_core::config::{DEFAULT_MIN_HEIGHT, DEFAULT_MIN_WIDTH};
use roomchat_core::types::Room;
use std::io;
use tracing::debug;

/// Where each panel goes for a given terminal size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenLayout {
    pub topic: Rect,
    pub log: Rect,
    pub participants: Rect,
    pub status: Rect,
    pub input: Rect,
}

impl ScreenLayout {
    #[cfg(test)]
    pub fn rects(&self) -> [Rect; 5] {
        [
            self.topic,
            self.log,
            self.participants,
            self.status,
            self.input,
        ]
    }
}

/// Splits a `height` x `width` terminal into the five panels.
///
/// Row 0 is the topic, the last two rows are status and input. The rows in
/// between go to the log and, in the rightmost `width / 7` columns, the
/// participant list.
///
/// # Errors
///
/// `SizeError::Zero` for an empty terminal, `SizeError::TooSmall` when some
/// panel would end up with no cells.
pub fn layout(height: u16, width: u16) -> Result<ScreenLayout, SizeError> {
    check_size(height, width, DEFAULT_MIN_HEIGHT, DEFAULT_MIN_WIDTH)?;

    let area = Rect::new(0, 0, width, height);
    let [topic, body, status, input] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Fill(1),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .areas(area);
    let [log, participants] =
        Layout::horizontal([Constraint::Fill(1), Constraint::Length(width / 7)]).areas(body);

    Ok(ScreenLayout {
        topic,
        log,
        participants,
        status,
        input,
    })
}

fn check_size(height: u16, width: u16, min_height: u16, min_width: u16) -> Result<(), SizeError> {
    if height == 0 || width == 0 {
        return Err(SizeError::Zero { height, width });
    }
    if height < min_height || width < min_width {
        return Err(SizeError::TooSmall {
            height,
            width,
            min_height,
            min_width,
        });
    }
    Ok(())
}

/// The five regions of a layout, checked against the backing surface.
struct Regions {
    topic: Region,
    log: Region,
    participants: Region,
    status: Region,
    input: Region,
}

impl Regions {
    fn carve(area: Rect, layout: &ScreenLayout) -> Result<Self, ScreenError> {
        Ok(Self {
            topic: Region::from_rect(area, RegionName::Topic, layout.topic)?,
            log: Region::from_rect(area, RegionName::Log, layout.log)?,
            participants: Region::from_rect(area, RegionName::Participants, layout.participants)?,
            status: Region::from_rect(area, RegionName::Status, layout.status)?,
            input: Region::from_rect(area, RegionName::Input, layout.input)?,
        })
    }
}

pub struct Screen {
    layout: ScreenLayout,
    /// Full-terminal buffer every panel refreshes into.
    backing: Buffer,
    palette: Palette,
    min_height: u16,
    min_width: u16,
    participants: ParticipantPanel,
    topic: InfoBar,
    log: MessageLog,
    status: InfoBar,
    input: InputLine,
}

impl Screen {
    pub fn new(height: u16, width: u16, palette: Palette) -> Result<Self, ScreenError> {
        Self::with_min_size(height, width, palette, DEFAULT_MIN_HEIGHT, DEFAULT_MIN_WIDTH)
    }

    /// Like `new`, refusing terminals smaller than `min_height` x
    /// `min_width`. Minimums below the built-in ones are raised to them.
    pub fn with_min_size(
        height: u16,
        width: u16,
        palette: Palette,
        min_height: u16,
        min_width: u16,
    ) -> Result<Self, ScreenError> {
        let min_height = min_height.max(DEFAULT_MIN_HEIGHT);
        let min_width = min_width.max(DEFAULT_MIN_WIDTH);
        check_size(height, width, min_height, min_width)?;

        let layout = layout(height, width)?;
        let area = Rect::new(0, 0, width, height);
        let regions = Regions::carve(area, &layout)?;

        Ok(Self {
            layout,
            backing: Buffer::empty(area),
            palette,
            min_height,
            min_width,
            participants: ParticipantPanel::new(regions.participants),
            topic: InfoBar::new(regions.topic),
            log: MessageLog::new(regions.log),
            status: InfoBar::new(regions.status),
            input: InputLine::new(regions.input),
        })
    }

    /// Recomputes the layout and rebuilds every panel for the new size.
    ///
    /// All panel content is discarded; the next `frame` repaints it,
    /// replaying the room's history into the log. On error the screen
    /// keeps its previous layout.
    pub fn resize(&mut self, height: u16, width: u16) -> Result<(), ScreenError> {
        check_size(height, width, self.min_height, self.min_width)?;
        let layout = layout(height, width)?;
        let area = Rect::new(0, 0, width, height);
        let regions = Regions::carve(area, &layout)?;

        self.layout = layout;
        self.backing = Buffer::empty(area);
        self.participants.resize(regions.participants);
        self.topic.resize(regions.topic);
        self.log.resize(regions.log);
        self.status.resize(regions.status);
        self.input.resize(regions.input);

        debug!(height, width, "screen resized");
        Ok(())
    }

    /// Repaints every panel for `room` and refreshes them into the backing
    /// surface, in a fixed order: log, participants, topic, status, input.
    pub fn frame(&mut self, room: &Room) {
        self.log.redraw_all(room, &self.palette);
        self.log.refresh(&room.name, &mut self.backing);

        self.participants.repaint(&room.participants, &self.palette);
        self.participants.refresh(&mut self.backing);

        self.topic.repaint(&room.topic, &self.palette);
        self.topic.refresh(&mut self.backing);

        self.status.repaint(&room.name, &self.palette);
        self.status.refresh(&mut self.backing);

        self.input.repaint();
        self.input.refresh(&mut self.backing);
    }

    /// Sends the backing surface to the terminal in one batched draw and
    /// parks the cursor on the input line.
    pub fn flush<B: Backend>(&self, terminal: &mut Terminal<B>) -> io::Result<()> {
        terminal.draw(|frame| {
            // After the terminal shrinks, the backing surface is stale until
            // the resize event is handled and must not grow the frame.
            let area = frame.area();
            if area.union(self.backing.area) == area {
                frame.buffer_mut().merge(&self.backing);
            }
            frame.set_cursor_position(self.input.cursor_position());
        })?;
        Ok(())
    }

    pub fn layout(&self) -> ScreenLayout {
        self.layout
    }

    pub fn backing(&self) -> &Buffer {
        &self.backing
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    pub fn input(&self) -> &InputLine {
        &self.input
    }

    pub fn input_mut(&mut self) -> &mut InputLine {
        &mut self.input
    }

    pub fn log_mut(&mut self) -> &mut MessageLog {
        &mut self.log
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::backend::TestBackend;
    use ratatui::layout::Position;
    use roomchat_core::types::{LogLine, Participant, Role, Timestamp};

    fn row(buf: &Buffer, y: u16) -> String {
        (buf.area.left()..buf.area.right())
            .map(|x| buf.cell((x, y)).map(|c| c.symbol()).unwrap_or(""))
            .collect()
    }

    fn room() -> Room {
        let mut room = Room::new("#rust");
        room.set_topic("borrowck all the things");
        room.add_participant(Participant::new("alice", Role::Moderator, 0));
        room.add_participant(Participant::new("bob", Role::Visitor, 1));
        room.lines.push(LogLine::Notice {
            timestamp: Timestamp::from_hms(10, 30, 2),
            text: "alice has joined".to_string(),
        });
        room.lines.push(LogLine::Message {
            timestamp: Timestamp::from_hms(9, 5, 1),
            speaker: "alice".to_string(),
            text: "hello".to_string(),
        });
        room
    }

    #[test]
    fn layout_proportions_for_24x70() {
        let l = layout(24, 70).unwrap();
        assert_eq!(l.topic, Rect::new(0, 0, 70, 1));
        assert_eq!(l.log, Rect::new(0, 1, 60, 21));
        assert_eq!(l.participants, Rect::new(60, 1, 10, 21));
        assert_eq!(l.status, Rect::new(0, 22, 70, 1));
        assert_eq!(l.input, Rect::new(0, 23, 70, 1));
    }

    #[test]
    fn layout_tiles_the_terminal() {
        for (height, width) in [(24, 70), (4, 7), (50, 200), (31, 83), (5, 13)] {
            let rects = layout(height, width).unwrap().rects();
            let covered: u32 = rects.iter().map(|r| u32::from(r.area())).sum();
            assert_eq!(covered, u32::from(height) * u32::from(width), "{height}x{width}");

            for (i, a) in rects.iter().enumerate() {
                assert!(!a.is_empty(), "{height}x{width}: empty region {i}");
                for b in &rects[i + 1..] {
                    assert!(!a.intersects(*b), "{height}x{width}: {a:?} overlaps {b:?}");
                }
            }
        }
    }

    #[test]
    fn layout_participants_take_a_seventh() {
        let l = layout(30, 72).unwrap();
        assert_eq!(l.participants.width, 10);
        assert_eq!(l.log.width, 62);
        assert_eq!(l.participants.x, 62);
    }

    #[test]
    fn layout_rejects_zero_and_tiny_sizes() {
        assert_eq!(layout(0, 80), Err(SizeError::Zero { height: 0, width: 80 }));
        assert!(matches!(layout(3, 80), Err(SizeError::TooSmall { .. })));
        assert!(matches!(layout(24, 6), Err(SizeError::TooSmall { .. })));
    }

    #[test]
    fn configured_minimum_is_enforced() {
        let err = Screen::with_min_size(10, 40, Palette::default(), 12, 20).err().unwrap();
        assert!(matches!(err, ScreenError::Size(SizeError::TooSmall { min_height: 12, .. })));

        let mut screen = Screen::with_min_size(12, 40, Palette::default(), 12, 20).unwrap();
        assert!(screen.resize(11, 40).is_err());
    }

    #[test]
    fn frame_and_flush_paint_every_panel() {
        let mut screen = Screen::new(24, 70, Palette::default()).unwrap();
        let mut terminal = Terminal::new(TestBackend::new(70, 24)).unwrap();
        let room = room();

        screen.input_mut().insert_char('h');
        screen.input_mut().insert_char('i');
        screen.frame(&room);
        screen.flush(&mut terminal).unwrap();

        let buf = terminal.backend().buffer();
        assert!(row(buf, 0).starts_with("borrowck all the things "));
        assert!(row(buf, 1).starts_with("[10:30:02] *alice has joined*"));
        assert!(row(buf, 2).starts_with("[09:05:01] <alice> hello"));
        assert_eq!(&row(buf, 1)[..], format!("{:<60}│alice    ", "[10:30:02] *alice has joined*"));
        assert!(row(buf, 2).ends_with("│bob      "));
        assert!(row(buf, 22).starts_with("#rust "));
        assert!(row(buf, 23).starts_with("hi "));

        let palette = screen.palette();
        assert_eq!(buf.cell((69, 0)).unwrap().bg, palette.bar_bg);
        assert_eq!(buf.cell((69, 22)).unwrap().bg, palette.bar_bg);
        assert_eq!(buf.cell((61, 1)).unwrap().fg, palette.moderator);
        assert_eq!(terminal.get_cursor_position().unwrap(), Position::new(2, 23));
    }

    #[test]
    fn resize_then_frame_restores_history() {
        let mut screen = Screen::new(24, 70, Palette::default()).unwrap();
        let room = room();
        screen.frame(&room);

        screen.resize(10, 35).unwrap();
        assert_eq!(screen.backing().area, Rect::new(0, 0, 35, 10));
        assert_eq!(row(screen.backing(), 1).trim_end(), "");

        screen.frame(&room);
        let l = screen.layout();
        assert_eq!(l.participants, Rect::new(30, 1, 5, 7));
        assert!(row(screen.backing(), 1).starts_with("[10:30:02] *alice"));
        assert!(row(screen.backing(), 8).starts_with("#rust"));
    }

    #[test]
    fn failed_resize_keeps_previous_layout() {
        let mut screen = Screen::new(24, 70, Palette::default()).unwrap();
        let before = screen.layout();
        let err = screen.resize(0, 70).unwrap_err();
        assert_eq!(err, ScreenError::Size(SizeError::Zero { height: 0, width: 70 }));
        assert_eq!(screen.layout(), before);
    }

    #[test]
    fn switching_rooms_keeps_one_surface_each() {
        let mut screen = Screen::new(24, 70, Palette::default()).unwrap();
        let lobby = room();
        let other = Room::new("#other");
        screen.frame(&lobby);
        screen.frame(&other);
        screen.frame(&lobby);
        assert_eq!(screen.log_mut().room_count(), 2);
        assert!(row(screen.backing(), 22).starts_with("#rust "));
    }
    #[test]
    fn flush_to_a_smaller_terminal_keeps_its_size() {
        let mut screen = Screen::new(24, 70, Palette::default()).unwrap();
        let mut terminal = Terminal::new(TestBackend::new(30, 10)).unwrap();
        screen.frame(&room());
        screen.flush(&mut terminal).unwrap();
        assert_eq!(terminal.backend().buffer().area, Rect::new(0, 0, 30, 10));

        screen.resize(10, 30).unwrap();
        screen.frame(&room());
        screen.flush(&mut terminal).unwrap();
        assert!(row(terminal.backend().buffer(), 0).starts_with("borrowck"));
    }
}
