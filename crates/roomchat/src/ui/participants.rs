//! Participant list (right side).
//!
//! ```text
//! │alice      <- moderator
//! │bob        <- participant
//! │carol      <- visitor
//! ```
//!
//! A divider in column 0, then one nick per row. There is no scrolling:
//! participants that don't fit under the panel height are not drawn.

use crate::ui::palette::Palette;
use crate::ui::region::Region;
use crate::ui::surface::Surface;
use ratatui::buffer::Buffer;
use ratatui::symbols;
use roomchat_core::types::Participant;

pub struct ParticipantPanel {
    surface: Surface,
}

impl ParticipantPanel {
    pub fn new(region: Region) -> Self {
        Self {
            surface: Surface::new(&region),
        }
    }

    /// Rebinds the panel to `region`. Previous content is discarded.
    pub fn resize(&mut self, region: Region) {
        self.surface = Surface::new(&region);
    }

    /// Redraws the divider and one name per row, in list order.
    pub fn repaint(&mut self, participants: &[Participant], palette: &Palette) {
        self.surface.clear();
        self.surface
            .vline(0, symbols::line::VERTICAL, palette.divider_style());

        for (row, participant) in participants
            .iter()
            .take(usize::from(self.surface.height()))
            .enumerate()
        {
            self.surface.put_str(
                row as u16,
                1,
                &participant.nick,
                palette.role_style(participant.role),
            );
        }
    }

    /// Copies the panel into the backing surface for the next flush.
    pub fn refresh(&self, backing: &mut Buffer) {
        self.surface.copy_into(backing);
    }

    pub fn surface(&self) -> &Surface {
        &self.surface
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::error::RegionName;
    use ratatui::layout::Rect;
    use ratatui::style::Color;
    use roomchat_core::types::Role;

    fn panel(height: u16) -> ParticipantPanel {
        let parent = Rect::new(0, 0, 70, 24);
        ParticipantPanel::new(
            Region::carve(parent, RegionName::Participants, height, 10, 1, 60).unwrap(),
        )
    }

    fn people(n: usize) -> Vec<Participant> {
        (0..n)
            .map(|i| Participant::new(format!("user{i}"), Role::Participant, 0))
            .collect()
    }

    #[test]
    fn draws_divider_and_names_by_role() {
        let mut panel = panel(5);
        let palette = Palette::default();
        let participants = vec![
            Participant::new("alice", Role::Moderator, 0),
            Participant::new("bob", Role::Visitor, 0),
            Participant::new("eve", Role::Other, 0),
        ];

        panel.repaint(&participants, &palette);

        let s = panel.surface();
        assert_eq!(s.row_text(0), "│alice    ");
        assert_eq!(s.row_text(1), "│bob      ");
        assert_eq!(s.row_text(3), "│         ");
        assert_eq!(s.cell(0, 0).unwrap().fg, palette.divider);
        assert_eq!(s.cell(0, 1).unwrap().fg, Color::Red);
        assert_eq!(s.cell(1, 1).unwrap().fg, Color::Green);
        assert_eq!(s.cell(2, 1).unwrap().fg, palette.fallback);
    }

    #[test]
    fn excess_participants_are_not_drawn() {
        let mut panel = panel(3);
        panel.repaint(&people(5), &Palette::default());

        let s = panel.surface();
        let drawn: Vec<String> = (0..s.height())
            .map(|row| s.row_text(row).trim_start_matches('│').trim_end().to_string())
            .collect();
        assert_eq!(drawn, ["user0", "user1", "user2"]);
    }

    #[test]
    fn repaint_clears_previous_names() {
        let mut panel = panel(3);
        let palette = Palette::default();
        panel.repaint(&people(3), &palette);
        panel.repaint(&people(1), &palette);

        assert_eq!(panel.surface().row_text(1), "│         ");
    }

    #[test]
    fn long_nick_is_clipped_to_panel() {
        let mut panel = panel(1);
        let participants = vec![Participant::new("averyveryverylongnick", Role::Visitor, 0)];
        panel.repaint(&participants, &Palette::default());
        assert_eq!(panel.surface().row_text(0), "│averyvery");
    }

    #[test]
    fn refresh_copies_into_backing() {
        let mut panel = panel(2);
        panel.repaint(&people(1), &Palette::default());
        let mut backing = Buffer::empty(Rect::new(0, 0, 70, 24));
        panel.refresh(&mut backing);
        assert_eq!(backing.cell((60, 1)).unwrap().symbol(), "│");
        assert_eq!(backing.cell((61, 1)).unwrap().symbol(), "u");
    }
}
