//! Color palette shared by all panels.
//!
//! Panels never look colors up from global state: the screen owns one
//! `Palette` and passes it down on every repaint.

use ratatui::style::{Color, Style};
use roomchat_core::config::ThemeConfig;
use roomchat_core::types::Role;
use std::str::FromStr;
use tracing::warn;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    pub moderator: Color,
    pub participant: Color,
    pub visitor: Color,
    pub fallback: Color,
    pub divider: Color,
    pub bar_fg: Color,
    pub bar_bg: Color,
    pub nick_colors: Vec<Color>,
}

impl Default for Palette {
    fn default() -> Self {
        Self::from_theme(&ThemeConfig::default())
    }
}

impl Palette {
    /// Builds a palette from configured color names.
    ///
    /// Names ratatui can't parse fall back to the built-in default for that
    /// slot and are logged.
    pub fn from_theme(theme: &ThemeConfig) -> Self {
        let nick_colors: Vec<Color> = theme
            .nick_colors
            .iter()
            .map(|name| parse_color("nick_colors", name, Color::Cyan))
            .collect();

        Self {
            moderator: parse_color("moderator", &theme.moderator, Color::Red),
            participant: parse_color("participant", &theme.participant, Color::Blue),
            visitor: parse_color("visitor", &theme.visitor, Color::Green),
            fallback: parse_color("fallback", &theme.fallback, Color::White),
            divider: parse_color("divider", &theme.divider, Color::Blue),
            bar_fg: parse_color("bar_fg", &theme.bar_fg, Color::White),
            bar_bg: parse_color("bar_bg", &theme.bar_bg, Color::Blue),
            nick_colors,
        }
    }

    /// Color of a participant's name in the participant list.
    pub fn role_style(&self, role: Role) -> Style {
        let color = match role {
            Role::Moderator => self.moderator,
            Role::Participant => self.participant,
            Role::Visitor => self.visitor,
            Role::Other => self.fallback,
        };
        Style::default().fg(color)
    }

    /// Color of a speaker's name in the message log.
    ///
    /// `None` means the speaker isn't in the room's participant list.
    pub fn nick_style(&self, color: Option<u8>) -> Style {
        match color {
            Some(idx) if !self.nick_colors.is_empty() => {
                let color = self.nick_colors[usize::from(idx) % self.nick_colors.len()];
                Style::default().fg(color)
            }
            _ => self.fallback_style(),
        }
    }

    pub fn fallback_style(&self) -> Style {
        Style::default().fg(self.fallback)
    }

    pub fn divider_style(&self) -> Style {
        Style::default().fg(self.divider)
    }

    pub fn bar_style(&self) -> Style {
        Style::default().fg(self.bar_fg).bg(self.bar_bg)
    }
}

fn parse_color(slot: &str, name: &str, default: Color) -> Color {
    Color::from_str(name).unwrap_or_else(|_| {
        warn!(slot, name, "unknown color name, using default");
        default
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roles_map_to_distinct_colors() {
        let palette = Palette::default();
        assert_eq!(palette.role_style(Role::Moderator).fg, Some(Color::Red));
        assert_eq!(palette.role_style(Role::Participant).fg, Some(Color::Blue));
        assert_eq!(palette.role_style(Role::Visitor).fg, Some(Color::Green));
        assert_eq!(palette.role_style(Role::Other).fg, Some(Color::White));
    }

    #[test]
    fn nick_color_index_wraps() {
        let palette = Palette::default();
        let n = palette.nick_colors.len() as u8;
        assert_eq!(palette.nick_style(Some(1)), palette.nick_style(Some(1 + n)));
    }

    #[test]
    fn unknown_speaker_uses_fallback() {
        let palette = Palette::default();
        assert_eq!(palette.nick_style(None), palette.fallback_style());
    }

    #[test]
    fn empty_nick_colors_use_fallback() {
        let theme = ThemeConfig {
            nick_colors: Vec::new(),
            ..ThemeConfig::default()
        };
        let palette = Palette::from_theme(&theme);
        assert_eq!(palette.nick_style(Some(3)), palette.fallback_style());
    }

    #[test]
    fn bad_color_name_falls_back() {
        let theme = ThemeConfig {
            moderator: "not-a-color".to_string(),
            visitor: "#ff8800".to_string(),
            ..ThemeConfig::default()
        };
        let palette = Palette::from_theme(&theme);
        assert_eq!(palette.moderator, Color::Red);
        assert_eq!(palette.visitor, Color::Rgb(0xff, 0x88, 0x00));
    }
}
