//! TUI application state.
//!
//! `ChatApp` holds the open rooms and the screen, and applies `Action`s
//! produced by the event module:
//!
//! 1. **Model**: the rooms (`roomchat_core::types::Room`)
//! 2. **Update**: `handle_action()`
//! 3. **View**: `draw()`, which runs one `Screen::frame` and one flush
//!
//! There is no network behind this client: text submitted in a room is
//! echoed into that room's log under the local nick.

use crate::ui::error::ScreenError;
use crate::ui::screen::Screen;
use crossterm::event::KeyEvent;
use ratatui::backend::Backend;
use ratatui::Terminal;
use roomchat_core::types::{Participant, Role, Room};
use std::io;
use tracing::{debug, info, warn};

/// Name of the room opened when nothing else is.
pub const INFO_ROOM: &str = "info";

/// Actions that modify the application state.
#[derive(Debug)]
pub enum Action {
    Quit,
    NextRoom,
    PrevRoom,
    /// Submit the input line (Enter).
    Submit,
    /// A key for the input line.
    Key(KeyEvent),
    /// Bracketed paste.
    Paste(String),
    Resize { width: u16, height: u16 },
}

/// What a submitted line asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Nothing typed.
    Empty,
    /// Plain text to post in the current room.
    Say(String),
    Join(String),
    Part,
    Topic(String),
    Quit,
    /// A `/command` we don't know, or one missing its argument.
    Unknown(String),
}

impl Command {
    pub fn parse(input: &str) -> Self {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Command::Empty;
        }
        let Some(rest) = trimmed.strip_prefix('/') else {
            return Command::Say(input.to_string());
        };

        let (name, arg) = match rest.split_once(char::is_whitespace) {
            Some((name, arg)) => (name, arg.trim()),
            None => (rest, ""),
        };
        match (name, arg) {
            ("join", room) if !room.is_empty() => Command::Join(room.to_string()),
            ("part", _) => Command::Part,
            ("topic", topic) => Command::Topic(topic.to_string()),
            ("quit", _) => Command::Quit,
            _ => Command::Unknown(trimmed.to_string()),
        }
    }
}

pub struct ChatApp {
    /// Open rooms, never empty. Names are unique.
    rooms: Vec<Room>,
    /// Index of the room on screen.
    current: usize,
    nick: String,
    screen: Screen,
    should_quit: bool,
}

impl ChatApp {
    /// Creates the app. With no rooms, an info room is opened.
    pub fn new(screen: Screen, nick: impl Into<String>, rooms: Vec<Room>) -> Self {
        let mut app = Self {
            rooms: Vec::new(),
            current: 0,
            nick: nick.into(),
            screen,
            should_quit: false,
        };
        for room in rooms {
            app.open_room(room);
        }
        if app.rooms.is_empty() {
            let mut info = Room::new(INFO_ROOM);
            info.set_topic("roomchat: /join <room>, /topic <text>, /part, /quit");
            info.push_notice("Welcome to roomchat");
            app.open_room(info);
        }
        app.current = 0;
        app
    }

    #[cfg(test)]
    pub fn current_room(&self) -> &Room {
        &self.rooms[self.current]
    }

    pub fn rooms(&self) -> &[Room] {
        &self.rooms
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    /// Repaints the current room and flushes it to the terminal.
    pub fn draw<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        let room = &self.rooms[self.current];
        self.screen.frame(room);
        self.screen.flush(terminal)
    }

    /// Processes an action and updates the state accordingly.
    pub fn handle_action(&mut self, action: Action) {
        match action {
            Action::Quit => self.should_quit = true,

            Action::NextRoom => {
                self.current = (self.current + 1) % self.rooms.len();
            }

            Action::PrevRoom => {
                self.current = (self.current + self.rooms.len() - 1) % self.rooms.len();
            }

            Action::Key(key) => {
                self.screen.input_mut().handle_key(&key);
            }

            Action::Paste(text) => {
                let input = self.screen.input_mut();
                for ch in text.chars().filter(|c| !c.is_control()) {
                    input.insert_char(ch);
                }
            }

            Action::Submit => {
                let text = self.screen.input_mut().take_text();
                self.screen.input_mut().clear();
                self.run_command(Command::parse(&text));
            }

            Action::Resize { width, height } => {
                if let Err(e) = self.resize(height, width) {
                    warn!(height, width, error = %e, "terminal resize rejected");
                }
            }
        }
    }

    pub fn resize(&mut self, height: u16, width: u16) -> Result<(), ScreenError> {
        self.screen.resize(height, width)
    }

    fn run_command(&mut self, command: Command) {
        debug!(?command, "submitted");
        match command {
            Command::Empty => {}

            Command::Say(text) => {
                let nick = self.nick.clone();
                self.rooms[self.current].push_message(nick, text);
            }

            Command::Join(name) => {
                if let Some(idx) = self.rooms.iter().position(|r| r.name == name) {
                    self.current = idx;
                } else {
                    let room = Room::new(&name);
                    self.current = self.open_room(room);
                    info!(room = %name, "joined room");
                }
            }

            Command::Part => {
                if self.rooms.len() == 1 {
                    self.rooms[self.current].push_notice("Can't leave the last open room");
                    return;
                }
                let room = self.rooms.remove(self.current);
                self.screen.log_mut().remove_room(&room.name);
                if self.current >= self.rooms.len() {
                    self.current = self.rooms.len() - 1;
                }
                info!(room = %room.name, "left room");
            }

            Command::Topic(topic) => {
                let nick = self.nick.clone();
                let room = &mut self.rooms[self.current];
                room.push_notice(format!("{nick} set the topic to: {topic}"));
                room.set_topic(topic);
            }

            Command::Quit => self.should_quit = true,

            Command::Unknown(text) => {
                self.rooms[self.current].push_notice(format!("Unknown command: {text}"));
            }
        }
    }

    /// Adds a room, joining it under the local nick, and returns its index.
    /// A room whose name is already open is not added twice.
    fn open_room(&mut self, mut room: Room) -> usize {
        if let Some(idx) = self.rooms.iter().position(|r| r.name == room.name) {
            warn!(room = %room.name, "room already open, keeping the existing one");
            return idx;
        }
        if room.participant(&self.nick).is_none() {
            room.add_participant(Participant::new(&self.nick, Role::Participant, 0));
            room.push_notice(format!("{} has joined {}", self.nick, room.name));
        }
        self.screen.log_mut().ensure_room(&room.name);
        self.rooms.push(room);
        self.rooms.len() - 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::palette::Palette;
    use crossterm::event::{KeyCode, KeyModifiers};
    use ratatui::backend::TestBackend;
    use roomchat_core::types::LogLine;

    fn app() -> ChatApp {
        let screen = Screen::new(24, 70, Palette::default()).unwrap();
        ChatApp::new(screen, "me", Vec::new())
    }

    fn type_line(app: &mut ChatApp, text: &str) {
        for ch in text.chars() {
            app.handle_action(Action::Key(KeyEvent::new(KeyCode::Char(ch), KeyModifiers::NONE)));
        }
        app.handle_action(Action::Submit);
    }

    fn last_line(app: &ChatApp) -> &LogLine {
        app.current_room().lines.last().unwrap()
    }

    #[test]
    fn parse_commands() {
        assert_eq!(Command::parse("   "), Command::Empty);
        assert_eq!(Command::parse("hello"), Command::Say("hello".to_string()));
        assert_eq!(Command::parse("/join #rust"), Command::Join("#rust".to_string()));
        assert_eq!(Command::parse("/topic  new topic "), Command::Topic("new topic".to_string()));
        assert_eq!(Command::parse("/topic"), Command::Topic(String::new()));
        assert_eq!(Command::parse("/part"), Command::Part);
        assert_eq!(Command::parse("/quit"), Command::Quit);
        assert_eq!(Command::parse("/join"), Command::Unknown("/join".to_string()));
        assert_eq!(Command::parse("/dance now"), Command::Unknown("/dance now".to_string()));
    }

    #[test]
    fn starts_in_the_info_room() {
        let app = app();
        assert_eq!(app.rooms().len(), 1);
        assert_eq!(app.current_room().name, INFO_ROOM);
        assert!(app.current_room().participant("me").is_some());
    }

    #[test]
    fn submitted_text_is_posted_and_input_emptied() {
        let mut app = app();
        type_line(&mut app, "hi");

        match last_line(&app) {
            LogLine::Message { speaker, text, .. } => {
                assert_eq!(speaker, "me");
                assert_eq!(text, "hi");
            }
            other => panic!("unexpected {other:?}"),
        }
        assert_eq!(app.screen().input().text(), "");
    }

    #[test]
    fn join_switches_and_reuses_rooms() {
        let mut app = app();
        type_line(&mut app, "/join #rust");
        assert_eq!(app.current_room().name, "#rust");
        assert_eq!(app.rooms().len(), 2);

        app.handle_action(Action::NextRoom);
        assert_eq!(app.current_room().name, INFO_ROOM);

        type_line(&mut app, "/join #rust");
        assert_eq!(app.current_room().name, "#rust");
        assert_eq!(app.rooms().len(), 2);
    }

    #[test]
    fn prev_room_wraps_around() {
        let mut app = app();
        type_line(&mut app, "/join a");
        type_line(&mut app, "/join b");
        app.handle_action(Action::NextRoom);
        assert_eq!(app.current_room().name, INFO_ROOM);
        app.handle_action(Action::PrevRoom);
        assert_eq!(app.current_room().name, "b");
    }

    #[test]
    fn part_closes_room_but_not_the_last() {
        let mut app = app();
        type_line(&mut app, "/join #rust");
        type_line(&mut app, "/part");
        assert_eq!(app.rooms().len(), 1);
        assert_eq!(app.current_room().name, INFO_ROOM);

        type_line(&mut app, "/part");
        assert_eq!(app.rooms().len(), 1);
        assert!(matches!(last_line(&app), LogLine::Notice { text, .. } if text.contains("last open room")));
    }

    #[test]
    fn topic_command_sets_topic() {
        let mut app = app();
        type_line(&mut app, "/topic ownership");
        assert_eq!(app.current_room().topic, "ownership");
        assert!(matches!(last_line(&app), LogLine::Notice { text, .. } if text.ends_with("ownership")));
    }

    #[test]
    fn unknown_command_posts_notice() {
        let mut app = app();
        type_line(&mut app, "/dance");
        assert!(matches!(last_line(&app), LogLine::Notice { text, .. } if text == "Unknown command: /dance"));
    }

    #[test]
    fn quit_from_key_or_command() {
        let mut app = app();
        type_line(&mut app, "/quit");
        assert!(app.should_quit());

        let mut app = self::app();
        app.handle_action(Action::Quit);
        assert!(app.should_quit());
    }

    #[test]
    fn paste_skips_control_characters() {
        let mut app = app();
        app.handle_action(Action::Paste("a\nb".to_string()));
        assert_eq!(app.screen().input().text(), "ab");
    }

    #[test]
    fn rejected_resize_keeps_running() {
        let mut app = app();
        app.handle_action(Action::Resize { width: 3, height: 2 });
        assert_eq!(app.screen().layout().input.width, 70);
        assert!(!app.should_quit());
    }

    #[test]
    fn seeded_rooms_are_deduplicated() {
        let screen = Screen::new(24, 70, Palette::default()).unwrap();
        let app = ChatApp::new(screen, "me", vec![Room::new("a"), Room::new("a"), Room::new("b")]);
        let names: Vec<&str> = app.rooms().iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, ["a", "b"]);
    }

    #[test]
    fn draw_renders_current_room() {
        let mut app = app();
        let mut terminal = Terminal::new(TestBackend::new(70, 24)).unwrap();
        type_line(&mut app, "/join #rust");
        app.draw(&mut terminal).unwrap();

        let buf = terminal.backend().buffer();
        let status: String = (0..6).map(|x| buf.cell((x, 22)).unwrap().symbol()).collect();
        assert_eq!(status, "#rust ");
    }
}
