//! Domain types for roomchat.
//!
//! A `Room` is the unit the screen renders: a name, a topic, the ordered
//! participant list, and the append-only log of lines. The terminal layer
//! never mutates these; it only reads them when repainting.

use chrono::{Local, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// Role — what a participant is allowed to do in a room
// ---------------------------------------------------------------------------

/// The role of a participant in a room.
///
/// The screen maps each role to a display color. Anything that is not one
/// of the three known roles becomes `Other` and is drawn with the fallback
/// color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Moderator,
    Participant,
    Visitor,
    #[serde(other)]
    Other,
}

// ---------------------------------------------------------------------------
// Participant
// ---------------------------------------------------------------------------

/// Someone present in a room.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    /// Nickname, unique within a room.
    pub nick: String,
    /// Role, which picks the color in the participant list.
    pub role: Role,
    /// Index into the palette's nick colors, used for the speaker segment
    /// of messages. Taken modulo the number of available colors.
    #[serde(default)]
    pub color: u8,
}

impl Participant {
    pub fn new(nick: impl Into<String>, role: Role, color: u8) -> Self {
        Self {
            nick: nick.into(),
            role,
            color,
        }
    }
}

// ---------------------------------------------------------------------------
// Timestamp — local wall-clock time of a log line
// ---------------------------------------------------------------------------

/// Local wall-clock time at which a line was logged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Timestamp(NaiveDateTime);

impl Timestamp {
    /// Returns the current local time.
    pub fn now() -> Self {
        Self(Local::now().naive_local())
    }

    /// Builds a timestamp for today at the given time of day.
    ///
    /// Out-of-range components are clamped to midnight, which is only
    /// useful for fixtures and tests.
    pub fn from_hms(hour: u32, min: u32, sec: u32) -> Self {
        let time = NaiveTime::from_hms_opt(hour, min, sec).unwrap_or(NaiveTime::MIN);
        Self(Local::now().date_naive().and_time(time))
    }

    /// Formats the time of day as `HH:MM:SS`.
    pub fn format_clock(&self) -> String {
        self.0.format("%H:%M:%S").to_string()
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_clock())
    }
}

// ---------------------------------------------------------------------------
// LogLine — one entry in a room's history
// ---------------------------------------------------------------------------

/// A single line of room history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum LogLine {
    /// A system notice with no speaker (joins, topic changes, errors).
    Notice { timestamp: Timestamp, text: String },
    /// Something a participant said.
    Message {
        timestamp: Timestamp,
        speaker: String,
        text: String,
    },
}

impl LogLine {
    pub fn notice(text: impl Into<String>) -> Self {
        LogLine::Notice {
            timestamp: Timestamp::now(),
            text: text.into(),
        }
    }

    pub fn message(speaker: impl Into<String>, text: impl Into<String>) -> Self {
        LogLine::Message {
            timestamp: Timestamp::now(),
            speaker: speaker.into(),
            text: text.into(),
        }
    }

    pub fn timestamp(&self) -> Timestamp {
        match self {
            LogLine::Notice { timestamp, .. } | LogLine::Message { timestamp, .. } => *timestamp,
        }
    }
}

// ---------------------------------------------------------------------------
// Room
// ---------------------------------------------------------------------------

/// A chatroom: what the screen repaints from on every frame.
///
/// `lines` is append-only and chronological. Participants keep the order
/// in which they joined.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    pub name: String,
    #[serde(default)]
    pub topic: String,
    #[serde(default)]
    pub participants: Vec<Participant>,
    #[serde(default)]
    pub lines: Vec<LogLine>,
}

impl Room {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            topic: String::new(),
            participants: Vec::new(),
            lines: Vec::new(),
        }
    }

    /// Finds a participant by nick (linear scan, first match).
    pub fn participant(&self, nick: &str) -> Option<&Participant> {
        self.participants.iter().find(|p| p.nick == nick)
    }

    /// Adds a participant, replacing any existing entry with the same nick
    /// in place so the list order is kept.
    pub fn add_participant(&mut self, participant: Participant) {
        match self
            .participants
            .iter_mut()
            .find(|p| p.nick == participant.nick)
        {
            Some(existing) => *existing = participant,
            None => self.participants.push(participant),
        }
    }

    pub fn set_topic(&mut self, topic: impl Into<String>) {
        self.topic = topic.into();
    }

    pub fn push_notice(&mut self, text: impl Into<String>) {
        self.lines.push(LogLine::notice(text));
    }

    pub fn push_message(&mut self, speaker: impl Into<String>, text: impl Into<String>) {
        self.lines.push(LogLine::message(speaker, text));
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
