//! Rendering modules for the roomchat TUI.
//!
//! Each panel owns a `Surface` carved out of the terminal:
//! - `participants`: participant list on the right
//! - `bar`: topic bar (top) and status bar (above the input)
//! - `messages`: per-room scrolling message log
//! - `input`: the text input line
//! - `screen`: layout, fixed-order repaint, and the batched flush

pub mod bar;
pub mod error;
pub mod input;
pub mod messages;
pub mod palette;
pub mod participants;
pub mod region;
pub mod screen;
pub mod surface;
