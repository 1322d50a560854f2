//! roomchat TUI: application state, event translation, and the rendering
//! layer. The `roomchat` binary wires these to a crossterm terminal.

pub mod app;
pub mod event;
pub mod ui;
