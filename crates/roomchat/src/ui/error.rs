//! Errors raised while laying out the screen.

use ratatui::layout::Rect;
use std::fmt;
use thiserror::Error;

/// The five regions the screen is divided into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RegionName {
    Topic,
    Log,
    Participants,
    Status,
    Input,
}

impl fmt::Display for RegionName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RegionName::Topic => "topic bar",
            RegionName::Log => "message log",
            RegionName::Participants => "participant list",
            RegionName::Status => "status bar",
            RegionName::Input => "input line",
        };
        f.write_str(name)
    }
}

/// A requested region does not fit the backing surface.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LayoutError {
    #[error("{region} ({width}x{height} at {x},{y}) does not fit in {parent:?}")]
    OutOfBounds {
        region: RegionName,
        height: u16,
        width: u16,
        y: u16,
        x: u16,
        parent: Rect,
    },
}

/// The terminal size handed to `layout`/`resize` is unusable.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SizeError {
    #[error("terminal size {width}x{height} has a zero dimension")]
    Zero { height: u16, width: u16 },

    #[error("terminal is {width}x{height}, need at least {min_width}x{min_height}")]
    TooSmall {
        height: u16,
        width: u16,
        min_height: u16,
        min_width: u16,
    },
}

/// Anything that can go wrong building or resizing the screen.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScreenError {
    #[error(transparent)]
    Size(#[from] SizeError),

    #[error(transparent)]
    Layout(#[from] LayoutError),
}
