//! Screen regions carved out of the backing surface.

use crate::ui::error::{LayoutError, RegionName};
use ratatui::layout::Rect;

/// A named rectangle inside the backing surface.
///
/// Only constructible through [`Region::carve`], so a `Region` always lies
/// inside the surface it was carved from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Region {
    pub name: RegionName,
    pub rect: Rect,
}

impl Region {
    /// Carves a `height` x `width` region with its top-left corner at the
    /// absolute position (`y`, `x`).
    ///
    /// # Errors
    ///
    /// Returns `LayoutError::OutOfBounds` if the region is empty or any part
    /// of it falls outside `parent`.
    pub fn carve(
        parent: Rect,
        name: RegionName,
        height: u16,
        width: u16,
        y: u16,
        x: u16,
    ) -> Result<Self, LayoutError> {
        // u32 so that x + width can't wrap.
        let fits = height > 0
            && width > 0
            && x >= parent.x
            && y >= parent.y
            && u32::from(x) + u32::from(width) <= u32::from(parent.x) + u32::from(parent.width)
            && u32::from(y) + u32::from(height) <= u32::from(parent.y) + u32::from(parent.height);

        if !fits {
            return Err(LayoutError::OutOfBounds {
                region: name,
                height,
                width,
                y,
                x,
                parent,
            });
        }

        Ok(Self {
            name,
            rect: Rect::new(x, y, width, height),
        })
    }

    /// Carves a region from an already computed rectangle.
    pub fn from_rect(parent: Rect, name: RegionName, rect: Rect) -> Result<Self, LayoutError> {
        Self::carve(parent, name, rect.height, rect.width, rect.y, rect.x)
    }

    pub fn height(&self) -> u16 {
        self.rect.height
    }

    pub fn width(&self) -> u16 {
        self.rect.width
    }
}
