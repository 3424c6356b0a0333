//! Live surface geometry.
//!
//! Snap zones and resize bounds are derived from these readings at the
//! moment they are needed, never cached, so a host resize shows up in the
//! very next gesture sample.

use crate::geometry::SurfaceRect;

/// Host-surface dimensions plus the fixed reservations above and below the
/// managed workspace.
pub trait SurfaceMetrics {
    fn viewport_width(&self) -> u16;
    fn viewport_height(&self) -> u16;

    /// Height of the fixed bar above the workspace. Surface coordinates
    /// start below it.
    fn top_bar_height(&self) -> u16 {
        0
    }

    /// Height reserved for the dock at the bottom of the viewport.
    fn dock_height(&self) -> u16 {
        0
    }

    /// The managed workspace in surface coordinates: origin `(0, 0)` sits
    /// directly under the top bar, and the dock reservation is excluded.
    fn workspace(&self) -> SurfaceRect {
        let height = self
            .viewport_height()
            .saturating_sub(self.top_bar_height())
            .saturating_sub(self.dock_height());
        SurfaceRect::new(0, 0, self.viewport_width(), height)
    }

    /// The dock strip, directly below the workspace.
    fn dock_strip(&self) -> SurfaceRect {
        let workspace = self.workspace();
        SurfaceRect::new(
            0,
            workspace.bottom(),
            self.viewport_width(),
            self.dock_height(),
        )
    }
}

/// Fixed-size surface for tests and the benchmark harness.
#[derive(Debug, Clone, Copy)]
pub struct FixedSurface {
    pub width: u16,
    pub height: u16,
    pub top_bar: u16,
    pub dock: u16,
}

impl FixedSurface {
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            top_bar: 0,
            dock: 0,
        }
    }

    pub fn with_reservations(width: u16, height: u16, top_bar: u16, dock: u16) -> Self {
        Self {
            width,
            height,
            top_bar,
            dock,
        }
    }
}

impl SurfaceMetrics for FixedSurface {
    fn viewport_width(&self) -> u16 {
        self.width
    }

    fn viewport_height(&self) -> u16 {
        self.height
    }

    fn top_bar_height(&self) -> u16 {
        self.top_bar
    }

    fn dock_height(&self) -> u16 {
        self.dock
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn workspace_excludes_reservations() {
        let surface = FixedSurface::with_reservations(1024, 768, 24, 40);
        assert_eq!(surface.workspace(), SurfaceRect::new(0, 0, 1024, 704));
        assert_eq!(surface.dock_strip(), SurfaceRect::new(0, 704, 1024, 40));
    }

    #[test]
    fn degenerate_viewport_saturates_to_zero() {
        let surface = FixedSurface::with_reservations(80, 10, 8, 8);
        assert_eq!(surface.workspace().height, 0);
    }
}
