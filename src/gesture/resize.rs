//! Edge/corner resize gesture.
//!
//! Eight named handles; only the edges a handle implies ever move. The
//! size clamp runs first and, when it lands on a position-moving edge, the
//! position is re-derived from the clamped size so the two can never
//! disagree.

use crate::config::WmConfig;
use crate::geometry::{SurfacePoint, SurfaceRect};
use crate::registry::{WindowId, WindowRegistry};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResizeEdge {
    Left,
    Right,
    Top,
    Bottom,
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl ResizeEdge {
    pub fn moves_left(self) -> bool {
        matches!(self, Self::Left | Self::TopLeft | Self::BottomLeft)
    }

    pub fn moves_right(self) -> bool {
        matches!(self, Self::Right | Self::TopRight | Self::BottomRight)
    }

    pub fn moves_top(self) -> bool {
        matches!(self, Self::Top | Self::TopLeft | Self::TopRight)
    }

    pub fn moves_bottom(self) -> bool {
        matches!(self, Self::Bottom | Self::BottomLeft | Self::BottomRight)
    }
}

/// Compute the bounds implied by a cumulative pointer delta from the
/// gesture's starting rect.
///
/// Anchored edges never move: the right edge stays put while the left
/// handle drags, and vice versa. After the `[min, max]` size clamp the
/// origin is re-derived from the clamped size for `Top`/`Left` handles,
/// then clamped into the horizontal workspace bounds and below the top bar.
pub fn resize_bounds(
    start: SurfaceRect,
    edge: ResizeEdge,
    dx: i32,
    dy: i32,
    config: &WmConfig,
    workspace: SurfaceRect,
) -> SurfaceRect {
    let mut width = start.width as i32;
    let mut height = start.height as i32;

    if edge.moves_left() {
        width -= dx;
    } else if edge.moves_right() {
        width += dx;
    }
    if edge.moves_top() {
        height -= dy;
    } else if edge.moves_bottom() {
        height += dy;
    }

    let width = config.clamp_width(width.clamp(0, u16::MAX as i32) as u16);
    let height = config.clamp_height(height.clamp(0, u16::MAX as i32) as u16);

    // anchored edges are fixed; moving edges re-derive the origin from the
    // clamped size
    let mut x = if edge.moves_left() {
        start.right() - width as i32
    } else {
        start.x
    };
    let mut y = if edge.moves_top() {
        start.bottom() - height as i32
    } else {
        start.y
    };

    let max_x = (workspace.right() - width as i32).max(workspace.x);
    x = x.clamp(workspace.x, max_x);
    y = y.max(workspace.y);

    SurfaceRect::new(x, y, width, height)
}

#[derive(Debug, Clone, Copy)]
struct ResizeGesture {
    id: WindowId,
    edge: ResizeEdge,
    start: SurfaceRect,
    grab: SurfacePoint,
    latest: SurfacePoint,
    pending: Option<SurfacePoint>,
}

#[derive(Debug, Default)]
pub struct ResizeController {
    active: Option<ResizeGesture>,
}

impl ResizeController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    pub fn active_window(&self) -> Option<WindowId> {
        self.active.map(|gesture| gesture.id)
    }

    /// Begin resizing `id` by `edge` from `pointer`. Records the starting
    /// bounds; rejects minimized, animating, maximized, or absent windows
    /// and refuses to preempt a live gesture.
    pub fn begin(
        &mut self,
        registry: &mut WindowRegistry,
        id: WindowId,
        edge: ResizeEdge,
        pointer: SurfacePoint,
    ) -> bool {
        if self.active.is_some() {
            return false;
        }
        let Some(window) = registry.get(id) else {
            return false;
        };
        if !window.interactive() || window.maximized {
            return false;
        }
        let start = window.rect;
        registry.focus(id);
        tracing::debug!(window_id = %id, edge = ?edge, "resize begin");
        self.active = Some(ResizeGesture {
            id,
            edge,
            start,
            grab: pointer,
            latest: pointer,
            pending: None,
        });
        true
    }

    pub fn sample(&mut self, pointer: SurfacePoint) {
        if let Some(gesture) = &mut self.active {
            gesture.pending = Some(pointer);
        }
    }

    /// Apply the pending sample (one per rendering frame) and return the
    /// visual-only preview bounds.
    pub fn frame(&mut self, config: &WmConfig, workspace: SurfaceRect) -> Option<SurfaceRect> {
        let gesture = self.active.as_mut()?;
        if let Some(pointer) = gesture.pending.take() {
            gesture.latest = pointer;
        }
        Some(Self::bounds_for(gesture, config, workspace))
    }

    fn bounds_for(
        gesture: &ResizeGesture,
        config: &WmConfig,
        workspace: SurfaceRect,
    ) -> SurfaceRect {
        resize_bounds(
            gesture.start,
            gesture.edge,
            gesture.latest.x - gesture.grab.x,
            gesture.latest.y - gesture.grab.y,
            config,
            workspace,
        )
    }

    /// End the gesture, committing the final observed bounds in one
    /// resize-plus-move write.
    pub fn release(
        &mut self,
        registry: &mut WindowRegistry,
        config: &WmConfig,
        workspace: SurfaceRect,
        pointer: SurfacePoint,
    ) -> Option<SurfaceRect> {
        let mut gesture = self.active.take()?;
        gesture.latest = pointer;
        let bounds = Self::bounds_for(&gesture, config, workspace);
        registry.resize(gesture.id, bounds.width, bounds.height);
        registry.move_to(gesture.id, bounds.x, bounds.y);
        tracing::debug!(window_id = %gesture.id, ?bounds, "resize commit");
        Some(bounds)
    }

    pub fn cancel(&mut self) {
        if let Some(gesture) = self.active.take() {
            tracing::debug!(window_id = %gesture.id, "resize canceled");
        }
    }
}
