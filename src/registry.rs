//! The workspace registry: single owner of all window state.
//!
//! Controllers read and mutate exclusively through this type. Every
//! operation is synchronous and total — unknown ids are no-ops, not
//! errors — and the stacking/focus invariants hold again by the time each
//! method returns.

use std::fmt;

use crate::content::ContentKind;
use crate::geometry::{SurfacePoint, SurfaceRect};

/// Opaque window identifier. Monotonic, never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct WindowId(u64);

impl fmt::Display for WindowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Request to open a new pane.
#[derive(Debug, Clone)]
pub struct OpenRequest {
    pub kind: ContentKind,
    pub title: String,
    pub rect: SurfaceRect,
}

#[derive(Debug, Clone)]
pub struct Window {
    pub id: WindowId,
    pub kind: ContentKind,
    pub title: String,
    /// Committed floating geometry. Untouched while minimized so restore
    /// puts the pane back where it was.
    pub rect: SurfaceRect,
    /// Stacking rank. Higher draws on top.
    pub z: u32,
    pub minimized: bool,
    pub maximized: bool,
    pub focused: bool,
    /// Transient flag while a collapse/expand transition plays; suppresses
    /// pointer interaction and further geometry commits.
    pub animating: bool,
    /// Geometry captured when maximizing, consumed on restore.
    pub prev_rect: Option<SurfaceRect>,
}

impl Window {
    /// Whether the pane currently accepts pointer gestures.
    pub fn interactive(&self) -> bool {
        !self.minimized && !self.animating
    }
}

/// Owner of the window collection and the monotonic stacking counter.
#[derive(Debug)]
pub struct WindowRegistry {
    windows: Vec<Window>,
    /// The "active window" pointer. May name an id with no live window:
    /// a focus request for a not-yet-opened pane records intent.
    active: Option<WindowId>,
    next_id: u64,
    next_z: u32,
    z_max: u32,
}

impl WindowRegistry {
    pub fn new(z_max: u32) -> Self {
        Self {
            windows: Vec::new(),
            active: None,
            next_id: 0,
            next_z: 0,
            z_max,
        }
    }

    fn alloc_z(&mut self) -> u32 {
        let z = self.next_z.min(self.z_max);
        self.next_z = self.next_z.saturating_add(1).min(self.z_max);
        z
    }

    fn get_mut(&mut self, id: WindowId) -> Option<&mut Window> {
        self.windows.iter_mut().find(|window| window.id == id)
    }

    pub fn get(&self, id: WindowId) -> Option<&Window> {
        self.windows.iter().find(|window| window.id == id)
    }

    pub fn windows(&self) -> &[Window] {
        &self.windows
    }

    pub fn len(&self) -> usize {
        self.windows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.windows.is_empty()
    }

    pub fn active(&self) -> Option<WindowId> {
        self.active
    }

    pub fn is_animating(&self, id: WindowId) -> bool {
        self.get(id).is_some_and(|window| window.animating)
    }

    /// Ids in paint order, bottom-most first. Ties at the stacking ceiling
    /// fall back to insertion order, which keeps the degraded long-lived
    /// workspace stable.
    pub fn draw_order(&self) -> Vec<WindowId> {
        let mut order: Vec<(u32, usize, WindowId)> = self
            .windows
            .iter()
            .enumerate()
            .filter(|(_, window)| !window.minimized)
            .map(|(idx, window)| (window.z, idx, window.id))
            .collect();
        order.sort();
        order.into_iter().map(|(_, _, id)| id).collect()
    }

    /// Top-most interactive window under `point`, if any.
    pub fn window_at(&self, point: SurfacePoint) -> Option<WindowId> {
        self.draw_order()
            .into_iter()
            .rev()
            .find(|&id| {
                self.get(id)
                    .is_some_and(|window| window.interactive() && window.rect.contains(point))
            })
    }

    /// Visible (non-minimized) windows of a content kind, bottom-most first.
    pub fn visible_of_kind(&self, kind: &ContentKind) -> Vec<WindowId> {
        self.draw_order()
            .into_iter()
            .filter(|&id| self.get(id).is_some_and(|window| window.kind == *kind))
            .collect()
    }

    pub fn minimized_of_kind(&self, kind: &ContentKind) -> Vec<WindowId> {
        self.windows
            .iter()
            .filter(|window| window.minimized && window.kind == *kind)
            .map(|window| window.id)
            .collect()
    }

    pub fn minimized(&self) -> Vec<WindowId> {
        self.windows
            .iter()
            .filter(|window| window.minimized)
            .map(|window| window.id)
            .collect()
    }

    /// Open a new pane. Always succeeds; the new window takes focus and the
    /// next stacking rank (held at the ceiling once reached).
    pub fn open(&mut self, request: OpenRequest) -> WindowId {
        let id = WindowId(self.next_id);
        self.next_id += 1;
        let z = self.alloc_z();
        for window in &mut self.windows {
            window.focused = false;
        }
        tracing::debug!(window_id = %id, kind = %request.kind, z, "opened window");
        self.windows.push(Window {
            id,
            kind: request.kind,
            title: request.title,
            rect: request.rect,
            z,
            minimized: false,
            maximized: false,
            focused: true,
            animating: false,
            prev_rect: None,
        });
        self.active = Some(id);
        id
    }

    /// Remove a pane. Clears the active pointer only when it referenced the
    /// closed id; focus is deliberately not reassigned.
    pub fn close(&mut self, id: WindowId) {
        let before = self.windows.len();
        self.windows.retain(|window| window.id != id);
        if self.windows.len() != before {
            tracing::debug!(window_id = %id, "closed window");
            if self.active == Some(id) {
                self.active = None;
            }
        }
    }

    /// Record focus intent for `id` and, when the window exists, make its
    /// focus flag exclusive and raise it to the stacking ceiling.
    pub fn focus(&mut self, id: WindowId) {
        self.active = Some(id);
        if self.get(id).is_none() {
            tracing::trace!(window_id = %id, "focus intent for absent window");
            return;
        }
        let z = self.alloc_z();
        for window in &mut self.windows {
            if window.id == id {
                window.focused = true;
                window.z = z;
            } else {
                window.focused = false;
            }
        }
        tracing::debug!(window_id = %id, z, "focused window");
    }

    /// Hide a pane. Its geometry is kept for restore. Minimizing the
    /// focused window drops the active pointer to "none".
    pub fn minimize(&mut self, id: WindowId) {
        let was_active = self.active == Some(id);
        let Some(window) = self.get_mut(id) else {
            return;
        };
        if window.minimized {
            return;
        }
        // a pane cannot be both minimized and maximized; the saved geometry
        // stays captured so a later restore still round-trips
        window.maximized = false;
        window.minimized = true;
        window.focused = false;
        tracing::debug!(window_id = %id, "minimized window");
        if was_active {
            self.active = None;
        }
    }

    /// Grow a pane to the full workspace, capturing the floating geometry
    /// exactly once.
    pub fn maximize(&mut self, id: WindowId, workspace: SurfaceRect) {
        let Some(window) = self.get_mut(id) else {
            return;
        };
        if window.maximized {
            return;
        }
        if window.minimized {
            window.minimized = false;
        }
        window.prev_rect = Some(window.rect);
        window.rect = workspace;
        window.maximized = true;
        tracing::debug!(window_id = %id, "maximized window");
    }

    /// Undo minimize and/or maximize. A saved geometry is reproduced
    /// exactly and consumed; without one the flags simply clear in place.
    pub fn restore(&mut self, id: WindowId) {
        let Some(window) = self.get_mut(id) else {
            return;
        };
        if let Some(prev) = window.prev_rect.take() {
            window.rect = prev;
        }
        window.minimized = false;
        window.maximized = false;
        tracing::debug!(window_id = %id, "restored window");
    }

    /// Terminal commit of a drag gesture.
    pub fn move_to(&mut self, id: WindowId, x: i32, y: i32) {
        if let Some(window) = self.get_mut(id) {
            window.rect.x = x;
            window.rect.y = y;
            tracing::trace!(window_id = %id, x, y, "moved window");
        }
    }

    /// Terminal commit of a resize gesture.
    pub fn resize(&mut self, id: WindowId, width: u16, height: u16) {
        if let Some(window) = self.get_mut(id) {
            window.rect.width = width;
            window.rect.height = height;
            tracing::trace!(window_id = %id, width, height, "resized window");
        }
    }

    /// Toggle the transient animation flag. Leaves minimized/maximized as
    /// they are; the animation coordinator owns the ordering.
    pub fn set_animating(&mut self, id: WindowId, animating: bool) {
        if let Some(window) = self.get_mut(id) {
            window.animating = animating;
        }
    }
}
