//! Title-bar drag gesture.
//!
//! The controller accumulates pointer deltas into a visual-only preview
//! rect and writes the registry exactly once, on release. An aborted or
//! jittery drag can therefore never leave a half-applied position behind.

use crate::geometry::{SurfacePoint, SurfaceRect};
use crate::registry::{WindowId, WindowRegistry};

#[derive(Debug, Clone, Copy)]
struct DragGesture {
    id: WindowId,
    /// Pointer position the deltas accumulate from.
    grab: SurfacePoint,
    /// Committed window origin at (or re-based after) grab.
    origin: SurfacePoint,
    /// Last pointer sample applied to the preview.
    latest: SurfacePoint,
    /// Newest unapplied sample; overwritten by every `sample` call and
    /// drained once per frame.
    pending: Option<SurfacePoint>,
    /// Set when the grabbed window was maximized; the first real movement
    /// demotes it to floating before deltas start counting.
    demote_on_move: bool,
}

/// Result of a completed drag, handed to the caller so it can run snap
/// adjudication against the same release point.
#[derive(Debug, Clone, Copy)]
pub struct DragEnd {
    pub id: WindowId,
    pub committed: SurfaceRect,
}

#[derive(Debug, Default)]
pub struct DragController {
    active: Option<DragGesture>,
}

impl DragController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    pub fn active_window(&self) -> Option<WindowId> {
        self.active.map(|gesture| gesture.id)
    }

    /// Begin dragging `id` from `pointer`. Focuses the window first.
    /// Returns false when the window is absent, minimized, animating, or a
    /// gesture is already live.
    pub fn begin(
        &mut self,
        registry: &mut WindowRegistry,
        id: WindowId,
        pointer: SurfacePoint,
    ) -> bool {
        if self.active.is_some() {
            return false;
        }
        let Some(window) = registry.get(id) else {
            return false;
        };
        if !window.interactive() {
            return false;
        }
        let origin = SurfacePoint::new(window.rect.x, window.rect.y);
        let demote_on_move = window.maximized;
        registry.focus(id);
        tracing::debug!(window_id = %id, "drag begin");
        self.active = Some(DragGesture {
            id,
            grab: pointer,
            origin,
            latest: pointer,
            pending: None,
            demote_on_move,
        });
        true
    }

    /// Record a pointer sample. Cheap; overwrites any sample already
    /// pending for this frame.
    pub fn sample(&mut self, pointer: SurfacePoint) {
        if let Some(gesture) = &mut self.active {
            gesture.pending = Some(pointer);
        }
    }

    /// Apply the pending sample, at most once per rendering frame.
    /// Returns the visual-only preview rect when a gesture is live.
    pub fn frame(&mut self, registry: &mut WindowRegistry) -> Option<SurfaceRect> {
        let gesture = self.active.as_mut()?;
        if let Some(pointer) = gesture.pending.take() {
            if gesture.demote_on_move && pointer != gesture.grab {
                let id = gesture.id;
                let pointer_copy = pointer;
                // restore the floating size, then center it under the pointer
                registry.restore(id);
                if let Some(width) = registry.get(id).map(|window| window.rect.width) {
                    let x = pointer_copy.x - width as i32 / 2;
                    let y = (pointer_copy.y - 1).max(0);
                    registry.move_to(id, x.max(0), y);
                }
                let gesture = self.active.as_mut()?;
                gesture.demote_on_move = false;
                // deltas restart from zero at the demotion point
                gesture.grab = pointer_copy;
                gesture.latest = pointer_copy;
                if let Some(window) = registry.get(gesture.id) {
                    gesture.origin = SurfacePoint::new(window.rect.x, window.rect.y);
                }
                return self.preview(registry);
            }
            gesture.latest = pointer;
        }
        self.preview(registry)
    }

    /// Current preview rect: committed origin plus the accumulated offset,
    /// clamped to a non-negative origin. Never written to the registry.
    pub fn preview(&self, registry: &WindowRegistry) -> Option<SurfaceRect> {
        let gesture = self.active.as_ref()?;
        let window = registry.get(gesture.id)?;
        let dx = gesture.latest.x - gesture.grab.x;
        let dy = gesture.latest.y - gesture.grab.y;
        Some(
            SurfaceRect::new(
                gesture.origin.x + dx,
                gesture.origin.y + dy,
                window.rect.width,
                window.rect.height,
            )
            .clamp_origin_non_negative(),
        )
    }

    /// End the gesture with a single `move_to` commit at the release point.
    pub fn release(
        &mut self,
        registry: &mut WindowRegistry,
        pointer: SurfacePoint,
    ) -> Option<DragEnd> {
        let mut gesture = self.active.take()?;
        // fold the release point in like a final sample
        if gesture.demote_on_move && pointer != gesture.grab {
            gesture.pending = Some(pointer);
            self.active = Some(gesture);
            self.frame(registry);
            gesture = self.active.take()?;
        }
        gesture.latest = pointer;
        let window = registry.get(gesture.id)?;
        let committed = SurfaceRect::new(
            gesture.origin.x + (gesture.latest.x - gesture.grab.x),
            gesture.origin.y + (gesture.latest.y - gesture.grab.y),
            window.rect.width,
            window.rect.height,
        )
        .clamp_origin_non_negative();
        registry.move_to(gesture.id, committed.x, committed.y);
        tracing::debug!(window_id = %gesture.id, x = committed.x, y = committed.y, "drag commit");
        Some(DragEnd {
            id: gesture.id,
            committed,
        })
    }

    /// Discard the gesture without committing anything.
    pub fn cancel(&mut self) {
        if let Some(gesture) = self.active.take() {
            tracing::debug!(window_id = %gesture.id, "drag canceled");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::ContentKind;
    use crate::registry::OpenRequest;

    fn registry_with_window() -> (WindowRegistry, WindowId) {
        let mut registry = WindowRegistry::new(u32::MAX - 1);
        let id = registry.open(OpenRequest {
            kind: ContentKind::new("shell"),
            title: "Shell".into(),
            rect: SurfaceRect::new(50, 50, 400, 300),
        });
        (registry, id)
    }

    #[test]
    fn horizontal_drag_commits_offset_position() {
        let (mut registry, id) = registry_with_window();
        let mut drag = DragController::new();
        assert!(drag.begin(&mut registry, id, SurfacePoint::new(100, 55)));
        drag.sample(SurfacePoint::new(150, 55));
        drag.frame(&mut registry);
        // nothing committed mid-gesture
        assert_eq!(registry.get(id).unwrap().rect.x, 50);
        let end = drag
            .release(&mut registry, SurfacePoint::new(200, 55))
            .unwrap();
        assert_eq!(end.committed, SurfaceRect::new(150, 50, 400, 300));
        assert_eq!(registry.get(id).unwrap().rect, end.committed);
    }

    #[test]
    fn samples_coalesce_to_one_per_frame() {
        let (mut registry, id) = registry_with_window();
        let mut drag = DragController::new();
        drag.begin(&mut registry, id, SurfacePoint::new(100, 55));
        for x in 101..140 {
            drag.sample(SurfacePoint::new(x, 55));
        }
        let preview = drag.frame(&mut registry).unwrap();
        assert_eq!(preview.x, 50 + 39);
        // a second frame with no new samples changes nothing
        assert_eq!(drag.frame(&mut registry).unwrap(), preview);
    }

    #[test]
    fn drag_cannot_leave_the_surface_origin() {
        let (mut registry, id) = registry_with_window();
        let mut drag = DragController::new();
        drag.begin(&mut registry, id, SurfacePoint::new(100, 55));
        let end = drag
            .release(&mut registry, SurfacePoint::new(-400, -400))
            .unwrap();
        assert_eq!(end.committed.x, 0);
        assert_eq!(end.committed.y, 0);
    }

    #[test]
    fn begin_focuses_the_window() {
        let (mut registry, id) = registry_with_window();
        let other = registry.open(OpenRequest {
            kind: ContentKind::new("editor"),
            title: "Editor".into(),
            rect: SurfaceRect::new(500, 50, 400, 300),
        });
        assert_eq!(registry.active(), Some(other));
        let mut drag = DragController::new();
        drag.begin(&mut registry, id, SurfacePoint::new(100, 55));
        assert_eq!(registry.active(), Some(id));
        assert!(registry.get(id).unwrap().focused);
    }

    #[test]
    fn maximized_window_demotes_on_first_movement() {
        let (mut registry, id) = registry_with_window();
        registry.maximize(id, SurfaceRect::new(0, 0, 1024, 700));
        let mut drag = DragController::new();
        drag.begin(&mut registry, id, SurfacePoint::new(512, 4));
        drag.sample(SurfacePoint::new(512, 40));
        drag.frame(&mut registry);
        let window = registry.get(id).unwrap();
        assert!(!window.maximized);
        // floating size came back and the pane is centered under the pointer
        assert_eq!(window.rect.width, 400);
        assert_eq!(window.rect.height, 300);
        assert_eq!(window.rect.x, 512 - 200);
        let end = drag
            .release(&mut registry, SurfacePoint::new(512, 40))
            .unwrap();
        // deltas restarted from zero at the demotion point
        assert_eq!(end.committed.x, 512 - 200);
    }

    #[test]
    fn cancel_discards_without_commit() {
        let (mut registry, id) = registry_with_window();
        let mut drag = DragController::new();
        drag.begin(&mut registry, id, SurfacePoint::new(100, 55));
        drag.sample(SurfacePoint::new(300, 200));
        drag.frame(&mut registry);
        drag.cancel();
        assert_eq!(registry.get(id).unwrap().rect, SurfaceRect::new(50, 50, 400, 300));
        assert!(!drag.is_active());
    }

    #[test]
    fn gestures_are_exclusive_per_controller() {
        let (mut registry, id) = registry_with_window();
        let mut drag = DragController::new();
        assert!(drag.begin(&mut registry, id, SurfacePoint::new(100, 55)));
        assert!(!drag.begin(&mut registry, id, SurfacePoint::new(100, 55)));
    }

    #[test]
    fn minimized_and_animating_windows_reject_drags() {
        let (mut registry, id) = registry_with_window();
        registry.minimize(id);
        let mut drag = DragController::new();
        assert!(!drag.begin(&mut registry, id, SurfacePoint::new(100, 55)));
        registry.restore(id);
        registry.set_animating(id, true);
        assert!(!drag.begin(&mut registry, id, SurfacePoint::new(100, 55)));
    }
}
