//! The dock: launchers per content kind, affordances per minimized pane.
//!
//! The dock is a consumer of the registry, never an owner of window state.
//! It lays its icons out from live surface metrics and hands their bounds
//! to the animation coordinator as collapse/expand targets.

use std::time::Instant;

use crate::animate::AnimationCoordinator;
use crate::constants::{DOCK_SLOT_GAP, DOCK_SLOT_WIDTH};
use crate::content::{ContentKind, ContentRegistry};
use crate::geometry::{SurfacePoint, SurfaceRect};
use crate::registry::{OpenRequest, WindowId, WindowRegistry};
use crate::surface::SurfaceMetrics;

/// What a dock slot stands for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DockEntry {
    /// One per registered content kind.
    Launcher(ContentKind),
    /// One per minimized window.
    Minimized(WindowId),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DockSlot {
    pub entry: DockEntry,
    pub rect: SurfaceRect,
}

/// Outcome of a launcher activation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DockAction {
    Opened(WindowId),
    Focused(WindowId),
    Restored(WindowId),
}

#[derive(Debug, Clone, Copy)]
pub struct Dock {
    pub slot_width: u16,
    pub slot_gap: u16,
}

impl Default for Dock {
    fn default() -> Self {
        Self {
            slot_width: DOCK_SLOT_WIDTH,
            slot_gap: DOCK_SLOT_GAP,
        }
    }
}

impl Dock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Lay out the dock for the current frame: launchers first (provider
    /// registration order), then minimized affordances. Recomputed from
    /// live surface metrics on every call.
    pub fn slots(
        &self,
        registry: &WindowRegistry,
        content: &ContentRegistry,
        surface: &dyn SurfaceMetrics,
    ) -> Vec<DockSlot> {
        let strip = surface.dock_strip();
        if strip.height == 0 || strip.width == 0 {
            return Vec::new();
        }
        let mut slots = Vec::new();
        let mut x = strip.x + self.slot_gap as i32;
        let step = (self.slot_width + self.slot_gap) as i32;
        for kind in content.kinds() {
            if x + self.slot_width as i32 > strip.right() {
                break;
            }
            slots.push(DockSlot {
                entry: DockEntry::Launcher(kind.clone()),
                rect: SurfaceRect::new(x, strip.y, self.slot_width, strip.height),
            });
            x += step;
        }
        for id in registry.minimized() {
            if x + self.slot_width as i32 > strip.right() {
                break;
            }
            slots.push(DockSlot {
                entry: DockEntry::Minimized(id),
                rect: SurfaceRect::new(x, strip.y, self.slot_width, strip.height),
            });
            x += step;
        }
        slots
    }

    /// Bounds of the launcher icon for `kind`, used as the animation
    /// target. `None` when the kind has no slot (unregistered, or the dock
    /// ran out of room) — callers fall back to a non-animated state change.
    pub fn anchor_for_kind(
        &self,
        registry: &WindowRegistry,
        content: &ContentRegistry,
        surface: &dyn SurfaceMetrics,
        kind: &ContentKind,
    ) -> Option<SurfaceRect> {
        self.slots(registry, content, surface)
            .into_iter()
            .find(|slot| matches!(&slot.entry, DockEntry::Launcher(k) if k == kind))
            .map(|slot| slot.rect)
    }

    /// Bounds of the minimized affordance for `id`, falling back to the
    /// kind's launcher slot when the affordance has not been laid out yet.
    pub fn anchor_for_window(
        &self,
        registry: &WindowRegistry,
        content: &ContentRegistry,
        surface: &dyn SurfaceMetrics,
        id: WindowId,
    ) -> Option<SurfaceRect> {
        let slots = self.slots(registry, content, surface);
        if let Some(slot) = slots
            .iter()
            .find(|slot| matches!(slot.entry, DockEntry::Minimized(slot_id) if slot_id == id))
        {
            return Some(slot.rect);
        }
        let kind = registry.get(id)?.kind.clone();
        slots
            .into_iter()
            .find(|slot| matches!(&slot.entry, DockEntry::Launcher(k) if *k == kind))
            .map(|slot| slot.rect)
    }

    pub fn slot_at(slots: &[DockSlot], point: SurfacePoint) -> Option<&DockSlot> {
        slots.iter().find(|slot| slot.rect.contains(point))
    }

    /// Resolve a launch request: focus an open pane, restore a minimized
    /// one (animated from this dock's icon), or open a fresh pane using
    /// the provider's size hints.
    pub fn activate(
        &self,
        registry: &mut WindowRegistry,
        coordinator: &mut AnimationCoordinator,
        content: &ContentRegistry,
        surface: &dyn SurfaceMetrics,
        kind: &ContentKind,
        now: Instant,
    ) -> DockAction {
        if let Some(&id) = registry.visible_of_kind(kind).last() {
            registry.focus(id);
            return DockAction::Focused(id);
        }
        if let Some(&id) = registry.minimized_of_kind(kind).first() {
            let anchor = self.anchor_for_window(registry, content, surface, id);
            coordinator.begin_restore(registry, id, anchor, now);
            registry.focus(id);
            return DockAction::Restored(id);
        }
        let hints = content.size_hints(kind);
        let workspace = surface.workspace();
        let (width, height) = hints.default_size.unwrap_or((
            (workspace.width / 2).max(1),
            (workspace.height / 2).max(1),
        ));
        // stagger fresh panes a little so they do not stack exactly
        let offset = (registry.len() as i32 % 5) * 24;
        let id = registry.open(OpenRequest {
            kind: kind.clone(),
            title: content.label(kind),
            rect: SurfaceRect::new(40 + offset, 30 + offset, width, height),
        });
        DockAction::Opened(id)
    }

    /// Restore the pane behind a minimized affordance click.
    pub fn restore(
        &self,
        registry: &mut WindowRegistry,
        coordinator: &mut AnimationCoordinator,
        content: &ContentRegistry,
        surface: &dyn SurfaceMetrics,
        id: WindowId,
        now: Instant,
    ) -> bool {
        let anchor = self.anchor_for_window(registry, content, surface, id);
        let restored = coordinator.begin_restore(registry, id, anchor, now);
        if restored {
            registry.focus(id);
        }
        restored
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::WmConfig;
    use crate::content::{ContentProvider, SizeHints};
    use crate::surface::FixedSurface;
    use ratatui::Frame;
    use ratatui::layout::Rect;

    struct Stub(&'static str);

    impl ContentProvider for Stub {
        fn label(&self) -> &str {
            self.0
        }

        fn render_body(&mut self, _frame: &mut Frame, _area: Rect, _focused: bool) {}

        fn size_hints(&self) -> SizeHints {
            SizeHints {
                default_size: Some((400, 300)),
                ..SizeHints::default()
            }
        }
    }

    fn setup() -> (
        WindowRegistry,
        AnimationCoordinator,
        ContentRegistry,
        FixedSurface,
        Dock,
    ) {
        let config = WmConfig::default();
        let mut content = ContentRegistry::new();
        content.register(ContentKind::new("editor"), Box::new(Stub("Editor")));
        content.register(ContentKind::new("shell"), Box::new(Stub("Shell")));
        (
            WindowRegistry::new(config.z_max),
            AnimationCoordinator::new(&config),
            content,
            FixedSurface::with_reservations(1024, 768, 0, 40),
            Dock::new(),
        )
    }

    #[test]
    fn one_launcher_per_kind_plus_minimized_affordances() {
        let (mut registry, mut coordinator, content, surface, dock) = setup();
        let kind = ContentKind::new("shell");
        let id = match dock.activate(
            &mut registry,
            &mut coordinator,
            &content,
            &surface,
            &kind,
            Instant::now(),
        ) {
            DockAction::Opened(id) => id,
            other => panic!("expected open, got {other:?}"),
        };
        assert_eq!(dock.slots(&registry, &content, &surface).len(), 2);
        registry.minimize(id);
        let slots = dock.slots(&registry, &content, &surface);
        assert_eq!(slots.len(), 3);
        assert!(matches!(slots[2].entry, DockEntry::Minimized(slot_id) if slot_id == id));
    }

    #[test]
    fn activate_prefers_focus_then_restore_then_open() {
        let (mut registry, mut coordinator, content, surface, dock) = setup();
        let kind = ContentKind::new("shell");
        let now = Instant::now();

        let opened = dock.activate(&mut registry, &mut coordinator, &content, &surface, &kind, now);
        let DockAction::Opened(id) = opened else {
            panic!("expected open");
        };

        // visible pane: a second activation focuses it
        assert_eq!(
            dock.activate(&mut registry, &mut coordinator, &content, &surface, &kind, now),
            DockAction::Focused(id)
        );

        // minimized pane: activation restores instead of opening another
        registry.minimize(id);
        assert_eq!(
            dock.activate(&mut registry, &mut coordinator, &content, &surface, &kind, now),
            DockAction::Restored(id)
        );
    }

    #[test]
    fn anchors_live_in_the_dock_strip() {
        let (registry, _coordinator, content, surface, dock) = setup();
        let anchor = dock
            .anchor_for_kind(&registry, &content, &surface, &ContentKind::new("shell"))
            .unwrap();
        assert!(surface.dock_strip().intersects(&anchor));
        assert!(
            dock.anchor_for_kind(&registry, &content, &surface, &ContentKind::new("nope"))
                .is_none()
        );
    }

    #[test]
    fn zero_height_dock_offers_no_anchor() {
        let (registry, _coordinator, content, _surface, dock) = setup();
        let flat = FixedSurface::new(1024, 768);
        assert!(dock.slots(&registry, &content, &flat).is_empty());
        assert!(
            dock.anchor_for_kind(&registry, &content, &flat, &ContentKind::new("shell"))
                .is_none()
        );
    }
}
