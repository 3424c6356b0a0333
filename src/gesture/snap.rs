//! Snap-assist: edge trigger zones, debounced highlight, release commit.
//!
//! Zones are derived from the live workspace on every query so a host
//! resize shows up in the next pointer sample. Enter notifications are
//! debounced (~100 ms) to stop corner fly-throughs from flickering the
//! preview; exit fires immediately. All notifications travel over the
//! injected [`Broadcast`] channel so overlay renderers stay decoupled.

use std::collections::BTreeMap;
use std::time::Instant;

use crossbeam_channel::Receiver;

use crate::broadcast::Broadcast;
use crate::config::WmConfig;
use crate::geometry::{SurfacePoint, SurfaceRect};
use crate::registry::{WindowId, WindowRegistry};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum SnapZoneId {
    Left,
    Right,
    Top,
}

/// A trigger region plus the geometry a release inside it commits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SnapZone {
    pub id: SnapZoneId,
    pub trigger: SurfaceRect,
    pub preview: SurfaceRect,
}

/// Signal payload for the broadcast feed. `None` means "no active zone".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SnapPreview {
    pub zone: SnapZoneId,
    pub rect: SurfaceRect,
}

/// Derive the three trigger zones from the current workspace.
///
/// The side strips run the full workspace height; the top strip excludes
/// the columns they cover. A release in a literal corner therefore falls
/// in a side zone's bounds and never in the top zone's.
pub fn snap_zones(workspace: SurfaceRect, config: &WmConfig) -> [SnapZone; 3] {
    let side = config.snap_side_thickness.min(workspace.width);
    let top_depth = config.snap_top_thickness.min(workspace.height);
    let half = workspace.width / 2;
    let full = SurfaceRect::new(workspace.x, workspace.y, workspace.width, workspace.height);
    let left = SnapZone {
        id: SnapZoneId::Left,
        trigger: SurfaceRect::new(workspace.x, workspace.y, side, workspace.height),
        preview: SurfaceRect::new(workspace.x, workspace.y, half, workspace.height),
    };
    let right = SnapZone {
        id: SnapZoneId::Right,
        trigger: SurfaceRect::new(workspace.right() - side as i32, workspace.y, side, workspace.height),
        preview: SurfaceRect::new(
            workspace.x + half as i32,
            workspace.y,
            half,
            workspace.height,
        ),
    };
    let top = SnapZone {
        id: SnapZoneId::Top,
        trigger: SurfaceRect::new(
            workspace.x + side as i32,
            workspace.y,
            workspace.width.saturating_sub(side.saturating_mul(2)),
            top_depth,
        ),
        preview: full,
    };
    [left, right, top]
}

/// Classify a pointer sample against the trigger zones. Side zones are
/// tested first, which together with the top strip's excluded corners
/// makes them win corner positions.
pub fn classify(
    pointer: SurfacePoint,
    workspace: SurfaceRect,
    config: &WmConfig,
) -> Option<SnapZoneId> {
    snap_zones(workspace, config)
        .into_iter()
        .find(|zone| zone.trigger.contains(pointer))
        .map(|zone| zone.id)
}

#[derive(Debug)]
pub struct SnapEngine {
    config: WmConfig,
    feed: Broadcast<Option<SnapPreview>>,
    /// Zone the last sample landed in, debounced or not.
    hovered: Option<SnapZoneId>,
    /// Pending enter: zone plus the deadline at which it fires.
    armed: Option<(SnapZoneId, Instant)>,
    /// Zone whose enter notification has fired and not yet exited.
    entered: Option<SnapPreview>,
    /// Per-window cooldown after a snap commit; a second commit for the
    /// same window inside the interval is rejected.
    cooldowns: BTreeMap<WindowId, Instant>,
}

impl SnapEngine {
    pub fn new(config: WmConfig) -> Self {
        Self {
            config,
            feed: Broadcast::new(),
            hovered: None,
            armed: None,
            entered: None,
            cooldowns: BTreeMap::new(),
        }
    }

    /// Subscribe an overlay renderer to zone-change notifications.
    pub fn subscribe(&mut self) -> Receiver<Option<SnapPreview>> {
        self.feed.subscribe()
    }

    /// The zone whose enter notification is currently active.
    pub fn active_preview(&self) -> Option<SnapPreview> {
        self.entered
    }

    pub fn snapping(&self, id: WindowId, now: Instant) -> bool {
        self.cooldowns
            .get(&id)
            .is_some_and(|deadline| now < *deadline)
    }

    /// Feed one drag pointer sample through the zone state machine.
    pub fn update(&mut self, pointer: SurfacePoint, workspace: SurfaceRect, now: Instant) {
        let zone = classify(pointer, workspace, &self.config);
        if zone != self.hovered {
            self.hovered = zone;
            // any pending highlight timer dies with the zone change
            self.armed = None;
            match zone {
                Some(id) => {
                    self.armed = Some((id, now + self.config.snap_debounce));
                }
                None => {
                    if self.entered.take().is_some() {
                        tracing::trace!("snap zone exit");
                        self.feed.publish(None);
                    }
                }
            }
        }
        if let Some((id, deadline)) = self.armed
            && now >= deadline
        {
            self.armed = None;
            if let Some(zone) = snap_zones(workspace, &self.config)
                .into_iter()
                .find(|zone| zone.id == id)
            {
                let preview = SnapPreview {
                    zone: id,
                    rect: zone.preview,
                };
                tracing::trace!(zone = ?id, "snap zone enter");
                self.entered = Some(preview);
                self.feed.publish(Some(preview));
            }
        } else if let Some(entered) = self.entered
            && let Some(zone) = snap_zones(workspace, &self.config)
                .into_iter()
                .find(|zone| zone.id == entered.zone)
            && zone.preview != entered.rect
        {
            // the surface resized mid-hover; refresh the preview rect
            let preview = SnapPreview {
                zone: entered.zone,
                rect: zone.preview,
            };
            self.entered = Some(preview);
            self.feed.publish(Some(preview));
        }
    }

    /// Adjudicate a drag release. Commits a snapped geometry when the
    /// release point sits inside a zone and no snap commit is already in
    /// flight for this window; otherwise leaves geometry untouched. Either
    /// way the overlay is told the zone went away.
    pub fn release(
        &mut self,
        registry: &mut WindowRegistry,
        id: WindowId,
        pointer: SurfacePoint,
        workspace: SurfaceRect,
        now: Instant,
    ) -> bool {
        self.armed = None;
        self.hovered = None;
        if self.entered.take().is_some() {
            self.feed.publish(None);
        }
        self.expire_cooldowns(now);

        let Some(zone_id) = classify(pointer, workspace, &self.config) else {
            return false;
        };
        if self.snapping(id, now) {
            tracing::debug!(window_id = %id, "snap rejected: commit already in flight");
            return false;
        }
        if registry.get(id).is_none() {
            return false;
        }
        let half = workspace.width / 2;
        match zone_id {
            SnapZoneId::Left => {
                registry.resize(id, half, workspace.height);
                registry.move_to(id, workspace.x, workspace.y);
            }
            SnapZoneId::Right => {
                registry.resize(id, half, workspace.height);
                registry.move_to(id, workspace.x + half as i32, workspace.y);
            }
            SnapZoneId::Top => {
                registry.maximize(id, workspace);
            }
        }
        self.cooldowns.insert(id, now + self.config.snap_cooldown);
        tracing::debug!(window_id = %id, zone = ?zone_id, "snap commit");
        true
    }

    /// Drop all transient state (gesture cancel or component teardown);
    /// pending timers must never fire against a disposed window.
    pub fn reset(&mut self) {
        self.armed = None;
        self.hovered = None;
        if self.entered.take().is_some() {
            self.feed.publish(None);
        }
    }

    fn expire_cooldowns(&mut self, now: Instant) {
        self.cooldowns.retain(|_, deadline| now < *deadline);
    }
}
