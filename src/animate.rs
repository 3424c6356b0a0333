//! Minimize/restore transitions.
//!
//! Each transition is a two-keyframe interpolation between a pane's
//! on-screen rect and its dock icon footprint, with distinct eases for
//! collapse and expand. The registry flag flip is a two-phase commit:
//! phase one sets the transient `animating` flag synchronously, phase two
//! runs in [`AnimationCoordinator::tick`] on natural completion and
//! performs the real `minimize`/`restore`. When no dock anchor resolves
//! the transition is skipped and the state change happens immediately —
//! the animation is an enhancement, never a precondition.

use std::time::{Duration, Instant};

use crate::config::WmConfig;
use crate::constants::{ICON_FOOTPRINT_HEIGHT, ICON_FOOTPRINT_WIDTH};
use crate::geometry::{SurfaceRect, lerp_rect};
use crate::registry::{WindowId, WindowRegistry};

pub mod easing {
    //! Cubic easing curves; `t` in `[0, 1]`.

    #[inline]
    pub fn ease_in_cubic(t: f32) -> f32 {
        t * t * t
    }

    #[inline]
    pub fn ease_out_cubic(t: f32) -> f32 {
        1.0 - (1.0 - t).powi(3)
    }

    #[inline]
    pub fn ease_in_out(t: f32) -> f32 {
        if t < 0.5 {
            4.0 * t * t * t
        } else {
            1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionKind {
    /// Shrinking toward the dock icon; finishes with `minimize`.
    Collapse,
    /// Growing from the dock icon back to the saved geometry; finishes
    /// with `restore`.
    Expand,
}

#[derive(Debug, Clone, Copy)]
struct Transition {
    id: WindowId,
    kind: TransitionKind,
    from: SurfaceRect,
    to: SurfaceRect,
    started: Instant,
    duration: Duration,
}

impl Transition {
    fn progress(&self, now: Instant) -> f32 {
        if self.duration.is_zero() {
            return 1.0;
        }
        let elapsed = now.saturating_duration_since(self.started);
        (elapsed.as_secs_f32() / self.duration.as_secs_f32()).min(1.0)
    }

    fn rect_at(&self, now: Instant) -> SurfaceRect {
        let eased = match self.kind {
            TransitionKind::Collapse => easing::ease_in_cubic(self.progress(now)),
            TransitionKind::Expand => easing::ease_out_cubic(self.progress(now)),
        };
        lerp_rect(self.from, self.to, eased)
    }
}

/// A pane's visual rect for the current frame while its transition plays.
#[derive(Debug, Clone, Copy)]
pub struct TransitionFrame {
    pub id: WindowId,
    pub kind: TransitionKind,
    pub rect: SurfaceRect,
}

#[derive(Debug)]
pub struct AnimationCoordinator {
    collapse_duration: Duration,
    expand_duration: Duration,
    transitions: Vec<Transition>,
}

impl AnimationCoordinator {
    pub fn new(config: &WmConfig) -> Self {
        Self {
            collapse_duration: config.collapse_duration,
            expand_duration: config.expand_duration,
            transitions: Vec::new(),
        }
    }

    pub fn has_transitions(&self) -> bool {
        !self.transitions.is_empty()
    }

    /// Start minimizing `id` toward `anchor` (a dock icon's bounds).
    ///
    /// Without a resolvable anchor the pane minimizes immediately. A
    /// second minimize while the pane is still animating is rejected.
    pub fn begin_minimize(
        &mut self,
        registry: &mut WindowRegistry,
        id: WindowId,
        anchor: Option<SurfaceRect>,
        now: Instant,
    ) -> bool {
        let Some(window) = registry.get(id) else {
            return false;
        };
        if window.minimized || window.animating {
            return false;
        }
        let from = window.rect;
        let Some(anchor) = anchor else {
            registry.minimize(id);
            return true;
        };
        let to = anchor.centered_cap(ICON_FOOTPRINT_WIDTH, ICON_FOOTPRINT_HEIGHT);
        self.replace(id);
        registry.set_animating(id, true);
        tracing::debug!(window_id = %id, "collapse transition start");
        self.transitions.push(Transition {
            id,
            kind: TransitionKind::Collapse,
            from,
            to,
            started: now,
            duration: self.collapse_duration,
        });
        true
    }

    /// Start restoring a minimized `id` from `anchor`.
    ///
    /// The pane is parked at the icon footprint and expands back to its
    /// saved geometry; `restore` commits on completion. Without an anchor
    /// the restore happens immediately.
    pub fn begin_restore(
        &mut self,
        registry: &mut WindowRegistry,
        id: WindowId,
        anchor: Option<SurfaceRect>,
        now: Instant,
    ) -> bool {
        let Some(window) = registry.get(id) else {
            return false;
        };
        if !window.minimized || window.animating {
            return false;
        }
        let to = window.rect;
        let Some(anchor) = anchor else {
            registry.restore(id);
            return true;
        };
        let from = anchor.centered_cap(ICON_FOOTPRINT_WIDTH, ICON_FOOTPRINT_HEIGHT);
        self.replace(id);
        registry.set_animating(id, true);
        tracing::debug!(window_id = %id, "expand transition start");
        self.transitions.push(Transition {
            id,
            kind: TransitionKind::Expand,
            from,
            to,
            started: now,
            duration: self.expand_duration,
        });
        true
    }

    /// Advance all transitions. Completed ones perform their phase-two
    /// registry commit and drop out; the rest report their interpolated
    /// rect for this frame.
    pub fn tick(&mut self, registry: &mut WindowRegistry, now: Instant) -> Vec<TransitionFrame> {
        let mut frames = Vec::new();
        let mut done = Vec::new();
        for transition in &self.transitions {
            if transition.progress(now) >= 1.0 {
                done.push(*transition);
            } else {
                frames.push(TransitionFrame {
                    id: transition.id,
                    kind: transition.kind,
                    rect: transition.rect_at(now),
                });
            }
        }
        self.transitions
            .retain(|transition| transition.progress(now) < 1.0);
        for transition in done {
            match transition.kind {
                TransitionKind::Collapse => registry.minimize(transition.id),
                TransitionKind::Expand => registry.restore(transition.id),
            }
            registry.set_animating(transition.id, false);
            tracing::debug!(window_id = %transition.id, kind = ?transition.kind, "transition finished");
        }
        frames
    }

    /// Tear down any transition for `id` without committing its state
    /// change. Used when the pane is closed mid-flight so the timer can
    /// never fire against a disposed window.
    pub fn cancel(&mut self, registry: &mut WindowRegistry, id: WindowId) {
        let before = self.transitions.len();
        self.transitions.retain(|transition| transition.id != id);
        if self.transitions.len() != before {
            registry.set_animating(id, false);
            tracing::debug!(window_id = %id, "transition canceled");
        }
    }

    fn replace(&mut self, id: WindowId) {
        // a new transition on the same element replaces any in-flight one
        self.transitions.retain(|transition| transition.id != id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::ContentKind;
    use crate::registry::OpenRequest;

    fn setup() -> (WindowRegistry, AnimationCoordinator, WindowId) {
        let config = WmConfig::default();
        let mut registry = WindowRegistry::new(config.z_max);
        let id = registry.open(OpenRequest {
            kind: ContentKind::new("shell"),
            title: "Shell".into(),
            rect: SurfaceRect::new(150, 50, 400, 300),
        });
        (registry, AnimationCoordinator::new(&config), id)
    }

    fn anchor() -> SurfaceRect {
        SurfaceRect::new(400, 700, 10, 4)
    }

    #[test]
    fn minimize_commits_only_on_natural_completion() {
        let (mut registry, mut coordinator, id) = setup();
        let t0 = Instant::now();
        assert!(coordinator.begin_minimize(&mut registry, id, Some(anchor()), t0));

        // phase one: transient flag only
        assert!(registry.is_animating(id));
        assert!(!registry.get(id).unwrap().minimized);

        let frames = coordinator.tick(&mut registry, t0 + Duration::from_millis(200));
        assert_eq!(frames.len(), 1);
        assert!(registry.is_animating(id));

        let frames = coordinator.tick(&mut registry, t0 + Duration::from_millis(450));
        assert!(frames.is_empty());
        // phase two: exactly one flag flip, coincident with the commit
        assert!(!registry.is_animating(id));
        assert!(registry.get(id).unwrap().minimized);
    }

    #[test]
    fn second_minimize_is_rejected_while_animating() {
        let (mut registry, mut coordinator, id) = setup();
        let t0 = Instant::now();
        assert!(coordinator.begin_minimize(&mut registry, id, Some(anchor()), t0));
        assert!(!coordinator.begin_minimize(&mut registry, id, Some(anchor()), t0));
    }

    #[test]
    fn missing_anchor_minimizes_immediately() {
        let (mut registry, mut coordinator, id) = setup();
        assert!(coordinator.begin_minimize(&mut registry, id, None, Instant::now()));
        let window = registry.get(id).unwrap();
        assert!(window.minimized);
        assert!(!window.animating);
        assert!(!coordinator.has_transitions());
    }

    #[test]
    fn restore_expands_from_icon_back_to_saved_geometry() {
        let (mut registry, mut coordinator, id) = setup();
        let saved = registry.get(id).unwrap().rect;
        registry.minimize(id);
        let t0 = Instant::now();
        assert!(coordinator.begin_restore(&mut registry, id, Some(anchor()), t0));

        let frames = coordinator.tick(&mut registry, t0);
        // parked at the icon footprint at t=0
        assert_eq!(frames[0].rect, anchor().centered_cap(48, 32));
        assert!(registry.get(id).unwrap().minimized);

        coordinator.tick(&mut registry, t0 + Duration::from_millis(450));
        let window = registry.get(id).unwrap();
        assert!(!window.minimized);
        assert!(!window.animating);
        assert_eq!(window.rect, saved);
    }

    #[test]
    fn host_that_never_ticks_still_reaches_consistency_via_fallback() {
        // a host that cannot animate passes no anchor; the state commit
        // must not depend on a completion callback that never comes
        let (mut registry, mut coordinator, id) = setup();
        coordinator.begin_minimize(&mut registry, id, None, Instant::now());
        coordinator.begin_restore(&mut registry, id, None, Instant::now());
        let window = registry.get(id).unwrap();
        assert!(!window.minimized && !window.animating);
    }

    #[test]
    fn new_transition_replaces_in_flight_one() {
        let (mut registry, mut coordinator, id) = setup();
        let t0 = Instant::now();
        coordinator.begin_minimize(&mut registry, id, Some(anchor()), t0);
        // close mid-flight: the transition is torn down, no late commit
        coordinator.cancel(&mut registry, id);
        assert!(!coordinator.has_transitions());
        assert!(!registry.is_animating(id));
        let frames = coordinator.tick(&mut registry, t0 + Duration::from_secs(1));
        assert!(frames.is_empty());
        assert!(!registry.get(id).unwrap().minimized);
    }

    #[test]
    fn collapse_ease_accelerates_into_the_dock() {
        // ease-in: the first half of the time covers less than half the path
        let early = easing::ease_in_cubic(0.5);
        assert!(early < 0.5);
        let late = easing::ease_out_cubic(0.5);
        assert!(late > 0.5);
    }
}
