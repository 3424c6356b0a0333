//! Shared crate-wide constants.

use std::time::Duration;

/// Default minimum committed pane size, in content units.
pub const DEFAULT_MIN_WIDTH: u16 = 150;
pub const DEFAULT_MIN_HEIGHT: u16 = 100;

/// Thickness of the left/right snap trigger strips, measured inward from
/// the workspace edges.
pub const SNAP_SIDE_THICKNESS: u16 = 16;

/// Thickness of the top snap trigger strip. The strip excludes the corner
/// columns covered by the side strips, which is what makes side zones win
/// corner releases.
pub const SNAP_TOP_THICKNESS: u16 = 8;

/// Delay between a pointer entering a trigger strip and the enter
/// notification firing. Passing through a corner quickly never highlights.
pub const SNAP_ENTER_DEBOUNCE: Duration = Duration::from_millis(100);

/// Per-window cooldown after a snap commit. A second snap commit for the
/// same window inside this interval is rejected.
pub const SNAP_COMMIT_COOLDOWN: Duration = Duration::from_millis(400);

/// Durations of the minimize (collapse) and restore (expand) transitions.
pub const COLLAPSE_DURATION: Duration = Duration::from_millis(400);
pub const EXPAND_DURATION: Duration = Duration::from_millis(400);

/// Stacking ceiling. `next_z` holds here instead of wrapping, so very
/// long-lived workspaces degrade to "new windows stack at the ceiling".
pub const DEFAULT_Z_MAX: u32 = u32::MAX - 1;

/// Upper bound of the animated icon footprint a pane collapses into. The
/// actual footprint is the dock anchor's bounds capped to this size.
pub const ICON_FOOTPRINT_WIDTH: u16 = 48;
pub const ICON_FOOTPRINT_HEIGHT: u16 = 32;

/// Dock layout, in content units.
pub const DOCK_SLOT_WIDTH: u16 = 10;
pub const DOCK_SLOT_GAP: u16 = 2;
