//! Manager configuration, validated once at construction time.
//!
//! Gesture code never validates: a config that reaches a controller is
//! already known-good, which keeps the per-sample paths branch-light.

use std::time::Duration;

use thiserror::Error;

use crate::constants::{
    COLLAPSE_DURATION, DEFAULT_MIN_HEIGHT, DEFAULT_MIN_WIDTH, DEFAULT_Z_MAX, EXPAND_DURATION,
    SNAP_COMMIT_COOLDOWN, SNAP_ENTER_DEBOUNCE, SNAP_SIDE_THICKNESS, SNAP_TOP_THICKNESS,
};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("minimum pane size {width}x{height} must be non-zero on both axes")]
    ZeroMinimum { width: u16, height: u16 },
    #[error("minimum width {min} exceeds maximum width {max}")]
    WidthBoundsInverted { min: u16, max: u16 },
    #[error("minimum height {min} exceeds maximum height {max}")]
    HeightBoundsInverted { min: u16, max: u16 },
}

/// Tunables for the whole manager. Construct, [`validate`](Self::validate),
/// then share by reference; nothing mutates it afterwards.
#[derive(Debug, Clone)]
pub struct WmConfig {
    /// Smallest committable pane size, in content units.
    pub min_width: u16,
    pub min_height: u16,
    /// Largest committable pane size. `None` leaves the axis unbounded.
    pub max_width: Option<u16>,
    pub max_height: Option<u16>,
    /// Snap trigger strip thickness along the side and top edges.
    pub snap_side_thickness: u16,
    pub snap_top_thickness: u16,
    /// Debounce before a snap-zone enter notification fires.
    pub snap_debounce: Duration,
    /// Per-window cooldown rejecting re-entrant snap commits.
    pub snap_cooldown: Duration,
    /// Minimize / restore transition durations.
    pub collapse_duration: Duration,
    pub expand_duration: Duration,
    /// Stacking ceiling; `next_z` holds here rather than wrapping.
    pub z_max: u32,
}

impl Default for WmConfig {
    fn default() -> Self {
        Self {
            min_width: DEFAULT_MIN_WIDTH,
            min_height: DEFAULT_MIN_HEIGHT,
            max_width: None,
            max_height: None,
            snap_side_thickness: SNAP_SIDE_THICKNESS,
            snap_top_thickness: SNAP_TOP_THICKNESS,
            snap_debounce: SNAP_ENTER_DEBOUNCE,
            snap_cooldown: SNAP_COMMIT_COOLDOWN,
            collapse_duration: COLLAPSE_DURATION,
            expand_duration: EXPAND_DURATION,
            z_max: DEFAULT_Z_MAX,
        }
    }
}

impl WmConfig {
    /// Reject impossible bounds before any gesture can run into them.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min_width == 0 || self.min_height == 0 {
            return Err(ConfigError::ZeroMinimum {
                width: self.min_width,
                height: self.min_height,
            });
        }
        if let Some(max) = self.max_width
            && self.min_width > max
        {
            return Err(ConfigError::WidthBoundsInverted {
                min: self.min_width,
                max,
            });
        }
        if let Some(max) = self.max_height
            && self.min_height > max
        {
            return Err(ConfigError::HeightBoundsInverted {
                min: self.min_height,
                max,
            });
        }
        Ok(())
    }

    pub fn clamp_width(&self, width: u16) -> u16 {
        let width = width.max(self.min_width);
        match self.max_width {
            Some(max) => width.min(max),
            None => width,
        }
    }

    pub fn clamp_height(&self, height: u16) -> u16 {
        let height = height.max(self.min_height);
        match self.max_height {
            Some(max) => height.min(max),
            None => height,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert_eq!(WmConfig::default().validate(), Ok(()));
    }

    #[test]
    fn inverted_bounds_are_rejected_at_config_time() {
        let cfg = WmConfig {
            min_width: 300,
            max_width: Some(200),
            ..WmConfig::default()
        };
        assert_eq!(
            cfg.validate(),
            Err(ConfigError::WidthBoundsInverted { min: 300, max: 200 })
        );

        let cfg = WmConfig {
            min_height: 0,
            ..WmConfig::default()
        };
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::ZeroMinimum { .. })
        ));
    }

    #[test]
    fn clamp_respects_open_ended_maximum() {
        let cfg = WmConfig::default();
        assert_eq!(cfg.clamp_width(20), cfg.min_width);
        assert_eq!(cfg.clamp_width(60_000), 60_000);
    }
}
