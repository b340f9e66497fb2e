//! Configuration constants and settings for the converter.

use serde::{Deserialize, Serialize};

use crate::generator::Dialect;

/// Relative tolerance for coordinate coincidence tests.
pub const REL_TOL: f64 = 1e-9;

/// Absolute floor for coordinate coincidence tests near zero.
pub const ABS_TOL: f64 = 1e-12;

/// Twice-area threshold below which three smoothing points count as colinear.
pub const COLINEAR_TOL: f64 = 1e-3;

/// Bulge magnitude below which a polyline span is treated as straight.
pub const BULGE_EPS: f64 = 1e-12;

/// Upper bound on sampling columns or smoothing stripes in one request.
pub const MAX_STEP_COUNT: usize = 10_000_000;

/// Default number of lateral probe columns across the blade width.
pub const DEFAULT_PROBE_OFFSETS: usize = 3;

/// Default blade width in mm.
pub const DEFAULT_BLADE_WIDTH: f64 = 3.5;

/// Default blade diameter in mm.
pub const DEFAULT_BLADE_DIAMETER: f64 = 400.0;

/// Default traverse start (machine Y) in mm.
pub const DEFAULT_TRAVERSE_START: f64 = 1000.0;

/// Default traverse end (machine Y) in mm.
pub const DEFAULT_TRAVERSE_END: f64 = 500.0;

/// Default clearance height in mm.
pub const DEFAULT_Z_CLEARANCE: f64 = 50.0;

/// Default maximum Z height in mm.
pub const DEFAULT_Z_MAX: f64 = 100.0;

/// Default spindle speed in rpm.
pub const DEFAULT_SPINDLE_RPM: u32 = 1500;

/// Default plunge feed in mm/min.
pub const DEFAULT_PLUNGE_FEED: f64 = 500.0;

/// Default roughing cut feed in mm/min.
pub const DEFAULT_ROUGHING_FEED: f64 = 2000.0;

/// Default smoothing (lateral) cut feed in mm/min.
pub const DEFAULT_SMOOTHING_FEED: f64 = 800.0;

/// Machine table orientation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TableOrientation {
    /// Default orientation, X along the profile.
    #[default]
    Front,
    /// Table turned by 90°, X and Y are swapped at emission.
    Side,
}

impl TableOrientation {
    /// Whether coordinates must be swapped when posting.
    pub fn inverts_xy(&self) -> bool {
        matches!(self, TableOrientation::Side)
    }
}

impl std::fmt::Display for TableOrientation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TableOrientation::Front => write!(f, "front"),
            TableOrientation::Side => write!(f, "side"),
        }
    }
}

/// Machine section of the settings document.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MachineSettings {
    pub table_orientation: TableOrientation,
    pub controller: Dialect,
    /// Clearance height for retracts.
    pub z_clearance: f64,
    /// Machine max height.
    pub z_max: f64,
    pub spindle_rpm: u32,
}

impl Default for MachineSettings {
    fn default() -> Self {
        Self {
            table_orientation: TableOrientation::Front,
            controller: Dialect::Osai,
            z_clearance: DEFAULT_Z_CLEARANCE,
            z_max: DEFAULT_Z_MAX,
            spindle_rpm: DEFAULT_SPINDLE_RPM,
        }
    }
}

/// Saw blade section of the settings document.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolSettings {
    pub blade_diameter: f64,
    pub blade_width: f64,
}

impl Default for ToolSettings {
    fn default() -> Self {
        Self {
            blade_diameter: DEFAULT_BLADE_DIAMETER,
            blade_width: DEFAULT_BLADE_WIDTH,
        }
    }
}

/// Toolpath section of the settings document.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolpathSettings {
    /// Traverse start position (machine Y).
    pub start: f64,
    /// Traverse end position (machine Y).
    pub end: f64,
    pub roughing_stepover: f64,
    pub smoothing_resolution: f64,
    /// Depth offset added to every roughing sample.
    pub stock_allowance: f64,
    /// Depth offset added to every smoothing sample.
    pub smoothing_stock: f64,
    /// Distance between smoothing stripes; blade width when unset.
    pub smoothing_step: Option<f64>,
    /// Lateral probe columns across the blade width.
    pub probe_offsets: usize,
    pub plunge_feed: f64,
    pub roughing_feedrate: f64,
    pub smoothing_feedrate: f64,
}

impl Default for ToolpathSettings {
    fn default() -> Self {
        Self {
            start: DEFAULT_TRAVERSE_START,
            end: DEFAULT_TRAVERSE_END,
            roughing_stepover: 0.5,
            smoothing_resolution: 0.2,
            stock_allowance: 0.0,
            smoothing_stock: 0.0,
            smoothing_step: None,
            probe_offsets: DEFAULT_PROBE_OFFSETS,
            plunge_feed: DEFAULT_PLUNGE_FEED,
            roughing_feedrate: DEFAULT_ROUGHING_FEED,
            smoothing_feedrate: DEFAULT_SMOOTHING_FEED,
        }
    }
}

/// Complete settings document.
///
/// Every field has a default, so a partial JSON file only needs to list the
/// values it overrides.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub machine_settings: MachineSettings,
    pub tool_settings: ToolSettings,
    pub toolpath_settings: ToolpathSettings,
}

impl Settings {
    /// Stripe step for smoothing, falling back to the blade width.
    pub fn stripe_step(&self) -> f64 {
        self.toolpath_settings
            .smoothing_step
            .unwrap_or(self.tool_settings.blade_width)
            .abs()
    }
}

/// Utility functions for floating-point comparisons.
pub mod float_cmp {
    use super::{ABS_TOL, REL_TOL};

    /// Check if two floats coincide within the relative tolerance.
    #[inline]
    pub fn is_close(a: f64, b: f64) -> bool {
        (a - b).abs() <= (REL_TOL * a.abs().max(b.abs())).max(ABS_TOL)
    }

    /// Check if a is in range [min, max].
    #[inline]
    pub fn in_range(a: f64, min: f64, max: f64) -> bool {
        a >= min && a <= max
    }

    /// Number of stations `0, step, 2*step, ...` that fit in `span`,
    /// counting both ends when the span is an exact multiple of the step.
    ///
    /// `None` when the count is not finite or exceeds [`super::MAX_STEP_COUNT`].
    pub fn step_count(span: f64, step: f64) -> Option<usize> {
        let n = (span / step + 1e-9).floor();
        if !n.is_finite() || n < 0.0 || n >= super::MAX_STEP_COUNT as f64 {
            return None;
        }
        (n as usize).checked_add(1)
    }
}

/// Utility functions for angle operations.
pub mod angle {
    /// Normalize angle to 0-360 range (exclusive of 360).
    #[inline]
    pub fn normalize_degrees(angle: f64) -> f64 {
        let mut a = angle % 360.0;
        if a < 0.0 {
            a += 360.0;
        }
        // Handle 360.0 and -0.0 cases
        if a >= 360.0 || a == 0.0 {
            a = 0.0;
        }
        a
    }

    /// Polar angle of (dx, dy) in degrees, normalized to 0-360.
    #[inline]
    pub fn polar_degrees(dx: f64, dy: f64) -> f64 {
        normalize_degrees(dy.atan2(dx).to_degrees())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_degrees() {
        assert_eq!(angle::normalize_degrees(0.0), 0.0);
        assert_eq!(angle::normalize_degrees(360.0), 0.0);
        assert_eq!(angle::normalize_degrees(-90.0), 270.0);
        assert_eq!(angle::normalize_degrees(450.0), 90.0);
        assert_eq!(angle::normalize_degrees(-0.0), 0.0);
    }

    #[test]
    fn test_is_close() {
        assert!(float_cmp::is_close(10.0, 10.0 + 1e-12));
        assert!(!float_cmp::is_close(10.0, 10.001));
        assert!(float_cmp::is_close(0.0, 0.0));
    }

    #[test]
    fn test_step_count() {
        assert_eq!(float_cmp::step_count(10.0, 1.0), Some(11));
        assert_eq!(float_cmp::step_count(1.0, 0.1), Some(11));
        assert_eq!(float_cmp::step_count(0.0, 1.0), Some(1));
        assert_eq!(float_cmp::step_count(500.0, 1e-310), None);
        assert_eq!(float_cmp::step_count(500.0, 1e-12), None);
        assert_eq!(float_cmp::step_count(f64::INFINITY, 1.0), None);
    }

    #[test]
    fn test_partial_settings_use_defaults() {
        let json = r#"{ "tool_settings": { "blade_width": 5.0 },
                        "machine_settings": { "table_orientation": "side", "controller": "Breton" } }"#;
        let settings: Settings = serde_json::from_str(json).unwrap();
        assert_eq!(settings.tool_settings.blade_width, 5.0);
        assert_eq!(settings.tool_settings.blade_diameter, DEFAULT_BLADE_DIAMETER);
        assert_eq!(settings.machine_settings.controller, Dialect::Breton);
        assert!(settings.machine_settings.table_orientation.inverts_xy());
        assert_eq!(settings.toolpath_settings.start, DEFAULT_TRAVERSE_START);
        // stripe step falls back to blade width
        assert_eq!(settings.stripe_step(), 5.0);
    }
}
