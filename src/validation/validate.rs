//! Pre-flight checks for settings and drawings.

use crate::config::{float_cmp, Settings};
use crate::error::{CamError, Result};
use crate::model::{Drawing, Primitive};

/// Validation result with warnings.
#[derive(Debug, Default)]
pub struct ValidationResult {
    /// Whether validation passed.
    pub passed: bool,
    /// Warning messages.
    pub warnings: Vec<String>,
    /// Error messages.
    pub errors: Vec<String>,
}

impl ValidationResult {
    /// Create a passing result.
    pub fn ok() -> Self {
        Self {
            passed: true,
            ..Default::default()
        }
    }

    /// Create a failing result with an error.
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            passed: false,
            errors: vec![message.into()],
            ..Default::default()
        }
    }

    /// Add a warning.
    pub fn add_warning(&mut self, message: impl Into<String>) {
        self.warnings.push(message.into());
    }

    /// Add an error.
    pub fn add_error(&mut self, message: impl Into<String>) {
        self.errors.push(message.into());
        self.passed = false;
    }

    /// Merge another result into this one.
    pub fn merge(&mut self, other: ValidationResult) {
        self.warnings.extend(other.warnings);
        self.errors.extend(other.errors);
        if !other.passed {
            self.passed = false;
        }
    }
}

fn require_positive(result: &mut ValidationResult, name: &str, value: f64) {
    if !(value.is_finite() && value > 0.0) {
        result.add_error(format!("{} must be positive (got {})", name, value));
    }
}

/// Validate a settings document.
pub fn validate_settings(settings: &Settings) -> ValidationResult {
    let mut result = ValidationResult::ok();
    let machine = &settings.machine_settings;
    let tool = &settings.tool_settings;
    let tp = &settings.toolpath_settings;

    require_positive(&mut result, "blade_width", tool.blade_width);
    require_positive(&mut result, "roughing_stepover", tp.roughing_stepover);
    require_positive(&mut result, "smoothing_resolution", tp.smoothing_resolution);
    require_positive(&mut result, "smoothing_step", settings.stripe_step());
    require_positive(&mut result, "plunge_feed", tp.plunge_feed);
    require_positive(&mut result, "roughing_feedrate", tp.roughing_feedrate);
    require_positive(&mut result, "smoothing_feedrate", tp.smoothing_feedrate);

    if float_cmp::is_close(tp.start, tp.end) {
        result.add_error(format!(
            "Traverse start and end coincide ({})",
            tp.start
        ));
    }

    if tool.blade_diameter <= 0.0 {
        result.add_warning(format!(
            "Blade diameter {} is not positive",
            tool.blade_diameter
        ));
    }

    if machine.z_clearance > machine.z_max {
        result.add_warning(format!(
            "Clearance height {} is above max height {}",
            machine.z_clearance, machine.z_max
        ));
    }

    if tp.probe_offsets == 0 {
        result.add_warning("probe_offsets is 0, probing the column edge only");
    }

    result
}

/// Validate a drawing's primitives.
pub fn validate_drawing(drawing: &Drawing) -> ValidationResult {
    let mut result = ValidationResult::ok();

    if drawing.primitives.is_empty() {
        result.add_warning(format!("Drawing '{}': No primitives defined", drawing.name));
        return result;
    }

    for (idx, primitive) in drawing.primitives.iter().enumerate() {
        let num = idx + 1;
        match primitive {
            Primitive::Segment(s) if s.length() <= 0.0 => {
                result.add_warning(format!("Primitive {}: Zero-length segment", num));
            }
            Primitive::Circle(c) if c.radius <= 0.0 => {
                result.add_warning(format!("Primitive {}: Circle radius {} ignored", num, c.radius));
            }
            Primitive::Arc(a) if a.radius <= 0.0 => {
                result.add_warning(format!("Primitive {}: Arc radius {} ignored", num, a.radius));
            }
            Primitive::Polyline(p) if p.vertices.len() < 2 => {
                result.add_warning(format!(
                    "Primitive {}: Polyline with {} vertices has no spans",
                    num,
                    p.vertices.len()
                ));
            }
            _ => {}
        }
    }

    result
}

/// Quick validation check for command-line --validate flag.
pub fn quick_validate(settings: &Settings, drawing: &Drawing) -> Result<ValidationResult> {
    let mut result = validate_settings(settings);
    result.merge(validate_drawing(drawing));

    if !result.passed {
        return Err(CamError::ValidationFailed(result.errors.join("; ")));
    }

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Circle, Segment};

    #[test]
    fn test_default_settings_pass() {
        let result = validate_settings(&Settings::default());
        assert!(result.passed);
        assert!(result.errors.is_empty());
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_non_positive_values_fail() {
        let mut settings = Settings::default();
        settings.toolpath_settings.roughing_stepover = 0.0;
        settings.toolpath_settings.smoothing_feedrate = -5.0;
        let result = validate_settings(&settings);
        assert!(!result.passed);
        assert_eq!(result.errors.len(), 2);
        assert!(result.errors[0].contains("roughing_stepover"));
    }

    #[test]
    fn test_traverse_must_move() {
        let mut settings = Settings::default();
        settings.toolpath_settings.end = settings.toolpath_settings.start;
        assert!(!validate_settings(&settings).passed);
    }

    #[test]
    fn test_clearance_above_max_warns() {
        let mut settings = Settings::default();
        settings.machine_settings.z_clearance = 150.0;
        let result = validate_settings(&settings);
        assert!(result.passed);
        assert_eq!(result.warnings.len(), 1);
    }

    #[test]
    fn test_degenerate_primitives_warn() {
        let drawing = Drawing::new(vec![
            Segment::new(1.0, 1.0, 1.0, 1.0).into(),
            Circle::new(0.0, 0.0, 0.0).into(),
            Circle::new(0.0, 0.0, 3.0).into(),
        ]);
        let result = validate_drawing(&drawing);
        assert!(result.passed);
        assert_eq!(result.warnings.len(), 2);
    }

    #[test]
    fn test_quick_validate_reports_errors() {
        let mut settings = Settings::default();
        settings.tool_settings.blade_width = 0.0;
        let err = quick_validate(&settings, &Drawing::default()).unwrap_err();
        assert!(matches!(err, CamError::ValidationFailed(_)));
    }
}
