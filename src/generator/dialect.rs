//! Controller dialect definitions.
//!
//! Both dialects share one motion algorithm; a dialect only decides the
//! program framing, number formatting and the file extension.

use serde::{Deserialize, Serialize};

/// Controller dialect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Dialect {
    /// Osai Open controllers (`.s10`).
    #[default]
    Osai,
    /// Breton Genya controllers (`.nc`).
    Breton,
}

/// Values printed in a program header.
#[derive(Debug, Clone, Copy)]
pub struct HeaderInfo<'a> {
    pub program_name: &'a str,
    pub roughing_cuts: usize,
    pub blade_width: f64,
    pub blade_diameter: f64,
    pub invert_xy: bool,
    pub spindle_rpm: u32,
}

impl Dialect {
    /// Parse a controller name as stored in settings.
    pub fn from_name(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "osai" => Some(Dialect::Osai),
            "breton" => Some(Dialect::Breton),
            _ => None,
        }
    }

    /// Output file extension (without the dot).
    pub fn extension(&self) -> &'static str {
        match self {
            Dialect::Osai => "s10",
            Dialect::Breton => "nc",
        }
    }

    /// Decimal places for coordinates.
    pub fn decimals(&self) -> usize {
        match self {
            Dialect::Osai => 2,
            Dialect::Breton => 4,
        }
    }

    /// Separator between words of a motion block.
    pub fn separator(&self) -> &'static str {
        match self {
            Dialect::Osai => "  ",
            Dialect::Breton => " ",
        }
    }

    /// Retract to the machine's max height.
    pub fn retract_max(&self, z_max: f64) -> String {
        match self {
            Dialect::Osai => "M18                ; Retract to max‑Z".to_string(),
            Dialect::Breton => format!("G0 Z{:.4} ; Retract to max-Z", z_max),
        }
    }

    /// Program header lines.
    pub fn header(&self, info: &HeaderInfo<'_>, z_max: f64) -> Vec<String> {
        match self {
            Dialect::Osai => vec![
                "; --------------------------------------------------------------".into(),
                ";  SlabCAM – Osai roughing + smoothing".into(),
                format!(";  Roughing cuts : {}", info.roughing_cuts),
                format!(";  Blade width   : {:.2} mm", info.blade_width),
                format!(";  Blade diameter: {:.2} mm", info.blade_diameter),
                format!(";  Invert X/Y    : {}", info.invert_xy),
                "; --------------------------------------------------------------".into(),
                "(UAO,3)".into(),
                self.retract_max(z_max),
                format!("{:<19}; Spindle ON", format!("M30 S{}", info.spindle_rpm)),
                ";".into(),
            ],
            Dialect::Breton => vec![
                ";GENYA 600".into(),
                format!(";File Name: {}", info.program_name),
                format!(";Roughing cuts: {}", info.roughing_cuts),
                format!(";Blade width: {:.4} mm", info.blade_width),
                format!(";Blade diameter: {:.4} mm", info.blade_diameter),
                format!(";Invert X/Y: {}", info.invert_xy),
                format!("MSG(\"{}\")", info.program_name),
                "BRETON_INIT(0)".into(),
                "G518 BRETON_WAREA(\"MILL\")".into(),
                self.retract_max(z_max),
                format!("MS1 M4S{} M07", info.spindle_rpm),
                ";".into(),
            ],
        }
    }

    /// Program footer lines. The trailing empty line ends the file with a
    /// newline.
    pub fn footer(&self) -> Vec<String> {
        match self {
            Dialect::Osai => vec![
                "M31                ; Spindle OFF".into(),
                "M32                ; End of program".into(),
                ";".into(),
                String::new(),
            ],
            Dialect::Breton => vec![
                "M05 M09 BRETON_TCP_OFF BRETON_WAREA(\"HOME\") M30".into(),
                ";".into(),
                String::new(),
            ],
        }
    }
}

impl std::fmt::Display for Dialect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Dialect::Osai => write!(f, "Osai"),
            Dialect::Breton => write!(f, "Breton"),
        }
    }
}

impl std::str::FromStr for Dialect {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Dialect::from_name(s).ok_or_else(|| format!("unknown controller '{}'", s))
    }
}
