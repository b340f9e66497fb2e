//! G-code block writer with axis inversion.

use super::dialect::Dialect;

/// Line-oriented G-code writer.
///
/// Coordinates pass through the axis-inversion swap just before they are
/// formatted, so callers always speak in model axes.
pub struct GcodeWriter {
    dialect: Dialect,
    /// Swap X and Y at emission (side table orientation).
    invert_xy: bool,
    /// Output lines.
    lines: Vec<String>,
}

impl GcodeWriter {
    /// Create a new G-code writer.
    pub fn new(dialect: Dialect, invert_xy: bool) -> Self {
        Self {
            dialect,
            invert_xy,
            lines: Vec::new(),
        }
    }

    /// Get the generated lines.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Take the generated lines.
    pub fn into_lines(self) -> Vec<String> {
        self.lines
    }

    /// Write several lines verbatim.
    pub fn write_all(&mut self, lines: impl IntoIterator<Item = String>) {
        self.lines.extend(lines);
    }

    /// Write a comment line.
    pub fn write_comment(&mut self, comment: &str) {
        self.lines.push(format!("; {}", comment));
    }

    /// Format an axis group, swapping X and Y when inverted.
    pub fn axes(&self, x: Option<f64>, y: Option<f64>, z: Option<f64>) -> String {
        let (x, y) = if self.invert_xy { (y, x) } else { (x, y) };
        let prec = self.dialect.decimals();
        [('X', x), ('Y', y), ('Z', z)]
            .into_iter()
            .filter_map(|(axis, v)| v.map(|v| format!("{}{:.prec$}", axis, v, prec = prec)))
            .collect::<Vec<_>>()
            .join(self.dialect.separator())
    }

    /// Rapid move (G0) with an optional trailing word group.
    pub fn rapid(&mut self, x: Option<f64>, y: Option<f64>, z: Option<f64>, tail: Option<&str>) {
        let mut words = vec!["G0".to_string(), self.axes(x, y, z)];
        words.extend(tail.map(str::to_string));
        self.push_block(words);
    }

    /// Linear interpolation (G1) at a feed rate.
    pub fn linear(&mut self, x: Option<f64>, y: Option<f64>, z: Option<f64>, feed: f64) {
        let words = vec!["G1".to_string(), self.axes(x, y, z), format_feed(feed)];
        self.push_block(words);
    }

    /// Rapid up to a height.
    pub fn retract(&mut self, z: f64) {
        self.rapid(None, None, Some(z), None);
    }

    /// Retract to the machine's max height using the dialect's command.
    pub fn retract_max(&mut self, z_max: f64) {
        let line = self.dialect.retract_max(z_max);
        self.lines.push(line);
    }

    fn push_block(&mut self, words: Vec<String>) {
        let block = words.join(self.dialect.separator());
        self.lines.push(block);
    }
}

/// Format a feed word; feeds are whole mm/min.
pub fn format_feed(feed: f64) -> String {
    format!("F{:.0}", feed)
}
