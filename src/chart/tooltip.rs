//! Hover text for a single data point.

use crate::chart::selection::Selection;
use crate::data::Record;

#[derive(Debug, Clone, PartialEq)]
pub struct Tooltip {
    pub title: String,
    pub x_line: String,
    pub y_line: String,
}

impl Tooltip {
    /// Lines follow the current selection, so the same record reads
    /// differently after an axis switch.
    pub fn for_record(record: &Record, selection: &Selection) -> Self {
        Self {
            title: record.abbr.clone(),
            x_line: format!("{} {}", selection.x.label(), record.x_value(selection.x)),
            y_line: format!("{} {}", selection.y.label(), record.y_value(selection.y)),
        }
    }

    /// Title first, then the X and Y readings.
    pub fn lines(&self) -> [&str; 3] {
        [&self.title, &self.x_line, &self.y_line]
    }
}
