//! Dataset schema: one record per state, six numeric fields and a label.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Column holding the short label drawn inside each circle.
pub const LABEL_COLUMN: &str = "abbr";

/// Numeric columns that must be present in every input file.
pub const NUMERIC_COLUMNS: [&str; 6] = [
    "poverty",
    "age",
    "income",
    "healthcare",
    "obesity",
    "smokes",
];

/// One data point. Immutable once parsed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub poverty: f64,
    pub age: f64,
    pub income: f64,
    pub healthcare: f64,
    pub obesity: f64,
    pub smokes: f64,
    pub abbr: String,
}

impl Record {
    pub fn x_value(&self, field: XField) -> f64 {
        match field {
            XField::Poverty => self.poverty,
            XField::Age => self.age,
            XField::Income => self.income,
        }
    }

    pub fn y_value(&self, field: YField) -> f64 {
        match field {
            YField::Healthcare => self.healthcare,
            YField::Obesity => self.obesity,
            YField::Smokes => self.smokes,
        }
    }
}

/// Fields selectable on the horizontal axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum XField {
    #[default]
    Poverty,
    Age,
    Income,
}

impl XField {
    pub const ALL: [XField; 3] = [XField::Poverty, XField::Age, XField::Income];

    pub fn column(self) -> &'static str {
        match self {
            XField::Poverty => "poverty",
            XField::Age => "age",
            XField::Income => "income",
        }
    }

    /// Text of the selector label and of the tooltip line.
    pub fn label(self) -> &'static str {
        match self {
            XField::Poverty => "Poverty (%)",
            XField::Age => "Age (Median)",
            XField::Income => "Household Income (Median)",
        }
    }
}

/// Fields selectable on the vertical axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum YField {
    #[default]
    Healthcare,
    Obesity,
    Smokes,
}

impl YField {
    pub const ALL: [YField; 3] = [YField::Healthcare, YField::Obesity, YField::Smokes];

    pub fn column(self) -> &'static str {
        match self {
            YField::Healthcare => "healthcare",
            YField::Obesity => "obesity",
            YField::Smokes => "smokes",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            YField::Healthcare => "Lacks Healthcare (%)",
            YField::Obesity => "Obese (%)",
            YField::Smokes => "Smokes (%)",
        }
    }
}

impl fmt::Display for XField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column())
    }
}

impl fmt::Display for YField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column())
    }
}
