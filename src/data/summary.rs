//! Per-field summary of the loaded dataset, shown in the side panel.

use crate::chart::scale::extent;
use crate::data::record::{Record, XField, YField};

/// Range and completeness of one numeric column.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldSummary {
    pub column: &'static str,
    pub label: &'static str,
    pub valid: usize,
    pub missing: usize,
    pub min: f64,
    pub max: f64,
}

impl FieldSummary {
    fn from_values(column: &'static str, label: &'static str, values: &[f64]) -> Self {
        let valid = values.iter().filter(|v| !v.is_nan()).count();
        let (min, max) = extent(values.iter().copied()).unwrap_or((f64::NAN, f64::NAN));
        Self {
            column,
            label,
            valid,
            missing: values.len() - valid,
            min,
            max,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct DatasetSummary {
    pub rows: usize,
    pub fields: Vec<FieldSummary>,
}

impl DatasetSummary {
    pub fn from_records(records: &[Record]) -> Self {
        let mut fields = Vec::with_capacity(XField::ALL.len() + YField::ALL.len());

        for field in XField::ALL {
            let values: Vec<f64> = records.iter().map(|r| r.x_value(field)).collect();
            fields.push(FieldSummary::from_values(field.column(), field.label(), &values));
        }
        for field in YField::ALL {
            let values: Vec<f64> = records.iter().map(|r| r.y_value(field)).collect();
            fields.push(FieldSummary::from_values(field.column(), field.label(), &values));
        }

        Self {
            rows: records.len(),
            fields,
        }
    }

    /// Total count of cells that failed numeric coercion.
    pub fn missing_cells(&self) -> usize {
        self.fields.iter().map(|f| f.missing).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(poverty: f64, abbr: &str) -> Record {
        Record {
            poverty,
            age: 30.0,
            income: 40000.0,
            healthcare: 15.0,
            obesity: 20.0,
            smokes: 18.0,
            abbr: abbr.to_string(),
        }
    }

    #[test]
    fn summary_skips_nan_cells() {
        let records = vec![record(10.0, "AL"), record(f64::NAN, "AK"), record(20.0, "AZ")];
        let summary = DatasetSummary::from_records(&records);

        assert_eq!(summary.rows, 3);
        let poverty = &summary.fields[0];
        assert_eq!(poverty.column, "poverty");
        assert_eq!(poverty.valid, 2);
        assert_eq!(poverty.missing, 1);
        assert_eq!((poverty.min, poverty.max), (10.0, 20.0));
        assert_eq!(summary.missing_cells(), 1);
    }

    #[test]
    fn empty_dataset_has_nan_range() {
        let summary = DatasetSummary::from_records(&[]);
        assert_eq!(summary.fields.len(), 6);
        assert!(summary.fields.iter().all(|f| f.min.is_nan() && f.valid == 0));
    }
}
