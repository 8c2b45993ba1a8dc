//! Render module - static export of a chart surface

mod exporter;

pub use exporter::{ExportFormat, RenderError, StaticChartRenderer};
