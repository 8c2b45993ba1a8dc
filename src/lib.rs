//! Census Scatter - interactive demographic scatter chart
//!
//! Plots two of six demographic fields against each other. The plotted pair
//! is switched through clickable axis labels, with animated transitions and
//! hover tooltips.

pub mod chart;
pub mod config;
pub mod data;
pub mod gui;
pub mod render;
