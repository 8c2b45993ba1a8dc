//! Chart module - scales, scene graph and the controller driving them

mod controller;
pub mod layout;
pub mod scale;
mod scene;
mod selection;
mod tooltip;
pub mod transition;

pub use controller::{ChartController, ChartEvent, Container};
pub use layout::{Canvas, ChartStyle, Margin, Point, Rect, Viewport};
pub use scale::LinearScale;
pub use scene::{AxisLabelMark, AxisMark, AxisOrientation, PointMark, Surface, Tick};
pub use selection::{Axis, AxisChoice, Selection};
pub use tooltip::Tooltip;
