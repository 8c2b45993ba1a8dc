//! Static Chart Renderer
//! Draws the settled state of a surface with plotters, to SVG text or a PNG file.
//!
//! Layout mirrors the interactive view:
//! 1. Bottom and left axes with formatted ticks
//! 2. One filled circle per record with its abbreviation centred on it
//! 3. Three selector labels under the X axis, three rotated ones left of the Y axis

use crate::chart::{AxisOrientation, Surface};
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use plotters::style::{FontStyle, FontTransform};
use std::path::Path;
use thiserror::Error;
use tracing::info;

const POINT_FILL: RGBColor = RGBColor(137, 189, 211);
const POINT_TEXT: RGBColor = RGBColor(255, 255, 255);
const AXIS_COLOR: RGBColor = RGBColor(0, 0, 0);
const ACTIVE_LABEL: RGBColor = RGBColor(0, 0, 0);
const INACTIVE_LABEL: RGBColor = RGBColor(172, 172, 172);
const TICK_LENGTH: i32 = 6;
const FONT_FAMILY: &str = "sans-serif";

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Drawing failed: {0}")]
    Drawing(String),
    #[error("Unsupported export format: {0}")]
    UnsupportedFormat(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Svg,
    Png,
}

impl ExportFormat {
    /// Format implied by the file extension.
    pub fn from_path(path: &Path) -> Result<Self, RenderError> {
        let ext = path
            .extension()
            .map(|e| e.to_string_lossy().to_ascii_lowercase())
            .unwrap_or_default();
        match ext.as_str() {
            "svg" => Ok(ExportFormat::Svg),
            "png" => Ok(ExportFormat::Png),
            _ => Err(RenderError::UnsupportedFormat(ext)),
        }
    }
}

fn drawing_error<E: std::error::Error + Send + Sync>(err: DrawingAreaErrorKind<E>) -> RenderError {
    RenderError::Drawing(err.to_string())
}

pub struct StaticChartRenderer;

impl StaticChartRenderer {
    /// SVG document of the surface at canvas size.
    pub fn render_svg(surface: &Surface) -> Result<String, RenderError> {
        let size = Self::pixel_size(surface);
        let mut svg = String::new();
        {
            let root = SVGBackend::with_string(&mut svg, size).into_drawing_area();
            Self::draw(&root, surface)?;
            root.present().map_err(drawing_error)?;
        }
        Ok(svg)
    }

    /// Write the surface to `path`, picking SVG or PNG from the extension.
    pub fn render_to_file(surface: &Surface, path: &Path) -> Result<(), RenderError> {
        let size = Self::pixel_size(surface);
        match ExportFormat::from_path(path)? {
            ExportFormat::Svg => {
                let root = SVGBackend::new(path, size).into_drawing_area();
                Self::draw(&root, surface)?;
                root.present().map_err(drawing_error)?;
            }
            ExportFormat::Png => {
                let root = BitMapBackend::new(path, size).into_drawing_area();
                Self::draw(&root, surface)?;
                root.present().map_err(drawing_error)?;
            }
        }
        info!(path = %path.display(), surface = surface.id, "exported chart");
        Ok(())
    }

    fn pixel_size(surface: &Surface) -> (u32, u32) {
        (
            surface.canvas.width.max(1.0).round() as u32,
            surface.canvas.height.max(1.0).round() as u32,
        )
    }

    fn draw<DB: DrawingBackend>(
        root: &DrawingArea<DB, Shift>,
        surface: &Surface,
    ) -> Result<(), RenderError> {
        root.fill(&WHITE).map_err(drawing_error)?;
        Self::draw_axes(root, surface)?;
        Self::draw_points(root, surface)?;
        Self::draw_labels(root, surface)?;
        Ok(())
    }

    fn draw_axes<DB: DrawingBackend>(
        root: &DrawingArea<DB, Shift>,
        surface: &Surface,
    ) -> Result<(), RenderError> {
        let canvas = &surface.canvas;
        let origin = canvas.origin();
        let (left, top) = (origin.x.round() as i32, origin.y.round() as i32);
        let right = (origin.x + canvas.content_width()).round() as i32;
        let bottom = (origin.y + canvas.content_height()).round() as i32;
        let tick_font = (FONT_FAMILY, surface.style.tick_font_size).into_font();

        for axis in [&surface.x_axis, &surface.y_axis] {
            let line = match axis.orientation {
                AxisOrientation::Bottom => vec![(left, bottom), (right, bottom)],
                AxisOrientation::Left => vec![(left, top), (left, bottom)],
            };
            root.draw(&PathElement::new(line, AXIS_COLOR.stroke_width(1)))
                .map_err(drawing_error)?;

            for tick in axis.ticks_at(f64::INFINITY, surface.style.tick_count) {
                let (mark, text_at, pos) = match axis.orientation {
                    AxisOrientation::Bottom => {
                        let x = left + tick.offset.round() as i32;
                        (
                            vec![(x, bottom), (x, bottom + TICK_LENGTH)],
                            (x, bottom + TICK_LENGTH + 3),
                            Pos::new(HPos::Center, VPos::Top),
                        )
                    }
                    AxisOrientation::Left => {
                        let y = top + tick.offset.round() as i32;
                        (
                            vec![(left - TICK_LENGTH, y), (left, y)],
                            (left - TICK_LENGTH - 3, y),
                            Pos::new(HPos::Right, VPos::Center),
                        )
                    }
                };
                root.draw(&PathElement::new(mark, AXIS_COLOR.stroke_width(1)))
                    .map_err(drawing_error)?;
                let style = tick_font.clone().color(&AXIS_COLOR).pos(pos);
                root.draw(&Text::new(tick.label, text_at, style))
                    .map_err(drawing_error)?;
            }
        }
        Ok(())
    }

    fn draw_points<DB: DrawingBackend>(
        root: &DrawingArea<DB, Shift>,
        surface: &Surface,
    ) -> Result<(), RenderError> {
        let radius = surface.style.point_radius.round() as i32;
        let fill = POINT_FILL.mix(surface.style.point_opacity.clamp(0.0, 1.0));
        let text_style = (FONT_FAMILY, surface.style.point_font_size)
            .into_font()
            .color(&POINT_TEXT)
            .pos(Pos::new(HPos::Center, VPos::Center));

        // Records with unparsable values have no position.
        for mark in surface.points.iter().filter(|m| m.target().is_finite()) {
            let center = mark.target();
            let at = (center.x.round() as i32, center.y.round() as i32);
            root.draw(&Circle::new(at, radius, fill.filled()))
                .map_err(drawing_error)?;
            root.draw(&Text::new(mark.abbr.clone(), at, text_style.clone()))
                .map_err(drawing_error)?;
        }
        Ok(())
    }

    fn draw_labels<DB: DrawingBackend>(
        root: &DrawingArea<DB, Shift>,
        surface: &Surface,
    ) -> Result<(), RenderError> {
        for label in &surface.labels {
            let (weight, color) = if label.active {
                (FontStyle::Bold, ACTIVE_LABEL)
            } else {
                (FontStyle::Normal, INACTIVE_LABEL)
            };
            let mut font = (FONT_FAMILY, surface.style.label_font_size, weight).into_font();
            if label.rotated {
                font = font.transform(FontTransform::Rotate270);
            }
            let style = font
                .color(&color)
                .pos(Pos::new(HPos::Center, VPos::Center));
            let at = (label.anchor.x.round() as i32, label.anchor.y.round() as i32);
            root.draw(&Text::new(label.text, at, style))
                .map_err(drawing_error)?;
        }
        Ok(())
    }
}
