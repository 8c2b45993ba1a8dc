//! Drawing-surface geometry: canvas size, margins, and presentation constants.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    pub fn distance(&self, other: Point) -> f64 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }
}

/// Axis-aligned box in canvas units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub min: Point,
    pub max: Point,
}

impl Rect {
    pub fn from_center(center: Point, width: f64, height: f64) -> Self {
        Self {
            min: Point::new(center.x - width / 2.0, center.y - height / 2.0),
            max: Point::new(center.x + width / 2.0, center.y + height / 2.0),
        }
    }

    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }

    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }
}

/// Window area the surface is hosted in.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Margin {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Default for Margin {
    fn default() -> Self {
        Self {
            top: 50.0,
            right: 50.0,
            bottom: 100.0,
            left: 100.0,
        }
    }
}

/// Fixed logical canvas. Points are plotted inside the margins.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Canvas {
    pub width: f64,
    pub height: f64,
    pub margin: Margin,
}

impl Default for Canvas {
    fn default() -> Self {
        Self {
            width: 1000.0,
            height: 650.0,
            margin: Margin::default(),
        }
    }
}

impl Canvas {
    pub fn content_width(&self) -> f64 {
        self.width - self.margin.left - self.margin.right
    }

    pub fn content_height(&self) -> f64 {
        self.height - self.margin.top - self.margin.bottom
    }

    /// Top-left corner of the plotting area.
    pub fn origin(&self) -> Point {
        Point::new(self.margin.left, self.margin.top)
    }

    /// Uniform factor that fits the whole canvas inside `viewport`.
    pub fn fit_scale(&self, viewport: Viewport) -> f64 {
        if self.width <= 0.0 || self.height <= 0.0 {
            return 1.0;
        }
        (viewport.width / self.width)
            .min(viewport.height / self.height)
            .max(0.0)
    }
}

/// Marker and font sizes plus animation timing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartStyle {
    pub point_radius: f64,
    /// Fill alpha of the circles, 0..=1.
    pub point_opacity: f64,
    pub point_font_size: f64,
    pub label_font_size: f64,
    pub tick_font_size: f64,
    pub tick_count: usize,
    /// Duration of axis-switch transitions, in milliseconds.
    pub transition_ms: u64,
}

impl Default for ChartStyle {
    fn default() -> Self {
        Self {
            point_radius: 13.0,
            point_opacity: 0.75,
            point_font_size: 12.0,
            label_font_size: 16.0,
            tick_font_size: 12.0,
            tick_count: 10,
            transition_ms: 1000,
        }
    }
}

impl ChartStyle {
    pub fn transition_secs(&self) -> f64 {
        self.transition_ms as f64 / 1000.0
    }

    /// `point_opacity` clamped and scaled to a colour channel.
    pub fn point_alpha(&self) -> u8 {
        (self.point_opacity.clamp(0.0, 1.0) * 255.0).round() as u8
    }
}

/// Approximate box of a single line of text centred on `center`.
pub fn text_box(center: Point, text: &str, font_size: f64) -> Rect {
    let width = text.chars().count() as f64 * font_size * 0.6;
    Rect::from_center(center, width, font_size * 1.2)
}
