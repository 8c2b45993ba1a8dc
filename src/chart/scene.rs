//! The drawing surface and the visual elements it owns.
//!
//! Everything here is in canvas units (the fixed 1000x650 logical canvas by
//! default). Backends scale the canvas to whatever they paint on.

use crate::chart::layout::{text_box, Canvas, ChartStyle, Point, Rect, Viewport};
use crate::chart::scale::LinearScale;
use crate::chart::selection::{AxisChoice, Selection};
use crate::chart::transition::{Animated, Timing};
use crate::data::Record;

/// Gap between the plotting area and the first selector label.
const LABEL_OFFSET: f64 = 20.0;
/// Distance between consecutive selector labels of one group.
const LABEL_SPACING: f64 = 20.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AxisOrientation {
    Bottom,
    Left,
}

/// One rendered tick: its value, its pixel offset along the axis (relative
/// to the plotting area), and its text.
#[derive(Debug, Clone, PartialEq)]
pub struct Tick {
    pub value: f64,
    pub offset: f64,
    pub label: String,
}

/// Axis line and ticks driven by a scale that may be transitioning.
#[derive(Debug, Clone)]
pub struct AxisMark {
    pub orientation: AxisOrientation,
    from: LinearScale,
    to: LinearScale,
    timing: Option<Timing>,
}

impl AxisMark {
    pub fn new(orientation: AxisOrientation, scale: LinearScale) -> Self {
        Self {
            orientation,
            from: scale,
            to: scale,
            timing: None,
        }
    }

    /// Scale the axis is heading to.
    pub fn scale(&self) -> &LinearScale {
        &self.to
    }

    pub fn scale_at(&self, now: f64) -> LinearScale {
        match self.timing {
            Some(timing) if timing.is_running(now) => self.from.lerp(&self.to, timing.progress(now)),
            _ => self.to,
        }
    }

    pub fn transition_to(&mut self, scale: LinearScale, now: f64, duration: f64) {
        self.from = self.scale_at(now);
        self.to = scale;
        self.timing = Some(Timing::new(now, duration));
    }

    pub fn is_animating(&self, now: f64) -> bool {
        self.timing.is_some_and(|t| t.is_running(now))
    }

    /// Ticks of the target scale, placed by the scale in effect at `now`.
    /// Ticks that would fall outside the axis are dropped.
    pub fn ticks_at(&self, now: f64, count: usize) -> Vec<Tick> {
        let current = self.scale_at(now);
        let (r0, r1) = current.range();
        let (lo, hi) = (r0.min(r1) - 0.5, r0.max(r1) + 0.5);

        self.to
            .tick_labels(count)
            .into_iter()
            .map(|(value, label)| Tick {
                value,
                offset: current.map(value),
                label,
            })
            .filter(|tick| tick.offset >= lo && tick.offset <= hi)
            .collect()
    }
}

/// Circle plus its abbreviation text for one record.
#[derive(Debug, Clone)]
pub struct PointMark {
    pub record: usize,
    pub abbr: String,
    pub cx: Animated,
    pub cy: Animated,
}

impl PointMark {
    pub fn position_at(&self, now: f64) -> Point {
        Point::new(self.cx.value_at(now), self.cy.value_at(now))
    }

    pub fn target(&self) -> Point {
        Point::new(self.cx.target(), self.cy.target())
    }

    pub fn move_to(&mut self, target: Point, now: f64, duration: f64) {
        self.cx.animate_to(target.x, now, duration);
        self.cy.animate_to(target.y, now, duration);
    }

    /// Inside the circle or the text box drawn over it.
    pub fn contains(&self, pos: Point, now: f64, style: &ChartStyle) -> bool {
        let center = self.position_at(now);
        if !center.is_finite() {
            return false;
        }
        center.distance(pos) <= style.point_radius
            || text_box(center, &self.abbr, style.point_font_size).contains(pos)
    }

    pub fn is_animating(&self, now: f64) -> bool {
        self.cx.is_animating(now) || self.cy.is_animating(now)
    }
}

/// Clickable axis-selector text.
#[derive(Debug, Clone, PartialEq)]
pub struct AxisLabelMark {
    pub choice: AxisChoice,
    pub text: &'static str,
    pub anchor: Point,
    /// Y labels read bottom-to-top.
    pub rotated: bool,
    pub active: bool,
}

impl AxisLabelMark {
    pub fn hit_box(&self, font_size: f64) -> Rect {
        let flat = text_box(self.anchor, self.text, font_size);
        if self.rotated {
            Rect::from_center(self.anchor, flat.height(), flat.width())
        } else {
            flat
        }
    }
}

/// One drawing surface: the owned set of visual elements of a built chart.
#[derive(Debug, Clone)]
pub struct Surface {
    pub id: u64,
    pub viewport: Viewport,
    pub canvas: Canvas,
    pub style: ChartStyle,
    pub x_axis: AxisMark,
    pub y_axis: AxisMark,
    pub points: Vec<PointMark>,
    pub labels: Vec<AxisLabelMark>,
}

impl Surface {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: u64,
        viewport: Viewport,
        canvas: Canvas,
        style: ChartStyle,
        dataset: &[Record],
        selection: &Selection,
        x_scale: LinearScale,
        y_scale: LinearScale,
    ) -> Self {
        let points = dataset
            .iter()
            .enumerate()
            .map(|(i, record)| {
                let target = point_position(&canvas, record, selection, &x_scale, &y_scale);
                PointMark {
                    record: i,
                    abbr: record.abbr.clone(),
                    cx: Animated::settled(target.x),
                    cy: Animated::settled(target.y),
                }
            })
            .collect();

        let labels = AxisChoice::ALL
            .iter()
            .map(|&choice| AxisLabelMark {
                choice,
                text: choice.label(),
                anchor: label_anchor(&canvas, choice),
                rotated: matches!(choice, AxisChoice::Y(_)),
                active: selection.is_selected(choice),
            })
            .collect();

        Self {
            id,
            viewport,
            canvas,
            style,
            x_axis: AxisMark::new(AxisOrientation::Bottom, x_scale),
            y_axis: AxisMark::new(AxisOrientation::Left, y_scale),
            points,
            labels,
        }
    }

    pub fn label(&self, choice: AxisChoice) -> Option<&AxisLabelMark> {
        self.labels.iter().find(|l| l.choice == choice)
    }

    pub fn is_animating(&self, now: f64) -> bool {
        self.x_axis.is_animating(now)
            || self.y_axis.is_animating(now)
            || self.points.iter().any(|p| p.is_animating(now))
    }
}

/// Canvas position of a record under the given scales.
pub fn point_position(
    canvas: &Canvas,
    record: &Record,
    selection: &Selection,
    x_scale: &LinearScale,
    y_scale: &LinearScale,
) -> Point {
    let origin = canvas.origin();
    Point::new(
        origin.x + x_scale.map(record.x_value(selection.x)),
        origin.y + y_scale.map(record.y_value(selection.y)),
    )
}

/// X labels stack below the plotting area, Y labels to its left; slot 0 sits
/// closest to the axis.
fn label_anchor(canvas: &Canvas, choice: AxisChoice) -> Point {
    let origin = canvas.origin();
    let step = LABEL_OFFSET + LABEL_SPACING * (choice.slot() as f64 + 1.0);
    match choice {
        AxisChoice::X(_) => Point::new(
            origin.x + canvas.content_width() / 2.0,
            origin.y + canvas.content_height() + step,
        ),
        AxisChoice::Y(_) => Point::new(
            origin.x - step,
            origin.y + canvas.content_height() / 2.0,
        ),
    }
}
