//! Chart View Widget
//! Paints the controller's surface with egui and turns pointer input into
//! chart events. The fixed canvas is scaled uniformly to the available area.

use crate::chart::{
    AxisLabelMark, AxisMark, AxisOrientation, ChartController, ChartEvent, Point, Surface,
    Viewport,
};
use egui::epaint::TextShape;
use egui::{Align2, Color32, FontId, Pos2, RichText, Sense, Stroke, Vec2};

const POINT_FILL: Color32 = Color32::from_rgb(137, 189, 211);
const POINT_TEXT: Color32 = Color32::WHITE;
const CANVAS_FILL: Color32 = Color32::WHITE;
const AXIS_COLOR: Color32 = Color32::BLACK;
const ACTIVE_LABEL: Color32 = Color32::BLACK;
const INACTIVE_LABEL: Color32 = Color32::from_rgb(172, 172, 172);
const HOVER_STROKE: Color32 = Color32::BLACK;
const TICK_LENGTH: f32 = 6.0;

/// Size changes smaller than this are layout jitter, not a resize.
const RESIZE_EPSILON: f64 = 1.0;

/// Canvas-to-screen mapping for one frame.
#[derive(Debug, Clone, Copy)]
struct Transform {
    offset: Pos2,
    scale: f32,
}

impl Transform {
    fn to_screen(self, p: Point) -> Pos2 {
        Pos2::new(
            self.offset.x + p.x as f32 * self.scale,
            self.offset.y + p.y as f32 * self.scale,
        )
    }

    fn to_canvas(self, p: Pos2) -> Point {
        let scale = self.scale.max(f32::EPSILON);
        Point::new(
            ((p.x - self.offset.x) / scale) as f64,
            ((p.y - self.offset.y) / scale) as f64,
        )
    }

    fn size(self, canvas_units: f64) -> f32 {
        canvas_units as f32 * self.scale
    }
}

/// Hover event for this frame. Leaving is only reported while a point is hovered.
fn pointer_event(pointer: Option<Point>, hovering: bool) -> Option<ChartEvent> {
    match pointer {
        Some(pos) => Some(ChartEvent::PointerMoved(pos)),
        None if hovering => Some(ChartEvent::PointerLeft),
        None => None,
    }
}

/// Hosts the chart inside the central panel.
#[derive(Default)]
pub struct ChartView {
    last_viewport: Option<Viewport>,
}

impl ChartView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget the last size so the next frame builds a fresh surface.
    pub fn reset(&mut self) {
        self.last_viewport = None;
    }

    pub fn show(&mut self, ctx: &egui::Context, ui: &mut egui::Ui, controller: Option<&mut ChartController>) {
        let Some(controller) = controller else {
            ui.centered_and_justified(|ui| {
                ui.label(RichText::new("No Data").size(20.0));
            });
            return;
        };

        let now = ctx.input(|i| i.time);
        let available = ui.available_size();
        let viewport = Viewport::new(available.x as f64, available.y as f64);

        match self.last_viewport {
            _ if controller.surface().is_none() => {
                controller.build(viewport);
            }
            Some(last)
                if (last.width - viewport.width).abs() < RESIZE_EPSILON
                    && (last.height - viewport.height).abs() < RESIZE_EPSILON => {}
            _ => {
                controller.handle(ChartEvent::Resized(viewport), now);
            }
        }
        self.last_viewport = Some(viewport);

        let (response, painter) = ui.allocate_painter(available, Sense::click());
        let Some(surface) = controller.surface() else {
            return;
        };

        let scale = surface.canvas.fit_scale(viewport) as f32;
        let drawn = Vec2::new(
            surface.canvas.width as f32 * scale,
            surface.canvas.height as f32 * scale,
        );
        let transform = Transform {
            offset: response.rect.min + (response.rect.size() - drawn) / 2.0,
            scale,
        };

        // Pointer input first so this frame paints the updated state.
        let pointer = response.hover_pos().map(|pos| transform.to_canvas(pos));
        if let Some(event) = pointer_event(pointer, controller.hovered().is_some()) {
            if controller.handle(event, now) {
                ctx.request_repaint();
            }
        }
        if pointer.is_some_and(|pos| controller.label_at(pos).is_some()) {
            ctx.set_cursor_icon(egui::CursorIcon::PointingHand);
        }

        if response.clicked() {
            if let Some(pos) = response.interact_pointer_pos() {
                if let Some(choice) = controller.label_at(transform.to_canvas(pos)) {
                    controller.handle(ChartEvent::AxisLabelClicked(choice), now);
                }
            }
        }

        let Some(surface) = controller.surface() else {
            return;
        };
        painter.rect_filled(
            egui::Rect::from_min_size(transform.offset, drawn),
            0.0,
            CANVAS_FILL,
        );
        Self::paint_axis(&painter, transform, surface, &surface.x_axis, now);
        Self::paint_axis(&painter, transform, surface, &surface.y_axis, now);
        Self::paint_points(&painter, transform, surface, controller.hovered(), now);
        for label in &surface.labels {
            Self::paint_label(&painter, transform, surface, label);
        }

        if let Some(tooltip) = controller.tooltip() {
            response.on_hover_ui_at_pointer(|ui| {
                let [title, x_line, y_line] = tooltip.lines();
                ui.label(RichText::new(title).strong());
                ui.label(x_line);
                ui.label(y_line);
            });
        }

        if controller.is_animating(now) {
            ctx.request_repaint();
        }
    }

    fn paint_axis(
        painter: &egui::Painter,
        transform: Transform,
        surface: &Surface,
        axis: &AxisMark,
        now: f64,
    ) {
        let canvas = &surface.canvas;
        let origin = canvas.origin();
        let bottom = origin.y + canvas.content_height();
        let right = origin.x + canvas.content_width();
        let stroke = Stroke::new(1.0, AXIS_COLOR);
        let font = FontId::proportional(transform.size(surface.style.tick_font_size));
        let tick = TICK_LENGTH * transform.scale;

        match axis.orientation {
            AxisOrientation::Bottom => {
                let y = transform.to_screen(Point::new(origin.x, bottom)).y;
                painter.line_segment(
                    [
                        transform.to_screen(Point::new(origin.x, bottom)),
                        transform.to_screen(Point::new(right, bottom)),
                    ],
                    stroke,
                );
                for t in axis.ticks_at(now, surface.style.tick_count) {
                    let x = transform.to_screen(Point::new(origin.x + t.offset, bottom)).x;
                    painter.line_segment([Pos2::new(x, y), Pos2::new(x, y + tick)], stroke);
                    painter.text(
                        Pos2::new(x, y + tick + 2.0),
                        Align2::CENTER_TOP,
                        t.label,
                        font.clone(),
                        AXIS_COLOR,
                    );
                }
            }
            AxisOrientation::Left => {
                let x = transform.to_screen(origin).x;
                painter.line_segment(
                    [
                        transform.to_screen(origin),
                        transform.to_screen(Point::new(origin.x, bottom)),
                    ],
                    stroke,
                );
                for t in axis.ticks_at(now, surface.style.tick_count) {
                    let y = transform.to_screen(Point::new(origin.x, origin.y + t.offset)).y;
                    painter.line_segment([Pos2::new(x - tick, y), Pos2::new(x, y)], stroke);
                    painter.text(
                        Pos2::new(x - tick - 2.0, y),
                        Align2::RIGHT_CENTER,
                        t.label,
                        font.clone(),
                        AXIS_COLOR,
                    );
                }
            }
        }
    }

    fn paint_points(
        painter: &egui::Painter,
        transform: Transform,
        surface: &Surface,
        hovered: Option<usize>,
        now: f64,
    ) {
        let radius = transform.size(surface.style.point_radius);
        let [r, g, b, _] = POINT_FILL.to_array();
        let fill = Color32::from_rgba_unmultiplied(r, g, b, surface.style.point_alpha());
        let font = FontId::proportional(transform.size(surface.style.point_font_size));

        for mark in &surface.points {
            let center = mark.position_at(now);
            if !center.is_finite() {
                continue;
            }
            let at = transform.to_screen(center);
            if hovered == Some(mark.record) {
                painter.circle(at, radius, fill, Stroke::new(1.5, HOVER_STROKE));
            } else {
                painter.circle_filled(at, radius, fill);
            }
            painter.text(at, Align2::CENTER_CENTER, &mark.abbr, font.clone(), POINT_TEXT);
        }
    }

    fn paint_label(
        painter: &egui::Painter,
        transform: Transform,
        surface: &Surface,
        label: &AxisLabelMark,
    ) {
        let color = if label.active {
            ACTIVE_LABEL
        } else {
            INACTIVE_LABEL
        };
        let font = FontId::proportional(transform.size(surface.style.label_font_size));
        let anchor = transform.to_screen(label.anchor);

        if !label.rotated {
            painter.text(anchor, Align2::CENTER_CENTER, label.text, font, color);
            return;
        }

        // Rotation pivots on the galley's top-left corner.
        let galley = painter.layout_no_wrap(label.text.to_string(), font, color);
        let size = galley.size();
        let pos = Pos2::new(anchor.x - size.y / 2.0, anchor.y + size.x / 2.0);
        painter.add(TextShape::new(pos, galley, color).with_angle(-std::f32::consts::FRAC_PI_2));
    }
}
