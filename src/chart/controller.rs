//! Chart Controller
//! Owns the selection, both scales and the container of drawing surfaces, and
//! applies UI events to them.

use crate::chart::layout::{Canvas, ChartStyle, Point, Viewport};
use crate::chart::scale::LinearScale;
use crate::chart::scene::{point_position, Surface};
use crate::chart::selection::{Axis, AxisChoice, Selection};
use crate::chart::tooltip::Tooltip;
use crate::data::{Record, XField, YField};
use std::sync::Arc;
use tracing::{debug, info};

/// Input the viewer forwards to the controller.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ChartEvent {
    AxisLabelClicked(AxisChoice),
    PointerMoved(Point),
    PointerLeft,
    Resized(Viewport),
}

/// Mount point holding the drawing surfaces.
#[derive(Debug, Clone)]
pub struct Container {
    selector: String,
    surfaces: Vec<Surface>,
}

impl Container {
    pub fn new(selector: impl Into<String>) -> Self {
        Self {
            selector: selector.into(),
            surfaces: Vec::new(),
        }
    }

    pub fn selector(&self) -> &str {
        &self.selector
    }

    pub fn surfaces(&self) -> &[Surface] {
        &self.surfaces
    }

    pub fn clear(&mut self) {
        self.surfaces.clear();
    }

    fn append(&mut self, surface: Surface) -> &Surface {
        let index = self.surfaces.len();
        self.surfaces.push(surface);
        &self.surfaces[index]
    }
}

pub struct ChartController {
    container: Container,
    dataset: Arc<[Record]>,
    canvas: Canvas,
    style: ChartStyle,
    selection: Selection,
    x_scale: LinearScale,
    y_scale: LinearScale,
    hovered: Option<usize>,
    next_surface_id: u64,
}

impl ChartController {
    /// A controller with an empty container. Call [`ChartController::build`] to draw.
    pub fn new(
        container: Container,
        dataset: Arc<[Record]>,
        canvas: Canvas,
        style: ChartStyle,
    ) -> Self {
        let selection = Selection::default();
        let x_scale = x_scale_for(&dataset, selection.x, &canvas);
        let y_scale = y_scale_for(&dataset, selection.y, &canvas);
        Self {
            container,
            dataset,
            canvas,
            style,
            selection,
            x_scale,
            y_scale,
            hovered: None,
            next_surface_id: 1,
        }
    }

    /// Render the full chart into the container from the default selection.
    pub fn build(&mut self, viewport: Viewport) -> &Surface {
        self.selection = Selection::default();
        self.x_scale = x_scale_for(&self.dataset, self.selection.x, &self.canvas);
        self.y_scale = y_scale_for(&self.dataset, self.selection.y, &self.canvas);
        self.hovered = None;

        let surface = Surface::new(
            self.next_surface_id,
            viewport,
            self.canvas,
            self.style,
            &self.dataset,
            &self.selection,
            self.x_scale,
            self.y_scale,
        );
        self.next_surface_id += 1;
        info!(
            surface = surface.id,
            selector = self.container.selector(),
            rows = self.dataset.len(),
            "built chart surface"
        );

        self.container.append(surface)
    }

    /// Drop every existing surface, then build again.
    pub fn on_resize(&mut self, viewport: Viewport) -> &Surface {
        debug!(
            width = viewport.width,
            height = viewport.height,
            removed = self.container.surfaces.len(),
            "rebuilding chart after resize"
        );
        self.container.clear();
        self.build(viewport)
    }

    /// Switch the plotted field of one axis. Returns `false` (and changes
    /// nothing) when `choice` is already plotted.
    pub fn on_axis_label_click(&mut self, choice: AxisChoice, now: f64) -> bool {
        if !self.selection.select(choice) {
            debug!(?choice, "label already active");
            return false;
        }

        match choice {
            AxisChoice::X(field) => {
                self.x_scale = x_scale_for(&self.dataset, field, &self.canvas);
            }
            AxisChoice::Y(field) => {
                self.y_scale = y_scale_for(&self.dataset, field, &self.canvas);
            }
        }

        let duration = self.style.transition_secs();
        let (x_scale, y_scale) = (self.x_scale, self.y_scale);
        let selection = self.selection;
        let canvas = self.canvas;
        let dataset = &self.dataset;

        if let Some(surface) = self.container.surfaces.last_mut() {
            match choice.axis() {
                Axis::X => surface.x_axis.transition_to(x_scale, now, duration),
                Axis::Y => surface.y_axis.transition_to(y_scale, now, duration),
            }
            for mark in &mut surface.points {
                let target =
                    point_position(&canvas, &dataset[mark.record], &selection, &x_scale, &y_scale);
                mark.move_to(target, now, duration);
            }
            for label in surface
                .labels
                .iter_mut()
                .filter(|l| l.choice.axis() == choice.axis())
            {
                label.active = label.choice == choice;
            }
        }

        info!(x = %self.selection.x, y = %self.selection.y, "axis selection changed");
        true
    }

    /// Apply one UI event. Returns whether anything visible changed.
    pub fn handle(&mut self, event: ChartEvent, now: f64) -> bool {
        match event {
            ChartEvent::AxisLabelClicked(choice) => self.on_axis_label_click(choice, now),
            ChartEvent::PointerMoved(pos) => {
                let hovered = self.point_at(pos, now);
                let changed = hovered != self.hovered;
                self.hovered = hovered;
                changed
            }
            ChartEvent::PointerLeft => self.hovered.take().is_some(),
            ChartEvent::Resized(viewport) => {
                self.on_resize(viewport);
                true
            }
        }
    }

    /// Record whose circle or text sits under `pos`. Later marks are drawn on
    /// top, so they win.
    pub fn point_at(&self, pos: Point, now: f64) -> Option<usize> {
        let surface = self.surface()?;
        surface
            .points
            .iter()
            .rev()
            .find(|mark| mark.contains(pos, now, &surface.style))
            .map(|mark| mark.record)
    }

    /// Selector label under `pos`.
    pub fn label_at(&self, pos: Point) -> Option<AxisChoice> {
        let surface = self.surface()?;
        surface
            .labels
            .iter()
            .find(|label| label.hit_box(surface.style.label_font_size).contains(pos))
            .map(|label| label.choice)
    }

    pub fn tooltip(&self) -> Option<Tooltip> {
        self.hovered.and_then(|i| self.tooltip_for(i))
    }

    pub fn tooltip_for(&self, record: usize) -> Option<Tooltip> {
        self.dataset
            .get(record)
            .map(|r| Tooltip::for_record(r, &self.selection))
    }

    pub fn hovered(&self) -> Option<usize> {
        self.hovered
    }

    pub fn selection(&self) -> Selection {
        self.selection
    }

    pub fn x_scale(&self) -> &LinearScale {
        &self.x_scale
    }

    pub fn y_scale(&self) -> &LinearScale {
        &self.y_scale
    }

    pub fn dataset(&self) -> &[Record] {
        &self.dataset
    }

    pub fn container(&self) -> &Container {
        &self.container
    }

    /// The live surface, if the chart has been built.
    pub fn surface(&self) -> Option<&Surface> {
        self.container.surfaces.last()
    }

    pub fn is_animating(&self, now: f64) -> bool {
        self.surface().is_some_and(|s| s.is_animating(now))
    }
}

fn x_scale_for(dataset: &[Record], field: XField, canvas: &Canvas) -> LinearScale {
    LinearScale::padded(
        dataset.iter().map(|r| r.x_value(field)),
        (0.0, canvas.content_width()),
    )
}

fn y_scale_for(dataset: &[Record], field: YField, canvas: &Canvas) -> LinearScale {
    LinearScale::padded(
        dataset.iter().map(|r| r.y_value(field)),
        (canvas.content_height(), 0.0),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(
        abbr: &str,
        poverty: f64,
        age: f64,
        income: f64,
        healthcare: f64,
        obesity: f64,
        smokes: f64,
    ) -> Record {
        Record {
            poverty,
            age,
            income,
            healthcare,
            obesity,
            smokes,
            abbr: abbr.to_string(),
        }
    }

    fn two_states() -> Arc<[Record]> {
        vec![
            record("AL", 10.0, 30.0, 40000.0, 15.0, 20.0, 18.0),
            record("AK", 20.0, 40.0, 50000.0, 25.0, 30.0, 28.0),
        ]
        .into()
    }

    fn built() -> ChartController {
        let mut controller = ChartController::new(
            Container::new("#scatter"),
            two_states(),
            Canvas::default(),
            ChartStyle::default(),
        );
        controller.build(Viewport::new(1200.0, 800.0));
        controller
    }

    fn positions(controller: &ChartController, now: f64) -> Vec<Point> {
        controller
            .surface()
            .unwrap()
            .points
            .iter()
            .map(|p| p.position_at(now))
            .collect()
    }

    fn active(controller: &ChartController, axis: Axis) -> Vec<AxisChoice> {
        controller
            .surface()
            .unwrap()
            .labels
            .iter()
            .filter(|l| l.choice.axis() == axis && l.active)
            .map(|l| l.choice)
            .collect()
    }

    #[test]
    fn default_build_orders_points_by_selected_fields() {
        let controller = built();
        let pts = positions(&controller, 0.0);

        // AL: poverty 10 < 20, healthcare 15 < 25 (inverted range => lower on screen)
        assert!(pts[0].x < pts[1].x);
        assert!(pts[0].y > pts[1].y);
        assert_eq!(controller.x_scale().domain(), (8.0, 24.0));
        assert_eq!(controller.y_scale().domain(), (12.0, 30.0));
    }

    #[test]
    fn clicking_active_label_changes_nothing() {
        let mut controller = built();
        let before = positions(&controller, 0.0);

        assert!(!controller.on_axis_label_click(AxisChoice::X(XField::Poverty), 0.0));
        assert!(!controller.on_axis_label_click(AxisChoice::Y(YField::Healthcare), 0.0));

        assert_eq!(controller.selection(), Selection::default());
        assert_eq!(positions(&controller, 0.0), before);
        assert!(!controller.is_animating(0.0));
    }

    #[test]
    fn switching_x_recomputes_only_x_scale() {
        let mut controller = built();
        let y_before = *controller.y_scale();

        assert!(controller.on_axis_label_click(AxisChoice::X(XField::Age), 0.0));

        assert_eq!(controller.selection().x, XField::Age);
        assert_eq!(controller.selection().y, YField::Healthcare);
        assert_eq!(controller.x_scale().domain(), (24.0, 48.0));
        assert_eq!(*controller.y_scale(), y_before);
        assert_eq!(controller.surface().unwrap().y_axis.scale(), &y_before);
    }

    #[test]
    fn click_animates_to_new_positions() {
        let mut controller = built();
        let start = positions(&controller, 0.0);
        controller.on_axis_label_click(AxisChoice::X(XField::Income), 5.0);

        assert!(controller.is_animating(5.5));
        assert_eq!(positions(&controller, 5.0), start);

        let end = positions(&controller, 6.0);
        let income = controller.x_scale();
        assert_eq!(end[0].x, 100.0 + income.map(40000.0));
        assert_eq!(end[1].x, 100.0 + income.map(50000.0));
        // Y positions are retargeted to the same values.
        assert_eq!(end[0].y, start[0].y);
        assert!(!controller.is_animating(6.0));
    }

    #[test]
    fn exactly_one_label_active_per_group_after_clicks() {
        let mut controller = built();
        let clicks = [
            AxisChoice::Y(YField::Obesity),
            AxisChoice::X(XField::Income),
            AxisChoice::Y(YField::Smokes),
            AxisChoice::Y(YField::Obesity),
            AxisChoice::X(XField::Age),
        ];
        for (i, choice) in clicks.into_iter().enumerate() {
            controller.on_axis_label_click(choice, i as f64 * 0.1);
            assert_eq!(active(&controller, choice.axis()), vec![choice]);
        }
        assert_eq!(active(&controller, Axis::X), vec![AxisChoice::X(XField::Age)]);
        assert_eq!(active(&controller, Axis::Y), vec![AxisChoice::Y(YField::Obesity)]);
    }

    #[test]
    fn repeated_resize_keeps_a_single_surface() {
        let mut controller = built();
        for i in 0..5 {
            controller.handle(
                ChartEvent::Resized(Viewport::new(800.0 + i as f64, 600.0)),
                0.0,
            );
            assert_eq!(controller.container().surfaces().len(), 1);
        }
        assert_eq!(controller.surface().unwrap().id, 6);
        assert_eq!(controller.surface().unwrap().viewport.width, 804.0);
    }

    #[test]
    fn build_returns_the_surface_it_appended() {
        let mut controller = ChartController::new(
            Container::new("#scatter"),
            two_states(),
            Canvas::default(),
            ChartStyle::default(),
        );
        let first = controller.build(Viewport::new(640.0, 480.0)).id;
        assert_eq!(controller.container().surfaces()[0].id, first);

        let rebuilt = controller.on_resize(Viewport::new(800.0, 600.0));
        assert_eq!(rebuilt.id, first + 1);
        assert_eq!(rebuilt.viewport, Viewport::new(800.0, 600.0));
    }

    #[test]
    fn pointer_left_without_hover_reports_no_change() {
        let mut controller = built();
        assert_eq!(controller.hovered(), None);
        assert!(!controller.handle(ChartEvent::PointerLeft, 0.0));
    }

    #[test]
    fn resize_resets_to_default_selection() {
        let mut controller = built();
        controller.on_axis_label_click(AxisChoice::Y(YField::Smokes), 0.0);
        controller.on_resize(Viewport::new(640.0, 480.0));

        assert_eq!(controller.selection(), Selection::default());
        assert_eq!(active(&controller, Axis::Y), vec![AxisChoice::Y(YField::Healthcare)]);
    }

    #[test]
    fn hover_shows_and_hides_tooltip() {
        let mut controller = built();
        let al = positions(&controller, 0.0)[0];

        assert!(controller.handle(ChartEvent::PointerMoved(al), 0.0));
        assert_eq!(controller.hovered(), Some(0));
        assert_eq!(controller.tooltip().unwrap().title, "AL");

        assert!(controller.handle(ChartEvent::PointerMoved(Point::new(0.0, 0.0)), 0.0));
        assert!(controller.tooltip().is_none());

        controller.handle(ChartEvent::PointerMoved(al), 0.0);
        assert!(controller.handle(ChartEvent::PointerLeft, 0.0));
        assert!(!controller.handle(ChartEvent::PointerLeft, 0.0));
    }

    #[test]
    fn tooltip_follows_selection() {
        let mut controller = built();
        controller.on_axis_label_click(AxisChoice::X(XField::Age), 0.0);
        controller.on_axis_label_click(AxisChoice::Y(YField::Smokes), 0.0);

        let tip = controller.tooltip_for(1).unwrap();
        assert_eq!(tip.x_line, "Age (Median) 40");
        assert_eq!(tip.y_line, "Smokes (%) 28");
    }

    #[test]
    fn label_hit_test_finds_selector() {
        let mut controller = built();
        let anchor = controller
            .surface()
            .unwrap()
            .label(AxisChoice::X(XField::Income))
            .unwrap()
            .anchor;

        let choice = controller.label_at(anchor).unwrap();
        assert_eq!(choice, AxisChoice::X(XField::Income));
        assert!(controller.handle(ChartEvent::AxisLabelClicked(choice), 0.0));
        assert_eq!(controller.selection().x, XField::Income);
    }
}
