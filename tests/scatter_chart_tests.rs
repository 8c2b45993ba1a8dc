use approx::assert_relative_eq;
use census_scatter::chart::{
    Axis, AxisChoice, Canvas, ChartController, ChartEvent, ChartStyle, Container, LinearScale,
    Viewport,
};
use census_scatter::data::{DataLoader, XField, YField};
use census_scatter::render::StaticChartRenderer;
use proptest::prelude::*;
use std::sync::Arc;

const STATES_CSV: &str = "\
id,state,abbr,poverty,age,income,healthcare,obesity,smokes
1,Alabama,AL,10,30,40000,15,20,18
2,Alaska,AK,20,40,50000,25,30,28
3,Arizona,AZ,17.8,36.9,52248,13.8,25.7,16.7
";

fn controller_from_csv(csv: &str) -> ChartController {
    let records = DataLoader::parse_csv_bytes(csv).expect("csv should parse");
    let mut controller = ChartController::new(
        Container::new("#scatter"),
        Arc::from(records),
        Canvas::default(),
        ChartStyle::default(),
    );
    controller.build(Viewport::new(1000.0, 650.0));
    controller
}

#[test]
fn csv_to_chart_smoke_flow() {
    let mut controller = controller_from_csv(STATES_CSV);
    let surface = controller.surface().expect("surface built");
    assert_eq!(surface.points.len(), 3);
    assert_eq!(surface.labels.len(), 6);

    assert!(controller.handle(
        ChartEvent::AxisLabelClicked(AxisChoice::Y(YField::Obesity)),
        0.0
    ));
    assert_eq!(controller.y_scale().domain().0, 20.0 * 0.8);
    assert_relative_eq!(controller.y_scale().domain().1, 30.0 * 1.2);

    let svg = StaticChartRenderer::render_svg(controller.surface().unwrap()).expect("svg");
    assert_eq!(svg.matches("<circle").count(), 3);
    assert!(svg.contains("Obese (%)"));
}

#[test]
fn default_layout_of_two_state_example() {
    let controller = controller_from_csv(STATES_CSV);
    let points = &controller.surface().unwrap().points;
    let al = points[0].target();
    let ak = points[1].target();

    assert!(al.x < ak.x);
    // Inverted Y range: the smaller healthcare value sits lower on screen.
    assert!(al.y > ak.y);
}

#[test]
fn tooltip_reads_selected_fields() {
    let mut controller = controller_from_csv(STATES_CSV);
    controller.on_axis_label_click(AxisChoice::X(XField::Age), 0.0);
    controller.on_axis_label_click(AxisChoice::Y(YField::Smokes), 0.0);

    let tip = controller.tooltip_for(2).expect("record exists");
    assert_eq!(tip.title, "AZ");
    assert_eq!(tip.x_line, "Age (Median) 36.9");
    assert_eq!(tip.y_line, "Smokes (%) 16.7");
}

#[test]
fn unparsable_values_do_not_break_the_chart() {
    let csv = "abbr,poverty,age,income,healthcare,obesity,smokes\n\
               AL,10,30,40000,15,20,18\n\
               ??,abc,40,50000,25,30,28\n";
    let mut controller = controller_from_csv(csv);
    assert!(controller.surface().unwrap().points[1].target().x.is_nan());
    assert_eq!(controller.x_scale().domain(), (8.0, 12.0));

    controller.on_axis_label_click(AxisChoice::X(XField::Age), 0.0);
    assert!(controller.surface().unwrap().points[1].target().is_finite());
}

fn choice_strategy() -> impl Strategy<Value = AxisChoice> {
    prop::sample::select(AxisChoice::ALL.to_vec())
}

proptest! {
    #[test]
    fn padded_scale_maps_extent_to_range(
        values in prop::collection::vec(0.1f64..1.0e6, 1..50),
        width in 10.0f64..2000.0,
    ) {
        let scale = LinearScale::padded(values.iter().copied(), (0.0, width));
        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);

        prop_assert!((scale.map(min * 0.8) - 0.0).abs() <= 1e-6 * width);
        prop_assert!((scale.map(max * 1.2) - width).abs() <= 1e-6 * width);
    }

    #[test]
    fn scale_is_monotonic(
        a in -1.0e4f64..1.0e4,
        b in -1.0e4f64..1.0e4,
        lo in 1.0f64..100.0,
        span in 1.0f64..100.0,
    ) {
        let scale = LinearScale::new((lo, lo + span), (500.0, 0.0));
        prop_assume!(b - a > 1e-6);
        prop_assert!(scale.map(a) > scale.map(b));
    }

    #[test]
    fn any_click_sequence_keeps_one_active_label_per_axis(
        clicks in prop::collection::vec(choice_strategy(), 0..20),
    ) {
        let mut controller = controller_from_csv(STATES_CSV);
        for (i, choice) in clicks.iter().enumerate() {
            let before = controller.selection();
            let changed = controller.on_axis_label_click(*choice, i as f64 * 0.3);
            prop_assert_eq!(changed, !before.is_selected(*choice));
            prop_assert!(controller.selection().is_selected(*choice));
        }

        let surface = controller.surface().unwrap();
        for axis in [Axis::X, Axis::Y] {
            let active: Vec<AxisChoice> = surface
                .labels
                .iter()
                .filter(|l| l.choice.axis() == axis && l.active)
                .map(|l| l.choice)
                .collect();
            prop_assert_eq!(active.len(), 1);
            prop_assert!(controller.selection().is_selected(active[0]));
        }
    }

    #[test]
    fn settled_positions_match_current_scales(
        clicks in prop::collection::vec(choice_strategy(), 1..10),
    ) {
        let mut controller = controller_from_csv(STATES_CSV);
        for (i, choice) in clicks.iter().enumerate() {
            controller.on_axis_label_click(*choice, i as f64 * 0.25);
        }

        let settled = 1.0e6;
        let selection = controller.selection();
        let surface = controller.surface().unwrap();
        for mark in &surface.points {
            let record = &controller.dataset()[mark.record];
            let pos = mark.position_at(settled);
            let expected_x = 100.0 + controller.x_scale().map(record.x_value(selection.x));
            let expected_y = 50.0 + controller.y_scale().map(record.y_value(selection.y));
            prop_assert!((pos.x - expected_x).abs() < 1e-9);
            prop_assert!((pos.y - expected_y).abs() < 1e-9);
        }
    }

    #[test]
    fn resizes_never_accumulate_surfaces(
        sizes in prop::collection::vec((100.0f64..3000.0, 100.0f64..2000.0), 1..10),
    ) {
        let mut controller = controller_from_csv(STATES_CSV);
        for (w, h) in sizes {
            controller.on_resize(Viewport::new(w, h));
            prop_assert_eq!(controller.container().surfaces().len(), 1);
        }
    }
}
