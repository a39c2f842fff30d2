use approx::assert_relative_eq;
use barwheel_rs::ChartError;
use barwheel_rs::api::{ChartConfig, ChartCore, ChartKind};
use barwheel_rs::core::{DataPoint, Dimension, ScalingMode, Viewport};
use barwheel_rs::render::NullRenderer;
use serde_json::json;

fn chart(dimension: usize, kind: ChartKind) -> ChartCore<NullRenderer> {
    let config = ChartConfig::new(Dimension::new(dimension).expect("dimension"), kind);
    ChartCore::new(NullRenderer::default(), config).expect("chart init")
}

#[test]
fn append_data_rejects_non_array_batch() {
    let mut chart = chart(2, ChartKind::Basic);
    let result = chart.append_data(&json!({"a": 1}));

    assert!(matches!(result, Err(ChartError::InvalidArgument(_))));
    assert!(chart.is_empty());
    assert_eq!(chart.renderer().frames_rendered, 0);
}

#[test]
fn malformed_points_are_dropped_without_aborting_batch() {
    let mut chart = chart(2, ChartKind::Basic);
    chart
        .append_data(&json!([
            [1, 2],
            [3],
            [4, "x"],
            [5, -1],
            7,
            null,
            [6, 8.5]
        ]))
        .expect("append");

    assert_eq!(chart.len(), 2);
    assert_eq!(chart.total_ingested(), 2);
    assert_eq!(
        chart.buffer().point(1).expect("second point"),
        vec![6.0, 8.5]
    );
}

#[test]
fn bare_numbers_are_points_only_for_single_dimension() {
    let mut single = chart(1, ChartKind::Basic);
    single.append_data(&json!([1, [2], 3.5])).expect("append");
    assert_eq!(single.len(), 3);

    let mut pair = chart(2, ChartKind::Basic);
    pair.append_data(&json!([1, 2])).expect("append");
    assert!(pair.is_empty());
}

#[test]
fn append_points_drops_wrong_arity() {
    let mut chart = chart(2, ChartKind::Basic);
    chart
        .append_points(vec![
            DataPoint::new([1.0, 2.0]).expect("point"),
            DataPoint::scalar(3.0).expect("point"),
            DataPoint::new([4.0, 5.0]).expect("point"),
        ])
        .expect("append");

    assert_eq!(chart.len(), 2);
}

#[test]
fn dimension_out_of_range_fails_fast() {
    assert!(matches!(
        Dimension::new(0),
        Err(ChartError::InvalidArgument(_))
    ));
    assert!(Dimension::new(11).is_err());
    assert!(Dimension::new(10).is_ok());
}

#[test]
fn clear_data_rescans_maximum() {
    let mut chart = chart(1, ChartKind::Basic);
    chart.append_data(&json!([5, 10, 3])).expect("append");
    assert_eq!(chart.max_value(0).expect("max"), 10.0);

    chart.clear_data(Some(1)).expect("clear");
    assert_eq!(chart.max_value(0).expect("max"), 10.0);

    chart.clear_data(Some(1)).expect("clear");
    assert_eq!(chart.max_value(0).expect("max"), 3.0);
    assert_eq!(chart.series(0).expect("series").len(), 1);
}

#[test]
fn clear_data_validates_count() {
    let mut chart = chart(1, ChartKind::Basic);
    chart.append_data(&json!([1, 2])).expect("append");

    assert!(matches!(
        chart.clear_data(Some(0)),
        Err(ChartError::InvalidArgument(_))
    ));
    assert!(chart.clear_data(Some(3)).is_err());
    assert_eq!(chart.len(), 2);

    assert_eq!(chart.clear_data(None).expect("clear all"), 2);
    assert!(chart.is_empty());
    assert_eq!(chart.max_value(0).expect("max"), 0.0);
    assert_eq!(chart.total_ingested(), 2);
}

#[test]
fn clear_all_on_empty_chart_is_invalid_argument() {
    let mut chart = chart(1, ChartKind::Basic);
    assert!(matches!(
        chart.clear_data(None),
        Err(ChartError::InvalidArgument(_))
    ));
    assert_eq!(chart.renderer().frames_rendered, 0);

    chart.append_data(&json!([4])).expect("append");
    chart.clear_data(None).expect("clear all");
    let frames = chart.renderer().frames_rendered;
    assert!(chart.clear_data(None).is_err());
    assert_eq!(chart.renderer().frames_rendered, frames);
    assert_eq!(chart.total_ingested(), 1);
}

#[test]
fn out_of_range_series_index_is_invalid_argument() {
    let chart = chart(2, ChartKind::Basic);
    assert!(matches!(
        chart.series(2),
        Err(ChartError::InvalidArgument(_))
    ));
    assert!(chart.domain(5).is_err());
    assert!(chart.max_value(2).is_err());
}

#[test]
fn reset_clears_total_ingested() {
    let mut chart = chart(1, ChartKind::Basic);
    chart.append_data(&json!([1, 2, 3])).expect("append");
    chart.reset();

    assert!(chart.is_empty());
    assert_eq!(chart.total_ingested(), 0);
}

#[test]
fn time_wheel_anchor_advances_on_eviction() {
    let kind = ChartKind::time_wheel(3, "23:58").expect("kind");
    let mut chart = chart(1, kind);
    chart.append_data(&json!([1, 2, 3])).expect("append");
    assert_eq!(chart.time_anchor().map(|t| t.to_string()).as_deref(), Some("23:58"));

    chart.append_data(&json!([4])).expect("append");
    assert_eq!(chart.time_anchor().map(|t| t.to_string()).as_deref(), Some("23:59"));

    chart.clear_data(Some(2)).expect("clear");
    assert_eq!(chart.time_anchor().map(|t| t.to_string()).as_deref(), Some("00:01"));

    chart.reset();
    assert_eq!(chart.time_anchor().map(|t| t.to_string()).as_deref(), Some("23:58"));
}

#[test]
fn time_wheel_rejects_invalid_start_time() {
    assert!(ChartKind::time_wheel(60, "24:00").is_err());
    assert!(ChartKind::time_wheel(60, "9:7").is_ok());
}

#[test]
fn wheel_labels_follow_the_anchor() {
    let kind = ChartKind::time_wheel(60, "9:50").expect("kind");
    let mut chart = chart(1, kind);
    let labels = chart.wheel_labels(15).expect("labels");
    let texts: Vec<&str> = labels.iter().map(|l| l.label.as_str()).collect();
    assert_eq!(texts, vec!["09:50", "10:05", "10:20", "10:35"]);

    let batch: Vec<u32> = (0..61).collect();
    chart.append_data(&json!(batch)).expect("append");
    chart.append_data(&json!([1])).expect("append");
    let labels = chart.wheel_labels(30).expect("labels");
    assert_eq!(labels[0].label, "09:51");
    assert_eq!(labels[1].slot, 30);

    let layout = chart.wheel_layout().expect("layout");
    let angles = layout.slot_angles(15).expect("angles");
    assert_relative_eq!(angles.start, std::f64::consts::FRAC_PI_2, epsilon = 1e-12);
}

#[test]
fn wheel_slot_time_counts_minutes_from_the_anchor() {
    let kind = ChartKind::time_wheel(60, "23:50").expect("kind");
    let chart = chart(1, kind);
    let layout = chart.wheel_layout().expect("layout");
    let anchor = chart.time_anchor().expect("anchor");

    let at = |slot| layout.slot_time(anchor, slot).map(|t| t.to_string());
    assert_eq!(at(0).expect("slot 0"), "23:50");
    assert_eq!(at(15).expect("slot 15"), "00:05");
    assert_eq!(at(59).expect("slot 59"), "00:49");
    assert!(matches!(at(60), Err(ChartError::InvalidArgument(_))));
}

#[test]
fn wheel_labels_require_time_wheel() {
    let chart = chart(1, ChartKind::Basic);
    assert!(chart.wheel_labels(5).is_err());
    assert!(chart.wheel_layout().is_none());
}

#[test]
fn renderer_receives_frame_after_each_mutation() {
    let config = ChartConfig::new(
        Dimension::new(2).expect("dimension"),
        ChartKind::FixedWidth { capacity: 4 },
    );
    let renderer = NullRenderer::with_viewport(Viewport::new(400, 200));
    let mut chart = ChartCore::new(renderer, config).expect("chart init");

    chart.append_data(&json!([[1, 2], [3, 4]])).expect("append");
    assert_eq!(chart.renderer().frames_rendered, 1);
    assert_eq!(chart.renderer().last_point_count, 2);
    assert_eq!(chart.renderer().last_bar_count, 4);

    chart.clear_data(Some(1)).expect("clear");
    chart.set_scaling_mode(ScalingMode::Global);
    chart.render().expect("render");
    assert_eq!(chart.renderer().frames_rendered, 4);
    assert_eq!(chart.renderer().last_point_count, 1);
}
