use barwheel_rs::api::{ChartConfig, ChartCore, ChartKind};
use barwheel_rs::core::Dimension;
use barwheel_rs::render::NullRenderer;
use serde_json::json;

fn chart(kind: ChartKind) -> ChartCore<NullRenderer> {
    let config = ChartConfig::new(Dimension::new(1).expect("dimension"), kind);
    ChartCore::new(NullRenderer::default(), config).expect("chart init")
}

fn values(chart: &ChartCore<NullRenderer>) -> Vec<f64> {
    chart.series(0).expect("series").iter().copied().collect()
}

#[test]
fn basic_chart_grows_without_limit() {
    let mut chart = chart(ChartKind::Basic);
    for tick in 0..50 {
        chart.append_data(&json!([tick])).expect("append");
    }
    assert_eq!(chart.len(), 50);
    assert_eq!(chart.capacity(), None);
}

#[test]
fn fixed_width_rejects_once_full() {
    let mut chart = chart(ChartKind::FixedWidth { capacity: 3 });
    chart.append_data(&json!([1, 2, 3])).expect("append");
    let frames_before = chart.renderer().frames_rendered;

    chart.append_data(&json!([4])).expect("append");

    assert_eq!(chart.len(), 3);
    assert_eq!(values(&chart), vec![1.0, 2.0, 3.0]);
    assert_eq!(chart.total_ingested(), 3);
    assert_eq!(chart.renderer().frames_rendered, frames_before);
}

#[test]
fn fixed_width_admits_only_remaining_room() {
    let mut chart = chart(ChartKind::FixedWidth { capacity: 3 });
    chart.append_data(&json!([1])).expect("append");
    chart.append_data(&json!([2, 3, 4, 5])).expect("append");

    assert_eq!(values(&chart), vec![1.0, 2.0, 3.0]);
}

#[test]
fn time_wheel_shifts_out_oldest_point() {
    let kind = ChartKind::time_wheel(3, "10:00").expect("kind");
    let mut chart = chart(kind);
    chart.append_data(&json!([1, 2, 3])).expect("append");
    chart.append_data(&json!([4])).expect("append");

    assert_eq!(chart.len(), 3);
    assert_eq!(values(&chart), vec![2.0, 3.0, 4.0]);
    assert_eq!(chart.total_ingested(), 4);
}

#[test]
fn shift_on_full_with_larger_evict_count_leaves_gap() {
    let kind = ChartKind::TimeWheel {
        capacity: 4,
        evict_count: 2,
        start_time: "00:00".parse().expect("time"),
    };
    let mut chart = chart(kind);
    chart.append_data(&json!([1, 2, 3, 4])).expect("append");
    chart.append_data(&json!([5])).expect("append");

    assert_eq!(values(&chart), vec![3.0, 4.0, 5.0]);
}

#[test]
fn sliding_keeps_last_points_of_oversized_batch() {
    let mut chart = chart(ChartKind::Sliding { capacity: 3 });
    chart.append_data(&json!([1, 2, 3, 4, 5])).expect("append");

    assert_eq!(chart.len(), 3);
    assert_eq!(values(&chart), vec![3.0, 4.0, 5.0]);
}

#[test]
fn sliding_evicts_exactly_what_the_batch_needs() {
    let mut chart = chart(ChartKind::Sliding { capacity: 4 });
    chart.append_data(&json!([1, 2, 3])).expect("append");
    chart.append_data(&json!([4, 5])).expect("append");

    assert_eq!(values(&chart), vec![2.0, 3.0, 4.0, 5.0]);
    assert_eq!(chart.total_ingested(), 5);
}

#[test]
fn zero_capacity_fails_construction() {
    let config = ChartConfig::new(
        Dimension::new(1).expect("dimension"),
        ChartKind::Sliding { capacity: 0 },
    );
    assert!(ChartCore::new(NullRenderer::default(), config).is_err());
}
