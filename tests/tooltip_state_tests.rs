use price_chart::api::{PriceChart, PriceChartConfig, TooltipBehavior};
use price_chart::core::{DataPoint, Margin, Viewport};
use price_chart::interaction::{GuideAnchor, PointerSource, TooltipState};
use price_chart::render::NullRenderer;

fn scenario_points() -> Vec<DataPoint> {
    vec![
        DataPoint::parse("2021-01-01", 100.0).expect("valid point"),
        DataPoint::parse("2021-01-02", 110.0).expect("valid point"),
        DataPoint::parse("2021-01-03", 90.0).expect("valid point"),
    ]
}

fn scenario_chart() -> PriceChart<NullRenderer> {
    let config = PriceChartConfig::new(Viewport::new(100, 200));
    let mut chart = PriceChart::new(NullRenderer::default(), config).expect("chart init");
    chart.set_data(scenario_points());
    chart
}

#[test]
fn tooltip_starts_hidden() {
    let chart = scenario_chart();
    assert_eq!(chart.tooltip_state(), TooltipState::Hidden);
    assert!(chart.pointer_position().is_none());
}

#[test]
fn pointer_move_shows_resolved_point() {
    let mut chart = scenario_chart();
    chart.pointer_move(50.0, 20.0);

    let state = chart.tooltip_state();
    assert!(state.is_visible());
    let payload = state.payload().expect("visible payload");
    assert_eq!(payload.index, 1);
    assert_eq!(payload.point.price, 110.0);
    assert_eq!(state.pixel_x(), Some(50.0));
    // 110 is the top of the [90, 110] price domain.
    assert_eq!(state.pixel_y(), Some(0.0));
}

#[test]
fn consecutive_moves_replace_the_payload() {
    let mut chart = scenario_chart();
    chart.pointer_move(0.0, 10.0);
    assert_eq!(
        chart.tooltip_state().active_point().map(|p| p.price),
        Some(100.0)
    );

    chart.pointer_move(100.0, 10.0);
    let state = chart.tooltip_state();
    assert!(state.is_visible());
    assert_eq!(state.active_point().map(|p| p.price), Some(90.0));
    assert_eq!(state.pixel_y(), Some(200.0));
}

#[test]
fn pointer_leave_always_hides() {
    let mut chart = scenario_chart();
    chart.pointer_leave();
    assert_eq!(chart.tooltip_state(), TooltipState::Hidden);

    chart.pointer_move(30.0, 10.0);
    assert!(chart.tooltip_state().is_visible());
    chart.pointer_leave();
    assert_eq!(chart.tooltip_state(), TooltipState::Hidden);
    assert!(chart.pointer_position().is_none());
}

#[test]
fn touch_move_behaves_like_pointer_move() {
    let mut chart = scenario_chart();
    chart.touch_move(100.0, 50.0);

    assert_eq!(chart.pointer_source(), Some(PointerSource::Touch));
    assert_eq!(
        chart.tooltip_state().active_point().map(|p| p.price),
        Some(90.0)
    );
}

#[test]
fn empty_data_suppresses_tooltip() {
    let config = PriceChartConfig::new(Viewport::new(100, 200));
    let mut chart = PriceChart::new(NullRenderer::default(), config).expect("chart init");
    chart.pointer_move(50.0, 50.0);
    assert_eq!(chart.tooltip_state(), TooltipState::Hidden);
}

#[test]
fn zero_plot_area_suppresses_tooltip() {
    let config = PriceChartConfig::new(Viewport::new(40, 40))
        .with_margin(Margin::new(10.0, 20.0, 10.0, 20.0));
    let mut chart = PriceChart::new(NullRenderer::default(), config).expect("chart init");
    chart.set_data(scenario_points());
    chart.pointer_move(20.0, 20.0);
    assert_eq!(chart.tooltip_state(), TooltipState::Hidden);
}

#[test]
fn left_margin_is_subtracted_from_pointer_x() {
    let config = PriceChartConfig::new(Viewport::new(130, 200))
        .with_margin(Margin::new(0.0, 10.0, 0.0, 20.0));
    let mut chart = PriceChart::new(NullRenderer::default(), config).expect("chart init");
    chart.set_data(scenario_points());

    chart.pointer_move(70.0, 10.0);
    let payload = *chart.tooltip_state().payload().expect("visible");
    assert_eq!(payload.index, 1);
    assert_eq!(payload.x, 50.0);

    chart.pointer_move(5.0, 10.0);
    assert_eq!(chart.tooltip_state(), TooltipState::Hidden);
    assert!(chart.pointer_position().is_none());
}

#[test]
fn pointer_in_margin_hides_tooltip() {
    let config =
        PriceChartConfig::new(Viewport::new(200, 200)).with_margin(Margin::uniform(40.0));
    let mut chart = PriceChart::new(NullRenderer::default(), config).expect("chart init");
    chart.set_data(scenario_points());

    chart.pointer_move(5.0, 5.0);
    assert_eq!(chart.tooltip_state(), TooltipState::Hidden);

    chart.pointer_move(100.0, 100.0);
    let payload = *chart.tooltip_state().payload().expect("visible");
    assert_eq!(payload.index, 1);
    assert_eq!(payload.x, 60.0);

    // Right of the plot and below it.
    chart.pointer_move(170.0, 100.0);
    assert_eq!(chart.tooltip_state(), TooltipState::Hidden);
    chart.touch_move(100.0, 161.0);
    assert_eq!(chart.tooltip_state(), TooltipState::Hidden);

    // Plot edges still count as inside.
    chart.pointer_move(40.0, 160.0);
    assert_eq!(chart.tooltip_state().payload().map(|p| p.index), Some(0));
    assert!(chart.is_inside_plot(160.0, 40.0));
    assert!(!chart.is_inside_plot(160.5, 40.0));
}

#[test]
fn data_anchor_snaps_guide_to_sample() {
    let mut chart = scenario_chart();
    chart.set_tooltip_behavior(TooltipBehavior {
        guide_anchor: GuideAnchor::DataPoint,
        ..TooltipBehavior::default()
    });

    chart.pointer_move(40.0, 10.0);
    let payload = *chart.tooltip_state().payload().expect("visible");
    assert_eq!(payload.index, 1);
    assert_eq!(payload.x, 50.0);
    assert_eq!(payload.point_x, 50.0);
}

#[test]
fn switching_anchor_re_resolves_at_last_pointer() {
    let mut chart = scenario_chart();
    chart.pointer_move(40.0, 10.0);
    assert_eq!(chart.tooltip_state().pixel_x(), Some(40.0));

    chart.set_tooltip_behavior(TooltipBehavior {
        guide_anchor: GuideAnchor::DataPoint,
        ..TooltipBehavior::default()
    });
    assert_eq!(chart.tooltip_state().pixel_x(), Some(50.0));
}

#[test]
fn data_and_layout_changes_clear_tooltip() {
    let mut chart = scenario_chart();
    chart.pointer_move(50.0, 10.0);
    chart.set_data(scenario_points());
    assert_eq!(chart.tooltip_state(), TooltipState::Hidden);

    chart.pointer_move(50.0, 10.0);
    chart.set_viewport(Viewport::new(300, 200));
    assert_eq!(chart.tooltip_state(), TooltipState::Hidden);

    chart.pointer_move(50.0, 10.0);
    chart
        .set_margin(Margin::uniform(5.0))
        .expect("valid margin");
    assert_eq!(chart.tooltip_state(), TooltipState::Hidden);
}
