use price_chart::api::{PriceChart, PriceChartConfig, RenderStyle, TooltipBehavior};
use price_chart::core::{DataPoint, Margin, Viewport};
use price_chart::render::{CanvasLayerKind, Color, LineStrokeStyle, NullRenderer, RenderFrame};

fn scenario_points() -> Vec<DataPoint> {
    vec![
        DataPoint::parse("2021-01-01", 100.0).expect("valid point"),
        DataPoint::parse("2021-01-02", 110.0).expect("valid point"),
        DataPoint::parse("2021-01-03", 90.0).expect("valid point"),
    ]
}

fn chart_with(config: PriceChartConfig) -> PriceChart<NullRenderer> {
    let mut chart = PriceChart::new(NullRenderer::default(), config).expect("chart init");
    chart.set_data(scenario_points());
    chart
}

fn layer_counts(frame: &RenderFrame, kind: CanvasLayerKind) -> (usize, usize, usize, usize, usize) {
    let layer = frame.layer(kind).expect("layer present");
    (
        layer.rects.len(),
        layer.polylines.len(),
        layer.lines.len(),
        layer.circles.len(),
        layer.texts.len(),
    )
}

#[test]
fn layers_follow_canonical_order() {
    let chart = chart_with(PriceChartConfig::new(Viewport::new(100, 200)));
    let frame = chart.build_render_frame().expect("frame");
    let kinds: Vec<CanvasLayerKind> = frame.layers.iter().map(|layer| layer.kind).collect();
    assert_eq!(kinds, CanvasLayerKind::ORDERED.to_vec());
}

#[test]
fn empty_chart_draws_background_only() {
    let chart = PriceChart::new(
        NullRenderer::default(),
        PriceChartConfig::new(Viewport::new(100, 200)),
    )
    .expect("chart init");
    let frame = chart.build_render_frame().expect("frame");

    assert_eq!(layer_counts(&frame, CanvasLayerKind::Background), (1, 0, 0, 0, 0));
    let counts = frame.primitive_counts();
    assert_eq!(counts.rects, 1);
    assert_eq!(counts.polylines + counts.lines + counts.circles + counts.texts, 0);
}

#[test]
fn zero_viewport_renders_nothing() {
    let chart = chart_with(PriceChartConfig::new(Viewport::new(0, 0)));
    let frame = chart.build_render_frame().expect("frame");
    assert!(frame.is_empty());
}

#[test]
fn series_polyline_is_offset_by_margin() {
    let config = PriceChartConfig::new(Viewport::new(130, 230))
        .with_margin(Margin::new(10.0, 10.0, 20.0, 20.0));
    let chart = chart_with(config);
    let frame = chart.build_render_frame().expect("frame");

    let series = frame.layer(CanvasLayerKind::Series).expect("series layer");
    assert_eq!(series.polylines.len(), 1);
    assert_eq!(
        series.polylines[0].points,
        vec![(20.0, 110.0), (70.0, 10.0), (120.0, 210.0)]
    );
}

#[test]
fn grid_rows_sit_on_price_ticks() {
    let chart = chart_with(PriceChartConfig::new(Viewport::new(100, 200)));
    let frame = chart.build_render_frame().expect("frame");

    let grid = frame.layer(CanvasLayerKind::Grid).expect("grid layer");
    let mut rows: Vec<f64> = grid
        .lines
        .iter()
        .filter(|line| line.y1 == line.y2)
        .map(|line| line.y1)
        .collect();
    rows.sort_by(f64::total_cmp);
    // Ticks 90, 95, 100, 105, 110 over a 200px plot.
    assert_eq!(rows, vec![0.0, 50.0, 100.0, 150.0, 200.0]);
    assert!(
        grid.lines
            .iter()
            .filter(|line| line.x1 == line.x2)
            .all(|line| (0.0..=100.0).contains(&line.x1))
    );
}

#[test]
fn grid_can_be_disabled() {
    let style = RenderStyle {
        show_grid: false,
        ..RenderStyle::default()
    };
    let chart = chart_with(PriceChartConfig::new(Viewport::new(100, 200)).with_render_style(style));
    let frame = chart.build_render_frame().expect("frame");
    assert!(frame.layer(CanvasLayerKind::Grid).expect("grid").is_empty());
}

#[test]
fn overlay_covers_plot_with_transparent_rect() {
    let config = PriceChartConfig::new(Viewport::new(120, 220))
        .with_margin(Margin::uniform(10.0));
    let chart = chart_with(config);
    let frame = chart.build_render_frame().expect("frame");

    let overlay = frame.layer(CanvasLayerKind::Overlay).expect("overlay");
    assert_eq!(overlay.rects.len(), 1);
    let rect = overlay.rects[0];
    assert_eq!((rect.x, rect.y, rect.width, rect.height), (10.0, 10.0, 100.0, 200.0));
    assert_eq!(rect.fill_color, Color::TRANSPARENT);
}

#[test]
fn hidden_tooltip_draws_no_guide() {
    let chart = chart_with(PriceChartConfig::new(Viewport::new(100, 200)));
    let frame = chart.build_render_frame().expect("frame");
    assert!(frame.layer(CanvasLayerKind::Crosshair).expect("crosshair").is_empty());
    assert!(frame.layer(CanvasLayerKind::Tooltip).expect("tooltip").is_empty());
}

#[test]
fn visible_tooltip_draws_guide_marker_and_labels() {
    let mut chart = chart_with(PriceChartConfig::new(Viewport::new(100, 200)));
    chart.pointer_move(50.0, 30.0);
    let frame = chart.build_render_frame().expect("frame");

    assert_eq!(layer_counts(&frame, CanvasLayerKind::Crosshair), (0, 0, 1, 2, 0));
    let crosshair = frame.layer(CanvasLayerKind::Crosshair).expect("crosshair");
    let guide = crosshair.lines[0];
    assert_eq!((guide.x1, guide.y1, guide.x2, guide.y2), (50.0, 0.0, 50.0, 200.0));
    assert_eq!(guide.stroke_style, LineStrokeStyle::Dashed);
    let marker = crosshair.circles[1];
    assert_eq!((marker.cx, marker.cy), (50.0, 0.0));

    let tooltip = frame.layer(CanvasLayerKind::Tooltip).expect("tooltip");
    let texts: Vec<&str> = tooltip.texts.iter().map(|text| text.text.as_str()).collect();
    assert_eq!(texts, vec!["$110", "January 2, 2021 12:00 AM"]);
    assert_eq!(tooltip.rects.len(), 2);
}

#[test]
fn labels_stay_inside_plot_horizontally() {
    let mut chart = chart_with(PriceChartConfig::new(Viewport::new(100, 200)));
    chart.pointer_move(99.0, 30.0);
    let frame = chart.build_render_frame().expect("frame");

    let tooltip = frame.layer(CanvasLayerKind::Tooltip).expect("tooltip");
    let price_box = tooltip.rects[0];
    assert!(price_box.x + price_box.width <= 99.0);
}

#[test]
fn flipped_price_label_does_not_cross_into_left_margin() {
    let config = PriceChartConfig::new(Viewport::new(120, 200))
        .with_margin(Margin::new(0.0, 0.0, 0.0, 60.0));
    let mut chart = chart_with(config);
    chart.pointer_move(90.0, 30.0);
    let frame = chart.build_render_frame().expect("frame");

    let tooltip = frame.layer(CanvasLayerKind::Tooltip).expect("tooltip");
    assert_eq!(tooltip.texts[0].text, "$110");
    let price_box = tooltip.rects[0];
    assert!(price_box.x >= 60.0, "label starts at {}", price_box.x);
    assert!(price_box.x + price_box.width <= 120.0);
}

#[test]
fn label_switches_are_honoured() {
    let mut chart = chart_with(PriceChartConfig::new(Viewport::new(100, 200)));
    chart.set_tooltip_behavior(TooltipBehavior {
        show_date_label: false,
        ..TooltipBehavior::default()
    });
    chart.pointer_move(50.0, 30.0);
    let frame = chart.build_render_frame().expect("frame");

    let tooltip = frame.layer(CanvasLayerKind::Tooltip).expect("tooltip");
    assert_eq!(tooltip.texts.len(), 1);
    assert_eq!(tooltip.texts[0].text, "$110");
}

#[test]
fn render_hands_frame_to_renderer() {
    let mut chart = chart_with(PriceChartConfig::new(Viewport::new(100, 200)));
    chart.pointer_move(50.0, 30.0);
    chart.render().expect("render");

    let renderer = chart.renderer();
    assert_eq!(renderer.render_count, 1);
    assert_eq!(renderer.last_counts.polylines, 1);
    assert_eq!(renderer.last_counts.circles, 2);
    assert_eq!(renderer.last_counts.texts, 2);
}

#[test]
fn scales_are_memoized_between_frames() {
    let mut chart = chart_with(PriceChartConfig::new(Viewport::new(100, 200)));
    chart.render().expect("render");
    chart.render().expect("render");
    let stats = chart.scale_cache_stats();
    assert_eq!(stats.misses, 1);
    assert!(stats.hits >= 1);

    chart.set_viewport(Viewport::new(200, 200));
    chart.render().expect("render");
    assert_eq!(chart.scale_cache_stats().misses, 2);
}
