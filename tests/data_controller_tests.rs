use approx::assert_relative_eq;
use chrono::{TimeZone, Utc};
use price_chart::ChartError;
use price_chart::api::{PriceChart, PriceChartConfig};
use price_chart::core::{DataPoint, Viewport};
use price_chart::interaction::TooltipState;
use price_chart::render::NullRenderer;
use rust_decimal::Decimal;

fn point(date: &str, price: f64) -> DataPoint {
    DataPoint::parse(date, price).expect("valid point")
}

fn empty_chart() -> PriceChart<NullRenderer> {
    PriceChart::new(
        NullRenderer::default(),
        PriceChartConfig::new(Viewport::new(100, 100)),
    )
    .expect("chart init")
}

#[test]
fn set_data_sorts_and_dedupes() {
    let mut chart = empty_chart();
    chart.set_data(vec![
        point("2021-01-03", 90.0),
        point("2021-01-01", 100.0),
        point("2021-01-02", 105.0),
        point("2021-01-02", 110.0),
        point("2021-01-04", f64::NAN),
    ]);

    let prices: Vec<f64> = chart.points().iter().map(|p| p.price).collect();
    assert_eq!(prices, vec![100.0, 110.0, 90.0]);
    assert!(chart.points().windows(2).all(|w| w[0].time < w[1].time));
}

#[test]
fn append_point_extends_series() {
    let mut chart = empty_chart();
    chart.set_data(vec![point("2021-01-01", 100.0)]);
    chart.append_point(point("2021-01-02", 101.0)).expect("append");
    assert_eq!(chart.points().len(), 2);
    assert_eq!(chart.points()[1].price, 101.0);
}

#[test]
fn append_point_with_same_time_replaces_latest() {
    let mut chart = empty_chart();
    chart.set_data(vec![point("2021-01-01", 100.0), point("2021-01-02", 101.0)]);
    chart.append_point(point("2021-01-02", 99.5)).expect("update");
    assert_eq!(chart.points().len(), 2);
    assert_eq!(chart.points()[1].price, 99.5);
}

#[test]
fn append_point_rejects_older_and_non_finite_samples() {
    let mut chart = empty_chart();
    chart.set_data(vec![point("2021-01-02", 100.0)]);

    let err = chart
        .append_point(point("2021-01-01", 1.0))
        .expect_err("older sample");
    assert!(matches!(err, ChartError::InvalidData(_)));
    assert!(chart.append_point(point("2021-01-03", f64::NAN)).is_err());
    assert_eq!(chart.points().len(), 1);
}

#[test]
fn append_into_empty_chart_is_accepted() {
    let mut chart = empty_chart();
    chart.append_point(point("2021-01-01", 5.0)).expect("append");
    assert_eq!(chart.points(), &[point("2021-01-01", 5.0)]);
}

#[test]
fn data_changes_invalidate_scales_and_tooltip() {
    let mut chart = empty_chart();
    chart.set_data(vec![point("2021-01-01", 100.0), point("2021-01-02", 120.0)]);
    chart.pointer_move(100.0, 10.0);
    assert!(chart.tooltip_state().is_visible());
    let before = chart.scales();

    chart.append_point(point("2021-01-03", 200.0)).expect("append");
    assert_eq!(chart.tooltip_state(), TooltipState::Hidden);
    let after = chart.scales();
    assert_ne!(before.time, after.time);
    assert!(after.price.domain().1 >= 200.0);
}

#[test]
fn date_parsing_accepts_common_iso_forms() {
    let midnight = Utc
        .with_ymd_and_hms(2021, 1, 2, 0, 0, 0)
        .single()
        .expect("valid time");
    assert_eq!(point("2021-01-02", 1.0).time, midnight);
    assert_eq!(point("2021-01-02T00:00:00", 1.0).time, midnight);
    assert_eq!(point("2021-01-02T00:00:00Z", 1.0).time, midnight);
    assert_eq!(point("2021-01-02T01:00:00+01:00", 1.0).time, midnight);
}

#[test]
fn invalid_dates_are_reported() {
    let err = DataPoint::parse("02/01/2021", 1.0).expect_err("bad date");
    assert!(matches!(err, ChartError::InvalidDate { .. }));
}

#[test]
fn decimal_prices_convert_to_f64() {
    let time = Utc
        .with_ymd_and_hms(2021, 1, 2, 0, 0, 0)
        .single()
        .expect("valid time");
    let point = DataPoint::from_decimal(time, Decimal::new(12_345, 2)).expect("decimal price");
    assert_relative_eq!(point.price, 123.45);
}

#[test]
fn data_points_serialize_with_date_key() {
    let json = serde_json::to_string(&point("2021-01-02", 110.0)).expect("serialize");
    assert_eq!(json, r#"{"date":"2021-01-02T00:00:00.000Z","price":110.0}"#);
    let parsed: DataPoint = serde_json::from_str(&json).expect("parse");
    assert_eq!(parsed, point("2021-01-02", 110.0));
}
