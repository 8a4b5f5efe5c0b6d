use std::sync::Arc;

use chrono::{TimeZone, Utc};
use price_chart::api::{
    DEFAULT_DATE_LABEL_PATTERN, PriceChart, PriceChartConfig, format_currency,
    format_long_datetime,
};
use price_chart::core::Viewport;
use price_chart::render::NullRenderer;

#[test]
fn currency_uses_whole_dollars_with_grouping() {
    assert_eq!(format_currency(0.0), "$0");
    assert_eq!(format_currency(110.0), "$110");
    assert_eq!(format_currency(1_234.0), "$1,234");
    assert_eq!(format_currency(1_234_567.89), "$1,234,568");
    assert_eq!(format_currency(999.5), "$1,000");
}

#[test]
fn currency_handles_negatives_and_non_finite() {
    assert_eq!(format_currency(-1_234.4), "-$1,234");
    assert_eq!(format_currency(-0.4), "$0");
    assert_eq!(format_currency(f64::NAN), "nan");
    assert_eq!(format_currency(f64::INFINITY), "nan");
}

#[test]
fn long_datetime_matches_default_pattern() {
    let time = Utc
        .with_ymd_and_hms(2021, 3, 7, 15, 4, 0)
        .single()
        .expect("valid time");
    assert_eq!(format_long_datetime(time), "March 7, 2021 3:04 PM");
    assert_eq!(
        time.format(DEFAULT_DATE_LABEL_PATTERN).to_string(),
        format_long_datetime(time)
    );
}

#[test]
fn midnight_renders_as_twelve_am() {
    let time = Utc
        .with_ymd_and_hms(2021, 1, 1, 0, 0, 0)
        .single()
        .expect("valid time");
    assert_eq!(format_long_datetime(time), "January 1, 2021 12:00 AM");
}

#[test]
fn formatter_overrides_can_be_installed_and_cleared() {
    let mut chart = PriceChart::new(
        NullRenderer::default(),
        PriceChartConfig::new(Viewport::new(100, 100)),
    )
    .expect("chart init");
    let time = Utc
        .with_ymd_and_hms(2021, 1, 1, 0, 0, 0)
        .single()
        .expect("valid time");

    chart.set_price_label_formatter(Arc::new(|price| format!("{price:.2} USD")));
    chart.set_date_label_formatter(Arc::new(|time| time.format("%Y-%m-%d").to_string()));
    assert_eq!(chart.format_price_label(12.5), "12.50 USD");
    assert_eq!(chart.format_date_label(time), "2021-01-01");

    chart.clear_price_label_formatter();
    chart.clear_date_label_formatter();
    assert_eq!(chart.format_price_label(12.5), "$13");
    assert_eq!(chart.format_date_label(time), "January 1, 2021 12:00 AM");
}
