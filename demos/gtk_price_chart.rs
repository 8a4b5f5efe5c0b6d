use chrono::{Duration, TimeZone, Utc};
use gtk4 as gtk;
use gtk4::prelude::*;
use price_chart::api::PriceChartConfig;
use price_chart::core::{DataPoint, Margin, Viewport};
use price_chart::platform_gtk::GtkPriceChart;
use price_chart::telemetry::init_default_tracing;

fn main() {
    let _ = init_default_tracing();
    let app = gtk::Application::builder()
        .application_id("rs.price_chart.demos.gtk_price_chart")
        .build();
    app.connect_activate(build_ui);
    app.run();
}

fn build_ui(app: &gtk::Application) {
    let config = PriceChartConfig::new(Viewport::new(960, 540))
        .with_margin(Margin::new(24.0, 24.0, 32.0, 48.0));
    let adapter = match GtkPriceChart::new(config) {
        Ok(adapter) => adapter,
        Err(err) => {
            eprintln!("failed to initialize price chart: {err}");
            return;
        }
    };
    adapter.set_data(sample_points());

    let window = gtk::ApplicationWindow::builder()
        .application(app)
        .title("price-chart")
        .default_width(960)
        .default_height(540)
        .child(adapter.drawing_area())
        .build();
    window.present();
}

fn sample_points() -> Vec<DataPoint> {
    let Some(start) = Utc.with_ymd_and_hms(2021, 1, 1, 0, 0, 0).single() else {
        return Vec::new();
    };
    (0..120)
        .map(|day| {
            let t = f64::from(day);
            let price = 100.0 + (t * 0.21).sin() * 12.0 + t * 0.15;
            DataPoint::new(start + Duration::days(i64::from(day)), price)
        })
        .collect()
}
