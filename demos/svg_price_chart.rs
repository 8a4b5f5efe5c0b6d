use price_chart::api::{PriceChart, PriceChartConfig};
use price_chart::core::{DataPoint, Margin, Viewport};
use price_chart::render::SvgRenderer;
use price_chart::telemetry::init_default_tracing;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let _ = init_default_tracing();

    let config = PriceChartConfig::new(Viewport::new(640, 360))
        .with_margin(Margin::new(20.0, 20.0, 30.0, 40.0));
    let mut chart = PriceChart::new(SvgRenderer::new(), config)?;

    chart.set_data(vec![
        DataPoint::parse("2021-01-01", 100.0)?,
        DataPoint::parse("2021-01-02", 110.0)?,
        DataPoint::parse("2021-01-03", 90.0)?,
        DataPoint::parse("2021-01-04", 125.5)?,
        DataPoint::parse("2021-01-05", 118.25)?,
    ]);

    // Hover roughly over the middle sample.
    chart.pointer_move(40.0 + 290.0, 180.0);
    chart.render()?;

    println!("{}", chart.renderer().document());
    Ok(())
}
