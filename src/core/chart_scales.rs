use serde::{Deserialize, Serialize};

use crate::core::{DataPoint, PlotArea, PriceScale, TimeScale};

/// Time and price scales derived for one plot area.
///
/// Building is a pure function of the data and the plot size, so callers may
/// memoize it on those inputs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChartScales {
    pub plot: PlotArea,
    pub time: TimeScale,
    pub price: PriceScale,
}

impl ChartScales {
    #[must_use]
    pub fn build(points: &[DataPoint], plot: PlotArea) -> Self {
        Self {
            plot,
            time: TimeScale::from_data(points, plot.width),
            price: PriceScale::from_data(points, plot.height),
        }
    }

    /// Plot-relative pixel position of one sample.
    #[must_use]
    pub fn project(&self, point: &DataPoint) -> (f64, f64) {
        (
            self.time.millis_to_pixel(point.time_millis()),
            self.price.price_to_pixel(point.price),
        )
    }
}
