use serde::{Deserialize, Serialize};

use crate::core::scale::DEFAULT_NICE_TICK_COUNT;
use crate::core::{DataPoint, LinearScale, Scale};

/// Price axis mapped onto an inverted Y pixel axis.
///
/// The domain is niced to round bounds, then mapped onto
/// `[plot_height, 0]` so larger prices sit higher on screen.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceScale {
    linear: LinearScale,
}

impl PriceScale {
    /// Builds a niced scale from explicit bounds.
    #[must_use]
    pub fn new(price_min: f64, price_max: f64, plot_height: f64) -> Self {
        Self {
            linear: LinearScale::new((price_min, price_max), (plot_height, 0.0))
                .nice(DEFAULT_NICE_TICK_COUNT),
        }
    }

    /// Fits a niced domain to the price extent of `points`.
    ///
    /// Empty input falls back to the degenerate domain `[0, 0]`.
    #[must_use]
    pub fn from_data(points: &[DataPoint], plot_height: f64) -> Self {
        if points.is_empty() {
            return Self::new(0.0, 0.0, plot_height);
        }

        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        for point in points {
            min = min.min(point.price);
            max = max.max(point.price);
        }
        Self::new(min, max, plot_height)
    }

    #[must_use]
    pub fn domain(self) -> (f64, f64) {
        self.linear.domain()
    }

    #[must_use]
    pub fn range(self) -> (f64, f64) {
        self.linear.range()
    }

    #[must_use]
    pub fn price_to_pixel(self, price: f64) -> f64 {
        self.linear.domain_to_pixel(price)
    }

    #[must_use]
    pub fn pixel_to_price(self, pixel: f64) -> f64 {
        self.linear.pixel_to_domain(pixel)
    }

    #[must_use]
    pub fn ticks(self, count: usize) -> Vec<f64> {
        self.linear.ticks(count)
    }
}

impl Scale for PriceScale {
    type Domain = f64;

    fn scale(&self, value: f64) -> f64 {
        self.price_to_pixel(value)
    }

    fn invert(&self, pixel: f64) -> f64 {
        self.pixel_to_price(pixel)
    }
}
