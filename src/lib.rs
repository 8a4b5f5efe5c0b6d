//! price-chart: interactive time-series price chart component.
//!
//! The chart maps `(date, price)` samples onto a plot area, draws them as a
//! line series and keeps a crosshair tooltip in sync with pointer input.
//! Rendering goes through the backend-agnostic [`render::Renderer`] trait.

pub mod api;
pub mod core;
pub mod error;
pub mod interaction;
pub mod render;
pub mod telemetry;

#[cfg(feature = "gtk4-adapter")]
pub mod platform_gtk;

pub use api::{PriceChart, PriceChartConfig};
pub use error::{ChartError, ChartResult};
