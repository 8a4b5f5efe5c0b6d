pub mod chart_scales;
pub mod line_series;
pub mod locator;
pub mod price_scale;
pub mod primitives;
pub mod scale;
pub mod time_scale;
pub mod types;

pub use chart_scales::ChartScales;
pub use line_series::{LineVertex, project_line_vertices};
pub use locator::{locate_nearest, locate_nearest_point};
pub use price_scale::PriceScale;
pub use scale::{LinearScale, Scale};
pub use time_scale::TimeScale;
pub use types::{DataPoint, Margin, PlotArea, Viewport, parse_iso_datetime};
