//! Public chart component and its supporting controllers.

mod chart;
mod chart_config;
mod data_controller;
mod interaction_controller;
mod label_format;
mod render_frame_builder;
mod render_style;
mod scale_cache;

pub use chart::PriceChart;
pub use chart_config::PriceChartConfig;
pub use label_format::{
    DEFAULT_DATE_LABEL_PATTERN, DateLabelFormatterFn, PriceLabelFormatterFn, format_currency,
    format_long_datetime,
};
pub use render_style::{RenderStyle, TooltipBehavior};
pub use scale_cache::ScaleCacheStats;
