use serde::{Deserialize, Serialize};

use crate::core::{Margin, Viewport};
use crate::error::{ChartError, ChartResult};

use super::{RenderStyle, TooltipBehavior};

/// Public chart bootstrap configuration.
///
/// This type is serializable so host applications can persist/load chart setup
/// without inventing their own ad-hoc format. Everything except the viewport
/// is optional in JSON.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceChartConfig {
    pub viewport: Viewport,
    #[serde(default)]
    pub margin: Margin,
    #[serde(default)]
    pub render_style: RenderStyle,
    #[serde(default)]
    pub tooltip_behavior: TooltipBehavior,
}

impl PriceChartConfig {
    #[must_use]
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            margin: Margin::default(),
            render_style: RenderStyle::default(),
            tooltip_behavior: TooltipBehavior::default(),
        }
    }

    #[must_use]
    pub fn with_margin(mut self, margin: Margin) -> Self {
        self.margin = margin;
        self
    }

    #[must_use]
    pub fn with_render_style(mut self, style: RenderStyle) -> Self {
        self.render_style = style;
        self
    }

    #[must_use]
    pub fn with_tooltip_behavior(mut self, behavior: TooltipBehavior) -> Self {
        self.tooltip_behavior = behavior;
        self
    }

    /// Checks margins and style.
    ///
    /// A zero-size viewport is accepted: the chart then renders nothing.
    pub fn validate(self) -> ChartResult<Self> {
        self.margin.validate()?;
        self.render_style.validate()?;
        Ok(self)
    }

    pub fn to_json_pretty(&self) -> ChartResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| ChartError::InvalidConfig(format!("failed to serialize config: {e}")))
    }

    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        let config: Self = serde_json::from_str(input)
            .map_err(|e| ChartError::InvalidConfig(format!("failed to parse config json: {e}")))?;
        config.validate()
    }
}
