use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};
use crate::interaction::GuideAnchor;
use crate::render::{Color, LineStrokeStyle};

const MAX_GRID_LINES: usize = 50;

/// Visual style of one chart frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderStyle {
    pub background_color: Color,
    pub show_grid: bool,
    pub grid_row_count: usize,
    pub grid_column_count: usize,
    pub grid_line_color: Color,
    pub grid_line_width: f64,
    pub grid_stroke_style: LineStrokeStyle,
    pub series_line_color: Color,
    pub series_line_width: f64,
    pub guide_line_color: Color,
    pub guide_line_width: f64,
    pub guide_stroke_style: LineStrokeStyle,
    pub marker_radius: f64,
    pub marker_fill_color: Color,
    pub marker_stroke_color: Color,
    pub marker_stroke_width: f64,
    pub marker_shadow_color: Color,
    pub label_font_size_px: f64,
    pub label_text_color: Color,
    pub label_box_color: Color,
    pub label_padding_px: f64,
    pub label_offset_px: f64,
}

impl Default for RenderStyle {
    fn default() -> Self {
        Self {
            background_color: Color::rgb(1.0, 1.0, 1.0),
            show_grid: true,
            grid_row_count: 5,
            grid_column_count: 5,
            grid_line_color: Color::rgba(0.0, 0.0, 0.0, 0.1),
            grid_line_width: 1.0,
            grid_stroke_style: LineStrokeStyle::Solid,
            series_line_color: Color::rgb(0.16, 0.38, 1.0),
            series_line_width: 2.0,
            guide_line_color: Color::rgb(0.46, 0.53, 0.62),
            guide_line_width: 2.0,
            guide_stroke_style: LineStrokeStyle::Dashed,
            marker_radius: 4.0,
            marker_fill_color: Color::rgb(0.16, 0.38, 1.0),
            marker_stroke_color: Color::rgb(1.0, 1.0, 1.0),
            marker_stroke_width: 2.0,
            marker_shadow_color: Color::rgba(0.0, 0.0, 0.0, 0.1),
            label_font_size_px: 11.0,
            label_text_color: Color::rgb(1.0, 1.0, 1.0),
            label_box_color: Color::rgba(0.13, 0.15, 0.19, 0.9),
            label_padding_px: 4.0,
            label_offset_px: 12.0,
        }
    }
}

impl RenderStyle {
    pub fn validate(self) -> ChartResult<Self> {
        for color in [
            self.background_color,
            self.grid_line_color,
            self.series_line_color,
            self.guide_line_color,
            self.marker_fill_color,
            self.marker_stroke_color,
            self.marker_shadow_color,
            self.label_text_color,
            self.label_box_color,
        ] {
            color
                .validate()
                .map_err(|err| ChartError::InvalidConfig(err.to_string()))?;
        }

        for (name, value) in [
            ("grid_line_width", self.grid_line_width),
            ("series_line_width", self.series_line_width),
            ("guide_line_width", self.guide_line_width),
            ("marker_radius", self.marker_radius),
            ("label_font_size_px", self.label_font_size_px),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ChartError::InvalidConfig(format!(
                    "{name} must be finite and > 0"
                )));
            }
        }

        for (name, value) in [
            ("marker_stroke_width", self.marker_stroke_width),
            ("label_padding_px", self.label_padding_px),
            ("label_offset_px", self.label_offset_px),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ChartError::InvalidConfig(format!(
                    "{name} must be finite and >= 0"
                )));
            }
        }

        if self.grid_row_count > MAX_GRID_LINES || self.grid_column_count > MAX_GRID_LINES {
            return Err(ChartError::InvalidConfig(format!(
                "grid line counts must be <= {MAX_GRID_LINES}"
            )));
        }

        Ok(self)
    }
}

/// Tooltip placement and content switches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TooltipBehavior {
    pub guide_anchor: GuideAnchor,
    pub show_date_label: bool,
    pub show_price_label: bool,
}

impl Default for TooltipBehavior {
    fn default() -> Self {
        Self {
            guide_anchor: GuideAnchor::Pointer,
            show_date_label: true,
            show_price_label: true,
        }
    }
}
