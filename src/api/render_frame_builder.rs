use crate::core::{ChartScales, project_line_vertices};
use crate::error::ChartResult;
use crate::interaction::TooltipPoint;
use crate::render::{
    CanvasLayerKind, CirclePrimitive, Color, LinePrimitive, PolylinePrimitive, RectPrimitive,
    RenderFrame, Renderer, TextHAlign, TextPrimitive,
};

use super::{PriceChart, RenderStyle};

/// Canvas-space bounds of the plot area.
#[derive(Debug, Clone, Copy)]
struct PlotBounds {
    left: f64,
    top: f64,
    right: f64,
    bottom: f64,
}

impl<R: Renderer> PriceChart<R> {
    /// Materializes the complete scene for the current state.
    ///
    /// Without data or plot area only the background is emitted.
    pub fn build_render_frame(&self) -> ChartResult<RenderFrame> {
        let style = self.render_style;
        let mut frame = RenderFrame::new(self.viewport);
        if !self.viewport.is_valid() {
            return Ok(frame);
        }

        frame.push_rect(
            CanvasLayerKind::Background,
            RectPrimitive::new(
                0.0,
                0.0,
                f64::from(self.viewport.width),
                f64::from(self.viewport.height),
                style.background_color,
            ),
        );

        let scales = self.scales();
        if scales.plot.is_empty() || self.points.is_empty() {
            return Ok(frame);
        }
        let bounds = PlotBounds {
            left: self.margin.left,
            top: self.margin.top,
            right: self.margin.left + scales.plot.width,
            bottom: self.margin.top + scales.plot.height,
        };

        if style.show_grid {
            append_grid(&mut frame, &scales, bounds, style);
        }
        self.append_series(&mut frame, &scales, bounds, style);

        frame.push_rect(
            CanvasLayerKind::Overlay,
            RectPrimitive::new(
                bounds.left,
                bounds.top,
                scales.plot.width,
                scales.plot.height,
                Color::TRANSPARENT,
            ),
        );

        if let Some(payload) = self.interaction.tooltip().payload() {
            self.append_tooltip(&mut frame, payload, bounds, style);
        }

        frame.validate()?;
        Ok(frame)
    }

    fn append_series(
        &self,
        frame: &mut RenderFrame,
        scales: &ChartScales,
        bounds: PlotBounds,
        style: RenderStyle,
    ) {
        let vertices = project_line_vertices(&self.points, scales)
            .into_iter()
            .map(|vertex| (bounds.left + vertex.x, bounds.top + vertex.y))
            .collect::<Vec<_>>();
        frame.push_polyline(
            CanvasLayerKind::Series,
            PolylinePrimitive::new(vertices, style.series_line_width, style.series_line_color),
        );
    }

    fn append_tooltip(
        &self,
        frame: &mut RenderFrame,
        payload: &TooltipPoint,
        bounds: PlotBounds,
        style: RenderStyle,
    ) {
        let guide_x = bounds.left + payload.x;
        let marker_y = bounds.top + payload.y;

        frame.push_line(
            CanvasLayerKind::Crosshair,
            LinePrimitive::new(
                guide_x,
                bounds.top,
                guide_x,
                bounds.bottom,
                style.guide_line_width,
                style.guide_line_color,
            )
            .with_stroke_style(style.guide_stroke_style),
        );
        frame.push_circle(
            CanvasLayerKind::Crosshair,
            CirclePrimitive::new(
                guide_x,
                marker_y + 1.0,
                style.marker_radius,
                style.marker_shadow_color,
            )
            .with_stroke(style.marker_stroke_width, style.marker_shadow_color),
        );
        frame.push_circle(
            CanvasLayerKind::Crosshair,
            CirclePrimitive::new(guide_x, marker_y, style.marker_radius, style.marker_fill_color)
                .with_stroke(style.marker_stroke_width, style.marker_stroke_color),
        );

        let box_height = style.label_font_size_px + 2.0 * style.label_padding_px;

        if self.tooltip_behavior.show_price_label {
            let text = self.format_price_label(payload.point.price);
            let box_width = label_box_width(&text, style);
            let mut box_x = guide_x + style.label_offset_px;
            if box_x + box_width > bounds.right {
                box_x = guide_x - style.label_offset_px - box_width;
            }
            let box_x = clamp_start(box_x, bounds.left, bounds.right - box_width);
            let box_y = clamp_start(
                marker_y - style.label_offset_px - box_height,
                bounds.top,
                bounds.bottom - box_height,
            );
            push_label(frame, text, box_x, box_y, box_width, box_height, style);
        }

        if self.tooltip_behavior.show_date_label {
            let text = self.format_date_label(payload.point.time);
            let box_width = label_box_width(&text, style);
            let box_x = clamp_start(
                guide_x - box_width / 2.0,
                bounds.left,
                bounds.right - box_width,
            );
            let box_y = (bounds.bottom - box_height).max(bounds.top);
            push_label(frame, text, box_x, box_y, box_width, box_height, style);
        }
    }
}

fn append_grid(frame: &mut RenderFrame, scales: &ChartScales, bounds: PlotBounds, style: RenderStyle) {
    for price in scales.price.ticks(style.grid_row_count) {
        let y = bounds.top + scales.price.price_to_pixel(price);
        frame.push_line(
            CanvasLayerKind::Grid,
            LinePrimitive::new(
                bounds.left,
                y,
                bounds.right,
                y,
                style.grid_line_width,
                style.grid_line_color,
            )
            .with_stroke_style(style.grid_stroke_style),
        );
    }
    for millis in scales.time.calendar_ticks_millis(style.grid_column_count) {
        let x = bounds.left + scales.time.millis_to_pixel(millis);
        frame.push_line(
            CanvasLayerKind::Grid,
            LinePrimitive::new(
                x,
                bounds.top,
                x,
                bounds.bottom,
                style.grid_line_width,
                style.grid_line_color,
            )
            .with_stroke_style(style.grid_stroke_style),
        );
    }
}

fn push_label(
    frame: &mut RenderFrame,
    text: String,
    box_x: f64,
    box_y: f64,
    box_width: f64,
    box_height: f64,
    style: RenderStyle,
) {
    if text.is_empty() {
        return;
    }
    frame.push_rect(
        CanvasLayerKind::Tooltip,
        RectPrimitive::new(box_x, box_y, box_width, box_height, style.label_box_color)
            .with_corner_radius(3.0),
    );
    frame.push_text(
        CanvasLayerKind::Tooltip,
        TextPrimitive::new(
            text,
            box_x + style.label_padding_px,
            box_y + style.label_padding_px,
            style.label_font_size_px,
            style.label_text_color,
            TextHAlign::Left,
        ),
    );
}

fn label_box_width(text: &str, style: RenderStyle) -> f64 {
    estimate_label_text_width_px(text, style.label_font_size_px) + 2.0 * style.label_padding_px
}

/// Clamps a label box origin into `[min, max]`. An inverted range means the
/// box is wider than the plot, in which case it starts at `min`.
fn clamp_start(start: f64, min: f64, max: f64) -> f64 {
    if max < min {
        return min;
    }
    start.clamp(min, max)
}

fn estimate_label_text_width_px(text: &str, font_size_px: f64) -> f64 {
    // Deterministic and backend-independent.
    let units = text.chars().fold(0.0, |acc, ch| {
        acc + match ch {
            '0'..='9' => 0.62,
            '.' | ',' => 0.34,
            '-' | '+' | '%' => 0.42,
            ' ' => 0.33,
            _ => 0.58,
        }
    });
    (units * font_size_px).max(font_size_px)
}

#[cfg(test)]
mod tests {
    use super::{clamp_start, estimate_label_text_width_px};

    #[test]
    fn clamp_prefers_lower_bound_when_box_does_not_fit() {
        assert_eq!(clamp_start(5.0, 10.0, 4.0), 10.0);
        assert_eq!(clamp_start(50.0, 10.0, 40.0), 40.0);
        assert_eq!(clamp_start(20.0, 10.0, 40.0), 20.0);
    }

    #[test]
    fn width_estimate_never_drops_below_font_size() {
        assert_eq!(estimate_label_text_width_px(".", 10.0), 10.0);
        assert!(estimate_label_text_width_px("$1,234", 10.0) > 30.0);
    }
}
