use tracing::trace;

use crate::core::locate_nearest;
use crate::interaction::{GuideAnchor, PointerSource, TooltipPoint, TooltipState};
use crate::render::Renderer;

use super::PriceChart;

impl<R: Renderer> PriceChart<R> {
    #[must_use]
    pub fn tooltip_state(&self) -> TooltipState {
        self.interaction.tooltip()
    }

    /// Last pointer position in canvas pixels while the pointer is inside.
    #[must_use]
    pub fn pointer_position(&self) -> Option<(f64, f64)> {
        self.interaction.pointer()
    }

    #[must_use]
    pub fn pointer_source(&self) -> Option<PointerSource> {
        self.interaction.pointer_source()
    }

    /// Handles mouse movement at canvas coordinates `(x, y)`.
    ///
    /// Positions outside the plot area count as a leave.
    pub fn pointer_move(&mut self, x: f64, y: f64) {
        self.handle_pointer_move(x, y, PointerSource::Mouse);
    }

    /// Handles touch movement at canvas coordinates `(x, y)`.
    pub fn touch_move(&mut self, x: f64, y: f64) {
        self.handle_pointer_move(x, y, PointerSource::Touch);
    }

    /// Marks the pointer as outside the chart; the tooltip always hides.
    pub fn pointer_leave(&mut self) {
        self.interaction.on_pointer_leave();
        trace!("pointer left chart");
    }

    /// Resolves the tooltip payload for a plot-relative pointer x.
    ///
    /// Returns `None` when there is no data, the plot has no area, or the
    /// position is not finite.
    #[must_use]
    pub fn resolve_tooltip_at(&self, plot_x: f64) -> Option<TooltipPoint> {
        if !plot_x.is_finite() {
            return None;
        }
        let scales = self.scales();
        if scales.plot.is_empty() {
            return None;
        }

        let index = locate_nearest(&self.points, scales.time, plot_x)?;
        let point = *self.points.get(index)?;
        let (point_x, y) = scales.project(&point);
        let x = match self.tooltip_behavior.guide_anchor {
            GuideAnchor::Pointer => plot_x,
            GuideAnchor::DataPoint => point_x,
        };
        Some(TooltipPoint {
            index,
            point,
            x,
            y,
            point_x,
        })
    }

    /// Whether canvas position `(x, y)` lies inside the plot area, edges
    /// included.
    #[must_use]
    pub fn is_inside_plot(&self, x: f64, y: f64) -> bool {
        let plot = self.plot_area();
        let left = self.margin.left;
        let top = self.margin.top;
        !plot.is_empty()
            && (left..=left + plot.width).contains(&x)
            && (top..=top + plot.height).contains(&y)
    }

    fn handle_pointer_move(&mut self, x: f64, y: f64, source: PointerSource) {
        if !self.is_inside_plot(x, y) {
            if self.interaction.pointer().is_some() {
                trace!(x, y, ?source, "pointer outside plot");
            }
            self.interaction.on_pointer_leave();
            return;
        }
        self.interaction.on_pointer_move(x, y, source);
        let resolved = self.resolve_tooltip_at(x - self.margin.left);
        trace!(
            x,
            y,
            ?source,
            index = ?resolved.map(|payload| payload.index),
            "resolve tooltip"
        );
        self.interaction.set_tooltip(resolved);
    }

    /// Re-resolves the tooltip at the last known pointer position.
    pub(super) fn refresh_tooltip(&mut self) {
        if let (Some((x, y)), Some(source)) =
            (self.interaction.pointer(), self.interaction.pointer_source())
        {
            self.handle_pointer_move(x, y, source);
        }
    }
}
