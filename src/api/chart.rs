use std::cell::RefCell;

use tracing::debug;

use crate::core::{DataPoint, Margin, PlotArea, Viewport};
use crate::error::ChartResult;
use crate::interaction::InteractionState;
use crate::render::Renderer;

#[cfg(feature = "cairo-backend")]
use crate::render::CairoContextRenderer;

use super::scale_cache::ScaleCache;
use super::{
    DateLabelFormatterFn, PriceChartConfig, PriceLabelFormatterFn, RenderStyle, TooltipBehavior,
};

/// Interactive price chart component consumed by host views.
///
/// `PriceChart` owns the series data, derives time/price scales on demand,
/// tracks tooltip state from pointer events and hands a complete
/// `RenderFrame` to its renderer.
pub struct PriceChart<R: Renderer> {
    pub(super) renderer: R,
    pub(super) viewport: Viewport,
    pub(super) margin: Margin,
    pub(super) render_style: RenderStyle,
    pub(super) tooltip_behavior: TooltipBehavior,
    pub(super) points: Vec<DataPoint>,
    pub(super) data_revision: u64,
    pub(super) scale_cache: RefCell<ScaleCache>,
    pub(super) interaction: InteractionState,
    pub(super) date_label_formatter: Option<DateLabelFormatterFn>,
    pub(super) price_label_formatter: Option<PriceLabelFormatterFn>,
}

impl<R: Renderer> PriceChart<R> {
    pub fn new(renderer: R, config: PriceChartConfig) -> ChartResult<Self> {
        let config = config.validate()?;
        debug!(
            width = config.viewport.width,
            height = config.viewport.height,
            "create price chart"
        );
        Ok(Self {
            renderer,
            viewport: config.viewport,
            margin: config.margin,
            render_style: config.render_style,
            tooltip_behavior: config.tooltip_behavior,
            points: Vec::new(),
            data_revision: 0,
            scale_cache: RefCell::new(ScaleCache::default()),
            interaction: InteractionState::default(),
            date_label_formatter: None,
            price_label_formatter: None,
        })
    }

    /// Current configuration, suitable for persisting with
    /// [`PriceChartConfig::to_json_pretty`].
    #[must_use]
    pub fn config(&self) -> PriceChartConfig {
        PriceChartConfig::new(self.viewport)
            .with_margin(self.margin)
            .with_render_style(self.render_style)
            .with_tooltip_behavior(self.tooltip_behavior)
    }

    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Resizes the canvas; any visible tooltip is dropped.
    pub fn set_viewport(&mut self, viewport: Viewport) {
        if viewport == self.viewport {
            return;
        }
        self.viewport = viewport;
        self.interaction.clear_tooltip();
    }

    #[must_use]
    pub fn margin(&self) -> Margin {
        self.margin
    }

    pub fn set_margin(&mut self, margin: Margin) -> ChartResult<()> {
        let margin = margin.validate()?;
        if margin != self.margin {
            self.margin = margin;
            self.interaction.clear_tooltip();
        }
        Ok(())
    }

    #[must_use]
    pub fn plot_area(&self) -> PlotArea {
        PlotArea::from_viewport(self.viewport, self.margin)
    }

    #[must_use]
    pub fn render_style(&self) -> RenderStyle {
        self.render_style
    }

    pub fn set_render_style(&mut self, style: RenderStyle) -> ChartResult<()> {
        self.render_style = style.validate()?;
        Ok(())
    }

    #[must_use]
    pub fn tooltip_behavior(&self) -> TooltipBehavior {
        self.tooltip_behavior
    }

    /// Switches tooltip behavior and re-resolves the tooltip at the last
    /// pointer position so the guide anchor takes effect immediately.
    pub fn set_tooltip_behavior(&mut self, behavior: TooltipBehavior) {
        self.tooltip_behavior = behavior;
        self.refresh_tooltip();
    }

    pub fn render(&mut self) -> ChartResult<()> {
        let frame = self.build_render_frame()?;
        self.renderer.render(&frame)
    }

    /// Renders the frame into an external cairo context.
    ///
    /// This path is used by GTK draw callbacks while keeping the renderer
    /// implementation decoupled from GTK-specific APIs.
    #[cfg(feature = "cairo-backend")]
    pub fn render_on_cairo_context(&mut self, context: &cairo::Context) -> ChartResult<()>
    where
        R: CairoContextRenderer,
    {
        let frame = self.build_render_frame()?;
        self.renderer.render_on_cairo_context(context, &frame)
    }

    #[must_use]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    #[must_use]
    pub fn into_renderer(self) -> R {
        self.renderer
    }
}
