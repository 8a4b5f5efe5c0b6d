use tracing::{debug, trace};

use crate::core::{ChartScales, PlotArea};
use crate::render::Renderer;

use super::PriceChart;

/// Runtime metrics exposed by the in-chart scale cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScaleCacheStats {
    pub hits: u64,
    pub misses: u64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct ScaleCacheKey {
    data_revision: u64,
    plot: PlotArea,
}

/// Memoizes the last built scales, keyed on data revision and plot size.
#[derive(Debug, Default)]
pub(super) struct ScaleCache {
    entry: Option<(ScaleCacheKey, ChartScales)>,
    stats: ScaleCacheStats,
}

impl ScaleCache {
    fn get_or_build(
        &mut self,
        key: ScaleCacheKey,
        build: impl FnOnce() -> ChartScales,
    ) -> ChartScales {
        if let Some((cached_key, scales)) = self.entry {
            if cached_key == key {
                self.stats.hits += 1;
                return scales;
            }
        }
        let scales = build();
        self.stats.misses += 1;
        self.entry = Some((key, scales));
        scales
    }
}

impl<R: Renderer> PriceChart<R> {
    /// Scales for the current data and plot area.
    ///
    /// Rebuilt only when the data or the plot size changed since the last call.
    #[must_use]
    pub fn scales(&self) -> ChartScales {
        let key = ScaleCacheKey {
            data_revision: self.data_revision,
            plot: self.plot_area(),
        };
        let mut cache = self.scale_cache.borrow_mut();
        let misses_before = cache.stats.misses;
        let scales = cache.get_or_build(key, || ChartScales::build(&self.points, key.plot));
        if cache.stats.misses > misses_before {
            debug!(
                data_revision = key.data_revision,
                plot_width = key.plot.width,
                plot_height = key.plot.height,
                "rebuilt chart scales"
            );
        } else {
            trace!(data_revision = key.data_revision, "scale cache hit");
        }
        scales
    }

    #[must_use]
    pub fn scale_cache_stats(&self) -> ScaleCacheStats {
        self.scale_cache.borrow().stats
    }
}
