use std::cmp::Ordering;

use tracing::{debug, trace, warn};

use crate::core::DataPoint;
use crate::error::{ChartError, ChartResult};
use crate::render::Renderer;

use super::PriceChart;

impl<R: Renderer> PriceChart<R> {
    /// Replaces the price series.
    ///
    /// Input is canonicalized: non-finite prices are dropped, samples are
    /// sorted by time and duplicate timestamps keep the last sample.
    pub fn set_data(&mut self, points: Vec<DataPoint>) {
        let original_count = points.len();
        let points = canonicalize_points(points);
        debug!(
            original_count,
            canonical_count = points.len(),
            "set data points"
        );
        self.points = points;
        self.bump_data_revision();
    }

    /// Appends one sample using realtime-update semantics:
    /// - appends when `point.time` is newer than the latest sample
    /// - replaces the latest sample when `point.time` is equal
    /// - rejects older samples
    pub fn append_point(&mut self, point: DataPoint) -> ChartResult<()> {
        if !point.price.is_finite() {
            return Err(ChartError::InvalidData(
                "price must be finite".to_owned(),
            ));
        }

        match self.points.last().map(|last| point.time.cmp(&last.time)) {
            Some(Ordering::Less) => {
                return Err(ChartError::InvalidData(
                    "appended point must not be older than the latest point".to_owned(),
                ));
            }
            Some(Ordering::Equal) => {
                if let Some(last) = self.points.last_mut() {
                    *last = point;
                }
                trace!(count = self.points.len(), "update latest data point");
            }
            Some(Ordering::Greater) | None => {
                self.points.push(point);
                trace!(count = self.points.len(), "append data point");
            }
        }
        self.bump_data_revision();
        Ok(())
    }

    #[must_use]
    pub fn points(&self) -> &[DataPoint] {
        &self.points
    }

    /// Drops the tooltip as well, since its payload belonged to the old data.
    fn bump_data_revision(&mut self) {
        self.data_revision = self.data_revision.wrapping_add(1);
        self.interaction.clear_tooltip();
    }
}

fn canonicalize_points(mut points: Vec<DataPoint>) -> Vec<DataPoint> {
    let original_len = points.len();
    points.retain(|point| point.price.is_finite());
    let already_sorted = points.windows(2).all(|pair| pair[0].time <= pair[1].time);
    if !already_sorted {
        points.sort_by(|a, b| a.time.cmp(&b.time));
    }

    let mut deduped: Vec<DataPoint> = Vec::with_capacity(points.len());
    let mut duplicate_count = 0_usize;
    for point in points {
        if let Some(last) = deduped.last_mut() {
            if point.time == last.time {
                *last = point;
                duplicate_count += 1;
                continue;
            }
        }
        deduped.push(point);
    }

    let filtered_count = original_len.saturating_sub(deduped.len() + duplicate_count);
    if filtered_count > 0 || duplicate_count > 0 || !already_sorted {
        warn!(
            filtered_count,
            duplicate_count,
            reordered = !already_sorted,
            canonical_count = deduped.len(),
            "canonicalized points on set_data"
        );
    }
    deduped
}
