use smallvec::SmallVec;

use crate::core::{DataPoint, TimeScale};

/// Finds the sample nearest in time to a plot-relative pointer x.
///
/// The pixel is inverted through `time_scale`, then the first sample not
/// earlier than that time is located by binary search. The result is whichever
/// of that sample and its predecessor is closer in time; ties keep the
/// predecessor. Positions before the first or after the last sample clamp to
/// the respective end.
///
/// `points` must be sorted ascending by time. Returns `None` only for empty
/// input. Runs in `O(log n)`.
#[must_use]
pub fn locate_nearest(points: &[DataPoint], time_scale: TimeScale, pixel_x: f64) -> Option<usize> {
    let last = points.len().checked_sub(1)?;
    let candidate = time_scale.pixel_to_time(pixel_x);
    let index = points.partition_point(|point| point.time < candidate);

    if index == 0 {
        return Some(0);
    }
    if index > last {
        return Some(last);
    }

    let target = candidate.timestamp_millis();
    let mut brackets: SmallVec<[(i64, usize); 2]> = SmallVec::new();
    brackets.push((
        target.saturating_sub(points[index - 1].time.timestamp_millis()),
        index - 1,
    ));
    brackets.push((
        points[index].time.timestamp_millis().saturating_sub(target),
        index,
    ));

    brackets
        .into_iter()
        .min_by_key(|(distance, _)| *distance)
        .map(|(_, slot)| slot)
}

/// Same as [`locate_nearest`], returning the sample itself.
#[must_use]
pub fn locate_nearest_point(
    points: &[DataPoint],
    time_scale: TimeScale,
    pixel_x: f64,
) -> Option<&DataPoint> {
    locate_nearest(points, time_scale, pixel_x).and_then(|index| points.get(index))
}
