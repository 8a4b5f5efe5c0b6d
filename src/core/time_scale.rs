use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::core::primitives::{datetime_to_unix_millis, unix_millis_to_datetime};
use crate::core::scale::tick_increment;
use crate::core::{DataPoint, LinearScale, Scale};

const SECOND: i64 = 1_000;
const MINUTE: i64 = 60 * SECOND;
const HOUR: i64 = 60 * MINUTE;
const DAY: i64 = 24 * HOUR;
const WEEK: i64 = 7 * DAY;
// 1970-01-01 was a Thursday; weeks start on Monday.
const MONDAY_OFFSET: i64 = 4 * DAY;
const MONTH_APPROX: i64 = 30 * DAY;
const YEAR_APPROX: i64 = 365 * DAY;
const MAX_CALENDAR_TICKS: usize = 1_000;

/// Tick spacing on the UTC calendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CalendarInterval {
    Fixed { step: i64, offset: i64 },
    Months(u32),
}

impl CalendarInterval {
    const fn fixed(step: i64) -> Self {
        Self::Fixed { step, offset: 0 }
    }

    fn approx_millis(self) -> f64 {
        match self {
            Self::Fixed { step, .. } => step as f64,
            Self::Months(months) => f64::from(months) * MONTH_APPROX as f64,
        }
    }
}

const CALENDAR_INTERVALS: [CalendarInterval; 18] = [
    CalendarInterval::fixed(SECOND),
    CalendarInterval::fixed(5 * SECOND),
    CalendarInterval::fixed(15 * SECOND),
    CalendarInterval::fixed(30 * SECOND),
    CalendarInterval::fixed(MINUTE),
    CalendarInterval::fixed(5 * MINUTE),
    CalendarInterval::fixed(15 * MINUTE),
    CalendarInterval::fixed(30 * MINUTE),
    CalendarInterval::fixed(HOUR),
    CalendarInterval::fixed(3 * HOUR),
    CalendarInterval::fixed(6 * HOUR),
    CalendarInterval::fixed(12 * HOUR),
    CalendarInterval::fixed(DAY),
    CalendarInterval::fixed(2 * DAY),
    CalendarInterval::Fixed {
        step: WEEK,
        offset: MONDAY_OFFSET,
    },
    CalendarInterval::Months(1),
    CalendarInterval::Months(3),
    CalendarInterval::Months(12),
];

/// Horizontal time axis mapping `[first, last]` sample times onto
/// `[0, plot_width]`.
///
/// Times are carried as epoch milliseconds so the mapping stays affine.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeScale {
    linear: LinearScale,
}

impl TimeScale {
    #[must_use]
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>, plot_width: f64) -> Self {
        Self::from_millis(
            datetime_to_unix_millis(start),
            datetime_to_unix_millis(end),
            plot_width,
        )
    }

    #[must_use]
    pub fn from_millis(start_millis: f64, end_millis: f64, plot_width: f64) -> Self {
        Self {
            linear: LinearScale::new((start_millis, end_millis), (0.0, plot_width)),
        }
    }

    /// Fits the domain to the extent of `points`.
    ///
    /// Empty input falls back to the degenerate domain `[0, 0]`.
    #[must_use]
    pub fn from_data(points: &[DataPoint], plot_width: f64) -> Self {
        if points.is_empty() {
            return Self::from_millis(0.0, 0.0, plot_width);
        }

        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        for point in points {
            let time = point.time_millis();
            min = min.min(time);
            max = max.max(time);
        }
        Self::from_millis(min, max, plot_width)
    }

    #[must_use]
    pub fn domain(self) -> (DateTime<Utc>, DateTime<Utc>) {
        let (start, end) = self.linear.domain();
        (unix_millis_to_datetime(start), unix_millis_to_datetime(end))
    }

    #[must_use]
    pub fn domain_millis(self) -> (f64, f64) {
        self.linear.domain()
    }

    #[must_use]
    pub fn range(self) -> (f64, f64) {
        self.linear.range()
    }

    #[must_use]
    pub fn millis_to_pixel(self, millis: f64) -> f64 {
        self.linear.domain_to_pixel(millis)
    }

    #[must_use]
    pub fn pixel_to_millis(self, pixel: f64) -> f64 {
        self.linear.pixel_to_domain(pixel)
    }

    #[must_use]
    pub fn time_to_pixel(self, time: DateTime<Utc>) -> f64 {
        self.millis_to_pixel(datetime_to_unix_millis(time))
    }

    #[must_use]
    pub fn pixel_to_time(self, pixel: f64) -> DateTime<Utc> {
        unix_millis_to_datetime(self.pixel_to_millis(pixel))
    }

    /// Round tick positions over the time domain, in epoch milliseconds.
    #[must_use]
    pub fn ticks_millis(self, count: usize) -> Vec<f64> {
        self.linear.ticks(count)
    }

    /// Tick positions on UTC calendar boundaries, in epoch milliseconds.
    ///
    /// The interval (seconds through years) is the one whose length is
    /// closest to `span / count`. Minutes, hours and days land on whole
    /// units, weeks on Mondays, months and years on the 1st. Sub-second and
    /// degenerate domains fall back to [`TimeScale::ticks_millis`].
    #[must_use]
    pub fn calendar_ticks_millis(self, count: usize) -> Vec<f64> {
        let (start, end) = self.linear.domain();
        if count == 0 || !start.is_finite() || !end.is_finite() || start == end {
            return self.ticks_millis(count);
        }
        let descending = end < start;
        let (low, high) = if descending { (end, start) } else { (start, end) };
        let Some(interval) = choose_calendar_interval(low, high, count) else {
            return self.ticks_millis(count);
        };

        let low = low.ceil() as i64;
        let high = high.floor() as i64;
        let mut ticks = match interval {
            CalendarInterval::Fixed { step, offset } => fixed_ticks(low, high, step, offset),
            CalendarInterval::Months(months) => month_ticks(low, high, months),
        };
        if descending {
            ticks.reverse();
        }
        ticks
    }
}

/// `None` when the target spacing is below one second.
fn choose_calendar_interval(low: f64, high: f64, count: usize) -> Option<CalendarInterval> {
    let target = (high - low) / count as f64;
    if target < SECOND as f64 {
        return None;
    }

    let index = CALENDAR_INTERVALS.partition_point(|interval| interval.approx_millis() < target);
    if index == CALENDAR_INTERVALS.len() {
        let years = tick_increment(
            low / YEAR_APPROX as f64,
            high / YEAR_APPROX as f64,
            count,
        )
        .max(1.0);
        let months = (years * 12.0).min(f64::from(u32::MAX)) as u32;
        return Some(CalendarInterval::Months(months));
    }
    if index == 0 {
        return Some(CALENDAR_INTERVALS[0]);
    }

    let below = CALENDAR_INTERVALS[index - 1];
    let above = CALENDAR_INTERVALS[index];
    if target / below.approx_millis() < above.approx_millis() / target {
        Some(below)
    } else {
        Some(above)
    }
}

fn fixed_ticks(low: i64, high: i64, step: i64, offset: i64) -> Vec<f64> {
    let mut tick = (low - offset).div_euclid(step) * step + offset;
    if tick < low {
        tick += step;
    }
    let mut ticks = Vec::new();
    while tick <= high && ticks.len() < MAX_CALENDAR_TICKS {
        ticks.push(tick as f64);
        tick += step;
    }
    ticks
}

fn month_ticks(low: i64, high: i64, months: u32) -> Vec<f64> {
    let months = i64::from(months.max(1));
    let first = unix_millis_to_datetime(low as f64);
    let mut index = i64::from(first.year()) * 12 + i64::from(first.month0());
    if month_start_millis(index).is_some_and(|millis| millis < low) {
        index += 1;
    }
    // Month ticks sit on multiples of the interval counted from year 0.
    index = (index + months - 1).div_euclid(months) * months;

    let mut ticks = Vec::new();
    while ticks.len() < MAX_CALENDAR_TICKS {
        let Some(millis) = month_start_millis(index) else {
            break;
        };
        if millis > high {
            break;
        }
        ticks.push(millis as f64);
        index += months;
    }
    ticks
}

/// Epoch milliseconds of 00:00 UTC on the 1st of `year * 12 + month0`.
fn month_start_millis(index: i64) -> Option<i64> {
    let year = i32::try_from(index.div_euclid(12)).ok()?;
    let month = u32::try_from(index.rem_euclid(12)).ok()? + 1;
    let date = NaiveDate::from_ymd_opt(year, month, 1)?;
    Some(date.and_hms_opt(0, 0, 0)?.and_utc().timestamp_millis())
}

impl Scale for TimeScale {
    type Domain = DateTime<Utc>;

    fn scale(&self, value: DateTime<Utc>) -> f64 {
        self.time_to_pixel(value)
    }

    fn invert(&self, pixel: f64) -> DateTime<Utc> {
        self.pixel_to_time(pixel)
    }
}

#[cfg(test)]
mod tests {
    use super::{CalendarInterval, DAY, HOUR, choose_calendar_interval, fixed_ticks};

    #[test]
    fn interval_closest_to_target_spacing_wins() {
        // 2 days / 5 = 9.6h, nearer to 12h than to 6h.
        assert_eq!(
            choose_calendar_interval(0.0, (2 * DAY) as f64, 5),
            Some(CalendarInterval::fixed(12 * HOUR))
        );
        assert_eq!(choose_calendar_interval(0.0, 500.0, 5), None);
    }

    #[test]
    fn fixed_ticks_respect_offset() {
        let ticks = fixed_ticks(0, 3 * DAY, DAY, HOUR);
        assert_eq!(
            ticks,
            vec![HOUR as f64, (DAY + HOUR) as f64, (2 * DAY + HOUR) as f64]
        );
    }
}
