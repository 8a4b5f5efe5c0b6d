use serde::{Deserialize, Serialize};

/// Default tick count used when niceing a domain.
pub const DEFAULT_NICE_TICK_COUNT: usize = 10;

const MAX_NICE_ITERATIONS: usize = 10;
const MAX_TICKS: i64 = 10_000;

/// Monotonic mapping between a domain value and a pixel coordinate.
///
/// `invert` is the inverse of `scale` for every non-degenerate scale.
pub trait Scale {
    type Domain;

    fn scale(&self, value: Self::Domain) -> f64;

    fn invert(&self, pixel: f64) -> Self::Domain;
}

/// Affine map from `[domain_start, domain_end]` onto `[range_start, range_end]`.
///
/// Either interval may be descending. A zero-width domain maps everything to
/// the middle of the range instead of failing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinearScale {
    domain_start: f64,
    domain_end: f64,
    range_start: f64,
    range_end: f64,
}

impl LinearScale {
    #[must_use]
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self {
            domain_start: domain.0,
            domain_end: domain.1,
            range_start: range.0,
            range_end: range.1,
        }
    }

    #[must_use]
    pub fn domain(self) -> (f64, f64) {
        (self.domain_start, self.domain_end)
    }

    #[must_use]
    pub fn range(self) -> (f64, f64) {
        (self.range_start, self.range_end)
    }

    #[must_use]
    pub fn is_degenerate(self) -> bool {
        self.domain_start == self.domain_end
    }

    #[must_use]
    pub fn domain_to_pixel(self, value: f64) -> f64 {
        let span = self.domain_end - self.domain_start;
        let normalized = if span == 0.0 {
            0.5
        } else {
            (value - self.domain_start) / span
        };
        self.range_start + normalized * (self.range_end - self.range_start)
    }

    #[must_use]
    pub fn pixel_to_domain(self, pixel: f64) -> f64 {
        let span = self.range_end - self.range_start;
        if span == 0.0 || self.is_degenerate() {
            return self.domain_start;
        }
        let normalized = (pixel - self.range_start) / span;
        self.domain_start + normalized * (self.domain_end - self.domain_start)
    }

    /// Extends the domain outward to round tick multiples.
    ///
    /// Each pass snaps both ends to the tick increment for `count` ticks and
    /// stops once the increment no longer changes.
    #[must_use]
    pub fn nice(self, count: usize) -> Self {
        let descending = self.domain_end < self.domain_start;
        let (mut start, mut stop) = if descending {
            (self.domain_end, self.domain_start)
        } else {
            (self.domain_start, self.domain_end)
        };

        let mut previous_step: Option<f64> = None;
        for _ in 0..MAX_NICE_ITERATIONS {
            let step = tick_increment(start, stop, count);
            if previous_step == Some(step) || step == 0.0 || !step.is_finite() {
                break;
            }
            if step > 0.0 {
                start = (start / step).floor() * step;
                stop = (stop / step).ceil() * step;
            } else {
                start = (start * step).ceil() / step;
                stop = (stop * step).floor() / step;
            }
            previous_step = Some(step);
        }

        let domain = if descending { (stop, start) } else { (start, stop) };
        Self::new(domain, self.range())
    }

    /// Round tick values inside the domain, in domain order.
    #[must_use]
    pub fn ticks(self, count: usize) -> Vec<f64> {
        let descending = self.domain_end < self.domain_start;
        let (low, high) = if descending {
            (self.domain_end, self.domain_start)
        } else {
            (self.domain_start, self.domain_end)
        };
        if count == 0 || !low.is_finite() || !high.is_finite() {
            return Vec::new();
        }
        if low == high {
            return vec![low];
        }

        let increment = tick_increment(low, high, count);
        let mut ticks = if increment > 0.0 {
            let first = (low / increment).ceil() as i64;
            let last = (high / increment).floor() as i64;
            index_span(first, last)
                .map(|index| index as f64 * increment)
                .collect::<Vec<_>>()
        } else if increment < 0.0 {
            let inverse = -increment;
            let first = (low * inverse).ceil() as i64;
            let last = (high * inverse).floor() as i64;
            index_span(first, last)
                .map(|index| index as f64 / inverse)
                .collect::<Vec<_>>()
        } else {
            Vec::new()
        };

        if descending {
            ticks.reverse();
        }
        ticks
    }
}

impl Scale for LinearScale {
    type Domain = f64;

    fn scale(&self, value: f64) -> f64 {
        self.domain_to_pixel(value)
    }

    fn invert(&self, pixel: f64) -> f64 {
        self.pixel_to_domain(pixel)
    }
}

fn index_span(first: i64, last: i64) -> impl Iterator<Item = i64> {
    let last = last.min(first.saturating_add(MAX_TICKS - 1));
    first..=last
}

/// Step between round ticks covering `[start, stop]` with about `count` ticks.
///
/// Positive results are the step itself. Negative results encode sub-unit
/// steps as `-1 / step`, which keeps decimal ticks exact after division.
/// Returns `0.0` when no step exists.
pub(crate) fn tick_increment(start: f64, stop: f64, count: usize) -> f64 {
    if count == 0 || !(stop > start) || !start.is_finite() || !stop.is_finite() {
        return 0.0;
    }

    let e10 = 50_f64.sqrt();
    let e5 = 10_f64.sqrt();
    let e2 = 2_f64.sqrt();

    let step = (stop - start) / count as f64;
    let power = step.log10().floor();
    let error = step / 10_f64.powf(power);
    let factor = if error >= e10 {
        10.0
    } else if error >= e5 {
        5.0
    } else if error >= e2 {
        2.0
    } else {
        1.0
    };

    if power >= 0.0 {
        factor * 10_f64.powf(power)
    } else {
        -10_f64.powf(-power) / factor
    }
}
