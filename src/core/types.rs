use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::core::primitives::{datetime_to_unix_millis, decimal_to_f64};
use crate::error::{ChartError, ChartResult};

/// Canvas size in pixels, including margins.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    #[must_use]
    pub fn is_valid(self) -> bool {
        self.width > 0 && self.height > 0
    }
}

/// Space reserved around the plot area, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Margin {
    #[serde(default)]
    pub top: f64,
    #[serde(default)]
    pub right: f64,
    #[serde(default)]
    pub bottom: f64,
    #[serde(default)]
    pub left: f64,
}

impl Margin {
    #[must_use]
    pub const fn new(top: f64, right: f64, bottom: f64, left: f64) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }

    #[must_use]
    pub const fn uniform(value: f64) -> Self {
        Self::new(value, value, value, value)
    }

    pub fn validate(self) -> ChartResult<Self> {
        for (side, value) in [
            ("top", self.top),
            ("right", self.right),
            ("bottom", self.bottom),
            ("left", self.left),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ChartError::InvalidConfig(format!(
                    "margin `{side}` must be finite and >= 0"
                )));
            }
        }
        Ok(self)
    }
}

/// Drawable region left after subtracting margins from the viewport.
///
/// Both extents are clamped at zero, so an oversized margin yields an empty
/// plot instead of a negative one.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlotArea {
    pub width: f64,
    pub height: f64,
}

impl PlotArea {
    #[must_use]
    pub fn from_viewport(viewport: Viewport, margin: Margin) -> Self {
        let width = f64::from(viewport.width) - margin.left - margin.right;
        let height = f64::from(viewport.height) - margin.top - margin.bottom;
        Self {
            width: width.max(0.0),
            height: height.max(0.0),
        }
    }

    #[must_use]
    pub fn is_empty(self) -> bool {
        !(self.width > 0.0 && self.height > 0.0)
    }
}

/// One sample of the price series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DataPoint {
    #[serde(rename = "date", with = "iso_date")]
    pub time: DateTime<Utc>,
    pub price: f64,
}

impl DataPoint {
    #[must_use]
    pub fn new(time: DateTime<Utc>, price: f64) -> Self {
        Self { time, price }
    }

    /// Builds a point from an ISO-8601 date or timestamp string.
    pub fn parse(date: &str, price: f64) -> ChartResult<Self> {
        Ok(Self {
            time: parse_iso_datetime(date)?,
            price,
        })
    }

    pub fn from_decimal(time: DateTime<Utc>, price: Decimal) -> ChartResult<Self> {
        Ok(Self {
            time,
            price: decimal_to_f64(price, "price")?,
        })
    }

    /// Time coordinate used by scales and the locator.
    #[must_use]
    pub fn time_millis(&self) -> f64 {
        datetime_to_unix_millis(self.time)
    }
}

/// Parses RFC 3339 timestamps, naive date-times and plain dates.
///
/// Naive inputs are interpreted as UTC; a bare date maps to UTC midnight.
pub fn parse_iso_datetime(input: &str) -> ChartResult<DateTime<Utc>> {
    let trimmed = input.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(parsed.with_timezone(&Utc));
    }
    for pattern in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, pattern) {
            return Ok(naive.and_utc());
        }
    }
    match NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        Ok(date) => date
            .and_hms_opt(0, 0, 0)
            .map(|naive| naive.and_utc())
            .ok_or_else(|| ChartError::InvalidDate {
                input: input.to_owned(),
                reason: "date has no midnight".to_owned(),
            }),
        Err(err) => Err(ChartError::InvalidDate {
            input: input.to_owned(),
            reason: err.to_string(),
        }),
    }
}

mod iso_date {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(time: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&time.to_rfc3339_opts(SecondsFormat::Millis, true))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        super::parse_iso_datetime(&raw).map_err(serde::de::Error::custom)
    }
}
