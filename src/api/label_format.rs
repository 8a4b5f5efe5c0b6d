use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::render::Renderer;

use super::PriceChart;

pub type DateLabelFormatterFn = Arc<dyn Fn(DateTime<Utc>) -> String + Send + Sync + 'static>;
pub type PriceLabelFormatterFn = Arc<dyn Fn(f64) -> String + Send + Sync + 'static>;

/// `chrono` pattern for the built-in tooltip date label.
pub const DEFAULT_DATE_LABEL_PATTERN: &str = "%B %-d, %Y %-I:%M %p";

/// Long-form UTC date and time, e.g. `January 1, 2021 12:00 AM`.
#[must_use]
pub fn format_long_datetime(time: DateTime<Utc>) -> String {
    time.format(DEFAULT_DATE_LABEL_PATTERN).to_string()
}

/// Whole-dollar currency with thousands separators, e.g. `$1,234`.
///
/// Values round half away from zero; negatives render as `-$1,234`.
#[must_use]
pub fn format_currency(value: f64) -> String {
    if !value.is_finite() {
        return "nan".to_owned();
    }
    let rounded = value.abs().round();
    let digits = format!("{rounded:.0}");
    let grouped = group_thousands(&digits);
    if value < 0.0 && rounded > 0.0 {
        format!("-${grouped}")
    } else {
        format!("${grouped}")
    }
}

fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (index, ch) in digits.chars().enumerate() {
        if index > 0 && (len - index) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

impl<R: Renderer> PriceChart<R> {
    pub fn set_date_label_formatter(&mut self, formatter: DateLabelFormatterFn) {
        self.date_label_formatter = Some(formatter);
    }

    pub fn clear_date_label_formatter(&mut self) {
        self.date_label_formatter = None;
    }

    pub fn set_price_label_formatter(&mut self, formatter: PriceLabelFormatterFn) {
        self.price_label_formatter = Some(formatter);
    }

    pub fn clear_price_label_formatter(&mut self) {
        self.price_label_formatter = None;
    }

    /// Tooltip date text, using the override when one is installed.
    #[must_use]
    pub fn format_date_label(&self, time: DateTime<Utc>) -> String {
        match &self.date_label_formatter {
            Some(formatter) => formatter(time),
            None => format_long_datetime(time),
        }
    }

    /// Tooltip price text, using the override when one is installed.
    #[must_use]
    pub fn format_price_label(&self, price: f64) -> String {
        match &self.price_label_formatter {
            Some(formatter) => formatter(price),
            None => format_currency(price),
        }
    }
}
