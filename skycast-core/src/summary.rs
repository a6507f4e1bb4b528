//! 5-day overview: one representative sample per day.

use crate::model::{ForecastSample, ForecastSeries};

/// 3-hour slots per forecast day.
const SAMPLES_PER_DAY: usize = 8;

/// Days shown in the overview list.
const MAX_DAYS: usize = 5;

/// Pick one representative sample per day for the 5-day list.
///
/// The forecast carries eight 3-hour slots per day, so every eighth
/// sample lands at the same time of day; the result is capped at five
/// days. A short series simply yields fewer entries.
pub fn daily_overview(series: &ForecastSeries) -> Vec<&ForecastSample> {
    series
        .samples
        .iter()
        .step_by(SAMPLES_PER_DAY)
        .take(MAX_DAYS)
        .collect()
}
