//! Seven-day rollup of exercise, food, water and sleep entries.
//!
//! Buckets are keyed by calendar date (UTC), oldest first, ending with
//! `today`. Both window ends are inclusive: anything dated on the first day
//! of the window or on `today` is counted. Day-of-month values are only
//! produced as chart labels.

use chrono::{Datelike, Duration, NaiveDate};
use serde::Serialize;

use crate::errors::DomainError;
use crate::models::activity::{ExerciseEntry, FoodEntry, SleepEntry, WaterEntry};

pub const WINDOW_DAYS: usize = 7;

/// Everything one account has logged, as fetched from storage.
#[derive(Debug, Clone, Copy)]
pub struct ActivityStreams<'a> {
    pub exercise: &'a [ExerciseEntry],
    pub food: &'a [FoodEntry],
    pub water: &'a [WaterEntry],
    pub sleep: &'a [SleepEntry],
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub exercise_calories: [i64; WINDOW_DAYS],
    pub food_calories: [i64; WINDOW_DAYS],
    pub water_ml: [i64; WINDOW_DAYS],
    pub sleep_hours: [i64; WINDOW_DAYS],
    pub had_activity: [bool; WINDOW_DAYS],
    pub day_labels: [u32; WINDOW_DAYS],
}

/// A record that contributes an amount to one calendar day.
trait DailyContribution {
    fn day(&self) -> NaiveDate;
    fn amount(&self) -> Result<i64, DomainError>;
}

impl DailyContribution for ExerciseEntry {
    fn day(&self) -> NaiveDate {
        self.started_at.date_naive()
    }

    fn amount(&self) -> Result<i64, DomainError> {
        Ok(i64::from(self.calories_burned))
    }
}

impl DailyContribution for FoodEntry {
    fn day(&self) -> NaiveDate {
        self.eaten_at.date_naive()
    }

    fn amount(&self) -> Result<i64, DomainError> {
        Ok(i64::from(self.calorie_count))
    }
}

impl DailyContribution for WaterEntry {
    fn day(&self) -> NaiveDate {
        self.drunk_at.date_naive()
    }

    fn amount(&self) -> Result<i64, DomainError> {
        Ok(i64::from(self.volume_ml))
    }
}

// Sleep counts towards the night it started.
impl DailyContribution for SleepEntry {
    fn day(&self) -> NaiveDate {
        self.sleep_start.date_naive()
    }

    fn amount(&self) -> Result<i64, DomainError> {
        self.whole_hours()
    }
}

struct Window {
    first: NaiveDate,
    last: NaiveDate,
}

impl Window {
    fn ending(today: NaiveDate) -> Self {
        Window {
            first: today - Duration::days(WINDOW_DAYS as i64 - 1),
            last: today,
        }
    }

    fn slot(&self, day: NaiveDate) -> Option<usize> {
        if day < self.first || day > self.last {
            return None;
        }
        usize::try_from((day - self.first).num_days()).ok()
    }

    fn labels(&self) -> [u32; WINDOW_DAYS] {
        let mut labels = [0u32; WINDOW_DAYS];
        for (offset, label) in labels.iter_mut().enumerate() {
            *label = (self.first + Duration::days(offset as i64)).day();
        }
        labels
    }
}

fn accumulate<T: DailyContribution>(
    records: &[T],
    window: &Window,
    totals: &mut [i64; WINDOW_DAYS],
    had_activity: &mut [bool; WINDOW_DAYS],
) -> Result<(), DomainError> {
    for record in records {
        if let Some(slot) = window.slot(record.day()) {
            totals[slot] += record.amount()?;
            had_activity[slot] = true;
        }
    }
    Ok(())
}

/// Roll the four streams into per-day totals for the week ending `today`.
///
/// Fails with [`DomainError::MalformedTimeRange`] if a sleep entry inside
/// the window ends before it starts.
pub fn aggregate(
    streams: ActivityStreams<'_>,
    today: NaiveDate,
) -> Result<DashboardSummary, DomainError> {
    let window = Window::ending(today);

    let mut summary = DashboardSummary {
        exercise_calories: [0; WINDOW_DAYS],
        food_calories: [0; WINDOW_DAYS],
        water_ml: [0; WINDOW_DAYS],
        sleep_hours: [0; WINDOW_DAYS],
        had_activity: [false; WINDOW_DAYS],
        day_labels: window.labels(),
    };

    accumulate(streams.exercise, &window, &mut summary.exercise_calories, &mut summary.had_activity)?;
    accumulate(streams.food, &window, &mut summary.food_calories, &mut summary.had_activity)?;
    accumulate(streams.water, &window, &mut summary.water_ml, &mut summary.had_activity)?;
    accumulate(streams.sleep, &window, &mut summary.sleep_hours, &mut summary.had_activity)?;

    Ok(summary)
}
