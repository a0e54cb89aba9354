use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::DomainError;
use crate::health::exercise::calculate_calories_burned;

#[derive(sqlx::FromRow, Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ExerciseEntry {
    pub entry_id: Uuid,
    pub account_id: i64,
    pub exercise_type: String,
    pub started_at: DateTime<Utc>,
    pub duration_minutes: i32,
    pub calories_burned: i32,
}

impl ExerciseEntry {
    /// Calories are fixed at entry time from the MET table and the owner's current weight.
    pub fn new(
        account_id: i64,
        exercise_type: &str,
        started_at: DateTime<Utc>,
        duration_minutes: i32,
        weight_kg: f64,
    ) -> Result<Self, DomainError> {
        let calories_burned = calculate_calories_burned(exercise_type, weight_kg, duration_minutes)?;

        Ok(ExerciseEntry {
            entry_id: Uuid::new_v4(),
            account_id,
            exercise_type: exercise_type.to_string(),
            started_at,
            duration_minutes,
            calories_burned,
        })
    }
}

#[derive(sqlx::FromRow, Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct FoodEntry {
    pub entry_id: Uuid,
    pub account_id: i64,
    pub eaten_at: DateTime<Utc>,
    pub food_label: String,
    pub calorie_count: i32,
}

impl FoodEntry {
    pub fn new(account_id: i64, eaten_at: DateTime<Utc>, food_label: &str, calorie_count: i32) -> Self {
        FoodEntry {
            entry_id: Uuid::new_v4(),
            account_id,
            eaten_at,
            food_label: food_label.to_string(),
            calorie_count,
        }
    }
}

#[derive(sqlx::FromRow, Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct WaterEntry {
    pub entry_id: Uuid,
    pub account_id: i64,
    pub drunk_at: DateTime<Utc>,
    pub volume_ml: i32,
}

impl WaterEntry {
    pub fn new(account_id: i64, drunk_at: DateTime<Utc>, volume_ml: i32) -> Self {
        WaterEntry {
            entry_id: Uuid::new_v4(),
            account_id,
            drunk_at,
            volume_ml,
        }
    }
}

#[derive(sqlx::FromRow, Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct SleepEntry {
    pub entry_id: Uuid,
    pub account_id: i64,
    pub sleep_start: DateTime<Utc>,
    pub sleep_end: DateTime<Utc>,
}

impl SleepEntry {
    /// New sleep interval; the end must fall strictly after the start.
    pub fn new(
        account_id: i64,
        sleep_start: DateTime<Utc>,
        sleep_end: DateTime<Utc>,
    ) -> Result<Self, DomainError> {
        if sleep_end <= sleep_start {
            return Err(DomainError::MalformedTimeRange);
        }

        Ok(SleepEntry {
            entry_id: Uuid::new_v4(),
            account_id,
            sleep_start,
            sleep_end,
        })
    }

    /// Slept duration in whole hours, rounded down.
    pub fn whole_hours(&self) -> Result<i64, DomainError> {
        if self.sleep_end <= self.sleep_start {
            return Err(DomainError::MalformedTimeRange);
        }
        Ok((self.sleep_end - self.sleep_start).num_hours())
    }
}

/// Entry in the example-exercise catalogue maintained by admins.
#[derive(sqlx::FromRow, Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ExampleExercise {
    pub example_id: i64,
    pub exercise_name: String,
    pub exercise_type: String,
    pub description: String,
    pub burn_calories: i32,
    pub image_name: String,
}
