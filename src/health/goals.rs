//! Same-day progress against the account's targets.

use chrono::NaiveDate;
use serde::Serialize;

use crate::models::activity::{FoodEntry, WaterEntry};
use crate::models::user::Gender;

pub fn water_goal_ml(gender: Gender) -> i32 {
    match gender {
        Gender::Male => 3500,
        Gender::Female => 2500,
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CalorieProgress {
    pub consumed: i64,
    pub target: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WaterProgress {
    pub consumed_ml: i64,
    pub goal_ml: i32,
    pub goal_reached: bool,
}

pub fn calorie_progress(food: &[FoodEntry], calorie_target: f64, today: NaiveDate) -> CalorieProgress {
    let consumed = food
        .iter()
        .filter(|entry| entry.eaten_at.date_naive() == today)
        .map(|entry| i64::from(entry.calorie_count))
        .sum();

    CalorieProgress { consumed, target: calorie_target }
}

pub fn water_progress(water: &[WaterEntry], gender: Gender, today: NaiveDate) -> WaterProgress {
    let consumed_ml: i64 = water
        .iter()
        .filter(|entry| entry.drunk_at.date_naive() == today)
        .map(|entry| i64::from(entry.volume_ml))
        .sum();
    let goal_ml = water_goal_ml(gender);

    WaterProgress {
        consumed_ml,
        goal_ml,
        goal_reached: consumed_ml >= i64::from(goal_ml),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use uuid::Uuid;

    fn water(day: u32, ml: i32) -> WaterEntry {
        WaterEntry {
            entry_id: Uuid::new_v4(),
            account_id: 1,
            drunk_at: Utc.with_ymd_and_hms(2024, 5, day, 12, 0, 0).unwrap(),
            volume_ml: ml,
        }
    }

    fn food(day: u32, calories: i32) -> FoodEntry {
        FoodEntry {
            entry_id: Uuid::new_v4(),
            account_id: 1,
            eaten_at: Utc.with_ymd_and_hms(2024, 5, day, 8, 30, 0).unwrap(),
            food_label: "Porridge".to_string(),
            calorie_count: calories,
        }
    }

    #[test]
    fn water_goal_depends_on_gender() {
        assert_eq!(water_goal_ml(Gender::Male), 3500);
        assert_eq!(water_goal_ml(Gender::Female), 2500);
    }

    #[test]
    fn only_todays_water_counts() {
        let today = NaiveDate::from_ymd_opt(2024, 5, 10).unwrap();
        let entries = [water(10, 1500), water(10, 1000), water(9, 4000)];

        let progress = water_progress(&entries, Gender::Female, today);
        assert_eq!(progress.consumed_ml, 2500);
        assert!(progress.goal_reached);

        let progress = water_progress(&entries, Gender::Male, today);
        assert!(!progress.goal_reached);
    }

    #[test]
    fn only_todays_food_counts() {
        let today = NaiveDate::from_ymd_opt(2024, 5, 10).unwrap();
        let entries = [food(10, 350), food(10, 700), food(11, 900)];

        let progress = calorie_progress(&entries, 2200.0, today);
        assert_eq!(progress, CalorieProgress { consumed: 1050, target: 2200.0 });
    }
}
