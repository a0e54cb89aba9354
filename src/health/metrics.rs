//! BMI, basal metabolic rate and daily calorie target.
//!
//! BMR uses the revised Harris-Benedict equations. Activity levels are an
//! enumeration, so an unsupported level is rejected when parsed and never
//! reaches [`compute`].

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use crate::models::user::{ActivityLevel, Gender};

/// Derived values stored on the account.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HealthTargets {
    pub calorie_target: f64,
    pub bmi: f64,
}

/// Body mass index, weight / height(m)^2.
pub fn bmi(weight_kg: f64, height_cm: f64) -> f64 {
    let height_m = height_cm / 100.0;
    weight_kg / (height_m * height_m)
}

pub fn basal_metabolic_rate(weight_kg: f64, height_cm: f64, age_years: u32, gender: Gender) -> f64 {
    let age = f64::from(age_years);
    match gender {
        Gender::Male => 88.362 + 13.397 * weight_kg + 4.799 * height_cm - 5.677 * age,
        Gender::Female => 447.593 + 9.247 * weight_kg + 3.098 * height_cm - 4.330 * age,
    }
}

pub fn activity_multiplier(level: ActivityLevel) -> f64 {
    match level {
        ActivityLevel::High => 1.9,
        ActivityLevel::Medium => 1.55,
        ActivityLevel::Low => 1.2,
    }
}

pub fn compute(
    weight_kg: f64,
    height_cm: f64,
    age_years: u32,
    gender: Gender,
    activity_level: ActivityLevel,
) -> HealthTargets {
    let bmr = basal_metabolic_rate(weight_kg, height_cm, age_years, gender);
    HealthTargets {
        calorie_target: bmr * activity_multiplier(activity_level),
        bmi: bmi(weight_kg, height_cm),
    }
}

/// Whole years between `born` and `today`, counting a birthday only once reached.
pub fn calculate_age(born: NaiveDate, today: NaiveDate) -> u32 {
    let mut years = today.year() - born.year();
    if (today.month(), today.day()) < (born.month(), born.day()) {
        years -= 1;
    }
    u32::try_from(years).unwrap_or(0)
}
