use actix_web::{web, HttpResponse};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use validator::Validate;

use crate::db::entries;
use crate::errors::AppError;
use crate::handlers::current_account;
use crate::health::goals::{calorie_progress, water_progress, CalorieProgress};
use crate::models::activity::{ExerciseEntry, FoodEntry, SleepEntry, WaterEntry};
use crate::utils::jwt::Claims;
use crate::utils::validation::validate_payload;

#[derive(Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ExerciseRequest {
    #[validate(length(min = 1, message = "Exercise type cannot be empty"))]
    exercise_type: String,

    /// Defaults to the time of the request
    started_at: Option<DateTime<Utc>>,

    #[validate(range(min = 5, max = 250, message = "Please enter exercise duration correctly."))]
    duration_minutes: i32,
}

#[derive(Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct FoodRequest {
    #[validate(length(min = 1, max = 100, message = "Food label must be between 1 and 100 characters"))]
    food_label: String,

    #[validate(range(min = 0, message = "Calorie count cannot be negative"))]
    calorie_count: i32,

    eaten_at: Option<DateTime<Utc>>,
}

#[derive(Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct WaterRequest {
    #[validate(range(min = 1, max = 5000, message = "Incorrect water amount entered!"))]
    volume_ml: i32,

    drunk_at: Option<DateTime<Utc>>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SleepRequest {
    sleep_start: DateTime<Utc>,
    sleep_end: DateTime<Utc>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TodaysMealsResponse {
    meals: Vec<FoodEntry>,
    progress: CalorieProgress,
}

fn on_day<T>(entries: Vec<T>, day: NaiveDate, timestamp: impl Fn(&T) -> DateTime<Utc>) -> Vec<T> {
    entries
        .into_iter()
        .filter(|entry| timestamp(entry).date_naive() == day)
        .collect()
}

// POST /v1/exercise
pub async fn create_exercise(
    claims: web::ReqData<Claims>,
    pool: web::Data<PgPool>,
    payload: web::Json<ExerciseRequest>,
) -> Result<HttpResponse, AppError> {
    validate_payload(&*payload)?;
    let account = current_account(&pool, &claims).await?;

    let entry = ExerciseEntry::new(
        account.id(),
        &payload.exercise_type,
        payload.started_at.unwrap_or_else(Utc::now),
        payload.duration_minutes,
        account.weight_kg(),
    )?;
    entries::insert_exercise(&pool, &entry).await?;

    Ok(HttpResponse::Created().json(entry))
}

// GET /v1/exercise
pub async fn get_exercises(
    claims: web::ReqData<Claims>,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse, AppError> {
    let account_id = claims.account_id()?;
    let exercises = entries::fetch_exercise_for_account(&pool, account_id).await?;

    Ok(HttpResponse::Ok().json(exercises))
}

// GET /v1/exercise/today
pub async fn get_todays_exercises(
    claims: web::ReqData<Claims>,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse, AppError> {
    let account_id = claims.account_id()?;
    let exercises = entries::fetch_exercise_for_account(&pool, account_id).await?;
    let today = on_day(exercises, Utc::now().date_naive(), |e| e.started_at);

    Ok(HttpResponse::Ok().json(today))
}

// POST /v1/food
pub async fn create_food(
    claims: web::ReqData<Claims>,
    pool: web::Data<PgPool>,
    payload: web::Json<FoodRequest>,
) -> Result<HttpResponse, AppError> {
    validate_payload(&*payload)?;
    let account = current_account(&pool, &claims).await?;

    let entry = FoodEntry::new(
        account.id(),
        payload.eaten_at.unwrap_or_else(Utc::now),
        &payload.food_label,
        payload.calorie_count,
    );
    entries::insert_food(&pool, &entry).await?;

    Ok(HttpResponse::Created().json(entry))
}

// GET /v1/food
pub async fn get_food(
    claims: web::ReqData<Claims>,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse, AppError> {
    let account_id = claims.account_id()?;
    let food = entries::fetch_food_for_account(&pool, account_id).await?;

    Ok(HttpResponse::Ok().json(food))
}

// GET /v1/food/today
pub async fn get_todays_meals(
    claims: web::ReqData<Claims>,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse, AppError> {
    let account = current_account(&pool, &claims).await?;
    let today = Utc::now().date_naive();

    let food = entries::fetch_food_for_account(&pool, account.id()).await?;
    let meals = on_day(food, today, |f| f.eaten_at);
    let progress = calorie_progress(&meals, account.calorie_target(), today);

    Ok(HttpResponse::Ok().json(TodaysMealsResponse { meals, progress }))
}

// POST /v1/water
pub async fn create_water(
    claims: web::ReqData<Claims>,
    pool: web::Data<PgPool>,
    payload: web::Json<WaterRequest>,
) -> Result<HttpResponse, AppError> {
    validate_payload(&*payload)?;
    let account = current_account(&pool, &claims).await?;

    let entry = WaterEntry::new(account.id(), payload.drunk_at.unwrap_or_else(Utc::now), payload.volume_ml);
    entries::insert_water(&pool, &entry).await?;

    Ok(HttpResponse::Created().json(entry))
}

// GET /v1/water
pub async fn get_water(
    claims: web::ReqData<Claims>,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse, AppError> {
    let account_id = claims.account_id()?;
    let water = entries::fetch_water_for_account(&pool, account_id).await?;

    Ok(HttpResponse::Ok().json(water))
}

// GET /v1/water/today
pub async fn get_todays_water(
    claims: web::ReqData<Claims>,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse, AppError> {
    let account = current_account(&pool, &claims).await?;
    let water = entries::fetch_water_for_account(&pool, account.id()).await?;

    Ok(HttpResponse::Ok().json(water_progress(&water, account.gender(), Utc::now().date_naive())))
}

// POST /v1/sleep
pub async fn create_sleep(
    claims: web::ReqData<Claims>,
    pool: web::Data<PgPool>,
    payload: web::Json<SleepRequest>,
) -> Result<HttpResponse, AppError> {
    let account = current_account(&pool, &claims).await?;

    let entry = SleepEntry::new(account.id(), payload.sleep_start, payload.sleep_end)?;
    entries::insert_sleep(&pool, &entry).await?;

    Ok(HttpResponse::Created().json(entry))
}

// GET /v1/sleep
pub async fn get_sleep(
    claims: web::ReqData<Claims>,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse, AppError> {
    let account_id = claims.account_id()?;
    let sleep = entries::fetch_sleep_for_account(&pool, account_id).await?;

    Ok(HttpResponse::Ok().json(sleep))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn exercise_duration_is_bounded() {
        let ok: ExerciseRequest = serde_json::from_value(serde_json::json!({
            "exerciseType": "Yoga",
            "durationMinutes": 45
        }))
        .unwrap();
        assert!(ok.validate().is_ok());
        assert!(ok.started_at.is_none());

        let too_short: ExerciseRequest = serde_json::from_value(serde_json::json!({
            "exerciseType": "Yoga",
            "durationMinutes": 4
        }))
        .unwrap();
        assert!(too_short.validate().is_err());
    }

    #[test]
    fn water_over_limit_is_rejected() {
        let req: WaterRequest = serde_json::from_value(serde_json::json!({ "volumeMl": 5001 })).unwrap();
        assert!(req.validate().is_err());

        let req: WaterRequest = serde_json::from_value(serde_json::json!({ "volumeMl": 5000 })).unwrap();
        assert!(req.validate().is_ok());
    }

    #[test]
    fn sleep_request_parses_rfc3339() {
        let req: SleepRequest = serde_json::from_value(serde_json::json!({
            "sleepStart": "2024-05-01T22:00:00Z",
            "sleepEnd": "2024-05-02T06:30:00+00:00"
        }))
        .unwrap();
        assert_eq!(req.sleep_end, Utc.with_ymd_and_hms(2024, 5, 2, 6, 30, 0).unwrap());
    }

    #[test]
    fn on_day_keeps_matching_entries() {
        let day = NaiveDate::from_ymd_opt(2024, 5, 2).unwrap();
        let water = vec![
            WaterEntry::new(1, Utc.with_ymd_and_hms(2024, 5, 2, 9, 0, 0).unwrap(), 300),
            WaterEntry::new(1, Utc.with_ymd_and_hms(2024, 5, 1, 9, 0, 0).unwrap(), 400),
        ];
        let kept = on_day(water, day, |w| w.drunk_at);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].volume_ml, 300);
    }
}
