use actix_web::{web, HttpResponse};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use validator::Validate;

use crate::db;
use crate::errors::AppError;
use crate::handlers::current_account;
use crate::models::user::{AccountRecord, ActivityLevel, Gender, NameField, Role};
use crate::utils::jwt::Claims;
use crate::utils::validation::{validate_name, validate_payload};

#[derive(Deserialize, Validate)]
pub struct PersonalDetailsUpdate {
    #[validate(length(min = 1, max = 100, message = "First name is required"))]
    #[validate(custom = "validate_name")]
    firstname: String,

    #[validate(length(min = 1, max = 100, message = "Surname is required"))]
    #[validate(custom = "validate_name")]
    surname: String,

    gender: String,
}

#[derive(Deserialize, Validate)]
pub struct MeasurementsUpdate {
    #[validate(range(min = 10.0, max = 900.0, message = "Please enter your weight correctly."))]
    weight: f64,

    #[validate(range(min = 90.0, max = 300.0, message = "Please enter your height correctly."))]
    height: f64,
}

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
struct ProfileResponse {
    id: i64,
    email: String,
    firstname: String,
    surname: String,
    role: Role,
    weight: f64,
    height: f64,
    activity_level: ActivityLevel,
    gender: Gender,
    date_of_birth: NaiveDate,
    age: u32,
    bmi: f64,
    calorie_target: f64,
}

impl ProfileResponse {
    fn from_account(account: &AccountRecord) -> Result<Self, AppError> {
        Ok(ProfileResponse {
            id: account.id(),
            email: account.email().to_string(),
            firstname: account.decrypt_field(NameField::Firstname)?,
            surname: account.decrypt_field(NameField::Surname)?,
            role: account.role(),
            weight: account.weight_kg(),
            height: account.height_cm(),
            activity_level: account.activity_level(),
            gender: account.gender(),
            date_of_birth: account.dob(),
            age: account.age(),
            bmi: account.bmi(),
            calorie_target: account.calorie_target(),
        })
    }
}

// GET /v1/user
pub async fn get_profile(
    claims: web::ReqData<Claims>,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse, AppError> {
    let account = current_account(&pool, &claims).await?;

    Ok(HttpResponse::Ok().json(ProfileResponse::from_account(&account)?))
}

// PATCH /v1/user/details
pub async fn update_personal_details(
    claims: web::ReqData<Claims>,
    pool: web::Data<PgPool>,
    updates: web::Json<PersonalDetailsUpdate>,
) -> Result<HttpResponse, AppError> {
    validate_payload(&*updates)?;
    let gender = updates.gender.parse::<Gender>()?;

    let mut account = current_account(&pool, &claims).await?;
    account.update_personal_details(&updates.firstname, &updates.surname, gender)?;
    db::accounts::save_account(&pool, &account).await?;

    Ok(HttpResponse::Ok().json(ProfileResponse::from_account(&account)?))
}

// PATCH /v1/user/measurements
pub async fn update_measurements(
    claims: web::ReqData<Claims>,
    pool: web::Data<PgPool>,
    updates: web::Json<MeasurementsUpdate>,
) -> Result<HttpResponse, AppError> {
    validate_payload(&*updates)?;

    let mut account = current_account(&pool, &claims).await?;
    account.update_measurements(updates.weight, updates.height);
    db::accounts::save_account(&pool, &account).await?;

    Ok(HttpResponse::Ok().json(ProfileResponse::from_account(&account)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::user::NewAccount;

    #[test]
    fn profile_exposes_decrypted_names_and_metrics() {
        let account = AccountRecord::create(
            7,
            NewAccount {
                email: "kim@example.com".to_string(),
                password: "Abcdef1!".to_string(),
                firstname: "Kim".to_string(),
                surname: "Lowe".to_string(),
                weight_kg: 70.0,
                height_cm: 175.0,
                activity_level: ActivityLevel::Low,
                gender: Gender::Male,
                dob: NaiveDate::from_ymd_opt(1994, 1, 1).unwrap(),
            },
            4,
            NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(),
        )
        .unwrap();

        let json = serde_json::to_value(ProfileResponse::from_account(&account).unwrap()).unwrap();
        assert_eq!(json["firstname"], "Kim");
        assert_eq!(json["surname"], "Lowe");
        assert_eq!(json["activityLevel"], "Low");
        assert_eq!(json["role"], "user");
        assert_eq!(json["age"], 30);
        assert!((json["bmi"].as_f64().unwrap() - 22.857).abs() < 0.001);
    }

    #[test]
    fn measurements_are_range_checked() {
        assert!(MeasurementsUpdate { weight: 70.0, height: 175.0 }.validate().is_ok());
        assert!(MeasurementsUpdate { weight: 901.0, height: 175.0 }.validate().is_err());
        assert!(MeasurementsUpdate { weight: 70.0, height: 80.0 }.validate().is_err());
    }

    #[test]
    fn personal_details_reject_bad_names() {
        let update = PersonalDetailsUpdate {
            firstname: "J@ne".to_string(),
            surname: "Doe".to_string(),
            gender: "Female".to_string(),
        };
        assert!(update.validate().is_err());
    }
}
