use actix_web::{web, HttpRequest, HttpResponse};
use actix_web::rt::task::spawn_blocking;
use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use validator::Validate;
use lazy_static::lazy_static;
use moka::sync::Cache;

use crate::config::Config;
use crate::db;
use crate::errors::{AppError, DomainError};
use crate::handlers::dashboard::{build_dashboard, DashboardResponse};
use crate::handlers::{current_account, remote_addr};
use crate::models::user::{AccountRecord, ActivityLevel, Gender, NewAccount};
use crate::security::audit::{self, SecurityEvent};
use crate::security::password::verify_password;
use crate::utils::jwt::{generate_token, Claims};
use crate::utils::validation::{validate_date_of_birth, validate_name, validate_password_strength, validate_payload};

lazy_static! {
    static ref EMAIL_CACHE: Cache<String, bool> = Cache::new(10_000);
}

#[derive(Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    #[validate(email(message = "Invalid email format"))]
    email: String,

    #[validate(length(min = 8, max = 15, message = "Password must be between 8 and 15 characters in length."))]
    #[validate(custom = "validate_password_strength")]
    password: String,

    confirm_password: String,

    #[validate(length(min = 1, max = 100, message = "First name is required"))]
    #[validate(custom = "validate_name")]
    firstname: String,

    #[validate(length(min = 1, max = 100, message = "Surname is required"))]
    #[validate(custom = "validate_name")]
    surname: String,

    #[validate(range(min = 10.0, max = 900.0, message = "Please enter your weight correctly."))]
    weight: f64,

    #[validate(range(min = 90.0, max = 300.0, message = "Please enter your height correctly."))]
    height: f64,

    activity_level: String,

    gender: String,

    #[validate(custom = "validate_date_of_birth")]
    date_of_birth: NaiveDate,
}

#[derive(Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "Invalid email format"))]
    email: String,

    #[validate(length(min = 1, message = "Password is required"))]
    password: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterResponse {
    id: i64,
    email: String,
    token: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    email: String,
    token: String,
    dashboard: DashboardResponse,
}

impl RegisterRequest {
    fn into_new_account(self) -> Result<NewAccount, AppError> {
        if self.password != self.confirm_password {
            return Err(AppError::BadRequest("Both password fields must be equal!".to_string()));
        }

        Ok(NewAccount {
            activity_level: self.activity_level.parse::<ActivityLevel>()?,
            gender: self.gender.parse::<Gender>()?,
            email: self.email,
            password: self.password,
            firstname: self.firstname,
            surname: self.surname,
            weight_kg: self.weight,
            height_cm: self.height,
            dob: self.date_of_birth,
        })
    }
}

// POST /v1/register
pub async fn register(
    http: HttpRequest,
    req: web::Json<RegisterRequest>,
    pool: web::Data<PgPool>,
    config: web::Data<Config>,
) -> Result<HttpResponse, AppError> {
    validate_payload(&*req)?;
    let new_account = req.into_inner().into_new_account()?;
    let email = new_account.email.clone();

    if EMAIL_CACHE.get(&email).is_some() || db::accounts::email_exists(&pool, &email).await? {
        return Err(DomainError::DuplicateEmail.into());
    }

    let id = db::accounts::reserve_account_id(&pool).await?;
    let bcrypt_cost = config.bcrypt_cost;
    let today = Utc::now().date_naive();

    // key derivation and hashing block
    let account = spawn_blocking(move || AccountRecord::create(id, new_account, bcrypt_cost, today))
        .await
        .map_err(|_| AppError::InternalServerError("Account creation failed".to_string()))??;

    db::accounts::insert_account(&pool, &account).await?;
    EMAIL_CACHE.insert(email.clone(), true);

    audit::record(&SecurityEvent::Registration {
        email: email.clone(),
        remote_addr: remote_addr(&http),
    });

    let token = generate_token(account.id(), &config.jwt_secret, config.jwt_ttl_hours)
        .map_err(|e| AppError::InternalServerError(e.to_string()))?;

    Ok(HttpResponse::Created().json(RegisterResponse {
        id: account.id(),
        email,
        token,
    }))
}

// POST /v1/login
pub async fn login(
    http: HttpRequest,
    req: web::Json<LoginRequest>,
    pool: web::Data<PgPool>,
    config: web::Data<Config>,
) -> Result<HttpResponse, AppError> {
    validate_payload(&*req)?;
    let LoginRequest { email, password } = req.into_inner();

    let failed = |email: String| {
        audit::record(&SecurityEvent::FailedLogin { email, remote_addr: remote_addr(&http) });
        AppError::Unauthorized("Please check your login details and try again".to_string())
    };

    let account = match db::accounts::find_account_by_email(&pool, &email).await? {
        Some(account) => account,
        None => return Err(failed(email)),
    };

    if !verify_password(password, account.password_hash().to_string()).await? {
        return Err(failed(email));
    }

    audit::record(&SecurityEvent::Login {
        account_id: account.id(),
        email: email.clone(),
        remote_addr: remote_addr(&http),
    });

    let token = generate_token(account.id(), &config.jwt_secret, config.jwt_ttl_hours)
        .map_err(|e| AppError::InternalServerError(e.to_string()))?;
    let dashboard = build_dashboard(&pool, &account, Utc::now().date_naive()).await?;

    Ok(HttpResponse::Ok().json(LoginResponse {
        email,
        token,
        dashboard,
    }))
}

// POST /v1/logout
pub async fn logout(
    http: HttpRequest,
    claims: web::ReqData<Claims>,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse, AppError> {
    let account = current_account(&pool, &claims).await?;

    audit::record(&SecurityEvent::Logout {
        account_id: account.id(),
        email: account.email().to_string(),
        remote_addr: remote_addr(&http),
    });

    Ok(HttpResponse::Ok().json(serde_json::json!({ "message": "Logged out" })))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> RegisterRequest {
        RegisterRequest {
            email: "lee@example.com".to_string(),
            password: "Abcdef1!".to_string(),
            confirm_password: "Abcdef1!".to_string(),
            firstname: "Lee".to_string(),
            surname: "Park".to_string(),
            weight: 72.0,
            height: 178.0,
            activity_level: "Medium".to_string(),
            gender: "Female".to_string(),
            date_of_birth: NaiveDate::from_ymd_opt(1992, 8, 1).unwrap(),
        }
    }

    #[test]
    fn valid_request_passes_validation() {
        assert!(request().validate().is_ok());
        let account = request().into_new_account().unwrap();
        assert_eq!(account.activity_level, ActivityLevel::Medium);
        assert_eq!(account.gender, Gender::Female);
    }

    #[test]
    fn out_of_range_measurements_fail_validation() {
        let mut req = request();
        req.weight = 5.0;
        assert!(req.validate().is_err());

        let mut req = request();
        req.height = 301.0;
        assert!(req.validate().is_err());
    }

    #[test]
    fn weak_password_and_bad_name_fail_validation() {
        let mut req = request();
        req.password = "abcdefgh".to_string();
        req.confirm_password = req.password.clone();
        assert!(req.validate().is_err());

        let mut req = request();
        req.firstname = "L33".to_string();
        assert!(req.validate().is_err());
    }

    #[test]
    fn mismatched_confirmation_is_rejected() {
        let mut req = request();
        req.confirm_password = "Different1!".to_string();
        assert!(matches!(req.into_new_account(), Err(AppError::BadRequest(_))));
    }

    #[test]
    fn unknown_activity_level_is_rejected_before_metrics() {
        let mut req = request();
        req.activity_level = "Extreme".to_string();
        assert!(matches!(req.into_new_account(), Err(AppError::BadRequest(_))));
    }

    #[test]
    fn camel_case_payload_deserialises() {
        let json = serde_json::json!({
            "email": "lee@example.com",
            "password": "Abcdef1!",
            "confirmPassword": "Abcdef1!",
            "firstname": "Lee",
            "surname": "Park",
            "weight": 72,
            "height": 178,
            "activityLevel": "Low",
            "gender": "Male",
            "dateOfBirth": "1992-08-01"
        });
        let req: RegisterRequest = serde_json::from_value(json).unwrap();
        assert_eq!(req.date_of_birth, NaiveDate::from_ymd_opt(1992, 8, 1).unwrap());
    }
}
