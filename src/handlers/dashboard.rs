use actix_web::{web, HttpResponse};
use chrono::{NaiveDate, Utc};
use serde::Serialize;
use sqlx::PgPool;

use crate::dashboard::{aggregate, ActivityStreams, DashboardSummary};
use crate::db::entries;
use crate::errors::AppError;
use crate::handlers::current_account;
use crate::models::user::{AccountRecord, NameField};
use crate::utils::jwt::Claims;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardResponse {
    firstname: String,
    #[serde(flatten)]
    summary: DashboardSummary,
}

/// Fetch everything the account has logged and roll up the week ending `today`.
pub(crate) async fn build_dashboard(
    pool: &PgPool,
    account: &AccountRecord,
    today: NaiveDate,
) -> Result<DashboardResponse, AppError> {
    let exercise = entries::fetch_exercise_for_account(pool, account.id()).await?;
    let food = entries::fetch_food_for_account(pool, account.id()).await?;
    let water = entries::fetch_water_for_account(pool, account.id()).await?;
    let sleep = entries::fetch_sleep_for_account(pool, account.id()).await?;

    let summary = aggregate(
        ActivityStreams {
            exercise: &exercise,
            food: &food,
            water: &water,
            sleep: &sleep,
        },
        today,
    )?;

    Ok(DashboardResponse {
        firstname: account.decrypt_field(NameField::Firstname)?,
        summary,
    })
}

// GET /v1/dashboard
pub async fn get_dashboard(
    claims: web::ReqData<Claims>,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse, AppError> {
    let account = current_account(&pool, &claims).await?;
    let dashboard = build_dashboard(&pool, &account, Utc::now().date_naive()).await?;

    Ok(HttpResponse::Ok().json(dashboard))
}
