use actix_web::{web, HttpRequest, HttpResponse};
use serde::Deserialize;
use sqlx::PgPool;
use validator::{Validate, ValidationError};

use crate::db::entries;
use crate::errors::AppError;
use crate::handlers::{current_account, remote_addr};
use crate::health::exercise::met_for;
use crate::security::audit::{self, SecurityEvent};
use crate::utils::jwt::Claims;
use crate::utils::validation::validate_payload;

const PERMITTED_IMAGE_EXTENSIONS: [&str; 4] = ["png", "jpg", "jpeg", "gif"];

#[derive(Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ExampleExerciseRequest {
    #[validate(length(min = 1, max = 100, message = "Exercise name is required"))]
    exercise_name: String,

    exercise_type: String,

    #[validate(length(min = 1, message = "Description is required"))]
    description: String,

    #[validate(range(min = 0, message = "Burned calories cannot be negative"))]
    burn_calories: i32,

    #[validate(custom = "validate_image_name")]
    image_name: String,
}

fn validate_image_name(name: &str) -> Result<(), ValidationError> {
    let permitted = name
        .rsplit_once('.')
        .map(|(stem, ext)| !stem.is_empty() && PERMITTED_IMAGE_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
        .unwrap_or(false);

    if !permitted || name.contains('/') || name.contains('\\') {
        let mut err = ValidationError::new("image_name");
        err.message = Some("Incorrect file type! Please try again!".into());
        return Err(err);
    }
    Ok(())
}

// GET /v1/admin/examples
pub async fn list_examples(pool: web::Data<PgPool>) -> Result<HttpResponse, AppError> {
    let examples = entries::list_example_exercises(&pool).await?;
    Ok(HttpResponse::Ok().json(examples))
}

// POST /v1/admin/examples
pub async fn create_example(
    http: HttpRequest,
    claims: web::ReqData<Claims>,
    pool: web::Data<PgPool>,
    payload: web::Json<ExampleExerciseRequest>,
) -> Result<HttpResponse, AppError> {
    let account = current_account(&pool, &claims).await?;

    if !account.is_admin() {
        audit::record(&SecurityEvent::UnauthorizedAccess {
            account_id: account.id(),
            resource: http.path().to_string(),
            remote_addr: remote_addr(&http),
        });
        return Err(AppError::Forbidden("Admin access required".to_string()));
    }

    validate_payload(&*payload)?;
    met_for(&payload.exercise_type)?;

    let example = entries::insert_example_exercise(
        &pool,
        &payload.exercise_name,
        &payload.exercise_type,
        &payload.description,
        payload.burn_calories,
        &payload.image_name,
    )
    .await?;

    Ok(HttpResponse::Created().json(example))
}
