use sqlx::PgPool;

use crate::errors::AppError;
use crate::models::activity::{ExampleExercise, ExerciseEntry, FoodEntry, SleepEntry, WaterEntry};

pub async fn insert_exercise(pool: &PgPool, entry: &ExerciseEntry) -> Result<(), AppError> {
    sqlx::query(
        "INSERT INTO exercise_entries (entry_id, account_id, exercise_type, started_at, duration_minutes, calories_burned) \
         VALUES ($1, $2, $3, $4, $5, $6)",
    )
    .bind(entry.entry_id)
    .bind(entry.account_id)
    .bind(&entry.exercise_type)
    .bind(entry.started_at)
    .bind(entry.duration_minutes)
    .bind(entry.calories_burned)
    .execute(pool)
    .await?;
    Ok(())
}

pub async fn fetch_exercise_for_account(pool: &PgPool, account_id: i64) -> Result<Vec<ExerciseEntry>, AppError> {
    let entries = sqlx::query_as::<_, ExerciseEntry>(
        "SELECT * FROM exercise_entries WHERE account_id = $1 ORDER BY started_at",
    )
    .bind(account_id)
    .fetch_all(pool)
    .await?;
    Ok(entries)
}

pub async fn insert_food(pool: &PgPool, entry: &FoodEntry) -> Result<(), AppError> {
    sqlx::query(
        "INSERT INTO food_entries (entry_id, account_id, eaten_at, food_label, calorie_count) VALUES ($1, $2, $3, $4, $5)",
    )
    .bind(entry.entry_id)
    .bind(entry.account_id)
    .bind(entry.eaten_at)
    .bind(&entry.food_label)
    .bind(entry.calorie_count)
    .execute(pool)
    .await?;
    Ok(())
}

pub async fn fetch_food_for_account(pool: &PgPool, account_id: i64) -> Result<Vec<FoodEntry>, AppError> {
    let entries = sqlx::query_as::<_, FoodEntry>(
        "SELECT * FROM food_entries WHERE account_id = $1 ORDER BY eaten_at",
    )
    .bind(account_id)
    .fetch_all(pool)
    .await?;
    Ok(entries)
}

pub async fn insert_water(pool: &PgPool, entry: &WaterEntry) -> Result<(), AppError> {
    sqlx::query("INSERT INTO water_entries (entry_id, account_id, drunk_at, volume_ml) VALUES ($1, $2, $3, $4)")
        .bind(entry.entry_id)
        .bind(entry.account_id)
        .bind(entry.drunk_at)
        .bind(entry.volume_ml)
        .execute(pool)
        .await?;
    Ok(())
}

pub async fn fetch_water_for_account(pool: &PgPool, account_id: i64) -> Result<Vec<WaterEntry>, AppError> {
    let entries = sqlx::query_as::<_, WaterEntry>(
        "SELECT * FROM water_entries WHERE account_id = $1 ORDER BY drunk_at",
    )
    .bind(account_id)
    .fetch_all(pool)
    .await?;
    Ok(entries)
}

pub async fn insert_sleep(pool: &PgPool, entry: &SleepEntry) -> Result<(), AppError> {
    sqlx::query("INSERT INTO sleep_entries (entry_id, account_id, sleep_start, sleep_end) VALUES ($1, $2, $3, $4)")
        .bind(entry.entry_id)
        .bind(entry.account_id)
        .bind(entry.sleep_start)
        .bind(entry.sleep_end)
        .execute(pool)
        .await?;
    Ok(())
}

pub async fn fetch_sleep_for_account(pool: &PgPool, account_id: i64) -> Result<Vec<SleepEntry>, AppError> {
    let entries = sqlx::query_as::<_, SleepEntry>(
        "SELECT * FROM sleep_entries WHERE account_id = $1 ORDER BY sleep_start",
    )
    .bind(account_id)
    .fetch_all(pool)
    .await?;
    Ok(entries)
}

pub async fn list_example_exercises(pool: &PgPool) -> Result<Vec<ExampleExercise>, AppError> {
    let examples = sqlx::query_as::<_, ExampleExercise>("SELECT * FROM example_exercises ORDER BY example_id")
        .fetch_all(pool)
        .await?;
    Ok(examples)
}

pub async fn insert_example_exercise(
    pool: &PgPool,
    exercise_name: &str,
    exercise_type: &str,
    description: &str,
    burn_calories: i32,
    image_name: &str,
) -> Result<ExampleExercise, AppError> {
    let example = sqlx::query_as::<_, ExampleExercise>(
        "INSERT INTO example_exercises (exercise_name, exercise_type, description, burn_calories, image_name) \
         VALUES ($1, $2, $3, $4, $5) RETURNING *",
    )
    .bind(exercise_name)
    .bind(exercise_type)
    .bind(description)
    .bind(burn_calories)
    .bind(image_name)
    .fetch_one(pool)
    .await?;
    Ok(example)
}
