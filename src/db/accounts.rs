use sqlx::PgPool;

use crate::errors::{AppError, DomainError};
use crate::models::user::{AccountRecord, AccountRow};

const SELECT_ACCOUNT: &str = "SELECT id, email, password_hash, data_key, firstname, surname, role, weight, height, \
     activity_level, gender, dob, age, bmi, calories FROM accounts";

/// Next account identifier from the monotonic sequence.
pub async fn reserve_account_id(pool: &PgPool) -> Result<i64, AppError> {
    let id = sqlx::query_scalar::<_, i64>("SELECT nextval('accounts_id_seq')")
        .fetch_one(pool)
        .await?;
    Ok(id)
}

pub async fn email_exists(pool: &PgPool, email: &str) -> Result<bool, AppError> {
    let exists = sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM accounts WHERE email = $1)")
        .bind(email)
        .fetch_one(pool)
        .await?;
    Ok(exists)
}

/// Insert a new account. A concurrent registration with the same email
/// loses on the unique constraint and gets `DuplicateEmail`.
pub async fn insert_account(pool: &PgPool, account: &AccountRecord) -> Result<(), AppError> {
    let result = sqlx::query(
        "INSERT INTO accounts (id, email, password_hash, data_key, firstname, surname, role, weight, height, \
         activity_level, gender, dob, age, bmi, calories, created_at, updated_at) \
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, NOW(), NOW()) \
         ON CONFLICT (email) DO NOTHING",
    )
    .bind(account.id())
    .bind(account.email())
    .bind(account.password_hash())
    .bind(account.data_key().as_encoded())
    .bind(account.sealed_firstname().as_str())
    .bind(account.sealed_surname().as_str())
    .bind(account.role().as_str())
    .bind(account.weight_kg())
    .bind(account.height_cm())
    .bind(account.activity_level().as_str())
    .bind(account.gender().as_str())
    .bind(account.dob())
    .bind(account.age() as i32)
    .bind(account.bmi())
    .bind(account.calorie_target())
    .execute(pool)
    .await?;

    ensure_inserted(result.rows_affected())?;
    Ok(())
}

// `ON CONFLICT DO NOTHING` reports a lost email race as zero rows.
fn ensure_inserted(rows_affected: u64) -> Result<(), DomainError> {
    if rows_affected == 0 {
        return Err(DomainError::DuplicateEmail);
    }
    Ok(())
}

pub async fn find_account_by_id(pool: &PgPool, id: i64) -> Result<Option<AccountRecord>, AppError> {
    let row = sqlx::query_as::<_, AccountRow>(&format!("{} WHERE id = $1", SELECT_ACCOUNT))
        .bind(id)
        .fetch_optional(pool)
        .await?;

    Ok(row.map(AccountRecord::try_from).transpose()?)
}

pub async fn find_account_by_email(pool: &PgPool, email: &str) -> Result<Option<AccountRecord>, AppError> {
    let row = sqlx::query_as::<_, AccountRow>(&format!("{} WHERE email = $1", SELECT_ACCOUNT))
        .bind(email)
        .fetch_optional(pool)
        .await?;

    Ok(row.map(AccountRecord::try_from).transpose()?)
}

/// Persist the mutable fields of an account. Key, email and password are never rewritten.
pub async fn save_account(pool: &PgPool, account: &AccountRecord) -> Result<(), AppError> {
    sqlx::query(
        "UPDATE accounts SET firstname = $1, surname = $2, gender = $3, weight = $4, height = $5, \
         bmi = $6, calories = $7, updated_at = NOW() WHERE id = $8",
    )
    .bind(account.sealed_firstname().as_str())
    .bind(account.sealed_surname().as_str())
    .bind(account.gender().as_str())
    .bind(account.weight_kg())
    .bind(account.height_cm())
    .bind(account.bmi())
    .bind(account.calorie_target())
    .bind(account.id())
    .execute(pool)
    .await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conflicting_insert_is_a_duplicate_email() {
        assert_eq!(ensure_inserted(0), Err(DomainError::DuplicateEmail));
        assert_eq!(ensure_inserted(1), Ok(()));
    }
}
