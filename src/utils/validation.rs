use chrono::{NaiveDate, Utc};
use lazy_static::lazy_static;
use regex::Regex;
use validator::{Validate, ValidationError};
use crate::errors::AppError;

const EXCLUDED_NAME_CHARS: &str = "*?!'^+%&/()=}][{$#@<>0123456789";

lazy_static! {
    static ref LOWERCASE: Regex = Regex::new(r"[a-z]").unwrap();
    static ref UPPERCASE: Regex = Regex::new(r"[A-Z]").unwrap();
    static ref DIGIT: Regex = Regex::new(r"[0-9]").unwrap();
    static ref SPECIAL: Regex = Regex::new(r"\W").unwrap();
}

pub fn validate_payload<T: Validate>(payload: &T) -> Result<(), AppError> {
    payload.validate()
        .map_err(|err| AppError::BadRequest(err.to_string()))
}

pub fn validate_name(name: &str) -> Result<(), ValidationError> {
    if let Some(c) = name.chars().find(|c| EXCLUDED_NAME_CHARS.contains(*c)) {
        let mut err = ValidationError::new("name_character");
        err.message = Some(format!("Character {} is not allowed.", c).into());
        return Err(err);
    }
    Ok(())
}

pub fn validate_password_strength(password: &str) -> Result<(), ValidationError> {
    let strong = [&*LOWERCASE, &*UPPERCASE, &*DIGIT, &*SPECIAL]
        .iter()
        .all(|re| re.is_match(password));

    if !strong {
        let mut err = ValidationError::new("password_strength");
        err.message = Some(
            "Password must contain at least 1 digit, 1 lowercase, 1 uppercase and 1 special character."
                .into(),
        );
        return Err(err);
    }
    Ok(())
}

pub fn validate_date_of_birth(dob: &NaiveDate) -> Result<(), ValidationError> {
    check_date_of_birth(*dob, Utc::now().date_naive())
}

fn check_date_of_birth(dob: NaiveDate, today: NaiveDate) -> Result<(), ValidationError> {
    let earliest = NaiveDate::from_ymd_opt(1900, 1, 1).unwrap_or(NaiveDate::MIN);
    if dob > today || dob < earliest {
        let mut err = ValidationError::new("date_of_birth");
        err.message = Some("Please enter your date of birth correctly".into());
        return Err(err);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_reject_digits_and_symbols() {
        assert!(validate_name("Mary-Jane O Neil").is_ok());
        assert!(validate_name("R2D2").is_err());
        assert!(validate_name("<script>").is_err());
        assert!(validate_name("O'Neil").is_err());
    }

    #[test]
    fn password_needs_all_character_classes() {
        assert!(validate_password_strength("Abcdef1!").is_ok());
        assert!(validate_password_strength("abcdef1!").is_err());
        assert!(validate_password_strength("ABCDEF1!").is_err());
        assert!(validate_password_strength("Abcdefg!").is_err());
        assert!(validate_password_strength("Abcdefg1").is_err());
    }

    #[test]
    fn date_of_birth_bounds() {
        let today = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        assert!(check_date_of_birth(NaiveDate::from_ymd_opt(1990, 2, 3).unwrap(), today).is_ok());
        assert!(check_date_of_birth(NaiveDate::from_ymd_opt(1900, 1, 1).unwrap(), today).is_ok());
        assert!(check_date_of_birth(today, today).is_ok());
        assert!(check_date_of_birth(NaiveDate::from_ymd_opt(1899, 12, 31).unwrap(), today).is_err());
        assert!(check_date_of_birth(NaiveDate::from_ymd_opt(2024, 6, 2).unwrap(), today).is_err());
    }
}
