use crate::errors::DomainError;

/// Metabolic equivalents per supported exercise type.
pub const EXERCISE_TYPES: &[(&str, f64)] = &[
    ("Walking", 3.5),
    ("Running", 9.8),
    ("Cycling", 7.5),
    ("Swimming", 8.0),
    ("Yoga", 2.5),
    ("Stretching", 2.3),
    ("Dancing", 5.0),
    ("Hiking", 6.0),
    ("HIIT", 8.0),
    ("JumpRope", 12.3),
    ("Rowing", 7.0),
    ("Weightlifting", 3.5),
];

pub fn met_for(exercise_type: &str) -> Result<f64, DomainError> {
    EXERCISE_TYPES
        .iter()
        .find(|(name, _)| *name == exercise_type)
        .map(|(_, met)| *met)
        .ok_or_else(|| DomainError::UnknownExercise(exercise_type.to_string()))
}

/// Calories burned, rounded up: weight × MET × hours.
pub fn calculate_calories_burned(
    exercise_type: &str,
    weight_kg: f64,
    duration_minutes: i32,
) -> Result<i32, DomainError> {
    let met = met_for(exercise_type)?;
    let calories = weight_kg * met * (f64::from(duration_minutes) / 60.0);
    Ok(calories.ceil() as i32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn calories_scale_with_weight_and_duration() {
        // 70kg running for 30 minutes: 70 * 9.8 * 0.5 = 343
        assert_eq!(calculate_calories_burned("Running", 70.0, 30).unwrap(), 343);
        assert_eq!(calculate_calories_burned("Running", 140.0, 30).unwrap(), 686);
    }

    #[test]
    fn fractional_calories_round_up() {
        // 61kg walking for 10 minutes: 61 * 3.5 / 6 = 35.58...
        assert_eq!(calculate_calories_burned("Walking", 61.0, 10).unwrap(), 36);
    }

    #[test]
    fn unknown_exercise_is_rejected() {
        assert_eq!(
            calculate_calories_burned("Jousting", 70.0, 30),
            Err(DomainError::UnknownExercise("Jousting".to_string()))
        );
    }
}
