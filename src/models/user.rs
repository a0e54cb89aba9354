use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::DomainError;
use crate::health::metrics::{self, calculate_age, HealthTargets};
use crate::security::cipher::{self, EncryptedField};
use crate::security::keys::DataKey;
use crate::security::password::hash_credential;

/// Selects the BMR formula. Two variants only, matching the physiological
/// equations in use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
        }
    }
}

impl FromStr for Gender {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Male" => Ok(Gender::Male),
            "Female" => Ok(Gender::Female),
            other => Err(DomainError::InvalidGender(other.to_string())),
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActivityLevel {
    High,
    Medium,
    Low,
}

impl ActivityLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityLevel::High => "High",
            ActivityLevel::Medium => "Medium",
            ActivityLevel::Low => "Low",
        }
    }
}

impl FromStr for ActivityLevel {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "High" => Ok(ActivityLevel::High),
            "Medium" => Ok(ActivityLevel::Medium),
            "Low" => Ok(ActivityLevel::Low),
            other => Err(DomainError::InvalidActivityLevel(other.to_string())),
        }
    }
}

impl fmt::Display for ActivityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Admin => "admin",
        }
    }
}

impl FromStr for Role {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "user" => Ok(Role::User),
            "admin" => Ok(Role::Admin),
            other => Err(DomainError::InvalidRole(other.to_string())),
        }
    }
}

/// Row shape of the `accounts` table.
#[derive(sqlx::FromRow, Debug)]
pub struct AccountRow {
    pub id: i64,
    pub email: String,
    pub password_hash: String,
    pub data_key: String,
    pub firstname: String,
    pub surname: String,
    pub role: String,
    pub weight: f64,
    pub height: f64,
    pub activity_level: String,
    pub gender: String,
    pub dob: NaiveDate,
    pub age: i32,
    pub bmi: f64,
    pub calories: f64,
}

/// Already-validated registration input.
#[derive(Debug, Clone)]
pub struct NewAccount {
    pub email: String,
    pub password: String,
    pub firstname: String,
    pub surname: String,
    pub weight_kg: f64,
    pub height_cm: f64,
    pub activity_level: ActivityLevel,
    pub gender: Gender,
    pub dob: NaiveDate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameField {
    Firstname,
    Surname,
}

/// A registered person. Name fields exist only as ciphertext under the
/// account's own key; BMI and calorie target are recomputed by every
/// mutation that touches their inputs.
#[derive(Debug, Clone)]
pub struct AccountRecord {
    id: i64,
    email: String,
    password_hash: String,
    data_key: DataKey,
    firstname: EncryptedField,
    surname: EncryptedField,
    role: Role,
    weight_kg: f64,
    height_cm: f64,
    activity_level: ActivityLevel,
    gender: Gender,
    dob: NaiveDate,
    age: u32,
    bmi: f64,
    calorie_target: f64,
}

impl AccountRecord {
    /// Build a fresh account: derives the data key from the password,
    /// hashes the password, seals both names and computes initial metrics.
    ///
    /// Email uniqueness is enforced by storage; `id` comes from its sequence.
    /// Blocking (scrypt + bcrypt).
    pub fn create(
        id: i64,
        new: NewAccount,
        bcrypt_cost: u32,
        today: NaiveDate,
    ) -> Result<Self, DomainError> {
        let data_key = DataKey::derive(&new.password);
        let firstname = cipher::encrypt(&new.firstname, &data_key)?;
        let surname = cipher::encrypt(&new.surname, &data_key)?;
        let password_hash = hash_credential(&new.password, bcrypt_cost)?;

        let age = calculate_age(new.dob, today);
        let targets = metrics::compute(
            new.weight_kg,
            new.height_cm,
            age,
            new.gender,
            new.activity_level,
        );

        Ok(AccountRecord {
            id,
            email: new.email,
            password_hash,
            data_key,
            firstname,
            surname,
            role: Role::User,
            weight_kg: new.weight_kg,
            height_cm: new.height_cm,
            activity_level: new.activity_level,
            gender: new.gender,
            dob: new.dob,
            age,
            bmi: targets.bmi,
            calorie_target: targets.calorie_target,
        })
    }

    /// Re-seal both names and switch gender. The calorie target follows the
    /// new gender; BMI does not depend on it and is left as is.
    pub fn update_personal_details(
        &mut self,
        firstname: &str,
        surname: &str,
        gender: Gender,
    ) -> Result<(), DomainError> {
        let firstname = cipher::encrypt(firstname, &self.data_key)?;
        let surname = cipher::encrypt(surname, &self.data_key)?;

        self.firstname = firstname;
        self.surname = surname;
        self.gender = gender;
        self.calorie_target = self.current_targets().calorie_target;
        Ok(())
    }

    /// Store new weight/height and recompute both BMI and calorie target.
    pub fn update_measurements(&mut self, weight_kg: f64, height_cm: f64) {
        self.weight_kg = weight_kg;
        self.height_cm = height_cm;

        let targets = self.current_targets();
        self.bmi = targets.bmi;
        self.calorie_target = targets.calorie_target;
    }

    /// Plaintext of one of the sealed name fields.
    pub fn decrypt_field(&self, field: NameField) -> Result<String, DomainError> {
        let sealed = match field {
            NameField::Firstname => &self.firstname,
            NameField::Surname => &self.surname,
        };
        cipher::decrypt(sealed, &self.data_key)
    }

    fn current_targets(&self) -> HealthTargets {
        metrics::compute(
            self.weight_kg,
            self.height_cm,
            self.age,
            self.gender,
            self.activity_level,
        )
    }

    pub fn id(&self) -> i64 {
        self.id
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn password_hash(&self) -> &str {
        &self.password_hash
    }

    pub fn data_key(&self) -> &DataKey {
        &self.data_key
    }

    pub fn sealed_firstname(&self) -> &EncryptedField {
        &self.firstname
    }

    pub fn sealed_surname(&self) -> &EncryptedField {
        &self.surname
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    pub fn weight_kg(&self) -> f64 {
        self.weight_kg
    }

    pub fn height_cm(&self) -> f64 {
        self.height_cm
    }

    pub fn activity_level(&self) -> ActivityLevel {
        self.activity_level
    }

    pub fn gender(&self) -> Gender {
        self.gender
    }

    pub fn dob(&self) -> NaiveDate {
        self.dob
    }

    pub fn age(&self) -> u32 {
        self.age
    }

    pub fn bmi(&self) -> f64 {
        self.bmi
    }

    pub fn calorie_target(&self) -> f64 {
        self.calorie_target
    }
}

impl TryFrom<AccountRow> for AccountRecord {
    type Error = DomainError;

    fn try_from(row: AccountRow) -> Result<Self, Self::Error> {
        Ok(AccountRecord {
            id: row.id,
            email: row.email,
            password_hash: row.password_hash,
            data_key: DataKey::from_encoded(row.data_key)?,
            firstname: EncryptedField::from_stored(row.firstname),
            surname: EncryptedField::from_stored(row.surname),
            role: row.role.parse()?,
            weight_kg: row.weight,
            height_cm: row.height,
            activity_level: row.activity_level.parse()?,
            gender: row.gender.parse()?,
            dob: row.dob,
            age: u32::try_from(row.age).unwrap_or(0),
            bmi: row.bmi,
            calorie_target: row.calories,
        })
    }
}
