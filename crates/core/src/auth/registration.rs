//! Registration input validation and account numbering.

use chrono::NaiveDate;
use thiserror::Error;

use ledgerbank_shared::auth::RegisterRequest;

use super::password::MIN_PASSWORD_LENGTH;
use crate::profile::Gender;

/// Errors that can occur during registration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistrationError {
    /// The email address is not plausible.
    #[error("Enter a valid email address")]
    InvalidEmail,

    /// The password is too short.
    #[error("Password must be at least {min} characters")]
    PasswordTooShort {
        /// Minimum length.
        min: usize,
    },

    /// A required text field is blank.
    #[error("The {0} field is required")]
    MissingField(&'static str),

    /// Gender is not one of the accepted values.
    #[error("Gender must be either male or female")]
    InvalidGender,

    /// Birth date lies in the future.
    #[error("Birth date can not be in the future")]
    BirthDateInFuture,

    /// Postal code is negative.
    #[error("Enter a valid postal code")]
    InvalidPostalCode,

    /// No account type has this name.
    #[error("Unknown account type '{0}'")]
    UnknownAccountType(String),

    /// The email is already registered.
    #[error("A user with this email already exists")]
    EmailTaken,
}

impl RegistrationError {
    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidEmail => "invalid_email",
            Self::PasswordTooShort { .. } => "password_too_short",
            Self::MissingField(_) => "missing_field",
            Self::InvalidGender => "invalid_gender",
            Self::BirthDateInFuture => "invalid_birth_date",
            Self::InvalidPostalCode => "invalid_postal_code",
            Self::UnknownAccountType(_) => "unknown_account_type",
            Self::EmailTaken => "email_taken",
        }
    }

    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn http_status_code(&self) -> u16 {
        match self {
            Self::EmailTaken => 409,
            _ => 400,
        }
    }
}

/// Address captured at registration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAddress {
    /// Street line.
    pub street_address: String,
    /// City.
    pub city: String,
    /// Postal code.
    pub postal_code: i32,
    /// Country.
    pub country: String,
}

/// Validated registration data, minus the password.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCustomer {
    /// Lower-cased email.
    pub email: String,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Gender.
    pub gender: Gender,
    /// Date of birth.
    pub birth_date: NaiveDate,
    /// Requested account type name.
    pub account_type: String,
    /// Postal address.
    pub address: NewAddress,
}

fn required(value: &str, field: &'static str) -> Result<String, RegistrationError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(RegistrationError::MissingField(field));
    }
    Ok(value.to_string())
}

fn is_plausible_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.contains('@')
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
        && !email.chars().any(char::is_whitespace)
}

/// Validates a registration request against `today`.
///
/// # Errors
///
/// Returns the first `RegistrationError` found.
pub fn validate_registration(
    request: &RegisterRequest,
    today: NaiveDate,
) -> Result<NewCustomer, RegistrationError> {
    let email = request.email.trim().to_lowercase();
    if !is_plausible_email(&email) {
        return Err(RegistrationError::InvalidEmail);
    }
    if request.password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(RegistrationError::PasswordTooShort {
            min: MIN_PASSWORD_LENGTH,
        });
    }

    let first_name = required(&request.first_name, "first_name")?;
    let last_name = required(&request.last_name, "last_name")?;
    let account_type = required(&request.account_type, "account_type")?;
    let gender = Gender::parse(&request.gender).ok_or(RegistrationError::InvalidGender)?;
    if request.birth_date > today {
        return Err(RegistrationError::BirthDateInFuture);
    }
    if request.postal_code < 0 {
        return Err(RegistrationError::InvalidPostalCode);
    }

    Ok(NewCustomer {
        email,
        first_name,
        last_name,
        gender,
        birth_date: request.birth_date,
        account_type,
        address: NewAddress {
            street_address: required(&request.street_address, "street_address")?,
            city: required(&request.city, "city")?,
            postal_code: request.postal_code,
            country: required(&request.country, "country")?,
        },
    })
}

/// Next account number after `highest`, never below `start`.
#[must_use]
pub fn next_account_number(highest: Option<i64>, start: i64) -> i64 {
    highest.map_or(start, |n| n.saturating_add(1).max(start))
}

/// Confirmation shown after a successful registration.
#[must_use]
pub fn registration_message(account_no: i64) -> String {
    format!("Thank You For Creating A Bank Account. Your Account Number is {account_no}.")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> RegisterRequest {
        RegisterRequest {
            email: " Ada@Example.com ".to_string(),
            password: "s3cretpass".to_string(),
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            account_type: "Savings".to_string(),
            gender: "female".to_string(),
            birth_date: NaiveDate::from_ymd_opt(1990, 12, 10).unwrap(),
            street_address: "12 Analytical Row".to_string(),
            city: "London".to_string(),
            postal_code: 10001,
            country: "UK".to_string(),
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
    }

    #[test]
    fn test_valid_request() {
        let customer = validate_registration(&request(), today()).unwrap();
        assert_eq!(customer.email, "ada@example.com");
        assert_eq!(customer.gender, Gender::Female);
        assert_eq!(customer.address.city, "London");
    }

    #[test]
    fn test_rejections() {
        let mut bad = request();
        bad.email = "ada.example.com".to_string();
        assert_eq!(
            validate_registration(&bad, today()),
            Err(RegistrationError::InvalidEmail)
        );

        let mut bad = request();
        bad.password = "short".to_string();
        assert_eq!(
            validate_registration(&bad, today()),
            Err(RegistrationError::PasswordTooShort { min: 8 })
        );

        let mut bad = request();
        bad.gender = "robot".to_string();
        assert_eq!(
            validate_registration(&bad, today()),
            Err(RegistrationError::InvalidGender)
        );

        let mut bad = request();
        bad.birth_date = NaiveDate::from_ymd_opt(2030, 1, 1).unwrap();
        assert_eq!(
            validate_registration(&bad, today()),
            Err(RegistrationError::BirthDateInFuture)
        );

        let mut bad = request();
        bad.city = "  ".to_string();
        assert_eq!(
            validate_registration(&bad, today()),
            Err(RegistrationError::MissingField("city"))
        );
    }

    #[test]
    fn test_email_shapes() {
        assert!(is_plausible_email("a@b.co"));
        assert!(!is_plausible_email("@b.co"));
        assert!(!is_plausible_email("a@b"));
        assert!(!is_plausible_email("a@@b.co"));
        assert!(!is_plausible_email("a b@c.co"));
    }

    #[test]
    fn test_next_account_number() {
        assert_eq!(next_account_number(None, 10_000_000), 10_000_000);
        assert_eq!(next_account_number(Some(10_000_004), 10_000_000), 10_000_005);
        assert_eq!(next_account_number(Some(12), 10_000_000), 10_000_000);
    }

    #[test]
    fn test_registration_message() {
        assert_eq!(
            registration_message(10_000_001),
            "Thank You For Creating A Bank Account. Your Account Number is 10000001."
        );
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(RegistrationError::EmailTaken.http_status_code(), 409);
        assert_eq!(RegistrationError::InvalidGender.http_status_code(), 400);
    }
}
