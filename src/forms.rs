//! Client-side validation for the forms that precede a mutation
//!
//! Every form turns into a request payload through `validate()`. An invalid form
//! yields [`ValidationErrors`] and nothing is sent.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use std::fmt;
use thiserror::Error;

use crate::auth::{LoginRequest, RegisterRequest};
use crate::designers::NewDesigner;
use crate::fetch::Upload;

/// Minimum password length accepted at registration and reset
pub const MIN_PASSWORD_LEN: usize = 8;

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        r"^[A-Za-z0-9.!#$%&'*+/=?^_`{|}~-]+",
        r"@[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?",
        r"(?:\.[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?)*$",
    ))
    .expect("email pattern is valid")
});

/// Whether `value` looks like an email address
pub fn is_email(value: &str) -> bool {
    EMAIL_RE.is_match(value.trim())
}

/// A single failed rule
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{0} is required")]
    Required(&'static str),

    #[error("{0} is not a valid email address")]
    InvalidEmail(&'static str),

    #[error("{field} must be at least {min} characters")]
    TooShort { field: &'static str, min: usize },

    #[error("{field} does not match {other}")]
    Mismatch {
        field: &'static str,
        other: &'static str,
    },

    #[error("consent to data processing is required")]
    ConsentRequired,

    #[error("end date is before start date")]
    InvalidDateRange,

    #[error("{file} is larger than {max_bytes} bytes")]
    FileTooLarge { file: String, max_bytes: usize },

    #[error("at most {max} major works are allowed")]
    TooManyWorks { max: usize },

    #[error("unknown filter category `{0}`")]
    UnknownCategory(String),
}

/// Every rule a form failed
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ValidationErrors(pub Vec<ValidationError>);

impl std::error::Error for ValidationErrors {}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let messages: Vec<String> = self.0.iter().map(ToString::to_string).collect();
        write!(f, "{}", messages.join("; "))
    }
}

impl From<Vec<ValidationError>> for ValidationErrors {
    fn from(errors: Vec<ValidationError>) -> Self {
        Self(errors)
    }
}

impl From<ValidationError> for ValidationErrors {
    fn from(error: ValidationError) -> Self {
        Self(vec![error])
    }
}

impl ValidationErrors {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, error: &ValidationError) -> bool {
        self.0.contains(error)
    }

    fn into_result(self) -> Result<(), ValidationErrors> {
        if self.0.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

fn required(errors: &mut Vec<ValidationError>, field: &'static str, value: &str) {
    if value.trim().is_empty() {
        errors.push(ValidationError::Required(field));
    }
}

fn email(errors: &mut Vec<ValidationError>, field: &'static str, value: &str) {
    if value.trim().is_empty() {
        errors.push(ValidationError::Required(field));
    } else if !is_email(value) {
        errors.push(ValidationError::InvalidEmail(field));
    }
}

fn password(errors: &mut Vec<ValidationError>, field: &'static str, value: &str) {
    if value.is_empty() {
        errors.push(ValidationError::Required(field));
    } else if value.chars().count() < MIN_PASSWORD_LEN {
        errors.push(ValidationError::TooShort {
            field,
            min: MIN_PASSWORD_LEN,
        });
    }
}

/// Login form
#[derive(Debug, Clone, Default)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

impl LoginForm {
    pub fn validate(&self) -> Result<LoginRequest, ValidationErrors> {
        let mut errors = Vec::new();
        email(&mut errors, "email", &self.email);
        if self.password.is_empty() {
            errors.push(ValidationError::Required("password"));
        }
        ValidationErrors(errors).into_result()?;

        Ok(LoginRequest {
            email: self.email.trim().to_string(),
            password: self.password.clone(),
        })
    }
}

/// Registration form
#[derive(Debug, Clone, Default)]
pub struct RegisterForm {
    pub email: String,
    pub email_confirmation: String,
    pub firstname: String,
    pub lastname: String,
    pub password: String,
    pub password_confirmation: String,
    pub data_consent: bool,
}

impl RegisterForm {
    pub fn validate(&self) -> Result<RegisterRequest, ValidationErrors> {
        let mut errors = Vec::new();
        email(&mut errors, "email", &self.email);
        email(&mut errors, "email confirmation", &self.email_confirmation);
        if !self.email_confirmation.trim().is_empty()
            && self.email.trim() != self.email_confirmation.trim()
        {
            errors.push(ValidationError::Mismatch {
                field: "email confirmation",
                other: "email",
            });
        }
        required(&mut errors, "firstname", &self.firstname);
        required(&mut errors, "lastname", &self.lastname);
        password(&mut errors, "password", &self.password);
        if self.password_confirmation.is_empty() {
            errors.push(ValidationError::Required("password confirmation"));
        } else if self.password != self.password_confirmation {
            errors.push(ValidationError::Mismatch {
                field: "password confirmation",
                other: "password",
            });
        }
        if !self.data_consent {
            errors.push(ValidationError::ConsentRequired);
        }
        ValidationErrors(errors).into_result()?;

        Ok(RegisterRequest {
            email: self.email.trim().to_string(),
            password: self.password.clone(),
            firstname: self.firstname.trim().to_string(),
            lastname: self.lastname.trim().to_string(),
            admin: false,
        })
    }
}

/// Support/contact message
#[derive(Debug, Clone, Default, Serialize)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

impl ContactForm {
    pub fn validate(&self) -> Result<ContactForm, ValidationErrors> {
        let mut errors = Vec::new();
        required(&mut errors, "name", &self.name);
        email(&mut errors, "email", &self.email);
        required(&mut errors, "subject", &self.subject);
        required(&mut errors, "message", &self.message);
        ValidationErrors(errors).into_result()?;

        Ok(ContactForm {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            subject: self.subject.trim().to_string(),
            message: self.message.trim().to_string(),
        })
    }
}

/// New password chosen from a reset link
#[derive(Debug, Clone, Default)]
pub struct PasswordResetForm {
    pub token: String,
    pub password: String,
    pub password_confirmation: String,
}

impl PasswordResetForm {
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = Vec::new();
        required(&mut errors, "token", &self.token);
        password(&mut errors, "password", &self.password);
        if self.password != self.password_confirmation {
            errors.push(ValidationError::Mismatch {
                field: "password confirmation",
                other: "password",
            });
        }
        ValidationErrors(errors).into_result()
    }
}

/// Designer profile created by an administrator
#[derive(Debug, Clone, Default)]
pub struct NewDesignerForm {
    pub firstname: String,
    pub lastname: String,
    pub profession: String,
    pub specialties: Vec<String>,
    pub spheres_of_influence: Vec<String>,
    pub favorite_sectors: Vec<String>,
    pub country_of_residence: String,
}

impl NewDesignerForm {
    pub fn validate(&self) -> Result<NewDesigner, ValidationErrors> {
        let mut errors = Vec::new();
        required(&mut errors, "firstname", &self.firstname);
        required(&mut errors, "lastname", &self.lastname);
        required(&mut errors, "profession", &self.profession);
        if self.specialties.is_empty() {
            errors.push(ValidationError::Required("specialties"));
        }
        if self.spheres_of_influence.is_empty() {
            errors.push(ValidationError::Required("spheres of influence"));
        }
        if self.favorite_sectors.is_empty() {
            errors.push(ValidationError::Required("favorite sectors"));
        }
        required(&mut errors, "country of residence", &self.country_of_residence);
        ValidationErrors(errors).into_result()?;

        Ok(NewDesigner {
            firstname: self.firstname.trim().to_string(),
            lastname: self.lastname.trim().to_string(),
            profession: self.profession.trim().to_string(),
            specialties: self.specialties.clone(),
            spheres_of_influence: self.spheres_of_influence.clone(),
            favorite_sectors: self.favorite_sectors.clone(),
            country_of_residence: capitalize_country(&self.country_of_residence),
        })
    }
}

/// "fRANCE" -> "France"; "USA" is kept as is
pub fn capitalize_country(country: &str) -> String {
    let country = country.trim();
    if country == "USA" {
        return country.to_string();
    }
    let mut chars = country.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

/// Check each upload against the size limit
pub fn check_uploads(uploads: &[Upload], max_bytes: usize) -> Result<(), ValidationErrors> {
    let errors: Vec<ValidationError> = uploads
        .iter()
        .filter(|upload| upload.len() > max_bytes)
        .map(|upload| ValidationError::FileTooLarge {
            file: upload.file_name.clone(),
            max_bytes,
        })
        .collect();
    ValidationErrors(errors).into_result()
}
