//! Validated input types shared by the JSON API and the HTML forms.

use regex::Regex;
use std::fmt;
use thiserror::Error;

const MAX_EMAIL_LEN: usize = 254;
const MIN_FULL_NAME_CHARS: usize = 2;
const MAX_FULL_NAME_CHARS: usize = 50;
const MAX_ACCOUNT_ID_LEN: usize = 36;
const OTP_CODE_LEN: usize = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FieldError {
    #[error("Invalid email address")]
    Email,
    #[error("Full name must be between 2 and 50 characters")]
    FullName,
    #[error("Invalid account id")]
    AccountId,
    #[error("The code must be 6 letters or digits")]
    OtpCode,
}

/// Basic email format check on already-trimmed input.
fn valid_email(email: &str) -> bool {
    Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").is_ok_and(|regex| regex.is_match(email))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Email(String);

impl Email {
    /// # Errors
    /// Returns [`FieldError::Email`] if the trimmed input is not an address.
    /// Case is kept: user documents are matched on the email exactly as stored.
    pub fn parse(raw: &str) -> Result<Self, FieldError> {
        let email = raw.trim();
        if email.len() > MAX_EMAIL_LEN || !valid_email(email) {
            return Err(FieldError::Email);
        }
        Ok(Self(email.to_string()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FullName(String);

impl FullName {
    /// # Errors
    /// Returns [`FieldError::FullName`] unless the trimmed name has 2 to 50 characters.
    pub fn parse(raw: &str) -> Result<Self, FieldError> {
        let name = raw.trim();
        let chars = name.chars().count();
        if !(MIN_FULL_NAME_CHARS..=MAX_FULL_NAME_CHARS).contains(&chars) {
            return Err(FieldError::FullName);
        }
        Ok(Self(name.to_string()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Provider account id: up to 36 chars of `[A-Za-z0-9._-]`, leading alphanumeric.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountId(String);

impl AccountId {
    /// # Errors
    /// Returns [`FieldError::AccountId`] if the id is empty, too long, or has other characters.
    pub fn parse(raw: &str) -> Result<Self, FieldError> {
        let id = raw.trim();
        let leading_ok = id
            .chars()
            .next()
            .is_some_and(|c| c.is_ascii_alphanumeric());
        let rest_ok = id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'));
        if !leading_ok || !rest_ok || id.len() > MAX_ACCOUNT_ID_LEN {
            return Err(FieldError::AccountId);
        }
        Ok(Self(id.to_string()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The emailed one-time code. Never logged.
#[derive(Clone, PartialEq, Eq)]
pub struct OtpCode(String);

impl OtpCode {
    /// # Errors
    /// Returns [`FieldError::OtpCode`] unless the input is exactly 6 ASCII letters or digits.
    pub fn parse(raw: &str) -> Result<Self, FieldError> {
        let code = raw.trim();
        if code.len() != OTP_CODE_LEN || !code.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(FieldError::OtpCode);
        }
        Ok(Self(code.to_string()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for OtpCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("OtpCode(***)")
    }
}
