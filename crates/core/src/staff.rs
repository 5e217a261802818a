//! Staff accounts for the admin console.
//!
//! Credentials here are mock data: passwords are stored as plain strings
//! and compared verbatim. Real authentication is an explicit non-goal of
//! this system.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::{Email, EmailError, StaffRole};

/// An admin-console account, keyed by username.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StaffAccount {
    pub username: String,
    pub password: String,
    pub email: String,
    pub phone: String,
    pub security_question: String,
    pub security_answer: String,
    pub role: StaffRole,
    pub is_active: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_login: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl StaffAccount {
    /// Display name: "First Last" when set, username otherwise.
    #[must_use]
    pub fn display_name(&self) -> String {
        match (&self.first_name, &self.last_name) {
            (Some(first), Some(last)) => format!("{first} {last}"),
            (Some(first), None) => first.clone(),
            _ => self.username.clone(),
        }
    }

    /// Mock credential check: verbatim comparison, active accounts only.
    #[must_use]
    pub fn credentials_match(&self, password: &str) -> bool {
        self.is_active && self.password == password
    }

    /// Case-insensitive, whitespace-trimmed security-answer check.
    #[must_use]
    pub fn security_answer_matches(&self, answer: &str) -> bool {
        answer.trim().to_lowercase() == self.security_answer.to_lowercase()
    }
}

/// Validation errors for [`StaffDraft`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum StaffError {
    #[error("username is required")]
    EmptyUsername,
    #[error("password must be at least {min} characters")]
    PasswordTooShort { min: usize },
    #[error(transparent)]
    InvalidEmail(#[from] EmailError),
}

/// Untrusted staff form input, validated into a [`StaffAccount`] at the
/// boundary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StaffDraft {
    pub username: String,
    pub password: String,
    pub email: String,
    pub phone: String,
    pub security_question: String,
    pub security_answer: String,
    pub role: StaffRole,
    pub is_active: bool,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

impl StaffDraft {
    /// Minimum password length, matching the recovery flow's rule.
    pub const MIN_PASSWORD_LENGTH: usize = 8;

    /// Check the draft's field constraints.
    ///
    /// # Errors
    ///
    /// Returns the first violated constraint: empty username, a password
    /// under eight characters, or a structurally invalid email.
    pub fn validate(&self) -> Result<(), StaffError> {
        if self.username.trim().is_empty() {
            return Err(StaffError::EmptyUsername);
        }
        if self.password.len() < Self::MIN_PASSWORD_LENGTH {
            return Err(StaffError::PasswordTooShort {
                min: Self::MIN_PASSWORD_LENGTH,
            });
        }
        Email::parse(self.email.trim())?;
        Ok(())
    }

    /// Validate and build a new account.
    ///
    /// # Errors
    ///
    /// See [`StaffDraft::validate`].
    pub fn into_account(self, now: DateTime<Utc>) -> Result<StaffAccount, StaffError> {
        self.validate()?;
        Ok(StaffAccount {
            username: self.username,
            password: self.password,
            email: self.email,
            phone: self.phone,
            security_question: self.security_question,
            security_answer: self.security_answer,
            role: self.role,
            is_active: self.is_active,
            first_name: self.first_name,
            last_name: self.last_name,
            last_login: None,
            created_at: now,
            updated_at: now,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn draft() -> StaffDraft {
        StaffDraft {
            username: "manager1".to_owned(),
            password: "manager123".to_owned(),
            email: "manager@masorokitchen.rw".to_owned(),
            phone: "+250788999888".to_owned(),
            security_question: "What is your favorite food?".to_owned(),
            security_answer: "burger".to_owned(),
            role: StaffRole::Manager,
            is_active: true,
            first_name: Some("John".to_owned()),
            last_name: Some("Manager".to_owned()),
        }
    }

    #[test]
    fn test_draft_valid() {
        let account = draft().into_account(Utc::now()).unwrap();
        assert_eq!(account.display_name(), "John Manager");
        assert!(account.credentials_match("manager123"));
        assert!(!account.credentials_match("wrong"));
    }

    #[test]
    fn test_inactive_account_never_matches() {
        let mut account = draft().into_account(Utc::now()).unwrap();
        account.is_active = false;
        assert!(!account.credentials_match("manager123"));
    }

    #[test]
    fn test_short_password_rejected() {
        let mut d = draft();
        d.password = "short".to_owned();
        assert_eq!(
            d.validate(),
            Err(StaffError::PasswordTooShort { min: 8 })
        );
    }

    #[test]
    fn test_malformed_email_rejected() {
        let mut d = draft();
        d.email = "not-an-address".to_owned();
        assert_eq!(
            d.validate(),
            Err(StaffError::InvalidEmail(EmailError::MissingAtSymbol))
        );
    }

    #[test]
    fn test_security_answer_is_case_insensitive() {
        let account = draft().into_account(Utc::now()).unwrap();
        assert!(account.security_answer_matches("  BURGER "));
        assert!(!account.security_answer_matches("pizza"));
    }
}
