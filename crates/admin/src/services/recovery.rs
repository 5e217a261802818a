//! Five-step password recovery flow.
//!
//! Steps: username, contact (email or phone), six-digit code, security
//! question, new password. Progress is held in the session as a
//! [`RecoveryState`]; every step checks it is being called in order, so
//! a client cannot skip ahead by posting to a later endpoint.
//!
//! The verification code is mock-delivered: it is written to the log
//! instead of being sent anywhere. Real delivery is out of scope.

use rand::Rng;
use thiserror::Error;

use masoro_core::staff::StaffDraft;

use crate::models::{RecoveryState, RecoveryStep};
use crate::store::{AdminStore, StoreError};

/// Recovery flow errors. Messages are shown to the visitor as-is.
#[derive(Debug, Error)]
pub enum RecoveryError {
    #[error("no active account with that username")]
    UnknownAccount,

    #[error("that step is not available yet")]
    WrongStep,

    #[error("the email or phone does not match our records")]
    ContactMismatch,

    #[error("incorrect verification code")]
    WrongCode,

    #[error("incorrect answer to the security question")]
    WrongAnswer,

    #[error("password must be at least {min} characters")]
    PasswordTooShort { min: usize },

    #[error("passwords do not match")]
    PasswordMismatch,

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Step one: accept a username and open a recovery flow.
///
/// # Errors
///
/// Returns `UnknownAccount` when no active account has that username.
/// Inactive accounts are treated the same as missing ones.
pub fn start(store: &AdminStore, username: &str) -> Result<RecoveryState, RecoveryError> {
    let account = store
        .staff_by_username(username.trim())
        .filter(|a| a.is_active)
        .ok_or(RecoveryError::UnknownAccount)?;

    Ok(RecoveryState {
        username: account.username,
        step: RecoveryStep::Contact,
        code: None,
    })
}

/// Step two: verify the contact and issue a verification code.
///
/// The submitted value must match the account's email (case-insensitive)
/// or phone number exactly. On success a six-digit code is generated and
/// written to the log; the flow advances to the code step.
///
/// # Errors
///
/// Returns `WrongStep` when called out of order, `UnknownAccount` when
/// the account has disappeared mid-flow, or `ContactMismatch`.
pub fn verify_contact(
    store: &AdminStore,
    state: &RecoveryState,
    contact: &str,
) -> Result<RecoveryState, RecoveryError> {
    if state.step != RecoveryStep::Contact {
        return Err(RecoveryError::WrongStep);
    }
    let account = store
        .staff_by_username(&state.username)
        .ok_or(RecoveryError::UnknownAccount)?;

    let contact = contact.trim();
    let matches_email = contact.eq_ignore_ascii_case(&account.email);
    let matches_phone = contact == account.phone;
    if !matches_email && !matches_phone {
        return Err(RecoveryError::ContactMismatch);
    }

    let code = generate_code();
    // Mock delivery: the code goes to the log, not to the contact.
    tracing::info!(username = %state.username, code, "Recovery code issued");

    Ok(RecoveryState {
        username: state.username.clone(),
        step: RecoveryStep::Code,
        code: Some(code),
    })
}

/// Step three: check the six-digit code.
///
/// # Errors
///
/// Returns `WrongStep` when called out of order, or `WrongCode`.
pub fn verify_code(state: &RecoveryState, submitted: &str) -> Result<RecoveryState, RecoveryError> {
    if state.step != RecoveryStep::Code {
        return Err(RecoveryError::WrongStep);
    }
    let expected = state.code.as_deref().ok_or(RecoveryError::WrongStep)?;
    if submitted.trim() != expected {
        return Err(RecoveryError::WrongCode);
    }

    Ok(RecoveryState {
        username: state.username.clone(),
        step: RecoveryStep::SecurityQuestion,
        code: None,
    })
}

/// Step four: check the security answer.
///
/// # Errors
///
/// Returns `WrongStep` when called out of order, `UnknownAccount` when
/// the account has disappeared mid-flow, or `WrongAnswer`.
pub fn verify_security_answer(
    store: &AdminStore,
    state: &RecoveryState,
    answer: &str,
) -> Result<RecoveryState, RecoveryError> {
    if state.step != RecoveryStep::SecurityQuestion {
        return Err(RecoveryError::WrongStep);
    }
    let account = store
        .staff_by_username(&state.username)
        .ok_or(RecoveryError::UnknownAccount)?;

    if !account.security_answer_matches(answer) {
        return Err(RecoveryError::WrongAnswer);
    }

    Ok(RecoveryState {
        username: state.username.clone(),
        step: RecoveryStep::Reset,
        code: None,
    })
}

/// Step five: set the new password and close the flow.
///
/// # Errors
///
/// Returns `WrongStep` when called out of order, `PasswordTooShort`,
/// `PasswordMismatch`, or a store error when the account has vanished.
pub fn reset_password(
    store: &AdminStore,
    state: &RecoveryState,
    password: &str,
    confirm: &str,
) -> Result<(), RecoveryError> {
    if state.step != RecoveryStep::Reset {
        return Err(RecoveryError::WrongStep);
    }
    if password.len() < StaffDraft::MIN_PASSWORD_LENGTH {
        return Err(RecoveryError::PasswordTooShort {
            min: StaffDraft::MIN_PASSWORD_LENGTH,
        });
    }
    if password != confirm {
        return Err(RecoveryError::PasswordMismatch);
    }

    store.reset_password(&state.username, password.to_owned())?;
    tracing::info!(username = %state.username, "Password reset via recovery flow");
    Ok(())
}

/// Generate a six-digit numeric code, zero-padded.
fn generate_code() -> String {
    let n: u32 = rand::rng().random_range(0..1_000_000);
    format!("{n:06}")
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    // Seed accounts: diane (admin) and manager1 (manager), both active.

    fn advance_to_code(store: &AdminStore) -> RecoveryState {
        let state = start(store, "diane").unwrap();
        verify_contact(store, &state, "diane@masorokitchen.rw").unwrap()
    }

    #[test]
    fn test_start_unknown_username() {
        let store = AdminStore::from_seed();
        assert!(matches!(
            start(&store, "nobody"),
            Err(RecoveryError::UnknownAccount)
        ));
    }

    #[test]
    fn test_contact_must_match() {
        let store = AdminStore::from_seed();
        let state = start(&store, "diane").unwrap();
        assert!(matches!(
            verify_contact(&store, &state, "wrong@example.org"),
            Err(RecoveryError::ContactMismatch)
        ));
    }

    #[test]
    fn test_contact_email_case_insensitive() {
        let store = AdminStore::from_seed();
        let state = start(&store, "diane").unwrap();
        let next = verify_contact(&store, &state, "DIANE@masorokitchen.rw").unwrap();
        assert_eq!(next.step, RecoveryStep::Code);
        assert_eq!(next.code.as_ref().unwrap().len(), 6);
    }

    #[test]
    fn test_wrong_code_rejected() {
        let store = AdminStore::from_seed();
        let state = advance_to_code(&store);
        assert!(matches!(
            verify_code(&state, "000000x"),
            Err(RecoveryError::WrongCode)
        ));
    }

    #[test]
    fn test_steps_cannot_be_skipped() {
        let store = AdminStore::from_seed();
        let state = start(&store, "diane").unwrap();
        // Still on the contact step; code and reset must refuse.
        assert!(matches!(
            verify_code(&state, "123456"),
            Err(RecoveryError::WrongStep)
        ));
        assert!(matches!(
            reset_password(&store, &state, "newpassword", "newpassword"),
            Err(RecoveryError::WrongStep)
        ));
    }

    #[test]
    fn test_full_flow_resets_password() {
        let store = AdminStore::from_seed();
        let state = advance_to_code(&store);
        let code = state.code.clone().unwrap();

        let state = verify_code(&state, &code).unwrap();
        let state = verify_security_answer(&store, &state, "  MASORO Kitchen ").unwrap();
        assert_eq!(state.step, RecoveryStep::Reset);

        reset_password(&store, &state, "fresh-password-1", "fresh-password-1").unwrap();
        let account = store.staff_by_username("diane").unwrap();
        assert!(account.credentials_match("fresh-password-1"));
    }

    #[test]
    fn test_reset_validates_password() {
        let store = AdminStore::from_seed();
        let state = RecoveryState {
            username: "diane".to_owned(),
            step: RecoveryStep::Reset,
            code: None,
        };
        assert!(matches!(
            reset_password(&store, &state, "short", "short"),
            Err(RecoveryError::PasswordTooShort { min: 8 })
        ));
        assert!(matches!(
            reset_password(&store, &state, "longenough", "different"),
            Err(RecoveryError::PasswordMismatch)
        ));
    }
}
