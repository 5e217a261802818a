//! Login, logout, and password recovery route handlers.
//!
//! Credentials are checked verbatim against the staff store; this is
//! mock authentication over mock data. The recovery flow walks five
//! steps, with progress held in the session.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use crate::error::Result;
use crate::filters;
use crate::middleware::{clear_current_staff, set_current_staff};
use crate::models::{CurrentStaff, RecoveryState, RecoveryStep, session_keys};
use crate::services::recovery;
use crate::state::AppState;
use crate::store::AdminStore;

/// Login page template.
#[derive(Template, WebTemplate)]
#[template(path = "auth/login.html")]
pub struct LoginTemplate {
    pub error: Option<String>,
}

/// Recovery page template. `step` controls which form is shown.
#[derive(Template, WebTemplate)]
#[template(path = "auth/recovery.html")]
pub struct RecoveryTemplate {
    pub step: &'static str,
    pub security_question: Option<String>,
    pub error: Option<String>,
}

impl RecoveryTemplate {
    fn for_state(state: Option<&RecoveryState>, error: Option<String>) -> Self {
        let step = match state.map(|s| s.step) {
            None => "username",
            Some(RecoveryStep::Contact) => "contact",
            Some(RecoveryStep::Code) => "code",
            Some(RecoveryStep::SecurityQuestion) => "security",
            Some(RecoveryStep::Reset) => "reset",
        };
        Self {
            step,
            security_question: None,
            error,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct UsernameForm {
    pub username: String,
}

#[derive(Debug, Deserialize)]
pub struct ContactForm {
    pub contact: String,
}

#[derive(Debug, Deserialize)]
pub struct CodeForm {
    pub code: String,
}

#[derive(Debug, Deserialize)]
pub struct AnswerForm {
    pub answer: String,
}

#[derive(Debug, Deserialize)]
pub struct ResetForm {
    pub password: String,
    pub confirm: String,
}

/// Render the login page.
#[instrument]
pub async fn login_page() -> LoginTemplate {
    LoginTemplate { error: None }
}

/// Check credentials and open a session.
#[instrument(skip(state, session, form))]
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<LoginForm>,
) -> Result<Response> {
    let account = state.store().staff_by_username(form.username.trim());
    let Some(account) = account.filter(|a| a.credentials_match(&form.password)) else {
        tracing::warn!(username = %form.username, "Failed login attempt");
        return Ok(LoginTemplate {
            error: Some("Invalid username or password".to_owned()),
        }
        .into_response());
    };

    state.store().record_login(&account.username);
    set_current_staff(&session, &CurrentStaff::from(&account)).await?;
    tracing::info!(username = %account.username, "Staff login");

    Ok(Redirect::to("/").into_response())
}

/// Close the session.
#[instrument(skip(session))]
pub async fn logout(session: Session) -> Result<Redirect> {
    clear_current_staff(&session).await?;
    Ok(Redirect::to("/login"))
}

// =============================================================================
// Password Recovery
// =============================================================================

async fn recovery_state(session: &Session) -> Result<Option<RecoveryState>> {
    Ok(session.get::<RecoveryState>(session_keys::RECOVERY).await?)
}

/// The security question to show, when the flow is on that step.
fn security_question_for(store: &AdminStore, state: &RecoveryState) -> Option<String> {
    if state.step != RecoveryStep::SecurityQuestion {
        return None;
    }
    store
        .staff_by_username(&state.username)
        .map(|a| a.security_question)
}

async fn save_recovery_state(session: &Session, state: &RecoveryState) -> Result<()> {
    session.insert(session_keys::RECOVERY, state).await?;
    Ok(())
}

/// Show the recovery page at whatever step the session is on.
#[instrument(skip(state, session))]
pub async fn recovery_page(
    State(state): State<AppState>,
    session: Session,
) -> Result<RecoveryTemplate> {
    let current = recovery_state(&session).await?;
    let mut template = RecoveryTemplate::for_state(current.as_ref(), None);
    // A reload on the security step still needs the question text.
    if let Some(pending) = current.as_ref() {
        template.security_question = security_question_for(state.store(), pending);
    }
    Ok(template)
}

/// Step one: submit a username.
#[instrument(skip(state, session, form))]
pub async fn recovery_start(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<UsernameForm>,
) -> Result<RecoveryTemplate> {
    match recovery::start(state.store(), &form.username) {
        Ok(next) => {
            save_recovery_state(&session, &next).await?;
            Ok(RecoveryTemplate::for_state(Some(&next), None))
        }
        Err(e) => Ok(RecoveryTemplate::for_state(None, Some(e.to_string()))),
    }
}

/// Step two: submit the matching email or phone.
#[instrument(skip(state, session, form))]
pub async fn recovery_contact(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<ContactForm>,
) -> Result<RecoveryTemplate> {
    let Some(current) = recovery_state(&session).await? else {
        return Ok(RecoveryTemplate::for_state(None, None));
    };
    match recovery::verify_contact(state.store(), &current, &form.contact) {
        Ok(next) => {
            save_recovery_state(&session, &next).await?;
            Ok(RecoveryTemplate::for_state(Some(&next), None))
        }
        Err(e) => Ok(RecoveryTemplate::for_state(
            Some(&current),
            Some(e.to_string()),
        )),
    }
}

/// Step three: submit the six-digit code.
#[instrument(skip(state, session, form))]
pub async fn recovery_code(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<CodeForm>,
) -> Result<RecoveryTemplate> {
    let Some(current) = recovery_state(&session).await? else {
        return Ok(RecoveryTemplate::for_state(None, None));
    };
    match recovery::verify_code(&current, &form.code) {
        Ok(next) => {
            save_recovery_state(&session, &next).await?;
            let mut template = RecoveryTemplate::for_state(Some(&next), None);
            template.security_question = security_question_for(state.store(), &next);
            Ok(template)
        }
        Err(e) => Ok(RecoveryTemplate::for_state(
            Some(&current),
            Some(e.to_string()),
        )),
    }
}

/// Step four: submit the security answer.
#[instrument(skip(state, session, form))]
pub async fn recovery_security(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<AnswerForm>,
) -> Result<RecoveryTemplate> {
    let Some(current) = recovery_state(&session).await? else {
        return Ok(RecoveryTemplate::for_state(None, None));
    };
    match recovery::verify_security_answer(state.store(), &current, &form.answer) {
        Ok(next) => {
            save_recovery_state(&session, &next).await?;
            Ok(RecoveryTemplate::for_state(Some(&next), None))
        }
        Err(e) => {
            let mut template =
                RecoveryTemplate::for_state(Some(&current), Some(e.to_string()));
            template.security_question = security_question_for(state.store(), &current);
            Ok(template)
        }
    }
}

/// Step five: submit the new password, then return to login.
#[instrument(skip(state, session, form))]
pub async fn recovery_reset(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<ResetForm>,
) -> Result<Response> {
    let Some(current) = recovery_state(&session).await? else {
        return Ok(RecoveryTemplate::for_state(None, None).into_response());
    };
    match recovery::reset_password(state.store(), &current, &form.password, &form.confirm) {
        Ok(()) => {
            session
                .remove::<RecoveryState>(session_keys::RECOVERY)
                .await?;
            Ok(Redirect::to("/login").into_response())
        }
        Err(e) => Ok(RecoveryTemplate::for_state(Some(&current), Some(e.to_string()))
            .into_response()),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_security_question_shown_on_security_step() {
        let store = AdminStore::from_seed();
        let state = RecoveryState {
            username: "diane".to_owned(),
            step: RecoveryStep::SecurityQuestion,
            code: None,
        };
        let question = security_question_for(&store, &state).unwrap();
        assert!(!question.is_empty());
    }

    #[test]
    fn test_security_question_hidden_on_other_steps() {
        let store = AdminStore::from_seed();
        let state = RecoveryState {
            username: "diane".to_owned(),
            step: RecoveryStep::Contact,
            code: None,
        };
        assert_eq!(security_question_for(&store, &state), None);
    }
}
