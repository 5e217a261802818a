//! Session-stored types for authentication and password recovery.

use serde::{Deserialize, Serialize};

use masoro_core::staff::StaffAccount;
use masoro_core::types::StaffRole;

/// Session-stored staff identity.
///
/// Minimal data stored in the session to identify the logged-in staff
/// member.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentStaff {
    pub username: String,
    pub display_name: String,
    pub role: StaffRole,
}

impl From<&StaffAccount> for CurrentStaff {
    fn from(account: &StaffAccount) -> Self {
        Self {
            username: account.username.clone(),
            display_name: account.display_name(),
            role: account.role,
        }
    }
}

/// Where the visitor currently is in the five-step recovery flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RecoveryStep {
    /// Username accepted; waiting for the matching email or phone.
    Contact,
    /// Contact verified; a six-digit code has been issued.
    Code,
    /// Code verified; waiting for the security answer.
    SecurityQuestion,
    /// Security answer verified; a new password may be set.
    Reset,
}

/// Recovery flow state, held in the session between steps.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecoveryState {
    pub username: String,
    pub step: RecoveryStep,
    /// Six-digit verification code, set once the contact step passes.
    pub code: Option<String>,
}

/// Session keys for admin data.
pub mod keys {
    /// Key for the logged-in staff member.
    pub const CURRENT_STAFF: &str = "current_staff";

    /// Key for in-progress password recovery state.
    pub const RECOVERY: &str = "recovery";
}
