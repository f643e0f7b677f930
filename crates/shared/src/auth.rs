//! Authentication types: JWT claims and auth payloads.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// JWT claims carried by every issued token.
///
/// The `adm` flag is fixed at issuance time and decides which principal
/// table the identity resolver consults. It is never treated as a
/// fallback hint: a missing administrator row is a hard failure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (principal ID).
    pub sub: Uuid,
    /// Whether the subject is an administrator.
    pub adm: bool,
    /// Issued at timestamp.
    pub iat: i64,
    /// Expiration timestamp.
    pub exp: i64,
}

impl Claims {
    /// Creates new claims for a principal.
    #[must_use]
    pub fn new(principal_id: Uuid, is_admin: bool, expires_at: DateTime<Utc>) -> Self {
        let now = Utc::now();
        Self {
            sub: principal_id,
            adm: is_admin,
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
        }
    }

    /// Returns the principal ID from claims.
    #[must_use]
    pub const fn principal_id(&self) -> Uuid {
        self.sub
    }

    /// Returns whether the token was issued to an administrator.
    #[must_use]
    pub const fn is_admin(&self) -> bool {
        self.adm
    }
}

/// Member self-registration payload.
#[derive(Debug, Clone, Deserialize)]
pub struct RegisterRequest {
    /// Display name.
    pub name: String,
    /// Phone number (10 digits, "08" prefix).
    #[serde(rename = "phoneNumber")]
    pub phone_number: String,
    /// 4-digit PIN.
    pub password: String,
}

/// Member login payload.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    /// Phone number.
    #[serde(rename = "phoneNumber")]
    pub phone_number: String,
    /// 4-digit PIN.
    pub password: String,
}

/// Administrator login payload.
#[derive(Debug, Clone, Deserialize)]
pub struct AdminLoginRequest {
    /// Administrator email.
    pub email: String,
    /// 4-digit PIN.
    pub password: String,
}

/// Administrator self-registration payload.
#[derive(Debug, Clone, Deserialize)]
pub struct AdminRegisterRequest {
    /// Display name.
    pub name: String,
    /// Administrator email.
    pub email: String,
    /// 4-digit PIN.
    pub password: String,
    /// Shareable join code for the administrator's group.
    pub code_group: String,
}

/// Pre-registration dedup check payload.
#[derive(Debug, Clone, Deserialize)]
pub struct CheckUserRequest {
    /// Phone number to check.
    #[serde(rename = "phoneNumber")]
    pub phone_number: String,
}

/// Join-group payload.
#[derive(Debug, Clone, Deserialize)]
pub struct JoinGroupRequest {
    /// The administrator's shareable group code.
    pub code_group: String,
}

/// Activation toggle payload.
#[derive(Debug, Clone, Deserialize)]
pub struct SetActiveRequest {
    /// Whether the member account should be active.
    #[serde(rename = "isActive")]
    pub is_active: bool,
}

/// Member public profile returned in auth responses.
#[derive(Debug, Clone, Serialize)]
pub struct MemberProfile {
    /// Member ID.
    pub id: Uuid,
    /// Display name.
    pub name: String,
    /// Phone number.
    pub phone_number: String,
    /// Role (always "member").
    pub role: String,
    /// Joined group code, if any.
    pub group_code: Option<String>,
    /// Whether the account is active.
    pub is_active: bool,
    /// Registration timestamp.
    pub registered_at: DateTime<Utc>,
}

/// Administrator public profile returned in auth responses.
#[derive(Debug, Clone, Serialize)]
pub struct AdminProfile {
    /// Administrator ID.
    pub id: Uuid,
    /// Display name.
    pub name: String,
    /// Email.
    pub email: String,
    /// Role ("admin" or "superadmin").
    pub role: String,
    /// Shareable group join code.
    pub code_group: String,
    /// Registration timestamp.
    pub registered_at: DateTime<Utc>,
}

/// Successful member auth response data.
#[derive(Debug, Clone, Serialize)]
pub struct MemberAuthData {
    /// Authenticated member profile.
    pub user: MemberProfile,
    /// Bearer token.
    pub token: String,
}

/// Successful administrator auth response data.
#[derive(Debug, Clone, Serialize)]
pub struct AdminAuthData {
    /// Authenticated administrator profile.
    pub admin: AdminProfile,
    /// Bearer token.
    pub token: String,
}
