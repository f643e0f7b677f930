//! The dual-kind principal: administrator or member.

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

/// Role attached to a principal record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Ordinary savings-group member.
    Member,
    /// Group administrator.
    Admin,
    /// Bootstrap administrator.
    Superadmin,
}

impl Role {
    /// Returns the role as its stored string value.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Member => "member",
            Self::Admin => "admin",
            Self::Superadmin => "superadmin",
        }
    }

    /// Parses a stored role string.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "member" => Some(Self::Member),
            "admin" => Some(Self::Admin),
            "superadmin" => Some(Self::Superadmin),
            _ => None,
        }
    }
}

/// Resolved member record, as seen by the authorization gate.
#[derive(Debug, Clone)]
pub struct MemberIdentity {
    /// Member ID.
    pub id: Uuid,
    /// Display name.
    pub name: String,
    /// Phone number.
    pub phone_number: String,
    /// Stored role (always `Role::Member` in normal data).
    pub role: Role,
    /// Joined group code, if any.
    pub group_code: Option<String>,
    /// Whether the account is active.
    pub is_active: bool,
    /// Registration timestamp.
    pub registered_at: DateTime<Utc>,
}

/// Resolved administrator record, as seen by the authorization gate.
#[derive(Debug, Clone)]
pub struct AdminIdentity {
    /// Administrator ID.
    pub id: Uuid,
    /// Display name.
    pub name: String,
    /// Email.
    pub email: String,
    /// Shareable group join code.
    pub code_group: String,
    /// Stored role ("admin" or "superadmin").
    pub role: Role,
    /// Registration timestamp.
    pub registered_at: DateTime<Utc>,
}

/// An authenticated actor: exactly one of the two principal kinds.
///
/// The two kinds live in disjoint tables; there is no shared user table.
/// Authorization sites pattern-match exhaustively on this enum instead of
/// probing for fields.
#[derive(Debug, Clone)]
pub enum Principal {
    /// An administrator.
    Admin(AdminIdentity),
    /// A member.
    Member(MemberIdentity),
}

impl Principal {
    /// The id used for ownership checks on this request.
    ///
    /// An administrator's effective id is the administrator's own id, not
    /// a member id: administrators contribute and borrow in their own
    /// right.
    #[must_use]
    pub const fn effective_id(&self) -> Uuid {
        match self {
            Self::Admin(a) => a.id,
            Self::Member(m) => m.id,
        }
    }

    /// Whether this principal is an administrator.
    #[must_use]
    pub const fn is_admin(&self) -> bool {
        matches!(self, Self::Admin(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    pub(crate) fn member(id: Uuid) -> Principal {
        Principal::Member(MemberIdentity {
            id,
            name: "Siti".to_string(),
            phone_number: "0812345678".to_string(),
            role: Role::Member,
            group_code: None,
            is_active: true,
            registered_at: Utc::now(),
        })
    }

    pub(crate) fn admin(id: Uuid) -> Principal {
        Principal::Admin(AdminIdentity {
            id,
            name: "Budi".to_string(),
            email: "budi@example.com".to_string(),
            code_group: "ARISAN01".to_string(),
            role: Role::Admin,
            registered_at: Utc::now(),
        })
    }

    #[test]
    fn test_role_round_trip() {
        for role in [Role::Member, Role::Admin, Role::Superadmin] {
            assert_eq!(Role::parse(role.as_str()), Some(role));
        }
        assert_eq!(Role::parse("owner"), None);
    }

    #[test]
    fn test_admin_effective_id_is_its_own() {
        let id = Uuid::new_v4();
        assert_eq!(admin(id).effective_id(), id);
    }

    #[test]
    fn test_member_effective_id() {
        let id = Uuid::new_v4();
        let p = member(id);
        assert_eq!(p.effective_id(), id);
        assert!(!p.is_admin());
    }
}
