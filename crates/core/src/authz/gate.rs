//! The authorization gate: role and ownership rules.
//!
//! Rule 1: administrators pass every role gate regardless of the allowed
//! role list. "Admin" is a superset-permission kind, not just another
//! role value. This bypass is deliberate and covered by tests.
//!
//! Rule 2: a member passes a role gate only if its stored role is in the
//! allowed set.
//!
//! Rule 3: for resource-scoped operations, a non-admin principal must own
//! the resource (`resource_owner_id == principal.effective_id()`).
//!
//! The gate only ever reports `Forbidden`; missing resources are the
//! resource layer's concern.

use uuid::Uuid;

use simpanan_shared::{AppError, AppResult};

use super::principal::{Principal, Role};

/// Checks a principal against an operation's allowed-role set.
///
/// # Errors
///
/// Returns `AppError::Forbidden` if the principal's role is not allowed.
pub fn authorize_roles(principal: &Principal, allowed: &[Role]) -> AppResult<()> {
    match principal {
        // Rule 1: administrators bypass ordinary role checks.
        Principal::Admin(_) => Ok(()),
        Principal::Member(m) if allowed.contains(&m.role) => Ok(()),
        Principal::Member(_) => Err(AppError::Forbidden(
            "role is not permitted for this operation".to_string(),
        )),
    }
}

/// Checks that a principal owns a resource.
///
/// # Errors
///
/// Returns `AppError::Forbidden` if a non-admin principal does not own
/// the resource. Independent of whether the resource exists.
pub fn check_ownership(principal: &Principal, resource_owner_id: Uuid) -> AppResult<()> {
    match principal {
        Principal::Admin(_) => Ok(()),
        Principal::Member(m) if m.id == resource_owner_id => Ok(()),
        Principal::Member(_) => Err(AppError::Forbidden(
            "resource belongs to another user".to_string(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::authz::principal::{AdminIdentity, MemberIdentity};
    use chrono::Utc;

    fn member(id: Uuid) -> Principal {
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

    fn admin(id: Uuid) -> Principal {
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
    fn test_member_passes_when_role_listed() {
        let p = member(Uuid::new_v4());
        assert!(authorize_roles(&p, &[Role::Member]).is_ok());
    }

    #[test]
    fn test_member_denied_when_role_not_listed() {
        let p = member(Uuid::new_v4());
        let result = authorize_roles(&p, &[Role::Admin, Role::Superadmin]);
        assert!(matches!(result, Err(AppError::Forbidden(_))));
    }

    #[test]
    fn test_admin_bypasses_any_role_list() {
        let p = admin(Uuid::new_v4());
        // Even an empty allowed set lets an administrator through.
        assert!(authorize_roles(&p, &[]).is_ok());
        assert!(authorize_roles(&p, &[Role::Member]).is_ok());
    }

    #[test]
    fn test_owner_passes_ownership() {
        let id = Uuid::new_v4();
        assert!(check_ownership(&member(id), id).is_ok());
    }

    #[test]
    fn test_cross_member_access_is_forbidden() {
        let p = member(Uuid::new_v4());
        let result = check_ownership(&p, Uuid::new_v4());
        assert!(matches!(result, Err(AppError::Forbidden(_))));
    }

    #[test]
    fn test_admin_always_passes_ownership() {
        let p = admin(Uuid::new_v4());
        assert!(check_ownership(&p, Uuid::new_v4()).is_ok());
    }
}
