//! The identity resolver: bearer token to typed principal.
//!
//! Runs once per inbound request on every protected route. The token's
//! is-administrator flag (fixed at issuance) decides which table is
//! consulted; a miss on the flagged table is a hard failure, never a
//! fallback to the other kind.

use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header::AUTHORIZATION, request::Parts},
    middleware::Next,
    response::{IntoResponse, Response},
};

use simpanan_core::authz::{AdminIdentity, MemberIdentity, Principal, Role};
use simpanan_db::{AdministratorRepository, MemberRepository, entities};
use simpanan_shared::{AppError, JwtError};

use crate::AppState;
use crate::response::ApiError;

/// Extracts the bearer token from the Authorization header.
fn extract_bearer_token(header: &str) -> Option<&str> {
    header
        .strip_prefix("Bearer ")
        .or_else(|| header.strip_prefix("bearer "))
}

/// Maps a member row to its gate-facing identity.
pub(crate) fn member_identity(model: entities::members::Model) -> MemberIdentity {
    MemberIdentity {
        id: model.id,
        name: model.display_name,
        phone_number: model.phone_number,
        role: Role::parse(&model.role).unwrap_or(Role::Member),
        group_code: model.group_code,
        is_active: model.is_active,
        registered_at: model.registered_at.to_utc(),
    }
}

/// Maps an administrator row to its gate-facing identity.
pub(crate) fn admin_identity(model: entities::administrators::Model) -> AdminIdentity {
    AdminIdentity {
        id: model.id,
        name: model.display_name,
        email: model.email,
        code_group: model.code_group,
        role: Role::parse(&model.role).unwrap_or(Role::Admin),
        registered_at: model.registered_at.to_utc(),
    }
}

/// Identity-resolver middleware for protected routes.
///
/// On success the resolved [`Principal`] is stored in request extensions
/// for handlers to extract. Read-only: token validity is never mutated.
pub async fn resolve_principal(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let auth_header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok());

    let Some(token) = auth_header.and_then(extract_bearer_token) else {
        return ApiError(AppError::Unauthenticated(
            "bearer token is required".to_string(),
        ))
        .into_response();
    };

    let claims = match state.jwt_service.validate_token(token) {
        Ok(claims) => claims,
        Err(JwtError::Expired) => {
            return ApiError(AppError::Unauthenticated("token has expired".to_string()))
                .into_response();
        }
        Err(_) => {
            return ApiError(AppError::Unauthenticated(
                "invalid or malformed token".to_string(),
            ))
            .into_response();
        }
    };

    let principal = if claims.is_admin() {
        let repo = AdministratorRepository::new((*state.db).clone());
        match repo.find_by_id(claims.principal_id()).await {
            Ok(Some(admin)) => Principal::Admin(admin_identity(admin)),
            // Flagged as admin but the row is gone: hard failure, no
            // fallback to the member table.
            Ok(None) => {
                return ApiError(AppError::PrincipalNotFound(
                    "administrator account no longer exists".to_string(),
                ))
                .into_response();
            }
            Err(e) => return ApiError::from(e).into_response(),
        }
    } else {
        let repo = MemberRepository::new((*state.db).clone());
        match repo.find_by_id(claims.principal_id()).await {
            Ok(Some(member)) => Principal::Member(member_identity(member)),
            Ok(None) => {
                return ApiError(AppError::PrincipalNotFound(
                    "member account no longer exists".to_string(),
                ))
                .into_response();
            }
            Err(e) => return ApiError::from(e).into_response(),
        }
    };

    tracing::debug!(
        principal_id = %principal.effective_id(),
        is_admin = principal.is_admin(),
        "principal resolved"
    );

    request.extensions_mut().insert(principal);
    next.run(request).await
}

/// Extractor for the resolved principal.
///
/// Use this in handlers on protected routes:
///
/// ```ignore
/// async fn handler(CurrentPrincipal(principal): CurrentPrincipal) -> impl IntoResponse {
///     let id = principal.effective_id();
///     // ...
/// }
/// ```
#[derive(Debug, Clone)]
pub struct CurrentPrincipal(pub Principal);

impl<S> FromRequestParts<S> for CurrentPrincipal
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Principal>()
            .cloned()
            .map(CurrentPrincipal)
            .ok_or_else(|| {
                ApiError(AppError::Unauthenticated(
                    "authentication required".to_string(),
                ))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    #[test]
    fn test_extract_bearer_token() {
        assert_eq!(extract_bearer_token("Bearer abc.def.ghi"), Some("abc.def.ghi"));
        assert_eq!(extract_bearer_token("bearer abc"), Some("abc"));
        assert_eq!(extract_bearer_token("Basic abc"), None);
        assert_eq!(extract_bearer_token(""), None);
    }

    #[test]
    fn test_member_identity_mapping() {
        let id = Uuid::new_v4();
        let model = entities::members::Model {
            id,
            display_name: "Siti".to_string(),
            phone_number: "0812345678".to_string(),
            password_hash: "$argon2id$...".to_string(),
            role: "member".to_string(),
            group_code: Some("ARISAN01".to_string()),
            is_active: true,
            registered_at: Utc::now().into(),
        };

        let identity = member_identity(model);
        assert_eq!(identity.id, id);
        assert_eq!(identity.role, Role::Member);
        assert_eq!(identity.group_code.as_deref(), Some("ARISAN01"));
    }

    #[test]
    fn test_admin_identity_mapping() {
        let model = entities::administrators::Model {
            id: Uuid::new_v4(),
            display_name: "Budi".to_string(),
            email: "budi@example.com".to_string(),
            password_hash: "$argon2id$...".to_string(),
            code_group: "ARISAN01".to_string(),
            role: "superadmin".to_string(),
            registered_at: Utc::now().into(),
        };

        let identity = admin_identity(model);
        assert_eq!(identity.role, Role::Superadmin);
        assert_eq!(identity.code_group, "ARISAN01");
    }
}
