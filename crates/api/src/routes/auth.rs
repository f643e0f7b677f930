//! Authentication routes: registration, login, and identity lookup.

use axum::{Json, Router, extract::State, response::Response, routing::get, routing::post};
use serde_json::json;
use tracing::info;

use simpanan_core::auth::{hash_password, validate_phone_number, validate_pin, verify_password};
use simpanan_core::authz::Principal;
use simpanan_db::{AdministratorRepository, MemberRepository, entities, is_unique_violation};
use simpanan_shared::AppError;
use simpanan_shared::auth::{
    AdminAuthData, AdminLoginRequest, AdminProfile, AdminRegisterRequest, CheckUserRequest,
    LoginRequest, MemberAuthData, MemberProfile, RegisterRequest,
};

use crate::AppState;
use crate::middleware::CurrentPrincipal;
use crate::response::{ApiError, ApiResult, created, ok};

/// Creates the public auth router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
        .route("/auth/admin-login", post(admin_login))
        .route("/auth/admin-register", post(admin_register))
        .route("/auth/check-user", post(check_user))
}

/// Creates the authenticated auth router.
pub fn protected_routes() -> Router<AppState> {
    Router::new().route("/auth/me", get(me))
}

/// Maps a member row to its public profile.
pub(crate) fn member_profile(model: entities::members::Model) -> MemberProfile {
    MemberProfile {
        id: model.id,
        name: model.display_name,
        phone_number: model.phone_number,
        role: model.role,
        group_code: model.group_code,
        is_active: model.is_active,
        registered_at: model.registered_at.to_utc(),
    }
}

/// Maps an administrator row to its public profile.
pub(crate) fn admin_profile(model: entities::administrators::Model) -> AdminProfile {
    AdminProfile {
        id: model.id,
        name: model.display_name,
        email: model.email,
        role: model.role,
        code_group: model.code_group,
        registered_at: model.registered_at.to_utc(),
    }
}

/// POST /auth/register - Register a new member.
async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> ApiResult<Response> {
    validate_phone_number(&payload.phone_number).map_err(ApiError)?;
    validate_pin(&payload.password).map_err(ApiError)?;

    let repo = MemberRepository::new((*state.db).clone());

    // The unique constraint is the real gate; this check just produces a
    // friendlier error for the common case.
    if repo.phone_exists(&payload.phone_number).await? {
        return Err(ApiError(AppError::Conflict(
            "an account with this phone number already exists".to_string(),
        )));
    }

    let password_hash = hash_password(&payload.password)
        .map_err(|e| ApiError(AppError::Internal(e.to_string())))?;

    let member = repo
        .create(&payload.name, &payload.phone_number, &password_hash)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                ApiError(AppError::Conflict(
                    "an account with this phone number already exists".to_string(),
                ))
            } else {
                ApiError::from(e)
            }
        })?;

    let token = state
        .jwt_service
        .issue_token(member.id, false)
        .map_err(|e| ApiError(AppError::Internal(e.to_string())))?;

    info!(member_id = %member.id, "new member registered");

    Ok(created(MemberAuthData {
        user: member_profile(member),
        token,
    }))
}

/// POST /auth/login - Authenticate a member by phone number and PIN.
async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> ApiResult<Response> {
    let repo = MemberRepository::new((*state.db).clone());

    let Some(member) = repo.find_by_phone(&payload.phone_number).await? else {
        info!(phone = %payload.phone_number, "login attempt for unknown phone number");
        return Err(invalid_credentials());
    };

    if !member.is_active {
        return Err(ApiError(AppError::Unauthenticated(
            "this account has been disabled".to_string(),
        )));
    }

    let verified = verify_password(&payload.password, &member.password_hash)
        .map_err(|e| ApiError(AppError::Internal(e.to_string())))?;
    if !verified {
        info!(member_id = %member.id, "failed login attempt");
        return Err(invalid_credentials());
    }

    let token = state
        .jwt_service
        .issue_token(member.id, false)
        .map_err(|e| ApiError(AppError::Internal(e.to_string())))?;

    info!(member_id = %member.id, "member logged in");

    Ok(ok(MemberAuthData {
        user: member_profile(member),
        token,
    }))
}

/// POST /auth/admin-login - Authenticate an administrator by email and PIN.
async fn admin_login(
    State(state): State<AppState>,
    Json(payload): Json<AdminLoginRequest>,
) -> ApiResult<Response> {
    let repo = AdministratorRepository::new((*state.db).clone());

    let Some(admin) = repo.find_by_email(&payload.email).await? else {
        info!(email = %payload.email, "admin login attempt for unknown email");
        return Err(invalid_credentials());
    };

    let verified = verify_password(&payload.password, &admin.password_hash)
        .map_err(|e| ApiError(AppError::Internal(e.to_string())))?;
    if !verified {
        info!(admin_id = %admin.id, "failed admin login attempt");
        return Err(invalid_credentials());
    }

    let token = state
        .jwt_service
        .issue_token(admin.id, true)
        .map_err(|e| ApiError(AppError::Internal(e.to_string())))?;

    info!(admin_id = %admin.id, "administrator logged in");

    Ok(ok(AdminAuthData {
        admin: admin_profile(admin),
        token,
    }))
}

/// POST /auth/admin-register - Register a new administrator with a
/// unique group code.
async fn admin_register(
    State(state): State<AppState>,
    Json(payload): Json<AdminRegisterRequest>,
) -> ApiResult<Response> {
    validate_pin(&payload.password).map_err(ApiError)?;

    if payload.code_group.trim().is_empty() {
        return Err(ApiError(AppError::Validation(
            "group code must not be empty".to_string(),
        )));
    }

    let repo = AdministratorRepository::new((*state.db).clone());

    if repo.email_exists(&payload.email).await? {
        return Err(ApiError(AppError::Conflict(
            "an account with this email already exists".to_string(),
        )));
    }

    let password_hash = hash_password(&payload.password)
        .map_err(|e| ApiError(AppError::Internal(e.to_string())))?;

    let admin = repo
        .create(
            &payload.name,
            &payload.email,
            &password_hash,
            payload.code_group.trim(),
            "admin",
        )
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                ApiError(AppError::Conflict(
                    "email or group code already in use".to_string(),
                ))
            } else {
                ApiError::from(e)
            }
        })?;

    let token = state
        .jwt_service
        .issue_token(admin.id, true)
        .map_err(|e| ApiError(AppError::Internal(e.to_string())))?;

    info!(admin_id = %admin.id, code_group = %admin.code_group, "new administrator registered");

    Ok(created(AdminAuthData {
        admin: admin_profile(admin),
        token,
    }))
}

/// POST /auth/check-user - Pre-registration dedup check. No auth.
async fn check_user(
    State(state): State<AppState>,
    Json(payload): Json<CheckUserRequest>,
) -> ApiResult<Response> {
    let repo = MemberRepository::new((*state.db).clone());
    let exists = repo.phone_exists(&payload.phone_number).await?;

    Ok(ok(json!({ "exists": exists })))
}

/// GET /auth/me - The current principal's public profile, shaped per
/// principal kind.
async fn me(
    State(state): State<AppState>,
    CurrentPrincipal(principal): CurrentPrincipal,
) -> ApiResult<Response> {
    match principal {
        Principal::Admin(identity) => {
            let repo = AdministratorRepository::new((*state.db).clone());
            let admin = repo.find_by_id(identity.id).await?.ok_or_else(|| {
                ApiError(AppError::PrincipalNotFound(
                    "administrator account no longer exists".to_string(),
                ))
            })?;
            Ok(ok(json!({ "admin": admin_profile(admin) })))
        }
        Principal::Member(identity) => {
            let repo = MemberRepository::new((*state.db).clone());
            let member = repo.find_by_id(identity.id).await?.ok_or_else(|| {
                ApiError(AppError::PrincipalNotFound(
                    "member account no longer exists".to_string(),
                ))
            })?;
            Ok(ok(json!({ "user": member_profile(member) })))
        }
    }
}

fn invalid_credentials() -> ApiError {
    ApiError(AppError::Unauthenticated(
        "invalid credentials".to_string(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    #[test]
    fn test_member_profile_mapping() {
        let id = Uuid::new_v4();
        let profile = member_profile(entities::members::Model {
            id,
            display_name: "Siti".to_string(),
            phone_number: "0812345678".to_string(),
            password_hash: "$argon2id$...".to_string(),
            role: "member".to_string(),
            group_code: None,
            is_active: true,
            registered_at: Utc::now().into(),
        });

        assert_eq!(profile.id, id);
        assert_eq!(profile.role, "member");
        assert!(profile.group_code.is_none());
    }

    #[test]
    fn test_profile_never_carries_password_hash() {
        let profile = admin_profile(entities::administrators::Model {
            id: Uuid::new_v4(),
            display_name: "Budi".to_string(),
            email: "budi@example.com".to_string(),
            password_hash: "$argon2id$secret".to_string(),
            code_group: "ARISAN01".to_string(),
            role: "admin".to_string(),
            registered_at: Utc::now().into(),
        });

        let rendered = serde_json::to_string(&profile).unwrap();
        assert!(!rendered.contains("argon2id"));
        assert!(!rendered.contains("password"));
    }
}
