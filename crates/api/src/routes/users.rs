//! Member-surface user routes: group join and activation toggle.

use axum::{
    Json, Router,
    extract::{Path, State},
    response::Response,
    routing::{post, put},
};
use serde_json::json;
use tracing::info;
use uuid::Uuid;

use simpanan_core::authz::Principal;
use simpanan_db::{GroupMembershipRepository, MemberRepository, is_unique_violation};
use simpanan_shared::AppError;
use simpanan_shared::auth::{JoinGroupRequest, SetActiveRequest};

use crate::AppState;
use crate::middleware::CurrentPrincipal;
use crate::response::{ApiError, ApiResult, ok};
use crate::routes::auth::member_profile;
use crate::routes::group_members::resolve_group_code;
use crate::routes::require_admin;

/// Creates the user routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/users/join-group", post(join_group))
        .route("/users/{id}/active", put(set_active))
}

/// POST /users/join-group - Join a group by its shareable code.
///
/// Member-only by kind: an administrator cannot sit on the member side
/// of its own relation, so this is an ownership-style check rather than
/// a role gate (which administrators would bypass).
async fn join_group(
    State(state): State<AppState>,
    CurrentPrincipal(principal): CurrentPrincipal,
    Json(payload): Json<JoinGroupRequest>,
) -> ApiResult<Response> {
    let member = match &principal {
        Principal::Member(identity) => identity,
        Principal::Admin(_) => {
            return Err(ApiError(AppError::Forbidden(
                "administrators cannot join groups as members".to_string(),
            )));
        }
    };

    let admin = resolve_group_code(&state, payload.code_group.trim()).await?;

    let memberships = GroupMembershipRepository::new((*state.db).clone());
    memberships.add(admin.id, member.id).await.map_err(|e| {
        // The composite key settles the race between two concurrent
        // joins of the same pair.
        if is_unique_violation(&e) {
            ApiError(AppError::Conflict(
                "already a member of this group".to_string(),
            ))
        } else {
            ApiError::from(e)
        }
    })?;

    let members = MemberRepository::new((*state.db).clone());
    let updated = members
        .set_group_code(member.id, Some(admin.code_group.clone()))
        .await?
        .ok_or_else(|| {
            ApiError(AppError::PrincipalNotFound(
                "member account no longer exists".to_string(),
            ))
        })?;

    info!(member_id = %member.id, admin_id = %admin.id, code_group = %admin.code_group, "member joined group");

    Ok(ok(json!({ "user": member_profile(updated) })))
}

/// PUT /users/{id}/active - Toggle a member's active flag. Admin-only.
async fn set_active(
    State(state): State<AppState>,
    CurrentPrincipal(principal): CurrentPrincipal,
    Path(id): Path<Uuid>,
    Json(payload): Json<SetActiveRequest>,
) -> ApiResult<Response> {
    require_admin(&principal)?;

    let members = MemberRepository::new((*state.db).clone());
    let updated = members
        .set_active(id, payload.is_active)
        .await?
        .ok_or_else(|| ApiError(AppError::NotFound("no such member".to_string())))?;

    info!(member_id = %id, is_active = payload.is_active, "member activation toggled");

    Ok(ok(json!({ "user": member_profile(updated) })))
}
