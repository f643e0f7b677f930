//! Group membership routes (administrator surface).

use axum::{
    Json, Router,
    extract::{Path, State},
    response::Response,
    routing::{delete, get, post},
};
use serde::Deserialize;
use serde_json::json;
use tracing::info;
use uuid::Uuid;

use simpanan_core::authz::Principal;
use simpanan_db::{
    AdministratorRepository, GroupMembershipRepository, MemberRepository, is_unique_violation,
};
use simpanan_shared::AppError;

use crate::AppState;
use crate::middleware::CurrentPrincipal;
use crate::response::{ApiError, ApiResult, created, ok};
use crate::routes::auth::{admin_profile, member_profile};

/// Creates the group membership routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/group-members", post(add_member))
        .route("/group-members/me", get(my_group))
        .route("/group-members/{user_id}", delete(remove_member))
        .route("/group-members", delete(remove_all_members))
}

/// Request body for adding a member to the caller's group.
#[derive(Debug, Deserialize)]
pub struct AddMemberRequest {
    /// Member to add.
    #[serde(rename = "userId")]
    pub user_id: Uuid,
}

/// Extracts the administrator arm of a principal, or denies.
fn require_admin_identity(
    principal: &Principal,
) -> Result<&simpanan_core::authz::AdminIdentity, ApiError> {
    match principal {
        Principal::Admin(identity) => Ok(identity),
        Principal::Member(_) => Err(ApiError(AppError::Forbidden(
            "administrator access required".to_string(),
        ))),
    }
}

/// POST /group-members - Add a member to the caller's group. Admin-only.
async fn add_member(
    State(state): State<AppState>,
    CurrentPrincipal(principal): CurrentPrincipal,
    Json(payload): Json<AddMemberRequest>,
) -> ApiResult<Response> {
    let admin = require_admin_identity(&principal)?;

    let members = MemberRepository::new((*state.db).clone());
    if members.find_by_id(payload.user_id).await?.is_none() {
        return Err(ApiError(AppError::NotFound(
            "no such member".to_string(),
        )));
    }

    let memberships = GroupMembershipRepository::new((*state.db).clone());
    let row = memberships
        .add(admin.id, payload.user_id)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                ApiError(AppError::Conflict(
                    "user is already a member of this group".to_string(),
                ))
            } else {
                ApiError::from(e)
            }
        })?;

    members
        .set_group_code(payload.user_id, Some(admin.code_group.clone()))
        .await?;

    info!(admin_id = %admin.id, member_id = %payload.user_id, "member added to group");

    Ok(created(row))
}

/// GET /group-members/me - The caller's group, shaped per principal
/// kind: an administrator sees their members, a member sees the groups
/// they belong to. Both use the joined projection.
async fn my_group(
    State(state): State<AppState>,
    CurrentPrincipal(principal): CurrentPrincipal,
) -> ApiResult<Response> {
    let memberships = GroupMembershipRepository::new((*state.db).clone());

    match principal {
        Principal::Admin(identity) => {
            let rows = memberships.list_members_of(identity.id).await?;
            let members: Vec<_> = rows
                .into_iter()
                .map(|(gm, member)| {
                    json!({
                        "joined_at": gm.joined_at,
                        "member": member_profile(member),
                    })
                })
                .collect();

            Ok(ok(json!({ "members": members })))
        }
        Principal::Member(identity) => {
            let rows = memberships.list_groups_of(identity.id).await?;
            let groups: Vec<_> = rows
                .into_iter()
                .map(|(gm, admin)| {
                    json!({
                        "joined_at": gm.joined_at,
                        "admin": admin_profile(admin),
                    })
                })
                .collect();

            Ok(ok(json!({ "groups": groups })))
        }
    }
}

/// DELETE /group-members/{user_id} - Remove one member from the
/// caller's group. Admin-only.
async fn remove_member(
    State(state): State<AppState>,
    CurrentPrincipal(principal): CurrentPrincipal,
    Path(user_id): Path<Uuid>,
) -> ApiResult<Response> {
    let admin = require_admin_identity(&principal)?;

    let memberships = GroupMembershipRepository::new((*state.db).clone());
    if !memberships.remove(admin.id, user_id).await? {
        return Err(ApiError(AppError::NotFound(
            "user is not a member of this group".to_string(),
        )));
    }

    // Keep the denormalized pointer consistent with the relation.
    let members = MemberRepository::new((*state.db).clone());
    if let Some(member) = members.find_by_id(user_id).await?
        && member.group_code.as_deref() == Some(admin.code_group.as_str())
    {
        members.set_group_code(user_id, None).await?;
    }

    info!(admin_id = %admin.id, member_id = %user_id, "member removed from group");

    Ok(ok(json!({ "removed": true })))
}

/// DELETE /group-members - Empty the caller's group. Admin-only,
/// idempotent.
async fn remove_all_members(
    State(state): State<AppState>,
    CurrentPrincipal(principal): CurrentPrincipal,
) -> ApiResult<Response> {
    let admin = require_admin_identity(&principal)?;

    let memberships = GroupMembershipRepository::new((*state.db).clone());
    let members = MemberRepository::new((*state.db).clone());

    // Clear the denormalized pointers first, then drop the rows.
    let rows = memberships.list_for_admin(admin.id).await?;
    for row in &rows {
        if let Some(member) = members.find_by_id(row.member_id).await?
            && member.group_code.as_deref() == Some(admin.code_group.as_str())
        {
            members.set_group_code(row.member_id, None).await?;
        }
    }

    let removed = memberships.remove_all(admin.id).await?;

    info!(admin_id = %admin.id, removed, "group emptied");

    Ok(ok(json!({ "removed": removed })))
}

/// Verifies an administrator group code exists; used by the join flow.
pub(crate) async fn resolve_group_code(
    state: &AppState,
    code: &str,
) -> ApiResult<simpanan_db::entities::administrators::Model> {
    let admins = AdministratorRepository::new((*state.db).clone());
    admins
        .find_by_code(code)
        .await?
        .ok_or_else(|| ApiError(AppError::NotFound("invalid group code".to_string())))
}
