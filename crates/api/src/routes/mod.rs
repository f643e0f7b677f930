//! API route definitions.

use axum::{Router, middleware};
use sea_orm::DbErr;
use uuid::Uuid;

use crate::{AppState, middleware::auth::resolve_principal};

pub mod amounts;
pub mod auth;
pub mod group_members;
pub mod health;
pub mod loans;
pub mod users;

/// Creates the API router with public and protected routes.
#[allow(clippy::needless_pass_by_value)]
pub fn api_routes_with_state(state: AppState) -> Router<AppState> {
    // Protected routes that require a resolved principal
    let protected_routes = Router::new()
        .merge(auth::protected_routes())
        .merge(amounts::routes())
        .merge(loans::routes())
        .merge(group_members::routes())
        .merge(users::routes())
        .layer(middleware::from_fn_with_state(
            state.clone(),
            resolve_principal,
        ));

    Router::new()
        .merge(health::routes())
        .merge(auth::routes())
        .merge(protected_routes)
}

/// Requires an administrator principal.
///
/// An empty allowed-role set admits nobody through the member arm, so
/// only the administrator bypass (Rule 1 of the gate) lets a caller
/// pass.
pub(crate) fn require_admin(
    principal: &simpanan_core::authz::Principal,
) -> Result<(), crate::response::ApiError> {
    simpanan_core::authz::authorize_roles(principal, &[]).map_err(crate::response::ApiError)
}

/// Checks that an id references an existing principal of either kind.
///
/// Contributions and loans may be owned by a member or by an
/// administrator, so owner existence is an application-level check
/// against both tables.
pub(crate) async fn principal_exists(state: &AppState, id: Uuid) -> Result<bool, DbErr> {
    let members = simpanan_db::MemberRepository::new((*state.db).clone());
    if members.find_by_id(id).await?.is_some() {
        return Ok(true);
    }

    let admins = simpanan_db::AdministratorRepository::new((*state.db).clone());
    Ok(admins.find_by_id(id).await?.is_some())
}
