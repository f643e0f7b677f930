//! Contribution ("amounts") routes.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    response::Response,
    routing::{delete, get, post, put},
};
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::json;
use tracing::info;
use uuid::Uuid;

use simpanan_core::authz::check_ownership;
use simpanan_db::ContributionRepository;
use simpanan_shared::AppError;
use simpanan_shared::types::{PageRequest, PageResponse};

use crate::AppState;
use crate::middleware::CurrentPrincipal;
use crate::response::{ApiError, ApiResult, created, ok};
use crate::routes::{principal_exists, require_admin};

/// Creates the contribution routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/amounts", post(record_amount))
        .route("/amounts/me", get(my_amounts))
        .route("/amounts/user/{id}", get(amounts_for_user))
        .route("/amounts", get(list_amounts))
        .route("/amounts/{id}", put(update_amount))
        .route("/amounts/{id}", delete(delete_amount))
}

/// Request body for recording a contribution.
#[derive(Debug, Deserialize)]
pub struct RecordAmountRequest {
    /// Contributed amount (positive).
    pub amount: Decimal,
    /// Record on behalf of this owner; admin-only unless it is the
    /// caller's own id.
    #[serde(rename = "userId")]
    pub user_id: Option<Uuid>,
    /// Opaque receipt reference.
    #[serde(rename = "attachmentUrl")]
    pub attachment_url: Option<String>,
}

/// Request body for correcting a contribution amount.
#[derive(Debug, Deserialize)]
pub struct UpdateAmountRequest {
    /// New amount (positive).
    pub amount: Decimal,
}

fn validate_amount(amount: Decimal) -> Result<(), ApiError> {
    if amount > Decimal::ZERO {
        Ok(())
    } else {
        Err(ApiError(AppError::Validation(
            "amount must be positive".to_string(),
        )))
    }
}

/// POST /amounts - Record a contribution for the caller (or, for
/// administrators, on another owner's behalf).
async fn record_amount(
    State(state): State<AppState>,
    CurrentPrincipal(principal): CurrentPrincipal,
    Json(payload): Json<RecordAmountRequest>,
) -> ApiResult<Response> {
    validate_amount(payload.amount)?;

    let owner_id = payload.user_id.unwrap_or_else(|| principal.effective_id());
    check_ownership(&principal, owner_id).map_err(ApiError)?;

    if !principal_exists(&state, owner_id).await? {
        return Err(ApiError(AppError::NotFound(
            "contribution owner does not exist".to_string(),
        )));
    }

    let repo = ContributionRepository::new((*state.db).clone());
    let row = repo
        .insert(owner_id, payload.amount, payload.attachment_url)
        .await?;

    info!(contribution_id = %row.id, owner_id = %owner_id, amount = %row.amount, "contribution recorded");

    Ok(created(row))
}

/// GET /amounts/me - The caller's contributions plus accumulated total.
async fn my_amounts(
    State(state): State<AppState>,
    CurrentPrincipal(principal): CurrentPrincipal,
) -> ApiResult<Response> {
    let repo = ContributionRepository::new((*state.db).clone());
    let owner_id = principal.effective_id();

    let rows = repo.list_for(owner_id).await?;
    let total = repo.total_for(owner_id).await?;

    Ok(ok(json!({ "amounts": rows, "total": total })))
}

/// GET /amounts/user/{id} - Another owner's contributions. Admins see
/// anyone; members only themselves.
async fn amounts_for_user(
    State(state): State<AppState>,
    CurrentPrincipal(principal): CurrentPrincipal,
    Path(id): Path<Uuid>,
) -> ApiResult<Response> {
    check_ownership(&principal, id).map_err(ApiError)?;

    let repo = ContributionRepository::new((*state.db).clone());
    let rows = repo.list_for(id).await?;
    let total = repo.total_for(id).await?;

    Ok(ok(json!({ "amounts": rows, "total": total })))
}

/// GET /amounts - All contributions, paginated. Admin-only.
async fn list_amounts(
    State(state): State<AppState>,
    CurrentPrincipal(principal): CurrentPrincipal,
    Query(page): Query<PageRequest>,
) -> ApiResult<Response> {
    require_admin(&principal)?;

    let repo = ContributionRepository::new((*state.db).clone());
    let (rows, total) = repo.list_all(&page).await?;

    Ok(ok(PageResponse::new(rows, page.page, page.per_page, total)))
}

/// PUT /amounts/{id} - Correct a contribution amount. Admin-only.
async fn update_amount(
    State(state): State<AppState>,
    CurrentPrincipal(principal): CurrentPrincipal,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateAmountRequest>,
) -> ApiResult<Response> {
    require_admin(&principal)?;
    validate_amount(payload.amount)?;

    let repo = ContributionRepository::new((*state.db).clone());
    let row = repo
        .update_amount(id, payload.amount)
        .await?
        .ok_or_else(|| ApiError(AppError::NotFound("no such contribution".to_string())))?;

    info!(contribution_id = %row.id, amount = %row.amount, "contribution corrected");

    Ok(ok(row))
}

/// DELETE /amounts/{id} - Remove a contribution. Admin-only.
async fn delete_amount(
    State(state): State<AppState>,
    CurrentPrincipal(principal): CurrentPrincipal,
    Path(id): Path<Uuid>,
) -> ApiResult<Response> {
    require_admin(&principal)?;

    let repo = ContributionRepository::new((*state.db).clone());
    if !repo.delete(id).await? {
        return Err(ApiError(AppError::NotFound(
            "no such contribution".to_string(),
        )));
    }

    info!(contribution_id = %id, "contribution deleted");

    Ok(ok(json!({ "deleted": true })))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_amount_validation() {
        assert!(validate_amount(dec!(0.01)).is_ok());
        assert!(validate_amount(dec!(100_000)).is_ok());
        assert!(validate_amount(Decimal::ZERO).is_err());
        assert!(validate_amount(dec!(-5)).is_err());
    }

    #[test]
    fn test_record_request_wire_names() {
        let payload = r#"{"amount":"25000","userId":null,"attachmentUrl":"receipts/a.jpg"}"#;
        let req: RecordAmountRequest = serde_json::from_str(payload).unwrap();

        assert_eq!(req.amount, dec!(25000));
        assert!(req.user_id.is_none());
        assert_eq!(req.attachment_url.as_deref(), Some("receipts/a.jpg"));
    }
}
