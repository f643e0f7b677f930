//! Loan routes: underwriting, lifecycle, and summaries.

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
use simpanan_core::underwriting::{
    LoanError, LoanStatus, UnderwritingPolicy, ensure_deletable, ensure_transition,
};
use simpanan_db::{ContributionRepository, LoanRepository};
use simpanan_shared::AppError;
use simpanan_shared::types::{PageRequest, PageResponse};

use crate::AppState;
use crate::middleware::CurrentPrincipal;
use crate::response::{ApiError, ApiResult, created, ok};
use crate::routes::require_admin;

/// Creates the loan routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/loans", post(request_loan))
        .route("/loans/evaluate", post(evaluate_loan))
        .route("/loans/me", get(my_loans))
        .route("/loans", get(list_loans))
        .route("/loans/summary", get(loan_summary))
        .route("/loans/{id}/status", put(set_loan_status))
        .route("/loans/{id}", delete(delete_loan))
}

/// Request body for a loan request or evaluation preview.
#[derive(Debug, Deserialize)]
pub struct LoanAmountRequest {
    /// Requested amount.
    pub amount: Decimal,
}

/// Request body for a status decision.
#[derive(Debug, Deserialize)]
pub struct SetStatusRequest {
    /// New status: "approved" or "rejected".
    pub status: String,
}

/// POST /loans - Request a loan.
///
/// Underwriting always re-runs here against the live accumulated total;
/// whatever the client previewed is irrelevant.
async fn request_loan(
    State(state): State<AppState>,
    CurrentPrincipal(principal): CurrentPrincipal,
    Json(payload): Json<LoanAmountRequest>,
) -> ApiResult<Response> {
    let owner_id = principal.effective_id();

    let contributions = ContributionRepository::new((*state.db).clone());
    let accumulated = contributions.total_for(owner_id).await?;

    let evaluation = UnderwritingPolicy::default().evaluate(payload.amount, accumulated);
    if !evaluation.viable {
        let reason = evaluation
            .reason
            .unwrap_or_else(|| "loan is not viable".to_string());
        info!(owner_id = %owner_id, amount = %payload.amount, reason = %reason, "loan request rejected");
        return Err(ApiError::from(LoanError::NotViable(reason)));
    }

    let loans = LoanRepository::new((*state.db).clone());
    let row = loans.insert(owner_id, payload.amount).await?;

    info!(loan_id = %row.id, owner_id = %owner_id, amount = %row.amount, "loan requested");

    Ok(created(json!({ "loan": row, "evaluation": evaluation })))
}

/// POST /loans/evaluate - Advisory eligibility preview. Never inserts;
/// the authoritative run happens again at submission.
async fn evaluate_loan(
    State(state): State<AppState>,
    CurrentPrincipal(principal): CurrentPrincipal,
    Json(payload): Json<LoanAmountRequest>,
) -> ApiResult<Response> {
    let contributions = ContributionRepository::new((*state.db).clone());
    let accumulated = contributions.total_for(principal.effective_id()).await?;

    let evaluation = UnderwritingPolicy::default().evaluate(payload.amount, accumulated);

    Ok(ok(json!({
        "evaluation": evaluation,
        "accumulated": accumulated,
    })))
}

/// GET /loans/me - The caller's loans, newest first.
async fn my_loans(
    State(state): State<AppState>,
    CurrentPrincipal(principal): CurrentPrincipal,
) -> ApiResult<Response> {
    let repo = LoanRepository::new((*state.db).clone());
    let rows = repo.list_for(principal.effective_id()).await?;

    Ok(ok(json!({ "loans": rows })))
}

/// GET /loans - All loans, paginated. Admin-only.
async fn list_loans(
    State(state): State<AppState>,
    CurrentPrincipal(principal): CurrentPrincipal,
    Query(page): Query<PageRequest>,
) -> ApiResult<Response> {
    require_admin(&principal)?;

    let repo = LoanRepository::new((*state.db).clone());
    let (rows, total) = repo.list_all(&page).await?;

    Ok(ok(PageResponse::new(rows, page.page, page.per_page, total)))
}

/// GET /loans/summary - Aggregate sums per status. Admin-only.
async fn loan_summary(
    State(state): State<AppState>,
    CurrentPrincipal(principal): CurrentPrincipal,
) -> ApiResult<Response> {
    require_admin(&principal)?;

    let repo = LoanRepository::new((*state.db).clone());
    let totals = repo.totals_by_status().await?;

    Ok(ok(json!({ "totals": totals })))
}

/// PUT /loans/{id}/status - Decide a pending loan. Admin-only.
///
/// Eligibility is deliberately NOT re-run here: a decision is a human
/// administrative act and may exceed the formula.
async fn set_loan_status(
    State(state): State<AppState>,
    CurrentPrincipal(principal): CurrentPrincipal,
    Path(id): Path<Uuid>,
    Json(payload): Json<SetStatusRequest>,
) -> ApiResult<Response> {
    require_admin(&principal)?;

    let new_status = LoanStatus::parse(&payload.status)
        .ok_or_else(|| ApiError::from(LoanError::UnknownStatus(payload.status.clone())))?;

    let repo = LoanRepository::new((*state.db).clone());
    let loan = repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError(AppError::NotFound("no such loan".to_string())))?;

    let current = LoanStatus::parse(&loan.status)
        .ok_or_else(|| ApiError(AppError::Internal("corrupt loan status".to_string())))?;
    ensure_transition(current, new_status)?;

    let updated = repo
        .set_status(id, new_status)
        .await?
        .ok_or_else(|| ApiError(AppError::NotFound("no such loan".to_string())))?;

    info!(loan_id = %id, from = %current, to = %new_status, "loan status changed");

    Ok(ok(updated))
}

/// DELETE /loans/{id} - Withdraw a loan request.
///
/// Owner or admin; only while the loan is still pending.
async fn delete_loan(
    State(state): State<AppState>,
    CurrentPrincipal(principal): CurrentPrincipal,
    Path(id): Path<Uuid>,
) -> ApiResult<Response> {
    let repo = LoanRepository::new((*state.db).clone());
    let loan = repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError(AppError::NotFound("no such loan".to_string())))?;

    check_ownership(&principal, loan.owner_id).map_err(ApiError)?;

    let status = LoanStatus::parse(&loan.status)
        .ok_or_else(|| ApiError(AppError::Internal("corrupt loan status".to_string())))?;
    ensure_deletable(status)?;

    repo.delete(id).await?;

    info!(loan_id = %id, "loan deleted");

    Ok(ok(json!({ "deleted": true })))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_status_request_parses() {
        let req: SetStatusRequest = serde_json::from_str(r#"{"status":"approved"}"#).unwrap();
        assert_eq!(LoanStatus::parse(&req.status), Some(LoanStatus::Approved));
    }

    #[test]
    fn test_loan_amount_accepts_string_decimal() {
        let req: LoanAmountRequest = serde_json::from_str(r#"{"amount":"50000"}"#).unwrap();
        assert_eq!(req.amount, dec!(50000));
    }
}
