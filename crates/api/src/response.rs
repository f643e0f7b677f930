//! Response envelope and error mapping.
//!
//! Success responses carry `{success, data}`; failures carry
//! `{success, error, message}`. Client errors surface their message and
//! a machine-readable code; store and internal failures are logged with
//! full context and rendered as a generic 500.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use sea_orm::DbErr;
use serde::Serialize;
use serde_json::json;
use tracing::error;

use simpanan_shared::AppError;

/// Result alias for handlers.
pub type ApiResult<T> = Result<T, ApiError>;

/// `AppError` wrapper that renders the response envelope.
#[derive(Debug)]
pub struct ApiError(pub AppError);

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

impl From<DbErr> for ApiError {
    fn from(err: DbErr) -> Self {
        Self(AppError::Database(err.to_string()))
    }
}

impl From<simpanan_core::underwriting::LoanError> for ApiError {
    fn from(err: simpanan_core::underwriting::LoanError) -> Self {
        Self(AppError::from(err))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.0.status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        let message = if self.0.is_client_error() {
            self.0.to_string()
        } else {
            error!(error = %self.0, "request failed with server error");
            "an internal error occurred".to_string()
        };

        let body = json!({
            "success": false,
            "error": self.0.error_code(),
            "message": message,
        });

        (status, Json(body)).into_response()
    }
}

/// 200 response with data.
pub fn ok<T: Serialize>(data: T) -> Response {
    envelope(StatusCode::OK, data)
}

/// 201 response with data.
pub fn created<T: Serialize>(data: T) -> Response {
    envelope(StatusCode::CREATED, data)
}

fn envelope<T: Serialize>(status: StatusCode, data: T) -> Response {
    let body = json!({
        "success": true,
        "data": data,
    });

    (status, Json(body)).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_ok_envelope_shape() {
        let response = ok(json!({ "exists": true }));
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert_eq!(body["success"], json!(true));
        assert_eq!(body["data"]["exists"], json!(true));
    }

    #[tokio::test]
    async fn test_client_error_envelope() {
        let response =
            ApiError(AppError::Validation("amount must be positive".into())).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = body_json(response).await;
        assert_eq!(body["success"], json!(false));
        assert_eq!(body["error"], json!("VALIDATION_ERROR"));
        assert_eq!(
            body["message"],
            json!("Validation error: amount must be positive")
        );
    }

    #[tokio::test]
    async fn test_server_error_message_is_generic() {
        let response = ApiError(AppError::Database("connection refused".into())).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = body_json(response).await;
        assert_eq!(body["error"], json!("DATABASE_ERROR"));
        assert_eq!(body["message"], json!("an internal error occurred"));
    }

    #[tokio::test]
    async fn test_loan_not_viable_status() {
        let response =
            ApiError(AppError::LoanNotViable("insufficient accumulated balance".into()))
                .into_response();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }
}
