//! Maps the domain error taxonomy onto HTTP statuses and the response
//! envelope. Handlers return `Result<_, ApiError>` and rely on `?`.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use domains::AppError;
use serde_json::json;

#[derive(Debug)]
pub enum ApiError {
    App(AppError),
    /// Authenticated but not an administrator.
    Forbidden,
}

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self::App(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Self::Forbidden => (
                StatusCode::FORBIDDEN,
                "administrator access required".to_string(),
            ),
            Self::App(err) => {
                let status = match &err {
                    AppError::Validation(_) => StatusCode::BAD_REQUEST,
                    AppError::NotFound(_, _) => StatusCode::NOT_FOUND,
                    AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
                    AppError::Backend(_) | AppError::Notification(_) => {
                        StatusCode::INTERNAL_SERVER_ERROR
                    }
                };
                (status, err.to_string())
            }
        };
        (
            status,
            Json(json!({ "success": false, "message": message })),
        )
            .into_response()
    }
}
