use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{0}")]
    UnprocessableEntity(String),
    #[error("{0}")]
    EntityNotFound(String),
    #[error("{0}")]
    ValidationError(#[from] garde::Report),
    #[error("Booking must be made at least {0} days in advance")]
    AdvanceNoticeViolation(i64),
    #[error("{0}")]
    OperatingHoursViolation(String),
    #[error("{0}")]
    CapacityExceeded(String),
    #[error("{0}")]
    SlotConflict(String),
    #[error("{0}")]
    InvalidStatusTransition(String),
    #[error(transparent)]
    ConvertToUuidError(#[from] uuid::Error),
    #[error("Failed to book venue {venue_name}. Partial success may have occurred.")]
    PartialBatchFailure {
        venue_name: String,
        created_booking_ids: Vec<uuid::Uuid>,
    },
    #[error("{0}")]
    NoRowsAffectedError(String),
    #[error(transparent)]
    SpecificOperationError(#[from] sqlx::Error),
    #[error(transparent)]
    TransactionError(sqlx::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status_code = match self {
            AppError::UnprocessableEntity(_)
            | AppError::ValidationError(_)
            | AppError::AdvanceNoticeViolation(_)
            | AppError::OperatingHoursViolation(_)
            | AppError::CapacityExceeded(_)
            | AppError::InvalidStatusTransition(_)
            | AppError::ConvertToUuidError(_) => StatusCode::BAD_REQUEST,
            AppError::EntityNotFound(_) => StatusCode::NOT_FOUND,
            AppError::SlotConflict(_) => StatusCode::CONFLICT,
            AppError::PartialBatchFailure { .. }
            | AppError::NoRowsAffectedError(_)
            | AppError::SpecificOperationError(_)
            | AppError::TransactionError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        if status_code == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!(
                error.cause_chain = ?self,
                error.message = %self,
                "Unexpected error happened"
            );
        }

        // 途中まで書き込みが成功したケースだけは、成功済みの行を
        // レスポンスに含めて呼び出し側でのリカバリーに使えるようにする
        let body = match &self {
            AppError::PartialBatchFailure {
                created_booking_ids,
                ..
            } => json!({
                "error": self.to_string(),
                "createdBookingIds": created_booking_ids,
            }),
            _ => json!({ "error": self.to_string() }),
        };

        (status_code, Json(body)).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;
