use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use crate::domain::error::{DomainError, ErrorKind};

const INTERNAL_MESSAGE: &str = "Something went wrong. Please retry.";

/// json body of every failed request
#[derive(Serialize, Deserialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
}

/// Domain failure on its way out of a handler
#[derive(Debug)]
pub struct ApiError(DomainError);

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        Self(err)
    }
}

pub fn status_of(kind: ErrorKind) -> StatusCode {
    match kind {
        ErrorKind::Validation => StatusCode::BAD_REQUEST,
        ErrorKind::Conflict | ErrorKind::ReservationMismatch => StatusCode::CONFLICT,
        ErrorKind::NotFound => StatusCode::NOT_FOUND,
        ErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = status_of(self.0.kind());
        let error = if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!(error = %self.0, "request failed");
            INTERNAL_MESSAGE.to_string()
        } else {
            self.0.to_string()
        };
        (
            status,
            Json(ErrorResponse {
                success: false,
                error,
            }),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use http_body_util::BodyExt;
    use rstest::rstest;

    use super::*;
    use crate::domain::error::RepositoryError;

    #[rstest]
    #[case(DomainError::InvalidEmail, StatusCode::BAD_REQUEST)]
    #[case(DomainError::TeamFull("hackquest".to_string()), StatusCode::CONFLICT)]
    #[case(DomainError::ReservationExpired, StatusCode::CONFLICT)]
    #[case(DomainError::EventNotFound("quiz".to_string()), StatusCode::NOT_FOUND)]
    #[case(DomainError::TeamCodeExhausted, StatusCode::INTERNAL_SERVER_ERROR)]
    fn test_status_mapping(#[case] err: DomainError, #[case] status: StatusCode) {
        assert_eq!(ApiError::from(err).into_response().status(), status);
    }

    #[tokio::test]
    async fn test_conflict_keeps_reason() {
        let response = ApiError::from(DomainError::EmailAlreadyRegistered).into_response();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body: ErrorResponse = serde_json::from_slice(&bytes).unwrap();
        assert!(!body.success);
        assert_eq!(body.error, "Email already registered");
    }

    #[tokio::test]
    async fn test_internal_error_is_masked() {
        let err = DomainError::from(RepositoryError::DatabaseError(
            "connection reset by peer".to_string(),
        ));
        let response = ApiError::from(err).into_response();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body: ErrorResponse = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body.error, INTERNAL_MESSAGE);
    }
}
