use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;
use tracing::error;

use mygram_db::StoreError;
use mygram_types::api::Envelope;

use crate::token::TokenError;

/// Every failure a handler can render. Each kind maps to its own status code.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("{0}")]
    Validation(String),

    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("{0}")]
    Conflict(String),

    /// Same message for unknown email and wrong password.
    #[error("invalid email or password")]
    InvalidCredentials,

    #[error("{0}")]
    Unauthorized(&'static str),

    #[error("{0}")]
    Forbidden(&'static str),

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

pub type ServiceResult<T> = Result<T, ServiceError>;

impl ServiceError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::InvalidCredentials | Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::Forbidden(_) => StatusCode::FORBIDDEN,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<StoreError> for ServiceError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(entity) => Self::NotFound(entity),
            StoreError::Conflict(msg) => Self::Conflict(msg),
            StoreError::MissingReference => Self::Validation(err.to_string()),
            StoreError::Poisoned | StoreError::Sqlite(_) => Self::Internal(err.into()),
        }
    }
}

impl From<TokenError> for ServiceError {
    fn from(err: TokenError) -> Self {
        Self::Internal(err.into())
    }
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match &self {
            Self::Internal(e) => {
                error!("Internal error: {:#}", e);
                "internal server error".to_string()
            }
            other => other.to_string(),
        };

        (status, Json(Envelope::message(message))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_errors_keep_their_kind() {
        assert_eq!(
            ServiceError::from(StoreError::NotFound("photo")).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ServiceError::from(StoreError::Conflict("email already exists".into())).status(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            ServiceError::from(StoreError::MissingReference).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ServiceError::from(StoreError::Poisoned).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn not_found_message_names_the_entity() {
        assert_eq!(ServiceError::NotFound("user").to_string(), "user not found");
    }
}
