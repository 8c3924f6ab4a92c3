use axum::{Json, extract::rejection::JsonRejection};
use uuid::Uuid;

use crate::error::{ServiceError, ServiceResult};

/// Path ids must parse and must not be the nil UUID.
pub(crate) fn parse_id(raw: &str, entity: &str) -> ServiceResult<Uuid> {
    match raw.parse::<Uuid>() {
        Ok(id) if !id.is_nil() => Ok(id),
        _ => Err(ServiceError::Validation(format!("invalid {} id", entity))),
    }
}

/// Turns axum's plain-text JSON rejection into the `{message}` envelope.
pub(crate) fn body<T>(payload: Result<Json<T>, JsonRejection>) -> ServiceResult<T> {
    payload
        .map(|Json(value)| value)
        .map_err(|rejection| ServiceError::Validation(rejection.body_text()))
}
