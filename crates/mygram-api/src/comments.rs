use axum::{
    Extension, Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
    response::IntoResponse,
};

use mygram_types::api::{Claims, CreateCommentRequest, Envelope, UpdateCommentRequest};

use crate::error::{ServiceError, ServiceResult};
use crate::extract::{body, parse_id};
use crate::{AppState, blocking};

pub async fn list_comments(State(state): State<AppState>) -> ServiceResult<impl IntoResponse> {
    let comments = blocking(&state, |s| s.comments.list()).await?;
    Ok(Json(Envelope::with_data("comments fetched", comments)))
}

pub async fn get_comment(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ServiceResult<impl IntoResponse> {
    let id = parse_id(&id, "comment")?;
    let comment = blocking(&state, move |s| s.comments.get(id)).await?;
    Ok(Json(Envelope::with_data("comment fetched", comment)))
}

pub async fn create_comment(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    payload: Result<Json<CreateCommentRequest>, JsonRejection>,
) -> ServiceResult<impl IntoResponse> {
    let req = body(payload)?;
    if req.photo_id.is_nil() {
        return Err(ServiceError::Validation("invalid photo id".into()));
    }
    let comment = blocking(&state, move |s| s.comments.create(claims.sub, req)).await?;
    Ok((
        StatusCode::CREATED,
        Json(Envelope::with_data("comment created", comment)),
    ))
}

pub async fn update_comment(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Extension(claims): Extension<Claims>,
    payload: Result<Json<UpdateCommentRequest>, JsonRejection>,
) -> ServiceResult<impl IntoResponse> {
    let id = parse_id(&id, "comment")?;
    let req = body(payload)?;
    let comment = blocking(&state, move |s| s.comments.update(id, claims.sub, req)).await?;
    Ok(Json(Envelope::with_data("comment updated", comment)))
}

pub async fn delete_comment(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Extension(claims): Extension<Claims>,
) -> ServiceResult<impl IntoResponse> {
    let id = parse_id(&id, "comment")?;
    blocking(&state, move |s| s.comments.delete(id, claims.sub)).await?;
    Ok(Json(Envelope::message("comment deleted")))
}
