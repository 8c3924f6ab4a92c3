use axum::{
    Extension, Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
    response::IntoResponse,
};

use mygram_types::api::{Claims, Envelope, PhotoRequest};

use crate::error::ServiceResult;
use crate::extract::{body, parse_id};
use crate::{AppState, blocking};

pub async fn list_photos(State(state): State<AppState>) -> ServiceResult<impl IntoResponse> {
    let photos = blocking(&state, |s| s.photos.list()).await?;
    Ok(Json(Envelope::with_data("photos fetched", photos)))
}

pub async fn get_photo(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ServiceResult<impl IntoResponse> {
    let id = parse_id(&id, "photo")?;
    let photo = blocking(&state, move |s| s.photos.get(id)).await?;
    Ok(Json(Envelope::with_data("photo fetched", photo)))
}

/// The acting user becomes the owner.
pub async fn create_photo(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    payload: Result<Json<PhotoRequest>, JsonRejection>,
) -> ServiceResult<impl IntoResponse> {
    let req = body(payload)?;
    let photo = blocking(&state, move |s| s.photos.create(claims.sub, req)).await?;
    Ok((
        StatusCode::CREATED,
        Json(Envelope::with_data("photo created", photo)),
    ))
}

pub async fn update_photo(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Extension(claims): Extension<Claims>,
    payload: Result<Json<PhotoRequest>, JsonRejection>,
) -> ServiceResult<impl IntoResponse> {
    let id = parse_id(&id, "photo")?;
    let req = body(payload)?;
    let photo = blocking(&state, move |s| s.photos.update(id, claims.sub, req)).await?;
    Ok(Json(Envelope::with_data("photo updated", photo)))
}

pub async fn delete_photo(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Extension(claims): Extension<Claims>,
) -> ServiceResult<impl IntoResponse> {
    let id = parse_id(&id, "photo")?;
    blocking(&state, move |s| s.photos.delete(id, claims.sub)).await?;
    Ok(Json(Envelope::message("photo deleted")))
}

pub async fn list_photo_comments(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ServiceResult<impl IntoResponse> {
    let id = parse_id(&id, "photo")?;
    let comments = blocking(&state, move |s| s.comments.list_by_photo(id)).await?;
    Ok(Json(Envelope::with_data("comments fetched", comments)))
}
