use axum::{
    Extension, Json,
    extract::{Path, State, rejection::JsonRejection},
    response::IntoResponse,
};

use mygram_types::api::{Claims, Envelope, UpdateUserRequest};

use crate::error::ServiceResult;
use crate::extract::{body, parse_id};
use crate::{AppState, blocking};

pub async fn list_users(State(state): State<AppState>) -> ServiceResult<impl IntoResponse> {
    let users = blocking(&state, |s| s.users.list()).await?;
    Ok(Json(Envelope::with_data("users fetched", users)))
}

pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ServiceResult<impl IntoResponse> {
    let id = parse_id(&id, "user")?;
    let user = blocking(&state, move |s| s.users.get(id)).await?;
    Ok(Json(Envelope::with_data("user fetched", user)))
}

pub async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Extension(claims): Extension<Claims>,
    payload: Result<Json<UpdateUserRequest>, JsonRejection>,
) -> ServiceResult<impl IntoResponse> {
    let id = parse_id(&id, "user")?;
    let req = body(payload)?;
    let user = blocking(&state, move |s| s.users.update(id, claims.sub, req)).await?;
    Ok(Json(Envelope::with_data("user updated", user)))
}

pub async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Extension(claims): Extension<Claims>,
) -> ServiceResult<impl IntoResponse> {
    let id = parse_id(&id, "user")?;
    blocking(&state, move |s| s.users.delete(id, claims.sub)).await?;
    Ok(Json(Envelope::message("user deleted")))
}

pub async fn list_user_photos(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ServiceResult<impl IntoResponse> {
    let id = parse_id(&id, "user")?;
    let photos = blocking(&state, move |s| s.photos.list_by_user(id)).await?;
    Ok(Json(Envelope::with_data("photos fetched", photos)))
}

pub async fn list_user_socials(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ServiceResult<impl IntoResponse> {
    let id = parse_id(&id, "user")?;
    let socials = blocking(&state, move |s| s.socials.list_by_user(id)).await?;
    Ok(Json(Envelope::with_data("socials fetched", socials)))
}
