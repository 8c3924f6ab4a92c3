use axum::{
    Extension, Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
    response::IntoResponse,
};

use mygram_types::api::{Claims, Envelope, SocialRequest};

use crate::error::ServiceResult;
use crate::extract::{body, parse_id};
use crate::{AppState, blocking};

pub async fn list_socials(State(state): State<AppState>) -> ServiceResult<impl IntoResponse> {
    let socials = blocking(&state, |s| s.socials.list()).await?;
    Ok(Json(Envelope::with_data("socials fetched", socials)))
}

pub async fn get_social(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ServiceResult<impl IntoResponse> {
    let id = parse_id(&id, "social")?;
    let social = blocking(&state, move |s| s.socials.get(id)).await?;
    Ok(Json(Envelope::with_data("social fetched", social)))
}

pub async fn create_social(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    payload: Result<Json<SocialRequest>, JsonRejection>,
) -> ServiceResult<impl IntoResponse> {
    let req = body(payload)?;
    let social = blocking(&state, move |s| s.socials.create(claims.sub, req)).await?;
    Ok((
        StatusCode::CREATED,
        Json(Envelope::with_data("social created", social)),
    ))
}

pub async fn update_social(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Extension(claims): Extension<Claims>,
    payload: Result<Json<SocialRequest>, JsonRejection>,
) -> ServiceResult<impl IntoResponse> {
    let id = parse_id(&id, "social")?;
    let req = body(payload)?;
    let social = blocking(&state, move |s| s.socials.update(id, claims.sub, req)).await?;
    Ok(Json(Envelope::with_data("social updated", social)))
}

pub async fn delete_social(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Extension(claims): Extension<Claims>,
) -> ServiceResult<impl IntoResponse> {
    let id = parse_id(&id, "social")?;
    blocking(&state, move |s| s.socials.delete(id, claims.sub)).await?;
    Ok(Json(Envelope::message("social deleted")))
}
