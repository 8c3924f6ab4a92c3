use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::IntoResponse,
};
use tracing::info;

use mygram_types::api::{Envelope, LoginRequest, LoginResponse, RegisterRequest};

use crate::error::ServiceResult;
use crate::extract::body;
use crate::{AppState, blocking};

pub async fn register(
    State(state): State<AppState>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> ServiceResult<impl IntoResponse> {
    let req = body(payload)?;

    let user = blocking(&state, move |s| s.users.register(req)).await?;

    Ok((
        StatusCode::CREATED,
        Json(Envelope::with_data("user registered", user)),
    ))
}

pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> ServiceResult<impl IntoResponse> {
    let req = body(payload)?;

    let (user, token) = blocking(&state, move |s| {
        let user = s.users.login(&req)?;
        let token = s.users.generate_token(&user)?;
        Ok((user, token))
    })
    .await?;

    info!("User {} logged in", user.id);
    Ok(Json(Envelope::with_data(
        "login successful",
        LoginResponse { token, user },
    )))
}
