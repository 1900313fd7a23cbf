// ============================
// crates/backend-lib/src/handlers/register.rs
// ============================
//! Registration endpoint.
use crate::metrics::USER_REGISTERED;
use crate::{error::AppError, validation, AppState};
use authapp_common::{PublicUser, RegisterRequest, RegisterResponse};
use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use metrics::counter;
use std::sync::Arc;
use tracing::{info, instrument};

/// Handler for `POST /api/auth/register`.
///
/// Checks run in contract order, first failure wins: field presence,
/// password length, email shape, then the duplicate check. Email uniqueness
/// is the handler's job; the store appends whatever it is given.
#[instrument(skip_all)]
pub async fn register(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(request) = payload.map_err(|_| AppError::MissingPayload)?;

    validation::validate_registration(
        &request.email,
        &request.name,
        &request.password,
        state.settings.password.min_length,
    )?;

    if state.users.find_by_email(&request.email).await.is_some() {
        return Err(AppError::EmailTaken);
    }

    let user = state
        .users
        .create(&request.email, &request.name, &request.password)
        .await?;

    counter!(USER_REGISTERED).increment(1);
    info!(user_id = %user.id, "user registered");

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            message: "User registered successfully".to_string(),
            user: PublicUser::from(&user),
        }),
    ))
}
