// ============================
// crates/backend-lib/src/handlers/login.rs
// ============================
//! Login endpoint.
use crate::auth::password;
use crate::metrics::{LOGIN_BLOCKED, LOGIN_FAILURE, LOGIN_SUCCESS};
use crate::{error::AppError, AppState};
use authapp_common::{LoginRequest, LoginResponse, PublicUser};
use axum::{
    extract::{rejection::JsonRejection, State},
    response::IntoResponse,
    Json,
};
use metrics::counter;
use std::sync::Arc;
use tracing::{info, instrument, warn};

/// Handler for `POST /api/auth/login`.
///
/// The throttle is consulted before any credential work, so a blocked email
/// gets 429 even with the correct password. Unknown emails and wrong
/// passwords are indistinguishable to the caller: both record a failure and
/// return 401, so the endpoint does not leak which addresses exist.
#[instrument(skip_all)]
pub async fn login(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(request) = payload.map_err(|_| AppError::MissingPayload)?;

    if request.email.is_empty() || request.password.is_empty() {
        return Err(AppError::Validation(
            "Email and password are required".to_string(),
        ));
    }

    if state.throttle.is_blocked(&request.email) {
        counter!(LOGIN_BLOCKED).increment(1);
        warn!(email = %request.email, "login attempt while blocked");
        return Err(AppError::LoginThrottled);
    }

    let user = state.users.find_by_email(&request.email).await;
    let verified = match &user {
        Some(user) => {
            password::verify_password_blocking(&user.password_hash, &request.password).await
        }
        None => false,
    };

    match (verified, user) {
        (true, Some(user)) => {
            state.throttle.clear(&request.email);
            counter!(LOGIN_SUCCESS).increment(1);
            info!(user_id = %user.id, "login successful");
            Ok(Json(LoginResponse {
                message: "Login successful".to_string(),
                user: PublicUser::from(&user),
            }))
        }
        _ => {
            state.throttle.record_failure(&request.email);
            counter!(LOGIN_FAILURE).increment(1);
            warn!(email = %request.email, "failed login attempt");
            Err(AppError::InvalidCredentials)
        }
    }
}
