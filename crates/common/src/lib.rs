// ================
// common/src/lib.rs
// ================
//! Wire types shared between the auth backend and its clients.
//! These mirror the JSON bodies of the HTTP API exactly.

use serde::{Deserialize, Serialize};

/// Body of `POST /api/auth/register`.
///
/// Fields default to the empty string so a partial body deserializes and the
/// handler can report which check failed, rather than bouncing on serde.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RegisterRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub password: String,
}

/// Body of `POST /api/auth/login`.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// The projection of a user record that is allowed to cross the wire.
/// The password hash and avatar never appear in API responses.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct PublicUser {
    pub id: String,
    pub email: String,
    pub name: String,
}

/// Success body of `POST /api/auth/register` (201).
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RegisterResponse {
    pub message: String,
    pub user: PublicUser,
}

/// Success body of `POST /api/auth/login` (200).
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct LoginResponse {
    pub message: String,
    pub user: PublicUser,
}
