//! Registration and login. These are the only unauthenticated routes.

use rocket::{post, serde::json::Json, State};
use rocket_okapi::openapi;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use app::{identity, user};

use crate::{
    error::{self, JsonResult},
    state::RocketState,
};

#[derive(Debug, Deserialize, JsonSchema)]
pub(super) struct RegisterRequest {
    /// Address the account is registered under. Must not be in use.
    email: String,
    /// Plaintext password. Only its digest is stored.
    password: String,
}

#[derive(Debug, Serialize, JsonSchema)]
pub(super) struct RegisterResponse {
    /// Identifier of the new account.
    user_id: Uuid,
}

#[derive(Debug, Serialize, JsonSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub(super) enum RegisterError {
    /// The email is already registered.
    EmailTaken,
}

/// Create a new account.
#[openapi(tag = "Identity")]
#[post("/register", data = "<req>")]
pub(super) async fn register(
    state: &State<RocketState>,
    req: Json<RegisterRequest>,
) -> JsonResult<RegisterResponse, RegisterError> {
    identity::register(&state.store, user::Email(req.email.clone()), &req.password)
        .await
        .map(|user_id| Json(RegisterResponse { user_id: user_id.0 }))
        .map_err(|_| {
            error::conflict(
                RegisterError::EmailTaken,
                "email is already registered".to_owned(),
            )
        })
}

#[derive(Debug, Deserialize, JsonSchema)]
pub(super) struct LoginRequest {
    email: String,
    password: String,
}

#[derive(Debug, Serialize, JsonSchema)]
pub(super) struct LoginResponse {
    /// Bearer token for the X-Auth-Token header.
    token: String,
}

#[derive(Debug, Serialize, JsonSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub(super) enum LoginError {
    /// Unknown email or wrong password; the response does not say which.
    InvalidCredentials,
}

/// Trade credentials for a token.
#[openapi(tag = "Identity")]
#[post("/login", data = "<req>")]
pub(super) async fn login(
    state: &State<RocketState>,
    req: Json<LoginRequest>,
) -> JsonResult<LoginResponse, LoginError> {
    identity::login(&state.store, &state.keys, &req.email, &req.password)
        .await
        .map(|token| Json(LoginResponse { token }))
        .map_err(|_| {
            error::unauthorized(
                LoginError::InvalidCredentials,
                "invalid credentials".to_owned(),
            )
        })
}
