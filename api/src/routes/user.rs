//! Routes for querying user information.

use chrono::{DateTime, Utc};
use rocket::{get, serde::json::Json, State};
use rocket_okapi::openapi;
use schemars::JsonSchema;
use serde::Serialize;

use app::user;

use crate::{access, state::RocketState};

#[derive(Debug, Serialize, JsonSchema)]
struct UserModel {
    /// Registered user email.
    email: String,
    /// Account creation time.
    created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, JsonSchema)]
pub(super) struct UserResponse {
    user: UserModel,
}

/// Get details of the authenticated account.
#[openapi(tag = "User")]
#[get("/user")]
pub(super) async fn get(
    guard: access::AuthGuard,
    state: &State<RocketState>,
) -> Option<Json<UserResponse>> {
    user::get(guard.grant(), &state.store).await.map(|user| {
        Json(UserResponse {
            user: UserModel {
                email: user.email.0,
                created_at: user.created,
            },
        })
    })
}
