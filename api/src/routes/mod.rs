//! Add top-level routes as submodules here.

use app::record;
use rocket::{Build, Rocket};
use rocket_okapi::{
    openapi_get_routes,
    swagger_ui::{make_swagger_ui, DefaultModelRendering, SwaggerUIConfig},
};
use schemars::JsonSchema;
use serde::Serialize;
use std::str::FromStr;
use uuid::Uuid;

use crate::state::RocketState;

mod categories;
mod expenses;
mod identity;
mod reminders;
mod user;

#[derive(Debug, Serialize, JsonSchema)]
pub(super) struct DeletedResponse {
    /// Identifier of the deleted record.
    deleted: Uuid,
}

impl DeletedResponse {
    fn new(id: record::Id) -> Self {
        Self { deleted: id.0 }
    }
}

/// A malformed id can't name any record, so it reads as not-found rather than
/// as a distinct failure.
fn parse_id(raw: &str) -> Option<record::Id> {
    Uuid::from_str(raw).ok().map(record::Id)
}

const VERSION: &str = "/v0";

pub fn register(rocket: Rocket<Build>, state: RocketState) -> Rocket<Build> {
    let rocket = rocket.manage(state);
    let rocket = rocket.mount(
        VERSION,
        openapi_get_routes![
            identity::register,
            identity::login,
            user::get,
            reminders::post,
            reminders::list,
            reminders::get,
            reminders::put,
            reminders::delete,
            expenses::post,
            expenses::list,
            expenses::get,
            expenses::put,
            expenses::delete,
            categories::post,
            categories::list,
            categories::get,
            categories::put,
            categories::delete,
        ],
    );
    mount_swagger(rocket)
}

pub fn mount_swagger(rocket: Rocket<Build>) -> Rocket<Build> {
    rocket.mount(
        format!("{}/swagger", VERSION),
        make_swagger_ui(&SwaggerUIConfig {
            url: "../openapi.json".to_owned(),
            default_model_rendering: DefaultModelRendering::Model,
            show_extensions: true,
            ..Default::default()
        }),
    )
}
