use rocket::{delete, get, post, put, serde::json::Json, State};
use rocket_okapi::openapi;
use schemars::JsonSchema;
use serde::Serialize;
use uuid::Uuid;

use app::record::{self, Fields, Filter, Kind};

use crate::{access, state::RocketState};

use super::{parse_id, DeletedResponse};

#[derive(Debug, Serialize, JsonSchema)]
pub(super) struct ReminderResponse {
    reminder: ReminderModel,
}

#[derive(Debug, Serialize, JsonSchema)]
pub(super) struct RemindersResponse {
    reminders: Vec<ReminderModel>,
}

#[derive(Debug, Serialize, JsonSchema)]
struct ReminderModel {
    /// Reminder identifier.
    id: Uuid,
    /// The reminder attributes, e.g. title and due date.
    #[serde(flatten)]
    fields: Fields,
}

impl ReminderModel {
    fn from_entity(record: &record::Record) -> Self {
        Self {
            id: record.id.0,
            fields: record.fields.clone(),
        }
    }
}

/// Create a new reminder.
#[openapi(tag = "Reminders")]
#[post("/reminders", data = "<req>")]
pub(super) async fn post(
    state: &State<RocketState>,
    guard: access::AuthGuard,
    req: Json<Fields>,
) -> Json<ReminderResponse> {
    let record = record::create(guard.grant(), &state.store, Kind::Reminder, req.into_inner()).await;
    Json(ReminderResponse {
        reminder: ReminderModel::from_entity(&record),
    })
}

/// List reminders.
#[openapi(tag = "Reminders")]
#[get("/reminders")]
pub(super) async fn list(
    state: &State<RocketState>,
    guard: access::AuthGuard,
) -> Json<RemindersResponse> {
    Json(RemindersResponse {
        reminders: record::list(guard.grant(), &state.store, Kind::Reminder, &Filter::default())
            .await
            .iter()
            .map(ReminderModel::from_entity)
            .collect(),
    })
}

/// Get reminder details.
#[openapi(tag = "Reminders")]
#[get("/reminders/<reminder_id>")]
pub(super) async fn get(
    state: &State<RocketState>,
    guard: access::AuthGuard,
    reminder_id: String,
) -> Option<Json<ReminderResponse>> {
    let id = parse_id(&reminder_id)?;
    record::get(guard.grant(), &state.store, Kind::Reminder, id)
        .await
        .map(|record| {
            Json(ReminderResponse {
                reminder: ReminderModel::from_entity(&record),
            })
        })
}

/// Update a reminder. Patch keys overwrite, unmentioned keys are kept.
#[openapi(tag = "Reminders")]
#[put("/reminders/<reminder_id>", data = "<req>")]
pub(super) async fn put(
    state: &State<RocketState>,
    guard: access::AuthGuard,
    reminder_id: String,
    req: Json<Fields>,
) -> Option<Json<ReminderResponse>> {
    let id = parse_id(&reminder_id)?;
    record::update(guard.grant(), &state.store, Kind::Reminder, id, req.into_inner())
        .await
        .map(|record| {
            Json(ReminderResponse {
                reminder: ReminderModel::from_entity(&record),
            })
        })
}

/// Delete a reminder.
#[openapi(tag = "Reminders")]
#[delete("/reminders/<reminder_id>")]
pub(super) async fn delete(
    state: &State<RocketState>,
    guard: access::AuthGuard,
    reminder_id: String,
) -> Option<Json<DeletedResponse>> {
    let id = parse_id(&reminder_id)?;
    record::delete(guard.grant(), &state.store, Kind::Reminder, id)
        .await
        .then(|| Json(DeletedResponse::new(id)))
}
