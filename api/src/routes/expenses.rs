use chrono::{DateTime, Utc};
use rocket::{delete, get, post, put, serde::json::Json, FromForm, State};
use rocket_okapi::openapi;
use schemars::JsonSchema;
use serde::Serialize;
use uuid::Uuid;

use app::record::{self, filter, Fields, Kind};

use crate::{
    access,
    error::{self, JsonError, JsonResult},
    state::RocketState,
};

use super::{parse_id, DeletedResponse};

#[derive(Debug, Serialize, JsonSchema)]
pub(super) struct ExpenseResponse {
    expense: ExpenseModel,
}

#[derive(Debug, Serialize, JsonSchema)]
pub(super) struct ExpensesResponse {
    expenses: Vec<ExpenseModel>,
}

#[derive(Debug, Serialize, JsonSchema)]
struct ExpenseModel {
    /// Expense identifier.
    id: Uuid,
    /// Creation time, stamped by the server at tracking time.
    created_at: Option<DateTime<Utc>>,
    /// The expense attributes, e.g. amount and category.
    #[serde(flatten)]
    fields: Fields,
}

impl ExpenseModel {
    fn from_entity(record: &record::Record) -> Self {
        Self {
            id: record.id.0,
            created_at: record.created,
            fields: record.fields.clone(),
        }
    }
}

/// The optional expense report filters. All of them compose; a missing
/// parameter simply doesn't constrain the result.
#[derive(FromForm, JsonSchema)]
pub(super) struct ExpenseFilters {
    /// Inclusive lower creation-time bound, ISO-8601.
    date_from: Option<String>,
    /// Inclusive upper creation-time bound, ISO-8601.
    date_to: Option<String>,
    /// Exact category match.
    category: Option<String>,
    /// Inclusive lower amount bound, decimal.
    amount_min: Option<String>,
    /// Inclusive upper amount bound, decimal.
    amount_max: Option<String>,
}

#[derive(Debug, Serialize, JsonSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub(super) enum FilterError {
    /// A date parameter was not a valid ISO-8601 date.
    InvalidDate,
    /// An amount parameter was not a valid decimal number.
    InvalidAmount,
}

impl ExpenseFilters {
    fn compose(self) -> Result<filter::Filter, JsonError<FilterError>> {
        filter::Params {
            date_from: self.date_from,
            date_to: self.date_to,
            category: self.category,
            amount_min: self.amount_min,
            amount_max: self.amount_max,
        }
        .compose()
        .map_err(|e| match e {
            filter::Error::InvalidDate(date) => error::bad_request(
                FilterError::InvalidDate,
                format!("{:?} is not a valid date", date),
            ),
            filter::Error::InvalidAmount(amount) => error::bad_request(
                FilterError::InvalidAmount,
                format!("{:?} is not a valid amount", amount),
            ),
        })
    }
}

/// Track a new expense. The creation time is stamped by the server; a
/// client-supplied one is ignored.
#[openapi(tag = "Expenses")]
#[post("/expenses", data = "<req>")]
pub(super) async fn post(
    state: &State<RocketState>,
    guard: access::AuthGuard,
    req: Json<Fields>,
) -> Json<ExpenseResponse> {
    let record = record::create(guard.grant(), &state.store, Kind::Expense, req.into_inner()).await;
    Json(ExpenseResponse {
        expense: ExpenseModel::from_entity(&record),
    })
}

/// List expenses, optionally narrowed by date range, category, and amount
/// range.
#[openapi(tag = "Expenses")]
#[get("/expenses?<filters..>")]
pub(super) async fn list(
    state: &State<RocketState>,
    guard: access::AuthGuard,
    filters: ExpenseFilters,
) -> JsonResult<ExpensesResponse, FilterError> {
    let filter = filters.compose()?;
    Ok(Json(ExpensesResponse {
        expenses: record::list(guard.grant(), &state.store, Kind::Expense, &filter)
            .await
            .iter()
            .map(ExpenseModel::from_entity)
            .collect(),
    }))
}

/// Get expense details.
#[openapi(tag = "Expenses")]
#[get("/expenses/<expense_id>")]
pub(super) async fn get(
    state: &State<RocketState>,
    guard: access::AuthGuard,
    expense_id: String,
) -> Option<Json<ExpenseResponse>> {
    let id = parse_id(&expense_id)?;
    record::get(guard.grant(), &state.store, Kind::Expense, id)
        .await
        .map(|record| {
            Json(ExpenseResponse {
                expense: ExpenseModel::from_entity(&record),
            })
        })
}

/// Update an expense. Patch keys overwrite, unmentioned keys are kept.
#[openapi(tag = "Expenses")]
#[put("/expenses/<expense_id>", data = "<req>")]
pub(super) async fn put(
    state: &State<RocketState>,
    guard: access::AuthGuard,
    expense_id: String,
    req: Json<Fields>,
) -> Option<Json<ExpenseResponse>> {
    let id = parse_id(&expense_id)?;
    record::update(guard.grant(), &state.store, Kind::Expense, id, req.into_inner())
        .await
        .map(|record| {
            Json(ExpenseResponse {
                expense: ExpenseModel::from_entity(&record),
            })
        })
}

/// Delete an expense.
#[openapi(tag = "Expenses")]
#[delete("/expenses/<expense_id>")]
pub(super) async fn delete(
    state: &State<RocketState>,
    guard: access::AuthGuard,
    expense_id: String,
) -> Option<Json<DeletedResponse>> {
    let id = parse_id(&expense_id)?;
    record::delete(guard.grant(), &state.store, Kind::Expense, id)
        .await
        .then(|| Json(DeletedResponse::new(id)))
}
