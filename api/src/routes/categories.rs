use rocket::{delete, get, post, put, serde::json::Json, State};
use rocket_okapi::openapi;
use schemars::JsonSchema;
use serde::Serialize;
use uuid::Uuid;

use app::record::{self, Fields, Filter, Kind};

use crate::{access, state::RocketState};

use super::{parse_id, DeletedResponse};

#[derive(Debug, Serialize, JsonSchema)]
pub(super) struct CategoryResponse {
    category: CategoryModel,
}

#[derive(Debug, Serialize, JsonSchema)]
pub(super) struct CategoriesResponse {
    categories: Vec<CategoryModel>,
}

#[derive(Debug, Serialize, JsonSchema)]
struct CategoryModel {
    /// Category identifier.
    id: Uuid,
    /// The category attributes, e.g. name. Expenses reference categories by
    /// name, not by id.
    #[serde(flatten)]
    fields: Fields,
}

impl CategoryModel {
    fn from_entity(record: &record::Record) -> Self {
        Self {
            id: record.id.0,
            fields: record.fields.clone(),
        }
    }
}

/// Create a new category.
#[openapi(tag = "Categories")]
#[post("/categories", data = "<req>")]
pub(super) async fn post(
    state: &State<RocketState>,
    guard: access::AuthGuard,
    req: Json<Fields>,
) -> Json<CategoryResponse> {
    let record = record::create(guard.grant(), &state.store, Kind::Category, req.into_inner()).await;
    Json(CategoryResponse {
        category: CategoryModel::from_entity(&record),
    })
}

/// List categories.
#[openapi(tag = "Categories")]
#[get("/categories")]
pub(super) async fn list(
    state: &State<RocketState>,
    guard: access::AuthGuard,
) -> Json<CategoriesResponse> {
    Json(CategoriesResponse {
        categories: record::list(guard.grant(), &state.store, Kind::Category, &Filter::default())
            .await
            .iter()
            .map(CategoryModel::from_entity)
            .collect(),
    })
}

/// Get category details.
#[openapi(tag = "Categories")]
#[get("/categories/<category_id>")]
pub(super) async fn get(
    state: &State<RocketState>,
    guard: access::AuthGuard,
    category_id: String,
) -> Option<Json<CategoryResponse>> {
    let id = parse_id(&category_id)?;
    record::get(guard.grant(), &state.store, Kind::Category, id)
        .await
        .map(|record| {
            Json(CategoryResponse {
                category: CategoryModel::from_entity(&record),
            })
        })
}

/// Update a category. Patch keys overwrite, unmentioned keys are kept.
#[openapi(tag = "Categories")]
#[put("/categories/<category_id>", data = "<req>")]
pub(super) async fn put(
    state: &State<RocketState>,
    guard: access::AuthGuard,
    category_id: String,
    req: Json<Fields>,
) -> Option<Json<CategoryResponse>> {
    let id = parse_id(&category_id)?;
    record::update(guard.grant(), &state.store, Kind::Category, id, req.into_inner())
        .await
        .map(|record| {
            Json(CategoryResponse {
                category: CategoryModel::from_entity(&record),
            })
        })
}

/// Delete a category.
#[openapi(tag = "Categories")]
#[delete("/categories/<category_id>")]
pub(super) async fn delete(
    state: &State<RocketState>,
    guard: access::AuthGuard,
    category_id: String,
) -> Option<Json<DeletedResponse>> {
    let id = parse_id(&category_id)?;
    record::delete(guard.grant(), &state.store, Kind::Category, id)
        .await
        .then(|| Json(DeletedResponse::new(id)))
}
