use crate::{
    error::{ApiError, ApiResult},
    repository_from_request,
    state::AppState,
    validate::Garde,
};
use axum::{
    extract::{rejection::QueryRejection, Path, Query},
    response::IntoResponse,
    routing::{delete, get},
    Json,
};
use entries_dal::entry::{CreateEntry, Entry, EntryRepository};
use http::StatusCode;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

repository_from_request!(EntryRepository);

#[derive(Debug, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct EntryList {
    pub entries: Vec<Entry>,
}

#[derive(Debug, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct DeleteOutcome {
    pub success: bool,
}

#[derive(Debug, Deserialize)]
#[cfg_attr(
    feature = "openapi",
    derive(utoipa::IntoParams),
    into_params(parameter_in = Query)
)]
pub struct DeleteQuery {
    /// Id of entry to delete
    id: Option<String>,
}

fn parse_id(raw: Option<&str>) -> ApiResult<i64> {
    let raw = raw
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| ApiError::InvalidRequest("ID is required".to_string()))?;
    match raw.parse::<i64>() {
        Ok(id) if id > 0 => Ok(id),
        _ => Err(ApiError::InvalidRequest(format!("Invalid ID: {raw}"))),
    }
}

#[cfg(feature = "openapi")]
#[derive(utoipa::OpenApi)]
#[openapi(paths(list, create, delete_by_query, delete_by_path))]
struct ModuleDocs;

#[cfg(feature = "openapi")]
pub fn api_docs() -> utoipa::openapi::OpenApi {
    use utoipa::OpenApi as _;
    ModuleDocs::openapi()
}

#[cfg_attr(feature = "openapi",  utoipa::path(get, path = "", tag = "Entries", operation_id = "listEntries",
    responses((status = StatusCode::OK, description = "All entries, newest first", body = EntryList))))]
pub async fn list(repository: EntryRepository) -> ApiResult<impl IntoResponse> {
    let entries = repository.list().await?;
    debug!("Listed {} entries", entries.len());
    Ok((StatusCode::OK, Json(EntryList { entries })))
}

#[cfg_attr(feature = "openapi",  utoipa::path(post, path = "", tag = "Entries", operation_id = "createEntry",
    request_body = CreateEntry,
    responses((status = StatusCode::CREATED, description = "Created entry", body = Entry),
    (status = StatusCode::UNPROCESSABLE_ENTITY, description = "Invalid entry", body = crate::error::ErrorBody))))]
pub async fn create(
    repository: EntryRepository,
    Garde(Json(payload)): Garde<Json<CreateEntry>>,
) -> ApiResult<impl IntoResponse> {
    let entry = repository.create(payload).await?;
    info!(id = entry.id, "Entry created");
    Ok((StatusCode::CREATED, Json(entry)))
}

#[cfg_attr(feature = "openapi",  utoipa::path(delete, path = "", tag = "Entries", operation_id = "deleteEntry",
    params(DeleteQuery),
    responses((status = StatusCode::OK, description = "Deleted or did not exist", body = DeleteOutcome),
    (status = StatusCode::BAD_REQUEST, description = "Missing or malformed id", body = crate::error::ErrorBody))))]
pub async fn delete_by_query(
    query: Result<Query<DeleteQuery>, QueryRejection>,
    repository: EntryRepository,
) -> ApiResult<impl IntoResponse> {
    let Query(query) = query?;
    let id = parse_id(query.id.as_deref())?;
    remove(&repository, id).await
}

#[cfg_attr(feature = "openapi",  utoipa::path(delete, path = "/{id}", tag = "Entries", operation_id = "deleteEntryById",
    params(("id" = i64, Path, description = "Id of entry to delete")),
    responses((status = StatusCode::OK, description = "Deleted or did not exist", body = DeleteOutcome),
    (status = StatusCode::BAD_REQUEST, description = "Malformed id", body = crate::error::ErrorBody))))]
pub async fn delete_by_path(
    Path(id): Path<String>,
    repository: EntryRepository,
) -> ApiResult<impl IntoResponse> {
    let id = parse_id(Some(&id))?;
    remove(&repository, id).await
}

async fn remove(repository: &EntryRepository, id: i64) -> ApiResult<impl IntoResponse> {
    if repository.delete(id).await? {
        info!(id, "Entry deleted");
    }
    Ok((StatusCode::OK, Json(DeleteOutcome { success: true })))
}

async fn method_not_allowed() -> ApiError {
    ApiError::MethodNotAllowed
}

pub fn router() -> axum::Router<AppState> {
    axum::Router::new()
        .route(
            "/",
            get(list)
                .post(create)
                .delete(delete_by_query)
                .fallback(method_not_allowed),
        )
        .route(
            "/{id}",
            delete(delete_by_path).fallback(method_not_allowed),
        )
}
