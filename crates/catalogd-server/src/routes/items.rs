//! Item route handlers.

use axum::extract::{Multipart, Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use catalogd_db::models::Item;
use catalogd_db::pool::get_conn;
use catalogd_db::queries::items;

use crate::context::AppContext;
use crate::error::AppError;

/// GET /items
pub async fn list_items(State(ctx): State<AppContext>) -> Result<Json<Vec<Item>>, AppError> {
    let conn = get_conn(&ctx.db)?;
    let all = items::list_items(&conn)?;
    Ok(Json(all))
}

/// GET /items/:id
pub async fn get_item(
    State(ctx): State<AppContext>,
    Path(id): Path<i64>,
) -> Result<Json<Item>, AppError> {
    let conn = get_conn(&ctx.db)?;
    let item = items::get_item(&conn, id)?
        .ok_or_else(|| catalogd_core::Error::not_found("item", id))?;
    Ok(Json(item))
}

/// Query parameters for item search.
#[derive(Debug, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub keyword: String,
}

/// GET /search?keyword=K
pub async fn search_items(
    State(ctx): State<AppContext>,
    Query(params): Query<SearchParams>,
) -> Result<Json<Vec<Item>>, AppError> {
    if params.keyword.is_empty() {
        return Err(catalogd_core::Error::Validation("You must specify a keyword".into()).into());
    }

    tracing::info!("Searching for items including keyword: {}", params.keyword);

    let conn = get_conn(&ctx.db)?;
    let matches = items::search_items(&conn, &params.keyword)?;
    Ok(Json(matches))
}

/// POST /items (multipart form: name, category, image)
///
/// Stores the image blob first, then the row referencing it. Success is an
/// empty 204; the created row is observable via GET /items.
pub async fn create_item(
    State(ctx): State<AppContext>,
    mut multipart: Multipart,
) -> Result<StatusCode, AppError> {
    let mut name: Option<String> = None;
    let mut category: Option<String> = None;
    let mut image: Option<bytes::Bytes> = None;

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        catalogd_core::Error::Validation(format!("Malformed multipart body: {e}"))
    })? {
        let field_name = field.name().map(str::to_string);
        match field_name.as_deref() {
            Some("name") => {
                name = Some(field.text().await.map_err(|e| {
                    catalogd_core::Error::Validation(format!("Could not read name field: {e}"))
                })?);
            }
            Some("category") => {
                category = Some(field.text().await.map_err(|e| {
                    catalogd_core::Error::Validation(format!("Could not read category field: {e}"))
                })?);
            }
            Some("image") => {
                image = Some(field.bytes().await.map_err(|e| {
                    catalogd_core::Error::Validation(format!("Could not read image from file: {e}"))
                })?);
            }
            _ => {}
        }
    }

    let name =
        name.ok_or_else(|| catalogd_core::Error::Validation("name field is required".into()))?;
    let category = category
        .ok_or_else(|| catalogd_core::Error::Validation("category field is required".into()))?;
    let image =
        image.ok_or_else(|| catalogd_core::Error::Validation("image field is required".into()))?;

    let image_id = ctx.images.put(&image)?;

    let conn = get_conn(&ctx.db)?;
    let item = items::insert_item(&conn, &name, &category, &image_id)?;

    tracing::info!(id = item.id, image_id = %item.image_id, "Created item");

    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /items/:id
///
/// Deleting an absent id still succeeds; storage errors propagate.
pub async fn delete_item(
    State(ctx): State<AppContext>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    tracing::info!("Deleting item with id: {id}");

    let conn = get_conn(&ctx.db)?;
    let removed = items::delete_item(&conn, id)?;
    if !removed {
        tracing::debug!("Delete of absent item {id} was a no-op");
    }

    Ok(StatusCode::NO_CONTENT)
}
