//! Image serving route handlers.

use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;

use crate::context::AppContext;
use crate::error::AppError;

/// GET /image/:filename
///
/// Validation failures (wrong extension, path components) are 400s; a
/// well-formed but unknown name serves the default image with 200.
pub async fn get_image(
    State(ctx): State<AppContext>,
    Path(filename): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let data = ctx.images.get(&filename)?;

    Ok((
        StatusCode::OK,
        [(header::CONTENT_TYPE, "image/jpeg")],
        data,
    ))
}
