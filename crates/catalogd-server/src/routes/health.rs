//! Root greeting handler.

use axum::Json;
use serde::Serialize;

/// Fixed greeting payload.
#[derive(Debug, Serialize)]
pub struct Greeting {
    pub message: &'static str,
}

/// GET /
pub async fn root() -> Json<Greeting> {
    Json(Greeting {
        message: "Hello, world!",
    })
}
