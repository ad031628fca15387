use axum::response::{IntoResponse, Response};
use axum::Json;
use http::StatusCode;

/// The relay's only dependency is the remote pinning API, which is not
/// probed here: each upload request carries its own deadline, and a
/// status probe would spend provider quota. Ready means the process is
/// up with a constructed provider client.
#[tracing::instrument]
pub async fn handler() -> Response {
    let msg = serde_json::json!({"status": "ok"});
    (StatusCode::OK, Json(msg)).into_response()
}
