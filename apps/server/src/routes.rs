use crate::auth::Superuser;
use crate::error::ApiError;
use crate::state::AppState;
use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Request, State};
use axum::http::StatusCode;
use axum::middleware::Next;
use axum::response::Response;
use serde_json::{Value, json};
use tracing::info;
use vconf::domain::Snapshot;
use vconf::models::{ConfigError, require_config};

/// `GET /config/{schema}`: the current unkeyed snapshot.
pub(crate) async fn current(
    State(state): State<AppState>,
    Superuser(_): Superuser,
    Path(schema): Path<String>,
) -> Result<Json<Snapshot>, ApiError> {
    let model = state.configs.model(&schema)?;
    Ok(Json(model.current(&[])?))
}

/// `POST /config/{schema}`: appends the posted fields unless they equal the current snapshot.
pub(crate) async fn update(
    State(state): State<AppState>,
    Superuser(actor): Superuser,
    Path(schema): Path<String>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, Json<Snapshot>), ApiError> {
    let model = state.configs.model(&schema)?;
    let Json(body) =
        body.map_err(|e| ApiError::BadRequest { message: e.body_text().into(), context: None })?;
    let Value::Object(fields) = body else {
        return Err(ApiError::BadRequest {
            message: "expected a JSON object of field values".into(),
            context: Some(schema.into()),
        });
    };

    if model.equal_to_current(&fields)? {
        let identity = model.candidate(&fields)?.identity(model.schema());
        return Ok((StatusCode::OK, Json(model.current(identity.values())?)));
    }

    let saved = model.save_fields(&fields, Some(&actor.username))?;
    info!(schema = model.name(), id = saved.id, username = %actor.username, "Configuration posted");
    Ok((StatusCode::CREATED, Json(saved)))
}

/// `GET /gated/{schema}`: reachable only while the schema is enabled.
pub(crate) async fn gated(Path(schema): Path<String>) -> Json<Value> {
    Json(json!({ "schema": schema, "enabled": true }))
}

/// Lets the request through only when the unkeyed configuration of `{schema}` is enabled.
pub(crate) async fn require_enabled(
    State(state): State<AppState>,
    Path(schema): Path<String>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let model = state.configs.model(&schema)?;
    require_config(model, Vec::new(), |()| Ok::<_, ConfigError>(()))(())?;
    Ok(next.run(request).await)
}

/// Drops the process-local cache tier once a request has been served.
pub(crate) async fn request_cache_boundary(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let response = next.run(request).await;
    state.configs.clear_request_cache();
    response
}
