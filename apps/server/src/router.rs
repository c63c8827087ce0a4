use crate::routes;
use crate::state::AppState;
use axum::Router;
use axum::middleware;
use axum::routing::get;
use tower_http::trace::TraceLayer;

pub(crate) fn init(state: AppState) -> Router {
    let gated = Router::new()
        .route("/gated/{schema}", get(routes::gated))
        .route_layer(middleware::from_fn_with_state(state.clone(), routes::require_enabled));

    Router::new()
        .route("/config/{schema}", get(routes::current).post(routes::update))
        .merge(gated)
        .merge(vconf::server::router::system_router())
        .layer(middleware::from_fn_with_state(state.clone(), routes::request_cache_boundary))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
