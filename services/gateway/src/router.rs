use crate::handlers::{admin, program, vote, ws};
use crate::state::AppState;
use axum::{
    routing::{get, post, put},
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub fn create_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route(
            "/programs",
            get(program::list_programs).post(program::create_program),
        )
        .route(
            "/programs/:id",
            put(program::update_program).delete(program::delete_program),
        )
        .route("/vote", post(vote::cast_vote))
        .route("/vote/revoke", post(vote::revoke_vote))
        .route("/vote/status", get(vote::vote_status))
        .route("/reset", post(admin::reset))
        .route(
            "/settings",
            get(admin::get_settings).post(admin::update_settings),
        )
        .route("/admin/login", post(admin::login))
        .route("/ws", get(ws::ws_handler));

    Router::new()
        .nest("/api", api_routes)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
