//! HTTP layer: router, locale resolver middleware and handlers.

mod handlers;
mod locale;
mod state;

use axum::{middleware, routing::get, Router};
use std::path::Path;
use tower_http::{services::ServeDir, trace::TraceLayer};

pub use handlers::TRANSLATIONS_CACHE_CONTROL;
pub use locale::{
    cookie_value, lang_cookie, locale_middleware, query_value, resolve_language, LANG_COOKIE_MAX_AGE,
    LANG_PARAM,
};
pub use state::AppState;

use handlers::{
    classes_handler, contests_handler, groups_handler, home_handler, organizations_handler,
    ping_handler, problems_handler, ranking_handler, submissions_handler, translations_handler,
};

/// Build the application router. Every route passes through the locale resolver.
pub fn router(state: AppState) -> Router {
    finish(routes(), state)
}

/// Same as [`router`], additionally serving `public_dir` under `/public`.
pub fn router_with_assets(state: AppState, public_dir: impl AsRef<Path>) -> Router {
    finish(
        routes().nest_service("/public", ServeDir::new(public_dir.as_ref())),
        state,
    )
}

fn finish(routes: Router<AppState>, state: AppState) -> Router {
    routes
        .layer(middleware::from_fn_with_state(state.clone(), locale_middleware))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home_handler))
        .route("/problems", get(problems_handler))
        .route("/contests", get(contests_handler))
        .route("/submissions", get(submissions_handler))
        .route("/organizations", get(organizations_handler))
        .route("/organizations/classes", get(classes_handler))
        .route("/organizations/groups", get(groups_handler))
        .route("/ranking", get(ranking_handler))
        .route("/ping", get(ping_handler))
        .route("/api/translations/:lang", get(translations_handler))
}
