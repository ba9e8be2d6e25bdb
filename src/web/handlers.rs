use crate::error::AppError;
use crate::i18n::LocaleContext;
use crate::templates::{self, Page};
use crate::web::AppState;
use axum::{
    extract::{Path, State},
    http::{
        header::{CACHE_CONTROL, ETAG, IF_NONE_MATCH},
        HeaderMap, HeaderValue, StatusCode,
    },
    response::{Html, IntoResponse, Response},
    Json,
};
use serde_json::{json, Map, Value};
use tracing::warn;

/// Shared caches may keep a translation payload for an hour, then must revalidate.
pub const TRANSLATIONS_CACHE_CONTROL: &str = "public, max-age=3600, must-revalidate";

/// `GET /api/translations/:lang`
///
/// Serves the full translation table for `lang` with an ETag; a request whose
/// `If-None-Match` equals the current ETag gets `304 Not Modified`.
pub async fn translations_handler(
    State(state): State<AppState>,
    Path(lang): Path<String>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    if !state.bundle.has_locale(&lang) {
        return Err(AppError::LanguageNotFound);
    }

    let etag = state.bundle.etag(&lang);
    let etag_value = HeaderValue::from_str(etag)
        .map_err(|e| anyhow::anyhow!("ETag {} is not a valid header value: {}", etag, e))?;

    let not_modified = headers
        .get(IF_NONE_MATCH)
        .map(|v| v.as_bytes() == etag.as_bytes())
        .unwrap_or(false);

    let mut response = if not_modified {
        StatusCode::NOT_MODIFIED.into_response()
    } else {
        Json(state.bundle.translations(&lang)).into_response()
    };

    let response_headers = response.headers_mut();
    response_headers.insert(
        CACHE_CONTROL,
        HeaderValue::from_static(TRANSLATIONS_CACHE_CONTROL),
    );
    response_headers.insert(ETAG, etag_value);

    Ok(response)
}

/// `GET /ping`
///
/// Always reports `"status": "ok"` while the process is serving. Configured
/// collaborators are probed and reported alongside.
pub async fn ping_handler(State(state): State<AppState>) -> Json<Value> {
    let mut body = Map::new();
    body.insert("status".to_string(), json!("ok"));

    if let Some(db) = &state.db {
        let status = match db.ping().await {
            Ok(()) => "ok",
            Err(e) => {
                warn!("Health check: {:#}", e);
                "unavailable"
            }
        };
        body.insert("database".to_string(), json!(status));
    }

    if let Some(cache) = &state.cache {
        let status = match cache.ping().await {
            Ok(()) => "ok",
            Err(e) => {
                warn!("Health check: {:#}", e);
                "unavailable"
            }
        };
        body.insert("cache".to_string(), json!(status));
    }

    Json(Value::Object(body))
}

fn page(page: Page, ctx: &LocaleContext) -> Html<String> {
    Html(templates::render(page, ctx))
}

pub async fn home_handler(ctx: LocaleContext) -> Html<String> {
    page(Page::Home, &ctx)
}

pub async fn problems_handler(ctx: LocaleContext) -> Html<String> {
    page(Page::Problems, &ctx)
}

pub async fn contests_handler(ctx: LocaleContext) -> Html<String> {
    page(Page::Contests, &ctx)
}

pub async fn submissions_handler(ctx: LocaleContext) -> Html<String> {
    page(Page::Submissions, &ctx)
}

pub async fn organizations_handler(ctx: LocaleContext) -> Html<String> {
    page(Page::Organizations, &ctx)
}

pub async fn classes_handler(ctx: LocaleContext) -> Html<String> {
    page(Page::Classes, &ctx)
}

pub async fn groups_handler(ctx: LocaleContext) -> Html<String> {
    page(Page::Groups, &ctx)
}

pub async fn ranking_handler(ctx: LocaleContext) -> Html<String> {
    page(Page::Ranking, &ctx)
}
