//! Locale resolver middleware.
//!
//! Runs once per request before any handler: picks the request language from
//! `?lang=`, then the `lang` cookie, then the bundle default; persists the
//! choice in the cookie; declares it in `Content-Language`; and attaches a
//! [`LocaleContext`] to the request.

use crate::i18n::{Bundle, Locale, LocaleContext};
use crate::web::AppState;
use axum::{
    extract::{Query, Request, State},
    http::{
        header::{CONTENT_LANGUAGE, COOKIE, SET_COOKIE},
        HeaderMap, HeaderValue, Uri,
    },
    middleware::Next,
    response::Response,
};
use tracing::{debug, warn};

/// Name of the query parameter and of the cookie carrying the language.
pub const LANG_PARAM: &str = "lang";

/// Lifetime of the language cookie: 30 days.
pub const LANG_COOKIE_MAX_AGE: u64 = 30 * 24 * 60 * 60;

/// Decide the request language.
///
/// A non-empty `query` is the only candidate considered when present, even if
/// it turns out to be unknown; the `cookie` is used only when no query value
/// was given. The candidate is lowercased and checked against the bundle once;
/// anything unknown resolves to the default locale.
pub fn resolve_language(bundle: &Bundle, query: Option<&str>, cookie: Option<&str>) -> Locale {
    let candidate = query
        .filter(|q| !q.is_empty())
        .or(cookie)
        .map(str::to_lowercase)
        .unwrap_or_default();

    if bundle.has_locale(&candidate) {
        Locale::new(candidate)
    } else {
        if !candidate.is_empty() {
            debug!(
                "i18n: unknown locale {:?}, falling back to {}",
                candidate,
                bundle.default_locale()
            );
        }
        bundle.default_locale().clone()
    }
}

/// Middleware entry point; install with `axum::middleware::from_fn_with_state`.
pub async fn locale_middleware(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Response {
    let query = query_value(req.uri(), LANG_PARAM);
    let cookie = cookie_value(req.headers(), LANG_PARAM);

    let locale = resolve_language(&state.bundle, query.as_deref(), cookie.as_deref());
    req.extensions_mut()
        .insert(LocaleContext::new(&state.bundle, locale.clone()));

    let mut response = next.run(req).await;

    let headers = response.headers_mut();
    match HeaderValue::from_str(&lang_cookie(&locale, state.cookie_secure)) {
        Ok(value) => {
            headers.append(SET_COOKIE, value);
        }
        Err(e) => warn!("Cannot encode language cookie for {}: {}", locale, e),
    }
    if let Ok(value) = HeaderValue::from_str(locale.as_str()) {
        headers.insert(CONTENT_LANGUAGE, value);
    }

    response
}

/// First value of query parameter `name`; repeated parameters do not
/// invalidate the rest of the query.
pub fn query_value(uri: &Uri, name: &str) -> Option<String> {
    let Query(pairs) = Query::<Vec<(String, String)>>::try_from_uri(uri).ok()?;
    pairs.into_iter().find(|(k, _)| k == name).map(|(_, v)| v)
}

/// `Set-Cookie` value persisting `locale` for the whole site.
pub fn lang_cookie(locale: &Locale, secure: bool) -> String {
    let mut cookie = format!(
        "{}={}; Path=/; Max-Age={}; SameSite=Lax",
        LANG_PARAM, locale, LANG_COOKIE_MAX_AGE
    );
    if secure {
        cookie.push_str("; Secure");
    }
    cookie
}

/// First value of cookie `name` across all `Cookie` headers.
pub fn cookie_value(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(';'))
        .filter_map(|pair| pair.split_once('='))
        .find(|(k, _)| k.trim() == name)
        .map(|(_, v)| v.trim().trim_matches('"').to_string())
        .filter(|v| !v.is_empty())
}
