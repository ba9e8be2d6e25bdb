//! Per-request locale context.
//!
//! The locale resolver middleware stores a [`LocaleContext`] in the request
//! extensions; handlers take it as an extractor. This is axum's request-local
//! storage, equivalent to passing the value explicitly down the call chain.

use crate::i18n::{Bundle, Locale, Translator};
use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use std::convert::Infallible;
use std::sync::Arc;
use tracing::debug;

/// Translator, resolved locale and known locale list for one request.
#[derive(Debug, Clone)]
pub struct LocaleContext {
    pub translator: Translator,
    pub locale: Locale,
    pub locales: Arc<[Locale]>,
}

impl LocaleContext {
    /// Bind a context for `locale`. The translator falls back to the default
    /// table if `locale` is not known to `bundle`.
    pub fn new(bundle: &Bundle, locale: Locale) -> Self {
        Self {
            translator: bundle.translator(locale.as_str()),
            locale,
            locales: bundle.shared_locales(),
        }
    }

    /// Context for the bundle's default language.
    pub fn default_for(bundle: &Bundle) -> Self {
        Self::new(bundle, bundle.default_locale().clone())
    }

    /// Shorthand for `self.translator.translate(key)`.
    pub fn t<'a>(&'a self, key: &'a str) -> &'a str {
        self.translator.translate(key)
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for LocaleContext
where
    Arc<Bundle>: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        if let Some(ctx) = parts.extensions.get::<LocaleContext>() {
            return Ok(ctx.clone());
        }

        // Resolver did not run for this request (e.g. a router without the
        // middleware layer); fall back to the default language.
        let bundle = Arc::<Bundle>::from_ref(state);
        debug!("No locale context on request, using default '{}'", bundle.default_locale());
        let ctx = LocaleContext::default_for(&bundle);
        parts.extensions.insert(ctx.clone());
        Ok(ctx)
    }
}
