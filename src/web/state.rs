use crate::cache::Cache;
use crate::db::Database;
use crate::i18n::Bundle;
use axum::extract::FromRef;
use std::sync::Arc;

/// Shared application state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub bundle: Arc<Bundle>,
    /// Add the `Secure` attribute to the language cookie.
    pub cookie_secure: bool,
    pub db: Option<Database>,
    pub cache: Option<Cache>,
}

impl AppState {
    /// State with only the locale bundle; collaborators can be attached with
    /// [`with_database`](Self::with_database) and [`with_cache`](Self::with_cache).
    pub fn new(bundle: Arc<Bundle>) -> Self {
        Self {
            bundle,
            cookie_secure: false,
            db: None,
            cache: None,
        }
    }

    pub fn with_cookie_secure(mut self, secure: bool) -> Self {
        self.cookie_secure = secure;
        self
    }

    pub fn with_database(mut self, db: Database) -> Self {
        self.db = Some(db);
        self
    }

    pub fn with_cache(mut self, cache: Cache) -> Self {
        self.cache = Some(cache);
        self
    }
}

impl FromRef<AppState> for Arc<Bundle> {
    fn from_ref(state: &AppState) -> Self {
        Arc::clone(&state.bundle)
    }
}
