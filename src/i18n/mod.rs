//! Internationalization (i18n) module.
//!
//! Loads locale files from disk once at startup and serves lookups for the
//! rest of the process lifetime. All language-related logic lives here; the
//! HTTP layer only resolves which locale a request wants.
//!
//! # Architecture
//!
//! - `locale`: `Locale` language-tag newtype
//! - `bundle`: the locale store (directory loading and table queries)
//! - `translator`: bound key → string lookup with identity fallback
//! - `etag`: deterministic cache-validation tokens for tables
//! - `context`: per-request `LocaleContext` and its axum extractor
//!
//! # Example
//!
//! ```rust,ignore
//! use htoj::i18n::Bundle;
//!
//! let bundle = Bundle::load_dir("locales", "en")?;
//! let t = bundle.translator("fr");
//! println!("{}", t.translate("nav.home"));
//! ```

mod bundle;
mod context;
mod etag;
mod locale;
mod translator;

use std::collections::BTreeMap;

pub use bundle::Bundle;
pub use context::LocaleContext;
pub use etag::compute_etag;
pub use locale::Locale;
pub use translator::Translator;

#[cfg(test)]
pub(crate) use bundle::test_bundle;

/// One locale's flat key → localized string table.
///
/// Ordered so that serialization (and therefore the ETag) is deterministic.
pub type Translations = BTreeMap<String, String>;
