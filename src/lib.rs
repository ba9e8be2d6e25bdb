//! HTOJ: online judge web front end.
//!
//! Server-rendered pages in the visitor's language, backed by PostgreSQL and a
//! Valkey cache. The reusable core is [`i18n`]: locale files are loaded once
//! at startup, each request's language is resolved by [`web::locale_middleware`],
//! and translation tables are served to browsers with ETag revalidation.

pub mod cache;
pub mod config;
pub mod db;
pub mod error;
pub mod i18n;
pub mod templates;
pub mod web;
