//! Locale store: loads translation tables from a directory and answers lookups.
//!
//! The bundle is built once at startup and never mutated afterwards, so it can
//! be shared (behind an `Arc`) across every request without locking.

use crate::error::LoadError;
use crate::i18n::{compute_etag, Locale, Translations, Translator};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info};

/// Serialization formats recognised in the locale directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LocaleFormat {
    Json,
    Yaml,
}

impl LocaleFormat {
    fn from_path(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()? {
            "json" => Some(Self::Json),
            "yaml" | "yml" => Some(Self::Yaml),
            _ => None,
        }
    }

    fn parse(self, content: &str) -> Result<Translations, String> {
        match self {
            Self::Json => serde_json::from_str(content).map_err(|e| e.to_string()),
            Self::Yaml => serde_yaml::from_str(content).map_err(|e| e.to_string()),
        }
    }
}

#[derive(Debug, Clone)]
struct Entry {
    table: Arc<Translations>,
    etag: String,
}

impl Entry {
    fn new(table: Translations) -> Self {
        let etag = compute_etag(&table);
        Self {
            table: Arc::new(table),
            etag,
        }
    }
}

/// All loaded locale tables plus the default language.
#[derive(Debug)]
pub struct Bundle {
    default_locale: Locale,
    entries: HashMap<Locale, Entry>,
    default_entry: Entry,
    locales: Arc<[Locale]>,
}

impl Bundle {
    /// Load every `<tag>.json`, `<tag>.yaml` and `<tag>.yml` file in `dir`.
    ///
    /// Files are visited in file-name order, which fixes the order reported by
    /// [`locales`](Self::locales). Other extensions and subdirectories are
    /// skipped. Two files resolving to the same tag, or no file for
    /// `default_locale`, fail the load.
    pub fn load_dir(
        dir: impl AsRef<Path>,
        default_locale: impl Into<Locale>,
    ) -> Result<Self, LoadError> {
        let dir = dir.as_ref();
        let default_locale = default_locale.into();

        let read_dir_error = |source| LoadError::ReadDir {
            path: dir.to_path_buf(),
            source,
        };

        let mut paths = Vec::new();
        for entry in fs::read_dir(dir).map_err(read_dir_error)? {
            let entry = entry.map_err(read_dir_error)?;
            if entry.file_type().map_err(read_dir_error)?.is_dir() {
                continue;
            }
            paths.push(entry.path());
        }
        paths.sort();

        let mut origins: HashMap<Locale, PathBuf> = HashMap::new();
        let mut tables = Vec::new();

        for path in paths {
            let Some(format) = LocaleFormat::from_path(&path) else {
                debug!("Skipping non-locale file {}", path.display());
                continue;
            };
            let Some(tag) = path.file_stem().and_then(|s| s.to_str()) else {
                debug!("Skipping locale file with non UTF-8 name {}", path.display());
                continue;
            };
            let locale = Locale::new(tag);

            if let Some(first) = origins.get(&locale) {
                return Err(LoadError::DuplicateLocale {
                    locale: locale.to_string(),
                    first: first.clone(),
                    second: path,
                });
            }

            let content = fs::read_to_string(&path).map_err(|source| LoadError::ReadFile {
                path: path.clone(),
                source,
            })?;
            let table = format.parse(&content).map_err(|message| LoadError::Parse {
                path: path.clone(),
                message,
            })?;

            debug!("Loaded locale '{}' ({} keys) from {}", locale, table.len(), path.display());
            origins.insert(locale.clone(), path);
            tables.push((locale, table));
        }

        let bundle = Self::assemble(default_locale, tables)?;
        info!(
            "Loaded {} locales from {} (default: {})",
            bundle.locales.len(),
            dir.display(),
            bundle.default_locale
        );
        Ok(bundle)
    }

    /// Build a bundle from already parsed tables, kept in the given order.
    fn assemble(
        default_locale: Locale,
        tables: Vec<(Locale, Translations)>,
    ) -> Result<Self, LoadError> {
        let locales: Arc<[Locale]> = tables.iter().map(|(locale, _)| locale.clone()).collect();
        let entries: HashMap<Locale, Entry> = tables
            .into_iter()
            .map(|(locale, table)| (locale, Entry::new(table)))
            .collect();

        let default_entry = entries
            .get(&default_locale)
            .cloned()
            .ok_or_else(|| LoadError::MissingDefault {
                locale: default_locale.to_string(),
            })?;

        Ok(Self {
            default_locale,
            entries,
            default_entry,
            locales,
        })
    }

    /// Whether `tag` has a loaded table. Matching is exact (case-sensitive).
    pub fn has_locale(&self, tag: &str) -> bool {
        self.entries.contains_key(tag)
    }

    /// The table for `tag`, or the default language's table if `tag` is unknown.
    pub fn translations(&self, tag: &str) -> &Translations {
        &self.entry(tag).table
    }

    /// Cache-validation token for the table [`translations`](Self::translations)
    /// would return for `tag`.
    pub fn etag(&self, tag: &str) -> &str {
        &self.entry(tag).etag
    }

    /// A translator bound to `tag`'s table, or to the default table if `tag`
    /// is unknown.
    pub fn translator(&self, tag: &str) -> Translator {
        match self.entries.get_key_value(tag) {
            Some((locale, entry)) => Translator::new(locale.clone(), Arc::clone(&entry.table)),
            None => Translator::new(
                self.default_locale.clone(),
                Arc::clone(&self.default_entry.table),
            ),
        }
    }

    pub fn default_locale(&self) -> &Locale {
        &self.default_locale
    }

    /// Known locales in discovery order.
    pub fn locales(&self) -> &[Locale] {
        &self.locales
    }

    /// Shared handle to the locale list, for attaching to per-request context.
    pub fn shared_locales(&self) -> Arc<[Locale]> {
        Arc::clone(&self.locales)
    }

    fn entry(&self, tag: &str) -> &Entry {
        self.entries.get(tag).unwrap_or(&self.default_entry)
    }
}

#[cfg(test)]
pub(crate) fn test_bundle() -> Bundle {
    let table = |pairs: &[(&str, &str)]| -> Translations {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    };

    Bundle::assemble(
        Locale::from("en"),
        vec![
            (
                Locale::from("en"),
                table(&[("greeting", "Hello"), ("nav.home", "Home")]),
            ),
            (Locale::from("fr"), table(&[("nav.home", "Accueil")])),
            (
                Locale::from("vi"),
                table(&[("greeting", "Xin chào"), ("nav.home", "Trang chủ")]),
            ),
        ],
    )
    .expect("test bundle has a default locale")
}
