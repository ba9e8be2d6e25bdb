//! Translator: a bound, pure key → string lookup.

use crate::i18n::{Locale, Translations};
use std::sync::Arc;

/// Lookup capability bound to one immutable translation table.
///
/// Cloning is cheap (the table is shared), and a translator can be used from
/// any number of threads at once.
#[derive(Debug, Clone)]
pub struct Translator {
    locale: Locale,
    table: Arc<Translations>,
}

impl Translator {
    pub(crate) fn new(locale: Locale, table: Arc<Translations>) -> Self {
        Self { locale, table }
    }

    /// Translate `key`, falling back to the key itself when the bound table
    /// has no entry for it.
    ///
    /// # Example
    /// ```ignore
    /// let t = bundle.translator("fr");
    /// assert_eq!(t.translate("nav.home"), "Accueil");
    /// assert_eq!(t.translate("no.such.key"), "no.such.key");
    /// ```
    pub fn translate<'a>(&'a self, key: &'a str) -> &'a str {
        self.get(key).unwrap_or(key)
    }

    /// Look up `key` without the identity fallback.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.table.get(key).map(String::as_str)
    }

    /// The locale whose table this translator is bound to. For an unknown
    /// requested tag this is the bundle's default locale.
    pub fn locale(&self) -> &Locale {
        &self.locale
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn translator() -> Translator {
        let mut table = Translations::new();
        table.insert("nav.home".to_string(), "Accueil".to_string());
        table.insert("empty".to_string(), String::new());
        Translator::new(Locale::from("fr"), Arc::new(table))
    }

    #[test]
    fn test_translate_known_key() {
        assert_eq!(translator().translate("nav.home"), "Accueil");
    }

    #[test]
    fn test_translate_missing_key_returns_key() {
        assert_eq!(translator().translate("greeting"), "greeting");
    }

    #[test]
    fn test_translate_empty_value_is_not_missing() {
        assert_eq!(translator().translate("empty"), "");
    }

    #[test]
    fn test_get_missing_key() {
        assert_eq!(translator().get("greeting"), None);
        assert_eq!(translator().get("nav.home"), Some("Accueil"));
    }

    #[test]
    fn test_clone_shares_table() {
        let t = translator();
        let cloned = t.clone();
        assert!(Arc::ptr_eq(&t.table, &cloned.table));
        assert_eq!(cloned.locale(), "fr");
    }
}
