//! ETag generation for translation tables.

use crate::i18n::Translations;
use sha2::{Digest, Sha256};

/// Number of digest bytes kept in the token (16 hex characters).
const ETAG_BYTES: usize = 8;

/// Compute a quoted cache-validation token for a translation table.
///
/// The table is a `BTreeMap`, so its JSON form has sorted keys and the same
/// contents always hash to the same token across process runs.
pub fn compute_etag(table: &Translations) -> String {
    let canonical = serde_json::to_vec(table).expect("string map serializes to JSON");
    let digest = Sha256::digest(&canonical);
    format!("\"{}\"", hex::encode(&digest[..ETAG_BYTES]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn table(pairs: &[(&str, &str)]) -> Translations {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_etag_format() {
        let etag = compute_etag(&table(&[("greeting", "Hello")]));
        assert_eq!(etag.len(), 18);
        assert!(etag.starts_with('"') && etag.ends_with('"'));
        assert!(etag[1..17].chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_etag_known_value() {
        // sha256(b"{}") = 44136fa355b3678a...
        assert_eq!(compute_etag(&Translations::new()), "\"44136fa355b3678a\"");
    }

    #[test]
    fn test_etag_ignores_insertion_order() {
        let a = table(&[("a", "1"), ("b", "2"), ("c", "3")]);
        let b = table(&[("c", "3"), ("a", "1"), ("b", "2")]);
        assert_eq!(compute_etag(&a), compute_etag(&b));
    }

    #[test]
    fn test_etag_changes_with_value() {
        let a = table(&[("greeting", "Hello")]);
        let b = table(&[("greeting", "Bonjour")]);
        assert_ne!(compute_etag(&a), compute_etag(&b));
    }

    proptest! {
        #[test]
        fn prop_etag_is_deterministic(pairs in prop::collection::btree_map("[a-z.]{1,12}", ".{0,24}", 0..16)) {
            prop_assert_eq!(compute_etag(&pairs), compute_etag(&pairs.clone()));
        }

        #[test]
        fn prop_etag_differs_when_key_added(
            pairs in prop::collection::btree_map("[a-z]{1,8}", "[a-z]{0,8}", 0..8),
            extra in "[A-Z]{1,8}",
        ) {
            let mut extended = pairs.clone();
            extended.insert(extra, "x".to_string());
            prop_assert_ne!(compute_etag(&pairs), compute_etag(&extended));
        }
    }
}
