//! Listing store: the whitelist/blacklist sets and their reconciliation.
//!
//! The store is the only persisted state. It is loaded once per scrape
//! pass, reconciled in memory, and written back atomically. Links are
//! compared by exact string equality; no URL normalization happens
//! anywhere, since normalizing would silently change dedup and
//! blacklist-matching outcomes.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::error::{StoreError, StoreResult};

/// Persisted whitelist/blacklist pair.
///
/// Invariant: `whitelist` and `blacklist` are disjoint after every
/// reconciliation and every promote.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListingStore {
    /// Links currently of interest
    pub whitelist: BTreeSet<String>,

    /// Links permanently suppressed, regardless of future discovery
    pub blacklist: BTreeSet<String>,
}

impl ListingStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge newly found links into the whitelist.
    ///
    /// Exactly two steps, in this order: union the new links into the
    /// whitelist (intra-pass and cross-run duplicates collapse here), then
    /// subtract the blacklist (blacklisted links are never re-admitted,
    /// even when a source offers them again). The blacklist is unchanged.
    ///
    /// Idempotent, and independent of the order of `new_links`.
    pub fn reconcile(mut self, new_links: impl IntoIterator<Item = String>) -> Self {
        self.whitelist.extend(new_links);
        self.whitelist = &self.whitelist - &self.blacklist;
        self
    }

    /// Permanently suppress a link.
    ///
    /// Removes it from the whitelist when present (absence is an
    /// idempotent no-op, not a fault) and inserts it into the blacklist
    /// unconditionally. There is no inverse operation.
    pub fn promote_to_blacklist(&mut self, link: &str) {
        self.whitelist.remove(link);
        self.blacklist.insert(link.to_string());
    }

    /// Whether the disjointness invariant holds.
    pub fn is_consistent(&self) -> bool {
        self.whitelist.is_disjoint(&self.blacklist)
    }
}

/// On-disk JSON home of a [`ListingStore`].
///
/// The file holds one JSON object with exactly the keys `"whitelist"` and
/// `"blacklist"`, each an array of strings with no guaranteed order. It is
/// read in full and fully rewritten; the write goes to a sibling temp file
/// first and is renamed into place so a failed write cannot corrupt prior
/// state.
#[derive(Debug, Clone)]
pub struct ListingFile {
    path: PathBuf,
}

impl ListingFile {
    /// Point at a listing file. Nothing is read until [`load`](Self::load).
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The underlying path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the store. A missing or malformed file is an error; a scrape
    /// pass must not run against untrusted state.
    pub fn load(&self) -> StoreResult<ListingStore> {
        let raw = fs::read_to_string(&self.path).map_err(|source| StoreError::Read {
            path: self.path.clone(),
            source,
        })?;
        serde_json::from_str(&raw).map_err(|source| StoreError::Malformed {
            path: self.path.clone(),
            source,
        })
    }

    /// Load the store, treating a missing file as an empty store. First
    /// runs bootstrap through this; a present-but-unreadable or malformed
    /// file is still an error.
    pub fn load_or_default(&self) -> StoreResult<ListingStore> {
        match fs::read_to_string(&self.path) {
            Ok(raw) => serde_json::from_str(&raw).map_err(|source| StoreError::Malformed {
                path: self.path.clone(),
                source,
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no listing file yet, starting empty");
                Ok(ListingStore::new())
            }
            Err(source) => Err(StoreError::Read {
                path: self.path.clone(),
                source,
            }),
        }
    }

    /// Write the store back, all-or-nothing.
    pub fn save(&self, store: &ListingStore) -> StoreResult<()> {
        let json = serde_json::to_string_pretty(store).map_err(|source| StoreError::Encode {
            path: self.path.clone(),
            source,
        })?;

        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, json).map_err(|source| StoreError::Write {
            path: tmp.clone(),
            source,
        })?;
        fs::rename(&tmp, &self.path).map_err(|source| StoreError::Write {
            path: self.path.clone(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn store(whitelist: &[&str], blacklist: &[&str]) -> ListingStore {
        ListingStore {
            whitelist: whitelist.iter().map(|s| s.to_string()).collect(),
            blacklist: blacklist.iter().map(|s| s.to_string()).collect(),
        }
    }

    fn links(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_reconcile_dedups() {
        let result = ListingStore::new().reconcile(links(&["a", "a", "b"]));
        assert_eq!(result.whitelist, store(&["a", "b"], &[]).whitelist);
    }

    #[test]
    fn test_reconcile_keeps_existing_whitelist() {
        let result = store(&["old"], &[]).reconcile(links(&["new"]));
        assert_eq!(result, store(&["new", "old"], &[]));
    }

    #[test]
    fn test_blacklist_is_sticky() {
        let result = store(&[], &["bad"]).reconcile(links(&["bad", "good"]));
        assert_eq!(result, store(&["good"], &["bad"]));
    }

    #[test]
    fn test_reconcile_purges_blacklisted_leftovers() {
        // A link promoted out-of-band may still sit in a stale whitelist;
        // the subtraction step removes it even without rediscovery.
        let result = store(&["bad", "fine"], &["bad"]).reconcile(links(&[]));
        assert_eq!(result, store(&["fine"], &["bad"]));
    }

    #[test]
    fn test_promote_moves_link() {
        let mut s = store(&["x", "y"], &[]);
        s.promote_to_blacklist("x");
        assert_eq!(s, store(&["y"], &["x"]));
    }

    #[test]
    fn test_promote_absent_link_still_blacklists() {
        let mut s = store(&["x", "y"], &[]);
        s.promote_to_blacklist("z");
        assert_eq!(s, store(&["x", "y"], &["z"]));
    }

    #[test]
    fn test_promote_is_idempotent() {
        let mut s = store(&["x"], &[]);
        s.promote_to_blacklist("x");
        s.promote_to_blacklist("x");
        assert_eq!(s, store(&[], &["x"]));
    }

    #[test]
    fn test_no_normalization_on_equality() {
        // Trailing slash differences are distinct links on purpose
        let result = store(&[], &["https://a.test/1"]).reconcile(links(&["https://a.test/1/"]));
        assert!(result.whitelist.contains("https://a.test/1/"));
    }

    proptest! {
        #[test]
        fn prop_reconcile_idempotent(
            whitelist in proptest::collection::btree_set("[a-z]{1,4}", 0..8),
            blacklist in proptest::collection::btree_set("[a-z]{1,4}", 0..8),
            new_links in proptest::collection::vec("[a-z]{1,4}", 0..12),
        ) {
            let initial = ListingStore { whitelist, blacklist };
            let once = initial.clone().reconcile(new_links.clone());
            let twice = once.clone().reconcile(new_links);
            prop_assert_eq!(once, twice);
        }

        #[test]
        fn prop_reconcile_order_independent(
            new_links in proptest::collection::vec("[a-z]{1,4}", 0..12),
        ) {
            let forward = ListingStore::new().reconcile(new_links.clone());
            let mut reversed = new_links;
            reversed.reverse();
            let backward = ListingStore::new().reconcile(reversed);
            prop_assert_eq!(forward, backward);
        }

        #[test]
        fn prop_reconcile_upholds_invariant(
            whitelist in proptest::collection::btree_set("[a-z]{1,4}", 0..8),
            blacklist in proptest::collection::btree_set("[a-z]{1,4}", 0..8),
            new_links in proptest::collection::vec("[a-z]{1,4}", 0..12),
        ) {
            let result = ListingStore { whitelist, blacklist }.reconcile(new_links);
            prop_assert!(result.is_consistent());
        }
    }

    #[test]
    fn test_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let file = ListingFile::new(dir.path().join("list.json"));

        let s = store(&["https://a.test/1"], &["https://a.test/2"]);
        file.save(&s).unwrap();
        assert_eq!(file.load().unwrap(), s);
    }

    #[test]
    fn test_file_format_has_exactly_two_array_keys() {
        let dir = tempfile::tempdir().unwrap();
        let file = ListingFile::new(dir.path().join("list.json"));
        file.save(&store(&["a"], &["b"])).unwrap();

        let raw = std::fs::read_to_string(file.path()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        let object = value.as_object().unwrap();
        assert_eq!(object.len(), 2);
        assert!(object["whitelist"].is_array());
        assert!(object["blacklist"].is_array());
    }

    #[test]
    fn test_missing_file_is_error_for_strict_load() {
        let dir = tempfile::tempdir().unwrap();
        let file = ListingFile::new(dir.path().join("absent.json"));
        assert!(matches!(file.load(), Err(StoreError::Read { .. })));
        assert_eq!(file.load_or_default().unwrap(), ListingStore::new());
    }

    #[test]
    fn test_malformed_file_is_error_even_for_bootstrap() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("list.json");
        std::fs::write(&path, "{\"whitelist\": 7}").unwrap();

        let file = ListingFile::new(&path);
        assert!(matches!(file.load(), Err(StoreError::Malformed { .. })));
        assert!(matches!(
            file.load_or_default(),
            Err(StoreError::Malformed { .. })
        ));
    }

    #[test]
    fn test_save_leaves_no_temp_file() {
        let dir = tempfile::tempdir().unwrap();
        let file = ListingFile::new(dir.path().join("list.json"));
        file.save(&store(&["a"], &[])).unwrap();

        let names: Vec<_> = std::fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();
        assert_eq!(names, ["list.json"]);
    }
}
