use super::error::Result;
use super::store::Store;
use super::types::{RawEntry, SymbolRecord, group_key};
use std::collections::{BTreeMap, HashMap};

/// Immutable symbol index for one documentation snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Index {
    /// Map from normalized group key to its merged record
    records: BTreeMap<String, SymbolRecord>,
    /// Map from lowercased display name to group key
    names: HashMap<String, String>,
}

impl Index {
    /// Build an index from a validated store.
    ///
    /// Records that share a key are merged: anchors are concatenated in input
    /// order and the first display name is kept.
    pub fn build(store: Store) -> Self {
        let mut records: BTreeMap<String, SymbolRecord> = BTreeMap::new();
        let mut names = HashMap::new();
        let mut merged = 0usize;

        for stored in store.into_records() {
            match records.get_mut(&stored.key) {
                Some(existing) => {
                    if existing.name != stored.name {
                        tracing::debug!(
                            key = %stored.key,
                            kept = %existing.name,
                            dropped = %stored.name,
                            "display names differ for one key"
                        );
                    }
                    existing.anchors.extend(stored.anchors);
                    merged += 1;
                }
                None => {
                    names
                        .entry(stored.name.to_lowercase())
                        .or_insert_with(|| stored.key.clone());
                    records.insert(
                        stored.key.clone(),
                        SymbolRecord {
                            key: stored.key,
                            name: stored.name,
                            anchors: stored.anchors,
                        },
                    );
                }
            }
        }

        tracing::debug!(symbols = records.len(), merged, "index built");

        Index { records, names }
    }

    /// Validate and index raw entries in one step.
    pub fn from_entries(entries: Vec<RawEntry>) -> Result<Self> {
        Ok(Self::build(Store::load(entries)?))
    }

    /// Lookup a symbol by display name or key, ignoring case
    pub fn get(&self, name: &str) -> Option<&SymbolRecord> {
        let name = name.trim();
        let lower = name.to_lowercase();
        self.records
            .get(&lower)
            .or_else(|| self.records.get(&group_key(name)))
            .or_else(|| self.names.get(&lower).and_then(|key| self.records.get(key)))
    }

    /// All records in key order
    pub fn records(&self) -> impl Iterator<Item = &SymbolRecord> {
        self.records.values()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.records.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn anchor_count(&self) -> usize {
        self.records.values().map(|r| r.anchors.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::docs::embedded::SAMPLE_SEARCH_DATA;
    use crate::docs::searchdata::parse_search_data;
    use crate::docs::types::RawAnchor;

    fn sample_entries() -> Vec<RawEntry> {
        parse_search_data(SAMPLE_SEARCH_DATA).unwrap()
    }

    fn entry(name: &str, url: &str, description: &str) -> RawEntry {
        RawEntry {
            key: None,
            name: Some(name.to_string()),
            anchors: vec![RawAnchor {
                url: url.to_string(),
                description: description.to_string(),
                same_page: true,
            }],
        }
    }

    #[test]
    fn test_build_is_deterministic() {
        let first = Index::from_entries(sample_entries()).unwrap();
        let second = Index::from_entries(sample_entries()).unwrap();
        assert_eq!(first, second);

        let first_keys: Vec<_> = first.keys().collect();
        let second_keys: Vec<_> = second.keys().collect();
        assert_eq!(first_keys, second_keys);
        assert_eq!(first.len(), 21);
        assert_eq!(first.anchor_count(), 33);
    }

    #[test]
    fn test_duplicate_names_merge_in_input_order() {
        let index = Index::from_entries(vec![
            entry("UARTStdioInit", "../u.html#a", "UARTStdioInit(unsigned long ulPort):&#160;uartstdio.c"),
            entry("ustrcpy", "../s.html#b", "ustrcpy(char *str1, char *str2):&#160;ustdlib.c"),
            entry("uartstdioinit", "../u.html#a", "UARTStdioInit(unsigned long ulPortNum):&#160;uartstdio.c"),
        ])
        .unwrap();

        assert_eq!(index.len(), 2);
        let record = index.get("uartstdioinit").unwrap();
        assert_eq!(record.name, "UARTStdioInit");
        let labels: Vec<_> = record.anchors.iter().map(|a| a.context_label.as_str()).collect();
        assert_eq!(
            labels,
            [
                "UARTStdioInit(unsigned long ulPort)",
                "UARTStdioInit(unsigned long ulPortNum)"
            ]
        );
    }

    #[test]
    fn test_get_by_name_or_key() {
        let index = Index::from_entries(sample_entries()).unwrap();

        assert_eq!(index.get("UARTgetc").unwrap().key, "uartgetc");
        assert_eq!(index.get("ustdlib_5fapi").unwrap().name, "Ustdlib_api");
        assert_eq!(index.get("Ustdlib_api").unwrap().key, "ustdlib_5fapi");
        let hour = index.get(" ucHour ").unwrap();
        assert_eq!(hour.primary_anchor().unwrap().context_label, "tTime");
        assert!(index.get("UARTget").is_none());
    }

    #[test]
    fn test_malformed_record_propagates() {
        let mut entries = sample_entries();
        entries[3].anchors.clear();
        let err = Index::from_entries(entries).unwrap_err();
        assert!(err.is_malformed_record());
    }

    #[test]
    fn test_records_iterate_in_key_order() {
        let index = Index::from_entries(vec![
            entry("usYear", "../t.html#y", "tTime"),
            entry("ucHour", "../t.html#h", "tTime"),
        ])
        .unwrap();
        let names: Vec<_> = index.records().map(|r| r.name.as_str()).collect();
        assert_eq!(names, ["ucHour", "usYear"]);
    }
}
