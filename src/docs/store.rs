use super::error::{Result, SearchDataError};
use super::types::{Anchor, RawEntry, group_key};

/// A validated entry: named, keyed and with at least one anchor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredRecord {
    pub key: String,
    pub name: String,
    pub anchors: Vec<Anchor>,
}

/// Validated records in input order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Store {
    records: Vec<StoredRecord>,
}

impl Store {
    /// Validate raw entries and take ownership of them.
    ///
    /// Fails with [`SearchDataError::MalformedRecord`] on the first entry
    /// that has no name, no anchors, or an anchor without a URL.
    pub fn load(entries: Vec<RawEntry>) -> Result<Self> {
        let records = entries
            .into_iter()
            .enumerate()
            .map(|(position, entry)| validate(position, entry))
            .collect::<Result<Vec<_>>>()?;
        Ok(Store { records })
    }

    /// Append the validated records of another store, keeping both orders.
    pub fn extend(&mut self, other: Store) {
        self.records.extend(other.records);
    }

    pub fn records(&self) -> &[StoredRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub(crate) fn into_records(self) -> Vec<StoredRecord> {
        self.records
    }
}

fn validate(position: usize, entry: RawEntry) -> Result<StoredRecord> {
    let name = match entry.name {
        Some(name) if !name.trim().is_empty() => name,
        _ => {
            let label = entry.key.as_deref().unwrap_or("<unnamed>");
            return Err(SearchDataError::malformed(
                position,
                format!("symbol '{}' has no name", label),
            ));
        }
    };

    if entry.anchors.is_empty() {
        return Err(SearchDataError::malformed(
            position,
            format!("symbol '{}' has no anchors", name),
        ));
    }

    if entry.anchors.iter().any(|a| a.url.trim().is_empty()) {
        return Err(SearchDataError::malformed(
            position,
            format!("symbol '{}' has an anchor without a url", name),
        ));
    }

    // A key not already in group-key form would never merge with the same
    // symbol read from a fragment, so it is re-derived from the name.
    let key = match entry.key {
        Some(key) if is_group_key(key.trim()) => key.trim().to_string(),
        _ => group_key(&name),
    };

    Ok(StoredRecord {
        key,
        name,
        anchors: entry.anchors.into_iter().map(Anchor::from_raw).collect(),
    })
}

fn is_group_key(key: &str) -> bool {
    !key.is_empty()
        && key
            .bytes()
            .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'_')
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::docs::types::RawAnchor;

    fn anchor(url: &str) -> RawAnchor {
        RawAnchor {
            url: url.to_string(),
            description: "f(void):&#160;f.c".to_string(),
            same_page: true,
        }
    }

    fn entry(key: Option<&str>, name: Option<&str>, anchors: Vec<RawAnchor>) -> RawEntry {
        RawEntry {
            key: key.map(str::to_string),
            name: name.map(str::to_string),
            anchors,
        }
    }

    #[test]
    fn test_load_keeps_order_and_decodes_anchors() {
        let store = Store::load(vec![
            entry(Some("b"), Some("B"), vec![anchor("../b.html#1")]),
            entry(Some("a"), Some("A"), vec![anchor("../a.html#1")]),
        ])
        .unwrap();

        let names: Vec<_> = store.records().iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, ["B", "A"]);
        assert_eq!(store.records()[0].anchors[0].source_file, "f.c");
    }

    #[test]
    fn test_zero_anchors_is_malformed() {
        let err = Store::load(vec![
            entry(Some("a"), Some("A"), vec![anchor("../a.html")]),
            entry(Some("b"), Some("B"), vec![]),
        ])
        .unwrap_err();

        match err {
            SearchDataError::MalformedRecord { position, reason } => {
                assert_eq!(position, 1);
                assert!(reason.contains("no anchors"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_missing_or_blank_name_is_malformed() {
        let err = Store::load(vec![entry(Some("a"), None, vec![anchor("x")])]).unwrap_err();
        assert!(err.is_malformed_record());

        let err = Store::load(vec![entry(None, Some("  "), vec![anchor("x")])]).unwrap_err();
        assert!(err.is_malformed_record());
    }

    #[test]
    fn test_anchor_without_url_is_malformed() {
        let err = Store::load(vec![entry(None, Some("A"), vec![anchor("")])]).unwrap_err();
        assert!(err.is_malformed_record());
    }

    #[test]
    fn test_key_is_derived_when_absent() {
        let store = Store::load(vec![
            entry(None, Some("Ustdlib_api"), vec![anchor("x")]),
            entry(Some("UARTGetc"), Some("UARTgetc"), vec![anchor("y")]),
        ])
        .unwrap();
        assert_eq!(store.records()[0].key, "ustdlib_5fapi");
        assert_eq!(store.records()[1].key, "uartgetc");
    }

    #[test]
    fn test_explicit_key_must_be_group_key_form() {
        let store = Store::load(vec![
            entry(Some(" ustdlib_5fapi "), Some("Ustdlib_api"), vec![anchor("x")]),
            entry(Some("Ustdlib_api"), Some("Ustdlib_api"), vec![anchor("y")]),
            entry(Some("ustdlib-api"), Some("ustdlib-api"), vec![anchor("z")]),
        ])
        .unwrap();

        let keys: Vec<_> = store.records().iter().map(|r| r.key.as_str()).collect();
        assert_eq!(keys, ["ustdlib_5fapi", "ustdlib_5fapi", "ustdlib_2dapi"]);
    }

    #[test]
    fn test_fragment_and_json_keys_merge() {
        use crate::docs::{Index, parse_json_records, parse_search_data};

        let mut entries = parse_search_data(
            "var searchData=[['ustdlib_5fapi',['Ustdlib_api',['../group__ustdlib__api.html',1,'Ustdlib_api']]]];",
        )
        .unwrap();
        entries.extend(
            parse_json_records(
                r#"[{"key":"Ustdlib_api","name":"Ustdlib_api","anchors":[{"url":"../extra.html#x"}]}]"#,
            )
            .unwrap(),
        );

        let index = Index::build(Store::load(entries).unwrap());
        assert_eq!(index.len(), 1);
        let record = index.get("Ustdlib_api").unwrap();
        assert_eq!(record.key, "ustdlib_5fapi");
        assert_eq!(record.anchors.len(), 2);
        assert_eq!(record.anchors[1].url, "../extra.html#x");
    }

    #[test]
    fn test_extend_appends() {
        let mut store = Store::load(vec![entry(None, Some("A"), vec![anchor("x")])]).unwrap();
        store.extend(Store::load(vec![entry(None, Some("B"), vec![anchor("y")])]).unwrap());
        assert_eq!(store.len(), 2);
        assert!(!store.is_empty());
    }
}
