//! Substring search over an [`Index`].

use super::index::Index;
use super::types::{SymbolRecord, group_key};
use std::cmp::Ordering;

/// How well a key matched the query text, best first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum MatchKind {
    Exact,
    Prefix,
    Substring,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Match<'a> {
    pub record: &'a SymbolRecord,
    pub kind: MatchKind,
}

/// The query text in both forms a key can contain it in: plainly lowercased
/// (`ustdlib_5fapi` typed as-is) and group-key encoded (`ustdlib_api`).
struct Needle {
    lower: String,
    encoded: String,
}

impl Needle {
    fn new(text: &str) -> Option<Self> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }
        Some(Needle {
            lower: text.to_lowercase(),
            encoded: group_key(text),
        })
    }

    fn classify(&self, key: &str) -> Option<MatchKind> {
        [self.lower.as_str(), self.encoded.as_str()]
            .into_iter()
            .filter_map(|needle| {
                if key == needle {
                    Some(MatchKind::Exact)
                } else if key.starts_with(needle) {
                    Some(MatchKind::Prefix)
                } else if key.contains(needle) {
                    Some(MatchKind::Substring)
                } else {
                    None
                }
            })
            .min()
    }
}

fn cmp_matches(a: &Match<'_>, b: &Match<'_>) -> Ordering {
    a.kind
        .cmp(&b.kind)
        .then_with(|| {
            a.record
                .name
                .to_lowercase()
                .cmp(&b.record.name.to_lowercase())
        })
        .then_with(|| a.record.key.cmp(&b.record.key))
        .then_with(|| a.record.name.cmp(&b.record.name))
}

impl Index {
    /// Find every record whose key contains `text`, ignoring case.
    ///
    /// Exact matches come first, then prefix matches, then the rest; ties are
    /// ordered by name, ignoring case. Empty or whitespace-only text matches nothing.
    pub fn search(&self, text: &str) -> Vec<Match<'_>> {
        let Some(needle) = Needle::new(text) else {
            return Vec::new();
        };

        let mut matches: Vec<Match<'_>> = self
            .records()
            .filter_map(|record| {
                needle
                    .classify(&record.key)
                    .map(|kind| Match { record, kind })
            })
            .collect();
        matches.sort_by(cmp_matches);
        matches
    }

    pub fn query(&self, text: &str) -> Vec<&SymbolRecord> {
        self.search(text).into_iter().map(|m| m.record).collect()
    }

    /// Like [`Index::query`], keeping only the best `limit` records.
    pub fn query_limited(&self, text: &str, limit: usize) -> Vec<&SymbolRecord> {
        self.search(text)
            .into_iter()
            .take(limit)
            .map(|m| m.record)
            .collect()
    }

    /// Display names within edit distance 2 of `text`, closest first.
    pub fn suggest(&self, text: &str, limit: usize) -> Vec<&str> {
        let text = text.trim().to_lowercase();
        if text.is_empty() {
            return Vec::new();
        }

        let mut scored: Vec<(usize, &str)> = self
            .records()
            .map(|record| {
                let distance = edit_distance(&text, &record.name.to_lowercase());
                (distance, record.name.as_str())
            })
            .filter(|(dist, _)| *dist <= 2)
            .collect();

        scored.sort();
        scored.into_iter().take(limit).map(|(_, name)| name).collect()
    }
}

/// Resolve `text` against `index`; see [`Index::query`].
pub fn query<'a>(index: &'a Index, text: &str) -> Vec<&'a SymbolRecord> {
    index.query(text)
}

/// Levenshtein distance between two strings
fn edit_distance(s1: &str, s2: &str) -> usize {
    let s1_chars: Vec<char> = s1.chars().collect();
    let s2_chars: Vec<char> = s2.chars().collect();
    let len1 = s1_chars.len();
    let len2 = s2_chars.len();
    let mut matrix = vec![vec![0; len2 + 1]; len1 + 1];

    for (i, row) in matrix.iter_mut().enumerate() {
        row[0] = i;
    }
    for j in 0..=len2 {
        matrix[0][j] = j;
    }

    for i in 1..=len1 {
        for j in 1..=len2 {
            let cost = if s1_chars[i - 1] == s2_chars[j - 1] {
                0
            } else {
                1
            };
            matrix[i][j] = std::cmp::min(
                std::cmp::min(matrix[i - 1][j] + 1, matrix[i][j - 1] + 1),
                matrix[i - 1][j - 1] + cost,
            );
        }
    }

    matrix[len1][len2]
}
