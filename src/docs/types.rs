use lazy_static::lazy_static;
use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};

lazy_static! {
    static ref CHAR_REF: Regex = Regex::new(r"&(#[0-9]+|#[xX][0-9a-fA-F]+|amp|lt|gt|quot|apos|nbsp);")
        .expect("character reference pattern is valid");
}

/// Separator the generator puts between a context label and its source file,
/// after character references are decoded (`:&#160;`).
const SOURCE_SEPARATOR: &str = ":\u{a0}";

/// One entry as read from a search-data fragment or a JSON record file,
/// before validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawEntry {
    #[serde(default)]
    pub key: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub anchors: Vec<RawAnchor>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawAnchor {
    pub url: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub same_page: bool,
}

/// A location where a symbol is documented.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Anchor {
    pub url: String,
    /// File the symbol is defined in, empty when the generator gave none.
    pub source_file: String,
    /// Signature or owning entity, e.g. `UARTgetc(void)` or `tTime`.
    pub context_label: String,
    pub same_page: bool,
}

impl Anchor {
    pub fn from_raw(raw: RawAnchor) -> Self {
        let description = decode_char_refs(&raw.description);
        let (context_label, source_file) = match description.rfind(SOURCE_SEPARATOR) {
            Some(pos) => (
                description[..pos].trim().to_string(),
                description[pos + SOURCE_SEPARATOR.len()..].trim().to_string(),
            ),
            None => (description.trim().to_string(), String::new()),
        };

        Anchor {
            url: raw.url,
            source_file,
            context_label,
            same_page: raw.same_page,
        }
    }

    /// Page part of the URL, without the `#fragment`.
    pub fn page(&self) -> &str {
        self.url.split_once('#').map_or(self.url.as_str(), |(page, _)| page)
    }

    pub fn fragment(&self) -> Option<&str> {
        self.url.split_once('#').map(|(_, fragment)| fragment)
    }
}

/// All anchors documented under one normalized symbol name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymbolRecord {
    /// Normalized group key (see [`group_key`]).
    pub key: String,
    /// Name as the generator displays it.
    pub name: String,
    /// Kept in input order. Never empty in an [`Index`](super::Index), but a
    /// record built by hand or deserialized may have none.
    pub anchors: Vec<Anchor>,
}

impl SymbolRecord {
    pub fn primary_anchor(&self) -> Option<&Anchor> {
        self.anchors.first()
    }

    /// Anchors with exact repeats removed, first occurrence kept.
    ///
    /// The generator lists a function once for its declaration and once for
    /// its definition, which usually resolve to the same anchor.
    pub fn distinct_anchors(&self) -> Vec<&Anchor> {
        let mut seen = Vec::new();
        for anchor in &self.anchors {
            if !seen.contains(&anchor) {
                seen.push(anchor);
            }
        }
        seen
    }
}

/// Normalize a symbol name into the generator's group-key form.
///
/// Lowercases the name and writes every byte outside `[a-z0-9]` as `_`
/// followed by two hex digits, so `Ustdlib_api` becomes `ustdlib_5fapi`.
pub fn group_key(name: &str) -> String {
    let lower = name.to_lowercase();
    let mut key = String::with_capacity(lower.len());
    for byte in lower.bytes() {
        if byte.is_ascii_lowercase() || byte.is_ascii_digit() {
            key.push(byte as char);
        } else {
            key.push_str(&format!("_{:02x}", byte));
        }
    }
    key
}

/// Decode the HTML character references the generator emits in descriptions.
/// Unknown or invalid references are left as written.
pub fn decode_char_refs(text: &str) -> String {
    if !text.contains('&') {
        return text.to_string();
    }

    CHAR_REF
        .replace_all(text, |caps: &Captures| {
            let body = &caps[1];
            let decoded = match body {
                "amp" => Some('&'),
                "lt" => Some('<'),
                "gt" => Some('>'),
                "quot" => Some('"'),
                "apos" => Some('\''),
                "nbsp" => Some('\u{a0}'),
                _ => {
                    let code = if let Some(hex) = body
                        .strip_prefix("#x")
                        .or_else(|| body.strip_prefix("#X"))
                    {
                        u32::from_str_radix(hex, 16).ok()
                    } else {
                        body[1..].parse::<u32>().ok()
                    };
                    code.and_then(char::from_u32)
                }
            };
            decoded.map_or_else(|| caps[0].to_string(), |c| c.to_string())
        })
        .into_owned()
}
