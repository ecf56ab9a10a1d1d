//! Reader for the generator's search-data fragments.
//!
//! A fragment is a JavaScript statement of the form
//!
//! ```text
//! var searchData=
//! [
//!   ['uartgetc',['UARTgetc',['../group__uartstdio__api.html#ga0577…',1,'UARTgetc(void):&#160;uartstdio.c']]],
//!   ...
//! ];
//! ```
//!
//! Only the literal subset the generator emits is accepted: arrays, quoted
//! strings and integers.

use super::error::{Result, SearchDataError};
use super::types::{RawAnchor, RawEntry};
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref ASSIGNMENT: Regex = Regex::new(r"^\s*(?:var\s+[A-Za-z_$][A-Za-z0-9_$]*\s*=)?")
        .expect("assignment pattern is valid");
}

/// Deepest array nesting accepted. The generator's data sits four arrays deep.
const MAX_DEPTH: usize = 8;

#[derive(Debug, Clone, PartialEq)]
enum Literal {
    Str(String),
    Int(i64),
    List(Vec<Literal>),
}

impl Literal {
    fn kind(&self) -> &'static str {
        match self {
            Literal::Str(_) => "string",
            Literal::Int(_) => "integer",
            Literal::List(_) => "array",
        }
    }
}

struct Parser<'a> {
    src: &'a str,
    pos: usize,
    depth: usize,
}

impl<'a> Parser<'a> {
    fn new(src: &'a str, pos: usize) -> Self {
        Parser { src, pos, depth: 0 }
    }

    fn error(&self, message: impl Into<String>) -> SearchDataError {
        SearchDataError::Syntax {
            offset: self.pos,
            message: message.into(),
        }
    }

    fn peek(&self) -> Option<char> {
        self.src[self.pos..].chars().next()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn skip_whitespace(&mut self) {
        loop {
            match self.peek() {
                Some(c) if c.is_whitespace() => {
                    self.bump();
                }
                Some('/') if self.src[self.pos..].starts_with("//") => {
                    while let Some(c) = self.bump() {
                        if c == '\n' {
                            break;
                        }
                    }
                }
                _ => break,
            }
        }
    }

    fn parse_value(&mut self) -> Result<Literal> {
        self.skip_whitespace();
        match self.peek() {
            Some('[') => self.parse_list(),
            Some(quote @ ('\'' | '"')) => {
                self.bump();
                self.parse_string(quote).map(Literal::Str)
            }
            Some(c) if c == '-' || c.is_ascii_digit() => self.parse_int(),
            Some(c) => Err(self.error(format!("unexpected character '{}'", c))),
            None => Err(self.error("unexpected end of input")),
        }
    }

    fn parse_list(&mut self) -> Result<Literal> {
        if self.depth == MAX_DEPTH {
            return Err(self.error("nesting too deep"));
        }
        self.bump();
        self.depth += 1;
        let list = self.parse_list_items();
        self.depth -= 1;
        list
    }

    fn parse_list_items(&mut self) -> Result<Literal> {
        let mut items = Vec::new();
        loop {
            self.skip_whitespace();
            if self.peek() == Some(']') {
                self.bump();
                return Ok(Literal::List(items));
            }

            items.push(self.parse_value()?);

            self.skip_whitespace();
            match self.bump() {
                Some(',') => continue,
                Some(']') => return Ok(Literal::List(items)),
                Some(c) => {
                    self.pos -= c.len_utf8();
                    return Err(self.error(format!("expected ',' or ']', found '{}'", c)));
                }
                None => return Err(self.error("unterminated array")),
            }
        }
    }

    fn parse_string(&mut self, quote: char) -> Result<String> {
        let mut out = String::new();
        loop {
            match self.bump() {
                Some(c) if c == quote => return Ok(out),
                Some('\\') => {
                    let escaped = self
                        .bump()
                        .ok_or_else(|| self.error("unterminated escape sequence"))?;
                    match escaped {
                        'n' => out.push('\n'),
                        't' => out.push('\t'),
                        'r' => out.push('\r'),
                        'b' => out.push('\u{8}'),
                        'f' => out.push('\u{c}'),
                        '0' => out.push('\0'),
                        'u' => out.push(self.parse_unicode_escape()?),
                        '\n' => {}
                        other => out.push(other),
                    }
                }
                Some('\n') | None => return Err(self.error("unterminated string")),
                Some(c) => out.push(c),
            }
        }
    }

    fn parse_unicode_escape(&mut self) -> Result<char> {
        let digits = self
            .src
            .get(self.pos..self.pos + 4)
            .filter(|d| d.chars().all(|c| c.is_ascii_hexdigit()))
            .ok_or_else(|| self.error("invalid \\u escape"))?;
        let code = u32::from_str_radix(digits, 16).map_err(|e| self.error(e.to_string()))?;
        let c = char::from_u32(code).ok_or_else(|| self.error("invalid \\u escape"))?;
        self.pos += 4;
        Ok(c)
    }

    fn parse_int(&mut self) -> Result<Literal> {
        let start = self.pos;
        if self.peek() == Some('-') {
            self.bump();
        }
        while matches!(self.peek(), Some(c) if c.is_ascii_digit()) {
            self.bump();
        }
        self.src[start..self.pos]
            .parse::<i64>()
            .map(Literal::Int)
            .map_err(|e| SearchDataError::Syntax {
                offset: start,
                message: format!("invalid integer: {}", e),
            })
    }
}

/// Parse a `var searchData = [...];` fragment into raw entries.
///
/// Lexical problems are reported as [`SearchDataError::Syntax`]; entries that
/// parse but do not have the `[key, [name, anchor...]]` shape are reported as
/// [`SearchDataError::MalformedRecord`]. Entries with a name but no anchors
/// are passed through for the store to reject.
pub fn parse_search_data(source: &str) -> Result<Vec<RawEntry>> {
    let start = ASSIGNMENT.find(source).map_or(0, |m| m.end());
    let mut parser = Parser::new(source, start);

    parser.skip_whitespace();
    if parser.peek() != Some('[') {
        return Err(parser.error("expected search data array"));
    }
    let value = parser.parse_value()?;

    parser.skip_whitespace();
    if parser.peek() == Some(';') {
        parser.bump();
        parser.skip_whitespace();
    }
    if parser.pos != source.len() {
        return Err(parser.error("unexpected trailing content"));
    }

    let Literal::List(items) = value else {
        return Err(parser.error("expected search data array"));
    };

    items
        .into_iter()
        .enumerate()
        .map(|(position, item)| entry_from_literal(position, item))
        .collect()
}

/// Parse a JSON array of `{ "key"?, "name", "anchors": [{ "url", "description", "same_page"? }] }`
/// records, for symbol tables that do not come from the generator.
pub fn parse_json_records(source: &str) -> Result<Vec<RawEntry>> {
    Ok(serde_json::from_str(source)?)
}

fn entry_from_literal(position: usize, item: Literal) -> Result<RawEntry> {
    let parts = match item {
        Literal::List(parts) => parts,
        other => {
            return Err(SearchDataError::malformed(
                position,
                format!("expected [key, [name, anchors...]], found {}", other.kind()),
            ));
        }
    };

    let mut parts = parts.into_iter();
    let key = match parts.next() {
        Some(Literal::Str(key)) => key,
        Some(other) => {
            return Err(SearchDataError::malformed(
                position,
                format!("key must be a string, found {}", other.kind()),
            ));
        }
        None => return Err(SearchDataError::malformed(position, "empty entry")),
    };

    let body = match parts.next() {
        Some(Literal::List(body)) => body,
        Some(other) => {
            return Err(SearchDataError::malformed(
                position,
                format!("symbol '{}': expected [name, anchors...], found {}", key, other.kind()),
            ));
        }
        None => {
            return Err(SearchDataError::malformed(
                position,
                format!("symbol '{}' has no name", key),
            ));
        }
    };

    if parts.next().is_some() {
        return Err(SearchDataError::malformed(
            position,
            format!("symbol '{}' has unexpected trailing fields", key),
        ));
    }

    let mut body = body.into_iter();
    let name = match body.next() {
        Some(Literal::Str(name)) => Some(name),
        Some(other) => {
            return Err(SearchDataError::malformed(
                position,
                format!("symbol '{}': name must be a string, found {}", key, other.kind()),
            ));
        }
        None => None,
    };

    let anchors = body
        .map(|anchor| anchor_from_literal(position, &key, anchor))
        .collect::<Result<Vec<_>>>()?;

    Ok(RawEntry {
        key: Some(key),
        name,
        anchors,
    })
}

fn anchor_from_literal(position: usize, key: &str, anchor: Literal) -> Result<RawAnchor> {
    let fields = match anchor {
        Literal::List(fields) => fields,
        other => {
            return Err(SearchDataError::malformed(
                position,
                format!("symbol '{}': anchor must be an array, found {}", key, other.kind()),
            ));
        }
    };

    let mut fields = fields.into_iter();
    let url = match fields.next() {
        Some(Literal::Str(url)) => url,
        _ => {
            return Err(SearchDataError::malformed(
                position,
                format!("symbol '{}': anchor has no url", key),
            ));
        }
    };

    let same_page = match fields.next() {
        Some(Literal::Int(flag)) => flag != 0,
        None => false,
        Some(other) => {
            return Err(SearchDataError::malformed(
                position,
                format!("symbol '{}': anchor flag must be an integer, found {}", key, other.kind()),
            ));
        }
    };

    let description = match fields.next() {
        Some(Literal::Str(description)) => description,
        None => String::new(),
        Some(other) => {
            return Err(SearchDataError::malformed(
                position,
                format!("symbol '{}': anchor description must be a string, found {}", key, other.kind()),
            ));
        }
    };

    Ok(RawAnchor {
        url,
        description,
        same_page,
    })
}
