use lazy_static::lazy_static;
use syntect::easy::HighlightLines;
use syntect::highlighting::ThemeSet;
use syntect::parsing::SyntaxSet;
use syntect::util::LinesWithEndings;

lazy_static! {
    static ref SYNTAX_SET: SyntaxSet = SyntaxSet::load_defaults_newlines();
    static ref THEME_SET: ThemeSet = ThemeSet::load_defaults();
}

/// Highlight a C declaration for the terminal; falls back to the plain text
/// if highlighting fails.
pub fn highlight_c_code(code: &str) -> String {
    let syntax = SYNTAX_SET
        .find_syntax_by_extension("c")
        .unwrap_or_else(|| SYNTAX_SET.find_syntax_plain_text());
    let mut h = HighlightLines::new(syntax, &THEME_SET.themes["base16-ocean.dark"]);

    let mut highlighted = String::new();
    for line in LinesWithEndings::from(code) {
        match h.highlight_line(line, &SYNTAX_SET) {
            Ok(ranges) => {
                highlighted.push_str(&syntect::util::as_24_bit_terminal_escaped(&ranges, false))
            }
            Err(e) => {
                tracing::debug!(error = %e, "highlighting failed");
                return code.to_string();
            }
        }
    }
    highlighted.push_str("\x1b[0m");
    highlighted
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_highlight_keeps_text() {
        let out = highlight_c_code("UARTgets(char *pcBuf, unsigned long ulLen)");
        assert!(out.contains("UARTgets"));
        assert!(out.contains("ulLen"));
        assert!(out.contains('\x1b'));
    }
}
