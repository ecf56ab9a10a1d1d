use colored::*;
use std::error::Error;
use terminal_size::{Width, terminal_size};

use symdex::docs::SearchDataError;

/// Get the current terminal width, defaulting to 80 if unable to detect
pub fn get_terminal_width() -> usize {
    if let Some((Width(w), _)) = terminal_size() {
        w as usize
    } else {
        80 // Default fallback width
    }
}

/// Create a separator line that fits the terminal width
fn separator(width: usize) -> String {
    "─".repeat(width.min(120)) // Cap at 120 for very wide terminals
}

/// Cut `text` to at most `width` characters, marking the cut with an ellipsis.
pub fn clip(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let keep = width.saturating_sub(1);
    let mut clipped: String = text.chars().take(keep).collect();
    clipped.push('…');
    clipped
}

/// Render a load failure with the file, record and hint that apply to it.
pub fn format_load_error(error: &SearchDataError) -> String {
    let sep_width = get_terminal_width().saturating_sub(2).max(40);

    let mut formatted = String::new();
    formatted.push_str(&format!(
        "\n{} {}\n",
        "💥".red(),
        "Failed to load search data".red().bold()
    ));
    formatted.push_str(&format!("{}\n", separator(sep_width).yellow()));

    let mut current = error;
    loop {
        match current {
            SearchDataError::InFile { path, source } => {
                formatted.push_str(&format!(
                    "  {} {}\n",
                    "📄".cyan(),
                    path.display().to_string().cyan()
                ));
                current = source.as_ref();
            }
            SearchDataError::MalformedRecord { position, reason } => {
                formatted.push_str(&format!(
                    "  {} Record {}\n",
                    "📍".yellow(),
                    position.to_string().yellow().bold()
                ));
                formatted.push_str(&format!("  {} {}\n", "💬".red(), reason.white()));
                formatted.push_str(&format!(
                    "\n  {} {}\n",
                    "💡".yellow(),
                    "Every symbol needs a name and at least one anchor; regenerate the docs."
                        .bright_black()
                ));
                break;
            }
            SearchDataError::Syntax { offset, message } => {
                formatted.push_str(&format!(
                    "  {} Byte {}\n",
                    "📍".yellow(),
                    offset.to_string().yellow().bold()
                ));
                formatted.push_str(&format!("  {} {}\n", "💬".red(), message.white()));
                break;
            }
            SearchDataError::Io { path, source } => {
                formatted.push_str(&format!(
                    "  {} {}\n",
                    "📄".cyan(),
                    path.display().to_string().cyan()
                ));
                formatted.push_str(&format!("  {} {}\n", "💬".red(), source.to_string().white()));
                if source.kind() == std::io::ErrorKind::NotFound {
                    formatted.push_str(&format!(
                        "\n  {} {}\n",
                        "💡".yellow(),
                        "Set search_dir in symdex.toml, pass --dir, or try --sample.".bright_black()
                    ));
                }
                break;
            }
            SearchDataError::Json(e) => {
                formatted.push_str(&format!("  {} {}\n", "💬".red(), e.to_string().white()));
                if let Some(inner) = e.source() {
                    formatted.push_str(&format!("    {} {}\n", "•".blue(), inner.to_string().bright_black()));
                }
                break;
            }
        }
    }

    formatted
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_clip() {
        assert_eq!(clip("short", 10), "short");
        assert_eq!(clip("UARTgets(char *pcBuf)", 8), "UARTget…");
        assert_eq!(clip("abc", 0), "…");
    }

    #[test]
    fn test_format_nested_malformed_record() {
        colored::control::set_override(false);
        let error = SearchDataError::InFile {
            path: PathBuf::from("all_75.js"),
            source: Box::new(SearchDataError::MalformedRecord {
                position: 4,
                reason: "symbol 'UARTwrite' has no anchors".to_string(),
            }),
        };

        let text = format_load_error(&error);
        assert!(text.contains("all_75.js"));
        assert!(text.contains("Record 4"));
        assert!(text.contains("has no anchors"));
    }

    #[test]
    fn test_format_missing_dir_has_hint() {
        colored::control::set_override(false);
        let error = SearchDataError::Io {
            path: PathBuf::from("docs/html/search"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        };

        let text = format_load_error(&error);
        assert!(text.contains("docs/html/search"));
        assert!(text.contains("--sample"));
    }
}
