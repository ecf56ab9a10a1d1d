//! Symbol search commands over a loaded documentation snapshot

use crate::{
    config::Config,
    error_format::{clip, format_load_error, get_terminal_width},
    syntax::highlight_c_code,
};
use colored::*;
use std::io::{self, Write};
use std::path::Path;
use symdex::docs::{Anchor, MatchKind, Snapshot, SymbolRecord};

pub struct SearchContext {
    pub config: Config,
    pub snapshot: Snapshot,
    pub verbose: bool,
}

impl SearchContext {
    /// Load the snapshot named by the configuration, or the bundled sample.
    pub fn open(config: Config, use_sample: bool, verbose: bool) -> Result<Self, String> {
        let snapshot = if use_sample {
            Snapshot::bundled()
        } else {
            Snapshot::from_dir(&config.search_dir, &config.categories)
        }
        .map_err(|e| format_load_error(&e))?;

        if snapshot.index().is_empty() {
            eprintln!(
                "{} No search data found in {}",
                "⚠️".yellow(),
                config.search_dir.display()
            );
        }

        Ok(SearchContext {
            config,
            snapshot,
            verbose,
        })
    }
}

/// Search symbols by substring and display the ranked results
pub fn search_symbols(
    ctx: &SearchContext,
    query: &str,
    limit: Option<usize>,
    json: bool,
) -> Result<(), String> {
    let index = ctx.snapshot.index();
    let limit = limit.unwrap_or(ctx.config.max_results);
    let results = index.search(query);

    if json {
        let records: Vec<&SymbolRecord> = results.iter().take(limit).map(|m| m.record).collect();
        return print_json(&records);
    }

    if results.is_empty() {
        return Err(no_match_message(ctx, query));
    }

    println!("\n{} Found {} symbol(s):\n", "🔍".cyan(), results.len());
    for m in results.iter().take(limit) {
        let marker = match m.kind {
            MatchKind::Exact => "=".green().bold(),
            MatchKind::Prefix => "•".cyan(),
            MatchKind::Substring => "·".bright_black(),
        };
        let location = match m.record.primary_anchor() {
            Some(anchor) if anchor.source_file.is_empty() => anchor.context_label.as_str(),
            Some(anchor) => anchor.source_file.as_str(),
            None => "",
        };
        println!(
            "  {} {} {}",
            marker,
            m.record.name.green(),
            location.dimmed()
        );
        if ctx.verbose {
            if let Some(anchor) = m.record.primary_anchor() {
                println!("    {}", anchor.url.bright_black());
            }
        }
    }
    if results.len() > limit {
        println!("\n  ... and {} more", results.len() - limit);
    }

    Ok(())
}

/// Show every anchor of one symbol
pub fn show_symbol(ctx: &SearchContext, name: &str, json: bool) -> Result<(), String> {
    let index = ctx.snapshot.index();

    match index.get(name) {
        Some(record) => {
            if json {
                return print_json(record);
            }
            display_record(ctx, record);
            Ok(())
        }
        None => {
            // If not found, try searching for partial matches
            let results = index.query(name);
            if results.is_empty() {
                Err(no_match_message(ctx, name))
            } else {
                println!(
                    "{} No exact match found. Did you mean one of these?\n",
                    "ℹ️".blue()
                );
                for record in results.iter().take(10) {
                    println!("  {} {}", "•".cyan(), record.name.green());
                }
                if results.len() > 10 {
                    println!("\n  ... and {} more", results.len() - 10);
                }
                Ok(())
            }
        }
    }
}

/// List every symbol in key order
pub fn list_symbols(ctx: &SearchContext, json: bool) -> Result<(), String> {
    let index = ctx.snapshot.index();

    if json {
        let records: Vec<&SymbolRecord> = index.records().collect();
        return print_json(&records);
    }

    let width = get_terminal_width();
    for record in index.records() {
        let label = record
            .primary_anchor()
            .map_or("", |anchor| anchor.context_label.as_str());
        let line = format!("{:<24} {}", record.name, label);
        println!("{}", clip(&line, width));
    }
    println!(
        "\n{} Total: {} symbol(s)",
        "✓".green(),
        index.len().to_string().bold()
    );
    Ok(())
}

/// Print counts and provenance of the loaded snapshot
pub fn show_stats(ctx: &SearchContext) -> Result<(), String> {
    let snapshot = &ctx.snapshot;
    let index = snapshot.index();

    println!("{} Search data statistics:", "📊".cyan());
    match snapshot.dir() {
        Some(dir) => println!("   Source:      {}", dir.display()),
        None => println!("   Source:      bundled sample"),
    }
    println!("   Files:       {}", snapshot.files().len());
    if ctx.verbose {
        for file in snapshot.files() {
            println!("     {} {}", "•".cyan(), file);
        }
    }
    println!("   Symbols:     {}", index.len());
    println!("   Anchors:     {}", index.anchor_count());
    let pages = index
        .records()
        .flat_map(|r| r.anchors.iter().map(Anchor::page))
        .collect::<std::collections::BTreeSet<_>>();
    println!("   Pages:       {}", pages.len());
    println!("   Fingerprint: {}", snapshot.fingerprint().dimmed());

    Ok(())
}

/// Interactive search mode
pub fn interactive_search(ctx: &mut SearchContext) -> Result<(), String> {
    println!("{}", "╔═══════════════════════════════════════════╗".cyan());
    println!("{}", "║   Documentation Symbol Search             ║".cyan());
    println!("{}", "╚═══════════════════════════════════════════╝".cyan());
    println!();
    print_help();

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        print!("{} ", "symdex>".blue().bold());
        stdout.flush().map_err(|e| e.to_string())?;

        let mut input = String::new();
        let read = stdin.read_line(&mut input).map_err(|e| e.to_string())?;
        if read == 0 {
            println!();
            break;
        }

        let input = input.trim();
        if input.is_empty() {
            continue;
        }

        let (command, rest) = match input.split_once(char::is_whitespace) {
            Some((command, rest)) => (command, rest.trim()),
            None => (input, ""),
        };

        let outcome = match command {
            "quit" | "exit" | "q" => {
                println!("Goodbye! 👋");
                break;
            }
            "search" => {
                if rest.is_empty() {
                    println!("{} Usage: search <query>", "⚠️".yellow());
                    continue;
                }
                search_symbols(ctx, rest, None, false)
            }
            "show" => {
                if rest.is_empty() {
                    println!("{} Usage: show <symbol>", "⚠️".yellow());
                    continue;
                }
                show_symbol(ctx, rest, false)
            }
            "list" => list_symbols(ctx, false),
            "stats" => show_stats(ctx),
            "reload" => reload(ctx),
            "help" | "?" => {
                print_help();
                Ok(())
            }
            // Default to symbol search
            _ => search_symbols(ctx, input, None, false),
        };

        if let Err(e) = outcome {
            println!("{} {}", "❌".red(), e);
        }
        println!();
    }

    Ok(())
}

fn reload(ctx: &mut SearchContext) -> Result<(), String> {
    let rebuilt = ctx
        .snapshot
        .refresh()
        .map_err(|e| format_load_error(&e))?;
    if rebuilt {
        println!(
            "{} Documentation changed, index rebuilt ({} symbols)",
            "✓".green(),
            ctx.snapshot.index().len()
        );
    } else {
        println!("{} Index is up to date", "✓".green());
    }
    Ok(())
}

fn print_help() {
    println!("Commands:");
    println!("  {} <query>   - Search symbols", "search".green());
    println!("  {} <symbol>    - Show every anchor of a symbol", "show".green());
    println!("  {}             - List all symbols", "list".green());
    println!("  {}            - Show index statistics", "stats".green());
    println!("  {}           - Rebuild if the docs changed", "reload".green());
    println!("  {}             - Exit", "quit".green());
    println!();
}

/// Display detailed information about a symbol
fn display_record(ctx: &SearchContext, record: &SymbolRecord) {
    let anchors: Vec<&Anchor> = if ctx.verbose {
        record.anchors.iter().collect()
    } else {
        record.distinct_anchors()
    };

    println!();
    println!("{}", "╔═══════════════════════════════════════════╗".cyan());
    println!("║ {} Symbol: {}", "📚".cyan(), record.name.green().bold());
    println!("{}", "╚═══════════════════════════════════════════╝".cyan());
    println!();

    let count = anchors.len();
    for (idx, anchor) in anchors.iter().enumerate() {
        let is_last = idx == count - 1;
        let prefix = if count > 1 {
            if is_last { "  └─" } else { "  ├─" }
        } else {
            "    "
        };
        let continuation = if count > 1 && !is_last {
            "  │  "
        } else {
            "     "
        };

        println!("{}{}", prefix.cyan(), format_label(ctx, anchor));
        if !anchor.source_file.is_empty() {
            println!("{}{} {}", continuation.cyan(), "📄".cyan(), anchor.source_file);
        }
        println!(
            "{}{} {}",
            continuation.cyan(),
            "🔗".cyan(),
            resolve_url(ctx.snapshot.dir(), &anchor.url).bright_black()
        );
    }
    println!();
}

fn format_label(ctx: &SearchContext, anchor: &Anchor) -> String {
    if anchor.context_label.is_empty() {
        return "(group)".dimmed().to_string();
    }
    // Only signatures are worth highlighting; owning types print as-is
    if ctx.config.highlight && anchor.context_label.contains('(') {
        highlight_c_code(&anchor.context_label)
    } else {
        anchor.context_label.yellow().to_string()
    }
}

/// Anchors are relative to the search directory; make them openable.
fn resolve_url(dir: Option<&Path>, url: &str) -> String {
    match dir {
        Some(dir) if !url.contains("://") => dir.join(url).display().to_string(),
        _ => url.to_string(),
    }
}

fn no_match_message(ctx: &SearchContext, query: &str) -> String {
    let suggestions = ctx.snapshot.index().suggest(query, 5);
    if suggestions.is_empty() {
        format!("No symbols match '{}'", query)
    } else {
        format!(
            "No symbols match '{}'. Did you mean: {}?",
            query,
            suggestions.join(", ")
        )
    }
}

fn print_json<T: serde::Serialize + ?Sized>(value: &T) -> Result<(), String> {
    let json = serde_json::to_string_pretty(value).map_err(|e| e.to_string())?;
    println!("{}", json);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_context() -> SearchContext {
        SearchContext::open(Config::default(), true, false).unwrap()
    }

    #[test]
    fn test_open_sample() {
        let ctx = sample_context();
        assert_eq!(ctx.snapshot.dir(), None);
        assert_eq!(ctx.snapshot.index().len(), 21);
    }

    #[test]
    fn test_open_missing_dir_fails() {
        let config = Config {
            search_dir: "definitely/not/here".into(),
            ..Config::default()
        };
        let err = SearchContext::open(config, false, false).err().unwrap();
        assert!(err.contains("definitely/not/here"));
    }

    #[test]
    fn test_search_without_match_suggests() {
        let ctx = sample_context();
        let err = search_symbols(&ctx, "ustrcpyy", None, false).unwrap_err();
        assert!(err.contains("ustrcpy"));
        assert!(search_symbols(&ctx, "uart", Some(3), false).is_ok());
        assert!(search_symbols(&ctx, "", None, true).is_ok());
    }

    #[test]
    fn test_show_symbol() {
        let ctx = sample_context();
        assert!(show_symbol(&ctx, "UARTgetc", false).is_ok());
        assert!(show_symbol(&ctx, "uartg", false).is_ok());
        assert!(show_symbol(&ctx, "nothing_like_it", false).is_err());
    }

    #[test]
    fn test_resolve_url() {
        let dir = Path::new("docs/html/search");
        assert_eq!(
            resolve_url(Some(dir), "../structt_time.html#a2d"),
            dir.join("../structt_time.html#a2d").display().to_string()
        );
        assert_eq!(resolve_url(None, "../a.html"), "../a.html");
        assert_eq!(
            resolve_url(Some(dir), "https://example.org/a.html"),
            "https://example.org/a.html"
        );
    }
}
