use colored::*;
use std::collections::BTreeMap;

use crate::search::SearchContext;
use symdex::docs::{Index, SymbolRecord};

/// Group symbols under the file that defines them. Symbols without a source
/// file (struct fields, groups) go under their documentation page instead.
fn group_by_origin(index: &Index) -> BTreeMap<String, Vec<&SymbolRecord>> {
    let mut groups: BTreeMap<String, Vec<&SymbolRecord>> = BTreeMap::new();

    for record in index.records() {
        let Some(anchor) = record.primary_anchor() else {
            continue;
        };
        let origin = if anchor.source_file.is_empty() {
            anchor
                .page()
                .trim_start_matches("../")
                .to_string()
        } else {
            anchor.source_file.clone()
        };
        groups.entry(origin).or_default().push(record);
    }

    groups
}

pub fn show_tree(ctx: &SearchContext) -> Result<(), String> {
    let groups = group_by_origin(ctx.snapshot.index());

    if groups.is_empty() {
        println!("{} No symbols loaded", "✨".cyan());
        return Ok(());
    }

    println!("{} Symbol Tree:\n", "📊".cyan());
    for (origin, records) in &groups {
        println!("{} {}", "📦".cyan(), origin.bold().green());
        for (idx, record) in records.iter().enumerate() {
            let branch = if idx == records.len() - 1 { "└─" } else { "├─" };
            let overloads = record.distinct_anchors().len();
            if overloads > 1 {
                println!(
                    "  {} {} {}",
                    branch.blue(),
                    record.name.green(),
                    format!("({} anchors)", overloads).dimmed()
                );
            } else {
                println!("  {} {}", branch.blue(), record.name.green());
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use symdex::get_sample_index;

    #[test]
    fn test_group_by_origin() {
        let groups = group_by_origin(get_sample_index());

        let origins: Vec<_> = groups.keys().map(String::as_str).collect();
        assert_eq!(
            origins,
            [
                "group__uartstdio__api.html",
                "group__ustdlib__api.html",
                "structt_time.html",
                "uartstdio.c",
                "ustdlib.c"
            ]
        );

        let fields: Vec<_> = groups["structt_time.html"]
            .iter()
            .map(|r| r.name.as_str())
            .collect();
        assert_eq!(
            fields,
            ["ucHour", "ucMday", "ucMin", "ucMon", "ucSec", "ucWday", "usYear"]
        );
        assert_eq!(groups["uartstdio.c"].len(), 5);
    }
}
