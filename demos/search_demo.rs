//! Example demonstrating the symbol index API
//!
//! This example shows how to use the bundled sample search data for
//! lookups and searches.
//!
//! Run with: cargo run --example search_demo

use symdex::docs::{Index, RawAnchor, RawEntry, get_sample_index};

fn main() {
    println!("=== Symbol Index Demo ===\n");

    // Get the bundled sample index (parsed and indexed on first access)
    let index = get_sample_index();

    // Example 1: Look up a specific symbol
    println!("1️⃣  Looking up 'UARTgetc':");
    if let Some(record) = index.get("UARTgetc") {
        println!("   ✓ Found symbol: {}", record.name);
        println!("   ✓ Anchors: {}", record.anchors.len());
        if let Some(anchor) = record.primary_anchor() {
            println!("   ✓ Defined in: {}", anchor.source_file);
        }
    }
    println!();

    // Example 2: Substring search, ranked
    println!("2️⃣  Searching for 'uartg':");
    for record in index.query("uartg") {
        println!("      • {}", record.name);
    }
    println!();

    // Example 3: Group keys and display names both work
    println!("3️⃣  Searching for 'ustdlib_5fapi' and 'Ustdlib_api':");
    for text in ["ustdlib_5fapi", "Ustdlib_api"] {
        let names: Vec<_> = index.query(text).iter().map(|r| r.name.as_str()).collect();
        println!("      • {} -> {:?}", text, names);
    }
    println!();

    // Example 4: Struct fields carry their owning type as context
    println!("4️⃣  Fields of tTime:");
    let fields: Vec<_> = index
        .records()
        .filter_map(|r| r.primary_anchor().map(|anchor| (r, anchor)))
        .filter(|(_, anchor)| anchor.context_label == "tTime")
        .collect();
    for (record, anchor) in fields.iter().take(5) {
        println!("      • {} ({})", record.name, anchor.url);
    }
    if fields.len() > 5 {
        println!("      ... and {} more", fields.len() - 5);
    }
    println!();

    // Example 5: Overloaded descriptions merge into one record
    println!("5️⃣  Anchors of UARTStdioInit:");
    if let Some(record) = index.get("UARTStdioInit") {
        for (i, anchor) in record.distinct_anchors().iter().enumerate() {
            println!("   [{}] {}", i + 1, anchor.context_label);
        }
    }
    println!();

    // Example 6: Building an index from your own records
    println!("6️⃣  Building an index from records:");
    let entries = vec![RawEntry {
        key: None,
        name: Some("ustrncpy".to_string()),
        anchors: vec![RawAnchor {
            url: "../group__ustdlib__api.html#ga1".to_string(),
            description: "ustrncpy(char *s1, const char *s2, int n):&#160;ustdlib.c".to_string(),
            same_page: true,
        }],
    }];
    match Index::from_entries(entries) {
        Ok(custom) => println!("   ✓ Indexed {} symbol(s)", custom.len()),
        Err(e) => println!("   ✗ {}", e),
    }
    println!();

    // Example 7: Records without anchors are rejected
    println!("7️⃣  Loading a record without anchors:");
    let broken = vec![RawEntry {
        key: Some("ghost".to_string()),
        name: Some("ghost".to_string()),
        anchors: Vec::new(),
    }];
    if let Err(e) = Index::from_entries(broken) {
        println!("   ✓ Rejected: {}", e);
    }
    println!();

    // Example 8: Statistics
    println!("8️⃣  Index statistics:");
    println!("   ✓ Total symbols: {}", index.len());
    println!("   ✓ Total anchors: {}", index.anchor_count());

    println!("\n=== Demo Complete ===");
}
