use colored::*;
use std::{fs, path::PathBuf};

use crate::config::CONFIG_FILE;

pub const TEMPLATE: &str = r#"# symdex Configuration File

# Directory holding the documentation generator's search data
# (the html/search folder next to the generated pages)
search_dir = "docs/html/search"

# Which fragment files to load: "all" reads all_*.js, which already lists
# every symbol. Add "functions", "variables", ... to read those instead.
categories = ["all"]

# Default number of results shown by `symdex search`
max_results = 20

# Highlight C signatures in results
highlight = true
"#;

pub fn init_config(force: bool) -> Result<(), String> {
    let config_path = PathBuf::from(CONFIG_FILE);

    if config_path.exists() && !force {
        return Err(format!(
            "{} already exists. Use --force to overwrite.",
            CONFIG_FILE
        ));
    }

    fs::write(&config_path, TEMPLATE)
        .map_err(|e| format!("Failed to create {}: {}", CONFIG_FILE, e))?;

    println!("{} Created {}", "✅".green(), CONFIG_FILE);
    println!("\n{}", "Configuration file created with defaults:".cyan());
    println!("  {} search_dir = \"docs/html/search\"", "•".blue());
    println!("  {} categories = [\"all\"]", "•".blue());
    println!("  {} max_results = 20", "•".blue());
    println!("  {} highlight = true", "•".blue());
    println!(
        "\n{}",
        format!("Edit {} to point at your generated docs.", CONFIG_FILE).cyan()
    );

    Ok(())
}
