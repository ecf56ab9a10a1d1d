use colored::*;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};

pub const CONFIG_FILE: &str = "symdex.toml";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_search_dir")]
    pub search_dir: PathBuf,
    #[serde(default = "default_categories")]
    pub categories: Vec<String>,
    #[serde(default = "default_max_results")]
    pub max_results: usize,
    #[serde(default = "default_highlight")]
    pub highlight: bool,
}

fn default_search_dir() -> PathBuf {
    PathBuf::from("docs/html/search")
}

fn default_categories() -> Vec<String> {
    vec!["all".to_string()]
}

fn default_max_results() -> usize {
    20
}

fn default_highlight() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            search_dir: default_search_dir(),
            categories: default_categories(),
            max_results: default_max_results(),
            highlight: default_highlight(),
        }
    }
}

impl Config {
    pub fn load() -> Self {
        let config_path = PathBuf::from(CONFIG_FILE);

        if config_path.exists() {
            match fs::read_to_string(&config_path) {
                Ok(content) => match Self::parse(&content) {
                    Ok(config) => {
                        tracing::debug!(path = %config_path.display(), "configuration loaded");
                        return config;
                    }
                    Err(e) => {
                        eprintln!("{} Failed to parse {}: {}", "⚠️".yellow(), CONFIG_FILE, e);
                        eprintln!("   Using default configuration");
                    }
                },
                Err(e) => {
                    eprintln!("{} Failed to read {}: {}", "⚠️".yellow(), CONFIG_FILE, e);
                    eprintln!("   Using default configuration");
                }
            }
        }

        Config::default()
    }

    pub fn parse(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }
}
