//! Loading a whole documentation snapshot from the generator's search
//! directory, and noticing when it has been regenerated.

use super::embedded::{SAMPLE_FILE_NAME, SAMPLE_SEARCH_DATA};
use super::error::{Result, SearchDataError};
use super::index::Index;
use super::searchdata::{parse_json_records, parse_search_data};
use super::store::Store;
use sha2::{Digest, Sha256};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq)]
struct SourceFile {
    name: String,
    contents: String,
}

impl SourceFile {
    fn is_json(&self) -> bool {
        self.name.ends_with(".json")
    }
}

/// An index together with where it came from.
#[derive(Debug, Clone)]
pub struct Snapshot {
    dir: Option<PathBuf>,
    categories: Vec<String>,
    files: Vec<String>,
    fingerprint: String,
    index: Index,
}

impl Snapshot {
    /// Load every `<category>_*.js` fragment and every `*.json` record file
    /// in `dir`, in file-name order, fragments first.
    pub fn from_dir(dir: &Path, categories: &[String]) -> Result<Self> {
        let start = std::time::Instant::now();
        let sources = read_sources(dir, categories)?;
        let snapshot = Self::from_sources(Some(dir.to_path_buf()), categories.to_vec(), sources)?;

        tracing::info!(
            dir = %dir.display(),
            files = snapshot.files.len(),
            symbols = snapshot.index.len(),
            elapsed = ?start.elapsed(),
            "search data loaded"
        );

        Ok(snapshot)
    }

    /// The snapshot compiled into the binary.
    pub fn bundled() -> Result<Self> {
        let sources = vec![SourceFile {
            name: SAMPLE_FILE_NAME.to_string(),
            contents: SAMPLE_SEARCH_DATA.to_string(),
        }];
        Self::from_sources(None, Vec::new(), sources)
    }

    fn from_sources(
        dir: Option<PathBuf>,
        categories: Vec<String>,
        sources: Vec<SourceFile>,
    ) -> Result<Self> {
        let fingerprint = fingerprint(&sources);
        let mut store = Store::default();

        for source in &sources {
            let part = if source.is_json() {
                parse_json_records(&source.contents)
            } else {
                parse_search_data(&source.contents)
            }
            .and_then(Store::load)
            .map_err(|e| e.in_file(&source.name))?;

            tracing::debug!(file = %source.name, records = part.len(), "file parsed");
            store.extend(part);
        }

        Ok(Snapshot {
            dir,
            categories,
            files: sources.into_iter().map(|s| s.name).collect(),
            fingerprint,
            index: Index::build(store),
        })
    }

    pub fn index(&self) -> &Index {
        &self.index
    }

    /// Directory the snapshot was read from; `None` for the bundled one.
    pub fn dir(&self) -> Option<&Path> {
        self.dir.as_deref()
    }

    pub fn files(&self) -> &[String] {
        &self.files
    }

    /// SHA-256 over the names and contents of the loaded files
    pub fn fingerprint(&self) -> &str {
        &self.fingerprint
    }

    /// Whether the directory's contents no longer match this snapshot.
    /// The bundled snapshot is never stale.
    pub fn is_stale(&self) -> Result<bool> {
        match &self.dir {
            Some(dir) => {
                let sources = read_sources(dir, &self.categories)?;
                Ok(fingerprint(&sources) != self.fingerprint)
            }
            None => Ok(false),
        }
    }

    /// Rebuild the whole index if the directory has changed since loading.
    /// Returns whether a rebuild happened.
    pub fn refresh(&mut self) -> Result<bool> {
        let Some(dir) = self.dir.clone() else {
            return Ok(false);
        };
        if !self.is_stale()? {
            return Ok(false);
        }

        *self = Self::from_dir(&dir, &self.categories)?;
        Ok(true)
    }
}

fn is_search_file(name: &str, categories: &[String]) -> bool {
    if name.ends_with(".json") {
        return true;
    }
    let Some(stem) = name.strip_suffix(".js") else {
        return false;
    };
    categories.iter().any(|category| {
        stem.strip_prefix(category.as_str())
            .is_some_and(|rest| rest.starts_with('_') && rest.len() > 1)
    })
}

fn read_sources(dir: &Path, categories: &[String]) -> Result<Vec<SourceFile>> {
    let io_err = |source| SearchDataError::Io {
        path: dir.to_path_buf(),
        source,
    };

    let mut names = Vec::new();
    for entry in fs::read_dir(dir).map_err(io_err)? {
        let entry = entry.map_err(io_err)?;
        if !entry.file_type().map_err(io_err)?.is_file() {
            continue;
        }
        let Ok(name) = entry.file_name().into_string() else {
            continue;
        };
        if is_search_file(&name, categories) {
            names.push(name);
        }
    }

    // fragments before record files, each group by name
    names.sort_by(|a, b| {
        a.ends_with(".json")
            .cmp(&b.ends_with(".json"))
            .then_with(|| a.cmp(b))
    });

    names
        .into_iter()
        .map(|name| -> Result<SourceFile> {
            let path = dir.join(&name);
            let contents = fs::read_to_string(&path)
                .map_err(|source| SearchDataError::Io { path, source })?;
            Ok(SourceFile { name, contents })
        })
        .collect()
}

fn fingerprint(sources: &[SourceFile]) -> String {
    let mut hasher = Sha256::new();
    for source in sources {
        hasher.update(source.name.as_bytes());
        hasher.update([0u8]);
        hasher.update((source.contents.len() as u64).to_le_bytes());
        hasher.update(source.contents.as_bytes());
    }
    format!("{:x}", hasher.finalize())
}
