//! Merge-job configuration.
//!
//! A config is a JSON file; all paths inside it are relative to the config
//! file's own directory and are resolved at load time. The regexes and
//! templates are carried as strings and compiled/rendered by the pipeline
//! that consumes them.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::Error;

/// One merge job, loaded once and immutable for the run.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub main: MainSpec,
    pub langs: Vec<LangSpec>,
    pub output: OutputSpec,
    #[serde(default)]
    pub report: ReportSpec,
    /// When a referenced key has no translation, fall back to the raw
    /// template value instead of dropping the entry.
    #[serde(default)]
    pub use_not_found: bool,
}

/// The main template file and the pattern extracting `(key, raw_value)`
/// from its lines.
#[derive(Debug, Clone, Deserialize)]
pub struct MainSpec {
    pub file: PathBuf,
    pub pattern: String,
}

/// One language file and the pattern extracting `(key, value)` from its
/// lines. Files merge in list order, later ones winning on collision.
#[derive(Debug, Clone, Deserialize)]
pub struct LangSpec {
    pub file: PathBuf,
    pub pattern: String,
}

/// Where and how the merged output is written.
#[derive(Debug, Clone, Deserialize)]
pub struct OutputSpec {
    pub dir: PathBuf,
    pub file: String,
    /// Per-entry template; `{{key}}` and `{{value}}` are bound.
    pub template: String,
    /// Optional whole-file wrapper; `{{txt}}` is bound to the rendered
    /// entries.
    #[serde(default)]
    pub content: Option<String>,
}

/// Report destination and console-warning selection. All fields optional:
/// with no `dir`/`file` and no `warn`, the run is silent about errors.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReportSpec {
    /// Directory template; `{{time}}` is bound at run time. Kept as a string
    /// until rendered.
    #[serde(default)]
    pub dir: Option<String>,
    #[serde(default)]
    pub file: Option<String>,
    /// Comma-separated category names (`not_found`, `duplicate`, `not_use`)
    /// that should trigger a console warning.
    #[serde(default)]
    pub warn: Option<String>,
    /// Skip the `(1)`, `(2)`, … suffix probing and reuse the rendered
    /// report directory as-is.
    #[serde(default)]
    pub disable_version: bool,
}

impl Config {
    /// Loads a config file and resolves its paths against the file's parent
    /// directory.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let path = path.as_ref();
        let file = File::open(path)?;
        let mut config: Config = serde_json::from_reader(BufReader::new(file))?;
        if let Some(base) = path.parent() {
            config.resolve_paths(base);
        }
        Ok(config)
    }

    fn resolve_paths(&mut self, base: &Path) {
        self.main.file = base.join(&self.main.file);
        self.output.dir = base.join(&self.output.dir);
        for lang in &mut self.langs {
            lang.file = base.join(&lang.file);
        }
        if let Some(dir) = &self.report.dir {
            self.report.dir = Some(base.join(dir).to_string_lossy().into_owned());
        }
    }

    /// The warn categories as a list, empty when none are configured.
    pub fn warn_categories(&self) -> Vec<String> {
        self.report
            .warn
            .as_deref()
            .map(|warn| {
                warn.split(',')
                    .map(|category| category.trim().to_string())
                    .filter(|category| !category.is_empty())
                    .collect()
            })
            .unwrap_or_default()
    }
}
