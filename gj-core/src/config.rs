use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use directories::BaseDirs;
use serde::Deserialize;
use std::{collections::HashMap, fs, path::PathBuf};
use tracing::warn;

use crate::keywords::Keywords;

pub const DEFAULT_STORAGE_KEY: &str = "journalEntries";
pub const DEFAULT_LEGACY_STORAGE_KEY: &str = "gratitudeEntries";

#[derive(Debug, Clone)]
pub struct Config {
    /// Directory holding one `<storage key>.json` file per journal.
    pub data_dir: PathBuf,
    /// Storage key of the journal (canonical schema).
    pub storage_key: String,
    /// Storage key `--migrate` reads old-schema entries from.
    pub legacy_storage_key: String,
    /// Preferred editor name/binary (e.g. hx for Helix). Optional; the CLI will fall back to $VISUAL/$EDITOR.
    pub editor: Option<String>,
    /// How days are titled when an entry is shown.
    pub date_format: String,
    /// `chrono` formats accepted for dates on the command line.
    pub input_date_formats: Vec<String>,
    /// The date treated as "today".
    pub reference_date: NaiveDate,
    /// Calendar browsing only lets you select days that have an entry.
    pub require_entry_to_select: bool,
}

#[derive(Debug, Default, Deserialize)]
struct FileConfig {
    data_dir: Option<PathBuf>,
    storage_key: Option<String>,
    legacy_storage_key: Option<String>,
    editor: Option<String>,
    date_format: Option<String>,
    input_date_formats: Option<Vec<String>>,
    require_entry_to_select: Option<bool>,
    /// Optional table:
    /// [synonyms]
    /// ayer = "yesterday"
    synonyms: Option<HashMap<String, String>>,
}

impl Config {
    /// Public entrypoint: load config from disk (first XDG path, then native), apply defaults,
    /// and extend the global Keywords registry with user-defined synonyms if present.
    ///
    /// A config file that cannot be read or parsed is reported and ignored.
    pub fn load() -> Result<Self> {
        Ok(Self::load_from(&Self::config_file_paths()))
    }

    /// Loads the first of `paths` that exists, falling back to defaults.
    fn load_from(paths: &[PathBuf]) -> Self {
        let file_config = Self::read_file_config(paths).unwrap_or_else(|error| {
            warn!(error = %format!("{error:#}"), "ignoring config file");
            FileConfig::default()
        });
        Self::from_file_config(file_config)
    }

    fn from_file_config(file_config: FileConfig) -> Self {
        // Extend global keyword registry once at startup.
        Self::load_synonyms(&file_config.synonyms);

        Self {
            data_dir: file_config.data_dir.unwrap_or_else(Self::default_data_dir),
            storage_key: file_config
                .storage_key
                .unwrap_or_else(|| DEFAULT_STORAGE_KEY.to_string()),
            legacy_storage_key: file_config
                .legacy_storage_key
                .unwrap_or_else(|| DEFAULT_LEGACY_STORAGE_KEY.to_string()),
            editor: file_config.editor,
            date_format: file_config
                .date_format
                .unwrap_or_else(|| "%A, %d %B %Y".to_string()),
            input_date_formats: file_config
                .input_date_formats
                .filter(|formats| !formats.is_empty())
                .unwrap_or_else(Self::default_input_formats),
            reference_date: Local::now().date_naive(),
            require_entry_to_select: file_config.require_entry_to_select.unwrap_or(true),
        }
    }

    fn default_input_formats() -> Vec<String> {
        crate::parse_input::DEFAULT_FORMATS
            .iter()
            .map(|f| f.to_string())
            .collect()
    }

    /// Default data root: `{data_dir}/gj`
    /// - macOS:   `~/Library/Application Support/gj`
    /// - Linux:   `$XDG_DATA_HOME/gj` or `~/.local/share/gj`
    /// - Windows: `%APPDATA%\gj`
    fn default_data_dir() -> PathBuf {
        if let Some(base) = BaseDirs::new() {
            let mut p = base.data_dir().to_path_buf();
            p.push("gj");
            p
        } else {
            PathBuf::from("./gj")
        }
    }

    fn config_file_paths() -> Vec<PathBuf> {
        let mut v = Vec::new();
        if let Some(b) = BaseDirs::new() {
            let xdg = b.home_dir().join(".config").join("gj").join("config.toml");
            v.push(xdg);
            let native = b.config_dir().join("gj").join("config.toml");
            if !v.contains(&native) {
                v.push(native);
            }
        }
        v
    }

    /// Read the first existing config file and parse it.
    fn read_file_config(paths: &[PathBuf]) -> Result<FileConfig> {
        for path in paths {
            if !path.exists() {
                continue;
            }
            let s =
                fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
            return Self::parse_file(&s).with_context(|| format!("parsing {}", path.display()));
        }
        Ok(FileConfig::default())
    }

    /// Parse a TOML string into `FileConfig`.
    fn parse_file(s: &str) -> Result<FileConfig> {
        Ok(toml::from_str::<FileConfig>(s)?)
    }

    /// Merge `[synonyms]` into the global Keywords registry.
    /// Omits synonyms that collide with a canonical keyword (eg. "today").
    fn load_synonyms(synonyms: &Option<HashMap<String, String>>) {
        match synonyms {
            Some(map) if !map.is_empty() => {
                let pairs: Vec<(String, String)> = map
                    .iter()
                    .filter(|(alias, _)| !Keywords::is_canonical(alias))
                    .map(|(a, t)| (a.clone(), t.clone()))
                    .collect();

                if !pairs.is_empty() {
                    Keywords::extend(&pairs);
                }
            }
            _ => {}
        }
    }

    /// Input formats as the `&str` slice the parsers take.
    pub fn input_formats(&self) -> Vec<&str> {
        self.input_date_formats
            .iter()
            .map(AsRef::as_ref)
            .collect()
    }
}
