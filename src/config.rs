use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::quiz::QuizMode;

pub const DEFAULT_CONFIG_FILE: &str = "config.toml";
pub const DEFAULT_LOG_FILTER: &str = "wordquiz_rust_gui=info";

#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct Config {
    /// Directory holding words.json and genres.json
    pub data_dir: PathBuf,
    pub default_quiz_mode: QuizMode,
    pub log_filter: Option<String>,
    /// Extra font (e.g. a CJK font) installed ahead of egui's defaults
    pub font_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            data_dir: PathBuf::from("wordquiz-data"),
            default_quiz_mode: QuizMode::MeaningToWord,
            log_filter: None,
            font_path: None,
        }
    }
}

impl Config {
    pub fn log_filter(&self) -> &str {
        self.log_filter.as_deref().unwrap_or(DEFAULT_LOG_FILTER)
    }
}

pub fn parse_config(contents: &str) -> Result<Config> {
    let config: Config = toml::from_str(contents)?;
    if config.data_dir.as_os_str().is_empty() {
        return Err(Error::Config("data_dir must not be empty".to_string()));
    }
    Ok(config)
}

pub fn load_config_from_file(file_path: &Path) -> Result<Config> {
    let contents = fs::read_to_string(file_path).map_err(|e| {
        Error::Config(format!(
            "Failed to read {}: {}. Please ensure it exists.",
            file_path.display(),
            e
        ))
    })?;
    parse_config(&contents)
        .map_err(|e| Error::Config(format!("Failed to parse {}: {}", file_path.display(), e)))
}
