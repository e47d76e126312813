use std::fmt;

mod loader;
mod paths;

use loader::ConfigLoader;
pub use paths::{ConfigPaths, RC_FILE_NAME};

use crate::flags::Flags;

pub struct Config {
    paths: ConfigPaths,
}

impl Config {
    pub fn new(flags: &Flags) -> Self {
        Self {
            paths: ConfigPaths::new(flags),
        }
    }

    /// Lines of the startup file to run before the first prompt.
    pub fn startup_lines(&self) -> Result<Vec<String>, ConfigError> {
        ConfigLoader::new(&self.paths).load_lines()
    }
}

#[derive(Debug)]
pub enum ConfigError {
    ConfigFileNotFound(String),
    IoError(std::io::Error),
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::IoError(e)
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::ConfigFileNotFound(path) => write!(f, "Config file not found: {}", path),
            ConfigError::IoError(e) => write!(f, "IO error: {}", e),
        }
    }
}

impl std::error::Error for ConfigError {}
