use std::{fs, io, path::Path};

use super::{ConfigError, ConfigPaths};

pub struct ConfigLoader<'a> {
    paths: &'a ConfigPaths,
}

impl<'a> ConfigLoader<'a> {
    pub fn new(paths: &'a ConfigPaths) -> Self {
        Self { paths }
    }

    /// Command lines from the startup file, in file order.
    pub fn load_lines(&self) -> Result<Vec<String>, ConfigError> {
        let Some(path) = &self.paths.rc_path else {
            return Ok(Vec::new());
        };
        match fs::read_to_string(path) {
            Ok(content) => Ok(Self::command_lines(&content)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => self.missing(path),
            Err(e) => Err(e.into()),
        }
    }

    fn missing(&self, path: &Path) -> Result<Vec<String>, ConfigError> {
        if self.paths.explicit {
            Err(ConfigError::ConfigFileNotFound(path.display().to_string()))
        } else {
            Ok(Vec::new())
        }
    }

    fn command_lines(content: &str) -> Vec<String> {
        content
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .map(String::from)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::path::PathBuf;

    fn temp_config(name: &str, content: &str) -> PathBuf {
        let path = env::temp_dir().join(format!("myshell-{}-{}", name, std::process::id()));
        fs::write(&path, content).unwrap();
        path
    }

    fn paths(rc_path: Option<PathBuf>, explicit: bool) -> ConfigPaths {
        ConfigPaths { rc_path, explicit }
    }

    #[test]
    fn test_comments_and_blank_lines_skipped() {
        let file = temp_config(
            "rc",
            "# startup\n\n  cd /tmp  \necho ready &\n   # indented comment\n",
        );
        let paths = paths(Some(file.clone()), true);

        let lines = ConfigLoader::new(&paths).load_lines().unwrap();
        assert_eq!(lines, vec!["cd /tmp", "echo ready &"]);

        let _ = fs::remove_file(file);
    }

    #[test]
    fn test_missing_default_file_is_silent() {
        let paths = paths(Some(PathBuf::from("/nonexistent/.myshellrc")), false);
        assert!(ConfigLoader::new(&paths).load_lines().unwrap().is_empty());
    }

    #[test]
    fn test_missing_explicit_file_is_reported() {
        let paths = paths(Some(PathBuf::from("/nonexistent/.myshellrc")), true);
        assert!(matches!(
            ConfigLoader::new(&paths).load_lines(),
            Err(ConfigError::ConfigFileNotFound(_))
        ));
    }

    #[test]
    fn test_no_startup_file() {
        let paths = paths(None, false);
        assert!(ConfigLoader::new(&paths).load_lines().unwrap().is_empty());
    }
}
