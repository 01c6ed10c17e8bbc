//! Configuration loading and management.

mod config_data;
mod language;
mod line_directive;

use std::fs;
use std::path::{Path, PathBuf};

pub use config_data::{Config, WatchConfig};
pub use language::Language;
pub use line_directive::{DirectiveTable, LineDirective};

use crate::errors::Result;

/// Standard configuration file names to search for.
const CONFIG_FILES: &[&str] = &["lmt.toml", ".lmt.toml"];

/// Finds the configuration file in the given directory or its parents.
pub fn find_config_file(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir.to_path_buf();

    loop {
        for name in CONFIG_FILES {
            let candidate = current.join(name);
            if candidate.exists() {
                return Some(candidate);
            }
        }

        if !current.pop() {
            break;
        }
    }

    None
}

/// Reads configuration from a TOML file.
pub fn read_config_file(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)?;
    Ok(toml::from_str(&content)?)
}

/// Reads configuration, searching from the given directory.
///
/// If no config file is found, returns the default configuration.
pub fn read_config(start_dir: &Path) -> Result<Config> {
    match find_config_file(start_dir) {
        Some(path) => {
            tracing::debug!("Using configuration {}", path.display());
            read_config_file(&path)
        }
        None => Ok(Config::default()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_find_config_file() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("lmt.toml");
        fs::write(&config_path, "publishable = true").unwrap();

        let found = find_config_file(dir.path()).unwrap();
        assert_eq!(found, config_path);
    }

    #[test]
    fn test_find_config_file_parent() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join(".lmt.toml");
        fs::write(&config_path, "").unwrap();

        let subdir = dir.path().join("subdir");
        fs::create_dir(&subdir).unwrap();

        let found = find_config_file(&subdir).unwrap();
        assert_eq!(found, config_path);
    }

    #[test]
    fn test_read_config_file() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("lmt.toml");
        fs::write(
            &config_path,
            r#"
sources = ["README.md", "addons/*.md"]
output_dir = "build"

[[languages]]
name = "cpp"
identifiers = ["cxx"]
directive = "c"

[watch]
debounce_ms = 250
"#,
        )
        .unwrap();

        let config = read_config_file(&config_path).unwrap();
        assert_eq!(config.sources, vec!["README.md", "addons/*.md"]);
        assert_eq!(config.output_dir(), Some(Path::new("build")));
        assert_eq!(config.languages[0].directive, LineDirective::C);
        assert_eq!(config.watch.debounce_ms, 250);
    }

    #[test]
    fn test_read_config_rejects_unknown_directive() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("lmt.toml");
        fs::write(
            &config_path,
            "[[languages]]\nname = \"rust\"\ndirective = \"rust\"\n",
        )
        .unwrap();

        assert!(read_config_file(&config_path).is_err());
    }

    #[test]
    fn test_read_config_default() {
        let dir = tempdir().unwrap();
        let config = read_config(dir.path()).unwrap();
        assert_eq!(config, Config::default());
    }
}
