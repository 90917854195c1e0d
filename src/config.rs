use crate::constants::{CONFIG_NAME, LEGACY_CONFIG_NAME};
use log::{debug, warn};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Config file not found: {0}")]
    NotFound(PathBuf),
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_yaml::Error,
    },
    #[error("Missing Linode API key, set 'api-key' in linode-inventory.yml or LINODE_API_KEY")]
    MissingApiKey,
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub struct Config {
    #[serde(default)]
    pub api_key: String,
    #[serde(default)]
    pub display_group: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    linode: Config,
}

impl Config {
    pub fn from_yaml(content: &str, path: &Path) -> Result<Self, ConfigError> {
        if content.trim().is_empty() {
            return Ok(Config::default());
        }
        let file: ConfigFile =
            serde_yaml::from_str(content).map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        Ok(file.linode)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        debug!("Reading config file: {}", path.display());
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Config::from_yaml(&content, path)
    }

    /// Loads `path` when given, otherwise the first default location that exists.
    /// Without any file the config starts empty and relies on overrides.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) if !path.exists() => Err(ConfigError::NotFound(path.to_path_buf())),
            Some(path) => Config::from_file(path),
            None => {
                let locations = default_locations();
                match locations.iter().find(|p| p.exists()) {
                    Some(path) => Config::from_file(path),
                    None => {
                        if let Some(legacy) = find_legacy_config(&locations) {
                            warn!(
                                "Ignoring {}, move its [linode] settings to {} as YAML",
                                legacy.display(),
                                CONFIG_NAME
                            );
                        }
                        debug!("No {} found, using defaults", CONFIG_NAME);
                        Ok(Config::default())
                    }
                }
            }
        }
    }

    pub fn with_overrides(mut self, api_key: Option<&str>, display_group: Option<&str>) -> Self {
        if let Some(api_key) = api_key {
            self.api_key = api_key.to_string();
        }
        if let Some(display_group) = display_group {
            self.display_group = Some(display_group.to_string());
        }
        self
    }

    pub fn validate(self) -> Result<Self, ConfigError> {
        if self.api_key.trim().is_empty() {
            return Err(ConfigError::MissingApiKey);
        }
        Ok(self)
    }

    /// Returns true if linodes in `display_group` belong in the inventory.
    pub fn filter_display_group(&self, display_group: &str) -> bool {
        match self.display_group.as_deref() {
            None | Some("") => true,
            Some(wanted) => wanted == display_group,
        }
    }
}

/// Directory of the executable first, then the working directory.
fn default_locations() -> Vec<PathBuf> {
    let mut locations = Vec::new();
    if let Some(dir) = std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
    {
        locations.push(dir.join(CONFIG_NAME));
    }
    locations.push(PathBuf::from(CONFIG_NAME));
    locations
}

/// An INI config sitting where a YAML config was expected.
fn find_legacy_config(locations: &[PathBuf]) -> Option<PathBuf> {
    locations
        .iter()
        .map(|path| path.with_file_name(LEGACY_CONFIG_NAME))
        .find(|path| path.exists())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_config_file() {
        let file = write_config(
            r#"
linode:
  api-key: abc123
  display-group: web
"#,
        );

        let config = Config::load(Some(file.path())).unwrap();
        assert_eq!(config.api_key, "abc123");
        assert_eq!(config.display_group.as_deref(), Some("web"));
    }

    #[test]
    fn test_load_config_without_display_group() {
        let file = write_config("linode:\n  api-key: abc123\n");

        let config = Config::load(Some(file.path())).unwrap();
        assert_eq!(config.display_group, None);
        assert!(config.filter_display_group(""));
    }

    #[test]
    fn test_missing_explicit_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.yml");

        let result = Config::load(Some(&path));
        assert!(matches!(result, Err(ConfigError::NotFound(_))));
    }

    #[test]
    fn test_invalid_yaml() {
        let file = write_config("linode: { api-key: ");

        let result = Config::load(Some(file.path()));
        assert!(matches!(result, Err(ConfigError::Parse { .. })));
    }

    #[test]
    fn test_missing_api_key() {
        let file = write_config("linode:\n  display-group: web\n");

        let result = Config::load(Some(file.path())).unwrap().validate();
        assert!(matches!(result, Err(ConfigError::MissingApiKey)));
    }

    #[test]
    fn test_overrides_win_over_file() {
        let file = write_config("linode:\n  api-key: from-file\n  display-group: web\n");

        let config = Config::load(Some(file.path()))
            .unwrap()
            .with_overrides(Some("from-env"), Some("db"))
            .validate()
            .unwrap();
        assert_eq!(config.api_key, "from-env");
        assert_eq!(config.display_group.as_deref(), Some("db"));
    }

    #[test]
    fn test_find_legacy_config() {
        let dir = tempfile::tempdir().unwrap();
        let locations = vec![dir.path().join(CONFIG_NAME)];
        assert_eq!(find_legacy_config(&locations), None);

        let legacy = dir.path().join(LEGACY_CONFIG_NAME);
        std::fs::write(&legacy, "[linode]\napi-key = abc123\n").unwrap();
        assert_eq!(find_legacy_config(&locations), Some(legacy));
    }

    #[rstest]
    #[case(None, "web", true)]
    #[case(None, "", true)]
    #[case(Some(""), "db", true)]
    #[case(Some("web"), "web", true)]
    #[case(Some("web"), "db", false)]
    #[case(Some("web"), "", false)]
    #[case(Some("web"), "Web", false)]
    fn test_filter_display_group(
        #[case] filter: Option<&str>,
        #[case] display_group: &str,
        #[case] expected: bool,
    ) {
        let config = Config {
            api_key: "key".to_string(),
            display_group: filter.map(String::from),
        };
        assert_eq!(config.filter_display_group(display_group), expected);
    }
}
