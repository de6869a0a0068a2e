use std::path::Path;

use serde::{Deserialize, Serialize};

/// File server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Front-end origin allowed to make cross-origin requests
    #[serde(default = "default_allowed_origin")]
    pub allowed_origin: String,

    /// Whether cross-origin requests may carry credentials
    #[serde(default = "default_allow_credentials")]
    pub allow_credentials: bool,

    /// List subdirectory names alongside files in the debug structure view.
    ///
    /// When off, every listed name is a file that `/api/files` can serve.
    #[serde(default)]
    pub structure_include_dirs: bool,
}

fn default_allowed_origin() -> String {
    // Vite dev server
    "http://localhost:5173".to_string()
}

fn default_allow_credentials() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            allowed_origin: default_allowed_origin(),
            allow_credentials: default_allow_credentials(),
            structure_include_dirs: false,
        }
    }
}

impl Config {
    /// Load config from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.allowed_origin, "http://localhost:5173");
        assert!(config.allow_credentials);
        assert!(!config.structure_include_dirs);
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: Config = toml::from_str(r#"allowed_origin = "https://research.example""#).unwrap();
        assert_eq!(config.allowed_origin, "https://research.example");
        assert!(config.allow_credentials);
        assert!(!config.structure_include_dirs);
    }

    #[test]
    fn test_from_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("research-files.toml");
        std::fs::write(
            &path,
            "allow_credentials = false\nstructure_include_dirs = true\n",
        )
        .unwrap();

        let config = Config::from_file(&path).unwrap();
        assert!(!config.allow_credentials);
        assert!(config.structure_include_dirs);
        assert_eq!(config.allowed_origin, "http://localhost:5173");
    }

    #[test]
    fn test_from_file_rejects_bad_toml() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("broken.toml");
        std::fs::write(&path, "allow_credentials = \"maybe\"").unwrap();

        assert!(Config::from_file(&path).is_err());
    }

    #[test]
    fn test_from_file_missing() {
        let temp_dir = TempDir::new().unwrap();
        assert!(Config::from_file(&temp_dir.path().join("nope.toml")).is_err());
    }
}
