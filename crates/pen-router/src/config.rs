// File: src/config.rs
// Purpose: Configuration parsing from pen.toml

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::route::SpecialFileMatcher;

/// Extensions recognized for `layout` and `screen` files
pub const DEFAULT_EXTENSIONS: &[&str] = &["tsx", "ts", "jsx", "js"];

/// Default config file name, looked up in the working directory
pub const CONFIG_FILE: &str = "pen.toml";

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub routing: RoutingConfig,

    #[serde(default)]
    pub build: BuildConfig,
}

/// Routing configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoutingConfig {
    /// Directory containing the app routes (default: "src/app")
    #[serde(default = "default_app_dir")]
    pub app_dir: String,

    /// File extensions accepted for layout and screen files
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,
}

/// Build output configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuildConfig {
    /// Directory for generated files (default: ".pen")
    #[serde(default = "default_out_dir")]
    pub out_dir: String,

    #[serde(default = "default_manifest_file")]
    pub manifest_file: String,
}

// Default values
fn default_app_dir() -> String {
    "src/app".to_string()
}

fn default_extensions() -> Vec<String> {
    DEFAULT_EXTENSIONS.iter().map(|ext| ext.to_string()).collect()
}

fn default_out_dir() -> String {
    ".pen".to_string()
}

fn default_manifest_file() -> String {
    "manifest.json".to_string()
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            app_dir: default_app_dir(),
            extensions: default_extensions(),
        }
    }
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            out_dir: default_out_dir(),
            manifest_file: default_manifest_file(),
        }
    }
}

impl RoutingConfig {
    pub fn matcher(&self) -> SpecialFileMatcher {
        SpecialFileMatcher::new(self.extensions.iter().cloned())
    }
}

impl BuildConfig {
    /// Where `pen build` writes the manifest
    pub fn manifest_path(&self) -> PathBuf {
        Path::new(&self.out_dir).join(&self.manifest_file)
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        // If file doesn't exist, return default config
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;

        Self::parse(&content).with_context(|| format!("Failed to parse config file: {:?}", path))
    }

    /// Load configuration from default path (./pen.toml)
    pub fn load_default() -> Result<Self> {
        Self::load(CONFIG_FILE)
    }

    /// Parse configuration from TOML text; empty text yields defaults
    pub fn parse(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        let config: Config = toml::from_str(content)?;
        if config.routing.extensions.is_empty() {
            anyhow::bail!("routing.extensions must list at least one extension");
        }
        if config.routing.extensions.iter().any(|ext| ext.trim_start_matches('.').is_empty()) {
            anyhow::bail!("routing.extensions must not contain empty extensions");
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.routing.app_dir, "src/app");
        assert_eq!(config.routing.extensions, vec!["tsx", "ts", "jsx", "js"]);
        assert_eq!(config.build.out_dir, ".pen");
        assert_eq!(config.build.manifest_path(), Path::new(".pen/manifest.json"));
    }

    #[test]
    fn test_empty_config() {
        let config = Config::parse("   \n").unwrap();
        assert_eq!(config.routing.app_dir, "src/app");
        assert_eq!(config.build.manifest_file, "manifest.json");
    }

    #[test]
    fn test_partial_config() {
        let toml = r#"
            [routing]
            app_dir = "app"

            [build]
            out_dir = "dist"
        "#;
        let config = Config::parse(toml).unwrap();
        assert_eq!(config.routing.app_dir, "app");
        assert_eq!(config.routing.extensions.len(), 4);
        assert_eq!(config.build.manifest_path(), Path::new("dist/manifest.json"));
    }

    #[test]
    fn test_custom_extensions_feed_matcher() {
        let config = Config::parse("[routing]\nextensions = [\"rsx\"]\n").unwrap();
        let matcher = config.routing.matcher();

        assert!(matcher.classify("screen.rsx").is_some());
        assert!(matcher.classify("screen.tsx").is_none());
    }

    #[test]
    fn test_empty_extensions_rejected() {
        assert!(Config::parse("[routing]\nextensions = []\n").is_err());
        assert!(Config::parse("[routing]\nextensions = [\"tsx\", \".\"]\n").is_err());
    }

    #[test]
    fn test_multi_dot_extensions_feed_matcher() {
        let config = Config::parse("[routing]\nextensions = [\"d.ts\"]\n").unwrap();
        let matcher = config.routing.matcher();

        assert!(matcher.classify("screen.d.ts").is_some());
        assert!(matcher.classify("screen.ts").is_none());
    }

    #[test]
    fn test_missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load(dir.path().join("pen.toml")).unwrap();
        assert_eq!(config.routing.app_dir, "src/app");
    }

    #[test]
    fn test_load_reports_parse_errors_with_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pen.toml");
        fs::write(&path, "[routing\n").unwrap();

        let err = Config::load(&path).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config file"));
    }
}
