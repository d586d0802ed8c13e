//! Configuration loading
//!
//! Settings come from an optional `obj-bake.toml` and from command-line
//! flags; flags win.
//!
//! ```toml
//! search_path = "assets/models"
//! source_output_path = "src/generated"
//! header_output_path = "include/generated"
//! shading = "simple"   # or "averaged" (default)
//! keep_going = false
//! ```

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::accumulator::ShadingPolicy;

/// Config file looked up in the working directory when `--config` is not given
pub const DEFAULT_CONFIG_FILE: &str = "obj-bake.toml";

/// Partially specified settings, from a config file or from CLI flags
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub search_path: Option<PathBuf>,
    pub source_output_path: Option<PathBuf>,
    pub header_output_path: Option<PathBuf>,
    pub shading: Option<ShadingPolicy>,
    pub keep_going: Option<bool>,
}

/// Fully resolved settings for a `build` run
#[derive(Debug, Clone, PartialEq)]
pub struct BakeConfig {
    pub search_path: PathBuf,
    pub source_output_path: PathBuf,
    pub header_output_path: PathBuf,
    pub shading: ShadingPolicy,
    pub keep_going: bool,
}

impl Settings {
    pub fn parse(text: &str) -> Result<Self> {
        toml::from_str(text).context("Failed to parse config")
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;
        Self::parse(&text).with_context(|| format!("Invalid config: {}", path.display()))
    }

    /// Load `explicit` if given, else `obj-bake.toml` from the working
    /// directory if present, else empty settings.
    pub fn discover(explicit: Option<&Path>) -> Result<Self> {
        match explicit {
            Some(path) => Self::load(path),
            None => {
                let default = Path::new(DEFAULT_CONFIG_FILE);
                if default.is_file() {
                    tracing::debug!("Using config {}", default.display());
                    Self::load(default)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    /// Layer `overrides` on top of `self`
    pub fn merge(self, overrides: Settings) -> Settings {
        Settings {
            search_path: overrides.search_path.or(self.search_path),
            source_output_path: overrides.source_output_path.or(self.source_output_path),
            header_output_path: overrides.header_output_path.or(self.header_output_path),
            shading: overrides.shading.or(self.shading),
            keep_going: overrides.keep_going.or(self.keep_going),
        }
    }

    pub fn shading(&self) -> ShadingPolicy {
        self.shading.unwrap_or_default()
    }

    pub fn keep_going(&self) -> bool {
        self.keep_going.unwrap_or(false)
    }

    pub fn require_search_path(&self) -> Result<&Path> {
        self.search_path
            .as_deref()
            .context("No search path given (use --search-path or search_path in config)")
    }

    pub fn into_bake_config(self) -> Result<BakeConfig> {
        let search_path = self.require_search_path()?.to_path_buf();
        let shading = self.shading();
        let keep_going = self.keep_going();

        Ok(BakeConfig {
            search_path,
            source_output_path: self.source_output_path.context(
                "No source output path given (use --cpp-output-path or source_output_path in config)",
            )?,
            header_output_path: self.header_output_path.context(
                "No header output path given (use --header-output-path or header_output_path in config)",
            )?,
            shading,
            keep_going,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_parse_full_config() {
        let settings = Settings::parse(
            r#"
search_path = "models"
source_output_path = "src/gen"
header_output_path = "include/gen"
shading = "simple"
keep_going = true
"#,
        )
        .unwrap();

        let config = settings.into_bake_config().unwrap();
        assert_eq!(config.search_path, PathBuf::from("models"));
        assert_eq!(config.source_output_path, PathBuf::from("src/gen"));
        assert_eq!(config.header_output_path, PathBuf::from("include/gen"));
        assert_eq!(config.shading, ShadingPolicy::Simple);
        assert!(config.keep_going);
    }

    #[test]
    fn test_defaults() {
        let settings = Settings::parse("").unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.shading(), ShadingPolicy::Averaged);
        assert!(!settings.keep_going());
    }

    #[test]
    fn test_rejects_unknown_keys_and_policies() {
        assert!(Settings::parse("search = \"x\"").is_err());
        assert!(Settings::parse("shading = \"smooth\"").is_err());
    }

    #[test]
    fn test_flags_override_file() {
        let file = Settings {
            search_path: Some("a".into()),
            source_output_path: Some("b".into()),
            shading: Some(ShadingPolicy::Simple),
            ..Default::default()
        };
        let flags = Settings {
            search_path: Some("x".into()),
            header_output_path: Some("y".into()),
            ..Default::default()
        };

        let config = file.merge(flags).into_bake_config().unwrap();
        assert_eq!(config.search_path, PathBuf::from("x"));
        assert_eq!(config.source_output_path, PathBuf::from("b"));
        assert_eq!(config.header_output_path, PathBuf::from("y"));
        assert_eq!(config.shading, ShadingPolicy::Simple);
    }

    #[test]
    fn test_missing_paths() {
        let err = Settings::default().into_bake_config().unwrap_err();
        assert!(err.to_string().contains("--search-path"));

        let err = Settings {
            search_path: Some("a".into()),
            header_output_path: Some("c".into()),
            ..Default::default()
        }
        .into_bake_config()
        .unwrap_err();
        assert!(err.to_string().contains("--cpp-output-path"));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bake.toml");
        std::fs::write(&path, "search_path = \"meshes\"\n").unwrap();

        let settings = Settings::discover(Some(&path)).unwrap();
        assert_eq!(settings.search_path, Some(PathBuf::from("meshes")));

        assert!(Settings::discover(Some(&dir.path().join("missing.toml"))).is_err());
    }
}
