use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use crate::errors::{ClassKitError, Result};

/// Top-level configuration for the class model
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassKitConfig {
    /// Theme values that take precedence over the built-in tables
    pub theme: ThemeConfig,

    /// Variant names contributed by plugins or custom setups
    pub variants: VariantConfig,

    /// Arbitrary-value settings
    pub arbitrary: ArbitraryConfig,

    /// Bounded cache settings
    pub cache: CacheConfig,
}

/// Theme configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeConfig {
    /// Theme extensions
    pub extend: ThemeExtend,
}

/// Theme extensions
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeExtend {
    /// Custom colors, e.g. `brand: "#0066cc"` or `brand-500: "#0066cc"`
    pub colors: HashMap<String, String>,

    /// Custom spacing values, e.g. `18: "4.5rem"`
    pub spacing: HashMap<String, String>,
}

/// Extra variant names
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VariantConfig {
    /// Accepted as `Other` variants
    pub extra: Vec<String>,

    /// Accepted as `State` variants (subject to the responsive-order rule)
    pub extra_state: Vec<String>,
}

/// Arbitrary-value configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArbitraryConfig {
    /// Prefixes accepted in addition to the built-in whitelist
    pub extra_prefixes: Vec<String>,
}

/// Cache sizing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Entries per map before eviction kicks in
    pub capacity: usize,

    /// Oldest entries dropped on overflow
    pub evict_count: usize,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            capacity: 10_000,
            evict_count: 1_000,
        }
    }
}

impl ClassKitConfig {
    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ClassKitError::ConfigError {
                message: format!("Failed to read config file {}: {}", path.display(), e),
            })?;

        Ok(serde_yaml::from_str(&content)?)
    }

    /// Load configuration from a JSON file
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ClassKitError::ConfigError {
                message: format!("Failed to read config file {}: {}", path.display(), e),
            })?;

        Ok(serde_json::from_str(&content)?)
    }

    /// Load configuration from a file (auto-detect format)
    pub fn from_file(path: &Path) -> Result<Self> {
        let config = match path.extension().and_then(|s| s.to_str()) {
            Some("yaml") | Some("yml") => Self::from_yaml_file(path)?,
            Some("json") => Self::from_json_file(path)?,
            _ => {
                return Err(ClassKitError::ConfigError {
                    message: format!(
                        "Unsupported config file format: {}. Use .yaml, .yml, or .json",
                        path.display()
                    ),
                })
            }
        };
        config.validate()?;
        log::debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Reject settings that would make the cache unusable
    pub fn validate(&self) -> Result<()> {
        if self.cache.capacity == 0 {
            return Err(ClassKitError::ConfigError {
                message: "cache.capacity must be at least 1".to_string(),
            });
        }
        if self.cache.evict_count == 0 {
            return Err(ClassKitError::ConfigError {
                message: "cache.evict_count must be at least 1".to_string(),
            });
        }
        Ok(())
    }

    /// Merge with another configuration; `other` wins on key collisions
    pub fn merge(mut self, other: Self) -> Self {
        self.theme.extend.colors.extend(other.theme.extend.colors);
        self.theme.extend.spacing.extend(other.theme.extend.spacing);

        for name in other.variants.extra {
            if !self.variants.extra.contains(&name) {
                self.variants.extra.push(name);
            }
        }
        for name in other.variants.extra_state {
            if !self.variants.extra_state.contains(&name) {
                self.variants.extra_state.push(name);
            }
        }
        for prefix in other.arbitrary.extra_prefixes {
            if !self.arbitrary.extra_prefixes.contains(&prefix) {
                self.arbitrary.extra_prefixes.push(prefix);
            }
        }

        if other.cache != CacheConfig::default() {
            self.cache = other.cache;
        }

        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = ClassKitConfig::default();
        assert!(config.theme.extend.colors.is_empty());
        assert_eq!(config.cache.capacity, 10_000);
        assert_eq!(config.cache.evict_count, 1_000);
    }

    #[test]
    fn test_yaml_config_loading() {
        let yaml_content = r##"
theme:
  extend:
    colors:
      primary: "#1a73e8"
      secondary: "#ff6b6b"
    spacing:
      "18": "4.5rem"
variants:
  extra:
    - "hocus"
arbitrary:
  extra_prefixes:
    - "grid-cols"
cache:
  capacity: 500
  evict_count: 50
"##;

        let mut file = NamedTempFile::with_suffix(".yaml").unwrap();
        file.write_all(yaml_content.as_bytes()).unwrap();

        let config = ClassKitConfig::from_file(file.path()).unwrap();
        assert_eq!(config.theme.extend.colors.get("primary"), Some(&"#1a73e8".to_string()));
        assert_eq!(config.theme.extend.spacing.get("18"), Some(&"4.5rem".to_string()));
        assert_eq!(config.variants.extra, vec!["hocus".to_string()]);
        assert_eq!(config.arbitrary.extra_prefixes, vec!["grid-cols".to_string()]);
        assert_eq!(config.cache.capacity, 500);
    }

    #[test]
    fn test_json_config_loading() {
        let json_content = r##"{
  "theme": {
    "extend": {
      "colors": {
        "brand": "#0066cc"
      }
    }
  }
}"##;

        let mut file = NamedTempFile::with_suffix(".json").unwrap();
        file.write_all(json_content.as_bytes()).unwrap();

        let config = ClassKitConfig::from_file(file.path()).unwrap();
        assert_eq!(config.theme.extend.colors.get("brand"), Some(&"#0066cc".to_string()));
        assert_eq!(config.cache, CacheConfig::default());
    }

    #[test]
    fn test_unsupported_extension() {
        let file = NamedTempFile::with_suffix(".toml").unwrap();
        let err = ClassKitConfig::from_file(file.path()).unwrap_err();
        assert!(err.to_string().contains("Unsupported config file format"));
    }

    #[test]
    fn test_malformed_files_keep_parser_errors() {
        let mut yaml = NamedTempFile::with_suffix(".yaml").unwrap();
        yaml.write_all(b"cache: [unclosed").unwrap();
        assert!(matches!(ClassKitConfig::from_file(yaml.path()), Err(ClassKitError::Yaml(_))));

        let mut json = NamedTempFile::with_suffix(".json").unwrap();
        json.write_all(b"{\"cache\": ").unwrap();
        assert!(matches!(ClassKitConfig::from_file(json.path()), Err(ClassKitError::Json(_))));
    }

    #[test]
    fn test_zero_capacity_rejected() {
        let mut file = NamedTempFile::with_suffix(".json").unwrap();
        file.write_all(br#"{"cache": {"capacity": 0}}"#).unwrap();

        assert!(ClassKitConfig::from_file(file.path()).is_err());
    }

    #[test]
    fn test_config_merge() {
        let mut base = ClassKitConfig::default();
        base.theme.extend.colors.insert("primary".to_string(), "#111".to_string());
        base.variants.extra.push("hocus".to_string());

        let mut other = ClassKitConfig::default();
        other.theme.extend.colors.insert("primary".to_string(), "#222".to_string());
        other.theme.extend.colors.insert("secondary".to_string(), "#333".to_string());
        other.variants.extra.push("hocus".to_string());
        other.variants.extra.push("scrolled".to_string());

        let merged = base.merge(other);
        assert_eq!(merged.theme.extend.colors.get("primary"), Some(&"#222".to_string()));
        assert_eq!(merged.theme.extend.colors.get("secondary"), Some(&"#333".to_string()));
        assert_eq!(merged.variants.extra, vec!["hocus".to_string(), "scrolled".to_string()]);
    }
}
