//! The set of base classes a project actually defines.
//!
//! Producing this set normally means running the real Tailwind compiler over
//! the project's config and content globs, which is outside this crate. The
//! [`ClassUniverseProvider`] trait is the seam for that; [`JsonClassUniverse`]
//! reads a class list that such a run exported.

use crate::errors::{ClassKitError, Result};
use indexmap::IndexSet;
use serde_json::Value;
use std::path::{Path, PathBuf};

const SIMILARITY_THRESHOLD: f64 = 0.8;
const MAX_SUGGESTIONS: usize = 3;

/// Known base utility classes
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassUniverse {
    classes: IndexSet<String>,
}

impl ClassUniverse {
    pub fn new<I, S>(classes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            classes: classes.into_iter().map(Into::into).collect(),
        }
    }

    pub fn contains(&self, base: &str) -> bool {
        self.classes.contains(base)
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.classes.iter().map(String::as_str)
    }

    /// Up to three known classes closest to `base` by Jaro-Winkler similarity
    pub fn nearest(&self, base: &str) -> Vec<String> {
        let mut scored: Vec<(f64, &String)> = self
            .classes
            .iter()
            .map(|candidate| (strsim::jaro_winkler(base, candidate), candidate))
            .filter(|(score, _)| *score >= SIMILARITY_THRESHOLD)
            .collect();

        scored.sort_by(|a, b| b.0.total_cmp(&a.0));
        scored
            .into_iter()
            .take(MAX_SUGGESTIONS)
            .map(|(_, c)| c.clone())
            .collect()
    }

    /// Parse a JSON array of class names, or a `{ "classes": [...] }` document.
    ///
    /// Non-string entries are skipped with a warning.
    pub fn from_json_str(content: &str) -> Result<Self> {
        let document: Value = serde_json::from_str(content)?;
        let entries = match &document {
            Value::Array(entries) => entries,
            Value::Object(map) => match map.get("classes") {
                Some(Value::Array(entries)) => entries,
                _ => {
                    return Err(ClassKitError::InvalidInput(
                        "expected a \"classes\" array in the class universe document".to_string(),
                    ))
                }
            },
            _ => {
                return Err(ClassKitError::InvalidInput(
                    "class universe must be a JSON array or object".to_string(),
                ))
            }
        };

        let mut skipped = 0;
        let classes: IndexSet<String> = entries
            .iter()
            .filter_map(|entry| match entry {
                Value::String(class) if !class.trim().is_empty() => Some(class.trim().to_string()),
                _ => {
                    skipped += 1;
                    None
                }
            })
            .collect();

        if skipped > 0 {
            log::warn!("skipped {} non-string or blank class universe entries", skipped);
        }
        Ok(Self { classes })
    }
}

impl FromIterator<String> for ClassUniverse {
    fn from_iter<T: IntoIterator<Item = String>>(iter: T) -> Self {
        Self {
            classes: iter.into_iter().collect(),
        }
    }
}

/// Source of the class universe for a project
pub trait ClassUniverseProvider {
    fn load(&self, project_root: &Path) -> Result<ClassUniverse>;
}

/// Reads an exported class list from a JSON file.
///
/// A relative path is resolved against the project root.
#[derive(Debug, Clone)]
pub struct JsonClassUniverse {
    path: PathBuf,
}

impl JsonClassUniverse {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn resolve(&self, project_root: &Path) -> PathBuf {
        if self.path.is_absolute() {
            self.path.clone()
        } else {
            project_root.join(&self.path)
        }
    }
}

impl ClassUniverseProvider for JsonClassUniverse {
    fn load(&self, project_root: &Path) -> Result<ClassUniverse> {
        let path = self.resolve(project_root);
        let universe_error = |message: String| ClassKitError::UniverseError {
            path: path.display().to_string(),
            message,
        };

        let content = std::fs::read_to_string(&path).map_err(|e| universe_error(e.to_string()))?;
        let universe = ClassUniverse::from_json_str(&content).map_err(|e| universe_error(e.to_string()))?;

        log::debug!("loaded {} classes from {}", universe.len(), path.display());
        Ok(universe)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::{NamedTempFile, TempDir};

    #[test]
    fn test_contains_and_nearest() {
        let universe = ClassUniverse::new(["flex", "flex-col", "flex-row", "grid", "p-4"]);
        assert!(universe.contains("flex-col"));
        assert!(!universe.contains("flex-cl"));

        let nearest = universe.nearest("flex-cl");
        assert_eq!(nearest.first().map(String::as_str), Some("flex-col"));
        assert!(nearest.len() <= 3);
        assert!(universe.nearest("zzzzzz").is_empty());
    }

    #[test]
    fn test_from_json_array() {
        let universe = ClassUniverse::from_json_str(r#"["flex", "p-4", 3, "", "flex"]"#).unwrap();
        assert_eq!(universe.len(), 2);
        assert_eq!(universe.iter().collect::<Vec<_>>(), vec!["flex", "p-4"]);
    }

    #[test]
    fn test_from_json_object() {
        let universe = ClassUniverse::from_json_str(r#"{"classes": ["block"]}"#).unwrap();
        assert!(universe.contains("block"));
    }

    #[test]
    fn test_rejects_other_shapes() {
        assert!(matches!(
            ClassUniverse::from_json_str(r#"{"names": []}"#),
            Err(ClassKitError::InvalidInput(_))
        ));
        assert!(matches!(ClassUniverse::from_json_str("42"), Err(ClassKitError::InvalidInput(_))));
        assert!(matches!(ClassUniverse::from_json_str("not json"), Err(ClassKitError::Json(_))));
    }

    #[test]
    fn test_provider_resolves_relative_path() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("classes.json"), r#"["flex", "grid"]"#).unwrap();

        let provider = JsonClassUniverse::new("classes.json");
        let universe = provider.load(dir.path()).unwrap();
        assert_eq!(universe.len(), 2);
    }

    #[test]
    fn test_provider_absolute_path() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{"classes": ["p-4"]}}"#).unwrap();

        let provider = JsonClassUniverse::new(file.path());
        let universe = provider.load(Path::new("/nonexistent-root")).unwrap();
        assert!(universe.contains("p-4"));
    }

    #[test]
    fn test_provider_missing_file() {
        let dir = TempDir::new().unwrap();
        let result = JsonClassUniverse::new("missing.json").load(dir.path());
        match result {
            Err(ClassKitError::UniverseError { path, .. }) => assert!(path.ends_with("missing.json")),
            other => panic!("expected UniverseError, got {:?}", other),
        }
    }
}
