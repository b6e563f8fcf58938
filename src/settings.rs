use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};

use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::{Result, TidyError};

pub const REPLACEMENT_MAP_FILE: &str = "replacement_map.json";
pub const CATEGORIES_FILE: &str = "categories.json";
pub const PAYMENT_METHODS_FILE: &str = "payment_methods.json";
pub const REQUIRED_VALUES_FILE: &str = "required_values.json";

/// Resolve where the JSON configuration lives: an explicit directory, else
/// `./config`, else `~/.config/expense-tidy`.
pub fn config_dir(explicit: Option<&Path>) -> PathBuf {
    if let Some(dir) = explicit {
        return dir.to_path_buf();
    }
    let local = PathBuf::from("config");
    if local.is_dir() {
        return local;
    }
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config")
        .join("expense-tidy")
}

fn read_json<T: for<'de> Deserialize<'de>>(path: &Path) -> Result<T> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        TidyError::Config(format!("Cannot read {}: {e}", path.display()))
    })?;
    serde_json::from_str(&content).map_err(|source| TidyError::Json {
        path: path.to_path_buf(),
        source,
    })
}

// ---------------------------------------------------------------------------
// Label sets
// ---------------------------------------------------------------------------

/// The two accepted shapes of a label file.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum LabelSource {
    List(Vec<String>),
    Keyed(serde_json::Map<String, Value>),
}

/// Ordered labels from a JSON array, or the key names of a JSON object.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LabelSet {
    labels: Vec<String>,
}

impl From<LabelSource> for LabelSet {
    fn from(source: LabelSource) -> Self {
        let labels = match source {
            LabelSource::List(items) => items,
            LabelSource::Keyed(map) => map.keys().cloned().collect(),
        };
        Self { labels }
    }
}

impl<S: Into<String>> FromIterator<S> for LabelSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            labels: iter.into_iter().map(Into::into).collect(),
        }
    }
}

impl LabelSet {
    pub fn load(path: &Path) -> Result<Self> {
        let raw: Value = read_json(path)?;
        if let Some(bad) = raw.as_array().and_then(|items| items.iter().find(|v| !v.is_string())) {
            return Err(TidyError::Config(format!(
                "{}: array items must be strings, found {bad}.",
                path.display()
            )));
        }
        let source: LabelSource = serde_json::from_value(raw).map_err(|_| {
            TidyError::Config(format!("{} needs to be an array or object.", path.display()))
        })?;
        Ok(source.into())
    }

    pub fn contains(&self, value: &str) -> bool {
        self.labels.iter().any(|l| l == value)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.labels.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Replacement map
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReplacementMap {
    map: HashMap<String, String>,
}

impl ReplacementMap {
    /// Load the map; a missing file yields an empty map.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            warn!(path = %path.display(), "no replacement map, values left unchanged");
            return Ok(Self::default());
        }
        let raw: BTreeMap<String, Value> = read_json(path)?;
        let mut map = HashMap::with_capacity(raw.len());
        for (key, value) in raw {
            let text = match value {
                Value::String(s) => s,
                Value::Number(n) => n.to_string(),
                Value::Bool(b) => b.to_string(),
                Value::Null => String::new(),
                _ => {
                    return Err(TidyError::Config(format!(
                        "{}: replacement for '{key}' must be a string, number or bool.",
                        path.display()
                    )))
                }
            };
            map.insert(key, text);
        }
        debug!(entries = map.len(), "loaded replacement map");
        Ok(Self { map })
    }

    pub fn get(&self, value: &str) -> Option<&str> {
        self.map.get(value).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for ReplacementMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            map: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }
}

// ---------------------------------------------------------------------------
// Validation rules
// ---------------------------------------------------------------------------

/// Read-only rules shared by every file in one validation run.
#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    pub required_columns: LabelSet,
    pub categories: LabelSet,
    pub payment_methods: LabelSet,
}

impl RuleSet {
    pub fn load(dir: &Path) -> Result<Self> {
        let rules = Self {
            required_columns: LabelSet::load(&dir.join(REQUIRED_VALUES_FILE))?,
            categories: LabelSet::load(&dir.join(CATEGORIES_FILE))?,
            payment_methods: LabelSet::load(&dir.join(PAYMENT_METHODS_FILE))?,
        };
        debug!(
            required = rules.required_columns.len(),
            categories = rules.categories.len(),
            methods = rules.payment_methods.len(),
            "loaded validation rules"
        );
        Ok(rules)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write(dir: &Path, name: &str, content: &str) -> PathBuf {
        let path = dir.join(name);
        std::fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_label_set_from_array() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(dir.path(), "categories.json", r#"["Meals", "Travel"]"#);
        let set = LabelSet::load(&path).unwrap();
        assert_eq!(set.iter().collect::<Vec<_>>(), vec!["Meals", "Travel"]);
        assert!(set.contains("Meals"));
        assert!(!set.contains("meals"));
    }

    #[test]
    fn test_label_set_from_object_keys() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(
            dir.path(),
            "payment_methods.json",
            r#"{"Amex": "Corporate card", "Cash": {"reimburse": true}}"#,
        );
        let set = LabelSet::load(&path).unwrap();
        assert_eq!(set.len(), 2);
        assert!(set.contains("Amex"));
        assert!(set.contains("Cash"));
    }

    #[test]
    fn test_label_set_rejects_other_shapes() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(dir.path(), "categories.json", r#""Meals""#);
        let err = LabelSet::load(&path).unwrap_err();
        assert!(err.to_string().contains("needs to be an array or object"));
    }

    #[test]
    fn test_label_set_rejects_non_string_items() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(dir.path(), "categories.json", r#"["Meals", 42]"#);
        let err = LabelSet::load(&path).unwrap_err().to_string();
        assert!(err.contains("array items must be strings, found 42."));
        assert!(!err.contains("needs to be an array or object"));
    }

    #[test]
    fn test_label_set_missing_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(LabelSet::load(&dir.path().join("nope.json")).is_err());
    }

    #[test]
    fn test_replacement_map_scalars() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(
            dir.path(),
            REPLACEMENT_MAP_FILE,
            r#"{"AMEX": "Amex", "n/a": null, "one": 1}"#,
        );
        let map = ReplacementMap::load(&path).unwrap();
        assert_eq!(map.get("AMEX"), Some("Amex"));
        assert_eq!(map.get("n/a"), Some(""));
        assert_eq!(map.get("one"), Some("1"));
        assert_eq!(map.get("Amex"), None);
    }

    #[test]
    fn test_replacement_map_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let map = ReplacementMap::load(&dir.path().join(REPLACEMENT_MAP_FILE)).unwrap();
        assert!(map.is_empty());
    }

    #[test]
    fn test_replacement_map_rejects_nested_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(dir.path(), REPLACEMENT_MAP_FILE, r#"{"a": ["b"]}"#);
        assert!(ReplacementMap::load(&path).is_err());
    }

    #[test]
    fn test_rule_set_load() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), REQUIRED_VALUES_FILE, r#"["Date", "Amount"]"#);
        write(dir.path(), CATEGORIES_FILE, r#"{"Meals": 1}"#);
        write(dir.path(), PAYMENT_METHODS_FILE, r#"["Amex"]"#);
        let rules = RuleSet::load(dir.path()).unwrap();
        assert_eq!(rules.required_columns.len(), 2);
        assert!(rules.categories.contains("Meals"));
        assert!(rules.payment_methods.contains("Amex"));
    }

    #[test]
    fn test_config_dir_explicit() {
        let dir = config_dir(Some(Path::new("/tmp/cfg")));
        assert_eq!(dir, PathBuf::from("/tmp/cfg"));
    }
}
