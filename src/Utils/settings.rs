//! Engine settings: the supported parameter table, sampling resolution, default view and logging.
//!
//! Settings come from defaults, a task document (see [`crate::Utils::task_parser`]) or a TOML
//! file with the same three sections:
//! ```toml
//! [parameters]
//! a = 2.5
//! [sampling]
//! num_points = 600
//! default_bound = 10.0
//! [logging]
//! log_level = "info"
//! log_file = "mde.log"
//! ```
use crate::Utils::task_parser::{DocumentMap, Value, first_value, parse_document_as};
use log::info;
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, PartialEq)]
pub enum SettingsError {
    Io(String),
    Parse(String),
    /// section, key and the offending value
    BadValue(String, String, String),
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingsError::Io(e) => write!(f, "cannot read settings: {}", e),
            SettingsError::Parse(e) => write!(f, "malformed settings: {}", e),
            SettingsError::BadValue(section, key, v) => {
                write!(f, "bad value {} for {}.{}", v, section, key)
            }
        }
    }
}

impl std::error::Error for SettingsError {}

const DEFAULT_PARAMETERS: [(&str, f64); 10] = [
    ("a", 1.0),
    ("b", 1.0),
    ("c", 1.0),
    ("d", 1.0),
    ("e", std::f64::consts::E),
    ("f", 1.0),
    ("g", 1.0),
    ("h", 0.0),
    ("k", 0.0),
    ("m", 1.0),
];

#[derive(Debug, Clone, PartialEq)]
pub struct MdeSettings {
    /// lower-case parameter names and their values
    pub parameters: BTreeMap<String, f64>,
    pub num_points: usize,
    pub default_bound: f64,
    /// "off", "error", "warn", "info", "debug" or "trace"
    pub log_level: String,
    pub log_file: Option<String>,
}

impl Default for MdeSettings {
    fn default() -> Self {
        MdeSettings {
            parameters: DEFAULT_PARAMETERS
                .iter()
                .map(|(k, v)| (k.to_string(), *v))
                .collect(),
            num_points: crate::analysis::NUM_POINTS,
            default_bound: crate::analysis::DEFAULT_BOUND_VALUE,
            log_level: "info".to_string(),
            log_file: None,
        }
    }
}

impl MdeSettings {
    /// Settings from a task document. Parameters not named keep their defaults; new names are added.
    pub fn from_task_document(text: &str) -> Result<Self, SettingsError> {
        let doc = parse_document_as(text, None).map_err(SettingsError::Parse)?;
        let mut s = MdeSettings::default();
        s.apply_document(&doc)?;
        Ok(s)
    }

    fn apply_document(&mut self, doc: &DocumentMap) -> Result<(), SettingsError> {
        let bad = |section: &str, key: &str, v: &Value| {
            SettingsError::BadValue(section.to_string(), key.to_string(), v.to_string())
        };
        if let Some(parameters) = doc.get("parameters") {
            for (name, values) in parameters {
                let Some(v) = values.as_ref().and_then(|v| v.first()) else {
                    continue;
                };
                let value = v.as_float().ok_or_else(|| bad("parameters", name, v))?;
                self.parameters.insert(name.to_lowercase(), value);
            }
        }
        if let Some(v) = first_value(doc, "sampling", "num_points") {
            self.num_points = v
                .as_integer()
                .filter(|n| *n >= 2)
                .ok_or_else(|| bad("sampling", "num_points", v))? as usize;
        }
        if let Some(v) = first_value(doc, "sampling", "default_bound") {
            self.default_bound = v
                .as_float()
                .filter(|b| *b > 0.0)
                .ok_or_else(|| bad("sampling", "default_bound", v))?;
        }
        if let Some(v) = first_value(doc, "logging", "log_level") {
            self.log_level = v.to_string().to_lowercase();
        }
        if let Some(v) = first_value(doc, "logging", "log_file") {
            self.log_file = Some(v.to_string());
        }
        Ok(())
    }

    /// Settings from TOML text with the same sections as a task document.
    pub fn from_toml_str(text: &str) -> Result<Self, SettingsError> {
        let table: toml::Table = text
            .parse()
            .map_err(|e: toml::de::Error| SettingsError::Parse(e.to_string()))?;
        let mut doc: DocumentMap = HashMap::new();
        for (title, section) in &table {
            let Some(section) = section.as_table() else {
                return Err(SettingsError::Parse(format!("{} is not a table", title)));
            };
            let entries = doc.entry(title.clone()).or_default();
            for (key, v) in section {
                let value = match v {
                    toml::Value::Integer(i) => Value::Integer(*i),
                    toml::Value::Float(f) => Value::Float(*f),
                    toml::Value::Boolean(b) => Value::Boolean(*b),
                    toml::Value::String(s) => Value::String(s.clone()),
                    other => {
                        return Err(SettingsError::BadValue(
                            title.clone(),
                            key.clone(),
                            other.to_string(),
                        ));
                    }
                };
                entries.insert(key.clone(), Some(vec![value]));
            }
        }
        let mut s = MdeSettings::default();
        s.apply_document(&doc)?;
        Ok(s)
    }

    /// Reads `path`: TOML when the extension is `toml`, a task document otherwise.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|e| SettingsError::Io(e.to_string()))?;
        info!("reading settings from {}", path.display());
        match path.extension().and_then(|e| e.to_str()) {
            Some("toml") => MdeSettings::from_toml_str(&text),
            _ => MdeSettings::from_task_document(&text),
        }
    }
}
