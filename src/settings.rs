//! Typed key/value settings store with a plain-text `key = value` file format.
//!
//! Lines starting with `#` are comments. A malformed line is skipped with a
//! warning and the affected key falls back to its compiled-in default; the
//! rest of the file still loads. Values are typed at parse time: `true`/`false`
//! become booleans, numerals with a decimal point become floats, bare numerals
//! become integers, everything else stays a string. `save` writes keys in
//! sorted order, last write wins.

use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::error::ShellError;

/// Well-known setting keys.
pub mod keys {
    pub const WINDOW_WIDTH: &str = "app.window.width";
    pub const WINDOW_HEIGHT: &str = "app.window.height";
    pub const WINDOW_POS_X: &str = "app.window.pos_x";
    pub const WINDOW_POS_Y: &str = "app.window.pos_y";
    pub const WINDOW_MAXIMIZED: &str = "app.window.maximized";
    pub const WINDOW_TITLE: &str = "app.window.title";
    pub const THEME: &str = "ui.theme";
    pub const FRAME_RATE_LOCKED: &str = "app.frame_rate_locked";
    pub const TARGET_FPS: &str = "app.target_fps";
}

#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Bool(v) => write!(f, "{v}"),
            Value::Int(v) => write!(f, "{v}"),
            Value::Float(v) => write!(f, "{v}"),
            Value::Str(v) => write!(f, "{v}"),
        }
    }
}

fn parse_value(raw: &str) -> Value {
    match raw {
        "true" => return Value::Bool(true),
        "false" => return Value::Bool(false),
        _ => {}
    }
    if raw.contains('.') {
        if let Ok(v) = raw.parse::<f64>() {
            return Value::Float(v);
        }
    }
    if let Ok(v) = raw.parse::<i64>() {
        return Value::Int(v);
    }
    Value::Str(raw.to_string())
}

pub struct Settings {
    values: BTreeMap<String, Value>,
    path: Option<PathBuf>,
    dirty: bool,
}

impl Settings {
    pub fn new() -> Self {
        Self {
            values: BTreeMap::new(),
            path: None,
            dirty: false,
        }
    }

    /// Load from `path`. A missing file is not an error: the store starts
    /// empty and every getter yields its default.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ShellError> {
        let path = path.as_ref();
        let mut settings = Self::new();
        settings.path = Some(path.to_path_buf());
        if !path.exists() {
            debug!(path = %path.display(), "settings file absent, using defaults");
            return Ok(settings);
        }
        let text = fs::read_to_string(path)?;
        for (lineno, line) in text.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            match line.split_once('=') {
                Some((key, raw)) => {
                    let key = key.trim();
                    let raw = raw.trim();
                    if key.is_empty() {
                        warn!(line = lineno + 1, "skipping settings line with empty key");
                        continue;
                    }
                    settings.values.insert(key.to_string(), parse_value(raw));
                }
                None => {
                    warn!(line = lineno + 1, content = line, "skipping malformed settings line");
                }
            }
        }
        debug!(path = %path.display(), entries = settings.values.len(), "settings loaded");
        Ok(settings)
    }

    /// Write the store back to its file if anything changed.
    pub fn save(&mut self) -> Result<(), ShellError> {
        if !self.dirty {
            return Ok(());
        }
        let Some(path) = self.path.clone() else {
            return Ok(());
        };
        let mut out = String::from("# dock-shell settings\n");
        for (key, value) in &self.values {
            out.push_str(key);
            out.push_str(" = ");
            out.push_str(&value.to_string());
            out.push('\n');
        }
        fs::write(&path, out)?;
        self.dirty = false;
        debug!(path = %path.display(), "settings saved");
        Ok(())
    }

    pub fn get_bool(&self, key: &str, default: bool) -> bool {
        match self.values.get(key) {
            Some(Value::Bool(v)) => *v,
            _ => default,
        }
    }

    pub fn get_int(&self, key: &str, default: i64) -> i64 {
        match self.values.get(key) {
            Some(Value::Int(v)) => *v,
            Some(Value::Float(v)) => *v as i64,
            _ => default,
        }
    }

    pub fn get_float(&self, key: &str, default: f64) -> f64 {
        match self.values.get(key) {
            Some(Value::Float(v)) => *v,
            Some(Value::Int(v)) => *v as f64,
            _ => default,
        }
    }

    pub fn get_str<'a>(&'a self, key: &str, default: &'a str) -> &'a str {
        match self.values.get(key) {
            Some(Value::Str(v)) => v,
            _ => default,
        }
    }

    pub fn set_bool(&mut self, key: &str, value: bool) {
        self.set(key, Value::Bool(value));
    }

    pub fn set_int(&mut self, key: &str, value: i64) {
        self.set(key, Value::Int(value));
    }

    pub fn set_float(&mut self, key: &str, value: f64) {
        self.set(key, Value::Float(value));
    }

    pub fn set_str(&mut self, key: &str, value: &str) {
        self.set(key, Value::Str(value.to_string()));
    }

    fn set(&mut self, key: &str, value: Value) {
        if self.values.get(key) == Some(&value) {
            return;
        }
        self.values.insert(key.to_string(), value);
        self.dirty = true;
    }

    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self::new()
    }
}
