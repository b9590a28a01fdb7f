//! The configuration value tree.
//!
//! YAML documents are converted into [`Value`], a small tagged tree with
//! explicit path lookup and truthiness. Templates resolve against it and the
//! schema validator walks it.

use std::{collections::BTreeMap, fmt};

use serde::{Deserialize, Deserializer, Serialize, Serializer, ser::SerializeMap};

/// Keyed children of a [`Value::Mapping`].
pub type Mapping = BTreeMap<String, Value>;

/// A node in the configuration tree.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Value {
    /// Explicit `null` (or `~`) in a document.
    #[default]
    Null,
    /// Boolean scalar.
    Bool(bool),
    /// Integral number.
    Integer(i64),
    /// Non-integral number.
    Float(f64),
    /// String scalar.
    String(String),
    /// Ordered sequence.
    Sequence(Vec<Value>),
    /// Nested mapping from string keys.
    Mapping(Mapping),
}

impl Value {
    /// An empty mapping.
    #[must_use]
    pub fn mapping() -> Self {
        Self::Mapping(Mapping::new())
    }

    /// Resolve a dot-separated path such as `branding.library.name`.
    ///
    /// Every intermediate segment must be a mapping; anything else fails the
    /// lookup.
    #[must_use]
    pub fn lookup(&self, path: &str) -> Option<&Value> {
        path.split('.')
            .try_fold(self, |current, key| current.as_mapping()?.get(key))
    }

    /// Look up a direct child key of a mapping.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.as_mapping()?.get(key)
    }

    /// Lookup that yields a string slice only for string values.
    #[must_use]
    pub fn lookup_str(&self, path: &str) -> Option<&str> {
        self.lookup(path).and_then(Value::as_str)
    }

    /// Template truthiness.
    #[must_use]
    pub fn is_truthy(&self) -> bool {
        match self {
            Self::Null => false,
            Self::Bool(b) => *b,
            Self::Integer(n) => *n != 0,
            Self::Float(f) => *f != 0.0 && !f.is_nan(),
            Self::String(s) => !s.is_empty(),
            Self::Sequence(items) => !items.is_empty(),
            Self::Mapping(map) => !map.is_empty(),
        }
    }

    /// Whether this is [`Value::Null`].
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Integer(n) => Some(*n as f64),
            Self::Float(f) => Some(*f),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_sequence(&self) -> Option<&[Value]> {
        match self {
            Self::Sequence(items) => Some(items),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_mapping(&self) -> Option<&Mapping> {
        match self {
            Self::Mapping(map) => Some(map),
            _ => None,
        }
    }

    /// Human-readable name of the variant, used in validation messages.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "boolean",
            Self::Integer(_) | Self::Float(_) => "number",
            Self::String(_) => "string",
            Self::Sequence(_) => "sequence",
            Self::Mapping(_) => "mapping",
        }
    }

    /// Set the value at a dot-separated path, creating intermediate mappings.
    ///
    /// Non-mapping intermediates are replaced. Only used while a tree is being
    /// constructed.
    pub fn set_path(&mut self, path: &str, value: impl Into<Value>) {
        let mut current = self;
        let mut segments = path.split('.').peekable();

        while let Some(key) = segments.next() {
            if !matches!(current, Self::Mapping(_)) {
                *current = Self::mapping();
            }
            let Self::Mapping(map) = current else {
                unreachable!("current was just made a mapping");
            };

            if segments.peek().is_none() {
                map.insert(key.to_string(), value.into());
                return;
            }
            current = map.entry(key.to_string()).or_insert_with(Self::mapping);
        }
    }

    /// Deep-merge `overlay` on top of `self`.
    ///
    /// Mappings merge key by key; any other overlay value replaces the base.
    #[must_use]
    pub fn merged_with(&self, overlay: &Value) -> Value {
        match (self, overlay) {
            (Self::Mapping(base), Self::Mapping(top)) => {
                let mut merged = base.clone();
                for (key, value) in top {
                    let next = match merged.get(key) {
                        Some(existing) => existing.merged_with(value),
                        None => value.clone(),
                    };
                    merged.insert(key.clone(), next);
                }
                Self::Mapping(merged)
            }
            (_, top) => top.clone(),
        }
    }
}

/// The string form used when a value is substituted into text.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("null"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Integer(n) => write!(f, "{n}"),
            Self::Float(x) => write!(f, "{x}"),
            Self::String(s) => f.write_str(s),
            Self::Sequence(items) => {
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    write!(f, "{item}")?;
                }
                Ok(())
            }
            Self::Mapping(_) => {
                let json = serde_json::to_string(self).map_err(|_| fmt::Error)?;
                f.write_str(&json)
            }
        }
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Null => serializer.serialize_unit(),
            Self::Bool(b) => serializer.serialize_bool(*b),
            Self::Integer(n) => serializer.serialize_i64(*n),
            Self::Float(x) => serializer.serialize_f64(*x),
            Self::String(s) => serializer.serialize_str(s),
            Self::Sequence(items) => items.serialize(serializer),
            Self::Mapping(map) => {
                let mut state = serializer.serialize_map(Some(map.len()))?;
                for (key, value) in map {
                    state.serialize_entry(key, value)?;
                }
                state.end()
            }
        }
    }
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        serde_yaml::Value::deserialize(deserializer).map(Value::from)
    }
}

impl From<serde_yaml::Value> for Value {
    fn from(value: serde_yaml::Value) -> Self {
        use serde_yaml::Value as Yaml;

        match value {
            Yaml::Null => Self::Null,
            Yaml::Bool(b) => Self::Bool(b),
            Yaml::Number(n) => match n.as_i64() {
                Some(i) => Self::Integer(i),
                None => Self::Float(n.as_f64().unwrap_or(f64::NAN)),
            },
            Yaml::String(s) => Self::String(s),
            Yaml::Sequence(items) => Self::Sequence(items.into_iter().map(Value::from).collect()),
            Yaml::Mapping(map) => Self::Mapping(
                map.into_iter()
                    .filter_map(|(key, value)| {
                        let key = match key {
                            Yaml::String(s) => s,
                            Yaml::Number(n) => n.to_string(),
                            Yaml::Bool(b) => b.to_string(),
                            _ => return None,
                        };
                        Some((key, Value::from(value)))
                    })
                    .collect(),
            ),
            Yaml::Tagged(tagged) => Value::from(tagged.value),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Self::Integer(n)
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Self::Float(x)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Self::Sequence(items)
    }
}

impl From<Mapping> for Value {
    fn from(map: Mapping) -> Self {
        Self::Mapping(map)
    }
}
