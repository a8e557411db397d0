//! Typed field access over untyped JSON objects
//!
//! [`Fields`] wraps one JSON object together with its path inside the
//! payload, so every error names the exact field that failed.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde_json::{Map, Value};

use crate::error::InputError;

/// A JSON object being read field by field
#[derive(Debug, Clone, Copy)]
pub struct Fields<'a> {
    map: &'a Map<String, Value>,
    path: &'a str,
}

/// Join a parent path and a key (`meeting` + `title` -> `meeting.title`)
pub fn join_path(parent: &str, key: &str) -> String {
    if parent.is_empty() {
        key.to_string()
    } else {
        format!("{}.{}", parent, key)
    }
}

impl<'a> Fields<'a> {
    /// View `value` as an object found at `path`
    pub fn of(value: &'a Value, path: &'a str) -> Result<Self, InputError> {
        match value {
            Value::Object(map) => Ok(Self { map, path }),
            _ => Err(InputError::InvalidType {
                field: display_path(path),
                expected: "object",
            }),
        }
    }

    /// Full path of a child field
    pub fn child(&self, key: &str) -> String {
        join_path(self.path, key)
    }

    /// Value of a field that may be absent; `null` counts as absent
    pub fn get(&self, key: &str) -> Option<&'a Value> {
        self.map.get(key).filter(|value| !value.is_null())
    }

    /// Value of a mandatory field
    pub fn required(&self, key: &str) -> Result<&'a Value, InputError> {
        self.get(key)
            .ok_or_else(|| InputError::MissingField(self.child(key)))
    }

    /// First present key among aliases, reporting the first alias if none is
    pub fn required_any(&self, keys: &[&str]) -> Result<(&'a Value, String), InputError> {
        keys.iter()
            .find_map(|key| self.get(key).map(|value| (value, self.child(key))))
            .ok_or_else(|| InputError::MissingField(self.child(keys.first().copied().unwrap_or(""))))
    }

    pub fn string(&self, key: &str) -> Result<String, InputError> {
        let value = self.required(key)?;
        as_string(value, &self.child(key))
    }

    /// Identity field: a string that must not be empty
    pub fn identifier(&self, key: &str) -> Result<String, InputError> {
        let value = self.string(key)?;
        if value.trim().is_empty() {
            return Err(InputError::EmptyIdentifier(self.child(key)));
        }
        Ok(value)
    }

    pub fn optional_string(&self, key: &str) -> Result<Option<String>, InputError> {
        self.get(key)
            .map(|value| as_string(value, &self.child(key)))
            .transpose()
    }

    pub fn integer(&self, key: &str) -> Result<i64, InputError> {
        let value = self.required(key)?;
        as_integer(value, &self.child(key))
    }

    /// Integer that must be zero or positive
    pub fn unsigned(&self, key: &str) -> Result<u64, InputError> {
        let value = self.integer(key)?;
        u64::try_from(value).map_err(|_| InputError::InvalidValue {
            field: self.child(key),
            reason: format!("must be non-negative, got {}", value),
        })
    }

    pub fn float_any(&self, keys: &[&str]) -> Result<f64, InputError> {
        let (value, path) = self.required_any(keys)?;
        match value {
            Value::Number(n) => n.as_f64().ok_or(InputError::InvalidType {
                field: path,
                expected: "number",
            }),
            Value::String(s) => s.trim().parse::<f64>().map_err(|_| InputError::InvalidType {
                field: path,
                expected: "number",
            }),
            _ => Err(InputError::InvalidType {
                field: path,
                expected: "number",
            }),
        }
    }

    pub fn bool_or(&self, key: &str, default: bool) -> Result<bool, InputError> {
        match self.get(key) {
            None => Ok(default),
            Some(Value::Bool(b)) => Ok(*b),
            Some(_) => Err(InputError::InvalidType {
                field: self.child(key),
                expected: "boolean",
            }),
        }
    }

    /// Instant given as RFC 3339, naive ISO-8601 (read as UTC) or epoch seconds
    pub fn instant(&self, key: &str) -> Result<DateTime<Utc>, InputError> {
        let value = self.required(key)?;
        let path = self.child(key);
        match value {
            Value::String(s) => parse_instant(s).ok_or(InputError::InvalidValue {
                field: path,
                reason: format!("'{}' is not an ISO-8601 datetime", s),
            }),
            Value::Number(_) => {
                let secs = as_integer(value, &path)?;
                DateTime::from_timestamp(secs, 0).ok_or(InputError::InvalidValue {
                    field: path,
                    reason: format!("timestamp {} is out of range", secs),
                })
            }
            _ => Err(InputError::InvalidType {
                field: path,
                expected: "datetime",
            }),
        }
    }

    /// Elements of an optional array field with their paths; absent means empty
    pub fn array(&self, key: &str) -> Result<Vec<(String, &'a Value)>, InputError> {
        match self.get(key) {
            None => Ok(Vec::new()),
            Some(Value::Array(items)) => {
                let base = self.child(key);
                Ok(items
                    .iter()
                    .enumerate()
                    .map(|(index, item)| (format!("{}[{}]", base, index), item))
                    .collect())
            }
            Some(_) => Err(InputError::InvalidType {
                field: self.child(key),
                expected: "array",
            }),
        }
    }
}

fn display_path(path: &str) -> String {
    if path.is_empty() {
        "<root>".to_string()
    } else {
        path.to_string()
    }
}

fn as_string(value: &Value, path: &str) -> Result<String, InputError> {
    match value {
        Value::String(s) => Ok(s.clone()),
        _ => Err(InputError::InvalidType {
            field: path.to_string(),
            expected: "string",
        }),
    }
}

/// Integers accept JSON integers, integral floats and numeric strings
fn as_integer(value: &Value, path: &str) -> Result<i64, InputError> {
    let invalid = || InputError::InvalidType {
        field: path.to_string(),
        expected: "integer",
    };

    match value {
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Ok(i)
            } else if n.is_u64() {
                Err(InputError::InvalidValue {
                    field: path.to_string(),
                    reason: format!("{} is out of range", n),
                })
            } else {
                let f = n.as_f64().ok_or_else(invalid)?;
                if f.fract() == 0.0 && f >= i64::MIN as f64 && f <= i64::MAX as f64 {
                    Ok(f as i64)
                } else {
                    Err(invalid())
                }
            }
        }
        Value::String(s) => s.trim().parse::<i64>().map_err(|_| invalid()),
        _ => Err(invalid()),
    }
}

fn parse_instant(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
        .map(|naive| naive.and_utc())
}
