//! Participant records as returned by the backend.
//!
//! The backend is loose about types: phone numbers sometimes arrive as JSON
//! numbers, graduation years as either numbers or labels, and optional
//! profile fields may be missing or `null`. Everything is normalized here so
//! the rest of the crate only sees strings and a `GraduationYear`.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// A registered participant of one event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Participant {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub username: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub email: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub college: String,
    #[serde(
        default,
        deserialize_with = "lenient_year",
        skip_serializing_if = "Option::is_none"
    )]
    pub graduation_year: Option<GraduationYear>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub branch: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub phone: String,
}

/// Graduation year: usually a number, occasionally a free-form label.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum GraduationYear {
    Year(i64),
    /// Numeric but not a whole number.
    Number(f64),
    Label(String),
}

impl fmt::Display for GraduationYear {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GraduationYear::Year(year) => write!(f, "{year}"),
            GraduationYear::Number(number) => write!(f, "{number}"),
            GraduationYear::Label(label) => f.write_str(label),
        }
    }
}

impl Participant {
    /// Graduation year as display text, empty when missing.
    pub fn graduation_year_text(&self) -> String {
        self.graduation_year
            .as_ref()
            .map(ToString::to_string)
            .unwrap_or_default()
    }
}

fn lenient_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    let value = Option::<Value>::deserialize(deserializer)?;

    Ok(match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s,
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        Some(other) => other.to_string(),
    })
}

fn lenient_year<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<GraduationYear>, D::Error> {
    let value = Option::<Value>::deserialize(deserializer)?;

    Ok(match value {
        None | Some(Value::Null) => None,
        Some(Value::Number(n)) => Some(numeric_year(&n)),
        Some(Value::String(s)) if s.trim().is_empty() => None,
        Some(Value::String(s)) => Some(GraduationYear::Label(s)),
        Some(other) => Some(GraduationYear::Label(other.to_string())),
    })
}

/// Whole floats such as `2024.0` collapse to `Year`.
fn numeric_year(n: &serde_json::Number) -> GraduationYear {
    if let Some(year) = n.as_i64() {
        return GraduationYear::Year(year);
    }

    match n.as_f64() {
        Some(f) if f.fract() == 0.0 && f.abs() < i64::MAX as f64 => {
            GraduationYear::Year(f as i64)
        }
        Some(f) => GraduationYear::Number(f),
        None => GraduationYear::Label(n.to_string()),
    }
}
