use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

pub use crate::types::{CategoryValue, FieldName, RecordId};

/// A single attribute value inside a record.
///
/// The backing service reports attributes loosely typed; numeric fields can
/// arrive as numbers or as their string form, so equality against a filter
/// literal goes through [`AttributeValue::matches_literal`].
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub enum AttributeValue {
    /// Text attribute, including string-typed numeric fields.
    Text(String),
    /// Native numeric attribute.
    Number(f64),
    /// Attribute reported with no value.
    Null,
}

impl AttributeValue {
    /// Borrow the text form, if this value is text.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Numeric view: native numbers, or text that parses as a number.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(value) => Some(*value),
            Self::Text(text) => text.trim().parse::<f64>().ok(),
            Self::Null => None,
        }
    }

    /// Whether the value is null or blank text.
    pub fn is_blank(&self) -> bool {
        match self {
            Self::Null => true,
            Self::Text(text) => text.trim().is_empty(),
            Self::Number(_) => false,
        }
    }

    /// Display form used for selection lists and category keys.
    ///
    /// Whole numbers render without a trailing `.0` so `Number(5.0)` and
    /// `Text("5")` produce the same category.
    pub fn display(&self) -> String {
        match self {
            Self::Text(text) => text.clone(),
            Self::Number(value) => {
                if value.fract() == 0.0 && value.is_finite() {
                    format!("{}", *value as i64)
                } else {
                    value.to_string()
                }
            }
            Self::Null => String::new(),
        }
    }

    /// Equality against a filter literal (`attribute = literal`).
    pub fn matches_literal(&self, literal: &str) -> bool {
        match self {
            Self::Text(text) => text == literal,
            Self::Number(value) => match literal.trim().parse::<f64>() {
                Ok(parsed) => (*value - parsed).abs() < f64::EPSILON,
                Err(_) => self.display() == literal,
            },
            Self::Null => false,
        }
    }
}

impl From<&str> for AttributeValue {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<String> for AttributeValue {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<f64> for AttributeValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

/// Point location of an observation, in degrees.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
pub struct Position {
    /// Longitude, positive east.
    pub lon: f64,
    /// Latitude, positive north.
    pub lat: f64,
}

/// Canonical record payload produced by a `RecordSource`.
///
/// The engine never mutates a record; it reads one named categorical
/// attribute and forwards the whole record downstream to the sink.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Record {
    /// Stable record identifier.
    pub id: RecordId,
    /// Observation timestamp reported by the source.
    pub observed_at: DateTime<Utc>,
    /// Point location, when the source reports one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,
    /// Attribute map in source order.
    pub attributes: IndexMap<FieldName, AttributeValue>,
}

impl Record {
    /// Create a record with the current time and no attributes.
    pub fn new(id: impl Into<RecordId>) -> Self {
        Self {
            id: id.into(),
            observed_at: Utc::now(),
            position: None,
            attributes: IndexMap::new(),
        }
    }

    /// Set the observation timestamp.
    pub fn with_observed_at(mut self, observed_at: DateTime<Utc>) -> Self {
        self.observed_at = observed_at;
        self
    }

    /// Set the point location.
    pub fn with_position(mut self, lon: f64, lat: f64) -> Self {
        self.position = Some(Position { lon, lat });
        self
    }

    /// Add or replace one attribute.
    pub fn with_attribute(
        mut self,
        field: impl Into<FieldName>,
        value: impl Into<AttributeValue>,
    ) -> Self {
        self.attributes.insert(field.into(), value.into());
        self
    }

    /// Look up an attribute by field name.
    pub fn attribute(&self, field: &str) -> Option<&AttributeValue> {
        self.attributes.get(field)
    }

    /// Category key for `field` in display form; empty when missing or null.
    pub fn category(&self, field: &str) -> CategoryValue {
        self.attribute(field)
            .map(AttributeValue::display)
            .unwrap_or_default()
    }
}

/// Layer tag carried alongside rendered record sets.
///
/// The sink uses it to pick the list label and popup title field.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum LayerKind {
    /// Land weather stations.
    Stations,
    /// Marine buoys.
    Buoys,
}

impl LayerKind {
    /// Field holding the human-readable label for this layer.
    pub fn label_field(&self) -> &'static str {
        match self {
            Self::Stations => "STATION_NAME",
            Self::Buoys => "STATIONID",
        }
    }

    /// Stable lowercase name, matching the selection control values.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Stations => "stations",
            Self::Buoys => "buoys",
        }
    }
}
