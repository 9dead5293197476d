//! Encoding and decoding of per-column-type values.
//!
//! # Overview
//! monday.com stores each column value as a small JSON document whose shape
//! depends on the column's type tag. [`decode_value`] turns a raw
//! [`ColumnValue`] into a plain string or string list using the board's
//! [`ColumnMap`]; [`ColumnValues`] assembles the `column_values` object sent
//! with create-item. [`decode_labels`] parses the label tables of `color`
//! and `dropdown` columns so decoded indices/ids can be mapped back to
//! display names.

use std::collections::HashMap;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::ApiError;
use crate::types::{
    Checkbox, Column, ColumnMap, ColumnValue, DateTime, Dropdown, DropdownLabel,
    DropdownSettings, People, PersonTeam, StatusIndex, StatusSettings,
};

/// Result of decoding one column value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodedValue {
    /// The column is unset.
    Empty,
    /// Single-valued column types: text, color, boolean, date.
    Single(String),
    /// Multi-valued column types: multiple-person, dropdown.
    Multiple(Vec<String>),
}

/// Decode a raw column value using the board's column map.
///
/// - `text` yields the string contents
/// - `color` (status) yields the chosen label index, e.g. `"3"`
/// - `boolean` (checkbox) yields `"true"` or `"false"`
/// - `date` yields the date component, e.g. `"2019-05-22"`
/// - `multiple-person` and `dropdown` yield one string per selected id
///
/// An unset value decodes to [`DecodedValue::Empty`] without consulting the
/// map. A column id absent from the map or a type tag outside the set above
/// is an error.
pub fn decode_value(columns: &ColumnMap, value: &ColumnValue) -> Result<DecodedValue, ApiError> {
    let raw = match value.value.as_deref() {
        None | Some("") => return Ok(DecodedValue::Empty),
        Some(raw) => raw,
    };
    let column = columns
        .get(&value.id)
        .ok_or_else(|| ApiError::UnknownColumnId(value.id.clone()))?;
    match column.column_type.as_str() {
        "text" => {
            let text: String = decode_json(raw)?;
            Ok(DecodedValue::Single(text))
        }
        "color" => {
            let status: StatusIndex = decode_json(raw)?;
            Ok(DecodedValue::Single(status.index.to_string()))
        }
        "boolean" => {
            let checkbox: Checkbox = decode_json(raw)?;
            Ok(DecodedValue::Single(checkbox.checked))
        }
        "date" => {
            let date: DateTime = decode_json(raw)?;
            Ok(DecodedValue::Single(date.date))
        }
        "multiple-person" => Ok(DecodedValue::Multiple(decode_people(raw)?)),
        "dropdown" => Ok(DecodedValue::Multiple(decode_dropdown(raw)?)),
        other => Err(ApiError::UnsupportedColumnType(other.to_string())),
    }
}

/// Decode a people value into the assigned person/team ids, rendered as
/// strings. Run list-users to resolve ids to names.
pub fn decode_people(raw: &str) -> Result<Vec<String>, ApiError> {
    let people: People = decode_json(raw)?;
    Ok(people
        .persons_and_teams
        .iter()
        .map(|p| p.id.to_string())
        .collect())
}

/// Decode a dropdown value into the selected label ids, rendered as
/// strings. Use [`decode_labels`] to resolve ids to label names.
pub fn decode_dropdown(raw: &str) -> Result<Vec<String>, ApiError> {
    let dropdown: Dropdown = decode_json(raw)?;
    Ok(dropdown.ids.iter().map(|id| id.to_string()).collect())
}

/// Label tables decoded from a column's settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColumnLabels {
    /// Status label text keyed by index.
    Status(HashMap<String, String>),
    /// Dropdown labels, id and display name.
    Dropdown(Vec<DropdownLabel>),
}

/// Decode the label metadata of a `color` or `dropdown` column from its
/// settings. Other column types carry no label table.
pub fn decode_labels(column: &Column) -> Result<ColumnLabels, ApiError> {
    match column.column_type.as_str() {
        "color" => {
            let settings: StatusSettings = decode_json(&column.settings)?;
            Ok(ColumnLabels::Status(settings.labels))
        }
        "dropdown" => {
            let settings: DropdownSettings = decode_json(&column.settings)?;
            Ok(ColumnLabels::Dropdown(settings.labels))
        }
        other => Err(ApiError::UnsupportedColumnType(other.to_string())),
    }
}

fn decode_json<T: DeserializeOwned>(raw: &str) -> Result<T, ApiError> {
    serde_json::from_str(raw).map_err(|e| ApiError::Deserialization(e.to_string()))
}

/// Builder for the `column_values` object sent with create-item.
///
/// Each method inserts one column's value in its wire format, keyed by
/// column id. Run list-columns to discover the ids.
#[derive(Debug, Clone, Default)]
pub struct ColumnValues {
    values: Map<String, Value>,
}

impl ColumnValues {
    pub fn new() -> Self {
        Self::default()
    }

    /// Text columns take the bare string.
    pub fn text(mut self, column_id: &str, text: &str) -> Self {
        self.values
            .insert(column_id.to_string(), Value::String(text.to_string()));
        self
    }

    /// `{"date":"2019-05-22","time":""}`
    pub fn date(self, column_id: &str, date: &str) -> Self {
        self.insert(
            column_id,
            &DateTime {
                date: date.to_string(),
                time: String::new(),
            },
        )
    }

    /// `{"date":"2019-05-22","time":"14:00:00"}`
    pub fn date_time(self, column_id: &str, date: &str, time: &str) -> Self {
        self.insert(
            column_id,
            &DateTime {
                date: date.to_string(),
                time: time.to_string(),
            },
        )
    }

    /// `{"index":2}` for status (color) columns.
    pub fn status_index(self, column_id: &str, index: i64) -> Self {
        self.insert(column_id, &StatusIndex { index })
    }

    /// `{"checked":"true"}` for checkbox (boolean) columns.
    pub fn checkbox(self, column_id: &str, checked: bool) -> Self {
        self.insert(
            column_id,
            &Checkbox {
                checked: checked.to_string(),
            },
        )
    }

    /// `{"personsAndTeams":[{"id":123,"kind":"person"}]}` for people columns.
    pub fn people(self, column_id: &str, person_ids: &[i64]) -> Self {
        let people = People {
            persons_and_teams: person_ids
                .iter()
                .map(|&id| PersonTeam {
                    id,
                    kind: "person".to_string(),
                })
                .collect(),
        };
        self.insert(column_id, &people)
    }

    /// `{"ids":[1,3]}` for dropdown columns.
    pub fn dropdown(self, column_id: &str, label_ids: &[i64]) -> Self {
        self.insert(
            column_id,
            &Dropdown {
                ids: label_ids.to_vec(),
            },
        )
    }

    fn insert<T: Serialize>(mut self, column_id: &str, value: &T) -> Self {
        let value = serde_json::to_value(value).unwrap_or(Value::Null);
        self.values.insert(column_id.to_string(), value);
        self
    }

    /// Interpret a caller-provided JSON object as a prebuilt value map.
    pub fn from_value(value: Value) -> Result<Self, ApiError> {
        match value {
            Value::Object(values) => Ok(Self { values }),
            other => Err(ApiError::Serialization(format!(
                "column values must be a JSON object, got {other}"
            ))),
        }
    }

    /// Serialize to the JSON string bound to the `$colValues` variable.
    pub fn to_json(&self) -> Result<String, ApiError> {
        serde_json::to_string(&self.values).map_err(|e| ApiError::Serialization(e.to_string()))
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
