//! Domain DTOs for the monday.com API.
//!
//! # Design
//! Record types mirror the remote resources. The value payload types mirror
//! the vendor's per-column-type JSON encodings exactly; they are external
//! wire contracts and must not change shape. DTOs are defined independently
//! from the mock-server crate; integration tests catch schema drift.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// An account user.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
}

/// A board, the top-level container of groups and items.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Board {
    pub id: String,
    pub name: String,
}

/// A group of items within a board.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Group {
    pub id: String,
    pub title: String,
}

/// Column metadata for a board.
///
/// `column_type` is the vendor type tag driving value decoding (`"text"`,
/// `"color"`, `"boolean"`, ...). `settings` is the raw settings JSON, which
/// carries label metadata for the enumerated types.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Column {
    pub id: String,
    pub title: String,
    #[serde(rename = "type")]
    pub column_type: String,
    #[serde(rename = "settings_str")]
    pub settings: String,
}

/// Lookup table from column id to [`Column`], built once per board to drive
/// value decoding.
#[derive(Debug, Clone, Default)]
pub struct ColumnMap(HashMap<String, Column>);

impl ColumnMap {
    /// Build the map from a board's column list. Column ids are unique per
    /// board; a duplicate id keeps the later entry.
    pub fn from_columns(columns: Vec<Column>) -> Self {
        Self(columns.into_iter().map(|c| (c.id.clone(), c)).collect())
    }

    pub fn get(&self, column_id: &str) -> Option<&Column> {
        self.0.get(column_id)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// One column's raw value on an item.
///
/// `value` is a string of JSON in the column type's wire format, or `None`
/// when the column is unset (the wire sends JSON `null`).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ColumnValue {
    pub id: String,
    pub value: Option<String>,
}

/// An item (row) on a board, with `group { id }` flattened to `group_id`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Item {
    pub id: String,
    pub group_id: String,
    pub name: String,
    pub column_values: Vec<ColumnValue>,
}

// Wire payloads of the per-column-type value encodings.

/// `date` column value: `{"date":"2019-05-22","time":""}`. The time
/// component may be empty or absent.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DateTime {
    pub date: String,
    #[serde(default)]
    pub time: String,
}

/// `color` (status) column value: `{"index":3}`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StatusIndex {
    pub index: i64,
}

/// `boolean` (checkbox) column value: `{"checked":"true"}`. The flag is a
/// string on the wire, not a JSON boolean.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Checkbox {
    pub checked: String,
}

/// One entry of a people column's assignment list.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PersonTeam {
    pub id: i64,
    /// `"person"` or `"team"`.
    pub kind: String,
}

/// `multiple-person` column value:
/// `{"personsAndTeams":[{"id":123,"kind":"person"}]}`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct People {
    #[serde(rename = "personsAndTeams")]
    pub persons_and_teams: Vec<PersonTeam>,
}

/// `dropdown` column value: `{"ids":[1,3]}`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Dropdown {
    pub ids: Vec<i64>,
}

// Settings payloads for the enumerated column types.

/// Parsed `settings_str` of a `color` column.
#[derive(Debug, Clone, Deserialize)]
pub struct StatusSettings {
    /// Label text keyed by index (string keys on the wire).
    #[serde(default)]
    pub labels: HashMap<String, String>,
    /// Display position keyed by index.
    #[serde(default, rename = "label_positions_v2")]
    pub label_positions: HashMap<String, i64>,
}

/// One label from a `dropdown` column's settings.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct DropdownLabel {
    pub id: i64,
    pub name: String,
}

/// Parsed `settings_str` of a `dropdown` column.
#[derive(Debug, Clone, Deserialize)]
pub struct DropdownSettings {
    #[serde(default)]
    pub labels: Vec<DropdownLabel>,
}
