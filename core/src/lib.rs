//! Synchronous API client core for the monday.com work-management platform.
//!
//! # Overview
//! Builds `HttpRequest` values and parses `HttpResponse` values without
//! touching the network (host-does-IO pattern). The caller executes the
//! actual HTTP round-trip, making the core fully deterministic and testable.
//!
//! # Design
//! - `MondayClient` is stateless — it holds only the endpoint URL and the
//!   API token, and attaches the static headers to every request it builds.
//! - Each remote operation is split into `build_*` (produces request) and
//!   `parse_*` (consumes response), so the I/O boundary is explicit.
//! - Column values are decoded and encoded by the `values` module, driven by
//!   the board's `ColumnMap`.
//! - Types use owned `String` / `Vec` fields to simplify FFI mapping.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod client;
pub mod error;
pub mod graphql;
pub mod http;
pub mod types;
pub mod values;

pub use client::{MondayClient, API_URL, TOKEN_ENV_VAR};
pub use error::ApiError;
pub use http::{HttpRequest, HttpResponse};
pub use types::{
    Board, Checkbox, Column, ColumnMap, ColumnValue, DateTime, Dropdown, DropdownLabel, Group,
    Item, People, PersonTeam, StatusIndex, User,
};
pub use values::{decode_labels, decode_value, ColumnLabels, ColumnValues, DecodedValue};
