//! Error types for the monday.com API client.
//!
//! # Design
//! Transport failures (`Http`), GraphQL-level failures (`Graphql`,
//! `MissingData`, `BoardNotFound`) and codec failures (`UnknownColumnId`,
//! `UnsupportedColumnType`) get separate variants because callers handle
//! them differently: a 401 means a bad token, a GraphQL error means a bad
//! request, a codec error means stale column metadata.

use thiserror::Error;

/// Errors returned by `MondayClient` build/parse methods and the value codec.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The server returned a non-2xx status (401 for a bad token, etc.).
    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },

    /// The response envelope carried GraphQL errors.
    #[error("GraphQL errors: {}", .messages.join("; "))]
    Graphql { messages: Vec<String> },

    /// The response envelope carried neither data nor errors.
    #[error("GraphQL response carried no data")]
    MissingData,

    /// A board-scoped query matched no board.
    #[error("board not found")]
    BoardNotFound,

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    Serialization(String),

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    Deserialization(String),

    /// A column value referenced a column id absent from the column map.
    #[error("invalid column id: {0}")]
    UnknownColumnId(String),

    /// The column's type tag has no decoding rule.
    #[error("column type not handled: {0}")]
    UnsupportedColumnType(String),

    /// An item id that must be numeric on the wire was not.
    #[error("invalid item id: {0}")]
    InvalidItemId(String),

    /// Client construction failed (missing or empty token).
    #[error("configuration error: {0}")]
    Config(String),
}
