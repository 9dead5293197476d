//! GraphQL request/response envelope types.
//!
//! The monday.com API speaks plain GraphQL-over-HTTP: request bodies are
//! JSON objects with `query` and `variables` keys, responses carry `data`
//! and `errors`. Only the envelope lives here; per-operation variable and
//! response shapes are private to the `client` module.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::ApiError;

/// Request body for a GraphQL call.
#[derive(Debug, Serialize)]
pub struct GraphqlRequest<'a, V> {
    pub query: &'a str,
    pub variables: &'a V,
}

/// A single error object from a GraphQL response.
///
/// The service attaches more fields (locations, error codes); only the
/// message is surfaced to callers.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GraphqlError {
    pub message: String,
}

/// Response envelope for a GraphQL call.
#[derive(Debug, Clone, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct GraphqlResponse<T> {
    #[serde(default)]
    pub data: Option<T>,
    #[serde(default)]
    pub errors: Vec<GraphqlError>,
}

/// Serialize a query and its variables into a request body string.
pub fn request_body<V: Serialize>(query: &str, variables: &V) -> Result<String, ApiError> {
    serde_json::to_string(&GraphqlRequest { query, variables })
        .map_err(|e| ApiError::Serialization(e.to_string()))
}

/// Interpret a raw response body as a GraphQL envelope and extract its data.
///
/// GraphQL errors take precedence over partial data; an envelope with
/// neither data nor errors is malformed.
pub fn response_data<T: DeserializeOwned>(body: &str) -> Result<T, ApiError> {
    let envelope: GraphqlResponse<T> =
        serde_json::from_str(body).map_err(|e| ApiError::Deserialization(e.to_string()))?;
    if !envelope.errors.is_empty() {
        return Err(ApiError::Graphql {
            messages: envelope.errors.into_iter().map(|e| e.message).collect(),
        });
    }
    envelope.data.ok_or(ApiError::MissingData)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Payload {
        count: u32,
    }

    #[test]
    fn request_body_wraps_query_and_variables() {
        #[derive(Serialize)]
        struct Vars {
            id: u32,
        }
        let body = request_body("query { thing }", &Vars { id: 7 }).unwrap();
        let json: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(json["query"], "query { thing }");
        assert_eq!(json["variables"]["id"], 7);
    }

    #[test]
    fn response_data_extracts_payload() {
        let payload: Payload = response_data(r#"{"data":{"count":3}}"#).unwrap();
        assert_eq!(payload, Payload { count: 3 });
    }

    #[test]
    fn response_data_surfaces_errors() {
        let err = response_data::<Payload>(
            r#"{"data":null,"errors":[{"message":"boom"},{"message":"bang"}]}"#,
        )
        .unwrap_err();
        match err {
            ApiError::Graphql { messages } => assert_eq!(messages, vec!["boom", "bang"]),
            other => panic!("expected Graphql error, got {other:?}"),
        }
    }

    #[test]
    fn errors_take_precedence_over_partial_data() {
        let err = response_data::<Payload>(
            r#"{"data":{"count":1},"errors":[{"message":"partial failure"}]}"#,
        )
        .unwrap_err();
        assert!(matches!(err, ApiError::Graphql { .. }));
    }

    #[test]
    fn empty_envelope_is_missing_data() {
        let err = response_data::<Payload>("{}").unwrap_err();
        assert!(matches!(err, ApiError::MissingData));
    }

    #[test]
    fn unknown_envelope_fields_are_tolerated() {
        let payload: Payload =
            response_data(r#"{"data":{"count":9},"account_id":12345,"extensions":{}}"#).unwrap();
        assert_eq!(payload.count, 9);
    }

    #[test]
    fn malformed_body_is_deserialization_error() {
        let err = response_data::<Payload>("not json").unwrap_err();
        assert!(matches!(err, ApiError::Deserialization(_)));
    }
}
