//! Stateless request builder and response parser for the monday.com API.
//!
//! # Design
//! `MondayClient` holds the endpoint URL and the API token and carries no
//! mutable state between calls. Each remote operation is split into a
//! `build_*` method that produces an `HttpRequest` (query, bound variables,
//! static headers) and a `parse_*` method that consumes an `HttpResponse`.
//! The caller executes the actual HTTP POST, keeping the core deterministic
//! and free of I/O dependencies.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ApiError;
use crate::graphql;
use crate::http::{HttpRequest, HttpResponse};
use crate::types::{Board, Column, ColumnValue, Group, Item, User};
use crate::values::ColumnValues;

/// The production GraphQL endpoint.
pub const API_URL: &str = "https://api.monday.com/v2/";

/// Environment variable consulted by [`MondayClient::from_env`].
pub const TOKEN_ENV_VAR: &str = "MONDAY_API_TOKEN";

const LIST_USERS_QUERY: &str = r"
    query {
        users {
            id name email
        }
    }";

const LIST_BOARDS_QUERY: &str = r"
    query {
        boards {
            id name
        }
    }";

const LIST_GROUPS_QUERY: &str = r"
    query ($boardId: [Int]) {
        boards (ids: $boardId) {
            groups {
                id title
            }
        }
    }";

const LIST_COLUMNS_QUERY: &str = r"
    query ($boardId: [Int]) {
        boards (ids: $boardId) {
            columns {
                id title type settings_str
            }
        }
    }";

const LIST_ITEMS_QUERY: &str = r"
    query ($boardId: [Int]) {
        boards (ids: $boardId) {
            items {
                id
                group { id }
                name
                column_values {
                    id value
                }
            }
        }
    }";

const CREATE_ITEM_QUERY: &str = r"
    mutation ($boardId: Int!, $groupId: String!, $itemName: String!, $colValues: JSON!) {
        create_item (board_id: $boardId, group_id: $groupId, item_name: $itemName, column_values: $colValues) {
            id
        }
    }";

const CREATE_UPDATE_QUERY: &str = r"
    mutation ($itemId: Int!, $body: String!) {
        create_update (item_id: $itemId, body: $body) {
            id
        }
    }";

#[derive(Serialize)]
struct NoVariables {}

#[derive(Serialize)]
struct BoardVariables {
    #[serde(rename = "boardId")]
    board_id: Vec<i64>,
}

#[derive(Serialize)]
struct CreateItemVariables {
    #[serde(rename = "boardId")]
    board_id: i64,
    #[serde(rename = "groupId")]
    group_id: String,
    #[serde(rename = "itemName")]
    item_name: String,
    #[serde(rename = "colValues")]
    col_values: String,
}

#[derive(Serialize)]
struct CreateUpdateVariables {
    #[serde(rename = "itemId")]
    item_id: i64,
    body: String,
}

#[derive(Deserialize)]
struct UsersData {
    users: Vec<User>,
}

#[derive(Deserialize)]
struct BoardsData {
    boards: Vec<Board>,
}

#[derive(Deserialize)]
struct GroupsData {
    boards: Vec<GroupsBoard>,
}

#[derive(Deserialize)]
struct GroupsBoard {
    groups: Vec<Group>,
}

#[derive(Deserialize)]
struct ColumnsData {
    boards: Vec<ColumnsBoard>,
}

#[derive(Deserialize)]
struct ColumnsBoard {
    columns: Vec<Column>,
}

#[derive(Deserialize)]
struct ItemsData {
    boards: Vec<ItemsBoard>,
}

#[derive(Deserialize)]
struct ItemsBoard {
    items: Vec<ItemData>,
}

#[derive(Deserialize)]
struct ItemData {
    id: String,
    group: ItemGroup,
    name: String,
    column_values: Vec<ColumnValue>,
}

#[derive(Deserialize)]
struct ItemGroup {
    id: String,
}

#[derive(Deserialize)]
struct CreateItemData {
    create_item: CreatedId,
}

#[derive(Deserialize)]
struct CreateUpdateData {
    create_update: CreatedId,
}

/// Ids come back as JSON strings even though they are numeric.
#[derive(Deserialize)]
struct CreatedId {
    id: String,
}

/// Synchronous, stateless client for the monday.com API.
///
/// Builds `HttpRequest` values and parses `HttpResponse` values without
/// touching the network. The caller is responsible for executing the HTTP
/// round-trip between `build_*` and `parse_*`.
#[derive(Debug, Clone)]
pub struct MondayClient {
    api_url: String,
    token: String,
}

impl MondayClient {
    /// Create a client for the production endpoint.
    pub fn new(token: &str) -> Self {
        Self::with_endpoint(API_URL, token)
    }

    /// Create a client for a custom endpoint (tests, proxies).
    pub fn with_endpoint(api_url: &str, token: &str) -> Self {
        Self {
            api_url: api_url.to_string(),
            token: token.to_string(),
        }
    }

    /// Create a client for the production endpoint with the token read from
    /// `MONDAY_API_TOKEN`.
    pub fn from_env() -> Result<Self, ApiError> {
        let token = std::env::var(TOKEN_ENV_VAR)
            .map_err(|_| ApiError::Config(format!("{TOKEN_ENV_VAR} is not set")))?;
        if token.is_empty() {
            return Err(ApiError::Config(format!("{TOKEN_ENV_VAR} is empty")));
        }
        Ok(Self::new(&token))
    }

    /// Attach the static headers and the GraphQL body. Every operation is a
    /// POST to the same endpoint; only the body differs.
    fn post_request<V: Serialize>(
        &self,
        query: &str,
        variables: &V,
    ) -> Result<HttpRequest, ApiError> {
        let body = graphql::request_body(query, variables)?;
        debug!(url = %self.api_url, "built graphql request");
        Ok(HttpRequest {
            url: self.api_url.clone(),
            headers: vec![
                ("Authorization".to_string(), self.token.clone()),
                ("Content-Type".to_string(), "application/json".to_string()),
                ("Cache-Control".to_string(), "no-cache".to_string()),
            ],
            body,
        })
    }

    pub fn build_list_users(&self) -> Result<HttpRequest, ApiError> {
        self.post_request(LIST_USERS_QUERY, &NoVariables {})
    }

    pub fn parse_list_users(&self, response: HttpResponse) -> Result<Vec<User>, ApiError> {
        let data: UsersData = parse_data(response)?;
        Ok(data.users)
    }

    pub fn build_list_boards(&self) -> Result<HttpRequest, ApiError> {
        self.post_request(LIST_BOARDS_QUERY, &NoVariables {})
    }

    pub fn parse_list_boards(&self, response: HttpResponse) -> Result<Vec<Board>, ApiError> {
        let data: BoardsData = parse_data(response)?;
        Ok(data.boards)
    }

    pub fn build_list_groups(&self, board_id: i64) -> Result<HttpRequest, ApiError> {
        self.post_request(
            LIST_GROUPS_QUERY,
            &BoardVariables {
                board_id: vec![board_id],
            },
        )
    }

    /// Returns the groups of the board selected by the request.
    pub fn parse_list_groups(&self, response: HttpResponse) -> Result<Vec<Group>, ApiError> {
        let data: GroupsData = parse_data(response)?;
        let board = data
            .boards
            .into_iter()
            .next()
            .ok_or(ApiError::BoardNotFound)?;
        Ok(board.groups)
    }

    pub fn build_list_columns(&self, board_id: i64) -> Result<HttpRequest, ApiError> {
        self.post_request(
            LIST_COLUMNS_QUERY,
            &BoardVariables {
                board_id: vec![board_id],
            },
        )
    }

    pub fn parse_list_columns(&self, response: HttpResponse) -> Result<Vec<Column>, ApiError> {
        let data: ColumnsData = parse_data(response)?;
        let board = data
            .boards
            .into_iter()
            .next()
            .ok_or(ApiError::BoardNotFound)?;
        Ok(board.columns)
    }

    pub fn build_list_items(&self, board_id: i64) -> Result<HttpRequest, ApiError> {
        self.post_request(
            LIST_ITEMS_QUERY,
            &BoardVariables {
                board_id: vec![board_id],
            },
        )
    }

    /// Returns the items of the selected board, with each item's
    /// `group { id }` flattened into `group_id`.
    pub fn parse_list_items(&self, response: HttpResponse) -> Result<Vec<Item>, ApiError> {
        let data: ItemsData = parse_data(response)?;
        let board = data
            .boards
            .into_iter()
            .next()
            .ok_or(ApiError::BoardNotFound)?;
        Ok(board
            .items
            .into_iter()
            .map(|item| Item {
                id: item.id,
                group_id: item.group.id,
                name: item.name,
                column_values: item.column_values,
            })
            .collect())
    }

    /// Build the create-item mutation. `values` is serialized to a JSON
    /// string and bound to the `JSON!` variable, as the API requires.
    pub fn build_create_item(
        &self,
        board_id: i64,
        group_id: &str,
        item_name: &str,
        values: &ColumnValues,
    ) -> Result<HttpRequest, ApiError> {
        let col_values = values.to_json()?;
        debug!(%col_values, "create_item column values");
        self.post_request(
            CREATE_ITEM_QUERY,
            &CreateItemVariables {
                board_id,
                group_id: group_id.to_string(),
                item_name: item_name.to_string(),
                col_values,
            },
        )
    }

    /// Returns the id of the created item.
    pub fn parse_create_item(&self, response: HttpResponse) -> Result<String, ApiError> {
        let data: CreateItemData = parse_data(response)?;
        Ok(data.create_item.id)
    }

    /// Build the create-update mutation. `item_id` is the string id returned
    /// by create-item; the wire variable is numeric, so a non-numeric id
    /// fails here before any request is built.
    pub fn build_create_update(&self, item_id: &str, body: &str) -> Result<HttpRequest, ApiError> {
        let item_id: i64 = item_id
            .parse()
            .map_err(|_| ApiError::InvalidItemId(item_id.to_string()))?;
        self.post_request(
            CREATE_UPDATE_QUERY,
            &CreateUpdateVariables {
                item_id,
                body: body.to_string(),
            },
        )
    }

    /// Returns the id of the created update.
    pub fn parse_create_update(&self, response: HttpResponse) -> Result<String, ApiError> {
        let data: CreateUpdateData = parse_data(response)?;
        Ok(data.create_update.id)
    }
}

/// Check the HTTP status, then extract the GraphQL data payload.
fn parse_data<T: DeserializeOwned>(response: HttpResponse) -> Result<T, ApiError> {
    debug!(status = response.status, "parsing graphql response");
    if !(200..300).contains(&response.status) {
        return Err(ApiError::Http {
            status: response.status,
            body: response.body,
        });
    }
    graphql::response_data(&response.body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn client() -> MondayClient {
        MondayClient::with_endpoint("http://localhost:3000/", "token-123")
    }

    fn body_json(req: &HttpRequest) -> Value {
        serde_json::from_str(&req.body).unwrap()
    }

    fn ok_response(body: &str) -> HttpResponse {
        HttpResponse {
            status: 200,
            body: body.to_string(),
        }
    }

    #[test]
    fn requests_carry_static_headers() {
        let req = client().build_list_users().unwrap();
        assert_eq!(req.url, "http://localhost:3000/");
        assert_eq!(
            req.headers,
            vec![
                ("Authorization".to_string(), "token-123".to_string()),
                ("Content-Type".to_string(), "application/json".to_string()),
                ("Cache-Control".to_string(), "no-cache".to_string()),
            ]
        );
    }

    #[test]
    fn build_list_users_has_empty_variables() {
        let req = client().build_list_users().unwrap();
        let body = body_json(&req);
        assert!(body["query"].as_str().unwrap().contains("users"));
        assert_eq!(body["variables"], json!({}));
    }

    #[test]
    fn build_list_groups_binds_board_id_list() {
        let req = client().build_list_groups(1005).unwrap();
        let body = body_json(&req);
        assert!(body["query"].as_str().unwrap().contains("groups"));
        assert_eq!(body["variables"], json!({"boardId": [1005]}));
    }

    #[test]
    fn build_create_item_serializes_column_values_to_string() {
        let values = ColumnValues::new().status_index("status", 2).checkbox("check", true);
        let req = client()
            .build_create_item(1005, "topics", "New item", &values)
            .unwrap();
        let body = body_json(&req);
        assert_eq!(body["variables"]["boardId"], 1005);
        assert_eq!(body["variables"]["groupId"], "topics");
        assert_eq!(body["variables"]["itemName"], "New item");

        // colValues is a JSON string, not an inline object.
        let col_values: Value =
            serde_json::from_str(body["variables"]["colValues"].as_str().unwrap()).unwrap();
        assert_eq!(
            col_values,
            json!({"status": {"index": 2}, "check": {"checked": "true"}})
        );
    }

    #[test]
    fn build_create_update_parses_numeric_item_id() {
        let req = client().build_create_update("17", "all done").unwrap();
        let body = body_json(&req);
        assert_eq!(body["variables"]["itemId"], 17);
        assert_eq!(body["variables"]["body"], "all done");
    }

    #[test]
    fn build_create_update_rejects_non_numeric_item_id() {
        let err = client().build_create_update("abc", "msg").unwrap_err();
        match err {
            ApiError::InvalidItemId(id) => assert_eq!(id, "abc"),
            other => panic!("expected InvalidItemId, got {other:?}"),
        }
    }

    #[test]
    fn parse_list_users_success() {
        let users = client()
            .parse_list_users(ok_response(
                r#"{"data":{"users":[{"id":123456,"name":"Alice Johnson","email":"alice@example.com"}]}}"#,
            ))
            .unwrap();
        assert_eq!(users.len(), 1);
        assert_eq!(users[0].id, 123456);
        assert_eq!(users[0].email, "alice@example.com");
    }

    #[test]
    fn parse_list_boards_success() {
        let boards = client()
            .parse_list_boards(ok_response(
                r#"{"data":{"boards":[{"id":"1005","name":"Project Tracker"}]}}"#,
            ))
            .unwrap();
        assert_eq!(boards[0].id, "1005");
    }

    #[test]
    fn parse_list_groups_unwraps_first_board() {
        let groups = client()
            .parse_list_groups(ok_response(
                r#"{"data":{"boards":[{"groups":[{"id":"topics","title":"Topics"}]}]}}"#,
            ))
            .unwrap();
        assert_eq!(groups[0].id, "topics");
    }

    #[test]
    fn parse_list_groups_empty_boards_is_board_not_found() {
        let err = client()
            .parse_list_groups(ok_response(r#"{"data":{"boards":[]}}"#))
            .unwrap_err();
        assert!(matches!(err, ApiError::BoardNotFound));
    }

    #[test]
    fn parse_list_items_flattens_group_id() {
        let items = client()
            .parse_list_items(ok_response(
                r#"{"data":{"boards":[{"items":[
                    {"id":"101","group":{"id":"topics"},"name":"First",
                     "column_values":[{"id":"status","value":"{\"index\":1}"},{"id":"check","value":null}]}
                ]}]}}"#,
            ))
            .unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].group_id, "topics");
        assert_eq!(items[0].column_values[0].value.as_deref(), Some(r#"{"index":1}"#));
        assert_eq!(items[0].column_values[1].value, None);
    }

    #[test]
    fn parse_create_item_returns_id() {
        let id = client()
            .parse_create_item(ok_response(r#"{"data":{"create_item":{"id":"101"}}}"#))
            .unwrap();
        assert_eq!(id, "101");
    }

    #[test]
    fn parse_create_update_returns_id() {
        let id = client()
            .parse_create_update(ok_response(r#"{"data":{"create_update":{"id":"5001"}}}"#))
            .unwrap();
        assert_eq!(id, "5001");
    }

    #[test]
    fn non_success_status_is_http_error() {
        let err = client()
            .parse_list_users(HttpResponse {
                status: 401,
                body: r#"{"error_message":"Not authenticated"}"#.to_string(),
            })
            .unwrap_err();
        assert!(matches!(err, ApiError::Http { status: 401, .. }));
    }

    #[test]
    fn graphql_errors_surface_messages() {
        let err = client()
            .parse_create_item(ok_response(
                r#"{"data":null,"errors":[{"message":"group not found"}]}"#,
            ))
            .unwrap_err();
        match err {
            ApiError::Graphql { messages } => assert_eq!(messages, vec!["group not found"]),
            other => panic!("expected Graphql error, got {other:?}"),
        }
    }

    #[test]
    fn malformed_body_is_deserialization_error() {
        let err = client().parse_list_boards(ok_response("not json")).unwrap_err();
        assert!(matches!(err, ApiError::Deserialization(_)));
    }

    #[test]
    fn from_env_requires_token() {
        std::env::remove_var(TOKEN_ENV_VAR);
        assert!(matches!(MondayClient::from_env(), Err(ApiError::Config(_))));

        std::env::set_var(TOKEN_ENV_VAR, "env-token");
        let client = MondayClient::from_env().unwrap();
        let req = client.build_list_users().unwrap();
        assert_eq!(req.url, API_URL);
        assert_eq!(req.headers[0].1, "env-token");
        std::env::remove_var(TOKEN_ENV_VAR);
    }
}
