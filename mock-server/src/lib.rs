//! In-memory emulation of the monday.com GraphQL endpoint.
//!
//! Serves a single `POST /` route that dispatches on the query text, backed
//! by a seeded account (users plus one board with groups, columns of every
//! supported type, and items created at runtime). Requests must carry the
//! expected `Authorization` header; mutations mutate the shared state so
//! integration tests can exercise full create/list/decode round trips.

use std::sync::Arc;

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    routing::post,
    Json, Router,
};
use serde::Deserialize;
use serde_json::{json, Map, Value};
use tokio::{net::TcpListener, sync::RwLock};

/// Token expected in the `Authorization` header of every request.
pub const API_TOKEN: &str = "test-token-123";

/// Id of the seeded board.
pub const BOARD_ID: i64 = 1005;

/// Request body of a GraphQL call.
#[derive(Debug, Deserialize)]
pub struct GraphqlRequest {
    pub query: String,
    #[serde(default)]
    pub variables: Value,
}

#[derive(Debug, Clone)]
pub struct UserSeed {
    pub id: i64,
    pub name: String,
    pub email: String,
}

#[derive(Debug, Clone)]
pub struct GroupSeed {
    pub id: String,
    pub title: String,
}

#[derive(Debug, Clone)]
pub struct ColumnSeed {
    pub id: String,
    pub title: String,
    pub column_type: String,
    pub settings: String,
}

/// An item created through the create-item mutation. `column_values` holds
/// only explicitly set columns, as raw value JSON text keyed by column id.
#[derive(Debug, Clone)]
pub struct MockItem {
    pub id: i64,
    pub group_id: String,
    pub name: String,
    pub column_values: Vec<(String, String)>,
}

#[derive(Debug, Clone)]
pub struct UpdateRecord {
    pub id: i64,
    pub item_id: i64,
    pub body: String,
}

#[derive(Debug)]
pub struct BoardState {
    pub id: i64,
    pub name: String,
    pub groups: Vec<GroupSeed>,
    pub columns: Vec<ColumnSeed>,
    pub items: Vec<MockItem>,
}

#[derive(Debug)]
pub struct AccountState {
    pub users: Vec<UserSeed>,
    pub boards: Vec<BoardState>,
    pub updates: Vec<UpdateRecord>,
    next_item_id: i64,
    next_update_id: i64,
}

impl AccountState {
    /// A small account: three users and one board carrying a column of every
    /// supported type.
    pub fn seed() -> Self {
        let user = |id, name: &str, email: &str| UserSeed {
            id,
            name: name.to_string(),
            email: email.to_string(),
        };
        let group = |id: &str, title: &str| GroupSeed {
            id: id.to_string(),
            title: title.to_string(),
        };
        let column = |id: &str, title: &str, column_type: &str, settings: &str| ColumnSeed {
            id: id.to_string(),
            title: title.to_string(),
            column_type: column_type.to_string(),
            settings: settings.to_string(),
        };

        Self {
            users: vec![
                user(11111111, "Alice Johnson", "alice@example.com"),
                user(22222222, "Bob Chen", "bob@example.com"),
                user(33333333, "Carol Diaz", "carol@example.com"),
            ],
            boards: vec![BoardState {
                id: BOARD_ID,
                name: "Project Tracker".to_string(),
                groups: vec![group("topics", "Topics"), group("group_one", "In Progress")],
                columns: vec![
                    column("name", "Name", "name", "{}"),
                    column("text", "Notes", "text", "{}"),
                    column(
                        "status",
                        "Status",
                        "color",
                        r#"{"labels":{"0":"Working on it","1":"Done","2":"Stuck"},"label_positions_v2":{"0":0,"1":1,"2":2}}"#,
                    ),
                    column("date4", "Due date", "date", "{}"),
                    column("check", "Approved", "boolean", "{}"),
                    column("people", "Owner", "multiple-person", "{}"),
                    column(
                        "dropdown",
                        "Tags",
                        "dropdown",
                        r#"{"labels":[{"id":1,"name":"backend"},{"id":2,"name":"frontend"},{"id":3,"name":"infra"}]}"#,
                    ),
                ],
                items: Vec::new(),
            }],
            updates: Vec::new(),
            next_item_id: 101,
            next_update_id: 5001,
        }
    }
}

pub type Db = Arc<RwLock<AccountState>>;

pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(AccountState::seed()));
    Router::new().route("/", post(graphql)).with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn graphql(
    State(db): State<Db>,
    headers: HeaderMap,
    Json(request): Json<GraphqlRequest>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    let token = headers.get("authorization").and_then(|v| v.to_str().ok());
    if token != Some(API_TOKEN) {
        return Err((
            StatusCode::UNAUTHORIZED,
            Json(json!({"error_message": "Not authenticated"})),
        ));
    }

    // Mutations carry distinctive field names; board-scoped queries all
    // select `boards (ids: $boardId)` and differ only in the inner field.
    let query = request.query.as_str();
    let response = if query.contains("create_item") {
        create_item(&db, &request.variables).await
    } else if query.contains("create_update") {
        create_update(&db, &request.variables).await
    } else if query.contains("groups") {
        list_groups(&db, &request.variables).await
    } else if query.contains("columns") {
        list_columns(&db, &request.variables).await
    } else if query.contains("items") {
        list_items(&db, &request.variables).await
    } else if query.contains("users") {
        list_users(&db).await
    } else if query.contains("boards") {
        list_boards(&db).await
    } else {
        graphql_error("unsupported query")
    };
    Ok(Json(response))
}

fn graphql_error(message: &str) -> Value {
    json!({"data": null, "errors": [{"message": message}]})
}

fn board_ids(variables: &Value) -> Vec<i64> {
    variables["boardId"]
        .as_array()
        .map(|ids| ids.iter().filter_map(Value::as_i64).collect())
        .unwrap_or_default()
}

async fn list_users(db: &Db) -> Value {
    let state = db.read().await;
    let users: Vec<Value> = state
        .users
        .iter()
        .map(|u| json!({"id": u.id, "name": u.name, "email": u.email}))
        .collect();
    json!({"data": {"users": users}})
}

async fn list_boards(db: &Db) -> Value {
    let state = db.read().await;
    let boards: Vec<Value> = state
        .boards
        .iter()
        .map(|b| json!({"id": b.id.to_string(), "name": b.name}))
        .collect();
    json!({"data": {"boards": boards}})
}

async fn list_groups(db: &Db, variables: &Value) -> Value {
    let ids = board_ids(variables);
    let state = db.read().await;
    let boards: Vec<Value> = state
        .boards
        .iter()
        .filter(|b| ids.contains(&b.id))
        .map(|b| {
            let groups: Vec<Value> = b
                .groups
                .iter()
                .map(|g| json!({"id": g.id, "title": g.title}))
                .collect();
            json!({"groups": groups})
        })
        .collect();
    json!({"data": {"boards": boards}})
}

async fn list_columns(db: &Db, variables: &Value) -> Value {
    let ids = board_ids(variables);
    let state = db.read().await;
    let boards: Vec<Value> = state
        .boards
        .iter()
        .filter(|b| ids.contains(&b.id))
        .map(|b| {
            let columns: Vec<Value> = b
                .columns
                .iter()
                .map(|c| {
                    json!({
                        "id": c.id,
                        "title": c.title,
                        "type": c.column_type,
                        "settings_str": c.settings,
                    })
                })
                .collect();
            json!({"columns": columns})
        })
        .collect();
    json!({"data": {"boards": boards}})
}

async fn list_items(db: &Db, variables: &Value) -> Value {
    let ids = board_ids(variables);
    let state = db.read().await;
    let boards: Vec<Value> = state
        .boards
        .iter()
        .filter(|b| ids.contains(&b.id))
        .map(|b| {
            let items: Vec<Value> = b.items.iter().map(|item| item_json(b, item)).collect();
            json!({"items": items})
        })
        .collect();
    json!({"data": {"boards": boards}})
}

/// Render an item the way the API does: one entry per board column with the
/// stored value or `null`, plus any stored values for ids the board no
/// longer knows (the API keeps values of deleted columns around).
fn item_json(board: &BoardState, item: &MockItem) -> Value {
    let stored = |column_id: &str| {
        item.column_values
            .iter()
            .find(|(id, _)| id == column_id)
            .map(|(_, raw)| raw.clone())
    };

    let mut column_values: Vec<Value> = board
        .columns
        .iter()
        .map(|c| json!({"id": c.id, "value": stored(&c.id)}))
        .collect();
    for (id, raw) in &item.column_values {
        if !board.columns.iter().any(|c| &c.id == id) {
            column_values.push(json!({"id": id, "value": raw}));
        }
    }

    json!({
        "id": item.id.to_string(),
        "group": {"id": item.group_id},
        "name": item.name,
        "column_values": column_values,
    })
}

async fn create_item(db: &Db, variables: &Value) -> Value {
    let Some(board_id) = variables["boardId"].as_i64() else {
        return graphql_error("boardId is required");
    };
    let Some(group_id) = variables["groupId"].as_str() else {
        return graphql_error("groupId is required");
    };
    let Some(item_name) = variables["itemName"].as_str() else {
        return graphql_error("itemName is required");
    };
    // The colValues variable is a JSON *string* containing the value map.
    let Some(col_values_raw) = variables["colValues"].as_str() else {
        return graphql_error("colValues is required");
    };
    let Ok(col_values) = serde_json::from_str::<Map<String, Value>>(col_values_raw) else {
        return graphql_error("colValues is not a JSON object");
    };

    let mut state = db.write().await;
    let item_id = state.next_item_id;
    let Some(board) = state.boards.iter_mut().find(|b| b.id == board_id) else {
        return graphql_error("board not found");
    };
    if !board.groups.iter().any(|g| g.id == group_id) {
        return graphql_error("group not found");
    }

    tracing::debug!(board_id, group_id, item_name, "create_item");
    let column_values = col_values
        .into_iter()
        .map(|(id, value)| (id, value.to_string()))
        .collect();
    board.items.push(MockItem {
        id: item_id,
        group_id: group_id.to_string(),
        name: item_name.to_string(),
        column_values,
    });
    state.next_item_id += 1;

    json!({"data": {"create_item": {"id": item_id.to_string()}}})
}

async fn create_update(db: &Db, variables: &Value) -> Value {
    let Some(item_id) = variables["itemId"].as_i64() else {
        return graphql_error("itemId is required");
    };
    let Some(body) = variables["body"].as_str() else {
        return graphql_error("body is required");
    };

    let mut state = db.write().await;
    if !state
        .boards
        .iter()
        .any(|b| b.items.iter().any(|item| item.id == item_id))
    {
        return graphql_error("item not found");
    }

    let update_id = state.next_update_id;
    state.next_update_id += 1;
    state.updates.push(UpdateRecord {
        id: update_id,
        item_id,
        body: body.to_string(),
    });

    json!({"data": {"create_update": {"id": update_id.to_string()}}})
}
