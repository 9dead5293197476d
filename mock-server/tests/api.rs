use axum::http::{self, Request, StatusCode};
use http_body_util::BodyExt;
use mock_server::{app, API_TOKEN, BOARD_ID};
use serde_json::{json, Value};
use tower::ServiceExt;

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn body_bytes(response: axum::response::Response) -> bytes::Bytes {
    response.into_body().collect().await.unwrap().to_bytes()
}

fn graphql_request(query: &str, variables: Value) -> Request<String> {
    let body = json!({"query": query, "variables": variables}).to_string();
    Request::builder()
        .method("POST")
        .uri("/")
        .header(http::header::CONTENT_TYPE, "application/json")
        .header(http::header::AUTHORIZATION, API_TOKEN)
        .body(body)
        .unwrap()
}

fn unauthenticated_request(query: &str) -> Request<String> {
    let body = json!({"query": query, "variables": {}}).to_string();
    Request::builder()
        .method("POST")
        .uri("/")
        .header(http::header::CONTENT_TYPE, "application/json")
        .body(body)
        .unwrap()
}

// --- auth ---

#[tokio::test]
async fn missing_token_is_rejected() {
    let resp = app()
        .oneshot(unauthenticated_request("query { users { id name email } }"))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body = body_bytes(resp).await;
    assert!(!body.is_empty());
}

#[tokio::test]
async fn wrong_token_is_rejected() {
    let body = json!({"query": "query { users { id name email } }", "variables": {}}).to_string();
    let request = Request::builder()
        .method("POST")
        .uri("/")
        .header(http::header::CONTENT_TYPE, "application/json")
        .header(http::header::AUTHORIZATION, "wrong-token")
        .body(body)
        .unwrap();
    let resp = app().oneshot(request).await.unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

// --- queries ---

#[tokio::test]
async fn users_query_returns_seeded_users() {
    let resp = app()
        .oneshot(graphql_request("query { users { id name email } }", json!({})))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    let users = body["data"]["users"].as_array().unwrap();
    assert_eq!(users.len(), 3);
    assert_eq!(users[0]["email"], "alice@example.com");
}

#[tokio::test]
async fn boards_query_returns_seeded_board() {
    let resp = app()
        .oneshot(graphql_request("query { boards { id name } }", json!({})))
        .await
        .unwrap();
    let body = body_json(resp).await;
    let boards = body["data"]["boards"].as_array().unwrap();
    assert_eq!(boards.len(), 1);
    assert_eq!(boards[0]["id"], BOARD_ID.to_string());
    assert_eq!(boards[0]["name"], "Project Tracker");
}

#[tokio::test]
async fn groups_query_selects_board_by_id() {
    let query = "query ($boardId: [Int]) { boards (ids: $boardId) { groups { id title } } }";
    let resp = app()
        .oneshot(graphql_request(query, json!({"boardId": [BOARD_ID]})))
        .await
        .unwrap();
    let body = body_json(resp).await;
    let groups = body["data"]["boards"][0]["groups"].as_array().unwrap();
    assert_eq!(groups.len(), 2);
    assert_eq!(groups[0]["id"], "topics");
}

#[tokio::test]
async fn groups_query_for_unknown_board_returns_empty_boards() {
    let query = "query ($boardId: [Int]) { boards (ids: $boardId) { groups { id title } } }";
    let resp = app()
        .oneshot(graphql_request(query, json!({"boardId": [4242]})))
        .await
        .unwrap();
    let body = body_json(resp).await;
    assert_eq!(body["data"]["boards"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn columns_query_returns_type_tags_and_settings() {
    let query =
        "query ($boardId: [Int]) { boards (ids: $boardId) { columns { id title type settings_str } } }";
    let resp = app()
        .oneshot(graphql_request(query, json!({"boardId": [BOARD_ID]})))
        .await
        .unwrap();
    let body = body_json(resp).await;
    let columns = body["data"]["boards"][0]["columns"].as_array().unwrap();
    assert_eq!(columns.len(), 7);

    let status = columns.iter().find(|c| c["id"] == "status").unwrap();
    assert_eq!(status["type"], "color");
    let settings: Value = serde_json::from_str(status["settings_str"].as_str().unwrap()).unwrap();
    assert_eq!(settings["labels"]["1"], "Done");
}

// --- mutations ---

#[tokio::test]
async fn create_item_then_list_round_trip() {
    use tower::Service;

    let mut app = app().into_service();

    let col_values = json!({
        "text": "have a nice day",
        "status": {"index": 2},
        "check": {"checked": "true"},
    })
    .to_string();
    let mutation = "mutation ($boardId: Int!, $groupId: String!, $itemName: String!, $colValues: JSON!) { create_item (board_id: $boardId, group_id: $groupId, item_name: $itemName, column_values: $colValues) { id } }";
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(graphql_request(
            mutation,
            json!({
                "boardId": BOARD_ID,
                "groupId": "topics",
                "itemName": "First item",
                "colValues": col_values,
            }),
        ))
        .await
        .unwrap();
    let body = body_json(resp).await;
    assert_eq!(body["data"]["create_item"]["id"], "101");

    let query = "query ($boardId: [Int]) { boards (ids: $boardId) { items { id group { id } name column_values { id value } } } }";
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(graphql_request(query, json!({"boardId": [BOARD_ID]})))
        .await
        .unwrap();
    let body = body_json(resp).await;
    let items = body["data"]["boards"][0]["items"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["id"], "101");
    assert_eq!(items[0]["group"]["id"], "topics");
    assert_eq!(items[0]["name"], "First item");

    let values = items[0]["column_values"].as_array().unwrap();
    let status = values.iter().find(|v| v["id"] == "status").unwrap();
    assert_eq!(status["value"], r#"{"index":2}"#);
    let date = values.iter().find(|v| v["id"] == "date4").unwrap();
    assert!(date["value"].is_null());
}

#[tokio::test]
async fn create_item_in_unknown_group_errors() {
    let mutation = "mutation ($boardId: Int!, $groupId: String!, $itemName: String!, $colValues: JSON!) { create_item (board_id: $boardId, group_id: $groupId, item_name: $itemName, column_values: $colValues) { id } }";
    let resp = app()
        .oneshot(graphql_request(
            mutation,
            json!({
                "boardId": BOARD_ID,
                "groupId": "nope",
                "itemName": "Orphan",
                "colValues": "{}",
            }),
        ))
        .await
        .unwrap();
    let body = body_json(resp).await;
    assert_eq!(body["errors"][0]["message"], "group not found");
}

#[tokio::test]
async fn create_update_for_unknown_item_errors() {
    let mutation = "mutation ($itemId: Int!, $body: String!) { create_update (item_id: $itemId, body: $body) { id } }";
    let resp = app()
        .oneshot(graphql_request(mutation, json!({"itemId": 999, "body": "hello"})))
        .await
        .unwrap();
    let body = body_json(resp).await;
    assert_eq!(body["errors"][0]["message"], "item not found");
}

#[tokio::test]
async fn unsupported_query_errors() {
    let resp = app()
        .oneshot(graphql_request("query { tags { id } }", json!({})))
        .await
        .unwrap();
    let body = body_json(resp).await;
    assert_eq!(body["errors"][0]["message"], "unsupported query");
}
