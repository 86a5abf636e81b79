//! REST client tests against a local wiremock server.

use presale::{PresaleError, PresaleHttpClient};
use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn batch_json() -> serde_json::Value {
    json!({
        "_id": "b9",
        "batchNumber": 9,
        "currentPrice": 1.38,
        "nextPrice": 1.45,
        "tokensSold": 75779,
        "totalTokens": 100000
    })
}

fn user_json(id: &str, name: &str) -> serde_json::Value {
    json!({"_id": id, "name": name, "tokens": 12.5, "shares": 3})
}

#[tokio::test]
async fn test_current_batch_ok() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/batch/current"))
        .respond_with(ResponseTemplate::new(200).set_body_json(batch_json()))
        .mount(&server)
        .await;

    let client = PresaleHttpClient::new(&server.uri());
    let batch = client.get_current_batch().await.unwrap();
    assert_eq!(batch.batch_number, 9);
    assert_eq!(batch.current_price, 1.38);
}

#[tokio::test]
async fn test_current_batch_fractional_tokens_sold() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/batch/current"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "batchNumber": 9,
            "currentPrice": 1.38,
            "nextPrice": 1.45,
            "tokensSold": 76503.637681,
            "totalTokens": 100000
        })))
        .mount(&server)
        .await;

    let client = PresaleHttpClient::new(&server.uri());
    let batch = client.get_current_batch().await.unwrap();
    assert_eq!(batch.batch_number, 9);
    assert_eq!(batch.tokens_sold, 76503.637681);
}

#[tokio::test]
async fn test_current_batch_server_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/batch/current"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let client = PresaleHttpClient::new(&server.uri());
    let err = client.get_current_batch().await.unwrap_err();
    match &err {
        PresaleError::RequestFailed { status, message } => {
            assert_eq!(*status, 500);
            assert_eq!(message, "boom");
        }
        other => panic!("expected RequestFailed, got {other:?}"),
    }
    assert_eq!(err.status(), Some(500));
}

#[tokio::test]
async fn test_not_found_is_request_failed() {
    let server = MockServer::start().await;

    let client = PresaleHttpClient::new(&server.uri());
    let err = client.get_user("missing").await.unwrap_err();
    assert!(matches!(err, PresaleError::RequestFailed { status: 404, .. }));
}

#[tokio::test]
async fn test_malformed_body_is_request_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/batch/current"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let client = PresaleHttpClient::new(&server.uri());
    let err = client.get_current_batch().await.unwrap_err();
    assert!(matches!(err, PresaleError::Request(_)));
}

#[tokio::test]
async fn test_default_user_is_first_admin_user() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/admin/users"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            user_json("u1", "Julio"),
            user_json("u2", "Sarah K."),
        ])))
        .mount(&server)
        .await;

    let client = PresaleHttpClient::new(&server.uri());
    let user = client.get_default_user().await.unwrap();
    assert_eq!(user.id, "u1");
    assert_eq!(user.name, "Julio");
}

#[tokio::test]
async fn test_default_user_empty_list() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/admin/users"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let client = PresaleHttpClient::new(&server.uri());
    let err = client.get_default_user().await.unwrap_err();
    assert!(matches!(err, PresaleError::NoUsers));
}

#[tokio::test]
async fn test_user_endpoints() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/user/default"))
        .respond_with(ResponseTemplate::new(200).set_body_json(user_json("d", "Default")))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/user/u7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(user_json("u7", "Maria R.")))
        .mount(&server)
        .await;

    // Trailing slash on the base URL must not double up.
    let client = PresaleHttpClient::new(&format!("{}/", server.uri()));
    assert_eq!(client.get_default_user_profile().await.unwrap().id, "d");
    assert_eq!(client.get_user("u7").await.unwrap().name, "Maria R.");
}

#[tokio::test]
async fn test_tasks_and_leaderboard() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/tasks"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"_id": "t1", "task": "Follow on Twitter", "reward": 0.25}
        ])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/leaderboard"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"_id": "l1", "position": 1, "userId": {"_id": "u1", "name": "Julio"},
             "coins": 6459.25, "shares": 2874, "__v": 0}
        ])))
        .mount(&server)
        .await;

    let client = PresaleHttpClient::new(&server.uri());
    let tasks = client.get_tasks().await.unwrap();
    assert_eq!(tasks[0].task, "Follow on Twitter");

    let board = client.get_leaderboard().await.unwrap();
    assert_eq!(board.len(), 1);
    assert_eq!(board[0].user.name, "Julio");
}

#[tokio::test]
async fn test_purchase_posts_json_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/tokens/purchase"))
        .and(body_json(json!({"userId": "u1", "amount": 1000.0})))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"success": true, "newBalance": 724.64})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = PresaleHttpClient::new(&server.uri());
    let update = client.purchase_tokens("u1", 1000.0).await.unwrap();
    assert!(update.success);
    assert_eq!(update.new_balance, 724.64);
}

#[tokio::test]
async fn test_complete_task_posts_json_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/tasks/complete"))
        .and(body_json(json!({"userId": "u1", "task": "Follow on Twitter"})))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"success": true, "newBalance": 0.25})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = PresaleHttpClient::new(&server.uri());
    let update = client.complete_task("u1", "Follow on Twitter").await.unwrap();
    assert_eq!(update.new_balance, 0.25);
}

#[tokio::test]
async fn test_complete_task_rejects_placeholder_user_without_request() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/tasks/complete"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let client = PresaleHttpClient::new(&server.uri());
    for user_id in ["", "default-user"] {
        let err = client.complete_task(user_id, "x").await.unwrap_err();
        assert!(matches!(err, PresaleError::Validation(_)));
    }
}

#[tokio::test]
async fn test_mutation_failure_is_request_failed() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/tokens/purchase"))
        .respond_with(ResponseTemplate::new(400).set_body_string("insufficient funds"))
        .mount(&server)
        .await;

    let client = PresaleHttpClient::new(&server.uri());
    let err = client.purchase_tokens("u1", 100.0).await.unwrap_err();
    assert!(matches!(err, PresaleError::RequestFailed { status: 400, .. }));
}
