//! Server API tests

use super::*;
use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use chrono::NaiveDate;
use http_body_util::BodyExt;
use spendcast_core::ai::OllamaBackend;
use spendcast_core::models::{NewSavingsGoal, NewTransaction, TransactionType};
use spendcast_core::prompts::PromptLibrary;
use spendcast_core::test_utils::MockOllamaServer;
use tower::ServiceExt;

fn test_config() -> ServerConfig {
    ServerConfig {
        require_auth: false,
        ..Default::default()
    }
}

fn setup_test_app() -> Router {
    let db = Database::in_memory().unwrap();
    create_router_with_ai(db, None, test_config())
}

async fn get_body_json(response: axum::response::Response) -> serde_json::Value {
    let body = response.into_body();
    let bytes = body.collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn get_as(uri: &str, user: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .header(USER_HEADER, user)
        .body(Body::empty())
        .unwrap()
}

fn send_json(method: &str, uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_string(&body).unwrap()))
        .unwrap()
}

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

fn expense(amount: f64, category: &str, date: NaiveDate) -> NewTransaction {
    NewTransaction {
        name: None,
        transaction_type: TransactionType::Expense,
        amount,
        category: category.to_string(),
        date,
    }
}

// ========== Identity ==========

#[tokio::test]
async fn test_me_local_dev() {
    let app = setup_test_app();

    let response = app.oneshot(get("/api/me")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = get_body_json(response).await;
    assert_eq!(json["email"], "local-dev");
    assert_eq!(json["auth_method"], "none");
    assert!(json["id"].is_number());
}

#[tokio::test]
async fn test_me_with_proxy_header() {
    let app = setup_test_app();

    let response = app
        .oneshot(get_as("/api/me", "ana@example.com"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = get_body_json(response).await;
    assert_eq!(json["email"], "ana@example.com");
    assert_eq!(json["auth_method"], "proxy_header");
}

#[test]
fn test_current_user_follows_auth_method() {
    let state = AppState {
        db: Database::in_memory().unwrap(),
        config: test_config(),
        ai: None,
        projector: ExpenseProjector::new(),
    };

    let mut headers = HeaderMap::new();
    assert_eq!(get_user_email(&headers).1, AuthMethod::None);
    assert_eq!(current_user(&state, &headers).unwrap().email, LOCAL_DEV_USER);

    headers.insert("authorization", HeaderValue::from_static("Bearer secret-key"));
    assert_eq!(get_user_email(&headers).1, AuthMethod::ApiKey);
    assert_eq!(current_user(&state, &headers).unwrap().email, API_KEY_USER);

    headers.insert(USER_HEADER, HeaderValue::from_static("ana@example.com"));
    assert_eq!(get_user_email(&headers).1, AuthMethod::ProxyHeader);
    let user = current_user(&state, &headers).unwrap();
    assert_eq!(user.email, "ana@example.com");
    assert_eq!(current_user(&state, &headers).unwrap().id, user.id);
}

// ========== Authentication ==========

fn auth_app() -> Router {
    let db = Database::in_memory().unwrap();
    let config = ServerConfig {
        require_auth: true,
        api_keys: vec!["secret-key".to_string()],
        ..Default::default()
    };
    create_router_with_ai(db, None, config)
}

#[tokio::test]
async fn test_auth_required() {
    let app = auth_app();

    let response = app.oneshot(get("/api/transactions")).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let json = get_body_json(response).await;
    assert_eq!(json["error"], "Authentication required");
}

#[tokio::test]
async fn test_auth_with_header() {
    let app = auth_app();

    let response = app
        .oneshot(get_as("/api/transactions", "ana@example.com"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_auth_with_api_key() {
    let app = auth_app();

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/me")
                .header("authorization", "Bearer secret-key")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = get_body_json(response).await;
    assert_eq!(json["email"], "api-key");
    assert_eq!(json["auth_method"], "api_key");

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/me")
                .header("authorization", "Bearer wrong-key")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[test]
fn test_validate_api_key() {
    let keys = vec!["abc".to_string(), "longer-key".to_string()];
    assert!(validate_api_key("abc", &keys));
    assert!(validate_api_key("longer-key", &keys));
    assert!(!validate_api_key("abd", &keys));
    assert!(!validate_api_key("ab", &keys));
    assert!(!validate_api_key("abc", &[]));
}

#[test]
fn test_parse_list() {
    assert_eq!(parse_list(" a, b ,,c "), vec!["a", "b", "c"]);
    assert!(parse_list("").is_empty());
}

#[tokio::test]
async fn test_security_headers() {
    let app = setup_test_app();

    let response = app.oneshot(get("/api/me")).await.unwrap();
    let headers = response.headers();
    assert_eq!(headers["x-content-type-options"], "nosniff");
    assert_eq!(headers["x-frame-options"], "DENY");
}

// ========== Transactions ==========

#[tokio::test]
async fn test_create_and_get_transaction() {
    let app = setup_test_app();

    let body = serde_json::json!({
        "name": "Groceries run",
        "type": "expense",
        "amount": 42.5,
        "category": "Food",
        "date": "2026-10-19"
    });
    let response = app
        .clone()
        .oneshot(send_json("POST", "/api/transactions", body))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let created = get_body_json(response).await;
    assert_eq!(created["type"], "expense");
    assert_eq!(created["amount"], 42.5);
    assert_eq!(created["category"], "Food");
    assert_eq!(created["date"], "2026-10-19");
    let id = created["id"].as_i64().unwrap();

    let response = app
        .oneshot(get(&format!("/api/transactions/{}", id)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = get_body_json(response).await;
    assert_eq!(json["name"], "Groceries run");
}

#[tokio::test]
async fn test_create_transaction_validation() {
    let app = setup_test_app();

    let negative = serde_json::json!({
        "type": "expense",
        "amount": -5.0,
        "category": "Food",
        "date": "2026-10-19"
    });
    let response = app
        .clone()
        .oneshot(send_json("POST", "/api/transactions", negative))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = get_body_json(response).await;
    assert!(json["error"].as_str().unwrap().contains("negative"));

    let bad_type = serde_json::json!({
        "type": "transfer",
        "amount": 5.0,
        "category": "Food",
        "date": "2026-10-19"
    });
    let response = app
        .clone()
        .oneshot(send_json("POST", "/api/transactions", bad_type))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/transactions")
                .header("content-type", "application/json")
                .body(Body::from("{not json"))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_list_transactions_filter_and_paging() {
    let db = Database::in_memory().unwrap();
    let user = db.ensure_user(LOCAL_DEV_USER).unwrap();
    for day in 1..=5 {
        db.insert_transaction(user.id, &expense(10.0, "Food", d(2026, 10, day)))
            .unwrap();
    }
    db.insert_transaction(
        user.id,
        &NewTransaction {
            transaction_type: TransactionType::Income,
            ..expense(1000.0, "Salary", d(2026, 10, 6))
        },
    )
    .unwrap();
    let app = create_router_with_ai(db, None, test_config());

    let response = app
        .clone()
        .oneshot(get("/api/transactions?limit=2"))
        .await
        .unwrap();
    let json = get_body_json(response).await;
    assert_eq!(json["total"], 6);
    assert_eq!(json["limit"], 2);
    let txs = json["transactions"].as_array().unwrap();
    assert_eq!(txs.len(), 2);
    assert_eq!(txs[0]["date"], "2026-10-06");

    let response = app
        .clone()
        .oneshot(get("/api/transactions?type=expense&offset=4"))
        .await
        .unwrap();
    let json = get_body_json(response).await;
    assert_eq!(json["total"], 5);
    let txs = json["transactions"].as_array().unwrap();
    assert_eq!(txs.len(), 1);
    assert_eq!(txs[0]["date"], "2026-10-01");

    // Limit is clamped
    let response = app
        .oneshot(get("/api/transactions?limit=999999"))
        .await
        .unwrap();
    let json = get_body_json(response).await;
    assert_eq!(json["limit"], MAX_PAGE_LIMIT);
}

#[tokio::test]
async fn test_update_and_delete_transaction() {
    let db = Database::in_memory().unwrap();
    let user = db.ensure_user(LOCAL_DEV_USER).unwrap();
    let id = db
        .insert_transaction(user.id, &expense(10.0, "Food", d(2026, 10, 1)))
        .unwrap();
    let app = create_router_with_ai(db, None, test_config());

    let body = serde_json::json!({
        "type": "expense",
        "amount": 12.0,
        "category": "Dining",
        "date": "2026-10-02"
    });
    let response = app
        .clone()
        .oneshot(send_json("PUT", &format!("/api/transactions/{}", id), body))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = get_body_json(response).await;
    assert_eq!(json["category"], "Dining");
    assert_eq!(json["amount"], 12.0);

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri(format!("/api/transactions/{}", id))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = get_body_json(response).await;
    assert_eq!(json["success"], true);

    let response = app
        .oneshot(get(&format!("/api/transactions/{}", id)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_transactions_are_scoped_to_user() {
    let db = Database::in_memory().unwrap();
    let ana = db.ensure_user("ana@example.com").unwrap();
    let id = db
        .insert_transaction(ana.id, &expense(10.0, "Food", d(2026, 10, 1)))
        .unwrap();
    let app = create_router_with_ai(db, None, test_config());

    let response = app
        .clone()
        .oneshot(get_as(&format!("/api/transactions/{}", id), "bo@example.com"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = app
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri(format!("/api/transactions/{}", id))
                .header(USER_HEADER, "bo@example.com")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ========== Savings goals ==========

#[tokio::test]
async fn test_savings_goal_crud() {
    let app = setup_test_app();

    let body = serde_json::json!({
        "name": "New bike",
        "target_amount": 500.0,
        "current_amount": 120.0,
        "target_date": "2026-11-15"
    });
    let response = app
        .clone()
        .oneshot(send_json("POST", "/api/savings-goals", body))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let created = get_body_json(response).await;
    let id = created["id"].as_i64().unwrap();
    assert_eq!(created["name"], "New bike");

    let body = serde_json::json!({
        "name": "New bike",
        "target_amount": 500.0,
        "current_amount": 200.0,
        "target_date": "2026-11-15"
    });
    let response = app
        .clone()
        .oneshot(send_json("PUT", &format!("/api/savings-goals/{}", id), body))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = get_body_json(response).await;
    assert_eq!(json["current_amount"], 200.0);

    let response = app.clone().oneshot(get("/api/savings-goals")).await.unwrap();
    let json = get_body_json(response).await;
    assert_eq!(json.as_array().unwrap().len(), 1);

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri(format!("/api/savings-goals/{}", id))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .oneshot(get(&format!("/api/savings-goals/{}", id)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_savings_goal_name_too_long() {
    let app = setup_test_app();

    let body = serde_json::json!({
        "name": "A goal name that is far too long to store",
        "target_amount": 500.0,
        "target_date": "2026-11-15"
    });
    let response = app
        .oneshot(send_json("POST", "/api/savings-goals", body))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ========== Expense predictions ==========

#[tokio::test]
async fn test_expense_predictions_empty() {
    let app = setup_test_app();

    let response = app
        .oneshot(get("/api/expense-predictions?today=2026-10-19"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = get_body_json(response).await;
    assert_eq!(json["this_week_expense"].as_array().unwrap().len(), 0);
    assert_eq!(json["this_month_expense"].as_array().unwrap().len(), 0);
    assert_eq!(json["this_year_expense"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_expense_predictions_with_history() {
    let db = Database::in_memory().unwrap();
    let user = db.ensure_user(LOCAL_DEV_USER).unwrap();
    for day in 1..=19 {
        db.insert_transaction(user.id, &expense(10.0, "Food", d(2026, 10, day)))
            .unwrap();
    }
    // Income never counts towards expenses
    db.insert_transaction(
        user.id,
        &NewTransaction {
            transaction_type: TransactionType::Income,
            ..expense(5000.0, "Salary", d(2026, 10, 10))
        },
    )
    .unwrap();
    let app = create_router_with_ai(db, None, test_config());

    let response = app
        .oneshot(get("/api/expense-predictions?today=2026-10-19"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = get_body_json(response).await;

    let week = json["this_week_expense"].as_array().unwrap();
    assert_eq!(week.len(), 7);
    assert_eq!(week[0]["date"], "2026-10-19");
    assert_eq!(week[0]["accumulated_expense"], 10.0);

    let month = json["this_month_expense"].as_array().unwrap();
    assert_eq!(month.len(), 31);
    assert_eq!(month[18]["accumulated_expense"], 190.0);

    let year = json["this_year_expense"].as_array().unwrap();
    assert_eq!(year.len(), 12);
    assert_eq!(year[0]["month"], 1);
    assert_eq!(year[8]["accumulated_expense"], 0.0);
}

#[tokio::test]
async fn test_expense_predictions_bad_date() {
    let app = setup_test_app();

    let response = app
        .oneshot(get("/api/expense-predictions?today=19-10-2026"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ========== AI suggestions ==========

#[tokio::test]
async fn test_ai_suggestions_without_backend() {
    let app = setup_test_app();

    let response = app.oneshot(get("/api/ai-suggestions")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = get_body_json(response).await;
    assert_eq!(json["suggestions"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_ai_suggestions_with_mock_backend() {
    let db = Database::in_memory().unwrap();
    let app = create_router_with_ai(db, Some(AIClient::mock()), test_config());

    let response = app
        .oneshot(get("/api/ai-suggestions?today=2026-10-19"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = get_body_json(response).await;
    assert_eq!(json["suggestions"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_ai_suggestions_through_ollama() {
    let server = MockOllamaServer::start().await;
    let db = Database::in_memory().unwrap();
    let user = db.ensure_user(LOCAL_DEV_USER).unwrap();
    db.insert_transaction(user.id, &expense(80.0, "Dining", d(2026, 10, 3)))
        .unwrap();
    db.insert_savings_goal(
        user.id,
        &NewSavingsGoal {
            name: "Trip".to_string(),
            target_amount: 600.0,
            current_amount: 100.0,
            target_date: d(2026, 11, 1),
        },
    )
    .unwrap();

    let ai = AIClient::Ollama(
        OllamaBackend::new(&server.url(), "llama3.2").with_prompts(PromptLibrary::embedded_only()),
    );
    let app = create_router_with_ai(db, Some(ai), test_config());

    let response = app
        .oneshot(get("/api/ai-suggestions?today=2026-10-19"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = get_body_json(response).await;
    assert_eq!(json["suggestions"].as_array().unwrap().len(), 3);

    let requests = server.requests();
    assert_eq!(requests.len(), 1);
    assert!(requests[0].prompt.contains("Dining ($80.00)"));
    assert!(requests[0].prompt.contains("- Trip: 13 days left to save $500.00"));
}

#[tokio::test]
async fn test_ai_suggestions_backend_failure_is_empty() {
    let server = MockOllamaServer::start_with_reply("not json at all").await;
    let db = Database::in_memory().unwrap();
    let ai = AIClient::ollama(&server.url(), "llama3.2");
    let app = create_router_with_ai(db, Some(ai), test_config());

    let response = app.oneshot(get("/api/ai-suggestions")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = get_body_json(response).await;
    assert!(json["suggestions"].as_array().unwrap().is_empty());
}

// ========== Audit log ==========

#[tokio::test]
async fn test_requests_are_audited() {
    let app = setup_test_app();

    app.clone()
        .oneshot(get_as("/api/transactions", "ana@example.com"))
        .await
        .unwrap();
    app.clone()
        .oneshot(get_as("/api/expense-predictions", "ana@example.com"))
        .await
        .unwrap();

    let response = app.oneshot(get("/api/audit?limit=10")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let entries = get_body_json(response).await;
    let entries = entries.as_array().unwrap();
    assert_eq!(entries.len(), 2);
    assert!(entries
        .iter()
        .all(|e| e["user_email"] == "ana@example.com"));
    let actions: Vec<&str> = entries
        .iter()
        .map(|e| e["action"].as_str().unwrap())
        .collect();
    assert!(actions.contains(&"list"));
    assert!(actions.contains(&"predict"));
}
