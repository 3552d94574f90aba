//! Integration tests for the webhook router.

mod common;

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use common::{build_bot, setup_db, test_config, FakeTransport, CHAT_ID, MEMBER_ID};
use post_directory_bot::config::Config;
use post_directory_bot::db::{Post, PostType};
use post_directory_bot::directory::PostDirectory;
use post_directory_bot::web::{create_app, AppState, SECRET_TOKEN_HEADER};
use serde_json::json;
use tower::ServiceExt;

fn update_request(path: &str, body: &serde_json::Value, secret: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(path)
        .header("content-type", "application/json");
    if let Some(secret) = secret {
        builder = builder.header(SECRET_TOKEN_HEADER, secret);
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

fn tagged_chat_message(message_id: i64, text: &str) -> serde_json::Value {
    json!({
        "update_id": 100,
        "message": {
            "message_id": message_id,
            "date": 1_700_000_000,
            "chat": {"id": CHAT_ID, "type": "supergroup", "title": "Alumni"},
            "from": {"id": MEMBER_ID, "is_bot": false, "first_name": "A"},
            "text": text
        }
    })
}

#[tokio::test]
async fn test_webhook_indexes_chat_message() {
    let (db, _temp_dir) = setup_db().await;
    let transport = Arc::new(FakeTransport::default());
    let app = create_app(AppState {
        bot: build_bot(test_config(), &db, &transport),
    });

    let response = app
        .oneshot(update_request(
            "/",
            &tagged_chat_message(42, "#contacts"),
            None,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        db.get(42).await.unwrap(),
        Some(Post::navigation(42, PostType::Contacts))
    );
}

#[tokio::test]
async fn test_webhook_acknowledges_failed_updates() {
    let (db, _temp_dir) = setup_db().await;
    db.put(&Post::navigation(10, PostType::Chats)).await.unwrap();
    let transport = Arc::new(FakeTransport::with_member(MEMBER_ID));
    *transport.unavailable.lock().unwrap() = true;
    let app = create_app(AppState {
        bot: build_bot(test_config(), &db, &transport),
    });

    let body = json!({
        "update_id": 101,
        "message": {
            "message_id": 5,
            "chat": {"id": MEMBER_ID, "type": "private"},
            "from": {"id": MEMBER_ID, "is_bot": false},
            "text": "/chats"
        }
    });
    let response = app
        .oneshot(update_request("/", &body, None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(db.get(10).await.unwrap().is_some());
}

#[tokio::test]
async fn test_webhook_secret_token() {
    let (db, _temp_dir) = setup_db().await;
    let transport = Arc::new(FakeTransport::default());
    let config = Config {
        webhook_path: "/telegram".to_string(),
        webhook_secret: Some("s3cret".to_string()),
        ..test_config()
    };
    let app = create_app(AppState {
        bot: build_bot(config, &db, &transport),
    });

    let rejected = app
        .clone()
        .oneshot(update_request(
            "/telegram",
            &tagged_chat_message(1, "#chats"),
            Some("wrong"),
        ))
        .await
        .unwrap();
    assert_eq!(rejected.status(), StatusCode::UNAUTHORIZED);

    let missing = app
        .clone()
        .oneshot(update_request(
            "/telegram",
            &tagged_chat_message(1, "#chats"),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(missing.status(), StatusCode::UNAUTHORIZED);
    assert!(db.read_all().await.unwrap().is_empty());

    let accepted = app
        .oneshot(update_request(
            "/telegram",
            &tagged_chat_message(1, "#chats"),
            Some("s3cret"),
        ))
        .await
        .unwrap();
    assert_eq!(accepted.status(), StatusCode::OK);
    assert_eq!(db.read_all().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_webhook_checks_secret_before_body() {
    let (db, _temp_dir) = setup_db().await;
    let transport = Arc::new(FakeTransport::default());
    let config = Config {
        webhook_secret: Some("s3cret".to_string()),
        ..test_config()
    };
    let app = create_app(AppState {
        bot: build_bot(config, &db, &transport),
    });

    let garbage = |secret: Option<&str>| {
        let mut builder = Request::builder().method("POST").uri("/");
        if let Some(secret) = secret {
            builder = builder.header(SECRET_TOKEN_HEADER, secret);
        }
        builder.body(Body::from("not json")).unwrap()
    };

    let unauthenticated = app.clone().oneshot(garbage(None)).await.unwrap();
    assert_eq!(unauthenticated.status(), StatusCode::UNAUTHORIZED);

    let wrong = app.clone().oneshot(garbage(Some("wrong"))).await.unwrap();
    assert_eq!(wrong.status(), StatusCode::UNAUTHORIZED);

    let malformed = app.oneshot(garbage(Some("s3cret"))).await.unwrap();
    assert_eq!(malformed.status(), StatusCode::BAD_REQUEST);
    assert!(db.read_all().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_health() {
    let (db, _temp_dir) = setup_db().await;
    let transport = Arc::new(FakeTransport::default());
    let app = create_app(AppState {
        bot: build_bot(test_config(), &db, &transport),
    });

    let response = app
        .oneshot(
            Request::builder()
                .uri("/healthz")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}
