//! End-to-end tests against the HTTP router with the offline client.

use lessonsmith::server::{router, AppState};
use lessonsmith::{LessonStore, LlmClient};
use reqwest::StatusCode;
use serde_json::{json, Value};
use std::sync::Arc;

/// Serve a fresh seeded app on an ephemeral port, returning its base URL
async fn spawn_app() -> String {
    let store = Arc::new(LessonStore::with_examples().unwrap());
    let state = AppState::new(store, Arc::new(LlmClient::offline()));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router(state)).await.unwrap();
    });

    format!("http://{}", addr)
}

#[tokio::test]
async fn test_root_and_health() {
    let base = spawn_app().await;
    let client = reqwest::Client::new();

    let root: Value = client.get(&base).send().await.unwrap().json().await.unwrap();
    assert_eq!(root["message"], "Welcome to Lesson Generator API");

    let health: Value = client
        .get(format!("{base}/api/health"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(health["status"], "ok");
}

#[tokio::test]
async fn test_list_seeded_lessons() {
    let base = spawn_app().await;
    let resp = reqwest::get(format!("{base}/api/lessons")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let lessons: Vec<Value> = resp.json().await.unwrap();
    assert_eq!(lessons.len(), 2);
    assert_eq!(lessons[0]["id"], 1);
    assert_eq!(lessons[0]["topic"], "Introduction to Photosynthesis");
    assert_eq!(lessons[1]["gradeLevel"], "elementary");
}

#[tokio::test]
async fn test_create_lesson_with_quiz() {
    let base = spawn_app().await;
    let client = reqwest::Client::new();

    let resp = client
        .post(format!("{base}/api/lessons"))
        .json(&json!({"topic": "Volcanoes", "gradeLevel": "elementary", "includeQuiz": true}))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);

    let lesson: Value = resp.json().await.unwrap();
    assert_eq!(lesson["id"], 3);
    assert_eq!(lesson["includeQuiz"], true);
    assert!(lesson["content"].as_str().unwrap().contains("Volcanoes"));
    assert!(lesson["readTime"].as_u64().unwrap() >= 1);
    assert_eq!(lesson["quiz"].as_array().unwrap().len(), 3);

    let fetched: Value = client
        .get(format!("{base}/api/lessons/3"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(fetched, lesson);
}

#[tokio::test]
async fn test_create_lesson_invalid() {
    let base = spawn_app().await;
    let resp = reqwest::Client::new()
        .post(format!("{base}/api/lessons"))
        .json(&json!({"topic": "x", "gradeLevel": "elementary"}))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: Value = resp.json().await.unwrap();
    assert!(body["message"].as_str().unwrap().contains("Topic"));
}

#[tokio::test]
async fn test_get_missing_lesson() {
    let base = spawn_app().await;
    let resp = reqwest::get(format!("{base}/api/lessons/999")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["message"], "Lesson with ID 999 not found");
}

#[tokio::test]
async fn test_delete_lesson() {
    let base = spawn_app().await;
    let client = reqwest::Client::new();

    let resp = client.delete(format!("{base}/api/lessons/1")).send().await.unwrap();
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    let resp = client.get(format!("{base}/api/lessons/1")).send().await.unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let resp = client.get(format!("{base}/api/lessons/2")).send().await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = client.delete(format!("{base}/api/lessons/1")).send().await.unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_continue_lesson() {
    let base = spawn_app().await;
    let client = reqwest::Client::new();

    let before: Value = client
        .get(format!("{base}/api/lessons/2"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    // No body at all
    let resp = client
        .post(format!("{base}/api/lessons/2/continue"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let after: Value = resp.json().await.unwrap();

    let old_content = before["content"].as_str().unwrap();
    let new_content = after["content"].as_str().unwrap();
    assert!(new_content.starts_with(old_content));
    assert!(new_content.len() > old_content.len());
    assert_eq!(
        after["readTime"].as_u64().unwrap(),
        before["readTime"].as_u64().unwrap() + 3
    );
    assert_eq!(after["createdAt"], before["createdAt"]);

    // With instructions
    let resp = client
        .post(format!("{base}/api/lessons/2/continue"))
        .json(&json!({"additionalInstructions": "Add a worksheet"}))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_continue_missing_lesson() {
    let base = spawn_app().await;
    let resp = reqwest::Client::new()
        .post(format!("{base}/api/lessons/42/continue"))
        .json(&json!({}))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}
