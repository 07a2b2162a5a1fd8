//! End-to-end tests for the question resolution pipeline.
//!
//! A mock Gemini endpoint plays scripted replies; the real HTTP provider,
//! retry loop and keyword fallback run against it.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::post;
use axum::{Json, Router};
use carcare_agent::{AnswerSource, FallbackReason, RemoteAnswerClient, RetryPolicy};
use carcare_core::message::{ChatSession, Speaker};
use carcare_knowledge::{FallbackMatcher, Topic};
use carcare_providers::GeminiProvider;

// ── Mock endpoint ────────────────────────────────────────────────────────

#[derive(Clone, Default)]
struct Script {
    replies: Arc<Mutex<VecDeque<(StatusCode, String)>>>,
    requests: Arc<Mutex<Vec<serde_json::Value>>>,
}

impl Script {
    fn new(replies: Vec<(StatusCode, &str)>) -> Self {
        Self {
            replies: Arc::new(Mutex::new(
                replies.into_iter().map(|(s, b)| (s, b.to_string())).collect(),
            )),
            requests: Arc::default(),
        }
    }

    fn calls(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

async fn generate(
    State(script): State<Script>,
    Json(body): Json<serde_json::Value>,
) -> (StatusCode, String) {
    script.requests.lock().unwrap().push(body);
    script
        .replies
        .lock()
        .unwrap()
        .pop_front()
        .unwrap_or((StatusCode::INTERNAL_SERVER_ERROR, "script exhausted".into()))
}

async fn spawn(script: Script) -> String {
    let app = Router::new()
        .route("/v1beta/models/{model}", post(generate))
        .with_state(script);
    let listener = tokio::net::TcpListener::bind(("127.0.0.1", 0)).await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}/v1beta")
}

fn answer_body(text: &str) -> String {
    serde_json::json!({
        "candidates": [{ "content": { "role": "model", "parts": [{ "text": text }] } }],
        "usageMetadata": { "promptTokenCount": 120, "candidatesTokenCount": 18, "totalTokenCount": 138 }
    })
    .to_string()
}

fn fast_policy(max_retries: u32) -> RetryPolicy {
    RetryPolicy {
        max_retries,
        retry_delay: Duration::from_millis(20),
        request_timeout: Duration::from_secs(5),
    }
}

async fn client_for(script: &Script, max_retries: u32) -> RemoteAnswerClient {
    let base = spawn(script.clone()).await;
    let provider = GeminiProvider::new(base, "gemini-1.5-pro", "test-key").unwrap();
    RemoteAnswerClient::new(Arc::new(provider), FallbackMatcher::builtin())
        .with_policy(fast_policy(max_retries))
}

// ── Tests ────────────────────────────────────────────────────────────────

#[tokio::test]
async fn model_answer_is_returned_verbatim() {
    let script = Script::new(vec![(StatusCode::OK, &answer_body("We open at 10 AM."))]);
    let client = client_for(&script, 3).await;

    let resolution = client.resolve_detailed("When do you open?").await;

    assert_eq!(resolution.answer, "We open at 10 AM.");
    assert_eq!(resolution.source, AnswerSource::Remote { attempts: 1 });
    assert_eq!(script.calls(), 1);
}

#[tokio::test]
async fn request_carries_seeded_conversation() {
    let script = Script::new(vec![(StatusCode::OK, &answer_body("ok"))]);
    let client = client_for(&script, 3).await;

    client.resolve("Do you do ceramic coating?").await;

    let requests = script.requests.lock().unwrap();
    let contents = requests[0]["contents"].as_array().unwrap();
    assert_eq!(contents.len(), 3);
    assert_eq!(contents[0]["role"], "user");
    assert_eq!(contents[1]["role"], "model");
    assert_eq!(contents[2]["parts"][0]["text"], "Do you do ceramic coating?");
    assert_eq!(requests[0]["generationConfig"]["maxOutputTokens"], 250);
}

#[tokio::test]
async fn transient_failures_are_retried_until_success() {
    let script = Script::new(vec![
        (StatusCode::SERVICE_UNAVAILABLE, "busy"),
        (StatusCode::INTERNAL_SERVER_ERROR, "oops"),
        (StatusCode::OK, &answer_body("Third time lucky.")),
    ]);
    let client = client_for(&script, 3).await;

    let resolution = client.resolve_detailed("hello").await;

    assert_eq!(resolution.answer, "Third time lucky.");
    assert_eq!(resolution.attempts(), 3);
    assert_eq!(script.calls(), 3);
}

#[tokio::test]
async fn exhausted_retries_fall_back_to_keyword_answer() {
    let script = Script::new(vec![
        (StatusCode::INTERNAL_SERVER_ERROR, "down"),
        (StatusCode::INTERNAL_SERVER_ERROR, "down"),
        (StatusCode::INTERNAL_SERVER_ERROR, "down"),
    ]);
    let client = client_for(&script, 3).await;

    let resolution = client.resolve_detailed("What are your hours?").await;

    assert_eq!(resolution.answer, "5K Car Care is Open 365 days, 10 AM to 7 PM.");
    assert_eq!(
        resolution.source,
        AnswerSource::Fallback {
            reason: FallbackReason::Exhausted,
            attempts: 3,
            topic: Topic::Hours,
        }
    );
    assert_eq!(script.calls(), 3);
}

#[tokio::test]
async fn empty_candidates_fall_back_without_retrying() {
    let script = Script::new(vec![
        (StatusCode::OK, r#"{"candidates":[]}"#),
        (StatusCode::OK, &answer_body("never reached")),
    ]);
    let client = client_for(&script, 3).await;

    let resolution = client.resolve_detailed("How do I book a car wash?").await;

    assert!(matches!(
        resolution.source,
        AnswerSource::Fallback { reason: FallbackReason::Malformed, attempts: 1, .. }
    ));
    assert!(resolution.answer.starts_with("5K Car Care offers the following car wash services"));
    assert_eq!(script.calls(), 1);
}

#[tokio::test]
async fn unknown_question_gets_apology_with_phone() {
    let script = Script::new(vec![(StatusCode::BAD_GATEWAY, "nope")]);
    let client = client_for(&script, 1).await;

    let answer = client.resolve("Tell me a joke").await;

    assert!(answer.starts_with("I apologize"));
    assert!(answer.contains("+91 91500 78405"));
}

#[tokio::test]
async fn unreachable_endpoint_still_answers() {
    // Bind then drop to get a port nobody listens on.
    let listener = tokio::net::TcpListener::bind(("127.0.0.1", 0)).await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let provider =
        GeminiProvider::new(format!("http://{addr}/v1beta"), "gemini-1.5-pro", "k").unwrap();
    let client = RemoteAnswerClient::new(Arc::new(provider), FallbackMatcher::builtin())
        .with_policy(fast_policy(2));

    let resolution = client.resolve_detailed("contact email?").await;

    assert!(!resolution.is_remote());
    assert_eq!(resolution.attempts(), 2);
    assert!(resolution.answer.contains("5kcc.bangaloreec@gmail.com"));
}

#[tokio::test]
async fn chat_session_records_each_exchange() {
    let script = Script::new(vec![
        (StatusCode::OK, &answer_body("Hi! How can I help?")),
        (StatusCode::INTERNAL_SERVER_ERROR, "down"),
    ]);
    let client = client_for(&script, 1).await;

    let mut session = ChatSession::new();
    for question in ["hello", "what services do you offer?"] {
        let answer = client.resolve(question).await;
        session = session.with_exchange(question, answer);
    }

    assert_eq!(session.exchanges(), 2);
    assert_eq!(session.messages.len(), 4);
    assert_eq!(session.messages[1].speaker, Speaker::Assistant);
    assert_eq!(session.messages[1].content, "Hi! How can I help?");
    assert!(
        session
            .last_answer()
            .unwrap()
            .starts_with("5K Car Care offers a range of services including")
    );
}

#[tokio::test]
async fn missing_key_answers_offline_without_calling_out() {
    let script = Script::new(vec![(StatusCode::OK, &answer_body("never reached"))]);
    let base = spawn(script.clone()).await;
    let provider = GeminiProvider::new(base, "gemini-1.5-pro", "").unwrap();
    let client = RemoteAnswerClient::new(Arc::new(provider), FallbackMatcher::builtin())
        .with_policy(fast_policy(3));

    let resolution = client.resolve_detailed("What are your hours?").await;

    assert_eq!(
        resolution.source,
        AnswerSource::Fallback {
            reason: FallbackReason::NotConfigured,
            attempts: 1,
            topic: Topic::Hours,
        }
    );
    assert_eq!(script.calls(), 0);
}
