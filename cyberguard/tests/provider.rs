use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    routing::post,
    Json, Router,
};
use cyberguard::assistant::provider::{ChatCompletionClient, ChatProvider, Message};
use cyberguard::RetrievalError;
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};

#[derive(Clone)]
struct Stub {
    status: StatusCode,
    reply: Value,
    seen: Arc<Mutex<Vec<(Option<String>, Value)>>>,
}

async fn chat(
    State(stub): State<Stub>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    let auth = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    stub.seen.lock().unwrap().push((auth, body));
    (stub.status, Json(stub.reply.clone()))
}

async fn spawn_stub(status: StatusCode, reply: Value) -> (String, Arc<Mutex<Vec<(Option<String>, Value)>>>) {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let stub = Stub {
        status,
        reply,
        seen: seen.clone(),
    };
    let app = Router::new()
        .route("/chat/completions", post(chat))
        .with_state(stub);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{}", addr), seen)
}

fn client_for(name: &str, base_url: String, api_key: &str, model: &str) -> ChatCompletionClient {
    let http = reqwest::Client::builder().no_proxy().build().unwrap();
    ChatCompletionClient::new(name, base_url, api_key, model).with_client(http)
}

fn messages() -> Vec<Message> {
    vec![Message::system("persona"), Message::user("question")]
}

#[tokio::test]
async fn test_complete_returns_first_choice_text() {
    let (base_url, seen) = spawn_stub(
        StatusCode::OK,
        json!({
            "choices": [
                {"message": {"role": "assistant", "content": "Summary.\nSources:\n1. https://a.example"}},
                {"message": {"role": "assistant", "content": "ignored"}}
            ]
        }),
    )
    .await;

    let client = client_for("Perplexity", base_url, "pplx-secret", "sonar-pro");
    let text = client.complete(&messages()).await.unwrap();
    assert_eq!(text, "Summary.\nSources:\n1. https://a.example");

    let seen = seen.lock().unwrap();
    assert_eq!(seen.len(), 1);
    let (auth, body) = &seen[0];
    assert_eq!(auth.as_deref(), Some("Bearer pplx-secret"));
    assert_eq!(
        body,
        &json!({
            "model": "sonar-pro",
            "messages": [
                {"role": "system", "content": "persona"},
                {"role": "user", "content": "question"}
            ]
        })
    );
}

#[tokio::test]
async fn test_non_success_status_is_api_error() {
    let (base_url, _) = spawn_stub(
        StatusCode::UNAUTHORIZED,
        json!({"error": {"message": "invalid api key"}}),
    )
    .await;

    let client = client_for("OpenAI", base_url, "bad", "gpt-4.1-mini");
    let err = client.complete(&messages()).await.unwrap_err();

    match err {
        RetrievalError::Api { provider, status, body } => {
            assert_eq!(provider, "OpenAI");
            assert_eq!(status, 401);
            assert!(body.contains("invalid api key"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_empty_choices_is_empty_response() {
    let (base_url, _) = spawn_stub(StatusCode::OK, json!({"choices": []})).await;

    let client = client_for("OpenAI", base_url, "k", "gpt-4.1-mini");
    let err = client.complete(&messages()).await.unwrap_err();
    assert!(matches!(err, RetrievalError::EmptyResponse { .. }));
}

#[tokio::test]
async fn test_wrong_shape_is_malformed_response() {
    let (base_url, _) = spawn_stub(StatusCode::OK, json!({"choices": "nope"})).await;

    let client = client_for("Perplexity", base_url, "k", "sonar-pro");
    let err = client.complete(&messages()).await.unwrap_err();
    assert!(matches!(err, RetrievalError::MalformedResponse { .. }));
}

#[tokio::test]
async fn test_unreachable_endpoint_is_http_error() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = client_for("Perplexity", format!("http://{}", addr), "k", "sonar-pro");
    let err = client.complete(&messages()).await.unwrap_err();
    assert!(matches!(err, RetrievalError::Http(_)));
}
