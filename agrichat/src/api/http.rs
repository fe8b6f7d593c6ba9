//! HTTP implementation of [`ChatBackend`] on top of `reqwest`.

use std::time::Duration;

use reqwest::{Client, Response};
use serde::de::DeserializeOwned;

use super::wire::{
    AskRequest, AskResponse, DeleteChatResponse, HistoryResponse, NewChatResponse,
    SessionRequest, SessionsResponse,
};
use super::{ApiError, AskReply, ChatBackend};
use crate::models::Message;

/// Longest slice of an unexpected body kept in a [`ApiError::Status`].
const BODY_SNIPPET_CHARS: usize = 200;

/// Chat backend reached over HTTP at a base URL.
#[derive(Debug, Clone)]
pub struct HttpBackend {
    client: Client,
    base_url: String,
}

impl HttpBackend {
    /// Create a backend client. `timeout` bounds each whole request; `None`
    /// lets requests wait indefinitely.
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self, ApiError> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Base URL all endpoints are resolved against.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }
}

/// Parse a response body as JSON regardless of status.
///
/// The backend reports failures as `{"error": ...}` with 4xx/5xx statuses,
/// so the status only matters when the body is not JSON.
async fn read_json<T: DeserializeOwned>(resp: Response) -> Result<T, ApiError> {
    let status = resp.status();
    let body = resp.text().await?;

    match serde_json::from_str(&body) {
        Ok(value) => Ok(value),
        Err(_) if !status.is_success() => Err(ApiError::Status {
            status: status.as_u16(),
            body: body.chars().take(BODY_SNIPPET_CHARS).collect(),
        }),
        Err(e) => Err(ApiError::Decode(e)),
    }
}

impl ChatBackend for HttpBackend {
    async fn ask(&self, question: &str, session_id: &str) -> Result<AskReply, ApiError> {
        let resp = self
            .client
            .post(self.url("/ask"))
            .json(&AskRequest {
                question,
                session_id,
            })
            .send()
            .await?;

        let reply: AskResponse = read_json(resp).await?;
        match reply {
            AskResponse {
                error: Some(error), ..
            } if !error.is_empty() => Ok(AskReply::Refused(error)),
            AskResponse {
                answer: Some(answer),
                ..
            } => Ok(AskReply::Answer(answer)),
            _ => Err(ApiError::MissingField("answer")),
        }
    }

    async fn new_chat(&self) -> Result<String, ApiError> {
        let resp = self.client.post(self.url("/new_chat")).send().await?;
        let created: NewChatResponse = read_json(resp).await?;
        created.session_id.ok_or(ApiError::MissingField("session_id"))
    }

    async fn delete_chat(&self, session_id: &str) -> Result<bool, ApiError> {
        let resp = self
            .client
            .post(self.url("/delete_chat"))
            .json(&SessionRequest { session_id })
            .send()
            .await?;

        let deleted: DeleteChatResponse = read_json(resp).await?;
        Ok(deleted.success)
    }

    async fn history(&self, session_id: &str) -> Result<Vec<Message>, ApiError> {
        let resp = self
            .client
            .post(self.url("/get_history"))
            .json(&SessionRequest { session_id })
            .send()
            .await?;

        let history: HistoryResponse = read_json(resp).await?;
        Ok(history.history.into_iter().map(Message::from).collect())
    }

    async fn sessions(&self) -> Result<Vec<String>, ApiError> {
        let resp = self.client.get(self.url("/get_all_sessions")).send().await?;
        let listed: SessionsResponse = read_json(resp).await?;
        Ok(listed.sessions)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use axum::{
        extract::State,
        http::StatusCode,
        response::IntoResponse,
        routing::{get, post},
        Json, Router,
    };
    use serde_json::{json, Value};

    use super::*;
    use crate::models::MessageRole;

    /// In-memory stand-in for the chat backend, keeping sessions in creation order.
    #[derive(Clone, Default)]
    struct MockServer {
        sessions: Arc<Mutex<Vec<(String, Vec<(String, String)>)>>>,
        created: Arc<Mutex<usize>>,
    }

    async fn mock_ask(State(server): State<MockServer>, Json(req): Json<Value>) -> impl IntoResponse {
        let question = req["question"].as_str().unwrap_or_default().to_string();
        let session_id = req["session_id"].as_str().unwrap_or_default().to_string();
        if question.is_empty() {
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({"error": "No question provided"})),
            );
        }

        let answer = format!("About {question}");
        let mut sessions = server.sessions.lock().unwrap();
        if !sessions.iter().any(|(id, _)| *id == session_id) {
            sessions.push((session_id.clone(), Vec::new()));
        }
        let (_, turns) = sessions
            .iter_mut()
            .find(|(id, _)| *id == session_id)
            .unwrap();
        turns.push(("user".to_string(), question));
        turns.push(("assistant".to_string(), answer.clone()));

        (
            StatusCode::OK,
            Json(json!({"answer": answer, "session_id": session_id})),
        )
    }

    async fn mock_new_chat(State(server): State<MockServer>) -> Json<Value> {
        let mut created = server.created.lock().unwrap();
        *created += 1;
        Json(json!({"success": true, "session_id": format!("s-{created}")}))
    }

    async fn mock_delete(State(server): State<MockServer>, Json(req): Json<Value>) -> Json<Value> {
        let session_id = req["session_id"].as_str().unwrap_or_default();
        server
            .sessions
            .lock()
            .unwrap()
            .retain(|(id, _)| id != session_id);
        Json(json!({"success": true, "message": "Conversation deleted"}))
    }

    async fn mock_history(State(server): State<MockServer>, Json(req): Json<Value>) -> Json<Value> {
        let session_id = req["session_id"].as_str().unwrap_or_default();
        let sessions = server.sessions.lock().unwrap();
        let history: Vec<Value> = sessions
            .iter()
            .find(|(id, _)| id == session_id)
            .map(|(_, turns)| {
                turns
                    .iter()
                    .map(|(role, content)| json!({"role": role, "content": content}))
                    .collect()
            })
            .unwrap_or_default();
        Json(json!({ "history": history }))
    }

    async fn mock_sessions(State(server): State<MockServer>) -> Json<Value> {
        let sessions = server.sessions.lock().unwrap();
        let ids: Vec<&str> = sessions.iter().map(|(id, _)| id.as_str()).collect();
        Json(json!({ "sessions": ids }))
    }

    fn mock_router() -> Router {
        Router::new()
            .route("/ask", post(mock_ask))
            .route("/new_chat", post(mock_new_chat))
            .route("/delete_chat", post(mock_delete))
            .route("/get_history", post(mock_history))
            .route("/get_all_sessions", get(mock_sessions))
            .with_state(MockServer::default())
    }

    async fn serve(app: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{addr}")
    }

    #[tokio::test]
    async fn test_session_lifecycle() {
        let base = serve(mock_router()).await;
        let backend = HttpBackend::new(&base, None).unwrap();

        let id = backend.new_chat().await.unwrap();
        assert_eq!(id, "s-1");
        assert!(backend.sessions().await.unwrap().is_empty());

        let reply = backend.ask("blight?", &id).await.unwrap();
        assert_eq!(reply, AskReply::Answer("About blight?".to_string()));

        let history = backend.history(&id).await.unwrap();
        assert_eq!(
            history,
            vec![
                Message::new(MessageRole::User, "blight?"),
                Message::new(MessageRole::Bot, "About blight?"),
            ]
        );
        assert_eq!(backend.sessions().await.unwrap(), vec![id.clone()]);

        assert!(backend.delete_chat(&id).await.unwrap());
        assert!(backend.sessions().await.unwrap().is_empty());
        assert!(backend.history(&id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_trailing_slash_in_base_url() {
        let base = serve(mock_router()).await;
        let backend = HttpBackend::new(&format!("{base}/"), None).unwrap();
        assert_eq!(backend.base_url(), base);
        assert_eq!(backend.new_chat().await.unwrap(), "s-1");
    }

    #[tokio::test]
    async fn test_error_body_is_a_refusal() {
        let app = Router::new().route(
            "/ask",
            post(|| async {
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({"error": "model unavailable"})),
                )
            }),
        );
        let backend = HttpBackend::new(&serve(app).await, None).unwrap();

        let reply = backend.ask("blight?", "s-1").await.unwrap();
        assert_eq!(reply, AskReply::Refused("model unavailable".to_string()));
    }

    #[tokio::test]
    async fn test_non_json_error_status() {
        let app = Router::new().route(
            "/get_all_sessions",
            get(|| async { (StatusCode::BAD_GATEWAY, "upstream down") }),
        );
        let backend = HttpBackend::new(&serve(app).await, None).unwrap();

        let err = backend.sessions().await.unwrap_err();
        assert!(matches!(err, ApiError::Status { status: 502, .. }));
        assert_eq!(err.to_string(), "server returned 502: upstream down");
    }

    #[tokio::test]
    async fn test_non_json_success_is_decode_error() {
        let app = Router::new().route("/get_history", post(|| async { "<html>" }));
        let backend = HttpBackend::new(&serve(app).await, None).unwrap();

        let err = backend.history("s-1").await.unwrap_err();
        assert!(matches!(err, ApiError::Decode(_)));
    }

    #[tokio::test]
    async fn test_new_chat_without_id() {
        let app = Router::new().route("/new_chat", post(|| async { Json(json!({})) }));
        let backend = HttpBackend::new(&serve(app).await, None).unwrap();

        let err = backend.new_chat().await.unwrap_err();
        assert!(matches!(err, ApiError::MissingField("session_id")));
    }

    #[tokio::test]
    async fn test_connection_refused() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let backend = HttpBackend::new(&format!("http://{addr}"), None).unwrap();
        let err = backend.ask("blight?", "s-1").await.unwrap_err();
        assert!(matches!(err, ApiError::Transport(_)));
        assert!(err.to_string().starts_with("request failed"));
    }
}
