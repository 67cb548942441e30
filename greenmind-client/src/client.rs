//! Client for the demo backend's REST API.

use std::time::Duration;

use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use greenmind_types::{
    AnalysisResponse, AnalyzeRequest, ChatRequest, ChatResponse, Envelope, Factory,
    FactoryResponse, Language, Readings, ReadingsResponse, SuggestionsResponse,
};

use crate::ClientError;

/// Base URL used when none is configured.
pub const DEFAULT_API_URL: &str = "http://localhost:3002/api";

/// Request timeout used when none is configured.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

pub(crate) const FACTORY_PATH: &str = "/demo/bottle/factory";
pub(crate) const READINGS_PATH: &str = "/demo/bottle/readings";
pub(crate) const ANALYZE_PATH: &str = "/demo/bottle/analyze";
pub(crate) const SUGGESTIONS_PATH: &str = "/suggestions";
pub(crate) const CHAT_PATH: &str = "/chat";

/// Client for the bottle factory demo and chat endpoints.
///
/// Every call is a single attempt: there is no retry, and a failure leaves
/// it to the caller to decide what to keep on screen.
#[derive(Debug, Clone)]
pub struct DemoClient {
    client: Client,
    endpoint: String,
}

impl DemoClient {
    /// Create a new builder for configuring the client.
    pub fn builder() -> DemoClientBuilder {
        DemoClientBuilder::default()
    }

    /// The API base URL requests are sent to.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Fetch the static factory layout.
    pub async fn factory(&self) -> Result<Factory, ClientError> {
        let response: FactoryResponse = self.get(FACTORY_PATH).await?;
        response.factory.ok_or_else(|| missing(FACTORY_PATH, "factory"))
    }

    /// Fetch the current sensor readings.
    pub async fn readings(&self) -> Result<Readings, ClientError> {
        let response: ReadingsResponse = self.get(READINGS_PATH).await?;
        response.readings.ok_or_else(|| missing(READINGS_PATH, "readings"))
    }

    /// Fetch layout and readings concurrently.
    ///
    /// Both must succeed; the first failure is returned and the other
    /// request is dropped.
    pub async fn factory_and_readings(&self) -> Result<(Factory, Readings), ClientError> {
        tokio::try_join!(self.factory(), self.readings())
    }

    /// Ask the backend to analyze the factory, answering in `language`.
    ///
    /// The envelope is returned as-is; mapping it into UI shape is left to
    /// the caller.
    pub async fn analyze(&self, language: Language) -> Result<AnalysisResponse, ClientError> {
        self.post(ANALYZE_PATH, &AnalyzeRequest { language }).await
    }

    /// Fetch suggested starter questions for the chat.
    pub async fn suggestions(&self) -> Result<Vec<String>, ClientError> {
        let response: SuggestionsResponse = self.get(SUGGESTIONS_PATH).await?;
        Ok(response.suggestions)
    }

    /// Send a chat message along with the prior conversation.
    pub async fn chat(&self, request: &ChatRequest) -> Result<ChatResponse, ClientError> {
        let response: ChatResponse = self.post(CHAT_PATH, request).await?;
        if response.message.is_none() {
            return Err(missing(CHAT_PATH, "message"));
        }
        Ok(response)
    }

    async fn get<T>(&self, path: &str) -> Result<T, ClientError>
    where
        T: DeserializeOwned + Envelope + ErrorReason,
    {
        let url = self.url(path);
        debug!(%url, "GET");
        let response = self.client.get(&url).send().await?;
        decode(path, response).await
    }

    async fn post<B, T>(&self, path: &str, body: &B) -> Result<T, ClientError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned + Envelope + ErrorReason,
    {
        let url = self.url(path);
        debug!(%url, "POST");
        let response = self.client.post(&url).json(body).send().await?;
        decode(path, response).await
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.endpoint, path)
    }
}

/// Optional failure reason carried by an envelope.
pub trait ErrorReason {
    fn error_reason(&self) -> Option<String> {
        None
    }
}

impl ErrorReason for FactoryResponse {}
impl ErrorReason for ReadingsResponse {}
impl ErrorReason for AnalysisResponse {}
impl ErrorReason for SuggestionsResponse {}

impl ErrorReason for ChatResponse {
    fn error_reason(&self) -> Option<String> {
        self.error.clone()
    }
}

async fn decode<T>(path: &str, response: Response) -> Result<T, ClientError>
where
    T: DeserializeOwned + Envelope + ErrorReason,
{
    let status = response.status();
    if !status.is_success() {
        warn!(endpoint = path, status = status.as_u16(), "non-success status");
        return Err(ClientError::Status {
            endpoint: path.to_string(),
            status: status.as_u16(),
        });
    }

    let body: T = response.json().await.map_err(|e| ClientError::Parse {
        endpoint: path.to_string(),
        message: e.to_string(),
    })?;

    if !body.success() {
        warn!(endpoint = path, "backend reported success=false");
        return Err(ClientError::Unsuccessful {
            endpoint: path.to_string(),
            reason: body.error_reason(),
        });
    }

    Ok(body)
}

fn missing(endpoint: &str, field: &str) -> ClientError {
    ClientError::Parse {
        endpoint: endpoint.to_string(),
        message: format!("missing field `{}`", field),
    }
}

/// Builder for [`DemoClient`].
#[derive(Debug, Default)]
pub struct DemoClientBuilder {
    endpoint: Option<String>,
    timeout: Option<Duration>,
}

impl DemoClientBuilder {
    /// Set the API base URL (e.g., "http://localhost:3002/api").
    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    /// Set the request timeout (default: 30 seconds).
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Build the client.
    pub fn build(self) -> Result<DemoClient, ClientError> {
        let timeout = self.timeout.unwrap_or(DEFAULT_TIMEOUT);

        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ClientError::Config(e.to_string()))?;

        let endpoint = self
            .endpoint
            .unwrap_or_else(|| DEFAULT_API_URL.to_string())
            .trim_end_matches('/')
            .to_string();

        Ok(DemoClient { client, endpoint })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;

    use axum::{
        http::StatusCode,
        routing::{get, post},
        Json, Router,
    };
    use greenmind_types::{BackendSeverity, ChatTurn};
    use serde_json::{json, Value};

    async fn factory_handler() -> Json<Value> {
        Json(json!({
            "success": true,
            "factory": {
                "id": "bottle-1",
                "name": "Bottle Factory",
                "location": "Tashkent",
                "description": "Demo plant",
                "width": 100,
                "height": 60,
                "zones": [
                    { "id": "A", "label": "Blow Molding", "x": 0, "y": 0, "w": 40, "h": 50 },
                    { "id": "B", "label": "Filling", "x": 50, "y": 0, "w": 40, "h": 50 }
                ]
            }
        }))
    }

    async fn readings_handler() -> Json<Value> {
        Json(json!({
            "success": true,
            "readings": {
                "timestamp": "2025-01-01T10:00:00Z",
                "zones": [{ "id": "A", "sensors": { "temperature": 80.2 }, "alerts": ["hot"] }],
                "summary": {
                    "total_power_kw": 220.0,
                    "active_alerts": 1,
                    "overall_efficiency": 81.5,
                    "production_rate_bottles_per_hour": 5200
                }
            }
        }))
    }

    async fn analyze_handler(Json(body): Json<Value>) -> Json<Value> {
        Json(json!({
            "success": true,
            "analysis": {
                "overall_assessment": format!("language={}", body["language"].as_str().unwrap_or("?")),
                "issues": [{
                    "zone_id": "A",
                    "severity": "high",
                    "title": "Overheating",
                    "description": "Motor runs hot"
                }]
            }
        }))
    }

    async fn chat_handler(Json(body): Json<Value>) -> Json<Value> {
        let turns = body["history"].as_array().map(|h| h.len()).unwrap_or(0);
        Json(json!({
            "success": true,
            "message": format!("echo: {} ({} prior turns)", body["message"].as_str().unwrap_or(""), turns),
            "timestamp": "2025-01-01T10:00:01Z"
        }))
    }

    async fn spawn_server(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{}/api", addr)
    }

    fn healthy_router() -> Router {
        Router::new()
            .route("/api/demo/bottle/factory", get(factory_handler))
            .route("/api/demo/bottle/readings", get(readings_handler))
            .route("/api/demo/bottle/analyze", post(analyze_handler))
            .route(
                "/api/suggestions",
                get(|| async { Json(json!({ "success": true, "suggestions": ["a", "b"] })) }),
            )
            .route("/api/chat", post(chat_handler))
    }

    #[test]
    fn test_builder_defaults() {
        let client = DemoClient::builder().build().unwrap();
        assert_eq!(client.endpoint(), DEFAULT_API_URL);
    }

    #[test]
    fn test_builder_trims_trailing_slash() {
        let client = DemoClient::builder().endpoint("http://demo.local/api/").build().unwrap();
        assert_eq!(client.endpoint(), "http://demo.local/api");
        assert_eq!(client.url(CHAT_PATH), "http://demo.local/api/chat");
    }

    #[tokio::test]
    async fn test_factory_and_readings() {
        let base = spawn_server(healthy_router()).await;
        let client = DemoClient::builder().endpoint(base).build().unwrap();

        let (factory, readings) = client.factory_and_readings().await.unwrap();
        assert_eq!(factory.zones.len(), 2);
        assert_eq!(readings.zones[0].alerts, vec!["hot".to_string()]);
        assert_eq!(readings.summary.active_alerts, 1);
    }

    #[tokio::test]
    async fn test_analyze_sends_language() {
        let base = spawn_server(healthy_router()).await;
        let client = DemoClient::builder().endpoint(base).build().unwrap();

        let response = client.analyze(Language::Ru).await.unwrap();
        let analysis = response.analysis.unwrap();
        assert_eq!(analysis.overall_assessment.as_deref(), Some("language=ru"));
        let issues = analysis.issues.unwrap();
        assert_eq!(issues[0].severity, BackendSeverity::High);
    }

    #[tokio::test]
    async fn test_chat_and_suggestions() {
        let base = spawn_server(healthy_router()).await;
        let client = DemoClient::builder().endpoint(base).build().unwrap();

        assert_eq!(client.suggestions().await.unwrap(), vec!["a", "b"]);

        let request = ChatRequest {
            message: "hello".to_string(),
            history: vec![ChatTurn::assistant("welcome")],
        };
        let reply = client.chat(&request).await.unwrap();
        assert_eq!(reply.message.as_deref(), Some("echo: hello (1 prior turns)"));
        assert!(reply.timestamp.is_some());
    }

    #[tokio::test]
    async fn test_unsuccessful_envelope_is_api_failure() {
        let router = Router::new()
            .route(
                "/api/demo/bottle/analyze",
                post(|| async { Json(json!({ "success": false })) }),
            )
            .route(
                "/api/chat",
                post(|| async { Json(json!({ "success": false, "error": "model offline" })) }),
            );
        let base = spawn_server(router).await;
        let client = DemoClient::builder().endpoint(base).build().unwrap();

        let err = client.analyze(Language::En).await.unwrap_err();
        assert!(matches!(err, ClientError::Unsuccessful { .. }));
        assert_eq!(err.kind(), ErrorKind::Api);

        let request = ChatRequest {
            message: "hi".to_string(),
            history: Vec::new(),
        };
        let err = client.chat(&request).await.unwrap_err();
        assert!(err.to_string().contains("model offline"));
    }

    #[tokio::test]
    async fn test_non_2xx_status() {
        let router = Router::new().route(
            "/api/demo/bottle/factory",
            get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
        );
        let base = spawn_server(router).await;
        let client = DemoClient::builder().endpoint(base).build().unwrap();

        match client.factory().await {
            Err(ClientError::Status { status, endpoint }) => {
                assert_eq!(status, 500);
                assert_eq!(endpoint, FACTORY_PATH);
            }
            other => panic!("expected status error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_first_failure_aborts_initial_load() {
        // Readings route is missing, so the join must fail with a 404.
        let router = Router::new().route("/api/demo/bottle/factory", get(factory_handler));
        let base = spawn_server(router).await;
        let client = DemoClient::builder().endpoint(base).build().unwrap();

        let err = client.factory_and_readings().await.unwrap_err();
        assert!(matches!(err, ClientError::Status { status: 404, .. }));
    }

    #[tokio::test]
    async fn test_unreachable_backend_is_network_failure() {
        // Bind then drop to get a port nobody listens on.
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = DemoClient::builder()
            .endpoint(format!("http://{}/api", addr))
            .timeout(Duration::from_secs(2))
            .build()
            .unwrap();

        let err = client.suggestions().await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Network);
    }
}
