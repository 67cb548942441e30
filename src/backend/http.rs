//! Live backend over HTTP.

use greenmind_client::DemoClient;
use greenmind_types::{AnalysisResponse, ChatRequest, ChatResponse, Factory, Language, Readings};

use super::{BackendError, DemoApi};

/// Wraps a [`DemoClient`] together with the description shown in the UI.
#[derive(Debug)]
pub(crate) struct HttpApi {
    client: DemoClient,
    description: String,
}

impl HttpApi {
    pub(crate) fn new(client: DemoClient) -> Self {
        let description = format!("api: {}", client.endpoint());
        Self {
            client,
            description,
        }
    }
}

impl From<DemoClient> for Box<dyn DemoApi> {
    fn from(client: DemoClient) -> Self {
        Box::new(HttpApi::new(client))
    }
}

#[async_trait::async_trait]
impl DemoApi for HttpApi {
    async fn factory_and_readings(&self) -> Result<(Factory, Readings), BackendError> {
        Ok(self.client.factory_and_readings().await?)
    }

    async fn analyze(&self, language: Language) -> Result<AnalysisResponse, BackendError> {
        Ok(self.client.analyze(language).await?)
    }

    async fn suggestions(&self) -> Result<Vec<String>, BackendError> {
        Ok(self.client.suggestions().await?)
    }

    async fn chat(&self, request: ChatRequest) -> Result<ChatResponse, BackendError> {
        Ok(self.client.chat(&request).await?)
    }

    fn description(&self) -> &str {
        &self.description
    }
}
