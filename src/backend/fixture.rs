//! Offline backend reading canned responses from a directory.
//!
//! Each endpoint maps to one JSON file holding the response body exactly as
//! the live service would send it.

use std::path::{Path, PathBuf};

use greenmind_client::ClientError;
use greenmind_types::{
    AnalysisResponse, ChatRequest, ChatResponse, Envelope, Factory, FactoryResponse, Language,
    Readings, ReadingsResponse, SuggestionsResponse,
};
use serde::de::DeserializeOwned;

use super::{BackendError, DemoApi};

pub const FACTORY_FILE: &str = "factory.json";
pub const READINGS_FILE: &str = "readings.json";
pub const ANALYSIS_FILE: &str = "analysis.json";
pub const SUGGESTIONS_FILE: &str = "suggestions.json";
pub const CHAT_FILE: &str = "chat.json";

/// A [`DemoApi`] that serves responses from JSON files.
///
/// Files are re-read on every call, so editing a fixture and pressing `r`
/// shows the change.
#[derive(Debug)]
pub struct FixtureApi {
    dir: PathBuf,
    description: String,
}

impl FixtureApi {
    /// Create a fixture backend rooted at `dir`.
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        let dir = dir.as_ref().to_path_buf();
        let description = format!("fixtures: {}", dir.display());
        Self { dir, description }
    }

    /// Returns the fixture directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    async fn read<T: DeserializeOwned>(&self, file: &str) -> Result<T, BackendError> {
        let path = self.dir.join(file);
        let content = tokio::fs::read_to_string(&path)
            .await
            .map_err(|e| BackendError::Fixture {
                file: file.to_string(),
                message: format!("Read error: {}", e),
            })?;
        serde_json::from_str(&content).map_err(|e| BackendError::Fixture {
            file: file.to_string(),
            message: format!("Parse error: {}", e),
        })
    }

    /// Read an envelope and reject `success: false` the way the HTTP client does.
    async fn read_envelope<T: DeserializeOwned + Envelope>(
        &self,
        file: &str,
    ) -> Result<T, BackendError> {
        let body: T = self.read(file).await?;
        if !body.success() {
            return Err(ClientError::Unsuccessful {
                endpoint: file.to_string(),
                reason: None,
            }
            .into());
        }
        Ok(body)
    }
}

fn missing(file: &str, field: &str) -> BackendError {
    BackendError::Fixture {
        file: file.to_string(),
        message: format!("missing field `{}`", field),
    }
}

#[async_trait::async_trait]
impl DemoApi for FixtureApi {
    async fn factory_and_readings(&self) -> Result<(Factory, Readings), BackendError> {
        let (factory, readings) = tokio::try_join!(
            self.read_envelope::<FactoryResponse>(FACTORY_FILE),
            self.read_envelope::<ReadingsResponse>(READINGS_FILE),
        )?;
        let factory = factory.factory.ok_or_else(|| missing(FACTORY_FILE, "factory"))?;
        let readings = readings.readings.ok_or_else(|| missing(READINGS_FILE, "readings"))?;
        Ok((factory, readings))
    }

    async fn analyze(&self, language: Language) -> Result<AnalysisResponse, BackendError> {
        tracing::debug!(language = %language, "Serving analysis fixture");
        // success=false is left for the normalizer to reject
        self.read(ANALYSIS_FILE).await
    }

    async fn suggestions(&self) -> Result<Vec<String>, BackendError> {
        let body: SuggestionsResponse = self.read_envelope(SUGGESTIONS_FILE).await?;
        Ok(body.suggestions)
    }

    async fn chat(&self, request: ChatRequest) -> Result<ChatResponse, BackendError> {
        tracing::debug!(history = request.history.len(), "Serving chat fixture");
        let body: ChatResponse = self.read(CHAT_FILE).await?;
        if !body.success {
            return Err(ClientError::Unsuccessful {
                endpoint: CHAT_FILE.to_string(),
                reason: body.error,
            }
            .into());
        }
        if body.message.is_none() {
            return Err(missing(CHAT_FILE, "message"));
        }
        Ok(body)
    }

    fn description(&self) -> &str {
        &self.description
    }
}
