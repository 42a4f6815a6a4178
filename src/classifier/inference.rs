use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value};
use std::sync::OnceLock;
use std::time::Duration;

use crate::classifier::{Classifier, Prediction};
use crate::config::Config;
use crate::constants::classifier::REQUEST_TIMEOUT_SECS;
use crate::error::{Error, Result};

static SHARED: OnceLock<InferenceClassifier> = OnceLock::new();

/// Process-wide classifier, created from `config` on first use.
///
/// Later calls return the same instance whatever config they pass.
pub fn shared_classifier(config: &Config) -> &'static InferenceClassifier {
    SHARED.get_or_init(|| {
        tracing::info!("Initialising classifier for model {}", config.model_id);
        InferenceClassifier::new(config)
    })
}

/// Text classification through a hosted inference endpoint
#[derive(Clone)]
pub struct InferenceClassifier {
    url: String,
    token: Option<String>,
    model_id: String,
    client: Client,
}

impl InferenceClassifier {
    /// Create a classifier for the configured model
    pub fn new(config: &Config) -> Self {
        Self {
            url: format!("{}/{}", config.inference_url, config.model_id),
            token: config.hf_token.clone(),
            model_id: config.model_id.clone(),
            client: Client::builder()
                .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
                .build()
                .unwrap_or_default(),
        }
    }

    /// Endpoint the classifier posts to
    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl Classifier for InferenceClassifier {
    async fn classify(&self, text: &str) -> Result<Prediction> {
        let mut request = self.client.post(&self.url).json(&json!({ "inputs": text }));
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let resp = request
            .send()
            .await
            .map_err(|e| Error::Network(format!("Request to {} failed: {e}", self.url)))?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(Error::classifier(
                format!("{} returned {status}: {}", self.model_id, error_message(&body)),
                Some(status.as_u16()),
            ));
        }

        let body: Value = resp.json().await
            .map_err(|e| Error::classifier(format!("Invalid JSON from {}: {e}", self.model_id), None))?;
        let prediction = top_prediction(&body)?;

        tracing::info!("Input text : '{text}' ; Output : {{\"label\": \"{}\", \"score\": {}}}", prediction.label, prediction.score);
        Ok(prediction)
    }

    fn name(&self) -> &str {
        &self.model_id
    }
}

/// Highest-scoring entry of an inference response.
///
/// Accepts both `[{label, score}, ..]` and the batched `[[{label, score}, ..]]`.
fn top_prediction(body: &Value) -> Result<Prediction> {
    if let Some(message) = body["error"].as_str() {
        return Err(Error::classifier(message.to_string(), None));
    }

    let outer = body.as_array()
        .ok_or_else(|| Error::classifier("Expected a list of predictions", None))?;
    let entries = match outer.first() {
        Some(Value::Array(inner)) => inner.as_slice(),
        _ => outer.as_slice(),
    };

    entries.iter()
        .filter_map(|entry| serde_json::from_value::<Prediction>(entry.clone()).ok())
        .max_by(|a, b| a.score.total_cmp(&b.score))
        .ok_or_else(|| Error::classifier("Model returned no predictions", None))
}

/// Pull the `error` field out of a JSON error body, or return the body.
fn error_message(body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| v["error"].as_str().map(String::from))
        .unwrap_or_else(|| body.trim().to_string())
}
