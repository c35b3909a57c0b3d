use anyhow::{anyhow, Result};
use async_trait::async_trait;
use reqwest::Client;
use reqwest::StatusCode;
use serde_json::{json, Value};
use std::time::Duration;

use super::base::{ModelReply, Provider};
use super::configs::OpenAiConfig;
use super::utils::{response_to_reply, tools_to_openai_spec, turns_to_openai_spec};
use crate::capabilities::Tool;
use crate::errors::ModelError;
use crate::models::turn::Turn;

pub struct OpenAiProvider {
    client: Client,
    config: OpenAiConfig,
}

impl OpenAiProvider {
    pub fn new(config: OpenAiConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(600)) // 10 minutes timeout
            .build()?;

        Ok(Self { client, config })
    }

    pub fn from_env() -> Result<Self> {
        Self::new(OpenAiConfig::from_env()?)
    }

    async fn post(&self, payload: Value) -> Result<Value> {
        let url = format!(
            "{}/v1/chat/completions",
            self.config.host.trim_end_matches('/')
        );

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.config.api_key))
            .json(&payload)
            .send()
            .await?;

        match response.status() {
            StatusCode::OK => Ok(response.json().await?),
            status if status == StatusCode::TOO_MANY_REQUESTS || status.as_u16() >= 500 => {
                Err(ModelError::Api(format!("server error: {}", status)).into())
            }
            status => Err(ModelError::Api(format!("request failed: {}", status)).into()),
        }
    }
}

#[async_trait]
impl Provider for OpenAiProvider {
    async fn complete(&self, system: &str, turns: &[Turn], tools: &[Tool]) -> Result<ModelReply> {
        let system_message = json!({
            "role": "system",
            "content": system
        });

        // messages array with the system instruction first
        let mut messages = vec![system_message];
        messages.extend(turns_to_openai_spec(turns));

        let mut payload = json!({
            "model": self.config.model,
            "messages": messages
        });

        // automatic capability selection: the model picks at most one per reply
        if !tools.is_empty() {
            payload
                .as_object_mut()
                .unwrap()
                .insert("functions".to_string(), json!(tools_to_openai_spec(tools)?));
            payload
                .as_object_mut()
                .unwrap()
                .insert("function_call".to_string(), json!("auto"));
        }
        if let Some(temp) = self.config.temperature {
            payload
                .as_object_mut()
                .unwrap()
                .insert("temperature".to_string(), json!(temp));
        }
        if let Some(tokens) = self.config.max_tokens {
            payload
                .as_object_mut()
                .unwrap()
                .insert("max_tokens".to_string(), json!(tokens));
        }

        tracing::debug!(turns = turns.len(), tools = tools.len(), "requesting completion");
        let response = self.post(payload).await?;

        if let Some(error) = response.get("error") {
            return Err(anyhow!("OpenAI API error: {}", error));
        }

        response_to_reply(response)
    }
}
