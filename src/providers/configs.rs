use anyhow::{Context, Result};
use std::env;

pub const DEFAULT_HOST: &str = "https://api.openai.com";
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

#[derive(Debug, Clone)]
pub struct OpenAiConfig {
    pub host: String,
    pub api_key: String,
    pub model: String,
    pub temperature: Option<f32>,
    pub max_tokens: Option<i32>,
}

impl OpenAiConfig {
    pub fn new<H, K, M>(host: H, api_key: K, model: M) -> Self
    where
        H: Into<String>,
        K: Into<String>,
        M: Into<String>,
    {
        OpenAiConfig {
            host: host.into(),
            api_key: api_key.into(),
            model: model.into(),
            temperature: None,
            max_tokens: None,
        }
    }

    pub fn from_env() -> Result<Self> {
        Ok(OpenAiConfig {
            host: env::var("OPENAI_HOST").unwrap_or_else(|_| DEFAULT_HOST.to_string()),
            api_key: env::var("OPENAI_API_KEY")
                .context("OPENAI_API_KEY environment variable must be set")?,
            model: env::var("CONVERSOR_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string()),
            temperature: None,
            max_tokens: None,
        })
    }
}
