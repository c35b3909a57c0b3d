use anyhow::Result;
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use uuid::Uuid;

use super::{ConversionResult, Converter};
use crate::capabilities::{Capability, CapabilityRequest};
use crate::models::turn::{Artifact, FileRef};

pub const DEFAULT_BACKEND_HOST: &str = "http://localhost:8000";

const MSG_NO_FILE: &str = "Nenhum arquivo fornecido.";
const MSG_UNRECOGNIZED: &str = "Função não reconhecida ou não implementada.";

/// Backend route for each capability.
fn route(capability: Capability) -> &'static str {
    match capability {
        Capability::ConvertImage => "/images/convert",
        Capability::ConvertDocument => "/documents/convert",
        Capability::ExtractAudio => "/video/extract-audio",
    }
}

fn failure_message(capability: Capability) -> &'static str {
    match capability {
        Capability::ConvertImage => "Falha na conversão de imagem.",
        Capability::ConvertDocument => "Falha na conversão de documento.",
        Capability::ExtractAudio => "Falha na extração de áudio.",
    }
}

fn success_message(capability: Capability) -> &'static str {
    match capability {
        Capability::ConvertImage => "Imagem convertida com sucesso!",
        Capability::ConvertDocument => "Documento convertido com sucesso!",
        Capability::ExtractAudio => "Áudio extraído com sucesso!",
    }
}

#[derive(Debug, Clone)]
pub struct BackendConfig {
    pub host: String,
    /// Converted payloads are written here and retained for the process
    /// lifetime; expiry is the embedding application's job.
    pub artifact_dir: PathBuf,
}

impl BackendConfig {
    pub fn new<H, P>(host: H, artifact_dir: P) -> Self
    where
        H: Into<String>,
        P: Into<PathBuf>,
    {
        BackendConfig {
            host: host.into(),
            artifact_dir: artifact_dir.into(),
        }
    }

    pub fn from_env() -> Self {
        BackendConfig {
            host: env::var("CONVERSOR_BACKEND_HOST")
                .unwrap_or_else(|_| DEFAULT_BACKEND_HOST.to_string()),
            artifact_dir: env::var("CONVERSOR_ARTIFACT_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| env::temp_dir().join("conversor")),
        }
    }
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self::from_env()
    }
}

/// Capability dispatcher backed by the three conversion HTTP routes. Each
/// invocation uploads the first current file as a multipart payload with the
/// requested output format as a query parameter.
pub struct HttpConverter {
    client: Client,
    config: BackendConfig,
}

impl HttpConverter {
    pub fn new(config: BackendConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(600))
            .build()?;

        Ok(Self { client, config })
    }

    async fn convert(
        &self,
        capability: Capability,
        output_format: &str,
        files: &[FileRef],
    ) -> ConversionResult {
        // absent files fail immediately, no network call
        let Some(file) = files.first() else {
            return ConversionResult::failure(MSG_NO_FILE);
        };

        let url = format!(
            "{}{}",
            self.config.host.trim_end_matches('/'),
            route(capability)
        );

        let part = Part::bytes(file.data.clone()).file_name(file.name.clone());
        let part = match part.mime_str(&file.media_type) {
            Ok(part) => part,
            Err(_) => Part::bytes(file.data.clone()).file_name(file.name.clone()),
        };
        let form = Form::new().part("file", part);

        let response = match self
            .client
            .post(&url)
            .query(&[("output_format", output_format)])
            .multipart(form)
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!(capability = %capability, error = %e, "backend unreachable");
                return ConversionResult::failure(failure_message(capability));
            }
        };

        if !response.status().is_success() {
            tracing::warn!(capability = %capability, status = %response.status(), "backend rejected conversion");
            return ConversionResult::failure(failure_message(capability));
        }

        let payload = match response.bytes().await {
            Ok(payload) => payload,
            Err(e) => {
                tracing::warn!(capability = %capability, error = %e, "failed reading backend payload");
                return ConversionResult::failure(failure_message(capability));
            }
        };

        match self.store_artifact(file, output_format, &payload) {
            Ok(artifact) => {
                tracing::info!(capability = %capability, path = %artifact.path.display(), "conversion succeeded");
                ConversionResult::success(success_message(capability), artifact)
            }
            Err(e) => {
                tracing::warn!(capability = %capability, error = %e, "failed writing artifact");
                ConversionResult::failure(failure_message(capability))
            }
        }
    }

    /// Write the converted payload under the artifact directory and return a
    /// locally resolvable reference to it.
    fn store_artifact(
        &self,
        source: &FileRef,
        output_format: &str,
        payload: &[u8],
    ) -> Result<Artifact> {
        fs::create_dir_all(&self.config.artifact_dir)?;

        let stem = Path::new(&source.name)
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("arquivo");
        let extension = output_format.trim().trim_start_matches('.').to_lowercase();
        let file_name = if extension.is_empty() {
            format!("{}-{}", Uuid::new_v4(), stem)
        } else {
            format!("{}-{}.{}", Uuid::new_v4(), stem, extension)
        };

        let path = self.config.artifact_dir.join(&file_name);
        fs::write(&path, payload)?;

        let media_type = mime_guess::from_path(&path)
            .first_raw()
            .unwrap_or("application/octet-stream")
            .to_string();

        Ok(Artifact {
            file_name,
            media_type,
            path,
        })
    }
}

#[async_trait]
impl Converter for HttpConverter {
    async fn dispatch(&self, request: &CapabilityRequest, files: &[FileRef]) -> ConversionResult {
        match request {
            CapabilityRequest::Invoke {
                capability,
                output_format,
            } => self.convert(*capability, output_format, files).await,
            CapabilityRequest::Unrecognized { name } => {
                tracing::warn!(name = %name, "unrecognized capability requested");
                ConversionResult::failure(MSG_UNRECOGNIZED)
            }
        }
    }
}
