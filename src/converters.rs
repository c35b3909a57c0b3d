//! Capability dispatch: routing a decoded capability request to the matching
//! backend adapter and normalizing backend success or failure into a uniform
//! result the orchestration loop can always continue from.

pub mod http;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::capabilities::CapabilityRequest;
use crate::models::turn::{Artifact, FileRef};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConversionStatus {
    Ok,
    Failed,
}

/// Normalized outcome of dispatching one capability to its backend.
/// Ephemeral: copied into a function turn and dropped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversionResult {
    pub status: ConversionStatus,
    pub message: String,
    pub artifact: Option<Artifact>,
}

impl ConversionResult {
    pub fn success<S: Into<String>>(message: S, artifact: Artifact) -> Self {
        ConversionResult {
            status: ConversionStatus::Ok,
            message: message.into(),
            artifact: Some(artifact),
        }
    }

    pub fn failure<S: Into<String>>(message: S) -> Self {
        ConversionResult {
            status: ConversionStatus::Failed,
            message: message.into(),
            artifact: None,
        }
    }

    pub fn succeeded(&self) -> bool {
        self.status == ConversionStatus::Ok
    }
}

/// Routes a capability request to its backend adapter. Implementations never
/// return an error: every failure becomes a failed `ConversionResult` so the
/// conversation loop can always continue.
#[async_trait]
pub trait Converter: Send + Sync {
    async fn dispatch(&self, request: &CapabilityRequest, files: &[FileRef]) -> ConversionResult;
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_result_constructors() {
        let artifact = Artifact {
            file_name: "saida.png".to_string(),
            media_type: "image/png".to_string(),
            path: PathBuf::from("/tmp/saida.png"),
        };

        let success = ConversionResult::success("Imagem convertida com sucesso!", artifact);
        assert!(success.succeeded());
        assert!(success.artifact.is_some());

        let failure = ConversionResult::failure("Falha na conversão de imagem.");
        assert!(!failure.succeeded());
        assert!(failure.artifact.is_none());
    }
}
