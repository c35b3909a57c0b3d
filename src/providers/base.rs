use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::capabilities::Tool;
use crate::models::turn::Turn;

/// Raw capability-invocation descriptor as returned by the model endpoint.
/// `arguments` is the serialized payload from the wire; decoding into a
/// routable request happens in `capabilities::CapabilityRequest`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapabilityCall {
    pub name: String,
    pub arguments: String,
}

/// The first candidate reply from the model: text, a capability call, or both.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelReply {
    pub text: Option<String>,
    pub capability_call: Option<CapabilityCall>,
}

impl ModelReply {
    /// A plain text reply
    pub fn text_reply<S: Into<String>>(text: S) -> Self {
        ModelReply {
            text: Some(text.into()),
            capability_call: None,
        }
    }

    /// A reply requesting a capability invocation
    pub fn capability<N, A>(name: N, arguments: A) -> Self
    where
        N: Into<String>,
        A: Into<String>,
    {
        ModelReply {
            text: None,
            capability_call: Some(CapabilityCall {
                name: name.into(),
                arguments: arguments.into(),
            }),
        }
    }
}

/// Base trait for reasoning-model clients.
#[async_trait]
pub trait Provider: Send + Sync {
    /// Request the next reply given the full ordered turn history and the
    /// capability manifest. One outbound network call; stateless otherwise.
    async fn complete(&self, system: &str, turns: &[Turn], tools: &[Tool]) -> Result<ModelReply>;
}
