//! The static manifest of conversion capabilities advertised to the model,
//! and the decoding of a raw model call into a routable request.
//!
//! Adding a capability means one enum variant, one manifest entry and one
//! dispatcher route; nothing else changes.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use strum_macros::{Display, EnumIter, EnumString};

/// A named conversion operation the model can invoke.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[strum(serialize_all = "snake_case")]
pub enum Capability {
    ConvertImage,
    ConvertDocument,
    ExtractAudio,
}

/// A capability descriptor as advertised to the model.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Tool {
    /// Stable identifier used for dispatch
    pub name: String,
    /// Natural-language description shown to the model
    pub description: String,
    /// Parameter schema: exactly one required string field `output_format`
    pub parameters: Value,
}

impl Tool {
    pub fn new<N, D>(name: N, description: D, parameters: Value) -> Self
    where
        N: Into<String>,
        D: Into<String>,
    {
        Tool {
            name: name.into(),
            description: description.into(),
            parameters,
        }
    }
}

fn output_format_schema(description: &str) -> Value {
    json!({
        "type": "object",
        "properties": {
            "output_format": { "type": "string", "description": description }
        },
        "required": ["output_format"]
    })
}

/// The static list of capability descriptors, passed verbatim on every model
/// call so the model can choose at most one capability per reply.
pub fn manifest() -> Vec<Tool> {
    vec![
        Tool::new(
            Capability::ConvertImage.to_string(),
            "Converte uma imagem para outro formato",
            output_format_schema("Formato de saída da imagem (ex: PNG, JPEG, GIF)"),
        ),
        Tool::new(
            Capability::ConvertDocument.to_string(),
            "Converte um documento (ex: PDF para DOCX)",
            output_format_schema("Formato de saída do documento (ex: docx)"),
        ),
        Tool::new(
            Capability::ExtractAudio.to_string(),
            "Extrai áudio de um vídeo",
            output_format_schema("Formato de saída do áudio (ex: mp3)"),
        ),
    ]
}

/// A model capability call decoded into a routable request. An unrecognized
/// name is data, not an error: it flows through the dispatcher as a failed
/// conversion so the model can see the failure and respond.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CapabilityRequest {
    Invoke {
        capability: Capability,
        output_format: String,
    },
    Unrecognized {
        name: String,
    },
}

impl CapabilityRequest {
    /// Decode the raw wire descriptor. A missing or malformed argument
    /// payload degrades to an empty output format.
    pub fn decode(name: &str, arguments: &str) -> Self {
        match name.parse::<Capability>() {
            Ok(capability) => {
                let output_format = serde_json::from_str::<Value>(arguments)
                    .ok()
                    .and_then(|args| {
                        args.get("output_format")
                            .and_then(|v| v.as_str())
                            .map(String::from)
                    })
                    .unwrap_or_default();
                CapabilityRequest::Invoke {
                    capability,
                    output_format,
                }
            }
            Err(_) => CapabilityRequest::Unrecognized {
                name: name.to_string(),
            },
        }
    }

    /// The wire name recorded on the function turn for this request.
    pub fn name(&self) -> String {
        match self {
            CapabilityRequest::Invoke { capability, .. } => capability.to_string(),
            CapabilityRequest::Unrecognized { name } => name.clone(),
        }
    }
}
