use anyhow::{anyhow, Result};
use serde_json::{json, Value};

use crate::capabilities::Tool;
use crate::errors::ModelError;
use crate::models::role::Role;
use crate::models::turn::Turn;
use crate::providers::base::{CapabilityCall, ModelReply};

/// Convert the internal turn history to the chat-completions message spec.
/// Every role has a total mapping; function turns carry the capability name
/// alongside their content so the model can attribute the result. Attached
/// file bytes never go over this wire.
pub fn turns_to_openai_spec(turns: &[Turn]) -> Vec<Value> {
    turns
        .iter()
        .map(|turn| {
            let mut converted = json!({
                "role": turn.role,
                "content": turn.content,
            });
            if turn.role == Role::Function {
                if let Some(name) = &turn.capability {
                    converted["name"] = json!(name);
                }
            }
            converted
        })
        .collect()
}

/// Convert the capability manifest to the endpoint's `functions` spec.
pub fn tools_to_openai_spec(tools: &[Tool]) -> Result<Vec<Value>> {
    let mut names = std::collections::HashSet::new();
    let mut result = Vec::new();

    for tool in tools {
        if !names.insert(&tool.name) {
            return Err(anyhow!("Duplicate capability name: {}", tool.name));
        }

        result.push(json!({
            "name": tool.name,
            "description": tool.description,
            "parameters": tool.parameters,
        }));
    }

    Ok(result)
}

/// Convert the endpoint response to a reply, taking the first candidate.
/// An empty or missing candidate list is a `ModelError::NoReply`.
pub fn response_to_reply(response: Value) -> Result<ModelReply> {
    let message = response
        .get("choices")
        .and_then(|choices| choices.get(0))
        .and_then(|choice| choice.get("message"))
        .ok_or(ModelError::NoReply)?;

    let text = message
        .get("content")
        .and_then(|v| v.as_str())
        .map(String::from);

    let capability_call = message.get("function_call").and_then(|call| {
        let name = call.get("name")?.as_str()?.to_string();
        let arguments = call
            .get("arguments")
            .and_then(|v| v.as_str())
            .unwrap_or_default()
            .to_string();
        Some(CapabilityCall { name, arguments })
    });

    Ok(ModelReply {
        text,
        capability_call,
    })
}
