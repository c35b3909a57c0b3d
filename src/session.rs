//! One chat session: the append-only turn history, the processing flag and
//! the orchestration cycle that drives model calls and capability dispatches
//! until the model produces a final text reply.

use anyhow::Result;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::capabilities::{manifest, CapabilityRequest, Tool};
use crate::classifier::{offer_message, FileCategory};
use crate::converters::Converter;
use crate::models::role::Role;
use crate::models::turn::{FileRef, Turn};
use crate::providers::base::Provider;
use crate::providers::SYSTEM_PROMPT;

const DEFAULT_MAX_CAPABILITY_CALLS: usize = 8;

const MSG_NO_REPLY: &str = "Não foi possível obter resposta do assistente.";
const MSG_NO_REPLY_AFTER_FUNCTION: &str = "Não foi possível continuar a conversa após a função.";
const MSG_LOOP_LIMIT: &str = "Limite de chamadas de função excedido. Tente novamente.";
const MSG_CYCLE_ERROR: &str = "Erro ao processar sua solicitação.";

/// Conversation state for a single live chat session. Constructed explicitly,
/// one per session; multiple sessions can coexist independently.
pub struct ChatSession {
    turns: Vec<Turn>,
    processing: bool,
    tools: Vec<Tool>,
    provider: Box<dyn Provider>,
    converter: Box<dyn Converter>,
    max_capability_calls: usize,
}

impl ChatSession {
    pub fn new(provider: Box<dyn Provider>, converter: Box<dyn Converter>) -> Self {
        ChatSession {
            turns: Vec::new(),
            processing: false,
            tools: manifest(),
            provider,
            converter,
            max_capability_calls: DEFAULT_MAX_CAPABILITY_CALLS,
        }
    }

    /// Bound on capability invocations per cycle, guarding termination
    /// against a model that never stops requesting capabilities.
    pub fn with_max_capability_calls(mut self, limit: usize) -> Self {
        self.max_capability_calls = limit;
        self
    }

    /// The ordered conversation history.
    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    /// True for the duration of one orchestration cycle. The UI is expected
    /// to hold new submissions while this is set.
    pub fn is_processing(&self) -> bool {
        self.processing
    }

    /// Append an arbitrary assistant turn, outside a conversation cycle.
    pub fn push_assistant<S: Into<String>>(&mut self, text: S) {
        self.append(Turn::assistant().with_text(text));
    }

    fn append(&mut self, turn: Turn) {
        self.turns.push(turn);
    }

    /// Submit one user turn with optional files, the only externally
    /// triggered entry point. Never fails: every failure path ends in an
    /// assistant-visible message, and the processing flag is cleared on the
    /// way out regardless of how the cycle terminates.
    pub async fn submit(&mut self, text: &str, files: Vec<FileRef>) {
        // A file upload without text skips the conversation entirely: the
        // category and format menu come from the classifier, not the model.
        if text.trim().is_empty() {
            if let Some(file) = files.first() {
                let category = FileCategory::from_media_type(&file.media_type);
                self.push_assistant(offer_message(category));
            }
            return;
        }

        if let Err(e) = self.run_cycle(text, files).await {
            tracing::warn!(error = %e, "conversation cycle failed unexpectedly");
            self.push_assistant(MSG_CYCLE_ERROR);
        }
        self.processing = false;
    }

    async fn run_cycle(&mut self, text: &str, files: Vec<FileRef>) -> Result<()> {
        // A submission without new files reuses the most recent upload, so
        // the user can answer "PNG" to a file sent earlier.
        let current_files = if files.is_empty() {
            self.last_uploaded_files()
        } else {
            files
        };

        self.append(Turn::user().with_text(text).with_files(current_files.clone()));
        self.processing = true;
        tracing::info!(turns = self.turns.len(), "conversation cycle started");

        let mut reply = match self
            .provider
            .complete(SYSTEM_PROMPT, &self.turns, &self.tools)
            .await
        {
            Ok(reply) => reply,
            Err(e) => {
                tracing::warn!(error = %e, "model call failed");
                self.push_assistant(MSG_NO_REPLY);
                return Ok(());
            }
        };

        let mut calls = 0;
        while let Some(call) = reply.capability_call.take() {
            if calls >= self.max_capability_calls {
                tracing::warn!(
                    limit = self.max_capability_calls,
                    "capability loop limit exceeded"
                );
                self.push_assistant(MSG_LOOP_LIMIT);
                return Ok(());
            }
            calls += 1;

            let request = CapabilityRequest::decode(&call.name, &call.arguments);
            let result = self.converter.dispatch(&request, &current_files).await;
            self.append(Turn::function(
                request.name(),
                result.message,
                result.artifact,
            ));

            // the model sees the function result and decides whether to
            // request another capability or produce final text
            reply = match self
                .provider
                .complete(SYSTEM_PROMPT, &self.turns, &self.tools)
                .await
            {
                Ok(reply) => reply,
                Err(e) => {
                    tracing::warn!(error = %e, "model call failed after capability result");
                    self.push_assistant(MSG_NO_REPLY_AFTER_FUNCTION);
                    return Ok(());
                }
            };
        }

        if let Some(text) = reply.text {
            if !text.is_empty() {
                self.push_assistant(text);
            }
        }
        tracing::info!(turns = self.turns.len(), "conversation cycle finished");
        Ok(())
    }

    fn last_uploaded_files(&self) -> Vec<FileRef> {
        self.turns
            .iter()
            .rev()
            .find(|turn| turn.role == Role::User && !turn.files.is_empty())
            .map(|turn| turn.files.clone())
            .unwrap_or_default()
    }

    /// Write the history as JSON lines, one serialized turn per line.
    pub fn save_transcript(&self, path: &Path) -> Result<()> {
        let mut writer = BufWriter::new(File::create(path)?);
        for turn in &self.turns {
            serde_json::to_writer(&mut writer, turn)?;
            writeln!(writer)?;
        }
        writer.flush()?;
        Ok(())
    }
}
