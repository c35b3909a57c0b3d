use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;
use std::sync::Mutex;

use crate::capabilities::Tool;
use crate::models::turn::Turn;
use crate::providers::base::{ModelReply, Provider};

/// A mock provider that returns a pre-configured sequence of outcomes for
/// testing. Exhausting the sequence yields empty text replies.
pub struct MockProvider {
    outcomes: Arc<Mutex<Vec<Result<ModelReply>>>>,
}

impl MockProvider {
    /// Create a new mock provider with a sequence of replies
    pub fn new(replies: Vec<ModelReply>) -> Self {
        Self::with_outcomes(replies.into_iter().map(Ok).collect())
    }

    /// Create a new mock provider with a sequence of replies and failures
    pub fn with_outcomes(outcomes: Vec<Result<ModelReply>>) -> Self {
        Self {
            outcomes: Arc::new(Mutex::new(outcomes)),
        }
    }
}

#[async_trait]
impl Provider for MockProvider {
    async fn complete(
        &self,
        _system: &str,
        _turns: &[Turn],
        _tools: &[Tool],
    ) -> Result<ModelReply> {
        let mut outcomes = self.outcomes.lock().unwrap();
        if outcomes.is_empty() {
            Ok(ModelReply::text_reply(""))
        } else {
            outcomes.remove(0)
        }
    }
}
