use serde::{Deserialize, Serialize};

/// The three roles a turn can carry. `Function` marks a capability result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
    Function,
}
