use serde::{Deserialize, Serialize};
use thiserror::Error;

#[non_exhaustive]
#[derive(Error, Debug, Clone, Deserialize, Serialize)]
pub enum ModelError {
    #[error("no reply candidates in model response")]
    NoReply,

    #[error("model API error: {0}")]
    Api(String),
}
