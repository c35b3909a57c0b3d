//! The objects passed around by a chat session.
//!
//! The internal `Turn` is the single source of truth for the conversation
//! history. Translation to the model-endpoint wire shape lives in
//! `providers::utils`; the history itself never stores wire structures.

pub mod role;
pub mod turn;
