//! OpenAI-backed LLM access for the question-answering service.
//!
//! - [`service_profiles::LlmServiceProfiles`] holds one client per role
//!   (completion, embedding) and is shared behind an `Arc`.
//! - [`config::default_config`] builds the role configs from environment.
//! - [`error_handler::AiLlmError`] is the single error type of the crate.

pub mod config;
pub mod error_handler;
pub mod service_profiles;
pub mod services;

pub use error_handler::AiLlmError;
pub use service_profiles::LlmServiceProfiles;
