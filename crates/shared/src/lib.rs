//! Shared errors, configuration, and outbound clients for SasPer.
//!
//! This crate provides pieces used across all other crates:
//! - Application-wide error types
//! - Configuration management
//! - FCM push delivery client
//! - Gemini text generation client

pub mod config;
pub mod error;
pub mod llm;
pub mod push;

pub use config::{AppConfig, LlmConfig, PushConfig};
pub use error::{AppError, AppResult};
pub use llm::{GeminiClient, LlmError};
pub use push::{FcmClient, PushError, PushMessage};
