//! LLM Service Module
//!
//! Delegates legal questions to an external completion provider.
//!
//! # Architecture
//! ```text
//! ┌─────────────────┐
//! │   LLMClient     │  ← Trait (injected into AppState)
//! └────────┬────────┘
//!          │
//!    ┌─────┴─────┐
//!    ▼           ▼
//! ┌──────┐  ┌──────────┐
//! │OpenAI│  │  Fakes   │
//! │Client│  │ (tests)  │
//! └──────┘  └──────────┘
//! ```

mod client;
mod models;
pub mod prompts;

// Re-exports for external use
pub use client::{LLMClient, OpenAIClient};
pub use models::*;
