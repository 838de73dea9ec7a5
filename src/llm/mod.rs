//! LLM: adapter for the external generative-AI service.
//!
//! DESIGN
//! ======
//! The relay only needs two capabilities from the provider: store a file and
//! run one generation over `[file, instruction]`. Both sit behind the
//! [`GenAi`] trait; [`gemini::GeminiClient`] is the production implementation,
//! configured from environment variables via [`config::LlmConfig`].

pub mod config;
pub mod gemini;
pub mod types;

pub use gemini::GeminiClient;
pub use types::{GenAi, GenerateResponse, LlmError, Part, RemoteFile};
