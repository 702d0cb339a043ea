//! Treescribe - directory tree analysis with LLM-backed file summaries

pub mod config;
pub mod exclude;
pub mod llm;
pub mod output;
pub mod summarize;
pub mod tree;

pub use config::{Config, ConfigError, ConfigStore};
pub use exclude::should_exclude;
pub use llm::{ChatCompletion, ChatError, ChatRequest, HttpChatClient};
pub use output::TreeOutput;
pub use summarize::Summarizer;
pub use tree::{TreeError, TreeRenderer, TreeRequest};
