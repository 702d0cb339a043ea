//! Per-file summarization
//!
//! Every failure mode — excluded path, unreadable file, empty content,
//! network or endpoint trouble — is converted into a human-readable string
//! so the tree traversal never aborts on a broken leaf.

use std::fs;
use std::path::Path;

use crate::config::Config;
use crate::exclude::should_exclude;
use crate::llm::{ChatCompletion, ChatRequest};

/// Outbound payload bound: only the first 4000 characters of a file are sent.
const MAX_CONTENT_CHARS: usize = 4000;

pub struct Summarizer {
    config: Config,
    client: Box<dyn ChatCompletion>,
}

impl Summarizer {
    /// The client is injected so tests can observe calls without touching
    /// the network.
    pub fn new(config: Config, client: Box<dyn ChatCompletion>) -> Self {
        Self { config, client }
    }

    /// Summarize one file, never failing.
    ///
    /// `model` and `prompt` override the configured values for this call
    /// only; the persisted configuration is untouched.
    pub fn summarize_file(&self, path: &Path, model: Option<&str>, prompt: Option<&str>) -> String {
        let model = model.unwrap_or(&self.config.model);
        let prompt = prompt.unwrap_or(&self.config.prompt);

        if should_exclude(path, &self.config.exclude) {
            return format!("File {} is excluded based on configuration.", path.display());
        }

        let bytes = match fs::read(path) {
            Ok(bytes) => bytes,
            Err(err) => return format!("Error processing file {}: {}", path.display(), err),
        };
        // Best-effort decoding: invalid UTF-8 must not abort the traversal
        let content = String::from_utf8_lossy(&bytes);

        if content.is_empty() {
            return format!("File {} is empty.", path.display());
        }

        let truncated: String = content.chars().take(MAX_CONTENT_CHARS).collect();
        let user_content = format!(
            "Summarize this file content in one short sentence. The file path is {}:\n\n{}",
            path.display(),
            truncated
        );

        let request = ChatRequest {
            url: &self.config.api_url,
            api_key: &self.config.api_key,
            model,
            system_prompt: prompt,
            user_content: &user_content,
        };

        match self.client.chat(&request) {
            Ok(summary) => summary,
            Err(err) => format!("Error getting summary: {}", err),
        }
    }
}
