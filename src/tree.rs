//! Directory tree walking and rendering
//!
//! Walks a directory recursively in a deterministic order — plain files
//! before directories, names compared case-insensitively within each group —
//! drawing branch connectors and optionally appending an LLM summary line
//! beneath each file. Output is streamed line by line through
//! [`TreeOutput`](crate::output::TreeOutput); nothing is buffered.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::exclude::should_exclude;
use crate::output::TreeOutput;
use crate::summarize::Summarizer;

#[derive(Debug, Error)]
pub enum TreeError {
    #[error("{} is not a valid directory", .0.display())]
    NotADirectory(PathBuf),
    #[error(transparent)]
    Io(#[from] io::Error),
}

/// One traversal's parameters, immutable while rendering.
#[derive(Debug, Clone)]
pub struct TreeRequest {
    pub root: PathBuf,
    pub max_depth: Option<usize>,
    pub exclude: Vec<String>,
    pub model: Option<String>,
    pub prompt: Option<String>,
}

impl TreeRequest {
    pub fn new(root: PathBuf) -> Self {
        Self {
            root,
            max_depth: None,
            exclude: Vec::new(),
            model: None,
            prompt: None,
        }
    }
}

/// Renders a directory tree for one [`TreeRequest`].
///
/// When a summarizer is attached, every plain file gets a `Summary:` line
/// directly beneath its entry.
pub struct TreeRenderer<'a> {
    request: &'a TreeRequest,
    summarizer: Option<&'a Summarizer>,
}

impl<'a> TreeRenderer<'a> {
    pub fn new(request: &'a TreeRequest) -> Self {
        Self {
            request,
            summarizer: None,
        }
    }

    pub fn with_summarizer(mut self, summarizer: &'a Summarizer) -> Self {
        self.summarizer = Some(summarizer);
        self
    }

    /// Render the whole tree.
    ///
    /// Fails only when the root is not a directory or the output writer
    /// breaks; everything below the root degrades gracefully inline.
    pub fn render<W: Write>(&self, out: &mut TreeOutput<W>) -> Result<(), TreeError> {
        let root = std::path::absolute(&self.request.root)?;
        if !root.is_dir() {
            return Err(TreeError::NotADirectory(root));
        }

        out.line(&format!("treescribe: Analyzing {}", root.display()))?;

        let name = root
            .file_name()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_default();
        out.line(&format!("{}/", name))?;

        self.render_dir(&root, "    ", 0, out)?;

        if let Some(sink) = out.sink_name().map(|s| s.to_string()) {
            out.primary_line(&format!("Analysis written to {}", sink))?;
        }
        Ok(())
    }

    fn render_dir<W: Write>(
        &self,
        path: &Path,
        prefix: &str,
        current_depth: usize,
        out: &mut TreeOutput<W>,
    ) -> io::Result<()> {
        if let Some(max) = self.request.max_depth {
            if current_depth > max {
                return Ok(());
            }
        }

        let entries = match fs::read_dir(path) {
            Ok(entries) => entries,
            Err(err) => {
                // One unreadable subtree must not abort the scan of siblings
                log::warn!("cannot read directory {}: {}", path.display(), err);
                out.line(&format!("{}└── [cannot read directory: {}]", prefix, err))?;
                return Ok(());
            }
        };

        let mut entries: Vec<fs::DirEntry> = entries.filter_map(|e| e.ok()).collect();
        entries.sort_by_key(|e| {
            (
                !e.path().is_file(),
                e.file_name().to_string_lossy().to_lowercase(),
            )
        });

        // is_last is decided over the full sorted list, before exclusion: an
        // excluded trailing entry leaves its siblings with `├── ` connectors.
        let total = entries.len();
        for (index, entry) in entries.iter().enumerate() {
            let is_last = index + 1 == total;
            let connector = if is_last { "└── " } else { "├── " };
            let child = entry.path();

            if should_exclude(&child, &self.request.exclude) {
                continue;
            }

            let name = entry.file_name().to_string_lossy().to_string();
            out.line(&format!("{}{}{}", prefix, connector, name))?;

            let continuation = if is_last { "    " } else { "│   " };

            if child.is_file() {
                if let Some(summarizer) = self.summarizer {
                    let summary = summarizer.summarize_file(
                        &child,
                        self.request.model.as_deref(),
                        self.request.prompt.as_deref(),
                    );
                    out.line(&format!("{}{}Summary: {}", prefix, continuation, summary))?;
                }
            } else if child.is_dir() {
                let next_prefix = format!("{}{}", prefix, continuation);
                self.render_dir(&child, &next_prefix, current_depth + 1, out)?;
            }
        }

        Ok(())
    }
}
