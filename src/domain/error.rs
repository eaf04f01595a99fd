// src/domain/error.rs
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DeckError {
    #[error("Malformed question '{key}': {reason}")]
    MalformedRecord { key: String, reason: String },

    #[error("Unsupported kind '{kind}' for question '{key}'")]
    UnsupportedKind { key: String, kind: String },

    #[error("Compilation failed: {reason}{}", format_diagnostics(.diagnostics))]
    CompilationFailed {
        reason: String,
        diagnostics: Option<String>,
    },

    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl DeckError {
    pub fn malformed(key: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MalformedRecord {
            key: key.into(),
            reason: reason.into(),
        }
    }

    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

fn format_diagnostics(diagnostics: &Option<String>) -> String {
    match diagnostics {
        Some(text) if !text.trim().is_empty() => format!("\n--- tool output ---\n{}", text.trim_end()),
        _ => String::new(),
    }
}
