// src/util/testing.rs

use anyhow::Result;
use std::cell::RefCell;
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use tracing_subscriber::{
    filter::filter_fn,
    fmt::{self, format::FmtSpan},
    prelude::*,
    EnvFilter,
};

use crate::application::DocumentCompiler;
use crate::domain::DeckError;

/// Bytes written by [`RecordingCompiler`] in place of a real PDF.
pub const FAKE_ARTIFACT: &[u8] = b"%PDF-1.4\n% quizdeck test artifact\n";

/// Compiler double that records every document it is handed.
///
/// On success it writes [`FAKE_ARTIFACT`] to the requested output path so
/// callers can assert on the produced file; a failing instance writes nothing.
///
/// # Examples
///
/// ```
/// use quizdeck::application::DocumentCompiler;
/// use quizdeck::util::testing::RecordingCompiler;
///
/// let dir = tempfile::tempdir().unwrap();
/// let out = dir.path().join("deck.pdf");
/// let compiler = RecordingCompiler::new();
///
/// compiler.compile(r"\begin{document}\end{document}", &out).unwrap();
///
/// assert_eq!(compiler.calls().len(), 1);
/// assert!(out.exists());
/// ```
#[derive(Debug, Default)]
pub struct RecordingCompiler {
    calls: RefCell<Vec<(String, PathBuf)>>,
    failure: Option<String>,
}

impl RecordingCompiler {
    pub fn new() -> Self {
        Self::default()
    }

    /// A compiler whose every run fails with `reason`.
    pub fn failing(reason: impl Into<String>) -> Self {
        Self {
            calls: RefCell::new(Vec::new()),
            failure: Some(reason.into()),
        }
    }

    /// Documents and output paths received so far, oldest first.
    pub fn calls(&self) -> Vec<(String, PathBuf)> {
        self.calls.borrow().clone()
    }
}

impl DocumentCompiler for RecordingCompiler {
    fn compile(&self, document: &str, output_path: &Path) -> Result<(), DeckError> {
        self.calls
            .borrow_mut()
            .push((document.to_string(), output_path.to_path_buf()));

        if let Some(reason) = &self.failure {
            return Err(DeckError::CompilationFailed {
                reason: reason.clone(),
                diagnostics: None,
            });
        }

        std::fs::write(output_path, FAKE_ARTIFACT).map_err(|e| DeckError::io(output_path, e))
    }
}

pub fn init_test_setup() -> Result<()> {
    // Set up logging first
    setup_test_logging();

    info!("Test Setup complete");
    Ok(())
}

fn setup_test_logging() {
    debug!("INIT: Attempting logger init from testing.rs");

    // Filter out noisy dependency modules
    let noisy_modules = ["serde_yaml", "toml_edit"];
    let module_filter = filter_fn(move |metadata| {
        !noisy_modules
            .iter()
            .any(|name| metadata.target().starts_with(name))
    });

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));

    let subscriber = tracing_subscriber::registry().with(
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_thread_names(false)
            .with_span_events(FmtSpan::CLOSE)
            .with_filter(module_filter)
            .with_filter(env_filter),
    );

    // Only set if we haven't already set a global subscriber
    if tracing::dispatcher::has_been_set() {
        debug!("Tracing subscriber already set");
    } else {
        subscriber.try_init().unwrap_or_else(|e| {
            eprintln!("Error: Failed to set up logging: {}", e);
        });
    }
}

/// Write `content` to `dir/name` and return the path.
pub fn write_fixture(dir: &Path, name: &str, content: &str) -> Result<PathBuf> {
    let path = dir.join(name);
    std::fs::write(&path, content)?;
    Ok(path)
}
