// src/infrastructure/compiler.rs
use crate::application::DocumentCompiler;
use crate::constants::{DEFAULT_COMPILER, DEFAULT_COMPILE_TIMEOUT_SECS, DIAGNOSTIC_TAIL_LINES, JOB_NAME};
use crate::domain::DeckError;
use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use std::process::{ExitStatus, Stdio};
use std::time::Duration;
use tempfile::{Builder, NamedTempFile};
use tokio::process::Command;
use tracing::{debug, instrument, warn};

const TOOL_OUTPUT_FILE: &str = "tool-output.txt";

/// Runs a LaTeX engine in a scratch directory and moves the PDF into place.
///
/// The scratch directory, with the `.aux`/`.log` side files, is removed when
/// `compile` returns, whatever the outcome.
#[derive(Debug, Clone)]
pub struct PdfLatexCompiler {
    program: String,
    args: Vec<String>,
    timeout: Duration,
}

impl PdfLatexCompiler {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            timeout: Duration::from_secs(DEFAULT_COMPILE_TIMEOUT_SECS),
        }
    }

    /// Extra arguments placed before the standard engine flags.
    pub fn with_args(mut self, args: Vec<String>) -> Self {
        self.args = args;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    fn failed(&self, reason: String, log_path: &Path) -> DeckError {
        DeckError::CompilationFailed {
            reason,
            diagnostics: read_tail(log_path, DIAGNOSTIC_TAIL_LINES),
        }
    }
}

impl PdfLatexCompiler {
    /// Run the engine in `work_dir`, killing and reaping it on timeout or a failed wait.
    async fn run_engine(
        &self,
        work_dir: &Path,
        tex_name: &str,
        log_path: &Path,
    ) -> Result<ExitStatus, DeckError> {
        let log = File::create(log_path).map_err(|e| DeckError::io(log_path, e))?;
        let log_err = log.try_clone().map_err(|e| DeckError::io(log_path, e))?;

        debug!(work_dir = %work_dir.display(), "Starting typesetting run");
        let mut child = Command::new(&self.program)
            .args(&self.args)
            .arg("-interaction=nonstopmode")
            .arg("-halt-on-error")
            .arg(tex_name)
            .current_dir(work_dir)
            .stdin(Stdio::null())
            .stdout(Stdio::from(log))
            .stderr(Stdio::from(log_err))
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| DeckError::CompilationFailed {
                reason: format!("failed to start '{}': {e}", self.program),
                diagnostics: None,
            })?;

        let outcome = tokio::time::timeout(self.timeout, child.wait()).await;
        match outcome {
            Ok(Ok(status)) => Ok(status),
            Ok(Err(e)) => {
                let _ = child.kill().await;
                Err(self.failed(format!("failed waiting for '{}': {e}", self.program), log_path))
            }
            Err(_) => {
                warn!(timeout_secs = self.timeout.as_secs_f64(), "Typesetting timed out, killing");
                let _ = child.kill().await;
                Err(self.failed(
                    format!("'{}' timed out after {:?}", self.program, self.timeout),
                    log_path,
                ))
            }
        }
    }
}

impl Default for PdfLatexCompiler {
    fn default() -> Self {
        Self::new(DEFAULT_COMPILER)
    }
}

impl DocumentCompiler for PdfLatexCompiler {
    #[instrument(level = "debug", skip(self, document), fields(program = %self.program))]
    fn compile(&self, document: &str, output_path: &Path) -> Result<(), DeckError> {
        let work_dir = Builder::new()
            .prefix("quizdeck-")
            .rand_bytes(5)
            .tempdir()
            .map_err(|e| DeckError::io(std::env::temp_dir(), e))?;

        let tex_name = format!("{JOB_NAME}.tex");
        let tex_path = work_dir.path().join(&tex_name);
        std::fs::write(&tex_path, document).map_err(|e| DeckError::io(&tex_path, e))?;

        let log_path = work_dir.path().join(TOOL_OUTPUT_FILE);
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| DeckError::CompilationFailed {
                reason: format!("failed to start process runtime: {e}"),
                diagnostics: None,
            })?;
        let status = runtime.block_on(self.run_engine(work_dir.path(), &tex_name, &log_path))?;

        if !status.success() {
            return Err(self.failed(format!("'{}' exited with {status}", self.program), &log_path));
        }

        let produced = work_dir.path().join(format!("{JOB_NAME}.pdf"));
        if !produced.is_file() {
            return Err(self.failed(
                format!("'{}' finished but produced no {}", self.program, produced.display()),
                &log_path,
            ));
        }

        persist_artifact(&produced, output_path)?;
        debug!(output = %output_path.display(), "Artifact persisted");
        Ok(())
    }
}

/// Copy `produced` next to `output_path` and rename it into place, so the
/// destination is either the complete file or untouched.
fn persist_artifact(produced: &Path, output_path: &Path) -> Result<(), DeckError> {
    let dest_dir = match output_path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
        _ => PathBuf::from("."),
    };

    let mut staged = NamedTempFile::new_in(&dest_dir).map_err(|e| DeckError::io(&dest_dir, e))?;
    let mut source = File::open(produced).map_err(|e| DeckError::io(produced, e))?;
    io::copy(&mut source, staged.as_file_mut()).map_err(|e| DeckError::io(staged.path(), e))?;
    staged
        .persist(output_path)
        .map_err(|e| DeckError::io(output_path, e.error))?;
    Ok(())
}

fn read_tail(path: &Path, lines: usize) -> Option<String> {
    let bytes = std::fs::read(path).ok()?;
    let text = String::from_utf8_lossy(&bytes);
    let all: Vec<&str> = text.lines().collect();
    let start = all.len().saturating_sub(lines);
    let tail = all[start..].join("\n");
    (!tail.trim().is_empty()).then_some(tail)
}
