// src/infrastructure/mod.rs
pub mod compiler;
pub mod config;

pub use compiler::PdfLatexCompiler;
pub use config::Config;
