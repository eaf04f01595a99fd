// src/ports/mod.rs
pub mod latex;

pub use latex::{LatexPresenter, RenderOptions};
