// src/application/mod.rs
pub mod card_builder;
pub mod deck_builder;
pub mod loader;
pub mod shuffler;

pub use card_builder::{build_card, build_cards};
pub use deck_builder::{output_path_for, BuildReport, BuildStep, DeckBuilder, DocumentCompiler, ShuffleMode};
pub use loader::{InputFormat, QuestionLoader};
pub use shuffler::{shuffle_deck, shuffle_options};
