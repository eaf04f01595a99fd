// src/domain/mod.rs
pub mod card;
pub mod error;
pub mod question;

pub use card::{Card, CardBody};
pub use error::DeckError;
pub use question::{QuestionKind, QuestionRecord};
