// src/domain/card.rs
use super::question::QuestionKind;
use serde::Serialize;

/// Answer layout of a card. Only the kinds with a single right answer carry
/// a `correct` index, so an enumeration can never point at one.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CardBody {
    MultipleChoice { options: Vec<String>, correct: usize },
    TrueFalse { labels: [String; 2], correct: usize },
    Enumeration { options: Vec<String> },
}

impl CardBody {
    pub fn kind(&self) -> QuestionKind {
        match self {
            Self::MultipleChoice { .. } => QuestionKind::MultipleChoice,
            Self::TrueFalse { .. } => QuestionKind::TrueFalse,
            Self::Enumeration { .. } => QuestionKind::Enumeration,
        }
    }

    pub fn options(&self) -> &[String] {
        match self {
            Self::MultipleChoice { options, .. } | Self::Enumeration { options } => options.as_slice(),
            Self::TrueFalse { labels, .. } => labels.as_slice(),
        }
    }

    pub fn correct(&self) -> Option<usize> {
        match self {
            Self::MultipleChoice { correct, .. } | Self::TrueFalse { correct, .. } => Some(*correct),
            Self::Enumeration { .. } => None,
        }
    }

    pub fn correct_option(&self) -> Option<&str> {
        self.correct()
            .and_then(|idx| self.options().get(idx))
            .map(String::as_str)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Card {
    pub key: String,
    pub text: String,
    #[serde(flatten)]
    pub body: CardBody,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub curiosity: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<u32>,
}

impl Card {
    pub fn new(key: impl Into<String>, text: impl Into<String>, body: CardBody) -> Self {
        Self {
            key: key.into(),
            text: text.into(),
            body,
            curiosity: None,
            difficulty: None,
        }
    }

    pub fn with_curiosity(mut self, curiosity: impl Into<String>) -> Self {
        self.curiosity = Some(curiosity.into());
        self
    }

    pub fn with_difficulty(mut self, difficulty: u32) -> Self {
        self.difficulty = Some(difficulty);
        self
    }

    pub fn kind(&self) -> QuestionKind {
        self.body.kind()
    }

    pub fn options(&self) -> &[String] {
        self.body.options()
    }

    pub fn correct(&self) -> Option<usize> {
        self.body.correct()
    }

    /// Marked with the star glyph on the rendered card.
    pub fn is_hard(&self) -> bool {
        self.difficulty == Some(1)
    }
}
