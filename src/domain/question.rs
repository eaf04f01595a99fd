// src/domain/question.rs
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuestionKind {
    MultipleChoice,
    TrueFalse,
    Enumeration,
}

impl QuestionKind {
    /// Accepts the long tag names and the short ones (`mc`, `tf`, `enum`).
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "multiple_choice" | "mc" => Some(Self::MultipleChoice),
            "true_false" | "tf" => Some(Self::TrueFalse),
            "enumeration" | "enum" => Some(Self::Enumeration),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MultipleChoice => "multiple_choice",
            Self::TrueFalse => "true_false",
            Self::Enumeration => "enumeration",
        }
    }
}

impl fmt::Display for QuestionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A validated question as declared in the source document.
///
/// For true/false questions `options` holds the two synthesized labels
/// (true first), and `correct` indexes into them.
#[derive(Debug, Clone, PartialEq)]
pub struct QuestionRecord {
    pub key: String,
    pub kind: QuestionKind,
    pub text: String,
    pub options: Vec<String>,
    pub correct: Option<usize>,
    pub curiosity: Option<String>,
    pub difficulty: Option<u32>,
}
