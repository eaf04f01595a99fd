// src/application/card_builder.rs
use crate::domain::{Card, CardBody, DeckError, QuestionKind, QuestionRecord};

/// Map one validated question onto its card.
///
/// Records coming from the loader always satisfy the kind invariants; the
/// checks here only fire for records assembled by hand.
pub fn build_card(record: QuestionRecord) -> Result<Card, DeckError> {
    let QuestionRecord {
        key,
        kind,
        text,
        options,
        correct,
        curiosity,
        difficulty,
    } = record;

    let body = match kind {
        QuestionKind::MultipleChoice => {
            let correct = checked_correct(&key, correct, options.len())?;
            CardBody::MultipleChoice { options, correct }
        }
        QuestionKind::TrueFalse => {
            let correct = checked_correct(&key, correct, options.len())?;
            let labels: [String; 2] = options.try_into().map_err(|options: Vec<String>| {
                DeckError::malformed(
                    &key,
                    format!("true/false needs exactly 2 labels, got {}", options.len()),
                )
            })?;
            CardBody::TrueFalse { labels, correct }
        }
        QuestionKind::Enumeration => {
            if correct.is_some() {
                return Err(DeckError::malformed(
                    &key,
                    "enumeration questions cannot carry a correct index",
                ));
            }
            CardBody::Enumeration { options }
        }
    };

    Ok(Card {
        key,
        text,
        body,
        curiosity,
        difficulty,
    })
}

/// Build cards for a whole document, keeping input order.
pub fn build_cards(records: Vec<QuestionRecord>) -> Result<Vec<Card>, DeckError> {
    records.into_iter().map(build_card).collect()
}

fn checked_correct(key: &str, correct: Option<usize>, len: usize) -> Result<usize, DeckError> {
    match correct {
        Some(idx) if idx < len => Ok(idx),
        Some(idx) => Err(DeckError::malformed(
            key,
            format!("correct index {idx} out of range for {len} options"),
        )),
        None => Err(DeckError::malformed(key, "missing correct index")),
    }
}
