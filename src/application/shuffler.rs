// src/application/shuffler.rs
use crate::domain::{Card, CardBody};
use rand::seq::SliceRandom;
use rand::Rng;
use tracing::trace;

/// Randomize the option order of a card, keeping `correct` on the same answer.
///
/// The correct answer is tracked by value, so when two options share the
/// same text the index may land on either copy. True/false labels keep their
/// fixed order.
pub fn shuffle_options<R: Rng + ?Sized>(card: &mut Card, rng: &mut R) {
    match &mut card.body {
        CardBody::MultipleChoice { options, correct } => {
            let answer = options.get(*correct).cloned();
            options.shuffle(rng);
            // an out-of-range index has no answer to follow and is left as is
            if let Some(idx) = answer.and_then(|a| options.iter().position(|o| *o == a)) {
                *correct = idx;
            }
            trace!(key = %card.key, correct = *correct, "Shuffled options");
        }
        CardBody::Enumeration { options } => {
            options.shuffle(rng);
            trace!(key = %card.key, "Shuffled enumeration");
        }
        CardBody::TrueFalse { .. } => {}
    }
}

pub fn shuffle_deck<R: Rng + ?Sized>(cards: &mut [Card], rng: &mut R) {
    for card in cards.iter_mut() {
        shuffle_options(card, rng);
    }
}
