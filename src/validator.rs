//! Structural checks over grouped rows, run before anything is laid out.

use crate::config::FieldLimits;
use crate::error::CardError;
use crate::model::{Card, Field, LevelGroup, QUESTIONS_PER_CARD, Question, RawRow, clean_field};
use itertools::Itertools;

/// Turns level groups into cards, failing on the first violation.
///
/// Per level the row count is checked first. Then, card by card, every row's
/// fields are checked for emptiness and length in row order, and finally the
/// card's subjects are checked for repeats.
pub fn validate(groups: &[LevelGroup], limits: &FieldLimits) -> Result<Vec<Card>, CardError> {
    if groups.iter().all(|g| g.rows.is_empty()) {
        return Err(CardError::EmptyInput);
    }

    let mut cards = Vec::new();
    for group in groups {
        let level = clean_field(&group.level);
        let count = group.rows.len();
        if count == 0 || count % QUESTIONS_PER_CARD != 0 {
            return Err(CardError::IncompleteCard { level, count });
        }

        for (card_index, chunk) in group.rows.chunks_exact(QUESTIONS_PER_CARD).enumerate() {
            cards.push(validate_card(&level, card_index, chunk, limits)?);
        }
        log::debug!(
            "Level '{}': {} row(s) into {} card(s)",
            level,
            count,
            count / QUESTIONS_PER_CARD
        );
    }
    Ok(cards)
}

fn validate_card(
    level: &str,
    card_index: usize,
    rows: &[RawRow],
    limits: &FieldLimits,
) -> Result<Card, CardError> {
    let cleaned: Vec<[String; 4]> = rows
        .iter()
        .map(|row| Field::ALL.map(|field| clean_field(row.field(field))))
        .collect();

    for values in &cleaned {
        for (field, value) in Field::ALL.into_iter().zip(values) {
            if value.is_empty() {
                return Err(CardError::EmptyField {
                    level: level.to_string(),
                    card_index,
                    field,
                });
            }
            let limit = limits.limit(field);
            let actual = value.chars().count();
            if actual > limit {
                return Err(CardError::FieldTooLong {
                    level: level.to_string(),
                    card_index,
                    field,
                    limit,
                    actual,
                });
            }
        }
    }

    if let Some(subject) = cleaned.iter().map(|[_, subject, _, _]| subject).duplicates().next() {
        return Err(CardError::DuplicateSubject {
            level: level.to_string(),
            card_index,
            subject: subject.clone(),
        });
    }

    let questions = std::array::from_fn(|slot| {
        let [_, subject, text, answer] = &cleaned[slot];
        Question {
            subject: subject.clone(),
            text: text.clone(),
            answer: answer.clone(),
        }
    });
    Ok(Card {
        level: level.to_string(),
        index: card_index,
        questions,
    })
}
