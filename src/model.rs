//! Quiz content: raw rows as loaded, level groups, and validated cards.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of questions on every card.
pub const QUESTIONS_PER_CARD: usize = 6;

/// One named column of a row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Level,
    Subject,
    Question,
    Answer,
}

impl Field {
    pub const ALL: [Field; 4] = [Field::Level, Field::Subject, Field::Question, Field::Answer];

    pub fn name(self) -> &'static str {
        match self {
            Field::Level => "level",
            Field::Subject => "subject",
            Field::Question => "question",
            Field::Answer => "answer",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Trims surrounding whitespace and removes byte-order marks left over from
/// spreadsheet exports.
pub fn clean_field(value: &str) -> String {
    value.replace('\u{feff}', "").trim().to_string()
}

/// A row exactly as delivered by the loader, before any cleaning.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RawRow {
    #[serde(default)]
    pub level: String,
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub question: String,
    #[serde(default)]
    pub answer: String,
}

impl RawRow {
    pub fn new(
        level: impl Into<String>,
        subject: impl Into<String>,
        question: impl Into<String>,
        answer: impl Into<String>,
    ) -> Self {
        Self {
            level: level.into(),
            subject: subject.into(),
            question: question.into(),
            answer: answer.into(),
        }
    }

    pub fn field(&self, field: Field) -> &str {
        match field {
            Field::Level => &self.level,
            Field::Subject => &self.subject,
            Field::Question => &self.question,
            Field::Answer => &self.answer,
        }
    }
}

/// Parses a JSON array of row objects.
pub fn rows_from_json(json: &str) -> Result<Vec<RawRow>, serde_json::Error> {
    serde_json::from_str(json)
}

/// The rows of one level, in file order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LevelGroup {
    pub level: String,
    pub rows: Vec<RawRow>,
}

/// Groups rows by their cleaned level label.
///
/// Levels keep the order in which they first appear, and rows keep file order
/// within their level.
pub fn group_by_level(rows: impl IntoIterator<Item = RawRow>) -> Vec<LevelGroup> {
    let mut groups: Vec<LevelGroup> = Vec::new();
    for row in rows {
        let level = clean_field(&row.level);
        match groups.iter_mut().find(|g| g.level == level) {
            Some(group) => group.rows.push(row),
            None => groups.push(LevelGroup {
                level,
                rows: vec![row],
            }),
        }
    }
    groups
}

/// One validated question with its answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    pub subject: String,
    pub text: String,
    pub answer: String,
}

impl Question {
    /// Text shown on the badge: the first character of the subject code.
    pub fn badge_label(&self) -> &str {
        self.subject
            .char_indices()
            .nth(1)
            .map_or(self.subject.as_str(), |(end, _)| &self.subject[..end])
    }
}

/// Six questions of one level, printed together on one physical card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Card {
    pub level: String,
    /// Position of the card within its level, from 0.
    pub index: usize,
    pub questions: [Question; QUESTIONS_PER_CARD],
}
