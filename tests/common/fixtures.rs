use quizcards::RawRow;

pub const SUBJECTS: [&str; 6] = ["M", "S", "E", "H", "G", "C"];

/// One card's worth of rows with the given subjects and short texts.
pub fn card_rows(level: &str, subjects: [&str; 6]) -> Vec<RawRow> {
    subjects
        .iter()
        .enumerate()
        .map(|(i, subject)| {
            RawRow::new(
                level,
                *subject,
                format!("{} question {}?", level, i + 1),
                format!("{} answer {}", level, i + 1),
            )
        })
        .collect()
}

/// `count` rows of one level cycling through the standard subjects.
pub fn level_rows(level: &str, count: usize) -> Vec<RawRow> {
    (0..count)
        .map(|i| {
            RawRow::new(
                level,
                SUBJECTS[i % 6],
                format!("Card {} question {}?", i / 6 + 1, i % 6 + 1),
                format!("Card {} answer {}", i / 6 + 1, i % 6 + 1),
            )
        })
        .collect()
}
