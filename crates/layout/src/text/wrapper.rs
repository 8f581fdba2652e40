use crate::fonts::TextMeasurer;
use thiserror::Error;

/// The most lines a question or answer may occupy on a card.
pub const MAX_LINES: usize = 2;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum WrapError {
    #[error("Text needs more than {max_lines} line(s) at a width of {max_width:.1}pt")]
    Overflow { max_lines: usize, max_width: f32 },
    #[error("Wrap width must be positive, got {0}")]
    InvalidWidth(f32),
}

/// Accumulates finished lines and fails as soon as the cap is exceeded.
struct LineSink {
    lines: Vec<String>,
    max_lines: usize,
    max_width: f32,
}

impl LineSink {
    fn push(&mut self, line: String) -> Result<(), WrapError> {
        if self.lines.len() >= self.max_lines {
            return Err(WrapError::Overflow {
                max_lines: self.max_lines,
                max_width: self.max_width,
            });
        }
        self.lines.push(line);
        Ok(())
    }
}

/// Greedy word wrap driven by measured widths.
///
/// Text that fits on one line is returned unchanged (trimmed). Otherwise
/// whitespace-delimited words are packed onto lines joined by single spaces.
/// A word wider than `max_width` on its own is split at character boundaries,
/// each chunk becoming its own line. Needing more than `max_lines` lines is an
/// error; nothing is ever truncated.
pub fn wrap_text<M: TextMeasurer + ?Sized>(
    text: &str,
    measurer: &M,
    font_size: f32,
    max_width: f32,
    max_lines: usize,
) -> Result<Vec<String>, WrapError> {
    if max_width.is_nan() || max_width <= 0.0 {
        return Err(WrapError::InvalidWidth(max_width));
    }
    let fits = |s: &str| measurer.measure(s, font_size) <= max_width;
    let mut sink = LineSink {
        lines: Vec::with_capacity(max_lines.min(4)),
        max_lines,
        max_width,
    };

    let text = text.trim();
    if text.is_empty() {
        return Ok(sink.lines);
    }

    let single_line = !text.chars().any(|c| c.is_whitespace() && c != ' ');
    if single_line && fits(text) {
        sink.push(text.to_string())?;
        return Ok(sink.lines);
    }

    let mut current = String::new();
    for word in text.split_whitespace() {
        if !current.is_empty() {
            let candidate = format!("{} {}", current, word);
            if fits(&candidate) {
                current = candidate;
                continue;
            }
            sink.push(std::mem::take(&mut current))?;
        }

        if fits(word) {
            current = word.to_string();
        } else {
            split_word(word, &fits, &mut sink)?;
        }
    }
    if !current.is_empty() {
        sink.push(current)?;
    }

    log::trace!("Wrapped {} chars into {} line(s)", text.len(), sink.lines.len());
    Ok(sink.lines)
}

/// Hard-splits an over-wide word; every chunk, including the last, is its own line.
fn split_word(
    word: &str,
    fits: &dyn Fn(&str) -> bool,
    sink: &mut LineSink,
) -> Result<(), WrapError> {
    let mut chunk = String::new();
    for ch in word.chars() {
        chunk.push(ch);
        if !fits(&chunk) && chunk.chars().count() > 1 {
            chunk.pop();
            sink.push(std::mem::take(&mut chunk))?;
            chunk.push(ch);
        }
    }
    if !chunk.is_empty() {
        sink.push(chunk)?;
    }
    Ok(())
}
