use crate::data::TimetableInput;
use std::fmt;
use std::fs;
use std::path::Path;

/// Lexical failure while reading the plain-text problem format.
///
/// Bounds checking of the parsed indices is handled separately by
/// [`TimetableInput::validate`]; this type only covers the file shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// The file ended before the named line was found.
    MissingLine { expected: &'static str },
    /// A token that should have been a non-negative integer was not.
    BadInteger { line: usize, token: String },
    /// A line carried the wrong number of tokens.
    WrongTokenCount {
        line: usize,
        expected: usize,
        found: usize,
    },
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::MissingLine { expected } => {
                write!(f, "input ended early: expected {}", expected)
            }
            ParseError::BadInteger { line, token } => {
                write!(f, "line {}: '{}' is not a non-negative integer", line, token)
            }
            ParseError::WrongTokenCount {
                line,
                expected,
                found,
            } => write!(
                f,
                "line {}: expected {} value(s), found {}",
                line, expected, found
            ),
        }
    }
}

impl std::error::Error for ParseError {}

/// Reads a problem instance from the whitespace-delimited text format:
///
/// ```text
/// num_subjects
/// student_count per subject (num_subjects integers)
/// num_rooms
/// seat_count per room (num_rooms integers)
/// num_pairs
/// one "s1 s2" conflict pair per line (num_pairs lines)
/// ```
pub fn read_problem(path: impl AsRef<Path>) -> Result<TimetableInput, String> {
    let text = fs::read_to_string(path.as_ref())
        .map_err(|e| format!("cannot read {}: {}", path.as_ref().display(), e))?;
    parse_problem(&text).map_err(|e| e.to_string())
}

pub fn parse_problem(text: &str) -> Result<TimetableInput, ParseError> {
    let mut lines = text
        .lines()
        .enumerate()
        .map(|(i, l)| (i + 1, l))
        .filter(|(_, l)| !l.trim().is_empty());

    let num_subjects = read_count(&mut lines, "the subject count")?;
    let student_counts = read_row(&mut lines, num_subjects, "the per-subject student counts")?;
    let num_rooms = read_count(&mut lines, "the room count")?;
    let seat_counts = read_row(&mut lines, num_rooms, "the per-room seat counts")?;
    let num_pairs = read_count(&mut lines, "the conflict pair count")?;

    // sized by the lines actually present, not the file-supplied count
    let mut conflicts = Vec::new();
    for _ in 0..num_pairs {
        let pair = read_row(&mut lines, 2, "a conflict pair line")?;
        conflicts.push((pair[0] as usize, pair[1] as usize));
    }

    Ok(TimetableInput {
        student_counts,
        seat_counts,
        conflicts,
    })
}

fn read_tokens<'a>(
    lines: &mut impl Iterator<Item = (usize, &'a str)>,
    expected: &'static str,
) -> Result<(usize, Vec<u32>), ParseError> {
    let (line, text) = lines.next().ok_or(ParseError::MissingLine { expected })?;
    let mut values = Vec::new();
    for token in text.split_whitespace() {
        let value = token.parse::<u32>().map_err(|_| ParseError::BadInteger {
            line,
            token: token.to_string(),
        })?;
        values.push(value);
    }
    Ok((line, values))
}

fn read_count<'a>(
    lines: &mut impl Iterator<Item = (usize, &'a str)>,
    expected: &'static str,
) -> Result<usize, ParseError> {
    let (line, values) = read_tokens(lines, expected)?;
    if values.len() != 1 {
        return Err(ParseError::WrongTokenCount {
            line,
            expected: 1,
            found: values.len(),
        });
    }
    Ok(values[0] as usize)
}

fn read_row<'a>(
    lines: &mut impl Iterator<Item = (usize, &'a str)>,
    expected_len: usize,
    expected: &'static str,
) -> Result<Vec<u32>, ParseError> {
    let (line, values) = read_tokens(lines, expected)?;
    if values.len() != expected_len {
        return Err(ParseError::WrongTokenCount {
            line,
            expected: expected_len,
            found: values.len(),
        });
    }
    Ok(values)
}
