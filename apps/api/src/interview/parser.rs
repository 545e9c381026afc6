//! Response Parser — turns free-form model text into questions or a grade.
//!
//! Nothing here fails. Output that ignores the requested format degrades to an
//! empty question list or a `{score: 0, feedback: ""}` grade so the session can
//! keep moving.

use crate::interview::models::{GradeResult, Question};

/// Splits a numbered list into questions.
///
/// Each non-empty line becomes one question with any leading `N.` ordinal and
/// surrounding whitespace removed. Order is preserved and no count is enforced.
pub fn parse_questions(text: &str) -> Vec<Question> {
    split_lines(text)
        .map(|segment| strip_ordinal(segment.trim_start()).trim())
        .filter(|segment| !segment.is_empty())
        .map(str::to_owned)
        .collect()
}

/// Reads a grade: the score is the first run of digits on the first non-empty
/// line (0 if there is none), the feedback is every later line joined by a space.
///
/// The score is passed through as-is, even when outside 1–10.
pub fn parse_grade(text: &str) -> GradeResult {
    let mut lines = split_lines(text)
        .map(str::trim)
        .filter(|line| !line.is_empty());

    let Some(first) = lines.next() else {
        return GradeResult::default();
    };

    GradeResult {
        score: first_integer(first).unwrap_or(0),
        feedback: lines.collect::<Vec<_>>().join(" "),
    }
}

/// Line segments of model output. Both `\n` and `\r` end a line, so CRLF and
/// bare-CR output split the same way as plain LF.
fn split_lines(text: &str) -> impl Iterator<Item = &str> {
    text.split(['\n', '\r'])
}

/// Removes a leading `digits.` marker when it is followed by whitespace or ends
/// the segment. Anything else is returned untouched.
fn strip_ordinal(segment: &str) -> &str {
    let digits = segment.len() - segment.trim_start_matches(|c: char| c.is_ascii_digit()).len();
    if digits == 0 {
        return segment;
    }
    let Some(rest) = segment[digits..].strip_prefix('.') else {
        return segment;
    };
    match rest.chars().next() {
        None => rest,
        Some(c) if c.is_whitespace() => rest,
        Some(_) => segment,
    }
}

/// First run of ASCII digits in `line`, parsed as an integer.
fn first_integer(line: &str) -> Option<i64> {
    let start = line.find(|c: char| c.is_ascii_digit())?;
    let run = &line[start..];
    let end = run
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(run.len());
    run[..end].parse().ok()
}
