//! Prompt templates and builders for the interview flow.
//!
//! The grading template's first-line-score rule is what `parser::parse_grade`
//! reads; change them together.

use crate::interview::models::SessionParameters;

/// How many questions a session asks for unless configured otherwise.
pub const DEFAULT_QUESTION_COUNT: usize = 8;

/// Placeholder used when no company is given.
pub const GENERIC_COMPANY: &str = "generic";
/// Placeholder used when no program is given.
pub const GENERAL_PROGRAM: &str = "general";

/// Question generation template.
/// Replace: {count}, {role}, {company}, {program}
pub const QUESTION_PROMPT_TEMPLATE: &str = r#"Search your knowledge of common interview practices for the role below and write {count} interview questions a real interviewer would ask.

Role: {role}
Company: {company}
Program: {program}

Requirements:
1. Write exactly {count} questions, tailored to the role, company and program above.
2. Mix the categories: behavioral, technical and role-specific.
3. End every question with its category in parentheses, exactly one of: (Behavioral), (Technical), (Role-Specific)
4. Put each question on its own line, numbered "1.", "2.", and so on.
5. Output the numbered list only. No introduction, no closing remarks.

Example line:
1. Tell me about a time you disagreed with a teammate and how you resolved it. (Behavioral)"#;

/// Grading template.
/// Replace: {role}, {company}, {program}, {question}, {answer}
pub const GRADING_PROMPT_TEMPLATE: &str = r#"You are grading a candidate's answer in a mock interview.

Role: {role}
Company: {company}
Program: {program}

Question:
{question}

Candidate's answer:
{answer}

Respond in this EXACT order:
Line 1: ONLY the score as a whole number from 1 to 10. Nothing else on that line.
Then: a short explanation of the score (two or three sentences).
Then: exactly three suggestions for improving the answer, one per line."#;

/// Builds the prompt asking for `count` role-tailored interview questions.
///
/// Precondition: `params.role` is non-empty. The session controller checks this.
pub fn build_question_prompt(params: &SessionParameters, count: usize) -> String {
    let count = count.to_string();
    fill_template(
        QUESTION_PROMPT_TEMPLATE,
        &[
            ("count", count.as_str()),
            ("role", params.role.trim()),
            ("company", params.company().unwrap_or(GENERIC_COMPANY)),
            ("program", params.program().unwrap_or(GENERAL_PROGRAM)),
        ],
    )
}

/// Builds the prompt asking the model to score and critique one answer.
pub fn build_grading_prompt(params: &SessionParameters, question: &str, answer: &str) -> String {
    fill_template(
        GRADING_PROMPT_TEMPLATE,
        &[
            ("role", params.role.trim()),
            ("company", params.company().unwrap_or(GENERIC_COMPANY)),
            ("program", params.program().unwrap_or(GENERAL_PROGRAM)),
            ("question", question.trim()),
            ("answer", answer.trim()),
        ],
    )
}

/// Replaces each `{name}` in `template` with its value in one left-to-right
/// pass. Inserted values are never scanned again, and unknown `{...}` runs are
/// copied through unchanged.
fn fill_template(template: &str, values: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let tail = &rest[open..];
        let filled = tail[1..].find('}').and_then(|close| {
            let key = &tail[1..1 + close];
            values
                .iter()
                .find(|(name, _)| *name == key)
                .map(|(_, value)| (*value, close + 2))
        });
        match filled {
            Some((value, consumed)) => {
                out.push_str(value);
                rest = &tail[consumed..];
            }
            None => {
                out.push('{');
                rest = &tail[1..];
            }
        }
    }

    out.push_str(rest);
    out
}
