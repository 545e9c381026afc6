use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single interview question. Category tags such as `(Behavioral)` stay
/// embedded in the text.
pub type Question = String;

/// Who the candidate is practising for. Fixed for the lifetime of a session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionParameters {
    pub role: String,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub program: Option<String>,
}

impl SessionParameters {
    pub fn new(
        role: impl Into<String>,
        company: Option<String>,
        program: Option<String>,
    ) -> Self {
        Self {
            role: role.into(),
            company,
            program,
        }
    }

    pub fn has_role(&self) -> bool {
        !self.role.trim().is_empty()
    }

    /// Company name, or `None` when absent or blank.
    pub fn company(&self) -> Option<&str> {
        non_blank(self.company.as_deref())
    }

    /// Program name, or `None` when absent or blank.
    pub fn program(&self) -> Option<&str> {
        non_blank(self.program.as_deref())
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Score and critique for one answer, as read back from the model.
/// `score` is whatever integer the model put on its first line; 1–10 is
/// requested but not enforced.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GradeResult {
    pub score: i64,
    pub feedback: String,
}

/// One graded answer. Never modified after it lands in the history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HistoryEntry {
    pub question: Question,
    pub answer: String,
    pub score: i64,
    pub feedback: String,
    pub answered_at: DateTime<Utc>,
}

impl HistoryEntry {
    pub fn new(question: Question, answer: String, grade: GradeResult) -> Self {
        Self {
            question,
            answer,
            score: grade.score,
            feedback: grade.feedback,
            answered_at: Utc::now(),
        }
    }
}
