//! Session Controller — owns one candidate's practice run.
//!
//! Two phases only: unpopulated (no questions) and populated. State changes
//! happen at exactly two points, after a successful question fetch and after a
//! successful grade. A failed model call changes nothing.

use std::sync::Arc;

use serde::Serialize;
use tracing::info;

use crate::errors::InterviewError;
use crate::interview::models::{GradeResult, HistoryEntry, Question, SessionParameters};
use crate::interview::service::{generate_questions, grade_answer, validate_parameters};
use crate::llm_client::LanguageModel;

/// Everything a session knows. History is most-recent-first.
#[derive(Debug, Clone, Default)]
pub struct SessionState {
    pub parameters: SessionParameters,
    pub questions: Vec<Question>,
    pub current_index: usize,
    pub history: Vec<HistoryEntry>,
}

/// Read-only view of a session for callers that render it.
#[derive(Debug, Clone, Serialize)]
pub struct SessionSnapshot {
    pub parameters: SessionParameters,
    pub questions: Vec<Question>,
    pub current_index: usize,
    pub current_question: Option<Question>,
    pub history: Vec<HistoryEntry>,
}

pub struct SessionController {
    llm: Arc<dyn LanguageModel>,
    question_count: usize,
    state: SessionState,
}

impl SessionController {
    pub fn with_question_count(llm: Arc<dyn LanguageModel>, question_count: usize) -> Self {
        Self {
            llm,
            question_count,
            state: SessionState::default(),
        }
    }

    /// Fetches a fresh question set for `params`.
    ///
    /// On success the parameters and questions are replaced, the index goes back
    /// to 0 and the history is cleared. On any error the previous session is
    /// left untouched.
    pub async fn start_session(
        &mut self,
        params: SessionParameters,
    ) -> Result<&[Question], InterviewError> {
        validate_parameters(&params)?;

        let questions = generate_questions(self.llm.as_ref(), &params, self.question_count).await?;

        info!(
            "Session started for role '{}' with {} questions",
            params.role,
            questions.len()
        );

        self.state = SessionState {
            parameters: params,
            questions,
            current_index: 0,
            history: Vec::new(),
        };
        Ok(&self.state.questions)
    }

    /// Grades `answer` against the current question, records it and moves on.
    ///
    /// The index saturates at the last question, so answering the final
    /// question again is allowed and grades it again.
    pub async fn submit_answer(&mut self, answer: &str) -> Result<GradeResult, InterviewError> {
        let index = self.state.current_index;
        let question = self
            .current_question()
            .cloned()
            .ok_or_else(|| InterviewError::State("no question is currently selected".to_string()))?;

        let grade = grade_answer(
            self.llm.as_ref(),
            &self.state.parameters,
            &question,
            answer,
        )
        .await?;

        info!("Answer to question {} graded: score={}", index + 1, grade.score);

        self.state
            .history
            .insert(0, HistoryEntry::new(question, answer.to_string(), grade.clone()));
        self.state.current_index = self.clamp(index.saturating_add(1));
        Ok(grade)
    }

    pub fn current_question(&self) -> Option<&Question> {
        self.state.questions.get(self.state.current_index)
    }

    /// Jumps to `index`, saturating at the first or last question.
    pub fn go_to(&mut self, index: usize) -> usize {
        self.state.current_index = self.clamp(index);
        self.state.current_index
    }

    pub fn previous(&mut self) -> usize {
        self.go_to(self.state.current_index.saturating_sub(1))
    }

    pub fn next(&mut self) -> usize {
        self.go_to(self.state.current_index.saturating_add(1))
    }

    /// Drops questions and history. Parameters are kept.
    pub fn reset(&mut self) {
        self.state.questions.clear();
        self.state.history.clear();
        self.state.current_index = 0;
    }

    pub fn parameters(&self) -> &SessionParameters {
        &self.state.parameters
    }

    pub fn questions(&self) -> &[Question] {
        &self.state.questions
    }

    pub fn current_index(&self) -> usize {
        self.state.current_index
    }

    pub fn history(&self) -> &[HistoryEntry] {
        &self.state.history
    }

    pub fn is_populated(&self) -> bool {
        !self.state.questions.is_empty()
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            parameters: self.parameters().clone(),
            questions: self.questions().to_vec(),
            current_index: self.current_index(),
            current_question: self.current_question().cloned(),
            history: self.history().to_vec(),
        }
    }

    fn clamp(&self, index: usize) -> usize {
        index.min(self.state.questions.len().saturating_sub(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interview::prompts::DEFAULT_QUESTION_COUNT;
    use crate::interview::testing::ScriptedModel;
    use crate::llm_client::LlmError;

    const EIGHT_QUESTIONS: &str = "1. Tell me about yourself. (Behavioral)\n\
        2. Why this company? (Behavioral)\n\
        3. Explain a REST API. (Technical)\n\
        4. What is a race condition? (Technical)\n\
        5. Describe a failure. (Behavioral)\n\
        6. How do you test code? (Technical)\n\
        7. What would your first 90 days look like? (Role-Specific)\n\
        8. How do you handle on-call? (Role-Specific)";

    fn params() -> SessionParameters {
        SessionParameters::new("Backend Engineer", None, None)
    }

    fn controller(responses: Vec<Result<String, LlmError>>) -> (SessionController, Arc<ScriptedModel>) {
        let model = Arc::new(ScriptedModel::new(responses));
        (
            SessionController::with_question_count(model.clone(), DEFAULT_QUESTION_COUNT),
            model,
        )
    }

    async fn started(mut extra: Vec<Result<String, LlmError>>) -> SessionController {
        let mut responses = vec![Ok(EIGHT_QUESTIONS.to_string())];
        responses.append(&mut extra);
        let (mut session, _) = controller(responses);
        session.start_session(params()).await.unwrap();
        session
    }

    #[tokio::test]
    async fn test_start_session_populates_and_resets() {
        let session = started(vec![]).await;
        assert!(session.is_populated());
        assert_eq!(session.questions().len(), 8);
        assert_eq!(session.current_index(), 0);
        assert!(session.history().is_empty());
        assert_eq!(
            session.current_question().map(String::as_str),
            Some("Tell me about yourself. (Behavioral)")
        );
    }

    #[tokio::test]
    async fn test_restart_discards_prior_progress() {
        let mut session = started(vec![
            Ok("7\nGood.".into()),
            Ok("5\nOk.".into()),
            Ok(EIGHT_QUESTIONS.into()),
        ])
        .await;
        session.submit_answer("first").await.unwrap();
        session.submit_answer("second").await.unwrap();
        assert_eq!(session.current_index(), 2);
        assert_eq!(session.history().len(), 2);

        let other = SessionParameters::new("Data Engineer", Some("Acme".into()), None);
        session.start_session(other.clone()).await.unwrap();
        assert_eq!(session.current_index(), 0);
        assert!(session.history().is_empty());
        assert_eq!(session.parameters(), &other);
    }

    #[tokio::test]
    async fn test_start_session_rejects_empty_role() {
        let (mut session, model) = controller(vec![]);
        let err = session
            .start_session(SessionParameters::new("   ", None, None))
            .await
            .unwrap_err();
        assert!(matches!(err, InterviewError::Validation(_)));
        assert!(model.prompts().is_empty());
        assert!(!session.is_populated());
    }

    #[tokio::test]
    async fn test_start_session_upstream_failure_keeps_old_session() {
        let mut session = started(vec![
            Ok("9\nGreat.".into()),
            Err(LlmError::Api {
                status: 503,
                message: "overloaded".into(),
            }),
        ])
        .await;
        session.submit_answer("answer").await.unwrap();

        let err = session
            .start_session(SessionParameters::new("Designer", None, None))
            .await
            .unwrap_err();
        assert!(matches!(err, InterviewError::Upstream(_)));
        assert_eq!(session.parameters(), &params());
        assert_eq!(session.questions().len(), 8);
        assert_eq!(session.current_index(), 1);
        assert_eq!(session.history().len(), 1);
    }

    #[tokio::test]
    async fn test_submit_answer_records_history_most_recent_first() {
        let mut session = started(vec![
            Ok("8\nSolid answer with clear structure.".into()),
            Ok("4\nToo vague.".into()),
        ])
        .await;

        let grade = session.submit_answer("I build APIs.").await.unwrap();
        assert_eq!(
            grade,
            GradeResult {
                score: 8,
                feedback: "Solid answer with clear structure.".into()
            }
        );
        session.submit_answer("Because.").await.unwrap();

        let history = session.history();
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].question, "Why this company? (Behavioral)");
        assert_eq!(history[0].answer, "Because.");
        assert_eq!(history[0].score, 4);
        assert_eq!(history[1].question, "Tell me about yourself. (Behavioral)");
        assert_eq!(history[1].score, 8);
        assert_eq!(session.current_index(), 2);
    }

    #[tokio::test]
    async fn test_submit_answer_without_questions_is_state_error() {
        let (mut session, model) = controller(vec![]);
        let err = session.submit_answer("hello").await.unwrap_err();
        assert!(matches!(err, InterviewError::State(_)));
        assert!(session.history().is_empty());
        assert_eq!(session.current_index(), 0);
        assert!(model.prompts().is_empty());
    }

    #[tokio::test]
    async fn test_submit_answer_after_empty_question_set_is_state_error() {
        let (mut session, _) = controller(vec![Ok("\n\n".into())]);
        session.start_session(params()).await.unwrap();
        assert!(!session.is_populated());
        let err = session.submit_answer("hello").await.unwrap_err();
        assert!(matches!(err, InterviewError::State(_)));
    }

    #[tokio::test]
    async fn test_submit_answer_upstream_failure_allows_retry() {
        let mut session = started(vec![
            Err(LlmError::EmptyContent),
            Ok("6\nBetter.".into()),
        ])
        .await;
        session.next();
        let before_index = session.current_index();

        let err = session.submit_answer("try one").await.unwrap_err();
        assert!(matches!(err, InterviewError::Upstream(_)));
        assert_eq!(session.current_index(), before_index);
        assert!(session.history().is_empty());

        let grade = session.submit_answer("try two").await.unwrap();
        assert_eq!(grade.score, 6);
        assert_eq!(session.history()[0].question, "Why this company? (Behavioral)");
    }

    #[tokio::test]
    async fn test_submit_on_last_question_saturates() {
        let mut session = started(vec![Ok("5".into()), Ok("6".into())]).await;
        session.go_to(7);
        session.submit_answer("a").await.unwrap();
        assert_eq!(session.current_index(), 7);
        session.submit_answer("b").await.unwrap();
        assert_eq!(session.current_index(), 7);
        assert_eq!(session.history().len(), 2);
        assert_eq!(session.history()[0].feedback, "");
    }

    #[tokio::test]
    async fn test_navigation_saturates_at_both_ends() {
        let mut session = started(vec![]).await;
        for _ in 0..3 {
            assert_eq!(session.previous(), 0);
        }
        assert_eq!(session.go_to(100), 7);
        for _ in 0..3 {
            assert_eq!(session.next(), 7);
        }
        assert_eq!(session.go_to(3), 3);
        assert_eq!(session.previous(), 2);
        assert_eq!(session.next(), 3);
    }

    #[test]
    fn test_navigation_on_empty_session_stays_at_zero() {
        let (mut session, _) = controller(vec![]);
        assert_eq!(session.next(), 0);
        assert_eq!(session.go_to(5), 0);
        assert_eq!(session.previous(), 0);
        assert!(session.current_question().is_none());
    }

    #[tokio::test]
    async fn test_reset_keeps_parameters() {
        let mut session = started(vec![Ok("7\nNice.".into())]).await;
        session.submit_answer("answer").await.unwrap();
        session.reset();
        assert!(!session.is_populated());
        assert!(session.history().is_empty());
        assert_eq!(session.current_index(), 0);
        assert_eq!(session.parameters(), &params());
    }

    #[tokio::test]
    async fn test_question_count_reaches_prompt() {
        let model = Arc::new(ScriptedModel::new(vec![Ok("1. Only one?".into())]));
        let mut session = SessionController::with_question_count(model.clone(), 3);
        session.start_session(params()).await.unwrap();
        assert!(model.prompts()[0].contains("exactly 3 questions"));
        assert_eq!(session.questions().len(), 1);
    }

    #[tokio::test]
    async fn test_snapshot_reflects_state() {
        let session = started(vec![]).await;
        let snapshot = session.snapshot();
        assert_eq!(snapshot.current_index, 0);
        assert_eq!(snapshot.questions.len(), 8);
        assert_eq!(
            snapshot.current_question.as_deref(),
            Some("Tell me about yourself. (Behavioral)")
        );
    }
}
