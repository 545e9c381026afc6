//! The two model round-trips of an interview, without any session state:
//! prompt → model → parse.
//!
//! These back the stateless boundary endpoints and are what the session
//! controller calls internally.

use tracing::{debug, warn};

use crate::errors::InterviewError;
use crate::interview::models::{GradeResult, Question, SessionParameters};
use crate::interview::parser::{parse_grade, parse_questions};
use crate::interview::prompts::{build_grading_prompt, build_question_prompt};
use crate::llm_client::LanguageModel;

/// Rejects parameters without a usable role. Runs before any outbound call.
pub fn validate_parameters(params: &SessionParameters) -> Result<(), InterviewError> {
    if !params.has_role() {
        return Err(InterviewError::Validation("role cannot be empty".to_string()));
    }
    Ok(())
}

/// Asks the model for `count` questions and parses whatever comes back.
/// An empty list is a valid result.
pub async fn generate_questions(
    llm: &dyn LanguageModel,
    params: &SessionParameters,
    count: usize,
) -> Result<Vec<Question>, InterviewError> {
    validate_parameters(params)?;

    let prompt = build_question_prompt(params, count);
    let text = llm.complete(&prompt).await.map_err(|e| {
        warn!("Question generation failed for role '{}': {e}", params.role);
        InterviewError::Upstream(e)
    })?;

    let questions = parse_questions(&text);
    if questions.len() != count {
        debug!(
            "Model returned {} questions (requested {count})",
            questions.len()
        );
    }
    Ok(questions)
}

/// Asks the model to score one answer and parses the reply.
pub async fn grade_answer(
    llm: &dyn LanguageModel,
    params: &SessionParameters,
    question: &str,
    answer: &str,
) -> Result<GradeResult, InterviewError> {
    validate_parameters(params)?;
    if question.trim().is_empty() {
        return Err(InterviewError::Validation(
            "question cannot be empty".to_string(),
        ));
    }

    let prompt = build_grading_prompt(params, question, answer);
    let text = llm.complete(&prompt).await.map_err(|e| {
        warn!("Grading failed for role '{}': {e}", params.role);
        InterviewError::Upstream(e)
    })?;

    Ok(parse_grade(&text))
}
