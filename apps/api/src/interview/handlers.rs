//! Axum route handlers for the Interview API.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::Number;
use uuid::Uuid;

use crate::errors::AppError;
use crate::interview::models::{GradeResult, Question, SessionParameters};
use crate::interview::service::{generate_questions, grade_answer};
use crate::interview::session::SessionSnapshot;
use crate::interview::store::SharedSession;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct QuestionsResponse {
    pub questions: Vec<Question>,
}

#[derive(Debug, Deserialize)]
pub struct GradeRequest {
    #[serde(flatten)]
    pub parameters: SessionParameters,
    pub question: String,
    pub answer: String,
}

#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub session_id: Uuid,
    #[serde(flatten)]
    pub session: SessionSnapshot,
}

#[derive(Debug, Deserialize)]
pub struct AnswerRequest {
    pub answer: String,
}

#[derive(Debug, Serialize)]
pub struct AnswerResponse {
    pub grade: GradeResult,
    pub session: SessionResponse,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum NavigateRequest {
    Previous,
    Next,
    /// Any JSON number is accepted; out-of-range targets saturate.
    GoTo { index: Number },
}

/// Maps a requested position onto `usize`: negatives go to 0, anything past
/// `usize::MAX` (including huge floats) goes to `usize::MAX`. The controller
/// then clamps to the real question range.
fn saturating_index(index: &Number) -> usize {
    if let Some(n) = index.as_u64() {
        return usize::try_from(n).unwrap_or(usize::MAX);
    }
    if index.is_i64() {
        return 0;
    }
    match index.as_f64() {
        Some(n) if n > 0.0 => n as usize,
        _ => 0,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Stateless handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/interview/questions
///
/// Generates a question set for the given role without creating a session.
pub async fn handle_generate_questions(
    State(state): State<AppState>,
    Json(params): Json<SessionParameters>,
) -> Result<Json<QuestionsResponse>, AppError> {
    let questions =
        generate_questions(state.llm.as_ref(), &params, state.config.question_count).await?;
    Ok(Json(QuestionsResponse { questions }))
}

/// POST /api/v1/interview/grade
///
/// Scores one answer to one question.
pub async fn handle_grade_answer(
    State(state): State<AppState>,
    Json(request): Json<GradeRequest>,
) -> Result<Json<GradeResult>, AppError> {
    let grade = grade_answer(
        state.llm.as_ref(),
        &request.parameters,
        &request.question,
        &request.answer,
    )
    .await?;
    Ok(Json(grade))
}

// ────────────────────────────────────────────────────────────────────────────
// Session handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/sessions
///
/// Starts a session. Nothing is registered unless question generation succeeds.
pub async fn handle_create_session(
    State(state): State<AppState>,
    Json(params): Json<SessionParameters>,
) -> Result<(StatusCode, Json<SessionResponse>), AppError> {
    let mut controller = state.sessions.new_controller();
    controller.start_session(params).await?;
    if !controller.is_populated() {
        tracing::warn!("Model output contained no questions; session starts empty");
    }
    let snapshot = controller.snapshot();

    let session_id = state.sessions.insert(controller).await;
    tracing::info!("Registered session {session_id}");

    Ok((
        StatusCode::CREATED,
        Json(SessionResponse {
            session_id,
            session: snapshot,
        }),
    ))
}

/// GET /api/v1/sessions/:id
pub async fn handle_get_session(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<SessionResponse>, AppError> {
    let session = find_session(&state, session_id).await?;
    let snapshot = session.lock().await.snapshot();
    Ok(Json(SessionResponse {
        session_id,
        session: snapshot,
    }))
}

/// POST /api/v1/sessions/:id/answers
///
/// Grades the answer to the current question. A second submission on the same
/// session waits for the first to finish.
pub async fn handle_submit_answer(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    Json(request): Json<AnswerRequest>,
) -> Result<Json<AnswerResponse>, AppError> {
    let session = find_session(&state, session_id).await?;
    let mut controller = session.lock().await;
    let grade = controller.submit_answer(&request.answer).await?;
    Ok(Json(AnswerResponse {
        grade,
        session: SessionResponse {
            session_id,
            session: controller.snapshot(),
        },
    }))
}

/// POST /api/v1/sessions/:id/navigate
pub async fn handle_navigate(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    Json(request): Json<NavigateRequest>,
) -> Result<Json<SessionResponse>, AppError> {
    let session = find_session(&state, session_id).await?;
    let mut controller = session.lock().await;
    match request {
        NavigateRequest::Previous => controller.previous(),
        NavigateRequest::Next => controller.next(),
        NavigateRequest::GoTo { index } => controller.go_to(saturating_index(&index)),
    };
    Ok(Json(SessionResponse {
        session_id,
        session: controller.snapshot(),
    }))
}

/// POST /api/v1/sessions/:id/reset
pub async fn handle_reset_session(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<SessionResponse>, AppError> {
    let session = find_session(&state, session_id).await?;
    let mut controller = session.lock().await;
    controller.reset();
    Ok(Json(SessionResponse {
        session_id,
        session: controller.snapshot(),
    }))
}

/// DELETE /api/v1/sessions/:id
pub async fn handle_delete_session(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    if !state.sessions.remove(session_id).await {
        return Err(AppError::NotFound(format!("Session {session_id} not found")));
    }
    Ok(StatusCode::NO_CONTENT)
}

async fn find_session(state: &AppState, session_id: Uuid) -> Result<SharedSession, AppError> {
    state
        .sessions
        .get(session_id)
        .await
        .ok_or_else(|| AppError::NotFound(format!("Session {session_id} not found")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn number(raw: &str) -> Number {
        serde_json::from_str(raw).unwrap()
    }

    #[test]
    fn test_saturating_index_keeps_in_range_values() {
        assert_eq!(saturating_index(&number("0")), 0);
        assert_eq!(saturating_index(&number("5")), 5);
    }

    #[test]
    fn test_saturating_index_clamps_negatives_to_zero() {
        assert_eq!(saturating_index(&number("-1")), 0);
        assert_eq!(saturating_index(&number("-9223372036854775808")), 0);
        assert_eq!(saturating_index(&number("-2.5")), 0);
    }

    #[test]
    fn test_saturating_index_clamps_huge_values_to_max() {
        assert_eq!(saturating_index(&number("1e300")), usize::MAX);
        assert_eq!(
            saturating_index(&number("99999999999999999999999")),
            usize::MAX
        );
    }
}
