use axum::{
    extract::State,
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use validator::Validate;

use crate::dto::quiz_dto::{ExportQuizPayload, GenerateQuizPayload, GradeQuizPayload};
use crate::error::{Error, Result};
use crate::services::export_service::ExportService;
use crate::services::grading_service::GradingService;
use crate::AppState;

#[utoipa::path(
    post,
    path = "/api/quiz/generate",
    request_body = GenerateQuizPayload,
    responses(
        (status = 200, description = "Quiz generated", body = Quiz),
        (status = 400, description = "Invalid topic or question count"),
        (status = 502, description = "Provider error or unusable model output"),
    ),
)]
pub async fn generate_quiz(
    State(state): State<AppState>,
    Json(payload): Json<GenerateQuizPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let cfg = crate::config::get_config();
    let count = payload.count.min(cfg.max_questions);

    let quiz = state
        .ai_service
        .generate_quiz(&payload.topic, payload.difficulty, count)
        .await?;
    Ok(Json(quiz))
}

#[utoipa::path(
    post,
    path = "/api/quiz/grade",
    request_body = GradeQuizPayload,
    responses(
        (status = 200, description = "Score and review for the submitted answers", body = QuizGradeReport),
        (status = 400, description = "Empty quiz"),
    ),
)]
pub async fn grade_quiz(
    Json(payload): Json<GradeQuizPayload>,
) -> Result<impl IntoResponse> {
    if payload.quiz.questions.is_empty() {
        return Err(Error::InvalidRequest(
            "Quiz has no questions to grade".to_string(),
        ));
    }
    let report = GradingService::grade(&payload.quiz, &payload.answers);
    Ok(Json(report))
}

#[utoipa::path(
    post,
    path = "/api/quiz/export",
    request_body = ExportQuizPayload,
    responses(
        (status = 200, description = "Quiz rendered as a PDF document"),
        (status = 400, description = "Empty quiz"),
        (status = 500, description = "PDF rendering failed"),
    ),
)]
pub async fn export_quiz(
    Json(payload): Json<ExportQuizPayload>,
) -> Result<impl IntoResponse> {
    if payload.quiz.questions.is_empty() {
        return Err(Error::InvalidRequest(
            "Quiz has no questions to export".to_string(),
        ));
    }

    let buffer = ExportService::generate_quiz_pdf(&payload.quiz, payload.include_answer_key)?;

    let filename = format!(
        "quiz_{}_{}.pdf",
        sanitize_for_filename(&payload.quiz.topic),
        chrono::Utc::now().format("%Y%m%d")
    );
    let disposition = format!("attachment; filename=\"{}\"", filename);

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        buffer,
    ))
}

fn sanitize_for_filename(topic: &str) -> String {
    let cleaned: String = topic
        .trim()
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { '_' })
        .collect();
    if cleaned.is_empty() {
        "quiz".to_string()
    } else {
        cleaned.to_lowercase()
    }
}
