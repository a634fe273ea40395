use crate::models::quiz::{Difficulty, Quiz};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct GenerateQuizPayload {
    #[validate(length(min = 1, message = "Topic must not be empty"))]
    pub topic: String,
    pub difficulty: Difficulty,
    #[validate(range(min = 1, message = "Question count must be at least 1"))]
    pub count: u32,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct ExportQuizPayload {
    pub quiz: Quiz,
    #[serde(default)]
    pub include_answer_key: bool,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct GradeQuizPayload {
    pub quiz: Quiz,
    pub answers: Vec<SelectedAnswer>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct SelectedAnswer {
    pub question_id: i32,
    /// Exact text of the chosen option.
    pub selected: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct QuizGradeReport {
    pub score: i32,
    pub total: i32,
    pub percentage: f64,
    pub review: Vec<ReviewItem>,
}

/// One wrong or unanswered question, with what the right answer was.
#[derive(Debug, Serialize, ToSchema)]
pub struct ReviewItem {
    pub question_id: i32,
    pub question: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selected: Option<String>,
    pub correct: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
}
