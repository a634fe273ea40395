use crate::dto::quiz_dto::{QuizGradeReport, ReviewItem, SelectedAnswer};
use crate::models::quiz::Quiz;

pub struct GradingService;

impl GradingService {
    /// Score a submitted quiz. One point per question; an unanswered
    /// question counts as wrong. Wrong and unanswered questions land in
    /// the review list together with the correct option and explanation.
    pub fn grade(quiz: &Quiz, answers: &[SelectedAnswer]) -> QuizGradeReport {
        let total = quiz.questions.len() as i32;
        let mut score: i32 = 0;
        let mut review: Vec<ReviewItem> = Vec::new();

        for q in &quiz.questions {
            let selected = answers
                .iter()
                .find(|a| a.question_id == q.id)
                .map(|a| a.selected.trim().to_string())
                .filter(|s| !s.is_empty());

            let is_correct = selected
                .as_deref()
                .map(|s| s == q.correct_answer.trim())
                .unwrap_or(false);

            if is_correct {
                score += 1;
            } else {
                review.push(ReviewItem {
                    question_id: q.id,
                    question: q.question.clone(),
                    selected,
                    correct: q.correct_answer.clone(),
                    explanation: q.explanation.clone(),
                });
            }
        }

        let percentage = if total > 0 {
            (f64::from(score) / f64::from(total) * 100.0 * 100.0).round() / 100.0
        } else {
            0.0
        };

        QuizGradeReport {
            score,
            total,
            percentage,
            review,
        }
    }
}
