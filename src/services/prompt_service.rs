use crate::error::{Error, Result};
use crate::models::quiz::Difficulty;

/// Output-contract rules sent ahead of every generation request. The model
/// is told to answer with bare JSON so the parser has as little free text
/// to wade through as possible.
const OUTPUT_RULES: &str = r#"STRICT RULES:
- Output ONLY valid JSON
- No explanations outside the JSON
- No markdown
- No extra text
- No code blocks
- Every question has exactly 4 options
- correct_answer must be the exact text of one of the options
- Keep explanations short and clear

JSON format:
{
  "quiz_title": "string",
  "questions": [
    {
      "id": 1,
      "question": "string",
      "options": ["string", "string", "string", "string"],
      "correct_answer": "string",
      "explanation": "string"
    }
  ]
}"#;

/// Build the user prompt for a quiz generation request.
///
/// Pure string formatting; the same inputs always produce the same prompt.
/// Rejects empty topics and zero counts before anything is sent anywhere.
pub fn build_quiz_prompt(topic: &str, difficulty: Difficulty, count: u32) -> Result<String> {
    let topic = topic.trim();
    if topic.is_empty() {
        return Err(Error::InvalidRequest("Topic must not be empty".to_string()));
    }
    if count == 0 {
        return Err(Error::InvalidRequest(
            "Question count must be at least 1".to_string(),
        ));
    }

    Ok(format!(
        "Generate a multiple-choice quiz.\n\n{rules}\n\nTopic: {topic}\nDifficulty: {difficulty}\nNumber of questions: {count}",
        rules = OUTPUT_RULES,
        topic = topic,
        difficulty = difficulty,
        count = count,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_names_topic_difficulty_and_count() {
        let prompt = build_quiz_prompt("Solar System", Difficulty::Easy, 5).unwrap();
        assert!(prompt.contains("Topic: Solar System"));
        assert!(prompt.contains("Difficulty: easy"));
        assert!(prompt.contains("Number of questions: 5"));
    }

    #[test]
    fn prompt_is_deterministic() {
        let a = build_quiz_prompt("Rust", Difficulty::Hard, 3).unwrap();
        let b = build_quiz_prompt("Rust", Difficulty::Hard, 3).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn empty_topic_is_rejected() {
        let err = build_quiz_prompt("   ", Difficulty::Medium, 5).unwrap_err();
        assert!(matches!(err, Error::InvalidRequest(_)));
    }

    #[test]
    fn zero_count_is_rejected() {
        let err = build_quiz_prompt("Chemistry", Difficulty::Medium, 0).unwrap_err();
        assert!(matches!(err, Error::InvalidRequest(_)));
    }
}
