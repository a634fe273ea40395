use crate::error::{Error, Result};
use crate::models::quiz::{Difficulty, Quiz, QuizQuestion};
use serde_json::Value as JsonValue;

/// Pull the first JSON object out of free-form model output.
///
/// Models are told to answer with bare JSON but still wrap it in code
/// fences or chat filler often enough that we slice from the first `{`
/// to the last `}` instead of trusting the whole body.
pub fn extract_json(text: &str) -> Option<&str> {
    let mut text = text.trim();
    if let Some(stripped) = text.strip_prefix("```json") {
        text = stripped;
    } else if let Some(stripped) = text.strip_prefix("```") {
        text = stripped;
    }
    if let Some(stripped) = text.strip_suffix("```") {
        text = stripped;
    }
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    if end < start {
        return None;
    }
    Some(&text[start..=end])
}

/// Parse raw model output into a validated [`Quiz`].
///
/// Tolerated variance: code fences and chat filler around the JSON,
/// options given as an array or as a letter-keyed object, the correct
/// answer marked by option text, by letter (`"B"`, `"b)"`, `"C."`,
/// `"B. text"`), or by index, inconsistent ids, duplicate questions,
/// and over-delivery (extra questions are truncated).
///
/// Rejected per question, never repaired: empty question text, fewer
/// than two options, or a correct-answer marker that does not resolve
/// to one of the options. A correct answer is never invented.
///
/// Recovery policy: if fewer than `requested` valid questions survive,
/// the whole parse fails with [`Error::InsufficientQuestions`] rather
/// than returning a partial quiz.
pub fn parse_quiz(
    raw: &str,
    topic: &str,
    difficulty: Difficulty,
    requested: usize,
) -> Result<Quiz> {
    let json_text = extract_json(raw)
        .ok_or_else(|| Error::Parse("Model output contains no JSON object".to_string()))?;
    let value: JsonValue = serde_json::from_str(json_text)
        .map_err(|e| Error::Parse(format!("Model output is not valid JSON: {}", e)))?;

    let title = value
        .get("quiz_title")
        .or_else(|| value.get("title"))
        .and_then(|t| t.as_str())
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| format!("{} Quiz", topic));

    let raw_questions = value
        .get("questions")
        .and_then(|q| q.as_array())
        .cloned()
        .unwrap_or_default();

    let mut questions: Vec<QuizQuestion> = Vec::new();
    let mut seen: Vec<String> = Vec::new();

    for val in &raw_questions {
        let Some(mut q) = coerce_question(val) else {
            continue;
        };
        let key = normalize(&q.question);
        if seen.contains(&key) {
            continue;
        }
        seen.push(key);
        q.id = questions.len() as i32 + 1;
        questions.push(q);
        if questions.len() == requested {
            break;
        }
    }

    if questions.len() < requested {
        return Err(Error::InsufficientQuestions {
            found: questions.len(),
            requested,
        });
    }

    Ok(Quiz {
        title,
        topic: topic.trim().to_string(),
        difficulty,
        questions,
    })
}

/// Turn one JSON entry into a question, or drop it.
fn coerce_question(val: &JsonValue) -> Option<QuizQuestion> {
    let question = val
        .get("question")
        .or_else(|| val.get("prompt"))
        .or_else(|| val.get("text"))
        .and_then(|q| q.as_str())
        .map(str::trim)
        .filter(|q| !q.is_empty())?
        .to_string();

    let options = coerce_options(val.get("options")?)?;
    if options.len() < 2 {
        return None;
    }

    let correct_answer = resolve_correct_answer(val.get("correct_answer")?, &options)?;

    let explanation = val
        .get("explanation")
        .and_then(|e| e.as_str())
        .map(str::trim)
        .filter(|e| !e.is_empty())
        .map(|e| e.to_string());

    Some(QuizQuestion {
        id: 0,
        question,
        options,
        correct_answer,
        explanation,
    })
}

/// Options arrive either as `["a", "b", ...]` or as `{"A": "a", "B": "b"}`.
/// Letter-keyed objects are ordered by key so option order stays stable.
fn coerce_options(val: &JsonValue) -> Option<Vec<String>> {
    if let Some(arr) = val.as_array() {
        let options: Vec<String> = arr
            .iter()
            .filter_map(|o| o.as_str())
            .map(str::trim)
            .filter(|o| !o.is_empty())
            .map(|o| o.to_string())
            .collect();
        return Some(options);
    }
    if let Some(map) = val.as_object() {
        let mut entries: Vec<(&String, &JsonValue)> = map.iter().collect();
        entries.sort_by_key(|(k, _)| k.to_ascii_uppercase());
        let options: Vec<String> = entries
            .iter()
            .filter_map(|(_, v)| v.as_str())
            .map(str::trim)
            .filter(|o| !o.is_empty())
            .map(|o| o.to_string())
            .collect();
        return Some(options);
    }
    None
}

/// Resolve the correct-answer marker to the exact text of one option.
/// Returns `None` when the marker cannot be matched; the caller drops
/// the question instead of guessing.
fn resolve_correct_answer(val: &JsonValue, options: &[String]) -> Option<String> {
    if let Some(idx) = val.as_u64() {
        return options.get(idx as usize).cloned();
    }

    let text = val.as_str()?.trim();
    if text.is_empty() {
        return None;
    }

    // Exact or case-insensitive match on the option text itself.
    if let Some(opt) = options.iter().find(|o| o.as_str() == text) {
        return Some(opt.clone());
    }
    if let Some(opt) = options
        .iter()
        .find(|o| o.eq_ignore_ascii_case(text))
    {
        return Some(opt.clone());
    }

    // A bare letter, possibly decorated: "B", "b)", "C.".
    let stripped = text.trim_end_matches(['.', ')', ':']).trim();
    if stripped.len() == 1 {
        let c = stripped.chars().next()?.to_ascii_uppercase();
        if c.is_ascii_uppercase() {
            let idx = (c as u8 - b'A') as usize;
            return options.get(idx).cloned();
        }
        if let Some(d) = c.to_digit(10) {
            // Models that number options usually start from 1; "0" falls
            // through to the 0-based numeric parse below.
            if let Some(opt) = (d as usize)
                .checked_sub(1)
                .and_then(|idx| options.get(idx))
            {
                return Some(opt.clone());
            }
        }
    }

    // "B. option text" style: strip the letter prefix and match the rest.
    if let Some(rest) = strip_letter_prefix(text) {
        if let Some(opt) = options.iter().find(|o| o.eq_ignore_ascii_case(rest)) {
            return Some(opt.clone());
        }
    }

    // A numeric string index.
    if let Ok(idx) = text.parse::<usize>() {
        return options.get(idx).cloned();
    }

    None
}

fn strip_letter_prefix(text: &str) -> Option<&str> {
    let mut chars = text.chars();
    let first = chars.next()?;
    if !first.is_ascii_alphabetic() {
        return None;
    }
    let rest = chars.as_str();
    let rest = rest.strip_prefix(['.', ')', ':'])?;
    let rest = rest.trim();
    if rest.is_empty() {
        None
    } else {
        Some(rest)
    }
}

fn normalize(text: &str) -> String {
    text.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}
