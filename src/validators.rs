use once_cell::sync::Lazy;
use regex::Regex;

use crate::models::dto::request::SubmittedQuestion;

static OBJECT_ID_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[0-9a-fA-F]{24}$").expect("OBJECT_ID_REGEX is a valid regex pattern")
});

/// Checks that an identifier looks like a MongoDB ObjectId hex string.
pub fn is_valid_object_id(id: &str) -> bool {
    OBJECT_ID_REGEX.is_match(id)
}

/// Shape check for a submitted-answers payload: every entry must carry a
/// well-formed question id. Empty answer lists are allowed (skipped question).
pub fn are_valid_submitted_questions(submitted: &[SubmittedQuestion]) -> bool {
    !submitted.is_empty() && submitted.iter().all(|q| is_valid_object_id(&q.id))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn submitted(id: &str, answers: &[&str]) -> SubmittedQuestion {
        SubmittedQuestion {
            id: id.to_string(),
            answers: answers.iter().map(|a| a.to_string()).collect(),
        }
    }

    #[test]
    fn test_valid_object_id() {
        assert!(is_valid_object_id("507f1f77bcf86cd799439011"));
        assert!(is_valid_object_id("ABCDEFabcdef012345678901"));
    }

    #[test]
    fn test_invalid_object_id() {
        assert!(!is_valid_object_id(""));
        assert!(!is_valid_object_id("not-an-id"));
        assert!(!is_valid_object_id("507f1f77bcf86cd79943901")); // 23 chars
        assert!(!is_valid_object_id("507f1f77bcf86cd7994390111")); // 25 chars
        assert!(!is_valid_object_id("507f1f77bcf86cd79943901g")); // non-hex
    }

    #[test]
    fn test_submitted_questions_shape() {
        let good = vec![
            submitted("507f1f77bcf86cd799439011", &["0", "2"]),
            submitted("507f1f77bcf86cd799439012", &[]),
        ];
        assert!(are_valid_submitted_questions(&good));

        let bad_id = vec![submitted("q1", &["0"])];
        assert!(!are_valid_submitted_questions(&bad_id));

        assert!(!are_valid_submitted_questions(&[]));
    }
}
