use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Question {
    pub id: String,
    pub question_text: String,
    pub question_type: QuestionType,
    /// A question may be shared by several quizzes.
    pub quizzes: Vec<String>,
    pub options: Vec<String>,
    /// Indices into `options`, stored as strings.
    pub answers: Vec<String>,
    #[serde(default)]
    pub images: Vec<String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum QuestionType {
    SingleAnswer,
    MultipleAnswer,
}

/// Projection of a question to the fields grading needs.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct AnswerKey {
    pub id: String,
    pub answers: Vec<String>,
}

impl Question {
    pub fn new(
        question_text: &str,
        question_type: QuestionType,
        quizzes: Vec<String>,
        options: Vec<String>,
        answers: Vec<String>,
    ) -> Self {
        Question {
            id: ObjectId::new().to_hex(),
            question_text: question_text.to_string(),
            question_type,
            quizzes,
            options,
            answers,
            images: Vec::new(),
        }
    }

    /// Every canonical answer must parse as an index into the option list.
    pub fn has_valid_answer_indices(&self) -> bool {
        !self.answers.is_empty()
            && self
                .answers
                .iter()
                .all(|a| matches!(a.parse::<usize>(), Ok(idx) if idx < self.options.len()))
    }

    pub fn answer_key(&self) -> AnswerKey {
        AnswerKey {
            id: self.id.clone(),
            answers: self.answers.clone(),
        }
    }
}
