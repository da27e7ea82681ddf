use serde::Serialize;

use crate::models::domain::question::{Question, QuestionType};
use crate::models::domain::quiz::{Quiz, QuizResult};
use crate::models::domain::user::UserRole;

#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub status: String,
}

impl StatusResponse {
    pub fn success() -> Self {
        StatusResponse {
            status: "success".to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub status: String,
    pub token: String,
    pub name: String,
    pub email: String,
    pub role: UserRole,
}

#[derive(Debug, Serialize)]
pub struct QuizResponse {
    pub status: String,
    pub quiz: Quiz,
}

#[derive(Debug, Serialize)]
pub struct QuizzesResponse {
    pub status: String,
    pub quizzes: Vec<Quiz>,
}

/// Question as shown to a quiz taker; canonical answers are stripped unless
/// the requester owns the quiz.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionDto {
    pub id: String,
    pub question_text: String,
    pub question_type: QuestionType,
    pub options: Vec<String>,
    pub answers: Vec<String>,
    pub images: Vec<String>,
}

impl QuestionDto {
    pub fn from_question(question: Question, include_answers: bool) -> Self {
        QuestionDto {
            id: question.id,
            question_text: question.question_text,
            question_type: question.question_type,
            options: question.options,
            answers: if include_answers {
                question.answers
            } else {
                Vec::new()
            },
            images: question.images,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct QuestionsResponse {
    pub status: String,
    pub questions: Vec<QuestionDto>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionCountResponse {
    pub status: String,
    pub total_questions: usize,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StartTimeResponse {
    pub status: String,
    pub start_time: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitQuizResultDto {
    pub marks: f64,
    pub number_of_right_answers: u32,
    pub number_of_wrong_answers: u32,
    pub number_skipped_questions: u32,
    pub total_time_taken: i64,
}

impl From<QuizResult> for SubmitQuizResultDto {
    fn from(result: QuizResult) -> Self {
        SubmitQuizResultDto {
            marks: result.marks,
            number_of_right_answers: result.number_of_right_answers,
            number_of_wrong_answers: result.number_of_wrong_answers,
            number_skipped_questions: result.number_skipped_questions,
            total_time_taken: result.total_time_taken,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SubmitQuizResponse {
    pub status: String,
    pub result: SubmitQuizResultDto,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizHistoryEntry {
    pub quiz_id: String,
    pub quiz_name: String,
    pub quiz_duration: i64,
    pub quiz_result: Option<SubmitQuizResultDto>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizHistoryResponse {
    pub status: String,
    pub quizzes_details: Vec<QuizHistoryEntry>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::domain::question::QuestionType;

    fn make_question() -> Question {
        Question::new(
            "Pick two",
            QuestionType::MultipleAnswer,
            vec!["quiz-1".to_string()],
            vec!["a".to_string(), "b".to_string(), "c".to_string()],
            vec!["0".to_string(), "2".to_string()],
        )
    }

    #[test]
    fn question_dto_strips_answers_for_non_owners() {
        let dto = QuestionDto::from_question(make_question(), false);
        assert!(dto.answers.is_empty());
        assert_eq!(dto.options.len(), 3);
    }

    #[test]
    fn question_dto_keeps_answers_for_owner() {
        let dto = QuestionDto::from_question(make_question(), true);
        assert_eq!(dto.answers, vec!["0".to_string(), "2".to_string()]);
    }

    #[test]
    fn submit_result_dto_mirrors_domain_result() {
        let result = QuizResult {
            examinee_id: "examinee-1".to_string(),
            marks: 1.0,
            number_of_right_answers: 1,
            number_of_wrong_answers: 1,
            number_skipped_questions: 1,
            total_time_taken: 10,
        };

        let dto = SubmitQuizResultDto::from(result);
        assert_eq!(dto.marks, 1.0);
        assert_eq!(dto.number_skipped_questions, 1);
        assert_eq!(dto.total_time_taken, 10);
    }

    #[test]
    fn response_bodies_use_camel_case_keys() {
        let response = StartTimeResponse {
            status: "success".to_string(),
            start_time: chrono::Utc::now(),
        };
        let json = serde_json::to_value(&response).unwrap();
        assert!(json.get("startTime").is_some());

        let dto = SubmitQuizResultDto {
            marks: 1.0,
            number_of_right_answers: 1,
            number_of_wrong_answers: 1,
            number_skipped_questions: 1,
            total_time_taken: 10,
        };
        let json = serde_json::to_value(&dto).unwrap();
        assert!(json.get("numberOfRightAnswers").is_some());
        assert!(json.get("numberSkippedQuestions").is_some());
        assert!(json.get("totalTimeTaken").is_some());

        let question = QuestionDto::from_question(make_question(), false);
        let json = serde_json::to_value(&question).unwrap();
        assert!(json.get("questionText").is_some());
        assert_eq!(json["questionType"], "multipleAnswer");
    }
}
