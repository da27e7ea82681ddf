use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::domain::question::QuestionType;
use crate::models::domain::user::UserRole;

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: String,

    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 8, max = 128))]
    pub password: String,

    pub role: UserRole,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SignInRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 1))]
    pub password: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateQuizRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: String,

    pub topics: Option<Vec<String>>,

    #[validate(range(min = 1, max = 600))]
    pub total_time: i64, // minutes
}

// Serialize is needed because the batch-level length check below records the
// offending value in its validation error params.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct QuestionData {
    #[validate(length(min = 1))]
    pub question_text: String,

    pub question_type: QuestionType,

    #[validate(length(min = 1))]
    pub quizzes: Vec<String>,

    #[validate(length(min = 2))]
    pub options: Vec<String>,

    #[validate(length(min = 1))]
    pub answers: Vec<String>,

    #[serde(default)]
    pub images: Vec<String>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateQuestionsRequest {
    #[validate(length(min = 1))]
    pub questions_data: Vec<QuestionData>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct EnrollRequest {
    pub quiz_id: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SaveStartTimeRequest {
    pub quiz_id: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SubmittedQuestion {
    pub id: String,
    pub answers: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SubmitQuizRequest {
    pub quiz_id: String,
    pub submitted_questions: Vec<SubmittedQuestion>,
}
