use std::sync::Arc;

use validator::Validate;

use crate::{
    errors::{AppError, AppResult},
    models::domain::question::Question,
    models::domain::user::UserRole,
    models::dto::request::CreateQuestionsRequest,
    models::dto::response::QuestionDto,
    repositories::{QuestionRepository, QuizRepository},
    validators::is_valid_object_id,
};

/// What a caller is allowed to see of a quiz's questions.
pub enum QuizQuestions {
    Listing(Vec<QuestionDto>),
    /// Unenrolled examinees only learn how many questions there are.
    CountOnly(usize),
}

pub struct QuestionService {
    question_repository: Arc<dyn QuestionRepository>,
    quiz_repository: Arc<dyn QuizRepository>,
}

impl QuestionService {
    pub fn new(
        question_repository: Arc<dyn QuestionRepository>,
        quiz_repository: Arc<dyn QuizRepository>,
    ) -> Self {
        Self {
            question_repository,
            quiz_repository,
        }
    }

    /// Bulk insert of examiner-authored questions. Each canonical answer must
    /// be a valid index into its question's option list.
    pub async fn create_questions(
        &self,
        request: CreateQuestionsRequest,
    ) -> AppResult<Vec<Question>> {
        request.validate()?;
        for data in &request.questions_data {
            data.validate()?;
        }

        let mut questions = Vec::with_capacity(request.questions_data.len());
        for data in request.questions_data {
            if !data.quizzes.iter().all(|id| is_valid_object_id(id)) {
                return Err(AppError::ValidationError(
                    "Please send a valid quiz id for every question".to_string(),
                ));
            }

            let mut question = Question::new(
                &data.question_text,
                data.question_type,
                data.quizzes,
                data.options,
                data.answers,
            );
            question.images = data.images;

            if !question.has_valid_answer_indices() {
                return Err(AppError::ValidationError(format!(
                    "Answers of question '{}' must be indices into its option list",
                    question.question_text
                )));
            }
            questions.push(question);
        }

        self.question_repository.insert_many(questions).await
    }

    /// Questions of a quiz, filtered by who is asking: canonical answers are
    /// only shown to the quiz owner, unenrolled examinees get a bare count,
    /// and anyone who already submitted is turned away.
    pub async fn questions_of_quiz(
        &self,
        quiz_id: &str,
        user_id: &str,
        role: UserRole,
    ) -> AppResult<QuizQuestions> {
        if !is_valid_object_id(quiz_id) {
            return Err(AppError::ValidationError(
                "Please give a valid quiz id".to_string(),
            ));
        }

        let quiz = self
            .quiz_repository
            .find_by_id(quiz_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Quiz is not found in db".to_string()))?;

        if quiz.has_examinee_attempted(user_id) {
            return Err(AppError::AlreadyExists(
                "User already given this quiz".to_string(),
            ));
        }

        let count_only = role == UserRole::Examinee && !quiz.is_enrolled(user_id);
        let include_answers = quiz.created_by == user_id;

        let questions = self.question_repository.find_by_quiz(quiz_id).await?;
        if count_only {
            return Ok(QuizQuestions::CountOnly(questions.len()));
        }

        let listing = questions
            .into_iter()
            .map(|q| QuestionDto::from_question(q, include_answers))
            .collect();
        Ok(QuizQuestions::Listing(listing))
    }
}
