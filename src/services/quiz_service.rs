use std::sync::Arc;

use validator::Validate;

use crate::{
    errors::{AppError, AppResult},
    models::domain::{AttemptTimer, Quiz},
    models::dto::request::CreateQuizRequest,
    models::dto::response::{QuizHistoryEntry, SubmitQuizResultDto},
    repositories::{AttemptTimerRepository, QuizRepository},
    validators::is_valid_object_id,
};

/// Quiz authoring, enrollment and attempt timing. Attempt state is never
/// stored explicitly; it is inferred from which records exist (enrolled set
/// membership, a live timer, an embedded result).
pub struct QuizService {
    quiz_repository: Arc<dyn QuizRepository>,
    timer_repository: Arc<dyn AttemptTimerRepository>,
}

impl QuizService {
    pub fn new(
        quiz_repository: Arc<dyn QuizRepository>,
        timer_repository: Arc<dyn AttemptTimerRepository>,
    ) -> Self {
        Self {
            quiz_repository,
            timer_repository,
        }
    }

    pub async fn create_quiz(&self, request: CreateQuizRequest, user_id: &str) -> AppResult<Quiz> {
        request.validate()?;

        let topics = match request.topics {
            Some(topics) if !topics.is_empty() => topics,
            _ => vec!["misc".to_string()],
        };
        let quiz = Quiz::new(&request.name, topics, user_id, request.total_time);
        self.quiz_repository.create(quiz).await
    }

    pub async fn quizzes_created_by(&self, user_id: &str) -> AppResult<Vec<Quiz>> {
        self.quiz_repository.find_by_creator(user_id).await
    }

    pub async fn quizzes_by_examiners(&self, examiner_ids: &[String]) -> AppResult<Vec<Quiz>> {
        if examiner_ids.is_empty() {
            return Err(AppError::ValidationError(
                "Please send examiner data".to_string(),
            ));
        }
        if !examiner_ids.iter().all(|id| is_valid_object_id(id)) {
            return Err(AppError::ValidationError(
                "Please send a valid examiner id".to_string(),
            ));
        }
        self.quiz_repository.find_by_creators(examiner_ids).await
    }

    /// Enrolled quizzes the examinee has not submitted yet.
    pub async fn pending_quizzes_for_examinee(&self, user_id: &str) -> AppResult<Vec<Quiz>> {
        self.quiz_repository.find_enrolled_pending(user_id).await
    }

    pub async fn unenrolled_quizzes_for_examinee(&self, user_id: &str) -> AppResult<Vec<Quiz>> {
        self.quiz_repository.find_unenrolled(user_id).await
    }

    pub async fn other_examiners_quizzes(&self, user_id: &str) -> AppResult<Vec<Quiz>> {
        self.quiz_repository.find_not_created_by(user_id).await
    }

    /// Enroll transition: only valid from the not-enrolled state. The set-add
    /// is the sole signal of prior state, so a no-op update is reported as a
    /// conflict rather than silently succeeding.
    pub async fn enroll(&self, quiz_id: &str, user_id: &str) -> AppResult<()> {
        if !is_valid_object_id(quiz_id) {
            return Err(AppError::ValidationError(
                "Please send a valid quiz id".to_string(),
            ));
        }

        let enrolled = self.quiz_repository.enroll_examinee(quiz_id, user_id).await?;
        if !enrolled {
            return Err(AppError::AlreadyExists(
                "User is already enrolled in this quiz or the quiz was not found".to_string(),
            ));
        }
        Ok(())
    }

    /// Start transition: records the attempt timer. Rejected when a timer for
    /// this (quiz, user) pair already exists.
    pub async fn save_start_time(&self, quiz_id: &str, user_id: &str) -> AppResult<AttemptTimer> {
        if !is_valid_object_id(quiz_id) {
            return Err(AppError::ValidationError(
                "Please send a valid quiz id".to_string(),
            ));
        }

        let (quiz, existing_timer) = tokio::try_join!(
            self.quiz_repository.find_by_id(quiz_id),
            self.timer_repository.find_by_quiz_and_user(quiz_id, user_id),
        )?;

        if quiz.is_none() {
            return Err(AppError::NotFound("Quiz is not present in DB".to_string()));
        }
        if existing_timer.is_some() {
            return Err(AppError::AlreadyExists(
                "A start time is already present for this quiz".to_string(),
            ));
        }

        let timer = AttemptTimer::new(quiz_id, user_id);
        self.timer_repository.create(timer).await
    }

    pub async fn get_start_time(&self, quiz_id: &str, user_id: &str) -> AppResult<AttemptTimer> {
        if !is_valid_object_id(quiz_id) {
            return Err(AppError::ValidationError(
                "Please send a valid quiz id".to_string(),
            ));
        }

        let timers = self
            .timer_repository
            .find_all_by_quiz_and_user(quiz_id, user_id)
            .await?;

        match timers.len() {
            0 => Err(AppError::NotFound(
                "Start time is not present in db".to_string(),
            )),
            1 => Ok(timers.into_iter().next().unwrap()),
            _ => Err(AppError::AlreadyExists(
                "There is more than one start time for this quiz".to_string(),
            )),
        }
    }

    /// Per-quiz results of everything the examinee has already submitted.
    pub async fn quizzes_history(&self, user_id: &str) -> AppResult<Vec<QuizHistoryEntry>> {
        let quizzes = self.quiz_repository.find_attempted(user_id).await?;

        let history = quizzes
            .into_iter()
            .map(|quiz| {
                let quiz_result = quiz
                    .result_for(user_id)
                    .cloned()
                    .map(SubmitQuizResultDto::from);
                QuizHistoryEntry {
                    quiz_id: quiz.id,
                    quiz_name: quiz.name,
                    quiz_duration: quiz.quiz_duration,
                    quiz_result,
                }
            })
            .collect();
        Ok(history)
    }
}
