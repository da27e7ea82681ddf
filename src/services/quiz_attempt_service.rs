use std::sync::Arc;

use chrono::Utc;

use crate::{
    errors::{AppError, AppResult},
    models::domain::QuizResult,
    models::dto::request::SubmittedQuestion,
    repositories::{AttemptTimerRepository, QuestionRepository, QuizRepository},
    services::grading::{
        calculate_marks, grade_answers, normalize_answers, DEFAULT_MARKS_PER_CORRECT,
        DEFAULT_MARKS_PER_WRONG,
    },
    validators::{are_valid_submitted_questions, is_valid_object_id},
};

/// Drives the submit operation end to end: loads the quiz's answer keys and
/// the examinee's start timer, grades the submission and records the result
/// on the quiz. Each read and write is individually atomic; the duplicate
/// submission race between reading the timer and appending the result is
/// closed by the guarded append in the quiz repository.
pub struct QuizAttemptService {
    quiz_repository: Arc<dyn QuizRepository>,
    question_repository: Arc<dyn QuestionRepository>,
    timer_repository: Arc<dyn AttemptTimerRepository>,
}

impl QuizAttemptService {
    pub fn new(
        quiz_repository: Arc<dyn QuizRepository>,
        question_repository: Arc<dyn QuestionRepository>,
        timer_repository: Arc<dyn AttemptTimerRepository>,
    ) -> Self {
        Self {
            quiz_repository,
            question_repository,
            timer_repository,
        }
    }

    pub async fn submit_quiz(
        &self,
        quiz_id: &str,
        examinee_id: &str,
        submitted_questions: &[SubmittedQuestion],
    ) -> AppResult<QuizResult> {
        if !is_valid_object_id(quiz_id) {
            return Err(AppError::ValidationError(
                "Please give a valid quiz id".to_string(),
            ));
        }
        if !are_valid_submitted_questions(submitted_questions) {
            return Err(AppError::ValidationError(
                "Something is wrong with the submitted questions payload".to_string(),
            ));
        }

        let (answer_keys, timer) = tokio::try_join!(
            self.question_repository.find_answer_keys(quiz_id),
            self.timer_repository
                .find_by_quiz_and_user(quiz_id, examinee_id),
        )?;

        if answer_keys.is_empty() {
            return Err(AppError::InternalError(
                "Something went wrong while fetching questions from DB".to_string(),
            ));
        }
        let timer = timer.ok_or_else(|| {
            AppError::NotFound("No start time found for this quiz; it was never started".to_string())
        })?;

        let total_time_taken = timer.minutes_since_start(Utc::now());

        let canonical = normalize_answers(answer_keys.into_iter().map(|key| (key.id, key.answers)));
        let submitted = normalize_answers(
            submitted_questions
                .iter()
                .map(|q| (q.id.clone(), q.answers.clone())),
        );

        let tally = grade_answers(&canonical, &submitted);
        let marks = calculate_marks(
            tally.right,
            tally.wrong,
            DEFAULT_MARKS_PER_CORRECT,
            DEFAULT_MARKS_PER_WRONG,
            false,
        );

        let result = QuizResult {
            examinee_id: examinee_id.to_string(),
            marks,
            number_of_right_answers: tally.right,
            number_of_wrong_answers: tally.wrong,
            number_skipped_questions: tally.skipped,
            total_time_taken,
        };

        let appended = self.quiz_repository.append_result(quiz_id, &result).await?;
        if !appended {
            return Err(AppError::AlreadyExists(
                "A result for this quiz is already recorded for the current user, or the quiz no longer exists"
                    .to_string(),
            ));
        }

        log::info!(
            "Recorded quiz result: quiz={} examinee={} marks={}",
            quiz_id,
            examinee_id,
            marks
        );
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    use crate::models::domain::{AnswerKey, AttemptTimer};
    use crate::repositories::attempt_timer_repository::MockAttemptTimerRepository;
    use crate::repositories::question_repository::MockQuestionRepository;
    use crate::repositories::quiz_repository::MockQuizRepository;

    const QUIZ_ID: &str = "507f1f77bcf86cd799439011";
    const Q1: &str = "507f1f77bcf86cd799439021";
    const Q2: &str = "507f1f77bcf86cd799439022";
    const Q3: &str = "507f1f77bcf86cd799439023";

    fn key(id: &str, answers: &[&str]) -> AnswerKey {
        AnswerKey {
            id: id.to_string(),
            answers: answers.iter().map(|a| a.to_string()).collect(),
        }
    }

    fn submitted(id: &str, answers: &[&str]) -> SubmittedQuestion {
        SubmittedQuestion {
            id: id.to_string(),
            answers: answers.iter().map(|a| a.to_string()).collect(),
        }
    }

    fn timer_started_minutes_ago(minutes: i64) -> AttemptTimer {
        let mut timer = AttemptTimer::new(QUIZ_ID, "examinee-1");
        timer.started_at = Utc::now() - Duration::minutes(minutes);
        timer
    }

    fn service(
        quiz_repo: MockQuizRepository,
        question_repo: MockQuestionRepository,
        timer_repo: MockAttemptTimerRepository,
    ) -> QuizAttemptService {
        QuizAttemptService::new(
            Arc::new(quiz_repo),
            Arc::new(question_repo),
            Arc::new(timer_repo),
        )
    }

    #[tokio::test]
    async fn submit_rejects_malformed_quiz_id() {
        let svc = service(
            MockQuizRepository::new(),
            MockQuestionRepository::new(),
            MockAttemptTimerRepository::new(),
        );

        let result = svc
            .submit_quiz("bogus", "examinee-1", &[submitted(Q1, &["0"])])
            .await;
        assert!(matches!(result, Err(AppError::ValidationError(_))));
    }

    #[tokio::test]
    async fn submit_rejects_empty_submission_payload() {
        let svc = service(
            MockQuizRepository::new(),
            MockQuestionRepository::new(),
            MockAttemptTimerRepository::new(),
        );

        let result = svc.submit_quiz(QUIZ_ID, "examinee-1", &[]).await;
        assert!(matches!(result, Err(AppError::ValidationError(_))));
    }

    #[tokio::test]
    async fn submit_fails_when_quiz_has_no_questions() {
        let mut question_repo = MockQuestionRepository::new();
        question_repo
            .expect_find_answer_keys()
            .returning(|_| Ok(vec![]));
        let mut timer_repo = MockAttemptTimerRepository::new();
        timer_repo
            .expect_find_by_quiz_and_user()
            .returning(|_, _| Ok(Some(timer_started_minutes_ago(5))));

        let svc = service(MockQuizRepository::new(), question_repo, timer_repo);

        let result = svc
            .submit_quiz(QUIZ_ID, "examinee-1", &[submitted(Q1, &["0"])])
            .await;
        assert!(matches!(result, Err(AppError::InternalError(_))));
    }

    #[tokio::test]
    async fn submit_without_start_time_never_scores() {
        let mut question_repo = MockQuestionRepository::new();
        question_repo
            .expect_find_answer_keys()
            .returning(|_| Ok(vec![key(Q1, &["0"])]));
        let mut timer_repo = MockAttemptTimerRepository::new();
        timer_repo
            .expect_find_by_quiz_and_user()
            .returning(|_, _| Ok(None));

        // No append expectation on the quiz repository: scoring must abort
        // before any write.
        let svc = service(MockQuizRepository::new(), question_repo, timer_repo);

        let result = svc
            .submit_quiz(QUIZ_ID, "examinee-1", &[submitted(Q1, &["0"])])
            .await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn submit_grades_scores_and_records_the_result() {
        let mut question_repo = MockQuestionRepository::new();
        question_repo.expect_find_answer_keys().returning(|_| {
            Ok(vec![key(Q1, &["0"]), key(Q2, &["2"]), key(Q3, &["1"])])
        });
        let mut timer_repo = MockAttemptTimerRepository::new();
        timer_repo
            .expect_find_by_quiz_and_user()
            .returning(|_, _| Ok(Some(timer_started_minutes_ago(10))));
        let mut quiz_repo = MockQuizRepository::new();
        quiz_repo
            .expect_append_result()
            .withf(|quiz_id, result| {
                quiz_id == QUIZ_ID
                    && result.examinee_id == "examinee-1"
                    && result.marks == 1.0
            })
            .returning(|_, _| Ok(true));

        let svc = service(quiz_repo, question_repo, timer_repo);

        let result = svc
            .submit_quiz(
                QUIZ_ID,
                "examinee-1",
                &[
                    submitted(Q1, &["0"]),
                    submitted(Q2, &["3"]),
                    submitted(Q3, &[]),
                ],
            )
            .await
            .unwrap();

        assert_eq!(result.number_of_right_answers, 1);
        assert_eq!(result.number_of_wrong_answers, 1);
        assert_eq!(result.number_skipped_questions, 1);
        assert_eq!(result.marks, 1.0);
        assert_eq!(result.total_time_taken, 10);
    }

    #[tokio::test]
    async fn duplicate_submission_is_a_conflict() {
        let mut question_repo = MockQuestionRepository::new();
        question_repo
            .expect_find_answer_keys()
            .returning(|_| Ok(vec![key(Q1, &["0"])]));
        let mut timer_repo = MockAttemptTimerRepository::new();
        timer_repo
            .expect_find_by_quiz_and_user()
            .returning(|_, _| Ok(Some(timer_started_minutes_ago(3))));
        let mut quiz_repo = MockQuizRepository::new();
        quiz_repo.expect_append_result().returning(|_, _| Ok(false));

        let svc = service(quiz_repo, question_repo, timer_repo);

        let result = svc
            .submit_quiz(QUIZ_ID, "examinee-1", &[submitted(Q1, &["0"])])
            .await;
        assert!(matches!(result, Err(AppError::AlreadyExists(_))));
    }

    #[tokio::test]
    async fn questions_left_out_of_the_submission_are_skipped() {
        let mut question_repo = MockQuestionRepository::new();
        question_repo
            .expect_find_answer_keys()
            .returning(|_| Ok(vec![key(Q1, &["0"]), key(Q2, &["1"])]));
        let mut timer_repo = MockAttemptTimerRepository::new();
        timer_repo
            .expect_find_by_quiz_and_user()
            .returning(|_, _| Ok(Some(timer_started_minutes_ago(1))));
        let mut quiz_repo = MockQuizRepository::new();
        quiz_repo.expect_append_result().returning(|_, _| Ok(true));

        let svc = service(quiz_repo, question_repo, timer_repo);

        let result = svc
            .submit_quiz(QUIZ_ID, "examinee-1", &[submitted(Q1, &["0"])])
            .await
            .unwrap();

        assert_eq!(result.number_of_right_answers, 1);
        assert_eq!(result.number_skipped_questions, 1);
        assert_eq!(result.number_of_wrong_answers, 0);
    }

    #[tokio::test]
    async fn clock_skew_clamps_elapsed_time_to_zero() {
        let mut question_repo = MockQuestionRepository::new();
        question_repo
            .expect_find_answer_keys()
            .returning(|_| Ok(vec![key(Q1, &["0"])]));
        let mut timer_repo = MockAttemptTimerRepository::new();
        timer_repo.expect_find_by_quiz_and_user().returning(|_, _| {
            let mut timer = AttemptTimer::new(QUIZ_ID, "examinee-1");
            timer.started_at = Utc::now() + Duration::minutes(30);
            Ok(Some(timer))
        });
        let mut quiz_repo = MockQuizRepository::new();
        quiz_repo.expect_append_result().returning(|_, _| Ok(true));

        let svc = service(quiz_repo, question_repo, timer_repo);

        let result = svc
            .submit_quiz(QUIZ_ID, "examinee-1", &[submitted(Q1, &["0"])])
            .await
            .unwrap();
        assert_eq!(result.total_time_taken, 0);
    }
}
