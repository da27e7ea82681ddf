use std::{sync::Arc, time::Duration};

use crate::{
    auth::JwtService,
    config::Config,
    db::Database,
    errors::AppResult,
    repositories::{
        MongoAttemptTimerRepository, MongoQuestionRepository, MongoQuizRepository,
        MongoUserRepository,
    },
    services::{
        question_service::QuestionService, quiz_attempt_service::QuizAttemptService,
        quiz_service::QuizService, user_service::UserService,
    },
};

#[derive(Clone)]
pub struct AppState {
    pub user_service: Arc<UserService>,
    pub quiz_service: Arc<QuizService>,
    pub question_service: Arc<QuestionService>,
    pub quiz_attempt_service: Arc<QuizAttemptService>,
    pub jwt_service: JwtService,
    pub db: Database,
    pub config: Arc<Config>,
}

impl AppState {
    pub async fn new(config: Config) -> AppResult<Self> {
        let db = Database::connect(&config).await?;

        let user_repository = Arc::new(MongoUserRepository::new(&db));
        user_repository.ensure_indexes().await?;

        let quiz_repository = Arc::new(MongoQuizRepository::new(&db));
        quiz_repository.ensure_indexes().await?;

        let question_repository = Arc::new(MongoQuestionRepository::new(&db));
        question_repository.ensure_indexes().await?;

        let timer_repository = Arc::new(MongoAttemptTimerRepository::new(&db));
        timer_repository
            .ensure_indexes(Duration::from_secs(
                config.timer_retention_minutes.saturating_mul(60),
            ))
            .await?;

        let user_service = Arc::new(UserService::new(user_repository));
        let quiz_service = Arc::new(QuizService::new(
            quiz_repository.clone(),
            timer_repository.clone(),
        ));
        let question_service = Arc::new(QuestionService::new(
            question_repository.clone(),
            quiz_repository.clone(),
        ));
        let quiz_attempt_service = Arc::new(QuizAttemptService::new(
            quiz_repository,
            question_repository,
            timer_repository,
        ));

        let jwt_service = JwtService::new(&config.jwt_secret, config.jwt_expiration_hours);

        Ok(Self {
            user_service,
            quiz_service,
            question_service,
            quiz_attempt_service,
            jwt_service,
            db,
            config: Arc::new(config),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_state_is_cloneable() {
        fn assert_clone<T: Clone>() {}
        assert_clone::<AppState>();
    }
}
