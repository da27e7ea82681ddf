pub mod attempt_timer_repository;
pub mod question_repository;
pub mod quiz_repository;
pub mod user_repository;

pub use attempt_timer_repository::{AttemptTimerRepository, MongoAttemptTimerRepository};
pub use question_repository::{MongoQuestionRepository, QuestionRepository};
pub use quiz_repository::{MongoQuizRepository, QuizRepository};
pub use user_repository::{MongoUserRepository, UserRepository};
