pub mod attempt_timer;
pub mod question;
pub mod quiz;
pub mod user;

pub use attempt_timer::AttemptTimer;
pub use question::{AnswerKey, Question};
pub use quiz::{Quiz, QuizResult};
pub use user::User;
