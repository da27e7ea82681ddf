use chrono::{DateTime, Utc};
use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct Quiz {
    pub id: String,
    pub name: String,
    pub topics: Vec<String>,
    pub created_by: String,
    pub enrolled_by: Vec<String>,
    pub quiz_duration: i64, // minutes
    pub marks: Vec<QuizResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

/// One examinee's recorded attempt, embedded in `Quiz.marks`. Written once
/// on submission and never changed afterwards.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct QuizResult {
    pub examinee_id: String,
    pub marks: f64,
    pub number_of_right_answers: u32,
    pub number_of_wrong_answers: u32,
    pub number_skipped_questions: u32,
    pub total_time_taken: i64, // minutes
}

impl Quiz {
    pub fn new(name: &str, topics: Vec<String>, created_by: &str, quiz_duration: i64) -> Self {
        Quiz {
            id: ObjectId::new().to_hex(),
            name: name.to_string(),
            topics,
            created_by: created_by.to_string(),
            // The creator is enrolled from the start so an examiner can
            // preview their own quiz.
            enrolled_by: vec![created_by.to_string()],
            quiz_duration,
            marks: Vec::new(),
            created_at: Some(Utc::now()),
        }
    }

    pub fn is_enrolled(&self, user_id: &str) -> bool {
        self.enrolled_by.iter().any(|id| id == user_id)
    }

    pub fn result_for(&self, examinee_id: &str) -> Option<&QuizResult> {
        self.marks.iter().find(|m| m.examinee_id == examinee_id)
    }

    pub fn has_examinee_attempted(&self, examinee_id: &str) -> bool {
        self.result_for(examinee_id).is_some()
    }
}
