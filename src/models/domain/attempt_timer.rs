use chrono::{DateTime, Utc};
use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

/// Marks when an examinee began a quiz. At most one timer exists per
/// (quiz, user) pair, and the record expires from the database after the
/// configured retention window.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct AttemptTimer {
    pub id: String,
    pub quiz_id: String,
    pub started_by: String,
    pub started_at: DateTime<Utc>,
}

impl AttemptTimer {
    pub fn new(quiz_id: &str, started_by: &str) -> Self {
        AttemptTimer {
            id: ObjectId::new().to_hex(),
            quiz_id: quiz_id.to_string(),
            started_by: started_by.to_string(),
            started_at: Utc::now(),
        }
    }

    /// Whole minutes elapsed since the quiz was started, clamped at zero so
    /// clock skew can never produce a negative duration.
    pub fn minutes_since_start(&self, now: DateTime<Utc>) -> i64 {
        (now - self.started_at).num_minutes().max(0)
    }
}
