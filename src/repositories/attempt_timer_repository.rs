use std::time::Duration;

use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{bson::doc, options::IndexOptions, Collection, IndexModel};

use crate::{db::Database, errors::AppResult, models::domain::AttemptTimer};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AttemptTimerRepository: Send + Sync {
    async fn create(&self, timer: AttemptTimer) -> AppResult<AttemptTimer>;
    async fn find_by_quiz_and_user(
        &self,
        quiz_id: &str,
        user_id: &str,
    ) -> AppResult<Option<AttemptTimer>>;
    /// All timers for the pair. More than one is a data anomaly the start-time
    /// lookup reports as a conflict.
    async fn find_all_by_quiz_and_user(
        &self,
        quiz_id: &str,
        user_id: &str,
    ) -> AppResult<Vec<AttemptTimer>>;
}

pub struct MongoAttemptTimerRepository {
    collection: Collection<AttemptTimer>,
}

impl MongoAttemptTimerRepository {
    pub fn new(db: &Database) -> Self {
        let collection = db.get_collection("attempt_timers");
        Self { collection }
    }

    /// The TTL index makes the database discard timers `retention` after
    /// `started_at`, submitted or not. The unique compound index backs the
    /// one-live-timer-per-(quiz, user) guard.
    pub async fn ensure_indexes(&self, retention: Duration) -> AppResult<()> {
        log::info!("Creating indexes for attempt_timers collection");

        let ttl_index = IndexModel::builder()
            .keys(doc! { "started_at": 1 })
            .options(
                IndexOptions::builder()
                    .expire_after(retention)
                    .name("started_at_ttl".to_string())
                    .build(),
            )
            .build();

        let pair_index = IndexModel::builder()
            .keys(doc! { "quiz_id": 1, "started_by": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .name("quiz_user_unique".to_string())
                    .build(),
            )
            .build();

        self.collection.create_index(ttl_index).await?;
        self.collection.create_index(pair_index).await?;

        log::info!("Successfully created indexes for attempt_timers collection");
        Ok(())
    }
}

#[async_trait]
impl AttemptTimerRepository for MongoAttemptTimerRepository {
    async fn create(&self, timer: AttemptTimer) -> AppResult<AttemptTimer> {
        self.collection.insert_one(&timer).await?;
        Ok(timer)
    }

    async fn find_by_quiz_and_user(
        &self,
        quiz_id: &str,
        user_id: &str,
    ) -> AppResult<Option<AttemptTimer>> {
        let timer = self
            .collection
            .find_one(doc! { "quiz_id": quiz_id, "started_by": user_id })
            .await?;
        Ok(timer)
    }

    async fn find_all_by_quiz_and_user(
        &self,
        quiz_id: &str,
        user_id: &str,
    ) -> AppResult<Vec<AttemptTimer>> {
        let timers = self
            .collection
            .find(doc! { "quiz_id": quiz_id, "started_by": user_id })
            .await?
            .try_collect()
            .await?;
        Ok(timers)
    }
}
