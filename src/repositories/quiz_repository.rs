use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{bson::doc, options::IndexOptions, Collection, IndexModel};

use crate::{
    db::Database,
    errors::AppResult,
    models::domain::{Quiz, QuizResult},
};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait QuizRepository: Send + Sync {
    async fn create(&self, quiz: Quiz) -> AppResult<Quiz>;
    async fn find_by_id(&self, id: &str) -> AppResult<Option<Quiz>>;
    async fn find_by_creator(&self, user_id: &str) -> AppResult<Vec<Quiz>>;
    async fn find_by_creators(&self, user_ids: &[String]) -> AppResult<Vec<Quiz>>;
    /// Quizzes the user is enrolled in but has not submitted yet.
    async fn find_enrolled_pending(&self, user_id: &str) -> AppResult<Vec<Quiz>>;
    /// Quizzes the user is not enrolled in.
    async fn find_unenrolled(&self, user_id: &str) -> AppResult<Vec<Quiz>>;
    /// Quizzes created by other examiners.
    async fn find_not_created_by(&self, user_id: &str) -> AppResult<Vec<Quiz>>;
    /// Quizzes the user is enrolled in and has already submitted.
    async fn find_attempted(&self, user_id: &str) -> AppResult<Vec<Quiz>>;
    /// Adds the user to the enrolled set. Returns false when nothing was
    /// modified, which covers both "already enrolled" and "quiz not found".
    async fn enroll_examinee(&self, quiz_id: &str, user_id: &str) -> AppResult<bool>;
    /// Appends an attempt result, but only when no result for that examinee
    /// exists yet. Returns false when the guarded update modified nothing.
    async fn append_result(&self, quiz_id: &str, result: &QuizResult) -> AppResult<bool>;
}

pub struct MongoQuizRepository {
    collection: Collection<Quiz>,
}

impl MongoQuizRepository {
    pub fn new(db: &Database) -> Self {
        let collection = db.get_collection("quizzes");
        Self { collection }
    }

    pub async fn ensure_indexes(&self) -> AppResult<()> {
        log::info!("Creating indexes for quizzes collection");

        let id_index = IndexModel::builder()
            .keys(doc! { "id": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .name("id_unique".to_string())
                    .build(),
            )
            .build();

        let creator_index = IndexModel::builder()
            .keys(doc! { "created_by": 1 })
            .options(IndexOptions::builder().name("created_by".to_string()).build())
            .build();

        let enrolled_index = IndexModel::builder()
            .keys(doc! { "enrolled_by": 1 })
            .options(IndexOptions::builder().name("enrolled_by".to_string()).build())
            .build();

        self.collection.create_index(id_index).await?;
        self.collection.create_index(creator_index).await?;
        self.collection.create_index(enrolled_index).await?;

        log::info!("Successfully created indexes for quizzes collection");
        Ok(())
    }

    async fn find_all(&self, filter: mongodb::bson::Document) -> AppResult<Vec<Quiz>> {
        let quizzes = self.collection.find(filter).await?.try_collect().await?;
        Ok(quizzes)
    }
}

#[async_trait]
impl QuizRepository for MongoQuizRepository {
    async fn create(&self, quiz: Quiz) -> AppResult<Quiz> {
        self.collection.insert_one(&quiz).await?;
        Ok(quiz)
    }

    async fn find_by_id(&self, id: &str) -> AppResult<Option<Quiz>> {
        let quiz = self.collection.find_one(doc! { "id": id }).await?;
        Ok(quiz)
    }

    async fn find_by_creator(&self, user_id: &str) -> AppResult<Vec<Quiz>> {
        self.find_all(doc! { "created_by": user_id }).await
    }

    async fn find_by_creators(&self, user_ids: &[String]) -> AppResult<Vec<Quiz>> {
        self.find_all(doc! { "created_by": { "$in": user_ids } })
            .await
    }

    async fn find_enrolled_pending(&self, user_id: &str) -> AppResult<Vec<Quiz>> {
        self.find_all(doc! {
            "enrolled_by": user_id,
            "marks.examinee_id": { "$ne": user_id }
        })
        .await
    }

    async fn find_unenrolled(&self, user_id: &str) -> AppResult<Vec<Quiz>> {
        self.find_all(doc! { "enrolled_by": { "$nin": [user_id] } })
            .await
    }

    async fn find_not_created_by(&self, user_id: &str) -> AppResult<Vec<Quiz>> {
        self.find_all(doc! { "created_by": { "$ne": user_id } })
            .await
    }

    async fn find_attempted(&self, user_id: &str) -> AppResult<Vec<Quiz>> {
        self.find_all(doc! {
            "enrolled_by": user_id,
            "marks.examinee_id": user_id
        })
        .await
    }

    async fn enroll_examinee(&self, quiz_id: &str, user_id: &str) -> AppResult<bool> {
        let updated = self
            .collection
            .update_one(
                doc! { "id": quiz_id },
                doc! { "$addToSet": { "enrolled_by": user_id } },
            )
            .await?;
        Ok(updated.modified_count > 0)
    }

    async fn append_result(&self, quiz_id: &str, result: &QuizResult) -> AppResult<bool> {
        let result_doc = mongodb::bson::to_bson(result)?;
        let updated = self
            .collection
            .update_one(
                doc! {
                    "id": quiz_id,
                    "marks.examinee_id": { "$ne": &result.examinee_id }
                },
                doc! { "$push": { "marks": result_doc } },
            )
            .await?;
        Ok(updated.modified_count > 0)
    }
}
