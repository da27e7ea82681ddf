use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{
    bson::doc,
    options::{FindOptions, IndexOptions},
    Collection, IndexModel,
};

use crate::{
    db::Database,
    errors::AppResult,
    models::domain::{AnswerKey, Question},
};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait QuestionRepository: Send + Sync {
    async fn insert_many(&self, questions: Vec<Question>) -> AppResult<Vec<Question>>;
    async fn find_by_quiz(&self, quiz_id: &str) -> AppResult<Vec<Question>>;
    /// Id + canonical answers only; this is all the grading path reads.
    async fn find_answer_keys(&self, quiz_id: &str) -> AppResult<Vec<AnswerKey>>;
}

pub struct MongoQuestionRepository {
    collection: Collection<Question>,
}

impl MongoQuestionRepository {
    pub fn new(db: &Database) -> Self {
        let collection = db.get_collection("questions");
        Self { collection }
    }

    pub async fn ensure_indexes(&self) -> AppResult<()> {
        log::info!("Creating indexes for questions collection");

        let id_index = IndexModel::builder()
            .keys(doc! { "id": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .name("id_unique".to_string())
                    .build(),
            )
            .build();

        let quizzes_index = IndexModel::builder()
            .keys(doc! { "quizzes": 1 })
            .options(IndexOptions::builder().name("quizzes".to_string()).build())
            .build();

        self.collection.create_index(id_index).await?;
        self.collection.create_index(quizzes_index).await?;

        log::info!("Successfully created indexes for questions collection");
        Ok(())
    }
}

#[async_trait]
impl QuestionRepository for MongoQuestionRepository {
    async fn insert_many(&self, questions: Vec<Question>) -> AppResult<Vec<Question>> {
        self.collection.insert_many(&questions).await?;
        Ok(questions)
    }

    async fn find_by_quiz(&self, quiz_id: &str) -> AppResult<Vec<Question>> {
        let questions = self
            .collection
            .find(doc! { "quizzes": { "$in": [quiz_id] } })
            .await?
            .try_collect()
            .await?;
        Ok(questions)
    }

    async fn find_answer_keys(&self, quiz_id: &str) -> AppResult<Vec<AnswerKey>> {
        let find_options = FindOptions::builder()
            .projection(doc! { "_id": 0, "id": 1, "answers": 1 })
            .build();

        let keys = self
            .collection
            .clone_with_type::<AnswerKey>()
            .find(doc! { "quizzes": { "$in": [quiz_id] } })
            .with_options(find_options)
            .await?
            .try_collect()
            .await?;
        Ok(keys)
    }
}
