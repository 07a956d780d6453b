//! Driving port for content graph reads.

use async_trait::async_trait;

use crate::domain::{AnswerId, Comment, Error, Question, QuestionId, QuestionThread, TitleFilter};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ContentQuery: Send + Sync {
    /// All questions, or those whose title contains the filter.
    async fn list_questions(&self, filter: Option<TitleFilter>) -> Result<Vec<Question>, Error>;

    /// A question with every answer that references it.
    async fn question_thread(&self, id: QuestionId) -> Result<QuestionThread, Error>;

    /// Comments on an answer; `NotFound` when the answer does not exist.
    async fn comments_for_answer(&self, id: AnswerId) -> Result<Vec<Comment>, Error>;
}
