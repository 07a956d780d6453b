//! Port for question, answer and comment persistence.
//!
//! Child inserts and the append to the parent's reference sequence are one
//! unit: adapters run both in a single transaction (or under one lock) and
//! report [`ContentRepositoryError::MissingParent`] without persisting
//! anything when the parent cannot be updated.

use async_trait::async_trait;

use crate::domain::{Answer, AnswerId, Comment, Question, QuestionId, TitleFilter};

use super::define_port_error;

define_port_error! {
    /// Errors raised by content repository adapters.
    pub enum ContentRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "content repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "content repository query failed: {message}",
        /// The parent row matched nothing when appending a child reference.
        MissingParent { parent: String } => "parent {parent} vanished during child insert",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ContentRepository: Send + Sync {
    /// Persist a new question.
    async fn insert_question(&self, question: &Question) -> Result<(), ContentRepositoryError>;

    /// List questions in creation order, optionally filtered by title.
    async fn list_questions(
        &self,
        filter: Option<TitleFilter>,
    ) -> Result<Vec<Question>, ContentRepositoryError>;

    /// Fetch a question by identifier.
    async fn find_question(
        &self,
        id: &QuestionId,
    ) -> Result<Option<Question>, ContentRepositoryError>;

    /// Answers whose parent is `question`, in creation order.
    async fn answers_for_question(
        &self,
        question: &QuestionId,
    ) -> Result<Vec<Answer>, ContentRepositoryError>;

    /// Insert an answer and append its identifier to the parent question.
    async fn insert_answer(&self, answer: &Answer) -> Result<(), ContentRepositoryError>;

    /// Fetch an answer by identifier.
    async fn find_answer(&self, id: &AnswerId) -> Result<Option<Answer>, ContentRepositoryError>;

    /// Insert a comment and append its identifier to the parent answer.
    async fn insert_comment(&self, comment: &Comment) -> Result<(), ContentRepositoryError>;

    /// Comments whose parent is `answer`, in insertion order.
    async fn comments_for_answer(
        &self,
        answer: &AnswerId,
    ) -> Result<Vec<Comment>, ContentRepositoryError>;
}
