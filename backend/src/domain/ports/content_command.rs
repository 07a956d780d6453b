//! Driving port for content graph writes.

use async_trait::async_trait;

use crate::domain::{
    Answer, AnswerId, AuthenticatedUser, Comment, Error, PostBody, Question, QuestionDraft,
    QuestionId,
};

/// Write-side use cases for questions, answers and comments.
///
/// Every operation takes the authenticated caller explicitly and records it as
/// the author.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ContentCommand: Send + Sync {
    async fn create_question(
        &self,
        author: &AuthenticatedUser,
        draft: QuestionDraft,
    ) -> Result<Question, Error>;

    /// `NotFound` when the question does not exist.
    async fn create_answer(
        &self,
        author: &AuthenticatedUser,
        question: QuestionId,
        body: PostBody,
    ) -> Result<Answer, Error>;

    /// `NotFound` when the answer does not exist.
    async fn create_comment(
        &self,
        author: &AuthenticatedUser,
        answer: AnswerId,
        body: PostBody,
    ) -> Result<Comment, Error>;
}
