//! Content graph manager.
//!
//! Creates questions, answers and comments and keeps parent reference
//! sequences in step with child parent references. Parents are checked
//! before any write; the repository then inserts the child and appends to
//! the parent as one unit.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::{error, info, warn};

use crate::domain::ports::{ContentCommand, ContentQuery, ContentRepository, ContentRepositoryError};
use crate::domain::{
    Answer, AnswerId, AuthenticatedUser, Comment, Error, PostBody, Question, QuestionDraft,
    QuestionId, QuestionThread, TitleFilter,
};

/// Content service implementing the content driving ports.
#[derive(Clone)]
pub struct ContentGraphService<C> {
    content: Arc<C>,
    clock: Arc<dyn Clock>,
}

impl<C> ContentGraphService<C> {
    pub fn new(content: Arc<C>, clock: Arc<dyn Clock>) -> Self {
        Self { content, clock }
    }
}

fn map_content_error(failure: ContentRepositoryError) -> Error {
    match failure {
        ContentRepositoryError::Connection { message } => {
            warn!(%message, "content repository unreachable");
            Error::service_unavailable("content repository unavailable")
        }
        ContentRepositoryError::Query { message } => {
            Error::internal(format!("content repository error: {message}"))
        }
        ContentRepositoryError::MissingParent { parent } => {
            error!(%parent, "parent disappeared while appending a child reference");
            Error::internal(format!("failed to link child to {parent}"))
        }
    }
}

fn question_not_found(id: QuestionId) -> Error {
    Error::not_found(format!("question {id} not found"))
}

fn answer_not_found(id: AnswerId) -> Error {
    Error::not_found(format!("answer {id} not found"))
}

impl<C> ContentGraphService<C>
where
    C: ContentRepository,
{
    async fn require_question(&self, id: QuestionId) -> Result<Question, Error> {
        self.content
            .find_question(&id)
            .await
            .map_err(map_content_error)?
            .ok_or_else(|| question_not_found(id))
    }

    async fn require_answer(&self, id: AnswerId) -> Result<Answer, Error> {
        self.content
            .find_answer(&id)
            .await
            .map_err(map_content_error)?
            .ok_or_else(|| answer_not_found(id))
    }
}

#[async_trait]
impl<C> ContentCommand for ContentGraphService<C>
where
    C: ContentRepository,
{
    async fn create_question(
        &self,
        author: &AuthenticatedUser,
        draft: QuestionDraft,
    ) -> Result<Question, Error> {
        let question = Question::create(author.user_id().clone(), draft, self.clock.utc());
        self.content
            .insert_question(&question)
            .await
            .map_err(map_content_error)?;
        info!(question_id = %question.id, author = %question.author, "created question");
        Ok(question)
    }

    async fn create_answer(
        &self,
        author: &AuthenticatedUser,
        question: QuestionId,
        body: PostBody,
    ) -> Result<Answer, Error> {
        self.require_question(question).await?;
        let answer = Answer::create(question, author.user_id().clone(), body, self.clock.utc());
        self.content
            .insert_answer(&answer)
            .await
            .map_err(map_content_error)?;
        info!(answer_id = %answer.id, question_id = %question, "created answer");
        Ok(answer)
    }

    async fn create_comment(
        &self,
        author: &AuthenticatedUser,
        answer: AnswerId,
        body: PostBody,
    ) -> Result<Comment, Error> {
        self.require_answer(answer).await?;
        let comment = Comment::create(answer, author.user_id().clone(), body, self.clock.utc());
        self.content
            .insert_comment(&comment)
            .await
            .map_err(map_content_error)?;
        info!(comment_id = %comment.id, answer_id = %answer, "created comment");
        Ok(comment)
    }
}

#[async_trait]
impl<C> ContentQuery for ContentGraphService<C>
where
    C: ContentRepository,
{
    async fn list_questions(&self, filter: Option<TitleFilter>) -> Result<Vec<Question>, Error> {
        self.content
            .list_questions(filter)
            .await
            .map_err(map_content_error)
    }

    async fn question_thread(&self, id: QuestionId) -> Result<QuestionThread, Error> {
        let question = self.require_question(id).await?;
        let answers = self
            .content
            .answers_for_question(&id)
            .await
            .map_err(map_content_error)?;
        Ok(QuestionThread { question, answers })
    }

    async fn comments_for_answer(&self, id: AnswerId) -> Result<Vec<Comment>, Error> {
        self.require_answer(id).await?;
        self.content
            .comments_for_answer(&id)
            .await
            .map_err(map_content_error)
    }
}

#[cfg(test)]
#[path = "content_graph_service_tests.rs"]
mod tests;
