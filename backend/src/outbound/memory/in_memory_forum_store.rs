//! In-process forum store implementing every repository port.
//!
//! All state sits behind one async mutex. Uniqueness checks and inserts,
//! child inserts and parent appends, and vote increments each happen under a
//! single lock acquisition, giving the same atomicity as the PostgreSQL
//! adapters.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::ports::{
    ContentRepository, ContentRepositoryError, UserPersistenceError, UserRepository,
    VoteRepository, VoteRepositoryError,
};
use crate::domain::{
    Answer, AnswerId, Comment, CommentId, EmailAddress, Question, QuestionId, TitleFilter, User,
    Username, VoteDirection,
};

#[derive(Debug, Default)]
struct ForumState {
    users: Vec<User>,
    questions: Vec<Question>,
    answers: HashMap<AnswerId, Answer>,
    answer_order: Vec<AnswerId>,
    comments: HashMap<CommentId, Comment>,
    comment_order: Vec<CommentId>,
}

impl ForumState {
    fn question_mut(&mut self, id: &QuestionId) -> Option<&mut Question> {
        self.questions.iter_mut().find(|question| question.id == *id)
    }
}

/// Shared in-process store. Clones share state.
///
/// # Examples
/// ```
/// use std::sync::Arc;
///
/// use backend::outbound::memory::InMemoryForumStore;
///
/// let store = Arc::new(InMemoryForumStore::new());
/// let users = store.clone();
/// let content = store.clone();
/// # let _ = (users, content);
/// ```
#[derive(Debug, Clone, Default)]
pub struct InMemoryForumStore {
    state: Arc<Mutex<ForumState>>,
}

impl InMemoryForumStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryForumStore {
    async fn insert(&self, user: &User) -> Result<(), UserPersistenceError> {
        let mut state = self.state.lock().await;
        if state.users.iter().any(|existing| existing.username == user.username) {
            return Err(UserPersistenceError::duplicate("username"));
        }
        if state.users.iter().any(|existing| existing.email == user.email) {
            return Err(UserPersistenceError::duplicate("email"));
        }
        state.users.push(user.clone());
        Ok(())
    }

    async fn find_by_username_or_email(
        &self,
        username: &Username,
        email: &EmailAddress,
    ) -> Result<Option<User>, UserPersistenceError> {
        let state = self.state.lock().await;
        Ok(state
            .users
            .iter()
            .find(|user| user.username == *username || user.email == *email)
            .cloned())
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, UserPersistenceError> {
        let state = self.state.lock().await;
        Ok(state
            .users
            .iter()
            .find(|user| user.username.as_ref() == username)
            .cloned())
    }
}

#[async_trait]
impl ContentRepository for InMemoryForumStore {
    async fn insert_question(&self, question: &Question) -> Result<(), ContentRepositoryError> {
        self.state.lock().await.questions.push(question.clone());
        Ok(())
    }

    async fn list_questions(
        &self,
        filter: Option<TitleFilter>,
    ) -> Result<Vec<Question>, ContentRepositoryError> {
        let state = self.state.lock().await;
        Ok(state
            .questions
            .iter()
            .filter(|question| filter.as_ref().is_none_or(|f| f.matches(&question.title)))
            .cloned()
            .collect())
    }

    async fn find_question(
        &self,
        id: &QuestionId,
    ) -> Result<Option<Question>, ContentRepositoryError> {
        let state = self.state.lock().await;
        Ok(state
            .questions
            .iter()
            .find(|question| question.id == *id)
            .cloned())
    }

    async fn answers_for_question(
        &self,
        question: &QuestionId,
    ) -> Result<Vec<Answer>, ContentRepositoryError> {
        let state = self.state.lock().await;
        Ok(state
            .answer_order
            .iter()
            .filter_map(|id| state.answers.get(id))
            .filter(|answer| answer.question == *question)
            .cloned()
            .collect())
    }

    async fn insert_answer(&self, answer: &Answer) -> Result<(), ContentRepositoryError> {
        let mut state = self.state.lock().await;
        let Some(parent) = state.question_mut(&answer.question) else {
            return Err(ContentRepositoryError::missing_parent(format!(
                "question {}",
                answer.question
            )));
        };
        parent.answers.push(answer.id);
        state.answer_order.push(answer.id);
        state.answers.insert(answer.id, answer.clone());
        Ok(())
    }

    async fn find_answer(&self, id: &AnswerId) -> Result<Option<Answer>, ContentRepositoryError> {
        Ok(self.state.lock().await.answers.get(id).cloned())
    }

    async fn insert_comment(&self, comment: &Comment) -> Result<(), ContentRepositoryError> {
        let mut state = self.state.lock().await;
        let Some(parent) = state.answers.get_mut(&comment.answer) else {
            return Err(ContentRepositoryError::missing_parent(format!(
                "answer {}",
                comment.answer
            )));
        };
        parent.comments.push(comment.id);
        state.comment_order.push(comment.id);
        state.comments.insert(comment.id, comment.clone());
        Ok(())
    }

    async fn comments_for_answer(
        &self,
        answer: &AnswerId,
    ) -> Result<Vec<Comment>, ContentRepositoryError> {
        let state = self.state.lock().await;
        Ok(state
            .comment_order
            .iter()
            .filter_map(|id| state.comments.get(id))
            .filter(|comment| comment.answer == *answer)
            .cloned()
            .collect())
    }
}

#[async_trait]
impl VoteRepository for InMemoryForumStore {
    async fn apply_question_vote(
        &self,
        id: &QuestionId,
        direction: VoteDirection,
    ) -> Result<Option<i64>, VoteRepositoryError> {
        let mut state = self.state.lock().await;
        Ok(state.question_mut(id).map(|question| {
            question.votes += direction.delta();
            question.votes
        }))
    }

    async fn apply_answer_vote(
        &self,
        id: &AnswerId,
        direction: VoteDirection,
    ) -> Result<Option<i64>, VoteRepositoryError> {
        let mut state = self.state.lock().await;
        Ok(state.answers.get_mut(id).map(|answer| {
            answer.votes += direction.delta();
            answer.votes
        }))
    }
}

#[cfg(test)]
#[path = "in_memory_forum_store_tests.rs"]
mod tests;
