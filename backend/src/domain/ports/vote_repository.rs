//! Port for atomic vote counter mutations.

use async_trait::async_trait;

use crate::domain::{AnswerId, QuestionId, VoteDirection};

use super::define_port_error;

define_port_error! {
    /// Errors raised by vote repository adapters.
    pub enum VoteRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "vote repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "vote repository query failed: {message}",
    }
}

/// Counter store for votes.
///
/// Each call applies the direction's delta and reads the new total back in a
/// single atomic step. `Ok(None)` means the target does not exist.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait VoteRepository: Send + Sync {
    async fn apply_question_vote(
        &self,
        id: &QuestionId,
        direction: VoteDirection,
    ) -> Result<Option<i64>, VoteRepositoryError>;

    async fn apply_answer_vote(
        &self,
        id: &AnswerId,
        direction: VoteDirection,
    ) -> Result<Option<i64>, VoteRepositoryError>;
}
