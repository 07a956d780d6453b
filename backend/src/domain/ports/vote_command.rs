//! Driving port for vote mutations.

use async_trait::async_trait;

use crate::domain::{AnswerId, AuthenticatedUser, Error, QuestionId, VoteDirection, VoteTally};

/// Vote use cases.
///
/// Voters are not tracked, so repeated votes by the same caller all count.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait VoteCommand: Send + Sync {
    async fn vote_question(
        &self,
        voter: &AuthenticatedUser,
        id: QuestionId,
        direction: VoteDirection,
    ) -> Result<VoteTally, Error>;

    async fn vote_answer(
        &self,
        voter: &AuthenticatedUser,
        id: AnswerId,
        direction: VoteDirection,
    ) -> Result<VoteTally, Error>;
}
