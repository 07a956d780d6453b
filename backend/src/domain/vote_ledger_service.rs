//! Vote ledger: bounded counter mutations on questions and answers.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::domain::ports::{VoteCommand, VoteRepository, VoteRepositoryError};
use crate::domain::{AnswerId, AuthenticatedUser, Error, QuestionId, VoteDirection, VoteTally};

/// Vote service implementing [`VoteCommand`].
#[derive(Clone)]
pub struct VoteLedgerService<V> {
    votes: Arc<V>,
}

impl<V> VoteLedgerService<V> {
    pub fn new(votes: Arc<V>) -> Self {
        Self { votes }
    }
}

fn map_vote_error(error: VoteRepositoryError) -> Error {
    match error {
        VoteRepositoryError::Connection { message } => {
            warn!(%message, "vote repository unreachable");
            Error::service_unavailable("vote repository unavailable")
        }
        VoteRepositoryError::Query { message } => {
            Error::internal(format!("vote repository error: {message}"))
        }
    }
}

#[async_trait]
impl<V> VoteCommand for VoteLedgerService<V>
where
    V: VoteRepository,
{
    async fn vote_question(
        &self,
        voter: &AuthenticatedUser,
        id: QuestionId,
        direction: VoteDirection,
    ) -> Result<VoteTally, Error> {
        let votes = self
            .votes
            .apply_question_vote(&id, direction)
            .await
            .map_err(map_vote_error)?
            .ok_or_else(|| Error::not_found(format!("question {id} not found")))?;
        debug!(question_id = %id, voter = %voter.user_id(), ?direction, votes, "question vote applied");
        Ok(VoteTally { votes })
    }

    async fn vote_answer(
        &self,
        voter: &AuthenticatedUser,
        id: AnswerId,
        direction: VoteDirection,
    ) -> Result<VoteTally, Error> {
        let votes = self
            .votes
            .apply_answer_vote(&id, direction)
            .await
            .map_err(map_vote_error)?
            .ok_or_else(|| Error::not_found(format!("answer {id} not found")))?;
        debug!(answer_id = %id, voter = %voter.user_id(), ?direction, votes, "answer vote applied");
        Ok(VoteTally { votes })
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::ports::MockVoteRepository;
    use crate::domain::{ErrorCode, UserId};
    use rstest::{fixture, rstest};

    #[fixture]
    fn voter() -> AuthenticatedUser {
        AuthenticatedUser::new(UserId::random())
    }

    #[rstest]
    #[case(true, 1, 4)]
    #[case(false, -1, 2)]
    #[tokio::test]
    async fn vote_answer_returns_post_mutation_total(
        voter: AuthenticatedUser,
        #[case] up: bool,
        #[case] delta: i64,
        #[case] expected: i64,
    ) {
        let mut repo = MockVoteRepository::new();
        repo.expect_apply_answer_vote()
            .withf(move |_, direction| direction.delta() == delta)
            .times(1)
            .return_once(move |_, direction| Ok(Some(3 + direction.delta())));

        let tally = VoteLedgerService::new(Arc::new(repo))
            .vote_answer(&voter, AnswerId::random(), VoteDirection::from_up(up))
            .await
            .expect("vote applies");
        assert_eq!(tally.votes, expected);
    }

    #[rstest]
    #[tokio::test]
    async fn vote_on_missing_question_is_not_found(voter: AuthenticatedUser) {
        let mut repo = MockVoteRepository::new();
        repo.expect_apply_question_vote()
            .return_once(|_, _| Ok(None));

        let error = VoteLedgerService::new(Arc::new(repo))
            .vote_question(&voter, QuestionId::random(), VoteDirection::Up)
            .await
            .expect_err("missing question");
        assert_eq!(error.code(), ErrorCode::NotFound);
    }

    #[rstest]
    #[tokio::test]
    async fn unreachable_store_is_service_unavailable(voter: AuthenticatedUser) {
        let mut repo = MockVoteRepository::new();
        repo.expect_apply_question_vote().return_once(|_, _| {
            Err(VoteRepositoryError::connection(
                "FATAL: password authentication failed for user \"forum\" at 10.0.0.5:5432",
            ))
        });

        let error = VoteLedgerService::new(Arc::new(repo))
            .vote_question(&voter, QuestionId::random(), VoteDirection::Down)
            .await
            .expect_err("store down");
        assert_eq!(error.code(), ErrorCode::ServiceUnavailable);
        assert_eq!(error.message(), "vote repository unavailable");
    }
}
