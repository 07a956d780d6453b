//! PostgreSQL-backed `VoteRepository` implementation using Diesel ORM.
//!
//! Each vote is a single `UPDATE .. SET votes = votes + $delta .. RETURNING
//! votes` statement, so concurrent votes never lose increments and the
//! returned total is the one produced by this vote.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{VoteRepository, VoteRepositoryError};
use crate::domain::{AnswerId, QuestionId, VoteDirection};

use super::diesel_error_mapping::{DieselFailure, classify_diesel_error, pool_failure_message};
use super::pool::{DbPool, PoolError};
use super::schema::{answers, questions};

/// Diesel-backed vote counters.
#[derive(Clone)]
pub struct DieselVoteRepository {
    pool: DbPool,
}

impl DieselVoteRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> VoteRepositoryError {
    VoteRepositoryError::connection(pool_failure_message(error))
}

fn map_diesel_error(error: diesel::result::Error) -> VoteRepositoryError {
    match classify_diesel_error(error) {
        DieselFailure::Connection(message) => VoteRepositoryError::connection(message),
        DieselFailure::Query(message) => VoteRepositoryError::query(message),
        DieselFailure::UniqueViolation { .. } => VoteRepositoryError::query("unexpected conflict"),
    }
}

#[async_trait]
impl VoteRepository for DieselVoteRepository {
    async fn apply_question_vote(
        &self,
        id: &QuestionId,
        direction: VoteDirection,
    ) -> Result<Option<i64>, VoteRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::update(questions::table.find(id.as_uuid()))
            .set(questions::votes.eq(questions::votes + direction.delta()))
            .returning(questions::votes)
            .get_result::<i64>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)
    }

    async fn apply_answer_vote(
        &self,
        id: &AnswerId,
        direction: VoteDirection,
    ) -> Result<Option<i64>, VoteRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::update(answers::table.find(id.as_uuid()))
            .set(answers::votes.eq(answers::votes + direction.delta()))
            .returning(answers::votes)
            .get_result::<i64>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn checkout_failures_are_connection_errors() {
        let err = map_pool_error(PoolError::checkout("timed out"));
        assert_eq!(err, VoteRepositoryError::connection("timed out"));
    }

    #[rstest]
    fn diesel_failures_are_query_errors() {
        let err = map_diesel_error(diesel::result::Error::NotFound);
        assert_eq!(err, VoteRepositoryError::query("record not found"));
    }
}
