//! PostgreSQL-backed `ContentRepository` implementation using Diesel ORM.
//!
//! Child inserts and the append to the parent's reference array run in one
//! transaction. When the append matches no parent row the transaction rolls
//! back and the failure surfaces as [`ContentRepositoryError::MissingParent`].

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::result::Error as DieselError;
use diesel::sql_types;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, RunQueryDsl};
use uuid::Uuid;

use crate::domain::ports::{ContentRepository, ContentRepositoryError};
use crate::domain::{
    Answer, AnswerId, Comment, CommentId, Question, QuestionId, TitleFilter, UserId,
};

use super::diesel_error_mapping::{DieselFailure, classify_diesel_error, pool_failure_message};
use super::models::{
    AnswerRow, CommentRow, NewAnswerRow, NewCommentRow, NewQuestionRow, QuestionRow,
};
use super::pool::{DbPool, PoolError};
use super::schema::{answers, comments, questions};

const APPEND_ANSWER_SQL: &str =
    "UPDATE questions SET answer_ids = array_append(answer_ids, $1) WHERE id = $2";
const APPEND_COMMENT_SQL: &str =
    "UPDATE answers SET comment_ids = array_append(comment_ids, $1) WHERE id = $2";

/// Diesel-backed content graph store.
#[derive(Clone)]
pub struct DieselContentRepository {
    pool: DbPool,
}

impl DieselContentRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// Failure inside a child-insert transaction.
#[derive(Debug)]
enum LinkFailure {
    Diesel(DieselError),
    MissingParent(String),
}

impl From<DieselError> for LinkFailure {
    fn from(error: DieselError) -> Self {
        Self::Diesel(error)
    }
}

fn map_pool_error(error: PoolError) -> ContentRepositoryError {
    ContentRepositoryError::connection(pool_failure_message(error))
}

fn map_diesel_error(error: DieselError) -> ContentRepositoryError {
    match classify_diesel_error(error) {
        DieselFailure::Connection(message) => ContentRepositoryError::connection(message),
        DieselFailure::Query(message) => ContentRepositoryError::query(message),
        DieselFailure::UniqueViolation { .. } => {
            ContentRepositoryError::query("content identifier collision")
        }
    }
}

fn map_link_failure(failure: LinkFailure) -> ContentRepositoryError {
    match failure {
        LinkFailure::Diesel(error) => map_diesel_error(error),
        LinkFailure::MissingParent(parent) => ContentRepositoryError::missing_parent(parent),
    }
}

/// Escape `LIKE` metacharacters so the filter matches literally.
fn like_pattern(filter: &TitleFilter) -> String {
    let mut escaped = String::with_capacity(filter.as_str().len() + 2);
    escaped.push('%');
    for ch in filter.as_str().chars() {
        if matches!(ch, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped.push('%');
    escaped
}

fn row_to_question(row: QuestionRow) -> Question {
    Question {
        id: QuestionId::from_uuid(row.id),
        title: row.title,
        body: row.body,
        author: UserId::from_uuid(row.author_id),
        votes: row.votes,
        created_at: row.created_at,
        tags: row.tags,
        answers: row.answer_ids.into_iter().map(AnswerId::from_uuid).collect(),
    }
}

fn row_to_answer(row: AnswerRow) -> Answer {
    Answer {
        id: AnswerId::from_uuid(row.id),
        question: QuestionId::from_uuid(row.question_id),
        body: row.body,
        author: UserId::from_uuid(row.author_id),
        votes: row.votes,
        created_at: row.created_at,
        comments: row.comment_ids.into_iter().map(CommentId::from_uuid).collect(),
    }
}

fn row_to_comment(row: CommentRow) -> Comment {
    Comment {
        id: CommentId::from_uuid(row.id),
        answer: AnswerId::from_uuid(row.answer_id),
        body: row.body,
        author: UserId::from_uuid(row.author_id),
        created_at: row.created_at,
    }
}

#[async_trait]
impl ContentRepository for DieselContentRepository {
    async fn insert_question(&self, question: &Question) -> Result<(), ContentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = NewQuestionRow {
            id: *question.id.as_uuid(),
            title: &question.title,
            body: &question.body,
            author_id: *question.author.as_uuid(),
            tags: &question.tags,
            created_at: question.created_at,
        };
        diesel::insert_into(questions::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }

    async fn list_questions(
        &self,
        filter: Option<TitleFilter>,
    ) -> Result<Vec<Question>, ContentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let mut query = questions::table
            .select(QuestionRow::as_select())
            .order_by((questions::created_at.asc(), questions::id.asc()))
            .into_boxed();
        if let Some(filter) = filter.as_ref() {
            query = query.filter(questions::title.ilike(like_pattern(filter)));
        }
        let rows: Vec<QuestionRow> = query.load(&mut conn).await.map_err(map_diesel_error)?;
        Ok(rows.into_iter().map(row_to_question).collect())
    }

    async fn find_question(
        &self,
        id: &QuestionId,
    ) -> Result<Option<Question>, ContentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<QuestionRow> = questions::table
            .find(id.as_uuid())
            .select(QuestionRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        Ok(row.map(row_to_question))
    }

    async fn answers_for_question(
        &self,
        question: &QuestionId,
    ) -> Result<Vec<Answer>, ContentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<AnswerRow> = answers::table
            .filter(answers::question_id.eq(question.as_uuid()))
            .select(AnswerRow::as_select())
            .order_by((answers::created_at.asc(), answers::id.asc()))
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(rows.into_iter().map(row_to_answer).collect())
    }

    async fn insert_answer(&self, answer: &Answer) -> Result<(), ContentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let answer_id: Uuid = *answer.id.as_uuid();
        let question_id: Uuid = *answer.question.as_uuid();
        let body = answer.body.clone();
        let author_id: Uuid = *answer.author.as_uuid();
        let created_at = answer.created_at;

        conn.transaction::<_, LinkFailure, _>(|conn| {
            async move {
                let row = NewAnswerRow {
                    id: answer_id,
                    question_id,
                    body: &body,
                    author_id,
                    created_at,
                };
                diesel::insert_into(answers::table)
                    .values(&row)
                    .execute(conn)
                    .await?;
                let linked = diesel::sql_query(APPEND_ANSWER_SQL)
                    .bind::<sql_types::Uuid, _>(answer_id)
                    .bind::<sql_types::Uuid, _>(question_id)
                    .execute(conn)
                    .await?;
                if linked == 0 {
                    return Err(LinkFailure::MissingParent(format!("question {question_id}")));
                }
                Ok(())
            }
            .scope_boxed()
        })
        .await
        .map_err(map_link_failure)
    }

    async fn find_answer(&self, id: &AnswerId) -> Result<Option<Answer>, ContentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<AnswerRow> = answers::table
            .find(id.as_uuid())
            .select(AnswerRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        Ok(row.map(row_to_answer))
    }

    async fn insert_comment(&self, comment: &Comment) -> Result<(), ContentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let comment_id: Uuid = *comment.id.as_uuid();
        let answer_id: Uuid = *comment.answer.as_uuid();
        let body = comment.body.clone();
        let author_id: Uuid = *comment.author.as_uuid();
        let created_at = comment.created_at;

        conn.transaction::<_, LinkFailure, _>(|conn| {
            async move {
                let row = NewCommentRow {
                    id: comment_id,
                    answer_id,
                    body: &body,
                    author_id,
                    created_at,
                };
                diesel::insert_into(comments::table)
                    .values(&row)
                    .execute(conn)
                    .await?;
                let linked = diesel::sql_query(APPEND_COMMENT_SQL)
                    .bind::<sql_types::Uuid, _>(comment_id)
                    .bind::<sql_types::Uuid, _>(answer_id)
                    .execute(conn)
                    .await?;
                if linked == 0 {
                    return Err(LinkFailure::MissingParent(format!("answer {answer_id}")));
                }
                Ok(())
            }
            .scope_boxed()
        })
        .await
        .map_err(map_link_failure)
    }

    async fn comments_for_answer(
        &self,
        answer: &AnswerId,
    ) -> Result<Vec<Comment>, ContentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<CommentRow> = comments::table
            .filter(comments::answer_id.eq(answer.as_uuid()))
            .select(CommentRow::as_select())
            .order_by((comments::created_at.asc(), comments::id.asc()))
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(rows.into_iter().map(row_to_comment).collect())
    }
}
