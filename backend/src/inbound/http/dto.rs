//! Wire representations of forum entities.
//!
//! Entities serialise with camelCase field names and RFC 3339 timestamps.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{Answer, Comment, Question, QuestionThread};

/// Question payload.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct QuestionDto {
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    pub id: String,
    #[schema(example = "How do lifetimes work?")]
    pub title: String,
    pub body: String,
    /// Author's user identifier.
    pub author: String,
    pub votes: i64,
    pub created_at: DateTime<Utc>,
    #[schema(example = json!(["rust", "lifetimes"]))]
    pub tags: Vec<String>,
    /// Answer identifiers in creation order.
    pub answers: Vec<String>,
}

impl From<Question> for QuestionDto {
    fn from(value: Question) -> Self {
        Self {
            id: value.id.to_string(),
            title: value.title,
            body: value.body,
            author: value.author.to_string(),
            votes: value.votes,
            created_at: value.created_at,
            tags: value.tags,
            answers: value.answers.iter().map(ToString::to_string).collect(),
        }
    }
}

/// Answer payload.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AnswerDto {
    pub id: String,
    /// Parent question identifier.
    pub question: String,
    pub body: String,
    pub author: String,
    pub votes: i64,
    pub created_at: DateTime<Utc>,
    /// Comment identifiers in creation order.
    pub comments: Vec<String>,
}

impl From<Answer> for AnswerDto {
    fn from(value: Answer) -> Self {
        Self {
            id: value.id.to_string(),
            question: value.question.to_string(),
            body: value.body,
            author: value.author.to_string(),
            votes: value.votes,
            created_at: value.created_at,
            comments: value.comments.iter().map(ToString::to_string).collect(),
        }
    }
}

/// Comment payload.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CommentDto {
    pub id: String,
    /// Parent answer identifier.
    pub answer: String,
    pub body: String,
    pub author: String,
    pub created_at: DateTime<Utc>,
}

impl From<Comment> for CommentDto {
    fn from(value: Comment) -> Self {
        Self {
            id: value.id.to_string(),
            answer: value.answer.to_string(),
            body: value.body,
            author: value.author.to_string(),
            created_at: value.created_at,
        }
    }
}

/// A question together with its answers.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct QuestionThreadDto {
    pub question: QuestionDto,
    pub answers: Vec<AnswerDto>,
}

impl From<QuestionThread> for QuestionThreadDto {
    fn from(value: QuestionThread) -> Self {
        Self {
            question: value.question.into(),
            answers: value.answers.into_iter().map(AnswerDto::from).collect(),
        }
    }
}

/// Plain acknowledgement.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    #[schema(example = "Registered")]
    pub message: String,
}

/// Vote request body.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct VoteRequest {
    /// `true` adds one vote, `false` removes one.
    pub up: bool,
}

/// Body request shared by answers and comments.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PostBodyRequest {
    pub body: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{AnswerId, QuestionDraft, UserId};
    use chrono::TimeZone;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    fn questions_serialise_in_camel_case() {
        let created_at = Utc
            .with_ymd_and_hms(2026, 2, 24, 10, 30, 0)
            .single()
            .expect("valid timestamp");
        let draft = QuestionDraft::try_from_parts("Title", "Body", Some(&["Rust".to_owned()]))
            .expect("valid draft");
        let mut question = Question::create(UserId::random(), draft, created_at);
        let answer = AnswerId::random();
        question.answers.push(answer);

        let value = serde_json::to_value(QuestionDto::from(question.clone())).expect("serialise");
        assert_eq!(value["createdAt"], json!("2026-02-24T10:30:00Z"));
        assert_eq!(value["author"], json!(question.author.to_string()));
        assert_eq!(value["answers"], json!([answer.to_string()]));
        assert_eq!(value["tags"], json!(["rust"]));
        assert_eq!(value["votes"], json!(0));
        assert!(value.get("created_at").is_none());
    }
}
