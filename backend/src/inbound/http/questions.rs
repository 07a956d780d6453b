//! Question handlers.
//!
//! ```text
//! GET  /api/questions?q=lifetimes
//! POST /api/questions {"title":"..","body":"..","tags":["rust"]}
//! GET  /api/questions/{id}
//! PUT  /api/questions/{id}/vote {"up":true}
//! POST /api/questions/{id}/answers {"body":".."}
//! ```

use actix_web::{get, post, put, web};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::{PostBody, QuestionDraft, TitleFilter, VoteDirection};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::SessionUser;
use crate::inbound::http::dto::{
    AnswerDto, PostBodyRequest, QuestionDto, QuestionThreadDto, VoteRequest,
};
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{map_content_error, parse_question_id};

/// Query parameters for `GET /api/questions`.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListQuestionsQuery {
    /// Case-insensitive title substring. Blank means no filter.
    pub q: Option<String>,
}

/// Request body for `POST /api/questions`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct CreateQuestionRequest {
    #[schema(example = "How do lifetimes work?")]
    pub title: String,
    pub body: String,
    #[schema(example = json!(["rust"]))]
    pub tags: Option<Vec<String>>,
}

/// Acknowledgement returned by question votes.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct QuestionVoteResponse {
    #[schema(example = "Voted")]
    pub message: String,
    /// Counter value after this vote.
    pub votes: i64,
}

/// List questions, optionally filtered by title.
#[utoipa::path(
    get,
    path = "/api/questions",
    params(ListQuestionsQuery),
    responses(
        (status = 200, description = "Questions in creation order", body = [QuestionDto]),
        (status = 503, description = "Store unavailable", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["questions"],
    operation_id = "listQuestions",
    security([])
)]
#[get("/questions")]
pub async fn list_questions(
    state: web::Data<HttpState>,
    query: web::Query<ListQuestionsQuery>,
) -> ApiResult<web::Json<Vec<QuestionDto>>> {
    let filter = TitleFilter::parse(query.q.as_deref());
    let questions = state.content_query.list_questions(filter).await?;
    Ok(web::Json(
        questions.into_iter().map(QuestionDto::from).collect(),
    ))
}

/// Create a question authored by the caller.
#[utoipa::path(
    post,
    path = "/api/questions",
    request_body = CreateQuestionRequest,
    responses(
        (status = 200, description = "Question created", body = QuestionDto),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["questions"],
    operation_id = "createQuestion",
    security(("bearer" = []))
)]
#[post("/questions")]
pub async fn create_question(
    user: SessionUser,
    state: web::Data<HttpState>,
    payload: web::Json<CreateQuestionRequest>,
) -> ApiResult<web::Json<QuestionDto>> {
    let CreateQuestionRequest { title, body, tags } = payload.into_inner();
    let draft = QuestionDraft::try_from_parts(&title, &body, tags.as_deref())
        .map_err(map_content_error)?;
    let question = state
        .content
        .create_question(&user.into_inner(), draft)
        .await?;
    Ok(web::Json(question.into()))
}

/// Fetch a question with its answers.
#[utoipa::path(
    get,
    path = "/api/questions/{id}",
    params(("id" = String, Path, description = "Question identifier")),
    responses(
        (status = 200, description = "Question thread", body = QuestionThreadDto),
        (status = 400, description = "Invalid identifier", body = ErrorSchema),
        (status = 404, description = "Question not found", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["questions"],
    operation_id = "getQuestion",
    security([])
)]
#[get("/questions/{id}")]
pub async fn get_question(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<QuestionThreadDto>> {
    let id = parse_question_id(&path.into_inner())?;
    let thread = state.content_query.question_thread(id).await?;
    Ok(web::Json(thread.into()))
}

/// Move a question's vote counter by one.
#[utoipa::path(
    put,
    path = "/api/questions/{id}/vote",
    params(("id" = String, Path, description = "Question identifier")),
    request_body = VoteRequest,
    responses(
        (status = 200, description = "Vote applied", body = QuestionVoteResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "Question not found", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["questions"],
    operation_id = "voteQuestion",
    security(("bearer" = []))
)]
#[put("/questions/{id}/vote")]
pub async fn vote_question(
    user: SessionUser,
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<VoteRequest>,
) -> ApiResult<web::Json<QuestionVoteResponse>> {
    let id = parse_question_id(&path.into_inner())?;
    let tally = state
        .votes
        .vote_question(&user.into_inner(), id, VoteDirection::from_up(payload.up))
        .await?;
    Ok(web::Json(QuestionVoteResponse {
        message: "Voted".to_owned(),
        votes: tally.votes,
    }))
}

/// Answer a question.
#[utoipa::path(
    post,
    path = "/api/questions/{id}/answers",
    params(("id" = String, Path, description = "Question identifier")),
    request_body = PostBodyRequest,
    responses(
        (status = 200, description = "Answer created", body = AnswerDto),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "Question not found", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["questions"],
    operation_id = "createAnswer",
    security(("bearer" = []))
)]
#[post("/questions/{id}/answers")]
pub async fn create_answer(
    user: SessionUser,
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<PostBodyRequest>,
) -> ApiResult<web::Json<AnswerDto>> {
    let question = parse_question_id(&path.into_inner())?;
    let body = PostBody::new(&payload.body).map_err(map_content_error)?;
    let answer = state
        .content
        .create_answer(&user.into_inner(), question, body)
        .await?;
    Ok(web::Json(answer.into()))
}

#[cfg(test)]
#[path = "questions_tests.rs"]
mod tests;
