//! Answer handlers: votes and comments.

use actix_web::{get, post, put, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{PostBody, VoteDirection};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::SessionUser;
use crate::inbound::http::dto::{CommentDto, PostBodyRequest, VoteRequest};
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{map_content_error, parse_answer_id};

/// Counter value returned by answer votes.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct AnswerVoteResponse {
    pub votes: i64,
}

/// Move an answer's vote counter by one.
#[utoipa::path(
    put,
    path = "/api/answers/{id}/vote",
    params(("id" = String, Path, description = "Answer identifier")),
    request_body = VoteRequest,
    responses(
        (status = 200, description = "Vote applied", body = AnswerVoteResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "Answer not found", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["answers"],
    operation_id = "voteAnswer",
    security(("bearer" = []))
)]
#[put("/answers/{id}/vote")]
pub async fn vote_answer(
    user: SessionUser,
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<VoteRequest>,
) -> ApiResult<web::Json<AnswerVoteResponse>> {
    let id = parse_answer_id(&path.into_inner())?;
    let tally = state
        .votes
        .vote_answer(&user.into_inner(), id, VoteDirection::from_up(payload.up))
        .await?;
    Ok(web::Json(AnswerVoteResponse { votes: tally.votes }))
}

/// Comment on an answer.
#[utoipa::path(
    post,
    path = "/api/answers/{id}/comments",
    params(("id" = String, Path, description = "Answer identifier")),
    request_body = PostBodyRequest,
    responses(
        (status = 200, description = "Comment created", body = CommentDto),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "Answer not found", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["answers"],
    operation_id = "createComment",
    security(("bearer" = []))
)]
#[post("/answers/{id}/comments")]
pub async fn create_comment(
    user: SessionUser,
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<PostBodyRequest>,
) -> ApiResult<web::Json<CommentDto>> {
    let answer = parse_answer_id(&path.into_inner())?;
    let body = PostBody::new(&payload.body).map_err(map_content_error)?;
    let comment = state
        .content
        .create_comment(&user.into_inner(), answer, body)
        .await?;
    Ok(web::Json(comment.into()))
}

/// List an answer's comments in creation order.
#[utoipa::path(
    get,
    path = "/api/answers/{id}/comments",
    params(("id" = String, Path, description = "Answer identifier")),
    responses(
        (status = 200, description = "Comments", body = [CommentDto]),
        (status = 400, description = "Invalid identifier", body = ErrorSchema),
        (status = 404, description = "Answer not found", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["answers"],
    operation_id = "listComments",
    security([])
)]
#[get("/answers/{id}/comments")]
pub async fn list_comments(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<Vec<CommentDto>>> {
    let id = parse_answer_id(&path.into_inner())?;
    let comments = state.content_query.comments_for_answer(id).await?;
    Ok(web::Json(comments.into_iter().map(CommentDto::from).collect()))
}
