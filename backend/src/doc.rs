//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] aggregates every forum endpoint and wire schema. The document
//! backs Swagger UI in debug builds and is exported by the `openapi-dump`
//! binary for client generation.

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::inbound::http::answers::AnswerVoteResponse;
use crate::inbound::http::dto::{
    AnswerDto, CommentDto, MessageResponse, PostBodyRequest, QuestionDto, QuestionThreadDto,
    VoteRequest,
};
use crate::inbound::http::questions::{CreateQuestionRequest, QuestionVoteResponse};
use crate::inbound::http::schemas::{ErrorCodeSchema, ErrorSchema};
use crate::inbound::http::users::{LoginRequest, LoginResponse, RegisterRequest};

/// Adds the bearer token security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        let scheme = HttpBuilder::new()
            .scheme(HttpAuthScheme::Bearer)
            .bearer_format("JWT")
            .description(Some("Token issued by POST /api/login."))
            .build();
        components.add_security_scheme("bearer", SecurityScheme::Http(scheme));
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Forum backend API",
        description = "Questions, answers, comments and votes behind bearer-token authentication."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::users::register,
        crate::inbound::http::users::login,
        crate::inbound::http::questions::list_questions,
        crate::inbound::http::questions::create_question,
        crate::inbound::http::questions::get_question,
        crate::inbound::http::questions::vote_question,
        crate::inbound::http::questions::create_answer,
        crate::inbound::http::answers::vote_answer,
        crate::inbound::http::answers::create_comment,
        crate::inbound::http::answers::list_comments,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        ErrorSchema,
        ErrorCodeSchema,
        RegisterRequest,
        LoginRequest,
        LoginResponse,
        MessageResponse,
        CreateQuestionRequest,
        QuestionDto,
        QuestionThreadDto,
        QuestionVoteResponse,
        AnswerDto,
        AnswerVoteResponse,
        CommentDto,
        PostBodyRequest,
        VoteRequest,
    )),
    tags(
        (name = "users", description = "Registration and login"),
        (name = "questions", description = "Questions and their answers"),
        (name = "answers", description = "Answer votes and comments"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use utoipa::openapi::RefOr;
    use utoipa::openapi::schema::Schema;

    fn schema_fields(name: &str) -> Vec<String> {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        match schemas.get(name).expect("schema registered") {
            RefOr::T(Schema::Object(obj)) => obj.properties.keys().cloned().collect(),
            _ => panic!("expected object schema for {name}"),
        }
    }

    #[rstest]
    fn error_schema_uses_wire_field_names() {
        let fields = schema_fields("Error");
        for field in ["error", "code", "traceId", "details"] {
            assert!(fields.iter().any(|f| f == field), "missing {field}");
        }
    }

    #[rstest]
    fn question_schema_is_camel_case() {
        let fields = schema_fields("QuestionDto");
        assert!(fields.iter().any(|f| f == "createdAt"));
        assert!(!fields.iter().any(|f| f == "created_at"));
    }

    #[rstest]
    #[case("/api/register")]
    #[case("/api/questions/{id}/vote")]
    #[case("/api/answers/{id}/comments")]
    #[case("/health/ready")]
    fn paths_are_documented(#[case] path: &str) {
        assert!(ApiDoc::openapi().paths.paths.contains_key(path));
    }

    #[rstest]
    fn bearer_scheme_is_registered() {
        let doc = ApiDoc::openapi();
        let components = doc.components.expect("components");
        assert!(components.security_schemes.contains_key("bearer"));
    }
}
