//! Shared validation helpers for inbound HTTP adapters.
//!
//! Every validation failure becomes `invalid_request` with `{field, code}`
//! details so clients can highlight the offending input.

use serde_json::json;

use crate::domain::{
    AnswerId, ContentValidationError, Error, LoginValidationError, QuestionId,
    RegistrationValidationError, UserValidationError,
};

/// Message used when the request body cannot be parsed at all.
pub(crate) const INVALID_INPUT: &str = "Invalid input";

fn field_error(message: impl Into<String>, field: &str, code: &str) -> Error {
    Error::invalid_request(message).with_details(json!({
        "field": field,
        "code": code,
    }))
}

pub(crate) fn map_content_error(err: ContentValidationError) -> Error {
    field_error(err.to_string(), err.field(), err.code())
}

fn user_error_code(err: &UserValidationError) -> &'static str {
    match err {
        UserValidationError::EmptyId
        | UserValidationError::EmptyUsername
        | UserValidationError::EmptyEmail => "empty",
        UserValidationError::UsernameTooShort { .. } => "too_short",
        UserValidationError::UsernameTooLong { .. } => "too_long",
        UserValidationError::InvalidId
        | UserValidationError::UsernameInvalidCharacters
        | UserValidationError::InvalidEmail => "invalid",
    }
}

pub(crate) fn map_registration_error(err: RegistrationValidationError) -> Error {
    let code = match &err {
        RegistrationValidationError::User(inner) => user_error_code(inner),
        RegistrationValidationError::EmptyPassword => "empty",
        RegistrationValidationError::PasswordTooLong { .. } => "too_long",
    };
    field_error(err.to_string(), err.field(), code)
}

pub(crate) fn map_login_error(err: LoginValidationError) -> Error {
    let field = match err {
        LoginValidationError::EmptyUsername => "username",
        LoginValidationError::EmptyPassword => "password",
    };
    field_error(err.to_string(), field, "empty")
}

pub(crate) fn parse_question_id(raw: &str) -> Result<QuestionId, Error> {
    QuestionId::new(raw).map_err(map_content_error)
}

pub(crate) fn parse_answer_id(raw: &str) -> Result<AnswerId, Error> {
    AnswerId::new(raw).map_err(map_content_error)
}

/// Error for bodies that are not valid JSON or miss required fields.
pub(crate) fn malformed_body_error(reason: impl std::fmt::Display) -> Error {
    Error::invalid_request(INVALID_INPUT).with_details(json!({
        "field": "body",
        "code": "malformed",
        "reason": reason.to_string(),
    }))
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::{ErrorCode, NewAccount, PostTitle};
    use rstest::rstest;

    fn details(error: &Error) -> (String, String) {
        let details = error.details().expect("details present");
        (
            details["field"].as_str().expect("field").to_owned(),
            details["code"].as_str().expect("code").to_owned(),
        )
    }

    #[rstest]
    fn invalid_ids_are_bad_requests() {
        let error = parse_question_id("not-a-uuid").expect_err("invalid id");
        assert_eq!(error.code(), ErrorCode::InvalidRequest);
        assert_eq!(details(&error), ("id".to_owned(), "invalid_id".to_owned()));
    }

    #[rstest]
    fn valid_ids_parse() {
        let raw = "3fa85f64-5717-4562-b3fc-2c963f66afa6";
        let id = parse_answer_id(raw).expect("valid id");
        assert_eq!(id.to_string(), raw);
    }

    #[rstest]
    fn content_errors_carry_field_and_code() {
        let error = map_content_error(PostTitle::new("  ").expect_err("blank title"));
        assert_eq!(error.message(), "title must not be empty");
        assert_eq!(details(&error), ("title".to_owned(), "empty".to_owned()));
    }

    #[rstest]
    #[case("al", "alice@example.com", "pw", "username", "too_short")]
    #[case("alice", "no-at-sign", "pw", "email", "invalid")]
    #[case("alice", "alice@example.com", "", "password", "empty")]
    fn registration_errors_carry_field_and_code(
        #[case] username: &str,
        #[case] email: &str,
        #[case] password: &str,
        #[case] field: &str,
        #[case] code: &str,
    ) {
        let err = NewAccount::try_from_parts(username, email, password).expect_err("invalid");
        let error = map_registration_error(err);
        assert_eq!(details(&error), (field.to_owned(), code.to_owned()));
    }

    #[rstest]
    fn malformed_bodies_use_generic_message() {
        let error = malformed_body_error("expected value at line 1 column 1");
        assert_eq!(error.message(), INVALID_INPUT);
        assert_eq!(details(&error), ("body".to_owned(), "malformed".to_owned()));
    }
}
