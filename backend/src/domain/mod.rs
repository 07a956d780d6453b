//! Domain primitives, aggregates and services.
//!
//! Purpose: Define strongly typed forum entities and the use cases that
//! operate on them. Types are framework agnostic; inbound adapters translate
//! them to HTTP payloads and outbound adapters to storage rows.
//!
//! Public surface:
//! - Error / ErrorCode: transport-agnostic failure payload.
//! - User, Username, EmailAddress: identity store records.
//! - Question, Answer, Comment: content graph entities.
//! - CredentialService, SessionAuthenticator, ContentGraphService,
//!   VoteLedgerService: use cases behind the driving ports.

pub mod auth;
pub mod content;
pub mod content_graph_service;
pub mod credential_service;
pub mod error;
pub mod ports;
pub mod session_authenticator;
pub mod trace_id;
pub mod user;
pub mod vote;
pub mod vote_ledger_service;

pub use self::auth::{
    AuthenticatedUser, LoginCredentials, LoginValidationError, NewAccount, PASSWORD_MAX_BYTES,
    RegistrationValidationError, SessionRejection, SessionToken,
};
pub use self::content::{
    Answer, AnswerId, Comment, CommentId, ContentValidationError, PostBody, PostTitle, Question,
    QuestionDraft, QuestionId, QuestionThread, TagSet, TitleFilter,
};
pub use self::content_graph_service::ContentGraphService;
pub use self::credential_service::{CredentialService, SESSION_TTL_HOURS};
pub use self::error::{Error, ErrorCode, ErrorValidationError, TRACE_ID_HEADER};
pub use self::session_authenticator::SessionAuthenticator;
pub use self::trace_id::TraceId;
pub use self::user::{EmailAddress, PasswordHash, User, UserId, UserValidationError, Username};
pub use self::vote::{VoteDirection, VoteTally};
pub use self::vote_ledger_service::VoteLedgerService;
