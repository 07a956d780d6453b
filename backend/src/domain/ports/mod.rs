//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driven ports (`*Repository`, [`PasswordHasher`], [`SessionTokenCodec`])
//! describe what the domain needs from infrastructure. Driving ports
//! ([`LoginService`], [`RegistrationService`], [`ContentCommand`],
//! [`ContentQuery`], [`VoteCommand`]) are what inbound adapters call.

mod macros;
pub(crate) use macros::define_port_error;

mod content_command;
mod content_query;
mod content_repository;
mod login_service;
mod password_hasher;
mod registration_service;
mod session_token_codec;
mod user_repository;
mod vote_command;
mod vote_repository;

#[cfg(test)]
pub use content_command::MockContentCommand;
pub use content_command::ContentCommand;
#[cfg(test)]
pub use content_query::MockContentQuery;
pub use content_query::ContentQuery;
#[cfg(test)]
pub use content_repository::MockContentRepository;
pub use content_repository::{ContentRepository, ContentRepositoryError};
#[cfg(test)]
pub use login_service::MockLoginService;
pub use login_service::LoginService;
#[cfg(test)]
pub use password_hasher::MockPasswordHasher;
pub use password_hasher::{PasswordHasher, PasswordHasherError};
#[cfg(test)]
pub use registration_service::MockRegistrationService;
pub use registration_service::RegistrationService;
#[cfg(test)]
pub use session_token_codec::MockSessionTokenCodec;
pub use session_token_codec::{SessionTokenCodec, SessionTokenError};
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{UserPersistenceError, UserRepository};
#[cfg(test)]
pub use vote_command::MockVoteCommand;
pub use vote_command::VoteCommand;
#[cfg(test)]
pub use vote_repository::MockVoteRepository;
pub use vote_repository::{VoteRepository, VoteRepositoryError};
