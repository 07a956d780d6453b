//! Tests for the credential service.

use std::sync::Arc;

use chrono::TimeDelta;
use rstest::{fixture, rstest};

use super::*;
use crate::domain::ports::{MockPasswordHasher, MockSessionTokenCodec, MockUserRepository};
use crate::domain::{EmailAddress, ErrorCode, PasswordHash, Username};
use crate::test_support::{fixture_clock, fixture_timestamp};

type Service = CredentialService<MockUserRepository, MockPasswordHasher, MockSessionTokenCodec>;

struct Mocks {
    users: MockUserRepository,
    hasher: MockPasswordHasher,
    tokens: MockSessionTokenCodec,
}

impl Mocks {
    fn into_service(self) -> Service {
        CredentialService::new(
            Arc::new(self.users),
            Arc::new(self.hasher),
            Arc::new(self.tokens),
            fixture_clock(),
        )
    }
}

#[fixture]
fn mocks() -> Mocks {
    Mocks {
        users: MockUserRepository::new(),
        hasher: MockPasswordHasher::new(),
        tokens: MockSessionTokenCodec::new(),
    }
}

fn stored_user(username: &str) -> User {
    User {
        id: UserId::random(),
        username: Username::new(username).expect("valid username"),
        email: EmailAddress::new(format!("{username}@example.com")).expect("valid email"),
        password_hash: PasswordHash::new("stored-hash"),
        created_at: fixture_timestamp(),
    }
}

fn alice_account() -> NewAccount {
    NewAccount::try_from_parts("alice", "alice@example.com", "hunter2").expect("valid account")
}

fn alice_credentials(password: &str) -> LoginCredentials {
    LoginCredentials::try_from_parts("alice", password).expect("valid credentials")
}

#[rstest]
#[tokio::test]
async fn register_persists_hashed_user(mut mocks: Mocks) {
    mocks
        .users
        .expect_find_by_username_or_email()
        .times(1)
        .return_once(|_, _| Ok(None));
    mocks
        .hasher
        .expect_hash()
        .withf(|password| password == "hunter2")
        .times(1)
        .return_once(|_| Ok(PasswordHash::new("hashed")));
    mocks
        .users
        .expect_insert()
        .withf(|user| {
            user.username.as_ref() == "alice"
                && user.email.as_ref() == "alice@example.com"
                && user.password_hash.as_str() == "hashed"
                && user.created_at == fixture_timestamp()
        })
        .times(1)
        .return_once(|_| Ok(()));

    mocks
        .into_service()
        .register(&alice_account())
        .await
        .expect("registration succeeds");
}

#[rstest]
#[tokio::test]
async fn register_rejects_taken_username_without_inserting(mut mocks: Mocks) {
    let existing = stored_user("alice");
    mocks
        .users
        .expect_find_by_username_or_email()
        .times(1)
        .return_once(move |_, _| Ok(Some(existing)));
    mocks.hasher.expect_hash().times(0);
    mocks.users.expect_insert().times(0);

    let error = mocks
        .into_service()
        .register(&alice_account())
        .await
        .expect_err("duplicate");
    assert_eq!(error.code(), ErrorCode::Conflict);
    assert_eq!(error.message(), "username or email already exists");
}

#[rstest]
#[case(UserPersistenceError::duplicate("email"), ErrorCode::Conflict)]
#[case(UserPersistenceError::connection("refused"), ErrorCode::ServiceUnavailable)]
#[case(UserPersistenceError::query("boom"), ErrorCode::InternalError)]
#[tokio::test]
async fn register_maps_insert_failures(
    mut mocks: Mocks,
    #[case] failure: UserPersistenceError,
    #[case] expected: ErrorCode,
) {
    mocks
        .users
        .expect_find_by_username_or_email()
        .return_once(|_, _| Ok(None));
    mocks
        .hasher
        .expect_hash()
        .return_once(|_| Ok(PasswordHash::new("hashed")));
    mocks
        .users
        .expect_insert()
        .return_once(move |_| Err(failure));

    let error = mocks
        .into_service()
        .register(&alice_account())
        .await
        .expect_err("insert fails");
    assert_eq!(error.code(), expected);
}

#[rstest]
#[tokio::test]
async fn login_issues_token_expiring_after_ttl(mut mocks: Mocks) {
    let user = stored_user("alice");
    let expected_id = user.id.clone();
    mocks
        .users
        .expect_find_by_username()
        .withf(|username| username == "alice")
        .return_once(move |_| Ok(Some(user)));
    mocks
        .hasher
        .expect_verify()
        .withf(|password, hash| password == "hunter2" && hash.as_str() == "stored-hash")
        .return_once(|_, _| Ok(true));
    mocks.hasher.expect_decoy().times(0);
    mocks
        .tokens
        .expect_issue()
        .withf(move |id, expires_at| {
            *id == expected_id
                && *expires_at == fixture_timestamp() + TimeDelta::hours(SESSION_TTL_HOURS)
        })
        .return_once(|_, _| Ok(SessionToken::new("signed")));

    let token = mocks
        .into_service()
        .login(&alice_credentials("hunter2"))
        .await
        .expect("login succeeds");
    assert_eq!(token.as_str(), "signed");
}

#[rstest]
#[tokio::test]
async fn login_with_unknown_user_verifies_decoy(mut mocks: Mocks) {
    mocks
        .users
        .expect_find_by_username()
        .return_once(|_| Ok(None));
    mocks
        .hasher
        .expect_decoy()
        .times(1)
        .return_once(|| PasswordHash::new("decoy"));
    mocks
        .hasher
        .expect_verify()
        .withf(|_, hash| hash.as_str() == "decoy")
        .times(1)
        .return_once(|_, _| Ok(false));
    mocks.tokens.expect_issue().times(0);

    let error = mocks
        .into_service()
        .login(&alice_credentials("hunter2"))
        .await
        .expect_err("unknown user");
    assert_eq!(error.code(), ErrorCode::Unauthorized);
    assert_eq!(error.message(), "invalid credentials");
}

#[rstest]
#[tokio::test]
async fn login_with_wrong_password_matches_unknown_user_error(mut mocks: Mocks) {
    let user = stored_user("alice");
    mocks
        .users
        .expect_find_by_username()
        .return_once(move |_| Ok(Some(user)));
    mocks
        .hasher
        .expect_verify()
        .return_once(|_, _| Ok(false));
    mocks.tokens.expect_issue().times(0);

    let error = mocks
        .into_service()
        .login(&alice_credentials("wrong"))
        .await
        .expect_err("wrong password");
    assert_eq!(error.code(), ErrorCode::Unauthorized);
    assert_eq!(error.message(), "invalid credentials");
}

#[rstest]
#[tokio::test]
async fn login_surfaces_signing_failures_as_internal(mut mocks: Mocks) {
    let user = stored_user("alice");
    mocks
        .users
        .expect_find_by_username()
        .return_once(move |_| Ok(Some(user)));
    mocks.hasher.expect_verify().return_once(|_, _| Ok(true));
    mocks
        .tokens
        .expect_issue()
        .return_once(|_, _| Err(SessionTokenError::signing("bad key")));

    let error = mocks
        .into_service()
        .login(&alice_credentials("hunter2"))
        .await
        .expect_err("signing fails");
    assert_eq!(error.code(), ErrorCode::InternalError);
}
