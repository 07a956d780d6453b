//! End-to-end HTTP tests over the in-process store.

use actix_web::http::{Method, StatusCode};
use actix_web::test as actix_test;
use backend::domain::ports::{SessionTokenCodec, UserRepository};
use backend::domain::{EmailAddress, Username};
use backend::outbound::token::JwtSessionTokens;
use backend::test_support::{TEST_TOKEN_SECRET, TestForum, json_request};
use futures::future::join;
use mockable::Clock;
use rstest::{fixture, rstest};
use serde_json::{Value, json};

#[fixture]
fn forum() -> TestForum {
    TestForum::new()
}

async fn body_of(res: actix_web::dev::ServiceResponse) -> (StatusCode, Value) {
    let status = res.status();
    let bytes = actix_test::read_body(res).await;
    (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
}

async fn logged_in(forum: &TestForum, name: &str) -> String {
    forum.register(name).await.expect("register");
    forum.token_for(name).await.expect("login")
}

#[rstest]
#[actix_web::test]
async fn full_question_and_answer_flow(forum: TestForum) {
    let app = actix_test::init_service(forum.app()).await;

    let register = json_request(
        Method::POST,
        "/api/register",
        &json!({"username": "alice", "email": "alice@example.com", "password": "hunter2"}),
        None,
    );
    let (status, body) = body_of(actix_test::call_service(&app, register.to_request()).await).await;
    assert_eq!((status, body), (StatusCode::OK, json!({"message": "Registered"})));

    let login = json_request(
        Method::POST,
        "/api/login",
        &json!({"username": "alice", "password": "hunter2"}),
        None,
    );
    let (_, body) = body_of(actix_test::call_service(&app, login.to_request()).await).await;
    let token = body["token"].as_str().expect("token").to_owned();

    let user_id = JwtSessionTokens::new(TEST_TOKEN_SECRET)
        .verify(&token, forum.clock.utc())
        .expect("token verifies");
    let alice = forum
        .store
        .find_by_username("alice")
        .await
        .expect("lookup")
        .expect("alice stored");
    assert_eq!(user_id, alice.id);

    let ask = json_request(
        Method::POST,
        "/api/questions",
        &json!({"title": "Lifetimes?", "body": "Explain"}),
        Some(&token),
    );
    let (status, question) = body_of(actix_test::call_service(&app, ask.to_request()).await).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(question["votes"], 0);
    assert_eq!(question["answers"], json!([]));
    assert_eq!(question["author"], json!(alice.id.to_string()));
    let question_id = question["id"].as_str().expect("id");

    let answer = json_request(
        Method::POST,
        &format!("/api/questions/{question_id}/answers"),
        &json!({"body": "Borrowing"}),
        Some(&token),
    );
    let (_, answer) = body_of(actix_test::call_service(&app, answer.to_request()).await).await;
    assert_eq!(answer["votes"], 0);
    let answer_id = answer["id"].as_str().expect("id");

    let fetch = actix_test::TestRequest::get().uri(&format!("/api/questions/{question_id}"));
    let (_, thread) = body_of(actix_test::call_service(&app, fetch.to_request()).await).await;
    assert_eq!(thread["question"]["answers"], json!([answer_id]));

    let vote = json_request(
        Method::PUT,
        &format!("/api/answers/{answer_id}/vote"),
        &json!({"up": true}),
        Some(&token),
    );
    let (status, votes) = body_of(actix_test::call_service(&app, vote.to_request()).await).await;
    assert_eq!((status, votes), (StatusCode::OK, json!({"votes": 1})));
}

#[rstest]
#[actix_web::test]
async fn duplicate_username_conflicts_without_second_record(forum: TestForum) {
    forum.register("alice").await.expect("first registration");
    let app = actix_test::init_service(forum.app()).await;

    let again = json_request(
        Method::POST,
        "/api/register",
        &json!({"username": "alice", "email": "alice2@example.com", "password": "pw"}),
        None,
    );
    let (status, body) = body_of(actix_test::call_service(&app, again.to_request()).await).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "conflict");

    let username = Username::new("nobody").expect("valid username");
    let email = EmailAddress::new("alice2@example.com").expect("valid email");
    let stored = forum
        .store
        .find_by_username_or_email(&username, &email)
        .await
        .expect("lookup");
    assert!(stored.is_none());
}

#[rstest]
#[actix_web::test]
async fn concurrent_up_votes_both_count(forum: TestForum) {
    let token = logged_in(&forum, "alice").await;
    let app = actix_test::init_service(forum.app()).await;

    let ask = json_request(
        Method::POST,
        "/api/questions",
        &json!({"title": "Race", "body": "Votes"}),
        Some(&token),
    );
    let (_, question) = body_of(actix_test::call_service(&app, ask.to_request()).await).await;
    let answer = json_request(
        Method::POST,
        &format!("/api/questions/{}/answers", question["id"].as_str().expect("id")),
        &json!({"body": "Answer"}),
        Some(&token),
    );
    let (_, answer) = body_of(actix_test::call_service(&app, answer.to_request()).await).await;
    let uri = format!("/api/answers/{}/vote", answer["id"].as_str().expect("id"));

    let vote = || json_request(Method::PUT, &uri, &json!({"up": true}), Some(&token)).to_request();
    let (first, second) = join(
        actix_test::call_service(&app, vote()),
        actix_test::call_service(&app, vote()),
    )
    .await;
    let (_, first) = body_of(first).await;
    let (_, second) = body_of(second).await;
    let mut totals = vec![first["votes"].as_i64(), second["votes"].as_i64()];
    totals.sort();
    assert_eq!(totals, vec![Some(1), Some(2)]);

    let down = json_request(Method::PUT, &uri, &json!({"up": false}), Some(&token));
    let (_, after) = body_of(actix_test::call_service(&app, down.to_request()).await).await;
    assert_eq!(after, json!({"votes": 1}));
}

#[rstest]
#[actix_web::test]
async fn tokens_expire_after_seventy_two_hours(forum: TestForum) {
    let token = logged_in(&forum, "alice").await;
    let app = actix_test::init_service(forum.app()).await;
    let ask = || {
        json_request(
            Method::POST,
            "/api/questions",
            &json!({"title": "Clock", "body": "Ticks"}),
            Some(&token),
        )
        .to_request()
    };

    forum.clock.advance_hours(71);
    let (status, _) = body_of(actix_test::call_service(&app, ask()).await).await;
    assert_eq!(status, StatusCode::OK);

    forum.clock.advance_hours(1);
    let (status, body) = body_of(actix_test::call_service(&app, ask()).await).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "token expired");
}

#[rstest]
#[actix_web::test]
async fn error_bodies_carry_the_trace_header(forum: TestForum) {
    let app = actix_test::init_service(forum.app()).await;
    let req = actix_test::TestRequest::get()
        .uri("/api/questions/00000000-0000-0000-0000-000000000000")
        .to_request();
    let res = actix_test::call_service(&app, req).await;
    let header = res
        .headers()
        .get("trace-id")
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned);
    let (status, body) = body_of(res).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["traceId"].as_str().map(str::to_owned), header);
}
