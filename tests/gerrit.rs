//! Gerrit client tests against a mock server speaking Digest auth

use gerrit_reviewer::gerrit::{Authentication, GerritClient};
use gerrit_reviewer::transport::TransportError;
use gerrit_reviewer::{hash_str, parse_header_map, Credentials, Error};
use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Match, Mock, MockServer, Request, ResponseTemplate};

const CHALLENGE: &str =
    r#"Digest realm="Gerrit Code Review", qop="auth", nonce="K1Bq1F1Ylmu+sQ9Es2djhA==""#;
const REALM: &str = "Gerrit Code Review";
const NONCE: &str = "K1Bq1F1Ylmu+sQ9Es2djhA==";

/// Server side check of an `Authorization: Digest` header, done by hand
struct ValidDigest {
    username: &'static str,
    password: &'static str,
}

impl Match for ValidDigest {
    fn matches(&self, request: &Request) -> bool {
        let Some(value) = request.headers.get("authorization") else {
            return false;
        };
        let Ok(value) = value.to_str() else {
            return false;
        };
        let Some(params) = value.strip_prefix("Digest ") else {
            return false;
        };
        let Ok(fields) = parse_header_map(params) else {
            return false;
        };

        let field = |key: &str| fields.get(key).cloned().unwrap_or_default();
        let uri = request.url.path();

        let ha1 = hash_str(&format!("{}:{}:{}", self.username, REALM, self.password));
        let ha2 = hash_str(&format!("{}:{}", request.method.as_str(), uri));
        let expected = hash_str(&format!(
            "{}:{}:{}:{}:auth:{}",
            ha1,
            NONCE,
            field("nc"),
            field("cnonce"),
            ha2
        ));

        field("username") == self.username
            && field("realm") == REALM
            && field("nonce") == NONCE
            && field("uri") == uri
            && field("qop") == "auth"
            && field("nc") == "00000001"
            && field("cnonce").len() == 16
            && field("response") == expected
    }
}

fn alice() -> ValidDigest {
    ValidDigest {
        username: "alice",
        password: "s3cret",
    }
}

async fn add_reviewer(
    base_url: String,
    password: &'static str,
) -> Result<Authentication, TransportError> {
    // the blocking client must live outside the async runtime
    tokio::task::spawn_blocking(move || {
        GerritClient::new(&base_url, Credentials::new("alice", password))?.add_reviewer("123", "bob")
    })
    .await
    .unwrap()
}

async fn mount_digest_exchange(server: &MockServer, prefix: &str, authorized: ResponseTemplate) {
    let reviewers = format!("{}/a/changes/123/reviewers", prefix);

    Mock::given(method("POST"))
        .and(path(reviewers.as_str()))
        .and(alice())
        .and(body_json(json!({"reviewer": "bob"})))
        .respond_with(authorized)
        .with_priority(1)
        .expect(1)
        .mount(server)
        .await;

    Mock::given(method("POST"))
        .and(path(reviewers.as_str()))
        .respond_with(ResponseTemplate::new(401).insert_header("WWW-Authenticate", CHALLENGE))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_digest_handshake() {
    let server = MockServer::start().await;
    mount_digest_exchange(&server, "", ResponseTemplate::new(200)).await;

    let auth = add_reviewer(server.uri(), "s3cret").await.unwrap();
    assert_eq!(auth, Authentication::Digest);
}

#[tokio::test]
async fn test_digest_uri_includes_base_path() {
    let server = MockServer::start().await;
    mount_digest_exchange(&server, "/gerrit", ResponseTemplate::new(200)).await;

    let auth = add_reviewer(format!("{}/gerrit/", server.uri()), "s3cret")
        .await
        .unwrap();
    assert_eq!(auth, Authentication::Digest);
}

#[tokio::test]
async fn test_no_challenge_skips_auth() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/a/changes/123/reviewers"))
        .and(body_json(json!({"reviewer": "bob"})))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let auth = add_reviewer(server.uri(), "s3cret").await.unwrap();
    assert_eq!(auth, Authentication::Skipped);
}

#[tokio::test]
async fn test_wrong_password_not_retried() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/a/changes/123/reviewers"))
        .respond_with(ResponseTemplate::new(401).insert_header("WWW-Authenticate", CHALLENGE))
        .expect(2)
        .mount(&server)
        .await;

    match add_reviewer(server.uri(), "wrong").await {
        Err(TransportError::UnexpectedStatus { status, .. }) => assert_eq!(status.as_u16(), 401),
        other => panic!("unexpected result: {:?}", other),
    }
}

#[tokio::test]
async fn test_rejected_after_auth() {
    let server = MockServer::start().await;
    mount_digest_exchange(
        &server,
        "",
        ResponseTemplate::new(422).set_body_string("Account 'bob' not found"),
    )
    .await;

    match add_reviewer(server.uri(), "s3cret").await {
        Err(TransportError::UnexpectedStatus {
            service,
            status,
            body,
        }) => {
            assert_eq!(service, "Gerrit");
            assert_eq!(status.as_u16(), 422);
            assert_eq!(body, "Account 'bob' not found");
        }
        other => panic!("unexpected result: {:?}", other),
    }
}

#[tokio::test]
async fn test_401_without_challenge() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(401))
        .expect(1)
        .mount(&server)
        .await;

    assert!(matches!(
        add_reviewer(server.uri(), "s3cret").await,
        Err(TransportError::Digest(Error::NoDigestChallenge))
    ));
}

#[tokio::test]
async fn test_incomplete_challenge() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(401)
                .insert_header("WWW-Authenticate", r#"Digest realm="Gerrit Code Review", nonce="abc""#),
        )
        .expect(1)
        .mount(&server)
        .await;

    assert!(matches!(
        add_reviewer(server.uri(), "s3cret").await,
        Err(TransportError::Digest(Error::ChallengeIncomplete("qop", _)))
    ));
}

#[tokio::test]
async fn test_unexpected_first_status() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(404).set_body_string("Not found: 123"))
        .expect(1)
        .mount(&server)
        .await;

    match add_reviewer(server.uri(), "s3cret").await {
        Err(TransportError::UnexpectedStatus { status, body, .. }) => {
            assert_eq!(status.as_u16(), 404);
            assert_eq!(body, "Not found: 123");
        }
        other => panic!("unexpected result: {:?}", other),
    }
}
