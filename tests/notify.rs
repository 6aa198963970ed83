//! HipChat webhook tests

use gerrit_reviewer::notify::{Color, HipChat};
use gerrit_reviewer::transport::TransportError;
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn notify(url: String, message: &'static str) -> Result<(), TransportError> {
    tokio::task::spawn_blocking(move || HipChat::new(&url)?.notify(Color::Purple, message))
        .await
        .unwrap()
}

#[tokio::test]
async fn test_notify() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v2/room/42/notification"))
        .and(header("content-type", "application/json"))
        .and(body_json(json!({
            "color": "purple",
            "message": "@here bob requested to review",
            "notify": true,
            "message_format": "text"
        })))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let url = format!("{}/v2/room/42/notification", server.uri());
    notify(url, "@here bob requested to review").await.unwrap();
}

#[tokio::test]
async fn test_notify_requires_no_content() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string("ok"))
        .expect(1)
        .mount(&server)
        .await;

    match notify(server.uri(), "hello").await {
        Err(TransportError::UnexpectedStatus {
            service, status, ..
        }) => {
            assert_eq!(service, "HipChat");
            assert_eq!(status.as_u16(), 200);
        }
        other => panic!("unexpected result: {:?}", other),
    }
}
