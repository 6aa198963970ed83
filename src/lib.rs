//! This crate adds a reviewer to a Gerrit change through Gerrit's REST API,
//! answering the HTTP Digest Auth challenge (IETF RFC 2617, MD5, `qop=auth`)
//! the server sends back, and optionally announces the request in a HipChat room.
//!
//! The digest part performs no I/O and can be used with any HTTP client:
//! parse the challenge, respond to it, attach the result as the `Authorization` header.
//!
//! # Examples
//!
//! Basic usage:
//!
//! ```
//! use gerrit_reviewer::{AuthorizationHeader, Credentials, RequestContext};
//!
//! // Value from the WWW-Authenticate HTTP header (usually in a HTTP 401 response)
//! let www_authenticate = r#"Digest realm="testrealm@host.com", qop="auth,auth-int", nonce="dcd98b7102dd2f0e8b11d0f600bfb0c093", opaque="5ccc069c403ebaf9f0171e9517f40e41""#;
//!
//! // Credentials are configured once; the request context must match the
//! // method and path that will actually be sent.
//! let credentials = Credentials::new("Mufasa", "Circle Of Life");
//! let request = RequestContext::get("/dir/index.html");
//!
//! // Parse the prompt header. You can inspect the parsed object, its fields are public.
//! let challenge = gerrit_reviewer::parse(www_authenticate).unwrap();
//!
//! // `challenge.respond(&credentials, &request)` generates a random cnonce for you;
//! // for this test we inject the one from the RFC example.
//! let answer = AuthorizationHeader::from_challenge(&challenge, &credentials, &request, "0a4f113b".to_string())
//!     .unwrap()
//!     .to_string();
//! assert_eq!(answer, r#"Digest username="Mufasa", realm="testrealm@host.com", nonce="dcd98b7102dd2f0e8b11d0f600bfb0c093", uri="/dir/index.html", cnonce="0a4f113b", nc="00000001", qop="auth", response="6629fae49393a05397450978507c4ef1", opaque="5ccc069c403ebaf9f0171e9517f40e41""#);
//!
//! // A challenge is good for exactly one response. If the server answers 401 again,
//! // parse the new WWW-Authenticate header instead of reusing this one.
//! ```

mod authorization;
mod challenge;
mod digest;
mod enums;
mod error;
mod nonce;
mod utils;

pub mod config;
pub mod gerrit;
pub mod notify;
pub mod transport;

pub use error::{Error, Result};

pub use crate::authorization::AuthorizationHeader;
pub use crate::challenge::{parse_header_map, Challenge};
pub use crate::digest::{hash_str, Credentials, DigestResult, NonceCount, RequestContext};
pub use crate::nonce::{cnonce_from, generate_cnonce, CNONCE_BYTES};

pub use crate::enums::*;

/// Parse the WWW-Authenticate header value.
/// It's just a convenience method to call [`Challenge::parse()`](struct.Challenge.html#method.parse).
pub fn parse(www_authenticate: &str) -> Result<Challenge> {
    Challenge::parse(www_authenticate)
}

#[test]
fn test_parse_respond() {
    let src = r#"
    Digest
       realm="Gerrit Code Review",
       qop="auth",
       nonce="K1Bq1F1Ylmu+sQ9Es2djhA=="
    "#;

    let credentials = Credentials::new("alice", "s3cret");
    let request = RequestContext::post("/a/changes/123/reviewers");

    let challenge = crate::parse(src).unwrap();
    let answer = challenge.respond(&credentials, &request).unwrap();

    assert_eq!(answer.cnonce.len(), 16);
    assert_eq!(answer.nc, "00000001");

    let expected = DigestResult::compute(
        &credentials,
        &challenge,
        &request,
        &answer.cnonce,
        &answer.nc,
        Qop::AUTH,
    );
    assert_eq!(answer.response, expected.response);

    let str = answer.to_string().replace(", ", ",\n  ");

    assert_eq!(
        str,
        format!(
            r#"
Digest username="alice",
  realm="Gerrit Code Review",
  nonce="K1Bq1F1Ylmu+sQ9Es2djhA==",
  uri="/a/changes/123/reviewers",
  cnonce="{}",
  nc="00000001",
  qop="auth",
  response="{}"
"#,
            answer.cnonce, expected.response
        )
        .trim()
    );
}
