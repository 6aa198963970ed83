use crate::challenge::Challenge;
use crate::enums::{HttpMethod, Qop};
use std::fmt;
use std::fmt::{Display, Formatter};

use ::digest::Digest;
use md5::Md5;

/// Calculate a lowercase hex MD5 of string's bytes
pub fn hash_str(text: &str) -> String {
    hex::encode(Md5::digest(text.as_bytes()))
}

/// Login credentials, configured once per process
#[derive(Clone, PartialEq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// The request being authenticated.
///
/// Method and URI must be exactly what goes on the wire, otherwise the
/// server computes a different HA2 and rejects the response.
#[derive(Debug, Clone, Copy)]
pub struct RequestContext<'a> {
    /// HTTP method used (defaults to GET)
    pub method: HttpMethod<'a>,
    /// Requested URI (not a domain! should start with a slash)
    pub uri: &'a str,
}

impl<'a> RequestContext<'a> {
    pub fn new(method: HttpMethod<'a>, uri: &'a str) -> Self {
        Self { method, uri }
    }

    /// Construct a context with the GET verb
    pub fn get(uri: &'a str) -> Self {
        Self::new(HttpMethod::GET, uri)
    }

    /// Construct a context with the POST verb
    pub fn post(uri: &'a str) -> Self {
        Self::new(HttpMethod::POST, uri)
    }
}

/// How many requests have been signed with a server nonce.
///
/// Each challenge is answered exactly once, so only [`NonceCount::FIRST`] is
/// ever sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NonceCount(pub u32);

impl NonceCount {
    pub const FIRST: NonceCount = NonceCount(1);
}

impl Display for NonceCount {
    /// Eight hex digits, e.g. `00000001`
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{:08x}", self.0)
    }
}

/// Partial hashes and the final response for one challenge
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DigestResult {
    pub ha1: String,
    pub ha2: String,
    pub response: String,
}

impl DigestResult {
    /// Compute HA1, HA2 and the `qop=auth` response.
    ///
    /// `nc` must be the exact text placed in the header's `nc` field.
    pub fn compute(
        credentials: &Credentials,
        challenge: &Challenge,
        request: &RequestContext<'_>,
        cnonce: &str,
        nc: &str,
        qop: Qop,
    ) -> Self {
        let ha1 = hash_str(&format!(
            "{name}:{realm}:{pw}",
            name = credentials.username,
            realm = challenge.realm,
            pw = credentials.password
        ));

        let ha2 = hash_str(&format!(
            "{method}:{uri}",
            method = request.method,
            uri = request.uri
        ));

        let response = hash_str(&format!(
            "{ha1}:{nonce}:{nc}:{cnonce}:{qop}:{ha2}",
            ha1 = ha1,
            nonce = challenge.nonce,
            nc = nc,
            cnonce = cnonce,
            qop = qop,
            ha2 = ha2
        ));

        DigestResult { ha1, ha2, response }
    }
}
