use crate::challenge::Challenge;
use crate::digest::{Credentials, DigestResult, NonceCount, RequestContext};
use crate::enums::Qop;
use crate::utils::QuoteForDigest;
use crate::{Error, Result};
use std::fmt::{self, Display, Formatter};

use http::HeaderValue;

/// Header sent back to the server, including password hashes.
///
/// This can be obtained by calling [`AuthorizationHeader::from_challenge()`](#method.from_challenge),
/// or from the [`Challenge`](struct.Challenge.html) with [`.respond()`](struct.Challenge.html#method.respond).
/// Fields hold raw values; quoting happens only when the header is rendered.
#[derive(Debug, Clone, PartialEq)]
pub struct AuthorizationHeader {
    pub username: String,
    pub realm: String,
    pub nonce: String,
    /// Requested URI
    pub uri: String,
    /// Client nonce
    pub cnonce: String,
    /// Nonce count, exactly as it was hashed into `response`
    pub nc: String,
    pub qop: Qop,
    /// Computed digest
    pub response: String,
    /// Server opaque string, echoed back if the challenge had one
    pub opaque: Option<String>,
}

impl AuthorizationHeader {
    /// Answer a challenge with the given client nonce.
    ///
    /// # Errors
    ///
    /// `BadQop` if the server doesn't offer plain `auth`.
    pub fn from_challenge(
        challenge: &Challenge,
        credentials: &Credentials,
        request: &RequestContext<'_>,
        cnonce: String,
    ) -> Result<AuthorizationHeader> {
        let qop = Qop::select(&challenge.qop)?;
        let nc = NonceCount::FIRST.to_string();

        let DigestResult { response, .. } =
            DigestResult::compute(credentials, challenge, request, &cnonce, &nc, qop);

        Ok(AuthorizationHeader {
            username: credentials.username.clone(),
            realm: challenge.realm.clone(),
            nonce: challenge.nonce.clone(),
            uri: request.uri.to_string(),
            cnonce,
            nc,
            qop,
            response,
            opaque: challenge.opaque.clone(),
        })
    }

    /// Produce a header string (also accessible through the Display trait)
    pub fn to_header_string(&self) -> String {
        self.to_string()
    }

    /// Produce a value for the `Authorization` request header
    pub fn to_header_value(&self) -> Result<HeaderValue> {
        let rendered = self.to_string();
        HeaderValue::from_str(&rendered).map_err(|_| Error::InvalidHeaderSyntax(rendered))
    }
}

impl Display for AuthorizationHeader {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Digest username=\"{}\", realm=\"{}\", nonce=\"{}\", uri=\"{}\", cnonce=\"{}\", nc=\"{}\", qop=\"{}\", response=\"{}\"",
            self.username.quote_for_digest(),
            self.realm.quote_for_digest(),
            self.nonce.quote_for_digest(),
            self.uri.quote_for_digest(),
            self.cnonce.quote_for_digest(),
            self.nc,
            self.qop,
            self.response,
        )?;

        if let Some(opaque) = &self.opaque {
            write!(f, ", opaque=\"{}\"", opaque.quote_for_digest())?;
        }

        Ok(())
    }
}
