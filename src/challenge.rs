use crate::authorization::AuthorizationHeader;
use crate::digest::{Credentials, RequestContext};
use crate::{nonce, Error, Error::*, Result};
use std::collections::HashMap;
use std::str::FromStr;

use http::header::{HeaderMap, WWW_AUTHENTICATE};

/// Digest challenge parsed from a `WWW-Authenticate` header value.
///
/// Scoped to a single authentication attempt: a fresh one must be parsed
/// for every `401` the server sends.
#[derive(Debug, PartialEq, Clone)]
pub struct Challenge {
    /// Protection space the credentials apply to
    pub realm: String,
    /// Server nonce
    pub nonce: String,
    /// Quality of protection options as sent by the server, e.g. `auth` or `auth,auth-int`
    pub qop: String,
    /// Server opaque string, echoed back verbatim
    pub opaque: Option<String>,
    /// True if the server rejected a previous response because its nonce expired
    pub stale: bool,
}

impl Challenge {
    /// Construct from the `WWW-Authenticate` header string
    ///
    /// # Errors
    /// `ChallengeIncomplete` if `realm`, `nonce` or `qop` is missing,
    /// `UnknownAlgorithm` for anything but MD5, `InvalidHeaderSyntax` for
    /// an unterminated quoted string.
    pub fn parse(input: &str) -> Result<Self> {
        let input = input.trim();
        let mut kv = parse_header_map(digest_params(input).unwrap_or(input))?;

        if let Some(algo) = kv.get("algorithm") {
            if !algo.eq_ignore_ascii_case("MD5") {
                return Err(UnknownAlgorithm(algo.clone()));
            }
        }

        let realm = required(&mut kv, "realm", input)?;
        let nonce = required(&mut kv, "nonce", input)?;
        let qop = required(&mut kv, "qop", input)?;

        Ok(Self {
            realm,
            nonce,
            qop,
            opaque: kv.remove("opaque"),
            stale: match kv.get("stale") {
                Some(v) => v.eq_ignore_ascii_case("true"),
                None => false,
            },
        })
    }

    /// Find and parse the Digest challenge among a response's
    /// `WWW-Authenticate` headers. Challenges for other schemes are skipped.
    pub fn from_headers(headers: &HeaderMap) -> Result<Self> {
        for value in headers.get_all(WWW_AUTHENTICATE) {
            let value = value.to_str().map_err(|_| {
                InvalidHeaderSyntax(String::from_utf8_lossy(value.as_bytes()).into_owned())
            })?;

            if digest_params(value).is_some() {
                return Self::parse(value);
            }
        }

        Err(NoDigestChallenge)
    }

    /// Generate an [`AuthorizationHeader`](struct.AuthorizationHeader.html) answering this
    /// challenge, with a freshly generated client nonce.
    pub fn respond(
        &self,
        credentials: &Credentials,
        request: &RequestContext<'_>,
    ) -> Result<AuthorizationHeader> {
        let cnonce = nonce::generate_cnonce()?;
        AuthorizationHeader::from_challenge(self, credentials, request, cnonce)
    }
}

impl FromStr for Challenge {
    type Err = Error;

    fn from_str(input: &str) -> Result<Self> {
        Self::parse(input)
    }
}

fn required(kv: &mut HashMap<String, String>, key: &'static str, input: &str) -> Result<String> {
    kv.remove(key)
        .ok_or_else(|| ChallengeIncomplete(key, input.to_string()))
}

/// Attribute list following a `Digest` scheme token, None for other schemes
fn digest_params(input: &str) -> Option<&str> {
    let input = input.trim_start();
    let (scheme, rest) = match input.find(char::is_whitespace) {
        Some(i) => input.split_at(i),
        None => (input, ""),
    };

    if scheme.eq_ignore_ascii_case("Digest") {
        Some(rest)
    } else {
        None
    }
}

/// Helper func that parses the key-value string received from server.
///
/// Keys are lowercased and compared whole; a value is never inspected to
/// decide which key it belongs to. Bare tokens without `=` are skipped.
pub fn parse_header_map(input: &str) -> Result<HashMap<String, String>> {
    #[derive(Debug)]
    #[allow(non_camel_case_types)]
    enum ParserState {
        P_WHITE,
        P_NAME(usize),
        P_NAME_END(usize, usize),
        P_VALUE_BEGIN,
        P_VALUE_QUOTED,
        P_VALUE_QUOTED_NEXTLITERAL,
        P_VALUE_PLAIN,
    }

    let mut state = ParserState::P_WHITE;

    let mut parsed = HashMap::<String, String>::new();
    let mut current_token = String::new();
    let mut current_value = String::new();

    for (pos, c) in input.char_indices() {
        match state {
            ParserState::P_WHITE => {
                if c.is_alphabetic() {
                    state = ParserState::P_NAME(pos);
                }
            }
            ParserState::P_NAME(name_start) => {
                if c == '=' {
                    current_token = input[name_start..pos].to_ascii_lowercase();
                    state = ParserState::P_VALUE_BEGIN;
                } else if c == ',' {
                    state = ParserState::P_WHITE;
                } else if c.is_whitespace() {
                    state = ParserState::P_NAME_END(name_start, pos);
                }
            }
            ParserState::P_NAME_END(name_start, name_end) => {
                if c == '=' {
                    current_token = input[name_start..name_end].to_ascii_lowercase();
                    state = ParserState::P_VALUE_BEGIN;
                } else if c == ',' {
                    state = ParserState::P_WHITE;
                } else if c.is_alphabetic() {
                    // the previous token was bare, e.g. the auth scheme
                    state = ParserState::P_NAME(pos);
                }
            }
            ParserState::P_VALUE_BEGIN => {
                current_value.clear();
                state = match c {
                    '"' => ParserState::P_VALUE_QUOTED,
                    ',' => {
                        parsed.insert(std::mem::take(&mut current_token), String::new());
                        ParserState::P_WHITE
                    }
                    c if c.is_whitespace() => ParserState::P_VALUE_BEGIN,
                    _ => {
                        current_value.push(c);
                        ParserState::P_VALUE_PLAIN
                    }
                };
            }
            ParserState::P_VALUE_QUOTED => {
                match c {
                    '"' => {
                        parsed.insert(
                            std::mem::take(&mut current_token),
                            std::mem::take(&mut current_value),
                        );
                        state = ParserState::P_WHITE;
                    }
                    '\\' => {
                        state = ParserState::P_VALUE_QUOTED_NEXTLITERAL;
                    }
                    _ => {
                        current_value.push(c);
                    }
                };
            }
            ParserState::P_VALUE_PLAIN => {
                if c == ',' || c.is_whitespace() {
                    parsed.insert(
                        std::mem::take(&mut current_token),
                        std::mem::take(&mut current_value),
                    );
                    state = ParserState::P_WHITE;
                } else {
                    current_value.push(c);
                }
            }
            ParserState::P_VALUE_QUOTED_NEXTLITERAL => {
                current_value.push(c);
                state = ParserState::P_VALUE_QUOTED
            }
        }
    }

    match state {
        ParserState::P_VALUE_PLAIN => {
            parsed.insert(current_token, current_value);
        }
        ParserState::P_WHITE | ParserState::P_NAME(_) | ParserState::P_NAME_END(..) => {}
        _ => return Err(InvalidHeaderSyntax(input.to_string())),
    }

    Ok(parsed)
}
