use std::fmt::{self, Display, Formatter};
use std::result;

#[derive(Debug, PartialEq)]
pub enum Error {
    /// A required challenge attribute is absent: (attribute, header)
    ChallengeIncomplete(&'static str, String),
    InvalidHeaderSyntax(String),
    UnknownAlgorithm(String),
    BadQop(String),
    NoDigestChallenge,
    RandomSource(String),
}

pub type Result<T> = result::Result<T, Error>;

use Error::*;

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            ChallengeIncomplete(what, ctx) => {
                write!(f, "Missing \"{}\" in digest challenge: {}", what, ctx)
            }
            InvalidHeaderSyntax(ctx) => write!(f, "Invalid header syntax: {}", ctx),
            UnknownAlgorithm(ctx) => write!(f, "Unsupported digest algorithm: {}", ctx),
            BadQop(ctx) => write!(f, "Server does not offer qop=auth: {}", ctx),
            NoDigestChallenge => f.write_str("No Digest challenge in WWW-Authenticate"),
            RandomSource(ctx) => write!(f, "Secure random source failed: {}", ctx),
        }
    }
}

impl From<rand::Error> for Error {
    fn from(e: rand::Error) -> Self {
        RandomSource(e.to_string())
    }
}

impl std::error::Error for Error {}
