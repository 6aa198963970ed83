use crate::{Error, Error::*, Result};
use std::fmt;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// QOP field values
#[derive(Debug, PartialEq, Clone, Copy)]
#[allow(non_camel_case_types)]
pub enum Qop {
    AUTH,
    AUTH_INT,
}

impl Qop {
    /// Pick `auth` out of the comma-separated list a server offers.
    ///
    /// Integrity protection (`auth-int`) is never chosen, so a server that
    /// insists on it can't be answered.
    pub fn select(offered: &str) -> Result<Qop> {
        let mut qops = offered
            .split(',')
            .map(str::trim)
            .filter(|q| !q.is_empty())
            .filter_map(|q| Qop::from_str(q).ok());

        if qops.any(|q| q == Qop::AUTH) {
            Ok(Qop::AUTH)
        } else {
            Err(BadQop(offered.into()))
        }
    }
}

impl FromStr for Qop {
    type Err = Error;

    /// Parse from "auth" or "auth-int" as used in HTTP headers
    fn from_str(s: &str) -> Result<Self> {
        match s {
            "auth" => Ok(Qop::AUTH),
            "auth-int" => Ok(Qop::AUTH_INT),
            _ => Err(BadQop(s.into())),
        }
    }
}

impl Display for Qop {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Qop::AUTH => "auth",
            Qop::AUTH_INT => "auth-int",
        })
    }
}

/// HTTP method (hashed into HA2)
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HttpMethod<'a> {
    GET,
    POST,
    PUT,
    DELETE,
    HEAD,
    OTHER(&'a str),
}

impl<'a> Default for HttpMethod<'a> {
    fn default() -> Self {
        HttpMethod::GET
    }
}

impl<'a> From<&'a str> for HttpMethod<'a> {
    fn from(s: &'a str) -> Self {
        match s {
            "GET" => HttpMethod::GET,
            "POST" => HttpMethod::POST,
            "PUT" => HttpMethod::PUT,
            "DELETE" => HttpMethod::DELETE,
            "HEAD" => HttpMethod::HEAD,
            other => HttpMethod::OTHER(other),
        }
    }
}

impl<'a> From<&'a http::Method> for HttpMethod<'a> {
    fn from(m: &'a http::Method) -> Self {
        HttpMethod::from(m.as_str())
    }
}

impl<'a> Display for HttpMethod<'a> {
    /// Convert to uppercase string
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.write_str(match self {
            HttpMethod::GET => "GET",
            HttpMethod::POST => "POST",
            HttpMethod::PUT => "PUT",
            HttpMethod::DELETE => "DELETE",
            HttpMethod::HEAD => "HEAD",
            HttpMethod::OTHER(s) => s,
        })
    }
}
