//! Reading the CSRF token out of `document.cookie`.

use std::fmt;

use percent_encoding::percent_decode_str;

/// Returns the value of cookie `name` from a `document.cookie` style string.
///
/// Pairs are separated by `;` and may carry surrounding whitespace. Only an
/// exact name match counts, so `csrftoken` never matches `xcsrftoken`.
/// Values are percent-decoded; invalid UTF-8 falls back to lossy decoding.
pub fn read_cookie(cookie_header: &str, name: &str) -> Option<String> {
    if name.is_empty() {
        return None;
    }

    cookie_header
        .split(';')
        .map(str::trim)
        .filter_map(|pair| pair.split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| percent_decode_str(value).decode_utf8_lossy().into_owned())
}

/// CSRF token echoed back to the server in a request header.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct CsrfToken(String);

impl CsrfToken {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Reads the token from the cookie string; a missing cookie yields an
    /// empty token, which the server will reject.
    pub fn from_cookies(cookie_header: &str, cookie_name: &str) -> Self {
        match read_cookie(cookie_header, cookie_name) {
            Some(value) => Self(value),
            None => {
                log::warn!("cookie `{}` not set, sending an empty CSRF token", cookie_name);
                Self::default()
            }
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

// Keeps the token out of logs.
impl fmt::Debug for CsrfToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("CsrfToken").field(&"***").finish()
    }
}
