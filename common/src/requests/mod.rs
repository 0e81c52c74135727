//! Request payloads for the phone endpoints.
//!
//! The server reads these from a regular form post, so they are encoded as
//! `application/x-www-form-urlencoded` rather than JSON.

use url::form_urlencoded::Serializer;

pub const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded; charset=UTF-8";

/// Body of the uniqueness check and of the code request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PhoneNumberForm<'a> {
    pub phone_number: &'a str,
}

impl PhoneNumberForm<'_> {
    pub fn encode(&self) -> String {
        Serializer::new(String::new())
            .append_pair("phone_number", self.phone_number)
            .finish()
    }
}

/// Body of the code check.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VerificationCheckForm<'a> {
    pub phone_number: &'a str,
    pub verification_code: &'a str,
}

impl VerificationCheckForm<'_> {
    pub fn encode(&self) -> String {
        Serializer::new(String::new())
            .append_pair("phone_number", self.phone_number)
            .append_pair("verification_code", self.verification_code)
            .finish()
    }
}

/// Query string for the managers-by-employer lookup.
pub fn managers_url(base: &str, employer_id: &str) -> String {
    let query = Serializer::new(String::new())
        .append_pair("employer", employer_id)
        .finish();
    let separator = if base.contains('?') { '&' } else { '?' };
    format!("{}{}{}", base, separator, query)
}
