//! `gloo-net` implementations of the server seams.

use async_trait::async_trait;
use common::api::{FragmentSource, ManagerDirectory, VerificationApi};
use common::config::GlueConfig;
use common::cookie::CsrfToken;
use common::model::manager::Manager;
use common::requests::{managers_url, PhoneNumberForm, VerificationCheckForm, FORM_CONTENT_TYPE};
use common::responses::{parse_managers, parse_success, parse_uniqueness, SuccessResponse};
use common::{GlueError, Result};
use gloo_net::http::{Request, Response};

fn transport(e: gloo_net::Error) -> GlueError {
    GlueError::Transport(e.to_string())
}

async fn read_body(response: Response) -> Result<String> {
    if !response.ok() {
        return Err(GlueError::Status(response.status()));
    }
    response.text().await.map_err(transport)
}

/// Phone endpoints, posted as forms with the CSRF header.
pub struct HttpVerificationApi {
    check_unique_url: String,
    request_code_url: String,
    check_code_url: String,
    csrf_header: String,
}

impl HttpVerificationApi {
    pub fn new(config: &GlueConfig) -> Self {
        Self {
            check_unique_url: config.endpoints.check_unique.clone(),
            request_code_url: config.endpoints.request_code.clone(),
            check_code_url: config.endpoints.check_code.clone(),
            csrf_header: config.csrf.header.clone(),
        }
    }

    async fn post_form(&self, url: &str, body: String, csrf: &CsrfToken) -> Result<String> {
        let response = Request::post(url)
            .header(&self.csrf_header, csrf.as_str())
            .header("Content-Type", FORM_CONTENT_TYPE)
            .header("X-Requested-With", "XMLHttpRequest")
            .body(body)
            .map_err(transport)?
            .send()
            .await
            .map_err(transport)?;
        read_body(response).await
    }
}

#[async_trait(?Send)]
impl VerificationApi for HttpVerificationApi {
    async fn check_unique(&self, phone_number: &str, csrf: &CsrfToken) -> Result<bool> {
        let body = PhoneNumberForm { phone_number }.encode();
        let reply = self.post_form(&self.check_unique_url, body, csrf).await?;
        Ok(parse_uniqueness(&reply)?.exists)
    }

    async fn request_code(&self, phone_number: &str, csrf: &CsrfToken) -> Result<SuccessResponse> {
        let body = PhoneNumberForm { phone_number }.encode();
        let reply = self.post_form(&self.request_code_url, body, csrf).await?;
        parse_success(&reply)
    }

    async fn check_code(
        &self,
        phone_number: &str,
        code: &str,
        csrf: &CsrfToken,
    ) -> Result<SuccessResponse> {
        let body = VerificationCheckForm {
            phone_number,
            verification_code: code,
        }
        .encode();
        let reply = self.post_form(&self.check_code_url, body, csrf).await?;
        parse_success(&reply)
    }
}

pub struct HttpManagerDirectory {
    base_url: String,
}

impl HttpManagerDirectory {
    pub fn new(config: &GlueConfig) -> Self {
        Self {
            base_url: config.endpoints.managers.clone(),
        }
    }
}

#[async_trait(?Send)]
impl ManagerDirectory for HttpManagerDirectory {
    async fn managers_for(&self, employer_id: &str) -> Result<Vec<Manager>> {
        let response = Request::get(&managers_url(&self.base_url, employer_id))
            .send()
            .await
            .map_err(transport)?;
        parse_managers(&read_body(response).await?)
    }
}

/// Plain `GET` of server-rendered form markup.
pub struct HttpFragmentSource;

#[async_trait(?Send)]
impl FragmentSource for HttpFragmentSource {
    async fn fetch_fragment(&self, url: &str) -> Result<String> {
        let response = Request::get(url)
            .header("X-Requested-With", "XMLHttpRequest")
            .send()
            .await
            .map_err(transport)?;
        read_body(response).await
    }
}
