//! Server seams.
//!
//! Each trait is one endpoint family. The browser crate implements them
//! over `gloo-net`; everything is single-threaded, hence `?Send`.

use async_trait::async_trait;

use crate::cookie::CsrfToken;
use crate::error::Result;
use crate::model::manager::Manager;
use crate::responses::SuccessResponse;

#[async_trait(?Send)]
pub trait VerificationApi {
    /// Resolves `true` when the number already belongs to an account.
    ///
    /// Read-only on the server, so repeating it is harmless.
    async fn check_unique(&self, phone_number: &str, csrf: &CsrfToken) -> Result<bool>;

    /// Asks the SMS provider to send a one-time code.
    async fn request_code(&self, phone_number: &str, csrf: &CsrfToken) -> Result<SuccessResponse>;

    async fn check_code(
        &self,
        phone_number: &str,
        code: &str,
        csrf: &CsrfToken,
    ) -> Result<SuccessResponse>;
}

#[async_trait(?Send)]
pub trait ManagerDirectory {
    async fn managers_for(&self, employer_id: &str) -> Result<Vec<Manager>>;
}

#[async_trait(?Send)]
pub trait FragmentSource {
    /// Fetches an HTML fragment.
    async fn fetch_fragment(&self, url: &str) -> Result<String>;
}

/// Blocking browser dialogs.
pub trait UserPrompt {
    fn alert(&self, message: &str);

    /// `None` when the user dismisses the dialog.
    fn prompt(&self, message: &str) -> Option<String>;
}
