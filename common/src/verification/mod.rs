//! Phone verification on the register page and the older admin check.
//!
//! - [`VerificationFlow`]: validity, uniqueness, SMS code request, code entry
//!   and code check, ending in an open save gate and a locked phone field.
//! - [`LegacyPhoneCheck`]: validity and uniqueness only, used by the admin
//!   add-user form.
//!
//! Both leave the save gate closed on every failure path.

mod flow;
mod legacy;
mod state;

pub use flow::VerificationFlow;
pub use legacy::LegacyPhoneCheck;
pub use state::{VerificationFailure, VerificationState};

use log::{debug, error};

use crate::api::VerificationApi;
use crate::cookie::CsrfToken;
use crate::model::phone::{PhoneCandidate, PhoneField};

/// Reads the field and applies the local format check.
///
/// The international number is copied into the submitted field either way.
pub(crate) fn validate(field: &impl PhoneField) -> Result<PhoneCandidate, VerificationFailure> {
    let candidate = PhoneCandidate::read(field);
    field.publish(&candidate.international);

    if candidate.is_valid() {
        Ok(candidate)
    } else {
        debug!("rejected phone input {:?}", candidate.raw);
        Err(VerificationFailure::InvalidFormat)
    }
}

/// Server uniqueness check for a locally valid candidate.
pub(crate) async fn ensure_unique(
    api: &impl VerificationApi,
    candidate: &PhoneCandidate,
    csrf: &CsrfToken,
) -> Result<(), VerificationFailure> {
    match api.check_unique(&candidate.international, csrf).await {
        Ok(false) => Ok(()),
        Ok(true) => Err(VerificationFailure::AlreadyInUse),
        Err(e) => {
            error!("uniqueness check failed: {}", e);
            Err(VerificationFailure::UniquenessCheckFailed)
        }
    }
}
