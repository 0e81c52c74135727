use log::info;

use crate::api::{UserPrompt, VerificationApi};
use crate::cookie::CsrfToken;
use crate::gate::SaveGate;
use crate::model::phone::PhoneField;

use super::state::VerificationFailure;
use super::{ensure_unique, validate};

const UNIQUE_MESSAGE: &str = "This phone number is valid and unique";
const INVALID_MESSAGE: &str = "Invalid phone number";

/// Admin add-user check: a valid, unused number opens the save gate
/// without any SMS round trip.
pub struct LegacyPhoneCheck<A, F, G, U> {
    api: A,
    field: F,
    gate: G,
    ui: U,
}

impl<A, F, G, U> LegacyPhoneCheck<A, F, G, U>
where
    A: VerificationApi,
    F: PhoneField,
    G: SaveGate,
    U: UserPrompt,
{
    pub fn new(api: A, field: F, gate: G, ui: U) -> Self {
        gate.disable_all();
        Self { api, field, gate, ui }
    }

    pub async fn check(&self, csrf: &CsrfToken) -> Result<(), VerificationFailure> {
        let outcome = match validate(&self.field) {
            Ok(candidate) => ensure_unique(&self.api, &candidate, csrf)
                .await
                .map(|()| candidate),
            Err(failure) => Err(failure),
        };

        match outcome {
            Ok(candidate) => {
                info!("phone number {} is unique", candidate.international);
                self.ui.alert(UNIQUE_MESSAGE);
                self.field.lock();
                self.gate.enable_all();
                Ok(())
            }
            Err(failure) => {
                self.gate.disable_all();
                match failure {
                    VerificationFailure::InvalidFormat => self.ui.alert(INVALID_MESSAGE),
                    other => self.ui.alert(&other.to_string()),
                }
                Err(failure)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{FakeApi, FakeGate, FakePhoneField, FakePrompt, init_logs};

    fn check(
        number: &str,
        valid: bool,
    ) -> (
        LegacyPhoneCheck<FakeApi, FakePhoneField, FakeGate, FakePrompt>,
        FakeApi,
        FakePhoneField,
        FakeGate,
        FakePrompt,
    ) {
        init_logs();
        let api = FakeApi::default();
        let field = FakePhoneField::new(number, valid);
        let gate = FakeGate::default();
        let ui = FakePrompt::default();
        let check = LegacyPhoneCheck::new(api.clone(), field.clone(), gate.clone(), ui.clone());
        (check, api, field, gate, ui)
    }

    #[tokio::test]
    async fn unique_number_opens_gate() {
        let (check, _api, field, gate, ui) = check("+15551234567", true);

        assert_eq!(check.check(&CsrfToken::new("t")).await, Ok(()));
        assert!(gate.is_enabled());
        assert!(field.locked.get());
        assert_eq!(ui.last_alert().as_deref(), Some(UNIQUE_MESSAGE));
    }

    #[tokio::test]
    async fn taken_number_closes_gate_again() {
        let (check, api, field, gate, _ui) = check("+15551234567", true);
        check.check(&CsrfToken::new("t")).await.unwrap();
        assert!(gate.is_enabled());

        field.set("+15557654321", true);
        api.exists(Some(true));
        let result = check.check(&CsrfToken::new("t")).await;

        assert_eq!(result, Err(VerificationFailure::AlreadyInUse));
        assert!(!gate.is_enabled());
    }

    #[tokio::test]
    async fn invalid_number_is_never_sent() {
        let (check, api, _field, gate, ui) = check("123", false);

        let result = check.check(&CsrfToken::new("t")).await;

        assert_eq!(result, Err(VerificationFailure::InvalidFormat));
        assert_eq!(api.call_count(), 0);
        assert!(!gate.is_enabled());
        assert_eq!(ui.alerts.borrow().len(), 1);
        assert_eq!(ui.last_alert().as_deref(), Some(INVALID_MESSAGE));
    }

    #[tokio::test]
    async fn network_error_keeps_gate_closed() {
        let (check, api, _field, gate, ui) = check("+15551234567", true);
        api.exists(None);

        let result = check.check(&CsrfToken::new("t")).await;

        assert_eq!(result, Err(VerificationFailure::UniquenessCheckFailed));
        assert!(!gate.is_enabled());
        assert_eq!(
            ui.last_alert().as_deref(),
            Some("Error checking phone number uniqueness")
        );
    }
}
