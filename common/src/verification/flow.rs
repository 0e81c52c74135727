use std::cell::{Cell, RefCell};

use log::{debug, error, info, warn};

use crate::api::{UserPrompt, VerificationApi};
use crate::cookie::CsrfToken;
use crate::gate::SaveGate;
use crate::model::phone::PhoneField;
use crate::responses::SuccessResponse;

use super::state::{VerificationFailure, VerificationState};
use super::{ensure_unique, validate};

const CODE_PROMPT: &str = "Enter the verification code:";
const VERIFIED_MESSAGE: &str = "Phone number verified. Complete the form and click Register";

/// SMS verification of the register page phone number.
///
/// The flow borrows nothing from the page: the widget, the endpoints, the
/// submit controls and the dialogs are all handed in, and the flow keeps only
/// its own state and the last number that passed the uniqueness check.
pub struct VerificationFlow<A, F, G, U> {
    api: A,
    field: F,
    gate: G,
    ui: U,
    state: Cell<VerificationState>,
    /// Number that passed validity and uniqueness in the current cycle.
    checked_number: RefCell<Option<String>>,
    running: Cell<bool>,
}

impl<A, F, G, U> VerificationFlow<A, F, G, U>
where
    A: VerificationApi,
    F: PhoneField,
    G: SaveGate,
    U: UserPrompt,
{
    /// Builds the flow and closes the save gate.
    pub fn new(api: A, field: F, gate: G, ui: U) -> Self {
        gate.disable_all();
        Self {
            api,
            field,
            gate,
            ui,
            state: Cell::new(VerificationState::Idle),
            checked_number: RefCell::new(None),
            running: Cell::new(false),
        }
    }

    pub fn state(&self) -> VerificationState {
        self.state.get()
    }

    /// Runs one attempt, as triggered by the verify button.
    ///
    /// A retry for an unchanged number after a code-stage failure starts at
    /// the code request; any other retry starts over. Clicks while an attempt
    /// is in flight, or after the number is verified, are ignored.
    pub async fn verify(&self, csrf: &CsrfToken) -> VerificationState {
        if self.state() == VerificationState::Verified {
            debug!("phone number already verified, ignoring click");
            return self.state();
        }
        if self.running.replace(true) {
            warn!("verification already in progress, ignoring click");
            return self.state();
        }

        let outcome = self.attempt(csrf).await;
        self.running.set(false);

        match outcome {
            Ok(()) => {
                self.transition(VerificationState::Verified);
                self.field.lock();
                self.gate.enable_all();
                self.ui.alert(VERIFIED_MESSAGE);
            }
            Err(failure) => self.fail(failure),
        }
        self.state()
    }

    /// Records a failure that happened outside an attempt, such as the phone
    /// widget failing to load.
    pub fn fail(&self, failure: VerificationFailure) {
        if !failure.resumes_at_code_request() {
            *self.checked_number.borrow_mut() = None;
        }
        self.gate.disable_all();
        self.transition(VerificationState::Failed(failure));
        self.ui.alert(&failure.to_string());
    }

    async fn attempt(&self, csrf: &CsrfToken) -> Result<(), VerificationFailure> {
        let number = match self.resumable_number() {
            Some(number) => {
                info!("retrying verification code for {}", number);
                number
            }
            None => {
                self.transition(VerificationState::AwaitingValidityCheck);
                *self.checked_number.borrow_mut() = None;
                let candidate = validate(&self.field)?;
                self.transition(VerificationState::AwaitingUniqueness);
                ensure_unique(&self.api, &candidate, csrf).await?;
                *self.checked_number.borrow_mut() = Some(candidate.international.clone());
                candidate.international
            }
        };

        self.transition(VerificationState::AwaitingCodeRequest);
        let requested = self.api.request_code(&number, csrf).await;
        require_success(requested, "code request", VerificationFailure::CodeRequestFailed)?;

        self.transition(VerificationState::AwaitingCodeEntry);
        let code = self
            .ui
            .prompt(CODE_PROMPT)
            .map(|code| code.trim().to_string())
            .filter(|code| !code.is_empty())
            .ok_or(VerificationFailure::CodeRequired)?;

        self.transition(VerificationState::AwaitingCodeCheck);
        match self.api.check_code(&number, &code, csrf).await {
            Ok(response) if response.success => Ok(()),
            Ok(response) => {
                debug!("code rejected: {:?}", response.error);
                Err(VerificationFailure::CodeInvalid)
            }
            Err(e) => {
                error!("code check failed: {}", e);
                Err(VerificationFailure::CodeCheckFailed)
            }
        }
    }

    /// The already-checked number, if the last attempt failed at the code
    /// stage and the field still holds it.
    fn resumable_number(&self) -> Option<String> {
        let VerificationState::Failed(failure) = self.state() else {
            return None;
        };
        if !failure.resumes_at_code_request() {
            return None;
        }
        let checked = self.checked_number.borrow().clone()?;
        (checked == self.field.number()).then_some(checked)
    }

    fn transition(&self, next: VerificationState) {
        debug!("verification: {:?} -> {:?}", self.state(), next);
        self.state.set(next);
    }
}

fn require_success(
    response: crate::Result<SuccessResponse>,
    step: &str,
    failure: VerificationFailure,
) -> Result<(), VerificationFailure> {
    match response {
        Ok(response) if response.success => Ok(()),
        Ok(response) => {
            warn!("{} refused: {}", step, response.error.as_deref().unwrap_or("no reason given"));
            Err(failure)
        }
        Err(e) => {
            error!("{} failed: {}", step, e);
            Err(failure)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{FakeApi, FakeGate, FakePhoneField, FakePrompt, init_logs};

    struct Page {
        api: FakeApi,
        field: FakePhoneField,
        gate: FakeGate,
        ui: FakePrompt,
        flow: VerificationFlow<FakeApi, FakePhoneField, FakeGate, FakePrompt>,
    }

    fn page(number: &str, valid: bool) -> Page {
        init_logs();
        let api = FakeApi::default();
        let field = FakePhoneField::new(number, valid);
        let gate = FakeGate::default();
        let ui = FakePrompt::default();
        let flow = VerificationFlow::new(api.clone(), field.clone(), gate.clone(), ui.clone());
        Page {
            api,
            field,
            gate,
            ui,
            flow,
        }
    }

    fn csrf() -> CsrfToken {
        CsrfToken::new("token")
    }

    #[tokio::test]
    async fn verified_number_opens_gate_and_locks_field() {
        let page = page("+15551234567", true);
        page.api.exists(Some(false));
        page.ui.answer(Some("123456"));

        let state = page.flow.verify(&csrf()).await;

        assert_eq!(state, VerificationState::Verified);
        assert!(page.gate.is_enabled());
        assert_eq!(page.gate.enable_calls.get(), 1);
        assert!(page.field.locked.get());
        assert_eq!(page.field.published.borrow().as_slice(), ["+15551234567"]);
        assert_eq!(
            page.api.calls.borrow().as_slice(),
            [
                "check_unique +15551234567",
                "request_code +15551234567",
                "check_code +15551234567 123456",
            ]
        );
        assert_eq!(page.ui.last_alert().as_deref(), Some(VERIFIED_MESSAGE));
    }

    #[tokio::test]
    async fn invalid_format_makes_no_request() {
        let page = page("123", false);

        let state = page.flow.verify(&csrf()).await;

        assert_eq!(state, VerificationState::Failed(VerificationFailure::InvalidFormat));
        assert_eq!(page.api.call_count(), 0);
        assert!(!page.gate.is_enabled());
        assert_eq!(
            page.ui.last_alert(),
            Some(VerificationFailure::InvalidFormat.to_string())
        );
    }

    #[tokio::test]
    async fn widget_valid_but_not_international_is_rejected_locally() {
        let page = page("5551234567", true);

        page.flow.verify(&csrf()).await;

        assert_eq!(page.api.call_count(), 0);
    }

    #[tokio::test]
    async fn existing_number_keeps_gate_closed() {
        let page = page("+15551234567", true);
        page.api.exists(Some(true));
        page.ui.answer(Some("123456"));

        let state = page.flow.verify(&csrf()).await;

        assert_eq!(state, VerificationState::Failed(VerificationFailure::AlreadyInUse));
        assert_eq!(page.api.call_count(), 1);
        assert!(!page.gate.is_enabled());
        assert!(!page.field.locked.get());

        // Retrying the same number goes through the uniqueness check again.
        page.flow.verify(&csrf()).await;
        assert_eq!(page.api.call_count(), 2);
        assert!(!page.gate.is_enabled());
    }

    #[tokio::test]
    async fn transport_failure_reports_the_failed_step() {
        let page = page("+15551234567", true);
        page.api.exists(None);

        let state = page.flow.verify(&csrf()).await;

        assert_eq!(
            state,
            VerificationState::Failed(VerificationFailure::UniquenessCheckFailed)
        );
        assert!(!page.gate.is_enabled());
    }

    #[tokio::test]
    async fn refused_code_request_stops_before_prompt() {
        let page = page("+15551234567", true);
        page.api
            .code_request(Some(SuccessResponse::failed("Failed to send verification code")));
        page.ui.answer(Some("123456"));

        let state = page.flow.verify(&csrf()).await;

        assert_eq!(state, VerificationState::Failed(VerificationFailure::CodeRequestFailed));
        assert_eq!(page.api.call_count(), 2);
        assert!(!page.gate.is_enabled());
    }

    #[tokio::test]
    async fn refused_code_request_retry_skips_uniqueness() {
        let page = page("+15551234567", true);
        page.api.code_request(None);

        let state = page.flow.verify(&csrf()).await;
        assert_eq!(state, VerificationState::Failed(VerificationFailure::CodeRequestFailed));

        page.ui.answer(Some("123456"));
        assert_eq!(page.flow.verify(&csrf()).await, VerificationState::Verified);
        assert_eq!(
            page.api.calls.borrow().as_slice(),
            [
                "check_unique +15551234567",
                "request_code +15551234567",
                "request_code +15551234567",
                "check_code +15551234567 123456",
            ]
        );
    }

    #[tokio::test]
    async fn dismissed_prompt_then_retry_resumes_at_code_request() {
        let page = page("+15551234567", true);
        page.ui.answer(None);

        let state = page.flow.verify(&csrf()).await;
        assert_eq!(state, VerificationState::Failed(VerificationFailure::CodeRequired));
        assert!(!page.gate.is_enabled());

        page.ui.answer(Some("  654321 "));
        let state = page.flow.verify(&csrf()).await;

        assert_eq!(state, VerificationState::Verified);
        let calls = page.api.calls.borrow();
        assert_eq!(
            calls.iter().filter(|c| c.starts_with("check_unique")).count(),
            1
        );
        assert_eq!(calls.last().map(String::as_str), Some("check_code +15551234567 654321"));
    }

    #[tokio::test]
    async fn wrong_code_can_be_retried_without_limit() {
        let page = page("+15551234567", true);
        for _ in 0..3 {
            page.api.code_check(Some(SuccessResponse::failed("bad code")));
            page.ui.answer(Some("000000"));
            let state = page.flow.verify(&csrf()).await;
            assert_eq!(state, VerificationState::Failed(VerificationFailure::CodeInvalid));
            assert!(!page.gate.is_enabled());
        }

        page.ui.answer(Some("123456"));
        assert_eq!(page.flow.verify(&csrf()).await, VerificationState::Verified);
        assert!(page.gate.is_enabled());
    }

    #[tokio::test]
    async fn changed_number_after_code_failure_starts_over() {
        let page = page("+15551234567", true);
        page.api.code_check(Some(SuccessResponse::failed("bad code")));
        page.ui.answer(Some("000000"));
        page.flow.verify(&csrf()).await;

        page.field.set("+15557654321", true);
        page.api.exists(Some(true));
        let state = page.flow.verify(&csrf()).await;

        assert_eq!(state, VerificationState::Failed(VerificationFailure::AlreadyInUse));
        assert!(
            page.api
                .calls
                .borrow()
                .contains(&"check_unique +15557654321".to_string())
        );
    }

    #[tokio::test]
    async fn click_after_verification_is_ignored() {
        let page = page("+15551234567", true);
        page.ui.answer(Some("123456"));
        page.flow.verify(&csrf()).await;
        let calls = page.api.call_count();

        assert_eq!(page.flow.verify(&csrf()).await, VerificationState::Verified);
        assert_eq!(page.api.call_count(), calls);
        assert_eq!(page.gate.enable_calls.get(), 1);
    }

    #[test]
    fn widget_failure_keeps_gate_closed() {
        let page = page("", false);
        page.flow.fail(VerificationFailure::Unavailable);

        assert_eq!(
            page.flow.state(),
            VerificationState::Failed(VerificationFailure::Unavailable)
        );
        assert!(!page.gate.is_enabled());
        assert!(page.ui.last_alert().unwrap().contains("unavailable"));
    }
}
