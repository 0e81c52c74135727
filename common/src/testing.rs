//! In-memory fakes for the page seams. Clones share their recorded state.

use std::cell::{Cell, RefCell};
use std::collections::{HashMap, VecDeque};
use std::rc::Rc;

use async_trait::async_trait;
use tokio::sync::oneshot;

use crate::api::{FragmentSource, ManagerDirectory, UserPrompt, VerificationApi};
use crate::cookie::CsrfToken;
use crate::error::{GlueError, Result};
use crate::gate::SaveGate;
use crate::managers::OptionList;
use crate::model::manager::{Manager, SelectOption};
use crate::model::phone::PhoneField;
use crate::responses::SuccessResponse;
use crate::tabs::FragmentTarget;

pub fn init_logs() {
    let _ = env_logger::builder().is_test(true).try_init();
}

#[derive(Clone, Default)]
pub struct FakePhoneField {
    number: Rc<RefCell<String>>,
    valid: Rc<Cell<bool>>,
    pub published: Rc<RefCell<Vec<String>>>,
    pub locked: Rc<Cell<bool>>,
}

impl FakePhoneField {
    pub fn new(number: &str, valid: bool) -> Self {
        let field = Self::default();
        field.set(number, valid);
        field
    }

    pub fn set(&self, number: &str, valid: bool) {
        *self.number.borrow_mut() = number.to_string();
        self.valid.set(valid);
    }
}

impl PhoneField for FakePhoneField {
    fn raw(&self) -> String {
        self.number.borrow().clone()
    }

    fn number(&self) -> String {
        self.number.borrow().clone()
    }

    fn is_valid_number(&self) -> bool {
        self.valid.get()
    }

    fn publish(&self, number: &str) {
        self.published.borrow_mut().push(number.to_string());
    }

    fn lock(&self) {
        self.locked.set(true);
    }
}

#[derive(Clone, Default)]
pub struct FakeGate {
    enabled: Rc<Cell<bool>>,
    pub enable_calls: Rc<Cell<usize>>,
}

impl FakeGate {
    pub fn is_enabled(&self) -> bool {
        self.enabled.get()
    }
}

impl SaveGate for FakeGate {
    fn disable_all(&self) {
        self.enabled.set(false);
    }

    fn enable_all(&self) {
        self.enabled.set(true);
        self.enable_calls.set(self.enable_calls.get() + 1);
    }
}

#[derive(Clone, Default)]
pub struct FakePrompt {
    pub alerts: Rc<RefCell<Vec<String>>>,
    answers: Rc<RefCell<VecDeque<Option<String>>>>,
}

impl FakePrompt {
    pub fn answer(&self, answer: Option<&str>) {
        self.answers
            .borrow_mut()
            .push_back(answer.map(str::to_string));
    }

    pub fn last_alert(&self) -> Option<String> {
        self.alerts.borrow().last().cloned()
    }
}

impl UserPrompt for FakePrompt {
    fn alert(&self, message: &str) {
        self.alerts.borrow_mut().push(message.to_string());
    }

    fn prompt(&self, _message: &str) -> Option<String> {
        self.answers.borrow_mut().pop_front().flatten()
    }
}

/// Scripted verification endpoints. `None` entries simulate a network failure.
#[derive(Clone)]
pub struct FakeApi {
    exists: Rc<Cell<Option<bool>>>,
    code_requests: Rc<RefCell<VecDeque<Option<SuccessResponse>>>>,
    code_checks: Rc<RefCell<VecDeque<Option<SuccessResponse>>>>,
    pub calls: Rc<RefCell<Vec<String>>>,
}

impl Default for FakeApi {
    fn default() -> Self {
        Self {
            exists: Rc::new(Cell::new(Some(false))),
            code_requests: Default::default(),
            code_checks: Default::default(),
            calls: Default::default(),
        }
    }
}

impl FakeApi {
    pub fn exists(&self, exists: Option<bool>) {
        self.exists.set(exists);
    }

    pub fn code_request(&self, response: Option<SuccessResponse>) {
        self.code_requests.borrow_mut().push_back(response);
    }

    pub fn code_check(&self, response: Option<SuccessResponse>) {
        self.code_checks.borrow_mut().push_back(response);
    }

    pub fn call_count(&self) -> usize {
        self.calls.borrow().len()
    }

    fn next(queue: &RefCell<VecDeque<Option<SuccessResponse>>>) -> Result<SuccessResponse> {
        match queue.borrow_mut().pop_front() {
            Some(Some(response)) => Ok(response),
            Some(None) => Err(GlueError::Transport("connection reset".to_string())),
            None => Ok(SuccessResponse::ok()),
        }
    }
}

#[async_trait(?Send)]
impl VerificationApi for FakeApi {
    async fn check_unique(&self, phone_number: &str, _csrf: &CsrfToken) -> Result<bool> {
        self.calls
            .borrow_mut()
            .push(format!("check_unique {}", phone_number));
        self.exists
            .get()
            .ok_or_else(|| GlueError::Transport("connection reset".to_string()))
    }

    async fn request_code(&self, phone_number: &str, _csrf: &CsrfToken) -> Result<SuccessResponse> {
        self.calls
            .borrow_mut()
            .push(format!("request_code {}", phone_number));
        Self::next(&self.code_requests)
    }

    async fn check_code(
        &self,
        phone_number: &str,
        code: &str,
        _csrf: &CsrfToken,
    ) -> Result<SuccessResponse> {
        self.calls
            .borrow_mut()
            .push(format!("check_code {} {}", phone_number, code));
        Self::next(&self.code_checks)
    }
}

/// Responses held back until the test releases them, keyed by request.
#[derive(Clone, Default)]
pub struct Gated<T> {
    pending: Rc<RefCell<HashMap<String, oneshot::Receiver<Result<T>>>>>,
    pub requested: Rc<RefCell<Vec<String>>>,
}

impl<T> Gated<T> {
    /// Registers `key` and returns the handle that completes it.
    pub fn hold(&self, key: &str) -> oneshot::Sender<Result<T>> {
        let (tx, rx) = oneshot::channel();
        self.pending.borrow_mut().insert(key.to_string(), rx);
        tx
    }

    async fn wait(&self, key: &str) -> Result<T> {
        self.requested.borrow_mut().push(key.to_string());
        let rx = self
            .pending
            .borrow_mut()
            .remove(key)
            .ok_or_else(|| GlueError::Transport(format!("unexpected request {}", key)))?;
        rx.await
            .unwrap_or_else(|_| Err(GlueError::Transport("dropped".to_string())))
    }
}

#[async_trait(?Send)]
impl ManagerDirectory for Gated<Vec<Manager>> {
    async fn managers_for(&self, employer_id: &str) -> Result<Vec<Manager>> {
        self.wait(employer_id).await
    }
}

#[async_trait(?Send)]
impl FragmentSource for Gated<String> {
    async fn fetch_fragment(&self, url: &str) -> Result<String> {
        self.wait(url).await
    }
}

#[derive(Clone, Default)]
pub struct FakeOptionList {
    pub options: Rc<RefCell<Vec<SelectOption>>>,
}

impl FakeOptionList {
    pub fn labels(&self) -> Vec<String> {
        self.options
            .borrow()
            .iter()
            .map(|option| option.label.clone())
            .collect()
    }
}

impl OptionList for FakeOptionList {
    fn replace_options(&self, options: &[SelectOption]) {
        *self.options.borrow_mut() = options.to_vec();
    }
}

#[derive(Clone, Default)]
pub struct FakeContainer {
    pub html: Rc<RefCell<String>>,
    pub reinitialized: Rc<Cell<usize>>,
}

impl FragmentTarget for FakeContainer {
    fn replace_content(&self, html: &str) {
        *self.html.borrow_mut() = html.to_string();
    }

    fn reinitialize(&self) {
        self.reinitialized.set(self.reinitialized.get() + 1);
    }
}
