mod error;
mod form;
mod steps;

pub use error::WizardError;
pub use form::{FieldId, FieldKind, FieldTypeError, FieldValue, SignupForm};
pub use steps::{Predicate, StepAction, StepDefinition, signup_steps};

use std::sync::Arc;
use std::time::Duration;

use tracing::{info, warn};

use crate::service::{ServiceError, SignupService};

const DEFAULT_ACTION_TIMEOUT: Duration = Duration::from_secs(30);

/// Wizard submission status. At most one action is ever in flight; while
/// `Submitting`, `advance` and `resend` reject instead of overlapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Status {
    #[default]
    Idle,
    Submitting,
    Error,
}

/// Successful outcome of `advance`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    /// Moved to the given step index.
    Moved(usize),
    /// The terminal step's action resolved; the completion handler ran.
    Completed,
}

type CompletionHandler = Box<dyn FnOnce(SignupForm) + Send>;

/// Sequences the user through the ordered signup steps, refusing advancement
/// until the active step's gate passes, and running the step's network action
/// at the boundary.
pub struct SignupWizard {
    steps: Vec<StepDefinition>,
    form: SignupForm,
    current: usize,
    status: Status,
    error_message: Option<String>,
    code_sent: bool,
    code_resent: bool,
    complete: bool,
    service: Arc<dyn SignupService>,
    action_timeout: Duration,
    completion: Option<CompletionHandler>,
}

impl SignupWizard {
    pub fn new(steps: Vec<StepDefinition>, service: Arc<dyn SignupService>) -> Self {
        Self {
            steps,
            form: SignupForm::default(),
            current: 0,
            status: Status::Idle,
            error_message: None,
            code_sent: false,
            code_resent: false,
            complete: false,
            service,
            action_timeout: DEFAULT_ACTION_TIMEOUT,
            completion: None,
        }
    }

    /// The standard three-step signup flow.
    pub fn standard(service: Arc<dyn SignupService>) -> Self {
        Self::new(signup_steps(), service)
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.action_timeout = timeout;
        self
    }

    /// Install the handler invoked once with the final form snapshot when the
    /// terminal step's action resolves.
    pub fn on_complete(mut self, handler: impl FnOnce(SignupForm) + Send + 'static) -> Self {
        self.completion = Some(Box::new(handler));
        self
    }

    pub fn steps(&self) -> &[StepDefinition] {
        &self.steps
    }

    pub fn step_count(&self) -> usize {
        self.steps.len()
    }

    pub fn current_step(&self) -> usize {
        self.current
    }

    pub fn current_definition(&self) -> &StepDefinition {
        &self.steps[self.current]
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    pub fn form(&self) -> &SignupForm {
        &self.form
    }

    pub fn code_sent(&self) -> bool {
        self.code_sent
    }

    pub fn code_resent(&self) -> bool {
        self.code_resent
    }

    pub fn is_complete(&self) -> bool {
        self.complete
    }

    /// Replace one field's value. Leaves `status` and `error_message` alone.
    pub fn update_field(&mut self, field: FieldId, value: FieldValue) -> Result<(), FieldTypeError> {
        self.form.set(field, value)
    }

    /// Set-membership toggle on the investment-goals list.
    pub fn toggle_goal(&mut self, goal: &str) {
        self.form.toggle_goal(goal);
    }

    /// Whether the given step's gate passes. Pure; out-of-range is `false`.
    pub fn validate_step(&self, step: usize) -> bool {
        self.steps
            .get(step)
            .is_some_and(|s| s.predicates.iter().all(|p| p.holds(&self.form)))
    }

    /// Try to move past the current step.
    ///
    /// Validation failure or an action failure changes only
    /// `status`/`error_message`; on success exactly the step index moves.
    /// On the terminal step a resolved action hands the form snapshot to the
    /// completion handler instead of incrementing.
    pub async fn advance(&mut self) -> Result<Advance, WizardError> {
        if self.status == Status::Submitting {
            return Err(WizardError::Busy);
        }
        if self.complete {
            return Ok(Advance::Completed);
        }
        if !self.validate_step(self.current) {
            let err = WizardError::Validation;
            self.status = Status::Error;
            self.error_message = Some(err.to_string());
            return Err(err);
        }

        self.error_message = None;
        let step = &self.steps[self.current];
        let terminal = self.current + 1 == self.steps.len();

        if let Some(action) = step.action {
            self.status = Status::Submitting;
            match self.run_action(action).await {
                Ok(()) => {
                    if action == StepAction::SendVerificationCode {
                        self.code_sent = true;
                        info!(email = %self.form.email, "verification code sent");
                    }
                }
                Err(source) => {
                    warn!(step = step.id, error = %source, "step action failed");
                    self.status = Status::Error;
                    let err = WizardError::Action(source);
                    self.error_message = Some(err.to_string());
                    return Err(err);
                }
            }
        }

        self.status = Status::Idle;
        if terminal {
            self.complete = true;
            info!(email = %self.form.email, "registration complete");
            if let Some(handler) = self.completion.take() {
                handler(self.form.clone());
            }
            return Ok(Advance::Completed);
        }

        self.current += 1;
        info!(step = self.steps[self.current].id, "advanced to step");
        Ok(Advance::Moved(self.current))
    }

    /// Go back one step, floored at 0. Clears any error; never validates.
    pub fn retreat(&mut self) {
        self.current = self.current.saturating_sub(1);
        self.error_message = None;
        if self.status == Status::Error {
            self.status = Status::Idle;
        }
    }

    /// Re-invoke the action tied to `step` without moving. Success sets the
    /// resent flag; failure surfaces like any other action failure.
    pub async fn resend(&mut self, step: usize) -> Result<(), WizardError> {
        if self.status == Status::Submitting {
            return Err(WizardError::Busy);
        }
        let action = self
            .steps
            .get(step)
            .and_then(|s| s.action)
            .ok_or(WizardError::NoAction(step))?;

        self.status = Status::Submitting;
        match self.run_action(action).await {
            Ok(()) => {
                self.status = Status::Idle;
                self.error_message = None;
                if action == StepAction::SendVerificationCode {
                    self.code_sent = true;
                    self.code_resent = true;
                    info!(email = %self.form.email, "verification code resent");
                }
                Ok(())
            }
            Err(source) => {
                warn!(step, error = %source, "resend failed");
                self.status = Status::Error;
                let err = WizardError::Action(source);
                self.error_message = Some(err.to_string());
                Err(err)
            }
        }
    }

    async fn run_action(&self, action: StepAction) -> Result<(), ServiceError> {
        let fut = async {
            match action {
                StepAction::SendVerificationCode => {
                    self.service.send_verification_code(&self.form.email).await
                }
                StepAction::CompleteRegistration => {
                    self.service.complete_registration(&self.form).await
                }
            }
        };
        match tokio::time::timeout(self.action_timeout, fut).await {
            Ok(result) => result,
            Err(_) => Err(ServiceError::Timeout),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Resolves or rejects immediately, counting invocations per action.
    struct FakeService {
        send_calls: AtomicUsize,
        register_calls: AtomicUsize,
        fail_send: bool,
        fail_register: bool,
    }

    impl FakeService {
        fn ok() -> Arc<Self> {
            Arc::new(Self {
                send_calls: AtomicUsize::new(0),
                register_calls: AtomicUsize::new(0),
                fail_send: false,
                fail_register: false,
            })
        }

        fn failing_register() -> Arc<Self> {
            Arc::new(Self {
                send_calls: AtomicUsize::new(0),
                register_calls: AtomicUsize::new(0),
                fail_send: false,
                fail_register: true,
            })
        }

        fn failing_send() -> Arc<Self> {
            Arc::new(Self {
                send_calls: AtomicUsize::new(0),
                register_calls: AtomicUsize::new(0),
                fail_send: true,
                fail_register: false,
            })
        }
    }

    #[async_trait]
    impl SignupService for FakeService {
        async fn send_verification_code(&self, _email: &str) -> Result<(), ServiceError> {
            self.send_calls.fetch_add(1, Ordering::SeqCst);
            if self.fail_send {
                Err(ServiceError::Rejected("send failed".into()))
            } else {
                Ok(())
            }
        }

        async fn complete_registration(&self, _form: &SignupForm) -> Result<(), ServiceError> {
            self.register_calls.fetch_add(1, Ordering::SeqCst);
            if self.fail_register {
                Err(ServiceError::Rejected("register failed".into()))
            } else {
                Ok(())
            }
        }
    }

    /// Registers the call, then never resolves.
    struct HangingService {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl SignupService for HangingService {
        async fn send_verification_code(&self, _email: &str) -> Result<(), ServiceError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            futures::future::pending().await
        }

        async fn complete_registration(&self, _form: &SignupForm) -> Result<(), ServiceError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            futures::future::pending().await
        }
    }

    fn fill_account_step(wizard: &mut SignupWizard) {
        wizard
            .update_field(FieldId::FirstName, FieldValue::Text("Jane".into()))
            .unwrap();
        wizard
            .update_field(FieldId::LastName, FieldValue::Text("Doe".into()))
            .unwrap();
        wizard
            .update_field(FieldId::Email, FieldValue::Text("jane@example.com".into()))
            .unwrap();
        wizard
            .update_field(FieldId::Password, FieldValue::Text("hunter2".into()))
            .unwrap();
        wizard
            .update_field(FieldId::ConfirmPassword, FieldValue::Text("hunter2".into()))
            .unwrap();
        wizard
            .update_field(FieldId::AgreeToTerms, FieldValue::Flag(true))
            .unwrap();
    }

    fn fill_profile_step(wizard: &mut SignupWizard) {
        wizard
            .update_field(FieldId::Experience, FieldValue::Text("beginner".into()))
            .unwrap();
        wizard
            .update_field(FieldId::RiskTolerance, FieldValue::Text("moderate".into()))
            .unwrap();
        wizard
            .update_field(FieldId::AnnualIncome, FieldValue::Text("50k-100k".into()))
            .unwrap();
        wizard.toggle_goal("Retirement Planning");
    }

    #[test]
    fn validate_step_is_false_out_of_range() {
        let wizard = SignupWizard::standard(FakeService::ok());
        assert!(!wizard.validate_step(3));
        assert!(!wizard.validate_step(usize::MAX));
    }

    #[test]
    fn step_with_no_predicates_always_validates() {
        let steps = vec![StepDefinition {
            id: "open",
            title: "Open",
            description: "",
            predicates: vec![],
            action: None,
        }];
        let wizard = SignupWizard::new(steps, FakeService::ok());
        assert!(wizard.validate_step(0));
    }

    #[tokio::test]
    async fn advance_rejects_when_terms_unchecked() {
        // scenario: everything filled except the agreement checkbox
        let mut wizard = SignupWizard::standard(FakeService::ok());
        fill_account_step(&mut wizard);
        wizard
            .update_field(FieldId::AgreeToTerms, FieldValue::Flag(false))
            .unwrap();

        let err = wizard.advance().await.unwrap_err();
        assert!(matches!(err, WizardError::Validation));
        assert_eq!(wizard.current_step(), 0);
        assert_eq!(wizard.status(), Status::Error);
        assert_eq!(
            wizard.error_message(),
            Some("Please fill in all required fields")
        );
    }

    #[tokio::test]
    async fn advance_moves_after_code_is_sent() {
        let service = FakeService::ok();
        let mut wizard = SignupWizard::standard(service.clone());
        fill_account_step(&mut wizard);

        let outcome = wizard.advance().await.unwrap();
        assert_eq!(outcome, Advance::Moved(1));
        assert_eq!(wizard.current_step(), 1);
        assert_eq!(wizard.status(), Status::Idle);
        assert!(wizard.code_sent());
        assert!(wizard.error_message().is_none());
        assert_eq!(service.send_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn goals_toggle_flips_profile_gate() {
        let mut wizard = SignupWizard::standard(FakeService::ok());
        fill_account_step(&mut wizard);
        wizard.advance().await.unwrap();

        fill_profile_step(&mut wizard);
        assert!(wizard.validate_step(1));

        wizard.toggle_goal("Retirement Planning");
        assert!(!wizard.validate_step(1));
    }

    #[tokio::test]
    async fn terminal_failure_preserves_everything() {
        use std::sync::atomic::AtomicBool;

        let completed = Arc::new(AtomicBool::new(false));
        let flag = completed.clone();
        let service = FakeService::failing_register();
        let mut wizard = SignupWizard::standard(service.clone())
            .on_complete(move |_| flag.store(true, Ordering::SeqCst));

        fill_account_step(&mut wizard);
        wizard.advance().await.unwrap();
        fill_profile_step(&mut wizard);
        wizard.advance().await.unwrap();
        wizard
            .update_field(FieldId::VerificationCode, FieldValue::Text("123456".into()))
            .unwrap();

        let before = wizard.form().clone();
        let err = wizard.advance().await.unwrap_err();
        assert!(matches!(err, WizardError::Action(_)));
        assert_eq!(wizard.status(), Status::Error);
        assert_eq!(
            wizard.error_message(),
            Some("Something went wrong. Please try again.")
        );
        assert_eq!(wizard.current_step(), 2);
        assert_eq!(*wizard.form(), before, "a failed action must not touch fields");
        assert!(!wizard.is_complete());
        assert!(!completed.load(Ordering::SeqCst), "completion must not fire");
        assert_eq!(service.register_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn terminal_success_completes_without_incrementing() {
        use std::sync::Mutex;

        let snapshot: Arc<Mutex<Option<SignupForm>>> = Arc::new(Mutex::new(None));
        let sink = snapshot.clone();
        let mut wizard = SignupWizard::standard(FakeService::ok())
            .on_complete(move |form| *sink.lock().unwrap() = Some(form));

        fill_account_step(&mut wizard);
        wizard.advance().await.unwrap();
        fill_profile_step(&mut wizard);
        wizard.advance().await.unwrap();
        wizard
            .update_field(FieldId::VerificationCode, FieldValue::Text("123456".into()))
            .unwrap();

        let outcome = wizard.advance().await.unwrap();
        assert_eq!(outcome, Advance::Completed);
        assert_eq!(wizard.current_step(), 2, "terminal step never increments");
        assert!(wizard.is_complete());

        let form = snapshot.lock().unwrap().take().unwrap();
        assert_eq!(form.email, "jane@example.com");
        assert_eq!(form.verification_code, "123456");
    }

    #[tokio::test]
    async fn send_failure_keeps_fields_and_index() {
        let mut wizard = SignupWizard::standard(FakeService::failing_send());
        fill_account_step(&mut wizard);

        let before = wizard.form().clone();
        let err = wizard.advance().await.unwrap_err();
        assert!(matches!(err, WizardError::Action(_)));
        assert_eq!(wizard.current_step(), 0);
        assert_eq!(*wizard.form(), before);
        assert!(!wizard.code_sent());
    }

    #[tokio::test]
    async fn retreat_floors_at_zero_and_clears_error() {
        let mut wizard = SignupWizard::standard(FakeService::ok());

        wizard.retreat();
        assert_eq!(wizard.current_step(), 0);

        fill_account_step(&mut wizard);
        wizard.advance().await.unwrap();
        let _ = wizard.advance().await; // profile gate fails
        assert_eq!(wizard.status(), Status::Error);

        wizard.retreat();
        assert_eq!(wizard.current_step(), 0);
        assert!(wizard.error_message().is_none());
        assert_eq!(wizard.status(), Status::Idle);
    }

    #[tokio::test]
    async fn update_field_leaves_error_state_alone() {
        let mut wizard = SignupWizard::standard(FakeService::ok());
        let _ = wizard.advance().await; // empty form, validation fails
        assert_eq!(wizard.status(), Status::Error);

        wizard
            .update_field(FieldId::FirstName, FieldValue::Text("Jane".into()))
            .unwrap();
        assert_eq!(wizard.status(), Status::Error);
        assert!(wizard.error_message().is_some());
    }

    #[tokio::test]
    async fn advance_while_submitting_is_rejected() {
        let service = Arc::new(HangingService {
            calls: AtomicUsize::new(0),
        });
        let mut wizard = SignupWizard::standard(service.clone());
        fill_account_step(&mut wizard);

        {
            let fut = wizard.advance();
            futures::pin_mut!(fut);
            assert!(futures::poll!(fut).is_pending());
        }
        assert_eq!(wizard.status(), Status::Submitting);

        let err = wizard.advance().await.unwrap_err();
        assert!(matches!(err, WizardError::Busy));
        let err = wizard.resend(0).await.unwrap_err();
        assert!(matches!(err, WizardError::Busy));
        assert_eq!(
            service.calls.load(Ordering::SeqCst),
            1,
            "no second action may start"
        );
    }

    #[tokio::test]
    async fn timeout_counts_as_action_failure() {
        let service = Arc::new(HangingService {
            calls: AtomicUsize::new(0),
        });
        let mut wizard = SignupWizard::standard(service)
            .with_timeout(Duration::from_millis(10));
        fill_account_step(&mut wizard);

        let before = wizard.form().clone();
        let err = wizard.advance().await.unwrap_err();
        assert!(matches!(
            err,
            WizardError::Action(ServiceError::Timeout)
        ));
        assert_eq!(wizard.current_step(), 0);
        assert_eq!(*wizard.form(), before);
    }

    #[tokio::test]
    async fn resend_sets_flag_without_moving() {
        let service = FakeService::ok();
        let mut wizard = SignupWizard::standard(service.clone());
        fill_account_step(&mut wizard);
        wizard.advance().await.unwrap();

        wizard.resend(0).await.unwrap();
        assert!(wizard.code_resent());
        assert_eq!(wizard.current_step(), 1);
        assert_eq!(wizard.status(), Status::Idle);
        assert_eq!(service.send_calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn resend_on_actionless_step_is_rejected() {
        let mut wizard = SignupWizard::standard(FakeService::ok());
        let err = wizard.resend(1).await.unwrap_err();
        assert!(matches!(err, WizardError::NoAction(1)));
        let err = wizard.resend(9).await.unwrap_err();
        assert!(matches!(err, WizardError::NoAction(9)));
    }

    #[tokio::test]
    async fn resend_failure_surfaces_as_error_state() {
        let mut wizard = SignupWizard::standard(FakeService::failing_send());
        let err = wizard.resend(0).await.unwrap_err();
        assert!(matches!(err, WizardError::Action(_)));
        assert_eq!(wizard.status(), Status::Error);
        assert!(wizard.error_message().is_some());
        assert!(!wizard.code_resent());
    }
}
