use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tracing::warn;

use crate::config::AppConfig;
use crate::ui::Theme;
use crate::ui::widgets::StatusBarState;
use crate::vim::{Command, InputBuffer, ModeAction, VimMode, parse_command};
use crate::wizard::{Advance, FieldId, FieldValue, SignupWizard, Status, WizardError};

/// Which screen the app is showing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    /// Title card shown before signup starts
    Welcome,
    /// The wizard itself
    Form,
    /// Registration finished
    Done,
}

/// One focusable row in the current step's content panel
#[derive(Debug, Clone, PartialEq)]
pub enum Control {
    /// Free-text entry bound to a form field
    Input(FieldId),
    /// Boolean checkbox bound to a form field
    Toggle(FieldId),
    /// Single-choice option; selecting stores `value` into `field`
    Choice {
        field: FieldId,
        value: String,
        label: String,
    },
    /// Multi-select investment goal
    Goal { value: String },
}

/// Actions the event loop must run on the app's behalf
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppAction {
    /// Run the wizard's gated step transition (may hit the network)
    Advance,
    /// Resend the verification email
    Resend,
}

/// Message displayed to the user
pub struct Message {
    pub text: String,
    pub is_error: bool,
}

/// Main application state
pub struct App {
    pub config: AppConfig,
    pub theme: Theme,
    pub wizard: SignupWizard,
    pub screen: Screen,

    // Vim mode state
    pub vim_mode: VimMode,
    pub command_buffer: InputBuffer,

    // Content focus
    pub controls: Vec<Control>,
    pub focused: usize,

    // Text entry buffers, one per text field on screen
    pub first_name: InputBuffer,
    pub last_name: InputBuffer,
    pub email: InputBuffer,
    pub password: InputBuffer,
    pub confirm_password: InputBuffer,
    pub verification_code: InputBuffer,

    // UI state
    pub message: Option<Message>,
    pub show_help: bool,
    pub confirm_quit: bool,
    pub should_exit: bool,
    pub status_bar: StatusBarState,

    spinner_frame: usize,
}

impl App {
    pub fn new(config: AppConfig, wizard: SignupWizard) -> Self {
        let code_length = config.verification.code_length;
        let mut app = Self {
            config,
            theme: Theme::default(),
            wizard,
            screen: Screen::Welcome,
            vim_mode: VimMode::Normal,
            command_buffer: InputBuffer::new(),
            controls: Vec::new(),
            focused: 0,
            first_name: InputBuffer::new(),
            last_name: InputBuffer::new(),
            email: InputBuffer::new(),
            password: InputBuffer::masked(),
            confirm_password: InputBuffer::masked(),
            verification_code: InputBuffer::with_max_len(code_length),
            message: None,
            show_help: false,
            confirm_quit: false,
            should_exit: false,
            status_bar: StatusBarState::welcome(),
            spinner_frame: 0,
        };
        app.reload_controls();
        app
    }

    pub fn is_submitting(&self) -> bool {
        self.wizard.status() == Status::Submitting
    }

    /// Rebuild the focusable rows for the wizard's current step
    fn reload_controls(&mut self) {
        let step_id = self.wizard.current_definition().id;
        self.controls = match step_id {
            "account" => vec![
                Control::Input(FieldId::FirstName),
                Control::Input(FieldId::LastName),
                Control::Input(FieldId::Email),
                Control::Input(FieldId::Password),
                Control::Input(FieldId::ConfirmPassword),
                Control::Toggle(FieldId::AgreeToTerms),
            ],
            "profile" => {
                let mut controls = Vec::new();
                for option in &self.config.profile.experience {
                    controls.push(Control::Choice {
                        field: FieldId::Experience,
                        value: option.value.clone(),
                        label: option.label.clone(),
                    });
                }
                for option in &self.config.profile.risk_tolerance {
                    controls.push(Control::Choice {
                        field: FieldId::RiskTolerance,
                        value: option.value.clone(),
                        label: option.label.clone(),
                    });
                }
                for goal in &self.config.profile.goals {
                    controls.push(Control::Goal {
                        value: goal.clone(),
                    });
                }
                for option in &self.config.profile.income_ranges {
                    controls.push(Control::Choice {
                        field: FieldId::AnnualIncome,
                        value: option.value.clone(),
                        label: option.label.clone(),
                    });
                }
                controls
            }
            "verification" => vec![Control::Input(FieldId::VerificationCode)],
            _ => Vec::new(),
        };
        self.focused = 0;
    }

    pub fn focused_control(&self) -> Option<&Control> {
        self.controls.get(self.focused)
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Option<AppAction> {
        // Clear message on any key (unless an action is running)
        if self.message.is_some() && !self.is_submitting() {
            self.message = None;
        }

        if self.confirm_quit {
            self.handle_confirm_key(key);
            self.update_status_bar();
            return None;
        }

        if self.show_help {
            if key.code == KeyCode::Esc || key.code == KeyCode::Char('q') {
                self.show_help = false;
            }
            self.update_status_bar();
            return None;
        }

        // Don't handle input while an action is in flight
        if self.is_submitting() {
            return None;
        }

        let result = match self.screen {
            Screen::Welcome => self.handle_welcome_key(key),
            Screen::Done => {
                self.handle_done_key(key);
                None
            }
            Screen::Form => match self.vim_mode {
                VimMode::Normal => self.handle_normal_mode(key),
                VimMode::Insert => self.handle_insert_mode(key),
                VimMode::Command => self.handle_command_mode(key),
            },
        };

        self.update_status_bar();
        result
    }

    fn handle_welcome_key(&mut self, key: KeyEvent) -> Option<AppAction> {
        match key.code {
            KeyCode::Enter => {
                self.start_signup();
            }
            KeyCode::Char('?') | KeyCode::F(1) => {
                self.show_help = true;
            }
            KeyCode::Char('q') | KeyCode::Esc => {
                self.confirm_quit = true;
            }
            _ => {}
        }
        None
    }

    fn handle_done_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Enter | KeyCode::Char('q') | KeyCode::Esc => {
                self.should_exit = true;
            }
            _ => {}
        }
    }

    fn handle_normal_mode(&mut self, key: KeyEvent) -> Option<AppAction> {
        match key.code {
            KeyCode::Char(':') => {
                self.vim_mode = self.vim_mode.transition(ModeAction::EnterCommand);
                self.command_buffer.clear();
            }

            // Row navigation
            KeyCode::Char('j') | KeyCode::Down | KeyCode::Tab => {
                self.focus_next();
            }
            KeyCode::Char('k') | KeyCode::Up | KeyCode::BackTab => {
                self.focus_prev();
            }

            // Enter insert mode on text rows
            KeyCode::Char('i') | KeyCode::Char('a') => {
                if matches!(self.focused_control(), Some(Control::Input(_))) {
                    self.vim_mode = self.vim_mode.transition(ModeAction::EnterInsert);
                }
            }

            // Toggle / select the focused row
            KeyCode::Char(' ') => {
                self.activate_focused();
            }

            KeyCode::Enter => match self.focused_control() {
                Some(Control::Input(_)) => {
                    self.vim_mode = self.vim_mode.transition(ModeAction::EnterInsert);
                }
                Some(_) => {
                    self.activate_focused();
                }
                None => {}
            },

            // Step navigation
            KeyCode::Char('n') | KeyCode::Right => {
                return Some(AppAction::Advance);
            }
            KeyCode::Char('b') | KeyCode::Left => {
                self.retreat();
            }
            KeyCode::Char('r') => {
                if self.wizard.current_definition().id == "verification" {
                    return Some(AppAction::Resend);
                }
            }

            KeyCode::Char('?') | KeyCode::F(1) => {
                self.show_help = true;
            }
            KeyCode::Char('q') => {
                self.confirm_quit = true;
            }

            _ => {}
        }
        None
    }

    fn handle_insert_mode(&mut self, key: KeyEvent) -> Option<AppAction> {
        match key.code {
            KeyCode::Esc => {
                self.vim_mode = self.vim_mode.transition(ModeAction::Escape);
            }
            KeyCode::Enter => {
                // Last row submits the step, otherwise move on
                if self.focused + 1 == self.controls.len() {
                    self.vim_mode = VimMode::Normal;
                    return Some(AppAction::Advance);
                }
                self.focus_next();
                if !matches!(self.focused_control(), Some(Control::Input(_))) {
                    self.vim_mode = VimMode::Normal;
                }
            }
            KeyCode::Tab => {
                self.focus_next();
                if !matches!(self.focused_control(), Some(Control::Input(_))) {
                    self.vim_mode = VimMode::Normal;
                }
            }
            KeyCode::BackTab => {
                self.focus_prev();
                if !matches!(self.focused_control(), Some(Control::Input(_))) {
                    self.vim_mode = VimMode::Normal;
                }
            }
            KeyCode::Backspace => {
                self.edit_buffer(|buf| {
                    buf.delete_back();
                });
            }
            KeyCode::Delete => {
                self.edit_buffer(|buf| {
                    buf.delete_forward();
                });
            }
            KeyCode::Left => self.edit_buffer(InputBuffer::move_left),
            KeyCode::Right => self.edit_buffer(InputBuffer::move_right),
            KeyCode::Home => self.edit_buffer(InputBuffer::move_start),
            KeyCode::End => self.edit_buffer(InputBuffer::move_end),
            KeyCode::Char(c) => {
                if key.modifiers.contains(KeyModifiers::CONTROL) {
                    match c {
                        'u' => self.edit_buffer(InputBuffer::clear),
                        'a' => self.edit_buffer(InputBuffer::move_start),
                        'e' => self.edit_buffer(InputBuffer::move_end),
                        _ => {}
                    }
                } else {
                    self.edit_buffer(|buf| buf.insert(c));
                }
            }
            _ => {}
        }
        None
    }

    fn handle_command_mode(&mut self, key: KeyEvent) -> Option<AppAction> {
        match key.code {
            KeyCode::Esc => {
                self.vim_mode = self.vim_mode.transition(ModeAction::Escape);
                self.command_buffer.clear();
            }
            KeyCode::Enter => {
                let cmd = self.command_buffer.content();
                self.vim_mode = self.vim_mode.transition(ModeAction::Execute);
                self.command_buffer.clear();
                return self.execute_command(&cmd);
            }
            KeyCode::Backspace => {
                if self.command_buffer.is_empty() {
                    self.vim_mode = self.vim_mode.transition(ModeAction::Escape);
                } else {
                    self.command_buffer.delete_back();
                }
            }
            KeyCode::Char(c) => {
                self.command_buffer.insert(c);
            }
            _ => {}
        }
        None
    }

    fn handle_confirm_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => {
                self.should_exit = true;
            }
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                self.confirm_quit = false;
            }
            _ => {}
        }
    }

    fn execute_command(&mut self, input: &str) -> Option<AppAction> {
        match parse_command(input) {
            Ok(Command::Start) => {
                if self.screen == Screen::Welcome {
                    self.start_signup();
                }
            }
            Ok(Command::Next) => return Some(AppAction::Advance),
            Ok(Command::Back) => self.retreat(),
            Ok(Command::Resend) => return Some(AppAction::Resend),
            Ok(Command::Help) => self.show_help = true,
            Ok(Command::Quit) => self.confirm_quit = true,
            Err(e) => self.set_error(e.to_string()),
        }
        None
    }

    fn start_signup(&mut self) {
        self.screen = Screen::Form;
        self.reload_controls();
        // Start typing straight away, first row is a text field
        self.vim_mode = VimMode::Insert;
    }

    fn focus_next(&mut self) {
        if self.focused + 1 < self.controls.len() {
            self.focused += 1;
        }
    }

    fn focus_prev(&mut self) {
        self.focused = self.focused.saturating_sub(1);
    }

    /// Toggle or select the focused row, mirroring it into the wizard
    fn activate_focused(&mut self) {
        let Some(control) = self.focused_control().cloned() else {
            return;
        };
        match control {
            Control::Input(_) => {}
            Control::Toggle(field) => {
                let current = self.wizard.form().flag(field).unwrap_or(false);
                self.set_field(field, FieldValue::Flag(!current));
            }
            Control::Choice { field, value, .. } => {
                self.set_field(field, FieldValue::Text(value));
            }
            Control::Goal { value } => {
                self.wizard.toggle_goal(&value);
            }
        }
    }

    /// Apply `edit` to the focused text buffer and mirror it into the wizard
    fn edit_buffer(&mut self, edit: impl FnOnce(&mut InputBuffer)) {
        let Some(Control::Input(field)) = self.focused_control().cloned() else {
            return;
        };
        if let Some(buffer) = self.buffer_mut(field) {
            edit(buffer);
            let content = buffer.content();
            self.set_field(field, FieldValue::Text(content));
        }
    }

    fn set_field(&mut self, field: FieldId, value: FieldValue) {
        if let Err(e) = self.wizard.update_field(field, value) {
            warn!("rejected field write: {e}");
        }
    }

    pub fn buffer(&self, field: FieldId) -> Option<&InputBuffer> {
        match field {
            FieldId::FirstName => Some(&self.first_name),
            FieldId::LastName => Some(&self.last_name),
            FieldId::Email => Some(&self.email),
            FieldId::Password => Some(&self.password),
            FieldId::ConfirmPassword => Some(&self.confirm_password),
            FieldId::VerificationCode => Some(&self.verification_code),
            _ => None,
        }
    }

    fn buffer_mut(&mut self, field: FieldId) -> Option<&mut InputBuffer> {
        match field {
            FieldId::FirstName => Some(&mut self.first_name),
            FieldId::LastName => Some(&mut self.last_name),
            FieldId::Email => Some(&mut self.email),
            FieldId::Password => Some(&mut self.password),
            FieldId::ConfirmPassword => Some(&mut self.confirm_password),
            FieldId::VerificationCode => Some(&mut self.verification_code),
            _ => None,
        }
    }

    /// Run the wizard's gated step transition
    pub async fn advance(&mut self) {
        match self.wizard.advance().await {
            Ok(Advance::Moved(_)) => {
                self.reload_controls();
                self.vim_mode = VimMode::Normal;
                if self.wizard.current_definition().id == "verification" && self.wizard.code_sent()
                {
                    self.set_info(format!(
                        "We've sent a verification code to {}",
                        self.wizard.form().email
                    ));
                }
            }
            Ok(Advance::Completed) => {
                self.screen = Screen::Done;
                self.vim_mode = VimMode::Normal;
            }
            Err(WizardError::Busy) => {}
            Err(_) => {
                if let Some(text) = self.wizard.error_message() {
                    self.set_error(text.to_string());
                }
            }
        }
        self.update_status_bar();
    }

    /// Resend the verification email without moving
    pub async fn resend(&mut self) {
        // The send-code action lives on the first step
        let step = self
            .wizard
            .steps()
            .iter()
            .position(|s| s.action == Some(crate::wizard::StepAction::SendVerificationCode));
        let Some(step) = step else {
            return;
        };
        match self.wizard.resend(step).await {
            Ok(()) => {
                self.set_info(format!(
                    "Verification code resent to {}",
                    self.wizard.form().email
                ));
            }
            Err(WizardError::Busy) => {}
            Err(_) => {
                self.set_error("Failed to resend verification email".to_string());
            }
        }
        self.update_status_bar();
    }

    fn retreat(&mut self) {
        if self.wizard.current_step() > 0 {
            self.wizard.retreat();
            self.reload_controls();
        }
        self.message = None;
    }

    pub fn set_error(&mut self, text: String) {
        self.message = Some(Message {
            text,
            is_error: true,
        });
    }

    pub fn set_info(&mut self, text: String) {
        self.message = Some(Message {
            text,
            is_error: false,
        });
    }

    pub fn tick(&mut self) {
        self.spinner_frame = (self.spinner_frame + 1) % 4;
        self.update_status_bar();
    }

    pub fn spinner_char(&self) -> char {
        const SPINNER: [char; 4] = ['|', '/', '-', '\\'];
        SPINNER[self.spinner_frame]
    }

    /// Update status bar based on current application state
    pub fn update_status_bar(&mut self) {
        if self.is_submitting() {
            self.status_bar = StatusBarState::submitting();
            return;
        }
        if self.vim_mode == VimMode::Command {
            self.status_bar = StatusBarState::command_mode();
            return;
        }
        self.status_bar = match self.screen {
            Screen::Welcome => StatusBarState::welcome(),
            Screen::Done => StatusBarState::done(),
            Screen::Form => {
                let on_verification = self.wizard.current_definition().id == "verification";
                if self.vim_mode == VimMode::Insert {
                    StatusBarState::form_insert()
                } else {
                    StatusBarState::form_normal(on_verification)
                }
            }
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::DemoService;
    use std::sync::Arc;
    use std::time::Duration;

    fn test_app() -> App {
        let service = Arc::new(DemoService::with_delay(Duration::from_millis(1)));
        let wizard = SignupWizard::standard(service);
        App::new(AppConfig::default(), wizard)
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn welcome_enter_starts_the_form() {
        let mut app = test_app();
        assert_eq!(app.screen, Screen::Welcome);
        app.handle_key(key(KeyCode::Enter));
        assert_eq!(app.screen, Screen::Form);
        assert_eq!(app.vim_mode, VimMode::Insert);
        assert_eq!(app.controls.len(), 6);
    }

    #[test]
    fn typing_in_insert_mode_updates_the_wizard() {
        let mut app = test_app();
        app.handle_key(key(KeyCode::Enter)); // start, focus on first name
        for c in "Jane".chars() {
            app.handle_key(key(KeyCode::Char(c)));
        }
        assert_eq!(app.wizard.form().first_name, "Jane");
        assert_eq!(app.first_name.content(), "Jane");
    }

    #[test]
    fn space_toggles_the_terms_checkbox() {
        let mut app = test_app();
        app.handle_key(key(KeyCode::Enter));
        app.handle_key(key(KeyCode::Esc)); // back to normal mode
        for _ in 0..5 {
            app.handle_key(key(KeyCode::Char('j')));
        }
        assert!(matches!(
            app.focused_control(),
            Some(Control::Toggle(FieldId::AgreeToTerms))
        ));
        app.handle_key(key(KeyCode::Char(' ')));
        assert!(app.wizard.form().agree_to_terms);
        app.handle_key(key(KeyCode::Char(' ')));
        assert!(!app.wizard.form().agree_to_terms);
    }

    #[test]
    fn enter_on_last_row_requests_advance() {
        let mut app = test_app();
        app.handle_key(key(KeyCode::Enter));
        app.handle_key(key(KeyCode::Esc));
        for _ in 0..5 {
            app.handle_key(key(KeyCode::Char('j')));
        }
        // last row is the checkbox; 'n' asks for the step transition
        let action = app.handle_key(key(KeyCode::Char('n')));
        assert_eq!(action, Some(AppAction::Advance));
    }

    #[test]
    fn focus_clamps_at_both_ends() {
        let mut app = test_app();
        app.handle_key(key(KeyCode::Enter));
        app.handle_key(key(KeyCode::Esc));
        app.handle_key(key(KeyCode::Char('k')));
        assert_eq!(app.focused, 0);
        for _ in 0..20 {
            app.handle_key(key(KeyCode::Char('j')));
        }
        assert_eq!(app.focused, app.controls.len() - 1);
    }

    #[test]
    fn command_next_requests_advance() {
        let mut app = test_app();
        app.handle_key(key(KeyCode::Enter));
        app.handle_key(key(KeyCode::Esc));
        app.handle_key(key(KeyCode::Char(':')));
        assert_eq!(app.vim_mode, VimMode::Command);
        for c in "next".chars() {
            app.handle_key(key(KeyCode::Char(c)));
        }
        let action = app.handle_key(key(KeyCode::Enter));
        assert_eq!(action, Some(AppAction::Advance));
        assert_eq!(app.vim_mode, VimMode::Normal);
    }

    #[tokio::test]
    async fn failed_advance_surfaces_error_message() {
        let mut app = test_app();
        app.handle_key(key(KeyCode::Enter));
        app.advance().await; // nothing filled in
        assert_eq!(app.wizard.current_step(), 0);
        let message = app.message.as_ref().expect("message set");
        assert!(message.is_error);
        assert_eq!(message.text, "Please fill in all required fields");
    }

    #[tokio::test]
    async fn profile_step_builds_choice_rows() {
        let mut app = test_app();
        app.handle_key(key(KeyCode::Enter));
        app.wizard
            .update_field(FieldId::FirstName, FieldValue::Text("J".into()))
            .unwrap();
        app.wizard
            .update_field(FieldId::LastName, FieldValue::Text("D".into()))
            .unwrap();
        app.wizard
            .update_field(FieldId::Email, FieldValue::Text("j@d.com".into()))
            .unwrap();
        app.wizard
            .update_field(FieldId::Password, FieldValue::Text("pw".into()))
            .unwrap();
        app.wizard
            .update_field(FieldId::ConfirmPassword, FieldValue::Text("pw".into()))
            .unwrap();
        app.wizard
            .update_field(FieldId::AgreeToTerms, FieldValue::Flag(true))
            .unwrap();

        app.advance().await;
        assert_eq!(app.wizard.current_step(), 1);
        // 3 experience + 3 risk + 5 goals + 5 income ranges
        assert_eq!(app.controls.len(), 16);
        assert_eq!(app.focused, 0);
    }
}
