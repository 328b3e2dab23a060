use serde::Serialize;
use thiserror::Error;
use zeroize::Zeroize;

/// Every field the signup flow collects. Fixed and known in advance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldId {
    FirstName,
    LastName,
    Email,
    Password,
    ConfirmPassword,
    AgreeToTerms,
    Experience,
    RiskTolerance,
    InvestmentGoals,
    AnnualIncome,
    VerificationCode,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Flag,
    List,
}

impl FieldId {
    pub fn kind(self) -> FieldKind {
        match self {
            FieldId::AgreeToTerms => FieldKind::Flag,
            FieldId::InvestmentGoals => FieldKind::List,
            _ => FieldKind::Text,
        }
    }
}

/// A value being written into the form through the generic entry point.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(String),
    Flag(bool),
    List(Vec<String>),
}

impl FieldValue {
    fn kind(&self) -> FieldKind {
        match self {
            FieldValue::Text(_) => FieldKind::Text,
            FieldValue::Flag(_) => FieldKind::Flag,
            FieldValue::List(_) => FieldKind::List,
        }
    }
}

#[derive(Error, Debug)]
#[error("field {field:?} holds {expected:?}, not {given:?}")]
pub struct FieldTypeError {
    pub field: FieldId,
    pub expected: FieldKind,
    pub given: FieldKind,
}

/// The collected signup data. Serialized camelCase for the registration API.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupForm {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    #[serde(skip_serializing)]
    pub confirm_password: String,
    pub agree_to_terms: bool,
    pub experience: String,
    pub risk_tolerance: String,
    pub investment_goals: Vec<String>,
    pub annual_income: String,
    pub verification_code: String,
}

impl SignupForm {
    pub fn text(&self, field: FieldId) -> Option<&str> {
        match field {
            FieldId::FirstName => Some(&self.first_name),
            FieldId::LastName => Some(&self.last_name),
            FieldId::Email => Some(&self.email),
            FieldId::Password => Some(&self.password),
            FieldId::ConfirmPassword => Some(&self.confirm_password),
            FieldId::Experience => Some(&self.experience),
            FieldId::RiskTolerance => Some(&self.risk_tolerance),
            FieldId::AnnualIncome => Some(&self.annual_income),
            FieldId::VerificationCode => Some(&self.verification_code),
            FieldId::AgreeToTerms | FieldId::InvestmentGoals => None,
        }
    }

    pub fn flag(&self, field: FieldId) -> Option<bool> {
        match field {
            FieldId::AgreeToTerms => Some(self.agree_to_terms),
            _ => None,
        }
    }

    pub fn list(&self, field: FieldId) -> Option<&[String]> {
        match field {
            FieldId::InvestmentGoals => Some(&self.investment_goals),
            _ => None,
        }
    }

    /// Generic setter dispatching to the typed member. Rejects kind mismatches.
    pub fn set(&mut self, field: FieldId, value: FieldValue) -> Result<(), FieldTypeError> {
        let (expected, given) = (field.kind(), value.kind());
        if expected != given {
            return Err(FieldTypeError {
                field,
                expected,
                given,
            });
        }
        match (field, value) {
            (FieldId::FirstName, FieldValue::Text(v)) => self.first_name = v,
            (FieldId::LastName, FieldValue::Text(v)) => self.last_name = v,
            (FieldId::Email, FieldValue::Text(v)) => self.email = v,
            (FieldId::Password, FieldValue::Text(v)) => self.password = v,
            (FieldId::ConfirmPassword, FieldValue::Text(v)) => self.confirm_password = v,
            (FieldId::AgreeToTerms, FieldValue::Flag(v)) => self.agree_to_terms = v,
            (FieldId::Experience, FieldValue::Text(v)) => self.experience = v,
            (FieldId::RiskTolerance, FieldValue::Text(v)) => self.risk_tolerance = v,
            (FieldId::InvestmentGoals, FieldValue::List(v)) => self.investment_goals = v,
            (FieldId::AnnualIncome, FieldValue::Text(v)) => self.annual_income = v,
            (FieldId::VerificationCode, FieldValue::Text(v)) => self.verification_code = v,
            _ => unreachable!("kind checked above"),
        }
        Ok(())
    }

    /// Set-membership toggle on the goals list: adds the goal if absent,
    /// removes it if present. Never duplicates, never reorders other entries.
    pub fn toggle_goal(&mut self, goal: &str) {
        if let Some(pos) = self.investment_goals.iter().position(|g| g == goal) {
            self.investment_goals.remove(pos);
        } else {
            self.investment_goals.push(goal.to_string());
        }
    }

    pub fn has_goal(&self, goal: &str) -> bool {
        self.investment_goals.iter().any(|g| g == goal)
    }
}

impl Drop for SignupForm {
    fn drop(&mut self) {
        self.password.zeroize();
        self.confirm_password.zeroize();
    }
}
