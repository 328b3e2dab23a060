use super::form::{FieldId, SignupForm};

/// Gate that must hold before a step transition is permitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Predicate {
    /// Text field is non-empty
    NonEmpty(FieldId),
    /// Two text fields hold the same raw value (no normalization)
    Equals(FieldId, FieldId),
    /// Boolean field is checked
    IsTrue(FieldId),
    /// List field has at least one entry
    NonEmptyList(FieldId),
}

impl Predicate {
    pub fn holds(&self, form: &SignupForm) -> bool {
        match self {
            Predicate::NonEmpty(field) => form.text(*field).is_some_and(|v| !v.is_empty()),
            Predicate::Equals(a, b) => match (form.text(*a), form.text(*b)) {
                (Some(x), Some(y)) => x == y,
                _ => false,
            },
            Predicate::IsTrue(field) => form.flag(*field) == Some(true),
            Predicate::NonEmptyList(field) => form.list(*field).is_some_and(|v| !v.is_empty()),
        }
    }
}

/// Network effect tied to a step boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepAction {
    SendVerificationCode,
    CompleteRegistration,
}

/// One stage of the wizard. Static data, built once at construction.
#[derive(Debug, Clone)]
pub struct StepDefinition {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub predicates: Vec<Predicate>,
    pub action: Option<StepAction>,
}

/// The standard three-step signup flow.
pub fn signup_steps() -> Vec<StepDefinition> {
    vec![
        StepDefinition {
            id: "account",
            title: "Create Account",
            description: "Enter your basic information",
            predicates: vec![
                Predicate::NonEmpty(FieldId::FirstName),
                Predicate::NonEmpty(FieldId::LastName),
                Predicate::NonEmpty(FieldId::Email),
                Predicate::NonEmpty(FieldId::Password),
                Predicate::NonEmpty(FieldId::ConfirmPassword),
                Predicate::Equals(FieldId::Password, FieldId::ConfirmPassword),
                Predicate::IsTrue(FieldId::AgreeToTerms),
            ],
            action: Some(StepAction::SendVerificationCode),
        },
        StepDefinition {
            id: "profile",
            title: "Investment Profile",
            description: "Tell us about your investment experience",
            predicates: vec![
                Predicate::NonEmpty(FieldId::Experience),
                Predicate::NonEmpty(FieldId::RiskTolerance),
                Predicate::NonEmptyList(FieldId::InvestmentGoals),
                Predicate::NonEmpty(FieldId::AnnualIncome),
            ],
            action: None,
        },
        StepDefinition {
            id: "verification",
            title: "Email Verification",
            description: "Verify your email address",
            predicates: vec![Predicate::NonEmpty(FieldId::VerificationCode)],
            action: Some(StepAction::CompleteRegistration),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_empty_holds_on_filled_text() {
        let mut form = SignupForm::default();
        assert!(!Predicate::NonEmpty(FieldId::Email).holds(&form));
        form.email = "a@b.c".into();
        assert!(Predicate::NonEmpty(FieldId::Email).holds(&form));
    }

    #[test]
    fn equals_compares_raw_values() {
        let mut form = SignupForm::default();
        form.password = "Hunter2".into();
        form.confirm_password = "hunter2".into();
        let pred = Predicate::Equals(FieldId::Password, FieldId::ConfirmPassword);
        assert!(!pred.holds(&form), "comparison is case sensitive");
        form.confirm_password = "Hunter2".into();
        assert!(pred.holds(&form));
    }

    #[test]
    fn equals_on_non_text_field_never_holds() {
        let form = SignupForm::default();
        assert!(!Predicate::Equals(FieldId::Password, FieldId::AgreeToTerms).holds(&form));
    }

    #[test]
    fn is_true_requires_checked_flag() {
        let mut form = SignupForm::default();
        assert!(!Predicate::IsTrue(FieldId::AgreeToTerms).holds(&form));
        form.agree_to_terms = true;
        assert!(Predicate::IsTrue(FieldId::AgreeToTerms).holds(&form));
    }

    #[test]
    fn non_empty_list_requires_one_entry() {
        let mut form = SignupForm::default();
        assert!(!Predicate::NonEmptyList(FieldId::InvestmentGoals).holds(&form));
        form.toggle_goal("Wealth Building");
        assert!(Predicate::NonEmptyList(FieldId::InvestmentGoals).holds(&form));
    }

    #[test]
    fn standard_flow_has_three_gated_steps() {
        let steps = signup_steps();
        assert_eq!(steps.len(), 3);
        assert_eq!(steps[0].action, Some(StepAction::SendVerificationCode));
        assert_eq!(steps[1].action, None);
        assert_eq!(steps[2].action, Some(StepAction::CompleteRegistration));
    }
}
