use crate::service::ServiceError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum WizardError {
    /// The active step's gate did not pass. Surfaced verbatim to the user.
    #[error("Please fill in all required fields")]
    Validation,

    /// A step action rejected. The generic message is the user-facing text;
    /// the underlying cause stays available through `source()`.
    #[error("Something went wrong. Please try again.")]
    Action(#[source] ServiceError),

    /// An action is already in flight; the call was rejected, nothing changed.
    #[error("another request is still in progress")]
    Busy,

    /// `resend` was pointed at a step that has no action.
    #[error("step {0} has no associated action")]
    NoAction(usize),
}
