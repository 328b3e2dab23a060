use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Leave the welcome screen and begin signup
    Start,
    /// Attempt to advance to the next step
    Next,
    /// Go back one step
    Back,
    /// Resend the verification email
    Resend,
    Help,
    Quit,
}

#[derive(Error, Debug)]
pub enum CommandError {
    #[error("Unknown command: {0}")]
    Unknown(String),
}

pub fn parse_command(input: &str) -> Result<Command, CommandError> {
    match input.trim() {
        "start" | "begin" => Ok(Command::Start),
        "next" | "n" | "submit" => Ok(Command::Next),
        "back" | "b" | "prev" => Ok(Command::Back),
        "resend" | "rs" => Ok(Command::Resend),
        "help" | "h" | "?" => Ok(Command::Help),
        "q" | "quit" | "exit" => Ok(Command::Quit),
        "" => Err(CommandError::Unknown("empty command".to_string())),
        other => Err(CommandError::Unknown(other.to_string())),
    }
}
