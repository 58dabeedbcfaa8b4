use crate::domain::entities::{Credentials, InstallMode};
use crate::domain::services::AccountValidator;
use std::io::{self, BufRead, Write};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PromptError {
    #[error("input ended before the {0} was entered")]
    Closed(&'static str),
    #[error("username '{0}' is not in DOMAIN\\USERNAME format")]
    InvalidUsername(String),
    #[error("terminal I/O failed")]
    Io(#[from] io::Error),
}

pub trait PasswordSource {
    fn read_password(&mut self, prompt: &str) -> io::Result<String>;
}

/// Reads from the controlling terminal with echo turned off.
pub struct TerminalPassword;

impl PasswordSource for TerminalPassword {
    fn read_password(&mut self, prompt: &str) -> io::Result<String> {
        rpassword::prompt_password(prompt)
    }
}

pub struct InstallPrompt<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> InstallPrompt<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Asks for whatever was not given on the command line. The password is always asked for.
    pub fn collect(
        &mut self,
        mode: Option<InstallMode>,
        username: Option<String>,
        passwords: &mut dyn PasswordSource,
    ) -> Result<(InstallMode, Credentials), PromptError> {
        let mode = match mode {
            Some(mode) => mode,
            None => self.choose_mode()?,
        };
        let username = match username {
            Some(name) if AccountValidator::validate_username(&name) => name,
            Some(name) => return Err(PromptError::InvalidUsername(name)),
            None => self.read_username()?,
        };
        let password = passwords.read_password("Enter Windows service account password: ")?;

        Ok((mode, Credentials::new(username, password)))
    }

    pub fn choose_mode(&mut self) -> Result<InstallMode, PromptError> {
        writeln!(self.output, "Choose an option:")?;
        writeln!(
            self.output,
            " [a] Each Lucidworks Fusion service is installed as its own Windows service."
        )?;
        writeln!(self.output, " or ")?;
        writeln!(
            self.output,
            " [b] All Lucidworks Fusion services are installed as a single Windows Service."
        )?;
        self.output.flush()?;

        let choice = self.read_line("install option")?;
        Ok(InstallMode::from_choice(&choice))
    }

    pub fn read_username(&mut self) -> Result<String, PromptError> {
        loop {
            writeln!(
                self.output,
                "Enter Windows service account username in DOMAIN\\USERNAME format:"
            )?;
            self.output.flush()?;

            let username = self.read_line("username")?;
            if AccountValidator::validate_username(&username) {
                return Ok(username);
            }
        }
    }

    fn read_line(&mut self, what: &'static str) -> Result<String, PromptError> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(PromptError::Closed(what));
        }
        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    }
}
