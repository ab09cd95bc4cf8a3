//! Prompting and parsing of operator input.
//!
//! Parsers return `ValidationError`; the `Prompter` loops on those until
//! the operator gets it right or input ends.

use std::io::{BufRead, Write};

use chrono::{NaiveDate, NaiveDateTime};
use thiserror::Error;

use super::ShellError;

pub const DATE_INPUT_FORMAT: &str = "%Y-%m-%d";
pub const DATE_TIME_INPUT_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Malformed operator input. Never reaches the repositories.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Please enter a valid number.")]
    NotANumber,

    #[error("Invalid date format. Please use YYYY-MM-DD format.")]
    BadDate,

    #[error("Invalid date/time format. Please use YYYY-MM-DD HH:MM format (24-hour).")]
    BadDateTime,

    #[error("This field is required.")]
    Required,
}

pub fn parse_number(text: &str) -> Result<i64, ValidationError> {
    text.trim().parse().map_err(|_| ValidationError::NotANumber)
}

pub fn parse_date(text: &str) -> Result<NaiveDate, ValidationError> {
    NaiveDate::parse_from_str(text.trim(), DATE_INPUT_FORMAT).map_err(|_| ValidationError::BadDate)
}

pub fn parse_date_time(text: &str) -> Result<NaiveDateTime, ValidationError> {
    NaiveDateTime::parse_from_str(text.trim(), DATE_TIME_INPUT_FORMAT)
        .map_err(|_| ValidationError::BadDateTime)
}

pub fn parse_required(text: &str) -> Result<String, ValidationError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::Required);
    }
    Ok(trimmed.to_string())
}

/// Blank input means "not provided".
pub fn parse_optional(text: &str) -> Option<String> {
    let trimmed = text.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// Line-oriented prompt over any reader/writer pair.
pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn output(&mut self) -> &mut W {
        &mut self.output
    }

    pub fn into_output(self) -> W {
        self.output
    }

    /// Print `prompt` and read one line. Fails with `InputClosed` at end of input.
    pub fn ask(&mut self, prompt: &str) -> Result<String, ShellError> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(ShellError::InputClosed);
        }
        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    }

    /// Ask until `parse` accepts the answer, echoing each rejection.
    pub fn ask_until<T>(
        &mut self,
        prompt: &str,
        parse: impl Fn(&str) -> Result<T, ValidationError>,
    ) -> Result<T, ShellError> {
        loop {
            let answer = self.ask(prompt)?;
            match parse(&answer) {
                Ok(value) => return Ok(value),
                Err(e) => writeln!(self.output, "{e}")?,
            }
        }
    }

    pub fn ask_required(&mut self, label: &str) -> Result<String, ShellError> {
        self.ask_until(&format!("{label}: "), parse_required)
    }

    pub fn ask_optional(&mut self, label: &str) -> Result<Option<String>, ShellError> {
        Ok(parse_optional(&self.ask(&format!("{label}: "))?))
    }

    pub fn ask_number(&mut self, label: &str) -> Result<i64, ShellError> {
        self.ask_until(&format!("{label}: "), parse_number)
    }

    pub fn ask_date(&mut self, label: &str) -> Result<NaiveDate, ShellError> {
        self.ask_until(&format!("{label} (YYYY-MM-DD): "), parse_date)
    }

    pub fn ask_date_time(&mut self, label: &str) -> Result<NaiveDateTime, ShellError> {
        self.ask_until(&format!("{label} (YYYY-MM-DD HH:MM): "), parse_date_time)
    }
}
